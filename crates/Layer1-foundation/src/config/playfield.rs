//! Playfield Config - 통합 설정
//!
//! 글로벌(`~/.config/playfield/`) + 프로젝트(`.playfield/`) 설정을 병합합니다.

use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 설정 파일명
pub const PLAYFIELD_CONFIG_FILE: &str = "config.json";

/// 메인 윈도우 기본 라벨
pub const MAIN_WINDOW_LABEL: &str = "mainWindow";

/// 라벨이 없는 타겟의 기본 라벨
pub const DEFAULT_TARGET_LABEL: &str = "eventTarget";

// ============================================================================
// Playfield Config (통합)
// ============================================================================

/// Playfield 통합 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayfieldConfig {
    /// 버전 (마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,

    /// 메인 윈도우 타겟 설정
    #[serde(default)]
    pub main_window: TargetConfig,

    /// 로그 레벨 (RUST_LOG가 없을 때 사용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl PlayfieldConfig {
    pub fn new() -> Self {
        Self {
            version: default_version(),
            main_window: TargetConfig::default(),
            log_level: None,
        }
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        // 1. 글로벌 설정
        if let Ok(global) = JsonStore::global() {
            if let Some(global_config) = global.read::<Self>(PLAYFIELD_CONFIG_FILE)? {
                config.merge(global_config);
            }
        }

        // 2. 프로젝트 설정
        if let Ok(project) = JsonStore::current_project() {
            if let Some(project_config) = project.read::<Self>(PLAYFIELD_CONFIG_FILE)? {
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// 지정한 저장소에서만 로드 (없으면 기본값)
    pub fn load_from(store: &JsonStore) -> Result<Self> {
        let mut config = Self::new();
        if let Some(loaded) = store.read::<Self>(PLAYFIELD_CONFIG_FILE)? {
            config.merge(loaded);
        }
        Ok(config)
    }

    /// 저장소에 저장하고 파일 경로 반환
    pub fn save_to(&self, store: &JsonStore) -> Result<PathBuf> {
        store.write(PLAYFIELD_CONFIG_FILE, self)
    }

    /// `playfield config init`이 쓰는 초기 설정 (라벨/트레이스를 명시)
    pub fn starter() -> Self {
        Self {
            main_window: TargetConfig::main_window().trace_dispatch(false),
            ..Self::new().log_level("info")
        }
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: PlayfieldConfig) {
        self.version = self.version.max(other.version);
        self.main_window.merge(other.main_window);
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Target Config
// ============================================================================

/// EventTarget 설정
///
/// 필드가 None이면 병합 시 덮어쓰지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfig {
    /// 로그에 표시할 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// 리스너 호출마다 trace 로그 출력
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_dispatch: Option<bool>,
}

impl TargetConfig {
    /// 메인 윈도우용 기본 설정
    pub fn main_window() -> Self {
        Self::default().label(MAIN_WINDOW_LABEL)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn trace_dispatch(mut self, enabled: bool) -> Self {
        self.trace_dispatch = Some(enabled);
        self
    }

    /// 라벨이 없으면 `fallback` 사용
    pub fn or_label(mut self, fallback: &str) -> Self {
        if self.label.is_none() {
            self.label = Some(fallback.to_string());
        }
        self
    }

    pub fn label_or_default(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_TARGET_LABEL)
    }

    pub fn is_tracing(&self) -> bool {
        self.trace_dispatch.unwrap_or(false)
    }

    /// 병합 (other에 설정된 값이 우선)
    pub fn merge(&mut self, other: TargetConfig) {
        if other.label.is_some() {
            self.label = other.label;
        }
        if other.trace_dispatch.is_some() {
            self.trace_dispatch = other.trace_dispatch;
        }
    }
}

fn default_version() -> u32 {
    1
}

// ============================================================================
// 테스트
// ============================================================================
