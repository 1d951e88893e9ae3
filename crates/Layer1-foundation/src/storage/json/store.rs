use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;

/// 프로젝트 설정 디렉토리 이름
const PROJECT_DIR: &str = ".playfield";

/// 글로벌 설정 디렉토리 이름 (`dirs::config_dir()` 아래)
const GLOBAL_DIR: &str = "playfield";

/// 디렉토리 하나에 묶인 JSON 파일 저장소
///
/// 읽기 실패는 `Error::Io`, 파싱 실패는 `Error::Json`으로 올라갑니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 글로벌 저장소 (~/.config/playfield/)
    pub fn global() -> Result<Self> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join(GLOBAL_DIR)))
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))
    }

    /// `root` 아래 프로젝트 저장소 (.playfield/)
    pub fn project(root: impl Into<PathBuf>) -> Self {
        Self::new(root.into().join(PROJECT_DIR))
    }

    /// 현재 디렉토리의 프로젝트 저장소
    pub fn current_project() -> Result<Self> {
        Ok(Self::project(std::env::current_dir()?))
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    /// 파일을 읽어 역직렬화 (없으면 None)
    pub fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match std::fs::read_to_string(self.path(name)) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// pretty JSON으로 기록하고 파일 경로를 반환 (디렉토리는 필요 시 생성)
    pub fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path(name);
        std::fs::write(&path, serde_json::to_string_pretty(value)?)?;
        Ok(path)
    }
}
