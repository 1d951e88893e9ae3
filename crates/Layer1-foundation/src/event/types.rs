//! Event Types - 이벤트 값 객체
//!
//! 브라우저의 `Event`를 모델로 한 기본 이벤트 타입입니다.
//! `type`, `bubbles`, `cancelable`, `time_stamp`는 생성 후 바뀌지 않고,
//! 디스패치 상태 플래그는 false → true 방향으로만 전이합니다.

use super::kinds::EventDetail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// Target ID
// ============================================================================

/// EventTarget 고유 ID
///
/// 이벤트의 `target` / `current_target`은 타겟 자체가 아니라 이 ID를 가리킵니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(u64);

static TARGET_COUNTER: AtomicU64 = AtomicU64::new(1);

impl TargetId {
    /// 새 타겟 ID 할당 (프로세스 내 유일)
    pub(crate) fn next() -> Self {
        Self(TARGET_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "target-{}", self.0)
    }
}

// ============================================================================
// EventInit
// ============================================================================

/// 이벤트 생성 옵션
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInit {
    /// 버블링 의도 (정보용, 코어는 계층을 순회하지 않음)
    #[serde(default)]
    pub bubbles: bool,

    /// `prevent_default` 적용 가능 여부
    #[serde(default)]
    pub cancelable: bool,
}

impl EventInit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }
}

// ============================================================================
// Event
// ============================================================================

/// 하나의 발생(occurrence)을 나타내는 이벤트
///
/// 도메인 이벤트는 기본 생성자로 만든 뒤 [`Event::with_detail`]로 페이로드를 붙입니다.
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    bubbles: bool,
    cancelable: bool,
    timestamp: DateTime<Utc>,

    target: Option<TargetId>,
    current_target: Option<TargetId>,

    /// 현재 호출 중인 리스너의 등록 시점 데이터
    pub data: Option<Value>,

    detail: EventDetail,

    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
    default_prevented: bool,
}

impl Event {
    /// 새 이벤트 생성
    pub fn new(event_type: impl Into<String>, init: EventInit) -> Self {
        Self {
            event_type: event_type.into(),
            bubbles: init.bubbles,
            cancelable: init.cancelable,
            timestamp: Utc::now(),
            target: None,
            current_target: None,
            data: None,
            detail: EventDetail::None,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// 도메인 페이로드 설정
    pub fn with_detail(mut self, detail: EventDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// 생성 시각 (Unix epoch 기준 밀리초)
    pub fn time_stamp(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// 디스패치 중인 타겟 (디스패치 전에는 None)
    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn current_target(&self) -> Option<TargetId> {
        self.current_target
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn detail(&self) -> &EventDetail {
        &self.detail
    }

    // ========================================================================
    // 전파 제어
    // ========================================================================

    /// 시스템 기본 동작 취소 (cancelable 이벤트에만 효과)
    ///
    /// 다른 리스너로의 전파에는 영향을 주지 않습니다.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// 상위 타겟으로의 버블링 중단 표시
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// 같은 타겟의 남은 리스너 호출까지 모두 중단
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    pub fn immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped
    }

    /// 시스템 기본 동작을 진행해도 되는지
    pub fn default_allowed(&self) -> bool {
        !(self.cancelable && self.default_prevented)
    }

    pub(crate) fn set_target(&mut self, id: TargetId) {
        self.target = Some(id);
        self.current_target = Some(id);
    }
}

// ============================================================================
// 테스트
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = Event::new("keydown", EventInit::new().cancelable(true));

        assert_eq!(event.event_type(), "keydown");
        assert!(event.cancelable());
        assert!(!event.bubbles());
        assert!(event.target().is_none());
        assert!(event.current_target().is_none());
        assert!(event.time_stamp() > 0);
        assert!(event.detail().is_none());
    }

    #[test]
    fn test_prevent_default_requires_cancelable() {
        let mut plain = Event::new("x", EventInit::default());
        plain.prevent_default();
        assert!(!plain.default_prevented());
        assert!(plain.default_allowed());

        let mut cancelable = Event::new("x", EventInit::new().cancelable(true));
        cancelable.prevent_default();
        assert!(cancelable.default_prevented());
        assert!(!cancelable.default_allowed());
    }

    #[test]
    fn test_stop_immediate_implies_stop() {
        let mut event = Event::new("x", EventInit::default());
        event.stop_propagation();
        assert!(event.propagation_stopped());
        assert!(!event.immediate_propagation_stopped());

        event.stop_immediate_propagation();
        assert!(event.propagation_stopped());
        assert!(event.immediate_propagation_stopped());
    }

    #[test]
    fn test_target_ids_are_unique() {
        let a = TargetId::next();
        let b = TargetId::next();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("target-"));
    }
}
