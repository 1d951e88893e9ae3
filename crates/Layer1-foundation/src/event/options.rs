//! Listener Options - 리스너 등록 옵션 정규화
//!
//! 브라우저 호환을 위해 옵션은 bool(`capture` 값) 또는 옵션 객체로 받을 수 있고,
//! 내부에서는 항상 [`ListenerOptions`] 형태로 정규화합니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 리스너 등록 옵션
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListenerOptions {
    /// 호출될 때마다 `event.data`로 전달되는 값
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// 첫 호출 후 자동 제거
    #[serde(default)]
    pub once: bool,

    /// 제거 시 식별에만 사용 (캡처 단계 순서는 구현하지 않음)
    #[serde(default)]
    pub capture: bool,
}

impl ListenerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    /// 동적 값에서 옵션 정규화
    ///
    /// - `true` / `false` → `{ capture }`
    /// - 객체 → `capture`, `once`, `data` 필드 읽기
    /// - 그 외 (null, 숫자, 문자열, 배열) → 기본 옵션
    ///
    /// 잘못된 형식도 에러 없이 기본값으로 처리합니다.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(capture) => Self::new().capture(*capture),
            Value::Object(map) => Self {
                data: map.get("data").filter(|v| !v.is_null()).cloned(),
                once: map.get("once").and_then(Value::as_bool).unwrap_or(false),
                capture: map.get("capture").and_then(Value::as_bool).unwrap_or(false),
            },
            _ => Self::default(),
        }
    }
}

impl From<bool> for ListenerOptions {
    fn from(capture: bool) -> Self {
        Self::new().capture(capture)
    }
}

impl From<Option<ListenerOptions>> for ListenerOptions {
    fn from(options: Option<ListenerOptions>) -> Self {
        options.unwrap_or_default()
    }
}

impl From<&Value> for ListenerOptions {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}
