//! Event Kinds - 메인 윈도우에서 발생하는 도메인 이벤트
//!
//! 모든 도메인 이벤트는 기본 [`Event::new`]로 먼저 만든 뒤 페이로드를 붙입니다.
//! 사전 정의된 종류는 모두 cancelable이며, 기본 동작(명령 실행, 게임 실행 등)은
//! `dispatch_event`가 false를 반환하면 호출자가 건너뜁니다.

use super::types::{Event, EventInit};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// 이벤트 타입 이름
// ============================================================================

pub const COMMAND: &str = "command";
pub const KEY_DOWN: &str = "keydown";
pub const KEY_UP: &str = "keyup";
pub const JOYSTICK_BUTTON_DOWN: &str = "joystickbuttondown";
pub const JOYSTICK_BUTTON_UP: &str = "joystickbuttonup";
pub const LAUNCH: &str = "launch";

/// 사전 정의된 이벤트 타입 전체
pub const BUILTIN_TYPES: [&str; 6] = [
    COMMAND,
    KEY_DOWN,
    KEY_UP,
    JOYSTICK_BUTTON_DOWN,
    JOYSTICK_BUTTON_UP,
    LAUNCH,
];

// ============================================================================
// Key Location
// ============================================================================

/// 키 위치 코드
///
/// 직렬화는 DOM과 같은 숫자 코드(0-3)이고, 역직렬화는 숫자 코드와 이름(`"numpad"`)을 모두 받습니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LocationRepr", into = "u8")]
pub enum KeyLocation {
    #[default]
    Standard = 0,
    Left = 1,
    Right = 2,
    Numpad = 3,
}

impl KeyLocation {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Standard),
            1 => Some(Self::Left),
            2 => Some(Self::Right),
            3 => Some(Self::Numpad),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "numpad" => Some(Self::Numpad),
            _ => None,
        }
    }
}

impl From<KeyLocation> for u8 {
    fn from(location: KeyLocation) -> Self {
        location.code()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocationRepr {
    Code(u8),
    Name(String),
}

impl TryFrom<LocationRepr> for KeyLocation {
    type Error = String;

    fn try_from(repr: LocationRepr) -> Result<Self, Self::Error> {
        match repr {
            LocationRepr::Code(code) => {
                Self::from_code(code).ok_or_else(|| format!("invalid key location code {}", code))
            }
            LocationRepr::Name(name) => {
                Self::from_name(&name).ok_or_else(|| format!("invalid key location '{}'", name))
            }
        }
    }
}

// 브라우저 이름 별칭
pub const DOM_KEY_LOCATION_STANDARD: u8 = KeyLocation::Standard as u8;
pub const DOM_KEY_LOCATION_LEFT: u8 = KeyLocation::Left as u8;
pub const DOM_KEY_LOCATION_RIGHT: u8 = KeyLocation::Right as u8;
pub const DOM_KEY_LOCATION_NUMPAD: u8 = KeyLocation::Numpad as u8;

// ============================================================================
// EventDetail
// ============================================================================

/// 키보드 이벤트 페이로드
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    /// 가상 키 코드
    pub vkey: i32,
    /// 키 이름 (예: "Enter")
    #[serde(default)]
    pub key: String,
    /// 물리 키 코드 (예: "NumpadEnter")
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub location: KeyLocation,
    #[serde(default)]
    pub repeat: bool,
    /// 앱이 포그라운드가 아닐 때 들어온 입력
    #[serde(default)]
    pub background: bool,
}

/// 조이스틱 버튼 이벤트 페이로드
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoystickButton {
    pub unit: i32,
    pub button: i32,
    #[serde(default)]
    pub repeat: bool,
    #[serde(default)]
    pub background: bool,
}

/// 이벤트 도메인 페이로드
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDetail {
    /// 페이로드 없음
    #[default]
    None,
    /// 버튼에 매핑된 명령
    Command { command: i32 },
    Key(KeyInfo),
    JoystickButton(JoystickButton),
    /// 게임 실행 직전
    Launch,
    /// 사용자 정의 페이로드
    Custom { value: Value },
}

impl EventDetail {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn as_command(&self) -> Option<i32> {
        match self {
            Self::Command { command } => Some(*command),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&KeyInfo> {
        match self {
            Self::Key(info) => Some(info),
            _ => None,
        }
    }

    pub fn as_joystick_button(&self) -> Option<&JoystickButton> {
        match self {
            Self::JoystickButton(button) => Some(button),
            _ => None,
        }
    }
}

// ============================================================================
// 사전 정의된 이벤트 생성자들
// ============================================================================

fn cancelable() -> EventInit {
    EventInit::new().cancelable(true)
}

/// 명령 이벤트 (기본 동작: 명령 실행)
pub mod command {
    use super::*;

    pub fn new(command: i32) -> Event {
        Event::new(COMMAND, cancelable()).with_detail(EventDetail::Command { command })
    }
}

/// 키보드 이벤트
pub mod key {
    use super::*;

    pub fn down(info: KeyInfo) -> Event {
        Event::new(KEY_DOWN, cancelable()).with_detail(EventDetail::Key(info))
    }

    pub fn up(info: KeyInfo) -> Event {
        Event::new(KEY_UP, cancelable()).with_detail(EventDetail::Key(info))
    }
}

/// 조이스틱 버튼 이벤트
pub mod joystick {
    use super::*;

    pub fn button_down(button: JoystickButton) -> Event {
        Event::new(JOYSTICK_BUTTON_DOWN, cancelable())
            .with_detail(EventDetail::JoystickButton(button))
    }

    pub fn button_up(button: JoystickButton) -> Event {
        Event::new(JOYSTICK_BUTTON_UP, cancelable())
            .with_detail(EventDetail::JoystickButton(button))
    }
}

/// 게임 실행 이벤트 (기본 동작: 게임 실행)
pub mod launch {
    use super::*;

    pub fn new() -> Event {
        Event::new(LAUNCH, cancelable()).with_detail(EventDetail::Launch)
    }
}

/// 사용자 정의 이벤트
pub fn custom(event_type: impl Into<String>, init: EventInit, value: Value) -> Event {
    Event::new(event_type, init).with_detail(EventDetail::Custom { value })
}

// ============================================================================
// 테스트
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_event() {
        let event = command::new(42);
        assert_eq!(event.event_type(), COMMAND);
        assert!(event.cancelable());
        assert_eq!(event.detail().as_command(), Some(42));
    }

    #[test]
    fn test_key_events() {
        let info = KeyInfo {
            vkey: 13,
            key: "Enter".to_string(),
            code: "NumpadEnter".to_string(),
            location: KeyLocation::Numpad,
            ..Default::default()
        };
        let down = key::down(info.clone());
        let up = key::up(info);

        assert_eq!(down.event_type(), KEY_DOWN);
        assert_eq!(up.event_type(), KEY_UP);
        assert_eq!(down.detail().as_key().map(|k| k.location.code()), Some(3));
    }

    #[test]
    fn test_joystick_keeps_payload() {
        let event = joystick::button_down(JoystickButton {
            unit: 1,
            button: 7,
            ..Default::default()
        });
        let button = event.detail().as_joystick_button().copied();
        assert_eq!(button.map(|b| (b.unit, b.button)), Some((1, 7)));
    }

    #[test]
    fn test_key_location_codes() {
        assert_eq!(DOM_KEY_LOCATION_RIGHT, 2);
        assert_eq!(KeyLocation::from_code(1), Some(KeyLocation::Left));
        assert_eq!(KeyLocation::from_code(9), None);
    }

    #[test]
    fn test_key_location_numeric_form() {
        let info: KeyInfo = serde_json::from_value(serde_json::json!({
            "vkey": 13, "key": "Enter", "code": "NumpadEnter", "location": 3
        }))
        .unwrap();
        assert_eq!(info.location, KeyLocation::Numpad);

        let by_name: KeyLocation = serde_json::from_value(serde_json::json!("left")).unwrap();
        assert_eq!(by_name, KeyLocation::Left);

        assert_eq!(serde_json::to_value(KeyLocation::Right).unwrap(), serde_json::json!(2));
        assert!(serde_json::from_value::<KeyLocation>(serde_json::json!(4)).is_err());
        assert!(serde_json::from_value::<KeyLocation>(serde_json::json!("middle")).is_err());
    }

    #[test]
    fn test_detail_serde_tag() {
        let json = serde_json::to_value(EventDetail::Command { command: 5 }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "command", "command": 5}));

        let parsed: EventDetail = serde_json::from_value(serde_json::json!({
            "kind": "joystick_button", "unit": 0, "button": 3
        }))
        .unwrap();
        assert_eq!(parsed.as_joystick_button().map(|b| b.button), Some(3));
    }
}
