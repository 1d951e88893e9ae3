//! Event System - 이벤트 등록/제거/디스패치
//!
//! 웹 페이지 이벤트 모델을 본뜬 동기 이벤트 시스템입니다.
//! DOM 트리는 없으며, 타겟 간 전파는 호출자가 담당합니다.
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        EventTarget                           │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  "command"  → [A, B(once), C]                          │  │
//! │  │  "keydown"  → [D.menu, E]                              │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │         │ dispatch_event(&mut event)                         │
//! │         ▼                                                    │
//! │   snapshot → A → B (once 제거) → C  ──►  default allowed?    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 사용법
//!
//! ```ignore
//! use playfield_foundation::event::{kinds, listener, main_window, Binding};
//!
//! // 1. 리스너 생성
//! let on_command = listener(|_target, event| {
//!     if event.detail().as_command() == Some(40000) {
//!         event.prevent_default();
//!     }
//!     Ok(())
//! });
//!
//! // 2. 네임스페이스와 데이터를 붙여 등록
//! let window = main_window();
//! window.on("command.filters", Binding::new(on_command).with_data(json!({"menu": "main"})));
//!
//! // 3. 디스패치 - false면 기본 동작(명령 실행)을 건너뜀
//! let run_default = window.dispatch_event(&mut kinds::command::new(40000))?;
//!
//! // 4. 네임스페이스로 일괄 제거
//! window.off(".filters", None);
//! ```

pub mod kinds;
pub mod listener;
pub mod options;
pub mod selector;
pub mod target;
pub mod types;
pub mod window;

// Re-exports
pub use kinds::{EventDetail, JoystickButton, KeyInfo, KeyLocation};
pub use listener::{listener, Binding, EventListener, Listener};
pub use options::ListenerOptions;
pub use selector::EventSelector;
pub use target::EventTarget;
pub use types::{Event, EventInit, TargetId};
pub use window::{init_main_window, main_window};
