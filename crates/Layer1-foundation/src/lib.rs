//! # playfield-foundation
//!
//! Foundation layer for Playfield:
//! - Event: 이벤트 값 객체 + 도메인 이벤트 종류 (command, key, joystick, launch)
//! - EventTarget: 리스너 등록/제거 (addEventListener, on/one/off) + 동기 디스패치
//! - Config: 통합 설정 (PlayfieldConfig, TargetConfig)
//! - Storage: JsonStore (설정 파일)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Collaborators (메뉴/필터 스크립트, 입력 처리)             │
//! │        │ on / one / off          │ dispatch_event        │
//! │        ▼                         ▼                       │
//! │  ┌───────────────────────────────────────────────┐      │
//! │  │  main_window(): EventTarget (프로세스 전역)      │      │
//! │  │   type → [Registration{namespaces, listener,   │      │
//! │  │           options{data, once, capture}}]       │      │
//! │  └───────────────────────────────────────────────┘      │
//! │        │                                                 │
//! │        ▼                                                 │
//! │  bool: 기본 동작 진행 여부 (prevent_default 반영)          │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{
    PlayfieldConfig, TargetConfig, DEFAULT_TARGET_LABEL, MAIN_WINDOW_LABEL, PLAYFIELD_CONFIG_FILE,
};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::JsonStore;

// ============================================================================
// Event (이벤트 시스템)
// ============================================================================
pub use event::{
    // Global
    init_main_window,
    main_window,
    // Listener
    listener,
    Binding,
    EventListener,
    Listener,
    ListenerOptions,
    // Target
    EventSelector,
    EventTarget,
    // Types
    Event,
    EventDetail,
    EventInit,
    JoystickButton,
    KeyInfo,
    KeyLocation,
    TargetId,
};

// 사전 정의된 이벤트 생성자 (kinds::command::new 등)
pub use event::kinds;
