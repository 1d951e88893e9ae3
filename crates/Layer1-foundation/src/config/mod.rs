//! Config - 통합 설정 관리
//!
//! - `playfield.rs` - PlayfieldConfig 통합 설정 + TargetConfig

mod playfield;

pub use playfield::{
    PlayfieldConfig, TargetConfig, DEFAULT_TARGET_LABEL, MAIN_WINDOW_LABEL, PLAYFIELD_CONFIG_FILE,
};
