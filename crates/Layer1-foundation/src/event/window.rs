//! Main Window - 프로세스 전역 EventTarget
//!
//! 애플리케이션 수준의 모든 이벤트(명령, 키 입력, 게임 실행 등)는 이 타겟을 통해
//! 디스패치됩니다. 한 번 생성되면 프로세스가 끝날 때까지 유지됩니다.

use super::target::EventTarget;
use crate::config::{TargetConfig, MAIN_WINDOW_LABEL};
use std::sync::{Arc, OnceLock};

static MAIN_WINDOW: OnceLock<Arc<EventTarget>> = OnceLock::new();

/// 메인 윈도우 초기화
///
/// 이미 생성된 경우 기존 인스턴스를 반환하고 `config`는 무시합니다.
pub fn init_main_window(config: TargetConfig) -> Arc<EventTarget> {
    MAIN_WINDOW
        .get_or_init(|| {
            Arc::new(EventTarget::with_config(config.or_label(MAIN_WINDOW_LABEL)))
        })
        .clone()
}

/// 메인 윈도우 가져오기 (없으면 기본 설정으로 생성)
pub fn main_window() -> Arc<EventTarget> {
    MAIN_WINDOW
        .get_or_init(|| Arc::new(EventTarget::with_config(TargetConfig::main_window())))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_window_is_singleton() {
        let a = main_window();
        let b = init_main_window(TargetConfig::default().label("ignored"));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.id(), main_window().id());
    }
}
