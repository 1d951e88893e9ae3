//! Event Listener - 리스너 capability 및 핸들

use super::target::EventTarget;
use super::types::Event;
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

// ============================================================================
// EventListener Trait
// ============================================================================

/// 이벤트 리스너 trait
///
/// 디스패치 중인 타겟이 receiver로 함께 전달됩니다. `Err`를 반환하면
/// 디스패치는 즉시 중단되고 에러가 `dispatch_event` 호출자에게 전파됩니다.
pub trait EventListener: Send + Sync {
    /// 리스너 이름 (디버깅용)
    fn name(&self) -> &str {
        "anonymous"
    }

    /// 이벤트 처리
    fn handle_event(&self, target: &EventTarget, event: &mut Event) -> Result<()>;
}

impl<F> EventListener for F
where
    F: Fn(&EventTarget, &mut Event) -> Result<()> + Send + Sync,
{
    fn handle_event(&self, target: &EventTarget, event: &mut Event) -> Result<()> {
        self(target, event)
    }
}

struct NamedListener<F> {
    name: String,
    func: F,
}

impl<F> EventListener for NamedListener<F>
where
    F: Fn(&EventTarget, &mut Event) -> Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn handle_event(&self, target: &EventTarget, event: &mut Event) -> Result<()> {
        (self.func)(target, event)
    }
}

// ============================================================================
// Listener (핸들)
// ============================================================================

/// 등록/제거에 사용하는 리스너 핸들
///
/// 복제본끼리는 같은 리스너로 취급됩니다. 제거는 값이 아니라 핸들의 identity로 비교합니다.
#[derive(Clone)]
pub struct Listener {
    inner: Arc<dyn EventListener>,
}

impl Listener {
    pub fn new(listener: impl EventListener + 'static) -> Self {
        Self {
            inner: Arc::new(listener),
        }
    }

    /// 이름이 붙은 클로저 리스너
    pub fn named<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&EventTarget, &mut Event) -> Result<()> + Send + Sync + 'static,
    {
        Self::new(NamedListener {
            name: name.into(),
            func,
        })
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// 같은 리스너인지 (identity 비교)
    pub fn same_as(&self, other: &Listener) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.inner) as *const (),
            Arc::as_ptr(&other.inner) as *const (),
        )
    }

    pub(crate) fn invoke(&self, target: &EventTarget, event: &mut Event) -> Result<()> {
        self.inner.handle_event(target, event)
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("name", &self.name())
            .field("ptr", &(Arc::as_ptr(&self.inner) as *const ()))
            .finish()
    }
}

/// 클로저로 리스너 생성 (편의 함수)
pub fn listener<F>(func: F) -> Listener
where
    F: Fn(&EventTarget, &mut Event) -> Result<()> + Send + Sync + 'static,
{
    Listener::new(func)
}

// ============================================================================
// Binding - on()/one() 인자
// ============================================================================

/// `on` / `one`에 넘기는 리스너 + 선택적 데이터
#[derive(Debug, Clone)]
pub struct Binding {
    pub data: Option<Value>,
    pub listener: Listener,
}

impl Binding {
    pub fn new(listener: Listener) -> Self {
        Self {
            data: None,
            listener,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<Listener> for Binding {
    fn from(listener: Listener) -> Self {
        Self::new(listener)
    }
}

impl From<&Listener> for Binding {
    fn from(listener: &Listener) -> Self {
        Self::new(listener.clone())
    }
}
