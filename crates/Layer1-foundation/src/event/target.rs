//! Event Target - 리스너 등록/제거 및 동기 디스패치
//!
//! 타입별 리스너 목록을 소유하고, 이벤트를 호출 스레드에서 동기적으로 전달합니다.
//! 리스너 호출 중에는 내부 락을 잡지 않으므로 리스너 안에서 같은 타겟에
//! 등록/제거/재디스패치를 해도 됩니다. 이런 변경은 현재 디스패치의 스냅샷에는
//! 반영되지 않고 이후 디스패치부터 적용됩니다.

use super::listener::{Binding, Listener};
use super::options::ListenerOptions;
use super::selector::EventSelector;
use super::types::{Event, TargetId};
use crate::config::TargetConfig;
use crate::Result;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace, warn};

// ============================================================================
// Registration
// ============================================================================

/// 등록 레코드
///
/// 스냅샷과 라이브 목록을 레코드 identity로 비교하기 위해 `Arc`로 공유합니다.
#[derive(Debug)]
struct Registration {
    namespaces: HashSet<String>,
    listener: Listener,
    options: ListenerOptions,
}

type ListenerMap = HashMap<String, Vec<Arc<Registration>>>;

// ============================================================================
// EventTarget
// ============================================================================

/// 이벤트 타겟
///
/// ## 사용법
///
/// ```ignore
/// use playfield_foundation::event::{kinds, listener, EventTarget};
///
/// let target = EventTarget::new();
///
/// // 리스너 등록
/// let veto = listener(|_, event| {
///     event.prevent_default();
///     Ok(())
/// });
/// target.on("command.menu", veto.clone());
///
/// // 디스패치 - false면 기본 동작을 건너뜀
/// let proceed = target.dispatch_event(&mut kinds::command::new(42))?;
///
/// // 네임스페이스로 제거
/// target.off(".menu", None);
/// ```
pub struct EventTarget {
    id: TargetId,
    config: TargetConfig,
    listeners: Mutex<ListenerMap>,
}

impl EventTarget {
    /// 기본 설정으로 타겟 생성
    pub fn new() -> Self {
        Self::with_config(TargetConfig::default())
    }

    /// 커스텀 설정으로 타겟 생성
    pub fn with_config(config: TargetConfig) -> Self {
        Self {
            id: TargetId::next(),
            config,
            listeners: Mutex::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn label(&self) -> &str {
        self.config.label_or_default()
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    // ========================================================================
    // 등록
    // ========================================================================

    /// 리스너 등록 (브라우저의 addEventListener와 동일)
    ///
    /// `options`는 생략(`ListenerOptions::default()`), bool(`capture`),
    /// 또는 [`ListenerOptions`]로 줄 수 있습니다. 중복 등록은 걸러내지 않습니다.
    pub fn add_event_listener(
        &self,
        event_type: &str,
        listener: &Listener,
        options: impl Into<ListenerOptions>,
    ) {
        self.add(event_type, HashSet::new(), listener.clone(), options.into());
    }

    /// jQuery 스타일 on(events, binding)
    ///
    /// `events`는 공백으로 구분된 `type.ns1.ns2` 목록입니다.
    pub fn on(&self, events: &str, binding: impl Into<Binding>) {
        self.bind(events, binding.into(), false);
    }

    /// jQuery 스타일 one(events, binding) - 한 번만 호출되는 on()
    pub fn one(&self, events: &str, binding: impl Into<Binding>) {
        self.bind(events, binding.into(), true);
    }

    fn bind(&self, events: &str, binding: Binding, once: bool) {
        let options = ListenerOptions {
            data: binding.data,
            once,
            capture: false,
        };

        for selector in EventSelector::parse_list(events) {
            self.add(
                &selector.event_type,
                selector.namespaces,
                binding.listener.clone(),
                options.clone(),
            );
        }
    }

    fn add(
        &self,
        event_type: &str,
        namespaces: HashSet<String>,
        listener: Listener,
        options: ListenerOptions,
    ) {
        debug!(
            target_id = %self.id,
            event_type,
            listener_name = listener.name(),
            namespaces = ?namespaces,
            once = options.once,
            "Registering event listener"
        );

        let registration = Arc::new(Registration {
            namespaces,
            listener,
            options,
        });

        self.listeners
            .lock()
            .entry(event_type.to_string())
            .or_default()
            .push(registration);
    }

    // ========================================================================
    // 제거
    // ========================================================================

    /// jQuery 스타일 off(events, listener)
    ///
    /// - 타입이 비어 있으면 (`".ns"`, `""`) 모든 타입에 적용
    /// - `listener`가 주어지면 identity가 같은 레코드만
    /// - 네임스페이스가 주어지면 하나라도 겹치는 레코드만
    ///
    /// 일치하는 레코드가 없으면 아무 일도 하지 않습니다.
    pub fn off(&self, events: &str, listener: Option<&Listener>) {
        let mut map = self.listeners.lock();

        for selector in EventSelector::parse_list(events) {
            let matches = |reg: &Registration| {
                listener.map_or(true, |l| l.same_as(&reg.listener))
                    && selector.matches_namespaces(&reg.namespaces)
            };

            let removed = if selector.is_all_types() {
                map.values_mut()
                    .map(|list| remove_matching(list, &matches))
                    .sum::<usize>()
            } else {
                map.get_mut(&selector.event_type)
                    .map_or(0, |list| remove_matching(list, &matches))
            };

            debug!(
                target_id = %self.id,
                event_type = %selector.event_type,
                namespaces = ?selector.namespaces,
                removed,
                "Removed event listeners"
            );
        }
    }

    /// 리스너 제거 (브라우저의 removeEventListener와 동일)
    ///
    /// listener identity와 `capture` 값이 모두 같은 레코드를 전부 제거합니다.
    /// 네임스페이스는 보지 않습니다.
    pub fn remove_event_listener(
        &self,
        event_type: &str,
        listener: &Listener,
        options: impl Into<ListenerOptions>,
    ) {
        let capture = options.into().capture;
        let mut map = self.listeners.lock();

        if let Some(list) = map.get_mut(event_type) {
            let removed = remove_matching(list, &|reg: &Registration| {
                reg.listener.same_as(listener) && reg.options.capture == capture
            });

            debug!(
                target_id = %self.id,
                event_type,
                capture,
                removed,
                "Removed event listener"
            );
        }
    }

    // ========================================================================
    // 디스패치
    // ========================================================================

    /// 이벤트 디스패치
    ///
    /// 등록 순서대로 리스너를 호출하고, 시스템 기본 동작을 진행해도 되는지 반환합니다.
    /// (`false` = cancelable 이벤트에서 누군가 `prevent_default`를 호출함)
    ///
    /// 리스너가 에러를 반환하면 남은 리스너는 호출하지 않고 에러를 그대로 전파합니다.
    /// 이미 적용된 once 제거와 이벤트 플래그는 되돌리지 않습니다.
    pub fn dispatch_event(&self, event: &mut Event) -> Result<bool> {
        // 라이브 목록이 아니라 복사본을 순회
        let snapshot = self.listeners.lock().get(event.event_type()).cloned();

        if let Some(snapshot) = snapshot {
            event.set_target(self.id);

            for registration in snapshot {
                event.data = registration.options.data.clone();

                if self.config.is_tracing() {
                    trace!(
                        target_id = %self.id,
                        event_type = event.event_type(),
                        listener_name = registration.listener.name(),
                        "Invoking event listener"
                    );
                }

                if let Err(e) = registration.listener.invoke(self, event) {
                    warn!(
                        target_id = %self.id,
                        event_type = event.event_type(),
                        listener_name = registration.listener.name(),
                        error = %e,
                        "Event listener failed"
                    );
                    return Err(e);
                }

                if registration.options.once {
                    self.remove_registration(event.event_type(), &registration);
                }

                if event.immediate_propagation_stopped() {
                    break;
                }
            }
        }

        Ok(event.default_allowed())
    }

    /// once 리스너 제거 - 라이브 목록에서 같은 레코드 하나만
    fn remove_registration(&self, event_type: &str, registration: &Arc<Registration>) {
        let mut map = self.listeners.lock();
        if let Some(list) = map.get_mut(event_type) {
            if let Some(pos) = list.iter().position(|r| Arc::ptr_eq(r, registration)) {
                list.remove(pos);
            }
        }
    }

    // ========================================================================
    // 조회
    // ========================================================================

    /// 해당 타입에 등록된 리스너 수
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.lock().get(event_type).map_or(0, Vec::len)
    }

    pub fn has_listeners(&self, event_type: &str) -> bool {
        self.listener_count(event_type) > 0
    }

    /// 리스너가 하나 이상 남아 있는 타입 목록 (정렬됨)
    pub fn event_types(&self) -> Vec<String> {
        let map = self.listeners.lock();
        let mut types: Vec<String> = map
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(t, _)| t.clone())
            .collect();
        types.sort();
        types
    }
}

impl Default for EventTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTarget")
            .field("id", &self.id)
            .field("label", &self.label())
            .field("event_types", &self.event_types())
            .finish()
    }
}

/// 조건에 맞는 레코드를 순서를 유지한 채 제거하고 제거 개수를 반환
fn remove_matching(
    list: &mut Vec<Arc<Registration>>,
    matches: &dyn Fn(&Registration) -> bool,
) -> usize {
    let before = list.len();
    list.retain(|reg| !matches(reg));
    before - list.len()
}

// ============================================================================
// 테스트
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::listener::listener;
    use crate::event::types::EventInit;
    use crate::Error;

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn recorder(log: &Log, name: &'static str) -> Listener {
        let log = log.clone();
        Listener::named(name, move |_, _| {
            log.lock().push(name);
            Ok(())
        })
    }

    fn calls(log: &Log) -> Vec<&'static str> {
        std::mem::take(&mut *log.lock())
    }

    fn event(event_type: &str) -> Event {
        Event::new(event_type, EventInit::default())
    }

    #[test]
    fn test_registration_order() {
        let target = EventTarget::new();
        let log = Log::default();

        target.add_event_listener("x", &recorder(&log, "a"), ListenerOptions::default());
        target.on("x", recorder(&log, "b"));
        target.add_event_listener("x", &recorder(&log, "c"), false);

        assert!(target.dispatch_event(&mut event("x")).unwrap());
        assert_eq!(calls(&log), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dispatch_sets_target() {
        let target = EventTarget::new();
        let mut ev = event("x");

        // 리스너가 없으면 target을 설정하지 않음
        target.dispatch_event(&mut ev).unwrap();
        assert!(ev.target().is_none());

        target.on("x", listener(|_, _| Ok(())));
        target.dispatch_event(&mut ev).unwrap();
        assert_eq!(ev.target(), Some(target.id()));
        assert_eq!(ev.current_target(), Some(target.id()));
    }

    #[test]
    fn test_duplicate_registration_fires_twice() {
        let target = EventTarget::new();
        let log = Log::default();
        let a = recorder(&log, "a");

        target.add_event_listener("x", &a, ListenerOptions::default());
        target.add_event_listener("x", &a, ListenerOptions::default());
        target.dispatch_event(&mut event("x")).unwrap();

        assert_eq!(calls(&log), vec!["a", "a"]);
    }

    #[test]
    fn test_data_per_listener() {
        let target = EventTarget::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let push = {
            let seen = seen.clone();
            listener(move |_, event| {
                seen.lock().push(event.data().cloned());
                Ok(())
            })
        };

        target.on("x", Binding::new(push.clone()).with_data(serde_json::json!("first")));
        target.on("x", push.clone());
        target.add_event_listener(
            "x",
            &push,
            ListenerOptions::new().data(serde_json::json!(3)),
        );
        target.dispatch_event(&mut event("x")).unwrap();

        assert_eq!(
            *seen.lock(),
            vec![
                Some(serde_json::json!("first")),
                None,
                Some(serde_json::json!(3))
            ]
        );
    }

    #[test]
    fn test_on_fans_out_to_types() {
        let target = EventTarget::new();
        let log = Log::default();

        target.on("keydown.ui keyup.ui", recorder(&log, "k"));
        assert_eq!(target.event_types(), vec!["keydown", "keyup"]);

        target.dispatch_event(&mut event("keyup")).unwrap();
        assert_eq!(calls(&log), vec!["k"]);

        target.off(".ui", None);
        assert!(target.event_types().is_empty());
    }

    #[test]
    fn test_remove_event_listener_matches_capture() {
        let target = EventTarget::new();
        let log = Log::default();
        let a = recorder(&log, "a");

        target.add_event_listener("x", &a, true);
        target.add_event_listener("x", &a, ListenerOptions::default());

        // capture 불일치 → capture=false 레코드만 제거
        target.remove_event_listener("x", &a, ListenerOptions::default());
        assert_eq!(target.listener_count("x"), 1);

        target.remove_event_listener("x", &a, ListenerOptions::new().capture(true));
        assert_eq!(target.listener_count("x"), 0);
    }

    #[test]
    fn test_remove_event_listener_ignores_namespaces() {
        let target = EventTarget::new();
        let log = Log::default();
        let a = recorder(&log, "a");

        target.on("x.menu", a.clone());
        target.remove_event_listener("x", &a, false);
        assert_eq!(target.listener_count("x"), 0);
    }

    #[test]
    fn test_removal_without_match_is_noop() {
        let target = EventTarget::new();
        let log = Log::default();
        let a = recorder(&log, "a");
        let stranger = recorder(&log, "stranger");

        target.on("x.ns1", a);
        target.off("y", None);
        target.off("x.ns9", None);
        target.off("x", Some(&stranger));
        target.remove_event_listener("x", &stranger, false);
        target.remove_event_listener("nothing", &stranger, ListenerOptions::default());

        assert_eq!(target.listener_count("x"), 1);
    }

    #[test]
    fn test_stop_propagation_does_not_truncate() {
        let target = EventTarget::new();
        let log = Log::default();

        target.on(
            "x",
            listener(|_, event| {
                event.stop_propagation();
                Ok(())
            }),
        );
        target.on("x", recorder(&log, "b"));

        let mut ev = event("x");
        target.dispatch_event(&mut ev).unwrap();
        assert!(ev.propagation_stopped());
        assert_eq!(calls(&log), vec!["b"]);
    }

    #[test]
    fn test_failing_listener_propagates() {
        let target = EventTarget::new();
        let log = Log::default();

        target.on("x", recorder(&log, "a"));
        target.on("x", listener(|_, event| Err(Error::listener(event.event_type(), "bad"))));
        target.on("x", recorder(&log, "c"));

        let err = target.dispatch_event(&mut event("x")).unwrap_err();
        assert!(err.is_listener_failure());
        assert_eq!(calls(&log), vec!["a"]);
    }

    #[test]
    fn test_failing_once_listener_is_kept() {
        let target = EventTarget::new();
        target.one("x", listener(|_, _| Err(Error::listener("x", "nope"))));

        assert!(target.dispatch_event(&mut event("x")).is_err());
        assert_eq!(target.listener_count("x"), 1);
    }
}
