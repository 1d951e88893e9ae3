//! Event Selector - jQuery 스타일 `"type.ns1.ns2"` 파싱

use std::collections::HashSet;

/// 이벤트 타입 + 네임스페이스 집합
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSelector {
    /// 이벤트 타입 (빈 문자열이면 off()에서 모든 타입)
    pub event_type: String,
    pub namespaces: HashSet<String>,
}

impl EventSelector {
    /// `"click.foo.bar"` → (`click`, {`foo`, `bar`})
    pub fn parse(selector: &str) -> Self {
        let mut parts = selector.split('.');
        let event_type = parts.next().unwrap_or_default().to_string();
        Self {
            event_type,
            namespaces: parts.map(str::to_string).collect(),
        }
    }

    /// 공백으로 구분된 목록 파싱
    ///
    /// 빈 문자열은 빈 타입 하나로 취급합니다 (`off("", f)` → 모든 타입).
    pub fn parse_list(events: &str) -> Vec<Self> {
        let trimmed = events.trim();
        if trimmed.is_empty() {
            return vec![Self::parse("")];
        }
        trimmed.split_whitespace().map(Self::parse).collect()
    }

    pub fn is_all_types(&self) -> bool {
        self.event_type.is_empty()
    }

    /// 등록된 네임스페이스와 하나라도 겹치는지 (선택자에 네임스페이스가 없으면 항상 true)
    pub fn matches_namespaces(&self, registered: &HashSet<String>) -> bool {
        self.namespaces.is_empty() || self.namespaces.iter().any(|ns| registered.contains(ns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_with_namespaces() {
        let sel = EventSelector::parse("click.foo.bar");
        assert_eq!(sel.event_type, "click");
        assert_eq!(sel.namespaces, set(&["foo", "bar"]));
    }

    #[test]
    fn test_parse_namespace_only() {
        let sel = EventSelector::parse(".menu");
        assert!(sel.is_all_types());
        assert_eq!(sel.namespaces, set(&["menu"]));
    }

    #[test]
    fn test_parse_list() {
        let list = EventSelector::parse_list("  keydown.ui   keyup\tcommand.ui.x ");
        let types: Vec<_> = list.iter().map(|s| s.event_type.as_str()).collect();
        assert_eq!(types, vec!["keydown", "keyup", "command"]);

        let empty = EventSelector::parse_list("   ");
        assert_eq!(empty.len(), 1);
        assert!(empty[0].is_all_types());
        assert!(empty[0].namespaces.is_empty());
    }

    #[test]
    fn test_blank_events_bind_empty_type() {
        use crate::event::listener::listener;
        use crate::event::target::EventTarget;
        use crate::event::types::{Event, EventInit};
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let target = EventTarget::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = {
            let hits = hits.clone();
            listener(move |_, _| {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        };

        target.on("", counter.clone());
        target.one("   ", counter);
        assert_eq!(target.event_types(), vec![""]);

        target.dispatch_event(&mut Event::new("", EventInit::default())).unwrap();
        target.dispatch_event(&mut Event::new("x", EventInit::default())).unwrap();
        target.dispatch_event(&mut Event::new("", EventInit::default())).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(target.listener_count(""), 1);
    }

    #[test]
    fn test_namespace_intersection() {
        let registered = set(&["ns1", "ns2"]);
        assert!(EventSelector::parse("click.ns2").matches_namespaces(&registered));
        assert!(EventSelector::parse("click.ns3.ns1").matches_namespaces(&registered));
        assert!(!EventSelector::parse("click.ns3").matches_namespaces(&registered));
        assert!(EventSelector::parse("click").matches_namespaces(&HashSet::new()));
        assert!(!EventSelector::parse("click.ns1").matches_namespaces(&HashSet::new()));
    }
}
