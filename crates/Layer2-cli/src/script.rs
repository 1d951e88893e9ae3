//! Replay Script - 바인딩/이벤트 스크립트
//!
//! JSON 또는 TOML 파일에 리스너 바인딩과 디스패치할 이벤트를 기술하고,
//! 메인 윈도우(또는 주어진 타겟)에 그대로 재생합니다.
//!
//! ```toml
//! [[bindings]]
//! events = "command.menu"
//! name = "veto"
//! action = "prevent-default"
//! once = true
//!
//! [[events]]
//! type = "command"
//! detail = { kind = "command", command = 40000 }
//!
//! [[events]]
//! off = ".menu"
//! ```

use anyhow::{bail, Context};
use parking_lot::Mutex;
use playfield_foundation::{
    kinds, Binding, Error, Event, EventDetail, EventInit, EventTarget, Listener, ListenerOptions,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

type CallLog = Arc<Mutex<Vec<String>>>;

// ============================================================================
// Script 포맷
// ============================================================================

/// 재생 스크립트
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub bindings: Vec<BindingSpec>,
    #[serde(default)]
    pub events: Vec<Step>,
}

impl Script {
    /// 확장자로 포맷 결정 (`.toml`, 그 외는 JSON)
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Some("json") | None => Self::from_json(&content)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Some(other) => bail!("Unsupported script format: .{}", other),
        }
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// 리스너 동작
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// 호출만 기록
    #[default]
    Log,
    PreventDefault,
    Stop,
    StopImmediate,
    /// 리스너 에러 반환
    Fail,
}

/// 바인딩 하나
///
/// 같은 `name`을 여러 번 쓰면 같은 리스너(identity)를 재사용하며, 동작은 처음 선언이 이깁니다.
/// `options`가 있으면 `add_event_listener` 경로로 등록되고 `once`/`data`는 options 안에서 읽습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingSpec {
    pub events: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub action: Action,
    #[serde(default)]
    pub once: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub options: Option<Value>,
}

/// 재생 단계
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Step {
    /// `off(selector, listener)`
    Off {
        off: String,
        #[serde(default)]
        listener: Option<String>,
    },
    Dispatch(EventSpec),
}

/// 디스패치할 이벤트
#[derive(Debug, Clone, Deserialize)]
pub struct EventSpec {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub bubbles: bool,
    /// 생략 시 사전 정의된 타입이면 true
    #[serde(default)]
    pub cancelable: Option<bool>,
    #[serde(default)]
    pub detail: EventDetail,
}

impl EventSpec {
    pub fn to_event(&self) -> Event {
        let builtin = kinds::BUILTIN_TYPES.contains(&self.event_type.as_str());
        let init = EventInit::new()
            .bubbles(self.bubbles)
            .cancelable(self.cancelable.unwrap_or(builtin));
        Event::new(self.event_type.clone(), init).with_detail(self.detail.clone())
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// 단계별 재생 결과
#[derive(Debug)]
pub enum Outcome {
    Dispatched {
        event_type: String,
        run_default: bool,
        calls: Vec<String>,
    },
    Failed {
        event_type: String,
        calls: Vec<String>,
        error: Error,
    },
    Removed {
        selector: String,
        listener: Option<String>,
    },
    Skipped {
        reason: String,
    },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Dispatched {
                event_type,
                run_default,
                calls,
            } => {
                let verdict = if *run_default { "default allowed" } else { "default prevented" };
                write!(f, "✓ {}: {} [{}]", event_type, verdict, calls.join(", "))
            }
            Outcome::Failed {
                event_type,
                calls,
                error,
            } => write!(f, "✗ {}: {} [{}]", event_type, error, calls.join(", ")),
            Outcome::Removed { selector, listener } => match listener {
                Some(name) => write!(f, "- off '{}' ({})", selector, name),
                None => write!(f, "- off '{}'", selector),
            },
            Outcome::Skipped { reason } => write!(f, "? skipped: {}", reason),
        }
    }
}

// ============================================================================
// Replay
// ============================================================================

/// 스크립트를 타겟에 재생
pub struct Replay {
    target: Arc<EventTarget>,
    listeners: HashMap<String, Listener>,
    calls: CallLog,
}

impl Replay {
    pub fn new(target: Arc<EventTarget>) -> Self {
        Self {
            target,
            listeners: HashMap::new(),
            calls: CallLog::default(),
        }
    }

    pub fn target(&self) -> &EventTarget {
        &self.target
    }

    /// 바인딩 등록
    pub fn install(&mut self, bindings: &[BindingSpec]) {
        for (index, entry) in bindings.iter().enumerate() {
            let name = entry
                .name
                .clone()
                .unwrap_or_else(|| format!("binding-{}", index + 1));
            let calls = self.calls.clone();
            let listener = self
                .listeners
                .entry(name.clone())
                .or_insert_with(|| action_listener(&name, entry.action, calls))
                .clone();

            match &entry.options {
                Some(options) => {
                    let options = ListenerOptions::from_value(options);
                    // 빈 문자열은 on()과 같이 빈 타입 하나로 등록
                    let mut event_types: Vec<&str> = entry.events.split_whitespace().collect();
                    if event_types.is_empty() {
                        event_types.push("");
                    }
                    for event_type in event_types {
                        self.target
                            .add_event_listener(event_type, &listener, options.clone());
                    }
                }
                None => {
                    let binding = Binding {
                        data: entry.data.clone(),
                        listener,
                    };
                    if entry.once {
                        self.target.one(&entry.events, binding);
                    } else {
                        self.target.on(&entry.events, binding);
                    }
                }
            }

            debug!(name = %name, events = %entry.events, action = ?entry.action, "Installed binding");
        }
    }

    /// 단계 재생
    ///
    /// 리스너 실패는 해당 단계의 결과로 기록하고 다음 단계로 넘어갑니다.
    pub fn run(&mut self, steps: &[Step]) -> Vec<Outcome> {
        steps.iter().map(|step| self.step(step)).collect()
    }

    fn step(&mut self, step: &Step) -> Outcome {
        match step {
            Step::Off { off, listener } => {
                let handle = match listener {
                    Some(name) => match self.listeners.get(name) {
                        Some(handle) => Some(handle),
                        None => {
                            warn!(listener = %name, "Unknown listener in off step");
                            return Outcome::Skipped {
                                reason: format!("unknown listener '{}'", name),
                            };
                        }
                    },
                    None => None,
                };

                self.target.off(off, handle);
                Outcome::Removed {
                    selector: off.clone(),
                    listener: listener.clone(),
                }
            }
            Step::Dispatch(entry) => {
                self.calls.lock().clear();
                let mut event = entry.to_event();
                let result = self.target.dispatch_event(&mut event);
                let calls = std::mem::take(&mut *self.calls.lock());

                match result {
                    Ok(run_default) => Outcome::Dispatched {
                        event_type: entry.event_type.clone(),
                        run_default,
                        calls,
                    },
                    Err(error) => Outcome::Failed {
                        event_type: entry.event_type.clone(),
                        calls,
                        error,
                    },
                }
            }
        }
    }
}

/// 스크립트 동작을 수행하는 리스너
fn action_listener(name: &str, action: Action, calls: CallLog) -> Listener {
    let label = name.to_string();

    Listener::named(name, move |_target, event| {
        calls.lock().push(label.clone());
        debug!(
            listener = %label,
            event_type = event.event_type(),
            data = ?event.data(),
            "Script listener invoked"
        );

        match action {
            Action::Log => {}
            Action::PreventDefault => event.prevent_default(),
            Action::Stop => event.stop_propagation(),
            Action::StopImmediate => event.stop_immediate_propagation(),
            Action::Fail => {
                return Err(Error::listener(
                    event.event_type(),
                    format!("'{}' failed", label),
                ))
            }
        }
        Ok(())
    })
}

// ============================================================================
// 테스트
// ============================================================================
