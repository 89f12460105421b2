//! Scoped timer handles.
//!
//! Core state machines never own a live timer. A component that needs time to
//! pass describes it as a [`TimerSpec`] and only accepts ticks stamped with the
//! scope it currently holds. Entering a new state mints a fresh scope, so a tick
//! scheduled by a previous line, question or stage is dropped on arrival.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SCOPE: AtomicU64 = AtomicU64::new(1);

/// Identity of one timer lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(u64);

impl ScopeId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope-{}", self.0)
    }
}

/// Which component a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Scene transition banner stage.
    Transition,
    /// Dialog typewriter reveal.
    Typewriter,
    /// One-second mini-game countdown.
    Countdown,
    /// Temperature random walk.
    Drift,
    /// Speed-click target spawner.
    Spawn,
}

impl TimerKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transition => "transition",
            Self::Typewriter => "typewriter",
            Self::Countdown => "countdown",
            Self::Drift => "drift",
            Self::Spawn => "spawn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    Once,
    Interval,
}

/// A timer a component wants running right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerSpec {
    pub kind: TimerKind,
    pub scope: ScopeId,
    pub period_ms: u32,
    pub repeat: Repeat,
}

impl TimerSpec {
    /// The tick this timer delivers when it fires.
    #[must_use]
    pub const fn tick(&self) -> Tick {
        Tick {
            kind: self.kind,
            scope: self.scope,
        }
    }

    /// Stable key for UI drivers; changes whenever the scope changes.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.kind.as_str(), self.scope.get(), self.period_ms)
    }
}

/// A fired timer, routed back into the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tick {
    pub kind: TimerKind,
    pub scope: ScopeId,
}

/// Owner-side handle: holds at most one live scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskScope {
    current: Option<ScopeId>,
}

impl TaskScope {
    /// Start a new timer lifetime, invalidating the previous one.
    pub fn enter(&mut self) -> ScopeId {
        let id = ScopeId(NEXT_SCOPE.fetch_add(1, Ordering::Relaxed));
        self.current = Some(id);
        id
    }

    pub fn cancel(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub const fn current(&self) -> Option<ScopeId> {
        self.current
    }

    #[must_use]
    pub fn accepts(&self, tick: Tick) -> bool {
        self.current == Some(tick.scope)
    }

    #[must_use]
    pub fn spec(&self, kind: TimerKind, period_ms: u32, repeat: Repeat) -> Option<TimerSpec> {
        self.current.map(|scope| TimerSpec {
            kind,
            scope,
            period_ms,
            repeat,
        })
    }
}

/// Deterministic stand-in for wall-clock timers, used by headless drivers.
///
/// Each active [`TimerSpec`] is due one period after it was first seen;
/// interval timers are then rescheduled, one-shot timers forgotten.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now_ms: u64,
    due: BTreeMap<String, u64>,
}

impl VirtualClock {
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Jump to the earliest due timer among `active` and return its tick.
    pub fn next_tick(&mut self, active: &[TimerSpec]) -> Option<Tick> {
        let keyed: Vec<(String, &TimerSpec)> = active.iter().map(|s| (s.key(), s)).collect();
        self.due.retain(|key, _| keyed.iter().any(|(k, _)| k == key));
        for (key, spec) in &keyed {
            self.due
                .entry(key.clone())
                .or_insert(self.now_ms + u64::from(spec.period_ms));
        }
        let (key, at) = self
            .due
            .iter()
            .min_by_key(|(_, at)| **at)
            .map(|(k, at)| (k.clone(), *at))?;
        let spec = keyed.iter().find(|(k, _)| *k == key).map(|(_, s)| **s)?;
        self.now_ms = at;
        match spec.repeat {
            Repeat::Once => {
                self.due.remove(&key);
            }
            Repeat::Interval => {
                self.due.insert(key, at + u64::from(spec.period_ms.max(1)));
            }
        }
        Some(spec.tick())
    }
}
