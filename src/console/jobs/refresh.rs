use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Auto-refresh cadence for the derived view. The enumerated set is fixed;
/// anything outside it is a configuration error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshInterval {
    #[default]
    Manual,
    ThirtySeconds,
    SixtySeconds,
    FiveMinutes,
}

impl RefreshInterval {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Manual,
            Self::ThirtySeconds,
            Self::SixtySeconds,
            Self::FiveMinutes,
        ]
    }

    pub const fn as_secs(self) -> u64 {
        match self {
            Self::Manual => 0,
            Self::ThirtySeconds => 30,
            Self::SixtySeconds => 60,
            Self::FiveMinutes => 300,
        }
    }

    pub fn from_secs(secs: u64) -> Option<Self> {
        match secs {
            0 => Some(Self::Manual),
            30 => Some(Self::ThirtySeconds),
            60 => Some(Self::SixtySeconds),
            300 => Some(Self::FiveMinutes),
            _ => None,
        }
    }

    pub const fn period(self) -> Option<Duration> {
        match self.as_secs() {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::ThirtySeconds => "Every 30 seconds",
            Self::SixtySeconds => "Every 60 seconds",
            Self::FiveMinutes => "Every 5 minutes",
        }
    }
}

/// Handle identifying one scheduled tick task; cancellation is by token, so
/// a caller holding a stale token cannot cancel a newer schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken(u64);

#[derive(Debug)]
struct ActiveTick {
    token: TickToken,
    handle: JoinHandle<()>,
}

/// Owns at most one periodic tick task at a time. Scheduling replaces the
/// previous task and dropping the scheduler aborts it, so no timer outlives
/// the view that asked for it.
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    next_token: u64,
    active: Option<ActiveTick>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking at the given cadence, cancelling whatever ran before.
    /// `Manual` only cancels and returns no token. The callback fires once
    /// per period, never immediately.
    pub fn schedule<F>(&mut self, interval: RefreshInterval, mut on_tick: F) -> Option<TickToken>
    where
        F: FnMut() + Send + 'static,
    {
        self.cancel_active();
        let period = interval.period()?;

        self.next_token += 1;
        let token = TickToken(self.next_token);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick of a tokio interval resolves immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                on_tick();
            }
        });

        debug!(secs = interval.as_secs(), "auto-refresh scheduled");
        self.active = Some(ActiveTick { token, handle });
        Some(token)
    }

    /// Cancel the task identified by `token`; stale tokens are ignored.
    pub fn cancel(&mut self, token: TickToken) {
        if self
            .active
            .as_ref()
            .is_some_and(|active| active.token == token)
        {
            self.cancel_active();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    fn cancel_active(&mut self) {
        if let Some(active) = self.active.take() {
            active.handle.abort();
            debug!("auto-refresh cancelled");
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.cancel_active();
    }
}
