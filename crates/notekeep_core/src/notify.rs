//! Transient notification relay.
//!
//! # Responsibility
//! - Hold at most one transient message with a success/error/info tag.
//! - Derive slide-in / visible / slide-out phases from elapsed time.
//!
//! # Invariants
//! - Only one toast is ever current; `show` replaces it immediately.
//! - Toast ids increase monotonically, so a stale dismiss cannot hide a
//!   newer message.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds a toast stays up before it starts sliding out.
pub const AUTO_DISMISS_AFTER_MS: i64 = 2_500;
/// Milliseconds of the slide-in and slide-out transitions.
pub const SLIDE_DURATION_MS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

/// Transition state of the current toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: DateTime<Utc>,
}

impl Toast {
    /// Phase at `now`; times before `shown_at` count as just shown.
    pub fn phase_at(&self, now: DateTime<Utc>) -> ToastPhase {
        let elapsed_ms = (now - self.shown_at).max(Duration::zero()).num_milliseconds();
        if elapsed_ms < SLIDE_DURATION_MS {
            ToastPhase::Entering
        } else if elapsed_ms < AUTO_DISMISS_AFTER_MS {
            ToastPhase::Visible
        } else if elapsed_ms < AUTO_DISMISS_AFTER_MS + SLIDE_DURATION_MS {
            ToastPhase::Leaving
        } else {
            ToastPhase::Hidden
        }
    }
}

/// Queue-of-one message holder.
#[derive(Debug, Default)]
pub struct ToastRelay {
    current: Option<Toast>,
    last_id: u64,
}

impl ToastRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any current toast and returns the new toast id.
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind, now: DateTime<Utc>) -> u64 {
        self.last_id += 1;
        self.current = Some(Toast {
            id: self.last_id,
            message: message.into(),
            kind,
            shown_at: now,
        });
        self.last_id
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    /// Hides the toast only if `id` is still the current one.
    ///
    /// Returns whether a toast was hidden.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|toast| toast.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Current toast regardless of phase.
    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn phase(&self, now: DateTime<Utc>) -> ToastPhase {
        self.current
            .as_ref()
            .map_or(ToastPhase::Hidden, |toast| toast.phase_at(now))
    }

    /// Toast that should be on screen at `now`.
    pub fn visible(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|toast| toast.phase_at(now) != ToastPhase::Hidden)
    }

    /// Drops the toast once its slide-out has finished.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.phase(now) == ToastPhase::Hidden {
            self.current = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ToastKind, ToastPhase, ToastRelay};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn phases_follow_slide_and_dismiss_timings() {
        let t0 = Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
        let mut relay = ToastRelay::new();
        relay.show("Saved", ToastKind::Success, t0);

        assert_eq!(relay.phase(t0), ToastPhase::Entering);
        assert_eq!(relay.phase(t0 + Duration::milliseconds(300)), ToastPhase::Visible);
        assert_eq!(relay.phase(t0 + Duration::milliseconds(2_499)), ToastPhase::Visible);
        assert_eq!(relay.phase(t0 + Duration::milliseconds(2_500)), ToastPhase::Leaving);
        assert_eq!(relay.phase(t0 + Duration::milliseconds(2_800)), ToastPhase::Hidden);

        relay.tick(t0 + Duration::milliseconds(2_700));
        assert!(relay.current().is_some());
        relay.tick(t0 + Duration::seconds(3));
        assert!(relay.current().is_none());
    }

    #[test]
    fn show_replaces_and_stale_dismiss_is_ignored() {
        let t0 = Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
        let mut relay = ToastRelay::new();
        let first = relay.show("first", ToastKind::Info, t0);
        let second = relay.show("second", ToastKind::Error, t0 + Duration::seconds(1));
        assert!(second > first);

        assert!(!relay.dismiss(first));
        let visible = relay.visible(t0 + Duration::seconds(2)).unwrap();
        assert_eq!(visible.message, "second");
        assert_eq!(visible.kind, ToastKind::Error);

        assert!(relay.dismiss(second));
        assert!(relay.visible(t0 + Duration::seconds(2)).is_none());
    }

    #[test]
    fn hide_clears_immediately() {
        let now = Utc::now();
        let mut relay = ToastRelay::new();
        relay.show("x", ToastKind::Info, now);
        relay.hide();
        assert_eq!(relay.phase(now), ToastPhase::Hidden);
    }
}
