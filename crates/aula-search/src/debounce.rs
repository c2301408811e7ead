#![forbid(unsafe_code)]

//! Quiescence timer for keystroke-driven state.
//!
//! Every change (re)arms the timer with the latest value; the timer
//! fires exactly once when polled after the quiescence window passes
//! with no further change. Time is injected by the caller, so the
//! program loop drives this from its tick deadline and tests drive it
//! from synthetic instants.

use std::time::{Duration, Instant};

/// Default quiescence window for search input.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(200);

/// A cancellable single-fire quiescence timer carrying a value.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    /// Create a debouncer with the given quiescence window.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a change, superseding any pending one and restarting the
    /// window from `now`.
    pub fn note_change(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some((value.into(), now + self.delay));
    }

    /// The deadline the owner should wake at, if a change is pending.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Whether a change is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire if the window has passed, yielding the latest value.
    ///
    /// At most one fire per armed window: a successful poll disarms.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if now >= *at => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Drop any pending change without firing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn fires_once_after_quiescence() {
        let base = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        debouncer.note_change("ali", base);

        assert_eq!(debouncer.poll(at(base, 100)), None);
        assert_eq!(debouncer.poll(at(base, 200)), Some("ali".to_string()));
        // Disarmed after firing.
        assert_eq!(debouncer.poll(at(base, 400)), None);
        assert!(!debouncer.is_armed());
    }

    #[test]
    fn rapid_changes_fire_with_the_latest_value_only() {
        let base = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        debouncer.note_change("a", base);
        debouncer.note_change("al", at(base, 50));
        debouncer.note_change("ali", at(base, 100));

        // First window would have elapsed, but it was superseded.
        assert_eq!(debouncer.poll(at(base, 250)), None);
        assert_eq!(debouncer.poll(at(base, 300)), Some("ali".to_string()));
    }

    #[test]
    fn cancel_drops_the_pending_value() {
        let base = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.note_change("ali", base);
        debouncer.cancel();
        assert_eq!(debouncer.poll(at(base, 1_000)), None);
    }

    #[test]
    fn deadline_tracks_latest_change() {
        let base = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        assert_eq!(debouncer.deadline(), None);
        debouncer.note_change("a", base);
        assert_eq!(debouncer.deadline(), Some(at(base, 200)));
        debouncer.note_change("ab", at(base, 150));
        assert_eq!(debouncer.deadline(), Some(at(base, 350)));
    }
}
