//! Search input debouncing on top of one-shot timers.
//!
//! Zellij timers (`set_timeout`) cannot be cancelled and their `Timer` events
//! carry no identity. The debouncer therefore counts the timers it has armed
//! and only releases the latest text when the last outstanding one elapses:
//! every keystroke effectively cancels and reschedules the pending search.

use std::time::Duration;

/// Default quiescence window between the last keystroke and the search.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(200);

/// Pending-search bookkeeping for the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDebouncer {
    window: Duration,
    outstanding: usize,
    pending: Option<String>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl SearchDebouncer {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            outstanding: 0,
            pending: None,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Records a keystroke. The caller must arm one timer of [`Self::window`]
    /// for every call.
    pub fn schedule(&mut self, text: String) {
        self.outstanding += 1;
        self.pending = Some(text);
        tracing::trace!(outstanding = self.outstanding, "search scheduled");
    }

    /// Consumes one elapsed timer. Returns the text to search for when it was
    /// the last one outstanding.
    pub fn on_timer(&mut self) -> Option<String> {
        if self.outstanding == 0 {
            return None;
        }
        self.outstanding -= 1;
        if self.outstanding == 0 {
            self.pending.take()
        } else {
            None
        }
    }

    /// Releases the pending text immediately. Timers still in flight become
    /// no-ops when they elapse.
    pub fn flush(&mut self) -> Option<String> {
        let text = self.pending.take();
        if text.is_some() {
            tracing::trace!("pending search flushed");
        }
        text
    }

    /// Drops the pending text without searching.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_keystroke_fires_after_its_timer() {
        let mut debouncer = SearchDebouncer::default();
        debouncer.schedule("h".to_string());
        assert_eq!(debouncer.on_timer(), Some("h".to_string()));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn burst_fires_once_with_latest_text() {
        let mut debouncer = SearchDebouncer::default();
        debouncer.schedule("h".to_string());
        debouncer.schedule("he".to_string());
        debouncer.schedule("hea".to_string());

        assert_eq!(debouncer.on_timer(), None);
        assert_eq!(debouncer.on_timer(), None);
        assert_eq!(debouncer.on_timer(), Some("hea".to_string()));
        assert_eq!(debouncer.on_timer(), None);
    }

    #[test]
    fn flush_fires_early_and_silences_timers() {
        let mut debouncer = SearchDebouncer::default();
        debouncer.schedule("dune".to_string());
        assert_eq!(debouncer.flush(), Some("dune".to_string()));
        assert_eq!(debouncer.on_timer(), None);
    }

    #[test]
    fn stray_timers_are_ignored() {
        let mut debouncer = SearchDebouncer::default();
        assert_eq!(debouncer.on_timer(), None);
    }

    #[test]
    fn cancel_drops_pending_text() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(50));
        debouncer.schedule("x".to_string());
        debouncer.cancel();
        assert_eq!(debouncer.on_timer(), None);
        assert_eq!(debouncer.window(), Duration::from_millis(50));
    }
}
