use std::time::{Duration, Instant};

/// Coalescing window for search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coalesces rapid search input into a single committed value.
///
/// Time is passed in explicitly so the debouncer stays deterministic.
#[derive(Clone, Debug)]
pub struct SearchDebouncer {
    window: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Records a keystroke; restarts the window.
    pub fn push(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some((value.into(), now));
    }

    /// Returns the pending value once the window has elapsed since the last
    /// keystroke.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.window);
        if ready { self.flush() } else { None }
    }

    /// Takes the pending value immediately, regardless of the window.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_ref().map(|(value, _)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coalesces_keystrokes_within_window() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();

        debouncer.push("r", start);
        debouncer.push("ru", start + Duration::from_millis(100));
        debouncer.push("rust", start + Duration::from_millis(200));

        assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some("rust".to_string())
        );
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn flush_returns_pending_value_early() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();
        debouncer.push("abc", start);

        assert_eq!(debouncer.pending(), Some("abc"));
        assert_eq!(debouncer.flush(), Some("abc".to_string()));
        assert_eq!(debouncer.pending(), None);
    }
}
