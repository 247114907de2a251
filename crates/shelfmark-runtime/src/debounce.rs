use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Trailing-edge debounce over values of type `T`.
///
/// Each `trigger` replaces the pending value and pushes the deadline out
/// to `now + window`; the value is released once, after a full quiet
/// window. The timer is only a deadline stored here: there is no background
/// task, so nothing can fire after the owner drops this coordinator or
/// calls `dispose`.
#[derive(Debug)]
pub struct DebounceCoordinator<T> {
    window: Duration,
    pending: Option<Pending<T>>,
    disposed: bool,
}

impl<T> Default for DebounceCoordinator<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}

impl<T> DebounceCoordinator<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            disposed: false,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `value`, superseding anything still pending
    pub fn trigger(&mut self, value: T) {
        if self.disposed {
            return;
        }
        self.pending = Some(Pending {
            value,
            deadline: Instant::now() + self.window,
        });
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Drop the pending value without delivering it
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Cancel and refuse all further triggers
    pub fn dispose(&mut self) {
        self.pending = None;
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Take the pending value if its quiet window has elapsed by `now`
    pub fn poll_ready(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|p| p.deadline <= now);
        if !due {
            return None;
        }
        self.pending.take().map(|p| p.value)
    }

    /// Wait for the pending value to become due and take it.
    ///
    /// Returns `None` immediately when nothing is pending. Cancel-safe:
    /// dropping the future before the deadline leaves the value pending.
    pub async fn next_ready(&mut self) -> Option<T> {
        let deadline = self.pending.as_ref()?.deadline;
        tokio::time::sleep_until(deadline).await;
        let value = self.pending.take().map(|p| p.value);
        if value.is_some() {
            tracing::debug!(window_ms = self.window.as_millis() as u64, "debounce fired");
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_delivers_last_value_once_after_quiet_window() {
        let start = Instant::now();
        let mut debounce = DebounceCoordinator::new(ms(300));

        debounce.trigger("a");
        advance(ms(100)).await;
        debounce.trigger("b");
        advance(ms(150)).await;
        debounce.trigger("c");

        assert_eq!(debounce.next_ready().await, Some("c"));
        let elapsed = start.elapsed();
        assert!(elapsed >= ms(550) && elapsed < ms(560), "fired at {:?}", elapsed);

        assert_eq!(debounce.next_ready().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_ready_respects_deadline() {
        let mut debounce = DebounceCoordinator::new(ms(300));
        debounce.trigger(1);

        advance(ms(299)).await;
        assert_eq!(debounce.poll_ready(Instant::now()), None);

        advance(ms(1)).await;
        assert_eq!(debounce.poll_ready(Instant::now()), Some(1));
        assert!(!debounce.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_cancels_and_ignores_later_triggers() {
        let mut debounce = DebounceCoordinator::new(ms(300));
        debounce.trigger("pending");
        debounce.dispose();

        advance(ms(1_000)).await;
        assert_eq!(debounce.poll_ready(Instant::now()), None);

        debounce.trigger("late");
        assert!(!debounce.is_pending());
        assert_eq!(debounce.next_ready().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_value_pending() {
        let mut debounce = DebounceCoordinator::new(ms(300));
        debounce.trigger("q");

        let waited = tokio::time::timeout(ms(100), debounce.next_ready()).await;
        assert!(waited.is_err());
        assert!(debounce.is_pending());

        assert_eq!(debounce.next_ready().await, Some("q"));
    }

    #[test]
    fn test_cancel_reports_whether_something_was_pending() {
        let mut debounce: DebounceCoordinator<u8> = DebounceCoordinator::default();
        assert!(!debounce.cancel());
        assert_eq!(debounce.window(), DEFAULT_DEBOUNCE_WINDOW);
    }
}
