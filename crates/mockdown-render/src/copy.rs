//! Copy-to-clipboard feedback.
//!
//! After a copy the code block shows a "copied" indicator that reverts to
//! idle once the reset delay passes. Copying again while the indicator is
//! showing restarts the delay; only the latest timer can revert the state.

use crate::clipboard::Clipboard;
use crate::timer::{Scheduler, TimerId};
use log::{trace, warn};
use std::time::Duration;

/// Default time the copied indicator stays visible.
pub const COPY_RESET: Duration = Duration::from_millis(2000);

/// Indicator state of a copy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyState {
    #[default]
    Idle,
    Copied,
}

impl std::fmt::Display for CopyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CopyState::Idle => write!(f, "idle"),
            CopyState::Copied => write!(f, "copied"),
        }
    }
}

/// Copy state machine for one code block.
///
/// Owns the clipboard and the reset timer. The owner forwards fired timer
/// ids to [`CopyFeedback::on_timer`]; ids other than the pending one are
/// ignored, so a stale timer can never revert a newer copy.
///
/// # Example
///
/// ```
/// use mockdown_render::{CopyFeedback, ManualScheduler, MemoryClipboard};
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let mut feedback = CopyFeedback::new(scheduler.clone(), MemoryClipboard::new());
///
/// feedback.copy("echo hi");
/// assert!(feedback.is_copied());
///
/// for id in scheduler.advance(Duration::from_millis(2000)) {
///     feedback.on_timer(id);
/// }
/// assert!(!feedback.is_copied());
/// ```
#[derive(Debug)]
pub struct CopyFeedback<S: Scheduler, C: Clipboard> {
    scheduler: S,
    clipboard: C,
    reset_after: Duration,
    state: CopyState,
    pending: Option<TimerId>,
    last_error: Option<String>,
}

impl<S: Scheduler, C: Clipboard> CopyFeedback<S, C> {
    pub fn new(scheduler: S, clipboard: C) -> Self {
        Self {
            scheduler,
            clipboard,
            reset_after: COPY_RESET,
            state: CopyState::Idle,
            pending: None,
            last_error: None,
        }
    }

    /// Use a different reset delay.
    pub fn with_reset_after(mut self, delay: Duration) -> Self {
        self.reset_after = delay;
        self
    }

    /// Copy `text` and show the indicator.
    ///
    /// The indicator is shown even when the clipboard write fails; the
    /// failure is kept in [`CopyFeedback::last_clipboard_error`].
    pub fn copy(&mut self, text: &str) {
        match self.clipboard.write(text) {
            Ok(()) => self.last_error = None,
            Err(e) => {
                warn!("clipboard write failed: {}", e);
                self.last_error = Some(e.to_string());
            }
        }

        if let Some(previous) = self.pending.take() {
            self.scheduler.cancel(previous);
        }
        let id = self.scheduler.schedule(self.reset_after);
        self.pending = Some(id);

        if self.state != CopyState::Copied {
            trace!("copy state {} -> {}", self.state, CopyState::Copied);
        }
        self.state = CopyState::Copied;
    }

    /// Handle a fired timer. Returns true if the state reverted to idle.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.pending != Some(id) {
            trace!("ignoring stale {}", id);
            return false;
        }
        self.pending = None;
        trace!("copy state {} -> {}", self.state, CopyState::Idle);
        self.state = CopyState::Idle;
        true
    }

    pub fn state(&self) -> CopyState {
        self.state
    }

    pub fn is_copied(&self) -> bool {
        self.state == CopyState::Copied
    }

    /// Timer that will revert the indicator, if one is pending.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending
    }

    /// Error from the most recent copy, if its clipboard write failed.
    pub fn last_clipboard_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: Scheduler, C: Clipboard> Drop for CopyFeedback<S, C> {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::timer::ManualScheduler;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Advance the clock, deliver fired timers, count reverts.
    fn advance<C: Clipboard>(
        scheduler: &ManualScheduler,
        feedback: &mut CopyFeedback<ManualScheduler, C>,
        by: Duration,
    ) -> usize {
        scheduler
            .advance(by)
            .into_iter()
            .filter(|&id| feedback.on_timer(id))
            .count()
    }

    #[test]
    fn test_copy_then_revert() {
        let scheduler = ManualScheduler::new();
        let mut feedback = CopyFeedback::new(scheduler.clone(), MemoryClipboard::new());
        assert_eq!(feedback.state(), CopyState::Idle);

        feedback.copy("fn main() {}");
        assert!(feedback.is_copied());
        assert_eq!(feedback.clipboard().contents(), Some("fn main() {}"));

        assert_eq!(advance(&scheduler, &mut feedback, ms(1999)), 0);
        assert!(feedback.is_copied());
        assert_eq!(advance(&scheduler, &mut feedback, ms(1)), 1);
        assert!(!feedback.is_copied());
        assert_eq!(feedback.pending_timer(), None);
    }

    #[test]
    fn test_second_copy_restarts_timer() {
        let scheduler = ManualScheduler::new();
        let mut feedback = CopyFeedback::new(scheduler.clone(), MemoryClipboard::new());

        feedback.copy("a");
        assert_eq!(advance(&scheduler, &mut feedback, ms(1500)), 0);
        feedback.copy("b");

        // 2000ms after the first copy: the first timer is gone
        assert_eq!(advance(&scheduler, &mut feedback, ms(500)), 0);
        assert!(feedback.is_copied());

        // 2000ms after the second copy: exactly one revert
        assert_eq!(advance(&scheduler, &mut feedback, ms(1500)), 1);
        assert!(!feedback.is_copied());
        assert_eq!(advance(&scheduler, &mut feedback, ms(10_000)), 0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_stale_timer_ignored() {
        let scheduler = ManualScheduler::new();
        let mut feedback = CopyFeedback::new(scheduler.clone(), MemoryClipboard::new());
        feedback.copy("a");
        let first = feedback.pending_timer().unwrap();
        feedback.copy("b");

        assert!(!feedback.on_timer(first));
        assert!(feedback.is_copied());
    }

    #[test]
    fn test_failed_write_still_copied() {
        let scheduler = ManualScheduler::new();
        let mut feedback = CopyFeedback::new(scheduler.clone(), MemoryClipboard::failing());

        feedback.copy("x");
        assert!(feedback.is_copied());
        assert!(feedback.last_clipboard_error().is_some());
        assert_eq!(advance(&scheduler, &mut feedback, COPY_RESET), 1);
        assert!(!feedback.is_copied());
    }

    #[test]
    fn test_error_cleared_by_successful_copy() {
        let scheduler = ManualScheduler::new();
        let mut feedback = CopyFeedback::new(scheduler.clone(), crate::clipboard::Osc52Clipboard::new(Vec::new()));
        feedback.copy(&"x".repeat(crate::clipboard::MAX_CLIPBOARD_SIZE + 1));
        assert!(feedback.last_clipboard_error().is_some());
        feedback.copy("small");
        assert_eq!(feedback.last_clipboard_error(), None);
    }

    #[test]
    fn test_custom_reset_delay() {
        let scheduler = ManualScheduler::new();
        let mut feedback =
            CopyFeedback::new(scheduler.clone(), MemoryClipboard::new()).with_reset_after(ms(100));
        feedback.copy("x");
        assert_eq!(advance(&scheduler, &mut feedback, ms(100)), 1);
    }

    #[test]
    fn test_drop_cancels_pending_timer() {
        let scheduler = ManualScheduler::new();
        {
            let mut feedback = CopyFeedback::new(scheduler.clone(), MemoryClipboard::new());
            feedback.copy("x");
            assert_eq!(scheduler.pending(), 1);
        }
        assert_eq!(scheduler.pending(), 0);
    }
}
