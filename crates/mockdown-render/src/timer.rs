//! Timer scheduling.
//!
//! Time-dependent UI state takes a [`Scheduler`] instead of reading a
//! global clock. [`ManualScheduler`] is driven explicitly and makes timer
//! behaviour deterministic; [`ThreadScheduler`] sleeps on a background
//! thread and reports fired timers over a channel.

use log::trace;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Handle to one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Schedules one-shot timers.
///
/// A scheduler never calls back into its owner. The owner learns that a
/// timer fired from the scheduler (a channel, or the return value of
/// [`ManualScheduler::advance`]) and hands the id back to the state
/// machine that requested it.
pub trait Scheduler {
    /// Arrange for `id` to fire once after `delay`.
    fn schedule(&self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Cancelling a fired or unknown id is a no-op.
    fn cancel(&self, id: TimerId);
}

// =============================================================================
// Manual scheduler
// =============================================================================

#[derive(Debug, Default)]
struct ManualInner {
    now: Duration,
    next_id: u64,
    /// (due time, id), unordered
    pending: Vec<(Duration, TimerId)>,
}

/// Deterministic scheduler advanced by hand.
///
/// Clones share the same clock, so a test can keep one handle and give
/// another to the component under test.
///
/// # Example
///
/// ```
/// use mockdown_render::{ManualScheduler, Scheduler};
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let id = scheduler.schedule(Duration::from_millis(100));
/// assert!(scheduler.advance(Duration::from_millis(99)).is_empty());
/// assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![id]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of timers still waiting to fire.
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Move the clock forward and return the timers that fired, in due
    /// order.
    pub fn advance(&self, by: Duration) -> Vec<TimerId> {
        let mut inner = self.inner.borrow_mut();
        inner.now += by;
        let now = inner.now;

        let mut fired: Vec<(Duration, TimerId)> = Vec::new();
        inner.pending.retain(|&(due, id)| {
            if due <= now {
                fired.push((due, id));
                false
            } else {
                true
            }
        });
        fired.sort();

        for (due, id) in &fired {
            trace!("{} fired (due at {:?})", id, due);
        }
        fired.into_iter().map(|(_, id)| id).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = TimerId(inner.next_id);
        let due = inner.now + delay;
        inner.pending.push((due, id));
        trace!("{} scheduled for {:?}", id, due);
        id
    }

    fn cancel(&self, id: TimerId) {
        let mut inner = self.inner.borrow_mut();
        let before = inner.pending.len();
        inner.pending.retain(|&(_, pending)| pending != id);
        if inner.pending.len() != before {
            trace!("{} cancelled", id);
        }
    }
}

// =============================================================================
// Thread scheduler
// =============================================================================

/// Scheduler backed by sleeping threads.
///
/// Each timer sleeps on its own thread and, unless cancelled meanwhile,
/// sends its id to the channel read by [`ThreadScheduler::recv_timeout`].
/// Only timers that have neither fired nor been cancelled are tracked.
#[derive(Debug)]
pub struct ThreadScheduler {
    next_id: AtomicU64,
    live: Arc<Mutex<HashSet<TimerId>>>,
    tx: Sender<TimerId>,
    rx: Receiver<TimerId>,
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadScheduler {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            next_id: AtomicU64::new(0),
            live: Arc::new(Mutex::new(HashSet::new())),
            tx,
            rx,
        }
    }

    /// Wait up to `timeout` for the next fired timer.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<TimerId> {
        match self.rx.recv_timeout(timeout) {
            Ok(id) => Some(id),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// A fired timer, if one is waiting.
    pub fn try_recv(&self) -> Option<TimerId> {
        self.rx.try_recv().ok()
    }

    /// Number of timers still sleeping and not cancelled.
    pub fn live(&self) -> usize {
        lock(&self.live).len()
    }
}

fn lock(set: &Mutex<HashSet<TimerId>>) -> std::sync::MutexGuard<'_, HashSet<TimerId>> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Scheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let live = Arc::clone(&self.live);
        let tx = self.tx.clone();
        lock(&self.live).insert(id);

        std::thread::spawn(move || {
            std::thread::sleep(delay);
            let still_live = lock(&live).remove(&id);
            if still_live {
                trace!("{} fired", id);
                // The receiver may be gone if the scheduler was dropped
                let _ = tx.send(id);
            } else {
                trace!("{} dropped after cancel", id);
            }
        });

        trace!("{} scheduled in {:?}", id, delay);
        id
    }

    fn cancel(&self, id: TimerId) {
        if lock(&self.live).remove(&id) {
            trace!("{} cancelled", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: fn(u64) -> Duration = Duration::from_millis;

    #[test]
    fn test_manual_fires_when_due() {
        let s = ManualScheduler::new();
        let id = s.schedule(MS(100));
        assert_eq!(s.pending(), 1);
        assert!(s.advance(MS(50)).is_empty());
        assert_eq!(s.advance(MS(50)), vec![id]);
        assert_eq!(s.pending(), 0);
        assert!(s.advance(MS(1000)).is_empty());
    }

    #[test]
    fn test_manual_cancel() {
        let s = ManualScheduler::new();
        let a = s.schedule(MS(10));
        let b = s.schedule(MS(20));
        s.cancel(a);
        assert_eq!(s.advance(MS(30)), vec![b]);
    }

    #[test]
    fn test_manual_fires_in_due_order() {
        let s = ManualScheduler::new();
        let late = s.schedule(MS(30));
        let early = s.schedule(MS(10));
        assert_eq!(s.advance(MS(30)), vec![early, late]);
    }

    #[test]
    fn test_manual_clones_share_clock() {
        let s = ManualScheduler::new();
        let handle = s.clone();
        let id = handle.schedule(MS(5));
        assert_eq!(s.advance(MS(5)), vec![id]);
        assert_eq!(handle.now(), MS(5));
    }

    #[test]
    fn test_ids_are_unique() {
        let s = ManualScheduler::new();
        let a = s.schedule(MS(1));
        let b = s.schedule(MS(1));
        assert_ne!(a, b);
    }

    #[test]
    fn test_thread_scheduler_fires() {
        let s = ThreadScheduler::new();
        let id = s.schedule(MS(5));
        assert_eq!(s.recv_timeout(Duration::from_secs(5)), Some(id));
    }

    #[test]
    fn test_thread_scheduler_cancel() {
        let s = ThreadScheduler::new();
        let cancelled = s.schedule(MS(20));
        s.cancel(cancelled);
        let kept = s.schedule(MS(40));
        assert_eq!(s.recv_timeout(Duration::from_secs(5)), Some(kept));
        assert_eq!(s.try_recv(), None);
        assert_eq!(s.live(), 0);
    }

    #[test]
    fn test_thread_scheduler_cancel_after_fire_keeps_nothing() {
        let s = ThreadScheduler::new();
        let id = s.schedule(MS(200));
        assert_eq!(s.live(), 1);
        assert_eq!(s.recv_timeout(Duration::from_secs(5)), Some(id));

        // Fired timers are no longer tracked, so a late cancel is a no-op
        s.cancel(id);
        s.cancel(TimerId(999));
        assert_eq!(s.live(), 0);
    }
}
