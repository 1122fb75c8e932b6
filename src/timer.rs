//! One-shot timers.
//!
//! Handlers never sleep; anything delayed goes through a [`Scheduler`]. The
//! browser binding backs it with `setTimeout`, tests and native hosts use the
//! virtual clock in [`ManualScheduler`].

use std::cell::RefCell;

/// Handle of a scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

/// Boxed one-shot timer callback.
pub type TimerCallback = Box<dyn FnOnce() + 'static>;

/// Capability to run a callback once after a delay.
pub trait Scheduler {
    /// Run `callback` once after `delay_ms` milliseconds.
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> TimerId;

    /// Cancel a pending callback. Unknown or already fired ids are ignored.
    fn clear_timeout(&self, id: TimerId);
}

#[derive(Default)]
struct ManualState {
    now_ms: u64,
    next_id: u32,
    /// Pending timers as (due time, id, callback).
    pending: Vec<(u64, TimerId, TimerCallback)>,
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Nothing runs until [`advance`](Self::advance) moves the clock past a
/// timer's due time. Timers due at the same instant fire in scheduling order,
/// and callbacks may schedule or cancel further timers.
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

impl ManualScheduler {
    /// Create a scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of timers that have not fired or been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Move the clock forward by `ms`, firing every timer that becomes due.
    ///
    /// Returns the number of callbacks that ran.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.state.borrow().now_ms.saturating_add(ms);
        let mut fired = 0;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _, _))| *at <= target)
                    .min_by_key(|(_, (at, id, _))| (*at, *id))
                    .map(|(idx, _)| idx);
                due.map(|idx| {
                    let (at, _, callback) = state.pending.remove(idx);
                    state.now_ms = at;
                    callback
                })
            };
            match next {
                // The borrow is released before the callback runs.
                Some(callback) => {
                    callback();
                    fired += 1;
                }
                None => break,
            }
        }
        self.state.borrow_mut().now_ms = target;
        fired
    }

    /// Fire everything that is pending, however far in the future.
    pub fn run_all(&self) -> usize {
        let mut fired = 0;
        loop {
            let furthest = {
                let state = self.state.borrow();
                state.pending.iter().map(|(at, _, _)| *at).max()
            };
            let Some(at) = furthest else {
                return fired;
            };
            let now = self.now_ms();
            fired += self.advance(at.saturating_sub(now));
        }
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> TimerId {
        let mut state = self.state.borrow_mut();
        state.next_id = state.next_id.wrapping_add(1);
        let id = TimerId(state.next_id);
        let due = state.now_ms.saturating_add(u64::from(delay_ms));
        state.pending.push((due, id, callback));
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.state
            .borrow_mut()
            .pending
            .retain(|(_, pending, _)| *pending != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> TimerCallback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = Rc::clone(&log);
        let make = move |tag: &'static str| -> TimerCallback {
            let log = Rc::clone(&log_clone);
            Box::new(move || log.borrow_mut().push(tag))
        };
        (log, make)
    }

    #[test]
    fn test_timer_fires_only_when_due() {
        let scheduler = ManualScheduler::new();
        let (log, make) = recorder();
        scheduler.set_timeout(100, make("a"));

        assert_eq!(scheduler.advance(99), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.advance(1), 1);
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(scheduler.now_ms(), 100);
    }

    #[test]
    fn test_timers_fire_in_due_order() {
        let scheduler = ManualScheduler::new();
        let (log, make) = recorder();
        scheduler.set_timeout(300, make("late"));
        scheduler.set_timeout(100, make("early"));
        scheduler.set_timeout(100, make("early-second"));

        scheduler.advance(1000);
        assert_eq!(*log.borrow(), vec!["early", "early-second", "late"]);
    }

    #[test]
    fn test_clear_timeout_cancels() {
        let scheduler = ManualScheduler::new();
        let (log, make) = recorder();
        let id = scheduler.set_timeout(50, make("cancelled"));
        scheduler.set_timeout(60, make("kept"));
        scheduler.clear_timeout(id);
        scheduler.clear_timeout(TimerId(9999));

        scheduler.advance(100);
        assert_eq!(*log.borrow(), vec!["kept"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_callback_can_schedule_more() {
        let scheduler = Rc::new(ManualScheduler::new());
        let hits = Rc::new(RefCell::new(Vec::new()));

        let inner_scheduler = Rc::clone(&scheduler);
        let inner_hits = Rc::clone(&hits);
        scheduler.set_timeout(
            10,
            Box::new(move || {
                inner_hits.borrow_mut().push(inner_scheduler.now_ms());
                let hits = Rc::clone(&inner_hits);
                let clock = Rc::clone(&inner_scheduler);
                inner_scheduler.set_timeout(
                    10,
                    Box::new(move || hits.borrow_mut().push(clock.now_ms())),
                );
            }),
        );

        assert_eq!(scheduler.advance(25), 2);
        assert_eq!(*hits.borrow(), vec![10, 20]);
    }

    #[test]
    fn test_run_all_drains_queue() {
        let scheduler = ManualScheduler::new();
        let (log, make) = recorder();
        scheduler.set_timeout(5000, make("dismiss"));
        scheduler.set_timeout(1000, make("reset"));

        assert_eq!(scheduler.run_all(), 2);
        assert_eq!(*log.borrow(), vec!["reset", "dismiss"]);
        assert_eq!(scheduler.now_ms(), 5000);
    }
}
