//! Trailing-edge debounce.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::timer::{Scheduler, TimerId};

struct Inner<A> {
    callback: Box<dyn Fn(A)>,
    pending: Cell<Option<TimerId>>,
    /// Arguments of the most recent call, taken when the timer fires.
    latest: RefCell<Option<A>>,
}

/// Collapses bursts of calls into one trailing call.
///
/// Every [`call`](Self::call) cancels the pending timer and schedules a new
/// one `delay_ms` later. Only the last call of a burst reaches the callback,
/// with that call's arguments. Cloning yields another handle to the same
/// debouncer.
pub struct Debouncer<A: 'static, S: Scheduler + 'static> {
    inner: Rc<Inner<A>>,
    scheduler: Rc<S>,
    delay_ms: u32,
}

impl<A: 'static, S: Scheduler + 'static> Clone for Debouncer<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            scheduler: Rc::clone(&self.scheduler),
            delay_ms: self.delay_ms,
        }
    }
}

impl<A: 'static, S: Scheduler + 'static> Debouncer<A, S> {
    /// Wrap `callback` so it runs at most once per idle window of `delay_ms`.
    pub fn new<F>(scheduler: Rc<S>, delay_ms: u32, callback: F) -> Self
    where
        F: Fn(A) + 'static,
    {
        Self {
            inner: Rc::new(Inner {
                callback: Box::new(callback),
                pending: Cell::new(None),
                latest: RefCell::new(None),
            }),
            scheduler,
            delay_ms,
        }
    }

    /// Record a call and restart the delay window.
    pub fn call(&self, args: A) {
        if let Some(id) = self.inner.pending.take() {
            self.scheduler.clear_timeout(id);
        }
        *self.inner.latest.borrow_mut() = Some(args);

        let weak = Rc::downgrade(&self.inner);
        let id = self.scheduler.set_timeout(
            self.delay_ms,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                inner.pending.set(None);
                let args = inner.latest.borrow_mut().take();
                if let Some(args) = args {
                    (inner.callback)(args);
                }
            }),
        );
        self.inner.pending.set(Some(id));
    }

    /// Drop the pending call, if any, without running it.
    pub fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            self.scheduler.clear_timeout(id);
        }
        self.inner.latest.borrow_mut().take();
    }

    /// Whether a trailing call is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }

    #[must_use]
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}
