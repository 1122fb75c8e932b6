//! `setTimeout`-backed scheduler.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::event::{LogLevel, emit_log};
use crate::timer::{Scheduler, TimerCallback, TimerId};

/// Scheduler on the window's timer queue.
///
/// Callbacks are handed to JS as one-shot closures; a cancelled callback is
/// released when the garbage collector reclaims the closure.
#[derive(Clone, Debug)]
pub struct BrowserScheduler {
    window: Window,
}

impl BrowserScheduler {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> TimerId {
        let function = Closure::once_into_js(move || callback());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(function.unchecked_ref(), delay)
        {
            Ok(handle) => TimerId(handle as u32),
            Err(_) => {
                emit_log(LogLevel::Warn, "setTimeout rejected a callback");
                TimerId(0)
            }
        }
    }

    fn clear_timeout(&self, id: TimerId) {
        self.window.clear_timeout_with_handle(id.0 as i32);
    }
}
