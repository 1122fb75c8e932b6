//! Shared fixtures for integration tests.
//!
//! - `page()`: an initialized portfolio page on a virtual clock
//! - `ScriptedTransport`: a `Transport` that replays queued replies and
//!   records every request

#![allow(dead_code)] // Shared test helper; not every integration test uses every fixture
#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use folio_ui::form::{SubmitRequest, Transport};
use folio_ui::{App, Error, ManualScheduler, MemoryDom, PageOptions, Result};

pub type TestApp = Rc<App<MemoryDom, ManualScheduler>>;

/// Initialized portfolio page with default options.
pub fn page() -> (Rc<ManualScheduler>, TestApp) {
    page_with(MemoryDom::portfolio(), PageOptions::default())
}

/// Initialized page from a custom layout and options.
pub fn page_with(dom: MemoryDom, options: PageOptions) -> (Rc<ManualScheduler>, TestApp) {
    let scheduler = Rc::new(ManualScheduler::new());
    let app = App::new(dom, Rc::clone(&scheduler), options);
    app.init(2026);
    (scheduler, app)
}

/// Fill the contact form with valid values.
pub fn fill_valid(app: &TestApp) {
    let mut dom = app.dom().borrow_mut();
    dom.set_field_value("name", "Grace Hopper");
    dom.set_field_value("email", "grace@navy.mil");
    dom.set_field_value("message", "Let's build a compiler together.");
}

/// Transport replaying queued replies in order.
///
/// When the queue runs dry every further post fails with a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<u16>>>,
    requests: RefCell<Vec<SubmitRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(replies: impl IntoIterator<Item = Result<u16>>) -> Self {
        let transport = Self::new();
        transport.replies.borrow_mut().extend(replies);
        transport
    }

    pub fn requests(&self) -> Vec<SubmitRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn post(&self, request: &SubmitRequest) -> Result<u16> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Network("no scripted reply".to_string())))
    }
}
