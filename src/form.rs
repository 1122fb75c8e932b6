//! Contact form submission.
//!
//! [`FormCoordinator::submit`] validates every field, focuses the first
//! invalid one, and otherwise posts the form through a [`Transport`]. While
//! the request is in flight a [`SubmittingGuard`] holds the submit button in
//! its "sending" state; dropping the guard restores the original label and
//! re-enables the button whatever the outcome.
//!
//! Failure causes go to the log sink only. The user always sees the same
//! generic failure message.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{FormMessages, PageOptions};
use crate::dom::{Dom, FieldInput, Node};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_event, emit_log};
use crate::timer::{Scheduler, TimerId};
use crate::validate::{clear_field, validate_field};

/// `Accept` header sent with every submission.
pub const ACCEPT_JSON: &str = "application/json";

/// Outbound form post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Endpoint taken from the form's `action`.
    pub action: String,
    /// Name/value pair of every named control, in document order.
    pub fields: Vec<(String, String)>,
    pub accept: &'static str,
}

impl SubmitRequest {
    #[must_use]
    pub fn new(action: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self {
            action: action.into(),
            fields,
            accept: ACCEPT_JSON,
        }
    }
}

/// Capability to deliver a form post.
///
/// Returns the HTTP status of whatever response arrived. Anything that
/// prevents a response (offline, blocked, aborted) is an [`Error::Network`].
#[allow(async_fn_in_trait)] // Single-threaded UI; futures need not be Send.
pub trait Transport {
    async fn post(&self, request: &SubmitRequest) -> Result<u16>;
}

/// Whether a status acknowledges the submission.
#[must_use]
pub fn is_acknowledged(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Result of one submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent. Names the focused field.
    Invalid { field: String },
    /// The endpoint acknowledged the submission.
    Sent,
    /// The submission was not acknowledged.
    Failed(Error),
}

/// Visual flavor of the form status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Holds the submit button in its busy state.
///
/// Acquiring stores the button's label, shows the sending label and disables
/// the button. Dropping restores both.
pub struct SubmittingGuard<D: Dom + 'static> {
    dom: Rc<RefCell<D>>,
    label: Option<String>,
}

impl<D: Dom + 'static> SubmittingGuard<D> {
    pub fn acquire(dom: Rc<RefCell<D>>, sending_label: &str) -> Self {
        let label = {
            let mut page = dom.borrow_mut();
            let label = page.text(&Node::SubmitButton);
            page.set_text(&Node::SubmitButton, sending_label);
            page.set_disabled(&Node::SubmitButton, true);
            label
        };
        Self { dom, label }
    }
}

impl<D: Dom + 'static> Drop for SubmittingGuard<D> {
    fn drop(&mut self) {
        let Ok(mut page) = self.dom.try_borrow_mut() else {
            emit_log(LogLevel::Warn, "submit button left busy: page is borrowed");
            return;
        };
        if let Some(label) = self.label.take() {
            page.set_text(&Node::SubmitButton, &label);
        }
        page.set_disabled(&Node::SubmitButton, false);
    }
}

/// Orchestrates validation, submission and the follow-up timers.
pub struct FormCoordinator<S: Scheduler + 'static> {
    scheduler: Rc<S>,
    messages: FormMessages,
    success_dismiss_ms: u32,
    reset_delay_ms: u32,
    /// Success-dismiss and reset timers of the latest submission.
    timers: RefCell<Vec<TimerId>>,
}

impl<S: Scheduler + 'static> FormCoordinator<S> {
    #[must_use]
    pub fn new(scheduler: Rc<S>, options: &PageOptions) -> Self {
        Self {
            scheduler,
            messages: options.messages.clone(),
            success_dismiss_ms: options.success_dismiss_ms,
            reset_delay_ms: options.reset_delay_ms,
            timers: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn messages(&self) -> &FormMessages {
        &self.messages
    }

    /// Validate every field, returning the name of the first invalid one.
    ///
    /// All fields are validated so each gets its own annotation.
    pub fn validate_all<D: Dom + ?Sized>(&self, dom: &mut D, fields: &[FieldInput]) -> Option<String> {
        let mut first_invalid = None;
        for field in fields {
            if !validate_field(dom, field) && first_invalid.is_none() {
                first_invalid = Some(field.name.clone());
            }
        }
        first_invalid
    }

    /// Run one submit attempt to completion.
    pub async fn submit<D, T>(&self, dom: &Rc<RefCell<D>>, transport: &T) -> SubmitOutcome
    where
        D: Dom + 'static,
        T: Transport,
    {
        // Any new attempt supersedes the previous attempt's timers.
        self.cancel_pending();

        let fields = dom.borrow().form_fields();
        let invalid = self.validate_all(&mut *dom.borrow_mut(), &fields);
        if let Some(field) = invalid {
            let mut page = dom.borrow_mut();
            page.focus(&Node::Field(field.clone()));
            drop(page);
            self.show_status(dom, &self.messages.fix_fields, StatusKind::Error);
            return SubmitOutcome::Invalid { field };
        }

        let _busy = SubmittingGuard::acquire(Rc::clone(dom), &self.messages.sending);

        match self.send(dom, transport).await {
            Ok(()) => {
                self.show_status(dom, &self.messages.success, StatusKind::Success);
                self.schedule_reset(dom, &fields);
                emit_event("submitted", "ok");
                SubmitOutcome::Sent
            }
            Err(err) => {
                emit_log(LogLevel::Error, &format!("form submission error: {err}"));
                self.show_status(dom, &self.messages.failure, StatusKind::Error);
                SubmitOutcome::Failed(err)
            }
        }
    }

    async fn send<D, T>(&self, dom: &Rc<RefCell<D>>, transport: &T) -> Result<()>
    where
        D: Dom + 'static,
        T: Transport,
    {
        let action = dom
            .borrow()
            .form_action()
            .filter(|action| !action.is_empty())
            .ok_or(Error::MissingEndpoint)?;
        let entries = dom.borrow().form_entries();
        let request = SubmitRequest::new(action, entries);
        let status = transport.post(&request).await?;
        if is_acknowledged(status) {
            Ok(())
        } else {
            Err(Error::Rejected { status })
        }
    }

    /// Show a status line. Success lines clear themselves after the dismiss delay.
    pub fn show_status<D: Dom + 'static>(&self, dom: &Rc<RefCell<D>>, message: &str, kind: StatusKind) {
        {
            let mut page = dom.borrow_mut();
            page.set_text(&Node::FormStatus, message);
            page.set_class(&Node::FormStatus, "form-status", true);
            page.set_class(&Node::FormStatus, "success", kind == StatusKind::Success);
            page.set_class(&Node::FormStatus, "error", kind == StatusKind::Error);
            page.set_attribute(&Node::FormStatus, "aria-live", "polite");
        }

        if kind == StatusKind::Success {
            let weak = Rc::downgrade(dom);
            let id = self.scheduler.set_timeout(
                self.success_dismiss_ms,
                Box::new(move || {
                    if let Some(dom) = weak.upgrade() {
                        clear_status(&mut *dom.borrow_mut());
                    }
                }),
            );
            self.timers.borrow_mut().push(id);
        }
    }

    fn schedule_reset<D: Dom + 'static>(&self, dom: &Rc<RefCell<D>>, fields: &[FieldInput]) {
        let weak = Rc::downgrade(dom);
        let names: Vec<String> = fields.iter().map(|field| field.name.clone()).collect();
        let id = self.scheduler.set_timeout(
            self.reset_delay_ms,
            Box::new(move || {
                let Some(dom) = weak.upgrade() else {
                    return;
                };
                let mut page = dom.borrow_mut();
                page.reset_form();
                for name in &names {
                    clear_field(&mut *page, name);
                }
            }),
        );
        self.timers.borrow_mut().push(id);
    }

    /// Cancel the dismiss and reset timers of earlier submissions.
    pub fn cancel_pending(&self) {
        for id in self.timers.borrow_mut().drain(..) {
            self.scheduler.clear_timeout(id);
        }
    }
}

/// Empty the status line and drop its flavor class.
pub fn clear_status<D: Dom + ?Sized>(dom: &mut D) {
    dom.set_text(&Node::FormStatus, "");
    dom.set_class(&Node::FormStatus, StatusKind::Success.class(), false);
    dom.set_class(&Node::FormStatus, StatusKind::Error.class(), false);
}
