//! E2E tests for the contact form: validation, submission and follow-up timers.

mod common;

use common::{ScriptedTransport, fill_valid, page};
use folio_ui::dom::{Dom, Node};
use folio_ui::{Error, PageEvent, SubmitOutcome};

fn status(app: &common::TestApp) -> (String, bool, bool) {
    let dom = app.dom().borrow();
    (
        dom.text(&Node::FormStatus).unwrap_or_default(),
        dom.has_class(&Node::FormStatus, "success"),
        dom.has_class(&Node::FormStatus, "error"),
    )
}

fn button(app: &common::TestApp) -> (String, bool) {
    let dom = app.dom().borrow();
    (
        dom.text(&Node::SubmitButton).unwrap_or_default(),
        dom.is_disabled(&Node::SubmitButton),
    )
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_e2e_empty_form_flags_every_field() {
    let (_, app) = page();
    let transport = ScriptedTransport::replying([Ok(200)]);

    let outcome = pollster::block_on(app.submit(&transport));

    assert_eq!(
        outcome,
        SubmitOutcome::Invalid {
            field: "name".into()
        }
    );
    assert!(transport.requests().is_empty());

    let dom = app.dom().borrow();
    for (name, message) in [
        ("name", "Name is required"),
        ("email", "Email is required"),
        ("message", "Message is required"),
    ] {
        assert!(dom.has_class(&Node::Field(name.into()), "error"));
        assert_eq!(dom.text(&Node::FieldError(name.into())).as_deref(), Some(message));
    }
    assert_eq!(dom.focused(), Some(&Node::Field("name".into())));
    drop(dom);

    let (text, success, error) = status(&app);
    assert_eq!(text, "Please fix the highlighted fields");
    assert!(!success && error);
}

#[test]
fn test_e2e_focus_goes_to_first_invalid_field() {
    let (_, app) = page();
    fill_valid(&app);
    app.dom().borrow_mut().set_field_value("email", "grace@navy");

    let outcome = pollster::block_on(app.submit(&ScriptedTransport::new()));

    assert_eq!(
        outcome,
        SubmitOutcome::Invalid {
            field: "email".into()
        }
    );
    let dom = app.dom().borrow();
    assert_eq!(dom.focused(), Some(&Node::Field("email".into())));
    assert!(!dom.has_class(&Node::Field("name".into()), "error"));
    assert_eq!(
        dom.text(&Node::FieldError("email".into())).as_deref(),
        Some("Please enter a valid email address")
    );
}

/// Blur flags a field; typing clears it once the value becomes valid.
#[test]
fn test_e2e_blur_then_fix_while_typing() {
    let (_, app) = page();
    let field = Node::Field("message".into());

    // Typing into an unflagged field does not validate it.
    app.dom().borrow_mut().set_field_value("message", "hi");
    app.dispatch(PageEvent::FieldInput {
        name: "message".into(),
    });
    assert!(!app.dom().borrow().has_class(&field, "error"));

    app.dispatch(PageEvent::FieldBlur {
        name: "message".into(),
    });
    assert!(app.dom().borrow().has_class(&field, "error"));

    app.dom().borrow_mut().set_field_value("message", "hi there");
    app.dispatch(PageEvent::FieldInput {
        name: "message".into(),
    });
    let dom = app.dom().borrow();
    assert!(!dom.has_class(&field, "error"));
    assert_eq!(dom.text(&Node::FieldError("message".into())).as_deref(), Some(""));
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_e2e_successful_submission_lifecycle() {
    let (scheduler, app) = page();
    fill_valid(&app);
    let transport = ScriptedTransport::replying([Ok(200)]);

    let outcome = pollster::block_on(app.submit(&transport));
    assert_eq!(outcome, SubmitOutcome::Sent);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].action, "https://formspree.io/f/portfolio");
    assert_eq!(requests[0].accept, "application/json");
    assert!(
        requests[0]
            .fields
            .contains(&("email".to_string(), "grace@navy.mil".to_string()))
    );

    let (text, success, error) = status(&app);
    assert_eq!(text, "Thank you! Your message has been sent successfully.");
    assert!(success && !error);
    assert_eq!(button(&app), ("Send Message".to_string(), false));

    // Fields are still filled until the reset delay passes.
    scheduler.advance(999);
    assert_eq!(app.dom().borrow().reset_count(), 0);
    scheduler.advance(1);
    {
        let dom = app.dom().borrow();
        assert_eq!(dom.reset_count(), 1);
        assert_eq!(dom.field_value("name"), Some(""));
    }

    // The status line outlives the reset and clears after five seconds.
    assert!(!status(&app).0.is_empty());
    scheduler.advance(4000);
    let (text, success, _) = status(&app);
    assert!(text.is_empty());
    assert!(!success);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn test_e2e_rejected_submission_keeps_input() {
    let (scheduler, app) = page();
    fill_valid(&app);
    let transport = ScriptedTransport::replying([Ok(422)]);

    let outcome = pollster::block_on(app.submit(&transport));

    assert_eq!(outcome, SubmitOutcome::Failed(Error::Rejected { status: 422 }));
    let (text, success, error) = status(&app);
    assert_eq!(
        text,
        "Oops! There was a problem sending your message. Please try again."
    );
    assert!(!success && error);
    assert_eq!(button(&app), ("Send Message".to_string(), false));

    scheduler.run_all();
    let dom = app.dom().borrow();
    assert_eq!(dom.reset_count(), 0);
    assert_eq!(dom.field_value("name"), Some("Grace Hopper"));
    // Errors are not auto-dismissed.
    drop(dom);
    assert!(!status(&app).0.is_empty());
}

#[test]
fn test_e2e_network_failure_is_reported() {
    let (_, app) = page();
    fill_valid(&app);
    let transport = ScriptedTransport::new();

    let outcome = pollster::block_on(app.submit(&transport));

    assert!(matches!(outcome, SubmitOutcome::Failed(Error::Network(_))));
    assert_eq!(transport.requests().len(), 1);
    assert!(status(&app).2);
    assert_eq!(button(&app), ("Send Message".to_string(), false));
}

#[test]
fn test_e2e_missing_action_never_posts() {
    let (_, app) = page();
    fill_valid(&app);
    app.dom().borrow_mut().set_form_action(None);
    let transport = ScriptedTransport::replying([Ok(200)]);

    let outcome = pollster::block_on(app.submit(&transport));

    assert_eq!(outcome, SubmitOutcome::Failed(Error::MissingEndpoint));
    assert!(transport.requests().is_empty());
    assert!(status(&app).2);
}

/// A second submission supersedes the first one's timers.
#[test]
fn test_e2e_resubmit_cancels_earlier_timers() {
    let (scheduler, app) = page();
    let transport = ScriptedTransport::replying([Ok(200), Ok(500)]);

    fill_valid(&app);
    assert_eq!(pollster::block_on(app.submit(&transport)), SubmitOutcome::Sent);
    scheduler.advance(500);

    fill_valid(&app);
    let outcome = pollster::block_on(app.submit(&transport));
    assert_eq!(outcome, SubmitOutcome::Failed(Error::Rejected { status: 500 }));

    scheduler.advance(10_000);
    let dom = app.dom().borrow();
    assert_eq!(dom.reset_count(), 0);
    assert_eq!(dom.field_value("message"), Some("Let's build a compiler together."));
    drop(dom);
    // The failure message is not wiped by the first success's dismiss timer.
    let (text, _, error) = status(&app);
    assert!(error);
    assert!(!text.is_empty());
}

/// Leaving the page drops pending form timers.
#[test]
fn test_e2e_pagehide_cancels_reset() {
    let (scheduler, app) = page();
    fill_valid(&app);
    pollster::block_on(app.submit(&ScriptedTransport::replying([Ok(204)])));
    assert!(scheduler.pending() > 0);

    app.dispatch(PageEvent::PageHide);

    assert_eq!(scheduler.pending(), 0);
    assert_eq!(app.dom().borrow().reset_count(), 0);
}

/// A rejected resubmit keeps its "fix the fields" line past the earlier
/// success's dismiss delay.
#[test]
fn test_e2e_invalid_resubmit_status_is_not_dismissed() {
    let (scheduler, app) = page();
    fill_valid(&app);
    let transport = ScriptedTransport::replying([Ok(200)]);
    assert_eq!(pollster::block_on(app.submit(&transport)), SubmitOutcome::Sent);

    // The form has been reset by now, so the next attempt is invalid.
    scheduler.advance(2000);
    let outcome = pollster::block_on(app.submit(&transport));
    assert_eq!(
        outcome,
        SubmitOutcome::Invalid {
            field: "name".into()
        }
    );

    scheduler.advance(4000);
    let (text, success, error) = status(&app);
    assert_eq!(text, "Please fix the highlighted fields");
    assert!(!success && error);
    assert_eq!(scheduler.pending(), 0);
}

/// An invalid resubmit inside the reset window keeps its annotations.
#[test]
fn test_e2e_invalid_resubmit_cancels_pending_reset() {
    let (scheduler, app) = page();
    fill_valid(&app);
    pollster::block_on(app.submit(&ScriptedTransport::replying([Ok(200)])));

    scheduler.advance(500);
    app.dom().borrow_mut().set_field_value("email", "not-an-email");
    let outcome = pollster::block_on(app.submit(&ScriptedTransport::new()));
    assert_eq!(
        outcome,
        SubmitOutcome::Invalid {
            field: "email".into()
        }
    );

    scheduler.advance(1000);
    let dom = app.dom().borrow();
    assert_eq!(dom.reset_count(), 0);
    assert!(dom.has_class(&Node::Field("email".into()), "error"));
    assert_eq!(
        dom.text(&Node::FieldError("email".into())).as_deref(),
        Some("Please enter a valid email address")
    );
    assert_eq!(dom.field_value("email"), Some("not-an-email"));
}

/// Hidden controls travel with the post even though they are never validated.
#[test]
fn test_e2e_hidden_inputs_are_posted() {
    let mut dom = folio_ui::MemoryDom::portfolio();
    dom.add_hidden_input("_subject", "New portfolio message");
    dom.add_hidden_input("_gotcha", "");
    let (_, app) = common::page_with(dom, folio_ui::PageOptions::default());
    fill_valid(&app);
    let transport = ScriptedTransport::replying([Ok(200)]);

    assert_eq!(pollster::block_on(app.submit(&transport)), SubmitOutcome::Sent);

    let requests = transport.requests();
    let names: Vec<&str> = requests[0]
        .fields
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(names, ["name", "email", "message", "_subject", "_gotcha"]);
    assert_eq!(
        requests[0].fields[3],
        ("_subject".to_string(), "New portfolio message".to_string())
    );
    assert!(!app.dom().borrow().exists(&Node::FieldError("_gotcha".into())));
}
