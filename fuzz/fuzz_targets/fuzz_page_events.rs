//! Fuzz target for page event handling.
//!
//! Drives the portfolio page with arbitrary event sequences and checks the
//! menu flags stay consistent with the controller state.

#![no_main]

use std::rc::Rc;

use arbitrary::Arbitrary;
use folio_ui::dom::{Dom, Node};
use folio_ui::{App, KeyCode, ManualScheduler, MemoryDom, PageEvent, PageOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Step<'a> {
    Toggle,
    Nav(&'a str),
    Click(bool),
    Key(&'a str),
    Scroll(u16),
    Resize(u16),
    Blur(&'a str),
    Type(&'a str, &'a str),
    Advance(u16),
}

fuzz_target!(|steps: Vec<Step<'_>>| {
    let scheduler = Rc::new(ManualScheduler::new());
    let app = App::new(
        MemoryDom::portfolio(),
        Rc::clone(&scheduler),
        PageOptions::default(),
    );
    app.init(2026);

    for step in steps {
        match step {
            Step::Toggle => {
                app.dispatch(PageEvent::ToggleClick);
            }
            Step::Nav(href) => {
                app.dispatch(PageEvent::NavClick { href: href.into() });
            }
            Step::Click(inside_navbar) => {
                app.dispatch(PageEvent::DocumentClick { inside_navbar });
            }
            Step::Key(key) => {
                app.dispatch(PageEvent::KeyDown(KeyCode::from_dom_key(key)));
            }
            Step::Scroll(y) => {
                app.dom().borrow_mut().set_scroll_y(f64::from(y));
                app.dispatch(PageEvent::Scroll);
            }
            Step::Resize(width) => {
                app.dispatch(PageEvent::Resize {
                    width: f64::from(width),
                    height: 800.0,
                });
            }
            Step::Blur(name) => {
                app.dispatch(PageEvent::FieldBlur { name: name.into() });
            }
            Step::Type(name, value) => {
                app.dom().borrow_mut().set_field_value(name, value);
                app.dispatch(PageEvent::FieldInput { name: name.into() });
            }
            Step::Advance(ms) => {
                scheduler.advance(u64::from(ms));
            }
        }

        let dom = app.dom().borrow();
        assert_eq!(dom.has_class(&Node::NavMenu, "active"), app.is_menu_open());
        assert!(dom.active_links().len() <= 1);
    }
});
