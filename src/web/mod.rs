//! Browser binding.
//!
//! Wires browser events to [`App`] handlers once the document is ready.
//! Only compiled for `wasm32`.

mod dom;
mod fetch;
mod timer;

pub use dom::{BrowserDom, FIELD_SELECTOR, NAV_LINK_SELECTOR, field_input};
pub use fetch::FetchTransport;
pub use timer::BrowserScheduler;

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};

use crate::app::App;
use crate::config::{AnimationOptions, PageOptions};
use crate::event::{LogLevel, emit_log, set_log_callback};
use crate::input::{KeyCode, PageEvent};

type PageApp = App<BrowserDom, BrowserScheduler>;

/// Attribute carrying an animated element's index within its group.
const INDEX_ATTR: &str = "data-animate-index";

/// Module entry point.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    set_log_callback(console_sink);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let target = document.clone();
        let mut pending = Some((window, document));
        listen(&target, "DOMContentLoaded", move |_: web_sys::Event| {
            if let Some((window, document)) = pending.take() {
                if let Err(err) = boot(window, document) {
                    emit_log(LogLevel::Error, &format!("page init failed: {err:?}"));
                }
            }
        })
    } else {
        boot(window, document)
    }
}

fn console_sink(level: LogLevel, message: &str) {
    let message = JsValue::from_str(message);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&message),
        LogLevel::Info => web_sys::console::log_1(&message),
        LogLevel::Warn => web_sys::console::warn_1(&message),
        LogLevel::Error => web_sys::console::error_1(&message),
    }
}

fn boot(window: Window, document: Document) -> Result<(), JsValue> {
    let observer_supported =
        js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);

    let page = BrowserDom::new(window.clone(), document.clone());
    let scheduler = Rc::new(BrowserScheduler::new(window.clone()));
    let app = App::new(page.clone(), scheduler, PageOptions::default());
    app.set_observer_supported(observer_supported);

    wire_navigation(&app, &page, &document)?;
    wire_form(&app, &page, &window)?;
    wire_window(&app, &window)?;

    let year = js_sys::Date::new_0().get_full_year() as i32;
    app.init(year);

    if observer_supported {
        for options in &app.options().animations {
            observe_group(&app, &page, options)?;
        }
    }
    Ok(())
}

fn wire_navigation(
    app: &Rc<PageApp>,
    page: &BrowserDom,
    document: &Document,
) -> Result<(), JsValue> {
    if let Some(toggle) = document.get_element_by_id("nav-toggle") {
        let app = Rc::clone(app);
        listen(&toggle, "click", move |_: web_sys::Event| {
            app.dispatch(PageEvent::ToggleClick);
        })?;
    }

    for link in page.nav_link_elements() {
        let app = Rc::clone(app);
        listen(&link, "click", move |event: web_sys::Event| {
            let href = event
                .current_target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|link| link.get_attribute("href"))
                .unwrap_or_default();
            if app.dispatch(PageEvent::NavClick { href }) {
                event.prevent_default();
            }
        })?;
    }

    {
        let app = Rc::clone(app);
        let document_for_click = document.clone();
        listen(document, "click", move |event: web_sys::Event| {
            let navbar = document_for_click.get_element_by_id("navbar");
            let target = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Node>().ok());
            let inside_navbar = match (navbar, target) {
                (Some(navbar), Some(target)) => navbar.contains(Some(&target)),
                _ => false,
            };
            app.dispatch(PageEvent::DocumentClick { inside_navbar });
        })?;
    }

    {
        let app = Rc::clone(app);
        listen(document, "keydown", move |event: KeyboardEvent| {
            app.dispatch(PageEvent::KeyDown(KeyCode::from_dom_key(&event.key())));
        })?;
    }

    Ok(())
}

fn wire_form(app: &Rc<PageApp>, page: &BrowserDom, window: &Window) -> Result<(), JsValue> {
    let Some(form) = page.document().get_element_by_id("contact-form") else {
        emit_log(LogLevel::Warn, "contact form not found");
        return Ok(());
    };

    {
        let app = Rc::clone(app);
        let transport = FetchTransport::new(window.clone());
        listen(&form, "submit", move |event: web_sys::Event| {
            event.prevent_default();
            let app = Rc::clone(&app);
            let transport = transport.clone();
            wasm_bindgen_futures::spawn_local(async move {
                app.submit(&transport).await;
            });
        })?;
    }

    for field in page.field_elements() {
        let Some(name) = field.get_attribute("name") else {
            continue;
        };
        {
            let app = Rc::clone(app);
            let name = name.clone();
            listen(&field, "blur", move |_: web_sys::Event| {
                app.dispatch(PageEvent::FieldBlur { name: name.clone() });
            })?;
        }
        let app = Rc::clone(app);
        listen(&field, "input", move |_: web_sys::Event| {
            app.dispatch(PageEvent::FieldInput { name: name.clone() });
        })?;
    }
    Ok(())
}

fn wire_window(app: &Rc<PageApp>, window: &Window) -> Result<(), JsValue> {
    {
        let app = Rc::clone(app);
        listen(window, "scroll", move |_: web_sys::Event| {
            app.dispatch(PageEvent::Scroll);
        })?;
    }
    {
        let app = Rc::clone(app);
        let window_for_resize = window.clone();
        listen(window, "resize", move |_: web_sys::Event| {
            let size = |value: Result<JsValue, JsValue>| {
                value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
            };
            app.dispatch(PageEvent::Resize {
                width: size(window_for_resize.inner_width()),
                height: size(window_for_resize.inner_height()),
            });
        })?;
    }
    let app = Rc::clone(app);
    listen(window, "pagehide", move |_: web_sys::Event| {
        app.dispatch(PageEvent::PageHide);
    })
}

/// Watch one animation group, reporting each element until it is revealed.
fn observe_group(app: &Rc<PageApp>, page: &BrowserDom, options: &AnimationOptions) -> Result<(), JsValue> {
    let group = options.group;
    let elements = page.animated_elements(group);
    for (index, element) in elements.iter().enumerate() {
        element.set_attribute(INDEX_ATTR, &index.to_string())?;
    }

    let app = Rc::clone(app);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(index) = target
                    .get_attribute(INDEX_ATTR)
                    .and_then(|value| value.parse::<usize>().ok())
                else {
                    continue;
                };
                let intersecting = entry.is_intersecting();
                app.dispatch(PageEvent::Intersection {
                    group,
                    index,
                    intersecting,
                });
                if intersecting {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    if let Some(margin) = &options.root_margin {
        init.set_root_margin(margin);
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for element in &elements {
        observer.observe(element);
    }
    callback.forget();
    Ok(())
}

/// Attach a listener for the page's lifetime.
fn listen<T, E, F>(target: &T, kind: &str, mut handler: F) -> Result<(), JsValue>
where
    T: AsRef<EventTarget>,
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    target
        .as_ref()
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
