//! Page initialization and event handlers.
//!
//! [`App`] owns every piece of page state: the navigation controller, the
//! scroll-spy, the animator and the form coordinator. Hosts create it once,
//! call [`init`](App::init) when the document is ready, then feed it events.
//! All handlers run on the UI thread, so interior mutability is plain
//! `RefCell`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::animate::Animator;
use crate::config::{AnimationGroupKind, PageOptions};
use crate::debounce::Debouncer;
use crate::dom::{Dom, Node};
use crate::event::{LogLevel, emit_event, emit_log};
use crate::form::{FormCoordinator, SubmitOutcome, Transport};
use crate::input::{KeyCode, PageEvent};
use crate::nav::NavController;
use crate::scroll_spy::ScrollSpy;
use crate::timer::Scheduler;
use crate::validate::validate_field;

/// The page behavior layer.
pub struct App<D: Dom + 'static, S: Scheduler + 'static> {
    options: PageOptions,
    dom: Rc<RefCell<D>>,
    nav: RefCell<NavController>,
    spy: ScrollSpy,
    animator: RefCell<Animator>,
    form: FormCoordinator<S>,
    scroll: Debouncer<(), S>,
    /// Whether the host reports visibility through [`PageEvent::Intersection`].
    observer: Cell<bool>,
}

impl<D: Dom + 'static, S: Scheduler + 'static> App<D, S> {
    /// Build the behavior layer around a page.
    ///
    /// Nothing is written to the page until [`init`](Self::init).
    pub fn new(dom: D, scheduler: Rc<S>, options: PageOptions) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let tick = weak.clone();
            let scroll = Debouncer::new(
                Rc::clone(&scheduler),
                options.scroll_debounce_ms,
                move |()| {
                    if let Some(app) = tick.upgrade() {
                        app.update_active_section();
                    }
                },
            );
            Self {
                nav: RefCell::new(NavController::new(options.initial_section.clone())),
                spy: ScrollSpy::new(options.sections.clone(), options.scroll_lookahead_px),
                animator: RefCell::new(Animator::new(options.animations.clone())),
                form: FormCoordinator::new(scheduler, &options),
                scroll,
                observer: Cell::new(true),
                dom: Rc::new(RefCell::new(dom)),
                options,
            }
        })
    }

    #[must_use]
    pub fn dom(&self) -> &Rc<RefCell<D>> {
        &self.dom
    }

    #[must_use]
    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.nav.borrow().is_menu_open()
    }

    #[must_use]
    pub fn current_section(&self) -> String {
        self.nav.borrow().current_section().to_string()
    }

    /// Declare whether the host delivers intersection events.
    ///
    /// Without them, animated elements are revealed from scroll geometry.
    pub fn set_observer_supported(&self, supported: bool) {
        self.observer.set(supported);
    }

    /// One-time setup once the document is ready.
    pub fn init(&self, year: i32) {
        {
            let mut dom = self.dom.borrow_mut();
            if dom.exists(&Node::FooterYear) {
                dom.set_text(&Node::FooterYear, &year.to_string());
            }
            let mut nav = self.nav.borrow_mut();
            nav.sync_menu(&mut *dom);
            self.animator.borrow_mut().init(&mut *dom);
            nav.set_active_section(&mut *dom, &self.options.initial_section);
            dom.set_class(&Node::Body, "loaded", true);
        }
        if !self.observer.get() {
            self.reveal_visible();
        }
        emit_log(LogLevel::Info, "page initialized");
        emit_event("initialized", "");
    }

    /// Route a synchronous event to its handler.
    ///
    /// Returns `true` when the browser's default action must be prevented.
    pub fn dispatch(&self, event: PageEvent) -> bool {
        match event {
            PageEvent::Ready { year } => self.init(year),
            PageEvent::ToggleClick => self.on_toggle_click(),
            PageEvent::NavClick { href } => return self.on_nav_click(&href),
            PageEvent::DocumentClick { inside_navbar } => self.on_document_click(inside_navbar),
            PageEvent::KeyDown(key) => self.on_key_down(&key),
            PageEvent::Scroll => self.on_scroll(),
            PageEvent::Resize { width, .. } => self.on_resize(width),
            PageEvent::FieldBlur { name } => self.on_field_blur(&name),
            PageEvent::FieldInput { name } => self.on_field_input(&name),
            PageEvent::Intersection {
                group,
                index,
                intersecting,
            } => self.on_intersection(group, index, intersecting),
            PageEvent::PageHide => self.teardown(),
        }
        false
    }

    pub fn on_toggle_click(&self) {
        let mut dom = self.dom.borrow_mut();
        self.nav.borrow_mut().toggle_menu(&mut *dom);
    }

    /// Returns `true` when the link was handled in-page.
    pub fn on_nav_click(&self, href: &str) -> bool {
        let mut dom = self.dom.borrow_mut();
        self.nav.borrow_mut().handle_nav_click(&mut *dom, href)
    }

    /// Clicks outside the navigation bar close an open menu.
    pub fn on_document_click(&self, inside_navbar: bool) {
        if !inside_navbar {
            self.close_menu();
        }
    }

    pub fn on_key_down(&self, key: &KeyCode) {
        if *key == KeyCode::Escape {
            self.close_menu();
        }
    }

    /// Growing past the mobile breakpoint closes an open menu.
    pub fn on_resize(&self, width: f64) {
        if width > self.options.mobile_breakpoint_px {
            self.close_menu();
        }
    }

    /// Raw scroll event. The scroll-spy runs once the scrolling settles.
    pub fn on_scroll(&self) {
        self.scroll.call(());
        if !self.observer.get() {
            self.reveal_visible();
        }
    }

    /// Scroll-spy tick.
    pub fn update_active_section(&self) -> Option<String> {
        let mut dom = self.dom.borrow_mut();
        self.spy.update(&mut *dom, &mut self.nav.borrow_mut())
    }

    /// Leaving a field always validates it.
    pub fn on_field_blur(&self, name: &str) {
        let mut dom = self.dom.borrow_mut();
        let field = dom.form_fields().into_iter().find(|field| field.name == name);
        if let Some(field) = field {
            validate_field(&mut *dom, &field);
        }
    }

    /// Typing re-validates only fields already flagged as invalid.
    pub fn on_field_input(&self, name: &str) {
        let flagged = self
            .dom
            .borrow()
            .has_class(&Node::Field(name.to_string()), "error");
        if flagged {
            self.on_field_blur(name);
        }
    }

    pub fn on_intersection(&self, group: AnimationGroupKind, index: usize, intersecting: bool) {
        let mut dom = self.dom.borrow_mut();
        self.animator
            .borrow_mut()
            .on_intersect(&mut *dom, group, index, intersecting);
    }

    /// Handle a form submit. The caller prevents the default submission.
    pub async fn submit<T: Transport>(&self, transport: &T) -> SubmitOutcome {
        self.form.submit(&self.dom, transport).await
    }

    /// Cancel every pending timer owned by the page.
    pub fn teardown(&self) {
        self.scroll.cancel();
        self.form.cancel_pending();
    }

    fn close_menu(&self) {
        let mut dom = self.dom.borrow_mut();
        self.nav.borrow_mut().close_menu(&mut *dom);
    }

    fn reveal_visible(&self) {
        let mut dom = self.dom.borrow_mut();
        self.animator
            .borrow_mut()
            .reveal_visible(&mut *dom, self.options.viewport_threshold);
    }
}
