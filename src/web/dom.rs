//! `Dom` implementation over the live document.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlTextAreaElement, ScrollToOptions, Window,
};

use crate::config::AnimationGroupKind;
use crate::dom::{Dom, FieldInput, Node, ScrollBehavior};
use crate::geometry::{Rect, Viewport};

/// Selector of validated form controls.
pub const FIELD_SELECTOR: &str = ".form-input";
/// Selector of navigation links.
pub const NAV_LINK_SELECTOR: &str = ".nav-link";

/// The browser page.
///
/// Elements are looked up on every call; nothing is cached, so markup
/// replaced after startup is picked up.
#[derive(Clone, Debug)]
pub struct BrowserDom {
    window: Window,
    document: Document,
}

impl BrowserDom {
    #[must_use]
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Resolve a logical node to its element.
    #[must_use]
    pub fn element(&self, node: &Node) -> Option<Element> {
        match node {
            Node::Body => self.document.body().map(Element::from),
            Node::Navbar => self.by_id("navbar"),
            Node::NavToggle => self.by_id("nav-toggle"),
            Node::NavMenu => self.by_id("nav-menu"),
            Node::NavLink(index) => self.nth(&self.document, NAV_LINK_SELECTOR, *index),
            Node::Section(id) => self.by_id(id),
            Node::Form => self.by_id("contact-form"),
            Node::Field(name) => {
                let form = self.by_id("contact-form")?;
                let selector = format!("{FIELD_SELECTOR}[name=\"{name}\"]");
                form.query_selector(&selector).ok().flatten()
            }
            Node::FieldError(name) => self.by_id(&format!("{name}-error")),
            Node::FormStatus => self.by_id("form-status"),
            Node::SubmitButton => self
                .by_id("contact-form")?
                .query_selector(".submit-btn")
                .ok()
                .flatten(),
            Node::FooterYear => self.by_id("current-year"),
            Node::Animated(group, index) => self.nth(&self.document, group.selector(), *index),
        }
    }

    /// Every element of an animation group, in document order.
    #[must_use]
    pub fn animated_elements(&self, group: AnimationGroupKind) -> Vec<Element> {
        self.all(&self.document, group.selector())
    }

    /// Every validated form control.
    #[must_use]
    pub fn field_elements(&self) -> Vec<Element> {
        self.by_id("contact-form")
            .map(|form| self.all(&form, FIELD_SELECTOR))
            .unwrap_or_default()
    }

    /// Every navigation link.
    #[must_use]
    pub fn nav_link_elements(&self) -> Vec<Element> {
        self.all(&self.document, NAV_LINK_SELECTOR)
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn nth<P: AsRef<web_sys::Node>>(&self, parent: &P, selector: &str, index: usize) -> Option<Element> {
        self.all(parent, selector).into_iter().nth(index)
    }

    fn all<P: AsRef<web_sys::Node>>(&self, parent: &P, selector: &str) -> Vec<Element> {
        let node = parent.as_ref();
        let list = if let Some(document) = node.dyn_ref::<Document>() {
            document.query_selector_all(selector)
        } else if let Some(element) = node.dyn_ref::<Element>() {
            element.query_selector_all(selector)
        } else {
            return Vec::new();
        };
        let Ok(list) = list else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn html(&self, node: &Node) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }
}

/// Name, value and required flag of an `<input>` or `<textarea>`.
pub fn field_input(element: &Element) -> Option<FieldInput> {
    let required = element.has_attribute("required");
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(FieldInput::new(input.name(), input.value(), required));
    }
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        return Some(FieldInput::new(area.name(), area.value(), required));
    }
    None
}

impl Dom for BrowserDom {
    fn exists(&self, node: &Node) -> bool {
        self.element(node).is_some()
    }

    fn has_class(&self, node: &Node, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn set_class(&mut self, node: &Node, class: &str, on: bool) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().toggle_with_force(class, on);
        }
    }

    fn attribute(&self, node: &Node, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Node, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.set_attribute(name, value);
        }
    }

    fn text(&self, node: &Node) -> Option<String> {
        self.element(node)?.text_content()
    }

    fn set_text(&mut self, node: &Node, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn style(&self, node: &Node, property: &str) -> Option<String> {
        self.html(node)?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&mut self, node: &Node, property: &str, value: &str) {
        let Some(element) = self.html(node) else {
            return;
        };
        let style = element.style();
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    fn is_disabled(&self, node: &Node) -> bool {
        let Some(element) = self.element(node) else {
            return false;
        };
        match element.dyn_ref::<HtmlButtonElement>() {
            Some(button) => button.disabled(),
            None => element.has_attribute("disabled"),
        }
    }

    fn set_disabled(&mut self, node: &Node, disabled: bool) {
        let Some(element) = self.element(node) else {
            return;
        };
        if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = element.set_attribute("disabled", "");
        } else {
            let _ = element.remove_attribute("disabled");
        }
    }

    fn focus(&mut self, node: &Node) {
        if let Some(element) = self.html(node) {
            let _ = element.focus();
        }
    }

    fn rect(&self, node: &Node) -> Option<Rect> {
        let rect = self.element(node)?.get_bounding_client_rect();
        Some(Rect::new(rect.top(), rect.bottom()))
    }

    fn offset_height(&self, node: &Node) -> f64 {
        self.html(node)
            .map_or(0.0, |element| f64::from(element.offset_height()))
    }

    fn viewport(&self) -> Viewport {
        let number = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        let mut height = number(self.window.inner_height());
        if height <= 0.0 {
            height = self
                .document
                .document_element()
                .map_or(0.0, |root| f64::from(root.client_height()));
        }
        Viewport::new(
            self.window.scroll_y().unwrap_or(0.0),
            number(self.window.inner_width()),
            height,
        )
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn nav_links(&self) -> Vec<String> {
        self.nav_link_elements()
            .iter()
            .map(|link| link.get_attribute("href").unwrap_or_default())
            .collect()
    }

    fn form_fields(&self) -> Vec<FieldInput> {
        self.field_elements().iter().filter_map(field_input).collect()
    }

    fn form_entries(&self) -> Vec<(String, String)> {
        let Some(form) = self
            .by_id("contact-form")
            .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
        else {
            return Vec::new();
        };
        let Ok(data) = FormData::new_with_form(&form) else {
            return Vec::new();
        };
        let Ok(Some(entries)) = js_sys::try_iter(&data) else {
            return Vec::new();
        };
        // File uploads have no string value and are not carried.
        entries
            .filter_map(Result::ok)
            .filter_map(|entry| entry.dyn_into::<js_sys::Array>().ok())
            .filter_map(|pair| Some((pair.get(0).as_string()?, pair.get(1).as_string()?)))
            .collect()
    }

    fn form_action(&self) -> Option<String> {
        let form = self
            .by_id("contact-form")?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        if !form.has_attribute("action") {
            return None;
        }
        Some(form.action())
    }

    fn reset_form(&mut self) {
        if let Some(form) = self
            .by_id("contact-form")
            .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn animated_len(&self, group: AnimationGroupKind) -> usize {
        self.animated_elements(group).len()
    }
}
