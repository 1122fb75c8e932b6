//! In-memory page.
//!
//! `MemoryDom` keeps classes, attributes, text, inline styles and geometry
//! for every registered node, so the full behavior layer can run without a
//! browser. Element positions are stored in document coordinates and
//! converted to viewport coordinates using the current scroll offset.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{Dom, FieldInput, Node, ScrollBehavior};
use crate::config::AnimationGroupKind;
use crate::geometry::{Rect, Viewport};

#[derive(Clone, Debug, Default)]
struct Element {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    styles: BTreeMap<String, String>,
    disabled: bool,
    /// Top edge in document coordinates.
    doc_top: f64,
    height: f64,
}

#[derive(Clone, Debug)]
struct Field {
    name: String,
    value: String,
    initial: String,
    required: bool,
    /// Hidden controls are submitted but never validated.
    hidden: bool,
}

/// Page model held entirely in memory.
#[derive(Clone, Debug)]
pub struct MemoryDom {
    elements: HashMap<Node, Element>,
    nav_links: Vec<String>,
    fields: Vec<Field>,
    form_action: Option<String>,
    animated: BTreeMap<AnimationGroupKind, usize>,
    viewport: Viewport,
    focused: Option<Node>,
    scrolls: Vec<(f64, ScrollBehavior)>,
    resets: usize,
}

impl MemoryDom {
    /// Empty page with the given viewport size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: HashMap::new(),
            nav_links: Vec::new(),
            fields: Vec::new(),
            form_action: None,
            animated: BTreeMap::new(),
            viewport: Viewport::new(0.0, width, height),
            focused: None,
            scrolls: Vec::new(),
            resets: 0,
        }
    }

    /// The shipped portfolio layout.
    ///
    /// 1280x800 viewport, a 70px navigation bar, five 800px sections, a
    /// contact form with required `name`, `email` and `message` fields, six
    /// skill tiles and three project cards.
    #[must_use]
    pub fn portfolio() -> Self {
        let mut dom = Self::new(1280.0, 800.0);
        dom.add_element(Node::Body, 0.0, 4000.0);
        dom.add_element(Node::Navbar, 0.0, 70.0);
        dom.add_element(Node::NavToggle, 15.0, 40.0);
        dom.add_element(Node::NavMenu, 0.0, 70.0);
        for (index, id) in ["home", "about", "skills", "projects", "contact"]
            .into_iter()
            .enumerate()
        {
            dom.add_nav_link(&format!("#{id}"));
            dom.add_section(id, index as f64 * 800.0, 800.0);
        }
        dom.add_element(Node::Form, 3300.0, 500.0);
        dom.set_form_action(Some("https://formspree.io/f/portfolio"));
        dom.add_field("name", true);
        dom.add_field("email", true);
        dom.add_field("message", true);
        dom.add_element(Node::FormStatus, 3750.0, 20.0);
        dom.add_element(Node::SubmitButton, 3700.0, 40.0);
        dom.set_text(&Node::SubmitButton, "Send Message");
        dom.add_element(Node::FooterYear, 3980.0, 16.0);
        let skill_tops: Vec<f64> = (0..6_i32).map(|i| 1700.0 + f64::from(i) * 100.0).collect();
        dom.add_animated(AnimationGroupKind::Skills, &skill_tops, 80.0);
        dom.add_animated(AnimationGroupKind::Projects, &[2500.0, 2750.0, 3000.0], 200.0);
        dom
    }

    /// Register an element. Replaces any previous element for the node.
    pub fn add_element(&mut self, node: Node, doc_top: f64, height: f64) {
        self.elements.insert(
            node,
            Element {
                doc_top,
                height,
                ..Element::default()
            },
        );
    }

    /// Remove an element from the page.
    pub fn remove_element(&mut self, node: &Node) {
        self.elements.remove(node);
        if let Node::Field(name) = node {
            self.fields.retain(|field| &field.name != name);
        }
    }

    pub fn add_section(&mut self, id: &str, doc_top: f64, height: f64) {
        self.add_element(Node::Section(id.to_string()), doc_top, height);
    }

    /// Append a navigation link, returning its index.
    pub fn add_nav_link(&mut self, href: &str) -> usize {
        let index = self.nav_links.len();
        self.nav_links.push(href.to_string());
        let mut element = Element::default();
        element
            .attributes
            .insert("href".to_string(), href.to_string());
        self.elements.insert(Node::NavLink(index), element);
        index
    }

    /// Append a form control together with its `{name}-error` element.
    pub fn add_field(&mut self, name: &str, required: bool) {
        self.fields.push(Field {
            name: name.to_string(),
            value: String::new(),
            initial: String::new(),
            required,
            hidden: false,
        });
        let mut element = Element::default();
        if required {
            element
                .attributes
                .insert("required".to_string(), String::new());
        }
        self.elements.insert(Node::Field(name.to_string()), element);
        self.elements
            .insert(Node::FieldError(name.to_string()), Element::default());
    }

    /// Append a hidden form control carrying a fixed value.
    pub fn add_hidden_input(&mut self, name: &str, value: &str) {
        self.fields.push(Field {
            name: name.to_string(),
            value: value.to_string(),
            initial: value.to_string(),
            required: false,
            hidden: true,
        });
    }

    /// Type into a form control.
    pub fn set_field_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.name == name) {
            field.value = value.to_string();
        }
    }

    #[must_use]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    pub fn set_form_action(&mut self, action: Option<&str>) {
        self.form_action = action.map(String::from);
    }

    /// Register an animation group with one element per entry in `doc_tops`.
    pub fn add_animated(&mut self, group: AnimationGroupKind, doc_tops: &[f64], height: f64) {
        for (index, top) in doc_tops.iter().enumerate() {
            self.add_element(Node::Animated(group, index), *top, height);
        }
        self.animated.insert(group, doc_tops.len());
    }

    /// Jump to a scroll offset without recording a scroll request.
    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y.max(0.0);
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    /// Node that last received focus.
    #[must_use]
    pub fn focused(&self) -> Option<&Node> {
        self.focused.as_ref()
    }

    /// Every `scroll_to` request, oldest first.
    #[must_use]
    pub fn scroll_requests(&self) -> &[(f64, ScrollBehavior)] {
        &self.scrolls
    }

    /// How many times the form was reset.
    #[must_use]
    pub fn reset_count(&self) -> usize {
        self.resets
    }

    /// Indices of navigation links carrying the `active` class.
    #[must_use]
    pub fn active_links(&self) -> Vec<usize> {
        (0..self.nav_links.len())
            .filter(|index| self.has_class(&Node::NavLink(*index), "active"))
            .collect()
    }
}

impl Dom for MemoryDom {
    fn exists(&self, node: &Node) -> bool {
        self.elements.contains_key(node)
    }

    fn has_class(&self, node: &Node, class: &str) -> bool {
        self.elements
            .get(node)
            .is_some_and(|element| element.classes.contains(class))
    }

    fn set_class(&mut self, node: &Node, class: &str, on: bool) {
        if let Some(element) = self.elements.get_mut(node) {
            if on {
                element.classes.insert(class.to_string());
            } else {
                element.classes.remove(class);
            }
        }
    }

    fn attribute(&self, node: &Node, name: &str) -> Option<String> {
        self.elements
            .get(node)
            .and_then(|element| element.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, node: &Node, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(node) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn text(&self, node: &Node) -> Option<String> {
        self.elements.get(node).map(|element| element.text.clone())
    }

    fn set_text(&mut self, node: &Node, text: &str) {
        if let Some(element) = self.elements.get_mut(node) {
            element.text = text.to_string();
        }
    }

    fn style(&self, node: &Node, property: &str) -> Option<String> {
        self.elements
            .get(node)
            .and_then(|element| element.styles.get(property).cloned())
    }

    fn set_style(&mut self, node: &Node, property: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(node) {
            if value.is_empty() {
                element.styles.remove(property);
            } else {
                element
                    .styles
                    .insert(property.to_string(), value.to_string());
            }
        }
    }

    fn is_disabled(&self, node: &Node) -> bool {
        self.elements.get(node).is_some_and(|element| element.disabled)
    }

    fn set_disabled(&mut self, node: &Node, disabled: bool) {
        if let Some(element) = self.elements.get_mut(node) {
            element.disabled = disabled;
        }
    }

    fn focus(&mut self, node: &Node) {
        if self.elements.contains_key(node) {
            self.focused = Some(node.clone());
        }
    }

    fn rect(&self, node: &Node) -> Option<Rect> {
        self.elements.get(node).map(|element| {
            Rect::with_height(element.doc_top, element.height).scrolled_by(self.viewport.scroll_y)
        })
    }

    fn offset_height(&self, node: &Node) -> f64 {
        self.elements.get(node).map_or(0.0, |element| element.height)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scrolls.push((top, behavior));
        self.viewport.scroll_y = top.max(0.0);
    }

    fn nav_links(&self) -> Vec<String> {
        self.nav_links.clone()
    }

    fn form_fields(&self) -> Vec<FieldInput> {
        self.fields
            .iter()
            .filter(|field| !field.hidden)
            .map(|field| FieldInput::new(&field.name, &field.value, field.required))
            .collect()
    }

    fn form_entries(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), field.value.clone()))
            .collect()
    }

    fn form_action(&self) -> Option<String> {
        self.form_action.clone()
    }

    fn reset_form(&mut self) {
        for field in &mut self.fields {
            field.value = field.initial.clone();
        }
        self.resets += 1;
    }

    fn animated_len(&self, group: AnimationGroupKind) -> usize {
        self.animated.get(&group).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_layout() {
        let dom = MemoryDom::portfolio();
        assert_eq!(dom.nav_links().len(), 5);
        assert_eq!(dom.nav_links()[2], "#skills");
        assert!(dom.exists(&Node::Section("contact".into())));
        assert_eq!(dom.form_fields().len(), 3);
        assert!(dom.form_fields().iter().all(|field| field.required));
        assert_eq!(dom.animated_len(AnimationGroupKind::Skills), 6);
        assert_eq!(dom.animated_len(AnimationGroupKind::Projects), 3);
        assert_eq!(dom.text(&Node::SubmitButton).as_deref(), Some("Send Message"));
    }

    #[test]
    fn test_missing_node_operations_are_noops() {
        let mut dom = MemoryDom::new(800.0, 600.0);
        let ghost = Node::Section("ghost".into());
        dom.set_class(&ghost, "active", true);
        dom.set_text(&ghost, "boo");
        dom.focus(&ghost);
        assert!(!dom.exists(&ghost));
        assert!(!dom.has_class(&ghost, "active"));
        assert!(dom.text(&ghost).is_none());
        assert!(dom.rect(&ghost).is_none());
        assert!(dom.focused().is_none());
        assert!(dom.offset_height(&ghost).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rect_follows_scroll() {
        let mut dom = MemoryDom::portfolio();
        let about = Node::Section("about".into());
        assert_eq!(dom.rect(&about), Some(Rect::new(800.0, 1600.0)));
        dom.set_scroll_y(500.0);
        assert_eq!(dom.rect(&about), Some(Rect::new(300.0, 1100.0)));
    }

    #[test]
    fn test_empty_style_value_removes_property() {
        let mut dom = MemoryDom::portfolio();
        dom.set_style(&Node::Body, "overflow", "hidden");
        assert_eq!(dom.style(&Node::Body, "overflow").as_deref(), Some("hidden"));
        dom.set_style(&Node::Body, "overflow", "");
        assert!(dom.style(&Node::Body, "overflow").is_none());
    }

    #[test]
    fn test_hidden_inputs_are_encoded_but_not_validated() {
        let mut dom = MemoryDom::portfolio();
        dom.add_hidden_input("_subject", "New portfolio message");
        dom.set_field_value("name", "Ada");

        assert_eq!(dom.form_fields().len(), 3);
        let entries = dom.form_entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0], ("name".to_string(), "Ada".to_string()));
        assert_eq!(
            entries[3],
            ("_subject".to_string(), "New portfolio message".to_string())
        );

        dom.reset_form();
        assert_eq!(dom.field_value("_subject"), Some("New portfolio message"));
    }

    #[test]
    fn test_reset_form_restores_initial_values() {
        let mut dom = MemoryDom::portfolio();
        dom.set_field_value("name", "Ada");
        dom.reset_form();
        assert_eq!(dom.field_value("name"), Some(""));
        assert_eq!(dom.reset_count(), 1);
    }

    #[test]
    fn test_scroll_requests_are_recorded() {
        let mut dom = MemoryDom::portfolio();
        dom.scroll_to(730.0, ScrollBehavior::Smooth);
        dom.scroll_to(-20.0, ScrollBehavior::Instant);
        assert_eq!(dom.scroll_requests().len(), 2);
        assert!(dom.viewport().scroll_y.abs() < f64::EPSILON);
    }

    #[test]
    fn test_nav_link_href_attribute() {
        let dom = MemoryDom::portfolio();
        assert_eq!(
            dom.attribute(&Node::NavLink(1), "href").as_deref(),
            Some("#about")
        );
    }
}
