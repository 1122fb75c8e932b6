//! Page surface abstraction.
//!
//! Handlers never touch a browser API directly. They address the fixed set of
//! page elements through [`Node`] and mutate them through the [`Dom`] trait,
//! which the browser binding implements on top of `web-sys` and
//! [`MemoryDom`] implements in memory for native hosts and tests.
//!
//! Every operation on a node that does not exist is a silent no-op, and every
//! query on one returns the empty answer (`None`, `false`, `0.0`).

pub mod memory;

pub use memory::MemoryDom;

use crate::config::AnimationGroupKind;
use crate::geometry::{Rect, Viewport};

/// Logical page element addressed by the behavior layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node {
    /// Document body.
    Body,
    /// Fixed navigation bar (`#navbar`).
    Navbar,
    /// Mobile menu toggle (`#nav-toggle`).
    NavToggle,
    /// Navigation menu (`#nav-menu`).
    NavMenu,
    /// The n-th `.nav-link`, in document order.
    NavLink(usize),
    /// Page section by element id.
    Section(String),
    /// Contact form (`#contact-form`).
    Form,
    /// Form input by field name.
    Field(String),
    /// Inline error element of a field (`#{name}-error`).
    FieldError(String),
    /// Form-level status line (`#form-status`).
    FormStatus,
    /// Submit button (`.submit-btn`).
    SubmitButton,
    /// Footer year placeholder (`#current-year`).
    FooterYear,
    /// The n-th element of an entrance animation group.
    Animated(AnimationGroupKind, usize),
}

/// Scroll animation requested from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Snapshot of one form control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInput {
    pub name: String,
    pub value: String,
    pub required: bool,
}

impl FieldInput {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            required,
        }
    }
}

/// Mutable view of the page.
pub trait Dom {
    /// Whether the node is present in the page.
    fn exists(&self, node: &Node) -> bool;

    fn has_class(&self, node: &Node, class: &str) -> bool;
    /// Add (`on == true`) or remove a class.
    fn set_class(&mut self, node: &Node, class: &str, on: bool);

    fn attribute(&self, node: &Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Node, name: &str, value: &str);

    fn text(&self, node: &Node) -> Option<String>;
    fn set_text(&mut self, node: &Node, text: &str);

    fn style(&self, node: &Node, property: &str) -> Option<String>;
    /// Set an inline style property. An empty value removes it.
    fn set_style(&mut self, node: &Node, property: &str, value: &str);

    fn is_disabled(&self, node: &Node) -> bool;
    fn set_disabled(&mut self, node: &Node, disabled: bool);

    fn focus(&mut self, node: &Node);

    /// Bounding rect in viewport coordinates.
    fn rect(&self, node: &Node) -> Option<Rect>;
    /// Rendered height including borders, `0.0` when absent.
    fn offset_height(&self, node: &Node) -> f64;

    fn viewport(&self) -> Viewport;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// `href` of every navigation link, in document order.
    fn nav_links(&self) -> Vec<String>;

    /// Current value of every validated form control, in document order.
    fn form_fields(&self) -> Vec<FieldInput>;
    /// Every named control as the form itself would encode it, hidden
    /// inputs included, in document order.
    fn form_entries(&self) -> Vec<(String, String)>;
    /// Endpoint the form posts to.
    fn form_action(&self) -> Option<String>;
    /// Restore every form control to its initial value.
    fn reset_form(&mut self);

    /// Number of elements in an animation group.
    fn animated_len(&self, group: AnimationGroupKind) -> usize;
}

/// Section id a navigation `href` points at.
///
/// Only same-page fragment links (`#about`) qualify.
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}
