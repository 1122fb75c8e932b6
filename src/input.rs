//! Page events.
//!
//! The host translates browser events into [`PageEvent`] values and hands
//! them to [`App::dispatch`](crate::app::App::dispatch). Form submission is
//! asynchronous and goes through [`App::submit`](crate::app::App::submit)
//! instead.

use crate::config::AnimationGroupKind;

/// Key identity, from `KeyboardEvent.key`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Escape,
    Enter,
    Tab,
    Char(char),
    /// Any other named key.
    Other(String),
}

impl KeyCode {
    /// Parse a DOM `key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other(key.to_string()),
                }
            }
        }
    }
}

/// A browser event relevant to the page.
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// The document finished loading. Carries the current calendar year.
    Ready { year: i32 },
    /// The mobile menu toggle was clicked.
    ToggleClick,
    /// A navigation link was clicked.
    NavClick { href: String },
    /// Any click on the document.
    DocumentClick { inside_navbar: bool },
    KeyDown(KeyCode),
    Scroll,
    Resize { width: f64, height: f64 },
    FieldBlur { name: String },
    FieldInput { name: String },
    /// Visibility change of an animated element.
    Intersection {
        group: AnimationGroupKind,
        index: usize,
        intersecting: bool,
    },
    /// The page is being hidden or unloaded.
    PageHide,
}

impl PageEvent {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready { .. } => "ready",
            Self::ToggleClick => "toggle-click",
            Self::NavClick { .. } => "nav-click",
            Self::DocumentClick { .. } => "document-click",
            Self::KeyDown(_) => "keydown",
            Self::Scroll => "scroll",
            Self::Resize { .. } => "resize",
            Self::FieldBlur { .. } => "blur",
            Self::FieldInput { .. } => "input",
            Self::Intersection { .. } => "intersection",
            Self::PageHide => "pagehide",
        }
    }
}

impl From<KeyCode> for PageEvent {
    fn from(key: KeyCode) -> Self {
        Self::KeyDown(key)
    }
}
