//! Navigation controller.
//!
//! Owns the mobile menu state and the current section. The menu is a strict
//! two-state machine; entering [`MenuState::Open`] marks the toggle and menu
//! active, flips their ARIA attributes and locks body scrolling, and entering
//! [`MenuState::Closed`] reverses all of it. At most one navigation link
//! carries the `active` class, and it is the one targeting
//! [`current_section`](NavController::current_section).

use crate::dom::{Dom, Node, ScrollBehavior, fragment_target};
use crate::event::{LogLevel, emit_event, emit_log};
use crate::geometry::offset_top;

/// Mobile menu state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }
}

/// Menu state plus the current-section pointer.
#[derive(Clone, Debug)]
pub struct NavController {
    menu: MenuState,
    current: String,
}

impl NavController {
    /// Closed menu with `initial_section` as the current section.
    ///
    /// Nothing is written to the page until [`sync_menu`](Self::sync_menu)
    /// or [`set_active_section`](Self::set_active_section) runs.
    #[must_use]
    pub fn new(initial_section: impl Into<String>) -> Self {
        Self {
            menu: MenuState::Closed,
            current: initial_section.into(),
        }
    }

    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        self.menu
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    #[must_use]
    pub fn current_section(&self) -> &str {
        &self.current
    }

    /// Write the current menu state to the page.
    pub fn sync_menu<D: Dom + ?Sized>(&self, dom: &mut D) {
        let open = self.menu.is_open();
        dom.set_class(&Node::NavToggle, "active", open);
        dom.set_class(&Node::NavMenu, "active", open);
        dom.set_attribute(&Node::NavToggle, "aria-expanded", bool_attr(open));
        dom.set_attribute(&Node::NavMenu, "aria-hidden", bool_attr(!open));
        dom.set_style(&Node::Body, "overflow", if open { "hidden" } else { "" });
    }

    /// Flip the menu between open and closed.
    pub fn toggle_menu<D: Dom + ?Sized>(&mut self, dom: &mut D) -> MenuState {
        self.menu = self.menu.flipped();
        self.sync_menu(dom);
        emit_log(
            LogLevel::Debug,
            if self.menu.is_open() {
                "menu opened"
            } else {
                "menu closed"
            },
        );
        self.menu
    }

    /// Close the menu if it is open. Returns whether anything changed.
    pub fn close_menu<D: Dom + ?Sized>(&mut self, dom: &mut D) -> bool {
        if self.menu.is_open() {
            self.toggle_menu(dom);
            true
        } else {
            false
        }
    }

    /// Handle a click on a navigation link.
    ///
    /// Returns `true` when the click was taken over and the browser's default
    /// navigation must be prevented. Links that are not same-page fragments
    /// are left alone.
    pub fn handle_nav_click<D: Dom + ?Sized>(&mut self, dom: &mut D, href: &str) -> bool {
        let Some(target) = fragment_target(href) else {
            return false;
        };
        self.close_menu(dom);
        scroll_to_section(dom, target);
        self.set_active_section(dom, target);
        true
    }

    /// Make `id` the current section and move the `active` marker to its link.
    pub fn set_active_section<D: Dom + ?Sized>(&mut self, dom: &mut D, id: &str) {
        id.clone_into(&mut self.current);
        for (index, href) in dom.nav_links().iter().enumerate() {
            let matches = fragment_target(href) == Some(id);
            dom.set_class(&Node::NavLink(index), "active", matches);
        }
        emit_event("section", id);
    }
}

/// Smoothly scroll so the section's top sits just below the navigation bar.
///
/// Returns `false`, without scrolling, when no section has that id.
pub fn scroll_to_section<D: Dom + ?Sized>(dom: &mut D, id: &str) -> bool {
    let Some(rect) = dom.rect(&Node::Section(id.to_string())) else {
        return false;
    };
    let top = offset_top(rect, dom.viewport()) - dom.offset_height(&Node::Navbar);
    dom.scroll_to(top, ScrollBehavior::Smooth);
    true
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    fn page() -> (MemoryDom, NavController) {
        let mut dom = MemoryDom::portfolio();
        let nav = NavController::new("home");
        nav.sync_menu(&mut dom);
        (dom, nav)
    }

    // ============================================
    // Menu State Machine
    // ============================================

    #[test]
    fn test_toggle_opens_menu() {
        let (mut dom, mut nav) = page();
        assert_eq!(nav.toggle_menu(&mut dom), MenuState::Open);

        assert!(dom.has_class(&Node::NavToggle, "active"));
        assert!(dom.has_class(&Node::NavMenu, "active"));
        assert_eq!(
            dom.attribute(&Node::NavToggle, "aria-expanded").as_deref(),
            Some("true")
        );
        assert_eq!(
            dom.attribute(&Node::NavMenu, "aria-hidden").as_deref(),
            Some("false")
        );
        assert_eq!(dom.style(&Node::Body, "overflow").as_deref(), Some("hidden"));
    }

    #[test]
    fn test_toggle_twice_restores_flags() {
        let (mut dom, mut nav) = page();
        let before = dom.clone();
        nav.toggle_menu(&mut dom);
        nav.toggle_menu(&mut dom);

        assert_eq!(nav.menu_state(), MenuState::Closed);
        for node in [Node::NavToggle, Node::NavMenu] {
            assert_eq!(dom.has_class(&node, "active"), before.has_class(&node, "active"));
        }
        assert_eq!(
            dom.attribute(&Node::NavToggle, "aria-expanded"),
            before.attribute(&Node::NavToggle, "aria-expanded")
        );
        assert_eq!(
            dom.attribute(&Node::NavMenu, "aria-hidden"),
            before.attribute(&Node::NavMenu, "aria-hidden")
        );
        assert_eq!(dom.style(&Node::Body, "overflow"), None);
    }

    #[test]
    fn test_close_menu_when_closed_is_noop() {
        let (mut dom, mut nav) = page();
        assert!(!nav.close_menu(&mut dom));
        assert_eq!(
            dom.attribute(&Node::NavToggle, "aria-expanded").as_deref(),
            Some("false")
        );
        assert!(!dom.has_class(&Node::NavMenu, "active"));
    }

    #[test]
    fn test_close_menu_when_open() {
        let (mut dom, mut nav) = page();
        nav.toggle_menu(&mut dom);
        assert!(nav.close_menu(&mut dom));
        assert!(!nav.is_menu_open());
        assert!(dom.style(&Node::Body, "overflow").is_none());
    }

    // ============================================
    // Navigation
    // ============================================

    #[test]
    fn test_scroll_to_section_clears_navbar() {
        let mut dom = MemoryDom::portfolio();
        assert!(scroll_to_section(&mut dom, "skills"));
        assert_eq!(
            dom.scroll_requests(),
            &[(1600.0 - 70.0, ScrollBehavior::Smooth)]
        );
    }

    #[test]
    fn test_scroll_to_section_is_scroll_independent() {
        let mut dom = MemoryDom::portfolio();
        dom.set_scroll_y(1234.0);
        scroll_to_section(&mut dom, "about");
        assert_eq!(dom.scroll_requests()[0].0, 800.0 - 70.0);
    }

    #[test]
    fn test_scroll_to_missing_section_is_noop() {
        let mut dom = MemoryDom::portfolio();
        assert!(!scroll_to_section(&mut dom, "blog"));
        assert!(dom.scroll_requests().is_empty());
    }

    #[test]
    fn test_set_active_section_marks_one_link() {
        let (mut dom, mut nav) = page();
        nav.set_active_section(&mut dom, "projects");
        assert_eq!(nav.current_section(), "projects");
        assert_eq!(dom.active_links(), vec![3]);

        nav.set_active_section(&mut dom, "about");
        assert_eq!(dom.active_links(), vec![1]);
    }

    #[test]
    fn test_nav_click_closes_menu_scrolls_and_activates() {
        let (mut dom, mut nav) = page();
        nav.toggle_menu(&mut dom);

        assert!(nav.handle_nav_click(&mut dom, "#contact"));
        assert!(!nav.is_menu_open());
        assert_eq!(dom.scroll_requests().len(), 1);
        assert_eq!(nav.current_section(), "contact");
        assert_eq!(dom.active_links(), vec![4]);
    }

    #[test]
    fn test_nav_click_on_external_link_is_not_intercepted() {
        let (mut dom, mut nav) = page();
        assert!(!nav.handle_nav_click(&mut dom, "https://github.com/someone"));
        assert!(dom.scroll_requests().is_empty());
        assert_eq!(nav.current_section(), "home");
    }

    #[test]
    fn test_nav_click_on_unknown_fragment() {
        let (mut dom, mut nav) = page();
        nav.set_active_section(&mut dom, "home");
        assert!(nav.handle_nav_click(&mut dom, "#blog"));
        assert!(dom.scroll_requests().is_empty());
        assert_eq!(nav.current_section(), "blog");
        assert!(dom.active_links().is_empty());
    }
}
