//! Scroll-spy: mark the navigation entry of the section being read.

use crate::dom::{Dom, Node};
use crate::event::{LogLevel, emit_log};
use crate::geometry::offset_top;
use crate::nav::NavController;

/// Pick the current section from `(id, absolute top)` pairs in document order.
///
/// Scans from the last section to the first and returns the first one whose
/// top is at or above `scroll_position`, so the section scrolled furthest
/// into wins when several qualify.
#[must_use]
pub fn select_section<'a>(sections: &[(&'a str, f64)], scroll_position: f64) -> Option<&'a str> {
    sections
        .iter()
        .rev()
        .find(|(_, top)| *top <= scroll_position)
        .map(|(id, _)| *id)
}

/// Scroll-spy bound to an ordered list of section ids.
#[derive(Clone, Debug)]
pub struct ScrollSpy {
    sections: Vec<String>,
    lookahead_px: f64,
}

impl ScrollSpy {
    #[must_use]
    pub fn new(sections: Vec<String>, lookahead_px: f64) -> Self {
        Self {
            sections,
            lookahead_px,
        }
    }

    /// Probe line: scroll offset plus navigation bar height plus lookahead.
    #[must_use]
    pub fn scroll_position<D: Dom + ?Sized>(&self, dom: &D) -> f64 {
        dom.viewport().scroll_y + dom.offset_height(&Node::Navbar) + self.lookahead_px
    }

    /// Section under the probe line. Sections missing from the page are skipped.
    #[must_use]
    pub fn current<D: Dom + ?Sized>(&self, dom: &D) -> Option<String> {
        let viewport = dom.viewport();
        let offsets: Vec<(&str, f64)> = self
            .sections
            .iter()
            .filter_map(|id| {
                dom.rect(&Node::Section(id.clone()))
                    .map(|rect| (id.as_str(), offset_top(rect, viewport)))
            })
            .collect();
        select_section(&offsets, self.scroll_position(dom)).map(String::from)
    }

    /// Recompute the current section and update the controller when it moved.
    ///
    /// Returns the new section when a change was written to the page.
    pub fn update<D: Dom + ?Sized>(&self, dom: &mut D, nav: &mut NavController) -> Option<String> {
        let section = self.current(dom)?;
        if section == nav.current_section() {
            return None;
        }
        emit_log(LogLevel::Debug, &format!("scroll-spy: {section}"));
        nav.set_active_section(dom, &section);
        Some(section)
    }
}
