//! Entrance animations for skill tiles and project cards.
//!
//! Each element starts transparent and shifted down, with a transition delay
//! staggered by its index. The first time it becomes visible it is flipped to
//! fully opaque and untransformed. Reveals are one-way: scrolling back out of
//! view does not hide an element again.

use std::collections::BTreeSet;

use crate::config::{AnimationGroupKind, AnimationOptions};
use crate::dom::{Dom, Node};
use crate::geometry::is_in_viewport;

/// Inline `transition` value for the element at `index`.
#[must_use]
pub fn transition_for(options: &AnimationOptions, index: usize) -> String {
    let delay = options.stagger_ms as usize * index;
    let duration = options.duration_ms;
    format!("opacity {duration}ms ease {delay}ms, transform {duration}ms ease {delay}ms")
}

/// Tracks which animated elements have been revealed.
#[derive(Clone, Debug, Default)]
pub struct Animator {
    groups: Vec<AnimationOptions>,
    revealed: BTreeSet<(AnimationGroupKind, usize)>,
}

impl Animator {
    #[must_use]
    pub fn new(groups: Vec<AnimationOptions>) -> Self {
        Self {
            groups,
            revealed: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn groups(&self) -> &[AnimationOptions] {
        &self.groups
    }

    /// Put every element of every group in its hidden starting state.
    pub fn init<D: Dom + ?Sized>(&mut self, dom: &mut D) {
        self.revealed.clear();
        for options in &self.groups {
            for index in 0..dom.animated_len(options.group) {
                let node = Node::Animated(options.group, index);
                dom.set_style(&node, "opacity", "0");
                dom.set_style(
                    &node,
                    "transform",
                    &format!("translateY({}px)", options.offset_px),
                );
                dom.set_style(&node, "transition", &transition_for(options, index));
            }
        }
    }

    /// Visibility change reported by an intersection watcher.
    ///
    /// Returns `true` when this call revealed the element.
    pub fn on_intersect<D: Dom + ?Sized>(
        &mut self,
        dom: &mut D,
        group: AnimationGroupKind,
        index: usize,
        intersecting: bool,
    ) -> bool {
        if !intersecting || self.is_revealed(group, index) {
            return false;
        }
        self.reveal(dom, group, index);
        true
    }

    /// Reveal every element that geometry says is visible.
    ///
    /// Used when the host has no intersection watcher. Returns the number of
    /// newly revealed elements.
    pub fn reveal_visible<D: Dom + ?Sized>(&mut self, dom: &mut D, threshold: f64) -> usize {
        let viewport = dom.viewport();
        let mut due = Vec::new();
        for options in &self.groups {
            for index in 0..dom.animated_len(options.group) {
                if self.is_revealed(options.group, index) {
                    continue;
                }
                let visible = dom
                    .rect(&Node::Animated(options.group, index))
                    .is_some_and(|rect| is_in_viewport(rect, viewport, threshold));
                if visible {
                    due.push((options.group, index));
                }
            }
        }
        for (group, index) in &due {
            self.reveal(dom, *group, *index);
        }
        due.len()
    }

    #[must_use]
    pub fn is_revealed(&self, group: AnimationGroupKind, index: usize) -> bool {
        self.revealed.contains(&(group, index))
    }

    fn reveal<D: Dom + ?Sized>(&mut self, dom: &mut D, group: AnimationGroupKind, index: usize) {
        let node = Node::Animated(group, index);
        dom.set_style(&node, "opacity", "1");
        dom.set_style(&node, "transform", "translateY(0)");
        self.revealed.insert((group, index));
    }
}
