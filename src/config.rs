//! Page configuration.
//!
//! Every tunable the behavior layer relies on lives here so hosts can adapt
//! the page without touching handler code. [`PageOptions::default`] matches
//! the shipped portfolio markup.

/// Which set of elements an animation group drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnimationGroupKind {
    /// `.skill-item` tiles.
    Skills,
    /// `.project-card` cards.
    Projects,
}

impl AnimationGroupKind {
    /// CSS selector that locates the group's elements.
    #[must_use]
    pub fn selector(self) -> &'static str {
        match self {
            Self::Skills => ".skill-item",
            Self::Projects => ".project-card",
        }
    }
}

/// Entrance animation settings for one group of elements.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationOptions {
    pub group: AnimationGroupKind,
    /// Initial downward offset in pixels.
    pub offset_px: u32,
    /// Extra transition delay per element index.
    pub stagger_ms: u32,
    pub duration_ms: u32,
    /// Fraction of the element that must be visible before it is revealed.
    pub threshold: f64,
    /// Root margin handed to the intersection watcher, CSS syntax.
    pub root_margin: Option<String>,
}

impl AnimationOptions {
    /// Settings for the skills grid.
    #[must_use]
    pub fn skills() -> Self {
        Self {
            group: AnimationGroupKind::Skills,
            offset_px: 20,
            stagger_ms: 100,
            duration_ms: 600,
            threshold: 0.1,
            root_margin: Some("0px 0px -50px 0px".to_string()),
        }
    }

    /// Settings for the project cards.
    #[must_use]
    pub fn projects() -> Self {
        Self {
            group: AnimationGroupKind::Projects,
            offset_px: 30,
            stagger_ms: 200,
            duration_ms: 600,
            threshold: 0.1,
            root_margin: None,
        }
    }
}

/// User-facing strings of the contact form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormMessages {
    pub fix_fields: String,
    pub sending: String,
    pub success: String,
    pub failure: String,
}

impl Default for FormMessages {
    fn default() -> Self {
        Self {
            fix_fields: "Please fix the highlighted fields".to_string(),
            sending: "Sending...".to_string(),
            success: "Thank you! Your message has been sent successfully.".to_string(),
            failure: "Oops! There was a problem sending your message. Please try again."
                .to_string(),
        }
    }
}

/// Options for the whole page behavior layer.
#[derive(Clone, Debug, PartialEq)]
pub struct PageOptions {
    /// Section identifiers in document order.
    pub sections: Vec<String>,
    /// Section marked active after initialization.
    pub initial_section: String,
    /// Lookahead added below the navigation bar when picking the current section.
    pub scroll_lookahead_px: f64,
    pub scroll_debounce_ms: u32,
    /// Viewports wider than this close the mobile menu on resize.
    pub mobile_breakpoint_px: f64,
    /// Default visibility fraction for [`is_in_viewport`](crate::geometry::is_in_viewport).
    pub viewport_threshold: f64,
    pub success_dismiss_ms: u32,
    pub reset_delay_ms: u32,
    pub messages: FormMessages,
    pub animations: Vec<AnimationOptions>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            sections: ["home", "about", "skills", "projects", "contact"]
                .into_iter()
                .map(String::from)
                .collect(),
            initial_section: "home".to_string(),
            scroll_lookahead_px: 100.0,
            scroll_debounce_ms: 100,
            mobile_breakpoint_px: 860.0,
            viewport_threshold: 0.3,
            success_dismiss_ms: 5000,
            reset_delay_ms: 1000,
            messages: FormMessages::default(),
            animations: vec![AnimationOptions::skills(), AnimationOptions::projects()],
        }
    }
}

impl PageOptions {
    /// Animation settings for a group, if the group is enabled.
    #[must_use]
    pub fn animation(&self, group: AnimationGroupKind) -> Option<&AnimationOptions> {
        self.animations.iter().find(|a| a.group == group)
    }
}
