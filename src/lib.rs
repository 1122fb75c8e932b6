//! `folio_ui` - interactive behavior for a static portfolio page
//!
//! Mobile navigation, smooth-scroll links with scroll-spy highlighting,
//! contact form validation and submission, and entrance animations. The core
//! runs against the [`Dom`] capability trait so it can be driven natively by
//! [`MemoryDom`]; the `web` module binds it to a real browser page on
//! `wasm32`.

// Crate-level lint configuration
#![allow(dead_code)] // Public API functions not yet used internally
#![allow(clippy::cast_possible_truncation)] // Intentional pixel casts
#![allow(clippy::cast_precision_loss)] // Indices become pixel offsets
#![allow(clippy::cast_sign_loss)] // Browser timer handles are positive
#![allow(clippy::cast_possible_wrap)] // Timer handles round-trip through i32
#![allow(clippy::module_name_repetitions)] // Allow dom::MemoryDom etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::future_not_send)] // Single-threaded UI futures
#![allow(clippy::float_cmp)] // Exact float comparison is intentional in tests

pub mod animate;
pub mod app;
pub mod config;
pub mod debounce;
pub mod dom;
pub mod error;
pub mod event;
pub mod form;
pub mod geometry;
pub mod input;
pub mod nav;
pub mod scroll_spy;
pub mod timer;
pub mod validate;

#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-export core types at crate root
pub use app::App;
pub use config::{AnimationGroupKind, AnimationOptions, FormMessages, PageOptions};
pub use debounce::Debouncer;
pub use dom::{Dom, FieldInput, MemoryDom, Node, ScrollBehavior};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use form::{FormCoordinator, SubmitOutcome, SubmitRequest, SubmittingGuard, Transport};
pub use geometry::{Rect, Viewport, is_in_viewport, offset_top};
pub use input::{KeyCode, PageEvent};
pub use nav::{MenuState, NavController, scroll_to_section};
pub use scroll_spy::{ScrollSpy, select_section};
pub use timer::{ManualScheduler, Scheduler, TimerId};
pub use validate::{Verdict, validate};
