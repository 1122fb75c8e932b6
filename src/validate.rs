//! Contact form field validation.
//!
//! [`validate`] is a pure function from a field snapshot to a [`Verdict`].
//! [`apply_verdict`] mirrors a verdict onto the page: the `error` class on the
//! control and the message in its `{name}-error` element.
//!
//! Lengths are counted in grapheme clusters after trimming surrounding
//! whitespace, so an accented name or an emoji counts as one character.

use unicode_segmentation::UnicodeSegmentation;

use crate::dom::{Dom, FieldInput, Node};

/// Minimum length of the `name` field.
pub const NAME_MIN_LEN: usize = 2;
/// Minimum length of the `message` field.
pub const MESSAGE_MIN_LEN: usize = 5;

/// Outcome of validating one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    /// Empty when valid.
    pub message: String,
}

impl Verdict {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Validate a field snapshot.
#[must_use]
pub fn validate(field: &FieldInput) -> Verdict {
    let value = trim_blank(&field.value);

    if value.is_empty() {
        if field.required {
            return Verdict::invalid(format!("{} is required", capitalize(&field.name)));
        }
        return Verdict::ok();
    }

    match field.name.as_str() {
        "name" if char_len(value) < NAME_MIN_LEN => {
            Verdict::invalid("Name must be at least 2 characters long")
        }
        "email" if !is_valid_email(value) => Verdict::invalid("Please enter a valid email address"),
        "message" if char_len(value) < MESSAGE_MIN_LEN => {
            Verdict::invalid("Message must be at least 5 characters long")
        }
        _ => Verdict::ok(),
    }
}

/// Shape check for `local@domain.tld`.
///
/// No whitespace anywhere, exactly one `@` with something before it, and a
/// `.` after it that has at least one character on each side.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, c)| c == '.' && idx > 0 && idx + 1 < domain.len())
}

/// Validate a field and reflect the verdict on the page.
pub fn validate_field<D: Dom + ?Sized>(dom: &mut D, field: &FieldInput) -> bool {
    let verdict = validate(field);
    apply_verdict(dom, &field.name, &verdict);
    verdict.valid
}

/// Reflect a verdict on the field control and its error element.
pub fn apply_verdict<D: Dom + ?Sized>(dom: &mut D, name: &str, verdict: &Verdict) {
    dom.set_class(&Node::Field(name.to_string()), "error", !verdict.valid);

    let error = Node::FieldError(name.to_string());
    if dom.exists(&error) {
        dom.set_text(&error, &verdict.message);
        let live = if verdict.valid { "off" } else { "polite" };
        dom.set_attribute(&error, "aria-live", live);
    }
}

/// Remove any error state from a field.
pub fn clear_field<D: Dom + ?Sized>(dom: &mut D, name: &str) {
    dom.set_class(&Node::Field(name.to_string()), "error", false);
    dom.set_text(&Node::FieldError(name.to_string()), "");
}

/// Strip surrounding whitespace and byte order marks.
fn trim_blank(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn char_len(value: &str) -> usize {
    value.graphemes(true).count()
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
