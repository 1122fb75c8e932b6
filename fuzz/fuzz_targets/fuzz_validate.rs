//! Fuzz target for field validation.
//!
//! Every field name and value must produce a verdict without panicking, and
//! invalid verdicts must carry a message.

#![no_main]

use arbitrary::Arbitrary;
use folio_ui::validate::is_valid_email;
use folio_ui::{FieldInput, validate};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    name: &'a str,
    value: &'a str,
    required: bool,
}

fuzz_target!(|input: Input<'_>| {
    for name in [input.name, "name", "email", "message"] {
        let verdict = validate(&FieldInput::new(name, input.value, input.required));
        assert_eq!(verdict.valid, verdict.message.is_empty());
    }
    let _ = is_valid_email(input.value);
});
