//! Positional placeholder substitution for line templates.
//!
//! Arguments are consumed left to right, one per placeholder:
//!
//! | Placeholder | Output |
//! |---|---|
//! | `%s`, `%d` | the argument's text, or the placeholder itself when the argument is missing |
//! | `%v` | nothing (the argument is skipped) |
//! | `%%` | `%` |
//!
//! Once the arguments run out, remaining placeholders are left as they are.
//! Extra arguments are ignored.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::value::Value;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new("%[sdv%]").expect("placeholder pattern must compile");
}

/// Renders `template` with `args`
pub fn render(template: &str, args: &[Option<&Value>]) -> String {
    let mut next = args.iter();
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let placeholder = &caps[0];
            let Some(arg) = next.next() else {
                return placeholder.to_string();
            };
            match (placeholder, arg) {
                ("%%", _) => "%".to_string(),
                ("%v", _) => String::new(),
                (_, Some(value)) => value.to_string(),
                (_, None) => placeholder.to_string(),
            }
        })
        .into_owned()
}
