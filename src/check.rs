//! # Round-trip Coverage Check
//!
//! Parses a document, writes it back and compares the two line by line.
//! A line of the input that does not appear in the output was lost; a line
//! of the output that does not appear in the input was introduced by the
//! writer (usually a reordering artefact or a normalized value).
//!
//! ```rust
//! let report = sdpio::check::check("v=0\r\ns= \r\na=x-foo:bar\r\n");
//! assert!(report.is_lossless());
//! assert_eq!(report.unrecognized[0].value, "x-foo:bar");
//! ```

use std::collections::HashSet;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::grammar::{default_grammar, Grammar};
use crate::parser::Parser;
use crate::session::Attributes;
use crate::writer::{WriteOptions, Writer};

lazy_static! {
    static ref LINE_BREAK: Regex = Regex::new(r"\r\n|\r|\n").expect("line break pattern must compile");
}

/// A line found on one side of the round trip only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiff {
    /// 1-based line number on its own side
    pub line: usize,
    /// The line without its terminator
    pub text: String,
}

/// An attribute that only the catch-all rule matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unrecognized {
    /// `session`, or the media type of the block it belongs to
    pub scope: String,
    /// The attribute content after `a=`
    pub value: String,
}

/// Result of [`check`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Input lines missing from the output
    pub missing: Vec<LineDiff>,
    /// Output lines missing from the input
    pub added: Vec<LineDiff>,
    /// Attributes that were copied through without being understood
    pub unrecognized: Vec<Unrecognized>,
}

impl CheckReport {
    /// Whether the output has exactly the lines of the input
    pub fn is_lossless(&self) -> bool {
        self.missing.is_empty() && self.added.is_empty()
    }
}

/// Checks `text` with the built-in grammar and default tag orders
pub fn check(text: &str) -> CheckReport {
    check_with(text, default_grammar(), &WriteOptions::default())
}

/// Checks `text` with a given grammar and tag orders
pub fn check_with(text: &str, grammar: &Grammar, options: &WriteOptions) -> CheckReport {
    let session = Parser::new(grammar).parse(text);
    let written = Writer::new(grammar)
        .with_options(options.clone())
        .write(&session);

    let mut unrecognized = collect_invalid("session", &session.attributes);
    for media in &session.media {
        let scope = media
            .kind
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        unrecognized.extend(collect_invalid(&scope, &media.attributes));
    }

    let report = CheckReport {
        missing: diff(text, &written),
        added: diff(&written, text),
        unrecognized,
    };
    debug!(
        "check: {} missing, {} added, {} unrecognized",
        report.missing.len(),
        report.added.len(),
        report.unrecognized.len()
    );
    report
}

/// Splits on `\r\n`, `\r` or `\n`, like the parser does
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = LINE_BREAK.split(text).collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Lines of `from` that do not occur anywhere in `to`
fn diff(from: &str, to: &str) -> Vec<LineDiff> {
    let known: HashSet<&str> = split_lines(to).into_iter().collect();
    split_lines(from)
        .into_iter()
        .enumerate()
        .filter(|(_, text)| !known.contains(text))
        .map(|(i, text)| LineDiff {
            line: i + 1,
            text: text.to_string(),
        })
        .collect()
}

fn collect_invalid(scope: &str, attributes: &Attributes) -> Vec<Unrecognized> {
    attributes
        .invalid
        .iter()
        .filter_map(|invalid| invalid.value.as_ref())
        .map(|value| Unrecognized {
            scope: scope.to_string(),
            value: value.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lossless_document() {
        let report = check(
            "v=0\r\n\
             o=- 20518 0 IN IP4 203.0.113.1\r\n\
             s= \r\n\
             t=0 0\r\n\
             m=audio 54400 RTP/AVP 0\r\n\
             a=rtpmap:0 PCMU/8000\r\n",
        );
        assert_eq!(report, CheckReport::default());
        assert!(report.is_lossless());
    }

    #[test]
    fn test_reports_lost_and_new_lines() {
        // k= has no rule and the missing s= is filled in
        let report = check("v=0\r\nk=clear:secret\r\n");
        assert_eq!(
            report.missing,
            vec![LineDiff {
                line: 2,
                text: "k=clear:secret".to_string()
            }]
        );
        assert_eq!(
            report.added,
            vec![LineDiff {
                line: 2,
                text: "s= ".to_string()
            }]
        );
        assert!(!report.is_lossless());
    }

    #[test]
    fn test_any_line_ending_is_accepted() {
        let sdp = "v=0\ro=- 1 1 IN IP4 0.0.0.0\rs= \rt=0 0\rm=audio 9 RTP/AVP 0\r";
        assert_eq!(check(sdp), CheckReport::default());
        assert_eq!(check(&sdp.replace('\r', "\n")), CheckReport::default());

        let report = check("v=0\rs= \rk=1\r");
        assert_eq!(
            report.missing,
            vec![LineDiff {
                line: 3,
                text: "k=1".to_string()
            }]
        );
    }

    #[test]
    fn test_lists_unrecognized_attributes_by_scope() {
        let report = check(
            "v=0\r\n\
             s= \r\n\
             a=x-session\r\n\
             m=video 9 RTP/AVP 96\r\n\
             a=x-foo:bar\r\n",
        );
        assert!(report.is_lossless());
        assert_eq!(
            report.unrecognized,
            vec![
                Unrecognized {
                    scope: "session".to_string(),
                    value: "x-session".to_string()
                },
                Unrecognized {
                    scope: "video".to_string(),
                    value: "x-foo:bar".to_string()
                },
            ]
        );
    }
}
