//! # SDP Grammar
//!
//! The grammar is an ordered list of [`GrammarRule`]s per line-type tag
//! (`v`, `o`, `m`, `a`, ...). Both directions of the transform walk it:
//!
//! - the parser applies the first rule of a line's tag whose pattern matches
//!   the line content, storing the captures at the current scope
//! - the writer renders one line per stored value with the rule's [`Format`]
//!
//! Rule order matters: more specific patterns come first, and the `a` list
//! ends in a catch-all that keeps unknown attributes verbatim.
//!
//! ## Adding a private attribute
//!
//! ```rust
//! use sdpio::grammar::{Format, Grammar, GrammarRule, Target};
//! use sdpio::{Parser, Writer};
//!
//! # fn main() -> sdpio::Result<()> {
//! let mut grammar = Grammar::default();
//! grammar.add_rule(
//!     'a',
//!     GrammarRule::new(
//!         Target::scalar("xCustomTag"),
//!         r"^x-custom-tag:(\d*)",
//!         &["tagId"],
//!         Format::literal("x-custom-tag:%d"),
//!     )?,
//! );
//!
//! let session = Parser::new(&grammar).parse("v=0\r\na=x-custom-tag:42\r\n");
//! let tag = &session.attributes.extensions.records["xCustomTag"];
//! assert_eq!(tag["tagId"], sdpio::Value::Int(42));
//!
//! let sdp = Writer::new(&grammar).write(&session);
//! assert!(sdp.contains("a=x-custom-tag:42\r\n"));
//! # Ok(())
//! # }
//! ```

mod rules;


use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::error::Result;
use crate::session::Record;

lazy_static! {
    static ref DEFAULT_GRAMMAR: Grammar = Grammar::builtin();
}

/// Returns the shared built-in grammar
pub fn default_grammar() -> &'static Grammar {
    &DEFAULT_GRAMMAR
}

/// Where a rule stores its captures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Captures are stored directly on the scope under their own names.
    /// Used by the `m=` line.
    Inline,
    /// A single field: a bare value when the rule has no capture names,
    /// otherwise a record. A later match overwrites the fields it captures.
    Scalar(String),
    /// A record appended to an ordered collection
    Collection(String),
}

impl Target {
    /// Shorthand for [`Target::Scalar`]
    pub fn scalar(name: impl Into<String>) -> Self {
        Target::Scalar(name.into())
    }

    /// Shorthand for [`Target::Collection`]
    pub fn collection(name: impl Into<String>) -> Self {
        Target::Collection(name.into())
    }
}

/// How a rule renders a line back to text.
///
/// The template uses positional placeholders filled from the rule's capture
/// names in order: `%s`/`%d` insert the next value, `%v` skips the next
/// value, `%%` is a literal percent sign.
#[derive(Clone)]
pub enum Format {
    /// The same template for every record
    Literal(String),
    /// Chooses the template from the record, typically to leave out
    /// optional segments
    Computed(fn(&dyn Record) -> String),
}

impl Format {
    /// Shorthand for [`Format::Literal`]
    pub fn literal(template: impl Into<String>) -> Self {
        Format::Literal(template.into())
    }

    /// Returns the template to use for `record`
    pub fn template(&self, record: &dyn Record) -> Cow<'_, str> {
        match self {
            Format::Literal(template) => Cow::Borrowed(template),
            Format::Computed(select) => Cow::Owned(select(record)),
        }
    }
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Literal(template) => f.debug_tuple("Literal").field(template).finish(),
            Format::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// One way of reading and writing a line of a given tag
#[derive(Debug, Clone)]
pub struct GrammarRule {
    target: Target,
    pattern: Regex,
    names: Vec<String>,
    format: Format,
    fallback: bool,
}

impl GrammarRule {
    /// Creates a rule, compiling `pattern`.
    ///
    /// # Arguments
    ///
    /// * `target` - Where captures are stored
    /// * `pattern` - Regular expression matched against the line content
    ///   (everything after `<tag>=`)
    /// * `names` - Field names for capture groups 1..N. Leave empty for a
    ///   scalar stored as a bare value from group 1.
    /// * `format` - Template used to write the line back
    ///
    /// # Errors
    ///
    /// Returns `SdpError::Pattern` if the pattern does not compile.
    pub fn new(target: Target, pattern: &str, names: &[&str], format: Format) -> Result<Self> {
        Ok(Self {
            target,
            pattern: Regex::new(pattern)?,
            names: names.iter().map(|n| n.to_string()).collect(),
            format,
            fallback: false,
        })
    }

    /// Marks the rule as a catch-all: [`Grammar::add_rule`] keeps it last.
    pub fn fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    /// Where the captures of this rule are stored
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The compiled pattern
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Capture group names, in group order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// How the rule writes its line
    pub fn format(&self) -> &Format {
        &self.format
    }

    /// Whether this is a catch-all rule
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Matches the rule against a line's content
    pub fn captures<'t>(&self, content: &'t str) -> Option<Captures<'t>> {
        self.pattern.captures(content)
    }
}

/// Rules per line-type tag
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: BTreeMap<char, Vec<GrammarRule>>,
}

impl Grammar {
    /// Creates a grammar with no rules at all
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Builds the grammar covering RFC 4566 and the common extensions
    pub fn builtin() -> Self {
        rules::builtin()
    }

    /// Rules for `tag`, in matching order. Empty for unknown tags.
    pub fn rules_for(&self, tag: char) -> &[GrammarRule] {
        self.rules.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mutable rule list for `tag`, created if missing
    pub fn rules_mut(&mut self, tag: char) -> &mut Vec<GrammarRule> {
        self.rules.entry(tag).or_default()
    }

    /// Whether the grammar has any rule for `tag`
    pub fn knows(&self, tag: char) -> bool {
        !self.rules_for(tag).is_empty()
    }

    /// Adds a rule for `tag` after the existing specific rules but ahead of
    /// any trailing catch-all, so the new rule gets a chance to match.
    pub fn add_rule(&mut self, tag: char, rule: GrammarRule) {
        let rules = self.rules_mut(tag);
        let fallbacks = rules.iter().rev().take_while(|r| r.is_fallback()).count();
        let at = rules.len() - fallbacks;
        rules.insert(at, rule);
    }

    /// Tags that have at least one rule
    pub fn tags(&self) -> impl Iterator<Item = char> + '_ {
        self.rules.iter().filter(|(_, r)| !r.is_empty()).map(|(tag, _)| *tag)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        default_grammar().clone()
    }
}
