//! # SDP Writer
//!
//! Serializes a [`SessionDescription`] back to SDP text by walking the
//! grammar in a fixed tag order:
//!
//! 1. session-level lines, in the outer order (`v o s i u e p c b t r z a`
//!    by default)
//! 2. for each media block, its `m=` line followed by its lines in the inner
//!    order (`i c b a` by default)
//!
//! Within a tag, lines come out in grammar rule order, and collections in
//! the order they were parsed. Every line ends in `\r\n`.
//!
//! ```rust
//! let sdp = "v=0\r\no=- 20518 0 IN IP4 203.0.113.1\r\ns= \r\nt=0 0\r\n";
//! let session = sdpio::parse(sdp);
//! assert_eq!(sdpio::write(&session), sdp);
//! ```

/// Placeholder substitution for line templates
pub mod template;

use log::{trace, warn};

use crate::grammar::{default_grammar, Grammar, GrammarRule, Target};
use crate::session::{Record, Scope, SessionDescription};
use crate::value::Value;

pub use template::render;

/// Session-level tag order required by RFC 4566
pub const DEFAULT_OUTER_ORDER: [char; 13] =
    ['v', 'o', 's', 'i', 'u', 'e', 'p', 'c', 'b', 't', 'r', 'z', 'a'];

/// Media-level tag order required by RFC 4566
pub const DEFAULT_INNER_ORDER: [char; 4] = ['i', 'c', 'b', 'a'];

/// Overrides for the tag orders used by the writer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Session-level tag order. Defaults to [`DEFAULT_OUTER_ORDER`].
    pub outer_order: Option<Vec<char>>,
    /// Media-level tag order. Defaults to [`DEFAULT_INNER_ORDER`].
    pub inner_order: Option<Vec<char>>,
}

impl WriteOptions {
    fn outer(&self) -> &[char] {
        self.outer_order.as_deref().unwrap_or(&DEFAULT_OUTER_ORDER)
    }

    fn inner(&self) -> &[char] {
        self.inner_order.as_deref().unwrap_or(&DEFAULT_INNER_ORDER)
    }
}

/// Writes session descriptions with a given grammar
#[derive(Debug, Clone)]
pub struct Writer<'g> {
    grammar: &'g Grammar,
    options: WriteOptions,
}

impl<'g> Writer<'g> {
    /// Creates a writer using the default tag orders
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            options: WriteOptions::default(),
        }
    }

    /// Replaces the tag orders
    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Serializes `session`.
    ///
    /// A missing version is written as `v=0`, a missing session name as
    /// `s= ` and a missing payload list as an empty one. The session itself
    /// is not modified, see [`SessionDescription::normalize`] for that.
    pub fn write(&self, session: &SessionDescription) -> String {
        let session_defaults = [("version", Value::Int(0)), ("name", Value::from(" "))];
        let media_defaults = [("payloads", Value::from(""))];

        let mut lines = Vec::new();
        let root = WithDefaults {
            scope: session,
            defaults: &session_defaults,
        };
        self.write_scope(&mut lines, &root, self.options.outer());

        let media_rule = self.grammar.rules_for('m').first();
        if media_rule.is_none() && !session.media.is_empty() {
            warn!("grammar has no m rule, media lines are left out");
        }

        for media in &session.media {
            let scope = WithDefaults {
                scope: media,
                defaults: &media_defaults,
            };
            if let Some(rule) = media_rule {
                lines.push(record_line('m', rule, &ScopeFields(&scope)));
            }
            self.write_scope(&mut lines, &scope, self.options.inner());
        }

        trace!("wrote {} lines", lines.len());
        let mut sdp = lines.join("\r\n");
        sdp.push_str("\r\n");
        sdp
    }

    fn write_scope(&self, lines: &mut Vec<String>, scope: &dyn Scope, order: &[char]) {
        for &tag in order {
            for rule in self.grammar.rules_for(tag) {
                match rule.target() {
                    Target::Inline => {}
                    Target::Scalar(name) if rule.names().is_empty() => {
                        if let Some(value) = scope.value(name) {
                            let template = rule.format().template(&ScopeFields(scope));
                            lines.push(line(tag, &template, &[Some(value)]));
                        }
                    }
                    Target::Scalar(name) => {
                        if let Some(record) = scope.record(name) {
                            lines.push(record_line(tag, rule, record));
                        }
                    }
                    Target::Collection(name) => {
                        for record in scope.collection(name) {
                            lines.push(record_line(tag, rule, record));
                        }
                    }
                }
            }
        }
    }
}

/// Serializes `session` with the built-in grammar and default tag orders
pub fn write(session: &SessionDescription) -> String {
    Writer::new(default_grammar()).write(session)
}

/// Serializes `session` with the built-in grammar and the given tag orders
pub fn write_with(session: &SessionDescription, options: &WriteOptions) -> String {
    Writer::new(default_grammar())
        .with_options(options.clone())
        .write(session)
}

fn line(tag: char, template: &str, args: &[Option<&Value>]) -> String {
    format!("{}={}", tag, render(template, args))
}

fn record_line(tag: char, rule: &GrammarRule, record: &dyn Record) -> String {
    let template = rule.format().template(record);
    let args: Vec<Option<&Value>> = rule.names().iter().map(|name| record.get(name)).collect();
    line(tag, &template, &args)
}

/// A scope that falls back to fixed values for some missing fields
struct WithDefaults<'a> {
    scope: &'a dyn Scope,
    defaults: &'a [(&'static str, Value)],
}

impl Scope for WithDefaults<'_> {
    fn value(&self, name: &str) -> Option<&Value> {
        self.scope.value(name).or_else(|| {
            self.defaults
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value)
        })
    }

    fn record(&self, name: &str) -> Option<&dyn Record> {
        self.scope.record(name)
    }

    fn collection(&self, name: &str) -> Vec<&dyn Record> {
        self.scope.collection(name)
    }
}

/// The single values of a scope seen as one record
struct ScopeFields<'a>(&'a dyn Scope);

impl Record for ScopeFields<'_> {
    fn get(&self, key: &str) -> Option<&Value> {
        self.0.value(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Candidate, Fmtp, Invalid, MediaDescription, Rtp};
    use pretty_assertions::assert_eq;

    fn audio() -> MediaDescription {
        let mut media = MediaDescription::new();
        media.kind = Some(Value::from("audio"));
        media.port = Some(Value::Int(54400));
        media.protocol = Some(Value::from("RTP/SAVPF"));
        media.payloads = Some(Value::from("0 96"));
        media
    }

    #[test]
    fn test_empty_session_gets_mandatory_lines() {
        let session = SessionDescription::new();
        assert_eq!(write(&session), "v=0\r\ns= \r\n");
        // input is left alone
        assert_eq!(session.version, None);
        assert_eq!(session.name, None);
    }

    #[test]
    fn test_missing_payloads_render_empty() {
        let mut session = SessionDescription::new();
        let mut media = audio();
        media.payloads = None;
        session.media.push(media);
        assert!(write(&session).ends_with("m=audio 54400 RTP/SAVPF \r\n"));
    }

    #[test]
    fn test_media_attributes_follow_rule_order() {
        let mut media = audio();
        media.attributes.direction = Some(Value::from("sendrecv"));
        media.attributes.fmtp.push(Fmtp {
            payload: Some(Value::Int(96)),
            config: Some(Value::from("minptime=10; useinbandfec=1")),
        });
        media.attributes.rtp.push(Rtp {
            payload: Some(Value::Int(0)),
            codec: Some(Value::from("PCMU")),
            rate: Some(Value::Int(8000)),
            encoding: None,
        });
        media.attributes.rtp.push(Rtp {
            payload: Some(Value::Int(96)),
            codec: Some(Value::from("opus")),
            rate: Some(Value::Int(48000)),
            encoding: Some(Value::Int(2)),
        });

        let mut session = SessionDescription::new();
        session.media.push(media);

        assert_eq!(
            write(&session),
            "v=0\r\n\
             s= \r\n\
             m=audio 54400 RTP/SAVPF 0 96\r\n\
             a=rtpmap:0 PCMU/8000\r\n\
             a=rtpmap:96 opus/48000/2\r\n\
             a=fmtp:96 minptime=10; useinbandfec=1\r\n\
             a=sendrecv\r\n"
        );
    }

    #[test]
    fn test_end_of_candidates_after_candidates() {
        let mut media = audio();
        media.attributes.end_of_candidates = Some(Value::from("end-of-candidates"));
        media.attributes.candidates.push(Candidate {
            foundation: Some(Value::Int(0)),
            component: Some(Value::Int(1)),
            transport: Some(Value::from("UDP")),
            priority: Some(Value::Int(2113667327)),
            ip: Some(Value::from("203.0.113.1")),
            port: Some(Value::Int(54400)),
            kind: Some(Value::from("host")),
            generation: Some(Value::Int(0)),
            ..Candidate::default()
        });
        let mut session = SessionDescription::new();
        session.media.push(media);

        let sdp = write(&session);
        assert!(sdp.ends_with(
            "a=candidate:0 1 UDP 2113667327 203.0.113.1 54400 typ host generation 0\r\n\
             a=end-of-candidates\r\n"
        ));
    }

    #[test]
    fn test_custom_orders() {
        let mut session = SessionDescription::new();
        session.attributes.invalid.push(Invalid {
            value: Some(Value::from("x-foo:bar")),
        });
        let options = WriteOptions {
            outer_order: Some(vec!['a', 's', 'v']),
            inner_order: None,
        };
        assert_eq!(write_with(&session, &options), "a=x-foo:bar\r\ns= \r\nv=0\r\n");
    }

    #[test]
    fn test_grammar_without_media_rule_skips_media_lines() {
        let mut grammar = Grammar::default();
        grammar.rules_mut('m').clear();
        let mut session = SessionDescription::new();
        let mut media = audio();
        media.attributes.mid = Some(Value::Int(0));
        session.media.push(media);

        let sdp = Writer::new(&grammar).write(&session);
        assert_eq!(sdp, "v=0\r\ns= \r\na=mid:0\r\n");
    }
}
