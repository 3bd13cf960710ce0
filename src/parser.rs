//! # SDP Parser
//!
//! Turns SDP text into a [`SessionDescription`]. Parsing is total: every
//! input yields a description, and lines that cannot be used are dropped.
//!
//! Lines are split on `\r` or `\n`. A line is used when it has the shape
//! `<tag>=<content>` with a lowercase ASCII letter as tag. Lines before the
//! first `m=` belong to the session; every `m=` opens a new media block that
//! collects the lines up to the next one.
//!
//! For each line, the rules for its tag are tried in order and the first
//! whose pattern matches the content is applied. Unknown `a=` attributes are
//! kept verbatim in the scope's `invalid` list.
//!
//! ```rust
//! let session = sdpio::parse(
//!     "v=0\r\n\
//!      o=- 20518 0 IN IP4 203.0.113.1\r\n\
//!      s= \r\n\
//!      m=audio 54400 RTP/SAVPF 0\r\n\
//!      a=rtpmap:0 PCMU/8000\r\n",
//! );
//!
//! assert_eq!(session.origin.unwrap().session_id, Some(sdpio::Value::Int(20518)));
//! let rtp = &session.media[0].attributes.rtp[0];
//! assert_eq!(rtp.codec, Some(sdpio::Value::from("PCMU")));
//! ```

use log::{debug, trace};
use regex::Captures;

use crate::error::Result;
use crate::grammar::{default_grammar, Grammar, GrammarRule, Target};
use crate::session::{MediaDescription, RecordMut, ScopeMut, SessionDescription};
use crate::value::coerce;

/// Parses SDP text with a given grammar
#[derive(Debug, Clone, Copy)]
pub struct Parser<'g> {
    grammar: &'g Grammar,
}

impl<'g> Parser<'g> {
    /// Creates a parser for `grammar`
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    /// Parses `text`. Never fails: malformed or unknown lines are skipped.
    pub fn parse(&self, text: &str) -> SessionDescription {
        let mut session = SessionDescription::new();

        for line in text.split(&['\r', '\n'][..]) {
            let Some((tag, content)) = split_line(line) else {
                if !line.is_empty() {
                    trace!("skipping malformed line {:?}", line);
                }
                continue;
            };

            if tag == 'm' {
                session.media.push(MediaDescription::new());
            }

            let Some((rule, caps)) = self
                .grammar
                .rules_for(tag)
                .iter()
                .find_map(|rule| rule.captures(content).map(|caps| (rule, caps)))
            else {
                trace!("no rule for {}={}", tag, content);
                continue;
            };

            if rule.is_fallback() {
                debug!("unrecognized {}={}", tag, content);
            }

            match session.media.len() {
                0 => apply(rule, &caps, &mut session),
                n => apply(rule, &caps, &mut session.media[n - 1]),
            }
        }

        for media in &mut session.media {
            media.refresh_payload_types();
        }
        session
    }

    /// Parses raw bytes, which must be UTF-8.
    ///
    /// # Errors
    ///
    /// Returns `SdpError::Encoding` if `bytes` is not valid UTF-8.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<SessionDescription> {
        let text = std::str::from_utf8(bytes)?;
        Ok(self.parse(text))
    }
}

/// Parses `text` with the built-in grammar
pub fn parse(text: &str) -> SessionDescription {
    Parser::new(default_grammar()).parse(text)
}

/// Parses UTF-8 `bytes` with the built-in grammar
///
/// # Errors
///
/// Returns `SdpError::Encoding` if `bytes` is not valid UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<SessionDescription> {
    Parser::new(default_grammar()).parse_bytes(bytes)
}

fn split_line(line: &str) -> Option<(char, &str)> {
    match line.as_bytes() {
        [tag @ b'a'..=b'z', b'=', ..] => Some((*tag as char, &line[2..])),
        _ => None,
    }
}

fn apply(rule: &GrammarRule, caps: &Captures<'_>, scope: &mut dyn ScopeMut) {
    match rule.target() {
        Target::Inline => {
            for (i, name) in rule.names().iter().enumerate() {
                if let Some(m) = caps.get(i + 1) {
                    scope.set_value(name, coerce(m.as_str()));
                }
            }
        }
        Target::Scalar(name) if rule.names().is_empty() => {
            if let Some(m) = caps.get(1) {
                scope.set_value(name, coerce(m.as_str()));
            }
        }
        Target::Scalar(name) => fill(rule, caps, scope.record_mut(name)),
        Target::Collection(name) => fill(rule, caps, scope.push_record(name)),
    }
}

fn fill(rule: &GrammarRule, caps: &Captures<'_>, record: &mut dyn RecordMut) {
    for (i, name) in rule.names().iter().enumerate() {
        if let Some(m) = caps.get(i + 1) {
            record.set(name, coerce(m.as_str()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Format;
    use crate::session::Scope;
    use crate::value::Value;
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_line_shape() {
        assert_eq!(split_line("v=0"), Some(('v', "0")));
        assert_eq!(split_line("s="), Some(('s', "")));
        assert_eq!(split_line("V=0"), None);
        assert_eq!(split_line("v0"), None);
        assert_eq!(split_line("=v"), None);
        assert_eq!(split_line(""), None);
        assert_eq!(split_line("é=x"), None);
    }

    #[test]
    fn test_mixed_line_endings() {
        let session = parse("v=0\ns=test\r\nt=0 0\rgarbage\r\n\r\n");
        assert_eq!(session.version, Some(Value::Int(0)));
        assert_eq!(session.name, Some(Value::from("test")));
        assert_eq!(session.timing.unwrap().stop, Some(Value::Int(0)));
    }

    #[test]
    fn test_media_scoping() {
        let session = parse(
            "v=0\r\n\
             a=msid-semantic: WMS stream\r\n\
             m=audio 1 RTP/AVP 0\r\n\
             a=mid:audio\r\n\
             m=video 2 RTP/AVP 96 97\r\n\
             a=mid:video\r\n",
        );
        assert!(session.attributes.msid_semantic.is_some());
        assert_eq!(session.attributes.mid, None);
        assert_eq!(session.media.len(), 2);
        assert_eq!(session.media[0].attributes.mid, Some(Value::from("audio")));
        assert_eq!(session.media[1].attributes.mid, Some(Value::from("video")));
        assert_eq!(session.media[1].payloads, Some(Value::from("96 97")));
        assert_eq!(session.media[1].payload_types, vec![Value::Int(96), Value::Int(97)]);
    }

    #[test]
    fn test_unmatched_media_line_still_opens_a_block() {
        let session = parse("v=0\r\nm=???\r\na=mid:0\r\n");
        assert_eq!(session.media.len(), 1);
        assert_eq!(session.media[0].kind, None);
        assert_eq!(session.media[0].attributes.mid, Some(Value::Int(0)));
    }

    #[test]
    fn test_absent_optional_groups_are_not_set() {
        let session = parse("m=audio 9 RTP/AVP 0\r\na=rtpmap:0 PCMU\r\n");
        let rtp = &session.media[0].attributes.rtp[0];
        assert_eq!(rtp.payload, Some(Value::Int(0)));
        assert_eq!(rtp.codec, Some(Value::from("PCMU")));
        assert_eq!(rtp.rate, None);
        assert_eq!(rtp.encoding, None);
    }

    #[test]
    fn test_non_ascii_digits_do_not_match() {
        let session = parse("v=\u{0661}\r\nm=audio 9 RTP/AVP 0\r\na=rtpmap:\u{0660} PCMU/8000\r\n");
        assert_eq!(session.version, None);
        assert!(session.media[0].attributes.rtp.is_empty());
        assert_eq!(session.media[0].attributes.invalid.len(), 1);
    }

    #[test]
    fn test_unknown_attribute_is_kept() {
        let session = parse("v=0\r\na=x-foo:bar\r\n");
        assert_eq!(session.attributes.invalid.len(), 1);
        assert_eq!(session.attributes.invalid[0].value, Some(Value::from("x-foo:bar")));
    }

    #[test]
    fn test_later_scalar_overwrites_captured_fields() {
        let session = parse("m=audio 9 RTP/AVP 0\r\na=rtcp:9 IN IP4 0.0.0.0\r\na=rtcp:10\r\n");
        let rtcp = session.media[0].attributes.rtcp.as_ref().unwrap();
        assert_eq!(rtcp.port, Some(Value::Int(10)));
        assert_eq!(rtcp.net_type, Some(Value::from("IN")));
        assert_eq!(rtcp.ip_ver, Some(Value::Int(4)));
        assert_eq!(rtcp.address, Some(Value::from("0.0.0.0")));
    }

    #[test]
    fn test_custom_grammar() {
        let mut grammar = Grammar::empty();
        grammar.add_rule(
            'k',
            GrammarRule::new(Target::scalar("key"), "^clear:(.*)", &[], Format::literal("clear:%s"))
                .unwrap(),
        );
        let session = Parser::new(&grammar).parse("v=0\r\nk=clear:secret\r\n");
        assert_eq!(session.version, None);
        assert_eq!(session.value("key"), Some(&Value::from("secret")));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = parse_bytes(&[b'v', b'=', 0xff, b'\n']);
        assert!(matches!(err, Err(crate::SdpError::Encoding(_))));
        assert!(parse_bytes(b"v=0\r\n").is_ok());
    }

    #[quickcheck]
    fn prop_parse_is_total(text: String) -> bool {
        let session = parse(&text);
        let media_lines = text
            .split(&['\r', '\n'][..])
            .filter(|l| l.starts_with("m="))
            .count();
        session.media.len() == media_lines
    }
}
