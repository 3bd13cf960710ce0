//! # Session Description Model
//!
//! The structures produced by [`crate::parse`] and consumed by
//! [`crate::write`]:
//!
//! - [`SessionDescription`]: the session-level lines (`v=`, `o=`, `s=`, `t=`,
//!   ...) plus the ordered list of media blocks
//! - [`MediaDescription`]: one `m=` line and everything up to the next one
//! - [`Attributes`]: `i=`, `c=`, `b=` and `a=` lines, shared by both scopes
//!
//! Each attribute shape is a typed record whose fields are `Option<Value>`:
//! a field is `Some` exactly when the line carried it.
//!
//! ```rust
//! use sdpio::session::{MediaDescription, Rtp, SessionDescription};
//! use sdpio::Value;
//!
//! let mut media = MediaDescription::default();
//! media.kind = Some(Value::from("audio"));
//! media.port = Some(Value::Int(54400));
//! media.protocol = Some(Value::from("RTP/AVP"));
//! media.payloads = Some(Value::Int(0));
//! media.attributes.rtp.push(Rtp {
//!     payload: Some(Value::Int(0)),
//!     codec: Some(Value::from("PCMU")),
//!     rate: Some(Value::Int(8000)),
//!     encoding: None,
//! });
//!
//! let mut session = SessionDescription::default();
//! session.media.push(media);
//!
//! let sdp = sdpio::write(&session);
//! assert!(sdp.contains("m=audio 54400 RTP/AVP 0\r\na=rtpmap:0 PCMU/8000\r\n"));
//! ```
//!
//! The grammar addresses fields by name rather than by Rust field, through
//! the [`Scope`] and [`Record`] traits.

mod attributes;
mod record;

pub use attributes::{Attributes, Extensions};
pub use record::*;

use crate::utils::parse_payloads;
use crate::value::Value;

/// Named-field access to one level of a session description.
///
/// A scope holds three kinds of fields: single values, single records and
/// ordered collections of records. Names are the grammar's field names
/// (`version`, `origin`, `rtp`, ...).
pub trait Scope {
    /// Single value stored under `name`
    fn value(&self, name: &str) -> Option<&Value>;

    /// Single record stored under `name`
    fn record(&self, name: &str) -> Option<&dyn Record>;

    /// Records stored under `name`, in order of appearance
    fn collection(&self, name: &str) -> Vec<&dyn Record>;
}

/// Mutable counterpart of [`Scope`], used by the parser
pub trait ScopeMut: Scope {
    /// Stores a single value, replacing any previous one
    fn set_value(&mut self, name: &str, value: Value);

    /// Returns the record under `name`, creating an empty one first if needed
    fn record_mut(&mut self, name: &str) -> &mut dyn RecordMut;

    /// Appends an empty record to the collection under `name` and returns it
    fn push_record(&mut self, name: &str) -> &mut dyn RecordMut;
}

pub(crate) fn push_default<T: Default>(list: &mut Vec<T>) -> &mut T {
    list.push(T::default());
    let last = list.len() - 1;
    &mut list[last]
}

/// A complete SDP document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionDescription {
    /// `v=`
    pub version: Option<Value>,
    /// `o=`
    pub origin: Option<Origin>,
    /// `s=`
    pub name: Option<Value>,
    /// `u=`
    pub uri: Option<Value>,
    /// `e=`
    pub email: Option<Value>,
    /// `p=`
    pub phone: Option<Value>,
    /// `z=`, kept verbatim
    pub timezones: Option<Value>,
    /// `r=`, kept verbatim
    pub repeats: Option<Value>,
    /// `t=`
    pub timing: Option<Timing>,
    /// Session-level `i=`, `c=`, `b=` and `a=` lines
    pub attributes: Attributes,
    /// Media blocks in document order
    pub media: Vec<MediaDescription>,
}

impl SessionDescription {
    /// Creates an empty session description
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills in the fields the writer would otherwise default: `v=0`, a
    /// blank session name and an empty payload list on every media block.
    pub fn normalize(&mut self) {
        if self.version.is_none() {
            self.version = Some(Value::Int(0));
        }
        if self.name.is_none() {
            self.name = Some(Value::from(" "));
        }
        for media in &mut self.media {
            if media.payloads.is_none() {
                media.payloads = Some(Value::from(""));
            }
        }
    }

    /// Returns the first media block of the given type
    pub fn get_media(&self, kind: &str) -> Option<&MediaDescription> {
        self.media
            .iter()
            .find(|m| m.kind.as_ref().and_then(Value::as_str) == Some(kind))
    }
}

impl Scope for SessionDescription {
    fn value(&self, name: &str) -> Option<&Value> {
        match name {
            "version" => self.version.as_ref(),
            "name" => self.name.as_ref(),
            "uri" => self.uri.as_ref(),
            "email" => self.email.as_ref(),
            "phone" => self.phone.as_ref(),
            "timezones" => self.timezones.as_ref(),
            "repeats" => self.repeats.as_ref(),
            _ => self.attributes.value(name),
        }
    }

    fn record(&self, name: &str) -> Option<&dyn Record> {
        match name {
            "origin" => self.origin.as_ref().map(|r| r as &dyn Record),
            "timing" => self.timing.as_ref().map(|r| r as &dyn Record),
            _ => self.attributes.record(name),
        }
    }

    fn collection(&self, name: &str) -> Vec<&dyn Record> {
        self.attributes.collection(name)
    }
}

impl ScopeMut for SessionDescription {
    fn set_value(&mut self, name: &str, value: Value) {
        let slot = match name {
            "version" => &mut self.version,
            "name" => &mut self.name,
            "uri" => &mut self.uri,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "timezones" => &mut self.timezones,
            "repeats" => &mut self.repeats,
            _ => return self.attributes.set_value(name, value),
        };
        *slot = Some(value);
    }

    fn record_mut(&mut self, name: &str) -> &mut dyn RecordMut {
        match name {
            "origin" => self.origin.get_or_insert_with(Origin::default) as &mut dyn RecordMut,
            "timing" => self.timing.get_or_insert_with(Timing::default) as &mut dyn RecordMut,
            _ => self.attributes.record_mut(name),
        }
    }

    fn push_record(&mut self, name: &str) -> &mut dyn RecordMut {
        self.attributes.push_record(name)
    }
}

/// One media block: an `m=` line and the lines that follow it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaDescription {
    /// Media type (`audio`, `video`, `application`, ...)
    pub kind: Option<Value>,
    /// Transport port
    pub port: Option<Value>,
    /// Transport protocol such as `RTP/AVP` or `UDP/TLS/RTP/SAVPF`
    pub protocol: Option<Value>,
    /// Raw format list from the `m=` line. A single payload type is coerced
    /// to a number.
    pub payloads: Option<Value>,
    /// `payloads` split into individual formats. Derived at parse time and
    /// ignored by the writer.
    pub payload_types: Vec<Value>,
    /// Media-level `i=`, `c=`, `b=` and `a=` lines
    pub attributes: Attributes,
}

impl MediaDescription {
    /// Creates an empty media block
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes [`MediaDescription::payload_types`] from the raw list
    pub fn refresh_payload_types(&mut self) {
        self.payload_types = match &self.payloads {
            Some(payloads) => parse_payloads(&payloads.to_string()),
            None => Vec::new(),
        };
    }
}

impl Scope for MediaDescription {
    fn value(&self, name: &str) -> Option<&Value> {
        match name {
            "type" => self.kind.as_ref(),
            "port" => self.port.as_ref(),
            "protocol" => self.protocol.as_ref(),
            "payloads" => self.payloads.as_ref(),
            _ => self.attributes.value(name),
        }
    }

    fn record(&self, name: &str) -> Option<&dyn Record> {
        self.attributes.record(name)
    }

    fn collection(&self, name: &str) -> Vec<&dyn Record> {
        self.attributes.collection(name)
    }
}

impl ScopeMut for MediaDescription {
    fn set_value(&mut self, name: &str, value: Value) {
        let slot = match name {
            "type" => &mut self.kind,
            "port" => &mut self.port,
            "protocol" => &mut self.protocol,
            "payloads" => &mut self.payloads,
            _ => return self.attributes.set_value(name, value),
        };
        *slot = Some(value);
    }

    fn record_mut(&mut self, name: &str) -> &mut dyn RecordMut {
        self.attributes.record_mut(name)
    }

    fn push_record(&mut self, name: &str) -> &mut dyn RecordMut {
        self.attributes.push_record(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scope_routes_known_fields() {
        let mut session = SessionDescription::new();
        session.set_value("version", Value::Int(0));
        session.set_value("iceUfrag", Value::from("F7gI"));
        session.record_mut("origin").set("sessionId", Value::Int(20518));

        assert_eq!(session.version, Some(Value::Int(0)));
        assert_eq!(session.attributes.ice_ufrag, Some(Value::from("F7gI")));
        assert_eq!(session.origin.as_ref().unwrap().session_id, Some(Value::Int(20518)));
        assert_eq!(session.value("iceUfrag"), Some(&Value::from("F7gI")));
    }

    #[test]
    fn test_unknown_fields_go_to_extensions() {
        let mut media = MediaDescription::new();
        media.set_value("xCustom", Value::Int(3));
        media.push_record("xList").set("id", Value::from("a"));
        media.push_record("xList").set("id", Value::from("b"));
        media.record_mut("origin").set("username", Value::from("-"));

        let ext = &media.attributes.extensions;
        assert_eq!(ext.values.get("xCustom"), Some(&Value::Int(3)));
        assert_eq!(ext.collections["xList"].len(), 2);
        assert_eq!(ext.records["origin"].get("username"), Some(&Value::from("-")));

        let ids: Vec<_> = media
            .collection("xList")
            .iter()
            .map(|r| r.get("id").cloned())
            .collect();
        assert_eq!(ids, vec![Some(Value::from("a")), Some(Value::from("b"))]);
    }

    #[test]
    fn test_record_mut_keeps_previous_fields() {
        let mut media = MediaDescription::new();
        let rtcp = media.record_mut("rtcp");
        rtcp.set("port", Value::Int(1));
        rtcp.set("address", Value::from("0.0.0.0"));
        media.record_mut("rtcp").set("port", Value::Int(2));

        let rtcp = media.attributes.rtcp.as_ref().unwrap();
        assert_eq!(rtcp.port, Some(Value::Int(2)));
        assert_eq!(rtcp.address, Some(Value::from("0.0.0.0")));

        media.record_mut("xClock").set("id", Value::Int(1));
        media.record_mut("xClock").set("rate", Value::Int(8000));
        let clock = &media.attributes.extensions.records["xClock"];
        assert_eq!(clock.get("id"), Some(&Value::Int(1)));
        assert_eq!(clock.get("rate"), Some(&Value::Int(8000)));
    }

    #[test]
    fn test_normalize_fills_writer_defaults() {
        let mut session = SessionDescription::new();
        session.media.push(MediaDescription::new());
        session.normalize();

        assert_eq!(session.version, Some(Value::Int(0)));
        assert_eq!(session.name, Some(Value::from(" ")));
        assert_eq!(session.media[0].payloads, Some(Value::from("")));
    }

    #[test]
    fn test_refresh_payload_types() {
        let mut media = MediaDescription::new();
        media.payloads = Some(Value::from("97 98"));
        media.refresh_payload_types();
        assert_eq!(media.payload_types, vec![Value::Int(97), Value::Int(98)]);

        media.payloads = Some(Value::Int(0));
        media.refresh_payload_types();
        assert_eq!(media.payload_types, vec![Value::Int(0)]);
    }
}
