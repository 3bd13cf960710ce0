#![doc(html_root_url = "https://docs.rs/sdpio/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

//! # sdpio - SDP parsing and writing
//!
//! `sdpio` converts Session Description Protocol (RFC 4566) text into a
//! structured [`SessionDescription`] and back. Both directions are driven by
//! one declarative grammar: a table of line patterns and output templates,
//! so supporting a new attribute means adding a rule rather than writing
//! parser and serializer code.
//!
//! ## Features
//!
//! ### Parsing
//! - Tolerant of `\r\n`, `\n` and `\r` line endings
//! - Session-level and per-media attribute scoping
//! - WebRTC attributes: ICE candidates, DTLS fingerprints, SSRCs, RIDs,
//!   simulcast, extmap, BUNDLE groups
//! - Broadcast attributes: RFC 7273 clocks, source filters, BFCP
//! - Unknown attributes kept verbatim instead of dropped
//!
//! ### Writing
//! - Protocol line order
//! - Optional fields left out cleanly
//! - Stable output: writing a parsed document and parsing it again yields
//!   the same structure
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sdpio = "0.1.0"
//! ```
//!
//! ### Parse, edit, write
//!
//! ```rust
//! use sdpio::Value;
//!
//! let sdp = "v=0\r\n\
//!            o=- 20518 0 IN IP4 203.0.113.1\r\n\
//!            s= \r\n\
//!            t=0 0\r\n\
//!            m=audio 54400 RTP/AVP 0\r\n\
//!            a=rtpmap:0 PCMU/8000\r\n";
//!
//! let mut session = sdpio::parse(sdp);
//! let audio = &mut session.media[0];
//! assert_eq!(audio.attributes.rtp[0].rate, Some(Value::Int(8000)));
//!
//! audio.attributes.direction = Some(Value::from("recvonly"));
//! let out = sdpio::write(&session);
//! assert!(out.ends_with("a=rtpmap:0 PCMU/8000\r\na=recvonly\r\n"));
//! ```
//!
//! ### Decoding compound values
//!
//! ```rust
//! use sdpio::utils::parse_params;
//!
//! let params = parse_params("minptime=10; useinbandfec=1");
//! assert_eq!(params["useinbandfec"], Some(sdpio::Value::Int(1)));
//! ```
//!
//! ## Module Overview
//!
//! - `grammar`: the rule table and its extension API
//!   - Built-in rules for every supported line type
//!   - Custom rules for private attributes
//!
//! - `parser` / `writer`: the two directions of the transform
//!
//! - `session`: the parsed document model
//!   - Typed records per attribute shape
//!   - Name-based access used by the grammar
//!
//! - `value`: captured values and numeric coercion
//!
//! - `utils`: decoders for compound attribute values
//!
//! - `check`: round-trip coverage check
//!
//! - `config`: configurable writer tag orders
//!
//! - `error`: Error handling types and utilities
//!

/// Round-trip coverage check
pub mod check;

/// Configuration module
pub mod config;

/// Error types and utilities
pub mod error;

/// SDP grammar: line patterns and output templates
pub mod grammar;

/// SDP text to session description
pub mod parser;

/// Parsed session description model
pub mod session;

/// Decoders for compound attribute values
pub mod utils;

/// Captured values and numeric coercion
pub mod value;

/// Session description to SDP text
pub mod writer;

pub use error::{Result, SdpError};
pub use grammar::Grammar;
pub use parser::{parse, parse_bytes, Parser};
pub use session::{MediaDescription, SessionDescription};
pub use value::Value;
pub use writer::{write, write_with, WriteOptions, Writer};
