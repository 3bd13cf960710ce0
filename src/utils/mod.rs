//! # Helper Decoders
//!
//! The parser keeps compound attribute values verbatim so they survive a
//! round trip unchanged. These helpers decode them on demand:
//!
//! - [`parse_params`]: `a=fmtp` configs and `a=rid` parameters
//! - [`parse_payloads`]: the format list of an `m=` line
//! - [`parse_remote_candidates`]: `a=remote-candidates`
//! - [`parse_image_attributes`]: the attribute lists of `a=imageattr`
//! - [`parse_simulcast`]: the stream lists of `a=simulcast`
//!
//! ```rust
//! use sdpio::utils::parse_params;
//! use sdpio::Value;
//!
//! let session = sdpio::parse(
//!     "m=video 9 RTP/AVP 97\r\n\
//!      a=fmtp:97 profile-level-id=4d0028;packetization-mode=1\r\n",
//! );
//! let config = session.media[0].attributes.fmtp[0].config.as_ref().unwrap();
//! let params = parse_params(&config.to_string());
//! assert_eq!(params["packetization-mode"], Some(Value::Int(1)));
//! ```
//!
//! Values are coerced with the same rule as parsed fields.

/// Decoders for compound attribute values
pub mod params;

pub use params::*;
