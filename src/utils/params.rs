use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::value::{coerce, Value};

lazy_static! {
    static ref PARAM_SEPARATOR: Regex = Regex::new(r";\s?").expect("separator pattern must compile");
}

/// Decoded `key=value` parameters. A bare key maps to `None`.
pub type Params = BTreeMap<String, Option<Value>>;

/// One `<component> <ip> <port>` entry of `a=remote-candidates`
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCandidate {
    /// ICE component id
    pub component: Value,
    /// Candidate address, never coerced
    pub ip: String,
    /// Candidate port
    pub port: Value,
}

/// One format of a simulcast stream
#[derive(Debug, Clone, PartialEq)]
pub struct SimulcastFormat {
    /// RID or payload type
    pub scid: Value,
    /// Set when the format was listed with a leading `~`
    pub paused: bool,
}

/// Decodes a parameter list such as an `a=fmtp` config or `a=rid` params.
///
/// Entries are separated by `;` (optionally followed by one space) and split
/// on their first `=`. Values are coerced to numbers where they are canonical
/// numbers.
///
/// ```rust
/// use sdpio::utils::parse_params;
/// use sdpio::Value;
///
/// let params = parse_params("profile-level-id=4d0028;packetization-mode=1");
/// assert_eq!(params["profile-level-id"], Some(Value::from("4d0028")));
/// assert_eq!(params["packetization-mode"], Some(Value::Int(1)));
/// ```
pub fn parse_params(s: &str) -> Params {
    if s.is_empty() {
        return Params::new();
    }
    let mut params = Params::new();
    for token in PARAM_SEPARATOR.split(s) {
        add_param(&mut params, token);
    }
    params
}

/// Splits the payload list of an `m=` line
pub fn parse_payloads(s: &str) -> Vec<Value> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(' ').map(coerce).collect()
}

/// Decodes `a=remote-candidates` into `(component, ip, port)` entries. An
/// incomplete trailing entry is dropped.
pub fn parse_remote_candidates(s: &str) -> Vec<RemoteCandidate> {
    if s.is_empty() {
        return Vec::new();
    }
    let parts: Vec<&str> = s.split(' ').collect();
    parts
        .chunks_exact(3)
        .map(|entry| RemoteCandidate {
            component: coerce(entry[0]),
            ip: entry[1].to_string(),
            port: coerce(entry[2]),
        })
        .collect()
}

/// Decodes the `attrs1`/`attrs2` list of an `a=imageattr` line (RFC 6236):
/// `[x=1280,y=720] [x=320,y=180]` becomes one parameter map per bracket.
pub fn parse_image_attributes(s: &str) -> Vec<Params> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(' ')
        .map(|item| {
            let inner = strip_brackets(item);
            let mut params = Params::new();
            for token in inner.split(',') {
                add_param(&mut params, token);
            }
            params
        })
        .collect()
}

/// Decodes the stream list of an `a=simulcast` line (RFC 8853).
///
/// Streams are separated by `;` and their alternative formats by `,`.
///
/// ```rust
/// use sdpio::utils::{parse_simulcast, SimulcastFormat};
/// use sdpio::Value;
///
/// let streams = parse_simulcast("1,~4;2");
/// assert_eq!(
///     streams[0],
///     vec![
///         SimulcastFormat { scid: Value::Int(1), paused: false },
///         SimulcastFormat { scid: Value::Int(4), paused: true },
///     ]
/// );
/// assert_eq!(streams[1].len(), 1);
/// ```
pub fn parse_simulcast(s: &str) -> Vec<Vec<SimulcastFormat>> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(';')
        .map(|stream| {
            stream
                .split(',')
                .map(|format| match format.strip_prefix('~') {
                    Some(scid) => SimulcastFormat {
                        scid: coerce(scid),
                        paused: true,
                    },
                    None => SimulcastFormat {
                        scid: coerce(format),
                        paused: false,
                    },
                })
                .collect()
        })
        .collect()
}

fn add_param(params: &mut Params, token: &str) {
    match token.split_once('=') {
        Some((key, value)) if !value.is_empty() => {
            params.insert(key.to_string(), Some(coerce(value)));
        }
        // single characters are separator noise
        _ if token.len() > 1 => {
            params.insert(token.to_string(), None);
        }
        _ => {}
    }
}

fn strip_brackets(item: &str) -> &str {
    let mut chars = item.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(pairs: &[(&str, Option<Value>)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_parse_params() {
        assert_eq!(
            parse_params("profile-level-id=4d0028;packetization-mode=1"),
            params(&[
                ("profile-level-id", Some(Value::from("4d0028"))),
                ("packetization-mode", Some(Value::Int(1))),
            ])
        );
        assert_eq!(
            parse_params("minptime=10; useinbandfec=1"),
            params(&[
                ("minptime", Some(Value::Int(10))),
                ("useinbandfec", Some(Value::Int(1))),
            ])
        );
    }

    #[test]
    fn test_parse_params_edge_cases() {
        assert_eq!(parse_params(""), Params::new());
        assert_eq!(
            parse_params("bare;k=v=w;x=;;y"),
            params(&[
                ("bare", None),
                ("k", Some(Value::from("v=w"))),
                ("x=", None),
            ])
        );
    }

    #[test]
    fn test_parse_payloads() {
        assert_eq!(
            parse_payloads("126 97 98 34 31"),
            vec![
                Value::Int(126),
                Value::Int(97),
                Value::Int(98),
                Value::Int(34),
                Value::Int(31)
            ]
        );
        assert_eq!(parse_payloads(""), Vec::<Value>::new());
        assert_eq!(parse_payloads("webrtc-datachannel"), vec![Value::from("webrtc-datachannel")]);
    }

    #[test]
    fn test_parse_remote_candidates() {
        let candidates = parse_remote_candidates("1 203.0.113.1 54400 2 203.0.113.1 54401 3");
        assert_eq!(
            candidates,
            vec![
                RemoteCandidate {
                    component: Value::Int(1),
                    ip: "203.0.113.1".to_string(),
                    port: Value::Int(54400),
                },
                RemoteCandidate {
                    component: Value::Int(2),
                    ip: "203.0.113.1".to_string(),
                    port: Value::Int(54401),
                },
            ]
        );
    }

    #[test]
    fn test_parse_image_attributes() {
        let attrs = parse_image_attributes("[x=1280,y=720] [x=320,y=180,sar=1.1]");
        assert_eq!(
            attrs,
            vec![
                params(&[("x", Some(Value::Int(1280))), ("y", Some(Value::Int(720)))]),
                params(&[
                    ("sar", Some(Value::Float(1.1))),
                    ("x", Some(Value::Int(320))),
                    ("y", Some(Value::Int(180))),
                ]),
            ]
        );
        // "*" has nothing inside the brackets
        assert_eq!(parse_image_attributes("*"), vec![Params::new()]);
    }

    #[test]
    fn test_parse_simulcast() {
        let format = |scid: Value, paused: bool| SimulcastFormat { scid, paused };
        assert_eq!(
            parse_simulcast("1,~4;2;3"),
            vec![
                vec![format(Value::Int(1), false), format(Value::Int(4), true)],
                vec![format(Value::Int(2), false)],
                vec![format(Value::Int(3), false)],
            ]
        );
        assert_eq!(
            parse_simulcast("~hi;lo"),
            vec![
                vec![format(Value::from("hi"), true)],
                vec![format(Value::from("lo"), false)],
            ]
        );
    }
}
