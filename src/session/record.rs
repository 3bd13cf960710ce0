use std::collections::BTreeMap;

use crate::value::Value;

/// Read access to the named fields of a parsed line.
///
/// Keys are the capture names declared by the grammar rule that produced the
/// record (`payload`, `sessionId`, `network-id`, ...).
pub trait Record {
    /// Returns the value stored under `key`, if the line carried it
    fn get(&self, key: &str) -> Option<&Value>;

    /// Whether `key` is present
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether `key` is present with a non-empty, non-zero value
    fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(Value::is_truthy)
    }
}

/// Write access used by the parser while applying captures.
pub trait RecordMut: Record {
    /// Stores `value` under `key`. Keys the record has no field for are ignored.
    fn set(&mut self, key: &str, value: Value);
}

/// Open record used for attributes added through custom grammar rules
pub type Fields = BTreeMap<String, Value>;

impl Record for Fields {
    fn get(&self, key: &str) -> Option<&Value> {
        BTreeMap::get(self, key)
    }
}

impl RecordMut for Fields {
    fn set(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }
}

macro_rules! record {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$fmeta:meta])* $field:ident => $key:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[doc = concat!("Captured as `", $key, "`")]
                pub $field: Option<Value>,
            )+
        }

        impl Record for $name {
            fn get(&self, key: &str) -> Option<&Value> {
                match key {
                    $( $key => self.$field.as_ref(), )+
                    _ => None,
                }
            }
        }

        impl RecordMut for $name {
            fn set(&mut self, key: &str, value: Value) {
                match key {
                    $( $key => self.$field = Some(value), )+
                    _ => log::trace!("{} has no field {:?}", stringify!($name), key),
                }
            }
        }
    };
}

record! {
    /// `o=<username> <sess-id> <sess-version> <nettype> IP<ver> <address>`
    Origin {
        username => "username",
        /// Often too large to be a number and kept as a string
        session_id => "sessionId",
        session_version => "sessionVersion",
        net_type => "netType",
        ip_ver => "ipVer",
        address => "address",
    }
}

record! {
    /// `t=<start> <stop>`
    Timing {
        start => "start",
        stop => "stop",
    }
}

record! {
    /// `c=IN IP<ver> <address>`
    Connection {
        version => "version",
        ip => "ip",
    }
}

record! {
    /// `b=<type>:<limit>`
    Bandwidth {
        kind => "type",
        limit => "limit",
    }
}

record! {
    /// `a=rtpmap:<payload> <codec>[/<rate>[/<encoding>]]`
    Rtp {
        payload => "payload",
        codec => "codec",
        rate => "rate",
        encoding => "encoding",
    }
}

record! {
    /// `a=fmtp:<payload> <config>`. The config is kept verbatim, see
    /// [`crate::utils::parse_params`] to decode it.
    Fmtp {
        payload => "payload",
        config => "config",
    }
}

record! {
    /// `a=rtcp:<port>[ <nettype> IP<ver> <address>]`
    Rtcp {
        port => "port",
        net_type => "netType",
        ip_ver => "ipVer",
        address => "address",
    }
}

record! {
    /// `a=rtcp-fb:<payload> trr-int <value>`
    RtcpFbTrrInt {
        payload => "payload",
        value => "value",
    }
}

record! {
    /// `a=rtcp-fb:<payload> <type>[ <subtype>]`
    RtcpFb {
        payload => "payload",
        kind => "type",
        subtype => "subtype",
    }
}

record! {
    /// `a=extmap:<value>[/<direction>][ <encrypt-uri>] <uri>[ <config>]`
    ExtMap {
        value => "value",
        direction => "direction",
        encrypt_uri => "encrypt-uri",
        uri => "uri",
        config => "config",
    }
}

record! {
    /// `a=crypto:<id> <suite> <config>[ <session config>]`
    Crypto {
        id => "id",
        suite => "suite",
        config => "config",
        session_config => "sessionConfig",
    }
}

record! {
    /// `a=msid:<id>[ <appdata>]`
    Msid {
        id => "id",
        appdata => "appdata",
    }
}

record! {
    /// `a=fingerprint:<hash function> <hash>`
    Fingerprint {
        kind => "type",
        hash => "hash",
    }
}

record! {
    /// `a=candidate:...` (RFC 8839 plus the common WebRTC extensions)
    Candidate {
        foundation => "foundation",
        component => "component",
        transport => "transport",
        priority => "priority",
        ip => "ip",
        port => "port",
        kind => "type",
        raddr => "raddr",
        rport => "rport",
        tcptype => "tcptype",
        generation => "generation",
        network_id => "network-id",
        network_cost => "network-cost",
    }
}

record! {
    /// `a=ssrc:<id>[ <attribute>[:<value>]]`
    Ssrc {
        id => "id",
        attribute => "attribute",
        value => "value",
    }
}

record! {
    /// `a=ssrc-group:<semantics> <ssrc list>`
    SsrcGroup {
        semantics => "semantics",
        ssrcs => "ssrcs",
    }
}

record! {
    /// `a=msid-semantic: <semantic> <token>`
    MsidSemantic {
        semantic => "semantic",
        token => "token",
    }
}

record! {
    /// `a=group:<type> <mid list>`
    Group {
        kind => "type",
        mids => "mids",
    }
}

record! {
    /// `a=sctpmap:<number> <app>[ <max message size>]`
    Sctpmap {
        sctpmap_number => "sctpmapNumber",
        app => "app",
        max_message_size => "maxMessageSize",
    }
}

record! {
    /// `a=rid:<id> <direction>[ <params>]`
    Rid {
        id => "id",
        direction => "direction",
        params => "params",
    }
}

record! {
    /// `a=imageattr:<pt> <dir1> <attrs1>[ <dir2> <attrs2>]` (RFC 6236)
    ImageAttr {
        pt => "pt",
        dir1 => "dir1",
        attrs1 => "attrs1",
        dir2 => "dir2",
        attrs2 => "attrs2",
    }
}

record! {
    /// `a=simulcast:<dir1> <list1>[ <dir2> <list2>]` (RFC 8853)
    Simulcast {
        dir1 => "dir1",
        list1 => "list1",
        dir2 => "dir2",
        list2 => "list2",
    }
}

record! {
    /// `a=simulcast: <value>` as written by draft-ietf-mmusic-sdp-simulcast-03
    Simulcast03 {
        value => "value",
    }
}

record! {
    /// `a=source-filter: <mode> <nettype> <addrtypes> <dest> <sources>` (RFC 4570)
    SourceFilter {
        filter_mode => "filterMode",
        net_type => "netType",
        address_types => "addressTypes",
        dest_address => "destAddress",
        src_list => "srcList",
    }
}

record! {
    /// `a=ts-refclk:<clksrc>[=<ext>]` (RFC 7273)
    TsRefClock {
        clksrc => "clksrc",
        clksrc_ext => "clksrcExt",
    }
}

record! {
    /// `a=mediaclk:[id=<id> ]<name>[=<value>][ rate=<num>/<den>]` (RFC 7273)
    MediaClock {
        id => "id",
        media_clock_name => "mediaClockName",
        media_clock_value => "mediaClockValue",
        rate_numerator => "rateNumerator",
        rate_denominator => "rateDenominator",
    }
}

record! {
    /// `a=floorid:<id> mstrm:<stream>` (RFC 4583)
    BfcpFloorId {
        id => "id",
        m_stream => "mStream",
    }
}

record! {
    /// An attribute line no specific rule understood, kept verbatim
    Invalid {
        value => "value",
    }
}
