use std::collections::BTreeMap;

use super::record::*;
use super::{push_default, Scope, ScopeMut};
use crate::value::Value;

/// Captures whose target field is not a first-class field of the scope.
///
/// Custom grammar rules land here, as does anything a built-in rule produces
/// in a scope that does not model it (e.g. an `o=` line inside a media block).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions {
    /// Single values, keyed by field name
    pub values: BTreeMap<String, Value>,
    /// Single records, keyed by field name
    pub records: BTreeMap<String, Fields>,
    /// Repeated records in order of appearance, keyed by field name
    pub collections: BTreeMap<String, Vec<Fields>>,
}

macro_rules! attributes {
    (
        values { $( $(#[$vmeta:meta])* $vfield:ident => $vkey:literal ),* $(,)? }
        records { $( $(#[$rmeta:meta])* $rfield:ident: $rty:ty => $rkey:literal ),* $(,)? }
        collections { $( $(#[$cmeta:meta])* $cfield:ident: $cty:ty => $ckey:literal ),* $(,)? }
    ) => {
        /// Lines that may appear both at session level and inside a media
        /// block: `i=`, `c=`, `b=` and every `a=` attribute.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct Attributes {
            $(
                $(#[$vmeta])*
                #[doc = concat!("Stored as `", $vkey, "`")]
                pub $vfield: Option<Value>,
            )*
            $(
                $(#[$rmeta])*
                #[doc = concat!("Stored as `", $rkey, "`")]
                pub $rfield: Option<$rty>,
            )*
            $(
                $(#[$cmeta])*
                #[doc = concat!("Collected as `", $ckey, "`")]
                pub $cfield: Vec<$cty>,
            )*
            /// Fields without a dedicated slot
            pub extensions: Extensions,
        }

        impl Scope for Attributes {
            fn value(&self, name: &str) -> Option<&Value> {
                match name {
                    $( $vkey => self.$vfield.as_ref(), )*
                    _ => self.extensions.values.get(name),
                }
            }

            fn record(&self, name: &str) -> Option<&dyn Record> {
                match name {
                    $( $rkey => self.$rfield.as_ref().map(|r| r as &dyn Record), )*
                    _ => self.extensions.records.get(name).map(|r| r as &dyn Record),
                }
            }

            fn collection(&self, name: &str) -> Vec<&dyn Record> {
                match name {
                    $( $ckey => self.$cfield.iter().map(|r| r as &dyn Record).collect(), )*
                    _ => self
                        .extensions
                        .collections
                        .get(name)
                        .map(|list| list.iter().map(|r| r as &dyn Record).collect())
                        .unwrap_or_default(),
                }
            }
        }

        impl ScopeMut for Attributes {
            fn set_value(&mut self, name: &str, value: Value) {
                match name {
                    $( $vkey => self.$vfield = Some(value), )*
                    _ => {
                        self.extensions.values.insert(name.to_string(), value);
                    }
                }
            }

            fn record_mut(&mut self, name: &str) -> &mut dyn RecordMut {
                match name {
                    $( $rkey => self.$rfield.get_or_insert_with(<$rty>::default) as &mut dyn RecordMut, )*
                    _ => self.extensions.records.entry(name.to_string()).or_default() as &mut dyn RecordMut,
                }
            }

            fn push_record(&mut self, name: &str) -> &mut dyn RecordMut {
                match name {
                    $( $ckey => push_default(&mut self.$cfield) as &mut dyn RecordMut, )*
                    _ => {
                        let list = self.extensions.collections.entry(name.to_string()).or_default();
                        push_default(list) as &mut dyn RecordMut
                    }
                }
            }
        }
    };
}

attributes! {
    values {
        /// `i=`
        description => "description",
        /// `a=control`, RTSP track URL
        control => "control",
        extmap_allow_mixed => "extmapAllowMixed",
        setup => "setup",
        /// `a=connection:new|existing`
        connection_type => "connectionType",
        mid => "mid",
        ptime => "ptime",
        maxptime => "maxptime",
        /// `a=sendrecv`, `a=recvonly`, `a=sendonly` or `a=inactive`
        direction => "direction",
        icelite => "icelite",
        ice_ufrag => "iceUfrag",
        ice_pwd => "icePwd",
        end_of_candidates => "endOfCandidates",
        /// Raw list, see [`crate::utils::parse_remote_candidates`]
        remote_candidates => "remoteCandidates",
        ice_options => "iceOptions",
        rtcp_mux => "rtcpMux",
        rtcp_rsize => "rtcpRsize",
        x_google_flag => "xGoogleFlag",
        framerate => "framerate",
        bundle_only => "bundleOnly",
        label => "label",
        sctp_port => "sctpPort",
        max_message_size => "maxMessageSize",
        /// `a=keywds`
        keywords => "keywords",
        content => "content",
        bfcp_floor_ctrl => "bfcpFloorCtrl",
        bfcp_conf_id => "bfcpConfId",
        bfcp_user_id => "bfcpUserId",
    }
    records {
        /// `c=`
        connection: Connection => "connection",
        rtcp: Rtcp => "rtcp",
        fingerprint: Fingerprint => "fingerprint",
        msid_semantic: MsidSemantic => "msidSemantic",
        sctpmap: Sctpmap => "sctpmap",
        simulcast: Simulcast => "simulcast",
        simulcast_03: Simulcast03 => "simulcast_03",
        source_filter: SourceFilter => "sourceFilter",
        media_clk: MediaClock => "mediaClk",
        bfcp_floor_id: BfcpFloorId => "bfcpFloorId",
    }
    collections {
        /// `b=`
        bandwidth: Bandwidth => "bandwidth",
        rtp: Rtp => "rtp",
        fmtp: Fmtp => "fmtp",
        rtcp_fb_trr_int: RtcpFbTrrInt => "rtcpFbTrrInt",
        rtcp_fb: RtcpFb => "rtcpFb",
        ext: ExtMap => "ext",
        crypto: Crypto => "crypto",
        msid: Msid => "msid",
        candidates: Candidate => "candidates",
        ssrcs: Ssrc => "ssrcs",
        ssrc_groups: SsrcGroup => "ssrcGroups",
        groups: Group => "groups",
        rids: Rid => "rids",
        imageattrs: ImageAttr => "imageattrs",
        ts_ref_clocks: TsRefClock => "tsRefClocks",
        /// Attribute lines no specific rule understood
        invalid: Invalid => "invalid",
    }
}
