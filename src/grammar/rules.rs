//! The built-in rule table.
//!
//! Rules are listed in matching order within each tag. Several attributes
//! share a prefix (`rtcp-fb` with and without `trr-int`, the two simulcast
//! syntaxes), so the more specific pattern always comes first.

use super::{Format, Grammar, GrammarRule, Target};
use crate::session::Record;

fn build(target: Target, pattern: &str, names: &[&str], format: Format) -> GrammarRule {
    GrammarRule::new(target, pattern, names, format).expect("built-in rule pattern must compile")
}

/// A field holding the whole of capture group 1
fn value(name: &str, pattern: &str, template: &str) -> GrammarRule {
    build(Target::scalar(name), pattern, &[], Format::literal(template))
}

/// A single record, replaced by later occurrences
fn record(name: &str, pattern: &str, names: &[&str], format: Format) -> GrammarRule {
    build(Target::scalar(name), pattern, names, format)
}

/// A record appended to a collection
fn push(name: &str, pattern: &str, names: &[&str], format: Format) -> GrammarRule {
    build(Target::collection(name), pattern, names, format)
}

fn lit(template: &str) -> Format {
    Format::literal(template)
}

pub(super) fn builtin() -> Grammar {
    let mut grammar = Grammar::empty();

    grammar.rules_mut('v').push(value("version", r"^([0-9]*)$", "%s"));
    grammar.rules_mut('o').push(record(
        "origin",
        r"^(\S*) ([0-9]*) ([0-9]*) (\S*) IP([0-9]) (\S*)",
        &["username", "sessionId", "sessionVersion", "netType", "ipVer", "address"],
        lit("%s %s %d %s IP%d %s"),
    ));
    grammar.rules_mut('s').push(value("name", "(.*)", "%s"));
    grammar.rules_mut('i').push(value("description", "(.*)", "%s"));
    grammar.rules_mut('u').push(value("uri", "(.*)", "%s"));
    grammar.rules_mut('e').push(value("email", "(.*)", "%s"));
    grammar.rules_mut('p').push(value("phone", "(.*)", "%s"));
    grammar.rules_mut('z').push(value("timezones", "(.*)", "%s"));
    grammar.rules_mut('r').push(value("repeats", "(.*)", "%s"));
    grammar.rules_mut('t').push(record(
        "timing",
        r"^([0-9]*) ([0-9]*)",
        &["start", "stop"],
        lit("%d %d"),
    ));
    grammar.rules_mut('c').push(record(
        "connection",
        r"^IN IP([0-9]) (\S*)",
        &["version", "ip"],
        lit("IN IP%d %s"),
    ));
    grammar.rules_mut('b').push(push(
        "bandwidth",
        r"^(TIAS|AS|CT|RR|RS):([0-9]*)",
        &["type", "limit"],
        lit("%s:%s"),
    ));
    grammar.rules_mut('m').push(build(
        Target::Inline,
        r"^([0-9A-Za-z_]*) ([0-9]*) ([0-9A-Za-z_/]*)(?: (.*))?",
        &["type", "port", "protocol", "payloads"],
        lit("%s %d %s %s"),
    ));

    *grammar.rules_mut('a') = attribute_rules();
    grammar
}

fn attribute_rules() -> Vec<GrammarRule> {
    vec![
        // a=rtpmap:110 opus/48000/2
        push(
            "rtp",
            r"^rtpmap:([0-9]*) ([0-9A-Za-z_\-.]*)(?:\s*/([0-9]*)(?:\s*/(\S*))?)?",
            &["payload", "codec", "rate", "encoding"],
            Format::Computed(rtpmap),
        ),
        // a=fmtp:111 minptime=10; useinbandfec=1
        push(
            "fmtp",
            r"^fmtp:([0-9]*) ([\S| ]*)",
            &["payload", "config"],
            lit("fmtp:%d %s"),
        ),
        value("control", r"^control:(.*)", "control:%s"),
        // a=rtcp:65179 IN IP4 193.84.77.194
        record(
            "rtcp",
            r"^rtcp:([0-9]*)(?: (\S*) IP([0-9]) (\S*))?",
            &["port", "netType", "ipVer", "address"],
            Format::Computed(rtcp),
        ),
        push(
            "rtcpFbTrrInt",
            r"^rtcp-fb:(\*|[0-9]*) trr-int ([0-9]*)",
            &["payload", "value"],
            lit("rtcp-fb:%s trr-int %d"),
        ),
        // a=rtcp-fb:98 nack rpsi
        push(
            "rtcpFb",
            r"^rtcp-fb:(\*|[0-9]*) ([0-9A-Za-z_-]*)(?: ([0-9A-Za-z_-]*))?",
            &["payload", "type", "subtype"],
            Format::Computed(rtcp_fb),
        ),
        // a=extmap:1/recvonly URI-gps-string
        // a=extmap:3 urn:ietf:params:rtp-hdrext:encrypt urn:ietf:params:rtp-hdrext:smpte-tc 25@600/24
        push(
            "ext",
            r"^extmap:([0-9]+)(?:/([0-9A-Za-z_]+))?(?: (urn:ietf:params:rtp-hdrext:encrypt))? (\S*)(?: (\S*))?",
            &["value", "direction", "encrypt-uri", "uri", "config"],
            Format::Computed(extmap),
        ),
        value("extmapAllowMixed", r"^(extmap-allow-mixed)", "%s"),
        // a=crypto:1 AES_CM_128_HMAC_SHA1_80 inline:PS1uQCVeeCFCanVmcjkpPywjNWhcYD0mXXtxaVBR|2^20|1:32
        push(
            "crypto",
            r"^crypto:([0-9]*) ([0-9A-Za-z_]*) (\S*)(?: (\S*))?",
            &["id", "suite", "config", "sessionConfig"],
            Format::Computed(crypto),
        ),
        value("setup", r"^setup:([0-9A-Za-z_]*)", "setup:%s"),
        value("connectionType", r"^connection:(new|existing)", "connection:%s"),
        value("mid", r"^mid:([^\s]*)", "mid:%s"),
        push(
            "msid",
            r"^msid:([0-9A-Za-z_-]+)(?: ([0-9A-Za-z_-]+))?",
            &["id", "appdata"],
            lit("msid:%s %s"),
        ),
        value("ptime", r"^ptime:([0-9]*(?:\.[0-9]*)*)", "ptime:%d"),
        value("maxptime", r"^maxptime:([0-9]*(?:\.[0-9]*)*)", "maxptime:%d"),
        value("direction", r"^(sendrecv|recvonly|sendonly|inactive)", "%s"),
        value("icelite", r"^(ice-lite)", "%s"),
        value("iceUfrag", r"^ice-ufrag:(\S*)", "ice-ufrag:%s"),
        value("icePwd", r"^ice-pwd:(\S*)", "ice-pwd:%s"),
        record(
            "fingerprint",
            r"^fingerprint:(\S*) (\S*)",
            &["type", "hash"],
            lit("fingerprint:%s %s"),
        ),
        // a=candidate:3289912957 2 tcp 1845501695 193.84.77.194 60017 typ srflx raddr 192.168.34.75 rport 60017 tcptype passive generation 0 network-id 3 network-cost 10
        push(
            "candidates",
            concat!(
                r"^candidate:(\S*) ([0-9]*) (\S*) ([0-9]*) (\S*) ([0-9]*) typ (\S*)",
                r"(?: raddr (\S*) rport ([0-9]*))?",
                r"(?: tcptype (\S*))?",
                r"(?: generation ([0-9]*))?",
                r"(?: network-id ([0-9]*))?",
                r"(?: network-cost ([0-9]*))?",
            ),
            &[
                "foundation",
                "component",
                "transport",
                "priority",
                "ip",
                "port",
                "type",
                "raddr",
                "rport",
                "tcptype",
                "generation",
                "network-id",
                "network-cost",
            ],
            Format::Computed(candidate),
        ),
        // written after the candidates
        value("endOfCandidates", r"^(end-of-candidates)", "%s"),
        value("remoteCandidates", r"^remote-candidates:(.*)", "remote-candidates:%s"),
        value("iceOptions", r"^ice-options:(\S*)", "ice-options:%s"),
        // a=ssrc:2566107569 cname:t9YU8M1UxTF8Y1A1
        push(
            "ssrcs",
            r"^ssrc:([0-9]*) ([0-9A-Za-z_-]*)(?::(.*))?",
            &["id", "attribute", "value"],
            Format::Computed(ssrc),
        ),
        // semantics is an RFC 4566 token
        push(
            "ssrcGroups",
            r"^ssrc-group:([\x21\x23\x24\x25\x26\x27\x2A\x2B\x2D\x2E0-9A-Za-z_]*) (.*)",
            &["semantics", "ssrcs"],
            lit("ssrc-group:%s %s"),
        ),
        // the space after the colon is how browsers write it
        record(
            "msidSemantic",
            r"^msid-semantic:\s?([0-9A-Za-z_]*) (\S*)",
            &["semantic", "token"],
            lit("msid-semantic: %s %s"),
        ),
        push("groups", r"^group:([0-9A-Za-z_]*) (.*)", &["type", "mids"], lit("group:%s %s")),
        value("rtcpMux", r"^(rtcp-mux)", "%s"),
        value("rtcpRsize", r"^(rtcp-rsize)", "%s"),
        record(
            "sctpmap",
            r"^sctpmap:([0-9A-Za-z_/]*) (\S*)(?: (\S*))?",
            &["sctpmapNumber", "app", "maxMessageSize"],
            Format::Computed(sctpmap),
        ),
        value("xGoogleFlag", r"^x-google-flag:([^\s]*)", "x-google-flag:%s"),
        // a=rid:1 send max-width=1280;max-height=720;max-fps=30;depend=0
        push(
            "rids",
            r"^rid:([0-9A-Za-z_]+) ([0-9A-Za-z_]+)(?: ([\S| ]*))?",
            &["id", "direction", "params"],
            Format::Computed(rid),
        ),
        // a=imageattr:97 send [x=800,y=640,sar=1.1,q=0.6] [x=480,y=320] recv [x=330,y=250]
        push(
            "imageattrs",
            concat!(
                r"^imageattr:([0-9]+|\*)",
                r"[\s\t]+(send|recv)[\s\t]+(\*|\[\S+\](?:[\s\t]+\[\S+\])*)",
                r"(?:[\s\t]+(recv|send)[\s\t]+(\*|\[\S+\](?:[\s\t]+\[\S+\])*))?",
            ),
            &["pt", "dir1", "attrs1", "dir2", "attrs2"],
            Format::Computed(imageattr),
        ),
        // a=simulcast:send 1,2,3;~4,~5 recv 6;~7,~8
        record(
            "simulcast",
            concat!(
                r"^simulcast:",
                r"(send|recv) ([a-zA-Z0-9\-_~;,]+)",
                r"(?:\s?(send|recv) ([a-zA-Z0-9\-_~;,]+))?",
                r"$",
            ),
            &["dir1", "list1", "dir2", "list2"],
            Format::Computed(simulcast),
        ),
        // a=simulcast: recv pt=97;98 send pt=97
        record(
            "simulcast_03",
            r"^simulcast:[\s\t]+([\S+\s\t]+)$",
            &["value"],
            lit("simulcast: %s"),
        ),
        value("framerate", r"^framerate:([0-9]+(?:$|\.[0-9]+))", "framerate:%s"),
        // a=source-filter: incl IN IP4 239.5.2.31 10.1.15.5
        record(
            "sourceFilter",
            r"^source-filter: *(excl|incl) (\S*) (IP4|IP6|\*) (\S*) (.*)",
            &["filterMode", "netType", "addressTypes", "destAddress", "srcList"],
            lit("source-filter: %s %s %s %s %s"),
        ),
        value("bundleOnly", r"^(bundle-only)", "%s"),
        value("label", r"^label:(.+)", "label:%s"),
        value("sctpPort", r"^sctp-port:([0-9]+)$", "sctp-port:%s"),
        value("maxMessageSize", r"^max-message-size:([0-9]+)$", "max-message-size:%s"),
        // a=ts-refclk:ptp=IEEE1588-2008:39-A7-94-FF-FE-07-CB-D0:37
        push(
            "tsRefClocks",
            r"^ts-refclk:([^\s=]*)(?:=(\S*))?",
            &["clksrc", "clksrcExt"],
            Format::Computed(ts_refclk),
        ),
        // a=mediaclk:direct=963214424
        record(
            "mediaClk",
            r"^mediaclk:(?:id=(\S*))? *([^\s=]*)(?:=(\S*))?(?: *rate=([0-9]+)/([0-9]+))?",
            &[
                "id",
                "mediaClockName",
                "mediaClockValue",
                "rateNumerator",
                "rateDenominator",
            ],
            Format::Computed(mediaclk),
        ),
        value("keywords", r"^keywds:(.+)$", "keywds:%s"),
        value("content", r"^content:(.+)", "content:%s"),
        // BFCP, RFC 4583
        value("bfcpFloorCtrl", r"^floorctrl:(c-only|s-only|c-s)", "floorctrl:%s"),
        value("bfcpConfId", r"^confid:([0-9]+)", "confid:%s"),
        value("bfcpUserId", r"^userid:([0-9]+)", "userid:%s"),
        record(
            "bfcpFloorId",
            r"^floorid:(.+) (?:m-stream|mstrm):(.+)",
            &["id", "mStream"],
            lit("floorid:%s mstrm:%s"),
        ),
        push("invalid", "(.*)", &["value"], lit("%s")).fallback(),
    ]
}

fn rtpmap(o: &dyn Record) -> String {
    let template = if o.has("encoding") {
        "rtpmap:%d %s/%s/%s"
    } else if o.has("rate") {
        "rtpmap:%d %s/%s"
    } else {
        "rtpmap:%d %s"
    };
    template.to_string()
}

fn rtcp(o: &dyn Record) -> String {
    let template = if o.has("address") {
        "rtcp:%d %s IP%d %s"
    } else {
        "rtcp:%d"
    };
    template.to_string()
}

fn rtcp_fb(o: &dyn Record) -> String {
    let template = if o.has("subtype") {
        "rtcp-fb:%s %s %s"
    } else {
        "rtcp-fb:%s %s"
    };
    template.to_string()
}

fn extmap(o: &dyn Record) -> String {
    let mut template = String::from("extmap:%d");
    template.push_str(if o.has("direction") { "/%s" } else { "%v" });
    template.push_str(if o.is_set("encrypt-uri") { " %s" } else { "%v" });
    template.push_str(" %s");
    if o.has("config") {
        template.push_str(" %s");
    }
    template
}

fn crypto(o: &dyn Record) -> String {
    let template = if o.has("sessionConfig") {
        "crypto:%d %s %s %s"
    } else {
        "crypto:%d %s %s"
    };
    template.to_string()
}

fn candidate(o: &dyn Record) -> String {
    let mut template = String::from("candidate:%s %d %s %d %s %d typ %s");
    template.push_str(if o.has("raddr") {
        " raddr %s rport %d"
    } else {
        "%v%v"
    });
    // every optional slot is voided when absent so later ones stay aligned
    for (key, segment) in [
        ("tcptype", " tcptype %s"),
        ("generation", " generation %d"),
        ("network-id", " network-id %d"),
        ("network-cost", " network-cost %d"),
    ] {
        template.push_str(if o.has(key) { segment } else { "%v" });
    }
    template
}

fn ssrc(o: &dyn Record) -> String {
    let mut template = String::from("ssrc:%d");
    if o.has("attribute") {
        template.push_str(" %s");
        if o.has("value") {
            template.push_str(":%s");
        }
    }
    template
}

fn sctpmap(o: &dyn Record) -> String {
    let template = if o.has("maxMessageSize") {
        "sctpmap:%d %s %d"
    } else {
        "sctpmap:%d %s"
    };
    template.to_string()
}

fn rid(o: &dyn Record) -> String {
    let template = if o.is_set("params") {
        "rid:%d %s %s"
    } else {
        "rid:%d %s"
    };
    template.to_string()
}

fn imageattr(o: &dyn Record) -> String {
    let mut template = String::from("imageattr:%s %s %s");
    if o.is_set("dir2") {
        template.push_str(" %s %s");
    }
    template
}

fn simulcast(o: &dyn Record) -> String {
    let mut template = String::from("simulcast:%s %s");
    if o.is_set("dir2") {
        template.push_str(" %s %s");
    }
    template
}

fn ts_refclk(o: &dyn Record) -> String {
    let mut template = String::from("ts-refclk:%s");
    if o.has("clksrcExt") {
        template.push_str("=%s");
    }
    template
}

fn mediaclk(o: &dyn Record) -> String {
    let mut template = String::from("mediaclk:");
    template.push_str(if o.has("id") { "id=%s %s" } else { "%v%s" });
    if o.has("mediaClockValue") {
        template.push_str("=%s");
    }
    if o.has("rateNumerator") {
        template.push_str(" rate=%s");
    }
    if o.has("rateDenominator") {
        template.push_str("/%s");
    }
    template
}
