//! Route-by-route payload probing.

use hbr_core::{Codec, DecodeError, Result};

use crate::codec::{self, CHAINABLE};
use crate::config::{ConfigError, ProbeOptions};
use crate::framing;
use crate::json;
use crate::route::{Format, Miss, Route, Source};
use crate::structured;
use crate::tick::Tick;

/// A successful probe: the first route that produced records.
#[derive(Clone, Debug, PartialEq)]
pub struct Probe {
    /// The matching route.
    pub route: Route,
    /// Records in payload order. Never empty.
    pub ticks: Vec<Tick>,
}

/// Formats tried on every candidate buffer, in order.
const PLAIN: [Format; 4] = [Format::Json, Format::Ndjson, Format::Msgpack, Format::Cbor];

fn parse(format: Format, bytes: &[u8]) -> std::result::Result<Vec<Tick>, Miss> {
    match format {
        Format::Json => json::ticks(bytes),
        Format::Ndjson => json::ndjson(bytes),
        Format::Msgpack => structured::msgpack(bytes),
        Format::Cbor => structured::cbor(bytes),
        Format::Framed => Err(Miss::Unframed),
    }
}

// ── Attempts ───────────────────────────────────────────────────────

/// Records the label of every route tried.
#[derive(Default)]
struct Attempts {
    labels: Vec<String>,
}

impl Attempts {
    fn route(
        &mut self,
        route: Route,
        outcome: std::result::Result<Vec<Tick>, Miss>,
    ) -> Option<Probe> {
        self.labels.push(route.label());
        match outcome {
            Ok(ticks) if !ticks.is_empty() => {
                log::debug!("route {route} matched: {} ticks", ticks.len());
                Some(Probe { route, ticks })
            }
            Ok(_) => {
                log::trace!("route {route}: {}", Miss::Empty);
                None
            }
            Err(miss) => {
                log::trace!("route {route}: {miss}");
                None
            }
        }
    }

    /// Record a source whose bytes could not be produced at all.
    fn unavailable(&mut self, label: String, miss: &Miss) {
        log::trace!("route {label}: {miss}");
        self.labels.push(label);
    }
}

// ── PayloadProber ──────────────────────────────────────────────────

/// Turns an opaque payload into generic tick records by trying a fixed
/// sequence of decompression and format routes.
///
/// Routes in order:
///
/// 1. JSON, then NDJSON, on the raw bytes.
/// 2. For each codec in [`Codec::ALL`], decompress the whole payload and
///    try JSON, NDJSON, msgpack, CBOR and length framing on the output.
/// 3. Concatenated zlib streams, then concatenated raw deflate streams,
///    each tried as JSON and NDJSON.
/// 4. Length framing on the raw bytes.
/// 5. msgpack, then CBOR, on the raw bytes.
///
/// The first route yielding at least one record wins.
///
/// # Examples
///
/// ```
/// use hbr_probe::PayloadProber;
///
/// let probe = PayloadProber::default()
///     .probe(b"{\"t\":1}\n{\"t\":2}\n")
///     .unwrap();
/// assert_eq!(probe.route.label(), "ndjson");
/// assert_eq!(probe.ticks.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PayloadProber {
    options: ProbeOptions,
}

impl PayloadProber {
    /// Create a prober after validating `options`.
    pub fn new(options: ProbeOptions) -> std::result::Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The limits in effect.
    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    /// Probe `payload`.
    ///
    /// Individual route failures are not reported. When every route
    /// fails the error lists each route label in the order tried.
    pub fn probe(&self, payload: &[u8]) -> Result<Probe> {
        let mut attempts = Attempts::default();
        if let Some(probe) = self.run(payload, &mut attempts) {
            return Ok(probe);
        }
        log::debug!(
            "no route matched a {}-byte payload after {} attempts",
            payload.len(),
            attempts.labels.len()
        );
        Err(DecodeError::NoDecodeRouteMatched {
            offset: 0,
            attempted: attempts.labels,
        })
    }

    fn run(&self, payload: &[u8], attempts: &mut Attempts) -> Option<Probe> {
        for format in [Format::Json, Format::Ndjson] {
            if let Some(probe) = attempts.route(Route::raw(format), parse(format, payload)) {
                return Some(probe);
            }
        }

        for codec in Codec::ALL {
            let inflated = match codec::decompress(codec, payload, self.options.max_inflated_bytes)
            {
                Ok(bytes) => bytes,
                Err(miss) => {
                    attempts.unavailable(codec.to_string(), &miss);
                    continue;
                }
            };
            let source = Source::Inflated(codec);
            for format in PLAIN {
                let route = Route { source, format };
                if let Some(probe) = attempts.route(route, parse(format, &inflated)) {
                    return Some(probe);
                }
            }
            let route = Route {
                source,
                format: Format::Framed,
            };
            if let Some(probe) = attempts.route(route, self.framed(&inflated)) {
                return Some(probe);
            }
        }

        for codec in CHAINABLE {
            let joined =
                match codec::concatenated(codec, payload, self.options.max_inflated_bytes) {
                    Ok(bytes) => bytes,
                    Err(miss) => {
                        attempts.unavailable(format!("concat-{codec}"), &miss);
                        continue;
                    }
                };
            for format in [Format::Json, Format::Ndjson] {
                let route = Route {
                    source: Source::Concatenated(codec),
                    format,
                };
                if let Some(probe) = attempts.route(route, parse(format, &joined)) {
                    return Some(probe);
                }
            }
        }

        if let Some(probe) = attempts.route(Route::raw(Format::Framed), self.framed(payload)) {
            return Some(probe);
        }

        for format in [Format::Msgpack, Format::Cbor] {
            if let Some(probe) = attempts.route(Route::raw(format), parse(format, payload)) {
                return Some(probe);
            }
        }
        None
    }

    /// Split `bytes` into length-prefixed blobs and decode each one.
    ///
    /// Blobs that decode by no route are skipped. At least one must decode.
    fn framed(&self, bytes: &[u8]) -> std::result::Result<Vec<Tick>, Miss> {
        let blobs = framing::split(bytes, self.options.max_frame_len)?;
        let mut ticks = Vec::new();
        let mut skipped = 0usize;
        for blob in &blobs {
            match self.blob(blob) {
                Some(mut decoded) => ticks.append(&mut decoded),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            log::trace!("skipped {skipped} of {} framed blobs", blobs.len());
        }
        if ticks.is_empty() {
            return Err(Miss::Empty);
        }
        Ok(ticks)
    }

    /// Decode one framed blob: plain formats, then each codec, then
    /// chained streams.
    fn blob(&self, blob: &[u8]) -> Option<Vec<Tick>> {
        let limit = self.options.max_inflated_bytes;
        let first = |bytes: &[u8], formats: &[Format]| {
            formats
                .iter()
                .find_map(|&format| parse(format, bytes).ok().filter(|t| !t.is_empty()))
        };
        if let Some(ticks) = first(blob, &PLAIN) {
            return Some(ticks);
        }
        for codec in Codec::ALL {
            if let Ok(inflated) = codec::decompress(codec, blob, limit) {
                if let Some(ticks) = first(&inflated, &PLAIN) {
                    return Some(ticks);
                }
            }
        }
        CHAINABLE.into_iter().find_map(|codec| {
            let joined = codec::concatenated(codec, blob, limit).ok()?;
            first(&joined, &[Format::Json, Format::Ndjson])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbr_test_utils::{deflate_raw, deflate_zlib, gzip, length_framed};

    fn label(payload: &[u8]) -> String {
        PayloadProber::default().probe(payload).unwrap().route.label()
    }

    #[test]
    fn raw_json_wins_first() {
        assert_eq!(label(br#"[{"t":1}]"#), "json");
    }

    #[test]
    fn inflated_routes() {
        let json = br#"{"ticks":[{"t":1},{"t":2}]}"#;
        assert_eq!(label(&deflate_zlib(json)), "zlib+json");
        assert_eq!(label(&gzip(b"{\"t\":1}\n{\"t\":2}\n")), "gzip+ndjson");
    }

    #[test]
    fn framed_inside_inflated() {
        let framed = length_framed([br#"[{"t":1}]"#.as_slice(), br#"[{"t":2}]"#.as_slice()]);
        let probe = PayloadProber::default().probe(&gzip(&framed)).unwrap();
        assert_eq!(probe.route.label(), "gzip+framed");
        assert_eq!(probe.ticks.len(), 2);
    }

    #[test]
    fn chained_raw_deflate() {
        let mut bytes = deflate_raw(b"{\"t\":1}\n");
        bytes.extend(deflate_raw(b"{\"t\":2}\n"));
        let probe = PayloadProber::default().probe(&bytes).unwrap();
        assert_eq!(probe.route.label(), "concat-deflate+ndjson");
        assert_eq!(probe.ticks.len(), 2);
    }

    #[test]
    fn undecodable_blobs_are_skipped() {
        let good = deflate_zlib(br#"{"ticks":[{"t":9}]}"#);
        let framed = length_framed([b"\xc1\xc1\xc1".as_slice(), good.as_slice()]);
        let probe = PayloadProber::default().probe(&framed).unwrap();
        assert_eq!(probe.route.label(), "framed");
        assert_eq!(probe.ticks.len(), 1);
        assert_eq!(probe.ticks[0]["t"], 9);
    }

    #[test]
    fn exhausted_routes_are_listed() {
        let err = PayloadProber::default().probe(b"\xc1").unwrap_err();
        let DecodeError::NoDecodeRouteMatched { offset, attempted } = err else {
            panic!("unexpected error {err:?}");
        };
        assert_eq!(offset, 0);
        assert_eq!(attempted.first().map(String::as_str), Some("json"));
        assert_eq!(attempted.last().map(String::as_str), Some("cbor"));
        assert!(attempted.iter().any(|l| l == "concat-zlib"));
        assert!(attempted.iter().any(|l| l == "framed"));
    }

    #[test]
    fn invalid_options_rejected() {
        let opts = ProbeOptions {
            max_frame_len: 0,
            ..Default::default()
        };
        assert!(PayloadProber::new(opts).is_err());
    }
}
