//! Loose ingestion: container header plus probed payload.

use hbr_core::{ContainerHeader, PayloadScan, Result, Signature};
use serde_json::Value;

use crate::prober::PayloadProber;
use crate::route::Route;
use crate::tick::{self, Tick};

/// A file decoded through the prober rather than the versioned schema.
#[derive(Clone, Debug, PartialEq)]
pub struct LooseReplay {
    /// Magic, version and duration.
    pub header: ContainerHeader,
    /// A JSON object found between the version field and the payload.
    pub header_json: Option<Tick>,
    /// File offset where the probed payload starts.
    pub payload_offset: usize,
    /// The route that decoded the payload.
    pub route: Route,
    /// Decoded records.
    pub ticks: Vec<Tick>,
}

/// Ingest `file` with the default prober.
pub fn ingest(file: &[u8]) -> Result<LooseReplay> {
    PayloadProber::default().ingest(file)
}

impl PayloadProber {
    /// Resolve the container by signature scan and probe its payload.
    ///
    /// When the scan stops on a JSON object that is followed by a
    /// compressed stream, the object is taken as header metadata and
    /// the stream as the payload.
    ///
    /// Errors from the prober carry file offsets.
    pub fn ingest(&self, file: &[u8]) -> Result<LooseReplay> {
        let resolved = ContainerHeader::resolve(file, PayloadScan::Signatures)?;
        let (header_json, payload_offset) = match embedded_header(resolved.payload) {
            Some((json, skip)) => (Some(json), resolved.payload_offset + skip),
            None => (header_object(resolved.header_bytes), resolved.payload_offset),
        };
        log::debug!(
            "ingest: payload at {payload_offset}, header json {}",
            if header_json.is_some() { "present" } else { "absent" }
        );
        let probe = self
            .probe(&file[payload_offset..])
            .map_err(|e| e.rebase(payload_offset))?;
        Ok(LooseReplay {
            header: resolved.header,
            header_json,
            payload_offset,
            route: probe.route,
            ticks: probe.ticks,
        })
    }
}

/// The first JSON value in `bytes`, if it is an object.
fn leading_object(bytes: &[u8]) -> Option<(Tick, usize)> {
    let mut values = serde_json::Deserializer::from_slice(bytes).into_iter::<Value>();
    let value = values.next()?.ok()?;
    let end = values.byte_offset();
    tick::from_value(value).ok().map(|obj| (obj, end))
}

/// Header bytes parsed as an object, whole or from the first `{`.
fn header_object(bytes: &[u8]) -> Option<Tick> {
    if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
        if let Ok(obj) = tick::from_value(value) {
            return Some(obj);
        }
    }
    let start = bytes.iter().position(|&b| b == b'{')?;
    leading_object(&bytes[start..]).map(|(obj, _)| obj)
}

/// A JSON object at the payload start followed by a compressed stream.
fn embedded_header(payload: &[u8]) -> Option<(Tick, usize)> {
    if Signature::sniff(payload) != Some(Signature::Json) {
        return None;
    }
    let (obj, end) = leading_object(payload)?;
    let (at, signature) = Signature::find(payload, end)?;
    signature.codec()?;
    Some((obj, at))
}
