//! Multi-route payload prober for loosely structured HaxBall replay dumps.
//!
//! Some tools write replay-shaped files whose payload is not the
//! canonical action log but a dump of per-tick records in JSON, NDJSON,
//! msgpack or CBOR, possibly compressed or length-framed. This crate
//! finds the route that decodes such a payload and returns the records
//! as ordered string-keyed maps.
//!
//! # Architecture
//!
//! - [`PayloadProber`] runs the route chain over a payload
//! - [`Route`] identifies the route that matched and labels it
//! - [`ingest()`] resolves a whole file and probes its payload
//!
//! # Format
//!
//! ```text
//! framed: ([len u32 LE, 1..=64 MiB] [blob])* [residue < 4 bytes]?
//! ```
//!
//! Each blob is decoded on its own; undecodable blobs are skipped.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod codec;
pub mod config;
mod framing;
pub mod ingest;
mod json;
pub mod prober;
pub mod route;
mod structured;
pub mod tick;

pub use config::{ConfigError, ProbeOptions};
pub use framing::MAX_FRAME_LEN;
pub use ingest::{ingest, LooseReplay};
pub use prober::{PayloadProber, Probe};
pub use route::{Format, Route, Source};
pub use tick::Tick;
