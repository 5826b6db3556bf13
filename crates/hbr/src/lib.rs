//! hbr: a decoder for HaxBall `HBR2` and `HBRP` replay files.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all hbr sub-crates. For most users, adding `hbr` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use hbr::prelude::*;
//! # let file = hbr_test_utils::ReplayFixture::modern(12)
//! #     .payload({
//! #         let mut w = hbr_test_utils::WireWriter::new();
//! #         hbr_test_utils::RoomFixture::new("Futsal").write(&mut w);
//! #         w.into_bytes()
//! #     })
//! #     .build();
//!
//! let decoder = ReplayDecoder::new(DecodeOptions::default()).unwrap();
//! let replay = decoder.decode(&file).unwrap();
//! assert_eq!(replay.room_info.name, "Futsal");
//! println!("{}", replay.to_json().unwrap());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `hbr-core` | Byte cursor, container header, error taxonomy |
//! | [`replay`] | `hbr-replay` | Versioned schema decoder, stadiums, action log |
//! | [`probe`] | `hbr-probe` | Multi-route prober for loose tick dumps |
//! | [`batch`] | | Parallel decoding of many files |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;

/// Byte cursor, container header resolver and errors (`hbr-core`).
///
/// [`core::ContainerHeader::resolve`] splits a file into header and
/// payload without decoding anything else.
pub use hbr_core as core;

/// Versioned schema decoder (`hbr-replay`).
///
/// Decode whole files with [`replay::ReplayDecoder`], or stream the
/// action log with [`replay::ReplayReader`].
pub use hbr_replay as replay;

/// Payload prober and loose ingestion (`hbr-probe`).
pub use hbr_probe as probe;

/// Common imports for typical hbr usage.
///
/// ```rust
/// use hbr::prelude::*;
/// ```
pub mod prelude {
    // Container and errors
    pub use hbr_core::{ContainerHeader, DecodeError, Magic, PayloadScan};

    // Canonical decoding
    pub use hbr_replay::{
        Action, ActionKind, DecodeOptions, PartialReplay, Player, Replay, ReplayDecoder,
        ReplayReader, Room, SchemaProfile, Stadium, Team,
    };

    // Loose ingestion
    pub use hbr_probe::{ingest, LooseReplay, PayloadProber, Probe, Tick};

    // Batches
    pub use crate::batch::decode_all;
}
