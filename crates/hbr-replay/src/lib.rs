//! Schema decoder for HaxBall `HBR2` and `HBRP` replay files.
//!
//! A replay file is a short header followed by a compressed payload.
//! The payload holds a snapshot of the room at recording start and an
//! append-only log of frame-stamped actions.
//!
//! # Architecture
//!
//! - [`SchemaProfile`] names the layout rules for one format revision
//! - [`ReplayDecoder`] decodes a whole file, strictly or best-effort
//! - [`ReplayReader`] decodes the snapshot eagerly and the action log
//!   lazily through [`ActionIter`]
//! - [`ActionTable`] maps wire discriminants to action decoders
//!
//! # Format
//!
//! ```text
//! ["HBR2" | "HBRP"] [version u32] [duration u32] [deflate payload]
//!
//! payload: [message table?] [Room] [discs?] [Player*] [TeamColors?]
//!          ([frame delta] [sender] [type u8] [body])*
//! ```
//!
//! Decoded documents serialize with serde; see [`Replay`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod color;
pub mod config;
pub mod decoder;
pub mod inflate;
pub mod messages;
pub mod player;
pub mod prelude;
pub mod reader;
pub mod room;
pub mod schema;
pub mod stadium;
pub mod team;
pub mod types;

pub use action::{Action, ActionKind, ActionTable};
pub use color::Color;
pub use config::{ConfigError, DecodeOptions};
pub use decoder::ReplayDecoder;
pub use messages::{Message, MessageBody};
pub use player::Player;
pub use prelude::{DiscSet, Prelude};
pub use reader::{ActionIter, ReplayReader};
pub use room::{DiscState, Game, Room};
pub use schema::{MessageTableLayout, SchemaProfile};
pub use stadium::{CustomStadium, Stadium};
pub use team::{Team, TeamColor, TeamColors};
pub use types::{PartialReplay, Replay};

pub use hbr_core::{DecodeError, Result};
