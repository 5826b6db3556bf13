//! Byte-level primitives for decoding HaxBall replay files.
//!
//! This is the leaf crate with no internal dependencies. It defines
//! the pieces every decoder in the workspace is built on: the
//! bounds-checked [`ByteCursor`], the [`DecodeError`] taxonomy,
//! compression [`Signature`] sniffing, and the [`ContainerHeader`]
//! resolver that splits a file into header and payload.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod error;
pub mod header;
pub mod signature;

pub use cursor::ByteCursor;
pub use error::{DecodeError, DiscriminantKind, HeaderFault, Result};
pub use header::{
    ByteOrder, ContainerHeader, Layout, Magic, PayloadScan, ResolvedContainer,
};
pub use signature::{Codec, Signature};
