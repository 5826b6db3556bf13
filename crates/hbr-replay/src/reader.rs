//! Lazy replay reader.
//!
//! [`ReplayReader`] resolves the header, inflates the payload and
//! decodes every section before the action log on construction. The
//! action log is decoded on demand through [`ActionIter`].

use hbr_core::{ByteCursor, ContainerHeader, DecodeError, DiscriminantKind, PayloadScan, Result};

use crate::action::{Action, ActionKind};
use crate::config::DecodeOptions;
use crate::inflate::inflate;
use crate::prelude::Prelude;
use crate::schema::SchemaProfile;

/// Header, profile and inflated payload of one file.
pub(crate) struct Payload {
    pub(crate) header: ContainerHeader,
    pub(crate) profile: SchemaProfile,
    pub(crate) bytes: Vec<u8>,
}

impl Payload {
    /// Resolve the container and inflate its payload.
    ///
    /// `on_header` sees the header before inflation so callers can keep
    /// it when a later step fails.
    pub(crate) fn open(
        bytes: &[u8],
        options: &DecodeOptions,
        on_header: impl FnOnce(&ContainerHeader),
    ) -> Result<Self> {
        let resolved = ContainerHeader::resolve(bytes, PayloadScan::Fixed)?;
        on_header(&resolved.header);
        let profile = options.resolve_profile(&resolved.header)?;
        log::debug!(
            "decoding {:?} v{} with the {} profile",
            resolved.header.magic,
            resolved.header.version,
            profile.name
        );
        let bytes = inflate(
            profile.payload_codec,
            resolved.payload,
            options.max_inflated_bytes,
            resolved.payload_offset,
        )?;
        Ok(Self {
            header: resolved.header,
            profile,
            bytes,
        })
    }
}

/// A replay with its sections decoded and its action log pending.
pub struct ReplayReader {
    header: ContainerHeader,
    profile: SchemaProfile,
    payload: Vec<u8>,
    prelude: Prelude,
    actions_at: usize,
    max_actions: Option<usize>,
}

impl ReplayReader {
    /// Open a replay file, decoding everything before the action log.
    pub fn open(bytes: &[u8], options: &DecodeOptions) -> Result<Self> {
        let Payload {
            header,
            profile,
            bytes: payload,
        } = Payload::open(bytes, options, |_| {})?;
        let mut c = ByteCursor::new(&payload);
        let (prelude, err) = Prelude::decode(&mut c, &profile, header.version)?;
        if let Some(e) = err {
            return Err(e);
        }
        let actions_at = c.position();
        Ok(Self {
            header,
            profile,
            payload,
            prelude,
            actions_at,
            max_actions: options.max_actions,
        })
    }

    /// The container header.
    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    /// The profile the payload is decoded with.
    pub fn profile(&self) -> &SchemaProfile {
        &self.profile
    }

    /// Sections decoded before the action log.
    pub fn prelude(&self) -> &Prelude {
        &self.prelude
    }

    /// Give up the decoded sections.
    pub fn into_prelude(self) -> Prelude {
        self.prelude
    }

    /// Inflated payload size in bytes.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Iterate the action log from its start.
    pub fn actions(&self) -> ActionIter<'_> {
        let mut cursor = ByteCursor::new(&self.payload);
        let seeked = cursor.seek(self.actions_at);
        let mut iter = ActionIter::new(cursor, self.profile, self.max_actions);
        iter.pending = seeked.err();
        iter
    }
}

// ── ActionIter ──────────────────────────────────────────────────

/// Iterator over the action log.
///
/// Yields actions until the payload is exhausted, the action limit is
/// reached, or a record fails to decode. A failure is yielded once and
/// fuses the iterator; the cursor stays at the start of the failed
/// record.
pub struct ActionIter<'a> {
    cursor: ByteCursor<'a>,
    profile: SchemaProfile,
    frame: u64,
    decoded: usize,
    limit: Option<usize>,
    pending: Option<DecodeError>,
    done: bool,
}

impl<'a> ActionIter<'a> {
    pub(crate) fn new(cursor: ByteCursor<'a>, profile: SchemaProfile, limit: Option<usize>) -> Self {
        Self {
            cursor,
            profile,
            frame: 0,
            decoded: 0,
            limit,
            pending: None,
            done: false,
        }
    }

    /// Frame of the last decoded action.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of actions yielded so far.
    pub fn decoded(&self) -> usize {
        self.decoded
    }

    /// Payload offset of the next record.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    fn decode_record(&mut self) -> Result<(u64, u32, ActionKind)> {
        let profile = self.profile;
        self.cursor.atomically(|c| {
            let delta = profile.frame_delta.read(c)?;
            let sender = profile.sender.read(c)?;
            let offset = c.position();
            let tag = c.read_u8()?;
            let entry = profile
                .actions
                .get(tag)
                .ok_or(DecodeError::UnsupportedDiscriminant {
                    offset,
                    kind: DiscriminantKind::Action,
                    value: tag,
                    table_len: profile.actions.len(),
                })?;
            let kind = (entry.decode)(c)?;
            Ok((delta, sender, kind))
        })
    }
}

impl Iterator for ActionIter<'_> {
    type Item = Result<Action>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending.take() {
            self.done = true;
            return Some(Err(e));
        }
        if self.done || self.cursor.is_eof() {
            return None;
        }
        if self.limit.is_some_and(|n| self.decoded >= n) {
            self.done = true;
            return None;
        }
        match self.decode_record() {
            Ok((delta, sender, kind)) => {
                self.frame = self.frame.saturating_add(delta);
                self.decoded += 1;
                Some(Ok(Action {
                    frame: self.frame,
                    sender,
                    kind,
                }))
            }
            Err(e) => {
                log::warn!(
                    "action log truncated after {} actions at offset {}: {e}",
                    self.decoded,
                    self.cursor.position()
                );
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
