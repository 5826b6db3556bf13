//! Whole-file decoding.

use hbr_core::{ByteCursor, Result};

use crate::config::{ConfigError, DecodeOptions};
use crate::prelude::Prelude;
use crate::reader::{ActionIter, Payload};
use crate::types::{PartialReplay, Replay};

/// Decodes replay files in one pass.
///
/// ```
/// use hbr_replay::{DecodeOptions, ReplayDecoder};
/// use hbr_test_utils::{ReplayFixture, RoomFixture, WireWriter};
///
/// let mut w = WireWriter::new();
/// RoomFixture::new("R").score_limit(3).write(&mut w);
/// let file = ReplayFixture::modern(12).payload(w.into_bytes()).build();
///
/// let decoder = ReplayDecoder::new(DecodeOptions::default()).unwrap();
/// let replay = decoder.decode(&file).unwrap();
/// assert_eq!(replay.room_info.name, "R");
/// assert_eq!(replay.room_info.score_limit, 3);
/// assert!(replay.actions.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ReplayDecoder {
    options: DecodeOptions,
}

impl ReplayDecoder {
    /// Create a decoder after validating `options`.
    pub fn new(options: DecodeOptions) -> std::result::Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The options in use.
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a file, failing on the first error.
    pub fn decode(&self, bytes: &[u8]) -> Result<Replay> {
        let payload = Payload::open(bytes, &self.options, |_| {})?;
        let mut c = ByteCursor::new(&payload.bytes);
        let (prelude, err) = Prelude::decode(&mut c, &payload.profile, payload.header.version)?;
        if let Some(e) = err {
            return Err(e);
        }
        let actions = ActionIter::new(c, payload.profile, self.options.max_actions)
            .collect::<Result<Vec<_>>>()?;
        log::debug!("decoded {} actions", actions.len());
        Ok(Replay::assemble(&payload.header, prelude, actions))
    }

    /// Decode a file, keeping every section decoded before a failure.
    pub fn decode_partial(&self, bytes: &[u8]) -> PartialReplay {
        let mut out = PartialReplay::default();
        if let Err(e) = self.run(bytes, &mut out) {
            log::warn!(
                "decode stopped at offset {} after {} actions: {e}",
                e.offset(),
                out.actions.len()
            );
            out.error = Some(e);
        }
        out
    }

    fn run(&self, bytes: &[u8], out: &mut PartialReplay) -> Result<()> {
        let payload = Payload::open(bytes, &self.options, |h| out.header = Some(h.clone()))?;
        let mut c = ByteCursor::new(&payload.bytes);
        let (prelude, err) = Prelude::decode(&mut c, &payload.profile, payload.header.version)?;
        out.prelude = Some(prelude);
        if let Some(e) = err {
            return Err(e);
        }
        for action in ActionIter::new(c, payload.profile, self.options.max_actions) {
            out.actions.push(action?);
        }
        log::debug!("decoded {} actions", out.actions.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbr_core::DecodeError;
    use hbr_test_utils::{ReplayFixture, RoomFixture, WireWriter};

    #[test]
    fn invalid_options_rejected() {
        let opts = DecodeOptions {
            max_inflated_bytes: 0,
            ..DecodeOptions::default()
        };
        assert_eq!(
            ReplayDecoder::new(opts).unwrap_err(),
            ConfigError::ZeroInflateBudget
        );
    }

    #[test]
    fn bad_magic_keeps_nothing() {
        let partial = ReplayDecoder::default().decode_partial(b"NOPE\0\0\0\x0c\0\0\0\0");
        assert!(partial.header.is_none());
        assert!(matches!(
            partial.error,
            Some(DecodeError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn inflate_failure_keeps_header() {
        let mut file = b"HBR2".to_vec();
        file.extend_from_slice(&12u32.to_be_bytes());
        file.extend_from_slice(&0u32.to_be_bytes());
        file.extend_from_slice(&[0xff, 0xff, 0xff, 0xff]);
        let partial = ReplayDecoder::default().decode_partial(&file);
        assert_eq!(partial.header.map(|h| h.version), Some(12));
        assert!(matches!(
            partial.error,
            Some(DecodeError::DecompressionFailure { offset: 12, .. })
        ));
    }

    #[test]
    fn strict_and_best_effort_agree() {
        let mut w = WireWriter::new();
        RoomFixture::new("R").write(&mut w);
        w.u8(0).u32(0).u32(0).u8(0).u32(0).u32(0).u8(0);
        w.varint(5).u16(0).u8(7);
        let file = ReplayFixture::modern(12).payload(w.into_bytes()).build();
        let decoder = ReplayDecoder::default();
        let replay = decoder.decode(&file).unwrap();
        let partial = decoder.decode_partial(&file);
        assert!(partial.is_complete());
        assert_eq!(partial.prelude.unwrap().room, replay.room_info);
        assert_eq!(partial.actions, replay.actions);
        assert_eq!(replay.actions[0].frame, 5);
    }

    #[test]
    fn strict_decode_reports_the_partial_error() {
        let mut file = b"HBR2".to_vec();
        file.extend_from_slice(&12u32.to_be_bytes());
        file.extend_from_slice(&0u32.to_be_bytes());
        file.extend_from_slice(&[0xff, 0xff, 0xff, 0xff]);
        let decoder = ReplayDecoder::default();
        assert_eq!(
            decoder.decode(&file).unwrap_err(),
            decoder.decode_partial(&file).error.unwrap()
        );
    }

    #[test]
    fn inflate_budget_enforced() {
        let mut w = WireWriter::new();
        RoomFixture::new("R").write(&mut w);
        let file = ReplayFixture::modern(12).payload(w.into_bytes()).build();
        let decoder = ReplayDecoder::new(DecodeOptions {
            max_inflated_bytes: 4,
            ..DecodeOptions::default()
        })
        .unwrap();
        assert!(matches!(
            decoder.decode(&file),
            Err(DecodeError::DecompressionFailure { .. })
        ));
    }
}
