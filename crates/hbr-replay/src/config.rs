//! Decoder options and their validation.

use std::error::Error;
use std::fmt;

use hbr_core::{ContainerHeader, Result};

use crate::schema::{MessageTableLayout, SchemaProfile};

/// Default ceiling on the inflated payload size: 256 MiB.
pub const DEFAULT_MAX_INFLATED_BYTES: usize = 256 << 20;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`DecodeOptions::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_inflated_bytes` is zero.
    ZeroInflateBudget,
    /// `max_actions` is `Some(0)`.
    ZeroActionLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInflateBudget => write!(f, "max_inflated_bytes must be at least 1"),
            Self::ZeroActionLimit => {
                write!(f, "max_actions must be at least 1 when set")
            }
        }
    }
}

impl Error for ConfigError {}

// ── DecodeOptions ──────────────────────────────────────────────────

/// Knobs shared by [`ReplayDecoder`](crate::ReplayDecoder) and
/// [`ReplayReader`](crate::ReplayReader).
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Use this profile instead of selecting one from the header.
    pub profile: Option<SchemaProfile>,
    /// Force a message table layout.
    pub message_table: Option<MessageTableLayout>,
    /// Upper bound on the inflated payload. Default: 256 MiB.
    pub max_inflated_bytes: usize,
    /// Stop the action log after this many actions. Default: unlimited.
    pub max_actions: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            profile: None,
            message_table: None,
            max_inflated_bytes: DEFAULT_MAX_INFLATED_BYTES,
            max_actions: None,
        }
    }
}

impl DecodeOptions {
    /// Check option invariants.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.max_inflated_bytes == 0 {
            return Err(ConfigError::ZeroInflateBudget);
        }
        if self.max_actions == Some(0) {
            return Err(ConfigError::ZeroActionLimit);
        }
        Ok(())
    }

    /// The profile to decode `header` with, after overrides.
    pub fn resolve_profile(&self, header: &ContainerHeader) -> Result<SchemaProfile> {
        let mut profile = match self.profile {
            Some(p) => p,
            None => SchemaProfile::select(header)?,
        };
        if let Some(layout) = self.message_table {
            profile.message_table = layout;
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbr_core::{ByteOrder, Layout, Magic};

    #[test]
    fn default_is_valid() {
        assert!(DecodeOptions::default().validate().is_ok());
    }

    #[test]
    fn zero_budgets_rejected() {
        let opts = DecodeOptions {
            max_inflated_bytes: 0,
            ..DecodeOptions::default()
        };
        assert_eq!(opts.validate(), Err(ConfigError::ZeroInflateBudget));
        let opts = DecodeOptions {
            max_actions: Some(0),
            ..DecodeOptions::default()
        };
        assert_eq!(opts.validate(), Err(ConfigError::ZeroActionLimit));
    }

    #[test]
    fn overrides_apply() {
        let header = ContainerHeader {
            magic: Magic::Hbr2,
            layout: Layout::MagicFirst,
            version: 12,
            byte_order: ByteOrder::Big,
            duration: None,
        };
        let opts = DecodeOptions {
            message_table: Some(MessageTableLayout::Absent),
            ..DecodeOptions::default()
        };
        let profile = opts.resolve_profile(&header).unwrap();
        assert_eq!(profile.name, "modern");
        assert_eq!(profile.message_table, MessageTableLayout::Absent);

        let opts = DecodeOptions {
            profile: Some(SchemaProfile::LEGACY),
            ..DecodeOptions::default()
        };
        assert_eq!(
            opts.resolve_profile(&header).unwrap(),
            SchemaProfile::LEGACY
        );
    }
}
