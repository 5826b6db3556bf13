//! Prober limits.

use std::error::Error;
use std::fmt;

use crate::framing::MAX_FRAME_LEN;

/// Default ceiling on any single decompression output: 256 MiB.
pub const DEFAULT_MAX_INFLATED_BYTES: usize = 256 << 20;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`ProbeOptions::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_frame_len` is zero or above 64 MiB.
    FrameLenOutOfRange {
        /// The configured value.
        value: usize,
    },
    /// `max_inflated_bytes` is zero.
    ZeroInflateBudget,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameLenOutOfRange { value } => {
                write!(f, "max_frame_len must be in 1..={MAX_FRAME_LEN}, got {value}")
            }
            Self::ZeroInflateBudget => write!(f, "max_inflated_bytes must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── ProbeOptions ───────────────────────────────────────────────────

/// Limits applied by [`PayloadProber`](crate::PayloadProber).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Largest length-prefixed blob accepted. Default: 64 MiB.
    pub max_frame_len: usize,
    /// Upper bound on each decompression output. Default: 256 MiB.
    pub max_inflated_bytes: usize,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            max_frame_len: MAX_FRAME_LEN,
            max_inflated_bytes: DEFAULT_MAX_INFLATED_BYTES,
        }
    }
}

impl ProbeOptions {
    /// Check option invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_FRAME_LEN).contains(&self.max_frame_len) {
            return Err(ConfigError::FrameLenOutOfRange {
                value: self.max_frame_len,
            });
        }
        if self.max_inflated_bytes == 0 {
            return Err(ConfigError::ZeroInflateBudget);
        }
        Ok(())
    }
}
