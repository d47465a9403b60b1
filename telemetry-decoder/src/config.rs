//! Decoder configuration types
//!
//! The packet protocol is fixed, so the configuration is deliberately small.
//! The only knob is the UTC offset at which devices stamp their packets; its
//! default is the protocol constant and should not normally be changed.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DecoderError, Result};

/// Offset of device wall-clock time from UTC, in seconds (UTC+1)
pub const SOURCE_UTC_OFFSET_SECS: i32 = 3600;

/// Configuration for the decoder library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Offset of packet timestamps from UTC, in seconds
    #[serde(default = "default_source_utc_offset")]
    pub source_utc_offset_secs: i32,
}

fn default_source_utc_offset() -> i32 {
    SOURCE_UTC_OFFSET_SECS
}

/// The protocol offset as a `FixedOffset`
pub(crate) fn default_source_offset() -> FixedOffset {
    FixedOffset::east_opt(SOURCE_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            source_utc_offset_secs: default_source_utc_offset(),
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the source UTC offset in seconds
    pub fn with_source_utc_offset(mut self, secs: i32) -> Self {
        self.source_utc_offset_secs = secs;
        self
    }

    /// Resolve the configured offset, rejecting anything outside +-24h
    pub fn source_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.source_utc_offset_secs).ok_or_else(|| {
            DecoderError::InvalidConfig(format!(
                "source UTC offset out of range: {} s",
                self.source_utc_offset_secs
            ))
        })
    }
}
