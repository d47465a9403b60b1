//! Core types for the telemetry decoder library
//!
//! This module defines the records the decoder emits when processing a packet
//! stream. Records are plain values built from a single packet; the decoder
//! keeps no state between packets or between calls.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::packet::Instruction;

/// Timestamp type used throughout the decoder
pub type Timestamp = DateTime<Utc>;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Errors that can occur during decoding
///
/// Any of these aborts the whole decode call. Lines that merely fail framing
/// never produce an error; they are dropped before decoding starts.
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Unrecognized packet instruction: {0}")]
    UnrecognizedInstruction(String),

    #[error("Malformed packet: {0}")]
    MalformedPacket(String),

    #[error("Invalid decoder configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DecoderError {
    /// Build a `MalformedPacket` error that quotes the offending packet
    pub(crate) fn malformed(packet: &str, reason: impl std::fmt::Display) -> Self {
        DecoderError::MalformedPacket(format!("{} in `{}`", reason, packet))
    }
}

/// One fault reported by an `Error` packet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    /// Fault code, carried verbatim
    pub code: String,
    /// Human readable fault description, carried verbatim
    pub description: String,
}

impl ErrorEntry {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Main decoded record type - the primary output of the decoder
///
/// The variant is chosen solely by the packet's instruction field, so a
/// record is either a device-info snapshot or an error report, never both.
/// Serializes to a flat object: `imei`, `time`, then either
/// `batteryLevel` + `odometer` or `errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeviceRecord {
    /// Battery and odometer snapshot from a `DeviceInfo` packet
    #[serde(rename_all = "camelCase")]
    DeviceInfo {
        /// Device identifier
        imei: String,
        /// Packet time, normalized to UTC
        time: Timestamp,
        /// Battery level rendered as `"<value> %"`
        battery_level: String,
        /// Odometer rendered as `"<value> km"`
        odometer: String,
    },

    /// Fault list from an `Error` packet (at least one entry, input order)
    #[serde(rename_all = "camelCase")]
    Error {
        /// Device identifier
        imei: String,
        /// Packet time, normalized to UTC
        time: Timestamp,
        /// Reported faults
        errors: Vec<ErrorEntry>,
    },
}

impl DeviceRecord {
    /// Get the device identifier of this record
    pub fn imei(&self) -> &str {
        match self {
            DeviceRecord::DeviceInfo { imei, .. } => imei,
            DeviceRecord::Error { imei, .. } => imei,
        }
    }

    /// Get the UTC timestamp of this record
    pub fn time(&self) -> Timestamp {
        match self {
            DeviceRecord::DeviceInfo { time, .. } => *time,
            DeviceRecord::Error { time, .. } => *time,
        }
    }

    /// Get the instruction this record was decoded from
    pub fn instruction(&self) -> Instruction {
        match self {
            DeviceRecord::DeviceInfo { .. } => Instruction::DeviceInfo,
            DeviceRecord::Error { .. } => Instruction::Error,
        }
    }

    /// Get the formatted battery level (device-info records only)
    pub fn battery_level(&self) -> Option<&str> {
        match self {
            DeviceRecord::DeviceInfo { battery_level, .. } => Some(battery_level),
            DeviceRecord::Error { .. } => None,
        }
    }

    /// Get the formatted odometer reading (device-info records only)
    pub fn odometer(&self) -> Option<&str> {
        match self {
            DeviceRecord::DeviceInfo { odometer, .. } => Some(odometer),
            DeviceRecord::Error { .. } => None,
        }
    }

    /// Get the reported faults (error records only)
    pub fn errors(&self) -> Option<&[ErrorEntry]> {
        match self {
            DeviceRecord::DeviceInfo { .. } => None,
            DeviceRecord::Error { errors, .. } => Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_time() -> Timestamp {
        Utc.with_ymd_and_hms(2021, 1, 14, 14, 5, 10).unwrap()
    }

    #[test]
    fn test_device_info_accessors() {
        let record = DeviceRecord::DeviceInfo {
            imei: "860861040012977".to_string(),
            time: sample_time(),
            battery_level: "86 %".to_string(),
            odometer: "5600 km".to_string(),
        };

        assert_eq!(record.imei(), "860861040012977");
        assert_eq!(record.time(), sample_time());
        assert_eq!(record.instruction(), Instruction::DeviceInfo);
        assert_eq!(record.battery_level(), Some("86 %"));
        assert_eq!(record.odometer(), Some("5600 km"));
        assert!(record.errors().is_none());
    }

    #[test]
    fn test_error_accessors() {
        let record = DeviceRecord::Error {
            imei: "860861040012977".to_string(),
            time: sample_time(),
            errors: vec![ErrorEntry::new("7", "ECUFailure")],
        };

        assert_eq!(record.instruction(), Instruction::Error);
        assert!(record.battery_level().is_none());
        assert!(record.odometer().is_none());
        assert_eq!(record.errors(), Some(&[ErrorEntry::new("7", "ECUFailure")][..]));
    }

    #[test]
    fn test_malformed_error_message() {
        let err = DecoderError::malformed("+IN,Error$", "missing error count");
        assert_eq!(
            err.to_string(),
            "Malformed packet: missing error count in `+IN,Error$`"
        );
    }
}
