//! Telemetry Packet Decoder Library
//!
//! A stateless library for decoding the delimited text packets that vehicle
//! trackers emit into typed device records.
//!
//! # Architecture
//!
//! The pipeline is a straight line:
//! - The whole source is read into one buffer
//! - The buffer is cut into candidate packets on line feeds and `$+` boundaries
//! - Candidates without `+...$` framing are dropped as noise
//! - Each packet is split on commas and dispatched on its instruction field
//! - `DeviceInfo` and `Error` packets are decoded into `DeviceRecord`s
//!
//! The library does NOT:
//! - Open files, sockets or other sources (callers hand in a reader)
//! - Stream records incrementally (results are all or nothing)
//! - Report or count dropped noise lines
//!
//! # Example Usage
//!
//! ```no_run
//! use telemetry_decoder::{Decoder, DeviceRecord};
//!
//! let payload = "+IN,DeviceInfo,860861040012977,86,5600,2021-01-14T15:05:10,0035$\n\
//!                +IN,Error,860861040012977,1,7,ECUFailure,2021-01-14T15:09:18,0037$";
//!
//! let records = Decoder::new().decode_str(payload).unwrap();
//!
//! for record in &records {
//!     match record {
//!         DeviceRecord::DeviceInfo { battery_level, odometer, .. } => {
//!             println!("{}: {} / {}", record.imei(), battery_level, odometer);
//!         }
//!         DeviceRecord::Error { errors, .. } => {
//!             println!("{}: {} errors at {}", record.imei(), errors.len(), record.time());
//!         }
//!     }
//! }
//! ```

// Public modules
pub mod config;
pub mod decoder;
pub mod framing;
pub mod packet;
pub mod types;

// Re-export main types for convenience
pub use config::{DecoderConfig, SOURCE_UTC_OFFSET_SECS};
pub use decoder::{decode, Decoder};
pub use packet::Instruction;
pub use types::{DecoderError, DeviceRecord, ErrorEntry, Result, Timestamp};

// Internal modules (not exposed in public API)
mod instructions;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
