//! Packet field splitting and instruction dispatch
//!
//! A framed packet is a comma separated list of fields:
//! `+<CMD>,<Instruction>,<IMEI>,...,<Timestamp>,<SeqCounter>$`.
//! Field 1 selects the decoder; everything after it is decoder specific.

use chrono::FixedOffset;
use std::fmt;
use std::str::FromStr;

use crate::instructions::{device_info, error_list};
use crate::types::{DecoderError, DeviceRecord, Result};

/// Separates fields inside a packet
pub const FIELD_SEPARATOR: char = ',';

/// Index of the command code (unused by the decoders)
pub const COMMAND_FIELD: usize = 0;
/// Index of the instruction name
pub const INSTRUCTION_FIELD: usize = 1;
/// Index of the device identifier
pub const IMEI_FIELD: usize = 2;

/// Packet instruction - selects how the remaining fields are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Battery and odometer snapshot
    DeviceInfo,
    /// Count-prefixed list of fault codes
    Error,
}

impl Instruction {
    /// Wire name of the instruction
    pub fn as_str(&self) -> &'static str {
        match self {
            Instruction::DeviceInfo => "DeviceInfo",
            Instruction::Error => "Error",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Instruction {
    type Err = DecoderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DeviceInfo" => Ok(Instruction::DeviceInfo),
            "Error" => Ok(Instruction::Error),
            other => Err(DecoderError::UnrecognizedInstruction(other.to_string())),
        }
    }
}

/// Split a packet into its fields, strictly on commas, without trimming
pub fn split_fields(packet: &str) -> Vec<&str> {
    packet.split(FIELD_SEPARATOR).collect()
}

/// Decode one framed packet into a record
///
/// `offset` is the UTC offset the device stamped the packet with.
pub fn decode_packet(packet: &str, offset: FixedOffset) -> Result<DeviceRecord> {
    let fields = split_fields(packet);

    let instruction: Instruction = fields
        .get(INSTRUCTION_FIELD)
        .ok_or_else(|| DecoderError::malformed(packet, "missing instruction field"))?
        .parse()?;

    log::trace!("Decoding {} packet: {}", instruction, packet);

    match instruction {
        Instruction::DeviceInfo => device_info::decode(packet, &fields, offset),
        Instruction::Error => error_list::decode(packet, &fields, offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc_plus_one() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    #[test]
    fn test_split_fields_no_trimming() {
        let fields = split_fields(" +IN, DeviceInfo,,x$");
        assert_eq!(fields, vec![" +IN", " DeviceInfo", "", "x$"]);
        assert_eq!(fields[COMMAND_FIELD], " +IN");
    }

    #[test]
    fn test_instruction_parse_and_display() {
        assert_eq!("DeviceInfo".parse::<Instruction>().unwrap(), Instruction::DeviceInfo);
        assert_eq!("Error".parse::<Instruction>().unwrap(), Instruction::Error);
        assert_eq!(Instruction::DeviceInfo.to_string(), "DeviceInfo");

        // Matching is exact and case sensitive
        match "error".parse::<Instruction>() {
            Err(DecoderError::UnrecognizedInstruction(value)) => assert_eq!(value, "error"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_device_info() {
        let record = decode_packet(
            "+IN,DeviceInfo,860861040012977,86,5600,2021-01-14T15:05:10,0035$",
            utc_plus_one(),
        )
        .unwrap();
        assert_eq!(record.instruction(), Instruction::DeviceInfo);
    }

    #[test]
    fn test_dispatch_error() {
        let record = decode_packet(
            "+IN,Error,860861040012977,1,7,ECUFailure,2021-01-14T15:09:18,0037$",
            utc_plus_one(),
        )
        .unwrap();
        assert_eq!(record.instruction(), Instruction::Error);
    }

    #[test]
    fn test_dispatch_unrecognized_instruction() {
        let result = decode_packet("+IN,Ping,860861040012977,2021-01-14T15:09:18,0037$", utc_plus_one());
        match result {
            Err(DecoderError::UnrecognizedInstruction(value)) => assert_eq!(value, "Ping"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_missing_instruction() {
        let result = decode_packet("+IN$", utc_plus_one());
        assert!(matches!(result, Err(DecoderError::MalformedPacket(_))));
    }
}
