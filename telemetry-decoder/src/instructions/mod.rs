//! Per-instruction packet decoders
//!
//! Each submodule turns the fields of one instruction into a `DeviceRecord`.
//! Shared here: field lookup with a descriptive error and timestamp
//! normalization.

use chrono::{FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::types::{DecoderError, Result, Timestamp};

pub mod device_info;
pub mod error_list;

/// Wall-clock layout of packet timestamps (no zone designator)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Fetch a field by index, or fail with a `MalformedPacket` naming it
pub(crate) fn field<'a>(
    packet: &str,
    fields: &[&'a str],
    index: usize,
    name: &str,
) -> Result<&'a str> {
    fields
        .get(index)
        .copied()
        .ok_or_else(|| DecoderError::malformed(packet, format!("missing {} field", name)))
}

/// Parse a device wall-clock timestamp taken at `offset` and convert it to UTC
pub fn parse_timestamp(value: &str, offset: FixedOffset) -> Result<Timestamp> {
    let naive = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| {
        DecoderError::MalformedPacket(format!("invalid timestamp `{}`: {}", value, e))
    })?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| DecoderError::MalformedPacket(format!("ambiguous timestamp `{}`", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_subtracts_offset() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let ts = parse_timestamp("2021-01-14T15:05:10", offset).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2021, 1, 14, 14, 5, 10).unwrap());
    }

    #[test]
    fn test_parse_timestamp_crosses_midnight() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let ts = parse_timestamp("2021-01-01T00:30:00", offset).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2020, 12, 31, 23, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_other_layouts() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        for value in ["", "2021-01-14", "2021-01-14 15:05:10", "2021-01-14T15:05:10Z", "0035$"] {
            assert!(
                matches!(parse_timestamp(value, offset), Err(DecoderError::MalformedPacket(_))),
                "accepted {:?}",
                value
            );
        }
    }

    #[test]
    fn test_field_lookup() {
        let fields = ["+IN", "Error"];
        assert_eq!(field("+IN,Error$", &fields, 1, "instruction").unwrap(), "Error");
        let err = field("+IN,Error$", &fields, 2, "IMEI").unwrap_err();
        assert!(err.to_string().contains("missing IMEI field"));
    }
}
