//! `Error` packets
//!
//! Variable layout:
//! `+<CMD>,Error,<IMEI>,<N>,<code1>,<desc1>,...,<codeN>,<descN>,<Timestamp>,<SeqCounter>$`
//!
//! The pairs are read forward from index 4; the timestamp and sequence
//! counter are always the last two fields, whatever sits in between.

use chrono::FixedOffset;

use super::{field, parse_timestamp};
use crate::packet::IMEI_FIELD;
use crate::types::{DecoderError, DeviceRecord, ErrorEntry, Result};

const COUNT_FIELD: usize = 3;
const FIRST_PAIR_FIELD: usize = 4;
/// Timestamp and sequence counter
const TRAILER_FIELDS: usize = 2;

/// Decode the fields of an `Error` packet
///
/// The declared count must be at least one and its pairs must fit before
/// the trailer; anything else is a `MalformedPacket`.
pub fn decode(packet: &str, fields: &[&str], offset: FixedOffset) -> Result<DeviceRecord> {
    let imei = field(packet, fields, IMEI_FIELD, "IMEI")?;
    let raw_count = field(packet, fields, COUNT_FIELD, "error count")?;
    let count: usize = raw_count.parse().map_err(|_| {
        DecoderError::malformed(packet, format!("non-numeric error count `{}`", raw_count))
    })?;
    if count == 0 {
        return Err(DecoderError::malformed(packet, "error count of zero"));
    }

    // Timestamp and counter come off the end before the pairs are walked
    let trailer_start = fields
        .len()
        .checked_sub(TRAILER_FIELDS)
        .ok_or_else(|| DecoderError::malformed(packet, "missing timestamp field"))?;
    let pairs_end = count
        .checked_mul(2)
        .and_then(|n| n.checked_add(FIRST_PAIR_FIELD))
        .filter(|end| *end <= trailer_start)
        .ok_or_else(|| {
            DecoderError::malformed(
                packet,
                format!("declared {} errors but only {} fields", count, fields.len()),
            )
        })?;

    let time = parse_timestamp(fields[trailer_start], offset)?;
    // fields[trailer_start + 1] is the sequence counter, which is not kept

    let errors = fields[FIRST_PAIR_FIELD..pairs_end]
        .chunks_exact(2)
        .map(|pair| ErrorEntry::new(pair[0], pair[1]))
        .collect();

    Ok(DeviceRecord::Error {
        imei: imei.to_string(),
        time,
        errors,
    })
}
