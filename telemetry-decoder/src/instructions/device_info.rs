//! `DeviceInfo` packets
//!
//! Fixed layout:
//! `+<CMD>,DeviceInfo,<IMEI>,<BatteryPct>,<OdometerKm>,<Timestamp>,<SeqCounter>$`

use chrono::FixedOffset;

use super::{field, parse_timestamp};
use crate::packet::IMEI_FIELD;
use crate::types::{DeviceRecord, Result};

const BATTERY_FIELD: usize = 3;
const ODOMETER_FIELD: usize = 4;
const TIMESTAMP_FIELD: usize = 5;

/// Decode the fields of a `DeviceInfo` packet
///
/// Battery and odometer values are carried verbatim with their unit
/// appended; they are not checked to be numeric.
pub fn decode(packet: &str, fields: &[&str], offset: FixedOffset) -> Result<DeviceRecord> {
    let imei = field(packet, fields, IMEI_FIELD, "IMEI")?;
    let battery = field(packet, fields, BATTERY_FIELD, "battery")?;
    let odometer = field(packet, fields, ODOMETER_FIELD, "odometer")?;
    let time = parse_timestamp(field(packet, fields, TIMESTAMP_FIELD, "timestamp")?, offset)?;

    Ok(DeviceRecord::DeviceInfo {
        imei: imei.to_string(),
        time,
        battery_level: format!("{} %", battery),
        odometer: format!("{} km", odometer),
    })
}
