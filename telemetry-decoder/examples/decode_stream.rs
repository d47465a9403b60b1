//! Standalone telemetry stream decoder
//!
//! Decodes a file of tracker packets (or stdin) and prints one line per
//! record, either human readable or as JSON.
//!
//! Usage:
//!   decode_stream [<packets.txt>] [--json] [--utc-offset <secs>]
//!
//! Example:
//!   RUST_LOG=debug decode_stream packets.txt --json

use anyhow::Context;
use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use telemetry_decoder::{Decoder, DecoderConfig, DeviceRecord};

#[derive(Default)]
struct StreamStats {
    device_info_records: usize,
    error_records: usize,
    error_entries: usize,
    records_per_imei: HashMap<String, usize>,
}

impl StreamStats {
    fn record(&mut self, record: &DeviceRecord) {
        match record {
            DeviceRecord::DeviceInfo { .. } => self.device_info_records += 1,
            DeviceRecord::Error { errors, .. } => {
                self.error_records += 1;
                self.error_entries += errors.len();
            }
        }
        *self
            .records_per_imei
            .entry(record.imei().to_string())
            .or_insert(0) += 1;
    }

    fn print_summary(&self) {
        eprintln!("\n=== DECODING SUMMARY ===");
        eprintln!("DeviceInfo records: {}", self.device_info_records);
        eprintln!("Error records: {}", self.error_records);
        eprintln!("Error entries: {}", self.error_entries);
        eprintln!("Devices seen: {}", self.records_per_imei.len());
    }
}

fn print_record(record: &DeviceRecord) {
    match record {
        DeviceRecord::DeviceInfo {
            imei,
            time,
            battery_level,
            odometer,
        } => {
            println!("[{}] {} battery={} odometer={}", time, imei, battery_level, odometer);
        }
        DeviceRecord::Error { imei, time, errors } => {
            println!("[{}] {} {} error(s)", time, imei, errors.len());
            for entry in errors {
                println!("    {}: {}", entry.code, entry.description);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut input: Option<PathBuf> = None;
    let mut json = false;
    let mut config = DecoderConfig::new();

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => {
                json = true;
            }
            "--utc-offset" => {
                i += 1;
                if i < args.len() {
                    config = config.with_source_utc_offset(args[i].parse()?);
                }
            }
            other if input.is_none() => {
                input = Some(PathBuf::from(other));
            }
            other => {
                eprintln!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    log::info!("Telemetry decoder v{}", telemetry_decoder::VERSION);

    let decoder = Decoder::with_config(&config)?;
    let records = match &input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {:?}", path))?;
            decoder.decode_reader(file)?
        }
        None => decoder.decode_reader(io::stdin().lock())?,
    };

    let mut stats = StreamStats::default();
    for record in &records {
        stats.record(record);
        if json {
            println!("{}", serde_json::to_string(record)?);
        } else {
            print_record(record);
        }
    }

    stats.print_summary();

    Ok(())
}
