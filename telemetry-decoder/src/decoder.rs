//! Main decoder API
//!
//! This module provides the primary interface for the decoder library.
//! The Decoder drains a text source into one buffer, cuts it into packets and
//! decodes them in order. Output is returned all at once: a fatal packet
//! error discards every record decoded before it.

use chrono::FixedOffset;
use std::io::Read;

use crate::config::DecoderConfig;
use crate::framing::{is_packet, split_packets};
use crate::packet::decode_packet;
use crate::types::{DeviceRecord, Result};

/// The main decoder struct - entry point for all decoding operations
///
/// Immutable once built; every decode call is independent of the others.
#[derive(Debug, Clone)]
pub struct Decoder {
    /// Offset the devices stamp their packets with
    source_offset: FixedOffset,
}

impl Decoder {
    /// Create a decoder for the default protocol settings (UTC+1 timestamps)
    pub fn new() -> Self {
        Self {
            source_offset: crate::config::default_source_offset(),
        }
    }

    /// Create a decoder from an explicit configuration
    ///
    /// # Example
    /// ```no_run
    /// use telemetry_decoder::{Decoder, DecoderConfig};
    ///
    /// let decoder = Decoder::with_config(&DecoderConfig::new()).unwrap();
    /// ```
    pub fn with_config(config: &DecoderConfig) -> Result<Self> {
        Ok(Self {
            source_offset: config.source_offset()?,
        })
    }

    /// Offset applied to packet timestamps
    pub fn source_offset(&self) -> FixedOffset {
        self.source_offset
    }

    /// Decode everything a reader yields until it is exhausted
    ///
    /// Blocks until the reader reports end of input. The source must be valid
    /// UTF-8; anything else fails with `DecoderError::IoError`.
    ///
    /// # Example
    /// ```no_run
    /// use telemetry_decoder::Decoder;
    /// use std::fs::File;
    ///
    /// let decoder = Decoder::new();
    /// let records = decoder.decode_reader(File::open("packets.txt").unwrap()).unwrap();
    /// for record in records {
    ///     println!("{} at {}", record.imei(), record.time());
    /// }
    /// ```
    pub fn decode_reader<R: Read>(&self, mut reader: R) -> Result<Vec<DeviceRecord>> {
        let mut payload = String::new();
        reader.read_to_string(&mut payload)?;
        log::debug!("Read {} bytes from telemetry source", payload.len());

        self.decode_str(&payload)
    }

    /// Decode a source delivered as a sequence of text chunks
    ///
    /// Chunks are concatenated before decoding, so a packet may be split
    /// across any number of them.
    pub fn decode_chunks<I, S>(&self, chunks: I) -> Result<Vec<DeviceRecord>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let payload: String = chunks.into_iter().fold(String::new(), |mut acc, chunk| {
            acc.push_str(chunk.as_ref());
            acc
        });
        log::debug!("Assembled {} bytes from telemetry chunks", payload.len());

        self.decode_str(&payload)
    }

    /// Decode a fully buffered payload
    pub fn decode_str(&self, payload: &str) -> Result<Vec<DeviceRecord>> {
        let records = self
            .records(payload)
            .collect::<Result<Vec<_>>>()
            .inspect_err(|e| log::warn!("Aborting decode: {}", e))?;

        log::debug!("Decoded {} telemetry records", records.len());
        Ok(records)
    }

    /// Lazily decode a buffered payload, one item per framed packet
    ///
    /// Unframed lines are skipped without producing an item. Callers that
    /// stop at the first error get the same all-or-nothing behaviour as
    /// `decode_str`.
    pub fn records<'a>(
        &'a self,
        payload: &'a str,
    ) -> impl Iterator<Item = Result<DeviceRecord>> + 'a {
        split_packets(payload)
            .filter(|candidate| is_packet(candidate))
            .map(move |packet| decode_packet(packet, self.source_offset))
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a telemetry source with the default protocol settings
///
/// # Example
/// ```no_run
/// let records = telemetry_decoder::decode(std::io::stdin()).unwrap();
/// ```
pub fn decode<R: Read>(reader: R) -> Result<Vec<DeviceRecord>> {
    Decoder::new().decode_reader(reader)
}
