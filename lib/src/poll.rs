//! Loop reading metadata from a stream and handing it to a [`MetadataSink`]

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use chrono::Local;

use crate::icy::{IcyStreamReader, MetadataMap};
use crate::sink::MetadataSink;

/// Name of the field added by [`PollOptions::timestamp`]
pub const TIMESTAMP_FIELD: &str = "_timestamp";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollOptions {
    /// Add the local time the metadata was received as [`TIMESTAMP_FIELD`]
    pub timestamp: bool,
    /// Only keep these fields, keep everything if empty
    pub fields: Vec<String>,
}

impl PollOptions {
    /// Filter and enrich `metadata`, returns [`None`] if nothing is left to output
    fn apply(&self, mut metadata: MetadataMap) -> Option<MetadataMap> {
        if !self.fields.is_empty() {
            metadata.retain(|tag, _| self.fields.iter().any(|v| v == tag));
        }

        if metadata.is_empty() {
            return None;
        }

        if self.timestamp {
            metadata.insert(TIMESTAMP_FIELD, Local::now().format(TIMESTAMP_FORMAT).to_string());
        }

        Some(metadata)
    }
}

/// Read metadata until `stop` is set, giving every new block to `sink`
///
/// Returns `Ok` once stopped, stream and sink errors are returned as-is.
/// A stream error that arrives after `stop` was set (like a read timing out on a stalled
/// server) ends the loop like a normal stop.
/// This does not close the reader.
pub fn poll<R: Read>(
    reader: &mut IcyStreamReader<R>,
    sink: &mut dyn MetadataSink,
    options: &PollOptions,
    stop: &AtomicBool,
) -> Result<()> {
    loop {
        let metadata = match reader.next_metadata_until(stop) {
            Ok(Some(metadata)) => metadata,
            Ok(None) => break,
            Err(err) if stop.load(Ordering::SeqCst) => {
                debug!("Ignoring stream error after stop: {err}");
                break;
            }
            Err(err) => return Err(err.into()),
        };

        let Some(metadata) = options.apply(metadata) else {
            debug!("No requested fields in metadata, skipping");
            continue;
        };

        sink.emit(&metadata)?;
    }

    info!("Stopped polling");

    Ok(())
}
