use std::fmt::Display;

/// The framing step of a cycle that was being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStage {
    /// Skipping the audio bytes before a metadata block
    Audio,
    /// The single byte announcing the metadata block length
    LengthByte,
    /// The metadata block itself
    MetadataBlock,
}

impl Display for CycleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let res = match self {
            CycleStage::Audio => "audio",
            CycleStage::LengthByte => "metadata length byte",
            CycleStage::MetadataBlock => "metadata block",
        };

        write!(f, "{res}")
    }
}

/// Errors for opening and reading a ICY stream
#[derive(Debug, thiserror::Error)]
pub enum IcyError {
    /// The source does not support in-band metadata or announced a broken interval
    #[error("Protocol error: {0}")]
    Protocol(String),
    /// The stream ended before a framing step could be completed, byte alignment is lost
    #[error("Stream ended while reading {stage}, expected {expected} bytes")]
    StreamTruncated { stage: CycleStage, expected: usize },
    /// The reader was used after it was closed (or after a fatal read error)
    #[error("Reader is closed")]
    InvalidState,
    /// The connection could not be established
    #[error("Transport error: {0}")]
    Transport(String),
    /// Reading the body failed for a reason other than ending early
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
