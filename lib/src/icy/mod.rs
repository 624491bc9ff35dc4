//! Read ICY (SHOUTcast / Icecast) in-band metadata from a audio stream.
//!
//! The body of such a stream repeats `[icy-metaint bytes of audio][1 length byte][length * 16 bytes of metadata]`,
//! where the metadata is NUL padded Windows-1252 text like `StreamTitle='Artist - Title';`.
//!
//! Some radio open streams to test:
//! - <https://live.musopen.org:8085/streamvbr0>, at the time of writing "icy-metaint" is "1600" and actually sets titles
//! - <http://war.str3am.com:7780/WUISRIS-2>, at the time of writing "icy-metaint" is "1600" and does not set titles (empty titles or 0 metadata)
//!
//! extra icy resources
//! - <https://cast.readme.io/docs/icy#metadata>
//! - <http://www.smackfu.com/stuff/programming/shoutcast.html>

use std::io::{self, Read};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::station::StationInfo;
use crate::transport::{Connector, IcyResponse, UreqBody, UreqConnector};

mod encoding;
mod error;
mod parser;

pub use encoding::{decode_windows_1252, encode_windows_1252};
pub use error::{CycleStage, IcyError};
pub use parser::{parse_metadata, MetadataMap};

/// Default "User-Agent", some servers only send metadata to players they know
pub const DEFAULT_USER_AGENT: &str = "VLC/2.2.4 LibVLC/2.2.4";

/// Request header telling the server we can handle in-band metadata
const REQUEST_METADATA_HEADER: &str = "Icy-MetaData";
/// Response header with the amount of audio bytes between metadata blocks
const META_INTERVAL_HEADER: &str = "icy-metaint";
/// The length byte counts in steps of this
const METADATA_LENGTH_UNIT: usize = 16;

/// Owns a open stream and reads the metadata blocks out of it, discarding the audio
pub struct IcyStreamReader<R: Read> {
    /// The body, [`None`] once closed or after a fatal read error
    stream: Option<R>,
    /// The "icy-metaint" header's value
    meta_interval: NonZeroUsize,
    station: StationInfo,
}

impl IcyStreamReader<UreqBody> {
    /// Open `url` over HTTP, using [`DEFAULT_USER_AGENT`] if `user_agent` is [`None`]
    pub fn open(url: &str, user_agent: Option<&str>) -> Result<Self, IcyError> {
        Self::open_with(&UreqConnector::new(), url, user_agent)
    }
}

impl<R: Read> IcyStreamReader<R> {
    /// Open `url` with a custom [`Connector`]
    pub fn open_with<C: Connector<Body = R>>(
        connector: &C,
        url: &str,
        user_agent: Option<&str>,
    ) -> Result<Self, IcyError> {
        let user_agent = user_agent.unwrap_or(DEFAULT_USER_AGENT);
        info!("Opening stream {url:?} as {user_agent:?}");

        let response = connector.connect(
            url,
            &[(REQUEST_METADATA_HEADER, "1"), ("User-Agent", user_agent)],
        )?;

        Self::from_response(response)
    }

    /// Create a reader from a already opened response
    ///
    /// Fails with [`IcyError::Protocol`] without reading any of the body if the response has no valid "icy-metaint".
    pub fn from_response(response: IcyResponse<R>) -> Result<Self, IcyError> {
        let meta_interval = parse_meta_interval(response.header(META_INTERVAL_HEADER))?;
        let station = StationInfo::from_response(&response);
        info!("Stream has metadata every {meta_interval} bytes");

        Ok(Self {
            stream: Some(response.into_body()),
            meta_interval,
            station,
        })
    }

    pub fn meta_interval(&self) -> NonZeroUsize {
        self.meta_interval
    }

    /// The station headers sent when opening
    pub fn station(&self) -> &StationInfo {
        &self.station
    }

    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Read exactly one cycle of audio and metadata
    ///
    /// Returns [`None`] if the server did not send metadata this cycle (the metadata has not changed).
    /// Any error leaves the stream at a unknown position, so the reader is closed afterwards.
    pub fn read_one_cycle(&mut self) -> Result<Option<MetadataMap>, IcyError> {
        let res = self.read_cycle();

        if let Err(err) = &res {
            if self.stream.take().is_some() {
                warn!("Closing stream after error: {err}");
            }
        }

        res
    }

    fn read_cycle(&mut self) -> Result<Option<MetadataMap>, IcyError> {
        let meta_interval = self.meta_interval.get();
        let stream = self.stream.as_mut().ok_or(IcyError::InvalidState)?;

        // eat the audio
        skip_exact(stream, meta_interval)?;

        let mut length = [0; 1];
        read_exact_or_truncated(stream, &mut length, CycleStage::LengthByte)?;
        let length = usize::from(length[0]) * METADATA_LENGTH_UNIT;
        trace!("ICY METADATA LENGTH {}", length);

        // dont try to do any metadata parsing if there is none
        if length == 0 {
            return Ok(None);
        }

        let mut block = vec![0; length];
        read_exact_or_truncated(stream, &mut block, CycleStage::MetadataBlock)?;

        // blocks are padded to the next 16 bytes with NUL
        block.retain(|v| *v != 0);
        let text = decode_windows_1252(&block);
        debug!("Metadata block {text:?}");

        Ok(Some(parse_metadata(&text)))
    }

    /// Read cycles until a block with at least one tag arrives
    ///
    /// This blocks for as long as the server does not change its metadata.
    pub fn next_metadata(&mut self) -> Result<MetadataMap, IcyError> {
        loop {
            if let Some(metadata) = self.read_one_cycle()? {
                if !metadata.is_empty() {
                    return Ok(metadata);
                }
            }
        }
    }

    /// Like [`next_metadata`](Self::next_metadata), but returns [`None`] once `stop` is set
    ///
    /// `stop` is checked before every cycle, a cycle in progress is always finished.
    pub fn next_metadata_until(
        &mut self,
        stop: &AtomicBool,
    ) -> Result<Option<MetadataMap>, IcyError> {
        if self.is_closed() {
            return Err(IcyError::InvalidState);
        }

        while !stop.load(Ordering::SeqCst) {
            if let Some(metadata) = self.read_one_cycle()? {
                if !metadata.is_empty() {
                    return Ok(Some(metadata));
                }
            }
        }

        Ok(None)
    }

    /// Drop the stream, all further reads fail with [`IcyError::InvalidState`]
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            debug!("Stream closed");
        }
    }
}

/// Parse the "icy-metaint" header value, which has to be a positive integer
fn parse_meta_interval(value: Option<&str>) -> Result<NonZeroUsize, IcyError> {
    let Some(value) = value else {
        return Err(IcyError::Protocol(format!(
            "metadata not supported by this source, no \"{META_INTERVAL_HEADER}\" header"
        )));
    };

    value.trim().parse::<NonZeroUsize>().map_err(|_| {
        IcyError::Protocol(format!(
            "invalid \"{META_INTERVAL_HEADER}\" value {value:?}, expected a positive integer"
        ))
    })
}

/// Read and discard exactly `count` bytes
fn skip_exact<R: Read>(stream: &mut R, count: usize) -> Result<(), IcyError> {
    let mut limited = stream.take(count as u64);
    let skipped = io::copy(&mut limited, &mut io::sink())?;

    if skipped < count as u64 {
        return Err(IcyError::StreamTruncated {
            stage: CycleStage::Audio,
            expected: count,
        });
    }

    Ok(())
}

fn read_exact_or_truncated<R: Read>(
    stream: &mut R,
    buf: &mut [u8],
    stage: CycleStage,
) -> Result<(), IcyError> {
    match stream.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Err(IcyError::StreamTruncated {
            stage,
            expected: buf.len(),
        }),
        Err(err) => Err(err.into()),
    }
}
