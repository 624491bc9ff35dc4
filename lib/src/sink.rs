//! Output targets for parsed metadata

use std::io::Write;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use yaml_rust::yaml::Hash;
use yaml_rust::{Yaml, YamlEmitter};

use crate::icy::MetadataMap;

/// Something that gets handed every new [`MetadataMap`]
pub trait MetadataSink {
    fn emit(&mut self, metadata: &MetadataMap) -> Result<()>;
}

/// Print every block as its own YAML document
///
/// Values that would not be plain YAML scalars (like a title containing `: `) are quoted.
///
/// Example:
/// ```txt
/// ---
/// StreamTitle: Artist - Title
/// _timestamp: "2023-01-01 12:00:00.000000"
/// ```
pub struct YamlSink<W: Write> {
    writer: W,
}

impl<W: Write> YamlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> MetadataSink for YamlSink<W> {
    fn emit(&mut self, metadata: &MetadataMap) -> Result<()> {
        let doc = Yaml::Hash(
            metadata
                .iter()
                .map(|(tag, value)| {
                    (
                        Yaml::String(tag.to_string()),
                        Yaml::String(value.to_string()),
                    )
                })
                .collect::<Hash>(),
        );

        let mut out = String::new();
        YamlEmitter::new(&mut out)
            .dump(&doc)
            .map_err(|err| anyhow!("Failed to write metadata as yaml: {err:?}"))?;
        out.push('\n');

        self.writer.write_all(out.as_bytes())?;
        self.writer.flush()?;

        Ok(())
    }
}

/// Print one JSON object per line
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> MetadataSink for JsonSink<W> {
    fn emit(&mut self, metadata: &MetadataMap) -> Result<()> {
        serde_json::to_writer(&mut self.writer, metadata)?;
        writeln!(self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}

/// The available output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkFormat {
    #[default]
    Yaml,
    Json,
}

impl SinkFormat {
    /// Create the sink for this format, writing to `writer`
    pub fn sink<'a, W: Write + 'a>(self, writer: W) -> Box<dyn MetadataSink + 'a> {
        match self {
            SinkFormat::Yaml => Box::new(YamlSink::new(writer)),
            SinkFormat::Json => Box::new(JsonSink::new(writer)),
        }
    }
}
