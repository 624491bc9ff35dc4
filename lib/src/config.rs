use std::path::Path;

use anyhow::Result;
use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::icy::DEFAULT_USER_AGENT;
use crate::sink::SinkFormat;

/// Settings for listening to a stream, read from a optional toml file
///
/// Example:
/// ```toml
/// user_agent = "VLC/2.2.4 LibVLC/2.2.4"
/// timestamp = true
/// fields = ["StreamTitle"]
/// format = "json"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)] // allow missing fields and fill them with the `..Self::default()` in this struct
pub struct ListenerSettings {
    /// "User-Agent" to send to the server
    pub user_agent: String,
    /// Add a `_timestamp` field to every metadata output
    pub timestamp: bool,
    /// Only output these fields, all fields if empty
    pub fields: Vec<String>,
    /// Output format
    pub format: SinkFormat,
}

impl Default for ListenerSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timestamp: true,
            fields: Vec::new(),
            format: SinkFormat::default(),
        }
    }
}

impl ListenerSettings {
    /// Read a config file, needs to be toml formatted
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::extract(Figment::new().merge(Toml::file(path)))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let data: Self = figment.extract()?;

        Ok(data)
    }
}
