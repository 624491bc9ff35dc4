/**
 * MIT License
 *
 * termusic - Copyright (c) 2021 Larry Hao
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */
use clap::{builder::ArgPredicate, ArgAction, Parser, ValueEnum};
use icylisterlib::config::ListenerSettings;
use icylisterlib::sink::SinkFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
// mostly read from `Cargo.toml`
#[clap(name = "icylister", author, version, about, long_about=None)]
pub struct Args {
    /// HTTP url of the radio stream
    pub url: String,
    /// Output format, default is yaml.
    #[arg(short, long, env = "ICYLISTER_FORMAT")]
    pub format: Option<Format>,
    /// "User-Agent" to send, default is "VLC/2.2.4 LibVLC/2.2.4".
    #[arg(short, long, env = "ICYLISTER_USER_AGENT")]
    pub user_agent: Option<String>,
    /// Do not add a "_timestamp" field to the output.
    #[arg(long)]
    pub no_timestamp: bool,
    /// Only output this field, can be given multiple times. Default is all fields.
    #[arg(long = "field", value_name = "NAME")]
    pub fields: Vec<String>,
    /// Read settings from this toml file, arguments take precedence.
    #[arg(short, long, value_name = "FILE", env = "ICYLISTER_CONFIG")]
    pub config: Option<PathBuf>,
    #[clap(flatten)]
    pub log_options: LogOptions,
}

impl Args {
    /// Apply the arguments over settings read from a file (or the defaults)
    pub fn overlay(&self, mut settings: ListenerSettings) -> ListenerSettings {
        if let Some(format) = self.format {
            settings.format = format.into();
        }
        if let Some(user_agent) = &self.user_agent {
            settings.user_agent.clone_from(user_agent);
        }
        if self.no_timestamp {
            settings.timestamp = false;
        }
        if !self.fields.is_empty() {
            settings.fields.clone_from(&self.fields);
        }

        settings
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
}

impl From<Format> for SinkFormat {
    fn from(val: Format) -> SinkFormat {
        match val {
            Format::Yaml => SinkFormat::Yaml,
            Format::Json => SinkFormat::Json,
        }
    }
}

const DEFAULT_LOGFILE_FILENAME: &str = "icylister.log";

#[derive(Debug, Parser, Clone, PartialEq)]
pub struct LogOptions {
    /// Enable logging to a file,
    /// automatically enabled if "log-file" is manually set
    #[arg(
        long = "log-to-file",
        // automatically enable "log-to-file" if "log-file" is set, unless explicitly told not to
        default_value_if("log_file", ArgPredicate::IsPresent, "true"),
        default_value_t = false,
        // explicit arg action is required, otherwise it will not take any arguments like "=false" to disable file logging
        action = ArgAction::Set
    )]
    pub log_to_file: bool,

    /// Set logging file
    #[arg(long = "log-file", default_value_os_t = default_logfile_path(), env = "ICYLISTER_LOGFILE")]
    pub log_file: PathBuf,

    /// Use colored logging for files
    /// Example: live tailing via `tail -f /logfile`
    #[arg(long = "log-filecolor", env = "ICYLISTER_LOGFILE_COLOR")]
    pub file_color_log: bool,
}

fn default_logfile_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOGFILE_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn args_should_override_settings() {
        let args = Args::parse_from([
            "icylister",
            "http://radio.test/stream",
            "--format",
            "json",
            "--no-timestamp",
            "--field",
            "StreamTitle",
            "--field",
            "StreamUrl",
        ]);
        let from_file = ListenerSettings {
            user_agent: "file/1.0".to_string(),
            timestamp: true,
            fields: vec!["other".to_string()],
            format: SinkFormat::Yaml,
        };

        let settings = args.overlay(from_file);

        assert_eq!("http://radio.test/stream", args.url);
        assert_eq!(
            ListenerSettings {
                user_agent: "file/1.0".to_string(),
                timestamp: false,
                fields: vec!["StreamTitle".to_string(), "StreamUrl".to_string()],
                format: SinkFormat::Json,
            },
            settings
        );
    }

    #[test]
    fn no_args_keep_settings() {
        let args = Args::parse_from(["icylister", "http://radio.test/stream"]);

        assert_eq!(
            ListenerSettings::default(),
            args.overlay(ListenerSettings::default())
        );
        assert!(!args.log_options.log_to_file);
    }
}
