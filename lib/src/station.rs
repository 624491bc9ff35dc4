use serde::Serialize;

use crate::transport::IcyResponse;

/// Informational `icy-*` headers a station may send alongside `icy-metaint`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StationInfo {
    /// `icy-name`
    pub name: Option<String>,
    /// `icy-description`
    pub description: Option<String>,
    /// `icy-genre`
    pub genre: Option<String>,
    /// `icy-url`
    pub url: Option<String>,
    /// `icy-br`, in kbit/s
    pub bitrate: Option<u32>,
}

impl StationInfo {
    pub fn from_response<R>(response: &IcyResponse<R>) -> Self {
        let text = |name: &str| {
            response
                .header(name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };

        Self {
            name: text("icy-name"),
            description: text("icy-description"),
            genre: text("icy-genre"),
            url: text("icy-url"),
            // some servers send "128,128" for multiple streams
            bitrate: response
                .header("icy-br")
                .and_then(|v| v.split(',').next())
                .and_then(|v| v.trim().parse().ok()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(headers: &[(&str, &str)]) -> IcyResponse<std::io::Empty> {
        IcyResponse::new(
            headers
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            std::io::empty(),
        )
    }

    #[test]
    fn should_read_station_headers() {
        let info = StationInfo::from_response(&response(&[
            ("icy-name", "Radio Test"),
            ("ICY-Description", " late night jazz "),
            ("icy-genre", "Jazz"),
            ("icy-url", "http://radio.test"),
            ("icy-br", "128"),
        ]));

        assert_eq!(
            StationInfo {
                name: Some("Radio Test".to_string()),
                description: Some("late night jazz".to_string()),
                genre: Some("Jazz".to_string()),
                url: Some("http://radio.test".to_string()),
                bitrate: Some(128),
            },
            info
        );
    }

    #[test]
    fn should_ignore_missing_and_broken_headers() {
        let info = StationInfo::from_response(&response(&[("icy-name", ""), ("icy-br", "fast")]));

        assert!(info.is_empty());
    }

    #[test]
    fn should_take_first_bitrate() {
        let info = StationInfo::from_response(&response(&[("icy-br", "128,64")]));

        assert_eq!(Some(128), info.bitrate);
    }
}
