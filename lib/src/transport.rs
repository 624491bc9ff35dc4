//! The HTTP side of a ICY stream: send the request headers, get back the response headers and a readable body

use std::io::Read;
use std::time::Duration;

use ureq::{Agent, AgentBuilder};

use crate::icy::IcyError;

/// A opened response: headers and the not-yet-read body
pub struct IcyResponse<R> {
    headers: Vec<(String, String)>,
    body: R,
}

impl<R> IcyResponse<R> {
    pub fn new(headers: Vec<(String, String)>, body: R) -> Self {
        Self { headers, body }
    }

    /// Case-insensitive header lookup, first match wins
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn into_body(self) -> R {
        self.body
    }
}

/// Something that can open a url and hand back a [`IcyResponse`]
pub trait Connector {
    type Body: Read;

    /// Issue a GET request to `url` with the given extra request headers
    fn connect(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<IcyResponse<Self::Body>, IcyError>;
}

/// Body type returned by [`UreqConnector`]
pub type UreqBody = Box<dyn Read + Send + Sync + 'static>;

/// Default [`Connector`], using a blocking [`ureq`] agent
///
/// Note that servers answering with a non-HTTP status line (`ICY 200 OK`) are not supported.
#[derive(Clone)]
pub struct UreqConnector {
    agent: Agent,
}

impl UreqConnector {
    pub fn new() -> Self {
        let agent = AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(Duration::from_secs(20))
            .build();

        Self { agent }
    }

    /// Use a already configured agent (proxy, timeouts, etc)
    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for UreqConnector {
    type Body = UreqBody;

    fn connect(&self, url: &str, headers: &[(&str, &str)]) -> Result<IcyResponse<UreqBody>, IcyError> {
        let mut request = self.agent.get(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        // non-2xx status codes are also returned as errors by ureq
        let response = request
            .call()
            .map_err(|err| IcyError::Transport(err.to_string()))?;

        debug!(
            "Connected to {:?}, status {} {}",
            response.get_url(),
            response.status(),
            response.status_text()
        );

        let headers = response
            .headers_names()
            .into_iter()
            .filter_map(|name| {
                let value = response.header(&name)?.to_string();
                Some((name, value))
            })
            .collect();

        Ok(IcyResponse::new(headers, response.into_reader()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_lookup_should_ignore_case() {
        let response = IcyResponse::new(
            vec![
                ("Content-Type".to_string(), "audio/mpeg".to_string()),
                ("icy-metaint".to_string(), "16000".to_string()),
            ],
            std::io::empty(),
        );

        assert_eq!(Some("16000"), response.header("Icy-MetaInt"));
        assert_eq!(Some("16000"), response.header("ICY-METAINT"));
        assert_eq!(Some("audio/mpeg"), response.header("content-type"));
        assert_eq!(None, response.header("icy-name"));
    }
}
