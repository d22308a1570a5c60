//! Connection settings and URL construction for the content server adapter.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use super::error::ContentServerError;

/// Port that is left implicit in built URLs.
pub const IMPLICIT_PORT: u16 = 443;
/// Default REST base path.
pub const DEFAULT_BASE_PATH: &str = "/cs/cs";
/// Default document creation endpoint, relative to the base path.
pub const DEFAULT_CREATION_PATH: &str = "/api/v1/documents";
/// Default response key carrying a created document's identifier.
pub const DEFAULT_CREATION_RESULTS_KEY: &str = "document_id";
/// Default response key for generic requests.
pub const DEFAULT_RESULTS_KEY: &str = "results";
/// Authentication endpoint, relative to the base path.
pub const AUTH_PATH: &str = "/api/v1/auth";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// URL scheme used to reach the content server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Protocol {
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    #[default]
    Https,
}

impl Protocol {
    /// Return the URL scheme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ContentServerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(ContentServerError::invalid_configuration(format!(
                "protocol must be http or https, got {other:?}"
            ))),
        }
    }
}

/// Validated content server connection settings.
///
/// # Examples
///
/// ```
/// use content_loader::outbound::content_server::{ContentServerConfig, Protocol};
///
/// let config = ContentServerConfig::new("cs.example.com")
///     .expect("hostname is valid")
///     .with_protocol(Protocol::Http)
///     .with_port(8080)
///     .expect("port is valid");
///
/// assert_eq!(
///     config.url_for("/api/v1/nodes").expect("url builds").as_str(),
///     "http://cs.example.com:8080/cs/cs/api/v1/nodes"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentServerConfig {
    protocol: Protocol,
    hostname: String,
    port: u16,
    base_path: String,
    timeout: Duration,
    creation_path: String,
    creation_results_key: String,
}

impl ContentServerConfig {
    /// Build settings for `hostname` with every other value defaulted.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServerError::InvalidConfiguration`] when the hostname
    /// is blank or contains URL delimiters.
    pub fn new(hostname: impl Into<String>) -> Result<Self, ContentServerError> {
        let raw: String = hostname.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ContentServerError::invalid_configuration(
                "hostname is required",
            ));
        }
        if trimmed.contains(['/', ':', '?', '#', '@']) {
            return Err(ContentServerError::invalid_configuration(format!(
                "hostname {trimmed:?} must not contain a scheme, port, or path"
            )));
        }

        Ok(Self {
            protocol: Protocol::default(),
            hostname: trimmed.to_owned(),
            port: IMPLICIT_PORT,
            base_path: DEFAULT_BASE_PATH.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            creation_path: DEFAULT_CREATION_PATH.to_owned(),
            creation_results_key: DEFAULT_CREATION_RESULTS_KEY.to_owned(),
        })
    }

    /// Set the URL scheme.
    #[must_use]
    pub const fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Set the port.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServerError::InvalidConfiguration`] when `port` is 0.
    pub fn with_port(mut self, port: u16) -> Result<Self, ContentServerError> {
        if port == 0 {
            return Err(ContentServerError::invalid_configuration(
                "port must be greater than 0",
            ));
        }
        self.port = port;
        Ok(self)
    }

    /// Set the REST base path. A leading slash is added when missing and
    /// trailing slashes are dropped.
    #[must_use]
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = normalise_path(base_path);
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the document creation endpoint, relative to the base path.
    #[must_use]
    pub fn with_creation_path(mut self, creation_path: &str) -> Self {
        self.creation_path = normalise_path(creation_path);
        self
    }

    /// Set the response key carrying a created document's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServerError::InvalidConfiguration`] when `key` is
    /// blank.
    pub fn with_creation_results_key(
        mut self,
        key: impl Into<String>,
    ) -> Result<Self, ContentServerError> {
        let results_key: String = key.into();
        if results_key.trim().is_empty() {
            return Err(ContentServerError::invalid_configuration(
                "creation results key must not be empty",
            ));
        }
        self.creation_results_key = results_key;
        Ok(self)
    }

    /// Return the URL scheme.
    #[must_use]
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Return the hostname.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Return the port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Return the REST base path.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Return the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Return the document creation endpoint.
    #[must_use]
    pub fn creation_path(&self) -> &str {
        &self.creation_path
    }

    /// Return the response key carrying a created document's identifier.
    #[must_use]
    pub fn creation_results_key(&self) -> &str {
        &self.creation_results_key
    }

    /// Return the origin and base path, e.g. `https://host/cs/cs`.
    ///
    /// The port is omitted when it is 443 and included otherwise.
    #[must_use]
    pub fn base_url(&self) -> String {
        let Self {
            protocol,
            hostname,
            port,
            base_path,
            ..
        } = self;
        if *port == IMPLICIT_PORT {
            format!("{protocol}://{hostname}{base_path}")
        } else {
            format!("{protocol}://{hostname}:{port}{base_path}")
        }
    }

    /// Build the full URL for an endpoint path relative to the base path.
    ///
    /// Parsing normalises a port equal to the scheme default away, so `http`
    /// on port 80 yields `http://host/...` even though [`Self::base_url`]
    /// spells out `:80`. Both address the same endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServerError::InvalidConfiguration`] when the result
    /// is not a valid URL.
    pub fn url_for(&self, path: &str) -> Result<Url, ContentServerError> {
        let raw = format!("{}{}", self.base_url(), normalise_path(path));
        Url::parse(&raw).map_err(|error| {
            ContentServerError::invalid_configuration(format!("invalid URL {raw:?}: {error}"))
        })
    }
}

fn normalise_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration validation and URL building.

    use rstest::rstest;

    use super::*;

    fn config() -> ContentServerConfig {
        ContentServerConfig::new("cs.example.com").expect("valid hostname")
    }

    #[test]
    fn defaults_follow_content_server_conventions() {
        let config = config();

        assert_eq!(config.protocol(), Protocol::Https);
        assert_eq!(config.port(), 443);
        assert_eq!(config.base_path(), "/cs/cs");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.creation_path(), "/api/v1/documents");
        assert_eq!(config.creation_results_key(), "document_id");
    }

    #[rstest]
    #[case::implicit_https(Protocol::Https, 443, "https://cs.example.com/cs/cs/api/v1/auth")]
    #[case::explicit_port(Protocol::Http, 8080, "http://cs.example.com:8080/cs/cs/api/v1/auth")]
    #[case::https_alt_port(Protocol::Https, 8443, "https://cs.example.com:8443/cs/cs/api/v1/auth")]
    fn url_omits_only_port_443(
        #[case] protocol: Protocol,
        #[case] port: u16,
        #[case] expected: &str,
    ) {
        let url = config()
            .with_protocol(protocol)
            .with_port(port)
            .expect("valid port")
            .url_for(AUTH_PATH)
            .expect("url builds");

        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn scheme_default_port_is_written_in_base_url_only() {
        let config = config()
            .with_protocol(Protocol::Http)
            .with_port(80)
            .expect("valid port");

        assert_eq!(config.base_url(), "http://cs.example.com:80/cs/cs");
        let url = config.url_for("/api/v1/nodes").expect("url builds");
        assert_eq!(url.as_str(), "http://cs.example.com/cs/cs/api/v1/nodes");
        assert_eq!(url.port_or_known_default(), Some(80));
    }

    #[rstest]
    #[case::blank("   ")]
    #[case::scheme("https://cs.example.com")]
    #[case::port("cs.example.com:8080")]
    #[case::path("cs.example.com/otcs")]
    fn rejects_invalid_hostnames(#[case] hostname: &str) {
        let error = ContentServerConfig::new(hostname).expect_err("hostname rejected");
        assert!(matches!(
            error,
            ContentServerError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn rejects_port_zero() {
        let error = config().with_port(0).expect_err("port 0 rejected");
        assert!(matches!(
            error,
            ContentServerError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn rejects_blank_results_key() {
        assert!(config().with_creation_results_key(" ").is_err());
    }

    #[rstest]
    #[case("otcs/cs.exe/", "/otcs/cs.exe")]
    #[case("/cs/cs", "/cs/cs")]
    #[case("", "")]
    fn base_path_is_normalised(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(config().with_base_path(raw).base_path(), expected);
    }

    #[rstest]
    #[case("http", Protocol::Http)]
    #[case("HTTPS", Protocol::Https)]
    fn protocol_parses_case_insensitively(#[case] raw: &str, #[case] expected: Protocol) {
        assert_eq!(raw.parse::<Protocol>().expect("valid protocol"), expected);
    }

    #[test]
    fn protocol_rejects_unknown_scheme() {
        assert!("ftp".parse::<Protocol>().is_err());
    }
}
