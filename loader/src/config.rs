//! Loader configuration loaded via OrthoConfig.
//!
//! Every value may come from `CONTENT_LOADER_*` environment variables or a
//! configuration file. Unset values fall back to the content server defaults.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use document_data::{CatalogError, DEFAULT_SEED, DocumentCatalog};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::content_server::{
    ContentServerConfig, ContentServerError, Credentials, DEFAULT_TIMEOUT, Protocol,
};

/// Default directory receiving document artifacts.
pub const DEFAULT_OUTPUT_DIR: &str = "pump_house_data";

/// Configuration values controlling document generation and submission.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTENT_LOADER")]
pub struct LoaderSettings {
    /// URL scheme, `http` or `https`.
    pub protocol: Option<String>,
    /// Content server hostname. Required unless running offline.
    pub hostname: Option<String>,
    /// Content server port.
    pub port: Option<u16>,
    /// REST base path.
    pub base_path: Option<String>,
    /// Login user. Authorization runs only when both credentials are set.
    pub username: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// Document creation endpoint, relative to the base path.
    pub creation_path: Option<String>,
    /// Response key carrying a created document's identifier.
    pub results_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
    /// Generator seed.
    pub seed: Option<u64>,
    /// Optional JSON catalog replacing the built-in pump-house lists.
    pub catalog_path: Option<PathBuf>,
    /// Submit to a simulated backend instead of the content server.
    #[ortho_config(default = false)]
    pub offline: bool,
}

impl LoaderSettings {
    /// Return the configured seed, falling back to the default.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Return the configured request timeout, falling back to the default.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout_seconds.map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }

    /// Build validated content server settings.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServerError::InvalidConfiguration`] when the hostname
    /// is missing or any value is invalid.
    pub fn content_server_config(&self) -> Result<ContentServerConfig, ContentServerError> {
        let hostname = self.hostname.as_deref().ok_or_else(|| {
            ContentServerError::invalid_configuration(
                "hostname is required; set CONTENT_LOADER_HOSTNAME",
            )
        })?;
        let protocol = self
            .protocol
            .as_deref()
            .map_or_else(|| Ok(Protocol::default()), str::parse)?;

        let mut config = ContentServerConfig::new(hostname)?
            .with_protocol(protocol)
            .with_timeout(self.timeout());
        if let Some(port) = self.port {
            config = config.with_port(port)?;
        }
        if let Some(base_path) = self.base_path.as_deref() {
            config = config.with_base_path(base_path);
        }
        if let Some(creation_path) = self.creation_path.as_deref() {
            config = config.with_creation_path(creation_path);
        }
        if let Some(results_key) = self.results_key.as_deref() {
            config = config.with_creation_results_key(results_key)?;
        }
        Ok(config)
    }

    /// Return login credentials when both username and password are set.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServerError::Authentication`] when only one of the
    /// two is set or either is blank.
    pub fn credentials(&self) -> Result<Option<Credentials>, ContentServerError> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (None, None) => Ok(None),
            (Some(username), Some(password)) => {
                Credentials::try_from_parts(username, password).map(Some)
            }
            (Some(_), None) => Err(ContentServerError::authentication(
                "username is set but password is missing",
            )),
            (None, Some(_)) => Err(ContentServerError::authentication(
                "password is set but username is missing",
            )),
        }
    }

    /// Load the configured catalog, falling back to the pump-house defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog file cannot be read or is
    /// invalid.
    pub fn catalog(&self) -> Result<DocumentCatalog, CatalogError> {
        self.catalog_path
            .as_deref()
            .map_or_else(|| Ok(DocumentCatalog::pump_house()), DocumentCatalog::from_file)
    }
}

impl fmt::Debug for LoaderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderSettings")
            .field("protocol", &self.protocol)
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("base_path", &self.base_path)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("creation_path", &self.creation_path)
            .field("results_key", &self.results_key)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("seed", &self.seed)
            .field("catalog_path", &self.catalog_path)
            .field("offline", &self.offline)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for loader configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 12] = [
        "CONTENT_LOADER_PROTOCOL",
        "CONTENT_LOADER_HOSTNAME",
        "CONTENT_LOADER_PORT",
        "CONTENT_LOADER_BASE_PATH",
        "CONTENT_LOADER_USERNAME",
        "CONTENT_LOADER_PASSWORD",
        "CONTENT_LOADER_CREATION_PATH",
        "CONTENT_LOADER_RESULTS_KEY",
        "CONTENT_LOADER_TIMEOUT_SECONDS",
        "CONTENT_LOADER_SEED",
        "CONTENT_LOADER_CATALOG_PATH",
        "CONTENT_LOADER_OFFLINE",
    ];

    fn cleared_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|var| {
                let value = overrides
                    .iter()
                    .find(|(name, _)| name == var)
                    .map(|(_, raw)| (*raw).to_owned());
                (*var, value)
            })
            .collect()
    }

    fn load_from_empty_args() -> LoaderSettings {
        LoaderSettings::load_from_iter([OsString::from("generate-documents")])
            .expect("config should load")
    }

    fn settings_with_hostname(hostname: &str) -> LoaderSettings {
        LoaderSettings {
            protocol: None,
            hostname: Some(hostname.to_owned()),
            port: None,
            base_path: None,
            username: None,
            password: None,
            creation_path: None,
            results_key: None,
            timeout_seconds: None,
            seed: None,
            catalog_path: None,
            offline: false,
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared_with(&[]));

        let settings = load_from_empty_args();
        assert!(!settings.offline);
        assert_eq!(settings.seed(), DEFAULT_SEED);
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert!(settings.hostname.is_none());
        assert!(settings.credentials().expect("no credentials").is_none());
        assert!(matches!(
            settings.content_server_config(),
            Err(ContentServerError::InvalidConfiguration { .. })
        ));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_with(&[
            ("CONTENT_LOADER_PROTOCOL", "http"),
            ("CONTENT_LOADER_HOSTNAME", "otcs.internal"),
            ("CONTENT_LOADER_PORT", "8080"),
            ("CONTENT_LOADER_BASE_PATH", "/otcs/cs.exe"),
            ("CONTENT_LOADER_USERNAME", "admin"),
            ("CONTENT_LOADER_PASSWORD", "livelink"),
            ("CONTENT_LOADER_RESULTS_KEY", "id"),
            ("CONTENT_LOADER_TIMEOUT_SECONDS", "5"),
            ("CONTENT_LOADER_SEED", "7"),
            ("CONTENT_LOADER_OFFLINE", "true"),
        ]));

        let settings = load_from_empty_args();
        assert!(settings.offline);
        assert_eq!(settings.seed(), 7);

        let config = settings.content_server_config().expect("valid config");
        assert_eq!(config.protocol(), Protocol::Http);
        assert_eq!(config.port(), 8080);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.creation_results_key(), "id");
        assert_eq!(config.base_url(), "http://otcs.internal:8080/otcs/cs.exe");

        let credentials = settings
            .credentials()
            .expect("valid credentials")
            .expect("credentials present");
        assert_eq!(credentials.username(), "admin");
    }

    #[rstest]
    #[case::username_only(Some("admin"), None)]
    #[case::password_only(None, Some("secret"))]
    #[case::blank_username(Some("  "), Some("secret"))]
    fn partial_credentials_are_rejected(
        #[case] username: Option<&str>,
        #[case] password: Option<&str>,
    ) {
        let mut settings = settings_with_hostname("cs.example.com");
        settings.username = username.map(str::to_owned);
        settings.password = password.map(str::to_owned);

        assert!(matches!(
            settings.credentials(),
            Err(ContentServerError::Authentication { .. })
        ));
    }

    #[rstest]
    fn unknown_protocol_is_rejected() {
        let mut settings = settings_with_hostname("cs.example.com");
        settings.protocol = Some("gopher".to_owned());

        assert!(settings.content_server_config().is_err());
    }

    #[rstest]
    fn debug_output_redacts_password() {
        let mut settings = settings_with_hostname("cs.example.com");
        settings.password = Some("livelink".to_owned());

        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("livelink"));
        assert!(rendered.contains("<redacted>"));
    }

    #[rstest]
    fn missing_catalog_path_uses_pump_house_lists() {
        let settings = settings_with_hostname("cs.example.com");
        assert_eq!(
            settings.catalog().expect("default catalog"),
            DocumentCatalog::pump_house()
        );
    }
}
