//! Login credentials and the session ticket issued in exchange for them.

use std::fmt;

use zeroize::Zeroizing;

use super::error::ContentServerError;

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use content_loader::outbound::content_server::Credentials;
///
/// let creds = Credentials::try_from_parts(" admin ", "livelink").expect("valid credentials");
/// assert_eq!(creds.username(), "admin");
/// assert!(!format!("{creds:?}").contains("livelink"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServerError::Authentication`] when either part is
    /// blank.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, ContentServerError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(ContentServerError::authentication(
                "username must not be empty",
            ));
        }
        if password.is_empty() {
            return Err(ContentServerError::authentication(
                "password must not be empty",
            ));
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username sent to the auth endpoint.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password sent to the auth endpoint.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Short-lived ticket attached to authenticated requests.
///
/// Held in memory only and wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct AuthTicket {
    hostname: String,
    ticket: Zeroizing<String>,
}

impl AuthTicket {
    pub(crate) fn new(hostname: &str, ticket: String) -> Self {
        Self {
            hostname: hostname.to_owned(),
            ticket: Zeroizing::new(ticket),
        }
    }

    pub(crate) fn hostname(&self) -> &str {
        &self.hostname
    }

    pub(crate) fn value(&self) -> &str {
        self.ticket.as_str()
    }
}

impl fmt::Debug for AuthTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTicket")
            .field("hostname", &self.hostname)
            .field("ticket", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for credential validation and redaction.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "pw")]
    #[case("   ", "pw")]
    #[case("user", "")]
    fn invalid_credentials(#[case] username: &str, #[case] password: &str) {
        let err = Credentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert!(matches!(err, ContentServerError::Authentication { .. }));
    }

    #[rstest]
    #[case("  admin  ", "secret")]
    #[case("alice", " spaced password ")]
    fn valid_credentials_trim_username_only(#[case] username: &str, #[case] password: &str) {
        let creds =
            Credentials::try_from_parts(username, password).expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[test]
    fn ticket_debug_output_is_redacted() {
        let ticket = AuthTicket::new("cs.example.com", "secret-ticket".to_owned());
        let rendered = format!("{ticket:?}");

        assert!(rendered.contains("cs.example.com"));
        assert!(!rendered.contains("secret-ticket"));
        assert_eq!(ticket.value(), "secret-ticket");
    }
}
