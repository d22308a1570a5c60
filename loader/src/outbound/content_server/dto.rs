//! DTOs for decoding content server responses.

use serde::Deserialize;

/// Body returned by the auth endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct AuthResponseDto {
    #[serde(default)]
    pub(super) ticket: Option<String>,
}

impl AuthResponseDto {
    /// Return the ticket when present and not blank.
    pub(super) fn into_ticket(self) -> Option<String> {
        self.ticket.filter(|ticket| !ticket.trim().is_empty())
    }
}
