//! Content server REST adapter.
//!
//! Wraps session authentication, URL construction, and response-key
//! extraction for an OpenText-style content server, and implements the
//! document submission port on top of them.

mod client;
mod config;
mod credentials;
mod dto;
mod error;

pub use client::{ContentServerClient, TICKET_HEADER};
pub use config::{
    AUTH_PATH, ContentServerConfig, DEFAULT_BASE_PATH, DEFAULT_CREATION_PATH,
    DEFAULT_CREATION_RESULTS_KEY, DEFAULT_RESULTS_KEY, DEFAULT_TIMEOUT, IMPLICIT_PORT, Protocol,
};
pub use credentials::Credentials;
pub use error::ContentServerError;
