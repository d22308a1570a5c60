//! Errors raised by the content server adapter.

use crate::domain::ports::define_port_error;

define_port_error! {
    /// Failures talking to the content server REST API.
    pub enum ContentServerError {
        /// Credentials were refused or the auth response carried no ticket.
        Authentication { message: String } =>
            "authentication failed: {message}",
        /// The server answered with a non-success status.
        HttpStatus { status: u16, message: String } =>
            "content server returned status {status}: {message}",
        /// A success response lacked the expected payload key.
        MissingResult { key: String } =>
            "no {key} returned",
        /// The request failed before a response arrived.
        Transport { message: String } =>
            "content server transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "content server request timed out: {message}",
        /// The response body was not valid JSON.
        Decode { message: String } =>
            "content server response decode failed: {message}",
        /// Connection settings were rejected before any request was made.
        InvalidConfiguration { message: String } =>
            "invalid content server configuration: {message}",
    }
}
