//! Outbound adapters implementing the domain ports.

pub mod artifacts;
pub mod content_server;
pub mod simulated;
