//! Pump-house document loader.
//!
//! Generates synthetic plant documents with `document-data`, submits each to
//! an OpenText-style content server, and keeps a local JSON copy named after
//! the identifier the server assigned. Submission failures never stop a run:
//! the affected document receives a fallback identifier such as
//! `AP7-ERROR-00003` instead.
//!
//! The crate follows a ports-and-adapters layout:
//! - [`domain`] holds the orchestrator and the ports it drives.
//! - [`outbound`] holds the content server, artifact, and offline adapters.
//! - [`dataset`] wires settings from [`config`] into a complete run.

pub mod config;
pub mod dataset;
pub mod domain;
pub mod outbound;
