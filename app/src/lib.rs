//! Host layer for the blog client core.
//!
//! # Overview
//! Supplies what `blog-core` deliberately leaves out: configuration from the
//! environment, a tracing subscriber, and a `Transport` that performs the HTTP
//! round trips. `Session` ties them together and drives a `Dashboard`.

pub mod config;
pub mod session;
pub mod telemetry;
pub mod transport;

pub use config::{Config, ConfigError};
pub use session::Session;
pub use telemetry::install_tracing;
pub use transport::{StubTransport, Transport, UreqTransport};
