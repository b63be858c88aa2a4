//! Error types for the webhook server.

use std::net::SocketAddr;

/// Errors raised while starting the webhook listener.
///
/// A bind failure is configuration-fatal: the listener does not retry and
/// the caller is expected to report the plugin as unavailable.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The configured address could not be bound (port in use, no permission).
    #[error("failed to bind webhook listener on {addr}: {message}")]
    Bind { addr: SocketAddr, message: String },
}
