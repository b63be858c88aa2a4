//! Bridge-level error types.

use thiserror::Error;

/// Errors surfaced by [`crate::SonosBridge`].
///
/// Deliberately small: almost everything in the bridge is
/// fire-and-forget, so only startup can actually fail.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The webhook listener could not start.
    #[error("webhook listener failed to start: {0}")]
    ListenerStartup(#[from] webhook_server::ServerError),
}
