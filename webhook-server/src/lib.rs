//! HTTP listener for node-sonos-http-api webhook push notifications.
//!
//! This crate provides the inbound half of the Sonos HTTP bridge: a small
//! always-on HTTP server that accepts push notifications from the external
//! audio control API and hands the raw payloads to a queue for a single
//! dispatch loop to process.
//!
//! # Overview
//!
//! Two components:
//!
//! - [`WebhookServer`]: HTTP server bound to a configured address. Every
//!   accepted POST body and GET query string is acknowledged with `200 OK`
//!   and the fixed body `"OK\n"`, then queued verbatim.
//! - [`PayloadIntake`]: the producer side of the hand-off queue. Connection
//!   handlers submit [`RawPayload`]s through it; exactly one dispatch loop
//!   owns the receiving side.
//!
//! No payload validation happens at this layer. Malformed payloads are
//! queued like any other; filtering them out is the dispatch loop's job.
//!
//! # Example
//!
//! ```no_run
//! use webhook_server::{PayloadIntake, WebhookServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), webhook_server::ServerError> {
//!     let (intake, mut queue_rx) = PayloadIntake::channel();
//!
//!     let server = WebhookServer::bind("0.0.0.0:5007".parse().unwrap(), intake).await?;
//!     println!("listening on {}", server.local_addr());
//!
//!     while let Some(payload) = queue_rx.recv().await {
//!         println!("queued payload: {}", payload.body());
//!     }
//!
//!     server.shutdown().await;
//!     Ok(())
//! }
//! ```

mod error;
mod intake;
mod server;

pub use error::ServerError;
pub use intake::{PayloadIntake, PayloadOrigin, RawPayload};
pub use server::WebhookServer;
