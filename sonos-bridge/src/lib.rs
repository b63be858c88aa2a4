//! # Sonos Bridge
//!
//! Bidirectional HTTP bridge between a `node-sonos-http-api` instance
//! and item-based home automation:
//!
//! - Inbound, the bridge listens for webhook pushes, reconciles them
//!   into a live state store and fans field changes out to bound items.
//! - Outbound, item writes become GET commands against the control API.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use sonos_bridge::{BridgeConfig, ItemBindings, SonosBridge, ZoneName};
//!
//! # struct Printer;
//! # impl sonos_bridge::ItemSink for Printer {
//! #     fn update(&self, update: sonos_bridge::ItemUpdate) {
//! #         println!("{}: {} = {}", update.zone, update.field, update.value);
//! #     }
//! # }
//! #[tokio::main]
//! async fn main() -> Result<(), sonos_bridge::BridgeError> {
//!     let mut bindings = ItemBindings::new();
//!     bindings.bind(
//!         Some(ZoneName::new("Esszimmer")),
//!         "volume",
//!         Arc::new(Printer),
//!     );
//!
//!     let bridge = SonosBridge::start(BridgeConfig::default(), bindings).await?;
//!     bridge.send_command(&ZoneName::new("Esszimmer"), "play", "").await;
//!
//!     // ... run until shutdown ...
//!     bridge.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! sonos-bridge (lifecycle, outbound commands)
//!     ↓
//! bridge-state (envelope parsing, store, item fan-out)
//!     ↓
//! webhook-server (HTTP listener, payload queue)
//! ```

pub use bridge::{BridgeConfig, SonosBridge};
pub use client::ApiClient;
pub use command::{command_path, is_known_command, COMMANDS};
pub use error::BridgeError;

// Re-export the state layer types embedders interact with.
pub use bridge_state::{
    ItemBindings, ItemSink, ItemUpdate, StateStore, TopologyRecord, ZoneName, ZoneRecord,
};

pub mod logging;

mod bridge;
mod client;
mod command;
mod error;
