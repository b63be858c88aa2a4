//! State reconciliation for webhook-fed Sonos zones.
//!
//! This crate turns the raw payload stream produced by
//! [`webhook_server`] into live, queryable state:
//!
//! - [`event::WebhookEvent`] parses the `{"type", "data"}` envelopes.
//! - [`StateStore`] holds zone records, topology and the zone/device index.
//! - [`ItemBindings`] fans resolved field values out to [`ItemSink`]s.
//! - [`spawn_dispatch_loop`] wires the three together behind a single
//!   reader task.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//!
//! use bridge_state::{spawn_dispatch_loop, ItemBindings, StateStore};
//! use webhook_server::PayloadIntake;
//!
//! # async fn run() {
//! let (intake, queue_rx) = PayloadIntake::channel();
//! let store = StateStore::new();
//! let bindings = Arc::new(ItemBindings::new());
//! let alive = Arc::new(AtomicBool::new(true));
//!
//! let worker = spawn_dispatch_loop(queue_rx, store.clone(), bindings, alive.clone());
//! // ... run the webhook server with `intake` ...
//! # let _ = worker;
//! # }
//! ```

pub mod decoders;
pub mod event;
mod dispatch;
mod fanout;
mod model;
mod store;

pub use dispatch::{process_payload, spawn_dispatch_loop, QUEUE_WAIT};
pub use event::{EnvelopeError, GroupDescriptor, MuteDelta, VolumeDelta, WebhookEvent, ZoneSnapshot};
pub use fanout::{format_duration, resolve_field, ItemBindings, ItemSink, ItemUpdate};
pub use model::{DeviceId, TopologyRecord, ZoneName, ZoneRecord};
pub use store::StateStore;
