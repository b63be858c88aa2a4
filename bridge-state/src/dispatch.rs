//! Single-reader dispatch loop between the webhook queue and the store.
//!
//! The webhook server enqueues raw payloads from its handler tasks; one
//! dispatch task drains the queue, parses each payload and hands it to
//! the decoders. Parse failures are discarded at debug level, so garbage
//! on the wire can never take the loop down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use webhook_server::RawPayload;

use crate::decoders::{decode_mute_change, decode_state, decode_topology, decode_volume_change};
use crate::event::WebhookEvent;
use crate::fanout::ItemBindings;
use crate::store::StateStore;

/// How long one queue read blocks before the loop re-checks liveness.
pub const QUEUE_WAIT: Duration = Duration::from_secs(10);

/// Spawn the dispatch loop.
///
/// Runs until `alive` is cleared or the payload queue closes. The wait on
/// the queue is bounded by [`QUEUE_WAIT`] so a cleared flag is noticed
/// even when no events arrive.
pub fn spawn_dispatch_loop(
    mut queue_rx: mpsc::UnboundedReceiver<RawPayload>,
    store: StateStore,
    bindings: Arc<ItemBindings>,
    alive: Arc<AtomicBool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("dispatch loop started");
        while alive.load(Ordering::SeqCst) {
            match tokio::time::timeout(QUEUE_WAIT, queue_rx.recv()).await {
                Err(_) => continue,
                Ok(None) => {
                    debug!("payload queue closed");
                    break;
                }
                Ok(Some(payload)) => process_payload(&payload, &store, &bindings),
            }
        }
        info!("dispatch loop stopped");
    })
}

/// Parse one raw payload and route it to the matching decoder.
pub fn process_payload(payload: &RawPayload, store: &StateStore, bindings: &ItemBindings) {
    let event = match WebhookEvent::parse(payload.body()) {
        Ok(event) => event,
        Err(err) => {
            debug!(origin = ?payload.origin(), %err, "discarding undecodable payload");
            return;
        }
    };

    match event {
        WebhookEvent::TransportState(snapshot) => decode_state(&snapshot, store, bindings),
        WebhookEvent::TopologyChange(groups) => decode_topology(&groups, store, bindings),
        WebhookEvent::VolumeChange(delta) => decode_volume_change(&delta, bindings),
        WebhookEvent::MuteChange(delta) => decode_mute_change(&delta, bindings),
        WebhookEvent::Unknown(event_type) => {
            debug!(event_type = %event_type, "ignoring unhandled event type");
        }
    }
}
