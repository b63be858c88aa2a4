//! Bridge lifecycle: wires the webhook listener, the dispatch loop and
//! the outbound client together.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use bridge_state::decoders::decode_topology;
use bridge_state::{spawn_dispatch_loop, ItemBindings, StateStore, ZoneName};
use webhook_server::{PayloadIntake, WebhookServer};

use crate::client::ApiClient;
use crate::command::command_path;
use crate::error::BridgeError;

/// Bound on how long `stop` waits for the dispatch loop to drain.
const STOP_TIMEOUT: Duration = Duration::from_secs(15);

/// Bridge configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Address the webhook listener binds to.
    pub listen_addr: SocketAddr,
    /// Host of the control API.
    pub api_host: String,
    /// Port of the control API.
    pub api_port: u16,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            listen_addr: ([0, 0, 0, 0], 5007).into(),
            api_host: "localhost".to_string(),
            api_port: 5005,
        }
    }
}

/// Running bridge instance.
///
/// Owns the webhook listener, the single dispatch-loop task and the
/// outbound [`ApiClient`]. Created with [`start`](Self::start), torn
/// down with [`stop`](Self::stop).
pub struct SonosBridge {
    store: StateStore,
    bindings: Arc<ItemBindings>,
    client: ApiClient,
    server: WebhookServer,
    worker: tokio::task::JoinHandle<()>,
    alive: Arc<AtomicBool>,
}

impl SonosBridge {
    /// Start the bridge: bind the listener, spawn the dispatch loop and
    /// prime the store with a `/zones` topology fetch.
    ///
    /// The priming fetch is best-effort; if the control API is not up
    /// yet, the store fills in as webhook events arrive.
    pub async fn start(config: BridgeConfig, bindings: ItemBindings) -> Result<Self, BridgeError> {
        let (intake, queue_rx) = PayloadIntake::channel();
        let server = WebhookServer::bind(config.listen_addr, intake).await?;

        let store = StateStore::new();
        let bindings = Arc::new(bindings);
        let alive = Arc::new(AtomicBool::new(true));
        let worker = spawn_dispatch_loop(queue_rx, store.clone(), bindings.clone(), alive.clone());

        let bridge = Self {
            store,
            bindings,
            client: ApiClient::new(config.api_host, config.api_port),
            server,
            worker,
            alive,
        };

        info!(listen_addr = %bridge.server.local_addr(), "bridge started");
        bridge.refresh_zones().await;
        Ok(bridge)
    }

    /// Shared view of the state tables.
    pub fn store(&self) -> StateStore {
        self.store.clone()
    }

    /// Address the webhook listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.server.local_addr()
    }

    /// Fetch `/zones` from the control API and fold the reply into the
    /// store, exactly as if it had arrived as a topology event.
    pub async fn refresh_zones(&self) {
        match self.client.zones().await {
            Some(groups) => {
                debug!(groups = groups.len(), "refreshing topology from /zones");
                decode_topology(&groups, &self.store, &self.bindings);
            }
            None => warn!("zones refresh failed, waiting for webhook events"),
        }
    }

    /// Send one command for a zone to the control API.
    ///
    /// Returns the API's JSON reply, or `None` when the request failed;
    /// either way the authoritative state change comes back through the
    /// webhook.
    pub async fn send_command(&self, zone: &ZoneName, command: &str, value: &str) -> Option<Value> {
        let path = command_path(zone, command, value);
        debug!(%zone, command, %path, "sending command");
        self.client.get(&path).await
    }

    /// Stop the bridge: close the listener socket, then let the dispatch
    /// loop drain the queue and exit.
    pub async fn stop(self) {
        self.alive.store(false, Ordering::SeqCst);
        self.server.shutdown().await;

        match tokio::time::timeout(STOP_TIMEOUT, self.worker).await {
            Ok(_) => info!("bridge stopped"),
            Err(_) => warn!("dispatch loop did not stop within {:?}", STOP_TIMEOUT),
        }
    }
}
