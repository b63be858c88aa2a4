//! HTTP server for receiving webhook push notifications.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::mpsc;
use warp::http::{Method, StatusCode};
use warp::Filter;

use crate::error::ServerError;
use crate::intake::{PayloadIntake, RawPayload};

/// Fixed acknowledgment body sent for every accepted GET/POST request.
const OK_BODY: &str = "OK\n";

/// Bound on how long `shutdown` waits for the server task to finish.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP webhook listener.
///
/// Binds to a configured socket address and accepts unauthenticated HTTP
/// requests on any path:
///
/// - `POST`: the request body is the raw payload. Acknowledged with
///   `200 OK` / `"OK\n"` and queued verbatim.
/// - `GET`: the raw query string is the payload. Same acknowledgment,
///   queued verbatim (query strings carry no event envelope and are later
///   discarded by the dispatch loop, but this layer does not care).
/// - `PUT`: acknowledged at the transport layer only; nothing is queued.
/// - anything else: `405`.
///
/// A bind failure is configuration-fatal and reported through
/// [`ServerError::Bind`]; the server never retries on its own.
pub struct WebhookServer {
    local_addr: SocketAddr,
    shutdown_tx: Option<mpsc::Sender<()>>,
    server_handle: Option<tokio::task::JoinHandle<()>>,
}

impl WebhookServer {
    /// Bind the listener and start serving requests.
    ///
    /// Every connection handler submits into `intake`; the server holds no
    /// other reference to the queue. Use port `0` to bind an ephemeral port
    /// and read the actual one back from [`local_addr`](Self::local_addr).
    pub async fn bind(addr: SocketAddr, intake: PayloadIntake) -> Result<Self, ServerError> {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let (local_addr, server) = warp::serve(routes(intake))
            .try_bind_with_graceful_shutdown(addr, async move {
                shutdown_rx.recv().await;
            })
            .map_err(|e| ServerError::Bind {
                addr,
                message: e.to_string(),
            })?;

        tracing::info!(%local_addr, "webhook listener bound");
        let server_handle = tokio::spawn(server);

        Ok(Self {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            server_handle: Some(server_handle),
        })
    }

    /// The address the listener is actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Stop the listener.
    ///
    /// Signals the server to close its socket and waits up to
    /// [`SHUTDOWN_TIMEOUT`] for the task to finish in-flight requests.
    /// An overrun is logged and tolerated; shutdown is best-effort.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }

        if let Some(handle) = self.server_handle.take() {
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await {
                Ok(_) => tracing::info!("webhook listener stopped"),
                Err(_) => tracing::error!(
                    "webhook listener did not stop within {:?}",
                    SHUTDOWN_TIMEOUT
                ),
            }
        }
    }
}

/// The full request filter chain.
///
/// A single catch-all route: method, path, raw query string (empty when
/// absent) and body bytes, folded into [`handle_request`].
pub(crate) fn routes(
    intake: PayloadIntake,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::method()
        .and(warp::path::full())
        .and(
            warp::query::raw()
                .or(warp::any().map(String::new))
                .unify(),
        )
        .and(warp::body::bytes())
        .map(
            move |method: Method, path: warp::path::FullPath, query: String, body: bytes::Bytes| {
                handle_request(&intake, method, path.as_str(), query, &body)
            },
        )
}

/// Acknowledge one request and queue its payload.
///
/// The acknowledgment is fixed regardless of payload content; no
/// validation happens here.
fn handle_request(
    intake: &PayloadIntake,
    method: Method,
    path: &str,
    query: String,
    body: &[u8],
) -> warp::reply::WithStatus<String> {
    match method {
        Method::POST => {
            let payload = String::from_utf8_lossy(body).into_owned();
            tracing::debug!(path, bytes = payload.len(), "webhook POST received");
            intake.submit(RawPayload::post(payload));
            warp::reply::with_status(OK_BODY.to_string(), StatusCode::OK)
        }
        Method::GET => {
            tracing::debug!(path, query = query.as_str(), "webhook GET received");
            intake.submit(RawPayload::get(query));
            warp::reply::with_status(OK_BODY.to_string(), StatusCode::OK)
        }
        // PUT is a known no-op: acknowledged at the transport layer,
        // nothing queued.
        Method::PUT => warp::reply::with_status(String::new(), StatusCode::OK),
        _ => warp::reply::with_status(String::new(), StatusCode::METHOD_NOT_ALLOWED),
    }
}
