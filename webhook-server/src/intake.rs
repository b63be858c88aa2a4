//! Hand-off queue between connection handlers and the dispatch loop.
//!
//! The queue is a tokio unbounded mpsc channel: every connection handler
//! holds a cloned sender, exactly one dispatch loop owns the receiver.
//! The channel is created once at startup and wired explicitly into both
//! sides; there is no process-global queue.

use tokio::sync::mpsc;

/// Where a raw payload came from at the HTTP layer.
///
/// POST bodies carry the JSON event envelope, GET query strings do not.
/// The origin is kept for logging only; the dispatch loop treats every
/// payload the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOrigin {
    /// Request body of an HTTP POST.
    Post,
    /// Query string of an HTTP GET.
    Get,
}

/// One raw webhook payload, queued verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload {
    origin: PayloadOrigin,
    body: String,
}

impl RawPayload {
    /// Payload taken from a POST request body.
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            origin: PayloadOrigin::Post,
            body: body.into(),
        }
    }

    /// Payload taken from a GET query string.
    pub fn get(query: impl Into<String>) -> Self {
        Self {
            origin: PayloadOrigin::Get,
            body: query.into(),
        }
    }

    /// The raw payload text, exactly as received.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn origin(&self) -> PayloadOrigin {
        self.origin
    }
}

/// Producer side of the hand-off queue.
///
/// Cheap to clone; every connection handler task gets its own copy. Submits
/// never block. If the dispatch loop has gone away the payload is dropped
/// with a debug note, matching the listener's fire-and-forget contract.
#[derive(Debug, Clone)]
pub struct PayloadIntake {
    queue_tx: mpsc::UnboundedSender<RawPayload>,
}

impl PayloadIntake {
    /// Create the hand-off queue, returning the intake and the single
    /// receiver the dispatch loop reads from.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RawPayload>) {
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        (Self { queue_tx }, queue_rx)
    }

    /// Queue one raw payload for the dispatch loop.
    pub fn submit(&self, payload: RawPayload) {
        if self.queue_tx.send(payload).is_err() {
            tracing::debug!("payload queue receiver dropped, discarding payload");
        }
    }
}
