//! Client for the legacy Socket.IO 0.x realtime protocol over websocket.
//!
//! The protocol is three layers of ceremony around a plain text socket:
//! an HTTP handshake that hands out a session id and heartbeat interval,
//! a websocket upgrade to `ws://{address}/websocket/{session_id}`, and a
//! colon-delimited frame format (`type:id:endpoint[:data]`) shared by both
//! directions. [`subscribe`] runs all of it: negotiate, connect, then pump
//! frames between the caller's channels and the socket while heartbeats
//! keep the session alive.
//!
//! ```no_run
//! use tokio::sync::mpsc;
//!
//! # async fn run() -> Result<(), sockio::ClientError> {
//! let (inbound_tx, mut inbound_rx) = mpsc::channel(64);
//! let (outbound_tx, outbound_rx) = mpsc::channel(64);
//!
//! tokio::spawn(async move {
//!     while let Some(payload) = inbound_rx.recv().await {
//!         println!("{payload}");
//!     }
//! });
//!
//! // Dropping `outbound_tx` ends the session cleanly.
//! sockio::subscribe(
//!     inbound_tx,
//!     outbound_rx,
//!     "socketio.mtgox.com/socket.io/1",
//!     "/mtgox?Currency=USD",
//!     sockio::Options::default(),
//! )
//! .await
//! # }
//! ```
//!
//! There is no retry policy anywhere in this crate: the first error from
//! any activity ends the session, and reconnection means calling
//! [`subscribe`] again.

mod error;
mod handshake;
mod message;
mod session;

use tokio::sync::mpsc;

pub use error::ClientError;
pub use handshake::SessionConfig;
pub use message::{Endpoint, IoMessage, Kind};

/// Caller-side overrides for the negotiated session parameters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Replaces the server-negotiated heartbeat interval when greater than
    /// one second; smaller values are ignored.
    pub heartbeat: Option<std::time::Duration>,
}

/// Negotiate a session against `address` and run it until it ends.
///
/// Inbound frame payloads are forwarded to `inbound`; wire-encoded frames
/// read from `outbound` are sent as-is. `channel` names the logical
/// sub-channel joined right after connecting (path plus optional
/// `?query`).
///
/// Returns `Ok(())` when the caller closes `outbound` (drops every sender);
/// `inbound` is closed before return on every path.
///
/// # Errors
///
/// Any [`ClientError`]; all of them are terminal for the session.
pub async fn subscribe(
    inbound: mpsc::Sender<String>,
    outbound: mpsc::Receiver<String>,
    address: &str,
    channel: &str,
    options: Options,
) -> Result<(), ClientError> {
    let config = handshake::negotiate(address, &options).await?;
    session::run(inbound, outbound, address, channel, &config).await
}
