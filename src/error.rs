//! Error taxonomy for the client.
//!
//! Every variant is session-terminating: there is no retry policy anywhere
//! in this crate. Callers wanting reconnection re-run the whole
//! negotiate-and-subscribe sequence.

use tokio_tungstenite::tungstenite;

/// Error returned by [`subscribe`](crate::subscribe).
///
/// The first error from any concurrent activity wins; later ones are
/// dropped rather than reported.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The handshake HTTP request itself failed (pre-session).
    #[error("handshake request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The handshake body did not have the expected four colon-separated
    /// fields. Carries the raw body for diagnostics.
    #[error("received invalid body when handshaking: '{0}'")]
    HandshakeProtocol(String),
    /// The server sent a non-numeric heartbeat timeout. A server/client
    /// disagreement nothing downstream can paper over, so it is surfaced
    /// rather than defaulted.
    #[error("invalid heartbeat timeout specified by server: '{0}'")]
    InvalidHeartbeat(String),
    /// The negotiated transport list does not include websocket.
    #[error("websocket is not supported by the server")]
    UnsupportedTransport,
    /// Dialing the websocket endpoint failed; the session never started.
    #[error("websocket connect failed: {0}")]
    Dial(Box<tungstenite::Error>),
    /// An inbound frame could not be decoded. The protocol has no resync
    /// mechanism, so this ends the session.
    #[error("malformed frame: '{0}'")]
    MalformedFrame(String),
    /// A transport read or write failed mid-session.
    #[error("websocket transport failed: {0}")]
    Transport(Box<tungstenite::Error>),
    /// The server closed the stream mid-session.
    #[error("websocket closed by server")]
    Closed,
}
