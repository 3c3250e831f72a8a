//! Handshake negotiation.
//!
//! One plain GET against the handshake address returns a text body of the
//! form `session_id:heartbeat_timeout:connection_timeout:transports`. The
//! parse is split from the request so field handling is testable without a
//! socket. Fail-fast: the first bad field wins and nothing is dialed.

use std::time::Duration;

use tracing::info;

use crate::Options;
use crate::error::ClientError;

/// The one transport this client implements.
pub(crate) const TRANSPORT: &str = "websocket";

/// Overrides below this threshold are ignored in favor of the negotiated
/// heartbeat value.
const MIN_HEARTBEAT_OVERRIDE: Duration = Duration::from_secs(1);

/// Parameters agreed with the server during the handshake. Produced once,
/// read-only for the life of the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Opaque session identifier assigned by the server.
    pub session_id: String,
    /// Effective heartbeat period (override or server-negotiated).
    pub heartbeat: Duration,
    /// Transport names the server advertised.
    pub transports: Vec<String>,
}

/// Run the handshake exchange against `address` and parse the result.
///
/// # Errors
///
/// [`ClientError::Http`] if the request fails, otherwise whatever
/// [`parse_handshake`] rejects.
pub(crate) async fn negotiate(address: &str, options: &Options) -> Result<SessionConfig, ClientError> {
    let body = reqwest::get(format!("http://{address}"))
        .await?
        .text()
        .await?;

    let config = parse_handshake(&body, options)?;
    info!(
        session_id = %config.session_id,
        heartbeat_secs = config.heartbeat.as_secs(),
        transports = ?config.transports,
        "handshake negotiated"
    );
    Ok(config)
}

/// Parse a handshake body into a [`SessionConfig`].
fn parse_handshake(body: &str, options: &Options) -> Result<SessionConfig, ClientError> {
    let parts: Vec<&str> = body.split(':').collect();
    let [session_id, heartbeat_timeout, _connection_timeout, transports] = parts[..] else {
        return Err(ClientError::HandshakeProtocol(body.to_owned()));
    };

    let heartbeat = match options.heartbeat.filter(|hb| *hb > MIN_HEARTBEAT_OVERRIDE) {
        Some(hb) => hb,
        None => heartbeat_timeout
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ClientError::InvalidHeartbeat(heartbeat_timeout.to_owned()))?,
    };

    let transports: Vec<String> = transports.split(',').map(ToOwned::to_owned).collect();
    if !transports.iter().any(|t| t == TRANSPORT) {
        return Err(ClientError::UnsupportedTransport);
    }

    Ok(SessionConfig {
        session_id: session_id.to_owned(),
        heartbeat,
        transports,
    })
}

#[cfg(test)]
#[path = "handshake_test.rs"]
mod tests;
