//! The live session: one websocket connection, three concurrent activities.
//!
//! DESIGN
//! ======
//! The socket splits into a send-only and a receive-only half, so the type
//! system enforces the one-writer/one-reader discipline. The receive task
//! owns the read half; the coordinating loop below owns the write half and
//! multiplexes caller payloads with heartbeats. Close belongs to the
//! coordinator alone, after both activities have stopped or signaled.
//!
//! Caller payloads and heartbeats are written in arrival order with no
//! priority, so a caller flooding outbound traffic can delay heartbeat
//! delivery. Known starvation risk inherited from the protocol; changing
//! the priority would change observable behavior.

use futures_util::stream::SplitStream;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::handshake::{SessionConfig, TRANSPORT};
use crate::message::IoMessage;

type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Run one session to completion.
///
/// Returns `Ok(())` only when the caller closes `outbound`; every other
/// exit is the first error observed by any activity. The write half is
/// closed and both activities are stopped on every path out.
pub(crate) async fn run(
    inbound: mpsc::Sender<String>,
    mut outbound: mpsc::Receiver<String>,
    address: &str,
    channel: &str,
    config: &SessionConfig,
) -> Result<(), ClientError> {
    let endpoint = format!(
        "ws://{}/{}/{}",
        address.trim_end_matches('/'),
        TRANSPORT,
        config.session_id,
    );
    let (socket, _) = connect_async(endpoint.as_str())
        .await
        .map_err(|error| ClientError::Dial(Box::new(error)))?;
    let (mut sink, source) = socket.split();
    info!(%endpoint, "session connected");

    // Join the logical channel before any activity starts.
    let connect = IoMessage::connect(channel, "").encode();
    debug!(frame = %connect, "send");
    sink.send(Message::text(connect))
        .await
        .map_err(|error| ClientError::Transport(Box::new(error)))?;

    // Capacity 1: only the first error is ever reported.
    let (error_tx, mut error_rx) = mpsc::channel::<ClientError>(1);
    let (beat_tx, mut beat_rx) = mpsc::channel::<String>(1);

    let heartbeat = config.heartbeat;
    let beats = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(heartbeat);
        ticker.tick().await; // consume the immediate first tick
        loop {
            ticker.tick().await;
            if beat_tx.send(IoMessage::heartbeat().encode()).await.is_err() {
                return;
            }
        }
    });

    let receiver = tokio::spawn(receive_loop(source, inbound, error_tx));

    let result = loop {
        tokio::select! {
            payload = outbound.recv() => match payload {
                // Caller closed its source: clean shutdown.
                None => break Ok(()),
                Some(payload) => {
                    debug!(frame = %payload, "send");
                    if let Err(error) = sink.send(Message::text(payload)).await {
                        break Err(ClientError::Transport(Box::new(error)));
                    }
                }
            },
            Some(beat) = beat_rx.recv() => {
                debug!(frame = %beat, "send");
                if let Err(error) = sink.send(Message::text(beat)).await {
                    break Err(ClientError::Transport(Box::new(error)));
                }
            },
            Some(error) = error_rx.recv() => break Err(error),
        }
    };

    let _ = sink.close().await;
    beats.abort();
    receiver.abort();

    match &result {
        Ok(()) => info!("session closed by caller"),
        Err(error) => warn!(%error, "session ended"),
    }
    result
}

/// Receive activity: decode inbound frames and surface their payloads.
///
/// Owns the read half and the inbound sender; returning drops the sender,
/// which closes the caller's sink exactly once. Any transport or decode
/// error is pushed onto `errors` and ends the activity — the protocol has
/// no way to resync after a bad frame.
async fn receive_loop(
    mut source: WsSource,
    inbound: mpsc::Sender<String>,
    errors: mpsc::Sender<ClientError>,
) {
    loop {
        let error = match source.next().await {
            None => ClientError::Closed,
            Some(Err(error)) => ClientError::Transport(Box::new(error)),
            Some(Ok(Message::Close(_))) => ClientError::Closed,
            Some(Ok(Message::Text(text))) => match IoMessage::decode(&text) {
                Ok(message) => {
                    debug!(frame = %text, "recv");
                    if inbound.send(message.data).await.is_err() {
                        // Caller dropped its receiver; nothing left to feed.
                        return;
                    }
                    continue;
                }
                Err(error) => error,
            },
            // Pings and pongs are transport-level; the protocol is text-only.
            Some(Ok(_)) => continue,
        };
        let _ = errors.send(error).await;
        return;
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
