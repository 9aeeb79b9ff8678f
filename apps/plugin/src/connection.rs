//! WebSocket connection to the Stream Deck host.
//!
//! Three pump tasks own the socket: a read pump dispatching host events,
//! an encode pump serialising plugin commands, and a write pump feeding
//! the socket. The host owns the plugin lifecycle: when the socket
//! closes, the inbound channel closes and the process winds down; there
//! is no reconnect.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace, warn};

use recentdeck_protocol::{Inbound, Outbound, Registration, registration};

use crate::args::LaunchArgs;

/// An open, registered connection to the host.
pub struct Connection {
    pub inbound_rx: mpsc::Receiver<Inbound>,
    pub out_tx: mpsc::Sender<Outbound>,
    cancel: CancellationToken,
    _read_handle: tokio::task::JoinHandle<()>,
    _write_handle: tokio::task::JoinHandle<()>,
    _encode_handle: tokio::task::JoinHandle<()>,
}

impl Connection {
    /// Connects to the port the host passed at launch and registers.
    ///
    /// The registration message must be the first thing on the wire;
    /// it is sent before the pump tasks take over the socket.
    pub async fn open(args: &LaunchArgs) -> anyhow::Result<Self> {
        let url = registration::ws_url(args.port);
        let (ws_stream, _) = tokio_tungstenite::connect_async(url.as_str()).await?;
        let (mut write, read) = ws_stream.split();

        let reg = Registration::new(args.register_event.as_str(), args.plugin_uuid.as_str());
        write
            .send(tungstenite::Message::Text(reg.to_json()?.into()))
            .await?;
        debug!(uuid = %args.plugin_uuid, "registered with host");

        let (write_tx, write_rx) = mpsc::channel::<tungstenite::Message>(64);
        let (out_tx, out_rx) = mpsc::channel::<Outbound>(64);
        let (inbound_tx, inbound_rx) = mpsc::channel::<Inbound>(64);
        let cancel = CancellationToken::new();

        let write_handle = {
            let cancel = cancel.clone();
            tokio::spawn(write_pump(write, write_rx, cancel))
        };

        let encode_handle = {
            let write_tx = write_tx.clone();
            let cancel = cancel.clone();
            tokio::spawn(encode_pump(out_rx, write_tx, cancel))
        };

        let read_handle = {
            let cancel = cancel.clone();
            tokio::spawn(read_pump(read, inbound_tx, write_tx, cancel))
        };

        Ok(Self {
            inbound_rx,
            out_tx,
            cancel,
            _read_handle: read_handle,
            _write_handle: write_handle,
            _encode_handle: encode_handle,
        })
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.cancel.cancel();
        self._read_handle.abort();
        self._write_handle.abort();
        self._encode_handle.abort();
    }
}

/// Reads host frames and dispatches parsed events.
///
/// Unknown event types and unparseable frames are skipped; the host
/// sends plenty the plugin has no use for. Dropping `inbound_tx` on exit
/// closes the dispatcher loop.
async fn read_pump<S>(
    mut read: S,
    inbound_tx: mpsc::Sender<Inbound>,
    write_tx: mpsc::Sender<tungstenite::Message>,
    cancel: CancellationToken,
) where
    S: StreamExt<Item = Result<tungstenite::Message, tungstenite::Error>> + Unpin,
{
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            msg = read.next() => {
                match msg {
                    Some(Ok(tungstenite::Message::Text(text))) => {
                        match Inbound::parse(&text) {
                            Ok(Some(event)) => {
                                if inbound_tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                            Ok(None) => trace!("skipping unhandled host event"),
                            Err(e) => warn!("failed to parse host event: {e}"),
                        }
                    }
                    Some(Ok(tungstenite::Message::Ping(data))) => {
                        trace!("received ping, sending pong");
                        let _ = write_tx.send(tungstenite::Message::Pong(data)).await;
                    }
                    Some(Ok(tungstenite::Message::Close(_))) => {
                        debug!("host closed the connection");
                        break;
                    }
                    Some(Ok(_)) => {} // Pong, Binary: ignore
                    Some(Err(e)) => {
                        warn!("WebSocket read error: {e}");
                        break;
                    }
                    None => {
                        debug!("WebSocket stream ended");
                        break;
                    }
                }
            }
        }
    }

    cancel.cancel();
}

/// Serialises plugin commands onto the socket channel.
async fn encode_pump(
    mut out_rx: mpsc::Receiver<Outbound>,
    write_tx: mpsc::Sender<tungstenite::Message>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            cmd = out_rx.recv() => {
                match cmd {
                    Some(cmd) => match cmd.to_json() {
                        Ok(json) => {
                            if write_tx.send(tungstenite::Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => error!("failed to encode command: {e}"),
                    },
                    None => break,
                }
            }
        }
    }
}

/// Writes messages to the WebSocket.
async fn write_pump<S>(
    mut write: S,
    mut write_rx: mpsc::Receiver<tungstenite::Message>,
    cancel: CancellationToken,
) where
    S: SinkExt<tungstenite::Message, Error = tungstenite::Error> + Unpin,
{
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            msg = write_rx.recv() => {
                match msg {
                    Some(m) => {
                        if let Err(e) = write.send(m).await {
                            error!("WebSocket write error: {e}");
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    let _ = write.send(tungstenite::Message::Close(None)).await;
}
