//! Connection - handles an individual client over a WebSocket.
//!
//! Each connection runs in its own Tokio task: a `tokio::select!` loop
//! interleaves inbound text frames (parsed and dispatched to the router)
//! with outbound frames queued on the connection's mpsc channel by the
//! router. When the socket closes for any reason, the task runs the same
//! cleanup as an explicit leave.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, instrument, warn};

use crate::handlers::{self, Context};
use crate::state::{ClientHandle, Outbound, Registry};

/// A client connection handler.
pub struct Connection {
    stream: WebSocketStream<TcpStream>,
    addr: SocketAddr,
    registry: Arc<Registry>,
}

impl Connection {
    /// Wrap an accepted WebSocket stream.
    pub fn new(stream: WebSocketStream<TcpStream>, addr: SocketAddr, registry: Arc<Registry>) -> Self {
        Self {
            stream,
            addr,
            registry,
        }
    }

    /// Run the connection until the socket closes, then clean up membership.
    #[instrument(skip(self), fields(addr = %self.addr), name = "connection")]
    pub async fn run(self) {
        let Self {
            stream,
            addr: _,
            registry,
        } = self;
        let (mut sink, mut source) = stream.split();

        let (tx, mut rx) = mpsc::unbounded_channel::<Outbound>();
        let handle = ClientHandle::new(tx);
        let ctx = Context {
            handle: &handle,
            registry: &registry,
        };

        loop {
            tokio::select! {
                frame = source.next() => match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        match lectern_proto::parse_frame(&text) {
                            Ok(msg) => handlers::dispatch(&ctx, msg).await,
                            // Unparseable frames are dropped; the connection
                            // stays open and gets no reply.
                            Err(e) => debug!(error = %e, "Dropping malformed frame"),
                        }
                    }
                    Some(Ok(WsMessage::Close(_))) | None => {
                        debug!("Client closed connection");
                        break;
                    }
                    // Binary, ping, and pong frames are not protocol messages.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(error = %e, "Read error");
                        break;
                    }
                },

                out = rx.recv() => match out {
                    Some(Outbound::Frame(msg)) => {
                        let text = match lectern_proto::encode_frame(&msg) {
                            Ok(text) => text,
                            Err(e) => {
                                warn!(error = %e, "Failed to encode frame");
                                continue;
                            }
                        };
                        if let Err(e) = sink.send(WsMessage::Text(text)).await {
                            warn!(error = %e, "Write error");
                            break;
                        }
                    }
                    Some(Outbound::Close) => {
                        let _ = sink.send(WsMessage::Close(None)).await;
                        debug!("Connection closed by server");
                        break;
                    }
                    None => break,
                },
            }
        }

        // Close is treated exactly as leave, using the last known session.
        handlers::disconnect(&ctx).await;

        info!("Client disconnected");
    }
}
