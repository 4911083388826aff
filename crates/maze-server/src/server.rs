//! TCP listeners and top-level server wiring.
//!
//! This module:
//! - Binds the playback stream port and the HTTP solve port.
//! - Accepts new stream connections.
//! - Assigns each connection a `ClientId`.
//! - Spawns, per connection:
//!   - a client task handling line I/O,
//!   - a session task owning that client's `PlaybackController`.
//!
//! Sessions share nothing; the registry only tracks who is connected.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::client;
use crate::config::Config;
use crate::http;
use crate::session;
use crate::types::{ClientId, ClientRegistry, OutboundRx, OutboundTx, SessionRx, SessionTx};

/// Global-ish counter for assigning unique `ClientId`s.
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_client_id() -> ClientId {
    let id = NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed);
    ClientId(id)
}

/// Run both the playback stream and the HTTP endpoint.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding playback stream on {addr}"))?;
    info!("Playback stream listening on {}", addr);

    let http_addr = config.http_addr_string();
    let http_listener = TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("binding HTTP endpoint on {http_addr}"))?;
    info!("HTTP solve endpoint listening on {}", http_addr);

    tokio::spawn(async move {
        if let Err(e) = http::serve(http_listener).await {
            error!(error = %e, "HTTP endpoint stopped");
        }
    });

    serve_stream(listener, config).await
}

/// Accept playback stream connections on an already-bound listener.
pub async fn serve_stream(listener: TcpListener, config: Config) -> anyhow::Result<()> {
    // Shared registry of connected clients.
    let clients: ClientRegistry = Arc::new(tokio::sync::RwLock::new(Default::default()));
    let policy = config.stream_policy();

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let current_clients = {
            let guard = clients.read().await;
            guard.len()
        };

        if current_clients >= config.max_clients {
            warn!(
                "Rejecting connection from {}: max_clients ({}) reached",
                peer_addr, config.max_clients
            );
            // Just drop the stream; client will see connection closed.
            continue;
        }

        if let Err(e) = stream.set_nodelay(true) {
            warn!(error = %e, "could not set TCP_NODELAY");
        }

        let client_id = next_client_id();
        info!("Accepted connection {} from {}", client_id.0, peer_addr);

        let (session_tx, session_rx): (SessionTx, SessionRx) = mpsc::unbounded_channel();
        let (out_tx, out_rx): (OutboundTx, OutboundRx) = mpsc::unbounded_channel();

        // Register client.
        {
            let mut guard = clients.write().await;
            guard.insert(client_id, session_tx.clone());
        }

        tokio::spawn(session::run_session(
            client_id,
            session_rx,
            out_tx,
            config.default_pace,
        ));

        let clients_clone = clients.clone();
        tokio::spawn(async move {
            if let Err(e) =
                client::run_client(client_id, stream, session_tx, out_rx, clients_clone, policy).await
            {
                warn!("Client {} error: {:?}", client_id.0, e);
            } else {
                info!("Client {} disconnected", client_id.0);
            }
        });
    }
}
