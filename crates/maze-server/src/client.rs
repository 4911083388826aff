//! Per-connection I/O: newline-delimited JSON in, newline-delimited JSON out.

use anyhow::Result;
use bytes::BytesMut;
use maze_core::OutputEvent;
use maze_protocol::{json_codec, ValidationPolicy};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::types::{ClientId, ClientRegistry, OutboundRx, SessionInput, SessionTx};

/// Longest accepted command line. A client that sends more without a
/// newline is disconnected.
pub const MAX_LINE_LEN: usize = 4 * 1024 * 1024;

/// Run the client I/O loop for a single connection.
pub async fn run_client(
    client_id: ClientId,
    stream: TcpStream,
    session_tx: SessionTx,
    out_rx: OutboundRx,
    clients: ClientRegistry,
    policy: ValidationPolicy,
) -> Result<()> {
    let (read_stream, write_stream) = stream.into_split();

    // Writer task: consume events and write them as JSON lines.
    tokio::spawn(run_writer(client_id, write_stream, out_rx));

    let result = run_reader(client_id, read_stream, &session_tx, policy).await;

    // Remove client from registry; dropping the last sender ends the session.
    {
        let mut guard = clients.write().await;
        guard.remove(&client_id);
    }

    result
}

async fn run_reader(
    client_id: ClientId,
    mut read_stream: OwnedReadHalf,
    session_tx: &SessionTx,
    policy: ValidationPolicy,
) -> Result<()> {
    let mut buffer = BytesMut::with_capacity(8 * 1024);

    loop {
        let n = read_stream.read_buf(&mut buffer).await?;
        if n == 0 {
            info!(client = client_id.0, "client disconnected");
            return Ok(());
        }

        // Process complete lines
        while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
            let line = buffer.split_to(newline_pos + 1);
            let line = String::from_utf8_lossy(&line);
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            let input = match json_codec::parse_command_line(line, policy) {
                Ok(cmd) => SessionInput::Command(cmd),
                Err(err) => {
                    warn!(client = client_id.0, %err, "rejecting command");
                    SessionInput::Rejected(format!("Failed to process request: {err}"))
                }
            };

            if session_tx.send(input).is_err() {
                warn!(client = client_id.0, "session closed");
                return Ok(());
            }
        }

        if buffer.len() > MAX_LINE_LEN {
            warn!(
                client = client_id.0,
                buffered = buffer.len(),
                "command line too long, disconnecting"
            );
            return Ok(());
        }
    }
}

async fn run_writer(client_id: ClientId, mut write_stream: OwnedWriteHalf, mut out_rx: OutboundRx) {
    while let Some(event) = out_rx.recv().await {
        if let Err(e) = write_event(&mut write_stream, &event).await {
            warn!(client = client_id.0, error = %e, "write error");
            break;
        }
    }
    debug!(client = client_id.0, "writer finished");
}

async fn write_event(stream: &mut OwnedWriteHalf, event: &OutputEvent) -> Result<()> {
    let mut line = json_codec::encode_event(event)?;
    line.push('\n');

    stream.write_all(line.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}
