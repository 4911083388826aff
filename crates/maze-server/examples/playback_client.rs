//! Example: interactive playback client.
//!
//! Usage:
//!
//! ```bash
//! # Run server
//! cargo run -p maze-server
//!
//! # In another terminal
//! cargo run -p maze-server --example playback_client -- --maze crates/maze-server/demos/spiral.txt
//! ```
//!
//! It will:
//! - read a text grid (`S` start, `G` goal, `#` wall, `.` free),
//! - send a `solve` command to the playback stream,
//! - print every visit event as it arrives and the final path,
//! - forward `pause`, `resume`, `stop` typed on stdin (`quit` exits).

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use maze_core::OutputEvent;
use maze_protocol::text_grid::{format_text_grid, parse_text_grid};
use maze_protocol::{decode_event, encode_command, WireCommand, WirePoint, WireSolve};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

#[derive(Parser)]
#[command(name = "playback-client")]
#[command(about = "Watch an A* search unfold over the playback stream")]
struct Cli {
    /// Server stream address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    addr: String,

    /// Text grid to solve
    #[arg(short, long)]
    maze: PathBuf,

    /// Milliseconds between visit events
    #[arg(short, long)]
    pace: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.maze)?;
    let parsed = parse_text_grid(&text)?;
    let (Some(start), Some(goal)) = (parsed.start, parsed.goal) else {
        return Err("grid needs both an S and a G marker".into());
    };

    println!("Connecting to {}...", cli.addr);
    let stream = TcpStream::connect(&cli.addr).await?;
    let (read_half, mut write_half) = stream.into_split();
    println!("Connected. Type pause / resume / stop, or quit to leave.\n");

    let solve = WireCommand::Solve(WireSolve {
        grid: parsed.grid.to_rows(),
        start: WirePoint::from(start),
        goal: WirePoint::from(goal),
        pace_ms: cli.pace,
    });
    send(&mut write_half, &solve).await?;

    let mut events = BufReader::new(read_half).lines();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = events.next_line() => {
                let Some(line) = line? else {
                    println!("Server closed the connection.");
                    break;
                };
                match decode_event(&line)? {
                    OutputEvent::Visit(p) => println!("<< visit {}", p),
                    OutputEvent::Done(summary) => {
                        if let Some(error) = summary.error {
                            println!("<< done (error: {})", error);
                            continue;
                        }
                        println!(
                            "<< done: path length {}, visited {}",
                            summary.path_length, summary.visited_count
                        );
                        print!("{}", format_text_grid(&parsed.grid, &summary.path));
                        break;
                    }
                }
            }

            line = stdin.next_line() => {
                let Some(line) = line? else { break };
                let cmd = match line.trim() {
                    "" => continue,
                    "pause" => WireCommand::Pause,
                    "resume" => WireCommand::Resume,
                    "stop" => WireCommand::Stop,
                    "quit" | "exit" => break,
                    other => {
                        eprintln!("Unknown command {:?}", other);
                        continue;
                    }
                };
                send(&mut write_half, &cmd).await?;
            }
        }
    }

    Ok(())
}

async fn send(stream: &mut tokio::net::tcp::OwnedWriteHalf, cmd: &WireCommand) -> Result<(), Box<dyn Error>> {
    let mut line = encode_command(cmd)?;
    line.push('\n');
    stream.write_all(line.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}
