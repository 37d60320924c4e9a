#![forbid(unsafe_code)]

//! Interactive text client for `draft-room`.
//!
//! Prints every message the server sends and forwards each line typed on
//! stdin as a reply. Does not depend on the library crate.

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

#[derive(Debug, Parser)]
#[command(
    name = "draft-room-client",
    about = "Interactive client for the draft-room server",
    version,
    long_about = None
)]
struct Cli {
    /// WebSocket URL of the draft server.
    #[arg(long, default_value = "ws://localhost:8080/ws")]
    url: String,
}

fn main() {
    let args = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to start runtime: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = runtime.block_on(run(&args.url)) {
        eprintln!("Error: {err}");
        eprintln!("Is draft-room listening on '{}'?", args.url);
        std::process::exit(1);
    }
}

/// Connect, then relay server messages to stdout and stdin lines to the
/// server until the connection closes.
async fn run(url: &str) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (stream, _) = match tokio_tungstenite::connect_async(url).await {
        Ok(connection) => connection,
        Err(WsError::Http(response)) => {
            let body = response
                .body()
                .as_deref()
                .map_or_else(String::new, |b| String::from_utf8_lossy(b).into_owned());
            println!("Status: {}, Body: {body}", response.status().as_u16());
            return Err("server refused the connection".into());
        }
        Err(err) => return Err(format!("failed to connect: {err}").into()),
    };

    let (mut write, mut read) = stream.split();

    let mut reader = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => println!("Server: {}", text.as_str()),
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }
        println!("Connection closed by server");
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = &mut reader => {
                println!("Game ended!");
                return Ok(());
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if let Err(err) = write.send(Message::text(line)).await {
                        eprintln!("Error writing message: {err}");
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    eprintln!("Error reading from stdin: {err}");
                    break;
                }
            },
        }
    }

    // Stdin is done; let the server finish the draft.
    let _ = reader.await;
    println!("Game ended!");
    Ok(())
}
