use anyhow::{Context, Result};
use clap::Parser;
use client_core::{config::load_settings, ChannelEvent, GameSession, SessionChannel};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{parse_command, Command, HELP};
use render::render;

#[derive(Parser, Debug)]
#[command(about = "Play networked chess from the terminal")]
struct Args {
    /// Origin of the game site, e.g. https://chess.example (the channel lives at /ws).
    #[arg(long)]
    origin: Option<String>,
    /// Host a new room once connected.
    #[arg(long, conflicts_with = "join")]
    create: bool,
    /// Join an existing room by code once connected.
    #[arg(long)]
    join: Option<String>,
    /// Tracing filter directive; `RUST_LOG` takes precedence.
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings()?;
    if let Some(origin) = args.origin {
        settings.origin = origin;
    }
    if let Some(filter) = args.log_filter {
        settings.log_filter = filter;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let origin = settings.origin_url()?;
    let (channel, mut events) = SessionChannel::open(&origin)
        .await
        .with_context(|| format!("failed to open game channel for {origin}"))?;
    let mut session = GameSession::new(channel);

    if args.create {
        session.create_room()?;
    } else if let Some(code) = args.join.as_deref() {
        session.join_room(code)?;
    }

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let closed = event == ChannelEvent::Closed;
                session.handle_event(event);
                print!("{}", render(&session.projection()));
                if closed {
                    info!("channel closed by server");
                    break;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else { break };
                let command = match parse_command(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                match command {
                    Command::Create => {
                        if let Err(err) = session.create_room() {
                            println!("{err}");
                        }
                    }
                    Command::Join(code) => {
                        if let Err(err) = session.join_room(&code) {
                            println!("{err}");
                        }
                    }
                    Command::Tap(square) => {
                        session.tap(square);
                        print!("{}", render(&session.projection()));
                    }
                    Command::Ping => {
                        if let Err(err) = session.ping() {
                            println!("{err}");
                        }
                    }
                    Command::Show => print!("{}", render(&session.projection())),
                    Command::Help => println!("{HELP}"),
                    Command::Quit => break,
                }
            }
        }
    }

    session.close();
    Ok(())
}
