use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    directory::filter_entries, GuestApi, HttpGuestApi, InvitationSender, RsvpController,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod render;

use config::{load_settings, Settings};
use controller::{
    commands::{parse_command, CommandError, HELP},
    events::spawn_event_printer,
    orchestration::{dispatch_command, Flow},
};
use render::render_guest_table;

#[derive(Parser, Debug)]
#[command(name = "rsvp", about = "Confirmacion de asistencia a la boda")]
struct Args {
    /// TOML file with api_url, messaging_url, debounce_ms and request_timeout_secs
    #[arg(long, default_value = "rsvp.toml")]
    config: PathBuf,
    /// Base URL of the guest-list API (overrides config and environment)
    #[arg(long)]
    api_url: Option<String>,
    /// Base URL of the messaging service used for invitations
    #[arg(long)]
    messaging_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in the RSVP form at an interactive prompt (default)
    Rsvp,
    /// Print the guest directory, optionally filtered by column
    Guests {
        /// column=text, matched case-insensitively; may be repeated
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Send an invitation message to one phone number
    SendInvitation {
        #[arg(long)]
        to: String,
        #[arg(long)]
        body: String,
    },
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((column, needle)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), needle.to_string()))
        }
        _ => Err(format!("expected column=text, got '{raw}'")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(messaging_url) = args.messaging_url {
        settings.messaging_url = messaging_url;
    }

    match args.command.unwrap_or(Command::Rsvp) {
        Command::Rsvp => run_rsvp(&settings).await,
        Command::Guests { filters } => list_guests(&settings, &filters).await,
        Command::SendInvitation { to, body } => send_invitation(&settings, &to, &body).await,
    }
}

async fn run_rsvp(settings: &Settings) -> Result<()> {
    let base_url = settings.api_base()?;
    info!(api_url = %base_url, "starting rsvp prompt");
    let api: Arc<dyn GuestApi> = Arc::new(HttpGuestApi::new(&base_url)?);
    let controller = RsvpController::new(api, settings.timing());
    let printer = spawn_event_printer(controller.subscribe_events());

    println!("¡Ven a celebrar con nosotros! Confirma tu asistencia.\n{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read from stdin")? {
        match parse_command(&line) {
            Ok(cmd) => {
                let (flow, output) = dispatch_command(&controller, cmd).await;
                if let Some(output) = output {
                    println!("{output}");
                }
                if flow == Flow::Quit {
                    break;
                }
            }
            Err(CommandError::Empty) => {}
            Err(err) => println!("{err}"),
        }
    }

    drop(controller);
    printer.abort();
    Ok(())
}

async fn list_guests(settings: &Settings, filters: &[(String, String)]) -> Result<()> {
    let api = HttpGuestApi::new(&settings.api_base()?)?;
    let timeout = settings.timing().request_timeout;
    let table = tokio::time::timeout(timeout, api.fetch_guest_table())
        .await
        .with_context(|| format!("guest directory did not answer within {timeout:?}"))?
        .context("failed to fetch guest directory")?;

    let rows = filter_entries(&table, filters);
    println!("{}", render_guest_table(&rows));
    Ok(())
}

async fn send_invitation(settings: &Settings, to: &str, body: &str) -> Result<()> {
    let sender = InvitationSender::new(
        &settings.messaging_base()?,
        settings.timing().request_timeout,
    )?;
    match sender.send(to, body).await {
        Ok(sid) => {
            println!("Message sent with SID: {sid}");
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "error sending message");
            println!("Failed to send message");
            Err(err.into())
        }
    }
}
