//! Pushlink CLI
//!
//! Drives the device sync engine against a live notification service.
//!
//! # Commands
//!
//! - `register` - Register a device token and print the assigned device id
//! - `subscribe` / `unsubscribe` - Activate or deactivate delivery
//! - `set-interests` / `unsubscribe-all` - Replace or clear the interest set
//! - `track` - Report a delivery/open event for a notification payload
//! - `sync-metadata` - Send device metadata if it changed since the last sync

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use commands::CliEngine;
use pushlink_engine::{ReqwestTransport, ServiceConfig, SyncEngine, SystemEnvironment};
use pushlink_protocol::EventType;
use pushlink_store::FileMetadataStore;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Push notification device sync tools.
#[derive(Parser)]
#[command(name = "pushlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Service URL the command is sent to
    #[arg(global = true, short, long, env = "PUSHLINK_URL")]
    url: Option<String>,

    /// File holding the last synced metadata snapshot
    #[arg(global = true, short, long, default_value = "pushlink-metadata.json")]
    state: PathBuf,

    /// Host application bundle identifier
    #[arg(global = true, long, env = "PUSHLINK_BUNDLE_ID")]
    bundle_id: Option<String>,

    /// Request timeout in seconds
    #[arg(global = true, long, default_value = "30")]
    timeout_secs: u64,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a device token
    Register {
        /// Device token as hex
        #[arg(short, long)]
        token: String,

        /// Application instance id
        #[arg(short, long)]
        instance_id: String,
    },

    /// Activate the device for delivery
    Subscribe,

    /// Replace the interest set
    SetInterests {
        /// Interest names (none clears the set)
        interests: Vec<String>,
    },

    /// Deactivate the device
    Unsubscribe,

    /// Clear every interest
    UnsubscribeAll,

    /// Report an event for an inbound notification
    Track {
        /// Notification payload as JSON
        #[arg(short, long)]
        payload: String,

        /// Event kind
        #[arg(short, long, value_enum)]
        event: EventArg,

        /// Device id returned by registration
        #[arg(short, long)]
        device_id: String,
    },

    /// Send metadata if it changed since the last sync
    SyncMetadata,

    /// Show version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum EventArg {
    Delivery,
    Open,
}

impl From<EventArg> for EventType {
    fn from(arg: EventArg) -> Self {
        match arg {
            EventArg::Delivery => EventType::Delivery,
            EventArg::Open => EventType::Open,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Commands::Version = cli.command {
        println!("pushlink {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let engine = build_engine(&cli)?;

    match cli.command {
        Commands::Register { token, instance_id } => {
            commands::register::run(&engine, &token, &instance_id)?;
        }
        Commands::Subscribe => commands::interests::subscribe(&engine)?,
        Commands::SetInterests { interests } => {
            commands::interests::set(&engine, &interests)?;
        }
        Commands::Unsubscribe => commands::interests::unsubscribe(&engine)?,
        Commands::UnsubscribeAll => commands::interests::unsubscribe_all(&engine)?,
        Commands::Track {
            payload,
            event,
            device_id,
        } => {
            commands::track::run(&engine, &payload, event.into(), &device_id)?;
        }
        Commands::SyncMetadata => commands::metadata::sync(&engine)?,
        Commands::Version => {}
    }

    Ok(())
}

fn build_engine(cli: &Cli) -> Result<CliEngine, Box<dyn std::error::Error>> {
    let url = cli
        .url
        .clone()
        .ok_or("Service URL required (--url or PUSHLINK_URL)")?;
    let config = ServiceConfig::new(url).with_timeout(Duration::from_secs(cli.timeout_secs));

    let transport = ReqwestTransport::new(&config)?;
    let store = FileMetadataStore::open_with_create_dirs(&cli.state)?;
    let environment = match &cli.bundle_id {
        Some(id) => SystemEnvironment::new().with_bundle_identifier(id.clone()),
        None => SystemEnvironment::new(),
    };

    Ok(SyncEngine::new(config, transport, store, environment))
}
