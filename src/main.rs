use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::error;
use shopstash::recording::SessionRecord;
use shopstash::{namespaces, PersistentStore, StoreConfig};

#[derive(Parser)]
#[command(name = "shopstash")]
#[command(version = "0.1.0")]
#[command(about = "Inspection tool for the shopstash persistence tier")]
struct Args {
    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Storage directory holding the namespace files (overrides the config)
    #[arg(long)]
    storage_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the namespaces currently holding a value
    Namespaces,
    /// Print the recorded session history, most recent first
    Sessions {
        /// Also dump the captured events as JSON
        #[arg(long)]
        events: bool,
    },
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => StoreConfig::from_file(Path::new(path)).unwrap_or_else(|e| {
            error!("Unable to load configuration from {}: {}", path, e);
            std::process::exit(1);
        }),
        None => StoreConfig::default(),
    };
    if args.storage_path.is_some() {
        config.storage_path = args.storage_path;
    }
    if config.storage_path.is_none() {
        error!("No storage path configured, nothing to inspect");
        std::process::exit(1);
    }

    let store = PersistentStore::from_config(&config).unwrap_or_else(|e| {
        error!("Unable to open the storage sink: {}", e);
        std::process::exit(1);
    });

    match args.command {
        Command::Namespaces => {
            let mut keys = store.stored_keys();
            keys.sort();
            for key in keys {
                println!("{}", key);
            }
        }
        Command::Sessions { events } => {
            let history: Vec<SessionRecord> =
                store.read(namespaces::SESSION_RECORDINGS, Vec::new());
            if history.is_empty() {
                println!("no recorded sessions");
                return;
            }
            for record in history {
                println!(
                    "{}  {} ({})  {} -> {}  duration {}  {:?}  {} event(s)",
                    record.id,
                    record.user_name,
                    record.user_id,
                    record.start_time.to_rfc3339(),
                    record.end_time.to_rfc3339(),
                    record.duration,
                    record.device,
                    record.events.len()
                );
                if events {
                    match serde_json::to_string_pretty(&record.events) {
                        Ok(json) => println!("{}", json),
                        Err(e) => error!("Unable to render events for {}: {}", record.id, e),
                    }
                }
            }
        }
    }
}
