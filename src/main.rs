use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use lhn_rust::hydrate::{self, read_state_file};
use lhn_rust::keys;
use lhn_rust::types::DisplayMode;
use lhn_rust::{KeyValueStore, Sidebar, SidebarConfig};
use log::{info, warn};
use serde_json::Value;
use std::path::PathBuf;

// Prints the sidebar for a dump of the store.
//
// Usage:
//   cargo run -- --state state.json                       # Default mode
//   cargo run -- -s state.json --focus-mode                # #focus mode
//   cargo run -- -s state.json --focused 42                # Treat report 42 as open
//   cargo run -- -s state.json -c sidebar.json --strict    # Fail on bad records

#[derive(Debug, Parser)]
#[command(about = "List the conversations the sidebar would show")]
struct Cli {
    /// JSON object mapping store keys to values
    #[arg(short, long)]
    state: PathBuf,

    /// Sidebar config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force #focus mode regardless of the stored priority mode
    #[arg(long)]
    focus_mode: bool,

    /// Treat this conversation as the one currently open
    #[arg(long)]
    focused: Option<String>,

    /// Exit with an error if any record in the state file fails to decode
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "{} [{:<5}] [{}] - {}",
                Utc::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SidebarConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SidebarConfig::default(),
    };

    let entries = read_state_file(&cli.state)
        .with_context(|| format!("loading state {}", cli.state.display()))?;
    info!("Loaded {} key(s) from {}", entries.len(), cli.state.display());

    let store = KeyValueStore::new();
    store.multi_set(entries);
    if cli.focus_mode {
        store.set(keys::NVP_PRIORITY_MODE, Value::from(DisplayMode::Focus.as_str()));
    }
    if let Some(id) = &cli.focused {
        store.set(keys::CURRENTLY_VIEWED_REPORTID, Value::from(id.as_str()));
    }

    if cli.strict {
        hydrate::hydrate(&store, &config)
            .into_strict()
            .context("state file contains invalid records")?;
    }

    let sidebar = Sidebar::attach(&store, config);
    let rows = sidebar.rows();
    if rows.is_empty() {
        warn!("No conversations are visible");
    }
    for row in rows.iter() {
        let mut markers = String::new();
        if row.is_pinned {
            markers.push('📌');
        }
        if row.is_unread {
            markers.push('●');
        }
        if row.has_draft {
            markers.push('✎');
        }
        println!("{:>8}  {:<3} {}", row.conversation_id, markers, row.display_names);
    }

    Ok(())
}
