use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use actionlog::{sync, Config, GitHubClient, RunStore};

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Archive GitHub Actions run history into SQLite", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "actionlog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch new workflow runs for the configured repositories
    Sync {
        /// Only sync this repository (must appear in the config)
        #[arg(long)]
        repo: Option<String>,
    },

    /// Show row counts for the archive database
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Sync { repo } => cmd_sync(&config, repo),
        Commands::Status => cmd_status(&config),
    }
}

fn cmd_sync(config: &Config, repo: Option<String>) -> Result<()> {
    let repos: Vec<String> = match repo {
        Some(name) => {
            if !config.repositories.contains(&name) {
                bail!("Repository {} is not in the config", name);
            }
            vec![name]
        }
        None => config.repositories.clone(),
    };

    let client = GitHubClient::new(&config.token, &config.owner, &config.api_base)?;
    let mut store = RunStore::open(&config.db_path)?;
    store.ensure_schema()?;

    println!(
        "[{}] Syncing {} repositories for {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
        repos.len(),
        config.owner
    );

    let total = sync::sync_all(&client, &mut store, &repos)?;

    println!(
        "[{}] Done: {} pages, {} runs stored, {} skipped, {} log files.",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
        total.pages,
        total.stored,
        total.skipped,
        total.log_files
    );
    Ok(())
}

fn cmd_status(config: &Config) -> Result<()> {
    let store = RunStore::open(&config.db_path)?;
    store.ensure_schema()?;

    println!("Archive {}", config.db_path.display());
    for (table, count) in store.table_counts()? {
        println!("  {:<14} {}", table, count);
    }
    Ok(())
}
