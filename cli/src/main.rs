use anyhow::Result;
use clap::{Parser, Subcommand};
use fts_core::{search_accounts, search_directives, Ledger};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ledger-fts")]
#[command(about = "Full-text search over ledger accounts and directives", long_about = None)]
struct Cli {
    /// Ledger file (.json / .jsonl) or directory of such files
    #[arg(long, default_value = "./ledger")]
    ledger: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search account names; `Assets` also matches `Assets:Bank`
    Accounts {
        /// Query words, all of which must match
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Search directives by their text fields
    Directives {
        #[arg(required = true)]
        query: Vec<String>,
        /// Maximum number of hits to print
        #[arg(long)]
        limit: Option<usize>,
        /// Print hits as JSON lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let ledger = Ledger::from_path(&cli.ledger)?;

    match cli.command {
        Commands::Accounts { query } => {
            let accounts = ledger.accounts();
            let fts = search_accounts(&accounts);
            let query = query.join(" ");
            let hits = fts.search(&query);
            tracing::info!(query = %query, hits = hits.len(), "account search");
            for account in hits {
                println!("{account}");
            }
        }
        Commands::Directives { query, limit, json } => {
            let fts = search_directives(&ledger.directives);
            let query = query.join(" ");
            let hits = fts.search(&query);
            tracing::info!(query = %query, hits = hits.len(), "directive search");
            for directive in hits.into_iter().take(limit.unwrap_or(usize::MAX)) {
                if json {
                    println!("{}", serde_json::to_string(directive)?);
                } else {
                    println!("{} {} {}", directive.date(), directive.kind(), directive.searchable_text());
                }
            }
        }
    }
    Ok(())
}
