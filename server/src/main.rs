use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};
use fts_server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Ledger file (.json / .jsonl) or directory of such files
    #[arg(long, default_value = "./ledger")]
    ledger: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let app: Router = build_app(args.ledger.clone())?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, ledger = %args.ledger, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
