// Expense Ledger - Dashboard Server
// Serves the single-page dashboard and its JSON API

use anyhow::{Context, Result};
use clap::Parser;
use expense_ledger::config::{Cli, Config};
use expense_ledger::server::{router, AppState};
use expense_ledger::{ExpenseStore, JsonFileStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    expense_ledger::init_logging("info,tower_http=debug");

    println!("🌐 Expense Tracker - Dashboard Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = Config::load(&cli)?;
    let store = JsonFileStore::new(&config.data_file);

    // Surface a malformed data file at startup instead of on the first request
    let count = store.load()?.len();
    println!("✓ Data file: {} ({} expenses)", config.data_file.display(), count);

    let addr = config.server_addr.clone();
    let app = router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/expenses", addr);
    println!("\n   Press Ctrl+C to stop\n");
    tracing::info!(%addr, "dashboard listening");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
