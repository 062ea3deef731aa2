// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use clap::Parser;

use expense_ledger::config::{Cli, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; keep them quiet while the screen is taken over
    expense_ledger::init_logging("error");

    let config = Config::load(&cli)?;
    run_ui_mode(config)
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: Config) -> Result<()> {
    use expense_ledger::{ExpenseStore, JsonFileStore};

    println!("🖥️  Loading Expense Tracker...\n");

    let store = JsonFileStore::new(&config.data_file);

    // Fail before entering raw mode if the file is unreadable
    let count = store.load()?.len();
    println!("✓ Loaded {} expenses from {}", count, config.data_file.display());
    println!("Starting UI... (Press 'q' or choose 7 to quit)\n");

    let mut app = ui::App::new(store, config.id_policy);
    ui::run_ui(&mut app)?;

    let remaining = app.store().load()?.len();
    println!("Goodbye! {} expenses saved in {}", remaining, config.data_file.display());

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the dashboard: cargo run --bin expense-server --features server");
    std::process::exit(1);
}
