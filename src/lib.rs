// Expense Ledger - Core Library
// Shared storage and reporting for the terminal menu and the web dashboard

pub mod config;
pub mod db;
pub mod input;
pub mod reports;

// Only compile the HTTP layer when the server feature is enabled
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use db::{
    Expense, NewExpense, IdPolicy, ExpenseStore, JsonFileStore, MemoryStore,
    add_expense, delete_expense, today,
};
pub use input::{
    ValidationError, ValidationResult,
    parse_amount, parse_budget, parse_date, parse_id, validate_new_expense,
};
pub use reports::{
    CategoryTotal, MonthReport, BudgetReport,
    category_totals, month_report, budget_report, total_amount,
    by_category, by_month, check_budget,
};

/// Install the tracing subscriber used by both binaries.
/// `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
