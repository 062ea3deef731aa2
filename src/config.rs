// ⚙️ Configuration - where the ledger lives and how front ends behave
// Layered: defaults <- JSON config file <- environment <- command-line flags

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::IdPolicy;

// ============================================================================
// DEFAULTS
// ============================================================================

pub const DEFAULT_DATA_FILE: &str = "expenses.json";
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:3000";

/// Category labels offered by the dashboard form
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "food",
    "transport",
    "bills",
    "entertainment",
    "shopping",
    "other",
];

pub const ENV_CONFIG: &str = "EXPENSE_LEDGER_CONFIG";
pub const ENV_DATA_FILE: &str = "EXPENSE_LEDGER_FILE";
pub const ENV_SERVER_ADDR: &str = "EXPENSE_LEDGER_ADDR";
pub const ENV_ID_POLICY: &str = "EXPENSE_LEDGER_ID_POLICY";

// ============================================================================
// COMMAND LINE
// ============================================================================

/// Flags shared by both binaries. Each one can also come from the environment;
/// a flag on the command line wins over its variable.
#[derive(Parser, Debug, Default, Clone, PartialEq)]
#[command(version, about = "Personal expense ledger", long_about = None)]
pub struct Cli {
    /// Load settings from a JSON config file
    #[arg(long, value_name = "PATH", env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Expense data file [default: expenses.json]
    #[arg(long, value_name = "PATH", env = ENV_DATA_FILE)]
    pub file: Option<PathBuf>,

    /// Dashboard listen address [default: 127.0.0.1:3000]
    #[arg(long, value_name = "HOST:PORT", env = ENV_SERVER_ADDR)]
    pub addr: Option<String>,

    /// max-plus-one | count-plus-one
    #[arg(long, value_name = "POLICY", env = ENV_ID_POLICY)]
    pub id_policy: Option<IdPolicy>,
}

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backing JSON file holding every expense
    pub data_file: PathBuf,

    /// Address the dashboard server binds to
    pub server_addr: String,

    /// How new expenses get their identifier
    pub id_policy: IdPolicy,

    /// Fixed label set for the dashboard (the terminal accepts free text)
    pub categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            id_policy: IdPolicy::default(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    /// Build the effective configuration for a binary:
    /// defaults <- config file <- environment / flags
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_cli(cli);

        tracing::debug!(
            data_file = %config.data_file.display(),
            server_addr = %config.server_addr,
            id_policy = ?config.id_policy,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Load config from a JSON file; missing keys fall back to defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON: {:?}", path.as_ref()))?;

        Ok(config)
    }

    /// Override settings with whatever the command line (or its variables) set
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(file) = &cli.file {
            self.data_file = file.clone();
        }

        if let Some(addr) = &cli.addr {
            self.server_addr = addr.clone();
        }

        if let Some(policy) = cli.id_policy {
            self.id_policy = policy;
        }
    }

    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(prefix: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}.json", prefix, uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.data_file, PathBuf::from("expenses.json"));
        assert_eq!(config.server_addr, "127.0.0.1:3000");
        assert_eq!(config.id_policy, IdPolicy::MaxPlusOne);
        assert_eq!(config.categories.len(), 6);
        assert!(config.is_known_category("food"));
        assert!(!config.is_known_category("Food"), "labels are case-sensitive");
    }

    #[test]
    fn test_cli_flags_override() {
        let cli = Cli::try_parse_from([
            "expense-ledger",
            "--file",
            "/tmp/ledger.json",
            "--addr",
            "0.0.0.0:8080",
            "--id-policy",
            "count-plus-one",
        ])
        .unwrap();

        let mut config = Config::default();
        config.apply_cli(&cli);

        assert_eq!(config.data_file, PathBuf::from("/tmp/ledger.json"));
        assert_eq!(config.server_addr, "0.0.0.0:8080");
        assert_eq!(config.id_policy, IdPolicy::CountPlusOne);
    }

    #[test]
    fn test_cli_accepts_equals_form() {
        let cli = Cli::try_parse_from(["expense-ledger", "--file=x.json", "--id-policy=count"]).unwrap();

        assert_eq!(cli.file, Some(PathBuf::from("x.json")));
        assert_eq!(cli.id_policy, Some(IdPolicy::CountPlusOne));
    }

    #[test]
    fn test_cli_errors() {
        assert!(Cli::try_parse_from(["expense-ledger", "--file"]).is_err());
        assert!(Cli::try_parse_from(["expense-ledger", "--bogus"]).is_err());
        assert!(Cli::try_parse_from(["expense-ledger", "--id-policy", "random"]).is_err());
    }

    #[test]
    fn test_cli_help_is_not_a_config_error() {
        let err = Cli::try_parse_from(["expense-ledger", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--id-policy"));
    }

    // The only test that touches the process environment
    #[test]
    fn test_load_layers_file_env_and_flags() {
        let config_path = temp_path("expense-ledger-config");
        fs::write(
            &config_path,
            r#"{ "data_file": "from-file.json", "server_addr": "10.0.0.1:9000" }"#,
        )
        .unwrap();
        let config_arg = config_path.display().to_string();

        std::env::set_var(ENV_DATA_FILE, "from-env.json");

        let with_flag = Cli::try_parse_from(["expense-ledger", "--config", &config_arg, "--file", "from-flag.json"])
            .map(|cli| Config::load(&cli));
        let env_only = Cli::try_parse_from(["expense-ledger", "--config", &config_arg])
            .map(|cli| Config::load(&cli));

        std::env::remove_var(ENV_DATA_FILE);
        let file_only = Cli::try_parse_from(["expense-ledger", "--config", &config_arg])
            .map(|cli| Config::load(&cli));
        fs::remove_file(&config_path).ok();

        let with_flag = with_flag.unwrap().unwrap();
        assert_eq!(with_flag.data_file, PathBuf::from("from-flag.json"), "flag beats env and file");
        assert_eq!(with_flag.server_addr, "10.0.0.1:9000", "unset layers keep the file value");

        let env_only = env_only.unwrap().unwrap();
        assert_eq!(env_only.data_file, PathBuf::from("from-env.json"), "env beats file");

        let file_only = file_only.unwrap().unwrap();
        assert_eq!(file_only.data_file, PathBuf::from("from-file.json"));
    }

    #[test]
    fn test_from_file_with_partial_keys() {
        let path = temp_path("expense-ledger-config");
        fs::write(
            &path,
            r#"{ "data_file": "custom.json", "categories": ["rent", "food"] }"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.data_file, PathBuf::from("custom.json"));
        assert_eq!(config.categories, vec!["rent".to_string(), "food".to_string()]);
        assert_eq!(config.server_addr, DEFAULT_SERVER_ADDR);
        assert_eq!(config.id_policy, IdPolicy::MaxPlusOne);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file("/definitely/not/here/config.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_with_missing_config_file_fails() {
        let cli = Cli {
            config: Some(PathBuf::from("/definitely/not/here/config.json")),
            ..Cli::default()
        };
        assert!(Config::load(&cli).is_err());
    }
}
