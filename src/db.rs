use anyhow::{bail, Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One recorded expense, exactly as it appears in the backing file
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Expense {
    pub id: u64,
    pub amount: f64,
    pub category: String,
    pub description: String,
    /// ISO `YYYY-MM-DD`; kept as text so month filters are plain prefix matches
    pub date: String,
}

impl Expense {
    /// One-line label used by delete pickers
    pub fn label(&self) -> String {
        format!(
            "ID {}: ${:.2} - {} ({})",
            self.id, self.amount, self.description, self.date
        )
    }
}

/// Input for `add_expense` - everything except the identifier
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub description: String,
    /// None means today's local date
    pub date: Option<String>,
}

impl NewExpense {
    pub fn new(amount: f64, category: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
            date: None,
        }
    }

    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Today's local date in storage format
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

// ============================================================================
// IDENTIFIER POLICY
// ============================================================================

/// How the next identifier is chosen when an expense is added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdPolicy {
    /// Highest existing id + 1. Never reuses an id still present.
    #[default]
    MaxPlusOne,
    /// Record count + 1. Collides after deletions; kept for legacy files.
    CountPlusOne,
}

impl IdPolicy {
    /// Fails instead of wrapping when the identifier space is used up
    pub fn next_id(&self, records: &[Expense]) -> Result<u64> {
        let base = match self {
            IdPolicy::MaxPlusOne => records.iter().map(|e| e.id).max().unwrap_or(0),
            IdPolicy::CountPlusOne => {
                u64::try_from(records.len()).context("Record count does not fit an id")?
            }
        };

        match base.checked_add(1) {
            Some(id) => Ok(id),
            None => bail!("Identifier space exhausted: no id after {}", base),
        }
    }
}

impl FromStr for IdPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "max-plus-one" | "max" => Ok(IdPolicy::MaxPlusOne),
            "count-plus-one" | "count" => Ok(IdPolicy::CountPlusOne),
            other => bail!(
                "Unknown id policy '{}' (expected max-plus-one or count-plus-one)",
                other
            ),
        }
    }
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdPolicy::MaxPlusOne => write!(f, "max-plus-one"),
            IdPolicy::CountPlusOne => write!(f, "count-plus-one"),
        }
    }
}

// ============================================================================
// STORAGE
// ============================================================================

/// Whole-collection storage: every operation reads everything and writes everything back
pub trait ExpenseStore {
    /// All expenses in stored order (empty when nothing was saved yet)
    fn load(&self) -> Result<Vec<Expense>>;

    /// Replace the stored collection
    fn save(&self, records: &[Expense]) -> Result<()>;

    /// Human-readable location, shown by the front ends
    fn describe(&self) -> String;
}

impl<S: ExpenseStore + ?Sized> ExpenseStore for Box<S> {
    fn load(&self) -> Result<Vec<Expense>> {
        (**self).load()
    }

    fn save(&self, records: &[Expense]) -> Result<()> {
        (**self).save(records)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Pretty-printed JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExpenseStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Expense>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no data file yet, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read expenses file: {:?}", self.path))?;

        let records: Vec<Expense> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse expenses JSON: {:?}", self.path))?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded expenses");
        Ok(records)
    }

    // Not atomic: a crash mid-write can truncate the file
    fn save(&self, records: &[Expense]) -> Result<()> {
        let content =
            serde_json::to_string_pretty(records).context("Failed to serialize expenses")?;

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write expenses file: {:?}", self.path))?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "saved expenses");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process store for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<Expense>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Expense>) -> Self {
        Self {
            records: RefCell::new(records),
        }
    }
}

impl ExpenseStore for MemoryStore {
    fn load(&self) -> Result<Vec<Expense>> {
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &[Expense]) -> Result<()> {
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

// ============================================================================
// MUTATIONS
// ============================================================================

/// Append a new expense and persist the whole collection.
/// Amount and description checks belong to the caller.
pub fn add_expense<S: ExpenseStore + ?Sized>(
    store: &S,
    new: NewExpense,
    policy: IdPolicy,
) -> Result<Expense> {
    let mut records = store.load()?;

    let expense = Expense {
        id: policy.next_id(&records)?,
        amount: new.amount,
        category: new.category,
        description: new.description,
        date: new.date.unwrap_or_else(today),
    };

    records.push(expense.clone());
    store.save(&records)?;

    tracing::info!(
        id = expense.id,
        amount = expense.amount,
        category = %expense.category,
        "expense added"
    );

    Ok(expense)
}

/// Remove every record carrying `id`; returns how many were removed.
/// A missing id is not an error and the collection is still written back.
pub fn delete_expense<S: ExpenseStore + ?Sized>(store: &S, id: u64) -> Result<usize> {
    let mut records = store.load()?;
    let before = records.len();

    records.retain(|e| e.id != id);
    store.save(&records)?;

    let removed = before - records.len();
    tracing::info!(id, removed, "expense delete requested");

    Ok(removed)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create test expenses
    fn create_test_expense(id: u64, amount: f64, category: &str, date: &str) -> Expense {
        Expense {
            id,
            amount,
            category: category.to_string(),
            description: format!("test {}", id),
            date: date.to_string(),
        }
    }

    fn temp_store() -> JsonFileStore {
        let path = std::env::temp_dir().join(format!(
            "expense-ledger-{}-{}.json",
            std::process::id(),
            uuid::Uuid::new_v4()
        ));
        JsonFileStore::new(path)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let store = temp_store();

        let records = store.load().unwrap();

        assert!(records.is_empty(), "Missing file should load as empty");
        assert!(!store.path().exists(), "Loading must not create the file");
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let store = MemoryStore::new();

        for i in 0..5 {
            let new = NewExpense::new(10.0 + i as f64, "food", format!("meal {}", i)).on("2026-02-01");
            add_expense(&store, new, IdPolicy::MaxPlusOne).unwrap();
        }

        let records = store.load().unwrap();
        let ids: Vec<u64> = records.iter().map(|e| e.id).collect();
        let descriptions: Vec<&str> = records.iter().map(|e| e.description.as_str()).collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(descriptions, vec!["meal 0", "meal 1", "meal 2", "meal 3", "meal 4"]);
    }

    #[test]
    fn test_add_defaults_date_to_today() {
        let store = MemoryStore::new();

        let expense = add_expense(&store, NewExpense::new(3.5, "transport", "bus"), IdPolicy::default()).unwrap();

        assert_eq!(expense.date, today());
        assert_eq!(expense.date.len(), 10);
    }

    #[test]
    fn test_max_plus_one_after_delete() {
        let store = MemoryStore::new();
        for _ in 0..3 {
            add_expense(&store, NewExpense::new(1.0, "food", "x").on("2026-01-01"), IdPolicy::MaxPlusOne).unwrap();
        }

        delete_expense(&store, 2).unwrap();
        let added = add_expense(&store, NewExpense::new(1.0, "food", "y").on("2026-01-02"), IdPolicy::MaxPlusOne).unwrap();

        assert_eq!(added.id, 4, "max + 1 should skip past the highest id");
        let ids: Vec<u64> = store.load().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_count_plus_one_reproduces_legacy_collision() {
        let store = MemoryStore::new();
        for _ in 0..3 {
            add_expense(&store, NewExpense::new(1.0, "food", "x").on("2026-01-01"), IdPolicy::CountPlusOne).unwrap();
        }

        delete_expense(&store, 2).unwrap();
        let added = add_expense(&store, NewExpense::new(1.0, "food", "y").on("2026-01-02"), IdPolicy::CountPlusOne).unwrap();

        assert_eq!(added.id, 3);
        let ids: Vec<u64> = store.load().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3, 3], "legacy policy produces a duplicate id");
    }

    #[test]
    fn test_delete_existing_removes_only_target() {
        let records = vec![
            create_test_expense(1, 10.0, "food", "2026-02-01"),
            create_test_expense(2, 20.0, "bills", "2026-02-02"),
            create_test_expense(3, 30.0, "food", "2026-02-03"),
        ];
        let store = MemoryStore::with_records(records.clone());

        let removed = delete_expense(&store, 2).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.load().unwrap(), vec![records[0].clone(), records[2].clone()]);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let records = vec![
            create_test_expense(1, 10.0, "food", "2026-02-01"),
            create_test_expense(2, 20.0, "bills", "2026-02-02"),
        ];
        let store = MemoryStore::with_records(records.clone());

        let removed = delete_expense(&store, 42).unwrap();

        assert_eq!(removed, 0, "Deleting an unknown id is a silent success");
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn test_delete_removes_all_duplicates() {
        let store = MemoryStore::with_records(vec![
            create_test_expense(1, 1.0, "food", "2026-02-01"),
            create_test_expense(3, 2.0, "food", "2026-02-02"),
            create_test_expense(3, 3.0, "food", "2026-02-03"),
        ]);

        assert_eq!(delete_expense(&store, 3).unwrap(), 2);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_file_round_trip_is_stable() {
        let store = temp_store();
        add_expense(&store, NewExpense::new(12.5, "food", "Lunch").on("2026-02-15"), IdPolicy::default()).unwrap();
        add_expense(&store, NewExpense::new(40.0, "bills", "Phone").on("2026-02-20"), IdPolicy::default()).unwrap();

        let first = fs::read_to_string(store.path()).unwrap();
        let records = store.load().unwrap();
        store.save(&records).unwrap();
        let second = fs::read_to_string(store.path()).unwrap();
        fs::remove_file(store.path()).ok();

        assert_eq!(first, second, "save(load()) must not change the file");
        assert!(first.contains("\n  {\n    \"id\": 1,"), "file should be pretty-printed with 2 spaces");
    }

    #[test]
    fn test_reads_legacy_integer_amounts() {
        let store = temp_store();
        fs::write(
            store.path(),
            r#"[
  {
    "id": 1,
    "amount": 12,
    "category": "food",
    "description": "Pizza",
    "date": "2026-02-15"
  }
]"#,
        )
        .unwrap();

        let records = store.load().unwrap();
        fs::remove_file(store.path()).ok();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 12.0);
        assert_eq!(records[0].description, "Pizza");
    }

    #[test]
    fn test_malformed_file_fails() {
        let store = temp_store();
        fs::write(store.path(), "{ not json").unwrap();

        let result = store.load();
        fs::remove_file(store.path()).ok();

        let err = result.expect_err("Malformed content must surface as an error");
        assert!(format!("{:#}", err).contains("Failed to parse expenses JSON"));
    }

    #[test]
    fn test_add_fails_when_id_space_exhausted() {
        let store = MemoryStore::with_records(vec![create_test_expense(u64::MAX, 1.0, "food", "2026-02-01")]);

        let err = add_expense(&store, NewExpense::new(2.0, "food", "one more").on("2026-02-02"), IdPolicy::MaxPlusOne)
            .expect_err("No id exists after u64::MAX");

        assert!(format!("{:#}", err).contains("Identifier space exhausted"));
        assert_eq!(store.load().unwrap().len(), 1, "Nothing is saved when no id can be assigned");
    }

    #[test]
    fn test_loads_ids_beyond_32_bits() {
        let store = temp_store();
        fs::write(
            store.path(),
            r#"[{"id": 5000000000, "amount": 3.0, "category": "food", "description": "Big id", "date": "2026-02-15"}]"#,
        )
        .unwrap();

        let records = store.load();
        let added = add_expense(&store, NewExpense::new(1.0, "food", "next").on("2026-02-16"), IdPolicy::MaxPlusOne);
        fs::remove_file(store.path()).ok();

        assert_eq!(records.unwrap()[0].id, 5_000_000_000);
        assert_eq!(added.unwrap().id, 5_000_000_001);
    }

    #[test]
    fn test_id_policy_parse() {
        assert_eq!("max-plus-one".parse::<IdPolicy>().unwrap(), IdPolicy::MaxPlusOne);
        assert_eq!(" COUNT ".parse::<IdPolicy>().unwrap(), IdPolicy::CountPlusOne);
        assert!("sequence".parse::<IdPolicy>().is_err());
        assert_eq!(IdPolicy::CountPlusOne.to_string(), "count-plus-one");
    }

    #[test]
    fn test_expense_label() {
        let expense = create_test_expense(7, 4.5, "food", "2026-03-01");
        assert_eq!(expense.label(), "ID 7: $4.50 - test 7 (2026-03-01)");
    }
}
