// 📊 Reports - category totals, month slices, budget check
// Pure functions over a slice of expenses, plus store-backed wrappers

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::db::{Expense, ExpenseStore};

// ============================================================================
// CATEGORY TOTALS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub count: usize,
    pub total: f64,
}

/// Sum amounts per category, sorted by category label
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut grouped: BTreeMap<&str, (usize, f64)> = BTreeMap::new();

    for exp in expenses {
        let entry = grouped.entry(exp.category.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += exp.amount;
    }

    grouped
        .into_iter()
        .map(|(category, (count, total))| CategoryTotal {
            category: category.to_string(),
            count,
            total,
        })
        .collect()
}

pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

// ============================================================================
// MONTH REPORT
// ============================================================================

/// Textual prefix match: `2026` matches every 2026 date, not just a month
pub fn matches_month(expense: &Expense, month_key: &str) -> bool {
    expense.date.starts_with(month_key)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthReport {
    pub month: String,
    pub expenses: Vec<Expense>,
    pub total: f64,
}

impl MonthReport {
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

pub fn month_report(expenses: &[Expense], month_key: &str) -> MonthReport {
    let month = month_key.trim();

    let selected: Vec<Expense> = expenses
        .iter()
        .filter(|e| matches_month(e, month))
        .cloned()
        .collect();

    MonthReport {
        month: month.to_string(),
        total: total_amount(&selected),
        expenses: selected,
    }
}

// ============================================================================
// BUDGET REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    pub month: String,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    /// spent / budget * 100, or 0 for a zero budget
    pub percentage: f64,
    pub over_budget: bool,
    /// percentage as a 0.0..=1.0 fraction for progress bars
    pub progress: f64,
    pub message: String,
}

impl BudgetReport {
    pub fn new(month: impl Into<String>, budget: f64, spent: f64) -> Self {
        let remaining = budget - spent;
        let percentage = if budget == 0.0 {
            0.0
        } else {
            spent / budget * 100.0
        };
        let over_budget = remaining < 0.0;

        let message = if over_budget {
            format!("OVER BUDGET by ${:.2}", remaining.abs())
        } else {
            format!("{:.1}% of budget used", percentage)
        };

        Self {
            month: month.into(),
            budget,
            spent,
            remaining,
            percentage,
            over_budget,
            progress: (percentage / 100.0).clamp(0.0, 1.0),
            message,
        }
    }
}

pub fn budget_report(expenses: &[Expense], month_key: &str, budget: f64) -> BudgetReport {
    let month = month_report(expenses, month_key);
    BudgetReport::new(month.month, budget, month.total)
}

// ============================================================================
// STORE-BACKED OPERATIONS
// ============================================================================

pub fn by_category<S: ExpenseStore + ?Sized>(store: &S) -> Result<Vec<CategoryTotal>> {
    Ok(category_totals(&store.load()?))
}

pub fn by_month<S: ExpenseStore + ?Sized>(store: &S, month_key: &str) -> Result<MonthReport> {
    Ok(month_report(&store.load()?, month_key))
}

pub fn check_budget<S: ExpenseStore + ?Sized>(
    store: &S,
    month_key: &str,
    budget: f64,
) -> Result<BudgetReport> {
    Ok(budget_report(&store.load()?, month_key, budget))
}

// ============================================================================
// TESTS
// ============================================================================
