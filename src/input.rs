// ✍️ Input parsing - shared by the terminal menu and the dashboard API

use chrono::NaiveDate;

use crate::db::{today, NewExpense};

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

fn parse_number(field: &str, input: &str, invalid: &str) -> Result<f64, ValidationError> {
    let cleaned = input.trim();
    let cleaned = cleaned.strip_prefix('$').unwrap_or(cleaned).trim();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::new(field, invalid)),
    }
}

/// Expense amount: a number greater than zero
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    let amount = parse_number("amount", input, "Invalid amount. Please enter a number.")?;
    if amount <= 0.0 {
        return Err(ValidationError::new("amount", "Amount must be greater than zero."));
    }
    Ok(amount)
}

/// Monthly budget: any non-negative number (zero reports 0% used)
pub fn parse_budget(input: &str) -> Result<f64, ValidationError> {
    let budget = parse_number("budget", input, "Invalid budget. Please enter a number.")?;
    if budget < 0.0 {
        return Err(ValidationError::new("budget", "Budget cannot be negative."));
    }
    Ok(budget)
}

pub fn parse_id(input: &str) -> Result<u64, ValidationError> {
    match input.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::new("id", "Invalid ID. Please enter a number.")),
    }
}

/// Blank means today; otherwise a real calendar date in `YYYY-MM-DD`
pub fn parse_date(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(today());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| ValidationError::new("date", "Invalid date. Use YYYY-MM-DD."))
}

/// Dashboard rules: positive amount, non-empty description,
/// and (when a label set is given) a known category
pub fn validate_new_expense(new: &NewExpense, categories: Option<&[String]>) -> ValidationResult {
    let mut errors = Vec::new();

    if !new.amount.is_finite() || new.amount <= 0.0 {
        errors.push(ValidationError::new("amount", "Please enter a valid amount."));
    }

    if new.description.trim().is_empty() {
        errors.push(ValidationError::new("description", "Please enter a description."));
    }

    if let Some(labels) = categories {
        if !labels.iter().any(|label| label == &new.category) {
            errors.push(ValidationError::new(
                "category",
                format!("Unknown category '{}'.", new.category),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Join validation errors into one user-facing line
pub fn describe_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50"), Ok(12.5));
        assert_eq!(parse_amount("  $7 "), Ok(7.0));
        assert_eq!(parse_amount("$ 3.25"), Ok(3.25));

        let err = parse_amount("abc").unwrap_err();
        assert_eq!(err.field, "amount");
        assert_eq!(err.message, "Invalid amount. Please enter a number.");

        assert!(parse_amount("").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("0").is_err(), "zero is rejected");
        assert!(parse_amount("-4").is_err());
    }

    #[test]
    fn test_parse_budget() {
        assert_eq!(parse_budget("100"), Ok(100.0));
        assert_eq!(parse_budget("0"), Ok(0.0));
        assert!(parse_budget("-1").is_err());
        assert!(parse_budget("lots").is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(" 3 "), Ok(3));
        assert!(parse_id("0").is_err());
        assert!(parse_id("-1").is_err());
        assert!(parse_id("two").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-02-15"), Ok("2026-02-15".to_string()));
        assert_eq!(parse_date(""), Ok(today()));
        assert!(parse_date("2026-02-30").is_err(), "not a calendar date");
        assert!(parse_date("15/02/2026").is_err());
    }

    #[test]
    fn test_validate_new_expense() {
        let labels = vec!["food".to_string(), "bills".to_string()];

        let ok = NewExpense::new(5.0, "food", "Lunch");
        assert!(validate_new_expense(&ok, Some(&labels)).is_ok());

        let bad = NewExpense::new(0.0, "rent", "   ");
        let errors = validate_new_expense(&bad, Some(&labels)).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["amount", "description", "category"]);

        let free_text = NewExpense::new(5.0, "rent", "April");
        assert!(validate_new_expense(&free_text, None).is_ok(), "no label set means free text");
    }

    #[test]
    fn test_describe_errors() {
        let errors = vec![
            ValidationError::new("amount", "Please enter a valid amount."),
            ValidationError::new("description", "Please enter a description."),
        ];
        assert_eq!(
            describe_errors(&errors),
            "Please enter a valid amount. Please enter a description."
        );
    }
}
