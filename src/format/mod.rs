use chrono::{Datelike, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid date: '{0}'")]
    InvalidDate(String),
}

/// French month abbreviations, three letters, capitalized.
const MONTH_ABBR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Format a wire date (`YYYY-MM-DD`) the way the bills table displays it:
/// `"2004-04-04"` → `"4 Avr. 04"`.
///
/// Malformed input is an explicit error; the list view decides whether to
/// keep the raw value (it does).
pub fn format_date(raw: &str) -> Result<String, FormatError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| FormatError::InvalidDate(raw.to_string()))?;
    let abbr = MONTH_ABBR[date.month0() as usize];
    Ok(format!("{} {}. {:02}", date.day(), abbr, date.year() % 100))
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
