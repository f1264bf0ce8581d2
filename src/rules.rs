//! Per-field sitemap rules.
//!
//! Every rule is a pure function returning a [`ValidationResult`]; none of
//! them panic or return `Err`. Optional fields that are blank are treated as
//! absent, the same way the extractor treats empty tags.

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Allowed `<changefreq>` values (compared case-insensitively)
pub const CHANGEFREQ_VALUES: [&str; 7] = [
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

static DATE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_date_regex() -> &'static Regex {
    DATE_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("Failed to compile date regex")
    })
}

/// Outcome of a single rule check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The violation message, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(message) => Some(message.as_str()),
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        ValidationResult::Invalid(message.into())
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Validate a `<loc>` value.
///
/// `context` names the record in the "URL is required" message.
pub fn validate_url(url: Option<&str>, context: &str) -> ValidationResult {
    let url = match url {
        Some(url) if !url.is_empty() => url,
        _ => return ValidationResult::invalid(format!("URL is required ({})", context)),
    };

    if url.contains(['?', '&', '=']) {
        return ValidationResult::invalid(format!(
            "URL must not contain query string parameters: {}",
            url
        ));
    }

    if url != url.trim() {
        return ValidationResult::invalid(format!(
            "URL contains leading or trailing whitespace: '{}'",
            url
        ));
    }

    if !url.starts_with("https://") {
        return ValidationResult::invalid(format!("URL must use HTTPS: {}", url));
    }

    ValidationResult::Valid
}

/// Validate a `<lastmod>` value against today's local date
pub fn validate_date(date: Option<&str>) -> ValidationResult {
    validate_date_on(date, Local::now().date_naive())
}

/// Validate a `<lastmod>` value against an explicit "today"
pub fn validate_date_on(date: Option<&str>, today: NaiveDate) -> ValidationResult {
    let Some(date) = present(date) else {
        return ValidationResult::Valid;
    };

    let Some(caps) = get_date_regex().captures(date) else {
        return ValidationResult::invalid(format!(
            "Invalid date format (expected YYYY-MM-DD): {}",
            date
        ));
    };

    // The regex guarantees ASCII digits, so these parses cannot fail.
    let year: i32 = caps[1].parse().unwrap_or_default();
    let month: u32 = caps[2].parse().unwrap_or_default();
    let day: u32 = caps[3].parse().unwrap_or_default();

    let parsed = match NaiveDate::from_ymd_opt(year, month, day) {
        Some(parsed) if parsed.year() == year && parsed.month() == month && parsed.day() == day => {
            parsed
        }
        _ => return ValidationResult::invalid(format!("Invalid date value: {}", date)),
    };

    if parsed > today {
        return ValidationResult::invalid(format!("Date is in the future: {}", date));
    }

    ValidationResult::Valid
}

/// Validate a `<changefreq>` value
pub fn validate_changefreq(changefreq: Option<&str>) -> ValidationResult {
    let Some(changefreq) = present(changefreq) else {
        return ValidationResult::Valid;
    };

    let lowered = changefreq.to_lowercase();
    if CHANGEFREQ_VALUES.contains(&lowered.as_str()) {
        ValidationResult::Valid
    } else {
        ValidationResult::invalid(format!(
            "Invalid changefreq: {} (expected one of {})",
            changefreq,
            CHANGEFREQ_VALUES.join(", ")
        ))
    }
}

/// Validate a `<priority>` value
pub fn validate_priority(priority: Option<&str>) -> ValidationResult {
    let Some(priority) = present(priority) else {
        return ValidationResult::Valid;
    };

    match priority.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && (0.0..=1.0).contains(&value) => ValidationResult::Valid,
        _ => ValidationResult::invalid(format!(
            "Invalid priority: {} (expected a number between 0.0 and 1.0)",
            priority
        )),
    }
}
