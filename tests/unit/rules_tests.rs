use chrono::NaiveDate;

use validate_sitemaps::rules::{
    ValidationResult, validate_changefreq, validate_date, validate_date_on, validate_priority,
    validate_url,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[test]
fn test_url_rules_in_order() {
    let context = "sitemap.xml [url #3]";

    assert_eq!(
        validate_url(None, context).error(),
        Some("URL is required (sitemap.xml [url #3])")
    );
    assert_eq!(
        validate_url(Some(""), context).error(),
        Some("URL is required (sitemap.xml [url #3])")
    );
    assert_eq!(
        validate_url(Some(" https://example.com/cars"), context).error(),
        Some("URL contains leading or trailing whitespace: ' https://example.com/cars'")
    );
    assert_eq!(
        validate_url(Some("http://example.com/cars"), context).error(),
        Some("URL must use HTTPS: http://example.com/cars")
    );
    assert_eq!(
        validate_url(Some("HTTPS://example.com/cars"), context).error(),
        Some("URL must use HTTPS: HTTPS://example.com/cars")
    );
    assert_eq!(
        validate_url(Some("https://example.com/cars"), context),
        ValidationResult::Valid
    );
}

#[test]
fn test_query_characters_rejected_anywhere() {
    for url in [
        "https://example.com/search?q=bmw",
        "https://example.com/a&b",
        "https://example.com/key=value",
        "http://example.com/?page=2",
    ] {
        let result = validate_url(Some(url), "ctx");
        let message = result.error().unwrap();
        assert!(
            message.starts_with("URL must not contain query string parameters"),
            "unexpected message for {}: {}",
            url,
            message
        );
    }
}

#[test]
fn test_dates() {
    assert!(validate_date_on(None, today()).is_valid());
    assert!(validate_date_on(Some("2024-02-29"), today()).is_valid());
    assert!(validate_date_on(Some("2025-06-01"), today()).is_valid());

    assert_eq!(
        validate_date_on(Some("2024-1-5"), today()).error(),
        Some("Invalid date format (expected YYYY-MM-DD): 2024-1-5")
    );
    assert_eq!(
        validate_date_on(Some("2024-01-15T10:00:00Z"), today()).error(),
        Some("Invalid date format (expected YYYY-MM-DD): 2024-01-15T10:00:00Z")
    );
    assert_eq!(
        validate_date_on(Some("2023-02-29"), today()).error(),
        Some("Invalid date value: 2023-02-29")
    );
    assert_eq!(
        validate_date_on(Some("2025-06-02"), today()).error(),
        Some("Date is in the future: 2025-06-02")
    );
}

#[test]
fn test_far_future_date_against_real_clock() {
    assert_eq!(
        validate_date(Some("2999-01-01")).error(),
        Some("Date is in the future: 2999-01-01")
    );
    assert!(validate_date(Some("2000-01-01")).is_valid());
}

#[test]
fn test_changefreq() {
    assert!(validate_changefreq(None).is_valid());
    for value in ["always", "Hourly", "DAILY", "weekly", "monthly", "yearly", "never"] {
        assert!(validate_changefreq(Some(value)).is_valid(), "{}", value);
    }

    let message = validate_changefreq(Some("fortnightly")).error().unwrap().to_string();
    assert!(message.starts_with("Invalid changefreq: fortnightly"));
    assert!(message.contains("always, hourly, daily, weekly, monthly, yearly, never"));
}

#[test]
fn test_blank_optional_fields_are_absent() {
    for blank in ["", "  "] {
        assert!(validate_date_on(Some(blank), today()).is_valid());
        assert!(validate_changefreq(Some(blank)).is_valid());
        assert!(validate_priority(Some(blank)).is_valid());
    }
    assert!(!validate_url(Some(""), "ctx").is_valid());
}

#[test]
fn test_priority() {
    assert!(validate_priority(None).is_valid());
    for value in ["0", "0.0", "0.5", "1", "1.0", " 0.8 "] {
        assert!(validate_priority(Some(value)).is_valid(), "{}", value);
    }
    for value in ["-0.1", "1.01", "high", "NaN", "inf"] {
        assert_eq!(
            validate_priority(Some(value)).error(),
            Some(format!(
                "Invalid priority: {} (expected a number between 0.0 and 1.0)",
                value
            ))
            .as_deref(),
            "{}",
            value
        );
    }
}
