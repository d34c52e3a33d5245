//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use regex::Regex;
use std::sync::OnceLock;

/// Loose email shape check: something@something.something.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    });
    re.is_match(email)
}

/// Normalize a city name for case-insensitive comparison.
pub fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase()
}

/// Sanitize an uploaded filename down to a safe basename.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('_').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_emails() {
        assert!(is_valid_email("guest@example.com"));
        assert!(is_valid_email("a.b+c@mail.co.in"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("guest"));
        assert!(!is_valid_email("guest@host"));
        assert!(!is_valid_email("guest @example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn normalizes_city_names() {
        assert_eq!(normalize_city("  Mumbai "), "mumbai");
        assert_eq!(normalize_city("PUNE"), "pune");
    }

    #[test]
    fn sanitizes_filenames() {
        assert_eq!(sanitize_filename("party photo.png"), "party_photo.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("***"), "upload");
    }
}
