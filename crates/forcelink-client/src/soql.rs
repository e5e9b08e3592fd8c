//! SOQL string utilities: injection escaping and literal formatting.
//!
//! All user-provided values interpolated into SOQL text MUST be escaped with
//! the functions in this module. Date and date-time values are embedded as
//! unquoted literals; use [`date_literal`] and [`datetime_literal`] to format
//! them the way the query endpoint expects.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Escape a string value for use in a SOQL string literal.
///
/// # Example
///
/// ```rust
/// use forcelink_client::soql;
///
/// let safe = soql::escape_string("O'Brien & Co.");
/// assert_eq!(safe, "O\\'Brien & Co.");
///
/// let query = format!("SELECT Id FROM Account WHERE Name = '{}'", safe);
/// ```
#[must_use]
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 16);
    for ch in value.chars() {
        match ch {
            '\'' => escaped.push_str("\\'"),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape a value for use in a SOQL LIKE clause.
///
/// In addition to standard string escaping, this also escapes the LIKE
/// wildcards `%` and `_`.
#[must_use]
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 16);
    for ch in escape_string(value).chars() {
        match ch {
            '%' => escaped.push_str("\\%"),
            '_' => escaped.push_str("\\_"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Returns true if the value is a plausible sObject or field API name
/// (letters, digits, underscores; must start with a letter).
///
/// Object names interpolated into URL paths should pass this check; it is a
/// structural filter, not a guarantee the object exists.
#[must_use]
pub fn is_safe_object_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Format a date as an unquoted SOQL date literal (`YYYY-MM-DD`).
#[must_use]
pub fn date_literal(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a date-time as an unquoted SOQL date-time literal
/// (`YYYY-MM-DDThh:mm:ssZ`).
///
/// SOQL date-time literals are never quoted; quoting one is a query syntax
/// error on the platform side.
#[must_use]
pub fn datetime_literal(datetime: DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("O'Brien"), "O\\'Brien");
        assert_eq!(escape_string("back\\slash"), "back\\\\slash");
        assert_eq!(escape_string("line\nbreak"), "line\\nbreak");
        assert_eq!(escape_string("plain"), "plain");
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_done"), "50\\%\\_done");
        assert_eq!(escape_like("O'Brien%"), "O\\'Brien\\%");
    }

    #[test]
    fn test_is_safe_object_name() {
        assert!(is_safe_object_name("Account"));
        assert!(is_safe_object_name("MyObject__c"));
        assert!(!is_safe_object_name("1Account"));
        assert!(!is_safe_object_name("Bad'; DROP--"));
        assert!(!is_safe_object_name(""));
    }

    #[test]
    fn test_date_literal() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(date_literal(date), "2024-03-07");
    }

    #[test]
    fn test_datetime_literal_is_unquoted_utc() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 7, 14, 30, 0).unwrap();
        let literal = datetime_literal(dt);
        assert_eq!(literal, "2024-03-07T14:30:00Z");
        assert!(!literal.contains('\''));
    }
}
