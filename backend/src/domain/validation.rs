//! Field-level validation shared by the domain services.
//!
//! Each helper reports the most specific dictionary kind: absent values are
//! `MISSING_REQUIRED_FIELDS`, overlong text is `FIELD_TOO_LONG`, and values
//! that do not parse are `FIELD_INVALID_FORMAT`.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde_json::json;

use super::{Error, ErrorKind};

/// Longest accepted free-text value, in characters.
pub const MAX_TEXT_LEN: usize = 100;

/// Accumulates required fields so every missing one is reported together.
///
/// # Examples
/// ```
/// use adoptme_backend::domain::RequiredFields;
///
/// let mut fields = RequiredFields::default();
/// let name = fields.take("name", Some("Rex".to_owned()));
/// let _specie = fields.take("specie", None);
/// let err = fields.finish().expect_err("specie missing");
/// assert_eq!(name, "Rex");
/// assert_eq!(err.details().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    /// Take a field value, recording it as missing when absent or blank.
    pub fn take(&mut self, field: &'static str, value: Option<String>) -> String {
        match value.map(|raw| raw.trim().to_owned()) {
            Some(text) if !text.is_empty() => text,
            _ => {
                self.missing.push(field);
                String::new()
            }
        }
    }

    /// Fail with `MISSING_REQUIRED_FIELDS` if anything was missing.
    ///
    /// # Errors
    /// Returns an [`Error`] listing the missing field names in order.
    pub fn finish(self) -> Result<(), Error> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(Error::missing_fields(self.missing))
        }
    }
}

/// Trim `value` and enforce [`MAX_TEXT_LEN`].
///
/// # Errors
/// `FIELD_TOO_SHORT` when blank, `FIELD_TOO_LONG` when overlong.
pub fn bounded_text(field: &str, value: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::new(ErrorKind::FieldTooShort).with_detail(json!({ "field": field, "min": 1 })));
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(Error::new(ErrorKind::FieldTooLong)
            .with_detail(json!({ "field": field, "max": MAX_TEXT_LEN })));
    }
    Ok(trimmed.to_owned())
}

/// Parse a birth date given as `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// # Errors
/// `FIELD_INVALID_FORMAT` when neither form parses.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, Error> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|ts| ts.date_naive()))
        .map_err(|_| invalid_format("birthDate", raw))
}

fn invalid_format(field: &str, value: &str) -> Error {
    Error::new(ErrorKind::FieldInvalidFormat).with_detail(json!({ "field": field, "value": value }))
}

/// Normalised (lower-case, trimmed) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an email address.
    ///
    /// # Errors
    /// `FIELD_INVALID_FORMAT` unless the value has a non-empty local part,
    /// a dotted domain, and no whitespace.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let candidate = raw.trim().to_lowercase();
        let valid = match candidate.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !candidate.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if valid {
            Ok(Self(candidate))
        } else {
            Err(invalid_format("email", raw))
        }
    }

    /// Normalised address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    #[test]
    fn required_fields_report_all_missing_in_order() {
        let mut fields = RequiredFields::default();
        let _ = fields.take("name", None);
        let _ = fields.take("specie", Some("   ".to_owned()));
        let _ = fields.take("birthDate", Some("2020-01-01".to_owned()));
        let err = fields.finish().expect_err("two fields missing");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredFields);
        assert_eq!(err.details(), &[Value::from("name"), Value::from("specie")]);
    }

    #[rstest]
    #[case("2020-02-29")]
    #[case("2020-02-29T10:00:00Z")]
    #[case("2020-02-29T23:30:00-03:00")]
    fn birth_dates_accept_dates_and_timestamps(#[case] raw: &str) {
        let date = parse_birth_date(raw).expect("valid date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 2, 29).expect("leap day"));
    }

    #[rstest]
    #[case("29/02/2020")]
    #[case("2021-02-29")]
    #[case("yesterday")]
    fn birth_dates_reject_garbage(#[case] raw: &str) {
        let err = parse_birth_date(raw).expect_err("invalid date");
        assert_eq!(err.kind(), ErrorKind::FieldInvalidFormat);
    }

    #[rstest]
    #[case("ana@example.com", "ana@example.com")]
    #[case("  Ana@Example.COM ", "ana@example.com")]
    fn emails_are_normalised(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(EmailAddress::parse(raw).expect("valid").as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("ana")]
    #[case("@example.com")]
    #[case("ana@example")]
    #[case("ana@@example.com")]
    #[case("ana maria@example.com")]
    #[case("ana@.com")]
    fn emails_reject_malformed(#[case] raw: &str) {
        let err = EmailAddress::parse(raw).expect_err("invalid email");
        assert_eq!(err.kind(), ErrorKind::FieldInvalidFormat);
    }

    #[test]
    fn bounded_text_enforces_limits() {
        assert_eq!(bounded_text("name", "  Rex ").expect("valid"), "Rex");
        assert_eq!(
            bounded_text("name", " ").expect_err("blank").kind(),
            ErrorKind::FieldTooShort
        );
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(
            bounded_text("name", &long).expect_err("too long").kind(),
            ErrorKind::FieldTooLong
        );
    }
}
