//! Credential validation rules shared by the signup and login forms.
//!
//! Both functions are pure and recomputed on every edit; callers display the
//! password messages in rule order.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use super::errors::ValidationError;

pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Two-letter codes accepted for the signup "current state" field
pub const US_STATES: [&str; 50] = [
  "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
  "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
  "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
  "WI", "WY",
];

lazy_static! {
  static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
  static ref UPPERCASE: Regex = Regex::new(r"[A-Z]").unwrap();
  static ref LOWERCASE: Regex = Regex::new(r"[a-z]").unwrap();
  static ref DIGIT: Regex = Regex::new(r"[0-9]").unwrap();
  static ref SPECIAL: Regex = Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).unwrap();
}

/// Checks an email address against the `local@domain.tld` shape
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
  if email.is_empty() || !EMAIL_PATTERN.is_match(email) {
    return Err(ValidationError::InvalidEmail);
  }
  Ok(())
}

/// Returns one error per unmet password rule, in fixed rule order
///
/// An empty vector means the password is acceptable.
pub fn validate_password(password: &str) -> Vec<ValidationError> {
  let mut errors = Vec::new();

  if password.chars().count() < PASSWORD_MIN_LENGTH {
    errors.push(ValidationError::PasswordTooShort {
      min: PASSWORD_MIN_LENGTH,
    });
  }
  if !UPPERCASE.is_match(password) {
    errors.push(ValidationError::PasswordMissingUppercase);
  }
  if !LOWERCASE.is_match(password) {
    errors.push(ValidationError::PasswordMissingLowercase);
  }
  if !DIGIT.is_match(password) {
    errors.push(ValidationError::PasswordMissingDigit);
  }
  if !SPECIAL.is_match(password) {
    errors.push(ValidationError::PasswordMissingSpecial);
  }

  errors
}

/// Convenience for templates: the password errors as display strings
pub fn password_messages(password: &str) -> Vec<String> {
  validate_password(password)
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// Formats birthday parts as `YYYY-MM-DD`
///
/// Returns an empty string when any part is missing; a complete but
/// impossible date is rejected.
pub fn format_birthday(
  month: Option<u32>,
  day: Option<u32>,
  year: Option<i32>,
) -> Result<String, ValidationError> {
  let (Some(month), Some(day), Some(year)) = (month, day, year) else {
    return Ok(String::new());
  };
  NaiveDate::from_ymd_opt(year, month, day)
    .map(|date| date.format("%Y-%m-%d").to_string())
    .ok_or_else(|| ValidationError::InvalidField {
      field: "birthday".to_string(),
    })
}

pub fn is_us_state(code: &str) -> bool {
  US_STATES.contains(&code)
}
