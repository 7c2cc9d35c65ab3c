//! Field validators and value coercion.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::fields::midnight_utc;

/// Message for a required field with no value.
pub const REQUIRED_MESSAGE: &str = "This field is required.";
/// Message for a value that does not coerce to a number.
pub const INVALID_NUMBER_MESSAGE: &str = "Enter a valid number.";
/// Message for a value that does not coerce to a date.
pub const INVALID_DATE_MESSAGE: &str = "Enter a valid date.";
/// Message for a required checkbox left unchecked.
pub const UNCHECKED_MESSAGE: &str = "This box must be checked.";
/// Message for a file field that received text.
pub const EXPECTED_FILE_MESSAGE: &str = "Expected a file.";
/// Message for a text field that received a file.
pub const EXPECTED_TEXT_MESSAGE: &str = "Expected text, not a file.";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"));

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    fn validate(&self, value: &str) -> Result<(), String>;
}

/// Validator that enforces a maximum length in characters.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("Ensure this value has at most {max_length} characters."),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() > self.max_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Validator that enforces a minimum length in characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("Ensure this value has at least {min_length} characters."),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() < self.min_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Validator for email addresses.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    /// Creates a new EmailValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Enter a valid email address.".to_string(),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if EMAIL.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Validator for absolute URLs.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    message: String,
}

impl UrlValidator {
    /// Creates a new UrlValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Enter a valid URL.".to_string(),
        }
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for UrlValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        match url::Url::parse(value) {
            Ok(_) => Ok(()),
            Err(_) => Err(self.message.clone()),
        }
    }
}

/// Validator requiring the whole value to match a regex.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    message: String,
}

impl RegexValidator {
    /// Creates a new RegexValidator. `pattern` is anchored at both ends.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regex.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("^(?:{pattern})$"))?,
            message: message.into(),
        })
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.pattern.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Validator for `#rrggbb` colors.
#[derive(Debug, Clone)]
pub struct ColorValidator {
    message: String,
}

impl ColorValidator {
    /// Creates a new ColorValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Enter a valid color.".to_string(),
        }
    }
}

impl Default for ColorValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for ColorValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if COLOR.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Validator accepting only the declared choices.
#[derive(Debug, Clone)]
pub struct ChoiceValidator {
    choices: Vec<String>,
    message: String,
}

impl ChoiceValidator {
    /// Creates a new ChoiceValidator.
    pub fn new(choices: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            message: "Select a valid choice.".to_string(),
        }
    }
}

impl Validator for ChoiceValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.choices.iter().any(|c| c == value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Bounds and integrality for numbers.
#[derive(Debug, Clone, Default)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
}

impl RangeValidator {
    /// Creates a new RangeValidator with min and max bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            integer: false,
        }
    }

    /// Also requires a whole number.
    #[must_use]
    pub fn integer(mut self, integer: bool) -> Self {
        self.integer = integer;
        self
    }

    /// Returns every rule `n` breaks.
    pub fn check(&self, n: f64) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(min) = self.min {
            if n < min {
                errors.push(format!("Value must be at least {min}."));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                errors.push(format!("Value must be at most {max}."));
            }
        }
        if self.integer && n.fract() != 0.0 {
            errors.push("Enter a whole number.".to_string());
        }
        errors
    }
}

/// Inclusive bounds for dates.
#[derive(Debug, Clone, Default)]
pub struct DateRangeValidator {
    min: Option<DateTime<Utc>>,
    max: Option<DateTime<Utc>>,
}

impl DateRangeValidator {
    /// Creates a new DateRangeValidator.
    pub fn new(min: Option<DateTime<Utc>>, max: Option<DateTime<Utc>>) -> Self {
        Self { min, max }
    }

    /// Returns every bound `date` breaks.
    pub fn check(&self, date: DateTime<Utc>) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(min) = self.min {
            if date < min {
                errors.push(format!(
                    "Date must be on or after {}.",
                    min.format("%Y-%m-%d")
                ));
            }
        }
        if let Some(max) = self.max {
            if date > max {
                errors.push(format!(
                    "Date must be on or before {}.",
                    max.format("%Y-%m-%d")
                ));
            }
        }
        errors
    }
}

/// Coerces submitted text to a finite number.
pub fn coerce_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerces a slider submission to a number. Blank text reads as `0`.
pub fn coerce_range(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        Some(0.0)
    } else {
        coerce_number(value)
    }
}

/// Coerces submitted text to a UTC instant.
///
/// Accepts RFC 3339, a bare `YYYY-MM-DD` (midnight UTC) and the
/// `datetime-local` forms `YYYY-MM-DDTHH:MM[:SS]` (read as UTC).
pub fn coerce_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(midnight_utc(date));
    }
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Coerces a checkbox submission to a boolean.
///
/// Any non-empty value is checked, including `off`, `false` and `0`.
pub fn coerce_checkbox(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
