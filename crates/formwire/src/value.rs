//! Typed field values.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use formwire_router::UploadedFile;
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::fields::midnight_utc;

/// A typed value: the output of validation and the input of rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text.
    Text(String),
    /// A finite number.
    Number(f64),
    /// A boolean (checkboxes).
    Bool(bool),
    /// An instant; date fields carry midnight UTC of the chosen day.
    Date(DateTime<Utc>),
    /// An uploaded file.
    File(UploadedFile),
    /// Several values, e.g. the selection of a multi-select.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns a short name for the value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Date(_) => "date",
            Self::File(_) => "file",
            Self::List(_) => "list",
        }
    }

    /// Returns the text, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the number, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the instant, if this is a date.
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Returns the file, if this is a file.
    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }
}

/// Formats a number the way it appears in markup: `30`, not `30.0`.
pub(crate) fn format_number(n: f64) -> String {
    n.to_string()
}

/// Returns the whole-number value of `n`, if it has one.
fn as_whole(n: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; stay inside the exact range.
    const LIMIT: f64 = 9_007_199_254_740_992.0;
    (n.fract() == 0.0 && n.abs() <= LIMIT).then(|| n as i64)
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(midnight_utc(value))
    }
}

impl From<UploadedFile> for FieldValue {
    fn from(value: UploadedFile) -> Self {
        Self::File(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(n) => match as_whole(*n) {
                Some(whole) => serializer.serialize_i64(whole),
                None => serializer.serialize_f64(*n),
            },
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Date(date) => serializer.serialize_str(&date.to_rfc3339()),
            Self::File(file) => {
                let mut state = serializer.serialize_struct("UploadedFile", 3)?;
                state.serialize_field("file_name", &file.file_name)?;
                state.serialize_field("content_type", &file.content_type)?;
                state.serialize_field("size", &file.size())?;
                state.end()
            }
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// The typed record produced by a successful validation.
///
/// Holds exactly the declared fields that produced a value; omitted optional
/// fields are absent and undeclared submitted names never appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedData {
    values: HashMap<String, FieldValue>,
}

impl ValidatedData {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    /// Returns the value for `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Returns whether a value is present for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the text value for `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Returns the numeric value for `name`.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    /// Returns the numeric value for `name` if it is a whole number.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.number(name).and_then(as_whole)
    }

    /// Returns the boolean value for `name`.
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    /// Returns the date value for `name`.
    pub fn date(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name).and_then(FieldValue::as_date)
    }

    /// Returns the uploaded file for `name`.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.get(name).and_then(FieldValue::as_file)
    }

    /// Iterates over the present values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of present values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no values are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the record, returning the underlying map.
    pub fn into_inner(self) -> HashMap<String, FieldValue> {
        self.values
    }

    /// Deserializes the record into a struct.
    ///
    /// Numbers with no fractional part arrive as integers, dates as RFC 3339
    /// strings and files as `{ file_name, content_type, size }` metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not fit `T`.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(serde_json::to_value(self)?)
    }
}

impl FromIterator<(String, FieldValue)> for ValidatedData {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
