//! Form field declarations.
//!
//! A field is a name, an optional display label and a [`FieldKind`] carrying the
//! options that kind accepts. The same declaration drives rendering and
//! validation, so every option here has a counterpart in both.

mod choice;
mod date;
mod number;
mod text;

pub use choice::{CheckboxOptions, FileOptions, SelectOption, SelectOptions};
pub use date::{midnight_utc, DateOptions};
pub use number::{NumberOptions, RangeOptions};
pub use text::TextOptions;

/// The closed set of field kinds, each with its own options.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text.
    Text(TextOptions),
    /// Absolute URL.
    Url(TextOptions),
    /// Email address.
    Email(TextOptions),
    /// Password; never echoed back into markup.
    Password(TextOptions),
    /// Telephone number.
    Tel(TextOptions),
    /// Number, coerced from its submitted text.
    Number(NumberOptions),
    /// Slider; always required.
    Range(RangeOptions),
    /// Calendar date.
    Date(DateOptions),
    /// Checkbox, coerced to a boolean.
    Checkbox(CheckboxOptions),
    /// File upload; switches the form to multipart encoding.
    File(FileOptions),
    /// Closed choice among declared options.
    Select(SelectOptions),
    /// `#rrggbb` color; always required.
    Color,
    /// Hidden value; always required, never labelled.
    Hidden,
}

impl FieldKind {
    /// Returns the HTML input type (or `select`).
    pub fn input_type(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Url(_) => "url",
            Self::Email(_) => "email",
            Self::Password(_) => "password",
            Self::Tel(_) => "tel",
            Self::Number(_) => "number",
            Self::Range(_) => "range",
            Self::Date(_) => "date",
            Self::Checkbox(_) => "checkbox",
            Self::File(_) => "file",
            Self::Select(_) => "select",
            Self::Color => "color",
            Self::Hidden => "hidden",
        }
    }

    /// Returns the text options of a free-text kind.
    pub fn text_options(&self) -> Option<&TextOptions> {
        match self {
            Self::Text(options)
            | Self::Url(options)
            | Self::Email(options)
            | Self::Password(options)
            | Self::Tel(options) => Some(options),
            _ => None,
        }
    }
}

/// Declaration of one form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field name; the key for rendering, submission and validated output.
    pub name: String,
    /// Display label. Hidden fields have none.
    pub label: Option<String>,
    /// Kind and kind-specific options.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Creates a labelled field.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: Some(label.into()),
            kind,
        }
    }

    /// Creates a hidden field.
    pub fn hidden(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind: FieldKind::Hidden,
        }
    }

    /// Returns whether the field may be omitted.
    ///
    /// Range, color and hidden fields are always required. An optional checkbox
    /// may be left unchecked.
    pub fn is_optional(&self) -> bool {
        match &self.kind {
            FieldKind::Text(o)
            | FieldKind::Url(o)
            | FieldKind::Email(o)
            | FieldKind::Password(o)
            | FieldKind::Tel(o) => o.optional,
            FieldKind::Number(o) => o.optional,
            FieldKind::Date(o) => o.optional,
            FieldKind::Checkbox(o) => o.optional,
            FieldKind::File(o) => o.optional,
            FieldKind::Select(o) => o.optional,
            FieldKind::Range(_) | FieldKind::Color | FieldKind::Hidden => false,
        }
    }

    /// Returns the label, falling back to the name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_spec() {
        let field = FieldSpec::new("age", "Age", FieldKind::Number(NumberOptions::new()));
        assert_eq!(field.name, "age");
        assert_eq!(field.display_label(), "Age");
        assert_eq!(field.kind.input_type(), "number");
        assert!(!field.is_optional());
    }

    #[test]
    fn test_optionality() {
        let optional = FieldSpec::new(
            "bio",
            "Bio",
            FieldKind::Text(TextOptions::new().optional()),
        );
        assert!(optional.is_optional());
        assert!(!FieldSpec::new("c", "C", FieldKind::Color).is_optional());
        assert!(!FieldSpec::hidden("token").is_optional());
        assert!(!FieldSpec::new("v", "V", FieldKind::Range(RangeOptions::new())).is_optional());
    }

    #[test]
    fn test_hidden_has_no_label() {
        let field = FieldSpec::hidden("csrf_token");
        assert!(field.label.is_none());
        assert_eq!(field.display_label(), "csrf_token");
    }

    #[test]
    fn test_text_options_accessor() {
        let kind = FieldKind::Email(TextOptions::new().max_length(50));
        assert_eq!(kind.text_options().and_then(|o| o.max_length), Some(50));
        assert!(FieldKind::Color.text_options().is_none());
    }
}
