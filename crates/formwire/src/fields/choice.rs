//! Options for checkbox, file and select inputs.

/// Options for `checkbox` fields.
///
/// A required checkbox must be checked for the submission to validate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckboxOptions {
    /// Whether the box may be left unchecked.
    pub optional: bool,
}

impl CheckboxOptions {
    /// Creates options for a box that must be checked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows the box to be left unchecked.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Options for `file` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOptions {
    /// Whether an upload may be omitted.
    pub optional: bool,
    /// Value of the `accept` attribute, e.g. `image/*`.
    pub accept: Option<String>,
}

impl FileOptions {
    /// Creates options for a required upload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the upload optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Restricts the file picker to the given types.
    #[must_use]
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }
}

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl SelectOption {
    /// Creates a choice.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options for `select` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Choices in display order. Must not be empty.
    pub options: Vec<SelectOption>,
    /// Whether a choice may be omitted.
    pub optional: bool,
    /// Text of a disabled leading option shown while nothing is selected.
    pub placeholder: Option<String>,
}

impl SelectOptions {
    /// Creates options from `(value, label)` pairs.
    pub fn new<V, L>(choices: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        Self {
            options: choices
                .into_iter()
                .map(|(value, label)| SelectOption::new(value, label))
                .collect(),
            optional: false,
            placeholder: None,
        }
    }

    /// Makes the choice optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the placeholder option text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Returns whether `value` is one of the declared choices.
    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}
