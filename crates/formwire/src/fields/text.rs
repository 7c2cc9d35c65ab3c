//! Options for free-text inputs.

/// Options shared by `text`, `url`, `email`, `password` and `tel` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Whether the field may be left empty.
    pub optional: bool,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Minimum length in characters.
    pub min_length: Option<usize>,
    /// Maximum length in characters.
    pub max_length: Option<usize>,
    /// Regex source the whole value must match.
    pub pattern: Option<String>,
}

impl TextOptions {
    /// Creates options for a required field with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the field optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Sets the minimum length.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Sets the pattern. It is compiled when the form is built.
    #[must_use]
    pub fn pattern(mut self, regex: impl Into<String>) -> Self {
        self.pattern = Some(regex.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_required() {
        let options = TextOptions::new();
        assert!(!options.optional);
        assert!(options.pattern.is_none());
    }

    #[test]
    fn test_setters() {
        let options = TextOptions::new()
            .optional()
            .placeholder("Enter your name")
            .min_length(2)
            .max_length(50)
            .pattern("^[A-Za-z]+$");
        assert!(options.optional);
        assert_eq!(options.placeholder.as_deref(), Some("Enter your name"));
        assert_eq!(options.min_length, Some(2));
        assert_eq!(options.max_length, Some(50));
        assert_eq!(options.pattern.as_deref(), Some("^[A-Za-z]+$"));
    }
}
