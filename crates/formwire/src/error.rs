//! Error types for forms.

use formwire_router::RouterError;
use thiserror::Error;

/// A boxed error returned by side-effect callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Form-specific errors raised while building or rendering a form.
#[derive(Debug, Error)]
pub enum FormError {
    /// `build()` was called before an error handler was set.
    #[error("Error handler not set")]
    MissingErrorHandler,

    /// `build()` was called before a success handler was set.
    #[error("Success handler not set")]
    MissingSuccessHandler,

    /// The form method is neither GET nor POST.
    #[error("forms submit with GET or POST, not {0}")]
    UnsupportedMethod(formwire_router::Method),

    /// A select field was declared without any options.
    #[error("select field {0} declares no options")]
    EmptySelect(String),

    /// Two fields share a name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    /// A field's `pattern` option is not a valid regex.
    #[error("invalid pattern for field {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// A path parameter constraint is not a valid regex.
    #[error("invalid constraint for path parameter {param}: {source}")]
    InvalidPathConstraint {
        param: String,
        #[source]
        source: regex::Error,
    },

    /// Path parameters with no value supplied at render time.
    #[error("Missing required path parameters: {}", .0.join(", "))]
    MissingPathParameters(Vec<String>),

    /// Path parameters whose value does not match their constraint.
    #[error("Invalid values for path parameters: {}", .0.join(", "))]
    InvalidPathParameters(Vec<String>),

    /// A current value cannot be projected into the field's markup.
    #[error("unsupported value type for field {field}: {kind}")]
    UnsupportedValueType { field: String, kind: &'static str },

    /// The router refused the form's route.
    #[error("failed to register route: {0}")]
    Route(#[from] RouterError),
}

impl FormError {
    /// Returns whether this error was raised by `build()` for an invalid declaration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingErrorHandler
                | Self::MissingSuccessHandler
                | Self::UnsupportedMethod(_)
                | Self::EmptySelect(_)
                | Self::DuplicateField(_)
                | Self::InvalidPattern { .. }
                | Self::InvalidPathConstraint { .. }
        )
    }
}

/// Collection of validation errors by field, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.errors.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.errors.push((field.to_string(), vec![message])),
        }
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns errors for a specific field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Returns the names of the fields that failed.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|(name, _)| name.as_str())
    }

    /// Returns all errors as a flat list.
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |msg| (field.as_str(), msg.as_str()))
            })
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.all_errors() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// The error handed to a form's error handler.
///
/// Validation failures, side-effect failures and unreadable bodies all travel
/// through this one channel.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The submitted values were rejected.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The side-effect callback failed after validation succeeded.
    #[error("side effect failed: {0}")]
    SideEffect(#[source] BoxError),

    /// The request body could not be decoded.
    #[error(transparent)]
    Body(#[from] RouterError),
}

impl SubmissionError {
    /// Returns the per-field failures, if this is a validation error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
