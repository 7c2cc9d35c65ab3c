//! Options for numeric inputs.

/// Options for `number` fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberOptions {
    /// Whether the field may be left empty.
    pub optional: bool,
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
    /// Whether only whole numbers are accepted.
    pub integer: bool,
}

impl NumberOptions {
    /// Creates options for a required, unbounded number.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the field optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the lower bound.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Accepts whole numbers only.
    #[must_use]
    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }
}

/// Options for `range` fields. A range always requires a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeOptions {
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
    /// Whether only whole numbers are accepted.
    pub integer: bool,
}

impl RangeOptions {
    /// Creates options for an unbounded range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lower bound.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Accepts whole numbers only.
    #[must_use]
    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }
}
