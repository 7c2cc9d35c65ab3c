//! Options for date inputs.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Options for `date` fields. Bounds are inclusive UTC instants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateOptions {
    /// Whether the field may be left empty.
    pub optional: bool,
    /// Earliest accepted value.
    pub min: Option<DateTime<Utc>>,
    /// Latest accepted value.
    pub max: Option<DateTime<Utc>>,
}

impl DateOptions {
    /// Creates options for a required, unbounded date.
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
    pub fn min(mut self, min: DateTime<Utc>) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound.
    #[must_use]
    pub fn max(mut self, max: DateTime<Utc>) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the lower bound to midnight UTC of `date`.
    #[must_use]
    pub fn min_date(self, date: NaiveDate) -> Self {
        self.min(midnight_utc(date))
    }

    /// Sets the upper bound to midnight UTC of `date`.
    #[must_use]
    pub fn max_date(self, date: NaiveDate) -> Self {
        self.max(midnight_utc(date))
    }
}

/// Returns the instant at which `date` starts in UTC.
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_bounds() {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let options = DateOptions::new().min_date(start).optional();
        assert!(options.optional);
        assert_eq!(
            options.min.map(|d| d.to_rfc3339()),
            Some("2000-01-01T00:00:00+00:00".to_string())
        );
        assert!(options.max.is_none());
    }
}
