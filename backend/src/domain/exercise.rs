//! Exercise data model.
//!
//! An [`Exercise`] is one logged activity: what was done, for how many
//! minutes, and on which calendar day. Time-of-day is deliberately absent;
//! the tracker works at day granularity.

use std::fmt;

use chrono::NaiveDate;

/// Validation errors returned by the exercise constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseValidationError {
    EmptyDescription,
    InvalidDuration,
}

impl fmt::Display for ExerciseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::InvalidDuration => write!(f, "duration must be a finite number of minutes"),
        }
    }
}

impl std::error::Error for ExerciseValidationError {}

/// Free-text description of what the exercise was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Validate and construct a [`Description`] from owned input.
    ///
    /// The text is stored as supplied; only all-whitespace input is rejected.
    pub fn new(description: impl Into<String>) -> Result<Self, ExerciseValidationError> {
        let raw = description.into();
        if raw.trim().is_empty() {
            return Err(ExerciseValidationError::EmptyDescription);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

/// Exercise duration in minutes.
///
/// Any finite number is accepted, matching the tracker's historical
/// contract; there is no positivity rule. Non-numeric input is rejected at
/// construction instead of being carried through as a NaN sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationMinutes(f64);

impl DurationMinutes {
    /// Validate and construct a [`DurationMinutes`] from a number.
    pub fn new(minutes: f64) -> Result<Self, ExerciseValidationError> {
        if !minutes.is_finite() {
            return Err(ExerciseValidationError::InvalidDuration);
        }
        Ok(Self(minutes))
    }

    /// Parse a [`DurationMinutes`] from text.
    ///
    /// The whole trimmed string must parse as a number; trailing junk such
    /// as `"60x"` is rejected rather than prefix-parsed.
    pub fn parse(raw: &str) -> Result<Self, ExerciseValidationError> {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| ExerciseValidationError::InvalidDuration)
            .and_then(Self::new)
    }

    /// Duration value in minutes.
    #[must_use]
    pub fn minutes(&self) -> f64 {
        self.0
    }
}

/// One logged exercise entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    description: Description,
    duration: DurationMinutes,
    performed_on: NaiveDate,
}

impl Exercise {
    /// Build an [`Exercise`] from validated components.
    #[must_use]
    pub fn new(description: Description, duration: DurationMinutes, performed_on: NaiveDate) -> Self {
        Self {
            description,
            duration,
            performed_on,
        }
    }

    /// What was done.
    #[must_use]
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// How long it took.
    #[must_use]
    pub fn duration(&self) -> DurationMinutes {
        self.duration
    }

    /// Calendar day the exercise took place on.
    #[must_use]
    pub fn performed_on(&self) -> NaiveDate {
        self.performed_on
    }
}

/// Validated input for appending an exercise.
///
/// The date is optional; when absent the ledger fills in the current UTC
/// calendar date at append time.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDraft {
    pub description: Description,
    pub duration: DurationMinutes,
    pub performed_on: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("  \t ")]
    fn description_rejects_blank_input(#[case] raw: &str) {
        let err = Description::new(raw).expect_err("blank description rejected");
        assert_eq!(err, ExerciseValidationError::EmptyDescription);
    }

    #[rstest]
    fn description_preserves_input() {
        let description = Description::new("  morning run  ").expect("valid description");
        assert_eq!(description.as_ref(), "  morning run  ");
    }

    #[rstest]
    #[case("60", 60.0)]
    #[case("60.5", 60.5)]
    #[case("-5", -5.0)]
    #[case(" 42 ", 42.0)]
    fn duration_parses_numeric_text(#[case] raw: &str, #[case] expected: f64) {
        let duration = DurationMinutes::parse(raw).expect("valid duration");
        assert_eq!(duration.minutes(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("60x")]
    #[case("NaN")]
    #[case("inf")]
    fn duration_rejects_non_finite_text(#[case] raw: &str) {
        let err = DurationMinutes::parse(raw).expect_err("bad duration rejected");
        assert_eq!(err, ExerciseValidationError::InvalidDuration);
    }

    #[rstest]
    fn duration_rejects_non_finite_numbers() {
        let err = DurationMinutes::new(f64::NAN).expect_err("NaN rejected");
        assert_eq!(err, ExerciseValidationError::InvalidDuration);
    }

    #[rstest]
    fn exercise_exposes_components() {
        let date = NaiveDate::from_ymd_opt(2023, 5, 10).expect("valid date");
        let entry = Exercise::new(
            Description::new("swim").expect("valid description"),
            DurationMinutes::new(30.0).expect("valid duration"),
            date,
        );

        assert_eq!(entry.description().as_ref(), "swim");
        assert_eq!(entry.duration().minutes(), 30.0);
        assert_eq!(entry.performed_on(), date);
    }
}
