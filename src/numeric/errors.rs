// ============================================================================
// Period Errors
// Error types for period construction, normalisation and conversion
// ============================================================================

use arrayvec::ArrayVec;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Names one of the six fields of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Field {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    /// All fields, coarsest first.
    pub const ALL: [Field; 6] = [
        Field::Years,
        Field::Months,
        Field::Days,
        Field::Hours,
        Field::Minutes,
        Field::Seconds,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Years => "years",
            Field::Months => "months",
            Field::Days => "days",
            Field::Hours => "hours",
            Field::Minutes => "minutes",
            Field::Seconds => "seconds",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while building or transforming a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// Fields were given with both positive and negative values.
    ///
    /// This is a logic error in the calling code, not a runtime condition.
    MixedSigns {
        /// The offending fields as written by the caller
        input: String,
    },
    /// One or more fields exceed the 16-bit fixed-point range (±3276.7)
    Overflow {
        /// Every field that is out of range, coarsest first
        fields: ArrayVec<Field, 6>,
        /// ISO-8601 text of the value being narrowed
        input: String,
    },
    /// A decimal input carried more than one fractional digit
    PrecisionLoss,
    /// Timestamp arithmetic left the supported calendar range, or landed on a
    /// local time that does not exist in the time zone
    OutOfRange,
}

impl PeriodError {
    /// Replaces the diagnostic text of an `Overflow` with the caller's input.
    pub(crate) fn with_input(self, text: String) -> Self {
        match self {
            PeriodError::Overflow { fields, .. } => PeriodError::Overflow {
                fields,
                input: text,
            },
            other => other,
        }
    }

    /// The overflowing fields, if this is an overflow.
    pub fn overflowed_fields(&self) -> &[Field] {
        match self {
            PeriodError::Overflow { fields, .. } => fields,
            _ => &[],
        }
    }
}

impl fmt::Display for PeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodError::MixedSigns { input } => {
                write!(f, "periods must have homogeneous signs; got {}", input)
            },
            PeriodError::Overflow { fields, input } => {
                write!(f, "{}: integer overflow occurred in ", input)?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", field)?;
                }
                Ok(())
            },
            PeriodError::PrecisionLoss => write!(
                f,
                "precision loss: periods hold one decimal place per field"
            ),
            PeriodError::OutOfRange => write!(f, "timestamp out of range"),
        }
    }
}

impl std::error::Error for PeriodError {}

/// Result type alias for period operations
pub type PeriodResult<T> = Result<T, PeriodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let mut fields = ArrayVec::new();
        fields.push(Field::Years);
        fields.push(Field::Days);
        let err = PeriodError::Overflow {
            fields,
            input: "P4000Y5000D".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "P4000Y5000D: integer overflow occurred in years,days"
        );
        assert_eq!(err.overflowed_fields(), &[Field::Years, Field::Days]);

        let err = PeriodError::MixedSigns {
            input: "P1Y-2M0DT0H0M0S".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "periods must have homogeneous signs; got P1Y-2M0DT0H0M0S"
        );
    }

    #[test]
    fn test_with_input_only_touches_overflow() {
        let err = PeriodError::Overflow {
            fields: ArrayVec::new(),
            input: "wide".to_string(),
        }
        .with_input("P1Y".to_string());
        assert!(matches!(err, PeriodError::Overflow { ref input, .. } if input == "P1Y"));

        assert_eq!(
            PeriodError::OutOfRange.with_input("P1Y".to_string()),
            PeriodError::OutOfRange
        );
        assert!(PeriodError::PrecisionLoss.overflowed_fields().is_empty());
    }
}
