// ============================================================================
// ISO Period Library
// ISO-8601 periods with fixed-point fields and precise/imprecise normalisation
// ============================================================================

//! # ISO Period
//!
//! Calendar and clock periods in the ISO-8601 form `PnYnMnDTnHnMnS`, stored
//! as six 16-bit fixed-point fields with one decimal place.
//!
//! ## Features
//!
//! - **Exact equality and hashing**: no floating point in the stored value
//! - **Precise and imprecise normalisation**: opt in to 24-hour days and
//!   30.4-day months only when the approximation is acceptable
//! - **Overflow reporting**: every field that leaves the ±3276.7 range is
//!   named in the error, nothing wraps silently
//! - **chrono integration**: periods from durations and timestamp
//!   differences, and periods added to timestamps, with a precision flag
//!
//! ## Example
//!
//! ```rust
//! use iso_period::prelude::*;
//! use chrono::{TimeDelta, TimeZone, Utc};
//!
//! // 125 seconds normalise to two minutes and five seconds
//! let p = Period::new_hms(0, 0, 125).unwrap();
//! assert_eq!(p.normalise(true).unwrap(), Period::new_hms(0, 2, 5).unwrap());
//!
//! // durations under 3277 hours convert exactly
//! let (p, precise) = Period::from_duration(TimeDelta::minutes(90)).unwrap();
//! assert!(precise);
//! assert_eq!(p.to_string(), "PT1H30M");
//!
//! // whole calendar fields are added with calendar arithmetic
//! let t = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
//! let (later, precise) = Period::new_ymd(0, 1, 0).unwrap().add_to(t).unwrap();
//! assert!(precise);
//! assert_eq!(later, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
//! ```

pub mod bridge;
pub mod domain;
pub mod engine;
pub mod numeric;

pub use domain::Period;
pub use numeric::{Field, PeriodError, PeriodResult};

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::Period;
    pub use crate::numeric::{
        Field, PeriodError, PeriodResult, DAYS_PER_MONTH_E4, DAYS_PER_MONTH_E6, DAYS_PER_YEAR_E4,
    };
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use chrono::{TimeDelta, TimeZone, Utc};

    #[test]
    fn test_timestamp_difference_normalise_and_add_back() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 4, 17, 45, 30).unwrap();

        let p = Period::between(&start, &end).unwrap();
        assert_eq!(p, Period::new(0, 0, 3, 8, 30, 30).unwrap());
        assert_eq!(p.to_string(), "P3DT8H30M30S");

        // precise normalisation leaves days and hours alone
        assert_eq!(p.normalise(true).unwrap(), p);

        let (back, precise) = p.add_to(start).unwrap();
        assert!(precise);
        assert_eq!(back, end);
    }

    #[test]
    fn test_duration_round_trip_through_scale() {
        let p = Period::new_hms(2, 3, 4).unwrap();
        let (d, precise) = p.to_duration();
        assert!(precise);
        assert_eq!(Period::from_duration(d).unwrap(), (p, true));

        let doubled = p.scale(2.0).unwrap();
        assert_eq!(doubled.duration_approx(), d * 2);
        let halved = p.scale(0.2).unwrap();
        assert_eq!(halved.to_duration(), (d / 5, true));
    }

    #[test]
    fn test_weeks_and_approximate_totals() {
        let p = Period::new_ymd(0, 0, 45).unwrap();
        assert_eq!(p.weeks() * 7 + p.modulo_days(), p.days());
        assert_eq!(p.total_months_approx(), Ok(1));

        let p = Period::new_ymd(0, 0, 20).unwrap();
        assert_eq!(p.total_days_approx(), Ok(20));
        assert_eq!(p.total_months_approx(), Ok(0));
    }

    #[test]
    fn test_overflow_names_every_field() {
        let p = Period::from_tenths(32_000, 11_000, 0, 0, 0, 0).unwrap();
        let err = p.normalise(false).unwrap_err();
        assert_eq!(err.overflowed_fields(), &[Field::Years]);

        let err = Period::from_duration(TimeDelta::days(2_000_000)).unwrap_err();
        assert!(matches!(err, PeriodError::Overflow { .. }));
    }
}
