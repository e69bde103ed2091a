// ============================================================================
// Scaling
// Multiplies a period by a real factor, then normalises
// ============================================================================

use crate::domain::Period;
use crate::numeric::wide::{Sign, WidePeriod};
use crate::numeric::PeriodResult;
use chrono::TimeDelta;

impl Period {
    /// Scale a period by a factor. This can enlarge or shrink it, and a
    /// negative factor flips its sign. The result is normalised.
    ///
    /// For factors between -0.5 and 0.5 the period is converted to a duration,
    /// scaled and converted back, because multiplying one-decimal fields by a
    /// small factor would throw the remainders away. That route is only as
    /// exact as [`Period::to_duration`]: calendar fields are approximated, and
    /// the result is accurate to about a tenth of the finest field. Other
    /// factors scale each field directly, rounding to the nearest tenth.
    ///
    /// # Errors
    /// Returns `Overflow` if any field of the result exceeds ±3276.7.
    pub fn scale(&self, factor: f64) -> PeriodResult<Period> {
        self.check_homogeneous()?;

        if -0.5 < factor && factor < 0.5 {
            let (duration, precise_in) = self.to_duration();
            let micros = duration.num_seconds() as f64 * 1e6
                + f64::from(duration.subsec_nanos()) / 1e3;
            let scaled = TimeDelta::microseconds((micros * factor).round() as i64);
            let (period, precise_out) = Period::from_duration(scaled)?;
            tracing::trace!(period = %self, factor, "scaled via duration");
            return period.normalise(precise_in && precise_out);
        }

        let sign = Sign::of(self.is_negative()).times(Sign::of(factor < 0.0));
        let magnitude = factor.abs();
        let tenths = self
            .tenths()
            .map(|v| (f64::from(v.unsigned_abs()) * magnitude).round() as u64);

        WidePeriod::new(sign, tenths)
            .normalise(true)
            .into_period()
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::Period;
    use crate::numeric::{Field, PeriodError};

    #[test]
    fn test_scale_small_factor_via_duration() {
        let p = Period::new_hms(10, 0, 0).unwrap();
        assert_eq!(p.scale(0.3).unwrap(), Period::new_hms(3, 0, 0).unwrap());
        assert_eq!(p.scale(0.25).unwrap(), Period::new_hms(2, 30, 0).unwrap());
    }

    #[test]
    fn test_scale_large_factor_directly() {
        let p = Period::new_hms(10, 0, 0).unwrap();
        assert_eq!(p.scale(2.0).unwrap(), Period::new_hms(20, 0, 0).unwrap());

        // the result is normalised
        let p = Period::new_hms(0, 40, 0).unwrap();
        assert_eq!(p.scale(3.0).unwrap(), Period::new_hms(2, 0, 0).unwrap());

        let p = Period::new_ymd(0, 0, 3).unwrap();
        assert_eq!(
            p.scale(0.5).unwrap(),
            Period::from_tenths(0, 0, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_both_paths_agree_with_scaled_duration() {
        let p = Period::new_hms(7, 12, 30).unwrap();
        let (d, _) = p.to_duration();
        for factor in [0.1, 0.3, 0.49, 0.5, 1.5, 2.0, 3.7] {
            let scaled = p.scale(factor).unwrap();
            let expected_ms = d.num_milliseconds() as f64 * factor;
            let actual_ms = scaled.to_duration().0.num_milliseconds() as f64;
            // one tenth of the finest field
            assert!(
                (expected_ms - actual_ms).abs() <= 100.0,
                "factor {}: {} vs {}",
                factor,
                expected_ms,
                actual_ms
            );
        }
    }

    #[test]
    fn test_scale_keeps_sign() {
        let p = Period::new_hms(-10, 0, 0).unwrap();
        assert_eq!(p.scale(0.1).unwrap(), Period::new_hms(-1, 0, 0).unwrap());
        assert_eq!(p.scale(2.0).unwrap(), Period::new_hms(-20, 0, 0).unwrap());

        let p = Period::new_hms(10, 0, 0).unwrap();
        assert_eq!(p.scale(-0.25).unwrap(), Period::new_hms(-2, -30, 0).unwrap());
        assert_eq!(
            Period::new_ymd(0, 0, 1).unwrap().scale(-2.0).unwrap(),
            Period::new_ymd(0, 0, -2).unwrap()
        );
    }

    #[test]
    fn test_scale_calendar_period_by_small_factor() {
        let quarter = Period::new_ymd(1, 0, 0).unwrap().scale(0.25).unwrap();
        assert_eq!(quarter.total_days_approx().unwrap(), 91);
        assert_eq!(quarter.months(), 2);
    }

    #[test]
    fn test_scale_zero() {
        assert_eq!(Period::ZERO.scale(5.0).unwrap(), Period::ZERO);
        assert_eq!(
            Period::new_hms(1, 0, 0).unwrap().scale(0.0).unwrap(),
            Period::ZERO
        );
    }

    #[test]
    fn test_scale_overflow() {
        let err = Period::new_ymd(3000, 0, 0).unwrap().scale(2.0).unwrap_err();
        assert!(matches!(err, PeriodError::Overflow { .. }));
        assert_eq!(err.overflowed_fields(), &[Field::Years]);
    }
}
