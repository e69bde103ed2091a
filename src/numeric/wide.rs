// ============================================================================
// Wide Accumulator
// Sign-magnitude mirror of a period used during multi-step arithmetic
// ============================================================================

use super::errors::{Field, PeriodError, PeriodResult};
use super::{DAYS_PER_MONTH_E6, MAX_TENTHS, ONE_E6};
use crate::domain::{write_iso, Period};
use arrayvec::ArrayVec;
use std::fmt;

// Above these magnitudes a precise ripple still has to carry upward, or the
// value cannot be narrowed again.
// 32670 - (32670 / 60) - (32670 / 3600) = 32204.9
const HOURS_CARRY_LIMIT: u64 = 32_204;
const DAYS_CARRY_LIMIT: u64 = 32_760;

/// Upper bound on ripple/move rounds. Normalisation stops at the first round
/// that changes nothing, which in practice is the third or fourth.
pub(crate) const MAX_ROUNDS: usize = 16;

/// Explicit sign of a wide value. Zero is always `Positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    #[inline]
    pub fn of(negative: bool) -> Self {
        if negative {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self == Sign::Negative
    }

    /// Sign of the product of two signed quantities.
    #[inline]
    pub fn times(self, other: Sign) -> Self {
        Sign::of(self != other)
    }
}

/// Six unsigned magnitudes in tenths plus one sign.
///
/// Allocated per operation and never handed to callers. Narrowing back to a
/// [`Period`] fails with the name of every field that is still out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct WidePeriod {
    pub years: u64,
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub sign: Sign,
}

impl WidePeriod {
    /// Build from magnitudes in tenths, coarsest first.
    #[inline]
    pub fn new(sign: Sign, tenths: [u64; 6]) -> Self {
        let [years, months, days, hours, minutes, seconds] = tenths;
        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            sign,
        }
    }

    /// Widen a period, rejecting fields of mixed sign.
    pub fn from_period(period: &Period) -> PeriodResult<Self> {
        period.check_homogeneous()?;
        let [y, m, d, hh, mm, ss] = period.tenths();
        Ok(Self {
            years: u64::from(y.unsigned_abs()),
            months: u64::from(m.unsigned_abs()),
            days: u64::from(d.unsigned_abs()),
            hours: u64::from(hh.unsigned_abs()),
            minutes: u64::from(mm.unsigned_abs()),
            seconds: u64::from(ss.unsigned_abs()),
            sign: Sign::of(period.is_negative()),
        })
    }

    #[inline]
    pub fn magnitudes(&self) -> [u64; 6] {
        [
            self.years,
            self.months,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
        ]
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.magnitudes().iter().all(|&v| v == 0)
    }

    /// Redistribute magnitude between fields.
    ///
    /// Repeats ripple-up followed by move-fraction-to-right until a round
    /// changes nothing: pushing a fraction down can rebuild a carry, and an
    /// imprecise month carry can leave a fraction on days.
    pub fn normalise(mut self, precise: bool) -> Self {
        for _ in 0..MAX_ROUNDS {
            let before = self;
            self.ripple_up(precise);
            self.move_fraction_to_right();
            if self == before {
                break;
            }
        }
        self
    }

    /// Carry whole multiples of each field into the next coarser one.
    pub fn ripple_up(&mut self, precise: bool) {
        self.minutes = self.minutes.saturating_add((self.seconds / 600) * 10);
        self.seconds %= 600;

        self.hours = self.hours.saturating_add((self.minutes / 600) * 10);
        self.minutes %= 600;

        if !precise || self.hours > HOURS_CARRY_LIMIT {
            self.days = self.days.saturating_add((self.hours / 240) * 10);
            self.hours %= 240;
        }

        if !precise || self.days > DAYS_CARRY_LIMIT {
            // tenths of a day scaled by 10^6; one month is 304.36875 tenths
            let days_e6 = u128::from(self.days) * ONE_E6 as u128;
            let month_e6 = DAYS_PER_MONTH_E6 as u128 * 10;
            let whole = u64::try_from(days_e6 / month_e6).unwrap_or(u64::MAX);
            self.months = self.months.saturating_add(whole.saturating_mul(10));
            self.days = ((days_e6 % month_e6) / ONE_E6 as u128) as u64;
        }

        self.years = self.years.saturating_add((self.months / 120) * 10);
        self.months %= 120;
    }

    /// Only the finest non-zero field may keep a decimal fraction.
    pub fn move_fraction_to_right(&mut self) {
        let y10 = self.years % 10;
        if y10 != 0
            && (self.months != 0
                || self.days != 0
                || self.hours != 0
                || self.minutes != 0
                || self.seconds != 0)
        {
            self.months = self.months.saturating_add(y10 * 12);
            self.years -= y10;
        }

        let m10 = self.months % 10;
        if m10 != 0
            && (self.days != 0 || self.hours != 0 || self.minutes != 0 || self.seconds != 0)
        {
            self.days = self
                .days
                .saturating_add(m10 * DAYS_PER_MONTH_E6 as u64 / ONE_E6 as u64);
            self.months -= m10;
        }

        let d10 = self.days % 10;
        if d10 != 0 && (self.hours != 0 || self.minutes != 0 || self.seconds != 0) {
            self.hours = self.hours.saturating_add(d10 * 24);
            self.days -= d10;
        }

        let hh10 = self.hours % 10;
        if hh10 != 0 && (self.minutes != 0 || self.seconds != 0) {
            self.minutes = self.minutes.saturating_add(hh10 * 60);
            self.hours -= hh10;
        }

        let mm10 = self.minutes % 10;
        if mm10 != 0 && self.seconds != 0 {
            self.seconds = self.seconds.saturating_add(mm10 * 60);
            self.minutes -= mm10;
        }
    }

    /// Narrow back to a period.
    ///
    /// # Errors
    /// Returns `Overflow` naming every field whose magnitude exceeds 32767 tenths.
    pub fn into_period(self) -> PeriodResult<Period> {
        let fields: ArrayVec<Field, 6> = Field::ALL
            .iter()
            .zip(self.magnitudes())
            .filter(|(_, v)| *v > MAX_TENTHS)
            .map(|(field, _)| *field)
            .collect();

        if !fields.is_empty() {
            tracing::debug!(period = %self, ?fields, "period overflowed 16-bit fields");
            return Err(PeriodError::Overflow {
                fields,
                input: self.to_string(),
            });
        }

        let narrow = |v: u64| -> i16 {
            // in range: checked above
            let v = v as i16;
            if self.sign.is_negative() {
                -v
            } else {
                v
            }
        };

        Ok(Period::from_tenths_unchecked(
            narrow(self.years),
            narrow(self.months),
            narrow(self.days),
            narrow(self.hours),
            narrow(self.minutes),
            narrow(self.seconds),
        ))
    }
}

impl fmt::Display for WidePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_iso(f, self.sign.is_negative() && !self.is_zero(), self.magnitudes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(tenths: [u64; 6]) -> WidePeriod {
        WidePeriod::new(Sign::Positive, tenths)
    }

    #[test]
    fn test_ripple_clock_fields() {
        // 125 seconds
        let mut w = wide([0, 0, 0, 0, 0, 1250]);
        w.ripple_up(true);
        assert_eq!(w.magnitudes(), [0, 0, 0, 0, 20, 50]);

        // 61 minutes 61 seconds
        let mut w = wide([0, 0, 0, 0, 610, 610]);
        w.ripple_up(true);
        assert_eq!(w.magnitudes(), [0, 0, 0, 10, 20, 10]);
    }

    #[test]
    fn test_ripple_hours_only_when_imprecise() {
        let mut w = wide([0, 0, 0, 500, 0, 0]);
        w.ripple_up(true);
        assert_eq!(w.hours, 500);

        let mut w = wide([0, 0, 0, 500, 0, 0]);
        w.ripple_up(false);
        assert_eq!(w.days, 20);
        assert_eq!(w.hours, 20);
    }

    #[test]
    fn test_ripple_days_to_months_carries_whole_months() {
        // 61 days is two months (60.87 days) and 0.1 day left over
        let mut w = wide([0, 0, 610, 0, 0, 0]);
        w.ripple_up(false);
        assert_eq!(w.months, 20);
        assert_eq!(w.days, 1);

        // 30 days is under a month
        let mut w = wide([0, 0, 300, 0, 0, 0]);
        w.ripple_up(false);
        assert_eq!(w.months, 0);
        assert_eq!(w.days, 300);
    }

    #[test]
    fn test_ripple_forced_carry_for_huge_hours() {
        let mut w = wide([0, 0, 0, 40_000, 0, 0]);
        w.ripple_up(true);
        assert_eq!(w.days, 1660);
        assert_eq!(w.hours, 160);
    }

    #[test]
    fn test_month_carry_at_twelve() {
        let mut w = wide([0, 120, 0, 0, 0, 0]);
        w.ripple_up(true);
        assert_eq!((w.years, w.months), (10, 0));

        let mut w = wide([0, 119, 0, 0, 0, 0]);
        w.ripple_up(true);
        assert_eq!((w.years, w.months), (0, 119));
    }

    #[test]
    fn test_move_fraction_to_right() {
        // 2.5 years and 1 month becomes 2 years 7 months
        let mut w = wide([25, 10, 0, 0, 0, 0]);
        w.move_fraction_to_right();
        assert_eq!(w.magnitudes(), [20, 70, 0, 0, 0, 0]);

        // 1.5 days and 1 hour becomes 1 day 13 hours
        let mut w = wide([0, 0, 15, 10, 0, 0]);
        w.move_fraction_to_right();
        assert_eq!(w.magnitudes(), [0, 0, 10, 130, 0, 0]);

        // a fraction on the finest field stays
        let mut w = wide([0, 0, 0, 15, 0, 0]);
        w.move_fraction_to_right();
        assert_eq!(w.magnitudes(), [0, 0, 0, 15, 0, 0]);
    }

    #[test]
    fn test_normalise_carries_pushed_down_fraction() {
        // 1.5 hours 45 minutes -> 1 hour 75 minutes -> 2 hours 15 minutes
        let w = wide([0, 0, 0, 15, 450, 0]).normalise(true);
        assert_eq!(w.magnitudes(), [0, 0, 0, 20, 150, 0]);
    }

    #[test]
    fn test_imprecise_normalise_reaches_fixed_point() {
        // pushing fractions down rebuilds a full 24 hours after the last carry
        let w = wide([129, 5, 240, 93, 178, 120]).normalise(false);
        assert_eq!(w.magnitudes(), [130, 0, 30, 0, 0, 0]);
        assert_eq!(w.normalise(false), w);
    }

    #[test]
    fn test_into_period_names_every_overflowing_field() {
        let w = wide([40_000, 0, 50_000, 0, 0, 10]);
        let err = w.into_period().unwrap_err();
        assert_eq!(err.overflowed_fields(), &[Field::Years, Field::Days]);
        assert_eq!(
            err.to_string(),
            "P4000Y5000DT1S: integer overflow occurred in years,days"
        );
    }

    #[test]
    fn test_into_period_applies_sign() {
        let w = WidePeriod::new(Sign::Negative, [10, 20, 0, 0, 0, 5]);
        let p = w.into_period().unwrap();
        assert_eq!(p.tenths(), [-10, -20, 0, 0, 0, -5]);

        let max = wide([MAX_TENTHS, 0, 0, 0, 0, 0]).into_period().unwrap();
        assert_eq!(max.tenths()[0], i16::MAX);
    }

    #[test]
    fn test_sign_helpers() {
        assert_eq!(Sign::default(), Sign::Positive);
        assert_eq!(Sign::Negative.times(Sign::Negative), Sign::Positive);
        assert_eq!(Sign::Negative.times(Sign::Positive), Sign::Negative);
        assert!(Sign::of(true).is_negative());
    }
}
