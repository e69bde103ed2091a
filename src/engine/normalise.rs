// ============================================================================
// Normalisation Engine
// Redistributes magnitude between period fields in precise or imprecise mode
// ============================================================================
//
// Two fast paths work directly on the 16-bit fields:
// - clock periods (no years or months, and no days in precise mode)
// - calendar periods (only years and/or months)
// Everything else, and any fast-path case whose narrow arithmetic would
// overflow, goes through the wide accumulator. Both routes apply the same
// rules, so they agree wherever the fast path accepts the input.

use crate::domain::Period;
use crate::numeric::wide::{WidePeriod, MAX_ROUNDS};
use crate::numeric::PeriodResult;

// 32670 - (32670 / 60) = 32126
const NARROW_LIMIT: i16 = 32_670 - (32_670 / 60);

// Mirrors the wide accumulator's forced carry of hours in precise mode
const HOURS_CARRY_LIMIT: i16 = 32_204;

// Fewest tenths of a day that make up one month (304.36875)
const DAYS_PER_MONTH_TENTHS: i16 = 305;

impl Period {
    /// Simplify the fields in either precise or imprecise mode.
    ///
    /// Hours per day vary with daylight saving and days per month vary with
    /// the calendar, so moving magnitude into days or months is approximate.
    ///
    /// In precise mode:
    /// - multiples of 60 seconds become minutes
    /// - multiples of 60 minutes become hours
    /// - multiples of 12 months become years
    ///
    /// In imprecise mode, additionally:
    /// - multiples of 24 hours become days
    /// - multiples of 30.436875 days become months
    ///
    /// In both modes a decimal fraction may only stay on the finest non-zero
    /// field; elsewhere it moves into the next finer field (`P2.5Y1M` becomes
    /// `P2Y7M`). Leap seconds are disregarded.
    ///
    /// # Errors
    /// - `MixedSigns` if the period has fields of both signs (see
    ///   [`Period::wrapping_add`])
    /// - `Overflow` if a field still exceeds ±3276.7 after redistribution
    pub fn normalise(&self, precise: bool) -> PeriodResult<Period> {
        self.check_homogeneous()?;

        if let Some(result) = self.normalise_narrow(precise) {
            tracing::trace!(period = %self, precise, "normalised on narrow fast path");
            return Ok(result);
        }

        tracing::trace!(period = %self, precise, "normalising via wide accumulator");
        self.normalise_wide(precise)
    }

    pub(crate) fn normalise_wide(&self, precise: bool) -> PeriodResult<Period> {
        WidePeriod::from_period(self)?
            .normalise(precise)
            .into_period()
            .map_err(|e| e.with_input(self.to_string()))
    }

    /// `None` when the input needs the general path.
    fn normalise_narrow(&self, precise: bool) -> Option<Period> {
        let [years, months, days, hours, minutes, seconds] = self.tenths();

        if years == 0
            && months == 0
            && (!precise || days == 0)
            && hours > -NARROW_LIMIT
            && hours < NARROW_LIMIT
            && minutes > -NARROW_LIMIT
            && minutes < NARROW_LIMIT
        {
            let (mut n, neg) = Narrow::from_period(self)?;
            for _ in 0..MAX_ROUNDS {
                let before = n;
                n.ripple_clock(precise)?;
                n.move_clock_fraction()?;
                if n == before {
                    break;
                }
            }
            return Some(n.into_period(neg));
        }

        if (years != 0 || months != 0) && days == 0 && hours == 0 && minutes == 0 && seconds == 0
        {
            let (mut n, neg) = Narrow::from_period(self)?;
            for _ in 0..MAX_ROUNDS {
                let before = n;
                n.ripple_calendar()?;
                n.move_calendar_fraction()?;
                if n == before {
                    break;
                }
            }
            return Some(n.into_period(neg));
        }

        None
    }
}

/// Non-negative 16-bit magnitudes in tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Narrow {
    years: i16,
    months: i16,
    days: i16,
    hours: i16,
    minutes: i16,
    seconds: i16,
}

impl Narrow {
    fn from_period(period: &Period) -> Option<(Self, bool)> {
        let (abs, neg) = period.abs_neg();
        let [years, months, days, hours, minutes, seconds] = abs.tenths();
        // i16::MIN has no positive counterpart
        if abs.is_negative() {
            return None;
        }
        Some((
            Self {
                years,
                months,
                days,
                hours,
                minutes,
                seconds,
            },
            neg,
        ))
    }

    fn into_period(self, neg: bool) -> Period {
        let p = Period::from_tenths_unchecked(
            self.years,
            self.months,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
        );
        if neg {
            p.negate()
        } else {
            p
        }
    }

    fn ripple_clock(&mut self, precise: bool) -> Option<()> {
        self.minutes = self.minutes.checked_add((self.seconds / 600) * 10)?;
        self.seconds %= 600;

        self.hours = self.hours.checked_add((self.minutes / 600) * 10)?;
        self.minutes %= 600;

        if precise {
            if self.hours > HOURS_CARRY_LIMIT {
                return None;
            }
        } else {
            self.days = self.days.checked_add((self.hours / 240) * 10)?;
            self.hours %= 240;
            // days into months is left to the wide accumulator
            if self.days >= DAYS_PER_MONTH_TENTHS {
                return None;
            }
        }
        Some(())
    }

    fn move_clock_fraction(&mut self) -> Option<()> {
        let d10 = self.days % 10;
        if d10 != 0 && (self.hours != 0 || self.minutes != 0 || self.seconds != 0) {
            self.hours = self.hours.checked_add(d10 * 24)?;
            self.days -= d10;
        }

        let hh10 = self.hours % 10;
        if hh10 != 0 && (self.minutes != 0 || self.seconds != 0) {
            self.minutes = self.minutes.checked_add(hh10 * 60)?;
            self.hours -= hh10;
        }

        let mm10 = self.minutes % 10;
        if mm10 != 0 && self.seconds != 0 {
            self.seconds = self.seconds.checked_add(mm10 * 60)?;
            self.minutes -= mm10;
        }
        Some(())
    }

    fn ripple_calendar(&mut self) -> Option<()> {
        // 12.0 months and up carry into years
        self.years = self.years.checked_add((self.months / 120) * 10)?;
        self.months %= 120;
        Some(())
    }

    fn move_calendar_fraction(&mut self) -> Option<()> {
        let y10 = self.years % 10;
        if y10 != 0 && self.months != 0 {
            self.months = self.months.checked_add(y10 * 12)?;
            self.years -= y10;
        }
        Some(())
    }
}
