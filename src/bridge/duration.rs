// ============================================================================
// Duration Bridge
// Conversions between periods and elapsed-time durations
// ============================================================================

use crate::domain::Period;
use crate::numeric::wide::{Sign, WidePeriod};
use crate::numeric::{
    PeriodResult, DAYS_PER_MONTH_E4, DAYS_PER_MONTH_E6, DAYS_PER_YEAR_E4, ONE_E4, ONE_E6, ONE_E7,
    UNIT_LIMIT,
};
use chrono::TimeDelta;

impl Period {
    /// Convert a duration to a period, and report whether the conversion is precise.
    ///
    /// Durations under 3277 hours become hours, minutes and seconds, exactly.
    /// Longer durations assume 24-hour days: under 3277 days they become days,
    /// hours, minutes and seconds; beyond that they become years, months, days
    /// and hours using 365.2425 days per year and 30.4369 days per month.
    /// Only the first case is precise. Sub-second parts are truncated to tenths.
    ///
    /// # Errors
    /// Returns `Overflow` for durations beyond about 3276 years.
    pub fn from_duration(duration: TimeDelta) -> PeriodResult<(Period, bool)> {
        let sign = Sign::of(duration < TimeDelta::zero());
        let d = duration.abs();

        let secs = d.num_seconds().unsigned_abs();
        let tenth = u64::from(d.subsec_nanos().unsigned_abs() / 100_000_000);

        let total_hours = secs / 3600;
        let minutes = secs % 3600 / 60;
        let seconds = (secs % 60) * 10 + tenth;

        // 16-bit fields run out near the 4.5 month mark
        if total_hours < UNIT_LIMIT as u64 {
            let p = WidePeriod::new(sign, [0, 0, 0, total_hours * 10, minutes * 10, seconds])
                .into_period()?;
            return Ok((p, true));
        }

        // ignoring daylight saving
        let total_days = total_hours / 24;
        let hours = total_hours % 24;

        if total_days < UNIT_LIMIT as u64 {
            let tenths = [0, 0, total_days * 10, hours * 10, minutes * 10, seconds];
            let p = WidePeriod::new(sign, tenths).into_period()?;
            tracing::debug!(%p, "duration approximated with 24-hour days");
            return Ok((p, false));
        }

        let total_days = total_days as i64;
        let years = (ONE_E4 * total_days) / DAYS_PER_YEAR_E4;
        let months = ((ONE_E4 * total_days) / DAYS_PER_MONTH_E4 - 12 * years).max(0);
        let days = (total_days * ONE_E4 - DAYS_PER_MONTH_E4 * months - DAYS_PER_YEAR_E4 * years)
            / ONE_E4;

        let p = WidePeriod::new(
            sign,
            [
                years as u64 * 10,
                months as u64 * 10,
                days.max(0) as u64 * 10,
                hours * 10,
                0,
                0,
            ],
        )
        .into_period()?;
        tracing::debug!(%p, "duration approximated with Gregorian year and month lengths");
        Ok((p, false))
    }

    /// Convert the period to a duration, and report whether the conversion is precise.
    ///
    /// Hours, minutes and seconds convert exactly. Years, months and days
    /// depend on the calendar and time zone, so they are estimated with a
    /// 365.2425-day year, a month of one twelfth of that and 24-hour days;
    /// any of them being present makes the result imprecise.
    pub fn to_duration(&self) -> (TimeDelta, bool) {
        // one day is 86400 * 10^6 microseconds
        let calendar_micros = total_days_approx_e7(self) * 8640;
        let clock_micros = total_seconds_e3(self) * 1000;
        (
            TimeDelta::microseconds(calendar_micros + clock_micros),
            calendar_micros == 0,
        )
    }

    /// The estimated duration of the period; see [`Period::to_duration`].
    #[inline]
    pub fn duration_approx(&self) -> TimeDelta {
        self.to_duration().0
    }

    /// Approximate total number of whole days, including whole multiples of
    /// 24 hours. Years and months use the Gregorian averages.
    ///
    /// # Errors
    /// Propagates an `Overflow` from imprecise normalisation.
    pub fn total_days_approx(&self) -> PeriodResult<i64> {
        let pn = self.normalise(false)?;
        let [.., hours, _, _] = pn.tenths();
        let hours_e7 = (i64::from(hours) * ONE_E6) / 24;
        Ok((total_days_approx_e7(&pn) + hours_e7) / ONE_E7)
    }

    /// Approximate total number of whole months. Days, and whole multiples
    /// of 24 hours, count as a twelfth of a 365.2425-day year each 30.436875 days.
    ///
    /// # Errors
    /// Propagates an `Overflow` from imprecise normalisation.
    pub fn total_months_approx(&self) -> PeriodResult<i64> {
        let pn = self.normalise(false)?;
        let [years, months, days, hours, _, _] = pn.tenths().map(i64::from);
        let months_e1 = years * 12 + months;
        let hours_as_days_e1 = hours / 24;
        let days_as_months_e1 = ((days + hours_as_days_e1) * ONE_E6) / DAYS_PER_MONTH_E6;
        Ok((months_e1 + days_as_months_e1) / 10)
    }
}

/// Clock fields in milliseconds.
pub(crate) fn total_seconds_e3(period: &Period) -> i64 {
    let [.., hours, minutes, seconds] = period.tenths().map(i64::from);
    hours * 360_000 + minutes * 6_000 + seconds * 100
}

/// Calendar fields in days, scaled by 10^7.
fn total_days_approx_e7(period: &Period) -> i64 {
    let [years, months, days, ..] = period.tenths().map(i64::from);
    years * (DAYS_PER_YEAR_E4 * 100) + months * DAYS_PER_MONTH_E6 + days * ONE_E6
}
