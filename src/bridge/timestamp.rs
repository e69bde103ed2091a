// ============================================================================
// Timestamp Bridge
// Periods from the difference of two timestamps, and periods added to timestamps
// ============================================================================

use super::duration::total_seconds_e3;
use crate::domain::Period;
use crate::numeric::wide::{Sign, WidePeriod};
use crate::numeric::{PeriodError, PeriodResult, UNIT_LIMIT};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeDelta, TimeZone, Timelike};

impl Period {
    /// The period between two timestamps; negative when `t2` is before `t1`.
    ///
    /// `t2` is first moved into `t1`'s time zone. Up to 3276 days apart the
    /// result holds days (whole multiples of 24 elapsed hours) plus the
    /// difference of the clock readings. Further apart it holds true calendar
    /// years, months and days instead, so it stays exact either way.
    ///
    /// The period keeps no knowledge of the calendar, so later arithmetic is
    /// only precise when it concerns either the date part or the clock part.
    ///
    /// # Errors
    /// Returns `Overflow` for timestamps more than about 3276 years apart.
    pub fn between<Tz: TimeZone, Tz2: TimeZone>(
        t1: &DateTime<Tz>,
        t2: &DateTime<Tz2>,
    ) -> PeriodResult<Period> {
        let t2 = t2.with_timezone(&t1.timezone());
        let (start, end, sign) = if t2 < *t1 {
            (t2, t1.clone(), Sign::Negative)
        } else {
            (t1.clone(), t2, Sign::Positive)
        };

        let diff = Difference::between(&start, &end)?;
        WidePeriod::new(sign, diff.tenths()).into_period()
    }

    /// Add the period to a timestamp, and report whether the result is precise.
    ///
    /// Clock fields are always added exactly. When years, months and days are
    /// whole numbers they are added with calendar arithmetic (a month after
    /// 31 January is the last day of February) and the result is precise.
    /// Fractional calendar fields fall back to [`Period::to_duration`].
    ///
    /// # Errors
    /// Returns `OutOfRange` if the result is not a representable local time.
    pub fn add_to<Tz: TimeZone>(&self, t: DateTime<Tz>) -> PeriodResult<(DateTime<Tz>, bool)> {
        let [years, months, days, ..] = self.tenths();

        if years % 10 == 0 && months % 10 == 0 && days % 10 == 0 {
            let total_months = i32::from(years / 10) * 12 + i32::from(months / 10);
            let clock = TimeDelta::milliseconds(total_seconds_e3(self));
            let shifted = shift_months(t, total_months)
                .and_then(|t| shift_days(t, i32::from(days / 10)))
                .and_then(|t| t.checked_add_signed(clock))
                .ok_or(PeriodError::OutOfRange)?;
            return Ok((shifted, true));
        }

        let (duration, precise) = self.to_duration();
        tracing::debug!(
            period = %self,
            "fractional calendar fields added as an approximate duration"
        );
        t.checked_add_signed(duration)
            .map(|t| (t, precise))
            .ok_or(PeriodError::OutOfRange)
    }
}

fn shift_months<Tz: TimeZone>(t: DateTime<Tz>, months: i32) -> Option<DateTime<Tz>> {
    if months >= 0 {
        t.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        t.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

fn shift_days<Tz: TimeZone>(t: DateTime<Tz>, days: i32) -> Option<DateTime<Tz>> {
    if days >= 0 {
        t.checked_add_days(Days::new(u64::from(days.unsigned_abs())))
    } else {
        t.checked_sub_days(Days::new(u64::from(days.unsigned_abs())))
    }
}

/// Non-negative field-wise difference between two ordered timestamps.
#[derive(Debug, Default, PartialEq, Eq)]
struct Difference {
    years: u64,
    months: u64,
    days: u64,
    hours: u64,
    minutes: u64,
    seconds: u64,
    tenths: u64,
}

impl Difference {
    fn between<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> PeriodResult<Self> {
        // leap seconds count as the last nanosecond of their minute
        let nano = |t: &DateTime<Tz>| i64::from(t.nanosecond().min(999_999_999));

        let mut nanos = nano(end) - nano(start);
        let mut seconds = i64::from(end.second()) - i64::from(start.second());
        let mut minutes = i64::from(end.minute()) - i64::from(start.minute());
        let mut hours = i64::from(end.hour()) - i64::from(start.hour());

        if nanos < 0 {
            nanos += 1_000_000_000;
            seconds -= 1;
        }
        if seconds < 0 {
            seconds += 60;
            minutes -= 1;
        }
        if minutes < 0 {
            minutes += 60;
            hours -= 1;
        }
        let day_borrowed = hours < 0;
        if day_borrowed {
            hours += 24;
        }

        let mut diff = Difference {
            hours: hours as u64,
            minutes: minutes as u64,
            seconds: seconds as u64,
            tenths: (nanos / 100_000_000) as u64,
            ..Difference::default()
        };

        let days = end.clone().signed_duration_since(start).num_days();
        if days < UNIT_LIMIT {
            diff.days = days as u64;
            return Ok(diff);
        }

        // too many days for 16 bits: use calendar years, months and days
        let start_date = start.date_naive();
        let mut end_date = end.date_naive();
        if day_borrowed {
            end_date = end_date.pred_opt().ok_or(PeriodError::OutOfRange)?;
        }

        let (months, anchor) = whole_months_between(start_date, end_date)?;
        diff.years = months / 12;
        diff.months = months % 12;
        diff.days = (end_date - anchor).num_days() as u64;
        Ok(diff)
    }

    fn tenths(&self) -> [u64; 6] {
        [
            self.years * 10,
            self.months * 10,
            self.days * 10,
            self.hours * 10,
            self.minutes * 10,
            self.seconds * 10 + self.tenths,
        ]
    }
}

/// Largest number of whole months from `start` not passing `end`, and the
/// date that many months after `start`.
fn whole_months_between(start: NaiveDate, end: NaiveDate) -> PeriodResult<(u64, NaiveDate)> {
    let span = (i64::from(end.year()) - i64::from(start.year())) * 12 + i64::from(end.month())
        - i64::from(start.month());
    let add = |months: i64| {
        u32::try_from(months)
            .ok()
            .and_then(|m| start.checked_add_months(Months::new(m)))
            .ok_or(PeriodError::OutOfRange)
    };

    let anchor = add(span)?;
    if anchor <= end {
        return Ok((span as u64, anchor));
    }
    let anchor = add(span - 1)?;
    Ok(((span - 1) as u64, anchor))
}
