// ============================================================================
// Period Value Type
// Six fixed-point fields with one decimal place and a homogeneous sign
// ============================================================================

use crate::numeric::wide::{Sign, WidePeriod};
use crate::numeric::{PeriodError, PeriodResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Add, Neg};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A period of time in years, months, days, hours, minutes and seconds.
///
/// Each field is an i16 holding ten times its real value, so every field has
/// one decimal place and a range of about ±3276.7. All non-zero fields share
/// one sign.
///
/// Equality is exact and field-wise: one day and 24 hours are different
/// periods, because days are calendar-relative and hours are not.
///
/// # Example
/// ```ignore
/// use iso_period::Period;
///
/// let p = Period::new_hms(0, 0, 125)?;
/// let n = p.normalise(true)?;         // PT2M5S
/// assert_eq!(n.minutes(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPeriod"))]
pub struct Period {
    years: i16,
    months: i16,
    days: i16,
    hours: i16,
    minutes: i16,
    seconds: i16,
}

/// Deserialized fields before the sign and range checks of [`Period::from_tenths`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawPeriod {
    years: i16,
    months: i16,
    days: i16,
    hours: i16,
    minutes: i16,
    seconds: i16,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPeriod> for Period {
    type Error = PeriodError;

    fn try_from(raw: RawPeriod) -> PeriodResult<Self> {
        Period::from_tenths(
            raw.years,
            raw.months,
            raw.days,
            raw.hours,
            raw.minutes,
            raw.seconds,
        )
    }
}

impl Period {
    /// The zero-length period
    pub const ZERO: Self = Self::from_tenths_unchecked(0, 0, 0, 0, 0, 0);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a period from whole units. Fields are kept verbatim: 120 seconds
    /// stays 120 seconds until [`Period::normalise`] is applied.
    ///
    /// # Errors
    /// - `MixedSigns` if the arguments do not share one sign
    /// - `Overflow` if any argument is outside ±3276
    pub fn new(
        years: i32,
        months: i32,
        days: i32,
        hours: i32,
        minutes: i32,
        seconds: i32,
    ) -> PeriodResult<Self> {
        let units = [years, months, days, hours, minutes, seconds];
        let negative = units.iter().any(|&v| v < 0);
        let positive = units.iter().any(|&v| v > 0);
        if negative && positive {
            return Err(PeriodError::MixedSigns {
                input: format!(
                    "P{}Y{}M{}DT{}H{}M{}S",
                    years, months, days, hours, minutes, seconds
                ),
            });
        }

        WidePeriod::new(
            Sign::of(negative),
            units.map(|v| u64::from(v.unsigned_abs()) * 10),
        )
        .into_period()
    }

    /// Create a period from whole years, months and days.
    #[inline]
    pub fn new_ymd(years: i32, months: i32, days: i32) -> PeriodResult<Self> {
        Self::new(years, months, days, 0, 0, 0)
    }

    /// Create a period from whole hours, minutes and seconds.
    #[inline]
    pub fn new_hms(hours: i32, minutes: i32, seconds: i32) -> PeriodResult<Self> {
        Self::new(0, 0, 0, hours, minutes, seconds)
    }

    /// Create a period from raw fixed-point fields (ten times the real value).
    ///
    /// This is the form a textual parser produces: `P2.5Y` is `years = 25`.
    ///
    /// # Errors
    /// - `MixedSigns` if the fields do not share one sign
    /// - `Overflow` if any field is `i16::MIN`, which has no positive counterpart
    pub fn from_tenths(
        years: i16,
        months: i16,
        days: i16,
        hours: i16,
        minutes: i16,
        seconds: i16,
    ) -> PeriodResult<Self> {
        let candidate = Self::from_tenths_unchecked(years, months, days, hours, minutes, seconds);
        WidePeriod::from_period(&candidate)?.into_period()
    }

    #[inline]
    pub(crate) const fn from_tenths_unchecked(
        years: i16,
        months: i16,
        days: i16,
        hours: i16,
        minutes: i16,
        seconds: i16,
    ) -> Self {
        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Create a period from six decimal magnitudes.
    ///
    /// # Errors
    /// - `MixedSigns` if the values do not share one sign
    /// - `PrecisionLoss` if any value has more than one decimal place
    /// - `Overflow` if any value is outside ±3276.7
    pub fn from_decimal_fields(
        years: Decimal,
        months: Decimal,
        days: Decimal,
        hours: Decimal,
        minutes: Decimal,
        seconds: Decimal,
    ) -> PeriodResult<Self> {
        let values = [years, months, days, hours, minutes, seconds];
        let negative = values.iter().any(|v| v.is_sign_negative() && !v.is_zero());
        let positive = values.iter().any(|v| v.is_sign_positive() && !v.is_zero());
        if negative && positive {
            return Err(PeriodError::MixedSigns {
                input: format!(
                    "P{}Y{}M{}DT{}H{}M{}S",
                    years, months, days, hours, minutes, seconds
                ),
            });
        }

        let mut tenths = [0u64; 6];
        for (slot, value) in tenths.iter_mut().zip(values) {
            let Some(scaled) = value.abs().checked_mul(Decimal::TEN) else {
                // beyond Decimal's range is certainly beyond a field's
                *slot = u64::MAX;
                continue;
            };
            if !scaled.fract().is_zero() {
                return Err(PeriodError::PrecisionLoss);
            }
            // anything too large for u64 is certainly out of range
            *slot = scaled.to_u64().unwrap_or(u64::MAX);
        }

        WidePeriod::new(Sign::of(negative), tenths).into_period()
    }

    // ========================================================================
    // Sign
    // ========================================================================

    /// The raw fields, coarsest first, each ten times the real value.
    #[inline]
    pub const fn tenths(&self) -> [i16; 6] {
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
        *self == Self::ZERO
    }

    /// True if any field is positive. By construction, no field is then negative.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.tenths().iter().any(|&v| v > 0)
    }

    /// True if any field is negative. By construction, no field is then positive.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.tenths().iter().any(|&v| v < 0)
    }

    /// +1 for positive periods, -1 for negative periods and 0 for zero.
    pub fn sign(&self) -> i32 {
        if self.is_negative() {
            -1
        } else if self.is_positive() {
            1
        } else {
            0
        }
    }

    pub(crate) fn check_homogeneous(&self) -> PeriodResult<()> {
        if self.is_negative() && self.is_positive() {
            let t = self.tenths().map(|v| Decimal::new(i64::from(v), 1).normalize());
            return Err(PeriodError::MixedSigns {
                input: format!(
                    "P{}Y{}M{}DT{}H{}M{}S",
                    t[0], t[1], t[2], t[3], t[4], t[5]
                ),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Field Accessors
    // ========================================================================

    /// Whole years, truncated toward zero. No other field is included.
    #[inline]
    pub fn years(&self) -> i32 {
        i32::from(self.years / 10)
    }

    /// Years including the decimal fraction.
    #[inline]
    pub fn years_float(&self) -> f32 {
        f32::from(self.years) / 10.0
    }

    #[inline]
    pub fn years_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.years), 1)
    }

    /// Whole months. After normalisation, multiples of 12 months have moved
    /// into the years.
    #[inline]
    pub fn months(&self) -> i32 {
        i32::from(self.months / 10)
    }

    #[inline]
    pub fn months_float(&self) -> f32 {
        f32::from(self.months) / 10.0
    }

    #[inline]
    pub fn months_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.months), 1)
    }

    /// Whole days, including the days that make up whole weeks.
    #[inline]
    pub fn days(&self) -> i32 {
        i32::from(self.days / 10)
    }

    #[inline]
    pub fn days_float(&self) -> f32 {
        f32::from(self.days) / 10.0
    }

    #[inline]
    pub fn days_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.days), 1)
    }

    /// Whole weeks inferred from the days field. Weeks are never stored.
    #[inline]
    pub fn weeks(&self) -> i32 {
        i32::from(self.days / 70)
    }

    #[inline]
    pub fn weeks_float(&self) -> f32 {
        f32::from(self.days) / 70.0
    }

    /// Whole days left once whole weeks are removed, with the period's sign.
    ///
    /// `weeks() * 7 + modulo_days() == days()` always holds.
    pub fn modulo_days(&self) -> i32 {
        let f = i32::from(self.days.unsigned_abs() % 70 / 10);
        if self.days < 0 {
            -f
        } else {
            f
        }
    }

    #[inline]
    pub fn hours(&self) -> i32 {
        i32::from(self.hours / 10)
    }

    #[inline]
    pub fn hours_float(&self) -> f32 {
        f32::from(self.hours) / 10.0
    }

    #[inline]
    pub fn hours_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.hours), 1)
    }

    #[inline]
    pub fn minutes(&self) -> i32 {
        i32::from(self.minutes / 10)
    }

    #[inline]
    pub fn minutes_float(&self) -> f32 {
        f32::from(self.minutes) / 10.0
    }

    #[inline]
    pub fn minutes_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.minutes), 1)
    }

    #[inline]
    pub fn seconds(&self) -> i32 {
        i32::from(self.seconds / 10)
    }

    #[inline]
    pub fn seconds_float(&self) -> f32 {
        f32::from(self.seconds) / 10.0
    }

    #[inline]
    pub fn seconds_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.seconds), 1)
    }

    // ========================================================================
    // Projections and Sign Changes
    // ========================================================================

    /// Keep years, months and days; zero the clock fields.
    #[inline]
    pub const fn only_ymd(&self) -> Self {
        Self::from_tenths_unchecked(self.years, self.months, self.days, 0, 0, 0)
    }

    /// Keep hours, minutes and seconds; zero the calendar fields.
    #[inline]
    pub const fn only_hms(&self) -> Self {
        Self::from_tenths_unchecked(0, 0, 0, self.hours, self.minutes, self.seconds)
    }

    /// Flip the sign of every field.
    #[inline]
    pub const fn negate(&self) -> Self {
        Self::from_tenths_unchecked(
            self.years.wrapping_neg(),
            self.months.wrapping_neg(),
            self.days.wrapping_neg(),
            self.hours.wrapping_neg(),
            self.minutes.wrapping_neg(),
            self.seconds.wrapping_neg(),
        )
    }

    /// Convert a negative period to a positive one.
    #[inline]
    pub fn abs(&self) -> Self {
        self.abs_neg().0
    }

    /// The absolute value together with whether a negation was needed.
    #[inline]
    pub(crate) fn abs_neg(&self) -> (Self, bool) {
        if self.is_negative() {
            (self.negate(), true)
        } else {
            (*self, false)
        }
    }

    /// Field-wise sum, without normalisation and without overflow checks.
    ///
    /// Fields wrap on overflow, and adding periods of opposite sign can leave
    /// mixed signs, which [`Period::normalise`] rejects. Normalise both inputs
    /// first to keep the sum in range.
    #[inline]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        Self::from_tenths_unchecked(
            self.years.wrapping_add(rhs.years),
            self.months.wrapping_add(rhs.months),
            self.days.wrapping_add(rhs.days),
            self.hours.wrapping_add(rhs.hours),
            self.minutes.wrapping_add(rhs.minutes),
            self.seconds.wrapping_add(rhs.seconds),
        )
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Neg for Period {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

// Unchecked, like `Period::wrapping_add`
impl Add for Period {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.wrapping_add(rhs)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_iso(
            f,
            self.is_negative(),
            self.tenths().map(|v| u64::from(v.unsigned_abs())),
        )
    }
}

/// Render magnitudes in tenths as ISO-8601, e.g. `-P1Y2.5M` or `PT3H`.
pub(crate) fn write_iso(
    f: &mut fmt::Formatter<'_>,
    negative: bool,
    tenths: [u64; 6],
) -> fmt::Result {
    if tenths.iter().all(|&v| v == 0) {
        return f.write_str("P0D");
    }

    let [years, months, days, hours, minutes, seconds] = tenths;
    if negative {
        f.write_str("-")?;
    }
    f.write_str("P")?;
    write_field(f, years, 'Y')?;
    write_field(f, months, 'M')?;
    write_field(f, days, 'D')?;
    if hours != 0 || minutes != 0 || seconds != 0 {
        f.write_str("T")?;
        write_field(f, hours, 'H')?;
        write_field(f, minutes, 'M')?;
        write_field(f, seconds, 'S')?;
    }
    Ok(())
}

fn write_field(f: &mut fmt::Formatter<'_>, tenths: u64, designator: char) -> fmt::Result {
    match (tenths / 10, tenths % 10) {
        (0, 0) => Ok(()),
        (whole, 0) => write!(f, "{}{}", whole, designator),
        (whole, frac) => write!(f, "{}.{}{}", whole, frac, designator),
    }
}

// ============================================================================
// Tests
// ============================================================================
