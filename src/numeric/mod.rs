// ============================================================================
// Numeric Module
// Fixed-point constants, errors and the wide accumulator for period arithmetic
// ============================================================================
//
// This module provides:
// - PeriodError / Field: error types naming the fields that went wrong
// - WidePeriod: sign-magnitude scratch space for multi-step arithmetic
// - Calendar ratios as fixed-point integer constants
//
// Design principles:
// - Every period field is an i16 holding ten times its real value
// - No floating-point operations in normalisation
// - Overflow is always reported, never wrapped or clamped

mod errors;
pub(crate) mod wide;

pub use errors::{Field, PeriodError, PeriodResult};

/// 365.2425 days per year by the Gregorian rule, scaled by 10^4
pub const DAYS_PER_YEAR_E4: i64 = 3_652_425;

/// 30.4369 days per month, scaled by 10^4
pub const DAYS_PER_MONTH_E4: i64 = 304_369;

/// 30.436875 days per month (a twelfth of a Gregorian year), scaled by 10^6
pub const DAYS_PER_MONTH_E6: i64 = 30_436_875;

pub(crate) const ONE_E4: i64 = 10_000;
pub(crate) const ONE_E6: i64 = 1_000_000;
pub(crate) const ONE_E7: i64 = 10_000_000;

/// Largest magnitude a field may hold, in tenths
pub(crate) const MAX_TENTHS: u64 = i16::MAX as u64;

/// Number of whole units that still fit a field once scaled by ten
pub(crate) const UNIT_LIMIT: i64 = 3277;
