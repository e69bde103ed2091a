// ============================================================================
// Bridge Module
// Conversions between periods, chrono durations and chrono timestamps
// ============================================================================
//
// Every conversion that relies on calendar averages (365.2425 days per year,
// 30.436875 days per month, 24 hours per day) returns a `precise` flag
// alongside its result. Approximation is not an error.

mod duration;
mod timestamp;
