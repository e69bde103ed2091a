// ============================================================================
// Domain Module
// The period value type and its ISO-8601 rendering
// ============================================================================

pub mod period;

pub use period::Period;

pub(crate) use period::write_iso;
