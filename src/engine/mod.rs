// ============================================================================
// Engine Module
// Normalisation and scaling of periods
// ============================================================================
//
// Both operations are inherent methods on `Period`:
// - Period::normalise(precise): carries between fields
// - Period::scale(factor): multiplies by a real factor, then normalises

mod normalise;
mod scale;
