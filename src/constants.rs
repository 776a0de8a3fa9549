//! Physical and numeric constants
//!
//! These constants are shared by the signal synthesis, phase extraction
//! and unit conversion code.

/// Speed of light in vacuum in m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Peak correlation magnitude at or below which a correlation signal is
/// treated as identically zero and cannot be normalized.
pub const DEGENERACY_EPSILON: f64 = 1e-12;

/// Tolerance used when checking whether phase shifts are evenly spaced.
pub const PHASE_SPACING_TOLERANCE: f64 = 1e-9;
