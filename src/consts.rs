//! Mathematical constants

/// 2π
pub const TWO_PI: f64 = std::f64::consts::TAU;
/// 0.5 ln(2π)
pub const HALF_LN_2PI: f64 = 0.918_938_533_204_672_7;
