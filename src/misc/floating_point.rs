use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Trait for floating point types (f32, f64)
/// Path coordinates may be given in either precision; the sweep itself always runs in f64.
pub trait FloatingPoint: RealField + ToPrimitive + Copy {
    /// Widen the value to f64 for the sweep.
    fn to_sweep(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    /// Narrow a sweep value back to this precision.
    fn from_sweep(value: f64) -> Self;
}

impl FloatingPoint for f32 {
    fn from_sweep(value: f64) -> Self {
        value as f32
    }
}

impl FloatingPoint for f64 {
    fn from_sweep(value: f64) -> Self {
        value
    }
}
