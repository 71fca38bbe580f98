/// Floating point type stored in every field array and output buffer.
///
/// One precision per build: the `single-precision` feature switches the
/// whole workspace to `f32`. Internal arithmetic is always `f64`.
#[cfg(not(feature = "single-precision"))]
pub type Real = f64;

#[cfg(feature = "single-precision")]
pub type Real = f32;

/// Widen a stored value for arithmetic.
#[inline]
pub fn to_f64(v: Real) -> f64 {
    f64::from(v)
}

/// Narrow an arithmetic result for storage.
#[inline]
#[allow(clippy::unnecessary_cast)]
pub fn from_f64(v: f64) -> Real {
    v as Real
}
