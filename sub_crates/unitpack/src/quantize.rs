//! Fixed-point quantization of values in `[-1, 1]`.
//!
//! A value is scaled by `2^(bits-1) - 1`, floored, and offset by
//! `2^(bits-1)`.  Flooring (rather than rounding) means the grid is not
//! centered: code `0` is never produced by `quantize()`, and every value is
//! biased slightly toward negative infinity.  The packed formats depend on
//! that bias.
//!
//! Every function here takes a bit width in `MIN_BITS..=MAX_BITS` and
//! panics on anything else.

use crate::clamp;

/// Narrowest supported code.  One bit leaves no room between the ends of
/// the grid.
pub const MIN_BITS: u32 = 2;

/// Widest supported code.  Codes and the intermediate `code + 1` have to
/// fit in a `u32`.
pub const MAX_BITS: u32 = 31;

#[inline(always)]
fn check_bits(bits: u32) {
    assert!(
        bits >= MIN_BITS && bits <= MAX_BITS,
        "unsupported quantization width: {} bits",
        bits
    );
}

/// Largest code representable with `bits` bits.
///
/// # Panics
///
/// If `bits` is outside `MIN_BITS..=MAX_BITS`.
#[inline(always)]
pub fn max_code(bits: u32) -> u32 {
    check_bits(bits);
    (1u32 << bits) - 1
}

#[inline(always)]
fn half(bits: u32) -> f64 {
    check_bits(bits);
    f64::from(1u32 << (bits - 1))
}

/// Quantizes `value` to a `bits`-wide code.  Input outside `[-1, 1]` is
/// clamped first.
///
/// # Panics
///
/// If `bits` is outside `MIN_BITS..=MAX_BITS`.
#[inline]
pub fn quantize(value: f64, bits: u32) -> u32 {
    let h = half(bits);
    let code = (clamp(value, -1.0, 1.0) * (h - 1.0)).floor() + h;

    // NaN lands on 0 here rather than panicking.
    (code as u32).min(max_code(bits))
}

/// The grid value of `code`, without clamping.
///
/// Codes one past either end of the grid map to values slightly outside
/// `[-1, 1]`.
///
/// # Panics
///
/// If `bits` is outside `MIN_BITS..=MAX_BITS`.
#[inline(always)]
pub fn grid_value(code: u32, bits: u32) -> f64 {
    let h = half(bits);
    (f64::from(code) - h) / (h - 1.0)
}

/// Inverse of `quantize()`.  The result is clamped to `[-1, 1]`, which
/// only matters for code `0`.
///
/// # Panics
///
/// If `bits` is outside `MIN_BITS..=MAX_BITS`.
#[inline]
pub fn dequantize(code: u32, bits: u32) -> f64 {
    clamp(grid_value(code, bits), -1.0, 1.0)
}
