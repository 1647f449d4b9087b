//! Compact fixed-width encodings for unit 3d vectors.
//!
//! Every codec maps a direction to 2, 3, or 4 bytes and back, trading
//! precision for size.  The interesting ones are built on the octahedral
//! mapping described in "A Survey of Efficient Representations for
//! Independent Unit Vectors" by Cigolle et al.:
//!
//! - `oct16`/`oct24`/`oct32`: octahedral UV quantized on a uniform grid,
//!   with a small exhaustive search over the per-axis rounding to pick the
//!   representable direction closest to the input.
//! - `octquad16`/`octquad24`/`octquad32`: octahedral UV encoded as a
//!   quad-tree path.  These do *not* run the rounding search.
//! - `spherical24` and `coarse24`: simple linear quantizers, kept for
//!   compatibility with existing data.
//!
//! Codecs never validate the length of their input vectors.  Non-unit
//! input is accepted, and unpacked results are always renormalized.
//!
//! None of the formats carry a header: the caller has to know which codec
//! produced a given buffer.  [`Codec`] gives a uniform handle over all of
//! them when that choice is made at runtime.

mod error;

pub mod codec;
pub mod coarse;
pub mod oct;
pub mod oct_quad;
pub mod quad;
pub mod quantize;
pub mod spherical;

pub use codec::{Codec, UnknownCodec};
pub use coarse::{pack_coarse24, unpack_coarse24};
pub use error::{UnpackError, UnpackResult};
pub use oct::{
    from_oct_uv, pack_oct16, pack_oct24, pack_oct32, to_oct_uv, to_oct_uv_precise, unpack_oct16,
    unpack_oct24, unpack_oct32,
};
pub use oct_quad::{
    pack_oct_quad16, pack_oct_quad24, pack_oct_quad32, unpack_oct_quad16, unpack_oct_quad24,
    unpack_oct_quad32,
};
pub use quad::Quadrant;
pub use spherical::{pack_spherical24, unpack_spherical24};

pub use glam::{DVec2, DVec3};

/// Clamps `x` to the range `[lo, hi]`.
///
/// Unlike `f64::clamp()` this never panics, even if `lo > hi`.  NaN
/// passes through unchanged.
#[inline]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

//----

/// Reads up to four bytes as a little-endian integer.
#[inline(always)]
pub(crate) fn read_le(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .rev()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

/// Writes the low `N` bytes of `n` in little-endian order.
#[inline(always)]
pub(crate) fn write_le<const N: usize>(n: u32) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&n.to_le_bytes()[..N]);
    out
}

/// Fails with `UnpackError::WrongLength` unless `bytes` is exactly `N` long.
#[inline(always)]
pub(crate) fn check_len<const N: usize>(bytes: &[u8]) -> UnpackResult<&[u8; N]> {
    use std::convert::TryInto;
    bytes.try_into().map_err(|_| UnpackError::WrongLength {
        expected: N,
        actual: bytes.len(),
    })
}
