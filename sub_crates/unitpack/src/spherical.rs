//! 24-bit encoding that stores X and Y directly and only the sign of Z.
//!
//! X gets 12 bits, Y gets 11, and the last bit records whether Z was
//! non-negative.  Z is rebuilt from `sqrt(1 - x^2 - y^2)`, which is only
//! meaningful for unit-length input.  Precision is worst near the equator,
//! where small errors in X and Y turn into large errors in Z.

use glam::DVec3;

use crate::{
    check_len,
    quantize::{dequantize, quantize},
    read_le, write_le, UnpackResult,
};

const X_BITS: u32 = 12;
const Y_BITS: u32 = 11;

pub fn pack_spherical24(dir: DVec3) -> [u8; 3] {
    let x = quantize(dir.x, X_BITS);
    let y = quantize(dir.y, Y_BITS);
    let z_positive = (dir.z >= 0.0) as u32;

    write_le((x << (Y_BITS + 1)) | (y << 1) | z_positive)
}

pub fn unpack_spherical24(bytes: &[u8]) -> UnpackResult<DVec3> {
    let n = read_le(check_len::<3>(bytes)?);

    let x = dequantize(n >> (Y_BITS + 1), X_BITS);
    let y = dequantize((n >> 1) & ((1 << Y_BITS) - 1), Y_BITS);

    // Quantization can push x^2 + y^2 slightly past 1.
    let z = (1.0 - x * x - y * y).max(0.0).sqrt();
    let z = if n & 1 == 1 { z } else { -z };

    Ok(DVec3::new(x, y, z).normalize_or_zero())
}
