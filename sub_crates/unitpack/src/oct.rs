//! Octahedral mapping and the oct16/oct24/oct32 codecs.
//!
//! A direction is projected onto the octahedron `|x| + |y| + |z| = 1` and
//! the octahedron is unfolded into the `[-1, 1]` square: the upper half
//! maps straight down onto the inner diamond, and the four faces of the
//! lower half fold out over the diagonals into the corners.
//!
//! The packed codecs quantize the two UV coordinates on a uniform grid with
//! half the bit budget each.  Encoding picks the best of the four grid
//! points surrounding the exact UV (see `to_oct_uv_precise()`), so it is
//! about four times slower than decoding.

use glam::{DVec2, DVec3};

use crate::{
    check_len,
    quantize::{dequantize, grid_value, max_code, quantize, MAX_BITS, MIN_BITS},
    read_le, write_le, UnpackResult,
};

/// Maps a direction to its octahedral UV coordinates in `[-1, 1]^2`.
///
/// Only the direction matters, not the length.  The zero vector has no
/// direction, and produces NaN.
#[inline]
pub fn to_oct_uv(dir: DVec3) -> DVec2 {
    let p = DVec2::new(dir.x, dir.y) / (dir.x.abs() + dir.y.abs() + dir.z.abs());
    if dir.z > 0.0 {
        p
    } else {
        fold(p)
    }
}

/// Maps octahedral UV coordinates back to a unit direction.
#[inline]
pub fn from_oct_uv(uv: DVec2) -> DVec3 {
    let z = 1.0 - uv.x.abs() - uv.y.abs();
    let xy = if z < 0.0 { fold(uv) } else { uv };
    DVec3::new(xy.x, xy.y, z).normalize_or_zero()
}

/// Reflects a point across the diagonals of the square.  Its own inverse
/// within each quadrant.
#[inline(always)]
fn fold(p: DVec2) -> DVec2 {
    DVec2::new(
        (1.0 - p.y.abs()) * sign_not_zero(p.x),
        (1.0 - p.x.abs()) * sign_not_zero(p.y),
    )
}

#[inline(always)]
fn sign_not_zero(n: f64) -> f64 {
    if n < 0.0 {
        -1.0
    } else {
        1.0
    }
}

//----

/// Octahedral UV of `dir`, snapped to the grid used by a `total_bits`
/// encoding, choosing the grid point that decodes closest to `dir`.
///
/// The result is a real-valued point exactly on the grid, not yet packed.
/// `total_bits` is split evenly between the two axes.
///
/// # Panics
///
/// If `total_bits` is odd, or outside `4..=62`.
pub fn to_oct_uv_precise(dir: DVec3, total_bits: u32) -> DVec2 {
    assert!(
        total_bits % 2 == 0 && total_bits >= MIN_BITS * 2 && total_bits <= MAX_BITS * 2,
        "unsupported octahedral width: {} bits",
        total_bits
    );
    let bits = total_bits / 2;
    let (u, v) = precise_codes(dir, bits);
    DVec2::new(grid_value(u, bits), grid_value(v, bits))
}

/// Finds the per-axis grid codes that best reproduce `dir`.
///
/// Flooring each axis independently isn't the same as finding the nearest
/// representable direction, since the decode is non-linear in `(u, v)`.
/// So we try the floor and the floor plus one step on each axis, decode
/// all four, and keep whichever has the largest dot product with `dir`.
fn precise_codes(dir: DVec3, bits: u32) -> (u32, u32) {
    let uv = to_oct_uv(dir);
    let base_u = quantize(uv.x, bits);
    let base_v = quantize(uv.y, bits);

    let mut best = (base_u, base_v);
    let mut best_dot = std::f64::NEG_INFINITY;
    for &(du, dv) in &[(0, 0), (1, 0), (0, 1), (1, 1)] {
        let (u, v) = (base_u + du, base_v + dv);
        let candidate = from_oct_uv(DVec2::new(grid_value(u, bits), grid_value(v, bits)));
        let dot = candidate.dot(dir);
        if dot > best_dot {
            best = (u, v);
            best_dot = dot;
        }
    }

    // A nudge past the top of the grid never beats the in-range candidate
    // on a real direction, but NaN input still has to produce valid codes.
    let max = max_code(bits);
    (best.0.min(max), best.1.min(max))
}

#[inline(always)]
fn encode_codes(dir: DVec3, bits: u32) -> u32 {
    let (u, v) = precise_codes(dir, bits);
    (u << bits) | v
}

#[inline(always)]
fn decode_codes(n: u32, bits: u32) -> DVec3 {
    let mask = max_code(bits);
    let u = dequantize((n >> bits) & mask, bits);
    let v = dequantize(n & mask, bits);
    from_oct_uv(DVec2::new(u, v))
}

//----

/// Encodes a direction in 2 bytes, 8 bits per octahedral axis.
pub fn pack_oct16(dir: DVec3) -> [u8; 2] {
    write_le(encode_codes(dir, 8))
}

pub fn unpack_oct16(bytes: &[u8]) -> UnpackResult<DVec3> {
    let bytes = check_len::<2>(bytes)?;
    Ok(decode_codes(read_le(bytes), 8))
}

/// Encodes a direction in 3 bytes, 12 bits per octahedral axis.
pub fn pack_oct24(dir: DVec3) -> [u8; 3] {
    write_le(encode_codes(dir, 12))
}

pub fn unpack_oct24(bytes: &[u8]) -> UnpackResult<DVec3> {
    let bytes = check_len::<3>(bytes)?;
    Ok(decode_codes(read_le(bytes), 12))
}

/// Encodes a direction in 4 bytes, 16 bits per octahedral axis.
pub fn pack_oct32(dir: DVec3) -> [u8; 4] {
    write_le(encode_codes(dir, 16))
}

pub fn unpack_oct32(bytes: &[u8]) -> UnpackResult<DVec3> {
    let bytes = check_len::<4>(bytes)?;
    Ok(decode_codes(read_le(bytes), 16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnpackError;

    fn axes() -> [DVec3; 6] {
        [
            DVec3::X,
            DVec3::NEG_X,
            DVec3::Y,
            DVec3::NEG_Y,
            DVec3::Z,
            DVec3::NEG_Z,
        ]
    }

    fn close(a: DVec3, b: DVec3, delta: f64) -> bool {
        (a - b).abs().max_element() < delta
    }

    #[test]
    fn axis_uvs() {
        assert_eq!(to_oct_uv(DVec3::Z), DVec2::new(0.0, 0.0));
        assert_eq!(to_oct_uv(DVec3::NEG_Z), DVec2::new(1.0, 1.0));
        assert_eq!(to_oct_uv(DVec3::X), DVec2::new(1.0, 0.0));
        assert_eq!(to_oct_uv(DVec3::NEG_X), DVec2::new(-1.0, 0.0));
        assert_eq!(to_oct_uv(DVec3::Y), DVec2::new(0.0, 1.0));
        assert_eq!(to_oct_uv(DVec3::NEG_Y), DVec2::new(0.0, -1.0));
    }

    #[test]
    fn axis_directions_exact() {
        for &d in &axes() {
            assert_eq!(from_oct_uv(to_oct_uv(d)), d);
        }
    }

    #[test]
    fn corners_are_down() {
        for &(u, v) in &[(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
            assert!(close(from_oct_uv(DVec2::new(u, v)), DVec3::NEG_Z, 1.0e-12));
        }
    }

    #[test]
    fn unscaled_input() {
        let d = DVec3::new(3.0, -4.0, 12.0);
        assert!(close(from_oct_uv(to_oct_uv(d)), d.normalize(), 1.0e-12));
    }

    #[test]
    fn lower_hemisphere_round_trip() {
        let d = DVec3::new(-0.997605826445425, 0.06365823804882093, -0.027023022974122023)
            .normalize();
        let uv = to_oct_uv(d);
        assert!(uv.x.abs() + uv.y.abs() >= 1.0);
        assert!(close(from_oct_uv(uv), d, 1.0e-12));
    }

    #[test]
    fn precise_is_on_grid() {
        let d = DVec3::new(0.3, -0.5, 0.81).normalize();
        let uv = to_oct_uv_precise(d, 24);
        for &c in &[uv.x, uv.y] {
            let k = c * 2047.0;
            assert!((k - k.round()).abs() < 1.0e-9);
        }
    }

    #[test]
    fn precise_beats_floor() {
        let d = DVec3::new(0.7180684556508264, -0.6958747397502424, -0.011663600506254649)
            .normalize();
        for &bits in &[16, 24, 32] {
            let half = bits / 2;
            let uv = to_oct_uv(d);
            let floor = DVec2::new(
                dequantize(quantize(uv.x, half), half),
                dequantize(quantize(uv.y, half), half),
            );
            let precise = to_oct_uv_precise(d, bits);
            assert!(from_oct_uv(precise).dot(d) >= from_oct_uv(floor).dot(d));
        }
    }

    #[test]
    fn precise_width_limits() {
        let d = DVec3::new(0.3, 0.4, 0.5).normalize();
        let uv = to_oct_uv(d);

        let widest = to_oct_uv_precise(d, 62);
        assert!((widest - uv).abs().max_element() < 1.0e-8);
        assert!(widest.x > 0.0 && widest.y > 0.0);

        let narrowest = to_oct_uv_precise(d, 4);
        assert!(narrowest.is_finite());
        assert!(narrowest.x.abs() <= 1.0 && narrowest.y.abs() <= 1.0);
    }

    #[test]
    #[should_panic]
    fn precise_too_narrow_panics() {
        to_oct_uv_precise(DVec3::new(0.3, 0.4, 0.5).normalize(), 2);
    }

    #[test]
    #[should_panic]
    fn precise_too_wide_panics() {
        to_oct_uv_precise(DVec3::new(0.3, 0.4, 0.5).normalize(), 64);
    }

    #[test]
    #[should_panic]
    fn precise_odd_width_panics() {
        to_oct_uv_precise(DVec3::new(0.3, 0.4, 0.5).normalize(), 23);
    }

    #[test]
    fn codecs_axis_directions() {
        for &d in &axes() {
            assert!(close(unpack_oct16(&pack_oct16(d)).unwrap(), d, 1.0e-9));
            assert!(close(unpack_oct24(&pack_oct24(d)).unwrap(), d, 1.0e-9));
            assert!(close(unpack_oct32(&pack_oct32(d)).unwrap(), d, 1.0e-9));
        }
    }

    #[test]
    fn oct24_near_fold() {
        let d = DVec3::new(0.7180684556508264, -0.6958747397502424, -0.011663600506254649);
        let d2 = unpack_oct24(&pack_oct24(d)).unwrap();
        assert!(close(d, d2, 0.01));
    }

    #[test]
    fn byte_layout() {
        // +X is u = 1.0, v = 0.0: codes (4095, 2048) at 12 bits.
        let n = (4095u32 << 12) | 2048;
        assert_eq!(pack_oct24(DVec3::X), [n as u8, (n >> 8) as u8, (n >> 16) as u8]);
    }

    #[test]
    fn wrong_length() {
        assert_eq!(
            unpack_oct32(&[0, 0, 0]),
            Err(UnpackError::WrongLength {
                expected: 4,
                actual: 3
            })
        );
        assert!(unpack_oct16(&[]).is_err());
        assert!(unpack_oct24(&[0; 4]).is_err());
    }

    #[test]
    fn zero_vector_does_not_panic() {
        let _ = unpack_oct16(&pack_oct16(DVec3::ZERO));
        let _ = unpack_oct24(&pack_oct24(DVec3::ZERO));
        let _ = unpack_oct32(&pack_oct32(DVec3::ZERO));
    }
}
