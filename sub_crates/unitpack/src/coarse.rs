//! One byte per axis.
//!
//! The simplest possible encoding, and the least precise: each component is
//! quantized independently to 8 bits with no use of the unit length.

use glam::DVec3;

use crate::{
    check_len,
    quantize::{dequantize, quantize},
    UnpackResult,
};

const BITS: u32 = 8;

/// Packs `x`, `y`, `z` into bytes 0, 1, 2.
///
/// Components go through the shared quantizer, so an exact `-1.0` becomes
/// byte `1`, not `0`.  Older coarse24 data may hold `0` for `-1.0`; both
/// decode to `-1.0`.
pub fn pack_coarse24(dir: DVec3) -> [u8; 3] {
    // Codes are at most 255 with 8 bits.
    [
        quantize(dir.x, BITS) as u8,
        quantize(dir.y, BITS) as u8,
        quantize(dir.z, BITS) as u8,
    ]
}

pub fn unpack_coarse24(bytes: &[u8]) -> UnpackResult<DVec3> {
    let b = check_len::<3>(bytes)?;
    Ok(DVec3::new(
        dequantize(u32::from(b[0]), BITS),
        dequantize(u32::from(b[1]), BITS),
        dequantize(u32::from(b[2]), BITS),
    )
    .normalize_or_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_bytes() {
        assert_eq!(pack_coarse24(DVec3::X), [255, 128, 128]);
        assert_eq!(pack_coarse24(DVec3::NEG_Z), [128, 128, 1]);
    }

    #[test]
    fn negative_one_byte() {
        assert_eq!(pack_coarse24(DVec3::NEG_X)[0], 1);
        assert_eq!(unpack_coarse24(&[1, 128, 128]).unwrap(), DVec3::NEG_X);
        assert_eq!(unpack_coarse24(&[0, 128, 128]).unwrap(), DVec3::NEG_X);
    }

    #[test]
    fn axis_directions() {
        for &d in &[DVec3::X, DVec3::NEG_Y, DVec3::Z] {
            assert_eq!(unpack_coarse24(&pack_coarse24(d)).unwrap(), d);
        }
    }

    #[test]
    fn diagonal() {
        let d = DVec3::new(1.0, 1.0, 1.0).normalize();
        let d2 = unpack_coarse24(&pack_coarse24(d)).unwrap();
        assert!((d - d2).abs().max_element() < 0.01);
    }

    #[test]
    fn wrong_length() {
        assert!(unpack_coarse24(&[128, 128]).is_err());
    }
}
