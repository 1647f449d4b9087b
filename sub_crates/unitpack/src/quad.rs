//! Quad-tree encoding of 2d points.
//!
//! A point is encoded by repeatedly splitting a square into four quadrants
//! and recording which one the point falls in.  Each level costs two bits
//! and halves the reconstruction error, so a depth `n` path locates the
//! point to within `2^-n` of the centroid of its final cell (for the
//! default `[-1, 1]` square).
//!
//! Paths are stored finest level first: index `0` is the deepest split and
//! the last index is the root split.  This is the order the levels are
//! produced in, and it is also the order they sit in the packed bytes.

use glam::DVec2;

use crate::{UnpackError, UnpackResult};

/// Which quadrant of a square a point fell in at one level of subdivision.
///
/// The discriminants are the 2-bit codes used in packed paths.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Quadrant {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Quadrant {
    #[inline(always)]
    pub fn from_bits(bits: u8) -> Quadrant {
        match bits & 0b11 {
            0 => Quadrant::TopLeft,
            1 => Quadrant::TopRight,
            2 => Quadrant::BottomLeft,
            _ => Quadrant::BottomRight,
        }
    }

    #[inline(always)]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Unit offset of this quadrant's center relative to its parent's
    /// center.
    #[inline(always)]
    fn sign(self) -> DVec2 {
        match self {
            Quadrant::TopLeft => DVec2::new(-1.0, 1.0),
            Quadrant::TopRight => DVec2::new(1.0, 1.0),
            Quadrant::BottomLeft => DVec2::new(-1.0, -1.0),
            Quadrant::BottomRight => DVec2::new(1.0, -1.0),
        }
    }
}

/// Encodes `point` as a depth `depth` path within the `[-1, 1]` square.
pub fn encode(point: DVec2, depth: usize) -> Vec<Quadrant> {
    encode_in(point, DVec2::splat(-1.0), DVec2::splat(1.0), depth)
}

/// Encodes `point` as a depth `depth` path within the square spanning
/// `min` to `max`.
///
/// Points on a split line go to the top/right side.  Points outside the
/// square are not an error: they end up in the nearest edge cell.
pub fn encode_in(point: DVec2, min: DVec2, max: DVec2, depth: usize) -> Vec<Quadrant> {
    let mut path = Vec::with_capacity(depth);
    let mut min = min;
    let mut max = max;

    for _ in 0..depth {
        let mid = (min + max) * 0.5;
        let right = !(point.x < mid.x);
        let top = !(point.y < mid.y);

        if right {
            min.x = mid.x;
        } else {
            max.x = mid.x;
        }
        if top {
            min.y = mid.y;
        } else {
            max.y = mid.y;
        }

        path.push(match (top, right) {
            (true, false) => Quadrant::TopLeft,
            (true, true) => Quadrant::TopRight,
            (false, false) => Quadrant::BottomLeft,
            (false, true) => Quadrant::BottomRight,
        });
    }

    // Built root first, stored finest first.
    path.reverse();
    path
}

/// Reconstructs the centroid of the cell a path leads to, in the `[-1, 1]`
/// square.
///
/// An empty path decodes to the origin.
pub fn decode(path: &[Quadrant]) -> DVec2 {
    let mut point = DVec2::ZERO;
    let mut multiplier = 0.5;
    for quadrant in path.iter().rev() {
        point += quadrant.sign() * multiplier;
        multiplier *= 0.5;
    }
    point
}

/// Number of bytes needed to store a depth `depth` path.
#[inline(always)]
pub fn packed_len(depth: usize) -> usize {
    (depth + 3) / 4
}

/// Packs a path into bytes, four levels per byte.
///
/// Level `i` goes into byte `i / 4` at bit offset `2 * (i % 4)`, so the
/// first byte holds the finest levels.  Unused bits in the last byte are
/// zero.
pub fn pack_labels(path: &[Quadrant]) -> Vec<u8> {
    let mut bytes = vec![0u8; packed_len(path.len())];
    for (i, quadrant) in path.iter().enumerate() {
        bytes[i / 4] |= quadrant.bits() << (2 * (i % 4));
    }
    bytes
}

/// Inverse of `pack_labels()`.  Bytes past what `depth` needs are ignored.
pub fn unpack_labels(bytes: &[u8], depth: usize) -> UnpackResult<Vec<Quadrant>> {
    let needed = packed_len(depth);
    if bytes.len() < needed {
        return Err(UnpackError::TooShort {
            depth,
            needed,
            actual: bytes.len(),
        });
    }

    Ok((0..depth)
        .map(|i| Quadrant::from_bits(bytes[i / 4] >> (2 * (i % 4))))
        .collect())
}

/// Encodes `point` straight to packed bytes.
pub fn encode_bytes(point: DVec2, depth: usize) -> Vec<u8> {
    pack_labels(&encode(point, depth))
}

/// Decodes packed bytes straight to a point.
pub fn decode_bytes(bytes: &[u8], depth: usize) -> UnpackResult<DVec2> {
    Ok(decode(&unpack_labels(bytes, depth)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(x: f64, y: f64) -> Quadrant {
        let path = encode(DVec2::new(x, y), 1);
        assert_eq!(path.len(), 1);
        path[0]
    }

    #[test]
    fn single_level_quadrants() {
        assert_eq!(single(0.5, 0.5), Quadrant::TopRight);
        assert_eq!(single(0.5, -0.5), Quadrant::BottomRight);
        assert_eq!(single(-0.5, -0.5), Quadrant::BottomLeft);
        assert_eq!(single(-0.5, 0.5), Quadrant::TopLeft);
    }

    #[test]
    fn split_line_goes_top_right() {
        assert_eq!(single(0.0, 0.0), Quadrant::TopRight);
        assert_eq!(single(-0.5, 0.0), Quadrant::TopLeft);
        assert_eq!(single(0.0, -0.5), Quadrant::BottomRight);
    }

    #[test]
    fn finest_level_first() {
        let path = encode(DVec2::new(0.25, 0.25), 2);
        assert_eq!(path, vec![Quadrant::BottomLeft, Quadrant::TopRight]);
    }

    #[test]
    fn decode_is_cell_centroid() {
        assert_eq!(decode(&[Quadrant::TopRight]), DVec2::new(0.5, 0.5));
        assert_eq!(
            decode(&[Quadrant::BottomLeft, Quadrant::TopRight]),
            DVec2::new(0.25, 0.25)
        );
        assert_eq!(
            decode(&[Quadrant::TopRight, Quadrant::BottomLeft]),
            DVec2::new(-0.25, -0.25)
        );
    }

    #[test]
    fn empty_path() {
        assert!(encode(DVec2::new(0.3, -0.7), 0).is_empty());
        assert_eq!(decode(&[]), DVec2::ZERO);
        assert!(pack_labels(&[]).is_empty());
    }

    #[test]
    fn custom_bounds() {
        let path = encode_in(
            DVec2::new(3.5, 0.5),
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 4.0),
            2,
        );
        // Root split: right/bottom.  Then within [2,4]x[0,2]: right/bottom.
        assert_eq!(path, vec![Quadrant::BottomRight, Quadrant::BottomRight]);
    }

    #[test]
    fn pack_layout() {
        let path = [
            Quadrant::TopRight,    // 01
            Quadrant::BottomLeft,  // 10
            Quadrant::BottomRight, // 11
            Quadrant::TopLeft,     // 00
            Quadrant::BottomRight, // 11
        ];
        let bytes = pack_labels(&path);
        assert_eq!(bytes, vec![0b00_11_10_01, 0b0000_0011]);
        assert_eq!(unpack_labels(&bytes, path.len()).unwrap(), path.to_vec());
    }

    #[test]
    fn unpack_too_short() {
        assert_eq!(
            unpack_labels(&[0, 0], 12),
            Err(UnpackError::TooShort {
                depth: 12,
                needed: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn byte_round_trip_error() {
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(-1.0, -1.0),
            DVec2::new(0.123, -0.987),
            DVec2::new(-0.5, 0.75),
            DVec2::new(0.999, -0.001),
        ];
        for &(depth, tolerance) in &[(4, 0.07), (8, 0.004), (12, 0.00025), (16, 0.000016)] {
            for &p in &points {
                let bytes = encode_bytes(p, depth);
                assert_eq!(bytes.len(), depth / 4);
                let p2 = decode_bytes(&bytes, depth).unwrap();
                assert!(
                    (p - p2).abs().max_element() < tolerance,
                    "depth {}: {:?} -> {:?}",
                    depth,
                    p,
                    p2
                );
            }
        }
    }
}
