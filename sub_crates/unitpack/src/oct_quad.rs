//! Octahedral mapping with the UV stored as a quad-tree path.
//!
//! Unlike the oct16/24/32 codecs, these encode the exact octahedral UV with
//! no search over neighboring cells, so at the same size they can land on a
//! slightly worse direction than the grid codecs.  The decoder wouldn't
//! change if encoding did search, but the bytes produced would.
//!
//! TODO: measure whether trying the neighboring depth-n cells on encode
//! improves the error enough to justify a searched variant.

use glam::DVec3;

use crate::{
    check_len,
    oct::{from_oct_uv, to_oct_uv},
    quad, UnpackResult,
};

#[inline(always)]
fn pack<const N: usize>(dir: DVec3) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&quad::encode_bytes(to_oct_uv(dir), N * 4));
    out
}

#[inline(always)]
fn unpack<const N: usize>(bytes: &[u8]) -> UnpackResult<DVec3> {
    let bytes = check_len::<N>(bytes)?;
    Ok(from_oct_uv(quad::decode_bytes(bytes, N * 4)?))
}

/// Encodes a direction as a depth 8 quad-tree path, in 2 bytes.
pub fn pack_oct_quad16(dir: DVec3) -> [u8; 2] {
    pack(dir)
}

pub fn unpack_oct_quad16(bytes: &[u8]) -> UnpackResult<DVec3> {
    unpack::<2>(bytes)
}

/// Encodes a direction as a depth 12 quad-tree path, in 3 bytes.
pub fn pack_oct_quad24(dir: DVec3) -> [u8; 3] {
    pack(dir)
}

pub fn unpack_oct_quad24(bytes: &[u8]) -> UnpackResult<DVec3> {
    unpack::<3>(bytes)
}

/// Encodes a direction as a depth 16 quad-tree path, in 4 bytes.
pub fn pack_oct_quad32(dir: DVec3) -> [u8; 4] {
    pack(dir)
}

pub fn unpack_oct_quad32(bytes: &[u8]) -> UnpackResult<DVec3> {
    unpack::<4>(bytes)
}
