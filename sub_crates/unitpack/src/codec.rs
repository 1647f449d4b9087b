//! Runtime selection between the codecs.

use std::{fmt, str::FromStr};

use glam::DVec3;
use thiserror::Error;

use crate::{coarse, oct, oct_quad, spherical, UnpackResult};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Codec {
    Spherical24,
    Coarse24,
    Oct16,
    Oct24,
    Oct32,
    OctQuad16,
    OctQuad24,
    OctQuad32,
}

impl Codec {
    pub const ALL: [Codec; 8] = [
        Codec::Spherical24,
        Codec::Coarse24,
        Codec::Oct16,
        Codec::Oct24,
        Codec::Oct32,
        Codec::OctQuad16,
        Codec::OctQuad24,
        Codec::OctQuad32,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Codec::Spherical24 => "spherical24",
            Codec::Coarse24 => "coarse24",
            Codec::Oct16 => "oct16",
            Codec::Oct24 => "oct24",
            Codec::Oct32 => "oct32",
            Codec::OctQuad16 => "octquad16",
            Codec::OctQuad24 => "octquad24",
            Codec::OctQuad32 => "octquad32",
        }
    }

    /// Size in bytes of one packed direction.
    pub fn size(self) -> usize {
        match self {
            Codec::Oct16 | Codec::OctQuad16 => 2,
            Codec::Spherical24 | Codec::Coarse24 | Codec::Oct24 | Codec::OctQuad24 => 3,
            Codec::Oct32 | Codec::OctQuad32 => 4,
        }
    }

    /// Appends the packed form of `dir` to `out`.
    pub fn pack_into(self, dir: DVec3, out: &mut Vec<u8>) {
        match self {
            Codec::Spherical24 => out.extend_from_slice(&spherical::pack_spherical24(dir)),
            Codec::Coarse24 => out.extend_from_slice(&coarse::pack_coarse24(dir)),
            Codec::Oct16 => out.extend_from_slice(&oct::pack_oct16(dir)),
            Codec::Oct24 => out.extend_from_slice(&oct::pack_oct24(dir)),
            Codec::Oct32 => out.extend_from_slice(&oct::pack_oct32(dir)),
            Codec::OctQuad16 => out.extend_from_slice(&oct_quad::pack_oct_quad16(dir)),
            Codec::OctQuad24 => out.extend_from_slice(&oct_quad::pack_oct_quad24(dir)),
            Codec::OctQuad32 => out.extend_from_slice(&oct_quad::pack_oct_quad32(dir)),
        }
    }

    pub fn pack(self, dir: DVec3) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.pack_into(dir, &mut out);
        out
    }

    /// Decodes one direction.  `bytes` must be exactly `size()` long.
    pub fn unpack(self, bytes: &[u8]) -> UnpackResult<DVec3> {
        match self {
            Codec::Spherical24 => spherical::unpack_spherical24(bytes),
            Codec::Coarse24 => coarse::unpack_coarse24(bytes),
            Codec::Oct16 => oct::unpack_oct16(bytes),
            Codec::Oct24 => oct::unpack_oct24(bytes),
            Codec::Oct32 => oct::unpack_oct32(bytes),
            Codec::OctQuad16 => oct_quad::unpack_oct_quad16(bytes),
            Codec::OctQuad24 => oct_quad::unpack_oct_quad24(bytes),
            Codec::OctQuad32 => oct_quad::unpack_oct_quad32(bytes),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown codec '{0}'")]
pub struct UnknownCodec(pub String);

impl FromStr for Codec {
    type Err = UnknownCodec;

    /// Parses a codec name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Codec, UnknownCodec> {
        let name = s.trim();
        Codec::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCodec(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for &codec in &Codec::ALL {
            assert_eq!(codec.name().parse::<Codec>(), Ok(codec));
        }
        assert_eq!(" Oct24 ".parse::<Codec>(), Ok(Codec::Oct24));
        assert_eq!(
            "oct64".parse::<Codec>(),
            Err(UnknownCodec("oct64".to_string()))
        );
    }

    #[test]
    fn sizes_match_packed_len() {
        let d = DVec3::new(-0.3, 0.4, -0.866).normalize();
        for &codec in &Codec::ALL {
            assert_eq!(codec.pack(d).len(), codec.size(), "{}", codec);
        }
    }

    #[test]
    fn pack_into_appends() {
        let mut buf = vec![0xff];
        Codec::Oct16.pack_into(DVec3::Z, &mut buf);
        Codec::Oct32.pack_into(DVec3::Z, &mut buf);
        assert_eq!(buf.len(), 1 + 2 + 4);
        assert_eq!(buf[0], 0xff);
        assert_eq!(Codec::Oct32.unpack(&buf[3..]).unwrap(), DVec3::Z);
    }

    #[test]
    fn unpack_checks_length() {
        for &codec in &Codec::ALL {
            let too_long = vec![0u8; codec.size() + 1];
            assert!(codec.unpack(&too_long).is_err(), "{}", codec);
            assert!(codec.unpack(&too_long[..codec.size()]).is_ok(), "{}", codec);
        }
    }
}
