//! Measures codecs against a set of directions.

use std::io::{self, Write};

use flate2::{write::DeflateEncoder, Compression};
use glam::DVec3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, warn};
use unitpack::Codec;

use crate::{error::BenchResult, timer::Timer};

/// Component error past which a codec is considered broken on a dataset.
const SUSPICIOUS_ERROR: f64 = 0.1;

/// Size of one uncompressed direction: three `f32`s.
const BASELINE_SIZE: usize = 12;

/// Deflate level used when measuring how compressible packed data is.
const DEFLATE_LEVEL: u32 = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub method: String,
    pub uncompressed_bytes: usize,
    /// Size of the packed dataset after deflate.
    pub compressed_bytes: usize,
    /// Seconds for one pack+unpack pass over the dataset.
    pub runtime: Option<f64>,
    pub avg_error: Option<f64>,
    pub max_error: Option<f64>,
}

impl Entry {
    /// Uncompressed over compressed size.  Below 1.0 when deflate made the
    /// data bigger.
    pub fn compression_ratio(&self) -> f64 {
        if self.compressed_bytes == 0 {
            0.0
        } else {
            self.uncompressed_bytes as f64 / self.compressed_bytes as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// Generates `count` directions by normalizing uniform samples of the
/// `[-1, 1]` cube.  Samples too close to the origin are rejected.
pub fn random_directions(count: usize, seed: u64) -> Vec<DVec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut dirs = Vec::with_capacity(count);
    while dirs.len() < count {
        let v = DVec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if v.length_squared() > 1.0e-6 {
            dirs.push(v.normalize());
        }
    }
    dirs
}

pub fn run_dataset(name: &str, dirs: &[DVec3], codecs: &[Codec]) -> BenchResult<Dataset> {
    let mut entries = Vec::with_capacity(codecs.len() + 1);
    entries.push(baseline(dirs)?);
    for &codec in codecs {
        let entry = run_codec(dirs, codec)?;
        debug!(
            dataset = name,
            codec = codec.name(),
            runtime = ?entry.runtime,
            avg_error = ?entry.avg_error,
            "codec measured"
        );
        if entry.max_error.map_or(false, |e| e > SUSPICIOUS_ERROR) {
            warn!(
                dataset = name,
                codec = codec.name(),
                max_error = ?entry.max_error,
                "unusually large reconstruction error"
            );
        }
        entries.push(entry);
    }

    Ok(Dataset {
        name: name.to_string(),
        entries,
    })
}

/// Size of deflating `bytes` in one stream.
pub fn deflated_len(bytes: &[u8]) -> io::Result<usize> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(DEFLATE_LEVEL));
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?.len())
}

/// The directions as three little-endian `f32`s each.
fn baseline(dirs: &[DVec3]) -> BenchResult<Entry> {
    let mut raw = Vec::with_capacity(dirs.len() * BASELINE_SIZE);
    for v in dirs {
        for &c in &[v.x, v.y, v.z] {
            raw.extend_from_slice(&(c as f32).to_le_bytes());
        }
    }

    Ok(Entry {
        method: "baseline".to_string(),
        uncompressed_bytes: raw.len(),
        compressed_bytes: deflated_len(&raw)?,
        runtime: None,
        avg_error: None,
        max_error: None,
    })
}

fn run_codec(dirs: &[DVec3], codec: Codec) -> BenchResult<Entry> {
    let size = codec.size();
    let mut buf = Vec::with_capacity(size);

    // Timed pass.
    let mut timer = Timer::new();
    let mut sink = DVec3::ZERO;
    for &v in dirs {
        buf.clear();
        codec.pack_into(v, &mut buf);
        sink += codec.unpack(&buf)?;
    }
    let runtime = timer.tick();
    debug!(sink = ?sink, "timing pass done");

    // Error pass, over one packed buffer for the whole dataset.
    let mut packed = Vec::with_capacity(dirs.len() * size);
    for &v in dirs {
        codec.pack_into(v, &mut packed);
    }
    let mut total_error = 0.0;
    let mut max_error: f64 = 0.0;
    for (&v, bytes) in dirs.iter().zip(packed.chunks_exact(size)) {
        let diff = (codec.unpack(bytes)? - v).abs();
        total_error += diff.x + diff.y + diff.z;
        max_error = max_error.max(diff.max_element());
    }

    let avg_error = if dirs.is_empty() {
        0.0
    } else {
        total_error / (dirs.len() * 3) as f64
    };

    Ok(Entry {
        method: codec.name().to_string(),
        uncompressed_bytes: packed.len(),
        compressed_bytes: deflated_len(&packed)?,
        runtime: Some(runtime),
        avg_error: Some(avg_error),
        max_error: Some(max_error),
    })
}
