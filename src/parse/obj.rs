//! Loading triangle meshes from Wavefront OBJ files.
//!
//! Only vertex positions (`v`) and faces (`f`) are read.  Everything else
//! (normals, texture coordinates, groups, materials) is skipped.  Faces
//! with more than three vertices are fan-triangulated.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use glam::DVec3;
use nom::{combinator::all_consuming, multi::many1, sequence::tuple};
use thiserror::Error;

use crate::mesh::Mesh;

use super::parse_utils::{ws_f64, ws_face_index};

pub type ObjResult<T> = Result<T, ObjError>;

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("line {0}: malformed vertex '{1}'")]
    BadVertex(usize, String),

    #[error("line {0}: malformed face '{1}'")]
    BadFace(usize, String),

    #[error("line {0}: vertex index {1} is out of range")]
    IndexOutOfRange(usize, i64),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn load_obj(path: &Path) -> ObjResult<Mesh> {
    parse_obj(BufReader::new(File::open(path)?))
}

pub fn parse_obj(reader: impl BufRead) -> ObjResult<Mesh> {
    let mut mesh = Mesh::default();
    let mut face = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = i + 1;
        let line = line.trim();

        let (keyword, rest) = match line.find(char::is_whitespace) {
            Some(split) => line.split_at(split),
            None => (line, ""),
        };

        match keyword {
            "v" => {
                // Trailing components (w, or vertex colors) are ignored.
                let (_, (x, y, z)) = tuple((ws_f64, ws_f64, ws_f64))(rest)
                    .map_err(|_| ObjError::BadVertex(line_number, rest.trim().to_string()))?;
                mesh.vertices.push(DVec3::new(x, y, z));
            }

            "f" => {
                let (_, indices) = all_consuming(many1(ws_face_index))(rest)
                    .map_err(|_| ObjError::BadFace(line_number, rest.trim().to_string()))?;
                if indices.len() < 3 {
                    return Err(ObjError::BadFace(line_number, rest.trim().to_string()));
                }

                face.clear();
                for index in indices {
                    face.push(resolve_index(index, mesh.vertices.len()).ok_or(
                        ObjError::IndexOutOfRange(line_number, index),
                    )?);
                }
                for j in 1..(face.len() - 1) {
                    mesh.triangles.push([face[0], face[j], face[j + 1]]);
                }
            }

            _ => {}
        }
    }

    Ok(mesh)
}

/// Converts a 1-based (or negative, relative to the end) OBJ index into a
/// 0-based index into a list of `count` vertices.
fn resolve_index(index: i64, count: usize) -> Option<usize> {
    let resolved = if index > 0 {
        index - 1
    } else if index < 0 {
        count as i64 + index
    } else {
        return None;
    };

    if resolved >= 0 && (resolved as usize) < count {
        Some(resolved as usize)
    } else {
        None
    }
}
