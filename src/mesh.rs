use std::io::{self, Write};

use glam::DVec3;

/// A bare triangle mesh: positions and index triples, nothing else.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<DVec3>,
    pub triangles: Vec<[usize; 3]>,
}

impl Mesh {
    /// Unnormalized face normal.  Its length is twice the triangle's area.
    fn face_normal(&self, tri: [usize; 3]) -> DVec3 {
        let p1 = self.vertices[tri[0]];
        let p2 = self.vertices[tri[1]];
        let p3 = self.vertices[tri[2]];
        (p2 - p1).cross(p3 - p1)
    }

    /// Per-vertex normals taken from a single adjacent face.
    ///
    /// Each vertex gets the normal of the last non-degenerate face that
    /// references it, which gives hard edges everywhere.  Vertices with no
    /// such face point along `(1, 1, 1)`.
    pub fn flat_normals(&self) -> Vec<DVec3> {
        let mut normals = vec![DVec3::ONE.normalize(); self.vertices.len()];
        for &tri in &self.triangles {
            let n = self.face_normal(tri).normalize_or_zero();
            if n == DVec3::ZERO {
                continue;
            }
            for &i in &tri {
                normals[i] = n;
            }
        }
        normals
    }

    /// Per-vertex normals averaged over all adjacent faces, weighted by
    /// face area.
    ///
    /// Vertices with no non-degenerate adjacent face point along
    /// `(1, 1, 1)`.
    pub fn smooth_normals(&self) -> Vec<DVec3> {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];
        for &tri in &self.triangles {
            let n = self.face_normal(tri);
            if !n.is_finite() {
                continue;
            }
            for &i in &tri {
                normals[i] += n;
            }
        }

        for n in normals.iter_mut() {
            *n = n.try_normalize().unwrap_or_else(|| DVec3::ONE.normalize());
        }
        normals
    }

    /// Writes the mesh with the given per-vertex normals as an OBJ file.
    pub fn write_obj(&self, normals: &[DVec3], out: &mut impl Write) -> io::Result<()> {
        for v in &self.vertices {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for n in normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        for tri in &self.triangles {
            let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
            writeln!(out, "f {}//{} {}//{} {}//{}", a, a, b, b, c, c)?;
        }
        Ok(())
    }
}
