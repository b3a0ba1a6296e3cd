//! Structured mesh generators.
//!
//! These generators produce deterministic, untagged meshes: every cell gets
//! material 0 and every face is left without a boundary tag. Geometry
//! generators stamp their own numbering on top.

use std::f64::consts::PI;

use glam::DVec3;
use pemgrid_types::{MaterialId, PemgridError, PemgridResult, VertexId};

use crate::triangulation::Triangulation;

/// Generates an axis-aligned box `[p1, p2]` subdivided into
/// `repetitions[d]` cells along axis `d`.
///
/// Only the first `dim` entries of `repetitions` and the first `dim`
/// coordinates of `p1`/`p2` are used.
///
/// # Example
/// ```
/// use glam::DVec3;
/// use pemgrid_mesh::generators::subdivided_hyper_rectangle;
/// let tria = subdivided_hyper_rectangle(2, &[2, 3], DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0)).unwrap();
/// assert_eq!(tria.n_vertices(), 12); // 3×4 vertices
/// assert_eq!(tria.n_cells(), 6);
/// ```
pub fn subdivided_hyper_rectangle(
    dim: usize,
    repetitions: &[usize],
    p1: DVec3,
    p2: DVec3,
) -> PemgridResult<Triangulation> {
    if dim != 2 && dim != 3 {
        return Err(PemgridError::InvalidMesh(format!(
            "Unsupported dimension {}",
            dim
        )));
    }
    if repetitions.len() < dim {
        return Err(PemgridError::InvalidMesh(format!(
            "Expected {} repetition counts, got {}",
            dim,
            repetitions.len()
        )));
    }
    for d in 0..dim {
        if repetitions[d] == 0 {
            return Err(PemgridError::InvalidMesh(format!(
                "Repetition count along axis {} must be >= 1",
                d
            )));
        }
        if p2[d] <= p1[d] {
            return Err(PemgridError::InvalidMesh(format!(
                "Box extent along axis {} is not positive ({} .. {})",
                d, p1[d], p2[d]
            )));
        }
    }

    let nx = repetitions[0];
    let ny = repetitions[1];
    let nz = if dim == 3 { repetitions[2] } else { 1 };
    let (vz_count, cz_count) = if dim == 3 { (nz + 1, nz) } else { (1, 1) };

    let mut tria = Triangulation::new(dim);
    let h = (p2 - p1) / DVec3::new(nx as f64, ny as f64, nz as f64);

    // Vertices in lexicographic order (x fastest)
    for k in 0..vz_count {
        for j in 0..=ny {
            for i in 0..=nx {
                let z = if dim == 3 { p1.z + k as f64 * h.z } else { 0.0 };
                // Pin the far side exactly to p2 so neighbouring blocks weld cleanly.
                let x = if i == nx { p2.x } else { p1.x + i as f64 * h.x };
                let y = if j == ny { p2.y } else { p1.y + j as f64 * h.y };
                let z = if dim == 3 && k == nz { p2.z } else { z };
                tria.add_vertex(DVec3::new(x, y, z));
            }
        }
    }

    let vid = |i: usize, j: usize, k: usize| -> VertexId {
        VertexId((k * (ny + 1) * (nx + 1) + j * (nx + 1) + i) as u32)
    };

    for k in 0..cz_count {
        for j in 0..ny {
            for i in 0..nx {
                let mut verts = vec![
                    vid(i, j, k),
                    vid(i + 1, j, k),
                    vid(i, j + 1, k),
                    vid(i + 1, j + 1, k),
                ];
                if dim == 3 {
                    verts.extend([
                        vid(i, j, k + 1),
                        vid(i + 1, j, k + 1),
                        vid(i, j + 1, k + 1),
                        vid(i + 1, j + 1, k + 1),
                    ]);
                }
                tria.add_cell(verts, MaterialId(0));
            }
        }
    }

    Ok(tria)
}

/// Generates the single-cell box `[lo, hi]^dim`.
pub fn hyper_cube(dim: usize, lo: f64, hi: f64) -> PemgridResult<Triangulation> {
    subdivided_hyper_rectangle(dim, &[1, 1, 1], DVec3::splat(lo), DVec3::splat(hi))
}

/// Parameters of a 2D disk built as an "O-grid": a structured central
/// square surrounded by radial rings.
///
/// Rings up to `inner_radius` blend the square's perimeter into a circle;
/// rings beyond it are purely polar up to `outer_radius`. All ring vertices
/// lie on `4 * square_cells` equally spaced rays, so the circle at
/// `inner_radius` is discretized as a regular polygon with that many sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskSpec {
    pub center: DVec3,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Cells along one side of the central square.
    pub square_cells: usize,
    /// Radial cell layers between the square and `inner_radius`.
    pub inner_rings: usize,
    /// Radial cell layers between `inner_radius` and `outer_radius`.
    pub outer_rings: usize,
}

impl DiskSpec {
    /// Number of rays (and polygon sides) around the disk.
    pub fn angular_segments(&self) -> usize {
        4 * self.square_cells
    }

    /// Angle of the first ray: the lower-left corner of the central square.
    pub fn start_angle(&self) -> f64 {
        -0.75 * PI
    }

    /// Half-width of the central square.
    pub fn square_half_width(&self) -> f64 {
        0.4 * self.inner_radius
    }
}

/// Generates the O-grid disk described by `spec`.
pub fn disk_o_grid(spec: &DiskSpec) -> PemgridResult<Triangulation> {
    if spec.square_cells == 0 || spec.inner_rings == 0 || spec.outer_rings == 0 {
        return Err(PemgridError::InvalidMesh(
            "Disk cell counts must be >= 1".into(),
        ));
    }
    if !(spec.inner_radius > 0.0 && spec.outer_radius > spec.inner_radius) {
        return Err(PemgridError::InvalidMesh(format!(
            "Disk radii must satisfy 0 < inner ({}) < outer ({})",
            spec.inner_radius, spec.outer_radius
        )));
    }

    let m = spec.square_cells;
    let n = spec.angular_segments();
    let a = spec.square_half_width();
    let c = spec.center;

    // Central square, lexicographic
    let mut tria = subdivided_hyper_rectangle(
        2,
        &[m, m],
        c - DVec3::new(a, a, 0.0),
        c + DVec3::new(a, a, 0.0),
    )?;
    let sq = |i: usize, j: usize| VertexId((j * (m + 1) + i) as u32);

    // Square perimeter, counter-clockwise from the lower-left corner
    let mut perimeter = Vec::with_capacity(n);
    for i in 0..m {
        perimeter.push(sq(i, 0));
    }
    for j in 0..m {
        perimeter.push(sq(m, j));
    }
    for i in (1..=m).rev() {
        perimeter.push(sq(i, m));
    }
    for j in (1..=m).rev() {
        perimeter.push(sq(0, j));
    }

    let ray = |j: usize| -> DVec3 {
        let theta = spec.start_angle() + 2.0 * PI * j as f64 / n as f64;
        DVec3::new(theta.cos(), theta.sin(), 0.0)
    };

    let mut rings: Vec<Vec<VertexId>> = vec![perimeter];
    for level in 1..=spec.inner_rings {
        let t = level as f64 / spec.inner_rings as f64;
        let ring = (0..n)
            .map(|j| {
                let p = tria.vertex(rings[0][j]);
                let q = c + ray(j) * spec.inner_radius;
                tria.add_vertex(p + (q - p) * t)
            })
            .collect();
        rings.push(ring);
    }
    let film = spec.outer_radius - spec.inner_radius;
    for level in 1..=spec.outer_rings {
        let r = spec.inner_radius + film * level as f64 / spec.outer_rings as f64;
        let ring = (0..n).map(|j| tria.add_vertex(c + ray(j) * r)).collect();
        rings.push(ring);
    }

    // Ring cells: local x runs outward, local y runs counter-clockwise.
    for l in 0..rings.len() - 1 {
        for j in 0..n {
            let jn = (j + 1) % n;
            tria.add_cell(
                vec![rings[l][j], rings[l + 1][j], rings[l][jn], rings[l + 1][jn]],
                MaterialId(0),
            );
        }
    }

    Ok(tria)
}
