//! Uniform (global) refinement.
//!
//! Every cell is split into `2^dim` children by bisecting it along each
//! axis. Children inherit the parent's material tag, and each child face
//! that lies on a parent face inherits that face's boundary tag. New
//! vertices (edge midpoints, face centers, cell centers) are shared between
//! neighbouring cells through a cache keyed by the parent vertices they
//! average, so the refined mesh stays conforming.

use std::collections::HashMap;

use glam::DVec3;
use pemgrid_types::VertexId;

use crate::triangulation::{Cell, Triangulation};

/// Cache of vertices created during one refinement pass.
struct SubdivisionCache {
    created: HashMap<Vec<u32>, VertexId>,
}

impl SubdivisionCache {
    fn new() -> Self {
        Self {
            created: HashMap::new(),
        }
    }

    /// Returns the vertex at the mean of `parents`, creating it on first use.
    fn vertex(&mut self, tria: &mut Triangulation, parents: &[VertexId]) -> VertexId {
        if let [single] = parents {
            return *single;
        }
        let mut key: Vec<u32> = parents.iter().map(|v| v.0).collect();
        key.sort_unstable();
        if let Some(&v) = self.created.get(&key) {
            return v;
        }
        let sum: DVec3 = parents.iter().map(|&v| tria.vertex(v)).sum();
        let v = tria.add_vertex(sum / parents.len() as f64);
        self.created.insert(key, v);
        v
    }
}

/// Refines every cell of `tria` once.
pub fn refine_once(tria: &mut Triangulation) {
    let dim = tria.dim;
    let nv = 1usize << dim;
    let parents = std::mem::take(&mut tria.cells);
    let mut cache = SubdivisionCache::new();
    let mut children = Vec::with_capacity(parents.len() * nv);

    for parent in &parents {
        for child in 0..nv {
            let mut vertices = Vec::with_capacity(nv);
            for local in 0..nv {
                // Position of this child vertex in the parent's 3^dim lattice:
                // 0 = low side, 1 = midpoint, 2 = high side, per axis.
                let lattice: Vec<usize> = (0..dim)
                    .map(|d| ((child >> d) & 1) + ((local >> d) & 1))
                    .collect();
                let averaged: Vec<VertexId> = (0..nv)
                    .filter(|&pv| {
                        lattice.iter().enumerate().all(|(d, &q)| match q {
                            0 => (pv >> d) & 1 == 0,
                            2 => (pv >> d) & 1 == 1,
                            _ => true,
                        })
                    })
                    .map(|pv| parent.vertices[pv])
                    .collect();
                vertices.push(cache.vertex(tria, &averaged));
            }

            let face_ids = (0..2 * dim)
                .map(|face| {
                    let (axis, side) = (face / 2, face % 2);
                    if (child >> axis) & 1 == side {
                        parent.face_ids[face]
                    } else {
                        None
                    }
                })
                .collect();

            children.push(Cell {
                vertices,
                material_id: parent.material_id,
                face_ids,
            });
        }
    }

    tria.cells = children;
}

/// Refines every cell of `tria` `times` times.
pub fn refine_global(tria: &mut Triangulation, times: u32) {
    for level in 0..times {
        refine_once(tria);
        tracing::debug!(
            level = level + 1,
            cells = tria.n_cells(),
            vertices = tria.n_vertices(),
            "global refinement"
        );
    }
}
