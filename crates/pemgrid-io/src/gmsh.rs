//! Gmsh 2.2 ASCII reader.
//!
//! Quadrilaterals (type 3) and hexahedra (type 5) become cells; the first
//! element tag (the physical group) is the material id. Boundary elements
//! (lines in 2D, quadrilaterals in 3D) carry boundary ids in their first
//! tag and are matched to cell faces by their vertex set. A boundary
//! element that coincides with a face between two cells tags both sides.
//!
//! A mesh containing any hexahedron is read as 3D, otherwise as 2D in the
//! xy-plane.
//!
//! ```ignore
//! use pemgrid_io::gmsh::GmshLoader;
//!
//! let tria = GmshLoader::load("stack.msh")?;
//! println!("Loaded {} vertices and {} cells", tria.n_vertices(), tria.n_cells());
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glam::DVec3;
use pemgrid_mesh::triangulation::face_local_vertices;
use pemgrid_mesh::Triangulation;
use pemgrid_types::{BoundaryId, MaterialId, PemgridError, PemgridResult, VertexId};

const ELEM_LINE: u32 = 1;
const ELEM_QUAD: u32 = 3;
const ELEM_HEX: u32 = 5;
const ELEM_POINT: u32 = 15;

/// Upper bound on buffer space reserved from a section's declared count.
const MAX_PREALLOC: usize = 1 << 16;

/// Gmsh corner order (counter-clockwise per layer) to lexicographic order.
const QUAD_TO_LEX: [usize; 4] = [0, 1, 3, 2];
const HEX_TO_LEX: [usize; 8] = [0, 1, 3, 2, 4, 5, 7, 6];

/// One parsed `$Elements` entry with node tags resolved to vertex indices.
#[derive(Debug, Clone)]
struct RawElement {
    kind: u32,
    tag: Option<u64>,
    nodes: Vec<usize>,
}

/// Gmsh file loader.
pub struct GmshLoader;

impl GmshLoader {
    /// Loads a Gmsh file from disk.
    ///
    /// # Errors
    /// `ImportFailure` for a missing file or any malformed content.
    pub fn load<P: AsRef<Path>>(path: P) -> PemgridResult<Triangulation> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| PemgridError::import(path, format!("cannot open file: {}", e)))?;
        Self::load_from_reader(BufReader::new(file)).map_err(|e| match e {
            PemgridError::ImportFailure { .. } => e,
            other => PemgridError::import(path, other.to_string()),
        })
    }

    /// Parses Gmsh content from a reader.
    pub fn load_from_reader<R: BufRead>(reader: R) -> PemgridResult<Triangulation> {
        let mut lines = reader.lines();
        let mut nodes: Vec<DVec3> = Vec::new();
        let mut node_map: HashMap<u64, usize> = HashMap::new();
        let mut elements: Vec<RawElement> = Vec::new();
        let mut saw_format = false;

        while let Some(line) = lines.next() {
            match line?.trim() {
                "$MeshFormat" => {
                    let header = next_line(&mut lines, "$MeshFormat")?;
                    Self::check_format(&header)?;
                    saw_format = true;
                    Self::skip_to(&mut lines, "$EndMeshFormat")?;
                }
                "$Nodes" => {
                    let (xyz, map) = Self::parse_nodes(&mut lines)?;
                    nodes = xyz;
                    node_map = map;
                }
                "$Elements" => {
                    elements = Self::parse_elements(&mut lines, &node_map)?;
                }
                _ => {}
            }
        }

        if !saw_format {
            return Err(invalid("missing $MeshFormat section"));
        }
        if nodes.is_empty() {
            return Err(invalid("no nodes in Gmsh file"));
        }

        let tria = Self::assemble(nodes, &elements)?;
        tracing::debug!(
            dim = tria.dim,
            vertices = tria.n_vertices(),
            cells = tria.n_cells(),
            elements = elements.len(),
            "parsed gmsh mesh"
        );
        Ok(tria)
    }

    /// Accepts only version 2.x ASCII files.
    fn check_format(header: &str) -> PemgridResult<()> {
        let parts: Vec<&str> = header.split_whitespace().collect();
        let version = parts
            .first()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| invalid(format!("bad $MeshFormat header '{}'", header.trim())))?;
        if !(2.0..3.0).contains(&version) {
            return Err(invalid(format!(
                "unsupported Gmsh format version {} (expected 2.2)",
                version
            )));
        }
        if parts.get(1).copied() != Some("0") {
            return Err(invalid("binary Gmsh files are not supported"));
        }
        Ok(())
    }

    fn skip_to<I: Iterator<Item = std::io::Result<String>>>(
        lines: &mut I,
        end: &str,
    ) -> PemgridResult<()> {
        for line in lines.by_ref() {
            if line?.trim() == end {
                return Ok(());
            }
        }
        Err(invalid(format!("missing {}", end)))
    }

    fn parse_nodes<I: Iterator<Item = std::io::Result<String>>>(
        lines: &mut I,
    ) -> PemgridResult<(Vec<DVec3>, HashMap<u64, usize>)> {
        let count = parse_count(&next_line(lines, "$Nodes")?, "$Nodes")?;
        // the declared count is untrusted until the entries are read
        let mut xyz = Vec::with_capacity(count.min(MAX_PREALLOC));
        let mut map = HashMap::with_capacity(count.min(MAX_PREALLOC));

        for line in lines.by_ref() {
            let line = line?;
            let t = line.trim();
            if t == "$EndNodes" {
                if xyz.len() != count {
                    return Err(invalid(format!(
                        "$Nodes declares {} nodes but lists {}",
                        count,
                        xyz.len()
                    )));
                }
                return Ok((xyz, map));
            }
            if t.is_empty() {
                continue;
            }
            let parts: Vec<&str> = t.split_whitespace().collect();
            let parsed = match parts.as_slice() {
                [tag, x, y, z, ..] => match (
                    tag.parse::<u64>(),
                    x.parse::<f64>(),
                    y.parse::<f64>(),
                    z.parse::<f64>(),
                ) {
                    (Ok(tag), Ok(x), Ok(y), Ok(z)) => Some((tag, DVec3::new(x, y, z))),
                    _ => None,
                },
                _ => None,
            };
            let (tag, p) = parsed.ok_or_else(|| invalid(format!("malformed node line '{}'", t)))?;
            if map.insert(tag, xyz.len()).is_some() {
                return Err(invalid(format!("duplicate node tag {}", tag)));
            }
            xyz.push(p);
        }
        Err(invalid("missing $EndNodes"))
    }

    fn parse_elements<I: Iterator<Item = std::io::Result<String>>>(
        lines: &mut I,
        node_map: &HashMap<u64, usize>,
    ) -> PemgridResult<Vec<RawElement>> {
        let count = parse_count(&next_line(lines, "$Elements")?, "$Elements")?;
        let mut elements = Vec::with_capacity(count.min(MAX_PREALLOC));

        for line in lines.by_ref() {
            let line = line?;
            let t = line.trim();
            if t == "$EndElements" {
                if elements.len() != count {
                    return Err(invalid(format!(
                        "$Elements declares {} elements but lists {}",
                        count,
                        elements.len()
                    )));
                }
                return Ok(elements);
            }
            if t.is_empty() {
                continue;
            }

            let fields: Vec<u64> = t
                .split_whitespace()
                .map(|s| s.parse::<u64>())
                .collect::<Result<_, _>>()
                .map_err(|_| invalid(format!("malformed element line '{}'", t)))?;
            if fields.len() < 3 {
                return Err(invalid(format!("malformed element line '{}'", t)));
            }

            let kind = u32::try_from(fields[1])
                .map_err(|_| invalid(format!("unsupported element type {}", fields[1])))?;
            let n_nodes = match kind {
                ELEM_LINE => 2,
                ELEM_QUAD => 4,
                ELEM_HEX => 8,
                ELEM_POINT => 1,
                other => {
                    return Err(invalid(format!(
                        "unsupported element type {} (only lines, quadrilaterals and hexahedra)",
                        other
                    )))
                }
            };
            let start = usize::try_from(fields[2])
                .ok()
                .and_then(|n_tags| n_tags.checked_add(3))
                .ok_or_else(|| invalid(format!("element {} declares {} tags", fields[0], fields[2])))?;
            if fields.len().checked_sub(start) != Some(n_nodes) {
                return Err(invalid(format!(
                    "element {} of type {} has {} fields, expected {} tags and {} nodes",
                    fields[0],
                    kind,
                    fields.len(),
                    fields[2],
                    n_nodes
                )));
            }

            let nodes = fields[start..]
                .iter()
                .map(|tag| {
                    node_map
                        .get(tag)
                        .copied()
                        .ok_or_else(|| invalid(format!("element {} references unknown node {}", fields[0], tag)))
                })
                .collect::<PemgridResult<Vec<usize>>>()?;

            elements.push(RawElement {
                kind,
                tag: (start > 3).then(|| fields[3]),
                nodes,
            });
        }
        Err(invalid("missing $EndElements"))
    }

    /// Builds the triangulation from parsed nodes and elements.
    fn assemble(nodes: Vec<DVec3>, elements: &[RawElement]) -> PemgridResult<Triangulation> {
        let dim = if elements.iter().any(|e| e.kind == ELEM_HEX) { 3 } else { 2 };
        let (cell_kind, face_kind, order): (u32, u32, &[usize]) = if dim == 3 {
            (ELEM_HEX, ELEM_QUAD, &HEX_TO_LEX[..])
        } else {
            (ELEM_QUAD, ELEM_LINE, &QUAD_TO_LEX[..])
        };

        let mut tria = Triangulation::new(dim);
        for p in nodes {
            let p = if dim == 2 { DVec3::new(p.x, p.y, 0.0) } else { p };
            tria.add_vertex(p);
        }

        let mut face_tags: HashMap<Vec<u32>, BoundaryId> = HashMap::new();
        for e in elements {
            if e.kind == cell_kind {
                let material = match e.tag {
                    Some(tag) => MaterialId(narrow(tag, "material")?),
                    None => MaterialId(0),
                };
                let vertices = order.iter().map(|&i| VertexId(e.nodes[i] as u32)).collect();
                tria.add_cell(vertices, material);
            } else if e.kind == face_kind {
                if let Some(tag) = e.tag {
                    let mut key: Vec<u32> = e.nodes.iter().map(|&n| n as u32).collect();
                    key.sort_unstable();
                    face_tags.insert(key, BoundaryId(narrow(tag, "boundary")?));
                }
            }
        }

        if tria.n_cells() == 0 {
            return Err(invalid("no quadrilateral or hexahedral cells in Gmsh file"));
        }

        let nf = tria.faces_per_cell();
        let local: Vec<Vec<usize>> = (0..nf).map(|f| face_local_vertices(dim, f)).collect();
        for cell in &mut tria.cells {
            for (f, lv) in local.iter().enumerate() {
                let mut key: Vec<u32> = lv.iter().map(|&i| cell.vertices[i].0).collect();
                key.sort_unstable();
                if let Some(&id) = face_tags.get(&key) {
                    cell.face_ids[f] = Some(id);
                }
            }
        }

        Ok(tria)
    }
}

fn invalid(message: impl Into<String>) -> PemgridError {
    PemgridError::InvalidMesh(message.into())
}

fn next_line<I: Iterator<Item = std::io::Result<String>>>(
    lines: &mut I,
    section: &str,
) -> PemgridResult<String> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(invalid(format!("unexpected end of file in {}", section))),
    }
}

fn parse_count(line: &str, section: &str) -> PemgridResult<usize> {
    line.trim()
        .parse::<usize>()
        .map_err(|_| invalid(format!("bad entry count '{}' in {}", line.trim(), section)))
}

fn narrow(tag: u64, what: &str) -> PemgridResult<u16> {
    u16::try_from(tag).map_err(|_| invalid(format!("{} id {} exceeds {}", what, tag, u16::MAX)))
}
