//! Layered fuel-cell cross-sections.
//!
//! A stack is a left-to-right sequence of rectangular layers (boxes in 3D)
//! of equal height. Each present layer becomes a structured sub-mesh tagged
//! with its material; the sub-meshes are merged in order and the faces
//! between them carry interface ids.
//!
//! Zero-thickness layers are elided. An interface always carries the
//! left-face id of the layer to its right, so the face that replaces an
//! omitted layer takes the id of the next interface downstream (omitting
//! the anode MPL joins the anode CL and GDL with the MPL/GDL id).
//!
//! The outer left face is split into plate (`y < rib_width`) and channel.
//! The outer right face is split the same way for a full cell; a cathode
//! stack ends on the last present layer's own right-face id. Top, bottom,
//! and (in 3D) front and back faces are symmetric.

use glam::DVec3;
use pemgrid_mesh::generators::subdivided_hyper_rectangle;
use pemgrid_mesh::{merge_triangulations, Triangulation};
use pemgrid_types::constants::*;
use pemgrid_types::{BoundaryId, MaterialId, PemgridError, PemgridResult};

use crate::config::{LayerConfig, LayerParams};

/// Which layers a stack is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    /// Cathode GDL, MPL, CL, and membrane.
    Cathode,
    /// Cathode, membrane, and anode.
    FullCell,
}

/// Boundary id assignment for an outer (left or right) stack face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OuterFace {
    Fixed(BoundaryId),
    /// Plate below `rib_width`, channel above.
    Split {
        plate: BoundaryId,
        channel: BoundaryId,
    },
}

impl OuterFace {
    fn id_at(self, y: f64, rib_width: f64) -> BoundaryId {
        match self {
            Self::Fixed(id) => id,
            Self::Split { plate, channel } => {
                if y < rib_width {
                    plate
                } else {
                    channel
                }
            }
        }
    }
}

/// One layer of a stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: &'static str,
    pub material: MaterialId,
    pub params: LayerParams,
    /// Position in the full (unelided) stack.
    pub slot: usize,
    left_id: BoundaryId,
    right_id: BoundaryId,
}

/// Position of the membrane in every stack.
const MEMBRANE_SLOT: usize = 3;

fn layer_table(cfg: &LayerConfig) -> [Layer; 7] {
    let layer = |name, material, params, slot, left_id, right_id| Layer {
        name,
        material,
        params,
        slot,
        left_id,
        right_id,
    };
    [
        layer("cathode GDL", MAT_CATHODE_GDL, cfg.cathode_gdl, 0, BID_CATHODE_PLATE, BID_CATHODE_GDL_MPL),
        layer("cathode MPL", MAT_CATHODE_MPL, cfg.cathode_mpl, 1, BID_CATHODE_GDL_MPL, BID_CATHODE_MPL_CL),
        layer("cathode CL", MAT_CATHODE_CL, cfg.cathode_cl, 2, BID_CATHODE_MPL_CL, BID_CATHODE_CL_MEMBRANE),
        layer("membrane", MAT_MEMBRANE, cfg.membrane, 3, BID_CATHODE_CL_MEMBRANE, BID_ANODE_CL_MEMBRANE),
        layer("anode CL", MAT_ANODE_CL, cfg.anode_cl, 4, BID_ANODE_CL_MEMBRANE, BID_ANODE_CL_MPL),
        layer("anode MPL", MAT_ANODE_MPL, cfg.anode_mpl, 5, BID_ANODE_CL_MPL, BID_ANODE_MPL_GDL),
        layer("anode GDL", MAT_ANODE_GDL, cfg.anode_gdl, 6, BID_ANODE_MPL_GDL, BID_ANODE_PLATE),
    ]
}

/// The present layers of a stack and the parameters shared by all of them.
#[derive(Debug, Clone)]
pub struct LayerStack {
    pub kind: StackKind,
    layers: Vec<Layer>,
    cells_tall: usize,
    rib_width: f64,
    height: f64,
    depth: f64,
    cells_deep: usize,
}

impl LayerStack {
    /// Selects the layers of `kind` from `cfg`, dropping zero-thickness ones.
    ///
    /// # Errors
    /// `InvalidLayerParameters` for invalid values or when every layer is omitted.
    pub fn new(kind: StackKind, cfg: &LayerConfig) -> PemgridResult<Self> {
        cfg.validate()?;
        let count = match kind {
            StackKind::Cathode => MEMBRANE_SLOT + 1,
            StackKind::FullCell => 7,
        };
        let layers: Vec<Layer> = layer_table(cfg)
            .into_iter()
            .take(count)
            .filter(|l| !l.params.is_omitted())
            .collect();
        if layers.is_empty() {
            return Err(PemgridError::InvalidLayerParameters(
                "every layer of the stack has zero thickness".into(),
            ));
        }
        Ok(Self {
            kind,
            layers,
            cells_tall: cfg.cells_tall,
            rib_width: cfg.rib_width,
            height: cfg.height(),
            depth: cfg.depth,
            cells_deep: cfg.cells_deep,
        })
    }

    /// Present layers, left to right.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Cells across the stack (x).
    pub fn cells_across(&self) -> usize {
        self.layers.iter().map(|l| l.params.cells).sum()
    }

    /// Total stack width (x).
    pub fn width(&self) -> f64 {
        self.layers.iter().map(|l| l.params.thickness).sum()
    }

    /// Materials present in the stack, left to right.
    pub fn materials(&self) -> Vec<MaterialId> {
        self.layers.iter().map(|l| l.material).collect()
    }

    /// Id of the face on the left of a present layer that has a present
    /// neighbour to its left.
    pub fn interface_id(right: &Layer) -> BoundaryId {
        right.left_id
    }

    /// Ids of the faces between consecutive present layers, left to right.
    pub fn interface_ids(&self) -> Vec<BoundaryId> {
        self.layers.iter().skip(1).map(Self::interface_id).collect()
    }

    pub fn outer_left(&self) -> OuterFace {
        OuterFace::Split {
            plate: BID_CATHODE_PLATE,
            channel: BID_CATHODE_CHANNEL,
        }
    }

    pub fn outer_right(&self) -> OuterFace {
        match self.kind {
            StackKind::FullCell => OuterFace::Split {
                plate: BID_ANODE_PLATE,
                channel: BID_ANODE_CHANNEL,
            },
            StackKind::Cathode => {
                // `new` guarantees at least one layer
                let last = &self.layers[self.layers.len() - 1];
                OuterFace::Fixed(last.right_id)
            }
        }
    }

    /// Builds the tagged stack mesh.
    pub fn build(&self, dim: usize) -> PemgridResult<Triangulation> {
        let interfaces = self.interface_ids();
        let last = self.layers.len() - 1;
        let rib_width = self.rib_width;

        let mut stack = Triangulation::new(dim);
        let mut x0 = 0.0;
        for (i, layer) in self.layers.iter().enumerate() {
            let x1 = x0 + layer.params.thickness;
            let mut block = subdivided_hyper_rectangle(
                dim,
                &[layer.params.cells, self.cells_tall, self.cells_deep],
                DVec3::new(x0, 0.0, 0.0),
                DVec3::new(x1, self.height, self.depth),
            )?;
            block.set_all_material_ids(layer.material);

            let left = if i == 0 {
                self.outer_left()
            } else {
                OuterFace::Fixed(interfaces[i - 1])
            };
            let right = if i == last {
                self.outer_right()
            } else {
                OuterFace::Fixed(interfaces[i])
            };
            block.tag_boundary_faces(|center, face| {
                Some(match face {
                    0 => left.id_at(center.y, rib_width),
                    1 => right.id_at(center.y, rib_width),
                    _ => BID_SYMMETRY,
                })
            });

            stack = merge_triangulations(&stack, &block)?;
            tracing::trace!(layer = layer.name, x0, x1, "added layer");
            x0 = x1;
        }

        Ok(stack)
    }
}
