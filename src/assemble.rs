use tracing::warn;

use crate::block::{block_dims, Block};
use crate::error::{MeshError, MeshResult};
use crate::mesh::{Element, ElementKind, Mesh, Node, PhysicalGroup};
use crate::nmf::BoundaryRecord;
use crate::node_index::global_node_id;

/// Id and name of the single volume physical group.
pub const VOLUME_GROUP_ID: usize = 1;
pub const VOLUME_GROUP_NAME: &str = "mesh";

/// One of the three logical index directions of a block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Axis {
    I,
    J,
    K,
}

impl Axis {
    #[inline]
    fn pos(self) -> usize {
        match self {
            Axis::I => 0,
            Axis::J => 1,
            Axis::K => 2,
        }
    }
}

/// How a face id maps onto block indices: which axis is held constant, at
/// which end, and which tangential axes the record's two ranges sweep.
struct FaceSpec {
    fixed: Axis,
    at_max: bool,
    tangential: (Axis, Axis), // (range1 axis, range2 axis)
}

/// The six logical faces, indexed by `face - 1`.
static FACE_TABLE: [FaceSpec; 6] = [
    FaceSpec { fixed: Axis::K, at_max: false, tangential: (Axis::I, Axis::J) },
    FaceSpec { fixed: Axis::K, at_max: true,  tangential: (Axis::I, Axis::J) },
    FaceSpec { fixed: Axis::I, at_max: false, tangential: (Axis::J, Axis::K) },
    FaceSpec { fixed: Axis::I, at_max: true,  tangential: (Axis::J, Axis::K) },
    FaceSpec { fixed: Axis::J, at_max: false, tangential: (Axis::I, Axis::K) },
    FaceSpec { fixed: Axis::J, at_max: true,  tangential: (Axis::I, Axis::K) },
];

/// Hexahedron corner offsets relative to `(0, j-1, k-1)`, in Gmsh order.
const HEX_CORNERS: [(usize, usize, usize); 8] = [
    (0, 0, 0),
    (0, 1, 0),
    (0, 1, 1),
    (0, 0, 1),
    (1, 0, 0),
    (1, 1, 0),
    (1, 1, 1),
    (1, 0, 1),
];

/// Builds one mesh from blocks plus boundary records. Owns the element-id
/// counter and the physical-group allocator, so independent conversions
/// never share state.
struct Assembler {
    element_id: usize,
    mesh: Mesh,
}

/// Convert `blocks` and their boundary `records` into an unstructured mesh.
///
/// Volume elements come first, block by block, then one tagged quad patch
/// per record in file order. The mesh is only returned once every block and
/// record has been processed; any error aborts the whole conversion.
pub fn assemble(blocks: &[Block], records: &[BoundaryRecord]) -> MeshResult<Mesh> {
    let dims = block_dims(blocks);
    let mut asm = Assembler {
        element_id: 0,
        mesh: Mesh::default(),
    };

    asm.mesh.groups.push(PhysicalGroup {
        dim: 3,
        id: VOLUME_GROUP_ID,
        name: VOLUME_GROUP_NAME.to_string(),
    });

    for (blkn, block) in blocks.iter().enumerate() {
        asm.consume_block(&dims, blkn, block)?;
    }
    for record in records {
        asm.gen_boundary(&dims, record)?;
    }
    Ok(asm.mesh)
}

impl Assembler {
    fn next_element_id(&mut self) -> usize {
        self.element_id += 1;
        self.element_id
    }

    fn next_group_id(&self) -> usize {
        self.mesh.groups.iter().map(|g| g.id).max().unwrap_or(0) + 1
    }

    /// Materialize a block's nodes and emit its hexahedral elements.
    ///
    /// Only the first two planes of the first logical axis are connected;
    /// the volume sweep runs over the (j, k) plane.
    fn consume_block(
        &mut self,
        dims: &[(usize, usize, usize)],
        blkn: usize,
        block: &Block,
    ) -> MeshResult<()> {
        if block.imax > 2 {
            warn!(
                block = blkn,
                imax = block.imax,
                "only first-axis planes 0 and 1 are connected; {} plane(s) get no volume elements",
                block.imax - 2
            );
        }

        // node ids are dense in this iteration order
        for i in 0..block.imax {
            for j in 0..block.jmax {
                for k in 0..block.kmax {
                    let id = global_node_id(dims, blkn, i, j, k)?;
                    let (x, y, z) = block.xyz(i, j, k);
                    self.mesh.nodes.push(Node { id, x, y, z });
                }
            }
        }

        for j in 1..block.jmax {
            for k in 1..block.kmax {
                let id = self.next_element_id();
                let mut nodes = Vec::with_capacity(8);
                for &(ci, cj, ck) in &HEX_CORNERS {
                    nodes.push(global_node_id(dims, blkn, ci, j - 1 + cj, k - 1 + ck)?);
                }
                self.mesh.elements.push(Element {
                    id,
                    kind: ElementKind::Hexahedron,
                    group: VOLUME_GROUP_ID,
                    nodes,
                });
            }
        }
        Ok(())
    }

    /// Emit one quadrilateral per cell of the record's index range, on the
    /// record's face, under a freshly allocated physical group.
    fn gen_boundary(
        &mut self,
        dims: &[(usize, usize, usize)],
        record: &BoundaryRecord,
    ) -> MeshResult<()> {
        let spec = match record.face {
            1..=6 => &FACE_TABLE[record.face - 1],
            _ => return Err(MeshError::InvalidFace { face: record.face }),
        };

        let blkn = record
            .block
            .checked_sub(1)
            .ok_or(MeshError::BlockOutOfRange {
                block: 0,
                nblocks: dims.len(),
            })?;
        let &(imax, jmax, kmax) = dims.get(blkn).ok_or(MeshError::BlockOutOfRange {
            block: blkn,
            nblocks: dims.len(),
        })?;

        let (s1, e1) = record.range1;
        let (s2, e2) = record.range2;
        if s1 == 0 || s2 == 0 {
            return Err(MeshError::InvalidRange {
                label: record.label.clone(),
                range1: record.range1,
                range2: record.range2,
            });
        }

        let gid = self.next_group_id();
        self.mesh.groups.push(PhysicalGroup {
            dim: 2,
            id: gid,
            name: format!("b{gid}-{}", record.label),
        });

        let fixed_val = if spec.at_max {
            match spec.fixed {
                Axis::I => imax - 1,
                Axis::J => jmax - 1,
                Axis::K => kmax - 1,
            }
        } else {
            0
        };

        let corner = |a: usize, b: usize| -> MeshResult<usize> {
            let mut ijk = [0usize; 3];
            ijk[spec.fixed.pos()] = fixed_val;
            ijk[spec.tangential.0.pos()] = a;
            ijk[spec.tangential.1.pos()] = b;
            global_node_id(dims, blkn, ijk[0], ijk[1], ijk[2])
        };

        for b in (s2 - 1)..(e2.saturating_sub(1)) {
            for a in (s1 - 1)..(e1.saturating_sub(1)) {
                let id = self.next_element_id();
                let nodes = vec![
                    corner(a, b)?,
                    corner(a + 1, b)?,
                    corner(a + 1, b + 1)?,
                    corner(a, b + 1)?,
                ];
                self.mesh.elements.push(Element {
                    id,
                    kind: ElementKind::Quadrilateral,
                    group: gid,
                    nodes,
                });
            }
        }
        Ok(())
    }
}
