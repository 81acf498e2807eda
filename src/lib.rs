pub mod assemble;
pub mod block;
pub mod error;
pub mod gmsh;
pub mod mesh;
pub mod nmf;
pub mod node_index;
pub mod read;
pub mod utils;

pub use assemble::{assemble, VOLUME_GROUP_ID, VOLUME_GROUP_NAME};
pub use block::{block_dims, Block};
pub use error::{MeshError, MeshResult};
pub use gmsh::{read_msh_counts, write_msh};
pub use mesh::{Element, ElementKind, Mesh, MeshSummary, Node, PhysicalGroup};
pub use nmf::{read_nmf, BoundaryRecord, CONNECTIVITY_MARKER};
pub use node_index::global_node_id;
pub use read::{read_plot3d_ascii, read_plot3d_binary, BinaryFormat, FloatPrecision};
pub use utils::Endian;
