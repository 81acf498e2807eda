use serde::Serialize;

/// One global mesh node: dense 1-based id plus Cartesian coordinate.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Element kinds the converter emits, carrying their Gmsh type codes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ElementKind {
    Quadrilateral,
    Hexahedron,
}

impl ElementKind {
    /// Gmsh MSH 2.2 element type code.
    #[inline]
    pub fn type_code(self) -> usize {
        match self {
            ElementKind::Quadrilateral => 3,
            ElementKind::Hexahedron => 5,
        }
    }
}

/// One mesh element: id, kind, owning physical group, and connectivity.
#[derive(Clone, Debug)]
pub struct Element {
    pub id: usize,
    pub kind: ElementKind,
    pub group: usize,
    pub nodes: Vec<usize>,
}

/// Named, numbered tag distinguishing the volume mesh from boundary patches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhysicalGroup {
    /// Geometric dimension: 2 for surface groups, 3 for the volume group.
    pub dim: usize,
    pub id: usize,
    pub name: String,
}

/// Assembled unstructured mesh: nodes, elements, and physical groups.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub nodes: Vec<Node>,
    pub elements: Vec<Element>,
    pub groups: Vec<PhysicalGroup>,
}

/// Size report for one conversion.
#[derive(Clone, Debug, Serialize)]
pub struct MeshSummary {
    pub nodes: usize,
    pub hexahedra: usize,
    pub quadrilaterals: usize,
    pub groups: usize,
}

impl Mesh {
    pub fn summary(&self) -> MeshSummary {
        let hexahedra = self
            .elements
            .iter()
            .filter(|e| e.kind == ElementKind::Hexahedron)
            .count();
        MeshSummary {
            nodes: self.nodes.len(),
            hexahedra,
            quadrilaterals: self.elements.len() - hexahedra,
            groups: self.groups.len(),
        }
    }
}
