//! In-memory 2D mesh: the data contract shared with mesh readers and writers.
//!
//! A [`Mesh`] is an ordered list of [`Node`]s (XYZ coordinates plus an integer
//! boundary code, 0 meaning interior) and an ordered list of [`Element`]s
//! (counter-clockwise 1-based node lists). The projection string and the
//! optional quantity tag are opaque and passed through unchanged.
//!
//! Every constructor checks that each element references nodes in
//! `[1, node_count]` and has at least three nodes, so code downstream of a
//! `Mesh` can index node arrays without bounds surprises.
//!
//! # Example
//! ```rust
//! use mesh_merge::topology::mesh::MeshBuilder;
//!
//! let mesh = MeshBuilder::new()
//!     .nodes(
//!         &[0.0, 1.0, 1.0, 0.0],
//!         &[0.0, 0.0, 1.0, 1.0],
//!         &[0.0; 4],
//!         &[1, 1, 1, 1],
//!     )
//!     .elements(vec![vec![1, 2, 3, 4]])
//!     .projection("NON-UTM")
//!     .build()?;
//! assert_eq!(mesh.node_count(), 4);
//! assert_eq!(mesh.extent().x_max, 1.0);
//! # Ok::<(), mesh_merge::mesh_error::MeshMergeError>(())
//! ```

use crate::geometry::extent::Extent;
use crate::mesh_error::MeshMergeError;
use crate::topology::cell_type::CellType;
use crate::topology::node_id::NodeId;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Boundary code of interior nodes.
pub const INTERNAL_CODE: i32 = 0;
/// Boundary code reserved for land boundaries.
pub const LAND_CODE: i32 = 1;

/// A mesh node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub code: i32,
}

impl Node {
    pub const fn new(x: f64, y: f64, z: f64, code: i32) -> Self {
        Self { x, y, z, code }
    }

    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.code != INTERNAL_CODE
    }
}

/// A mesh element: type tag plus counter-clockwise node list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub cell_type: CellType,
    pub nodes: Vec<NodeId>,
}

impl Element {
    /// Element whose type is derived from its node count.
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self {
            cell_type: CellType::for_node_count(nodes.len()),
            nodes,
        }
    }

    /// Directed faces `nodes[j] -> nodes[(j + 1) % n]` in winding order.
    pub fn faces(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.iter().copied().circular_tuple_windows()
    }
}

/// Unstructured 2D mesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeshParts")]
pub struct Mesh {
    nodes: Vec<Node>,
    elements: Vec<Element>,
    projection: String,
    quantity: Option<String>,
}

impl Mesh {
    /// Build a mesh, checking connectivity.
    ///
    /// # Errors
    /// [`MeshMergeError::NodeIndexOutOfRange`] or
    /// [`MeshMergeError::DegenerateElement`] if an element is malformed.
    pub fn try_new(
        nodes: Vec<Node>,
        elements: Vec<Element>,
        projection: impl Into<String>,
        quantity: Option<String>,
    ) -> Result<Self, MeshMergeError> {
        check_connectivity(nodes.len(), &elements)?;
        Ok(Self {
            nodes,
            elements,
            projection: projection.into(),
            quantity,
        })
    }

    pub fn builder() -> MeshBuilder {
        MeshBuilder::new()
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Node by 1-based id. `None` if out of range.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Boundary codes in node order.
    pub fn codes(&self) -> Vec<i32> {
        self.nodes.iter().map(|n| n.code).collect()
    }

    /// Overwrite the boundary code of a node. Coordinates and connectivity are
    /// never touched after construction.
    ///
    /// Returns the previous code, or `None` if `id` is out of range.
    pub fn set_code(&mut self, id: NodeId, code: i32) -> Option<i32> {
        self.nodes
            .get_mut(id.index())
            .map(|n| std::mem::replace(&mut n.code, code))
    }

    #[inline]
    pub fn projection(&self) -> &str {
        &self.projection
    }

    #[inline]
    pub fn quantity(&self) -> Option<&str> {
        self.quantity.as_deref()
    }

    /// XY extent of all nodes; empty for a mesh without nodes.
    pub fn extent(&self) -> Extent {
        Extent::from_points(self.nodes.iter().map(|n| (n.x, n.y)))
    }

    /// Reject negative boundary codes; face statistics are keyed on codes >= 0.
    pub fn check_codes(&self) -> Result<(), MeshMergeError> {
        match self.nodes.iter().position(|n| n.code < 0) {
            Some(i) => Err(MeshMergeError::NegativeBoundaryCode {
                node: i + 1,
                code: self.nodes[i].code,
            }),
            None => Ok(()),
        }
    }
}

/// Unchecked deserialization target; converted through [`Mesh::try_new`].
#[derive(Deserialize)]
struct MeshParts {
    nodes: Vec<Node>,
    elements: Vec<Element>,
    projection: String,
    #[serde(default)]
    quantity: Option<String>,
}

impl TryFrom<MeshParts> for Mesh {
    type Error = MeshMergeError;

    fn try_from(parts: MeshParts) -> Result<Self, Self::Error> {
        Mesh::try_new(parts.nodes, parts.elements, parts.projection, parts.quantity)
    }
}

/// Check that every element has >= 3 nodes, all within `[1, node_count]`.
///
/// Element numbers in errors are 1-based.
pub fn check_connectivity(node_count: usize, elements: &[Element]) -> Result<(), MeshMergeError> {
    for (i, element) in elements.iter().enumerate() {
        if element.nodes.len() < 3 {
            return Err(MeshMergeError::DegenerateElement {
                element: i + 1,
                nodes: element.nodes.len(),
            });
        }
        if let Some(bad) = element.nodes.iter().find(|n| n.get() > node_count) {
            return Err(MeshMergeError::NodeIndexOutOfRange {
                element: i + 1,
                node: bad.get(),
                node_count,
            });
        }
    }
    Ok(())
}

/// Assemble a [`Mesh`] from parallel coordinate/code arrays and a raw
/// 1-based connectivity table, the way mesh readers hand data over.
#[derive(Clone, Debug, Default)]
pub struct MeshBuilder {
    nodes: Vec<Node>,
    connectivity: Vec<Vec<usize>>,
    projection: String,
    quantity: Option<String>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set nodes from parallel arrays. Arrays are truncated to the shortest.
    pub fn nodes(mut self, xs: &[f64], ys: &[f64], zs: &[f64], codes: &[i32]) -> Self {
        self.nodes = xs
            .iter()
            .zip(ys)
            .zip(zs)
            .zip(codes)
            .map(|(((&x, &y), &z), &code)| Node::new(x, y, z, code))
            .collect();
        self
    }

    /// Append one node.
    pub fn node(mut self, x: f64, y: f64, z: f64, code: i32) -> Self {
        self.nodes.push(Node::new(x, y, z, code));
        self
    }

    /// Set the 1-based connectivity table.
    pub fn elements(mut self, connectivity: Vec<Vec<usize>>) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn projection(mut self, projection: impl Into<String>) -> Self {
        self.projection = projection.into();
        self
    }

    pub fn quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    /// [`MeshMergeError::InvalidNodeId`] for a 0 in the connectivity table,
    /// otherwise the errors of [`Mesh::try_new`].
    pub fn build(self) -> Result<Mesh, MeshMergeError> {
        let elements = self
            .connectivity
            .into_iter()
            .map(|raw| {
                raw.into_iter()
                    .map(NodeId::new)
                    .collect::<Result<Vec<_>, _>>()
                    .map(Element::new)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Mesh::try_new(self.nodes, elements, self.projection, self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> MeshBuilder {
        MeshBuilder::new()
            .node(0.0, 0.0, -1.0, 1)
            .node(1.0, 0.0, -1.0, 1)
            .node(1.0, 1.0, -2.0, 2)
            .node(0.0, 1.0, -2.0, 2)
            .projection("UTM-32")
    }

    #[test]
    fn builds_quad_mesh() {
        let mesh = unit_square().elements(vec![vec![1, 2, 3, 4]]).build().unwrap();
        assert_eq!(mesh.node_count(), 4);
        assert_eq!(mesh.element_count(), 1);
        assert_eq!(mesh.elements()[0].cell_type, CellType::Quadrilateral);
        assert_eq!(mesh.projection(), "UTM-32");
        assert_eq!(mesh.quantity(), None);
        assert_eq!(mesh.codes(), vec![1, 1, 2, 2]);
    }

    #[test]
    fn rejects_out_of_range_node() {
        let err = unit_square().elements(vec![vec![1, 2, 5]]).build().unwrap_err();
        assert_eq!(
            err,
            MeshMergeError::NodeIndexOutOfRange {
                element: 1,
                node: 5,
                node_count: 4
            }
        );
    }

    #[test]
    fn rejects_zero_and_degenerate() {
        assert_eq!(
            unit_square().elements(vec![vec![0, 1, 2]]).build().unwrap_err(),
            MeshMergeError::InvalidNodeId
        );
        assert_eq!(
            unit_square()
                .elements(vec![vec![1, 2, 3], vec![1, 2]])
                .build()
                .unwrap_err(),
            MeshMergeError::DegenerateElement {
                element: 2,
                nodes: 2
            }
        );
    }

    #[test]
    fn faces_wrap_around() {
        let mesh = unit_square().elements(vec![vec![1, 2, 3]]).build().unwrap();
        let faces: Vec<(usize, usize)> = mesh.elements()[0]
            .faces()
            .map(|(a, b)| (a.get(), b.get()))
            .collect();
        assert_eq!(faces, vec![(1, 2), (2, 3), (3, 1)]);
    }

    #[test]
    fn set_code_only_changes_code() {
        let mut mesh = unit_square().elements(vec![vec![1, 2, 3, 4]]).build().unwrap();
        let n3 = NodeId::new(3).unwrap();
        assert_eq!(mesh.set_code(n3, 0), Some(2));
        assert_eq!(mesh.node(n3), Some(&Node::new(1.0, 1.0, -2.0, 0)));
        assert_eq!(mesh.set_code(NodeId::new(9).unwrap(), 1), None);
    }

    #[test]
    fn deserialization_checks_connectivity() {
        let mesh = unit_square().elements(vec![vec![1, 2, 3, 4]]).build().unwrap();
        let json = serde_json::to_string(&mesh).unwrap();
        assert_eq!(serde_json::from_str::<Mesh>(&json).unwrap(), mesh);

        let broken = json.replace("[1,2,3,4]", "[1,2,3,7]");
        assert!(serde_json::from_str::<Mesh>(&broken).is_err());
    }

    #[test]
    fn negative_codes_are_reported() {
        let mesh = unit_square()
            .node(0.5, 0.5, 0.0, -4)
            .elements(vec![vec![1, 2, 5]])
            .build()
            .unwrap();
        assert_eq!(
            mesh.check_codes(),
            Err(MeshMergeError::NegativeBoundaryCode { node: 5, code: -4 })
        );
    }
}
