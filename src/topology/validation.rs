//! Face-topology validation for 2D meshes.
//!
//! A *face* is a directed element edge `nodes[j] -> nodes[(j + 1) % n]`. In a
//! valid mesh with consistent counter-clockwise winding, a face shared by two
//! elements appears once in each direction (internal face), and a face on the
//! outer edge appears in one direction only (boundary face).
//!
//! [`validate_mesh`] builds the [`FaceTable`], classifies every face and
//! returns a [`ValidationReport`]. Structural problems are *not* errors: they
//! are collected as [`FaceDefect`]s, and the report is produced regardless.
//!
//! Boundary face codes are derived from the end nodes:
//! 1. if either node has the land code (1), the face code is 1;
//! 2. otherwise the face code is the code of the *to*-node.
//!
//! A boundary face with a zero-code end node is reported as a defect and
//! counted as internal, so malformed faces do not pollute boundary statistics.

use crate::topology::mesh::{Element, INTERNAL_CODE, LAND_CODE, Mesh};
use crate::topology::node_id::NodeId;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Structural problem found while validating faces.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
pub enum FaceDefect {
    /// The same directed face occurs in two elements.
    #[error(
        "Invalid mesh: Double face, from node {from} to node {to}. \
         Hint: Probably too many nodes was merged into one of the two face nodes. \
         Try decrease node merge tolerance value"
    )]
    DoubleFace { from: NodeId, to: NodeId },
    /// A boundary face has an end node without boundary code.
    #[error(
        "Invalid mesh: Boundary face, from node {from} to node {to} is missing a \
         boundary code on node {node}. Hint: Modify boundary code for node {node}"
    )]
    MissingBoundaryCode {
        from: NodeId,
        to: NodeId,
        node: NodeId,
    },
}

/// For each node, the to-nodes of every face starting at that node.
///
/// A face recorded twice is kept once; the duplicates are returned from
/// [`FaceTable::build`] as [`FaceDefect::DoubleFace`].
#[derive(Clone, Debug, Default)]
pub struct FaceTable {
    to_nodes: Vec<Vec<NodeId>>,
}

impl FaceTable {
    /// Build the table for `node_count` nodes from an element list.
    ///
    /// Every node referenced by `elements` must be `<= node_count`, which
    /// [`Mesh`] guarantees.
    pub fn build(node_count: usize, elements: &[Element]) -> (Self, Vec<FaceDefect>) {
        let mut to_nodes = vec![Vec::new(); node_count];
        let mut defects = Vec::new();
        for element in elements {
            for (from, to) in element.faces() {
                let faces = &mut to_nodes[from.index()];
                if faces.contains(&to) {
                    defects.push(FaceDefect::DoubleFace { from, to });
                } else {
                    faces.push(to);
                }
            }
        }
        (Self { to_nodes }, defects)
    }

    /// Table for the faces of `mesh`.
    pub fn for_mesh(mesh: &Mesh) -> (Self, Vec<FaceDefect>) {
        Self::build(mesh.node_count(), mesh.elements())
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.to_nodes.len()
    }

    /// To-nodes of faces starting at `node`, in recording order.
    pub fn to_nodes(&self, node: NodeId) -> &[NodeId] {
        self.to_nodes
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True if the directed face `from -> to` exists.
    pub fn has_face(&self, from: NodeId, to: NodeId) -> bool {
        self.to_nodes(from).contains(&to)
    }

    /// True if `from -> to` exists and its reverse does not.
    pub fn is_boundary_face(&self, from: NodeId, to: NodeId) -> bool {
        self.has_face(from, to) && !self.has_face(to, from)
    }

    /// All recorded faces, ordered by from-node then recording order.
    pub fn faces(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.to_nodes.iter().enumerate().flat_map(|(i, tos)| {
            let from = NodeId::from_index(i);
            tos.iter().map(move |&to| (from, to))
        })
    }

    /// Faces without a reverse face.
    pub fn boundary_faces(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.faces()
            .filter(move |&(from, to)| !self.has_face(to, from))
    }

    /// Total number of distinct directed faces.
    pub fn face_count(&self) -> usize {
        self.to_nodes.iter().map(Vec::len).sum()
    }
}

/// Outcome of validating one mesh.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Defects in discovery order; empty for a valid mesh.
    pub defects: Vec<FaceDefect>,
    /// Face count per face code. Key 0 holds internal faces, counted once per
    /// direction (a face shared by two elements contributes 2). Other keys are
    /// boundary codes with at least one face.
    pub face_codes: BTreeMap<i32, usize>,
}

impl ValidationReport {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.defects.is_empty()
    }

    /// Human-readable defect messages.
    pub fn errors(&self) -> Vec<String> {
        self.defects.iter().map(ToString::to_string).collect()
    }

    /// Faces counted under `code` (0 = internal).
    pub fn face_count(&self, code: i32) -> usize {
        self.face_codes.get(&code).copied().unwrap_or(0)
    }

    /// Internal directed faces (both directions counted).
    pub fn internal_faces(&self) -> usize {
        self.face_count(INTERNAL_CODE)
    }

    /// Faces counted under any boundary code.
    pub fn boundary_faces(&self) -> usize {
        self.face_codes
            .iter()
            .filter(|&(&code, _)| code != INTERNAL_CODE)
            .map(|(_, &count)| count)
            .sum()
    }

    /// Emit every defect through `log::warn!`.
    pub fn log_defects(&self) {
        for defect in &self.defects {
            log::warn!("{defect}");
        }
    }
}

/// Validate the faces of `mesh`.
pub fn validate_mesh(mesh: &Mesh) -> ValidationReport {
    let (table, defects) = FaceTable::for_mesh(mesh);
    validate_faces(mesh, &table, defects)
}

/// Classify every face of a prebuilt table against the codes of `mesh`.
///
/// `defects` carries the double-face defects from [`FaceTable::build`]; the
/// classification defects are appended after them.
pub fn validate_faces(mesh: &Mesh, table: &FaceTable, defects: Vec<FaceDefect>) -> ValidationReport {
    let nodes = mesh.nodes();
    let mut report = ValidationReport {
        defects,
        face_codes: BTreeMap::from([(INTERNAL_CODE, 0)]),
    };

    for (from, to) in table.faces() {
        if table.has_face(to, from) {
            *report.face_codes.entry(INTERNAL_CODE).or_default() += 1;
            continue;
        }

        let from_code = nodes[from.index()].code;
        let to_code = nodes[to.index()].code;

        let mut malformed = false;
        if from_code == INTERNAL_CODE {
            report.defects.push(FaceDefect::MissingBoundaryCode {
                from,
                to,
                node: from,
            });
            malformed = true;
        }
        if to_code == INTERNAL_CODE {
            report.defects.push(FaceDefect::MissingBoundaryCode { from, to, node: to });
            malformed = true;
        }

        let face_code = if malformed {
            INTERNAL_CODE
        } else if from_code == LAND_CODE || to_code == LAND_CODE {
            LAND_CODE
        } else {
            to_code
        };
        *report.face_codes.entry(face_code).or_default() += 1;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::mesh::MeshBuilder;

    fn nid(i: usize) -> NodeId {
        NodeId::new(i).unwrap()
    }

    fn square(codes: [i32; 4]) -> Mesh {
        MeshBuilder::new()
            .nodes(
                &[0.0, 1.0, 1.0, 0.0],
                &[0.0, 0.0, 1.0, 1.0],
                &[0.0; 4],
                &codes,
            )
            .elements(vec![vec![1, 2, 3, 4]])
            .build()
            .unwrap()
    }

    #[test]
    fn single_quad_is_all_boundary() {
        let report = validate_mesh(&square([1, 1, 1, 1]));
        assert!(report.is_valid(), "{:?}", report.errors());
        assert_eq!(report.internal_faces(), 0);
        assert_eq!(report.face_count(1), 4);
        assert_eq!(report.boundary_faces(), 4);
    }

    #[test]
    fn face_code_follows_to_node_unless_land() {
        // faces: 1->2 (3,4) = 4, 2->3 (4,5) = 5, 3->4 (5,1) = land, 4->1 (1,3) = land
        let report = validate_mesh(&square([3, 4, 5, 1]));
        assert!(report.is_valid());
        assert_eq!(report.face_count(4), 1);
        assert_eq!(report.face_count(5), 1);
        assert_eq!(report.face_count(1), 2);
        assert_eq!(report.face_count(3), 0);
    }

    #[test]
    fn zero_code_on_boundary_is_a_defect() {
        let report = validate_mesh(&square([2, 2, 0, 2]));
        // node 3 ends face 2->3 and starts face 3->4
        assert_eq!(
            report.defects,
            vec![
                FaceDefect::MissingBoundaryCode {
                    from: nid(2),
                    to: nid(3),
                    node: nid(3)
                },
                FaceDefect::MissingBoundaryCode {
                    from: nid(3),
                    to: nid(4),
                    node: nid(3)
                },
            ]
        );
        assert_eq!(report.internal_faces(), 2);
        assert_eq!(report.face_count(2), 2);
    }

    #[test]
    fn double_face_is_reported_once_and_kept_once() {
        let mesh = MeshBuilder::new()
            .nodes(
                &[0.0, 1.0, 1.0, 0.0],
                &[0.0, 0.0, 1.0, 1.0],
                &[0.0; 4],
                &[1; 4],
            )
            .elements(vec![vec![1, 2, 3], vec![1, 2, 4]])
            .build()
            .unwrap();
        let (table, defects) = FaceTable::for_mesh(&mesh);
        assert_eq!(defects, vec![FaceDefect::DoubleFace { from: nid(1), to: nid(2) }]);
        assert_eq!(table.to_nodes(nid(1)), &[nid(2)]);
        assert_eq!(table.face_count(), 5);
    }

    #[test]
    fn defect_messages_name_the_nodes() {
        let defect = FaceDefect::MissingBoundaryCode {
            from: nid(7),
            to: nid(9),
            node: nid(9),
        };
        let msg = defect.to_string();
        assert!(msg.starts_with("Invalid mesh: Boundary face, from node 7 to node 9"));
        assert!(msg.ends_with("Hint: Modify boundary code for node 9"));
        let double = FaceDefect::DoubleFace {
            from: nid(1),
            to: nid(2),
        };
        assert!(double.to_string().contains("Double face, from node 1 to node 2."));
    }
}
