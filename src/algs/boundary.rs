//! Boundary classification utilities.
//!
//! A node is a *boundary node* if it is an end node of at least one boundary
//! face (a face whose reverse does not occur). All other nodes are interior,
//! whatever boundary code they carry.
//!
//! After stitching meshes together, nodes on the former shared edge still carry
//! the boundary codes of their source meshes; [`remove_internal_boundary_codes`]
//! clears those.

use crate::topology::mesh::{INTERNAL_CODE, Mesh};
use crate::topology::node_id::NodeId;
use crate::topology::validation::FaceTable;

/// Classified boundary/interior node sets, each sorted ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundaryClassification {
    pub boundary: Vec<NodeId>,
    pub interior: Vec<NodeId>,
}

/// Flags per node (0-based) telling whether it touches a boundary face.
pub fn boundary_node_mask(table: &FaceTable) -> Vec<bool> {
    let mut mask = vec![false; table.node_count()];
    for (from, to) in table.boundary_faces() {
        mask[from.index()] = true;
        mask[to.index()] = true;
    }
    mask
}

/// Classify all nodes of `mesh` by face adjacency.
///
/// Nodes not referenced by any element are interior.
pub fn classify_boundary_nodes(mesh: &Mesh) -> BoundaryClassification {
    let (table, _) = FaceTable::for_mesh(mesh);
    let mut classification = BoundaryClassification::default();
    for (i, on_boundary) in boundary_node_mask(&table).into_iter().enumerate() {
        let node = NodeId::from_index(i);
        if on_boundary {
            classification.boundary.push(node);
        } else {
            classification.interior.push(node);
        }
    }
    classification
}

/// Set the code of every node that does not touch a boundary face to 0.
///
/// Only codes change; coordinates and connectivity are left alone. Returns the
/// number of nodes whose non-zero code was cleared.
pub fn remove_internal_boundary_codes(mesh: &mut Mesh) -> usize {
    let (table, _) = FaceTable::for_mesh(mesh);
    let mask = boundary_node_mask(&table);
    let mut cleared = 0;
    for (i, on_boundary) in mask.into_iter().enumerate() {
        if on_boundary {
            continue;
        }
        let previous = mesh.set_code(NodeId::from_index(i), INTERNAL_CODE);
        if previous.is_some_and(|code| code != INTERNAL_CODE) {
            cleared += 1;
        }
    }
    if cleared > 0 {
        log::debug!("cleared boundary code on {cleared} interior nodes");
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::mesh::MeshBuilder;

    /// 3x3 node grid split into four quads; node 5 is the centre.
    fn four_quads(centre_code: i32) -> Mesh {
        let mut builder = MeshBuilder::new();
        for j in 0..3 {
            for i in 0..3 {
                let code = if i == 1 && j == 1 { centre_code } else { 2 };
                builder = builder.node(i as f64, j as f64, 0.0, code);
            }
        }
        builder
            .elements(vec![
                vec![1, 2, 5, 4],
                vec![2, 3, 6, 5],
                vec![4, 5, 8, 7],
                vec![5, 6, 9, 8],
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn centre_node_is_interior() {
        let classification = classify_boundary_nodes(&four_quads(3));
        assert_eq!(classification.interior, vec![NodeId::new(5).unwrap()]);
        assert_eq!(classification.boundary.len(), 8);
    }

    #[test]
    fn clears_code_of_interior_node_only() {
        let mut mesh = four_quads(3);
        assert_eq!(remove_internal_boundary_codes(&mut mesh), 1);
        assert_eq!(mesh.codes(), vec![2, 2, 2, 2, 0, 2, 2, 2, 2]);
        // idempotent
        assert_eq!(remove_internal_boundary_codes(&mut mesh), 0);
    }

    #[test]
    fn unreferenced_nodes_lose_their_code() {
        let mut mesh = MeshBuilder::new()
            .node(0.0, 0.0, 0.0, 1)
            .node(1.0, 0.0, 0.0, 1)
            .node(0.0, 1.0, 0.0, 1)
            .node(5.0, 5.0, 0.0, 4)
            .elements(vec![vec![1, 2, 3]])
            .build()
            .unwrap();
        assert_eq!(remove_internal_boundary_codes(&mut mesh), 1);
        assert_eq!(mesh.codes(), vec![1, 1, 1, 0]);
    }
}
