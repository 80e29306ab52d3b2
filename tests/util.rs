#![allow(dead_code)]
use mesh_merge::topology::mesh::{Mesh, MeshBuilder};
use mesh_merge::topology::node_id::NodeId;

pub fn nid(u: usize) -> NodeId {
    NodeId::new(u).unwrap()
}

/// Unit square at `(x0, y0)` with all four nodes coded `code`; one element.
pub fn unit_square(x0: f64, y0: f64, code: i32) -> Mesh {
    MeshBuilder::new()
        .nodes(
            &[x0, x0 + 1.0, x0 + 1.0, x0],
            &[y0, y0, y0 + 1.0, y0 + 1.0],
            &[0.0; 4],
            &[code; 4],
        )
        .elements(vec![vec![1, 2, 3, 4]])
        .projection("NON-UTM")
        .build()
        .unwrap()
}

/// Structured `nx` x `ny` quad grid with spacing `h`, lower-left at `(x0, y0)`.
///
/// Nodes are numbered row by row. Outer nodes get `boundary_code`, inner
/// nodes 0. Quads are counter-clockwise.
pub fn quad_grid(nx: usize, ny: usize, x0: f64, y0: f64, h: f64, boundary_code: i32) -> Mesh {
    let mut builder = MeshBuilder::new().projection("NON-UTM");
    for j in 0..=ny {
        for i in 0..=nx {
            let on_edge = i == 0 || j == 0 || i == nx || j == ny;
            let code = if on_edge { boundary_code } else { 0 };
            builder = builder.node(x0 + h * i as f64, y0 + h * j as f64, -1.0, code);
        }
    }
    let row = nx + 1;
    let mut elements = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let n1 = j * row + i + 1;
            elements.push(vec![n1, n1 + 1, n1 + 1 + row, n1 + row]);
        }
    }
    builder.elements(elements).build().unwrap()
}

/// Assert every element node is within `[1, node_count]`.
pub fn assert_connectivity_in_range(mesh: &Mesh) {
    for (e, element) in mesh.elements().iter().enumerate() {
        for n in &element.nodes {
            assert!(
                n.get() >= 1 && n.get() <= mesh.node_count(),
                "element {} references node {} of {}",
                e + 1,
                n,
                mesh.node_count()
            );
        }
    }
}
