#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-merge
//!
//! mesh-merge combines independently generated unstructured 2D meshes into a
//! single mesh. Nodes on shared boundaries are stitched together when they
//! coincide within a tolerance, element connectivity is renumbered, boundary
//! codes are reconciled, and the face topology of the result is validated.
//!
//! ## Pipeline
//! 1. The union extent of all meshes is computed and grown by the tolerance.
//! 2. A [`QuadTree`](geometry::QuadTree) over that extent indexes merged nodes.
//! 3. Meshes are added in order; boundary nodes (or all nodes, on request) are
//!    matched against nodes of *earlier* meshes only.
//! 4. Boundary codes are cleared on nodes that ended up interior.
//! 5. The merged mesh is validated: double faces and boundary faces without a
//!    code are reported as [`FaceDefect`](topology::FaceDefect)s, and face
//!    counts per boundary code are collected.
//!
//! ## Errors
//! Only configuration problems (fewer than two meshes, non-positive tolerance,
//! negative boundary codes, malformed connectivity) are returned as
//! [`MeshMergeError`](mesh_error::MeshMergeError). Topological defects of the
//! result never abort a merge.
//!
//! ## Logging
//! Progress and defects are reported through the `log` facade; install any
//! logger to see them.
//!
//! ## Usage
//! ```rust
//! use mesh_merge::prelude::*;
//!
//! let a = MeshBuilder::new()
//!     .nodes(&[0.0, 1.0, 1.0, 0.0], &[0.0, 0.0, 1.0, 1.0], &[0.0; 4], &[1; 4])
//!     .elements(vec![vec![1, 2, 3, 4]])
//!     .build()?;
//! let b = MeshBuilder::new()
//!     .nodes(&[1.0, 2.0, 2.0, 1.0], &[0.0, 0.0, 1.0, 1.0], &[0.0; 4], &[1; 4])
//!     .elements(vec![vec![1, 2, 3, 4]])
//!     .build()?;
//!
//! let outcome = merge_meshes(
//!     &[SourceMesh::new(a), SourceMesh::new(b)],
//!     &MergeOptions::default(),
//! )?;
//! assert_eq!(outcome.mesh.element_count(), 2);
//! println!("{}", outcome.statistics());
//! # Ok::<(), mesh_merge::mesh_error::MeshMergeError>(())
//! ```

pub mod algs;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::merge::{MergeOptions, MergeOutcome, MeshMerger, SourceMesh, merge_meshes};
    pub use crate::algs::statistics::FaceCodeTable;
    pub use crate::geometry::extent::Extent;
    pub use crate::geometry::quad_tree::{QuadPoint, QuadTree};
    pub use crate::io::{InMemoryMeshStore, MeshReader, MeshWriter, SourceSpec, merge_files};
    pub use crate::mesh_error::MeshMergeError;
    pub use crate::topology::mesh::{Element, Mesh, MeshBuilder, Node};
    pub use crate::topology::node_id::NodeId;
    pub use crate::topology::validation::{FaceDefect, ValidationReport, validate_mesh};
}
