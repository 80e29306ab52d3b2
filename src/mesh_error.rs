//! MeshMergeError: unified error type for mesh-merge public APIs
//!
//! Only invalid *configuration* is an error. Data-driven malformations found
//! while validating a mesh (double faces, boundary faces without a code) are
//! reported as [`FaceDefect`](crate::topology::validation::FaceDefect)s and
//! never abort a merge.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for mesh-merge operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshMergeError {
    /// Attempted to construct a `NodeId` with a zero value (node numbers are 1-based).
    #[error("NodeId must be non-zero (node numbers are 1-based)")]
    InvalidNodeId,
    /// A merge needs at least two source meshes.
    #[error("At least two input meshes must be specified, got {found}")]
    TooFewMeshes { found: usize },
    /// Merge tolerance must be finite and strictly positive.
    #[error("Node merge tolerance must be finite and > 0, got {0}")]
    InvalidTolerance(f64),
    /// An element references a node outside `[1, node_count]`.
    #[error("Element {element} references node {node}, but the mesh has {node_count} nodes")]
    NodeIndexOutOfRange {
        element: usize,
        node: usize,
        node_count: usize,
    },
    /// An element with fewer than three nodes has no area and no valid faces.
    #[error("Element {element} has {nodes} nodes, at least 3 are required")]
    DegenerateElement { element: usize, nodes: usize },
    /// Boundary codes are non-negative; face statistics are keyed on them.
    #[error("Node {node} has negative boundary code {code}")]
    NegativeBoundaryCode { node: usize, code: i32 },
    /// Number of strip-code sets does not match the number of meshes.
    #[error("Got {codes} boundary code lists for {meshes} meshes")]
    StripListMismatch { meshes: usize, codes: usize },
    /// A `file.mesh*1,3` source spec could not be parsed.
    #[error("Invalid mesh source spec: {0}")]
    InvalidSourceSpec(String),
    /// The mesh reader has no mesh at the requested path.
    #[error("Mesh not found: {0}")]
    MeshNotFound(PathBuf),
    /// Refusing to overwrite an existing output mesh.
    #[error("File with new mesh file name already exists: {0}")]
    OutputExists(PathBuf),
}
