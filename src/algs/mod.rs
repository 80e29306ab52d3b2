//! Re-export public algorithms.

pub mod boundary;
pub mod merge;
pub mod statistics;

pub use boundary::{BoundaryClassification, classify_boundary_nodes, remove_internal_boundary_codes};
pub use merge::{MergeOptions, MergeOutcome, MeshMerger, SourceMesh, merge_meshes};
pub use statistics::FaceCodeTable;
