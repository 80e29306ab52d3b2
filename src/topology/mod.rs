//! Mesh data model and face topology.
//!
//! This module provides:
//! - [`NodeId`](node_id::NodeId), the 1-based node handle
//! - the in-memory [`Mesh`](mesh::Mesh) with its builder
//! - element [`CellType`](cell_type::CellType) tags
//! - face-adjacency [`validation`]

pub mod cell_type;
pub mod mesh;
pub mod node_id;
pub mod validation;

pub use cell_type::CellType;
pub use mesh::{Element, Mesh, MeshBuilder, Node};
pub use node_id::NodeId;
pub use validation::{FaceDefect, FaceTable, ValidationReport, validate_mesh};
