//! Planar geometry for mesh merging.
//!
//! This module provides the axis-aligned [`Extent`](extent::Extent) and the
//! [`QuadTree`](quad_tree::QuadTree) point index used to find coincident nodes.

pub mod extent;
pub mod quad_tree;

pub use extent::Extent;
pub use quad_tree::{QuadPoint, QuadTree};
