//! `NodeId`: a strong, zero-cost handle for 1-based mesh node numbers
//!
//! Element connectivity tables in the mesh formats this crate feeds refer to
//! nodes by 1-based number. `NodeId` wraps a `NonZeroUsize` so that 0 can never
//! be mistaken for a valid node, while [`NodeId::index`] gives the 0-based
//! position into node arrays.
//!
//! `NodeId` is `repr(transparent)` and serializes as the bare integer.

use crate::mesh_error::MeshMergeError;
use std::{fmt, num::NonZeroUsize};

#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct NodeId(NonZeroUsize);

impl NodeId {
    /// Creates a `NodeId` from a 1-based node number.
    ///
    /// # Errors
    /// Returns [`MeshMergeError::InvalidNodeId`] if `raw == 0`.
    ///
    /// # Example
    /// ```rust
    /// # use mesh_merge::topology::node_id::NodeId;
    /// let n = NodeId::new(3)?;
    /// assert_eq!(n.get(), 3);
    /// assert_eq!(n.index(), 2);
    /// # Ok::<(), mesh_merge::mesh_error::MeshMergeError>(())
    /// ```
    #[inline]
    pub fn new(raw: usize) -> Result<Self, MeshMergeError> {
        NonZeroUsize::new(raw)
            .map(NodeId)
            .ok_or(MeshMergeError::InvalidNodeId)
    }

    /// Creates a `NodeId` from a 0-based array position.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        NodeId(NonZeroUsize::MIN.saturating_add(index))
    }

    /// The 1-based node number.
    #[inline]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// The 0-based position into node arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeId").field(&self.get()).finish()
    }
}

/// Prints the 1-based node number only.
impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl From<NodeId> for usize {
    #[inline]
    fn from(n: NodeId) -> usize {
        n.get()
    }
}

impl TryFrom<usize> for NodeId {
    type Error = MeshMergeError;

    #[inline]
    fn try_from(raw: usize) -> Result<Self, Self::Error> {
        NodeId::new(raw)
    }
}
