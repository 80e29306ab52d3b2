//! Element type metadata for 2D mesh elements.

use serde::{Deserialize, Serialize};

/// Element shapes a 2D mesh may contain.
///
/// Elements are plain node lists in counter-clockwise order; the type tag is
/// carried through a merge unchanged.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// 3-node element.
    Triangle,
    /// 4-node element.
    Quadrilateral,
    /// Polygon with `n` nodes.
    Polygon(u8),
}

impl Default for CellType {
    fn default() -> Self {
        CellType::Triangle
    }
}

impl CellType {
    /// Element type implied by an element's node count.
    pub fn for_node_count(count: usize) -> Self {
        match count {
            3 => CellType::Triangle,
            4 => CellType::Quadrilateral,
            n => CellType::Polygon(u8::try_from(n).unwrap_or(u8::MAX)),
        }
    }

    /// Number of nodes (and faces) of the element.
    pub fn node_count(self) -> usize {
        match self {
            CellType::Triangle => 3,
            CellType::Quadrilateral => 4,
            CellType::Polygon(n) => usize::from(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_count_round_trips() {
        for n in 3..=8 {
            assert_eq!(CellType::for_node_count(n).node_count(), n);
        }
        assert_eq!(CellType::for_node_count(4), CellType::Quadrilateral);
    }
}
