//! Adaptive 2D quad-tree over node coordinates.
//!
//! The tree covers a fixed [`Extent`] given at construction. Points live in
//! leaves; a leaf holding more than [`MAX_POINTS_PER_NODE`] points splits at
//! the midpoint of its extent into four equal quadrants and re-inserts its
//! points into them. Nodes are stored in an arena (`Vec`) and refer to their
//! children by index.
//!
//! # Boundary membership
//! Extents are inclusive on all four sides, so a point lying exactly on a split
//! line is stored in *every* child whose extent contains it. [`QuadTree::find`]
//! therefore may return the same point more than once; callers that look for
//! the nearest point must not rely on a single occurrence.
//!
//! The tree is append-only: points are never removed or moved.
//!
//! # Example
//! ```rust
//! use mesh_merge::geometry::extent::Extent;
//! use mesh_merge::geometry::quad_tree::{QuadPoint, QuadTree};
//! use mesh_merge::topology::node_id::NodeId;
//!
//! let mut tree = QuadTree::new(Extent::new(0.0, 10.0, 0.0, 10.0));
//! assert!(tree.add(QuadPoint::new(NodeId::new(1)?, 2.0, 3.0)));
//! // exact duplicates and points outside the covered extent are rejected
//! assert!(!tree.add(QuadPoint::new(NodeId::new(2)?, 2.0, 3.0)));
//! assert!(!tree.add(QuadPoint::new(NodeId::new(3)?, 11.0, 3.0)));
//!
//! let hits = tree.find(&Extent::around(2.0, 3.0, 0.5));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].no.get(), 1);
//! # Ok::<(), mesh_merge::mesh_error::MeshMergeError>(())
//! ```

use crate::geometry::extent::Extent;
use crate::topology::node_id::NodeId;

/// Leaf capacity; a leaf splits when it holds more points than this.
pub const MAX_POINTS_PER_NODE: usize = 10;

/// A point stored in the tree: node number plus XY coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadPoint {
    pub no: NodeId,
    pub x: f64,
    pub y: f64,
}

impl QuadPoint {
    pub const fn new(no: NodeId, x: f64, y: f64) -> Self {
        Self { no, x, y }
    }

    /// Squared Euclidean distance to `(x, y)`.
    #[inline]
    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

#[derive(Clone, Debug)]
struct TreeNode {
    extent: Extent,
    /// Arena indices of the NE, NW, SW, SE quadrants once split.
    children: Option<[usize; 4]>,
    /// Points of a leaf; always empty after a split.
    points: Vec<QuadPoint>,
}

impl TreeNode {
    fn leaf(extent: Extent) -> Self {
        Self {
            extent,
            children: None,
            points: Vec::new(),
        }
    }
}

/// Point quad-tree for near-duplicate detection and box queries.
#[derive(Clone, Debug)]
pub struct QuadTree {
    nodes: Vec<TreeNode>,
    len: usize,
}

const ROOT: usize = 0;

impl QuadTree {
    /// Create an empty tree covering `extent`.
    pub fn new(extent: Extent) -> Self {
        Self {
            nodes: vec![TreeNode::leaf(extent)],
            len: 0,
        }
    }

    /// The extent covered by the tree.
    #[inline]
    pub fn extent(&self) -> Extent {
        self.nodes[ROOT].extent
    }

    /// Number of successful [`QuadTree::add`] calls.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of tree nodes (internal and leaves).
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of levels below the root; 0 while the root is a leaf.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(ROOT, 0usize)];
        while let Some((idx, level)) = stack.pop() {
            deepest = deepest.max(level);
            if let Some(children) = self.nodes[idx].children {
                stack.extend(children.iter().map(|&c| (c, level + 1)));
            }
        }
        deepest
    }

    /// Insert a point.
    ///
    /// Returns `false` without changing the tree if the point lies outside the
    /// covered extent, or if a point with identical coordinates is already
    /// stored in the leaf it falls into.
    pub fn add(&mut self, point: QuadPoint) -> bool {
        let added = self.add_at(ROOT, point);
        if added {
            self.len += 1;
        }
        added
    }

    fn add_at(&mut self, idx: usize, point: QuadPoint) -> bool {
        let node = &mut self.nodes[idx];
        if !node.extent.contains(point.x, point.y) {
            return false;
        }

        if let Some(children) = node.children {
            let mut added = false;
            for child in children {
                added |= self.add_at(child, point);
            }
            return added;
        }

        if node
            .points
            .iter()
            .any(|p| p.x == point.x && p.y == point.y)
        {
            return false;
        }
        node.points.push(point);
        if node.points.len() > MAX_POINTS_PER_NODE {
            self.subdivide(idx);
        }
        true
    }

    /// Split leaf `idx` at its midpoint and push its points down.
    fn subdivide(&mut self, idx: usize) {
        let e = self.nodes[idx].extent;
        let (x_mid, y_mid) = e.midpoint();
        let quadrants = [
            Extent::new(x_mid, e.x_max, y_mid, e.y_max),
            Extent::new(e.x_min, x_mid, y_mid, e.y_max),
            Extent::new(e.x_min, x_mid, e.y_min, y_mid),
            Extent::new(x_mid, e.x_max, e.y_min, y_mid),
        ];

        let first = self.nodes.len();
        self.nodes.extend(quadrants.into_iter().map(TreeNode::leaf));
        let children = [first, first + 1, first + 2, first + 3];

        let points = std::mem::take(&mut self.nodes[idx].points);
        self.nodes[idx].children = Some(children);
        for point in points {
            for child in children {
                self.add_at(child, point);
            }
        }
    }

    /// All stored points inside `extent` (inclusive), in no particular order.
    pub fn find(&self, extent: &Extent) -> Vec<QuadPoint> {
        let mut out = Vec::new();
        self.find_into(extent, &mut out);
        out
    }

    /// Like [`QuadTree::find`], appending to a caller-owned buffer.
    pub fn find_into(&self, extent: &Extent, out: &mut Vec<QuadPoint>) {
        let mut stack = vec![ROOT];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if !node.extent.overlaps(extent) {
                continue;
            }
            match node.children {
                Some(children) => stack.extend(children),
                None => out.extend(
                    node.points
                        .iter()
                        .filter(|p| extent.contains(p.x, p.y))
                        .copied(),
                ),
            }
        }
    }

    /// Stored point closest to `(x, y)` whose distance is strictly less than
    /// `tolerance`. `scratch` is reused as the query buffer.
    pub fn nearest_within(
        &self,
        x: f64,
        y: f64,
        tolerance: f64,
        scratch: &mut Vec<QuadPoint>,
    ) -> Option<QuadPoint> {
        scratch.clear();
        self.find_into(&Extent::around(x, y, tolerance), scratch);
        let mut best: Option<QuadPoint> = None;
        let mut best_sq = tolerance * tolerance;
        for p in scratch.iter() {
            let d = p.distance_sq(x, y);
            if d < best_sq {
                best = Some(*p);
                best_sq = d;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(no: usize, x: f64, y: f64) -> QuadPoint {
        QuadPoint::new(NodeId::new(no).unwrap(), x, y)
    }

    fn unit_tree() -> QuadTree {
        QuadTree::new(Extent::new(0.0, 1.0, 0.0, 1.0))
    }

    #[test]
    fn rejects_points_outside_extent() {
        let mut tree = unit_tree();
        assert!(!tree.add(pt(1, 1.5, 0.5)));
        assert!(!tree.add(pt(1, 0.5, -0.1)));
        assert!(tree.is_empty());
        assert!(tree.add(pt(1, 1.0, 1.0)));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn rejects_exact_duplicates() {
        let mut tree = unit_tree();
        assert!(tree.add(pt(1, 0.25, 0.25)));
        assert!(!tree.add(pt(2, 0.25, 0.25)));
        assert!(tree.add(pt(3, 0.25, 0.25 + 1e-15)));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn splits_after_capacity_is_exceeded() {
        let mut tree = unit_tree();
        for i in 0..MAX_POINTS_PER_NODE {
            assert!(tree.add(pt(i + 1, 0.05 + 0.01 * i as f64, 0.1)));
        }
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.depth(), 0);

        assert!(tree.add(pt(11, 0.9, 0.9)));
        assert_eq!(tree.node_count(), 5);
        assert!(tree.depth() >= 1);
        assert_eq!(tree.len(), 11);

        let all = tree.find(&tree.extent());
        assert_eq!(all.len(), 11);
    }

    #[test]
    fn clustered_points_split_recursively() {
        let mut tree = unit_tree();
        for i in 0..11 {
            tree.add(pt(i + 1, 0.01 + 0.001 * i as f64, 0.01));
        }
        // All points fall into the SW quadrant, which must split again.
        assert!(tree.depth() >= 2);
        assert_eq!(tree.find(&Extent::new(0.0, 0.1, 0.0, 0.1)).len(), 11);
    }

    #[test]
    fn split_line_points_reside_in_several_quadrants() {
        let mut tree = unit_tree();
        // The centre point sits on both split lines once the root splits.
        tree.add(pt(1, 0.5, 0.5));
        for i in 0..10 {
            tree.add(pt(i + 2, 0.1 + 0.01 * i as f64, 0.2));
        }
        assert_eq!(tree.len(), 11);
        let hits = tree.find(&Extent::around(0.5, 0.5, 0.01));
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|p| p.no.get() == 1));
    }

    #[test]
    fn find_prunes_and_filters() {
        let mut tree = unit_tree();
        let mut no = 0;
        for i in 0..10 {
            for j in 0..10 {
                no += 1;
                tree.add(pt(no, 0.05 + 0.1 * i as f64, 0.05 + 0.1 * j as f64));
            }
        }
        let window = Extent::new(0.0, 0.2, 0.0, 0.2);
        let mut hits: Vec<usize> = tree.find(&window).iter().map(|p| p.no.get()).collect();
        hits.sort_unstable();
        hits.dedup();
        assert_eq!(hits, vec![1, 2, 11, 12]);
        assert!(tree.find(&Extent::new(2.0, 3.0, 2.0, 3.0)).is_empty());
    }

    #[test]
    fn nearest_within_is_strict() {
        let mut tree = unit_tree();
        tree.add(pt(1, 0.5, 0.5));
        tree.add(pt(2, 0.5, 0.7));
        let mut scratch = Vec::new();
        let hit = tree.nearest_within(0.5, 0.58, 0.1, &mut scratch).unwrap();
        assert_eq!(hit.no.get(), 1);
        // exactly at the tolerance: no match
        assert!(tree.nearest_within(0.5, 0.25, 0.25, &mut scratch).is_none());
    }
}
