//! Merge several 2D meshes into one.
//!
//! The meshes are expected to share one or more boundaries, with the nodes on a
//! shared boundary coinciding within [`MergeOptions::tolerance`].
//!
//! # Algorithm
//! Meshes are added in order. For every node of the mesh being added:
//! 1. its *effective* code is 0 if its code is in the mesh's strip set, else
//!    the original code;
//! 2. if it is a merge candidate (original code non-zero, or
//!    [`MergeOptions::merge_all_nodes`]), the quad-tree is searched for the
//!    closest already merged node at a distance strictly below the tolerance.
//!    On a hit the existing node is reused, and its code is promoted from 0 to
//!    the effective code (codes are never downgraded);
//! 3. otherwise the node is appended with its effective code.
//!
//! Nodes appended while adding a mesh are inserted into the quad-tree only once
//! the whole mesh has been processed, so a mesh is never stitched to itself.
//! Elements are then copied with node numbers translated to the merged mesh.
//!
//! [`merge_meshes`] runs the complete pipeline: configuration checks, global
//! extent, merging, clearing codes of nodes that ended up interior
//! ([`remove_internal_boundary_codes`]) and validation.
//!
//! # Example
//! ```rust
//! use mesh_merge::algs::merge::{merge_meshes, MergeOptions, SourceMesh};
//! use mesh_merge::topology::mesh::MeshBuilder;
//!
//! let left = MeshBuilder::new()
//!     .nodes(&[0.0, 1.0, 1.0, 0.0], &[0.0, 0.0, 1.0, 1.0], &[0.0; 4], &[1; 4])
//!     .elements(vec![vec![1, 2, 3, 4]])
//!     .build()?;
//! let right = MeshBuilder::new()
//!     .nodes(&[1.0, 2.0, 2.0, 1.0], &[0.0, 0.0, 1.0, 1.0], &[0.0; 4], &[1; 4])
//!     .elements(vec![vec![1, 2, 3, 4]])
//!     .build()?;
//!
//! let outcome = merge_meshes(
//!     &[SourceMesh::new(left), SourceMesh::new(right)],
//!     &MergeOptions::default().with_tolerance(1e-6),
//! )?;
//! assert_eq!(outcome.mesh.node_count(), 6);
//! assert_eq!(outcome.node_merge_count, 2);
//! assert!(outcome.report.is_valid());
//! # Ok::<(), mesh_merge::mesh_error::MeshMergeError>(())
//! ```

use crate::algs::boundary::remove_internal_boundary_codes;
use crate::algs::statistics::FaceCodeTable;
use crate::geometry::extent::Extent;
use crate::geometry::quad_tree::{QuadPoint, QuadTree};
use crate::mesh_error::MeshMergeError;
use crate::topology::mesh::{Element, INTERNAL_CODE, Mesh, Node};
use crate::topology::node_id::NodeId;
use crate::topology::validation::{ValidationReport, validate_mesh};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default node merge tolerance, in source-coordinate units.
pub const DEFAULT_TOLERANCE: f64 = 1e-2;

/// Configuration for a merge run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Distance below which two nodes are the same node. Should be smaller than
    /// the shortest face in any of the meshes.
    /// Default: 0.01
    pub tolerance: f64,

    /// Also try to merge nodes without boundary code.
    /// Default: false
    pub merge_all_nodes: bool,

    /// Validate every source mesh as well, for comparative face statistics.
    /// Default: true
    pub source_statistics: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            merge_all_nodes: false,
            source_statistics: true,
        }
    }
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the node merge tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder-style setter for merging nodes without boundary code.
    pub fn with_merge_all_nodes(mut self, merge_all_nodes: bool) -> Self {
        self.merge_all_nodes = merge_all_nodes;
        self
    }

    /// Builder-style setter for source mesh validation.
    pub fn with_source_statistics(mut self, source_statistics: bool) -> Self {
        self.source_statistics = source_statistics;
        self
    }

    /// Reject a tolerance that is not finite and strictly positive.
    pub fn validate(&self) -> Result<(), MeshMergeError> {
        if self.tolerance.is_finite() && self.tolerance > 0.0 {
            Ok(())
        } else {
            Err(MeshMergeError::InvalidTolerance(self.tolerance))
        }
    }
}

/// A mesh to merge, with the boundary codes to clear before matching.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceMesh {
    pub mesh: Mesh,
    pub codes_to_strip: BTreeSet<i32>,
}

impl SourceMesh {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            codes_to_strip: BTreeSet::new(),
        }
    }

    /// Clear these boundary codes (set them to 0) when the mesh is added.
    pub fn strip_codes<I: IntoIterator<Item = i32>>(mut self, codes: I) -> Self {
        self.codes_to_strip.extend(codes);
        self
    }
}

/// Pair meshes with per-mesh strip sets.
///
/// # Errors
/// [`MeshMergeError::StripListMismatch`] unless both lists have equal length.
pub fn sources_with_codes(
    meshes: Vec<Mesh>,
    codes: Vec<BTreeSet<i32>>,
) -> Result<Vec<SourceMesh>, MeshMergeError> {
    if meshes.len() != codes.len() {
        return Err(MeshMergeError::StripListMismatch {
            meshes: meshes.len(),
            codes: codes.len(),
        });
    }
    Ok(meshes
        .into_iter()
        .zip(codes)
        .map(|(mesh, codes_to_strip)| SourceMesh {
            mesh,
            codes_to_strip,
        })
        .collect())
}

/// Incremental merge state: merged nodes and elements plus the node index.
#[derive(Debug)]
pub struct MeshMerger {
    options: MergeOptions,
    tree: QuadTree,
    nodes: Vec<Node>,
    elements: Vec<Element>,
    node_merge_count: usize,
    merged_per_mesh: Vec<usize>,
    projection: Option<String>,
    quantity: Option<String>,
    scratch: Vec<QuadPoint>,
}

impl MeshMerger {
    /// Create a merger whose node index covers `extent` grown by the tolerance.
    ///
    /// Every node of every mesh added later must lie inside `extent`; nodes
    /// outside it are kept in the merged mesh but can never be merged with.
    pub fn new(extent: Extent, options: MergeOptions) -> Result<Self, MeshMergeError> {
        options.validate()?;
        let covered = extent.grow(options.tolerance);
        log::debug!(
            "node index extent: x [{}, {}], y [{}, {}]",
            covered.x_min,
            covered.x_max,
            covered.y_min,
            covered.y_max
        );
        Ok(Self {
            tree: QuadTree::new(covered),
            options,
            nodes: Vec::new(),
            elements: Vec::new(),
            node_merge_count: 0,
            merged_per_mesh: Vec::new(),
            projection: None,
            quantity: None,
            scratch: Vec::new(),
        })
    }

    #[inline]
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Total number of nodes merged so far.
    #[inline]
    pub fn node_merge_count(&self) -> usize {
        self.node_merge_count
    }

    /// Nodes merged while adding each mesh, in order.
    #[inline]
    pub fn merged_per_mesh(&self) -> &[usize] {
        &self.merged_per_mesh
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Add `mesh` to the merged mesh. Returns the number of its nodes that
    /// were merged into existing nodes.
    pub fn add_mesh(&mut self, mesh: &Mesh, codes_to_strip: &BTreeSet<i32>) -> usize {
        if self.projection.is_none() {
            self.projection = Some(mesh.projection().to_owned());
            self.quantity = mesh.quantity().map(str::to_owned);
        }

        let tolerance = self.options.tolerance;
        let first_new = self.nodes.len();
        let mut merged = 0;
        // merged node number for each node of `mesh`
        let mut renumber: Vec<NodeId> = Vec::with_capacity(mesh.node_count());

        for node in mesh.nodes() {
            let code = if codes_to_strip.contains(&node.code) {
                INTERNAL_CODE
            } else {
                node.code
            };

            if self.options.merge_all_nodes || node.is_boundary() {
                let hit = self
                    .tree
                    .nearest_within(node.x, node.y, tolerance, &mut self.scratch);
                if let Some(existing) = hit {
                    let target = &mut self.nodes[existing.no.index()];
                    if target.code == INTERNAL_CODE && code != INTERNAL_CODE {
                        target.code = code;
                    }
                    renumber.push(existing.no);
                    merged += 1;
                    continue;
                }
            }

            self.nodes.push(Node { code, ..*node });
            renumber.push(NodeId::from_index(self.nodes.len() - 1));
        }

        for (offset, node) in self.nodes[first_new..].iter().enumerate() {
            let no = NodeId::from_index(first_new + offset);
            if !self.tree.add(QuadPoint::new(no, node.x, node.y)) {
                log::debug!("node {no} at ({}, {}) was not indexed", node.x, node.y);
            }
        }

        self.elements.extend(mesh.elements().iter().map(|element| Element {
            cell_type: element.cell_type,
            nodes: element.nodes.iter().map(|n| renumber[n.index()]).collect(),
        }));

        self.node_merge_count += merged;
        self.merged_per_mesh.push(merged);
        merged
    }

    /// Build the merged mesh. Projection and quantity come from the first mesh
    /// added.
    pub fn finish(self) -> Result<Mesh, MeshMergeError> {
        log::debug!(
            "merged mesh: {} nodes, {} elements, {} nodes in index",
            self.nodes.len(),
            self.elements.len(),
            self.tree.len()
        );
        Mesh::try_new(
            self.nodes,
            self.elements,
            self.projection.unwrap_or_default(),
            self.quantity,
        )
    }
}

/// Result of [`merge_meshes`].
#[derive(Clone, Debug)]
pub struct MergeOutcome {
    /// The merged mesh, with codes of interior nodes cleared.
    pub mesh: Mesh,
    /// Total number of nodes merged.
    pub node_merge_count: usize,
    /// Nodes merged in per source mesh; the first entry is always 0.
    pub merged_per_mesh: Vec<usize>,
    /// Validation of the merged mesh.
    pub report: ValidationReport,
    /// Validation of each source mesh; empty unless
    /// [`MergeOptions::source_statistics`] is set.
    pub source_reports: Vec<ValidationReport>,
}

impl MergeOutcome {
    /// Face-code counts per source mesh alongside the merged mesh.
    pub fn statistics(&self) -> FaceCodeTable {
        let mut table = FaceCodeTable::new(self.source_reports.len());
        for (i, report) in self.source_reports.iter().enumerate() {
            table.record_source(i, report);
        }
        table.record_merged(&self.report);
        table
    }
}

/// Check configuration before any merging starts.
fn check_sources(sources: &[SourceMesh], options: &MergeOptions) -> Result<(), MeshMergeError> {
    if sources.len() < 2 {
        return Err(MeshMergeError::TooFewMeshes {
            found: sources.len(),
        });
    }
    options.validate()?;
    for source in sources {
        source.mesh.check_codes()?;
    }
    Ok(())
}

/// Merge `sources` in order into a single validated mesh.
///
/// # Errors
/// Configuration errors only: fewer than two meshes, a bad tolerance, or
/// negative boundary codes. Structural defects of the result are returned in
/// [`MergeOutcome::report`].
pub fn merge_meshes(
    sources: &[SourceMesh],
    options: &MergeOptions,
) -> Result<MergeOutcome, MeshMergeError> {
    check_sources(sources, options)?;

    let mut extent = Extent::empty();
    for source in sources {
        extent.include(&source.mesh.extent());
    }

    let mut merger = MeshMerger::new(extent, options.clone())?;
    for (i, source) in sources.iter().enumerate() {
        let merged = merger.add_mesh(&source.mesh, &source.codes_to_strip);
        if i > 0 {
            log::info!("Mesh {}, number of nodes merged in: {merged}", i + 1);
        }
    }
    log::info!(
        "Total number of nodes merged in: {}",
        merger.node_merge_count()
    );

    let node_merge_count = merger.node_merge_count();
    let merged_per_mesh = merger.merged_per_mesh().to_vec();
    let mut mesh = merger.finish()?;
    remove_internal_boundary_codes(&mut mesh);

    let report = validate_mesh(&mesh);
    report.log_defects();

    let source_reports = if options.source_statistics {
        sources.iter().map(|s| validate_mesh(&s.mesh)).collect()
    } else {
        Vec::new()
    };

    Ok(MergeOutcome {
        mesh,
        node_merge_count,
        merged_per_mesh,
        report,
        source_reports,
    })
}
