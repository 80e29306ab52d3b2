//! Mesh I/O seams.
//!
//! File formats are handled outside this crate. Readers and writers plug in
//! through [`MeshReader`] and [`MeshWriter`]; [`merge_files`] loads every
//! [`SourceSpec`] through a reader and runs the merge. [`InMemoryMeshStore`]
//! implements both traits over a map, for tests and embedding hosts.

pub mod source_spec;

pub use source_spec::SourceSpec;

use crate::algs::merge::{MergeOptions, MergeOutcome, SourceMesh, merge_meshes};
use crate::mesh_error::MeshMergeError;
use crate::topology::mesh::Mesh;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Loads a mesh from a location.
pub trait MeshReader {
    fn read_mesh(&self, path: &Path) -> Result<Mesh, MeshMergeError>;
}

/// Stores a mesh at a location.
pub trait MeshWriter {
    fn write_mesh(&mut self, path: &Path, mesh: &Mesh) -> Result<(), MeshMergeError>;
}

/// Load every spec through `reader` and merge them in order.
///
/// # Errors
/// Reader errors, or the configuration errors of [`merge_meshes`].
pub fn merge_files<R: MeshReader + ?Sized>(
    reader: &R,
    specs: &[SourceSpec],
    options: &MergeOptions,
) -> Result<MergeOutcome, MeshMergeError> {
    if specs.len() < 2 {
        return Err(MeshMergeError::TooFewMeshes { found: specs.len() });
    }
    let sources = specs
        .iter()
        .map(|spec| {
            log::debug!("reading mesh {}", spec.path.display());
            reader.read_mesh(&spec.path).map(|mesh| SourceMesh {
                mesh,
                codes_to_strip: spec.codes_to_strip.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    merge_meshes(&sources, options)
}

/// Meshes keyed by path.
///
/// Writing refuses to replace an existing entry.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMeshStore {
    meshes: BTreeMap<PathBuf, Mesh>,
}

impl InMemoryMeshStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a mesh.
    pub fn insert(&mut self, path: impl Into<PathBuf>, mesh: Mesh) -> Option<Mesh> {
        self.meshes.insert(path.into(), mesh)
    }

    pub fn get(&self, path: &Path) -> Option<&Mesh> {
        self.meshes.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.meshes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl MeshReader for InMemoryMeshStore {
    fn read_mesh(&self, path: &Path) -> Result<Mesh, MeshMergeError> {
        self.meshes
            .get(path)
            .cloned()
            .ok_or_else(|| MeshMergeError::MeshNotFound(path.to_path_buf()))
    }
}

impl MeshWriter for InMemoryMeshStore {
    fn write_mesh(&mut self, path: &Path, mesh: &Mesh) -> Result<(), MeshMergeError> {
        if self.meshes.contains_key(path) {
            return Err(MeshMergeError::OutputExists(path.to_path_buf()));
        }
        self.meshes.insert(path.to_path_buf(), mesh.clone());
        Ok(())
    }
}
