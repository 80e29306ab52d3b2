//! Comparative face-code statistics across source meshes and the merged mesh.
//!
//! A [`FaceCodeTable`] has one row per face code and one column per source
//! mesh plus a final column for the merged mesh. Its `Display` renders the
//! fixed-width table printed after a merge:
//!
//! ```text
//! --------------------- Statistics of faces ---------------------
//! FaceCode  | mesh  1   mesh  2   |  total | new mesh
//!        0  |       0         0   |      0 |        2
//!        1  |       4         4   |      8 |        6
//!    total  |       4         4   |      8 |        8
//! ---------------------------------------------------------------
//! ```
//!
//! Row 0 counts internal faces once per direction.

use crate::topology::validation::ValidationReport;
use std::collections::BTreeMap;
use std::fmt;

/// Face counts per code, per mesh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceCodeTable {
    mesh_count: usize,
    /// `mesh_count` source columns followed by the merged column.
    rows: BTreeMap<i32, Vec<usize>>,
}

impl FaceCodeTable {
    /// Empty table for `mesh_count` source meshes.
    pub fn new(mesh_count: usize) -> Self {
        Self {
            mesh_count,
            rows: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn mesh_count(&self) -> usize {
        self.mesh_count
    }

    fn record(&mut self, column: usize, report: &ValidationReport) {
        let width = self.mesh_count + 1;
        for (&code, &count) in &report.face_codes {
            self.rows.entry(code).or_insert_with(|| vec![0; width])[column] += count;
        }
    }

    /// Add the counts of source mesh `index` (0-based).
    ///
    /// Indices beyond the table's mesh count are ignored.
    pub fn record_source(&mut self, index: usize, report: &ValidationReport) {
        if index < self.mesh_count {
            self.record(index, report);
        } else {
            log::warn!(
                "face statistics: source index {index} out of range for {} meshes",
                self.mesh_count
            );
        }
    }

    /// Add the counts of the merged mesh.
    pub fn record_merged(&mut self, report: &ValidationReport) {
        self.record(self.mesh_count, report);
    }

    /// Face codes present in any column, ascending.
    pub fn codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.rows.keys().copied()
    }

    /// Count of `code` in source mesh `index`.
    pub fn source_count(&self, code: i32, index: usize) -> usize {
        if index >= self.mesh_count {
            return 0;
        }
        self.rows.get(&code).map_or(0, |row| row[index])
    }

    /// Count of `code` in the merged mesh.
    pub fn merged_count(&self, code: i32) -> usize {
        self.rows.get(&code).map_or(0, |row| row[self.mesh_count])
    }

    /// Sum of `code` over all source meshes.
    pub fn total(&self, code: i32) -> usize {
        self.rows
            .get(&code)
            .map_or(0, |row| row[..self.mesh_count].iter().sum())
    }

    /// Per-column sums: source columns, then the source total, then merged.
    pub fn column_totals(&self) -> Vec<usize> {
        let mut totals = vec![0; self.mesh_count + 2];
        for row in self.rows.values() {
            for (i, &count) in row[..self.mesh_count].iter().enumerate() {
                totals[i] += count;
            }
            totals[self.mesh_count] += row[..self.mesh_count].iter().sum::<usize>();
            totals[self.mesh_count + 1] += row[self.mesh_count];
        }
        totals
    }
}

impl fmt::Display for FaceCodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(21);
        writeln!(f, "{rule} Statistics of faces {rule}")?;
        write!(f, "FaceCode  |")?;
        for i in 0..self.mesh_count {
            write!(f, " mesh {:2}  ", i + 1)?;
        }
        writeln!(f, " |  total | new mesh")?;

        for (code, row) in &self.rows {
            write!(f, "    {code:4}  |")?;
            for count in &row[..self.mesh_count] {
                write!(f, " {count:7}  ")?;
            }
            let total: usize = row[..self.mesh_count].iter().sum();
            writeln!(f, " |{total:7} |  {:7}", row[self.mesh_count])?;
        }

        let totals = self.column_totals();
        write!(f, "   total  |")?;
        for count in &totals[..self.mesh_count] {
            write!(f, " {count:7}  ")?;
        }
        writeln!(
            f,
            " |{:7} |  {:7}",
            totals[self.mesh_count],
            totals[self.mesh_count + 1]
        )?;
        writeln!(f, "{}", "-".repeat(63))
    }
}
