//! `file.mesh*1,3` source specifications.
//!
//! A spec names a mesh file, optionally followed by `*` and a comma-separated
//! list of boundary codes to clear from that mesh before merging. Clearing the
//! codes of a shared boundary keeps its nodes from ending up as coded nodes in
//! the middle of the merged mesh.

use crate::mesh_error::MeshMergeError;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A mesh path plus the boundary codes to strip from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub codes_to_strip: BTreeSet<i32>,
}

impl SourceSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            codes_to_strip: BTreeSet::new(),
        }
    }
}

impl FromStr for SourceSpec {
    type Err = MeshMergeError;

    /// Parse `path` or `path*c1,c2,...`.
    ///
    /// A leading `*` belongs to the file name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, codes) = match s.find('*') {
            Some(pos) if pos > 0 => (&s[..pos], Some(&s[pos + 1..])),
            _ => (s, None),
        };
        if path.is_empty() {
            return Err(MeshMergeError::InvalidSourceSpec(s.to_owned()));
        }

        let mut spec = SourceSpec::new(path);
        if let Some(codes) = codes {
            for raw in codes.split(',') {
                let code = raw.trim().parse::<i32>().map_err(|_| {
                    MeshMergeError::InvalidSourceSpec(format!("{s}: invalid boundary code `{raw}`"))
                })?;
                spec.codes_to_strip.insert(code);
            }
        }
        Ok(spec)
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        let mut codes = self.codes_to_strip.iter();
        if let Some(first) = codes.next() {
            write!(f, "*{first}")?;
            for code in codes {
                write!(f, ",{code}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path() {
        let spec: SourceSpec = "north.mesh".parse().unwrap();
        assert_eq!(spec.path, PathBuf::from("north.mesh"));
        assert!(spec.codes_to_strip.is_empty());
    }

    #[test]
    fn path_with_codes() {
        let spec: SourceSpec = "south.mesh*3,1".parse().unwrap();
        assert_eq!(spec.path, PathBuf::from("south.mesh"));
        assert_eq!(spec.codes_to_strip, BTreeSet::from([1, 3]));
        assert_eq!(spec.to_string(), "south.mesh*1,3");
    }

    #[test]
    fn leading_star_is_part_of_name() {
        let spec: SourceSpec = "*odd.mesh".parse().unwrap();
        assert_eq!(spec.path, PathBuf::from("*odd.mesh"));
        assert!(spec.codes_to_strip.is_empty());
    }

    #[test]
    fn bad_codes_are_rejected() {
        for bad in ["a.mesh*", "a.mesh*1,x", "a.mesh*1,,2", ""] {
            assert!(
                matches!(
                    bad.parse::<SourceSpec>(),
                    Err(MeshMergeError::InvalidSourceSpec(_))
                ),
                "{bad:?} should not parse"
            );
        }
    }
}
