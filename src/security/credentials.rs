//! Credential store: the set of digests accepted by the shutdown endpoint.
//!
//! Loaded once at startup from a newline-delimited file and never mutated
//! afterwards, so it is shared between handlers behind an `Arc` without
//! locking.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading the credential file.
///
/// Both are startup-fatal: the server refuses to start without its
/// credential set.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The file could not be opened.
    #[error("cannot open credential file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was opened but reading a line failed.
    #[error("cannot read credential file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable set of accepted digests.
#[derive(Debug, Clone, Default)]
pub struct CredentialSet {
    digests: HashSet<String>,
}

impl CredentialSet {
    /// Load the credential file at `path`.
    ///
    /// Each non-empty line is one digest. Surrounding whitespace is trimmed
    /// and duplicate lines collapse.
    pub fn load(path: &Path) -> Result<Self, CredentialError> {
        let file = File::open(path).map_err(|source| CredentialError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lines = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| CredentialError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            lines.push(line);
        }

        let set = Self::from_lines(lines);
        if set.is_empty() {
            tracing::warn!(path = %path.display(), "Credential file contains no digests");
        } else {
            tracing::info!(path = %path.display(), count = set.len(), "Credentials loaded");
        }
        Ok(set)
    }

    /// Build a set from already-read lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let digests = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Self { digests }
    }

    /// Membership test on an encoded digest.
    pub fn contains(&self, digest: &str) -> bool {
        self.digests.contains(digest)
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}
