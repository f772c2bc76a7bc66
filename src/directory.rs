//! Directory Store: the immutable practitioner list loaded once at startup.
//!
//! Sources, first match wins:
//! 1. an explicit path (`DOCFINDER_DIRECTORY`)
//! 2. `~/DocFinder/practitioners.json` when present
//! 3. the bundled list compiled into the binary
//!
//! There is no writer: every accessor borrows from a shared `Arc<[_]>`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config;
use crate::models::PractitionerRecord;

const BUNDLED_DIRECTORY: &str = include_str!("../data/practitioners.json");

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Invalid {field} value: {value:?}")]
    InvalidEnum { field: String, value: String },

    #[error("Cannot read practitioner file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed practitioner data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Practitioner at position {0} has an empty id")]
    EmptyId(usize),

    #[error("Duplicate practitioner id: {0}")]
    DuplicateId(String),
}

/// Where the loaded directory came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorySource {
    File(PathBuf),
    Bundled,
}

impl std::fmt::Display for DirectorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bundled => write!(f, "bundled"),
        }
    }
}

/// Read-only practitioner collection. Cloning shares the same records.
#[derive(Debug, Clone)]
pub struct Directory {
    records: Arc<[PractitionerRecord]>,
    source: DirectorySource,
}

impl Directory {
    /// Parse and validate a JSON array of practitioner records.
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let records: Vec<PractitionerRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Build from already-parsed records. Ids must be non-empty and unique.
    pub fn from_records(records: Vec<PractitionerRecord>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(DirectoryError::EmptyId(index));
            }
            if !seen.insert(record.id.as_str()) {
                return Err(DirectoryError::DuplicateId(record.id.clone()));
            }
            if record.category_key().is_none() {
                tracing::warn!(
                    id = %record.id,
                    category = %record.category,
                    "Practitioner category outside the known set; only listed under All"
                );
            }
        }

        Ok(Self {
            records: records.into(),
            source: DirectorySource::Bundled,
        })
    }

    /// The list compiled into the binary.
    pub fn bundled() -> Result<Self, DirectoryError> {
        Self::from_json(BUNDLED_DIRECTORY)
    }

    /// Load from a JSON file on disk.
    pub fn from_file(path: &Path) -> Result<Self, DirectoryError> {
        let json = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut directory = Self::from_json(&json)?;
        directory.source = DirectorySource::File(path.to_path_buf());
        Ok(directory)
    }

    /// Resolve the startup directory: explicit path, override file, bundled.
    pub fn load(explicit: Option<&Path>) -> Result<Self, DirectoryError> {
        let directory = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let override_path = config::directory_override_path();
                if override_path.is_file() {
                    Self::from_file(&override_path)?
                } else {
                    Self::bundled()?
                }
            }
        };

        tracing::info!(
            source = %directory.source,
            practitioners = directory.len(),
            "Directory loaded"
        );
        Ok(directory)
    }

    pub fn records(&self) -> &[PractitionerRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&PractitionerRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> &DirectorySource {
        &self.source
    }
}
