//! JSON library snapshot format.
//!
//! ```json
//! {
//!   "default_library": "L1",
//!   "items": [{"id": "I1", "library_id": "L1", "title": "...", "item_type": "book"}],
//!   "collections": [{"id": "C1", "library_id": "L1", "name": "Reading", "item_ids": ["I1"]}],
//!   "notes": [],
//!   "pages": {"I1": ["page one text", "page two text"]}
//! }
//! ```

use scholar_domain::{Collection, LibraryItem, Note};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read library snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid library snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("library snapshot is inconsistent: {0}")]
    Inconsistent(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    /// Library used when a request does not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_library: Option<String>,
    #[serde(default)]
    pub items: Vec<LibraryItem>,
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub notes: Vec<Note>,
    /// Extracted page text per item, used by the OCR simulator
    #[serde(default)]
    pub pages: BTreeMap<String, Vec<String>>,
}

impl LibrarySnapshot {
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: Self =
            serde_json::from_str(&content).map_err(|source| SnapshotError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        snapshot.check()?;
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let io = |source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io)
    }

    /// Every collection member must exist and share the collection's library.
    pub fn check(&self) -> Result<(), SnapshotError> {
        let items: BTreeMap<&str, &LibraryItem> =
            self.items.iter().map(|i| (i.id.as_str(), i)).collect();
        for collection in &self.collections {
            for member in &collection.item_ids {
                match items.get(member.as_str()) {
                    None => {
                        return Err(SnapshotError::Inconsistent(format!(
                            "collection '{}' lists unknown item '{}'",
                            collection.id, member
                        )));
                    }
                    Some(item) if item.library_id != collection.library_id => {
                        return Err(SnapshotError::Inconsistent(format!(
                            "collection '{}' ({}) lists item '{}' from library {}",
                            collection.id, collection.library_id, member, item.library_id
                        )));
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}
