//! Storage boundary for family documents
//!
//! The store is an opaque key-document collaborator: one document per family,
//! addressed by family id, replaced whole on every write. Services depend on
//! the trait so tests can point them at a scratch directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::Family;
use crate::infrastructure::error::{StoreError, StoreResult};

/// Key-document storage for family aggregates.
///
/// `save` is a whole-document replace; concurrent writers are last-write-wins
/// at the document level. No partial-node persistence exists.
pub trait FamilyStore: Send + Sync {
    /// Load a family by id. `Ok(None)` when no such document exists.
    fn load(&self, id: &str) -> StoreResult<Option<Family>>;

    /// Replace the family document atomically.
    fn save(&self, family: &Family) -> StoreResult<()>;

    /// Remove the family document. Missing documents are not an error.
    fn delete(&self, id: &str) -> StoreResult<()>;

    /// All stored families, in unspecified order.
    fn list(&self) -> StoreResult<Vec<Family>>;
}

/// Directory-backed store: one `<family-id>.json` per family.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| StoreError::io(format!("create store dir {}", dir.display()), e))?;
        Ok(Self { dir })
    }

    fn document_path(&self, id: &str) -> StoreResult<PathBuf> {
        // Ids are uuids generated internally; reject anything path-like.
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    fn read_document(path: &Path, id: &str) -> StoreResult<Family> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::io(format!("read family document {}", path.display()), e))?;
        serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
            id: id.to_string(),
            source,
        })
    }
}

impl FamilyStore for JsonFileStore {
    fn load(&self, id: &str) -> StoreResult<Option<Family>> {
        let path = self.document_path(id)?;
        if !path.is_file() {
            return Ok(None);
        }
        debug!("load: {}", path.display());
        Self::read_document(&path, id).map(Some)
    }

    fn save(&self, family: &Family) -> StoreResult<()> {
        let path = self.document_path(&family.id)?;
        let content = serde_json::to_vec_pretty(family).map_err(|source| StoreError::Malformed {
            id: family.id.clone(),
            source,
        })?;

        // Write-then-rename keeps the replace atomic on the same filesystem.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|e| StoreError::io(format!("create temp file in {}", self.dir.display()), e))?;
        tmp.write_all(&content)
            .map_err(|e| StoreError::io(format!("write family document {}", family.id), e))?;
        tmp.persist(&path)
            .map_err(|e| StoreError::io(format!("replace family document {}", path.display()), e.error))?;

        debug!("save: {}", path.display());
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let path = self.document_path(id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(
                format!("delete family document {}", path.display()),
                e,
            )),
        }
    }

    fn list(&self) -> StoreResult<Vec<Family>> {
        let mut families = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if path.extension().map(|ext| ext == "json") != Some(true) {
                continue;
            }

            let id = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();

            match Self::read_document(path, &id) {
                Ok(family) => families.push(family),
                Err(e) => {
                    // A foreign or corrupt file must not take the listing down.
                    warn!("skipping unreadable document {}: {}", path.display(), e);
                }
            }
        }

        debug!("list: found {} families", families.len());
        Ok(families)
    }
}
