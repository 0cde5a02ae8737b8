//! Filesystem registration: single script files and directory scans.
//!
//! The loader derives logical names from file paths, reads source text off
//! disk, and hands both to [`ScriptCache::register_script`]. It owns no
//! state of its own.

use std::collections::BTreeSet;
use std::path::Path;

use shacache_core::{naming, validate, ValidationError};

use crate::cache::ScriptCache;
use crate::error::CacheError;
use crate::store::ScriptStore;

impl<S: ScriptStore> ScriptCache<S> {
    /// Register the script file at `path`.
    ///
    /// The logical name is the file's base name with its extension
    /// stripped (`scripts/incr.lua` registers as `incr`). The file is read
    /// before any remote call, so an unreadable path fails with
    /// [`CacheError::FileReadFailed`] without touching the store.
    pub async fn register_file(&self, path: impl AsRef<Path>) -> Result<String, CacheError> {
        let path = path.as_ref();
        let name = naming::script_name_from_path(path)
            .ok_or(CacheError::InvalidArgument(ValidationError::EmptyName))?;

        let source = tokio::fs::read_to_string(path).await.map_err(|source| {
            CacheError::FileReadFailed {
                path: path.display().to_string(),
                source,
            }
        })?;

        self.register_script(&name, &source).await
    }

    /// Register every script file directly inside `dir` (non-recursive).
    ///
    /// A script file is one whose extension matches the configured script
    /// extension; everything else is skipped. The scan stops at the first
    /// failure and returns it -- files registered before the failure stay
    /// registered, there is no rollback. On success returns the full set
    /// of names registered in the cache, not only the ones this scan
    /// added.
    pub async fn register_all_scripts(
        &self,
        dir: impl AsRef<Path>,
    ) -> Result<BTreeSet<String>, CacheError> {
        let dir = dir.as_ref();
        validate::validate_scripts_dir(dir)?;

        let read_failed = |source| CacheError::FileReadFailed {
            path: dir.display().to_string(),
            source,
        };

        let mut registered = 0usize;
        let mut entries = tokio::fs::read_dir(dir).await.map_err(read_failed)?;
        while let Some(entry) = entries.next_entry().await.map_err(read_failed)? {
            if !entry.file_type().await.map_err(read_failed)?.is_file() {
                continue;
            }
            let path = entry.path();
            if !self.has_script_extension(&path) {
                continue;
            }
            self.register_file(&path).await?;
            registered += 1;
        }

        tracing::info!(
            dir = %dir.display(),
            count = registered,
            "Registered scripts from directory",
        );
        Ok(self.registered_names().await)
    }

    /// `true` when `path` carries the configured script extension.
    fn has_script_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.script_extension())
    }
}
