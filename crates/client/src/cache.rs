//! The script cache orchestrator.
//!
//! [`ScriptCache`] sits between callers and a [`ScriptStore`], consulting
//! a [`ScriptRegistry`] before every remote load so that each named script
//! is transmitted at most once per cache lifetime. One cache instance
//! represents one remote connection's worth of cached state and is safe to
//! share across tasks behind an `Arc`.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use shacache_core::{validate, ScriptRegistry};

use crate::error::CacheError;
use crate::store::ScriptStore;

/// Tunables for a [`ScriptCache`].
pub struct CacheConfig {
    /// File extension (without the dot) that marks a script file during
    /// directory scans.
    pub script_extension: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            script_extension: "lua".to_string(),
        }
    }
}

/// Client-side cache of scripts loaded into a remote store.
///
/// Registration binds a caller-chosen name to the content identifier the
/// store returns and performs the remote load at most once per name;
/// invocation resolves the name locally and executes by identifier. The
/// registry only grows: there is no unregister and no eviction. A caller
/// that flushes the remote store's script set out of band invalidates this
/// cache and must create a new one.
pub struct ScriptCache<S> {
    store: S,
    config: CacheConfig,
    registry: RwLock<ScriptRegistry>,
    /// Per-name single-flight gates for in-progress registrations.
    inflight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: ScriptStore> ScriptCache<S> {
    /// Create a cache with default configuration around `store`.
    pub fn new(store: S) -> Self {
        Self::with_config(store, CacheConfig::default())
    }

    /// Create a cache with explicit configuration.
    pub fn with_config(store: S, config: CacheConfig) -> Self {
        Self {
            store,
            config,
            registry: RwLock::new(ScriptRegistry::new()),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Register `source` under `name`, loading it into the remote store if
    /// this cache has not loaded that name before.
    ///
    /// Returns the content identifier bound to `name`. A name that is
    /// already registered returns its existing identifier without a remote
    /// call, and any new source text is ignored. Concurrent registrations
    /// of the same name collapse into a single remote load; losers of the
    /// race receive the winner's identifier. On failure the registry is
    /// unchanged and the name stays unregistered.
    pub async fn register_script(&self, name: &str, source: &str) -> Result<String, CacheError> {
        validate::validate_script_name(name)?;
        validate::validate_script_source(name, source)?;

        // Fast path: already registered, no remote call.
        if let Some(id) = self.resolve_registered(name).await {
            tracing::debug!(name = %name, content_id = %id, "Script already registered");
            return Ok(id);
        }

        let gate = self.registration_gate(name).await;
        let result = {
            let _guard = gate.lock().await;

            // Re-check: another task may have registered while we waited.
            match self.resolve_registered(name).await {
                Some(id) => {
                    tracing::debug!(
                        name = %name,
                        content_id = %id,
                        "Script registered by concurrent caller",
                    );
                    Ok(id)
                }
                None => self.load_and_record(name, source).await,
            }
        };
        self.release_gate(name, &gate).await;

        result
    }

    /// Invoke the script registered under `name` with positional `args`.
    ///
    /// `args` may be empty; the store still receives an explicit
    /// zero-argument invocation. Fails with [`CacheError::UnknownScript`]
    /// before any remote call when `name` was never registered.
    pub async fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, CacheError> {
        let content_id = self
            .resolve_registered(name)
            .await
            .ok_or_else(|| CacheError::UnknownScript(name.to_owned()))?;

        tracing::debug!(
            name = %name,
            content_id = %content_id,
            arg_count = args.len(),
            "Invoking script",
        );

        self.store
            .invoke_by_content_id(&content_id, args)
            .await
            .map_err(CacheError::RemoteInvokeFailed)
    }

    /// All names registered in this cache, sorted.
    pub async fn registered_names(&self) -> BTreeSet<String> {
        self.registry.read().await.names()
    }

    /// Content identifier bound to `name`, if registered.
    pub async fn content_id_for(&self, name: &str) -> Option<String> {
        self.resolve_registered(name).await
    }

    /// Number of registered scripts.
    pub async fn script_count(&self) -> usize {
        self.registry.read().await.len()
    }

    /// The configured script file extension.
    pub(crate) fn script_extension(&self) -> &str {
        &self.config.script_extension
    }

    // ---- private helpers ----

    async fn resolve_registered(&self, name: &str) -> Option<String> {
        self.registry.read().await.resolve(name).map(str::to_owned)
    }

    /// Load `source` remotely and record the resulting binding.
    ///
    /// Only called while holding the per-name gate, so at most one load is
    /// in flight per name.
    async fn load_and_record(&self, name: &str, source: &str) -> Result<String, CacheError> {
        let content_id = self
            .store
            .load_script(source)
            .await
            .map_err(CacheError::RemoteLoadFailed)?;

        self.registry.write().await.record_loaded(name, &content_id);

        tracing::info!(
            name = %name,
            content_id = %content_id,
            "Script loaded into remote store",
        );
        Ok(content_id)
    }

    /// Fetch or create the single-flight gate for `name`.
    async fn registration_gate(&self, name: &str) -> Arc<Mutex<()>> {
        let mut inflight = self.inflight.lock().await;
        inflight.entry(name.to_owned()).or_default().clone()
    }

    /// Drop the gate entry for `name` once no other task is waiting on it.
    async fn release_gate(&self, name: &str, gate: &Arc<Mutex<()>>) {
        let mut inflight = self.inflight.lock().await;
        if let Some(entry) = inflight.get(name) {
            // Cloning a gate requires the map lock, which we hold, so the
            // count is stable here: 2 means the map's reference plus ours.
            if Arc::ptr_eq(entry, gate) && Arc::strong_count(entry) == 2 {
                inflight.remove(name);
            }
        }
    }
}
