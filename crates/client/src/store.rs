//! The remote script store collaborator interface.
//!
//! [`ScriptStore`] abstracts the two primitives the cache needs from a
//! scripting-capable key/value store: upload script source in exchange for
//! a content-derived identifier, and execute a previously loaded script by
//! that identifier. Implementations own the wire protocol and connection
//! handling; the cache passes calls through unchanged, including any
//! timeout or cancellation behavior of the underlying futures.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

/// Errors reported by a [`ScriptStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (network, DNS, TLS, ...).
    #[error("connection error: {0}")]
    Connection(String),

    /// The store rejected the script source at load time (e.g. a syntax
    /// error).
    #[error("script rejected: {0}")]
    ScriptRejected(String),

    /// The store no longer holds the given content identifier.
    #[error("no script with content id {0}")]
    NoSuchScript(String),

    /// The script loaded but raised an error while executing.
    #[error("script execution failed: {0}")]
    Execution(String),
}

/// Remote store primitives consumed by the cache.
///
/// `load_script` must return the same identifier for identical source text
/// (the identifier is a content hash computed by the store). An empty
/// `args` slice passed to `invoke_by_content_id` is a complete
/// zero-argument invocation and must be sent as such on the wire, never
/// turned into an omitted field.
#[async_trait]
pub trait ScriptStore: Send + Sync {
    /// Upload `source` and return its content-derived identifier.
    async fn load_script(&self, source: &str) -> Result<String, StoreError>;

    /// Execute the script previously loaded under `content_id` with
    /// positional `args`.
    async fn invoke_by_content_id(
        &self,
        content_id: &str,
        args: &[Value],
    ) -> Result<Value, StoreError>;
}

/// Delegation for shared handles, so one store connection can be handed to
/// a cache while the owner keeps a reference.
#[async_trait]
impl<S: ScriptStore + ?Sized> ScriptStore for Arc<S> {
    async fn load_script(&self, source: &str) -> Result<String, StoreError> {
        (**self).load_script(source).await
    }

    async fn invoke_by_content_id(
        &self,
        content_id: &str,
        args: &[Value],
    ) -> Result<Value, StoreError> {
        (**self).invoke_by_content_id(content_id, args).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
