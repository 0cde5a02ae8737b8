//! Error taxonomy for cache operations.

use shacache_core::ValidationError;

use crate::store::StoreError;

/// Errors surfaced by [`ScriptCache`](crate::cache::ScriptCache)
/// operations.
///
/// Every failure leaves the cache in the state it was in before the call;
/// a failed load never leaves a partial registration behind. The variants
/// are distinct kinds rather than message flavors of one kind so that
/// callers can tell "never registered" (`UnknownScript`, re-registration
/// helps) apart from "registered but the remote call failed"
/// (`RemoteInvokeFailed`).
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Empty name, empty source text, or a scripts directory that does not
    /// exist.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// `invoke` was called with a name that was never registered.
    #[error("unknown script: {0}")]
    UnknownScript(String),

    /// The remote store rejected or failed the load primitive.
    #[error("remote load failed: {0}")]
    RemoteLoadFailed(#[source] StoreError),

    /// The remote store rejected or failed the invoke primitive, including
    /// the case where the store no longer holds the identifier.
    #[error("remote invoke failed: {0}")]
    RemoteInvokeFailed(#[source] StoreError),

    /// A script file could not be opened or read.
    #[error("failed to read script file {path}: {source}")]
    FileReadFailed {
        /// Path as given by the caller.
        path: String,
        #[source]
        source: std::io::Error,
    },
}
