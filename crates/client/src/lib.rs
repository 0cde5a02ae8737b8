//! Client-side script cache for scripting-capable key/value stores.
//!
//! A remote store that supports "load script text, get back a content
//! hash, invoke by hash" offers no query cheap enough to ask before every
//! execution whether a hash is already loaded. [`ScriptCache`] keeps that
//! answer locally: it binds caller-chosen names to the identifiers the
//! store returns, loads each named script at most once, and invokes by
//! name thereafter. The store itself is reached through the
//! [`ScriptStore`] trait; this crate owns no wire protocol.

pub mod cache;
pub mod error;
pub mod loader;
pub mod store;

pub use cache::{CacheConfig, ScriptCache};
pub use error::CacheError;
pub use store::{ScriptStore, StoreError};
