//! Pure domain logic for the script cache.
//!
//! Provides the name/identifier registry, script-name derivation from file
//! paths, and registration input validation. Nothing in this crate performs
//! network I/O or holds a lock; the client crate orchestrates these types
//! against a remote store.

pub mod naming;
pub mod registry;
pub mod validate;

pub use registry::ScriptRegistry;
pub use validate::ValidationError;
