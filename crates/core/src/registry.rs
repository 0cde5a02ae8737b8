//! In-memory registry of scripts loaded into a remote store.
//!
//! [`ScriptRegistry`] tracks two facts: which logical names are bound to
//! which content identifiers, and which content identifiers are already
//! loaded on the remote store. It is a plain data structure -- it never
//! talks to the network, and callers that share one across tasks are
//! responsible for locking it.

use std::collections::{BTreeSet, HashMap, HashSet};

/// Mapping from logical script names to remote content identifiers, plus
/// the set of identifiers confirmed loaded on the remote store.
///
/// Invariant: once [`record_loaded`](Self::record_loaded) returns, the
/// identifier bound to a name is a member of the loaded set. Entries are
/// never removed; the registry grows monotonically for its lifetime.
#[derive(Debug, Default)]
pub struct ScriptRegistry {
    /// Logical name -> content identifier.
    name_to_id: HashMap<String, String>,
    /// Content identifiers confirmed loaded on the remote store.
    loaded_ids: HashSet<String>,
}

impl ScriptRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` iff `content_id` has been confirmed loaded on the remote
    /// store.
    pub fn is_loaded(&self, content_id: &str) -> bool {
        self.loaded_ids.contains(content_id)
    }

    /// Look up the content identifier bound to `name`.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.name_to_id.get(name).map(String::as_str)
    }

    /// Record that `content_id` is loaded on the remote store and bind
    /// `name` to it.
    ///
    /// Idempotent: repeating a call changes nothing. If `name` was bound to
    /// a different identifier the binding is overwritten (last write wins);
    /// the old identifier stays in the loaded set because the remote store
    /// still holds it.
    pub fn record_loaded(&mut self, name: &str, content_id: &str) {
        self.loaded_ids.insert(content_id.to_owned());
        self.name_to_id
            .insert(name.to_owned(), content_id.to_owned());
    }

    /// All registered names, sorted.
    pub fn names(&self) -> BTreeSet<String> {
        self.name_to_id.keys().cloned().collect()
    }

    /// `true` iff `name` is bound to a content identifier.
    pub fn contains_name(&self, name: &str) -> bool {
        self.name_to_id.contains_key(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.name_to_id.len()
    }

    /// `true` iff no script has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.name_to_id.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
