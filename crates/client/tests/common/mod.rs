//! Shared test fixtures for the behavioral tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};
use shacache_client::store::{ScriptStore, StoreError};

/// A recorded `invoke_by_content_id` call: exactly what crossed the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedInvoke {
    pub content_id: String,
    pub args: Vec<Value>,
}

/// In-memory stand-in for a scripting-capable remote store.
///
/// Content identifiers default to SHA-256 hex digests of the source text,
/// so identical sources yield identical identifiers the way a real store's
/// content hash does. Every primitive call is recorded for assertions, and
/// failure modes can be injected per test.
#[derive(Default)]
pub struct MockScriptStore {
    load_delay: Option<Duration>,
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    /// Content id -> source text currently held by the "store".
    scripts: HashMap<String, String>,
    /// Source text of every `load_script` call, in order.
    load_calls: Vec<String>,
    /// Every `invoke_by_content_id` call, in order.
    invoke_calls: Vec<RecordedInvoke>,
    /// Source -> identifier overrides replacing the digest.
    canned_ids: HashMap<String, String>,
    /// Content id -> canned invoke result.
    canned_results: HashMap<String, Value>,
    /// Content id -> runtime error message.
    execution_errors: HashMap<String, String>,
    /// Loads whose source contains this marker are rejected.
    reject_marker: Option<String>,
    /// When set, every load fails with a connection error.
    refuse_loads: bool,
}

/// SHA-256 hex digest, the default content identifier scheme.
pub fn content_id_of(source: &str) -> String {
    let hash = Sha256::digest(source.as_bytes());
    format!("{hash:x}")
}

impl MockScriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add artificial latency to every load, to widen race windows in
    /// concurrency tests.
    pub fn with_load_delay(delay: Duration) -> Self {
        Self {
            load_delay: Some(delay),
            ..Self::default()
        }
    }

    /// Force loads of `source` to return `content_id` instead of its
    /// digest.
    pub fn stub_content_id(&self, source: &str, content_id: &str) {
        let mut state = self.state.lock().unwrap();
        state
            .canned_ids
            .insert(source.to_owned(), content_id.to_owned());
    }

    /// Canned result for invocations of `content_id` (default is `null`).
    pub fn stub_result(&self, content_id: &str, result: Value) {
        let mut state = self.state.lock().unwrap();
        state.canned_results.insert(content_id.to_owned(), result);
    }

    /// Make invocations of `content_id` fail as a script runtime error.
    pub fn stub_execution_error(&self, content_id: &str, message: &str) {
        let mut state = self.state.lock().unwrap();
        state
            .execution_errors
            .insert(content_id.to_owned(), message.to_owned());
    }

    /// Reject any load whose source text contains `marker`.
    pub fn reject_sources_containing(&self, marker: &str) {
        self.state.lock().unwrap().reject_marker = Some(marker.to_owned());
    }

    /// Toggle refusing every load with a connection error.
    pub fn set_refuse_loads(&self, refuse: bool) {
        self.state.lock().unwrap().refuse_loads = refuse;
    }

    /// Drop `content_id` from the store, simulating an out-of-band flush.
    pub fn forget(&self, content_id: &str) {
        self.state.lock().unwrap().scripts.remove(content_id);
    }

    pub fn load_call_count(&self) -> usize {
        self.state.lock().unwrap().load_calls.len()
    }

    pub fn load_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().load_calls.clone()
    }

    pub fn invoke_calls(&self) -> Vec<RecordedInvoke> {
        self.state.lock().unwrap().invoke_calls.clone()
    }
}

#[async_trait]
impl ScriptStore for MockScriptStore {
    async fn load_script(&self, source: &str) -> Result<String, StoreError> {
        if let Some(delay) = self.load_delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        state.load_calls.push(source.to_owned());

        if state.refuse_loads {
            return Err(StoreError::Connection("connection refused".to_string()));
        }
        if let Some(marker) = &state.reject_marker {
            if source.contains(marker.as_str()) {
                return Err(StoreError::ScriptRejected(format!(
                    "source contains '{marker}'"
                )));
            }
        }

        let content_id = state
            .canned_ids
            .get(source)
            .cloned()
            .unwrap_or_else(|| content_id_of(source));
        state.scripts.insert(content_id.clone(), source.to_owned());
        Ok(content_id)
    }

    async fn invoke_by_content_id(
        &self,
        content_id: &str,
        args: &[Value],
    ) -> Result<Value, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.invoke_calls.push(RecordedInvoke {
            content_id: content_id.to_owned(),
            args: args.to_vec(),
        });

        if !state.scripts.contains_key(content_id) {
            return Err(StoreError::NoSuchScript(content_id.to_owned()));
        }
        if let Some(message) = state.execution_errors.get(content_id) {
            return Err(StoreError::Execution(message.clone()));
        }

        Ok(state
            .canned_results
            .get(content_id)
            .cloned()
            .unwrap_or(Value::Null))
    }
}
