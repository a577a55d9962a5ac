//! Namespaced persistence for processes, analyses and assessments.
//!
//! Records are stored as JSON strings in a [`KeyValueStore`] under keys of the
//! form `{namespace}:{kind}:{id}`. Several [`AssessmentStorage`] instances with
//! different namespaces can share one backing store without seeing each other.

pub mod file;
pub mod memory;

use crate::analyzer::report::ProcessAnalysis;
use crate::error::Result;
use crate::process::{AssessmentId, Process, ProcessAssessment, ProcessId};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use file::FileStore;
pub use memory::MemoryStore;

pub const DEFAULT_NAMESPACE: &str = "leanlens";

/// Minimal string key-value backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Assessment,
    Process,
    Analysis,
}

impl RecordKind {
    fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Assessment => "assessment",
            RecordKind::Process => "process",
            RecordKind::Analysis => "analysis",
        }
    }
}

/// Typed save/load/delete of LeanLens records on top of a key-value backend.
#[derive(Debug)]
pub struct AssessmentStorage<S: KeyValueStore> {
    store: S,
    namespace: String,
}

impl<S: KeyValueStore> AssessmentStorage<S> {
    pub fn new(store: S, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn key(&self, kind: RecordKind, id: &str) -> String {
        format!("{}:{}:{}", self.namespace, kind.as_str(), id)
    }

    fn save<T: Serialize>(&mut self, kind: RecordKind, id: &str, value: &T) -> Result<()> {
        let key = self.key(kind, id);
        let json = serde_json::to_string(value)?;
        self.store.set(&key, &json)
    }

    /// Missing or undecodable records both come back as `None`.
    fn load<T: DeserializeOwned>(&self, kind: RecordKind, id: &str) -> Result<Option<T>> {
        let key = self.key(kind, id);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Ignoring unreadable record '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    fn delete(&mut self, kind: RecordKind, id: &str) -> Result<()> {
        let key = self.key(kind, id);
        self.store.remove(&key)
    }

    pub fn save_assessment(&mut self, assessment: &ProcessAssessment) -> Result<()> {
        self.save(RecordKind::Assessment, assessment.id.as_str(), assessment)
    }

    pub fn load_assessment(&self, id: &AssessmentId) -> Result<Option<ProcessAssessment>> {
        self.load(RecordKind::Assessment, id.as_str())
    }

    pub fn delete_assessment(&mut self, id: &AssessmentId) -> Result<()> {
        self.delete(RecordKind::Assessment, id.as_str())
    }

    /// Ids of every saved assessment in this namespace, sorted.
    pub fn list_assessments(&self) -> Result<Vec<AssessmentId>> {
        let prefix = format!("{}:{}:", self.namespace, RecordKind::Assessment.as_str());
        let mut ids: Vec<AssessmentId> = self
            .store
            .keys()?
            .into_iter()
            .filter_map(|k| k.strip_prefix(&prefix).map(AssessmentId::from))
            .collect();
        ids.sort();
        Ok(ids)
    }

    pub fn save_process(&mut self, process: &Process) -> Result<()> {
        self.save(RecordKind::Process, process.id.as_str(), process)
    }

    pub fn load_process(&self, id: &ProcessId) -> Result<Option<Process>> {
        self.load(RecordKind::Process, id.as_str())
    }

    pub fn delete_process(&mut self, id: &ProcessId) -> Result<()> {
        self.delete(RecordKind::Process, id.as_str())
    }

    /// Analyses are keyed by the id of the process they describe.
    pub fn save_analysis(&mut self, analysis: &ProcessAnalysis) -> Result<()> {
        self.save(RecordKind::Analysis, analysis.process_id.as_str(), analysis)
    }

    pub fn load_analysis(&self, process_id: &ProcessId) -> Result<Option<ProcessAnalysis>> {
        self.load(RecordKind::Analysis, process_id.as_str())
    }

    pub fn delete_analysis(&mut self, process_id: &ProcessId) -> Result<()> {
        self.delete(RecordKind::Analysis, process_id.as_str())
    }

    /// Remove every record in this namespace, leaving foreign keys untouched.
    /// Returns the number of removed entries.
    pub fn clear_all(&mut self) -> Result<usize> {
        let prefix = format!("{}:", self.namespace);
        let keys: Vec<String> = self
            .store
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(&prefix))
            .collect();
        for key in &keys {
            self.store.remove(key)?;
        }
        Ok(keys.len())
    }
}
