//! In-memory reference store.
//!
//! Implements both store traits over plain maps so the pipeline can run end
//! to end without external wiring, and snapshots to JSON for handoff to
//! collaborators that consume trace records as files.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PortStore, SchematicPort, StoreError, TraceRecord, TraceStore};

/// A trace record as held by the store, with the store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTrace {
    pub schematic_trace_id: String,
    #[serde(flatten)]
    pub record: TraceRecord,
}

/// In-memory implementation of [`PortStore`] and [`TraceStore`].
///
/// Trace inserts are last-write-wins on `trace_id`; each insert gets a fresh
/// store-assigned record id.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryRecordStore {
    ports: BTreeMap<String, SchematicPort>,
    traces: BTreeMap<String, StoredTrace>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a port; replaces any existing port with the same id.
    pub fn add_port(&mut self, port: SchematicPort) {
        self.ports.insert(port.port_id.clone(), port);
    }

    /// Persisted trace for `trace_id`, if any.
    pub fn trace(&self, trace_id: &str) -> Option<&StoredTrace> {
        self.traces.get(trace_id)
    }

    /// All persisted traces, in trace-id order.
    pub fn traces(&self) -> impl Iterator<Item = &StoredTrace> {
        self.traces.values()
    }

    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }

    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Serialize the whole store to pretty JSON.
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StoreError::Unavailable(format!("snapshot failed: {e}")))
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json)
            .map_err(|e| StoreError::Unavailable(format!("snapshot parse failed: {e}")))
    }

    /// Write a JSON snapshot to `path`.
    pub fn write_snapshot(&self, path: &Path) -> Result<(), StoreError> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| StoreError::Unavailable(format!("snapshot write failed: {e}")))
    }

    /// Load a store from a JSON snapshot written by [`write_snapshot`].
    ///
    /// [`write_snapshot`]: MemoryRecordStore::write_snapshot
    pub fn read_snapshot(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Unavailable(format!("snapshot read failed: {e}")))?;
        Self::from_json(&json)
    }
}

impl PortStore for MemoryRecordStore {
    fn port(&self, port_id: &str) -> Option<SchematicPort> {
        self.ports.get(port_id).cloned()
    }

    fn mark_connected(&mut self, port_id: &str) -> Result<(), StoreError> {
        match self.ports.get_mut(port_id) {
            Some(port) => {
                port.is_connected = true;
                Ok(())
            }
            None => Err(StoreError::UnknownPort(port_id.to_string())),
        }
    }
}

impl TraceStore for MemoryRecordStore {
    fn insert_trace(&mut self, record: TraceRecord) -> Result<String, StoreError> {
        let schematic_trace_id = format!("schematic_trace_{}", Uuid::new_v4());
        self.traces.insert(
            record.trace_id.clone(),
            StoredTrace {
                schematic_trace_id: schematic_trace_id.clone(),
                record,
            },
        );
        Ok(schematic_trace_id)
    }
}
