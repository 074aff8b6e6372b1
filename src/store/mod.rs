//! Record store contracts.
//!
//! The pipeline does not own persistence: it reads and updates schematic
//! ports and inserts trace records against an externally-owned store through
//! these traits. Store failures propagate to the caller unmodified; this
//! layer performs no retries and no rollback.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::geometry::{Edge, Point};

pub use memory::MemoryRecordStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    #[error("no such port: {0}")]
    UnknownPort(String),
    #[error("insert rejected for trace {trace_id}: {reason}")]
    InsertRejected { trace_id: String, reason: String },
}

/// Logical connection point on a schematic component.
///
/// Owned by the store; this crate only reads it and flips `is_connected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchematicPort {
    pub port_id: String,
    pub is_connected: bool,
}

impl SchematicPort {
    pub fn new(port_id: impl Into<String>) -> Self {
        Self {
            port_id: port_id.into(),
            is_connected: false,
        }
    }
}

/// One finalized trace as handed to the store: identifier, edges, junction
/// points (empty when none) and the optional connectivity key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub trace_id: String,
    pub edges: Vec<Edge>,
    pub junctions: Vec<Point>,
    pub connectivity_key: Option<String>,
}

/// Read/update access to schematic ports.
pub trait PortStore {
    /// Look up a port by identifier; `None` means the store does not know it.
    fn port(&self, port_id: &str) -> Option<SchematicPort>;

    /// Set `is_connected = true` on an existing port.
    fn mark_connected(&mut self, port_id: &str) -> Result<(), StoreError>;
}

/// Insert access for finalized trace records.
pub trait TraceStore {
    /// Persist one trace record, returning the store-assigned record id.
    ///
    /// Conflict semantics for a repeated `trace_id` are the store's own;
    /// the pipeline performs no deduplication.
    fn insert_trace(&mut self, record: TraceRecord) -> Result<String, StoreError>;
}
