//! SchemTrace - schematic trace reconciliation and topology library
//!
//! This library consumes the geometric output of an upstream trace-routing
//! solver pipeline and turns it into persisted, topologically-annotated
//! trace records: it picks the authoritative path set among up to three
//! solver outputs, rebuilds which logical connection each path belongs to,
//! computes where traces cross and join (respecting net connectivity so
//! same-net traces never appear to cross), and writes the result to a
//! record store.
//!
//! # Quick Start
//!
//! ```
//! use schemtrace::prelude::*;
//! use schemtrace::geometry::Point;
//! use schemtrace::solver::SolvedPath;
//!
//! let path = SolvedPath::new("msp0", "N1")
//!     .with_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
//! let output = SolverOutput::new().with_solved_paths(vec![path]);
//!
//! let mut store = MemoryRecordStore::new();
//! let report = TracePipeline::apply(&output, &ResolutionMaps::default(), &mut store)
//!     .expect("in-memory store does not fail");
//!
//! assert_eq!(report.persisted, 1);
//! assert!(store.trace("solver_msp0").is_some());
//! ```
//!
//! # Pipeline stages
//!
//! - **Source selection** ([`solver`]): corrected map, then label-avoidance
//!   map, then the raw path list; exactly one source per run.
//! - **Materialization** ([`materialize`]): edges, identifier and
//!   connectivity-key resolution, pending port updates.
//! - **Topology** ([`topology`]): pairwise crossings and per-trace
//!   junctions, suppressed between traces of the same net.
//! - **Persistence** ([`store`]): one record per finalized trace.

pub mod core;
pub mod diagnostics;
pub mod geometry;
pub mod materialize;
pub mod solver;
pub mod store;
pub mod topology;

// Re-export main types
pub use crate::core::{
    ApplyReport, PipelineOptions, ResolutionMaps, SchemTraceError, TracePipeline,
};
pub use diagnostics::{Diagnostics, NoopDiagnostics, TracingDiagnostics};
pub use geometry::{Edge, Point};
pub use materialize::{TraceCandidate, PORT_PAIR_TRACE_ID_PREFIX, SOLVER_TRACE_ID_PREFIX};
pub use solver::{LabelAvoidanceOutput, PathSource, SolvedPath, SolverOutput};
pub use store::{
    MemoryRecordStore, PortStore, SchematicPort, StoreError, TraceRecord, TraceStore,
};
pub use topology::{Crossing, CrossingMap, JunctionMap};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ApplyReport, MemoryRecordStore, PathSource, PipelineOptions, ResolutionMaps,
        SchemTraceError, SolverOutput, TracePipeline, TraceRecord,
    };
}
