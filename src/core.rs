//! Pipeline orchestration shared by embedding applications.
//!
//! One invocation processes one completed solver run, single-threaded and
//! synchronous: select the authoritative path set, materialize candidates,
//! compute topology, persist. The caller guarantees exclusive store access
//! for the duration of the invocation; records persisted before a store
//! failure stay persisted.

use std::collections::HashMap;

use crate::diagnostics::{Diagnostics, NoopDiagnostics};
use crate::materialize::{apply_port_updates, materialize_paths};
use crate::solver::{select_paths, PathSource, SolverOutput};
use crate::store::{PortStore, StoreError, TraceRecord, TraceStore};
use crate::topology::{compute_crossings, compute_junctions};

#[derive(Debug, thiserror::Error)]
pub enum SchemTraceError {
    /// Collaborator-store failure, surfaced unmodified. The remaining batch
    /// is aborted; earlier writes are not rolled back.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Injected resolution lookups for one run.
///
/// Absence of an entry is valid: a missing pin means "not a direct
/// connection", a missing net means "no grouping known".
#[derive(Debug, Clone, Default)]
pub struct ResolutionMaps {
    /// Pin identifier to schematic port identifier.
    pub pin_to_port: HashMap<String, String>,
    /// Logical net identifier to connectivity key.
    pub net_to_key: HashMap<String, String>,
}

/// Options for one pipeline invocation.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    /// Commit the `is_connected` port updates produced by direct two-pin
    /// resolution. Disable to inspect the pending updates without touching
    /// the port store.
    pub apply_port_updates: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            apply_port_updates: true,
        }
    }
}

/// Counts for one completed invocation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApplyReport {
    /// Which candidate source supplied the paths.
    pub source: PathSource,
    /// Paths the selector handed to the materializer.
    pub selected: usize,
    /// Paths dropped for having fewer than two points.
    pub skipped: usize,
    /// Trace records written to the store.
    pub persisted: usize,
    /// Port updates committed (0 when side effects are disabled).
    pub ports_marked: usize,
}

impl ApplyReport {
    /// True when the run had nothing to do (no source or all paths skipped).
    pub fn is_empty(&self) -> bool {
        self.persisted == 0
    }
}

/// The reconciliation pipeline: solver output in, persisted traces out.
pub struct TracePipeline;

impl TracePipeline {
    /// Apply one solver run with default options and no diagnostics.
    pub fn apply<S>(
        output: &SolverOutput,
        lookups: &ResolutionMaps,
        store: &mut S,
    ) -> Result<ApplyReport, SchemTraceError>
    where
        S: PortStore + TraceStore,
    {
        Self::apply_with(
            output,
            lookups,
            store,
            &PipelineOptions::default(),
            &NoopDiagnostics,
        )
    }

    /// Apply one solver run with explicit options and diagnostic sink.
    pub fn apply_with<S>(
        output: &SolverOutput,
        lookups: &ResolutionMaps,
        store: &mut S,
        options: &PipelineOptions,
        diagnostics: &dyn Diagnostics,
    ) -> Result<ApplyReport, SchemTraceError>
    where
        S: PortStore + TraceStore,
    {
        let (source, paths) = select_paths(output);
        diagnostics.debug(&format!(
            "selected {} path(s) from source {:?}",
            paths.len(),
            source
        ));

        let outcome = materialize_paths(
            &paths,
            &lookups.pin_to_port,
            &lookups.net_to_key,
            diagnostics,
        );

        let ports_marked = if options.apply_port_updates {
            apply_port_updates(&outcome.port_updates, store)?
        } else {
            0
        };

        let crossings = compute_crossings(&outcome.candidates);
        let mut junctions = compute_junctions(&outcome.candidates, &crossings);

        diagnostics.debug(&format!(
            "applying {} trace(s) from solver output",
            outcome.candidates.len()
        ));

        let mut persisted = 0;
        for candidate in &outcome.candidates {
            let record = TraceRecord {
                trace_id: candidate.trace_id.clone(),
                edges: candidate.edges.clone(),
                junctions: junctions.remove(&candidate.trace_id).unwrap_or_default(),
                connectivity_key: candidate.connectivity_key.clone(),
            };
            store.insert_trace(record)?;
            persisted += 1;
        }

        Ok(ApplyReport {
            source,
            selected: paths.len(),
            skipped: outcome.skipped,
            persisted,
            ports_marked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::solver::SolvedPath;
    use crate::store::{MemoryRecordStore, SchematicPort};

    fn run_lookups() -> ResolutionMaps {
        ResolutionMaps {
            pin_to_port: HashMap::from([
                ("pin1".to_string(), "port_a".to_string()),
                ("pin2".to_string(), "port_b".to_string()),
            ]),
            net_to_key: HashMap::from([("N1".to_string(), "K1".to_string())]),
        }
    }

    #[test]
    fn test_empty_output_is_a_valid_run() {
        let mut store = MemoryRecordStore::new();
        let report =
            TracePipeline::apply(&SolverOutput::new(), &ResolutionMaps::default(), &mut store)
                .unwrap();
        assert_eq!(report.source, PathSource::Empty);
        assert!(report.is_empty());
        assert_eq!(store.trace_count(), 0);
    }

    #[test]
    fn test_port_side_effects_can_be_disabled() {
        let mut store = MemoryRecordStore::new();
        store.add_port(SchematicPort::new("port_a"));
        store.add_port(SchematicPort::new("port_b"));

        let path = SolvedPath::new("msp0", "N1")
            .with_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)])
            .with_pins(vec!["pin1".to_string(), "pin2".to_string()]);
        let output = SolverOutput::new().with_solved_paths(vec![path]);

        let options = PipelineOptions {
            apply_port_updates: false,
        };
        let report = TracePipeline::apply_with(
            &output,
            &run_lookups(),
            &mut store,
            &options,
            &NoopDiagnostics,
        )
        .unwrap();

        assert_eq!(report.persisted, 1);
        assert_eq!(report.ports_marked, 0);
        assert!(!store.port("port_a").unwrap().is_connected);
        assert!(!store.port("port_b").unwrap().is_connected);
    }
}
