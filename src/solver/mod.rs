//! Output contracts of the upstream trace-routing solver pipeline.
//!
//! The solver pipeline can expose up to three shapes of geometry for one run:
//! an overlap-corrected path map, a label-overlap-avoidance result, and the
//! raw solved path list. [`select_paths`] reconciles them into the single
//! authoritative set the rest of the pipeline consumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// One candidate route geometry for one logical connection, produced by an
/// upstream solver stage. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolvedPath {
    /// Ordered path points; fewer than two means the path is unusable.
    pub points: Vec<Point>,

    /// Participating pin identifiers (at most two).
    pub pins: Vec<String>,

    /// Set by the solver when exactly two pins are connected directly.
    pub paired_pin_id: Option<String>,

    /// Logical-net identifier this connection belongs to.
    pub net_id: String,

    /// Solver-assigned pairing identifier, unique within one run. Used as
    /// the fallback key when pin resolution does not yield an identifier.
    pub pair_id: String,
}

impl SolvedPath {
    pub fn new(pair_id: impl Into<String>, net_id: impl Into<String>) -> Self {
        Self {
            points: Vec::new(),
            pins: Vec::new(),
            paired_pin_id: None,
            net_id: net_id.into(),
            pair_id: pair_id.into(),
        }
    }

    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }

    pub fn with_pins(mut self, pins: Vec<String>) -> Self {
        self.pins = pins;
        self
    }

    pub fn with_paired_pin(mut self, pin_id: impl Into<String>) -> Self {
        self.paired_pin_id = Some(pin_id.into());
        self
    }
}

/// Result of the label-overlap-avoidance solver: an alternative path set
/// keyed by path identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelAvoidanceOutput {
    pub paths: BTreeMap<String, SolvedPath>,
}

impl LabelAvoidanceOutput {
    pub fn new(paths: BTreeMap<String, SolvedPath>) -> Self {
        Self { paths }
    }
}

/// The solver pipeline's intermediate results for one completed run.
///
/// All three sources are optional; a run with no connections to route
/// legitimately exposes none of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverOutput {
    /// Final corrected paths from the trace-overlap correction pass,
    /// keyed by trace identifier.
    pub corrected_paths: Option<BTreeMap<String, SolvedPath>>,

    /// Alternative path set from the label-overlap-avoidance solver.
    pub label_avoidance: Option<LabelAvoidanceOutput>,

    /// Raw solved paths from the base path-finding solver.
    pub solved_paths: Option<Vec<SolvedPath>>,
}

impl SolverOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_corrected_paths(mut self, paths: BTreeMap<String, SolvedPath>) -> Self {
        self.corrected_paths = Some(paths);
        self
    }

    pub fn with_label_avoidance(mut self, output: LabelAvoidanceOutput) -> Self {
        self.label_avoidance = Some(output);
        self
    }

    pub fn with_solved_paths(mut self, paths: Vec<SolvedPath>) -> Self {
        self.solved_paths = Some(paths);
        self
    }
}

/// Which of the three candidate sources supplied the paths for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathSource {
    /// Overlap-corrected trace map.
    Corrected,
    /// Label-overlap-avoidance path map.
    LabelAvoidance,
    /// Raw solved path list.
    Raw,
    /// No source was present; zero paths selected.
    Empty,
}

/// Pick the authoritative path set for one run.
///
/// Strict priority: corrected map, then label-avoidance map, then the raw
/// list. Exactly one source is active; sources are never merged. Map-backed
/// sources are iterated in sorted-key order so a run is deterministic.
pub fn select_paths(output: &SolverOutput) -> (PathSource, Vec<&SolvedPath>) {
    // Ordered providers; first source that is present wins. Adding a fourth
    // shape later is one more entry here.
    type Provider = fn(&SolverOutput) -> Option<(PathSource, Vec<&SolvedPath>)>;
    let providers: [Provider; 3] = [
        |o| {
            o.corrected_paths
                .as_ref()
                .map(|m| (PathSource::Corrected, m.values().collect()))
        },
        |o| {
            o.label_avoidance
                .as_ref()
                .map(|l| (PathSource::LabelAvoidance, l.paths.values().collect()))
        },
        |o| {
            o.solved_paths
                .as_ref()
                .map(|v| (PathSource::Raw, v.iter().collect()))
        },
    ];

    for provider in providers {
        if let Some(selected) = provider(output) {
            return selected;
        }
    }
    (PathSource::Empty, Vec::new())
}
