//! Derived trace topology.
//!
//! Two sequential passes over the full candidate set, both pure functions of
//! the candidates' edges and connectivity keys: the crossing pass finds
//! point intersections between traces of different nets, the junction pass
//! turns those into per-trace junction points. Traces sharing a connectivity
//! key are already electrically identical and never interact in either pass.

pub mod crossings;
pub mod junctions;

pub use crossings::{compute_crossings, Crossing, CrossingMap};
pub use junctions::{compute_junctions, JunctionMap};

use crate::materialize::TraceCandidate;

/// Whether two candidates belong to the same connectivity group.
///
/// Absent keys group with nothing, including other absent keys: two keyless
/// traces are distinct nets as far as topology is concerned.
pub(crate) fn same_connectivity(a: &TraceCandidate, b: &TraceCandidate) -> bool {
    match (&a.connectivity_key, &b.connectivity_key) {
        (Some(ka), Some(kb)) => ka == kb,
        _ => false,
    }
}
