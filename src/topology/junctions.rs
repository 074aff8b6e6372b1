//! Junction pass.

use std::collections::{BTreeMap, HashMap};

use crate::geometry::Point;
use crate::materialize::TraceCandidate;

use super::crossings::CrossingMap;

/// Final junction points per trace identifier, ordered along the owning
/// trace. Every candidate has an entry, empty when it meets nothing.
pub type JunctionMap = BTreeMap<String, Vec<Point>>;

/// Derive per-trace junction points from the crossing results.
///
/// A junction marks where a trace visually meets another trace's geometry.
/// Crossings against a trace with the same connectivity key are filtered
/// again here, even though the crossing pass already excludes such pairs:
/// the two passes may see keys resolved at different times, and a same-net
/// junction must never survive. Points are deduplicated and ordered by
/// occurrence along the trace (edge index, then position along the edge).
pub fn compute_junctions(
    candidates: &[TraceCandidate],
    crossings: &CrossingMap,
) -> JunctionMap {
    let key_by_id: HashMap<&str, Option<&str>> = candidates
        .iter()
        .map(|c| (c.trace_id.as_str(), c.connectivity_key.as_deref()))
        .collect();

    let mut map: JunctionMap = BTreeMap::new();

    for candidate in candidates {
        let mut points: Vec<Point> = Vec::new();

        if let Some(found) = crossings.get(&candidate.trace_id) {
            for crossing in found {
                let other_key = key_by_id
                    .get(crossing.other_trace_id.as_str())
                    .copied()
                    .flatten();
                let same_net = matches!(
                    (candidate.connectivity_key.as_deref(), other_key),
                    (Some(own), Some(other)) if own == other
                );
                if same_net {
                    continue;
                }
                if !points.iter().any(|q| q.coincides(&crossing.at)) {
                    points.push(crossing.at);
                }
            }
        }

        points.sort_by(|a, b| {
            let ka = position_along(candidate, a);
            let kb = position_along(candidate, b);
            ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
        });

        map.insert(candidate.trace_id.clone(), points);
    }

    map
}

/// Sort key of a point along a trace: index of the first edge containing it
/// plus the parametric offset on that edge. Points not on any edge sort last.
fn position_along(candidate: &TraceCandidate, p: &Point) -> f64 {
    for (index, edge) in candidate.edges.iter().enumerate() {
        if let Some(t) = edge.locate(p) {
            return index as f64 + t;
        }
    }
    f64::MAX
}
