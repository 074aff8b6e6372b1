//! Crossing pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{segment_intersection, Point};
use crate::materialize::TraceCandidate;

use super::same_connectivity;

/// A point where one trace's edge intersects an edge of a different trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crossing {
    pub at: Point,
    pub other_trace_id: String,
}

/// Crossings discovered per trace identifier. Every candidate has an entry,
/// empty when nothing crosses it.
pub type CrossingMap = BTreeMap<String, Vec<Crossing>>;

/// Compute pairwise crossings over the full candidate set.
///
/// Every unordered pair of distinct traces is intersected edge against edge,
/// except pairs that share a connectivity key: same-net traces may overlap
/// or touch without that being a crossing. Shared-endpoint and collinear
/// tie-breaks come from [`segment_intersection`]. A pair intersecting at the
/// same point through several edge combinations (a crossing landing on a
/// polyline vertex) is counted once.
pub fn compute_crossings(candidates: &[TraceCandidate]) -> CrossingMap {
    let mut map: CrossingMap = candidates
        .iter()
        .map(|c| (c.trace_id.clone(), Vec::new()))
        .collect();

    for (i, a) in candidates.iter().enumerate() {
        for b in &candidates[i + 1..] {
            if same_connectivity(a, b) {
                continue;
            }

            let mut pair_points: Vec<Point> = Vec::new();
            for edge_a in &a.edges {
                for edge_b in &b.edges {
                    if let Some(p) = segment_intersection(edge_a, edge_b) {
                        if !pair_points.iter().any(|q| q.coincides(&p)) {
                            pair_points.push(p);
                        }
                    }
                }
            }

            for p in pair_points {
                if let Some(list) = map.get_mut(&a.trace_id) {
                    list.push(Crossing {
                        at: p,
                        other_trace_id: b.trace_id.clone(),
                    });
                }
                if let Some(list) = map.get_mut(&b.trace_id) {
                    list.push(Crossing {
                        at: p,
                        other_trace_id: a.trace_id.clone(),
                    });
                }
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{edges_from_points, Point};

    fn candidate(trace_id: &str, key: Option<&str>, points: &[(f64, f64)]) -> TraceCandidate {
        let points: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        TraceCandidate {
            trace_id: trace_id.to_string(),
            edges: edges_from_points(&points),
            connectivity_key: key.map(str::to_string),
        }
    }

    #[test]
    fn test_crossing_between_different_nets() {
        let a = candidate("a", Some("K1"), &[(0.0, 5.0), (10.0, 5.0)]);
        let b = candidate("b", Some("K2"), &[(5.0, 0.0), (5.0, 10.0)]);

        let map = compute_crossings(&[a, b]);

        assert_eq!(map["a"].len(), 1);
        assert_eq!(map["b"].len(), 1);
        assert!(map["a"][0].at.coincides(&Point::new(5.0, 5.0)));
        assert_eq!(map["a"][0].other_trace_id, "b");
        assert_eq!(map["b"][0].other_trace_id, "a");
    }

    #[test]
    fn test_same_key_pair_is_suppressed() {
        let a = candidate("a", Some("K1"), &[(0.0, 5.0), (10.0, 5.0)]);
        let b = candidate("b", Some("K1"), &[(5.0, 0.0), (5.0, 10.0)]);

        let map = compute_crossings(&[a, b]);

        assert!(map["a"].is_empty());
        assert!(map["b"].is_empty());
    }

    #[test]
    fn test_absent_keys_are_distinct() {
        let a = candidate("a", None, &[(0.0, 5.0), (10.0, 5.0)]);
        let b = candidate("b", None, &[(5.0, 0.0), (5.0, 10.0)]);

        let map = compute_crossings(&[a, b]);

        assert_eq!(map["a"].len(), 1);
        assert_eq!(map["b"].len(), 1);
    }

    #[test]
    fn test_non_crossing_traces_get_empty_entries() {
        let a = candidate("a", Some("K1"), &[(0.0, 0.0), (1.0, 0.0)]);
        let b = candidate("b", Some("K2"), &[(0.0, 5.0), (1.0, 5.0)]);

        let map = compute_crossings(&[a, b]);

        assert_eq!(map.len(), 2);
        assert!(map["a"].is_empty());
        assert!(map["b"].is_empty());
    }

    #[test]
    fn test_crossing_on_shared_vertex_counted_once() {
        // b crosses a exactly at a's bend, so both of a's edges see it.
        let a = candidate("a", Some("K1"), &[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]);
        let b = candidate("b", Some("K2"), &[(5.0, 0.0), (5.0, 10.0)]);

        let map = compute_crossings(&[a, b]);

        assert_eq!(map["a"].len(), 1);
        assert_eq!(map["b"].len(), 1);
    }

    #[test]
    fn test_multiple_crossings_reported() {
        // b weaves across a twice.
        let a = candidate("a", Some("K1"), &[(0.0, 5.0), (20.0, 5.0)]);
        let b = candidate(
            "b",
            Some("K2"),
            &[(5.0, 0.0), (5.0, 10.0), (15.0, 10.0), (15.0, 0.0)],
        );

        let map = compute_crossings(&[a, b]);

        assert_eq!(map["a"].len(), 2);
        assert_eq!(map["b"].len(), 2);
    }
}
