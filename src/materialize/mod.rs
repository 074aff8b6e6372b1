//! Trace materialization.
//!
//! Turns each selected [`SolvedPath`] into a persistable trace candidate:
//! consecutive-point edges, a resolved trace identifier and an optional
//! connectivity key. Identifier resolution prefers a direct two-pin pairing
//! through the injected pin-to-port lookup; anything else falls back to a
//! synthetic identifier derived from the solver's pairing id.
//!
//! Connectivity side effects (marking directly-paired ports as connected)
//! are returned as a pure update list; [`apply_port_updates`] commits them
//! as a separate step so they stay observable independent of store wiring.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::geometry::{edges_from_points, Edge};
use crate::solver::SolvedPath;
use crate::store::{PortStore, StoreError};

/// Prefix of identifiers synthesized from the solver's pairing id.
pub const SOLVER_TRACE_ID_PREFIX: &str = "solver_";

/// Prefix of identifiers derived from a resolved port pair. Distinct from
/// [`SOLVER_TRACE_ID_PREFIX`] so the two namespaces cannot collide.
pub const PORT_PAIR_TRACE_ID_PREFIX: &str = "pair_";

/// A trace ready for topology computation and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceCandidate {
    pub trace_id: String,
    pub edges: Vec<Edge>,
    pub connectivity_key: Option<String>,
}

/// One pending port-state change produced by identifier resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortUpdate {
    pub port_id: String,
    pub connected: bool,
}

/// Result of materializing one run's selected paths.
#[derive(Debug, Clone, Default)]
pub struct MaterializeOutcome {
    pub candidates: Vec<TraceCandidate>,
    pub port_updates: Vec<PortUpdate>,
    /// Paths dropped for having fewer than two points.
    pub skipped: usize,
}

/// Materialize the selected paths in selector order.
///
/// Paths with fewer than two points are skipped with a diagnostic and never
/// produce a candidate. Lookup misses are not errors: they route the path to
/// the synthetic-identifier branch. The net-to-key lookup is attempted in
/// both branches, so a direct pairing whose key lookup misses gets no second
/// answer but also loses nothing.
pub fn materialize_paths(
    paths: &[&SolvedPath],
    pin_to_port: &HashMap<String, String>,
    net_to_key: &HashMap<String, String>,
    diagnostics: &dyn Diagnostics,
) -> MaterializeOutcome {
    let mut outcome = MaterializeOutcome::default();

    for path in paths {
        if path.points.len() < 2 {
            diagnostics.debug(&format!(
                "skipping path {} because it has less than 2 points",
                path.pins.join(",")
            ));
            outcome.skipped += 1;
            continue;
        }

        let edges = edges_from_points(&path.points);

        let mut trace_id: Option<String> = None;
        let mut connectivity_key: Option<String> = None;

        if path.pins.len() == 2 {
            let port_a = pin_to_port.get(&path.pins[0]);
            let port_b = pin_to_port.get(&path.pins[1]);
            if let (Some(port_a), Some(port_b)) = (port_a, port_b) {
                for port_id in [port_a, port_b] {
                    outcome.port_updates.push(PortUpdate {
                        port_id: port_id.clone(),
                        connected: true,
                    });
                }
                trace_id = Some(format!(
                    "{PORT_PAIR_TRACE_ID_PREFIX}{port_a}_{port_b}"
                ));
                connectivity_key = net_to_key.get(&path.net_id).cloned();
            }
        }

        let trace_id = trace_id
            .unwrap_or_else(|| format!("{SOLVER_TRACE_ID_PREFIX}{}", path.pair_id));
        let connectivity_key =
            connectivity_key.or_else(|| net_to_key.get(&path.net_id).cloned());

        outcome.candidates.push(TraceCandidate {
            trace_id,
            edges,
            connectivity_key,
        });
    }

    outcome
}

/// Commit pending port updates against the port store.
///
/// Updates for ports the store does not know are skipped, matching the
/// upstream behavior of only updating existing records. Returns the number
/// of updates applied; store failures abort and propagate.
pub fn apply_port_updates<S: PortStore>(
    updates: &[PortUpdate],
    store: &mut S,
) -> Result<usize, StoreError> {
    let mut applied = 0;
    for update in updates {
        if store.port(&update.port_id).is_some() {
            if update.connected {
                store.mark_connected(&update.port_id)?;
            }
            applied += 1;
        }
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::test_support::CapturingDiagnostics;
    use crate::diagnostics::NoopDiagnostics;
    use crate::geometry::Point;
    use crate::solver::SolvedPath;
    use crate::store::{MemoryRecordStore, SchematicPort};

    fn lookups() -> (HashMap<String, String>, HashMap<String, String>) {
        let pin_to_port = HashMap::from([
            ("pin1".to_string(), "port_a".to_string()),
            ("pin2".to_string(), "port_b".to_string()),
        ]);
        let net_to_key = HashMap::from([("N1".to_string(), "K1".to_string())]);
        (pin_to_port, net_to_key)
    }

    fn two_point_path() -> SolvedPath {
        SolvedPath::new("msp0", "N1")
            .with_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)])
            .with_pins(vec!["pin1".to_string(), "pin2".to_string()])
    }

    #[test]
    fn test_short_path_is_skipped_with_diagnostic() {
        let (pin_to_port, net_to_key) = lookups();
        let path = SolvedPath::new("msp0", "N1").with_points(vec![Point::new(0.0, 0.0)]);
        let diagnostics = CapturingDiagnostics::default();

        let outcome =
            materialize_paths(&[&path], &pin_to_port, &net_to_key, &diagnostics);

        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.skipped, 1);
        let messages = diagnostics.messages.borrow();
        assert!(messages[0].contains("less than 2 points"));
    }

    #[test]
    fn test_direct_resolution_marks_ports_and_resolves_key() {
        let (pin_to_port, net_to_key) = lookups();
        let path = two_point_path();

        let outcome =
            materialize_paths(&[&path], &pin_to_port, &net_to_key, &NoopDiagnostics);

        assert_eq!(outcome.candidates.len(), 1);
        let candidate = &outcome.candidates[0];
        assert_eq!(candidate.trace_id, "pair_port_a_port_b");
        assert_eq!(candidate.connectivity_key.as_deref(), Some("K1"));
        assert_eq!(outcome.port_updates.len(), 2);
        assert!(outcome
            .port_updates
            .iter()
            .all(|u| u.connected && (u.port_id == "port_a" || u.port_id == "port_b")));
    }

    #[test]
    fn test_unresolvable_pins_fall_back_to_synthetic_id() {
        let (_, net_to_key) = lookups();
        let path = two_point_path();
        let empty = HashMap::new();

        let outcome = materialize_paths(&[&path], &empty, &net_to_key, &NoopDiagnostics);

        let candidate = &outcome.candidates[0];
        assert_eq!(candidate.trace_id, "solver_msp0");
        // Key still resolves through the fallback attempt.
        assert_eq!(candidate.connectivity_key.as_deref(), Some("K1"));
        assert!(outcome.port_updates.is_empty());
    }

    #[test]
    fn test_single_pin_path_uses_synthetic_id() {
        let (pin_to_port, net_to_key) = lookups();
        let path = SolvedPath::new("msp7", "N1")
            .with_points(vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0)])
            .with_pins(vec!["pin1".to_string()]);

        let outcome =
            materialize_paths(&[&path], &pin_to_port, &net_to_key, &NoopDiagnostics);

        assert_eq!(outcome.candidates[0].trace_id, "solver_msp7");
    }

    #[test]
    fn test_unknown_net_leaves_key_absent() {
        let (pin_to_port, _) = lookups();
        let path = two_point_path();
        let empty = HashMap::new();

        let outcome = materialize_paths(&[&path], &pin_to_port, &empty, &NoopDiagnostics);

        assert!(outcome.candidates[0].connectivity_key.is_none());
    }

    #[test]
    fn test_edge_chain_matches_points() {
        let (pin_to_port, net_to_key) = lookups();
        let path = SolvedPath::new("msp0", "N1").with_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]);

        let outcome =
            materialize_paths(&[&path], &pin_to_port, &net_to_key, &NoopDiagnostics);

        let edges = &outcome.candidates[0].edges;
        assert_eq!(edges.len(), 2);
        assert!(edges[0].to.coincides(&edges[1].from));
    }

    #[test]
    fn test_apply_port_updates_skips_unknown_ports() {
        let mut store = MemoryRecordStore::new();
        store.add_port(SchematicPort::new("port_a"));
        let updates = vec![
            PortUpdate {
                port_id: "port_a".to_string(),
                connected: true,
            },
            PortUpdate {
                port_id: "ghost".to_string(),
                connected: true,
            },
        ];

        let applied = apply_port_updates(&updates, &mut store).unwrap();

        assert_eq!(applied, 1);
        assert!(store.port("port_a").unwrap().is_connected);
        assert!(store.port("ghost").is_none());
    }
}
