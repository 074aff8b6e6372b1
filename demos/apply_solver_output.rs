//! End-to-end demo: reconcile a small solver run and print the stored traces.

use std::collections::HashMap;

use schemtrace::geometry::Point;
use schemtrace::prelude::*;
use schemtrace::solver::SolvedPath;
use schemtrace::store::SchematicPort;
use schemtrace::TracingDiagnostics;

fn main() -> Result<(), SchemTraceError> {
    let mut store = MemoryRecordStore::new();
    store.add_port(SchematicPort::new("port_a"));
    store.add_port(SchematicPort::new("port_b"));

    // One direct two-pin connection and one unrelated trace crossing it.
    let direct = SolvedPath::new("msp0", "N1")
        .with_points(vec![Point::new(0.0, 5.0), Point::new(10.0, 5.0)])
        .with_pins(vec!["pin1".to_string(), "pin2".to_string()]);
    let crossing = SolvedPath::new("msp1", "N2")
        .with_points(vec![Point::new(5.0, 0.0), Point::new(5.0, 10.0)]);
    let output = SolverOutput::new().with_solved_paths(vec![direct, crossing]);

    let lookups = ResolutionMaps {
        pin_to_port: HashMap::from([
            ("pin1".to_string(), "port_a".to_string()),
            ("pin2".to_string(), "port_b".to_string()),
        ]),
        net_to_key: HashMap::from([
            ("N1".to_string(), "K1".to_string()),
            ("N2".to_string(), "K2".to_string()),
        ]),
    };

    let report = TracePipeline::apply_with(
        &output,
        &lookups,
        &mut store,
        &PipelineOptions::default(),
        &TracingDiagnostics,
    )?;

    println!(
        "source: {:?}, selected: {}, skipped: {}, persisted: {}, ports marked: {}",
        report.source, report.selected, report.skipped, report.persisted, report.ports_marked
    );
    println!();

    for stored in store.traces() {
        println!("trace {} ({})", stored.record.trace_id, stored.schematic_trace_id);
        println!("  key: {:?}", stored.record.connectivity_key);
        println!("  edges: {}", stored.record.edges.len());
        for junction in &stored.record.junctions {
            println!("  junction at ({}, {})", junction.x, junction.y);
        }
    }

    Ok(())
}
