//! Result viewer tests
//!
//! Loading a stored result and preparing graph, spectrum and abundance data.

mod fixtures;

use tardis_gui::viewer::PopulationTable;
use tardis_gui::{FilterMode, GraphProperty, ModelViewer, SpectrumKind, ViewerError};
use tardis_result::SimulationResult;

fn viewer() -> ModelViewer {
    let result = SimulationResult::from_path(&fixtures::three_shell_result()).expect("Failed to load result");
    ModelViewer::new(result)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

#[test]
fn test_summary() {
    let summary = viewer().summary();

    assert_eq!(summary.iterations_requested, 20);
    assert_eq!(summary.iterations_executed, 14);
    assert!(summary.converged);
    assert_eq!(summary.packets, 40000);

    let text = summary.to_string();
    assert!(text.contains("Iterations executed:  14"));
    assert!(text.contains("Inner temperature:    10318.4 K"));
}

#[test]
fn test_shell_series_switch() {
    let mut viewer = viewer();
    let t_rads = viewer.current_shell_series();
    assert_eq!(t_rads.property, GraphProperty::TRads);
    assert_eq!(t_rads.colour_positions, vec![1.0, 0.5, 0.0]);

    viewer.set_graph_property(GraphProperty::Ws);
    let ws = viewer.current_shell_series();
    assert_eq!(ws.values, vec![0.42, 0.25, 0.16]);
    assert_eq!(ws.min, 0.16);
    assert_eq!(ws.max, 0.42);
    assert_eq!(ws.colour_positions[0], 1.0);
}

#[test]
fn test_shell_wedges() {
    let wedges = viewer().shell_wedges(0.2).unwrap();
    let expected_factor = 0.2 * (1.571e15 - 1.235e15) / 1.235e15;

    assert!(approx(wedges.normalizing_factor, expected_factor));
    assert_eq!(wedges.wedges.len(), 3);
    assert!(approx(wedges.wedges[0].r_inner, 1.235e15 * expected_factor));
    assert!(approx(wedges.extent, 1.571e15 * expected_factor));
}

#[test]
fn test_virtual_spectrum_without_luminosity_is_zero() {
    let mut viewer = viewer();
    let real = viewer.current_spectrum_series();
    assert_eq!(real.name, "spec_flux_angstrom");
    assert_eq!(real.peak(), Some((4000.0, 5.5e38)));
    assert_eq!(real.range(), Some((3000.0, 6000.0)));

    viewer.set_spectrum_kind(SpectrumKind::Virtual);
    let virtual_spectrum = viewer.current_spectrum_series();
    assert_eq!(virtual_spectrum.wavelength.len(), 4);
    assert_eq!(virtual_spectrum.luminosity, vec![0.0; 4]);
}

#[test]
fn test_shell_table() {
    let rows = viewer().shell_table();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].shell, 1);
    assert_eq!(rows[1].t_rad, 10400.0);
    assert_eq!(rows[1].w, 0.25);
}

#[test]
fn test_shell_info_drill_down() {
    let viewer = viewer();
    let info = viewer.shell_info(0).unwrap();
    assert_eq!(info.title(), "Shell 1 Abundances");

    let atoms = info.atoms();
    assert_eq!(atoms.value_label, "Count (Shell 1)");
    assert_eq!(atoms.rows, vec![(8, 4.0e9), (14, 1.0e9)]);

    let ions = info.ions(8).unwrap();
    assert_eq!(
        ions,
        PopulationTable {
            index_label: "Ion: ".to_string(),
            value_label: "Count (Z = 8)".to_string(),
            rows: vec![(0, 0.25), (1, 0.75)],
        }
    );

    let levels = info.levels(14, 1).unwrap();
    assert_eq!(levels.value_label, "Count (Ion 1)");
    assert_eq!(levels.rows, vec![(0, 0.8), (1, 0.2)]);
}

#[test]
fn test_shell_info_errors() {
    let viewer = viewer();

    assert_eq!(
        viewer.shell_info(3).unwrap_err(),
        ViewerError::ShellOutOfRange { shell: 3, count: 3 }
    );

    let info = viewer.shell_info(0).unwrap();
    assert_eq!(info.ions(26).unwrap_err(), ViewerError::UnknownElement { shell: 0, z: 26 });
    assert_eq!(
        info.levels(8, 0).unwrap_err(),
        ViewerError::UnknownIon { shell: 0, z: 8, ion: 0 }
    );

    let second = viewer.shell_info(1).unwrap();
    assert!(matches!(second.levels(8, 0), Err(ViewerError::ZeroPopulation { .. })));
}

#[test]
fn test_change_result_keeps_selection() {
    let mut viewer = viewer();
    viewer.set_graph_property(GraphProperty::Ws);

    let mut other = viewer.result().clone();
    other.ws = vec![0.5, 0.5, 0.5];
    viewer.change_result(other);

    let series = viewer.current_shell_series();
    assert_eq!(series.property, GraphProperty::Ws);
    assert_eq!(series.colour_positions, vec![0.0; 3]);
}

#[test]
fn test_line_interactions_by_packet_wavelength() {
    let table = viewer()
        .line_interactions(6000.0, 6400.0, FilterMode::PacketNu)
        .unwrap();

    assert_eq!(table.description, "filtered by frequency of packet");
    assert_eq!(table.packets, 4);
    let labels: Vec<&str> = table.species.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Z = 14: Ion 1", "Z = 20: Ion 1"]);
    assert_eq!(table.species[0].fraction, 0.75);
    assert_eq!(table.species[1].fraction, 0.25);

    let silicon = table.species(14, 1).unwrap();
    assert_eq!(silicon.packets_label, "Num. pkts 3");
    let rows: Vec<(&str, usize)> = silicon
        .transitions
        .iter()
        .map(|t| (t.label.as_str(), t.count))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("exc. 7-9 (6347.11 A) de-exc. 9-7 (6347.11 A)", 2),
            ("exc. 7-8 (6371.37 A) de-exc. 8-7 (6371.37 A)", 1),
        ]
    );
}

#[test]
fn test_line_interactions_by_line_wavelength() {
    let table = viewer()
        .line_interactions(6000.0, 6400.0, FilterMode::LineInNu)
        .unwrap();

    assert_eq!(table.packets, 4);
    assert_eq!(table.species.len(), 1);
    let silicon = &table.species[0];
    assert_eq!(silicon.fraction, 1.0);
    assert_eq!(silicon.transitions.len(), 3);
    assert_eq!(
        silicon.transitions[0].label,
        "exc. 7-9 (6347.11 A) de-exc. 9-4 (5041.03 A)"
    );
    assert!(table.species(20, 1).is_none());
}

#[test]
fn test_line_info_holds_both_modes() {
    let viewer = viewer();
    let info = viewer.line_info(6000.0, 6400.0).unwrap();
    assert_eq!(info.title, "Line Interaction: 6000.00 - 6400.00 (A)");
    assert_eq!(info.tables.len(), 2);
    assert_eq!(
        info.table(FilterMode::LineInNu),
        Some(&viewer.line_interactions(6000.0, 6400.0, FilterMode::LineInNu).unwrap())
    );

    let empty = viewer.line_info(1000.0, 2000.0).unwrap();
    assert!(empty.tables.iter().all(|t| t.packets == 0 && t.species.is_empty()));
}

#[test]
fn test_line_info_errors() {
    let mut viewer = viewer();
    assert_eq!(
        viewer.line_info(6400.0, 6000.0).unwrap_err(),
        ViewerError::InvalidWindow { start: 6400.0, end: 6000.0 }
    );

    let mut bare = viewer.result().clone();
    bare.last_line_interactions.clear();
    viewer.change_result(bare);
    assert_eq!(
        viewer.line_info(6000.0, 6400.0).unwrap_err(),
        ViewerError::NoLineInteractions
    );
}
