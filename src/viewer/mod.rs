//! Result viewer
//!
//! Prepares everything the rendering layer draws from a simulation result:
//! the summary text, the shell graph and shell wedges, the spectrum and the
//! per-shell abundance tables, and the line interaction tables of a
//! spectrum window. Nothing here draws.

mod lines;
mod shell_info;
mod shells;
mod spectrum;

use serde::Serialize;
use std::fmt;

use tardis_result::SimulationResult;

use crate::error::ViewerError;

pub use lines::{FilterMode, LineInfo, LineInteractionTable, SpeciesRow, TransitionRow};
pub use shell_info::{PopulationTable, ShellInfo};
pub use shells::{GraphProperty, ShellRow, ShellSeries, ShellWedge, ShellWedges};
pub use spectrum::{SpectrumKind, SpectrumSeries};

/// Scalar outputs shown next to the graphs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub iterations_requested: u32,
    pub iterations_executed: u32,
    pub converged: bool,
    /// Seconds.
    pub simulation_time: f64,
    /// Kelvin.
    pub inner_temperature: f64,
    pub packets: u64,
    pub inner_luminosity: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Iterations requested: {}", self.iterations_requested)?;
        writeln!(f, "Iterations executed:  {}", self.iterations_executed)?;
        writeln!(f, "Model converged:      {}", self.converged)?;
        writeln!(f, "Simulation time:      {} s", self.simulation_time)?;
        writeln!(f, "Inner temperature:    {} K", self.inner_temperature)?;
        writeln!(f, "Number of packets:    {}", self.packets)?;
        write!(f, "Inner luminosity:     {:e}", self.inner_luminosity)
    }
}

/// Viewer state over one result: the result plus the selected graph and spectrum.
#[derive(Debug, Clone)]
pub struct ModelViewer {
    result: SimulationResult,
    graph_property: GraphProperty,
    spectrum_kind: SpectrumKind,
}

impl ModelViewer {
    pub fn new(result: SimulationResult) -> Self {
        Self {
            result,
            graph_property: GraphProperty::TRads,
            spectrum_kind: SpectrumKind::Real,
        }
    }

    pub fn with_selection(mut self, graph_property: GraphProperty, spectrum_kind: SpectrumKind) -> Self {
        self.graph_property = graph_property;
        self.spectrum_kind = spectrum_kind;
        self
    }

    pub fn result(&self) -> &SimulationResult {
        &self.result
    }

    /// Swap in a new result, keeping the current selections.
    pub fn change_result(&mut self, result: SimulationResult) {
        self.result = result;
    }

    pub fn graph_property(&self) -> GraphProperty {
        self.graph_property
    }

    pub fn set_graph_property(&mut self, property: GraphProperty) {
        self.graph_property = property;
    }

    pub fn spectrum_kind(&self) -> SpectrumKind {
        self.spectrum_kind
    }

    pub fn set_spectrum_kind(&mut self, kind: SpectrumKind) {
        self.spectrum_kind = kind;
    }

    pub fn summary(&self) -> Summary {
        let r = &self.result;
        Summary {
            iterations_requested: r.iterations_max_requested,
            iterations_executed: r.iterations_executed,
            converged: r.converged,
            simulation_time: r.time_of_simulation,
            inner_temperature: r.t_inner,
            packets: r.current_no_of_packets,
            inner_luminosity: r.luminosity_inner,
        }
    }

    pub fn shell_series(&self, property: GraphProperty) -> ShellSeries {
        ShellSeries::new(property, &self.result)
    }

    /// Series for the currently selected property.
    pub fn current_shell_series(&self) -> ShellSeries {
        self.shell_series(self.graph_property)
    }

    pub fn shell_wedges(&self, scale: f64) -> Result<ShellWedges, ViewerError> {
        ShellWedges::new(&self.result, scale)
    }

    pub fn spectrum_series(&self, kind: SpectrumKind) -> SpectrumSeries {
        SpectrumSeries::new(kind, &self.result)
    }

    pub fn current_spectrum_series(&self) -> SpectrumSeries {
        self.spectrum_series(self.spectrum_kind)
    }

    pub fn shell_table(&self) -> Vec<ShellRow> {
        shells::shell_rows(&self.result)
    }

    pub fn shell_info(&self, shell: usize) -> Result<ShellInfo<'_>, ViewerError> {
        ShellInfo::new(&self.result, shell)
    }

    /// Line interaction tables for packets in `[start, end)` angstrom,
    /// selected by `mode`.
    pub fn line_interactions(&self, start: f64, end: f64, mode: FilterMode) -> Result<LineInteractionTable, ViewerError> {
        LineInteractionTable::new(&self.result, start, end, mode)
    }

    /// Tables for both filter modes.
    pub fn line_info(&self, start: f64, end: f64) -> Result<LineInfo, ViewerError> {
        LineInfo::new(&self.result, start, end)
    }
}
