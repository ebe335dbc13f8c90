//! Line interaction tables for a wavelength window of the spectrum.
//!
//! Packets are selected either by the wavelength they escaped with or by the
//! wavelength they had when their last line absorbed them. The selection is
//! grouped by the absorbing species, and each species is broken down into
//! absorb/emit transition pairs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tardis_result::{Line, LineInteraction, SimulationResult};

use crate::error::ViewerError;

/// Which wavelength places a packet inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Wavelength of the escaping packet.
    PacketNu,
    /// Wavelength at the last line absorption.
    LineInNu,
}

impl FilterMode {
    pub const ALL: [FilterMode; 2] = [FilterMode::PacketNu, FilterMode::LineInNu];

    pub fn description(&self) -> &'static str {
        match self {
            Self::PacketNu => "filtered by frequency of packet",
            Self::LineInNu => "filtered by frequency of line interaction",
        }
    }

    fn wavelength(&self, interaction: &LineInteraction) -> f64 {
        match self {
            Self::PacketNu => interaction.packet_wavelength,
            Self::LineInNu => interaction.line_in_wavelength,
        }
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "packet_nu" => Ok(Self::PacketNu),
            "line_in_nu" => Ok(Self::LineInNu),
            other => Err(format!(
                "unknown filter mode '{}' (expected packet_nu or line_in_nu)",
                other
            )),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PacketNu => write!(f, "packet_nu"),
            Self::LineInNu => write!(f, "line_in_nu"),
        }
    }
}

/// Packets that went through one absorb/emit line pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionRow {
    pub label: String,
    pub count: usize,
}

/// One absorbing species and its transitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesRow {
    pub atomic_number: u32,
    pub ion_number: u32,
    pub label: String,
    /// Share of all selected packets.
    pub fraction: f64,
    /// Header of the transition table, e.g. `Num. pkts 12`.
    pub packets_label: String,
    pub transitions: Vec<TransitionRow>,
}

/// Species and transition tables for one filter mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineInteractionTable {
    pub mode: FilterMode,
    pub description: &'static str,
    /// Selected packets.
    pub packets: usize,
    /// Sorted by atomic number, then ion number.
    pub species: Vec<SpeciesRow>,
}

impl LineInteractionTable {
    pub(crate) fn new(result: &SimulationResult, start: f64, end: f64, mode: FilterMode) -> Result<Self, ViewerError> {
        check_window(start, end)?;
        if result.last_line_interactions.is_empty() {
            return Err(ViewerError::NoLineInteractions);
        }

        let selected: Vec<&LineInteraction> = result
            .last_line_interactions
            .iter()
            .filter(|i| {
                let wavelength = mode.wavelength(i);
                wavelength >= start && wavelength < end
            })
            .collect();

        let mut by_species: BTreeMap<(u32, u32), Vec<&LineInteraction>> = BTreeMap::new();
        for &interaction in &selected {
            by_species
                .entry(interaction.line_in.species())
                .or_default()
                .push(interaction);
        }

        let total = selected.len();
        let species = by_species
            .into_iter()
            .map(|((z, ion), group)| SpeciesRow {
                atomic_number: z,
                ion_number: ion,
                label: format!("Z = {}: Ion {}", z, ion),
                fraction: group.len() as f64 / total as f64,
                packets_label: format!("Num. pkts {}", group.len()),
                transitions: transitions(&group),
            })
            .collect();

        Ok(Self {
            mode,
            description: mode.description(),
            packets: total,
            species,
        })
    }

    /// Species row by atomic and ion number.
    pub fn species(&self, z: u32, ion: u32) -> Option<&SpeciesRow> {
        self.species
            .iter()
            .find(|s| s.atomic_number == z && s.ion_number == ion)
    }
}

/// Both tables for a wavelength window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineInfo {
    pub title: String,
    /// Angstrom.
    pub wavelength_start: f64,
    pub wavelength_end: f64,
    pub tables: Vec<LineInteractionTable>,
}

impl LineInfo {
    pub(crate) fn new(result: &SimulationResult, start: f64, end: f64) -> Result<Self, ViewerError> {
        let tables = FilterMode::ALL
            .iter()
            .map(|&mode| LineInteractionTable::new(result, start, end, mode))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            title: format!("Line Interaction: {:.2} - {:.2} (A)", start, end),
            wavelength_start: start,
            wavelength_end: end,
            tables,
        })
    }

    pub fn table(&self, mode: FilterMode) -> Option<&LineInteractionTable> {
        self.tables.iter().find(|t| t.mode == mode)
    }
}

fn check_window(start: f64, end: f64) -> Result<(), ViewerError> {
    if start.is_finite() && end.is_finite() && start < end {
        Ok(())
    } else {
        Err(ViewerError::InvalidWindow { start, end })
    }
}

/// Count packets per (absorbing line, emitting line), ordered by line ids.
fn transitions(group: &[&LineInteraction]) -> Vec<TransitionRow> {
    let mut counts: BTreeMap<(u64, u64), (&Line, &Line, usize)> = BTreeMap::new();
    for interaction in group {
        let key = (interaction.line_in.line_id, interaction.line_out.line_id);
        counts
            .entry(key)
            .or_insert((&interaction.line_in, &interaction.line_out, 0))
            .2 += 1;
    }

    counts
        .into_values()
        .map(|(line_in, line_out, count)| TransitionRow {
            label: transition_label(line_in, line_out),
            count,
        })
        .collect()
}

fn transition_label(line_in: &Line, line_out: &Line) -> String {
    format!(
        "exc. {}-{} ({:.2} A) de-exc. {}-{} ({:.2} A)",
        line_in.level_number_lower,
        line_in.level_number_upper,
        line_in.wavelength,
        line_out.level_number_upper,
        line_out.level_number_lower,
        line_out.wavelength
    )
}
