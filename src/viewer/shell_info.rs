//! Per-shell abundance tables: atoms, then ions of one atom, then levels of one ion.

use serde::Serialize;

use tardis_result::{ShellPlasma, SimulationResult};

use crate::error::ViewerError;

/// A two-column table: index (Z, ion or level number) and value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationTable {
    pub index_label: String,
    pub value_label: String,
    pub rows: Vec<(u32, f64)>,
}

/// Drill-down view of one shell's plasma state.
#[derive(Debug, Clone, Copy)]
pub struct ShellInfo<'a> {
    shell: usize,
    plasma: &'a ShellPlasma,
}

impl<'a> ShellInfo<'a> {
    pub fn new(result: &'a SimulationResult, shell: usize) -> Result<Self, ViewerError> {
        let count = result.shell_count();
        if shell >= count {
            return Err(ViewerError::ShellOutOfRange { shell, count });
        }
        let plasma = result.shell_plasma(shell).ok_or(ViewerError::NoPlasma(shell))?;
        Ok(Self { shell, plasma })
    }

    pub fn shell(&self) -> usize {
        self.shell
    }

    /// Window title; shells are numbered from one for display.
    pub fn title(&self) -> String {
        format!("Shell {} Abundances", self.shell + 1)
    }

    /// Number density per element.
    pub fn atoms(&self) -> PopulationTable {
        PopulationTable {
            index_label: "Z = ".to_string(),
            value_label: format!("Count (Shell {})", self.shell + 1),
            rows: self
                .plasma
                .number_densities
                .iter()
                .map(|(&z, &n)| (z, n))
                .collect(),
        }
    }

    /// Ion populations of element `z` as fractions of its number density.
    pub fn ions(&self, z: u32) -> Result<PopulationTable, ViewerError> {
        let density = *self
            .plasma
            .number_densities
            .get(&z)
            .ok_or(ViewerError::UnknownElement { shell: self.shell, z })?;
        let ions = self
            .plasma
            .ions(z)
            .ok_or(ViewerError::UnknownElement { shell: self.shell, z })?;
        if density == 0.0 {
            return Err(ViewerError::ZeroPopulation {
                what: format!("number density of Z = {}", z),
            });
        }

        Ok(PopulationTable {
            index_label: "Ion: ".to_string(),
            value_label: format!("Count (Z = {})", z),
            rows: ions.iter().map(|(&ion, &n)| (ion, n / density)).collect(),
        })
    }

    /// Level populations of one ion as fractions of the ion population.
    pub fn levels(&self, z: u32, ion: u32) -> Result<PopulationTable, ViewerError> {
        let unknown_ion = ViewerError::UnknownIon {
            shell: self.shell,
            z,
            ion,
        };
        let population = *self
            .plasma
            .ions(z)
            .and_then(|ions| ions.get(&ion))
            .ok_or_else(|| unknown_ion.clone())?;
        let levels = self.plasma.levels(z, ion).ok_or(unknown_ion)?;
        if population == 0.0 {
            return Err(ViewerError::ZeroPopulation {
                what: format!("population of ion {} of Z = {}", ion, z),
            });
        }

        Ok(PopulationTable {
            index_label: "Level: ".to_string(),
            value_label: format!("Count (Ion {})", ion),
            rows: levels.iter().map(|(&level, &n)| (level, n / population)).collect(),
        })
    }
}
