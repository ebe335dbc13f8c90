//! The simulation result object.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ResultError;
use crate::lines::LineInteraction;
use crate::plasma::ShellPlasma;
use crate::spectrum::Spectrum;

/// Per-shell numeric arrays that can be looked up by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellField {
    /// Radiative temperature (K).
    TRads,
    /// Dilution factor.
    Ws,
    /// Inner shell boundary (cm).
    RInner,
    /// Outer shell boundary (cm).
    ROuter,
}

impl ShellField {
    pub const ALL: [ShellField; 4] = [
        ShellField::TRads,
        ShellField::Ws,
        ShellField::RInner,
        ShellField::ROuter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TRads => "t_rads",
            Self::Ws => "ws",
            Self::RInner => "r_inner",
            Self::ROuter => "r_outer",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// A converged (or not) simulation, as handed to the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Iterations the configuration asked for.
    pub iterations_max_requested: u32,

    /// Iterations actually run.
    pub iterations_executed: u32,

    /// Whether the radiation field converged.
    pub converged: bool,

    /// Wall-clock simulation time (s).
    pub time_of_simulation: f64,

    /// Inner boundary temperature (K).
    pub t_inner: f64,

    /// Packets in the last iteration.
    pub current_no_of_packets: u64,

    /// Luminosity emitted at the inner boundary (erg/s).
    pub luminosity_inner: f64,

    /// Radiative temperature per shell (K).
    pub t_rads: Vec<f64>,

    /// Dilution factor per shell.
    pub ws: Vec<f64>,

    /// Inner radius per shell (cm).
    pub r_inner: Vec<f64>,

    /// Outer radius per shell (cm).
    pub r_outer: Vec<f64>,

    /// Spectrum of real packets.
    pub spectrum: Spectrum,

    /// Spectrum of virtual packets.
    #[serde(default)]
    pub spectrum_virtual: Spectrum,

    /// Plasma state per shell. May be empty when populations were not stored.
    #[serde(default)]
    pub plasma: Vec<ShellPlasma>,

    /// Last line interaction of each escaping packet that had one.
    #[serde(default)]
    pub last_line_interactions: Vec<LineInteraction>,
}

impl SimulationResult {
    /// Load a result from a `.json`, `.yaml` or `.yml` file and validate it.
    pub fn from_path(path: &Path) -> Result<Self, ResultError> {
        let contents = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Self::from_json_str(&contents),
            "yaml" | "yml" => Self::from_yaml_str(&contents),
            other => Err(ResultError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ResultError> {
        let result: Self = serde_json::from_str(contents)?;
        result.validate()?;
        Ok(result)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ResultError> {
        let result: Self = serde_yaml::from_str(contents)?;
        result.validate()?;
        Ok(result)
    }

    /// Check that per-shell arrays agree with each other and spectra with
    /// their wavelength grids.
    pub fn validate(&self) -> Result<(), ResultError> {
        let expected = self.t_rads.len();
        if expected == 0 {
            return Err(ResultError::NoShells);
        }

        for field in ShellField::ALL {
            let got = self.shell_field(field).len();
            if got != expected {
                return Err(ResultError::ShellCountMismatch {
                    field: field.name().to_string(),
                    got,
                    expected,
                });
            }
        }

        if !self.plasma.is_empty() && self.plasma.len() != expected {
            return Err(ResultError::ShellCountMismatch {
                field: "plasma".to_string(),
                got: self.plasma.len(),
                expected,
            });
        }

        for (name, spectrum) in [("spectrum", &self.spectrum), ("spectrum_virtual", &self.spectrum_virtual)] {
            if let Some(luminosity) = &spectrum.luminosity_density_lambda {
                if luminosity.len() != spectrum.wavelength.len() {
                    return Err(ResultError::SpectrumMismatch {
                        name: name.to_string(),
                        got: luminosity.len(),
                        expected: spectrum.wavelength.len(),
                    });
                }
            }
        }

        if let Some(index) = self.last_line_interactions.iter().position(|i| !i.is_consistent()) {
            return Err(ResultError::MixedSpeciesInteraction { index });
        }

        Ok(())
    }

    pub fn shell_count(&self) -> usize {
        self.t_rads.len()
    }

    pub fn shell_field(&self, field: ShellField) -> &[f64] {
        match field {
            ShellField::TRads => &self.t_rads,
            ShellField::Ws => &self.ws,
            ShellField::RInner => &self.r_inner,
            ShellField::ROuter => &self.r_outer,
        }
    }

    /// Named lookup, e.g. `"t_rads"`.
    pub fn shell_field_by_name(&self, name: &str) -> Option<&[f64]> {
        ShellField::from_name(name).map(|f| self.shell_field(f))
    }

    pub fn shell_plasma(&self, shell: usize) -> Option<&ShellPlasma> {
        self.plasma.get(shell)
    }
}
