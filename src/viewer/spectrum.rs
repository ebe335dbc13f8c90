//! Spectrum view data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tardis_result::SimulationResult;

/// Which of the two spectra to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpectrumKind {
    Real,
    Virtual,
}

impl SpectrumKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Real => "spec_flux_angstrom",
            Self::Virtual => "spec_virtual_flux_angstrom",
        }
    }
}

impl FromStr for SpectrumKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "real" => Ok(Self::Real),
            "virtual" => Ok(Self::Virtual),
            other => Err(format!("unknown spectrum '{}' (expected real or virtual)", other)),
        }
    }
}

impl fmt::Display for SpectrumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real => write!(f, "real"),
            Self::Virtual => write!(f, "virtual"),
        }
    }
}

/// Wavelength against luminosity density, ready to plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumSeries {
    pub kind: SpectrumKind,
    pub name: &'static str,
    /// Wavelength (angstrom).
    pub wavelength: Vec<f64>,
    pub luminosity: Vec<f64>,
}

impl SpectrumSeries {
    pub(crate) fn new(kind: SpectrumKind, result: &SimulationResult) -> Self {
        let spectrum = match kind {
            SpectrumKind::Real => &result.spectrum,
            SpectrumKind::Virtual => &result.spectrum_virtual,
        };
        Self {
            kind,
            name: kind.name(),
            wavelength: spectrum.wavelength.clone(),
            luminosity: spectrum.luminosity_or_zeros(),
        }
    }

    /// Wavelength range covered, if any.
    pub fn range(&self) -> Option<(f64, f64)> {
        let first = *self.wavelength.first()?;
        let last = *self.wavelength.last()?;
        Some((first.min(last), first.max(last)))
    }

    pub fn peak(&self) -> Option<(f64, f64)> {
        self.wavelength
            .iter()
            .copied()
            .zip(self.luminosity.iter().copied())
            .fold(None, |best, (w, l)| match best {
                Some((_, bl)) if bl >= l => best,
                _ => Some((w, l)),
            })
    }
}
