//! Emitted spectra.

use serde::{Deserialize, Serialize};

/// A spectrum on a wavelength grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Wavelength grid (angstrom).
    pub wavelength: Vec<f64>,

    /// Luminosity density per wavelength bin. Absent when no packets escaped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub luminosity_density_lambda: Option<Vec<f64>>,
}

impl Spectrum {
    /// Luminosity density, or zeros on the wavelength grid when absent.
    pub fn luminosity_or_zeros(&self) -> Vec<f64> {
        match &self.luminosity_density_lambda {
            Some(values) => values.clone(),
            None => vec![0.0; self.wavelength.len()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_luminosity_is_zeros() {
        let spectrum = Spectrum {
            wavelength: vec![3000.0, 4000.0, 5000.0],
            luminosity_density_lambda: None,
        };
        assert_eq!(spectrum.luminosity_or_zeros(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_luminosity_passthrough() {
        let spectrum = Spectrum {
            wavelength: vec![3000.0, 4000.0],
            luminosity_density_lambda: Some(vec![1.5, 2.5]),
        };
        assert_eq!(spectrum.luminosity_or_zeros(), vec![1.5, 2.5]);
    }

    #[test]
    fn test_deserialize_without_luminosity() {
        let spectrum: Spectrum = serde_json::from_str(r#"{"wavelength": [1.0, 2.0]}"#).unwrap();
        assert!(spectrum.luminosity_density_lambda.is_none());
        assert!(!spectrum.is_empty());
    }
}
