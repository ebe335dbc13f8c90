//! Per-shell plasma state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Atomic number.
pub type AtomicNumber = u32;

/// Ion number (0 = neutral).
pub type IonNumber = u32;

/// Level number within an ion.
pub type LevelNumber = u32;

/// Number densities and populations of one shell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShellPlasma {
    /// Number density per element.
    #[serde(default)]
    pub number_densities: BTreeMap<AtomicNumber, f64>,

    /// Ion populations per element.
    #[serde(default)]
    pub ion_populations: BTreeMap<AtomicNumber, BTreeMap<IonNumber, f64>>,

    /// Level populations per element and ion.
    #[serde(default)]
    pub level_populations: BTreeMap<AtomicNumber, BTreeMap<IonNumber, BTreeMap<LevelNumber, f64>>>,
}

impl ShellPlasma {
    pub fn elements(&self) -> impl Iterator<Item = AtomicNumber> + '_ {
        self.number_densities.keys().copied()
    }

    pub fn ions(&self, z: AtomicNumber) -> Option<&BTreeMap<IonNumber, f64>> {
        self.ion_populations.get(&z)
    }

    pub fn levels(&self, z: AtomicNumber, ion: IonNumber) -> Option<&BTreeMap<LevelNumber, f64>> {
        self.level_populations.get(&z)?.get(&ion)
    }
}
