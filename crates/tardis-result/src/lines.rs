//! Last line interactions of escaping packets.

use serde::{Deserialize, Serialize};

/// An atomic line transition from the atom data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Index into the atom data line list.
    pub line_id: u64,
    pub atomic_number: u32,
    pub ion_number: u32,
    pub level_number_lower: u32,
    pub level_number_upper: u32,
    /// Rest wavelength (angstrom).
    pub wavelength: f64,
}

impl Line {
    /// Atomic number and ion number.
    pub fn species(&self) -> (u32, u32) {
        (self.atomic_number, self.ion_number)
    }
}

/// The last line a packet interacted with before escaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineInteraction {
    /// Wavelength of the escaping packet (angstrom).
    pub packet_wavelength: f64,

    /// Wavelength of the packet when the line absorbed it (angstrom).
    pub line_in_wavelength: f64,

    /// Line that absorbed the packet.
    pub line_in: Line,

    /// Line that re-emitted it.
    pub line_out: Line,
}

impl LineInteraction {
    /// Absorbing and emitting line must belong to one species.
    pub fn is_consistent(&self) -> bool {
        self.line_in.species() == self.line_out.species()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(line_id: u64, ion_number: u32) -> Line {
        Line {
            line_id,
            atomic_number: 14,
            ion_number,
            level_number_lower: 7,
            level_number_upper: 9,
            wavelength: 6347.1,
        }
    }

    #[test]
    fn test_species_consistency() {
        let mut interaction = LineInteraction {
            packet_wavelength: 6100.0,
            line_in_wavelength: 6200.0,
            line_in: line(10, 1),
            line_out: line(11, 1),
        };
        assert!(interaction.is_consistent());
        assert_eq!(interaction.line_in.species(), (14, 1));

        interaction.line_out.ion_number = 2;
        assert!(!interaction.is_consistent());
    }
}
