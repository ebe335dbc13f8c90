//! TARDIS result types
//!
//! Read-only view of a finished simulation: convergence state, per-shell
//! radiation field, spectra, plasma populations and the last line
//! interactions of escaping packets. Nothing here mutates a
//! result once it is loaded.

pub mod error;
pub mod lines;
pub mod plasma;
pub mod result;
pub mod spectrum;

pub use error::ResultError;
pub use lines::{Line, LineInteraction};
pub use plasma::ShellPlasma;
pub use result::{ShellField, SimulationResult};
pub use spectrum::Spectrum;
