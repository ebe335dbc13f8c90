//! Shell graph, shell wedges and the shell table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tardis_result::SimulationResult;

use crate::error::ViewerError;

/// Property plotted against shell number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphProperty {
    TRads,
    Ws,
}

impl GraphProperty {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TRads => "Rad. temp",
            Self::Ws => "W",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::TRads => "K",
            Self::Ws => "",
        }
    }

    fn values<'a>(&self, result: &'a SimulationResult) -> &'a [f64] {
        match self {
            Self::TRads => &result.t_rads,
            Self::Ws => &result.ws,
        }
    }
}

impl FromStr for GraphProperty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "t_rads" => Ok(Self::TRads),
            "ws" => Ok(Self::Ws),
            other => Err(format!("unknown graph property '{}' (expected t_rads or ws)", other)),
        }
    }
}

impl fmt::Display for GraphProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TRads => write!(f, "t_rads"),
            Self::Ws => write!(f, "ws"),
        }
    }
}

/// One shell property over all shells, with a colour-map position per shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellSeries {
    pub property: GraphProperty,
    pub label: &'static str,
    pub unit: &'static str,
    pub values: Vec<f64>,
    pub min: f64,
    pub max: f64,
    /// `(value - min) / (max - min)`, all zero for a flat series.
    pub colour_positions: Vec<f64>,
}

impl ShellSeries {
    pub(crate) fn new(property: GraphProperty, result: &SimulationResult) -> Self {
        let values = property.values(result).to_vec();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        let colour_positions = values
            .iter()
            .map(|v| if span > 0.0 { (v - min) / span } else { 0.0 })
            .collect();

        Self {
            property,
            label: property.label(),
            unit: property.unit(),
            values,
            min,
            max,
            colour_positions,
        }
    }
}

/// Annulus of one shell in the shell view, in scaled units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShellWedge {
    pub shell: usize,
    pub r_inner: f64,
    pub r_outer: f64,
}

/// All shell wedges plus the scale they were drawn with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellWedges {
    pub normalizing_factor: f64,
    /// Axis extent: the outermost radius, scaled.
    pub extent: f64,
    pub wedges: Vec<ShellWedge>,
}

impl ShellWedges {
    /// Radii are multiplied by `scale * (r_outer[last] - r_inner[0]) / r_inner[0]`.
    pub(crate) fn new(result: &SimulationResult, scale: f64) -> Result<Self, ViewerError> {
        let (Some(&first_inner), Some(&last_outer)) = (result.r_inner.first(), result.r_outer.last()) else {
            return Ok(Self {
                normalizing_factor: 0.0,
                extent: 0.0,
                wedges: Vec::new(),
            });
        };
        if first_inner == 0.0 {
            return Err(ViewerError::ZeroInnerRadius);
        }

        let normalizing_factor = scale * (last_outer - first_inner) / first_inner;
        let wedges = result
            .r_inner
            .iter()
            .zip(&result.r_outer)
            .enumerate()
            .map(|(shell, (inner, outer))| ShellWedge {
                shell,
                r_inner: inner * normalizing_factor,
                r_outer: outer * normalizing_factor,
            })
            .collect();

        Ok(Self {
            normalizing_factor,
            extent: last_outer * normalizing_factor,
            wedges,
        })
    }
}

/// Row of the shell table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShellRow {
    pub shell: usize,
    pub t_rad: f64,
    pub w: f64,
}

pub(crate) fn shell_rows(result: &SimulationResult) -> Vec<ShellRow> {
    result
        .t_rads
        .iter()
        .zip(&result.ws)
        .enumerate()
        .map(|(shell, (&t_rad, &w))| ShellRow { shell, t_rad, w })
        .collect()
}
