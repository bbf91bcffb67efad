//! Configuration types for the analytic Noh boundary update.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PatchGeometry;

fn default_gamma() -> f64 {
    5.0 / 3.0
}

fn default_tiny_number() -> f64 {
    1.0e-20
}

/// Hydrodynamics scheme consuming the boundary values.
///
/// Only matters for how the energy field is seeded: every scheme except
/// Zeus stores total specific energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HydroMethod {
    #[default]
    PpmDirectEuler,
    PpmLagrangeRemap,
    Zeus,
    HdRk,
    MhdRk,
}

impl HydroMethod {
    /// Whether the energy field holds total (internal + kinetic) specific energy.
    #[inline]
    pub fn stores_total_energy(self) -> bool {
        !matches!(self, HydroMethod::Zeus)
    }
}

/// Constants of the self-similar Noh solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NohParameters {
    /// Pre-shock density.
    pub d0: f64,
    /// Pre-shock pressure.
    pub p0: f64,
    /// Radial inflow speed (negative means inward).
    pub u0: f64,
}

impl Default for NohParameters {
    fn default() -> Self {
        Self {
            d0: 1.0,
            p0: 1.0e-6,
            u0: -1.0,
        }
    }
}

/// Immutable context for one boundary update.
///
/// Holds the simulation-wide parameters the kernel would otherwise read
/// from global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryConfig {
    /// Current simulation time.
    #[serde(default)]
    pub time: f64,
    /// Adiabatic index.
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    /// Active hydro scheme.
    #[serde(default)]
    pub hydro_method: HydroMethod,
    /// Simulated region is the whole problem with the symmetry center at
    /// the domain midpoint, rather than one quadrant/octant with the center
    /// at the low corner.
    #[serde(default)]
    pub full_box: bool,
    /// Dual energy formalism. Not supported by the kernel.
    #[serde(default)]
    pub dual_energy: bool,
    /// Identifier of the calling process.
    #[serde(default)]
    pub process: usize,
    /// Solution constants.
    #[serde(default)]
    pub noh: NohParameters,
    /// Floor applied to the radius before it is used as a divisor.
    #[serde(default = "default_tiny_number")]
    pub tiny_number: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            time: 0.0,
            gamma: default_gamma(),
            hydro_method: HydroMethod::default(),
            full_box: false,
            dual_energy: false,
            process: 0,
            noh: NohParameters::default(),
            tiny_number: default_tiny_number(),
        }
    }
}

impl BoundaryConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.time.is_finite() || self.time < 0.0 {
            return Err(ConfigError::InvalidTime(self.time));
        }
        if !self.gamma.is_finite() || self.gamma <= 1.0 {
            return Err(ConfigError::InvalidGamma(self.gamma));
        }
        if !self.tiny_number.is_finite() || self.tiny_number <= 0.0 {
            return Err(ConfigError::InvalidTinyNumber(self.tiny_number));
        }
        if self.noh.d0.is_nan() || self.noh.d0 <= 0.0 {
            return Err(ConfigError::InvalidDensity(self.noh.d0));
        }
        if self.noh.p0.is_nan() || self.noh.p0 < 0.0 {
            return Err(ConfigError::InvalidPressure(self.noh.p0));
        }
        Ok(())
    }

    /// Specific energy written to every boundary cell.
    ///
    /// Independent of position: internal energy of the cold pre-shock gas,
    /// plus the kinetic term when the hydro scheme stores total energy.
    pub fn boundary_energy(&self) -> f64 {
        let internal = self.noh.p0 / (self.gamma - 1.0) / self.noh.d0;
        if self.hydro_method.stores_total_energy() {
            internal + 0.5 * self.noh.u0 * self.noh.u0
        } else {
            internal
        }
    }
}

/// Single-patch run description used by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Patch geometry.
    pub geometry: PatchGeometry,
    /// Boundary update context.
    #[serde(default)]
    pub boundary: BoundaryConfig,
    /// Process owning the patch.
    #[serde(default)]
    pub owner: usize,
}

impl RunConfig {
    /// Load a run configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        self.boundary.validate()
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Simulation time must be finite and non-negative, got {0}")]
    InvalidTime(f64),
    #[error("Adiabatic index must be greater than 1, got {0}")]
    InvalidGamma(f64),
    #[error("Radius floor must be finite and positive, got {0}")]
    InvalidTinyNumber(f64),
    #[error("Pre-shock density must be positive, got {0}")]
    InvalidDensity(f64),
    #[error("Pre-shock pressure must be non-negative, got {0}")]
    InvalidPressure(f64),
    #[error("Grid rank must be 1, 2 or 3, got {0}")]
    InvalidRank(usize),
    #[error("Axis {axis} has zero cells")]
    EmptyDimension { axis: usize },
    #[error("Axis {axis} active zone [{start}, {end}] does not fit in {dimension} cells")]
    InvalidActiveZone {
        axis: usize,
        start: usize,
        end: usize,
        dimension: usize,
    },
    #[error("Axis {axis} cell width must be positive, got {width}")]
    InvalidCellWidth { axis: usize, width: f64 },
    #[error("Axis {axis} has a non-finite {edge} edge")]
    NonFiniteEdge { axis: usize, edge: &'static str },
    #[error("Axis {axis} is beyond the grid rank and must be a single cell")]
    InvalidUnusedAxis { axis: usize },
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
