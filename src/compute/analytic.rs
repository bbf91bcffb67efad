//! Closed-form Noh solution outside the shock.
//!
//! Cold gas streams radially inward at `|u0|` while accumulating density:
//!
//! ```text
//! density  = d0 + t/r              (2D, cylindrical)
//! density  = (d0 + t/r)^2          (3D, spherical)
//! energy   = p0/(gamma - 1)/d0 [+ u0^2/2 for total-energy schemes]
//! velocity = u0 * x_hat            (radial)
//! ```
//!
//! Radii are measured in cell widths and converted with the x cell width.

use crate::schema::{BoundaryConfig, MAX_DIMENSION};

/// Primitive state written to one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NohState {
    pub density: f64,
    pub energy: f64,
    pub velocity: [f64; MAX_DIMENSION],
}

/// Evaluator for the analytic solution at a fixed time.
#[derive(Debug, Clone, Copy)]
pub struct NohSolution {
    rank: usize,
    time: f64,
    cell_width: f64,
    d0: f64,
    u0: f64,
    energy: f64,
    tiny_number: f64,
}

impl NohSolution {
    pub fn new(config: &BoundaryConfig, rank: usize, cell_width: f64) -> Self {
        Self {
            rank,
            time: config.time,
            cell_width,
            d0: config.noh.d0,
            u0: config.noh.u0,
            energy: config.boundary_energy(),
            tiny_number: config.tiny_number,
        }
    }

    /// Distance from the symmetry center, floored away from zero.
    #[inline]
    pub fn radius(&self, offset: &[f64; MAX_DIMENSION]) -> f64 {
        let r2: f64 = offset.iter().map(|x| x * x).sum();
        r2.sqrt().max(self.tiny_number)
    }

    #[inline]
    pub fn density(&self, radius: f64) -> f64 {
        let d = self.d0 + self.time / radius / self.cell_width;
        if self.rank == 3 { d * d } else { d }
    }

    /// State at a cell `offset` cell widths from the symmetry center.
    #[inline]
    pub fn evaluate(&self, offset: &[f64; MAX_DIMENSION]) -> NohState {
        let radius = self.radius(offset);
        let mut velocity = [0.0; MAX_DIMENSION];
        for (v, x) in velocity.iter_mut().zip(offset.iter()).take(self.rank) {
            *v = self.u0 * x / radius;
        }
        NohState {
            density: self.density(radius),
            energy: self.energy,
            velocity,
        }
    }
}
