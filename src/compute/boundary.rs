//! External analytic boundary update for Noh problem patches.
//!
//! Overwrites the ghost zones on the outer faces of the global domain with
//! the exact solution at the current time. Internal (subgrid-adjacent)
//! boundaries are never touched.

use rayon::prelude::*;

use crate::schema::{BoundaryConfig, ConfigError};

use super::{
    BoundaryPlan, Face, Field, GridOffsets, MeshPatch, NohSolution, PatchError, SymmetryShift,
};

/// Fatal conditions raised before any cell is written.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("Noh boundary requires a 2D or 3D grid, got rank {0}")]
    UnsupportedRank(usize),
    #[error("Noh boundary does not support the dual energy formalism")]
    DualEnergyUnsupported,
    #[error(
        "Full-box Noh boundary needs an even cell count on every axis, axis {axis} has {dimension}"
    )]
    OddFullBoxDimension { axis: usize, dimension: usize },
    #[error("Invalid boundary configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Malformed patch: {0}")]
    Patch(#[from] PatchError),
}

/// Cells written on each eligible face.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryReport {
    /// Eligible faces in sweep order with their cell counts.
    pub faces: Vec<(Face, usize)>,
    /// Total cells written.
    pub cells: usize,
}

impl BoundaryReport {
    /// Cells written on `face`, zero if the face was not eligible.
    pub fn cells_on(&self, face: Face) -> usize {
        self.faces
            .iter()
            .find(|(f, _)| *f == face)
            .map_or(0, |(_, n)| *n)
    }
}

/// Result of a successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryOutcome {
    /// Boundary cells were written.
    Updated(BoundaryReport),
    /// The calling process does not own the patch.
    NotOwner,
    /// The patch has no field storage.
    NoFields,
}

impl BoundaryOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, BoundaryOutcome::Updated(_))
    }

    pub fn report(&self) -> Option<&BoundaryReport> {
        match self {
            BoundaryOutcome::Updated(report) => Some(report),
            _ => None,
        }
    }
}

/// Applies the analytic Noh solution to external patch boundaries.
#[derive(Debug, Clone)]
pub struct NohBoundary {
    config: BoundaryConfig,
}

impl NohBoundary {
    /// Create from a validated configuration.
    pub fn new(config: BoundaryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    /// Resolve the slabs to update on `patch` without writing anything.
    ///
    /// Fails on the same fatal conditions as [`NohBoundary::apply`].
    pub fn plan(&self, patch: &MeshPatch) -> Result<(BoundaryPlan, SymmetryShift), BoundaryError> {
        let geometry = patch.geometry();
        let rank = geometry.rank;
        if rank != 2 && rank != 3 {
            return Err(BoundaryError::UnsupportedRank(rank));
        }
        if self.config.dual_energy {
            return Err(BoundaryError::DualEnergyUnsupported);
        }

        let offsets = GridOffsets::resolve(geometry);
        let shift = SymmetryShift::resolve(geometry, &offsets, self.config.full_box)?;
        let plan = BoundaryPlan::build(geometry, &offsets, &shift, self.config.full_box);
        Ok((plan, shift))
    }

    /// Update the external boundary of one patch in place.
    pub fn apply(&self, patch: &mut MeshPatch) -> Result<BoundaryOutcome, BoundaryError> {
        if patch.owner() != self.config.process {
            log::trace!(
                "Skipping patch owned by process {} (running on {})",
                patch.owner(),
                self.config.process
            );
            return Ok(BoundaryOutcome::NotOwner);
        }
        if !patch.has_fields() {
            return Ok(BoundaryOutcome::NoFields);
        }

        let (plan, shift) = self.plan(patch)?;

        let rank = patch.rank();
        let geometry = patch.geometry().clone();
        let solution = NohSolution::new(&self.config, rank, geometry.cell_width[0]);

        let mut report = BoundaryReport {
            faces: plan.faces().map(|face| (face, 0)).collect(),
            cells: 0,
        };

        let fields = patch.fields_mut();
        for (face, cell) in plan.cells() {
            let state = solution.evaluate(&shift.offsets(cell));
            let idx = geometry.index(cell[0], cell[1], cell[2]);

            fields[Field::Density.slot()][idx] = state.density;
            fields[Field::Energy.slot()][idx] = state.energy;
            for axis in 0..rank {
                if let Some(velocity) = Field::velocity(axis) {
                    fields[velocity.slot()][idx] = state.velocity[axis];
                }
            }

            if let Some(entry) = report.faces.iter_mut().find(|(f, _)| *f == face) {
                entry.1 += 1;
            }
            report.cells += 1;
        }

        for (face, cells) in &report.faces {
            log::trace!("  {}: {} cells", face, cells);
        }
        log::debug!(
            "Noh boundary at t={}: {} cells on {} faces",
            self.config.time,
            report.cells,
            report.faces.len()
        );

        patch.debug_check("NohBoundary::apply (after)")?;

        Ok(BoundaryOutcome::Updated(report))
    }

    /// Update many independent patches in parallel.
    ///
    /// Each patch is exclusively borrowed by one worker, so no two updates
    /// share field storage.
    pub fn apply_all(&self, patches: &mut [MeshPatch]) -> Vec<Result<BoundaryOutcome, BoundaryError>> {
        patches.par_iter_mut().map(|patch| self.apply(patch)).collect()
    }
}
