//! Mesh patch - field bank plus geometry for one block of the mesh.

use crate::schema::{ConfigError, PatchGeometry};

/// Field slots in the patch's field bank.
///
/// Velocity components follow density and energy, one per active axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Density = 0,
    Energy = 1,
    VelocityX = 2,
    VelocityY = 3,
    VelocityZ = 4,
}

impl Field {
    #[inline]
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Velocity field for a spatial axis.
    pub fn velocity(axis: usize) -> Option<Self> {
        match axis {
            0 => Some(Field::VelocityX),
            1 => Some(Field::VelocityY),
            2 => Some(Field::VelocityZ),
            _ => None,
        }
    }
}

/// Number of fields a patch of the given rank carries.
#[inline]
pub fn field_count_for_rank(rank: usize) -> usize {
    rank + 2
}

/// Field bank shape errors.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("Invalid patch geometry: {0}")]
    Geometry(#[from] ConfigError),
    #[error("Expected {expected} fields for this rank, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("Field {field} holds {found} values, expected {expected}")]
    FieldLength {
        field: usize,
        expected: usize,
        found: usize,
    },
}

/// A single structured-grid block.
///
/// Created and destroyed by the mesh hierarchy; the boundary kernel only
/// overwrites values in place and never resizes the field bank.
#[derive(Debug, Clone)]
pub struct MeshPatch {
    geometry: PatchGeometry,
    /// Process holding this patch.
    owner: usize,
    /// Per-field cell arrays, `[field][i + nx * (j + ny * k)]`.
    fields: Vec<Vec<f64>>,
}

impl MeshPatch {
    /// Create a patch with zero-initialised fields.
    pub fn new(geometry: PatchGeometry, owner: usize) -> Result<Self, PatchError> {
        geometry.validate()?;
        let cells = geometry.cell_count();
        let fields = vec![vec![0.0; cells]; field_count_for_rank(geometry.rank)];
        Ok(Self {
            geometry,
            owner,
            fields,
        })
    }

    /// Create a patch with no field storage allocated.
    pub fn without_fields(geometry: PatchGeometry, owner: usize) -> Result<Self, PatchError> {
        geometry.validate()?;
        Ok(Self {
            geometry,
            owner,
            fields: Vec::new(),
        })
    }

    /// Wrap existing field arrays. An empty bank is accepted.
    pub fn from_fields(
        geometry: PatchGeometry,
        owner: usize,
        fields: Vec<Vec<f64>>,
    ) -> Result<Self, PatchError> {
        geometry.validate()?;
        let patch = Self {
            geometry,
            owner,
            fields,
        };
        patch.check_shape()?;
        Ok(patch)
    }

    #[inline]
    pub fn geometry(&self) -> &PatchGeometry {
        &self.geometry
    }

    #[inline]
    pub fn owner(&self) -> usize {
        self.owner
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.geometry.rank
    }

    #[inline]
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Read-only view of one field.
    pub fn field(&self, field: Field) -> Option<&[f64]> {
        self.fields.get(field.slot()).map(Vec::as_slice)
    }

    /// Value of `field` at cell `(i, j, k)`.
    pub fn get(&self, field: Field, i: usize, j: usize, k: usize) -> Option<f64> {
        let idx = self.geometry.index(i, j, k);
        self.field(field).and_then(|f| f.get(idx).copied())
    }

    /// Set every cell of every field to `value`.
    pub fn fill(&mut self, value: f64) {
        for field in &mut self.fields {
            field.fill(value);
        }
    }

    pub(crate) fn fields_mut(&mut self) -> &mut [Vec<f64>] {
        &mut self.fields
    }

    fn check_shape(&self) -> Result<(), PatchError> {
        if self.fields.is_empty() {
            return Ok(());
        }
        let expected = field_count_for_rank(self.geometry.rank);
        if self.fields.len() < expected {
            return Err(PatchError::FieldCount {
                expected,
                found: self.fields.len(),
            });
        }
        let cells = self.geometry.cell_count();
        for (field, values) in self.fields.iter().enumerate() {
            if values.len() != cells {
                return Err(PatchError::FieldLength {
                    field,
                    expected: cells,
                    found: values.len(),
                });
            }
        }
        Ok(())
    }

    /// Consistency check run after a boundary update.
    ///
    /// Fails on a malformed field bank; non-finite values are only reported.
    pub fn debug_check(&self, label: &str) -> Result<(), PatchError> {
        self.check_shape()?;

        let non_finite: usize = self
            .fields
            .iter()
            .map(|f| f.iter().filter(|v| !v.is_finite()).count())
            .sum();

        if non_finite > 0 {
            log::warn!(
                "{}: {} non-finite values on patch owned by process {}",
                label,
                non_finite,
                self.owner
            );
        } else {
            log::trace!("{}: patch ok ({} fields)", label, self.fields.len());
        }
        Ok(())
    }
}
