//! Geometry of a single block-structured mesh patch.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Number of spatial axes carried by every geometry array.
pub const MAX_DIMENSION: usize = 3;

/// Round to the nearest integer, halves away from zero.
#[inline]
pub fn nint(value: f64) -> i64 {
    value.round() as i64
}

/// Index space and physical extent of one patch, plus the global domain.
///
/// Axes at or beyond `rank` are degenerate: one cell, active zone `[0, 0]`.
/// Field data is laid out with the x index varying fastest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchGeometry {
    /// Number of active spatial axes.
    pub rank: usize,
    /// Total cells per axis, ghost layers included.
    pub dimension: [usize; MAX_DIMENSION],
    /// First active cell per axis.
    pub start_index: [usize; MAX_DIMENSION],
    /// Last active cell per axis (inclusive).
    pub end_index: [usize; MAX_DIMENSION],
    /// Physical low edge of the active zone.
    pub left_edge: [f64; MAX_DIMENSION],
    /// Physical high edge of the active zone.
    pub right_edge: [f64; MAX_DIMENSION],
    pub domain_left_edge: [f64; MAX_DIMENSION],
    pub domain_right_edge: [f64; MAX_DIMENSION],
    /// Cell width per axis.
    pub cell_width: [f64; MAX_DIMENSION],
}

impl PatchGeometry {
    /// Root patch covering the whole domain `[left, right]` with `active`
    /// cells per axis and `ghosts` boundary layers on each side.
    pub fn uniform(
        rank: usize,
        active: [usize; MAX_DIMENSION],
        ghosts: usize,
        domain_left: [f64; MAX_DIMENSION],
        domain_right: [f64; MAX_DIMENSION],
    ) -> Self {
        Self::tile(rank, active, [0; MAX_DIMENSION], active, ghosts, domain_left, domain_right)
    }

    /// Convenience 2D root patch on `[0, 1]^2`.
    pub fn uniform_2d(nx: usize, ny: usize, ghosts: usize) -> Self {
        Self::uniform(2, [nx, ny, 1], ghosts, [0.0; 3], [1.0, 1.0, 1.0])
    }

    /// Convenience 3D root patch on `[0, 1]^3`.
    pub fn uniform_3d(nx: usize, ny: usize, nz: usize, ghosts: usize) -> Self {
        Self::uniform(3, [nx, ny, nz], ghosts, [0.0; 3], [1.0, 1.0, 1.0])
    }

    /// Patch covering `active` cells of a domain discretised into
    /// `domain_cells`, starting `offset` cells from the domain's low face.
    pub fn tile(
        rank: usize,
        domain_cells: [usize; MAX_DIMENSION],
        offset: [usize; MAX_DIMENSION],
        active: [usize; MAX_DIMENSION],
        ghosts: usize,
        domain_left: [f64; MAX_DIMENSION],
        domain_right: [f64; MAX_DIMENSION],
    ) -> Self {
        let mut geometry = Self {
            rank,
            dimension: [1; MAX_DIMENSION],
            start_index: [0; MAX_DIMENSION],
            end_index: [0; MAX_DIMENSION],
            left_edge: [0.0; MAX_DIMENSION],
            right_edge: [1.0; MAX_DIMENSION],
            domain_left_edge: [0.0; MAX_DIMENSION],
            domain_right_edge: [1.0; MAX_DIMENSION],
            cell_width: [1.0; MAX_DIMENSION],
        };

        for axis in 0..rank.min(MAX_DIMENSION) {
            let width = (domain_right[axis] - domain_left[axis]) / domain_cells[axis] as f64;
            geometry.dimension[axis] = active[axis] + 2 * ghosts;
            geometry.start_index[axis] = ghosts;
            geometry.end_index[axis] = (ghosts + active[axis]).saturating_sub(1);
            geometry.cell_width[axis] = width;
            geometry.domain_left_edge[axis] = domain_left[axis];
            geometry.domain_right_edge[axis] = domain_right[axis];
            geometry.left_edge[axis] = domain_left[axis] + offset[axis] as f64 * width;
            geometry.right_edge[axis] =
                domain_left[axis] + (offset[axis] + active[axis]) as f64 * width;
        }

        geometry
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rank == 0 || self.rank > MAX_DIMENSION {
            return Err(ConfigError::InvalidRank(self.rank));
        }
        for axis in 0..MAX_DIMENSION {
            let dimension = self.dimension[axis];
            let start = self.start_index[axis];
            let end = self.end_index[axis];

            if dimension == 0 {
                return Err(ConfigError::EmptyDimension { axis });
            }
            if axis >= self.rank {
                if dimension != 1 || start != 0 || end != 0 {
                    return Err(ConfigError::InvalidUnusedAxis { axis });
                }
                continue;
            }
            if start > end || end >= dimension {
                return Err(ConfigError::InvalidActiveZone {
                    axis,
                    start,
                    end,
                    dimension,
                });
            }
            let width = self.cell_width[axis];
            if !width.is_finite() || width <= 0.0 {
                return Err(ConfigError::InvalidCellWidth { axis, width });
            }
            let edges = [
                ("left", self.left_edge[axis]),
                ("right", self.right_edge[axis]),
                ("domain left", self.domain_left_edge[axis]),
                ("domain right", self.domain_right_edge[axis]),
            ];
            if let Some((edge, _)) = edges.into_iter().find(|(_, x)| !x.is_finite()) {
                return Err(ConfigError::NonFiniteEdge { axis, edge });
            }
        }
        Ok(())
    }

    /// Total cells in the patch, ghost layers included.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.dimension.iter().product()
    }

    /// Flat field index of cell `(i, j, k)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.dimension[0] * (j + self.dimension[1] * k)
    }

    /// Number of cells spanning the whole domain along `axis`.
    #[inline]
    pub fn domain_cells(&self, axis: usize) -> i64 {
        nint((self.domain_right_edge[axis] - self.domain_left_edge[axis]) / self.cell_width[axis])
    }
}
