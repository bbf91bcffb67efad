//! Index shifts placing the symmetry center in a patch's index space.
//!
//! With the shift resolved, the signed distance of cell index `n` from the
//! symmetry center along an axis, in cell widths, is `n + 0.5 - shift`.
//!
//! Two conventions are supported:
//! - quadrant/octant runs put the center at the domain's low corner;
//! - full-box runs put it at the domain midpoint, which requires an even
//!   cell count along every active axis.

use crate::schema::{MAX_DIMENSION, PatchGeometry};

use super::{BoundaryError, GridOffsets};

/// Resolved symmetry shifts and sweep start indices for one patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymmetryShift {
    rank: usize,
    /// Index offset of the symmetry center, per axis.
    pub shift: [i64; MAX_DIMENSION],
    /// First index swept along each axis by slabs normal to other axes.
    ///
    /// Equals the active start on a quadrant run's low domain face (those
    /// ghost cells are never written), zero otherwise.
    pub sweep_start: [usize; MAX_DIMENSION],
}

impl SymmetryShift {
    pub fn resolve(
        geometry: &PatchGeometry,
        offsets: &GridOffsets,
        full_box: bool,
    ) -> Result<Self, BoundaryError> {
        let rank = geometry.rank.min(MAX_DIMENSION);
        let mut shift = geometry.start_index.map(|start| start as i64);
        let mut sweep_start = [0usize; MAX_DIMENSION];

        if full_box {
            // Only holds for a single patch spanning the domain.
            for axis in 0..rank {
                let dimension = geometry.dimension[axis];
                if dimension % 2 != 0 {
                    return Err(BoundaryError::OddFullBoxDimension { axis, dimension });
                }
            }
            for axis in 0..rank {
                shift[axis] += geometry.domain_cells(axis) / 2;
            }
        }

        for axis in 0..rank {
            if offsets.touches_low(axis) && !full_box {
                sweep_start[axis] = geometry.start_index[axis];
            } else {
                shift[axis] -= offsets.left[axis];
            }
        }

        Ok(Self {
            rank,
            shift,
            sweep_start,
        })
    }

    /// Signed distance of cell index `index` from the symmetry center along
    /// `axis`, in cell widths. Zero on axes beyond the grid rank.
    #[inline]
    pub fn offset(&self, axis: usize, index: usize) -> f64 {
        if axis >= self.rank {
            return 0.0;
        }
        index as f64 + 0.5 - self.shift[axis] as f64
    }

    /// Offsets of cell `(i, j, k)` along every axis.
    #[inline]
    pub fn offsets(&self, cell: [usize; MAX_DIMENSION]) -> [f64; MAX_DIMENSION] {
        [
            self.offset(0, cell[0]),
            self.offset(1, cell[1]),
            self.offset(2, cell[2]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(geometry: &PatchGeometry, full_box: bool) -> Result<SymmetryShift, BoundaryError> {
        SymmetryShift::resolve(geometry, &GridOffsets::resolve(geometry), full_box)
    }

    #[test]
    fn test_quadrant_root_patch() {
        let g = PatchGeometry::uniform_2d(8, 8, 3);
        let s = resolve(&g, false).unwrap();
        assert_eq!(s.shift, [3, 3, 0]);
        assert_eq!(s.sweep_start, [3, 3, 0]);
        // First active cell center sits half a cell from the corner.
        assert_eq!(s.offset(0, 3), 0.5);
        // Ghost cells are mirrored to negative offsets.
        assert_eq!(s.offset(1, 0), -2.5);
    }

    #[test]
    fn test_quadrant_interior_tile_keeps_global_offsets() {
        let g = PatchGeometry::tile(
            2,
            [16, 16, 1],
            [8, 0, 0],
            [8, 8, 1],
            2,
            [0.0; 3],
            [1.0; 3],
        );
        let s = resolve(&g, false).unwrap();
        assert_eq!(s.shift, [2 - 8, 2, 0]);
        assert_eq!(s.sweep_start, [0, 2, 0]);
        // First active cell of the tile is the 9th cell of the domain.
        assert_eq!(s.offset(0, 2), 8.5);
    }

    #[test]
    fn test_full_box_centers_at_midpoint() {
        let g = PatchGeometry::uniform_3d(16, 16, 16, 4);
        let s = resolve(&g, true).unwrap();
        assert_eq!(s.shift, [12, 12, 12]);
        assert_eq!(s.sweep_start, [0, 0, 0]);
        assert_eq!(s.offset(0, 11), -0.5);
        assert_eq!(s.offset(0, 12), 0.5);
    }

    #[test]
    fn test_full_box_tile_subtracts_left_offset() {
        let g = PatchGeometry::tile(
            2,
            [16, 16, 1],
            [8, 8, 0],
            [8, 8, 1],
            2,
            [0.0; 3],
            [1.0; 3],
        );
        let s = resolve(&g, true).unwrap();
        assert_eq!(s.shift, [2, 2, 0]);
        assert_eq!(s.sweep_start, [0, 0, 0]);
        // First active cell sits half a cell past the domain midpoint.
        assert_eq!(s.offset(0, 2), 0.5);
        assert_eq!(s.offset(1, 1), -0.5);
    }

    #[test]
    fn test_full_box_rejects_odd_dimension() {
        let g = PatchGeometry::uniform_2d(16, 15, 3);
        let err = resolve(&g, true).unwrap_err();
        assert!(matches!(
            err,
            BoundaryError::OddFullBoxDimension {
                axis: 1,
                dimension: 21
            }
        ));
    }

    #[test]
    fn test_odd_dimension_allowed_without_full_box() {
        let g = PatchGeometry::uniform_2d(15, 15, 3);
        assert!(resolve(&g, false).is_ok());
    }

    #[test]
    fn test_unused_axis_offset_is_zero() {
        let g = PatchGeometry::uniform_2d(8, 8, 3);
        let s = resolve(&g, false).unwrap();
        assert_eq!(s.offset(2, 0), 0.0);
        assert_eq!(s.offsets([3, 4, 0]), [0.5, 1.5, 0.0]);
    }
}
