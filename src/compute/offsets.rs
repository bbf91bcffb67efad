//! Distance, in cells, between a patch's faces and the global domain faces.

use crate::schema::{MAX_DIMENSION, PatchGeometry, nint};

/// Per-axis inset of the patch from the domain boundary.
///
/// A zero entry means the patch touches the domain boundary on that face.
/// Axes beyond the grid rank are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridOffsets {
    /// Cells between the domain's low face and the patch's low face.
    pub left: [i64; MAX_DIMENSION],
    /// Cells between the domain's high face and the patch's high face
    /// (non-positive for patches inside the domain).
    pub right: [i64; MAX_DIMENSION],
}

impl GridOffsets {
    pub fn resolve(geometry: &PatchGeometry) -> Self {
        let mut offsets = Self::default();
        for axis in 0..geometry.rank.min(MAX_DIMENSION) {
            let width = geometry.cell_width[axis];
            offsets.left[axis] =
                nint((geometry.left_edge[axis] - geometry.domain_left_edge[axis]) / width);
            offsets.right[axis] =
                nint((geometry.right_edge[axis] - geometry.domain_right_edge[axis]) / width);
        }
        offsets
    }

    #[inline]
    pub fn touches_low(&self, axis: usize) -> bool {
        self.left[axis] == 0
    }

    #[inline]
    pub fn touches_high(&self, axis: usize) -> bool {
        self.right[axis] == 0
    }
}
