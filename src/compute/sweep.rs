//! Boundary slab enumeration.
//!
//! A patch touching the domain boundary gets up to six ghost-zone slabs
//! updated, swept in a fixed order: the z faces, then the x faces, then the
//! y faces, low set before high set. Low slabs only exist in full-box runs;
//! in a quadrant/octant run the low domain faces are reflecting and left to
//! the hydro solver.

use std::fmt;
use std::ops::Range;

use crate::schema::{MAX_DIMENSION, PatchGeometry};

use super::{GridOffsets, SymmetryShift};

/// Side of the patch a slab sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Low,
    High,
}

/// A face of the patch: the axis normal to it and its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    pub axis: usize,
    pub side: Side,
}

impl Face {
    pub const fn new(axis: usize, side: Side) -> Self {
        Self { axis, side }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis = ["x", "y", "z"].get(self.axis).copied().unwrap_or("?");
        let side = match self.side {
            Side::Low => "low",
            Side::High => "high",
        };
        write!(f, "{}-{}", axis, side)
    }
}

/// Sweep order. Must stay z before x before y within each side.
pub const SWEEP_ORDER: [Face; 6] = [
    Face::new(2, Side::Low),
    Face::new(0, Side::Low),
    Face::new(1, Side::Low),
    Face::new(2, Side::High),
    Face::new(0, Side::High),
    Face::new(1, Side::High),
];

/// Whether `face` is updated on this patch.
pub fn face_eligible(face: Face, rank: usize, offsets: &GridOffsets, full_box: bool) -> bool {
    if face.axis >= rank {
        return false;
    }
    match face.side {
        Side::Low => full_box && offsets.touches_low(face.axis),
        Side::High => offsets.touches_high(face.axis),
    }
}

/// An axis-aligned box of cells, `ranges[axis]` per axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlabRegion {
    pub face: Face,
    pub ranges: [Range<usize>; MAX_DIMENSION],
}

impl SlabRegion {
    /// Slab for `face`: the ghost layers normal to the face, spanning
    /// `sweep_start..dimension` along the other axes.
    pub fn for_face(face: Face, geometry: &PatchGeometry, sweep_start: &[usize; MAX_DIMENSION]) -> Self {
        let ranges = std::array::from_fn(|axis| {
            let dimension = geometry.dimension[axis];
            if axis != face.axis {
                return sweep_start[axis]..dimension;
            }
            match face.side {
                Side::Low => 0..geometry.start_index[axis],
                Side::High => (geometry.end_index[axis] + 1).min(dimension)..dimension,
            }
        });
        Self { face, ranges }
    }

    #[inline]
    pub fn contains(&self, cell: &[usize; MAX_DIMENSION]) -> bool {
        self.ranges
            .iter()
            .zip(cell.iter())
            .all(|(range, n)| range.contains(n))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.iter().any(Range::is_empty)
    }

    /// Number of cells in the box.
    pub fn len(&self) -> usize {
        self.ranges.iter().map(ExactSizeIterator::len).product()
    }

    /// Cells in k-outer, j, i-inner order.
    pub fn cells(&self) -> impl Iterator<Item = [usize; MAX_DIMENSION]> + '_ {
        let [ri, rj, rk] = &self.ranges;
        rk.clone().flat_map(move |k| {
            rj.clone()
                .flat_map(move |j| ri.clone().map(move |i| [i, j, k]))
        })
    }
}

/// The slabs to update on one patch, in sweep order.
#[derive(Debug, Clone, Default)]
pub struct BoundaryPlan {
    slabs: Vec<SlabRegion>,
}

impl BoundaryPlan {
    pub fn build(
        geometry: &PatchGeometry,
        offsets: &GridOffsets,
        shift: &SymmetryShift,
        full_box: bool,
    ) -> Self {
        let slabs = SWEEP_ORDER
            .iter()
            .filter(|face| face_eligible(**face, geometry.rank, offsets, full_box))
            .map(|face| SlabRegion::for_face(*face, geometry, &shift.sweep_start))
            .collect();
        Self { slabs }
    }

    /// Eligible slabs, in sweep order. May include empty slabs.
    pub fn slabs(&self) -> &[SlabRegion] {
        &self.slabs
    }

    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.slabs.iter().map(|slab| slab.face)
    }

    /// Every boundary cell exactly once, tagged with the slab that owns it.
    ///
    /// Cells shared with an earlier slab (edges and corners) belong to the
    /// earlier slab and are skipped by later ones.
    pub fn cells(&self) -> impl Iterator<Item = (Face, [usize; MAX_DIMENSION])> + '_ {
        self.slabs.iter().enumerate().flat_map(move |(n, slab)| {
            let earlier = &self.slabs[..n];
            slab.cells()
                .filter(move |cell| !earlier.iter().any(|s| s.contains(cell)))
                .map(move |cell| (slab.face, cell))
        })
    }

    /// Number of distinct cells visited by [`BoundaryPlan::cells`].
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }
}
