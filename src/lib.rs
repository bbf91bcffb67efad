//! Noh Boundary - Analytic external boundary conditions for the Noh problem.
//!
//! This crate fills the ghost zones on the outer faces of a block-structured
//! mesh patch with the exact self-similar solution of the 2D/3D Noh
//! implosion test, at the current simulation time.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration and patch geometry types
//! - `compute`: Domain offsets, symmetry shifts, slab enumeration and the
//!   analytic solution, driven by [`NohBoundary`]
//!
//! # Example
//!
//! ```rust,no_run
//! use noh_boundary::{
//!     compute::{MeshPatch, NohBoundary},
//!     schema::{BoundaryConfig, PatchGeometry},
//! };
//!
//! let config = BoundaryConfig {
//!     time: 0.1,
//!     ..Default::default()
//! };
//! let boundary = NohBoundary::new(config).unwrap();
//!
//! // 64x64 quadrant run with 3 ghost layers, owned by process 0
//! let mut patch = MeshPatch::new(PatchGeometry::uniform_2d(64, 64, 3), 0).unwrap();
//!
//! let outcome = boundary.apply(&mut patch).unwrap();
//! if let Some(report) = outcome.report() {
//!     println!("Updated {} boundary cells", report.cells);
//! }
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{BoundaryError, BoundaryOutcome, BoundaryReport, MeshPatch, NohBoundary};
pub use schema::{BoundaryConfig, HydroMethod, PatchGeometry, RunConfig};
