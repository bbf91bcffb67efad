//! Compute module - Boundary geometry and the analytic Noh solution.

mod analytic;
mod boundary;
mod offsets;
mod patch;
mod shift;
mod sweep;

pub use analytic::*;
pub use boundary::*;
pub use offsets::*;
pub use patch::*;
pub use shift::*;
pub use sweep::*;
