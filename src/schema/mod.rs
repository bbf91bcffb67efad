//! Schema module - Configuration and geometry types for the Noh boundary kernel.

mod config;
mod geometry;

pub use config::*;
pub use geometry::*;
