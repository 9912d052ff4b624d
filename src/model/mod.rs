//! Input and output data structures
//!
//! This module contains:
//! - The garment reading from the image analysis and its fallback resolution
//! - Gauge, body measurements and yarn stock
//! - The generated pattern, pieces and instructions

/// Garment analysis and closed per-axis enums
pub mod garment;
/// Gauge, measurements and yarn stock
pub mod measurements;
/// Pattern pieces, instructions and calculation trail
pub mod pattern;

pub use garment::{GarmentAnalysis, ResolvedGarment};
pub use measurements::{Gauge, Measurements, YarnInfo};
pub use pattern::{GeneratedPattern, PatternPiece};
