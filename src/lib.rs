//! Gauge-aware knitting pattern generation
//!
//! Turns a garment reading from an image analysis, a knitter's swatch gauge
//! and body measurements into row-by-row instructions for every piece, with
//! assembly and finishing steps, a confidence disclaimer and a yarn estimate.

#![forbid(unsafe_code)]

/// Piece generation, pattern assembly and finishing
pub mod generation;
/// Request loading, rendering, CLI and error handling
pub mod io;
/// Gauge conversion and shaping distribution
pub mod math;
/// Garment, measurement and pattern data structures
pub mod model;
/// Yarn estimate and shortage adjustments
pub mod yarn;

pub use generation::assembler::{GenerationConfig, PatternAssembler};
pub use io::error::{PatternError, Result};
