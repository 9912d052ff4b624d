//! Yarn consumption
//!
//! This module contains:
//! - The surface-area yardage estimate and stock comparison
//! - The measurement reduction search used when stock is short

/// Measurement reductions that recover a shortage
pub mod adjustments;
/// Yardage range, stock status and report
pub mod estimator;

pub use adjustments::{Adjustment, apply_adjustments, suggest_adjustments};
pub use estimator::{YardageRange, YarnEstimator, YarnReport, YarnStatus, estimate_needed};
