//! Measurement reductions that recover a yarn shortage
//!
//! The search is deterministic and non-iterative: each adjustable dimension
//! is considered once, in a fixed priority order, and the smallest whole
//! centimeter reduction that brings the lower bound of the range within the
//! stock is proposed, never going below the hard minimum for that dimension.

use crate::io::configuration::{
    MIN_ARM_LENGTH_CM, MIN_BODY_LENGTH_CM, MIN_EASE_CM, RANGE_MIN_FACTOR,
};
use crate::io::error::Result;
use crate::model::measurements::{Gauge, MeasurementField, Measurements};
use crate::yarn::estimator::{YardageRange, YarnEstimator};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One suggested reduction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    /// Measurement to reduce
    pub field: MeasurementField,
    /// Centimeters to take off
    pub reduce_by_cm: f64,
    /// Value after the reduction
    pub new_value_cm: f64,
    /// Whether this reduction alone covers the shortage
    pub recovers_shortage: bool,
    /// Meters saved by this reduction alone
    pub meters_saved: f64,
}

/// Dimensions tried, in priority order
const PRIORITY: [MeasurementField; 3] = [
    MeasurementField::BodyLength,
    MeasurementField::ArmLength,
    MeasurementField::Ease,
];

/// Smallest value a suggestion may leave a measurement at
pub const fn minimum_for(field: MeasurementField) -> f64 {
    match field {
        MeasurementField::BodyLength => MIN_BODY_LENGTH_CM,
        MeasurementField::Ease => MIN_EASE_CM,
        MeasurementField::ArmLength => MIN_ARM_LENGTH_CM,
        MeasurementField::Chest
        | MeasurementField::ShoulderWidth
        | MeasurementField::Wrist
        | MeasurementField::Bicep
        | MeasurementField::Hip => 0.0,
    }
}

/// Propose reductions when `available` is below the lower bound of `needed`
///
/// Returns nothing when no stock was declared or the stock already covers the
/// lower bound. Sleeve length is skipped for sleeveless garments, and a
/// dimension already at its minimum is skipped.
///
/// # Errors
///
/// Returns an error if a measurement or the gauge is not usable
pub fn suggest_adjustments(
    estimator: &YarnEstimator,
    needed: &YardageRange,
    available: f64,
    measurements: &Measurements,
    gauge: &Gauge,
) -> Result<Vec<Adjustment>> {
    if available <= 0.0 || available >= needed.min {
        return Ok(Vec::new());
    }

    let current = estimator.raw_estimate(measurements, gauge)?;
    let target = available / RANGE_MIN_FACTOR;
    let shortfall = current - target;
    let mut adjustments = Vec::new();

    for field in PRIORITY {
        if field == MeasurementField::ArmLength && !estimator.has_sleeves() {
            continue;
        }
        let value = measurements.get(field);
        let room = (value - minimum_for(field)).floor();
        if room < 1.0 {
            continue;
        }

        let one_less = estimator.raw_estimate(&measurements.with(field, value - 1.0), gauge)?;
        let per_cm = current - one_less;
        if per_cm <= 0.0 {
            continue;
        }
        let wanted = (shortfall / per_cm).ceil().max(1.0);
        let reduce_by = wanted.min(room);
        let reduced = estimator.raw_estimate(&measurements.with(field, value - reduce_by), gauge)?;
        let recovers_shortage = (reduced * RANGE_MIN_FACTOR).round() <= available;

        debug!(?field, reduce_by, recovers_shortage, "yarn adjustment");
        adjustments.push(Adjustment {
            field,
            reduce_by_cm: reduce_by,
            new_value_cm: value - reduce_by,
            recovers_shortage,
            meters_saved: (current - reduced).round(),
        });
    }
    Ok(adjustments)
}

/// Apply adjustments by direct subtraction, clamped to each minimum
///
/// The input is left untouched; a new set of measurements is returned.
pub fn apply_adjustments(measurements: &Measurements, adjustments: &[Adjustment]) -> Measurements {
    adjustments.iter().fold(*measurements, |current, adjustment| {
        let field = adjustment.field;
        let value = (current.get(field) - adjustment.reduce_by_cm.max(0.0))
            .max(minimum_for(field).min(current.get(field)));
        current.with(field, value)
    })
}
