//! Yardage estimate from fabric surface area and gauge density
//!
//! The consumption constant is an empirical fit, so it lives in
//! [`EstimatorConfig`] and can be recalibrated without touching the model.

use crate::io::configuration::{
    ARMHOLE_AREA_FACTOR, CARDIGAN_SURCHARGE, GAUGE_REFERENCE_DENSITY, METERS_PER_CM2,
    RANGE_MAX_FACTOR, RANGE_MIN_FACTOR, RIBBING_BAND_CM, SHORT_SLEEVE_AREA_FACTOR, VEST_FACTOR,
};
use crate::io::error::Result;
use crate::model::garment::GarmentType;
use crate::model::measurements::{Gauge, MeasurementField, Measurements, YarnInfo};
use crate::yarn::adjustments::{Adjustment, suggest_adjustments};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Calibration of the consumption model
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatorConfig {
    /// Meters of yarn per square centimeter of fabric at reference gauge
    pub meters_per_cm2: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            meters_per_cm2: METERS_PER_CM2,
        }
    }
}

/// Meters needed, as a range reflecting swatch-tension uncertainty
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct YardageRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
    /// Central estimate
    pub average: f64,
}

/// How the declared stock compares with the range
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YarnStatus {
    /// Stock covers the upper bound, or no stock was declared
    Sufficient,
    /// Stock lies between the bounds
    Tight,
    /// Stock is below the lower bound
    Insufficient,
}

/// Stock comparison attached to a pattern
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YarnReport {
    /// Meters needed
    pub needed: YardageRange,
    /// Meters declared, zero when nothing was declared
    pub available_meters: f64,
    /// Comparison result
    pub status: YarnStatus,
    /// Suggested reductions, only when the stock is insufficient
    pub adjustments: Vec<Adjustment>,
}

/// Compare declared stock with a range
///
/// Zero stock means nothing was declared, which is never a shortage.
pub fn classify(needed: &YardageRange, available: f64) -> YarnStatus {
    if available <= 0.0 || available >= needed.max {
        YarnStatus::Sufficient
    } else if available >= needed.min {
        YarnStatus::Tight
    } else {
        YarnStatus::Insufficient
    }
}

/// Estimator for one garment shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YarnEstimator {
    config: EstimatorConfig,
    garment: GarmentType,
    has_long_sleeves: bool,
    has_sleeves: bool,
}

impl YarnEstimator {
    /// Create an estimator for a garment type and sleeve length
    pub const fn new(config: EstimatorConfig, garment: GarmentType, has_long_sleeves: bool) -> Self {
        Self {
            config,
            garment,
            has_long_sleeves,
            has_sleeves: !matches!(garment, GarmentType::Vest),
        }
    }

    /// Leave the sleeve area out, for sleeveless garments other than vests
    #[must_use]
    pub const fn without_sleeves(mut self) -> Self {
        self.has_sleeves = false;
        self.has_long_sleeves = false;
        self
    }

    /// Whether the garment has sleeves whose length can be adjusted
    pub const fn has_sleeves(&self) -> bool {
        self.has_sleeves
    }

    /// Unrounded meters for a set of measurements
    ///
    /// # Errors
    ///
    /// Returns an error if a measurement or the gauge is not usable
    pub fn raw_estimate(&self, measurements: &Measurements, gauge: &Gauge) -> Result<f64> {
        gauge.validate()?;
        measurements.require_all(&[
            MeasurementField::Chest,
            MeasurementField::Ease,
            MeasurementField::BodyLength,
            MeasurementField::ArmLength,
            MeasurementField::Wrist,
            MeasurementField::Bicep,
        ])?;
        let m = measurements;
        let finished = m.chest_circumference + m.ease;
        let body = finished * m.body_length * ARMHOLE_AREA_FACTOR;
        let mut sleeves = f64::midpoint(m.bicep_circumference + m.ease, m.wrist_circumference + m.ease)
            * m.arm_length
            * 2.0;
        let mut cuffs = 2.0 * (m.wrist_circumference + m.ease);
        if self.has_sleeves && !self.has_long_sleeves {
            sleeves *= SHORT_SLEEVE_AREA_FACTOR;
        }
        if !self.has_sleeves && self.garment != GarmentType::Vest {
            sleeves = 0.0;
            cuffs = 0.0;
        }
        let ribbing = (finished + cuffs) * RIBBING_BAND_CM;
        let area = (body + sleeves + ribbing).max(0.0);

        let density =
            gauge.stitches_per_10cm * gauge.rows_per_10cm / GAUGE_REFERENCE_DENSITY;
        let factor = match self.garment {
            GarmentType::Cardigan => CARDIGAN_SURCHARGE,
            GarmentType::Vest => VEST_FACTOR,
            GarmentType::Pullover | GarmentType::Other | GarmentType::Unknown => 1.0,
        };
        let estimate = area * self.config.meters_per_cm2 * density * factor;
        debug!(area, density, estimate, "yarn estimate");
        Ok(estimate)
    }

    /// Meters needed as a rounded range
    ///
    /// # Errors
    ///
    /// Returns an error if a measurement or the gauge is not usable
    pub fn estimate(&self, measurements: &Measurements, gauge: &Gauge) -> Result<YardageRange> {
        let estimate = self.raw_estimate(measurements, gauge)?;
        Ok(YardageRange {
            min: (estimate * RANGE_MIN_FACTOR).round(),
            max: (estimate * RANGE_MAX_FACTOR).round(),
            average: estimate.round(),
        })
    }

    /// Estimate, compare with the declared stock and suggest reductions
    ///
    /// # Errors
    ///
    /// Returns an error if a measurement or the gauge is not usable
    pub fn report(
        &self,
        measurements: &Measurements,
        gauge: &Gauge,
        yarn: &YarnInfo,
    ) -> Result<YarnReport> {
        let needed = self.estimate(measurements, gauge)?;
        let available = yarn.available_meters();
        let status = classify(&needed, available);
        let adjustments = if status == YarnStatus::Insufficient {
            suggest_adjustments(self, &needed, available, measurements, gauge)?
        } else {
            Vec::new()
        };
        Ok(YarnReport {
            needed,
            available_meters: available,
            status,
            adjustments,
        })
    }
}

/// Meters needed with the default calibration
///
/// # Errors
///
/// Returns an error if a measurement or the gauge is not usable
pub fn estimate_needed(
    measurements: &Measurements,
    gauge: &Gauge,
    garment: GarmentType,
    has_long_sleeves: bool,
) -> Result<YardageRange> {
    YarnEstimator::new(EstimatorConfig::default(), garment, has_long_sleeves)
        .estimate(measurements, gauge)
}
