//! Knitter-supplied gauge, body measurements and yarn stock

use crate::io::error::{PatternError, Result, invalid_input};
use serde::{Deserialize, Serialize};

/// Stitch and row density of the knitter's swatch
///
/// The single conversion factor between centimeters and stitch/row counts
/// for the whole pattern.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gauge {
    /// Stitches across 10 cm of fabric
    pub stitches_per_10cm: f64,
    /// Rows down 10 cm of fabric
    pub rows_per_10cm: f64,
    /// Needle used for the swatch, in millimeters
    #[serde(default)]
    pub needle_size_mm: f64,
}

impl Gauge {
    /// Create a gauge from densities per 10 cm
    pub const fn new(stitches_per_10cm: f64, rows_per_10cm: f64, needle_size_mm: f64) -> Self {
        Self {
            stitches_per_10cm,
            rows_per_10cm,
            needle_size_mm,
        }
    }

    /// Check that both densities are finite and positive
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidGauge` when either density is unusable
    pub fn validate(&self) -> Result<()> {
        let usable = |density: f64| density.is_finite() && density > 0.0;
        if usable(self.stitches_per_10cm) && usable(self.rows_per_10cm) {
            Ok(())
        } else {
            Err(PatternError::InvalidGauge {
                stitches_per_10cm: self.stitches_per_10cm,
                rows_per_10cm: self.rows_per_10cm,
            })
        }
    }
}

/// Names of the individual body measurements
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeasurementField {
    /// Chest circumference
    Chest,
    /// Shoulder to hem
    BodyLength,
    /// Shoulder point to shoulder point across the back
    ShoulderWidth,
    /// Shoulder to wrist
    ArmLength,
    /// Wrist circumference
    Wrist,
    /// Upper arm circumference
    Bicep,
    /// Hip circumference
    Hip,
    /// Ease added to the chest
    Ease,
}

impl MeasurementField {
    /// Field name as it appears in requests
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chest => "chestCircumference",
            Self::BodyLength => "bodyLength",
            Self::ShoulderWidth => "shoulderWidth",
            Self::ArmLength => "armLength",
            Self::Wrist => "wristCircumference",
            Self::Bicep => "bicepCircumference",
            Self::Hip => "hipCircumference",
            Self::Ease => "ease",
        }
    }
}

/// Body measurements in centimeters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    /// Chest circumference
    pub chest_circumference: f64,
    /// Shoulder to hem
    pub body_length: f64,
    /// Shoulder point to shoulder point across the back
    pub shoulder_width: f64,
    /// Shoulder to wrist
    pub arm_length: f64,
    /// Wrist circumference
    pub wrist_circumference: f64,
    /// Upper arm circumference
    pub bicep_circumference: f64,
    /// Hip circumference
    pub hip_circumference: f64,
    /// Ease added to the chest for the desired fit
    pub ease: f64,
}

impl Measurements {
    /// Read a single measurement
    pub const fn get(&self, field: MeasurementField) -> f64 {
        match field {
            MeasurementField::Chest => self.chest_circumference,
            MeasurementField::BodyLength => self.body_length,
            MeasurementField::ShoulderWidth => self.shoulder_width,
            MeasurementField::ArmLength => self.arm_length,
            MeasurementField::Wrist => self.wrist_circumference,
            MeasurementField::Bicep => self.bicep_circumference,
            MeasurementField::Hip => self.hip_circumference,
            MeasurementField::Ease => self.ease,
        }
    }

    /// Copy with one measurement replaced
    #[must_use]
    pub fn with(mut self, field: MeasurementField, value: f64) -> Self {
        match field {
            MeasurementField::Chest => self.chest_circumference = value,
            MeasurementField::BodyLength => self.body_length = value,
            MeasurementField::ShoulderWidth => self.shoulder_width = value,
            MeasurementField::ArmLength => self.arm_length = value,
            MeasurementField::Wrist => self.wrist_circumference = value,
            MeasurementField::Bicep => self.bicep_circumference = value,
            MeasurementField::Hip => self.hip_circumference = value,
            MeasurementField::Ease => self.ease = value,
        }
        self
    }

    /// Read a measurement that must be a finite number
    ///
    /// Out-of-range but finite values are returned as-is; generation clamps
    /// them and records a warning.
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidInput` for NaN or infinite values
    pub fn require(&self, field: MeasurementField) -> Result<f64> {
        let value = self.get(field);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(invalid_input(field.name(), &value, &"must be a finite number"))
        }
    }

    /// Check several fields at once, reporting the first malformed one
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidInput` for the first non-finite field
    pub fn require_all(&self, fields: &[MeasurementField]) -> Result<()> {
        for &field in fields {
            self.require(field)?;
        }
        Ok(())
    }
}

/// Yarn the knitter intends to use
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YarnInfo {
    /// Brand or colourway label
    #[serde(default)]
    pub name: String,
    /// Weight class such as "dk" or "worsted"
    #[serde(default)]
    pub weight: Option<String>,
    /// Length of one skein in meters
    #[serde(default)]
    pub meters_per_skein: f64,
    /// Skeins in stock
    #[serde(default)]
    pub skeins_available: f64,
    /// Explicit stock in meters, overriding skein arithmetic
    #[serde(default)]
    pub total_meters: Option<f64>,
}

impl YarnInfo {
    /// Declared stock in meters, zero when nothing usable was declared
    pub fn available_meters(&self) -> f64 {
        let total = self
            .total_meters
            .unwrap_or(self.skeins_available * self.meters_per_skein);
        if total.is_finite() { total.max(0.0) } else { 0.0 }
    }
}
