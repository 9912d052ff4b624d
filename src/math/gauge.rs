//! Gauge conversion between centimeters and stitch/row counts
//!
//! Every count in a pattern goes through [`GaugeConverter`] so that a single
//! rounding policy applies everywhere: round half up, never floor.

use crate::io::error::{Result, invalid_input};
use crate::model::measurements::Gauge;
use crate::model::pattern::CalculationStep;
use num_traits::ToPrimitive;

/// Round half up to the nearest integer
///
/// Returns `None` for NaN, infinities and values outside the `i64` range.
pub fn round_half_up(value: f64) -> Option<i64> {
    (value + 0.5).floor().to_i64()
}

/// Convert a width to stitches at the given gauge
///
/// # Errors
///
/// Returns an error if `cm` is not finite
pub fn stitches_for(cm: f64, gauge: &Gauge) -> Result<i64> {
    count_for(cm, gauge.stitches_per_10cm, "width")
}

/// Convert a length to rows at the given gauge
///
/// # Errors
///
/// Returns an error if `cm` is not finite
pub fn rows_for(cm: f64, gauge: &Gauge) -> Result<i64> {
    count_for(cm, gauge.rows_per_10cm, "length")
}

fn count_for(cm: f64, density: f64, field: &'static str) -> Result<i64> {
    round_half_up(cm / 10.0 * density)
        .ok_or_else(|| invalid_input(field, &cm, &"cannot convert a non-finite length"))
}

/// A count aligned to a stitch repeat, with the note explaining the change
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rounded {
    /// Aligned count
    pub value: i64,
    /// Present whenever `value` differs from the input
    pub note: Option<String>,
}

/// Round `count` to the nearest multiple of `multiple`
///
/// Ties round up. Positive counts never round down to zero. The result is
/// always less than `multiple` away from `count`.
pub fn round_to_multiple(count: i64, multiple: i64) -> Rounded {
    round_to_repeat(count, multiple, 0)
}

/// Round `count` to `multiple * n + extra`
///
/// Used for flat ribbing, where a 4-stitch repeat plus 2 edge stitches keeps
/// both selvedges symmetric.
pub fn round_to_repeat(count: i64, multiple: i64, extra: i64) -> Rounded {
    if multiple <= 1 {
        return Rounded {
            value: count,
            note: None,
        };
    }

    let base = count - extra;
    let remainder = base.rem_euclid(multiple);
    let down = base - remainder;
    let up = down + multiple;
    let aligned = if remainder == 0 || (remainder * 2 < multiple && down > 0) {
        down
    } else {
        up
    };
    let value = aligned + extra;

    let note = (value != count).then(|| {
        if extra == 0 {
            format!("rounded from {count} to {value} to fit a {multiple}-stitch repeat")
        } else {
            format!(
                "rounded from {count} to {value} to fit a {multiple}-stitch repeat plus {extra} edge stitches"
            )
        }
    });

    Rounded { value, note }
}

/// Converter bound to one validated gauge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeConverter {
    gauge: Gauge,
}

impl GaugeConverter {
    /// Create a converter for a gauge with positive, finite densities
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidGauge` for unusable densities
    pub fn new(gauge: Gauge) -> Result<Self> {
        gauge.validate()?;
        Ok(Self { gauge })
    }

    /// The gauge this converter applies
    pub const fn gauge(&self) -> &Gauge {
        &self.gauge
    }

    /// Stitches for a width
    ///
    /// # Errors
    ///
    /// Returns an error if `cm` is not finite
    pub fn stitches_for(&self, cm: f64) -> Result<i64> {
        stitches_for(cm, &self.gauge)
    }

    /// Rows for a length
    ///
    /// # Errors
    ///
    /// Returns an error if `cm` is not finite
    pub fn rows_for(&self, cm: f64) -> Result<i64> {
        rows_for(cm, &self.gauge)
    }

    /// Width covered by a stitch count
    pub fn cm_for_stitches(&self, stitches: i64) -> f64 {
        stitches as f64 * 10.0 / self.gauge.stitches_per_10cm
    }

    /// Length covered by a row count
    pub fn cm_for_rows(&self, rows: i64) -> f64 {
        rows as f64 * 10.0 / self.gauge.rows_per_10cm
    }

    /// Convert a width and record the step
    ///
    /// # Errors
    ///
    /// Returns an error if `cm` is not finite
    pub fn stitches_step(&self, description: &str, cm: f64) -> Result<(i64, CalculationStep)> {
        let stitches = self.stitches_for(cm)?;
        let step = CalculationStep {
            description: description.to_string(),
            formula: format!(
                "{cm:.1} cm / 10 x {} sts",
                format_density(self.gauge.stitches_per_10cm)
            ),
            raw_result: cm / 10.0 * self.gauge.stitches_per_10cm,
            rounded_result: stitches,
            rounding_note: None,
        };
        Ok((stitches, step))
    }

    /// Convert a length and record the step
    ///
    /// # Errors
    ///
    /// Returns an error if `cm` is not finite
    pub fn rows_step(&self, description: &str, cm: f64) -> Result<(i64, CalculationStep)> {
        let rows = self.rows_for(cm)?;
        let step = CalculationStep {
            description: description.to_string(),
            formula: format!(
                "{cm:.1} cm / 10 x {} rows",
                format_density(self.gauge.rows_per_10cm)
            ),
            raw_result: cm / 10.0 * self.gauge.rows_per_10cm,
            rounded_result: rows,
            rounding_note: None,
        };
        Ok((rows, step))
    }

    /// Convert a width, align it to a repeat, and record the step
    ///
    /// The recorded step carries the rounding note whenever alignment
    /// changed the count.
    ///
    /// # Errors
    ///
    /// Returns an error if `cm` is not finite
    pub fn aligned_stitches_step(
        &self,
        description: &str,
        cm: f64,
        multiple: i64,
        extra: i64,
    ) -> Result<(i64, CalculationStep)> {
        let (stitches, mut step) = self.stitches_step(description, cm)?;
        let rounded = round_to_repeat(stitches, multiple, extra);
        step.rounded_result = rounded.value;
        step.rounding_note = rounded.note;
        Ok((rounded.value, step))
    }
}

fn format_density(density: f64) -> String {
    if density.fract() == 0.0 {
        format!("{density:.0}")
    } else {
        format!("{density:.1}")
    }
}
