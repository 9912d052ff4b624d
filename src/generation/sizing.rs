//! Body and sleeve dimensions derived from measurements at the pattern gauge
//!
//! Each piece derives the dimensions it needs through the shared
//! [`GaugeConverter`], so a malformed arm measurement only fails the sleeves
//! while the body pieces are still generated.

use crate::generation::pieces::PieceContext;
use crate::io::configuration::{
    BACK_NECK_DEPTH_CM, BOAT_DEPTH_CM, CREW_FRONT_DEPTH_CM, CUFF_EASE_CM, FRONT_BAND_CM,
    HOOD_HEIGHT_CM, OVERSIZED_ARMHOLE_CM, RAGLAN_SLEEVE_TOP_CM, UNDERARM_CM,
};
use crate::io::error::Result;
use crate::model::garment::{FitStyle, SleeveLength, SleeveStyle};
use crate::model::measurements::MeasurementField;
use crate::model::pattern::CalculationStep;

/// Round up to the next even count
pub const fn even(count: i64) -> i64 {
    count + count.rem_euclid(2)
}

/// Armhole depth in centimeters for the garment's fit and sleeve style
///
/// # Errors
///
/// Returns an error if chest or ease is not finite
pub fn armhole_depth_cm(ctx: &PieceContext<'_>) -> Result<f64> {
    let chest = ctx.measurements.require(MeasurementField::Chest)?;
    let ease = ctx.measurements.require(MeasurementField::Ease)?;
    let mut depth = ((chest + ease) / 8.0 + 7.0).clamp(15.0, 28.0);
    if ctx.garment.fit == FitStyle::Oversized {
        depth += OVERSIZED_ARMHOLE_CM;
    }
    if ctx.garment.sleeve_style == SleeveStyle::DropShoulder {
        depth += 2.0;
    }
    Ok(depth)
}

/// Body dimensions shared by backs, fronts, seamless bodies and yokes
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDims {
    /// Calculation trail for every derived figure
    pub steps: Vec<CalculationStep>,
    /// Full chest circumference, aligned to the rib repeat
    pub circumference_sts: i64,
    /// Full hem circumference, aligned to the rib repeat
    pub hem_circumference_sts: i64,
    /// Flat back or front width at the chest, repeat plus edge stitches
    pub half_sts: i64,
    /// Flat back or front width at the hem
    pub hem_half_sts: i64,
    /// Hem ribbing rows
    pub hem_rows: i64,
    /// Shoulder to hem
    pub total_rows: i64,
    /// Underarm to shoulder
    pub armhole_rows: i64,
    /// Top of ribbing to underarm, may be non-positive for short bodies
    pub lower_rows: i64,
    /// Stitches held or bound off at each underarm
    pub underarm_sts: i64,
    /// Shoulder to shoulder across the back
    pub cross_back_sts: i64,
    /// Neck width for crew, V and hood necklines
    pub neck_sts: i64,
    /// Neck width for boat necklines
    pub boat_neck_sts: i64,
    /// Back neck shaping depth
    pub back_neck_rows: i64,
    /// Crew front neck depth
    pub front_neck_rows: i64,
    /// V-neck depth
    pub v_neck_rows: i64,
    /// Boat neck depth
    pub boat_rows: i64,
    /// Neckband and border height
    pub neckband_rows: i64,
    /// Cardigan front band width
    pub band_sts: i64,
    /// Stitches picked up for a hood
    pub hood_sts: i64,
    /// Hood height
    pub hood_rows: i64,
}

impl BodyDims {
    /// Derive body dimensions for the piece context
    ///
    /// # Errors
    ///
    /// Returns an error if a body measurement is not finite
    pub fn derive(ctx: &PieceContext<'_>) -> Result<Self> {
        let m = ctx.measurements;
        m.require_all(&[
            MeasurementField::Chest,
            MeasurementField::Ease,
            MeasurementField::BodyLength,
            MeasurementField::ShoulderWidth,
            MeasurementField::Hip,
        ])?;
        let conv = ctx.converter;
        let cfg = ctx.config;
        let mut steps = Vec::new();

        let finished_chest = m.chest_circumference + m.ease;
        let hem_cm = if ctx.garment.fit == FitStyle::Fitted {
            m.hip_circumference + m.ease
        } else {
            finished_chest
        };

        let (circumference_sts, step) = conv.aligned_stitches_step(
            "Body circumference at chest",
            finished_chest,
            cfg.rib_multiple,
            0,
        )?;
        steps.push(step);
        let (hem_circumference_sts, step) = conv.aligned_stitches_step(
            "Body circumference at hem",
            hem_cm,
            cfg.rib_multiple,
            0,
        )?;
        steps.push(step);
        let (half_sts, step) = conv.aligned_stitches_step(
            "Back or front width at chest",
            finished_chest / 2.0,
            cfg.rib_multiple,
            cfg.flat_edge_stitches,
        )?;
        steps.push(step);
        let (hem_half_sts, step) = conv.aligned_stitches_step(
            "Back or front width at hem",
            hem_cm / 2.0,
            cfg.rib_multiple,
            cfg.flat_edge_stitches,
        )?;
        steps.push(step);

        let (hem_rows, step) = conv.rows_step("Hem ribbing", cfg.hem_ribbing_cm)?;
        steps.push(step);
        let (total_rows, step) = conv.rows_step("Body length", m.body_length)?;
        steps.push(step);
        let (armhole_rows, step) = conv.rows_step("Armhole depth", armhole_depth_cm(ctx)?)?;
        steps.push(step);
        let lower_rows = total_rows - armhole_rows - hem_rows;
        steps.push(CalculationStep {
            description: "Rows from ribbing to underarm".to_string(),
            formula: format!("{total_rows} - {armhole_rows} - {hem_rows}"),
            raw_result: lower_rows as f64,
            rounded_result: lower_rows,
            rounding_note: None,
        });

        let (underarm, step) = conv.stitches_step("Underarm stitches", UNDERARM_CM)?;
        steps.push(step);
        let underarm_sts = even(underarm);

        let (cross_back_sts, step) = conv.stitches_step("Cross-back width", m.shoulder_width)?;
        steps.push(step);
        let (neck_sts, step) = conv.stitches_step("Neck width", m.shoulder_width * 0.38)?;
        steps.push(step);
        let (boat_neck_sts, step) =
            conv.stitches_step("Boat neck width", m.shoulder_width * 0.6)?;
        steps.push(step);

        let (back_neck_rows, step) = conv.rows_step("Back neck depth", BACK_NECK_DEPTH_CM)?;
        steps.push(step);
        let (front_neck_rows, step) = conv.rows_step("Crew neck depth", CREW_FRONT_DEPTH_CM)?;
        steps.push(step);
        let (v_neck_rows, step) = conv.rows_step(
            "V-neck depth",
            conv.cm_for_rows(armhole_rows) * 0.9,
        )?;
        steps.push(step);
        let (boat_rows, step) = conv.rows_step("Boat neck depth", BOAT_DEPTH_CM)?;
        steps.push(step);
        let (neckband_rows, step) = conv.rows_step("Neckband height", cfg.neckband_cm)?;
        steps.push(step);
        let (band, step) = conv.stitches_step("Front band width", FRONT_BAND_CM)?;
        steps.push(step);
        let band_sts = even(band.max(4));

        let neck_around_cm = m.shoulder_width * 0.38 * 2.0 + CREW_FRONT_DEPTH_CM * 2.0;
        let (hood, step) = conv.stitches_step("Hood pick-up", neck_around_cm)?;
        steps.push(step);
        let hood_sts = even(hood);
        let (hood_rows, step) = conv.rows_step("Hood height", HOOD_HEIGHT_CM)?;
        steps.push(step);

        Ok(Self {
            steps,
            circumference_sts,
            hem_circumference_sts,
            half_sts,
            hem_half_sts,
            hem_rows,
            total_rows,
            armhole_rows,
            lower_rows,
            underarm_sts,
            cross_back_sts,
            neck_sts,
            boat_neck_sts,
            back_neck_rows,
            front_neck_rows,
            v_neck_rows,
            boat_rows,
            neckband_rows,
            band_sts,
            hood_sts,
            hood_rows,
        })
    }

    /// Stitches on each of the back and front once the underarms are held
    pub const fn section_sts(&self) -> i64 {
        self.circumference_sts / 2 - self.underarm_sts
    }
}

/// Sleeve dimensions for flat and seamless sleeves
#[derive(Clone, Debug, PartialEq)]
pub struct SleeveDims {
    /// Calculation trail for every derived figure
    pub steps: Vec<CalculationStep>,
    /// Cuff for a flat sleeve, repeat plus edge stitches
    pub cuff_flat_sts: i64,
    /// Cuff for a sleeve in the round, aligned to the repeat
    pub cuff_round_sts: i64,
    /// Width at the upper arm
    pub upper_sts: i64,
    /// Cuff ribbing rows
    pub cuff_rows: i64,
    /// Rows available for the cuff-to-upper-arm taper
    pub taper_rows: i64,
    /// Straight rows between taper and underarm
    pub straight_rows: i64,
    /// Set-in or drop-shoulder cap height
    pub cap_rows: i64,
    /// Stitches left at the top of a set-in cap
    pub cap_top_sts: i64,
    /// Minimum stitches at the top of a raglan sleeve
    pub raglan_top_sts: i64,
    /// Cuff is wider than the upper arm
    pub reversed: bool,
}

impl SleeveDims {
    /// Derive sleeve dimensions for the piece context
    ///
    /// # Errors
    ///
    /// Returns an error if an arm or body measurement is not finite
    pub fn derive(ctx: &PieceContext<'_>) -> Result<Self> {
        let m = ctx.measurements;
        m.require_all(&[
            MeasurementField::ArmLength,
            MeasurementField::Wrist,
            MeasurementField::Bicep,
            MeasurementField::Ease,
            MeasurementField::Chest,
            MeasurementField::ShoulderWidth,
        ])?;
        let conv = ctx.converter;
        let cfg = ctx.config;
        let style = ctx.garment.sleeve_style;
        let mut steps = Vec::new();
        let armhole_cm = armhole_depth_cm(ctx)?;

        let upper_cm = match style {
            SleeveStyle::DropShoulder => {
                (m.bicep_circumference + m.ease / 2.0).max(armhole_cm * 2.0)
            }
            _ => m.bicep_circumference + m.ease / 2.0,
        };
        let (cuff_cm, cuff_rib_cm, total_cm) = match ctx.garment.sleeve_length {
            SleeveLength::ThreeQuarter => (
                m.wrist_circumference
                    + (m.bicep_circumference - m.wrist_circumference) * 0.5
                    + CUFF_EASE_CM,
                cfg.cuff_ribbing_cm,
                m.arm_length * 0.7,
            ),
            SleeveLength::Short => (upper_cm * 0.95, cfg.neckband_cm, m.arm_length * 0.3),
            SleeveLength::Long | SleeveLength::None | SleeveLength::Unknown => (
                m.wrist_circumference + CUFF_EASE_CM,
                cfg.cuff_ribbing_cm,
                m.arm_length,
            ),
        };
        let top_cm = match style {
            SleeveStyle::SetIn | SleeveStyle::Unknown => armhole_cm * 0.7,
            SleeveStyle::Raglan => armhole_cm,
            SleeveStyle::DropShoulder => {
                ((m.chest_circumference + m.ease) / 2.0 - m.shoulder_width).max(0.0) / 2.0
            }
            SleeveStyle::None => 0.0,
        };

        let (cuff_flat_sts, step) = conv.aligned_stitches_step(
            "Cuff width (flat)",
            cuff_cm,
            cfg.rib_multiple,
            cfg.flat_edge_stitches,
        )?;
        steps.push(step);
        let (cuff_round_sts, step) =
            conv.aligned_stitches_step("Cuff circumference", cuff_cm, cfg.rib_multiple, 0)?;
        steps.push(step);
        let (upper, step) = conv.stitches_step("Upper arm width", upper_cm)?;
        steps.push(step);

        let reversed = upper < cuff_flat_sts;
        let mut upper_sts = upper.max(cuff_flat_sts);
        if (upper_sts - cuff_flat_sts) % 2 != 0 {
            upper_sts += 1;
        }

        let (cuff_rows, step) = conv.rows_step("Cuff ribbing", cuff_rib_cm)?;
        steps.push(step);
        let (underarm_rows, step) =
            conv.rows_step("Sleeve length to underarm", (total_cm - top_cm).max(0.0))?;
        steps.push(step);
        let (straight, step) = conv.rows_step("Straight rows below underarm", 3.0)?;
        steps.push(step);
        let mut taper_rows = underarm_rows - cuff_rows - straight;
        let straight_rows = if taper_rows < 0 {
            taper_rows = underarm_rows - cuff_rows;
            0
        } else {
            straight
        };

        let cap_cm = match style {
            SleeveStyle::DropShoulder => 2.5,
            _ => armhole_cm * 0.7,
        };
        let (cap_rows, step) = conv.rows_step("Cap height", cap_cm)?;
        steps.push(step);
        let (cap_top, step) = conv.stitches_step("Cap top width", 5.0)?;
        steps.push(step);
        let (raglan_top, step) = conv.stitches_step("Raglan sleeve top", RAGLAN_SLEEVE_TOP_CM)?;
        steps.push(step);

        Ok(Self {
            steps,
            cuff_flat_sts,
            cuff_round_sts,
            upper_sts,
            cuff_rows,
            taper_rows,
            straight_rows,
            cap_rows,
            cap_top_sts: even(cap_top.max(2)),
            raglan_top_sts: even(raglan_top.max(2)),
            reversed,
        })
    }
}
