//! Pattern orchestration: pieces, assembly and finishing lists, disclaimer
//! and yarn report

use crate::generation::flat::button_count;
use crate::generation::pieces::{PieceContext, generate_piece, piece_order};
use crate::generation::sizing::BodyDims;
use crate::io::configuration::{
    CUFF_RIBBING_CM, FIELD_CONFIDENCE_WARNING, FLAT_EDGE_STITCHES, HEM_RIBBING_CM,
    HIGH_CONFIDENCE, MEDIUM_CONFIDENCE, MIN_RIBBING_ROWS, NECKBAND_CM, RIB_MULTIPLE,
};
use crate::io::error::Result;
use crate::math::gauge::{GaugeConverter, round_to_multiple};
use crate::model::garment::{
    Closure, Construction, GarmentAnalysis, NecklineType, ResolvedGarment,
    SleeveStyle,
};
use crate::model::measurements::{Gauge, Measurements, YarnInfo};
use crate::model::pattern::{
    ConfidenceLevel, Disclaimer, GeneratedPattern, Param, PatternPiece, PieceFailure, PieceRole,
    Text, TextKey,
};
use crate::yarn::estimator::{EstimatorConfig, YardageRange, YarnEstimator, YarnReport, classify};
use chrono::Utc;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{info, warn};

/// Knitting conventions applied to every piece
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Stitch repeat of the ribbing
    pub rib_multiple: i64,
    /// Extra stitches on flat pieces for symmetric ribbing
    pub flat_edge_stitches: i64,
    /// Hem ribbing height in centimeters
    pub hem_ribbing_cm: f64,
    /// Cuff ribbing height in centimeters
    pub cuff_ribbing_cm: f64,
    /// Neckband and border height in centimeters
    pub neckband_cm: f64,
    /// Fewest rows any ribbing may have
    pub min_ribbing_rows: i64,
    /// Yarn consumption calibration
    pub estimator: EstimatorConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            rib_multiple: RIB_MULTIPLE,
            flat_edge_stitches: FLAT_EDGE_STITCHES,
            hem_ribbing_cm: HEM_RIBBING_CM,
            cuff_ribbing_cm: CUFF_RIBBING_CM,
            neckband_cm: NECKBAND_CM,
            min_ribbing_rows: MIN_RIBBING_ROWS,
            estimator: EstimatorConfig::default(),
        }
    }
}

/// Builds complete patterns from a garment reading, gauge and measurements
///
/// Everything except the identifier and timestamp is a pure function of the
/// inputs; identifiers come from a seeded generator so a run is reproducible.
#[derive(Debug)]
pub struct PatternAssembler {
    config: GenerationConfig,
    rng: StdRng,
}

impl PatternAssembler {
    /// Create an assembler with a seed for pattern identifiers
    pub fn new(config: GenerationConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Conventions used by this assembler
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate the pattern for one request
    ///
    /// A piece whose measurements are unusable is reported in
    /// `failed_pieces` while the rest of the pattern is still generated.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge is not usable, since every piece
    /// depends on it
    pub fn generate(
        &mut self,
        analysis: &GarmentAnalysis,
        gauge: Gauge,
        measurements: &Measurements,
        yarn: &YarnInfo,
        language: &str,
    ) -> Result<GeneratedPattern> {
        let converter = GaugeConverter::new(gauge)?;
        let garment = ResolvedGarment::resolve(analysis);
        for fallback in &garment.fallbacks {
            warn!(
                field = %fallback.field,
                requested = %fallback.requested,
                used = %fallback.used,
                "analysis fallback"
            );
        }

        let ctx = PieceContext {
            garment: &garment,
            measurements,
            converter: &converter,
            config: &self.config,
        };

        let mut pieces = Vec::new();
        let mut failed_pieces = Vec::new();
        for role in piece_order(&garment) {
            match generate_piece(&ctx, role) {
                Ok(piece) => pieces.push(piece),
                Err(err) => {
                    warn!(piece = %role, error = %err, "piece skipped");
                    failed_pieces.push(PieceFailure {
                        role,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let dims = BodyDims::derive(&ctx).ok();
        let assembly_steps = assembly_steps(&garment);
        let finishing_steps = finishing_steps(&ctx, dims.as_ref(), &pieces);
        let disclaimer = disclaimer(analysis, &garment, &pieces);
        let yarn_report = self.yarn_report(&garment, measurements, &gauge, yarn);

        let pattern = GeneratedPattern {
            id: format!("{:016x}", self.rng.random::<u64>()),
            created_at: Utc::now(),
            language: language.to_string(),
            analysis: analysis.clone(),
            garment,
            gauge,
            measurements: *measurements,
            yarn: yarn.clone(),
            pieces,
            failed_pieces,
            assembly_steps,
            finishing_steps,
            disclaimer,
            estimated_yardage: yarn_report.needed,
            yarn_report,
        };
        info!(
            id = %pattern.id,
            pieces = pattern.pieces.len(),
            failed = pattern.failed_pieces.len(),
            warnings = pattern.disclaimer.warning_count,
            "generated pattern"
        );
        Ok(pattern)
    }

    fn yarn_report(
        &self,
        garment: &ResolvedGarment,
        measurements: &Measurements,
        gauge: &Gauge,
        yarn: &YarnInfo,
    ) -> YarnReport {
        let mut estimator = YarnEstimator::new(
            self.config.estimator,
            garment.garment,
            garment.has_long_sleeves(),
        );
        if !garment.has_sleeves() {
            estimator = estimator.without_sleeves();
        }
        estimator
            .report(measurements, gauge, yarn)
            .unwrap_or_else(|err| {
                warn!(error = %err, "yarn estimate unavailable");
                let needed = YardageRange::default();
                let available = yarn.available_meters();
                YarnReport {
                    needed,
                    available_meters: available,
                    status: classify(&needed, available),
                    adjustments: Vec::new(),
                }
            })
    }
}

/// Seaming order for the garment
///
/// Seamless garments get a single note instead of a seaming list.
pub fn assembly_steps(garment: &ResolvedGarment) -> Vec<Text> {
    if garment.construction.is_seamless() {
        return vec![Text::bare(TextKey::NoSeamingNeeded)];
    }
    let keys: &[TextKey] = match garment.sleeve_style {
        SleeveStyle::Raglan => &[TextKey::SewRaglanSeams, TextKey::SewSideAndSleeveSeams],
        SleeveStyle::DropShoulder => &[
            TextKey::SeamShoulders,
            TextKey::SewDropShoulderSleeves,
            TextKey::SewSideAndSleeveSeams,
        ],
        SleeveStyle::SetIn | SleeveStyle::Unknown => &[
            TextKey::SeamShoulders,
            TextKey::SetInSleeves,
            TextKey::SewSideAndSleeveSeams,
        ],
        SleeveStyle::None => &[TextKey::SeamShoulders, TextKey::SewSideSeams],
    };
    keys.iter().copied().map(Text::bare).collect()
}

/// Finishing order: joins left live by seamless work, bands, closures,
/// ends and blocking
pub fn finishing_steps(
    ctx: &PieceContext<'_>,
    dims: Option<&BodyDims>,
    pieces: &[PatternPiece],
) -> Vec<Text> {
    let garment = ctx.garment;
    let raglan = garment.sleeve_style == SleeveStyle::Raglan;
    let mut steps = Vec::new();

    match (garment.construction, raglan) {
        (Construction::SeamlessBottomUp, true) => {
            if let Some(dims) = dims {
                steps.push(Text::new(
                    TextKey::GraftUnderarms,
                    vec![Param::Count(dims.underarm_sts)],
                ));
            }
        }
        (Construction::SeamlessBottomUp | Construction::SeamlessTopDown, false) => {
            steps.push(Text::bare(TextKey::JoinShouldersThreeNeedle));
        }
        (Construction::Assembled | Construction::SeamlessTopDown, _) => {}
    }

    let has_neckband = pieces
        .iter()
        .flat_map(|piece| &piece.instructions)
        .any(|ins| ins.text.key == TextKey::Neckband);
    if !has_neckband
        && let Some(dims) = dims
        && let Some(stitches) = neckband_stitches(garment.neckline, dims, ctx.config.rib_multiple)
    {
        let rows = dims.neckband_rows.max(ctx.config.min_ribbing_rows);
        steps.push(Text::new(
            TextKey::PickUpNeckband,
            vec![Param::Count(stitches), Param::Count(rows)],
        ));
    }

    if let Some(border) = pieces
        .iter()
        .find(|piece| piece.role == PieceRole::ArmholeBorder)
    {
        steps.push(Text::new(
            TextKey::FinishArmholeBorders,
            vec![
                Param::Count(i64::from(border.cast_on_stitches)),
                Param::Count(i64::from(border.total_rows)),
            ],
        ));
    }
    if garment.neckline == NecklineType::Hood {
        steps.push(Text::bare(TextKey::FoldHoodSeam));
    }

    match garment.closure {
        Closure::Buttons { .. } => {
            let count = button_count(ctx);
            if count > 0 {
                steps.push(Text::new(
                    TextKey::SewButtons,
                    vec![Param::Count(i64::from(count))],
                ));
            }
        }
        Closure::Zip => {
            if let Some(dims) = dims {
                let length = ctx.converter.cm_for_rows(dims.total_rows - dims.hem_rows);
                steps.push(Text::new(TextKey::SewZip, vec![Param::Cm(length)]));
            }
        }
        Closure::None | Closure::Unknown => {}
    }

    steps.push(Text::bare(TextKey::WeaveInEnds));
    steps.push(Text::bare(TextKey::Block));
    steps
}

/// Stitches picked up around a flat neck opening, three for every four rows
/// along the shaped edges
fn neckband_stitches(neckline: NecklineType, dims: &BodyDims, multiple: i64) -> Option<i64> {
    let around = match neckline {
        NecklineType::Crew | NecklineType::Unknown => {
            2 * dims.neck_sts + 2 * (dims.front_neck_rows * 3 / 4)
        }
        NecklineType::VNeck => dims.neck_sts + 2 * (dims.v_neck_rows * 3 / 4),
        NecklineType::Boat => 2 * dims.boat_neck_sts,
        NecklineType::OpenCardigan | NecklineType::Hood => return None,
    };
    Some(round_to_multiple(around.max(multiple), multiple).value)
}

/// Banded confidence for an overall score
pub fn confidence_level(confidence: f64) -> ConfidenceLevel {
    if confidence >= HIGH_CONFIDENCE {
        ConfidenceLevel::High
    } else if confidence >= MEDIUM_CONFIDENCE {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

/// Self-reported uncertainty of a pattern
pub fn disclaimer(
    analysis: &GarmentAnalysis,
    garment: &ResolvedGarment,
    pieces: &[PatternPiece],
) -> Disclaimer {
    let overall_confidence = if analysis.overall_confidence.is_finite() {
        analysis.overall_confidence.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let uncertain_fields = analysis
        .confidence
        .entries()
        .iter()
        .filter(|(_, confidence)| confidence.is_nan() || *confidence < FIELD_CONFIDENCE_WARNING)
        .map(|(name, _)| (*name).to_string())
        .collect();
    Disclaimer {
        overall_confidence,
        level: confidence_level(overall_confidence),
        uncertain_fields,
        limitations: analysis.limitations.clone(),
        fallbacks: garment.fallbacks.clone(),
        warning_count: pieces.iter().map(|piece| piece.warnings.len()).sum(),
    }
}
