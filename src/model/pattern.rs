//! Generated pattern structure handed to renderers and row trackers
//!
//! Instruction text is never assembled here: each instruction carries a
//! semantic [`TextKey`] plus ordered [`Param`]s, and a renderer turns that
//! into prose for a given language.

use crate::model::garment::{Fallback, GarmentAnalysis, ResolvedGarment};
use crate::model::measurements::{Gauge, Measurements, YarnInfo};
use crate::yarn::estimator::{YardageRange, YarnReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a piece is worked in rows or rounds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowUnit {
    /// Back and forth on a flat piece
    Rows,
    /// Continuously in the round
    Rounds,
}

/// Ordered parameter substituted into a rendered template
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Param {
    /// Stitch, row or repeat count
    Count(i64),
    /// Length in centimeters
    Cm(f64),
    /// Row or round
    Unit(RowUnit),
    /// Section or piece label
    Label(String),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Cm(cm) => write!(f, "{cm:.1} cm"),
            Self::Unit(RowUnit::Rows) => f.write_str("rows"),
            Self::Unit(RowUnit::Rounds) => f.write_str("rounds"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Semantic key selecting a template in the renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextKey {
    // Cast on and ribbing
    /// `[stitches]`
    CastOn,
    /// `[stitches]`
    CastOnInRound,
    /// `[rows, unit]`
    Ribbing,
    /// `[rows, unit]`
    Stockinette,

    // Gradual shaping
    /// `[stitches per event, interval, times, unit]`
    Increase,
    /// `[stitches per event, interval, times, unit]`
    Decrease,
    /// `[stitches per event, interval, times, unit]`
    RaglanIncrease,
    /// `[stitches per event, interval, times, unit]`
    RaglanDecrease,
    /// `[interval, times]`
    NeckEdgeDecreaseAtSameTime,
    /// `[interval, times]`
    NeckEdgeIncreaseAtSameTime,

    // Bind-offs and divisions
    /// `[stitches]`
    ArmholeBindOff,
    /// `[stitches]`
    HoldUnderarms,
    /// `[stitches]`
    CenterBindOff,
    /// `[stitches, edge]`
    EdgeBindOff,
    /// `[held stitches]`
    DivideForVNeck,
    /// `[stitches]`
    ShoulderStep,
    /// `[stitches]`
    BindOffRemaining,
    /// `[stitches]`
    PlaceOnHold,
    /// `[]`
    MarkArmholes,

    // Cardigan fronts
    /// `[band stitches]`
    FrontBand,
    /// `[band stitches, hole stitches, button number]`
    Buttonhole,

    // Seamless yoke and sleeves
    /// `[back, front, sleeve]`
    RaglanMarkers,
    /// `[stitches]`
    JoinYoke,
    /// `[sleeve stitches, underarm stitches]`
    SeparateYoke,
    /// `[stitches]`
    CastOnNeck,
    /// `[stitches]`
    JoinInRound,
    /// `[stitches]`
    PickUpSleeve,
    /// `[stitches]`
    ResumeHeld,
    /// `[rows]`
    BackNeckShortRows,
    /// `[stitches, rows, unit]`
    Neckband,
    /// `[stitches]`
    PickUpHood,
    /// `[stitches]`
    PickUpArmholeBorder,
    /// `[stitches]`
    HoodTopSeam,

    // Assembly
    /// `[]`
    NoSeamingNeeded,
    /// `[]`
    SeamShoulders,
    /// `[]`
    JoinShouldersThreeNeedle,
    /// `[]`
    SetInSleeves,
    /// `[]`
    SewDropShoulderSleeves,
    /// `[]`
    SewRaglanSeams,
    /// `[]`
    SewSideAndSleeveSeams,
    /// `[]`
    SewSideSeams,
    /// `[stitches]`
    GraftUnderarms,

    // Finishing
    /// `[stitches, rows]`
    PickUpNeckband,
    /// `[stitches, rows]`
    FinishArmholeBorders,
    /// `[]`
    FoldHoodSeam,
    /// `[]`
    WeaveInEnds,
    /// `[]`
    Block,
    /// `[count]`
    SewButtons,
    /// `[length]`
    SewZip,

    // Warnings
    /// `[section, requested, used]`
    WarnClamped,
    /// `[section, events, rows]`
    WarnEveryRowShaping,
    /// `[section, rows short]`
    WarnNoRoom,
    /// `[requested rows, used rows]`
    WarnShortRibbing,
    /// `[]`
    WarnSleeveTaperReversed,
}

/// A template key with its parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// Template to render
    pub key: TextKey,
    /// Ordered parameters for the template
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
}

impl Text {
    /// Text with parameters
    pub const fn new(key: TextKey, params: Vec<Param>) -> Self {
        Self { key, params }
    }

    /// Text without parameters
    pub const fn bare(key: TextKey) -> Self {
        Self {
            key,
            params: Vec::new(),
        }
    }
}

/// One instruction spanning a contiguous range of rows
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    /// First row, 1-based
    pub row_start: u32,
    /// Last row, inclusive
    pub row_end: u32,
    /// What to do on these rows
    pub text: Text,
    /// Concurrent instruction or reminder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Text>,
}

impl Instruction {
    /// Whether `row` falls within this instruction
    pub const fn covers(&self, row: u32) -> bool {
        self.row_start <= row && row <= self.row_end
    }

    /// Number of rows covered
    pub const fn rows(&self) -> u32 {
        self.row_end + 1 - self.row_start
    }
}

/// Auditable record of a derived count and how it was rounded
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationStep {
    /// What was computed
    pub description: String,
    /// How it was computed
    pub formula: String,
    /// Unrounded value
    pub raw_result: f64,
    /// Value used by the pattern
    pub rounded_result: i64,
    /// Why the used value differs from the raw one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounding_note: Option<String>,
}

/// Section of the garment a piece represents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PieceRole {
    /// Flat back, or the upper back of a seamless body
    Back,
    /// Flat pullover front, or the upper front of a seamless body
    Front,
    /// Cardigan front carrying the buttons
    LeftFront,
    /// Cardigan front carrying the buttonholes
    RightFront,
    /// Seamless lower body
    Body,
    /// Sleeve, knitted twice
    Sleeve,
    /// Seamless raglan yoke
    Yoke,
    /// Hood picked up from the neckline
    Hood,
    /// Border picked up around each armhole of a sleeveless garment
    ArmholeBorder,
}

impl PieceRole {
    /// Display name of the piece
    pub const fn name(self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Front => "Front",
            Self::LeftFront => "Left Front",
            Self::RightFront => "Right Front",
            Self::Body => "Body",
            Self::Sleeve => "Sleeve",
            Self::Yoke => "Yoke",
            Self::Hood => "Hood",
            Self::ArmholeBorder => "Armhole Border",
        }
    }
}

impl fmt::Display for PieceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single knitted section with row-by-row instructions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternPiece {
    /// Display name
    pub name: String,
    /// Section of the garment
    pub role: PieceRole,
    /// How many identical pieces to knit
    pub quantity: u32,
    /// Stitches cast on or picked up to start the piece
    pub cast_on_stitches: u32,
    /// Rows from first to last instruction
    pub total_rows: u32,
    /// Gap-free, ordered row ranges covering `1..=total_rows`
    pub instructions: Vec<Instruction>,
    /// Every derived count and its rounding
    pub calculations: Vec<CalculationStep>,
    /// Physical-infeasibility conditions recovered by clamping
    pub warnings: Vec<Text>,
}

impl PatternPiece {
    /// The instruction governing `row`, if it lies within the piece
    pub fn instruction_at(&self, row: u32) -> Option<&Instruction> {
        self.instructions.iter().find(|ins| ins.covers(row))
    }

    /// Whether instructions are sorted, disjoint and cover every row
    pub fn covers_all_rows(&self) -> bool {
        let mut expected = 1;
        for ins in &self.instructions {
            if ins.row_start != expected || ins.row_end < ins.row_start {
                return false;
            }
            expected = ins.row_end + 1;
        }
        expected == self.total_rows + 1
    }
}

/// A piece that could not be generated because of malformed input
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceFailure {
    /// Section that was skipped
    pub role: PieceRole,
    /// Why it was skipped
    pub reason: String,
}

/// How far the garment reading can be trusted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceLevel {
    /// Reading is reliable
    High,
    /// Some details may differ from the photo
    Medium,
    /// Treat the pattern as a starting point only
    Low,
}

/// Self-reported uncertainty of the pattern
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disclaimer {
    /// Overall analysis confidence, from 0 to 1
    pub overall_confidence: f64,
    /// Banded confidence
    pub level: ConfidenceLevel,
    /// Sub-fields read with low confidence
    pub uncertain_fields: Vec<String>,
    /// Limitations reported by the analysis
    pub limitations: Vec<String>,
    /// Substitutions made to fit the supported taxonomy
    pub fallbacks: Vec<Fallback>,
    /// Total warnings across all pieces
    pub warning_count: usize,
}

/// Complete pattern for one request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPattern {
    /// Opaque identifier
    pub id: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Language tag the pattern is rendered in
    pub language: String,
    /// Source garment reading
    pub analysis: GarmentAnalysis,
    /// Reading after fallbacks
    pub garment: ResolvedGarment,
    /// Source gauge
    pub gauge: Gauge,
    /// Source measurements
    pub measurements: Measurements,
    /// Source yarn
    pub yarn: YarnInfo,
    /// Pieces in knitting order
    pub pieces: Vec<PatternPiece>,
    /// Pieces skipped because of malformed input
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_pieces: Vec<PieceFailure>,
    /// Seaming order, or a single no-seaming note
    pub assembly_steps: Vec<Text>,
    /// Finishing order
    pub finishing_steps: Vec<Text>,
    /// Confidence summary
    pub disclaimer: Disclaimer,
    /// Yardage needed
    pub estimated_yardage: YardageRange,
    /// Stock comparison and suggestions
    pub yarn_report: YarnReport,
}

impl GeneratedPattern {
    /// Look up a piece by role
    pub fn piece(&self, role: PieceRole) -> Option<&PatternPiece> {
        self.pieces.iter().find(|piece| piece.role == role)
    }
}
