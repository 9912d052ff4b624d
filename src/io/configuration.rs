//! Knitting constants and runtime configuration defaults

// Ribbing and edge conventions
/// Stitch repeat of the 2x2 ribbing used for hems, cuffs and bands
pub const RIB_MULTIPLE: i64 = 4;
/// Extra stitches on flat pieces so the ribbing is symmetric at both edges
pub const FLAT_EDGE_STITCHES: i64 = 2;
/// Height of the hem ribbing in centimeters
pub const HEM_RIBBING_CM: f64 = 5.0;
/// Height of the cuff ribbing in centimeters
pub const CUFF_RIBBING_CM: f64 = 5.0;
/// Height of neckbands and armhole borders in centimeters
pub const NECKBAND_CM: f64 = 2.5;
/// Width of cardigan front bands in centimeters
pub const FRONT_BAND_CM: f64 = 2.5;
/// Fewest ribbing rows that still form a usable edge
pub const MIN_RIBBING_ROWS: i64 = 4;

// Body proportions
/// Width of the underarm stitches held or bound off at each side
pub const UNDERARM_CM: f64 = 5.0;
/// Extra armhole depth for oversized garments
pub const OVERSIZED_ARMHOLE_CM: f64 = 2.0;
/// Ease added to the wrist for a comfortable cuff
pub const CUFF_EASE_CM: f64 = 2.0;
/// Width of each sleeve top at the raglan neck edge
pub const RAGLAN_SLEEVE_TOP_CM: f64 = 3.0;
/// Depth of a crew neck on the front
pub const CREW_FRONT_DEPTH_CM: f64 = 7.0;
/// Depth of the back neck shaping
pub const BACK_NECK_DEPTH_CM: f64 = 2.0;
/// Depth of a boat neck opening below the shoulder line
pub const BOAT_DEPTH_CM: f64 = 1.5;
/// Height of a hood from neck edge to crown seam
pub const HOOD_HEIGHT_CM: f64 = 34.0;
/// Length of body per button when no count is supplied
pub const CM_PER_BUTTON: f64 = 8.0;
/// Fewest buttons derived from body length
pub const MIN_BUTTONS: u32 = 4;
/// Most buttons derived from body length
pub const MAX_BUTTONS: u32 = 10;
/// Smallest stitch count any width is clamped to
pub const MIN_PIECE_STITCHES: i64 = 4;

// Yarn estimation
/// Meters of yarn per square centimeter of fabric at reference gauge
pub const METERS_PER_CM2: f64 = 0.008;
/// Stitches x rows per 10 cm square at the reference gauge
pub const GAUGE_REFERENCE_DENSITY: f64 = 600.0;
/// Fraction of body area kept after armhole curvature
pub const ARMHOLE_AREA_FACTOR: f64 = 0.95;
/// Height of the hem and cuff ribbing bands counted by the estimator
pub const RIBBING_BAND_CM: f64 = 5.0;
/// Share of full sleeve area used for short and three-quarter sleeves
pub const SHORT_SLEEVE_AREA_FACTOR: f64 = 0.5;
/// Button band surcharge on cardigans
pub const CARDIGAN_SURCHARGE: f64 = 1.05;
/// Area multiplier for vests
pub const VEST_FACTOR: f64 = 0.7;
/// Lower bound of the yardage range relative to the estimate
pub const RANGE_MIN_FACTOR: f64 = 0.9;
/// Upper bound of the yardage range relative to the estimate
pub const RANGE_MAX_FACTOR: f64 = 1.15;

// Adjustment search bounds
/// Body length never suggested below this
pub const MIN_BODY_LENGTH_CM: f64 = 40.0;
/// Ease never suggested below this
pub const MIN_EASE_CM: f64 = 2.0;
/// Arm length never suggested below this
pub const MIN_ARM_LENGTH_CM: f64 = 20.0;

// Disclaimer thresholds
/// Overall confidence at or above which the reading is reported as high
pub const HIGH_CONFIDENCE: f64 = 0.8;
/// Overall confidence at or above which the reading is reported as medium
pub const MEDIUM_CONFIDENCE: f64 = 0.5;
/// Sub-field confidence below which the field is listed as uncertain
pub const FIELD_CONFIDENCE_WARNING: f64 = 0.5;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Default values for configurable parameters
/// Fixed seed for reproducible pattern ids
pub const DEFAULT_SEED: u64 = 42;
/// Language tag used when a request does not name one
pub const DEFAULT_LANGUAGE: &str = "en";

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_pattern";
