//! Turning semantic instruction keys into prose
//!
//! Generation only emits [`Text`] values. A [`Renderer`] is passed explicitly
//! to whatever needs final wording, so the generator never depends on a
//! language table.

use crate::io::configuration::DEFAULT_LANGUAGE;
use crate::model::pattern::{
    GeneratedPattern, Instruction, Param, PatternPiece, RowUnit, Text, TextKey,
};
use std::fmt::Write as _;
use tracing::warn;

/// Renders semantic text in one language
pub trait Renderer {
    /// Language tag of the rendered text
    fn language(&self) -> &str;

    /// Render a key and its parameters
    fn render(&self, text: &Text) -> String;
}

/// Keyed template table with positional `{n}` placeholders
#[derive(Clone, Copy, Debug)]
pub struct TemplateRenderer {
    language: &'static str,
    table: fn(TextKey) -> &'static str,
}

impl TemplateRenderer {
    /// English templates
    pub const fn english() -> Self {
        Self {
            language: DEFAULT_LANGUAGE,
            table: english,
        }
    }

    /// Templates for a language tag, falling back to English
    pub fn for_language(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if !primary.eq_ignore_ascii_case(DEFAULT_LANGUAGE) {
            warn!(language = tag, "no templates for language, using English");
        }
        Self::english()
    }

    /// Raw template for a key
    pub fn template(&self, key: TextKey) -> &'static str {
        (self.table)(key)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::english()
    }
}

impl Renderer for TemplateRenderer {
    fn language(&self) -> &str {
        self.language
    }

    fn render(&self, text: &Text) -> String {
        fill(self.template(text.key), text)
    }
}

/// Substitute `{n}` placeholders with the matching parameter
///
/// A placeholder without a parameter is rendered as `?`.
fn fill(template: &str, text: &Text) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let (before, after) = rest.split_at(open);
        out.push_str(before);
        let Some(close) = after.find('}') else {
            out.push_str(after);
            return out;
        };
        let inner = after.get(1..close).unwrap_or_default();
        match inner.parse::<usize>() {
            Ok(index) => match text.params.get(index) {
                Some(param) => {
                    let _ = write!(out, "{param}");
                }
                None => out.push('?'),
            },
            Err(_) => out.push_str(after.get(..=close).unwrap_or_default()),
        }
        rest = after.get(close + 1..).unwrap_or_default();
    }
    out.push_str(rest);
    out
}

const fn english(key: TextKey) -> &'static str {
    match key {
        TextKey::CastOn => "Cast on {0} stitches.",
        TextKey::CastOnInRound => {
            "Cast on {0} stitches and join to work in the round, taking care not to twist."
        }
        TextKey::Ribbing => "Work {0} {1} of 2x2 ribbing.",
        TextKey::Stockinette => "Work {0} {1} in stockinette stitch.",
        TextKey::Increase => "Increase {0} stitches every {1} {3}, {2} times.",
        TextKey::Decrease => "Decrease {0} stitches every {1} {3}, {2} times.",
        TextKey::RaglanIncrease => {
            "Increase {0} stitches along the raglan lines every {1} {3}, {2} times."
        }
        TextKey::RaglanDecrease => {
            "Decrease {0} stitches along the raglan lines every {1} {3}, {2} times."
        }
        TextKey::NeckEdgeDecreaseAtSameTime => {
            "At the same time, decrease 1 stitch at each neck edge every {0} rows, {1} times."
        }
        TextKey::NeckEdgeIncreaseAtSameTime => {
            "At the same time, increase 1 stitch at each neck edge every {0} rows, {1} times."
        }
        TextKey::ArmholeBindOff => "Bind off {0} stitches at the beginning of the next 2 rows.",
        TextKey::HoldUnderarms => {
            "Place {0} stitches at each underarm on hold and set the body aside."
        }
        TextKey::CenterBindOff => {
            "Bind off the center {0} stitches and work each side separately."
        }
        TextKey::EdgeBindOff => "Bind off {0} stitches at the {1} edge.",
        TextKey::DivideForVNeck => {
            "Divide for the V-neck: place the center {0} stitches on hold and work each side separately."
        }
        TextKey::ShoulderStep => {
            "Bind off {0} stitches at the beginning of the next 2 rows for the shoulder."
        }
        TextKey::BindOffRemaining => "Bind off the remaining {0} stitches.",
        TextKey::PlaceOnHold => {
            "Place {0} underarm stitches on hold and the rest on a spare needle for the yoke."
        }
        TextKey::MarkArmholes => {
            "Place a marker at each edge for the armhole and continue straight."
        }
        TextKey::FrontBand => "Keep the {0} front band stitches in ribbing throughout.",
        TextKey::Buttonhole => {
            "Buttonhole {2}: in the {0} band stitches, bind off {1} stitches and cast them on again on the next row."
        }
        TextKey::RaglanMarkers => {
            "Place raglan markers: {0} back, {1} front and {2} for each sleeve."
        }
        TextKey::JoinYoke => "Join body and sleeves on one needle: {0} stitches.",
        TextKey::SeparateYoke => {
            "Separate the sleeves: place {0} stitches of each sleeve on hold and cast on {1} underarm stitches."
        }
        TextKey::CastOnNeck => "Cast on {0} stitches at the neck edge.",
        TextKey::JoinInRound => "Cast on {0} stitches for the front neck and join in the round.",
        TextKey::PickUpSleeve => {
            "Pick up {0} stitches around the armhole, including the held underarm stitches, and join in the round."
        }
        TextKey::ResumeHeld => "Resume the {0} held stitches.",
        TextKey::BackNeckShortRows => "Work {0} rows of short rows across the back neck.",
        TextKey::Neckband => "Work a neckband of {1} {2} in 2x2 ribbing over {0} stitches.",
        TextKey::PickUpHood => "Pick up {0} stitches around the neckline for the hood.",
        TextKey::PickUpArmholeBorder => {
            "Pick up {0} stitches around the armhole and join in the round."
        }
        TextKey::HoodTopSeam => "Fold the hood in half and join the {0} stitches of each side.",
        TextKey::NoSeamingNeeded => "No seaming needed: the garment is worked in one piece.",
        TextKey::SeamShoulders => "Sew the shoulder seams.",
        TextKey::JoinShouldersThreeNeedle => "Join the shoulders with a three-needle bind-off.",
        TextKey::SetInSleeves => "Set in the sleeves, easing the cap into the armhole.",
        TextKey::SewDropShoulderSleeves => {
            "Sew the top of each sleeve between the armhole markers."
        }
        TextKey::SewRaglanSeams => "Sew the raglan seams.",
        TextKey::SewSideAndSleeveSeams => "Sew the side and sleeve seams in one line.",
        TextKey::SewSideSeams => "Sew the side seams.",
        TextKey::GraftUnderarms => "Graft the {0} held underarm stitches at each side.",
        TextKey::PickUpNeckband => {
            "Pick up {0} stitches around the neckline and work {1} rounds of 2x2 ribbing. Bind off loosely."
        }
        TextKey::FinishArmholeBorders => {
            "Work the armhole borders: {0} stitches, {1} rounds of ribbing."
        }
        TextKey::FoldHoodSeam => "Sew the hood's top seam.",
        TextKey::WeaveInEnds => "Weave in all ends.",
        TextKey::Block => "Block to the finished measurements.",
        TextKey::SewButtons => "Sew on {0} buttons opposite the buttonholes.",
        TextKey::SewZip => "Sew in a {0} separating zip.",
        TextKey::WarnClamped => "{0}: {1} was not workable, {2} was used instead.",
        TextKey::WarnEveryRowShaping => {
            "{0}: {1} shaping events in {2} rows, so shaping is worked every row."
        }
        TextKey::WarnNoRoom => "{0}: not enough rows for this section ({1} short).",
        TextKey::WarnShortRibbing => "Ribbing of {0} rows is too short, {1} rows are used.",
        TextKey::WarnSleeveTaperReversed => {
            "The cuff is wider than the upper arm, so the sleeve decreases towards the top."
        }
    }
}

fn row_label(instruction: &Instruction, unit: &str) -> String {
    if instruction.row_start == instruction.row_end {
        format!("{unit} {}", instruction.row_start)
    } else {
        format!("{unit}s {}-{}", instruction.row_start, instruction.row_end)
    }
}

fn unit_label(piece: &PatternPiece) -> &'static str {
    let rounds = piece.instructions.first().is_some_and(|ins| {
        ins.note
            .as_ref()
            .is_some_and(|note| note.key == TextKey::CastOnInRound)
            || ins
                .text
                .params
                .iter()
                .any(|param| *param == Param::Unit(RowUnit::Rounds))
    });
    if rounds { "Round" } else { "Row" }
}

/// Render one piece as plain text
pub fn render_piece(piece: &PatternPiece, renderer: &dyn Renderer) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} (x{}) ==", piece.name, piece.quantity);
    let _ = writeln!(
        out,
        "Cast on: {} stitches, {} rows in total",
        piece.cast_on_stitches, piece.total_rows
    );
    let unit = unit_label(piece);
    for instruction in &piece.instructions {
        let _ = write!(
            out,
            "{}: {}",
            row_label(instruction, unit),
            renderer.render(&instruction.text)
        );
        if let Some(note) = &instruction.note {
            let _ = write!(out, " ({})", renderer.render(note));
        }
        out.push('\n');
    }
    if !piece.calculations.is_empty() {
        out.push_str("Calculations:\n");
        for step in &piece.calculations {
            let _ = write!(
                out,
                "  {}: {} = {:.2} -> {}",
                step.description, step.formula, step.raw_result, step.rounded_result
            );
            if let Some(note) = &step.rounding_note {
                let _ = write!(out, " ({note})");
            }
            out.push('\n');
        }
    }
    for warning in &piece.warnings {
        let _ = writeln!(out, "Warning: {}", renderer.render(warning));
    }
    out
}

/// Render a whole pattern as a plain-text document
pub fn render_pattern(pattern: &GeneratedPattern, renderer: &dyn Renderer) -> String {
    let mut out = String::new();
    let garment = &pattern.garment;
    let _ = writeln!(
        out,
        "{} {} ({}, {} neckline, {} sleeves)",
        garment.fit, garment.garment, garment.construction, garment.neckline, garment.sleeve_style
    );
    let _ = writeln!(out, "Pattern {}", pattern.id);
    let _ = writeln!(
        out,
        "Gauge: {} stitches and {} rows per 10 cm",
        pattern.gauge.stitches_per_10cm, pattern.gauge.rows_per_10cm
    );
    let yardage = &pattern.estimated_yardage;
    let _ = writeln!(
        out,
        "Yarn: {}-{} m (about {} m), {:?}",
        yardage.min, yardage.max, yardage.average, pattern.yarn_report.status
    );
    for adjustment in &pattern.yarn_report.adjustments {
        let _ = writeln!(
            out,
            "  Suggestion: reduce {} by {} cm to {} cm",
            adjustment.field.name(),
            adjustment.reduce_by_cm,
            adjustment.new_value_cm
        );
    }
    out.push('\n');

    for piece in &pattern.pieces {
        out.push_str(&render_piece(piece, renderer));
        out.push('\n');
    }
    for failure in &pattern.failed_pieces {
        let _ = writeln!(out, "Not generated: {} ({})", failure.role, failure.reason);
    }

    out.push_str("Assembly:\n");
    for (index, step) in pattern.assembly_steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, renderer.render(step));
    }
    out.push_str("Finishing:\n");
    for (index, step) in pattern.finishing_steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, renderer.render(step));
    }

    let disclaimer = &pattern.disclaimer;
    let _ = writeln!(
        out,
        "\nConfidence: {:.0}% ({:?})",
        disclaimer.overall_confidence * 100.0,
        disclaimer.level
    );
    if !disclaimer.uncertain_fields.is_empty() {
        let _ = writeln!(out, "Uncertain: {}", disclaimer.uncertain_fields.join(", "));
    }
    for fallback in &disclaimer.fallbacks {
        let _ = writeln!(
            out,
            "Substituted {} '{}' with '{}'",
            fallback.field, fallback.requested, fallback.used
        );
    }
    for limitation in &disclaimer.limitations {
        let _ = writeln!(out, "Limitation: {limitation}");
    }
    out
}
