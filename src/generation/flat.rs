//! Flat pieces: backs, fronts, sleeves, hoods and armhole borders
//!
//! Assembled garments use every routine here. Seamless garments with set-in
//! or drop-shoulder sleeves reuse the upper-body routines for the back and
//! fronts worked flat from the held body stitches.

use crate::generation::builder::{PieceBuilder, ShapingKeys};
use crate::generation::neckline::{Panel, RaglanNeck, UpperShape, raglan_upward};
use crate::generation::pieces::PieceContext;
use crate::generation::sizing::{BodyDims, SleeveDims, armhole_depth_cm, even};
use crate::io::configuration::{CM_PER_BUTTON, MAX_BUTTONS, MIN_BUTTONS};
use crate::io::error::Result;
use crate::math::gauge::round_half_up;
use crate::math::shaping::plan_shaping;
use crate::model::garment::{Closure, SleeveStyle};
use crate::model::pattern::{CalculationStep, Param, PatternPiece, PieceRole, RowUnit, Text, TextKey};

/// Where the stitches of an upper piece come from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Start {
    /// Cast on at the hem and worked up
    CastOn,
    /// Resumed from underarm-held stitches of a seamless body
    Held,
}

fn record_all(builder: &mut PieceBuilder, steps: &[CalculationStep]) {
    for step in steps {
        builder.record(step.clone());
    }
}

const fn sides(panel: Panel) -> i64 {
    match panel {
        Panel::HalfFront => 1,
        Panel::Back | Panel::Front => 2,
    }
}

/// Width of one cardigan front for a back of `half` stitches
pub const fn half_front(half: i64, dims: &BodyDims) -> i64 {
    half / 2 + dims.band_sts / 2
}

/// Front band reminder carried by cardigan fronts and bodies
pub fn front_band(dims: &BodyDims) -> Text {
    Text::new(TextKey::FrontBand, vec![Param::Count(dims.band_sts)])
}

/// Back, front or cardigan front worked flat
///
/// # Errors
///
/// Returns an error if a body measurement is not finite
pub fn panel(ctx: &PieceContext<'_>, role: PieceRole, start: Start) -> Result<PatternPiece> {
    let dims = BodyDims::derive(ctx)?;
    let panel = Panel::for_role(role);
    let mut builder = PieceBuilder::new(role, RowUnit::Rows);
    record_all(&mut builder, &dims.steps);

    match start {
        Start::CastOn => {
            let (hem, chest) = match panel {
                Panel::HalfFront => (
                    half_front(dims.hem_half_sts, &dims),
                    half_front(dims.half_sts, &dims),
                ),
                Panel::Back | Panel::Front => (dims.hem_half_sts, dims.half_sts),
            };
            builder.cast_on(hem);
            builder.ribbing(dims.hem_rows, ctx.config.min_ribbing_rows);
            if panel == Panel::HalfFront {
                builder.note_next(front_band(&dims));
            }
            lower_body(&mut builder, &dims, chest, sides(panel));
        }
        Start::Held => {
            let section = dims.section_sts();
            let stitches = match panel {
                Panel::HalfFront => half_front(section, &dims),
                Panel::Back | Panel::Front => section,
            };
            builder.pick_up(stitches, TextKey::ResumeHeld);
        }
    }

    let neck_row = upper_body(&mut builder, ctx, &dims, panel, start);

    if role == PieceRole::RightFront && start == Start::CastOn {
        let first = u32::try_from(dims.hem_rows / 2).unwrap_or(1).max(1);
        let count = button_count(ctx);
        place_buttonholes(&mut builder, count, first, neck_row.saturating_sub(2), &dims);
    }
    Ok(builder.finish())
}

/// Shape from the hem width to the chest width below the underarm
pub fn lower_body(builder: &mut PieceBuilder, dims: &BodyDims, chest: i64, edges: i64) {
    let rows = u32::try_from(dims.lower_rows).unwrap_or(0);
    if rows == 0 {
        builder.warn(Text::new(
            TextKey::WarnNoRoom,
            vec![
                Param::Label("body below armhole".to_string()),
                Param::Count(dims.lower_rows.saturating_neg()),
            ],
        ));
    }
    let plan = plan_shaping(builder.stitches(), chest, rows, edges);
    builder.shape(&plan, "waist", ShapingKeys::EDGES);
}

/// Armhole, neck and shoulders; returns the last row before the neck opens
fn upper_body(
    builder: &mut PieceBuilder,
    ctx: &PieceContext<'_>,
    dims: &BodyDims,
    panel: Panel,
    start: Start,
) -> u32 {
    let neckline = ctx.garment.neckline;
    let used = match ctx.garment.sleeve_style {
        SleeveStyle::Raglan => return raglan_upper(builder, ctx, dims, panel, start),
        SleeveStyle::DropShoulder => {
            builder.note_next(Text::bare(TextKey::MarkArmholes));
            0
        }
        SleeveStyle::SetIn | SleeveStyle::None | SleeveStyle::Unknown => {
            armhole(builder, dims, panel, start)
        }
    };

    let mut upper = UpperShape::new(builder.stitches(), dims, neckline, panel);
    upper.fit_within(dims.armhole_rows - used);
    let straight = dims.armhole_rows - used - upper.rows();
    if straight < 0 {
        builder.warn(Text::new(
            TextKey::WarnNoRoom,
            vec![
                Param::Label("armhole".to_string()),
                Param::Count(-straight),
            ],
        ));
    }
    builder.stockinette(straight);
    let neck_row = builder.row();
    upper.apply(builder);
    neck_row
}

/// Initial bind-off plus gradual decreases to the cross-back width
///
/// Returns the rows used.
fn armhole(builder: &mut PieceBuilder, dims: &BodyDims, panel: Panel, start: Start) -> i64 {
    let width = builder.stitches();
    let edges = sides(panel);
    let cross = match panel {
        Panel::HalfFront => (dims.cross_back_sts / 2 + dims.band_sts / 2).min(width),
        Panel::Back | Panel::Front => {
            let cross = dims.cross_back_sts.min(width);
            if (width - cross) % 2 == 0 { cross } else { cross + 1 }
        }
    };
    let per_side = (width - cross) / edges;
    let initial = match start {
        Start::CastOn => (dims.underarm_sts / 2).min(per_side),
        Start::Held => 0,
    };

    let mut used = 0;
    if initial > 0 {
        used += bind_off_underarm(builder, panel, initial);
    }
    let gradual = per_side - initial;
    let rows = (2 * gradual).min(dims.armhole_rows - used).max(0);
    let begin = builder.stitches();
    let plan = plan_shaping(
        begin,
        begin - gradual * edges,
        u32::try_from(rows).unwrap_or(0),
        edges,
    );
    builder.shape(&plan, "armhole", ShapingKeys::EDGES);
    used + rows
}

fn bind_off_underarm(builder: &mut PieceBuilder, panel: Panel, stitches: i64) -> i64 {
    match panel {
        Panel::HalfFront => {
            builder.single(
                Text::new(
                    TextKey::EdgeBindOff,
                    vec![Param::Count(stitches), Param::Label("armhole".to_string())],
                ),
                -stitches,
            );
            1
        }
        Panel::Back | Panel::Front => {
            builder.change(
                2,
                Text::new(TextKey::ArmholeBindOff, vec![Param::Count(stitches)]),
                -2 * stitches,
            );
            2
        }
    }
}

/// Raglan armhole decreasing to the neck, with front neck shaping at the
/// same time; returns the last row before the neck opens
fn raglan_upper(
    builder: &mut PieceBuilder,
    ctx: &PieceContext<'_>,
    dims: &BodyDims,
    panel: Panel,
    start: Start,
) -> u32 {
    let mut used = 0;
    if start == Start::CastOn {
        used += bind_off_underarm(builder, panel, dims.underarm_sts / 2);
    }
    let width = builder.stitches();
    let top = match panel {
        Panel::HalfFront => (dims.neck_sts / 2 + dims.band_sts / 2).min(width),
        Panel::Back | Panel::Front => {
            let top = dims.neck_sts.min(width);
            if (width - top) % 2 == 0 { top } else { top + 1 }
        }
    };
    let rows = (dims.armhole_rows - used - 1).max(0);
    let neck = match panel {
        Panel::Back => None,
        Panel::Front => RaglanNeck::new(top, dims, ctx.garment.neckline, false, rows)
            .map(|neck| neck.upward()),
        Panel::HalfFront => RaglanNeck::new(2 * top, dims, ctx.garment.neckline, true, rows)
            .map(|neck| neck.upward_half()),
    };
    let neck_row = builder.row()
        + u32::try_from(rows - neck.as_ref().map_or(0, |neck| neck.rows)).unwrap_or(0);
    raglan_upward(builder, top, rows, sides(panel), neck.as_ref());
    builder.bind_off_remaining();
    neck_row
}

/// Buttons on the band: the analysis estimate, or one per 8 cm of body
pub fn button_count(ctx: &PieceContext<'_>) -> u32 {
    match ctx.garment.closure {
        Closure::Buttons { count: Some(count) } => count,
        Closure::Buttons { count: None } => {
            let derived = round_half_up(ctx.measurements.body_length / CM_PER_BUTTON)
                .and_then(|count| u32::try_from(count).ok())
                .unwrap_or(MIN_BUTTONS);
            derived.clamp(MIN_BUTTONS, MAX_BUTTONS)
        }
        Closure::None | Closure::Zip | Closure::Unknown => 0,
    }
}

/// Insert `count` evenly spaced buttonhole rows between `first` and `last`
///
/// Rows that do not fit the band are dropped with a warning.
pub fn place_buttonholes(
    builder: &mut PieceBuilder,
    count: u32,
    first: u32,
    last: u32,
    dims: &BodyDims,
) {
    if count == 0 {
        return;
    }
    let last = last.max(first).min(builder.row());
    let span = last.saturating_sub(first);
    let fits = if count == 1 { 1 } else { count.min(span + 1) };
    if fits < count {
        builder.warn(Text::new(
            TextKey::WarnClamped,
            vec![
                Param::Label("buttonholes".to_string()),
                Param::Count(i64::from(count)),
                Param::Count(i64::from(fits)),
            ],
        ));
    }
    let hole = (dims.band_sts / 3).clamp(1, 3);
    let mut placed = 0;
    for index in 0..fits {
        let row = if fits == 1 {
            first
        } else {
            first + span * index / (fits - 1)
        };
        let text = Text::new(
            TextKey::Buttonhole,
            vec![
                Param::Count(dims.band_sts),
                Param::Count(hole),
                Param::Count(i64::from(placed + 1)),
            ],
        );
        if builder.overlay(row, text) {
            placed += 1;
        }
    }
    if placed < fits {
        builder.warn(Text::new(
            TextKey::WarnClamped,
            vec![
                Param::Label("buttonholes".to_string()),
                Param::Count(i64::from(fits)),
                Param::Count(i64::from(placed)),
            ],
        ));
    }
}

/// Sleeve worked flat from cuff to cap
///
/// # Errors
///
/// Returns an error if an arm or body measurement is not finite
pub fn sleeve(ctx: &PieceContext<'_>) -> Result<PatternPiece> {
    let dims = BodyDims::derive(ctx)?;
    let sleeve = SleeveDims::derive(ctx)?;
    let mut builder = PieceBuilder::new(PieceRole::Sleeve, RowUnit::Rows).with_quantity(2);
    record_all(&mut builder, &sleeve.steps);

    builder.cast_on(sleeve.cuff_flat_sts);
    builder.ribbing(sleeve.cuff_rows, ctx.config.min_ribbing_rows);
    taper(&mut builder, &sleeve, sleeve.upper_sts);
    builder.stockinette(sleeve.straight_rows);

    match ctx.garment.sleeve_style {
        SleeveStyle::Raglan => {
            let initial = dims.underarm_sts / 2;
            builder.change(
                2,
                Text::new(TextKey::ArmholeBindOff, vec![Param::Count(initial)]),
                -2 * initial,
            );
            let width = builder.stitches();
            let top = parity_match(sleeve.raglan_top_sts.min(width), width);
            let rows = (dims.armhole_rows - 3).max(0);
            raglan_upward(&mut builder, top, rows, 2, None);
        }
        SleeveStyle::DropShoulder => {
            let width = builder.stitches();
            let top = parity_match(width * 3 / 4, width);
            let rows = u32::try_from(sleeve.cap_rows - 1).unwrap_or(0);
            let plan = plan_shaping(width, top, rows, 2);
            builder.shape(&plan, "cap", ShapingKeys::EDGES);
        }
        SleeveStyle::SetIn | SleeveStyle::None | SleeveStyle::Unknown => {
            let initial = (dims.underarm_sts / 2).min((builder.stitches() - 2) / 2).max(0);
            builder.change(
                2,
                Text::new(TextKey::ArmholeBindOff, vec![Param::Count(initial)]),
                -2 * initial,
            );
            let width = builder.stitches();
            let top = parity_match(sleeve.cap_top_sts.min(width), width);
            let rows = u32::try_from(sleeve.cap_rows - 3).unwrap_or(0);
            let plan = plan_shaping(width, top, rows, 2);
            builder.shape(&plan, "cap", ShapingKeys::EDGES);
        }
    }
    builder.bind_off_remaining();
    Ok(builder.finish())
}

/// Taper between cuff and upper arm in the direction the sleeve is worked
pub fn taper(builder: &mut PieceBuilder, sleeve: &SleeveDims, target: i64) {
    if sleeve.reversed {
        builder.warn(Text::bare(TextKey::WarnSleeveTaperReversed));
    }
    if sleeve.taper_rows <= 0 {
        builder.warn(Text::new(
            TextKey::WarnNoRoom,
            vec![
                Param::Label("sleeve taper".to_string()),
                Param::Count(sleeve.taper_rows.saturating_neg()),
            ],
        ));
    }
    let rows = u32::try_from(sleeve.taper_rows).unwrap_or(0);
    let plan = plan_shaping(builder.stitches(), target, rows, 2);
    builder.shape(&plan, "sleeve", ShapingKeys::EDGES);
}

/// Raise `count` by one if needed so `width - count` is even
pub const fn parity_match(count: i64, width: i64) -> i64 {
    if (width - count) % 2 == 0 { count } else { count + 1 }
}

/// Rectangular hood picked up around the neck and closed at the crown
///
/// # Errors
///
/// Returns an error if a body measurement is not finite
pub fn hood(ctx: &PieceContext<'_>) -> Result<PatternPiece> {
    let dims = BodyDims::derive(ctx)?;
    let mut builder = PieceBuilder::new(PieceRole::Hood, RowUnit::Rows);
    builder.pick_up(dims.hood_sts, TextKey::PickUpHood);
    builder.stockinette(dims.hood_rows - 1);
    let stitches = builder.stitches();
    builder.single(
        Text::new(TextKey::HoodTopSeam, vec![Param::Count(stitches / 2)]),
        -stitches,
    );
    Ok(builder.finish())
}

/// Ribbed border picked up around each armhole of a sleeveless garment
///
/// # Errors
///
/// Returns an error if a body measurement is not finite
pub fn armhole_border(ctx: &PieceContext<'_>) -> Result<PatternPiece> {
    let dims = BodyDims::derive(ctx)?;
    let (stitches, step) = ctx.converter.aligned_stitches_step(
        "Armhole border pick-up",
        armhole_depth_cm(ctx)? * 2.0,
        ctx.config.rib_multiple,
        0,
    )?;
    let mut builder =
        PieceBuilder::new(PieceRole::ArmholeBorder, RowUnit::Rounds).with_quantity(2);
    builder.record(step);
    let stitches = even(stitches);
    builder.pick_up(stitches, TextKey::PickUpArmholeBorder);
    builder.ribbing(dims.neckband_rows, ctx.config.min_ribbing_rows);
    builder.bind_off_remaining();
    Ok(builder.finish())
}
