//! Seamless pieces: the body tube, the raglan yoke and sleeves worked in the
//! round
//!
//! Underarm stitches are never bound off here. A bottom-up body holds them
//! for the sleeves; a top-down yoke casts them on when the sleeves separate.

use crate::generation::builder::PieceBuilder;
use crate::generation::flat::{
    button_count, front_band, lower_body, parity_match, place_buttonholes, taper,
};
use crate::generation::neckline::{RaglanNeck, raglan_downward, raglan_upward};
use crate::generation::pieces::PieceContext;
use crate::generation::sizing::{BodyDims, SleeveDims};
use crate::io::configuration::MIN_PIECE_STITCHES;
use crate::io::error::Result;
use crate::model::garment::{NecklineType, SleeveStyle};
use crate::model::pattern::{CalculationStep, Param, PatternPiece, PieceRole, RowUnit, Text, TextKey};
use tracing::debug;

/// Raglan lines in a yoke
const RAGLAN_LINES: i64 = 4;

/// Direction a seamless garment is knitted in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Hem to neck
    BottomUp,
    /// Neck to hem
    TopDown,
}

/// Upper-arm circumference of a sleeve worked in the round
fn round_upper(sleeve: &SleeveDims) -> i64 {
    parity_match(sleeve.upper_sts, sleeve.cuff_round_sts)
}

/// Stitch layout of a raglan yoke at the underarm and at the neck
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YokeLayout {
    /// Back stitches at the underarm
    pub back: i64,
    /// Front stitches at the underarm, both fronts together for cardigans
    pub front: i64,
    /// Live stitches of each sleeve at the underarm
    pub sleeve: i64,
    /// Raglan decrease rounds, each removing two stitches per raglan line
    pub events: i64,
    /// Underarm stitches held or cast on at each side
    pub underarm: i64,
    /// Rows from join to neck
    pub rows: i64,
}

impl YokeLayout {
    /// Lay out the yoke from body and sleeve dimensions
    ///
    /// Section and sleeve counts too small to work are clamped on `builder`
    /// with a warning.
    pub fn derive(
        ctx: &PieceContext<'_>,
        dims: &BodyDims,
        sleeve: &SleeveDims,
        builder: &mut PieceBuilder,
    ) -> Self {
        let section = builder.clamp_count("yoke back", dims.section_sts(), MIN_PIECE_STITCHES);
        let front = if ctx.garment.is_cardigan() {
            section + dims.band_sts.max(0)
        } else {
            section
        };
        let live = builder.clamp_count(
            "yoke sleeve",
            round_upper(sleeve) - dims.underarm_sts,
            MIN_PIECE_STITCHES,
        );
        let body_room = (section - dims.neck_sts) / 2;
        let sleeve_room = (live - sleeve.raglan_top_sts) / 2;
        let mut events = body_room.min(sleeve_room).max(0);
        if ctx.garment.neckline == NecklineType::Boat {
            events = events * 7 / 10;
        }
        debug!(section, live, events, "yoke layout");
        Self {
            back: section,
            front,
            sleeve: live,
            events,
            underarm: dims.underarm_sts.max(0),
            rows: dims.armhole_rows,
        }
    }

    /// Stitches at the underarm join
    pub const fn start(&self) -> i64 {
        self.back + self.front + 2 * self.sleeve
    }

    /// Stitches after every raglan decrease, before any neck shaping
    pub const fn end(&self) -> i64 {
        self.start() - 2 * RAGLAN_LINES * self.events
    }

    /// Front stitches at the top of the raglan
    pub const fn front_top(&self) -> i64 {
        self.front - 2 * self.events
    }

    fn markers(&self, back: i64, front: i64, sleeve: i64) -> Text {
        Text::new(
            TextKey::RaglanMarkers,
            vec![Param::Count(back), Param::Count(front), Param::Count(sleeve)],
        )
    }

    fn step(&self) -> CalculationStep {
        CalculationStep {
            description: "Raglan decrease rounds".to_string(),
            formula: format!(
                "min(({} - neck) / 2, ({} - sleeve top) / 2)",
                self.back, self.sleeve
            ),
            raw_result: self.events as f64,
            rounded_result: self.events,
            rounding_note: None,
        }
    }
}

/// Ribbed neckband worked on the live yoke stitches
fn neckband(builder: &mut PieceBuilder, dims: &BodyDims, minimum: i64) {
    let rows = dims.neckband_rows.max(minimum);
    let stitches = builder.stitches();
    let unit = builder.unit();
    builder.work(
        rows,
        Text::new(
            TextKey::Neckband,
            vec![Param::Count(stitches), Param::Count(rows), Param::Unit(unit)],
        ),
    );
}

/// Body worked as one piece up to (or down from) the underarms
///
/// # Errors
///
/// Returns an error if a body measurement is not finite
pub fn body(ctx: &PieceContext<'_>, direction: Direction) -> Result<PatternPiece> {
    let dims = BodyDims::derive(ctx)?;
    let cardigan = ctx.garment.is_cardigan();
    let unit = if cardigan { RowUnit::Rows } else { RowUnit::Rounds };
    let band = if cardigan { dims.band_sts } else { 0 };
    let mut builder = PieceBuilder::new(PieceRole::Body, unit);
    for step in &dims.steps {
        builder.record(step.clone());
    }

    let (first, last) = match direction {
        Direction::BottomUp => {
            builder.cast_on(dims.hem_circumference_sts + band);
            builder.ribbing(dims.hem_rows, ctx.config.min_ribbing_rows);
            if cardigan {
                builder.note_next(front_band(&dims));
            }
            lower_body(&mut builder, &dims, dims.circumference_sts + band, 4);
            let underarm = dims.underarm_sts;
            builder.single(
                Text::new(TextKey::HoldUnderarms, vec![Param::Count(underarm)]),
                -2 * underarm,
            );
            (dims.hem_rows / 2, i64::from(builder.row()) - 1)
        }
        Direction::TopDown => {
            builder.pick_up(dims.circumference_sts + band, TextKey::ResumeHeld);
            if cardigan {
                builder.note_next(front_band(&dims));
            }
            lower_body(&mut builder, &dims, dims.hem_circumference_sts + band, 4);
            builder.ribbing(dims.hem_rows, ctx.config.min_ribbing_rows);
            builder.bind_off_remaining();
            (2, i64::from(builder.row()) - dims.hem_rows / 2)
        }
    };

    if cardigan {
        place_buttonholes(
            &mut builder,
            button_count(ctx),
            u32::try_from(first).unwrap_or(1).max(1),
            u32::try_from(last).unwrap_or(1),
            &dims,
        );
    }
    Ok(builder.finish())
}

/// Raglan yoke joining body and sleeves
///
/// # Errors
///
/// Returns an error if a body or arm measurement is not finite
pub fn yoke(ctx: &PieceContext<'_>, direction: Direction) -> Result<PatternPiece> {
    let dims = BodyDims::derive(ctx)?;
    let sleeve = SleeveDims::derive(ctx)?;
    let cardigan = ctx.garment.is_cardigan();
    let unit = if cardigan { RowUnit::Rows } else { RowUnit::Rounds };
    let mut builder = PieceBuilder::new(PieceRole::Yoke, unit);
    let layout = YokeLayout::derive(ctx, &dims, &sleeve, &mut builder);
    builder.record(layout.step());

    let raglan_rows = (layout.rows - 2).max(0);
    let neck = RaglanNeck::new(
        layout.front_top(),
        &dims,
        ctx.garment.neckline,
        cardigan,
        raglan_rows,
    );
    let edges = 2 * RAGLAN_LINES;

    match direction {
        Direction::BottomUp => {
            builder.pick_up(layout.start(), TextKey::JoinYoke);
            builder.single(
                layout.markers(layout.back, layout.front, layout.sleeve),
                0,
            );
            let work = neck.as_ref().map(RaglanNeck::upward);
            raglan_upward(&mut builder, layout.end(), raglan_rows, edges, work.as_ref());
            if work.is_none() {
                neckband(&mut builder, &dims, ctx.config.min_ribbing_rows);
            }
            builder.bind_off_remaining();
        }
        Direction::TopDown => {
            let work = neck.as_ref().map(RaglanNeck::downward);
            let neck_stitches = neck.as_ref().map_or(0, |neck| neck.center + neck.side);
            if work.is_some() {
                builder.set_unit(RowUnit::Rows);
            }
            let cast_on = layout.end() - neck_stitches;
            builder.cast_on(cast_on);
            if work.is_none() {
                neckband(&mut builder, &dims, ctx.config.min_ribbing_rows);
                if !cardigan {
                    builder.work(
                        dims.back_neck_rows,
                        Text::new(
                            TextKey::BackNeckShortRows,
                            vec![Param::Count(dims.back_neck_rows)],
                        ),
                    );
                }
            }
            let top_back = layout.back - 2 * layout.events;
            let top_sleeve = layout.sleeve - 2 * layout.events;
            builder.single(
                layout.markers(top_back, layout.front_top() - neck_stitches, top_sleeve),
                0,
            );
            raglan_downward(&mut builder, layout.start(), raglan_rows, edges, work.as_ref());
            builder.single(
                Text::new(
                    TextKey::SeparateYoke,
                    vec![Param::Count(layout.sleeve), Param::Count(layout.underarm)],
                ),
                2 * layout.underarm - 2 * layout.sleeve,
            );
        }
    }
    Ok(builder.finish())
}

/// Sleeve worked in the round
///
/// Raglan sleeves knitted bottom-up start at the cuff and are joined into the
/// yoke. Every other seamless sleeve is picked up from the armhole and its
/// held underarm stitches and worked down to the cuff.
///
/// # Errors
///
/// Returns an error if an arm or body measurement is not finite
pub fn sleeve(ctx: &PieceContext<'_>, direction: Direction) -> Result<PatternPiece> {
    let dims = BodyDims::derive(ctx)?;
    let sleeve = SleeveDims::derive(ctx)?;
    let upper = round_upper(&sleeve);
    let mut builder = PieceBuilder::new(PieceRole::Sleeve, RowUnit::Rounds).with_quantity(2);
    for step in &sleeve.steps {
        builder.record(step.clone());
    }

    let from_cuff =
        direction == Direction::BottomUp && ctx.garment.sleeve_style == SleeveStyle::Raglan;
    if from_cuff {
        builder.cast_on(sleeve.cuff_round_sts);
        builder.ribbing(sleeve.cuff_rows, ctx.config.min_ribbing_rows);
        taper(&mut builder, &sleeve, upper);
        builder.stockinette(sleeve.straight_rows);
        builder.single(
            Text::new(TextKey::PlaceOnHold, vec![Param::Count(dims.underarm_sts)]),
            -dims.underarm_sts,
        );
    } else {
        builder.pick_up(upper, TextKey::PickUpSleeve);
        builder.stockinette(sleeve.straight_rows);
        taper(&mut builder, &sleeve, sleeve.cuff_round_sts);
        builder.ribbing(sleeve.cuff_rows, ctx.config.min_ribbing_rows);
        builder.bind_off_remaining();
    }
    Ok(builder.finish())
}
