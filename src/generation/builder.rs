//! Row cursor that turns generation steps into a gap-free instruction list
//!
//! Every routine that writes instructions goes through [`PieceBuilder`], which
//! assigns row ranges sequentially. Because ranges are only ever appended at
//! the cursor (or split in place by [`PieceBuilder::overlay`]), the finished
//! piece always covers `1..=total_rows` exactly once.
//!
//! Row counts and shaping repeats in an instruction's parameters always match
//! its row span, including the fragments left by an overlay.

use crate::io::configuration::MIN_PIECE_STITCHES;
use crate::math::shaping::{ShapingDirection, ShapingMode, ShapingPlan};
use crate::model::pattern::{
    CalculationStep, Instruction, Param, PatternPiece, PieceRole, RowUnit, Text, TextKey,
};
use tracing::warn;

/// Instruction keys used for one kind of gradual shaping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapingKeys {
    /// Key for increases
    pub increase: TextKey,
    /// Key for decreases
    pub decrease: TextKey,
}

impl ShapingKeys {
    /// Plain edge increases and decreases
    pub const EDGES: Self = Self {
        increase: TextKey::Increase,
        decrease: TextKey::Decrease,
    };

    /// Raglan-line increases and decreases
    pub const RAGLAN: Self = Self {
        increase: TextKey::RaglanIncrease,
        decrease: TextKey::RaglanDecrease,
    };
}

/// Accumulates one piece row by row
#[derive(Debug)]
pub struct PieceBuilder {
    role: PieceRole,
    quantity: u32,
    unit: RowUnit,
    cast_on: i64,
    stitches: i64,
    row: u32,
    instructions: Vec<Instruction>,
    calculations: Vec<CalculationStep>,
    warnings: Vec<Text>,
    pending_note: Option<Text>,
}

impl PieceBuilder {
    /// Start an empty piece worked in `unit`
    pub const fn new(role: PieceRole, unit: RowUnit) -> Self {
        Self {
            role,
            quantity: 1,
            unit,
            cast_on: 0,
            stitches: 0,
            row: 0,
            instructions: Vec::new(),
            calculations: Vec::new(),
            warnings: Vec::new(),
            pending_note: None,
        }
    }

    /// Set how many identical pieces are knitted
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Live stitch count
    pub const fn stitches(&self) -> i64 {
        self.stitches
    }

    /// Rows written so far
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Current working unit
    pub const fn unit(&self) -> RowUnit {
        self.unit
    }

    /// Switch between rows and rounds, as when a body divides at the armholes
    pub const fn set_unit(&mut self, unit: RowUnit) {
        self.unit = unit;
    }

    /// Cast on, clamping to a workable minimum
    ///
    /// The cast-on is attached as a note to the first instruction.
    pub fn cast_on(&mut self, stitches: i64) {
        let stitches = self.clamp_count("cast-on", stitches, MIN_PIECE_STITCHES);
        self.cast_on = stitches;
        self.stitches = stitches;
        let key = match self.unit {
            RowUnit::Rows => TextKey::CastOn,
            RowUnit::Rounds => TextKey::CastOnInRound,
        };
        self.pending_note = Some(Text::new(key, vec![Param::Count(stitches)]));
    }

    /// Start from stitches picked up or returned from hold
    ///
    /// `key` says how the stitches were gathered and becomes the note of the
    /// first instruction, with the clamped count. Returns that count.
    pub fn pick_up(&mut self, stitches: i64, key: TextKey) -> i64 {
        let stitches = self.clamp_count("picked-up stitches", stitches, MIN_PIECE_STITCHES);
        self.cast_on = stitches;
        self.stitches = stitches;
        self.pending_note = Some(Text::new(key, vec![Param::Count(stitches)]));
        stitches
    }

    /// Record a calculation
    pub fn record(&mut self, step: CalculationStep) {
        self.calculations.push(step);
    }

    /// Record a warning
    pub fn warn(&mut self, text: Text) {
        warn!(piece = self.role.name(), key = ?text.key, "piece warning");
        self.warnings.push(text);
    }

    /// Attach `text` as the note of the next instruction
    pub fn note_next(&mut self, text: Text) {
        self.pending_note = Some(text);
    }

    /// Clamp a derived count to `minimum`, warning when it was raised
    pub fn clamp_count(&mut self, section: &str, requested: i64, minimum: i64) -> i64 {
        if requested < minimum {
            self.warn(Text::new(
                TextKey::WarnClamped,
                vec![
                    Param::Label(section.to_string()),
                    Param::Count(requested),
                    Param::Count(minimum),
                ],
            ));
            minimum
        } else {
            requested
        }
    }

    /// Emit `text` over the next `rows` rows; non-positive spans are skipped
    pub fn work(&mut self, rows: i64, text: Text) {
        let Ok(rows) = u32::try_from(rows) else {
            return;
        };
        if rows == 0 {
            return;
        }
        let text = self.non_negative(text);
        let note = self.pending_note.take().map(|note| self.non_negative(note));
        let row_start = self.row + 1;
        self.row += rows;
        self.instructions.push(Instruction {
            row_start,
            row_end: self.row,
            text,
            note,
        });
    }

    /// Raise negative counts to zero, warning for each one
    fn non_negative(&mut self, mut text: Text) -> Text {
        let section = self.role.name();
        for param in &mut text.params {
            if let Param::Count(count) = param
                && *count < 0
            {
                *count = self.clamp_count(section, *count, 0);
            }
        }
        text
    }

    /// Emit a one-row instruction changing the stitch count by `delta`
    pub fn single(&mut self, text: Text, delta: i64) {
        self.change(1, text, delta);
    }

    /// Emit `text` over `rows` rows, changing the stitch count by `delta`
    pub fn change(&mut self, rows: i64, text: Text, delta: i64) {
        self.work(rows, text);
        self.adjust(delta);
    }

    /// Apply stitches changed by a concurrent instruction carried as a note
    pub fn adjust(&mut self, delta: i64) {
        self.stitches = (self.stitches + delta).max(0);
    }

    /// Stockinette in the current unit
    pub fn stockinette(&mut self, rows: i64) {
        let unit = self.unit;
        self.work(
            rows,
            Text::new(
                TextKey::Stockinette,
                vec![Param::Count(rows), Param::Unit(unit)],
            ),
        );
    }

    /// 2x2 ribbing in the current unit, never shorter than `minimum` rows
    pub fn ribbing(&mut self, rows: i64, minimum: i64) {
        let used = rows.max(minimum);
        if used != rows {
            self.warn(Text::new(
                TextKey::WarnShortRibbing,
                vec![Param::Count(rows), Param::Count(used)],
            ));
        }
        let unit = self.unit;
        self.work(
            used,
            Text::new(TextKey::Ribbing, vec![Param::Count(used), Param::Unit(unit)]),
        );
    }

    /// Emit every segment of a shaping plan and apply its events
    ///
    /// Straight plans become stockinette over the available rows. Immediate
    /// plans use a single row. Compressed plans are flagged as warnings. Rows
    /// after the last event are worked even, so the plan always consumes
    /// its whole row budget.
    pub fn shape(&mut self, plan: &ShapingPlan, section: &str, keys: ShapingKeys) {
        let unit = self.unit;
        if plan.events.is_empty() {
            self.stockinette(i64::from(plan.available_rows));
            return;
        }
        match plan.mode {
            ShapingMode::Straight | ShapingMode::Even => {}
            ShapingMode::Immediate => {
                self.warn(Text::new(
                    TextKey::WarnNoRoom,
                    vec![Param::Label(section.to_string()), Param::Count(1)],
                ));
            }
            ShapingMode::EveryRow => {
                self.warn(Text::new(
                    TextKey::WarnEveryRowShaping,
                    vec![
                        Param::Label(section.to_string()),
                        Param::Count(plan.event_count() as i64),
                        Param::Count(i64::from(plan.available_rows)),
                    ],
                ));
            }
        }

        let key = match plan.direction {
            ShapingDirection::Increase => keys.increase,
            ShapingDirection::Decrease | ShapingDirection::Straight => keys.decrease,
        };
        for segment in plan.segments() {
            let text = Text::new(
                key,
                vec![
                    Param::Count(segment.delta.abs()),
                    Param::Count(i64::from(segment.interval.max(1))),
                    Param::Count(i64::from(segment.repeats)),
                    Param::Unit(unit),
                ],
            );
            self.work(i64::from(segment.rows().max(1)), text);
            self.stitches = (self.stitches + segment.delta * i64::from(segment.repeats)).max(0);
        }
        self.stockinette(i64::from(plan.available_rows.saturating_sub(plan.last_row())));
        self.record(plan.step.clone());
    }

    /// Bind off every live stitch on one row; nothing is emitted without any
    pub fn bind_off_remaining(&mut self) {
        let stitches = self.stitches;
        if stitches <= 0 {
            return;
        }
        self.single(
            Text::new(TextKey::BindOffRemaining, vec![Param::Count(stitches)]),
            -stitches,
        );
    }

    /// Split the instruction covering `row` so that `row` carries `text`
    ///
    /// Only plain rows and gradual shaping can be split. When `row` falls on
    /// anything else, or opens an instruction whose note must stay on its
    /// first row, the next such row is used instead. The fragments are
    /// rewritten so their counts match their spans, and the split-off row
    /// keeps what the knitter would otherwise have worked there as its note.
    /// Returns false if no row from `row` onwards can be split.
    pub fn overlay(&mut self, row: u32, text: Text) -> bool {
        let found = (row.max(1)..=self.row).find_map(|candidate| {
            self.instructions.iter().enumerate().find_map(|(index, ins)| {
                splittable(ins, candidate).map(|span| (candidate, index, span))
            })
        });
        let Some((row, index, span)) = found else {
            return false;
        };
        let text = self.non_negative(text);
        let original = self.instructions.remove(index);
        let tail = self.instructions.split_off(index);
        self.instructions.extend(split_around(original, span, row, text));
        self.instructions.extend(tail);
        true
    }

    /// Produce the finished piece
    pub fn finish(self) -> PatternPiece {
        PatternPiece {
            name: self.role.name().to_string(),
            role: self.role,
            quantity: self.quantity,
            cast_on_stitches: u32::try_from(self.cast_on.max(0)).unwrap_or(u32::MAX),
            total_rows: self.row,
            instructions: self.instructions,
            calculations: self.calculations,
            warnings: self.warnings,
        }
    }
}

/// How an instruction's parameters depend on its row span
#[derive(Clone, Copy, Debug)]
enum Span {
    /// `[rows, unit]` worked evenly
    Rows { key: TextKey, unit: RowUnit },
    /// One event on the last row of every interval
    Shaping {
        key: TextKey,
        delta: i64,
        interval: u32,
        repeats: u32,
        unit: RowUnit,
    },
}

impl Span {
    fn of(ins: &Instruction) -> Option<Self> {
        let key = ins.text.key;
        match (key, ins.text.params.as_slice()) {
            (TextKey::Stockinette | TextKey::Ribbing, [Param::Count(_), Param::Unit(unit)]) => {
                Some(Self::Rows { key, unit: *unit })
            }
            (
                TextKey::Increase
                | TextKey::Decrease
                | TextKey::RaglanIncrease
                | TextKey::RaglanDecrease,
                [
                    Param::Count(delta),
                    Param::Count(interval),
                    Param::Count(repeats),
                    Param::Unit(unit),
                ],
            ) => {
                let interval = u32::try_from(*interval).ok().filter(|&n| n > 0)?;
                let repeats = u32::try_from(*repeats).ok().filter(|&n| n > 0)?;
                (interval.checked_mul(repeats) == Some(ins.rows())).then_some(Self::Shaping {
                    key,
                    delta: *delta,
                    interval,
                    repeats,
                    unit: *unit,
                })
            }
            _ => None,
        }
    }
}

/// The span of `ins` if `row` can be split out of it
fn splittable(ins: &Instruction, row: u32) -> Option<Span> {
    if !ins.covers(row) {
        return None;
    }
    let note_allows = ins.note.as_ref().is_none_or(|note| {
        row > ins.row_start
            && !matches!(
                note.key,
                TextKey::NeckEdgeDecreaseAtSameTime | TextKey::NeckEdgeIncreaseAtSameTime
            )
    });
    if note_allows { Span::of(ins) } else { None }
}

const fn fragment(row_start: u32, row_end: u32, text: Text) -> Instruction {
    Instruction {
        row_start,
        row_end,
        text,
        note: None,
    }
}

fn rows_text(key: TextKey, rows: u32, unit: RowUnit) -> Text {
    Text::new(key, vec![Param::Count(i64::from(rows)), Param::Unit(unit)])
}

fn shaping_text(key: TextKey, delta: i64, interval: u32, repeats: u32, unit: RowUnit) -> Text {
    Text::new(
        key,
        vec![
            Param::Count(delta),
            Param::Count(i64::from(interval)),
            Param::Count(i64::from(repeats)),
            Param::Unit(unit),
        ],
    )
}

/// Replace `original` by fragments around `row`, which carries `text`
fn split_around(original: Instruction, span: Span, row: u32, text: Text) -> Vec<Instruction> {
    let (start, end) = (original.row_start, original.row_end);
    let mut before = Vec::with_capacity(2);
    let mut after = Vec::with_capacity(3);
    let worked = match span {
        Span::Rows { key, unit } => {
            if start < row {
                before.push(fragment(start, row - 1, rows_text(key, row - start, unit)));
            }
            if row < end {
                after.push(fragment(row + 1, end, rows_text(key, end - row, unit)));
            }
            rows_text(key, 1, unit)
        }
        Span::Shaping {
            key,
            delta,
            interval,
            repeats,
            unit,
        } => {
            let done = (row - start) / interval;
            let from = start + interval * done;
            let event = from + interval - 1;
            if done > 0 {
                before.push(fragment(
                    start,
                    from - 1,
                    shaping_text(key, delta, interval, done, unit),
                ));
            }
            if from < row {
                before.push(fragment(
                    from,
                    row - 1,
                    rows_text(TextKey::Stockinette, row - from, unit),
                ));
            }
            if row < event {
                if row + 1 < event {
                    after.push(fragment(
                        row + 1,
                        event - 1,
                        rows_text(TextKey::Stockinette, event - 1 - row, unit),
                    ));
                }
                after.push(fragment(event, event, shaping_text(key, delta, 1, 1, unit)));
            }
            let left = repeats - done - 1;
            if left > 0 {
                after.push(fragment(
                    event + 1,
                    end,
                    shaping_text(key, delta, interval, left, unit),
                ));
            }
            if row == event {
                shaping_text(key, delta, 1, 1, unit)
            } else {
                rows_text(TextKey::Stockinette, 1, unit)
            }
        }
    };
    if let Some(first) = before.first_mut() {
        first.note = original.note;
    }
    let mut parts = before;
    parts.push(Instruction {
        row_start: row,
        row_end: row,
        text,
        note: Some(worked),
    });
    parts.extend(after);
    parts
}
