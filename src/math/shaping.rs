//! Even distribution of increases and decreases over a row budget
//!
//! Uses the bracketing distribution knitters compute by hand: with `n`
//! events in `r` rows, every interval is `r / n` rows and the `r % n`
//! leftover rows lengthen the final intervals, so the last event always lands
//! exactly on row `r`.

use crate::model::pattern::CalculationStep;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether stitches are added or removed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapingDirection {
    /// Stitch count grows
    Increase,
    /// Stitch count shrinks
    Decrease,
    /// Stitch count is unchanged
    Straight,
}

/// How the events were laid out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapingMode {
    /// No shaping needed
    Straight,
    /// Events spread with at least one row between them
    Even,
    /// More events than rows; several events share a row
    EveryRow,
    /// No rows available; all shaping in a single event
    Immediate,
}

/// One shaping row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapingEvent {
    /// Row within the shaped section, 1-based, 0 only in immediate mode
    pub row_offset: u32,
    /// Signed change in stitch count
    pub delta: i64,
}

/// Consecutive events sharing the same interval and size
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapingSegment {
    /// Rows from the previous event to this one
    pub interval: u32,
    /// Number of events
    pub repeats: u32,
    /// Signed change per event
    pub delta: i64,
}

impl ShapingSegment {
    /// Rows spanned by the segment
    pub const fn rows(&self) -> u32 {
        self.interval * self.repeats
    }
}

/// Ordered shaping events plus the audit record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapingPlan {
    /// Stitches before shaping
    pub start_count: i64,
    /// Stitches after shaping
    pub end_count: i64,
    /// Rows the shaping may use
    pub available_rows: u32,
    /// Stitches changed per ordinary event
    pub edges_per_step: i64,
    /// Increase, decrease or straight
    pub direction: ShapingDirection,
    /// Layout used
    pub mode: ShapingMode,
    /// Events in row order
    pub events: Vec<ShapingEvent>,
    /// Audit record of the interval calculation
    pub step: CalculationStep,
}

/// Plan shaping from `start_count` to `end_count` within `available_rows`
///
/// Each ordinary event changes the count by `edges_per_step`; when the
/// difference is not a multiple of it the final event carries the remainder.
pub fn plan_shaping(
    start_count: i64,
    end_count: i64,
    available_rows: u32,
    edges_per_step: i64,
) -> ShapingPlan {
    let stitch_delta = (end_count - start_count).abs();
    let edges = edges_per_step.max(1);
    let sign = (end_count - start_count).signum();
    let direction = match sign {
        1 => ShapingDirection::Increase,
        -1 => ShapingDirection::Decrease,
        _ => ShapingDirection::Straight,
    };

    if stitch_delta == 0 {
        return ShapingPlan {
            start_count,
            end_count,
            available_rows,
            edges_per_step: edges,
            direction,
            mode: ShapingMode::Straight,
            events: Vec::new(),
            step: CalculationStep {
                description: format!("Work straight for {available_rows} rows"),
                formula: format!("{start_count} sts -> {end_count} sts: no shaping"),
                raw_result: 0.0,
                rounded_result: 0,
                rounding_note: None,
            },
        };
    }

    let event_count = (stitch_delta + edges - 1) / edges;
    let event_deltas: Vec<i64> = (0..event_count)
        .map(|i| {
            let size = if i + 1 == event_count {
                stitch_delta - edges * (event_count - 1)
            } else {
                edges
            };
            size * sign
        })
        .collect();
    let rows = i64::from(available_rows);

    let (mode, events, step) = if rows == 0 {
        let events = vec![ShapingEvent {
            row_offset: 0,
            delta: end_count - start_count,
        }];
        let step = CalculationStep {
            description: format!(
                "{} {stitch_delta} sts at once",
                direction_verb(direction)
            ),
            formula: format!("{stitch_delta} sts over 0 rows"),
            raw_result: 0.0,
            rounded_result: 0,
            rounding_note: Some("no rows available for gradual shaping".to_string()),
        };
        (ShapingMode::Immediate, events, step)
    } else if event_count <= rows {
        let interval = rows / event_count;
        let remainder = rows % event_count;
        let mut offset = 0;
        let events: Vec<ShapingEvent> = event_deltas
            .iter()
            .enumerate()
            .map(|(i, &delta)| {
                let long = (i as i64) >= event_count - remainder;
                offset += if long { interval + 1 } else { interval };
                ShapingEvent {
                    row_offset: offset as u32,
                    delta,
                }
            })
            .collect();
        let step = CalculationStep {
            description: format!(
                "{} {edges} sts every {interval} rows, {event_count} times",
                direction_verb(direction)
            ),
            formula: format!(
                "{stitch_delta} sts / {edges} per event = {event_count} events; {rows} rows / {event_count} = {interval} r {remainder}"
            ),
            raw_result: rows as f64 / event_count as f64,
            rounded_result: interval,
            rounding_note: (remainder > 0).then(|| {
                format!(
                    "last {remainder} intervals lengthened to {} rows so shaping ends on row {rows}",
                    interval + 1
                )
            }),
        };
        (ShapingMode::Even, events, step)
    } else {
        let per_row = event_count / rows;
        let extra = event_count % rows;
        let mut pending = event_deltas.iter();
        let events: Vec<ShapingEvent> = (0..rows)
            .map(|row| {
                let take = if row >= rows - extra {
                    per_row + 1
                } else {
                    per_row
                };
                let delta = pending.by_ref().take(take as usize).sum();
                ShapingEvent {
                    row_offset: (row + 1) as u32,
                    delta,
                }
            })
            .collect();
        let step = CalculationStep {
            description: format!(
                "{} on every row for {rows} rows",
                direction_verb(direction)
            ),
            formula: format!(
                "{event_count} events needed but only {rows} rows available"
            ),
            raw_result: rows as f64 / event_count as f64,
            rounded_result: 1,
            rounding_note: Some(format!(
                "{event_count} shaping events compressed onto {rows} rows"
            )),
        };
        (ShapingMode::EveryRow, events, step)
    };

    debug!(
        start_count,
        end_count, available_rows, ?mode, "planned shaping"
    );

    ShapingPlan {
        start_count,
        end_count,
        available_rows,
        edges_per_step: edges,
        direction,
        mode,
        events,
        step,
    }
}

const fn direction_verb(direction: ShapingDirection) -> &'static str {
    match direction {
        ShapingDirection::Increase => "Increase",
        ShapingDirection::Decrease => "Decrease",
        ShapingDirection::Straight => "Work",
    }
}

impl ShapingPlan {
    /// Stitch count after applying every event to the start count
    pub fn final_count(&self) -> i64 {
        self.start_count + self.events.iter().map(|event| event.delta).sum::<i64>()
    }

    /// Number of shaping events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Row of the last event, zero when there is none
    pub fn last_row(&self) -> u32 {
        self.events.last().map_or(0, |event| event.row_offset)
    }

    /// Group events into runs of equal interval and size
    pub fn segments(&self) -> Vec<ShapingSegment> {
        let mut segments: Vec<ShapingSegment> = Vec::new();
        let mut previous = 0;
        for event in &self.events {
            let interval = event.row_offset - previous;
            previous = event.row_offset;
            match segments.last_mut() {
                Some(last) if last.interval == interval && last.delta == event.delta => {
                    last.repeats += 1;
                }
                _ => segments.push(ShapingSegment {
                    interval,
                    repeats: 1,
                    delta: event.delta,
                }),
            }
        }
        segments
    }

    /// Split into the events up to and including `row` and those after it
    ///
    /// Offsets in the second plan are relative to `row`. Both halves keep the
    /// audit record of the whole plan.
    pub fn split_at(&self, row: u32) -> (Self, Self) {
        let row = row.min(self.available_rows);
        let (head, tail): (Vec<ShapingEvent>, Vec<ShapingEvent>) = self
            .events
            .iter()
            .partition(|event| event.row_offset <= row);
        let middle = self.start_count + head.iter().map(|event| event.delta).sum::<i64>();
        let tail: Vec<ShapingEvent> = tail
            .into_iter()
            .map(|event| ShapingEvent {
                row_offset: event.row_offset - row,
                delta: event.delta,
            })
            .collect();

        let first = Self {
            start_count: self.start_count,
            end_count: middle,
            available_rows: row,
            events: head,
            ..self.clone()
        };
        let second = Self {
            start_count: middle,
            end_count: self.end_count,
            available_rows: self.available_rows - row,
            events: tail,
            ..self.clone()
        };
        (first, second)
    }
}
