//! Neck and shoulder shaping shared by flat and seamless upper pieces

use crate::generation::builder::{PieceBuilder, ShapingKeys};
use crate::generation::sizing::BodyDims;
use crate::math::shaping::plan_shaping;
use crate::model::garment::NecklineType;
use crate::model::pattern::{Param, PieceRole, RowUnit, Text, TextKey};

/// Fewest stitches left for each shoulder
const MIN_SHOULDER_STITCHES: i64 = 2;

/// Which kind of panel carries the neck shaping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    /// Back, neck centered and shallow
    Back,
    /// Pullover front, neck centered
    Front,
    /// Cardigan front, neck on the front edge only
    HalfFront,
}

impl Panel {
    /// Panel shape for a piece role
    pub const fn for_role(role: PieceRole) -> Self {
        match role {
            PieceRole::LeftFront | PieceRole::RightFront => Self::HalfFront,
            PieceRole::Front => Self::Front,
            _ => Self::Back,
        }
    }

    const fn edges(self) -> i64 {
        match self {
            Self::HalfFront => 1,
            Self::Back | Self::Front => 2,
        }
    }
}

/// How a neck opening is started
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Opening {
    /// Bind off the center (or front edge) stitches, then decrease gradually
    BindOff,
    /// Divide without binding off, then decrease continuously
    Divide,
    /// One wide bind-off and no further shaping
    Wide,
    /// No neck shaping; stitches are bound off with the shoulders
    None,
}

/// Neck and shoulder shaping of one flat upper piece
///
/// `center` is bound off first, `gradual` stitches are then removed at the
/// neck edges, and the shoulders are bound off in `steps` two-row steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpperShape {
    panel: Panel,
    opening: Opening,
    /// Stitches removed in the initial bind-off
    pub center: i64,
    /// Stitches removed by gradual neck decreases
    pub gradual: i64,
    /// Rows of neck shaping, including any bind-off or dividing row
    pub neck_rows: i64,
    /// Stitches in each shoulder
    pub shoulder: i64,
    /// Number of shoulder bind-off steps
    pub steps: i64,
}

impl UpperShape {
    /// Lay out the neck and shoulders for a piece holding `stitches`
    pub fn new(stitches: i64, dims: &BodyDims, neckline: NecklineType, panel: Panel) -> Self {
        let opening = match (panel, neckline) {
            (_, NecklineType::Boat) => Opening::Wide,
            (Panel::Back, _) => Opening::BindOff,
            (_, NecklineType::VNeck) => Opening::Divide,
            (Panel::HalfFront, NecklineType::OpenCardigan) => Opening::None,
            _ => Opening::BindOff,
        };
        let base_neck = if neckline == NecklineType::Boat {
            dims.boat_neck_sts
        } else {
            dims.neck_sts
        };

        let (neck, shoulder) = match panel {
            Panel::HalfFront => {
                let shoulder = ((dims.cross_back_sts - base_neck) / 2).max(MIN_SHOULDER_STITCHES);
                ((stitches - shoulder).max(0), shoulder.min(stitches))
            }
            Panel::Back | Panel::Front => {
                let mut neck = base_neck.min(stitches - 2 * MIN_SHOULDER_STITCHES).max(0);
                if (stitches - neck) % 2 != 0 {
                    neck += 1;
                }
                let neck = neck.min(stitches);
                (neck, (stitches - neck) / 2)
            }
        };

        let edges = panel.edges();
        let (center, gradual) = match opening {
            Opening::BindOff => {
                let per_edge = match panel {
                    Panel::Back => (neck / 4).min(3),
                    Panel::Front | Panel::HalfFront => neck / (2 * edges),
                };
                let gradual = per_edge * edges;
                (neck - gradual, gradual)
            }
            Opening::Divide => {
                let center = neck % edges;
                (center, neck - center)
            }
            Opening::Wide => (neck, 0),
            Opening::None => (0, 0),
        };

        let neck_rows = match (opening, panel) {
            (Opening::None, _) => 0,
            (Opening::Wide, _) => dims.boat_rows.max(1),
            (_, Panel::Back) => dims.back_neck_rows.max(1),
            (Opening::Divide, _) => dims.v_neck_rows.max(1),
            (Opening::BindOff, _) => dims.front_neck_rows.max(1),
        };

        let steps = match shoulder {
            s if s >= 24 => 4,
            s if s >= 12 => 3,
            s => s.clamp(0, 2),
        };

        Self {
            panel,
            opening,
            center,
            gradual,
            neck_rows,
            shoulder,
            steps,
        }
    }

    /// Shorten the neck so neck and shoulders fit in `rows`
    ///
    /// At least one neck row is kept; any remaining overflow is reported by
    /// the caller.
    pub fn fit_within(&mut self, rows: i64) {
        if self.opening != Opening::None {
            self.neck_rows = self.neck_rows.min((rows - 2 * self.steps).max(1));
        }
    }

    /// Rows used by the neck and shoulder shaping together
    pub const fn rows(&self) -> i64 {
        self.neck_rows + 2 * self.steps
    }

    /// Work the neck, then the stepped shoulders, then any stitches left
    pub fn apply(&self, builder: &mut PieceBuilder) {
        let edge = Param::Label("neck".to_string());
        match self.opening {
            Opening::BindOff => {
                let text = match self.panel {
                    Panel::HalfFront => Text::new(
                        TextKey::EdgeBindOff,
                        vec![Param::Count(self.center), edge],
                    ),
                    Panel::Back | Panel::Front => {
                        Text::new(TextKey::CenterBindOff, vec![Param::Count(self.center)])
                    }
                };
                builder.single(text, -self.center);
                self.gradual_neck(builder, self.neck_rows - 1);
            }
            Opening::Divide if self.panel == Panel::HalfFront => {
                self.gradual_neck(builder, self.neck_rows);
            }
            Opening::Divide => {
                builder.single(
                    Text::new(TextKey::DivideForVNeck, vec![Param::Count(self.center)]),
                    -self.center,
                );
                self.gradual_neck(builder, self.neck_rows - 1);
            }
            Opening::Wide => {
                let text = match self.panel {
                    Panel::HalfFront => Text::new(
                        TextKey::EdgeBindOff,
                        vec![Param::Count(self.center), edge],
                    ),
                    Panel::Back | Panel::Front => {
                        Text::new(TextKey::CenterBindOff, vec![Param::Count(self.center)])
                    }
                };
                builder.single(text, -self.center);
                builder.stockinette(self.neck_rows - 1);
            }
            Opening::None => {}
        }
        self.shoulders(builder);
    }

    fn gradual_neck(&self, builder: &mut PieceBuilder, rows: i64) {
        let rows = u32::try_from(rows).unwrap_or(0);
        let start = builder.stitches();
        let plan = plan_shaping(start, start - self.gradual, rows, self.panel.edges());
        builder.shape(&plan, "neck", ShapingKeys::EDGES);
    }

    fn shoulders(&self, builder: &mut PieceBuilder) {
        let sides = match self.panel {
            Panel::HalfFront => 1,
            Panel::Back | Panel::Front => 2,
        };
        let per_step = self.shoulder / self.steps.max(1);
        for step in 0..self.steps {
            let stitches = if step + 1 == self.steps {
                self.shoulder - per_step * (self.steps - 1)
            } else {
                per_step
            };
            builder.change(
                2,
                Text::new(TextKey::ShoulderStep, vec![Param::Count(stitches)]),
                -stitches * sides,
            );
        }
        if builder.stitches() > 0 {
            builder.bind_off_remaining();
        }
    }
}

/// Front neck worked at the same time as raglan shaping
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaglanNeck {
    divide: bool,
    split_front: bool,
    /// Stitches bound off (or held) when the neck opens
    pub center: i64,
    /// Stitches removed at the neck edges while the raglan continues
    pub side: i64,
    /// Rows from the opening row to the top of the raglan, inclusive
    pub rows: i64,
}

/// Rows and stitch changes of a raglan neck in one working direction
#[derive(Clone, Debug, PartialEq)]
pub struct NeckWork {
    /// Row that opens (or, worked downwards, closes) the neck
    pub opening: Text,
    /// Rows the opening takes
    pub opening_rows: i64,
    /// Stitch change on the opening rows
    pub opening_delta: i64,
    /// Concurrent neck shaping carried alongside the raglan
    pub note: Text,
    /// Stitch change from the concurrent neck shaping
    pub side_delta: i64,
    /// Rows covered by the neck, opening included
    pub rows: i64,
}

impl RaglanNeck {
    /// Neck for a raglan front that would otherwise finish with
    /// `front_top` stitches, or `None` for necklines left unshaped
    ///
    /// A split front counts both cardigan fronts together. `rows_available`
    /// bounds the neck depth to the raglan section.
    pub fn new(
        front_top: i64,
        dims: &BodyDims,
        neckline: NecklineType,
        split_front: bool,
        rows_available: i64,
    ) -> Option<Self> {
        let removable = (front_top - 2).max(0);
        let (divide, depth) = match neckline {
            NecklineType::Crew | NecklineType::Hood | NecklineType::Unknown => {
                (false, dims.front_neck_rows)
            }
            NecklineType::VNeck => (true, dims.v_neck_rows),
            NecklineType::Boat | NecklineType::OpenCardigan => return None,
        };
        if removable == 0 || rows_available < 3 {
            return None;
        }

        let center = match (divide, split_front) {
            (true, true) => 0,
            (true, false) => removable % 2,
            (false, true) => (removable / 2) & !1,
            (false, false) => {
                let half = removable / 2;
                if (removable - half) % 2 == 0 { half } else { half + 1 }
            }
        };
        Some(Self {
            divide,
            split_front,
            center,
            side: removable - center,
            rows: depth.clamp(2, rows_available - 1),
        })
    }

    /// Split fronts open with a bind-off at each neck edge, or not at all
    const fn opening_rows(&self) -> i64 {
        match (self.split_front, self.center > 0) {
            (true, true) => 2,
            (true, false) => 0,
            (false, _) => 1,
        }
    }

    /// Neck edges shape once per event; both edges together remove `side`
    fn at_same_time(&self, key: TextKey) -> Text {
        let events = (self.side / 2).max(1);
        let rows = (self.rows - self.opening_rows()).max(1);
        Text::new(
            key,
            vec![Param::Count((rows / events).max(1)), Param::Count(events)],
        )
    }

    /// Neck worked upwards on a front holding every front stitch
    pub fn upward(&self) -> NeckWork {
        let opening = if self.split_front {
            Text::new(
                TextKey::EdgeBindOff,
                vec![
                    Param::Count(self.center / 2),
                    Param::Label("neck".to_string()),
                ],
            )
        } else if self.divide {
            Text::new(TextKey::DivideForVNeck, vec![Param::Count(self.center)])
        } else {
            Text::new(TextKey::CenterBindOff, vec![Param::Count(self.center)])
        };
        NeckWork {
            opening,
            opening_rows: self.opening_rows(),
            opening_delta: -self.center,
            note: self.at_same_time(TextKey::NeckEdgeDecreaseAtSameTime),
            side_delta: -self.side,
            rows: self.rows,
        }
    }

    /// Neck worked upwards on one of two split fronts
    pub fn upward_half(&self) -> NeckWork {
        NeckWork {
            opening: Text::new(
                TextKey::EdgeBindOff,
                vec![
                    Param::Count(self.center / 2),
                    Param::Label("neck".to_string()),
                ],
            ),
            opening_rows: i64::from(self.center / 2 > 0),
            opening_delta: -(self.center / 2),
            note: self.at_same_time(TextKey::NeckEdgeDecreaseAtSameTime),
            side_delta: -(self.side / 2),
            rows: self.rows,
        }
    }

    /// Neck worked downwards from the cast-on, closing at the opening row
    pub fn downward(&self) -> NeckWork {
        let opening = if self.split_front {
            Text::new(TextKey::CastOnNeck, vec![Param::Count(self.center / 2)])
        } else {
            Text::new(TextKey::JoinInRound, vec![Param::Count(self.center)])
        };
        NeckWork {
            opening,
            opening_rows: self.opening_rows(),
            opening_delta: self.center,
            note: self.at_same_time(TextKey::NeckEdgeIncreaseAtSameTime),
            side_delta: self.side,
            rows: self.rows,
        }
    }
}

/// Work raglan shaping upwards to `end` stitches over `rows` rows, opening
/// the neck for the final `neck.rows` rows when one is given
pub fn raglan_upward(
    builder: &mut PieceBuilder,
    end: i64,
    rows: i64,
    edges: i64,
    neck: Option<&NeckWork>,
) {
    let start = builder.stitches();
    let Some(neck) = neck else {
        let plan = plan_shaping(start, end, u32::try_from(rows).unwrap_or(0), edges);
        builder.shape(&plan, "raglan", ShapingKeys::RAGLAN);
        return;
    };

    let plan_rows = (rows - neck.opening_rows).max(0);
    let plan = plan_shaping(start, end, u32::try_from(plan_rows).unwrap_or(0), edges);
    let before = (rows - neck.rows).clamp(0, plan_rows);
    let (lower, upper) = plan.split_at(u32::try_from(before).unwrap_or(0));
    builder.shape(&lower, "raglan", ShapingKeys::RAGLAN);
    builder.change(neck.opening_rows, neck.opening.clone(), neck.opening_delta);
    builder.set_unit(RowUnit::Rows);
    builder.note_next(neck.note.clone());
    builder.shape(&upper, "raglan", ShapingKeys::RAGLAN);
    builder.adjust(neck.side_delta);
}

/// Work raglan increases downwards to `end` stitches over `rows` rows,
/// closing the neck after the first `neck.rows` rows when one is given
pub fn raglan_downward(
    builder: &mut PieceBuilder,
    end: i64,
    rows: i64,
    edges: i64,
    neck: Option<&NeckWork>,
) {
    let start = builder.stitches();
    let Some(neck) = neck else {
        let plan = plan_shaping(start, end, u32::try_from(rows).unwrap_or(0), edges);
        builder.shape(&plan, "raglan", ShapingKeys::RAGLAN);
        return;
    };

    let plan_rows = (rows - neck.opening_rows).max(0);
    let raglan_end = end - neck.opening_delta - neck.side_delta;
    let plan = plan_shaping(start, raglan_end, u32::try_from(plan_rows).unwrap_or(0), edges);
    let first = (neck.rows - neck.opening_rows).clamp(0, plan_rows);
    let (upper, lower) = plan.split_at(u32::try_from(first).unwrap_or(0));
    builder.note_next(neck.note.clone());
    builder.shape(&upper, "raglan", ShapingKeys::RAGLAN);
    builder.adjust(neck.side_delta);
    builder.change(neck.opening_rows, neck.opening.clone(), neck.opening_delta);
    if neck.opening.key == TextKey::JoinInRound {
        builder.set_unit(RowUnit::Rounds);
    }
    builder.shape(&lower, "raglan", ShapingKeys::RAGLAN);
}
