//! Piece order and the construction by role dispatch

use crate::generation::assembler::GenerationConfig;
use crate::generation::flat::{self, Start};
use crate::generation::seamless::{self, Direction};
use crate::io::error::{Result, piece_error};
use crate::math::gauge::GaugeConverter;
use crate::model::garment::{Construction, NecklineType, ResolvedGarment, SleeveStyle};
use crate::model::measurements::Measurements;
use crate::model::pattern::{PatternPiece, PieceRole};
use tracing::debug;

/// Everything a piece routine reads
#[derive(Clone, Copy, Debug)]
pub struct PieceContext<'a> {
    /// Garment after fallbacks
    pub garment: &'a ResolvedGarment,
    /// Body measurements
    pub measurements: &'a Measurements,
    /// The pattern's single gauge converter
    pub converter: &'a GaugeConverter,
    /// Knitting conventions
    pub config: &'a GenerationConfig,
}

/// Pieces to generate, in knitting order
///
/// Assembled and bottom-up garments start at the hem; top-down raglans start
/// with the yoke.
pub fn piece_order(garment: &ResolvedGarment) -> Vec<PieceRole> {
    let fronts: &[PieceRole] = if garment.is_cardigan() {
        &[PieceRole::LeftFront, PieceRole::RightFront]
    } else {
        &[PieceRole::Front]
    };
    let arms = if garment.has_sleeves() {
        PieceRole::Sleeve
    } else {
        PieceRole::ArmholeBorder
    };
    let raglan = garment.sleeve_style == SleeveStyle::Raglan;

    let mut order = match (garment.construction, raglan) {
        (Construction::Assembled, _) => {
            let mut order = vec![PieceRole::Back];
            order.extend_from_slice(fronts);
            order.push(arms);
            order
        }
        (Construction::SeamlessBottomUp, true) => {
            vec![PieceRole::Body, PieceRole::Sleeve, PieceRole::Yoke]
        }
        (Construction::SeamlessTopDown, true) => {
            vec![PieceRole::Yoke, PieceRole::Body, PieceRole::Sleeve]
        }
        (Construction::SeamlessBottomUp | Construction::SeamlessTopDown, false) => {
            let mut order = vec![PieceRole::Body, PieceRole::Back];
            order.extend_from_slice(fronts);
            order.push(arms);
            order
        }
    };
    if garment.neckline == NecklineType::Hood {
        order.push(PieceRole::Hood);
    }
    order
}

/// Generate one piece
///
/// # Errors
///
/// Returns an error if a measurement the piece needs is not finite, or if the
/// role has no routine for the garment's construction
pub fn generate_piece(ctx: &PieceContext<'_>, role: PieceRole) -> Result<PatternPiece> {
    use Construction::{Assembled, SeamlessBottomUp, SeamlessTopDown};

    let piece = match (ctx.garment.construction, role) {
        (
            Assembled,
            PieceRole::Back | PieceRole::Front | PieceRole::LeftFront | PieceRole::RightFront,
        ) => flat::panel(ctx, role, Start::CastOn),
        (
            SeamlessBottomUp | SeamlessTopDown,
            PieceRole::Back | PieceRole::Front | PieceRole::LeftFront | PieceRole::RightFront,
        ) => flat::panel(ctx, role, Start::Held),
        (Assembled, PieceRole::Sleeve) => flat::sleeve(ctx),
        (SeamlessBottomUp, PieceRole::Sleeve) => seamless::sleeve(ctx, Direction::BottomUp),
        (SeamlessTopDown, PieceRole::Sleeve) => seamless::sleeve(ctx, Direction::TopDown),
        (SeamlessBottomUp, PieceRole::Body) => seamless::body(ctx, Direction::BottomUp),
        (SeamlessTopDown, PieceRole::Body) => seamless::body(ctx, Direction::TopDown),
        (SeamlessBottomUp, PieceRole::Yoke) => seamless::yoke(ctx, Direction::BottomUp),
        (SeamlessTopDown, PieceRole::Yoke) => seamless::yoke(ctx, Direction::TopDown),
        (_, PieceRole::Hood) => flat::hood(ctx),
        (_, PieceRole::ArmholeBorder) => flat::armhole_border(ctx),
        (Assembled, PieceRole::Body | PieceRole::Yoke) => Err(piece_error(
            &role,
            &"only seamless garments have this piece",
        )),
    }?;

    debug!(
        piece = %piece.name,
        cast_on = piece.cast_on_stitches,
        rows = piece.total_rows,
        warnings = piece.warnings.len(),
        "generated piece"
    );
    Ok(piece)
}
