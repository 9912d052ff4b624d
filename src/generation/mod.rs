//! Piece generation
//!
//! This module contains:
//! - The row cursor every piece is written through
//! - Per-garment dimensions derived through the shared gauge converter
//! - Flat and seamless piece routines and the neckline shaping they share
//! - The construction by role dispatch and the pattern assembler

/// Pattern orchestration, assembly and finishing lists, disclaimer
pub mod assembler;
/// Gap-free instruction builder with live stitch tracking
pub mod builder;
/// Flat panels, flat sleeves, hood and armhole borders
pub mod flat;
/// Neckline and shoulder shaping for upper pieces and raglan yokes
pub mod neckline;
/// Piece order and dispatch
pub mod pieces;
/// Seamless body, raglan yoke and sleeves in the round
pub mod seamless;
/// Stitch and row counts derived from measurements
pub mod sizing;

pub use assembler::{GenerationConfig, PatternAssembler};
pub use pieces::{PieceContext, generate_piece, piece_order};
