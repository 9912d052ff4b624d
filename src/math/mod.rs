//! Knitting arithmetic shared by every piece

/// Centimeter to stitch/row conversion and repeat alignment
pub mod gauge;
/// Even distribution of increases and decreases
pub mod shaping;
