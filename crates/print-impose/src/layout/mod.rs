//! Layout calculation for imposition
//!
//! This module handles the geometric side of imposition:
//! - The box/container geometry model and layout results
//! - Signature page ordering (which source page goes in which slot)
//! - Placement strategies (grid, packer, booklet, signature, quarter fold)
//! - Splitting oversized pages into sheet-sized tiles

mod grid;
mod order;
mod packer;
mod quarter_fold;
mod signature;
mod split;
mod strategy;
mod types;

pub use grid::*;
pub use order::*;
pub use packer::*;
pub use quarter_fold::*;
pub use signature::*;
pub use split::*;
pub use strategy::*;
pub use types::*;

use crate::types::Result;

/// A placement strategy.
///
/// Implementations are deterministic: the same containers and boxes always
/// produce the same result. On failure no partial result is returned.
pub trait Layouter {
    fn perform_layout(&self, containers: &Containers, boxes: &[PageBox]) -> Result<LayoutResult>;
}
