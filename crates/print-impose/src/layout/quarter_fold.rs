//! Quarter-fold layout
//!
//! Four pages per container side. The sheet is folded twice after
//! printing, so half of each side has to be printed upside down.

use crate::constants::PAGES_PER_QUARTO_SHEET;
use crate::types::Result;

use super::signature::{reorder, strip_and_remap};
use super::{Containers, GridLayouter, LayoutMetadata, LayoutResult, Layouter, PageBox, quarter_fold_order};

/// Pages per container side in a quarter-fold layout
const PAGES_PER_SIDE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuarterFoldLayouter {
    pub grid: GridLayouter,
}

impl QuarterFoldLayouter {
    pub fn new(grid: GridLayouter) -> Self {
        Self { grid }
    }

    /// True if print slot `slot` is turned 180°.
    ///
    /// Each side holds one run of four, laid out bottom row first, so on a
    /// two-by-two side slots 2 and 3 are the top row.
    pub fn is_rotated_slot(slot: usize) -> bool {
        slot % PAGES_PER_SIDE >= 2
    }
}

impl Layouter for QuarterFoldLayouter {
    fn perform_layout(&self, containers: &Containers, boxes: &[PageBox]) -> Result<LayoutResult> {
        let containers = containers.resolve();
        let reordered = reorder(boxes, PAGES_PER_QUARTO_SHEET, quarter_fold_order)?;
        let metadata = LayoutMetadata {
            padding: self.grid.padding,
            gap: self.grid.gap,
            leeway: self.grid.leeway,
            blanks_added: reordered.blanks_added,
            page_order: Some(reordered.order.clone()),
            sides_per_sheet: 2,
        };
        if boxes.is_empty() {
            return Ok(LayoutResult::empty(metadata));
        }
        let mut inner = reordered.layout_sides(&self.grid, &containers, PAGES_PER_SIDE)?;
        for applied in inner.applied_boxes.iter_mut() {
            if Self::is_rotated_slot(applied.box_index) {
                *applied = applied.clone().rotated_by(180.0);
            }
        }

        log::debug!(
            "quarter fold: {} pages, {} blanks, {} sides",
            boxes.len(),
            reordered.blanks_added,
            inner.used_containers.len()
        );
        Ok(strip_and_remap(inner, &reordered, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Container, ContainerSpec};
    use crate::types::ImposeError;

    fn pages(n: usize) -> Vec<PageBox> {
        (0..n).map(|_| PageBox::new(100.0, 150.0).unwrap()).collect()
    }

    /// Two rows of two pages per side
    fn sides(n: usize) -> Containers {
        ContainerSpec::new(Container::new(200.0, 300.0).unwrap(), n).into()
    }

    #[test]
    fn test_eight_pages_on_one_sheet() {
        let result = QuarterFoldLayouter::default()
            .perform_layout(&sides(2), &pages(8))
            .unwrap();
        assert_eq!(result.used_containers.len(), 2);
        assert_eq!(result.metadata.blanks_added, 0);

        let front: Vec<usize> = result.boxes_on(0).map(|a| a.box_index).collect();
        assert_eq!(front, vec![7, 0, 1, 6]);
        let back: Vec<usize> = result.boxes_on(1).map(|a| a.box_index).collect();
        assert_eq!(back, vec![5, 2, 3, 4]);
    }

    #[test]
    fn test_top_row_rotated() {
        let result = QuarterFoldLayouter::default()
            .perform_layout(&sides(2), &pages(8))
            .unwrap();
        for applied in &result.applied_boxes {
            let top_row = applied.position.1 > 0.0;
            let expected = if top_row { 180.0 } else { 0.0 };
            assert_eq!(applied.rotation, expected, "box {}", applied.box_index);
        }
    }

    #[test]
    fn test_pads_to_multiple_of_eight() {
        let result = QuarterFoldLayouter::default()
            .perform_layout(&sides(4), &pages(11))
            .unwrap();
        assert_eq!(result.metadata.blanks_added, 5);
        assert_eq!(result.applied_boxes.len(), 11);
        let mut indices: Vec<usize> = result.applied_boxes.iter().map(|a| a.box_index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..11).collect::<Vec<_>>());
    }

    #[test]
    fn test_insufficient_sheet_sides() {
        let result = QuarterFoldLayouter::default().perform_layout(&sides(3), &pages(16));
        assert!(matches!(
            result,
            Err(ImposeError::InsufficientSheetSides {
                required: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn test_wide_side_takes_exactly_four() {
        let wide: Containers = ContainerSpec::new(Container::new(800.0, 150.0).unwrap(), 4).into();
        let result = QuarterFoldLayouter::default()
            .perform_layout(&wide, &pages(16))
            .unwrap();
        assert_eq!(result.used_containers.len(), 4);
        for side in 0..4 {
            assert_eq!(result.boxes_on(side).count(), 4);
        }
        let second: Vec<usize> = result.boxes_on(1).map(|a| a.box_index).collect();
        assert_eq!(second, vec![13, 2, 3, 12]);
    }
}
