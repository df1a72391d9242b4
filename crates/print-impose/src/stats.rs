use crate::layout::{LayoutResult, PageBox};
use crate::types::*;

/// Calculate statistics for a finished layout.
///
/// `boxes` must be the slice the layout was computed from.
pub fn calculate_statistics(boxes: &[PageBox], result: &LayoutResult) -> ImpositionStatistics {
    let sheet_sides = result.used_containers.len();
    let sides_per_sheet = result.metadata.sides_per_sheet.max(1);

    let placements_per_side: Vec<usize> = (0..sheet_sides)
        .map(|index| result.boxes_on(index).count())
        .collect();

    let sheet_area: f32 = result.used_containers.iter().map(|c| c.area()).sum();
    let placed_area: f32 = result
        .applied_boxes
        .iter()
        .filter_map(|applied| {
            boxes
                .get(applied.box_index)
                .map(|page| page.area() * applied.scale * applied.scale)
        })
        .sum();
    let coverage = if sheet_area > 0.0 {
        placed_area / sheet_area
    } else {
        0.0
    };

    ImpositionStatistics {
        source_pages: boxes.len(),
        sheet_sides,
        physical_sheets: sheet_sides.div_ceil(sides_per_sheet),
        blank_pages_added: result.metadata.blanks_added,
        placements_per_side,
        coverage,
    }
}
