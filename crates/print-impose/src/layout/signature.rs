//! Saddle-stitch layouts
//!
//! Booklet and signature layouts pad the input with blank pages, reorder it
//! into print order and hand it to an inner grid, one pair per container
//! side. Afterwards the blanks are dropped and every placement is mapped
//! back to the caller's page index.
//!
//! **Two up, 8 pages:**
//! - Sheet 1: Front [8, 1], Back [2, 7]
//! - Sheet 2: Front [6, 3], Back [4, 5]

use crate::constants::PAGES_PER_FOLIO_SHEET;
use crate::types::{ImposeError, Result};

use super::{
    AppliedBox, Container, Containers, GridLayouter, LayoutMetadata, LayoutResult, Layouter,
    PageBox, multi_signature_order, saddle_order, to_zero_based,
};

/// Pages per container side in a saddle-stitched layout
const PAGES_PER_SIDE: usize = 2;

// =============================================================================
// Shared Helpers
// =============================================================================

/// Boxes reordered into print order, plus the bookkeeping to undo it
#[derive(Debug)]
pub(crate) struct Reordered {
    /// Padded boxes in print order
    pub boxes: Vec<PageBox>,
    /// 1-based page number held by each slot
    pub order: Vec<usize>,
    /// 0-based padded index held by each slot
    pub slots: Vec<usize>,
    pub original_len: usize,
    pub blanks_added: usize,
}

/// Pad `boxes` with blanks up to a multiple of `multiple`, then reorder them
pub(crate) fn reorder(
    boxes: &[PageBox],
    multiple: usize,
    order_fn: impl FnOnce(usize) -> Result<Vec<usize>>,
) -> Result<Reordered> {
    let original_len = boxes.len();
    let padded_len = original_len.div_ceil(multiple) * multiple;
    let blanks_added = padded_len - original_len;

    let mut padded = boxes.to_vec();
    if let Some(template) = boxes.first() {
        padded.extend((0..blanks_added).map(|_| PageBox::blank_like(template)));
    }

    let order = order_fn(padded_len)?;
    let slots = to_zero_based(&order);
    let boxes = slots.iter().map(|&index| padded[index].clone()).collect();

    Ok(Reordered {
        boxes,
        order,
        slots,
        original_len,
        blanks_added,
    })
}

impl Reordered {
    /// Caller index for a print slot. Blanks copy the first box.
    fn source_index(&self, slot: usize) -> usize {
        self.slots
            .get(slot)
            .copied()
            .filter(|&source| source < self.original_len)
            .unwrap_or(0)
    }

    /// Place the reordered boxes `per_side` to a container, reporting
    /// oversized boxes by caller index.
    pub(crate) fn layout_sides(
        &self,
        grid: &GridLayouter,
        containers: &[Container],
        per_side: usize,
    ) -> Result<LayoutResult> {
        grid.layout_per_side(containers, &self.boxes, per_side)
            .map_err(|err| match err {
                ImposeError::BoxTooLarge {
                    box_index,
                    width,
                    height,
                } => ImposeError::BoxTooLarge {
                    box_index: self.source_index(box_index),
                    width,
                    height,
                },
                other => other,
            })
    }
}

/// Build the caller-facing result: drop blank placements and map slot
/// indices back to input indices.
pub(crate) fn strip_and_remap(
    inner: LayoutResult,
    reordered: &Reordered,
    metadata: LayoutMetadata,
) -> LayoutResult {
    let applied_boxes = inner
        .applied_boxes
        .iter()
        .filter_map(|applied| {
            let source = reordered.slots[applied.box_index];
            (source < reordered.original_len).then(|| AppliedBox {
                box_index: source,
                ..applied.clone()
            })
        })
        .collect();

    LayoutResult {
        used_containers: inner.used_containers,
        applied_boxes,
        metadata,
    }
}

fn saddle_metadata(grid: &GridLayouter, reordered: &Reordered) -> LayoutMetadata {
    LayoutMetadata {
        padding: grid.padding,
        gap: grid.gap,
        leeway: grid.leeway,
        blanks_added: reordered.blanks_added,
        page_order: Some(reordered.order.clone()),
        sides_per_sheet: 2,
    }
}

// =============================================================================
// Booklet
// =============================================================================

/// Single saddle-stitched booklet, two pages per container side
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BookletLayouter {
    pub grid: GridLayouter,
}

impl BookletLayouter {
    pub fn new(grid: GridLayouter) -> Self {
        Self { grid }
    }
}

impl Layouter for BookletLayouter {
    fn perform_layout(&self, containers: &Containers, boxes: &[PageBox]) -> Result<LayoutResult> {
        let containers = containers.resolve();
        let reordered = reorder(boxes, PAGES_PER_FOLIO_SHEET, |n| saddle_order(n, false))?;
        let metadata = saddle_metadata(&self.grid, &reordered);
        if boxes.is_empty() {
            return Ok(LayoutResult::empty(metadata));
        }
        let inner = reordered.layout_sides(&self.grid, &containers, PAGES_PER_SIDE)?;
        log::debug!(
            "booklet: {} pages, {} blanks, {} sides",
            boxes.len(),
            reordered.blanks_added,
            inner.used_containers.len()
        );
        Ok(strip_and_remap(inner, &reordered, metadata))
    }
}

// =============================================================================
// Signatures
// =============================================================================

/// Saddle-stitched signatures with optional back-side mirroring and rotation.
///
/// With `signature_pages` set, the input is split into consecutive
/// signatures of that many pages, each ordered independently. Without it
/// the whole input forms one signature.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignatureLayouter {
    pub signature_pages: Option<usize>,
    pub mirror_back: bool,
    pub rotate_back_180: bool,
    pub grid: GridLayouter,
}

impl SignatureLayouter {
    pub fn new(signature_pages: Option<usize>, grid: GridLayouter) -> Result<Self> {
        if let Some(pages) =
            signature_pages.filter(|&pages| pages == 0 || pages % PAGES_PER_FOLIO_SHEET != 0)
        {
            return Err(ImposeError::InvalidPageCount {
                count: pages,
                multiple: PAGES_PER_FOLIO_SHEET,
            });
        }
        Ok(Self {
            signature_pages,
            mirror_back: false,
            rotate_back_180: false,
            grid,
        })
    }

    pub fn with_mirror_back(mut self, mirror_back: bool) -> Self {
        self.mirror_back = mirror_back;
        self
    }

    pub fn with_rotate_back_180(mut self, rotate: bool) -> Self {
        self.rotate_back_180 = rotate;
        self
    }

    /// True if print slot `slot` falls on the back of its sheet
    pub fn is_back_slot(slot: usize) -> bool {
        (slot / 2) % 2 == 1
    }
}

impl Layouter for SignatureLayouter {
    fn perform_layout(&self, containers: &Containers, boxes: &[PageBox]) -> Result<LayoutResult> {
        let containers = containers.resolve();
        let multiple = self.signature_pages.unwrap_or(PAGES_PER_FOLIO_SHEET);
        let reordered = reorder(boxes, multiple, |n| match self.signature_pages {
            Some(signature_pages) => multi_signature_order(n, signature_pages, self.mirror_back),
            None => saddle_order(n, self.mirror_back),
        })?;
        let metadata = saddle_metadata(&self.grid, &reordered);
        if boxes.is_empty() {
            return Ok(LayoutResult::empty(metadata));
        }
        let mut inner = reordered.layout_sides(&self.grid, &containers, PAGES_PER_SIDE)?;

        // Placement order equals slot order here, before any blank is dropped
        if self.rotate_back_180 {
            for applied in inner.applied_boxes.iter_mut() {
                if Self::is_back_slot(applied.box_index) {
                    *applied = applied.clone().rotated_by(180.0);
                }
            }
        }

        log::debug!(
            "signature: {} pages in signatures of {}, {} blanks, {} sides",
            boxes.len(),
            multiple,
            reordered.blanks_added,
            inner.used_containers.len()
        );
        Ok(strip_and_remap(inner, &reordered, metadata))
    }
}

// =============================================================================
// Tests
// =============================================================================
