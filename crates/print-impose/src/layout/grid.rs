//! Grid layout
//!
//! Places boxes left to right, bottom to top, in input order. A row ends
//! when the next box would cross the padded right edge; a container ends
//! when the next row would cross the padded top edge.

use crate::types::{ImposeError, Result};

use super::{AppliedBox, Container, Containers, LayoutMetadata, LayoutResult, Layouter, PageBox};

/// Row-major grid layouter.
///
/// `leeway` is slack accepted at the padded right and top edges, so that
/// boxes that fit up to rounding error are not pushed onto the next row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridLayouter {
    pub padding: f32,
    pub gap: f32,
    pub leeway: f32,
}

impl GridLayouter {
    pub fn new(padding: f32, gap: f32) -> Self {
        Self {
            padding,
            gap,
            leeway: 0.0,
        }
    }

    pub fn with_leeway(mut self, leeway: f32) -> Self {
        self.leeway = leeway.max(0.0);
        self
    }

    fn fits_width(&self, container: &Container, x: f32, width: f32) -> bool {
        x + width <= container.width() - self.padding + self.leeway
    }

    fn fits_height(&self, container: &Container, y: f32, height: f32) -> bool {
        y + height <= container.height() - self.padding + self.leeway
    }

    /// True if `page` fits the padded interior of an empty `container`
    fn fits_empty(&self, container: &Container, page: &PageBox) -> bool {
        self.fits_width(container, self.padding, page.width())
            && self.fits_height(container, self.padding, page.height())
    }

    fn metadata(&self) -> LayoutMetadata {
        LayoutMetadata {
            padding: self.padding,
            gap: self.gap,
            leeway: self.leeway,
            sides_per_sheet: 1,
            ..Default::default()
        }
    }

    /// Lay out boxes into an already resolved container list
    pub(crate) fn layout_into(
        &self,
        containers: &[Container],
        boxes: &[PageBox],
    ) -> Result<LayoutResult> {
        if boxes.is_empty() {
            return Ok(LayoutResult::empty(self.metadata()));
        }

        // A box that fits no container would otherwise exhaust the list
        for (box_index, page) in boxes.iter().enumerate() {
            if !containers.is_empty() && !containers.iter().any(|c| self.fits_empty(c, page)) {
                return Err(ImposeError::BoxTooLarge {
                    box_index,
                    width: page.width(),
                    height: page.height(),
                });
            }
        }

        let Some(first) = containers.first() else {
            return Err(ImposeError::InsufficientContainers {
                available: 0,
                placed: 0,
                total: boxes.len(),
            });
        };

        let mut applied_boxes = Vec::with_capacity(boxes.len());
        let mut ci = 0;
        let mut container = first;
        let (mut x, mut y) = (self.padding, self.padding);
        let mut row_height: f32 = 0.0;

        for (box_index, page) in boxes.iter().enumerate() {
            // Start a new row if the box does not fit horizontally
            if x > self.padding && !self.fits_width(container, x, page.width()) {
                x = self.padding;
                y += row_height + self.gap;
                row_height = 0.0;
            }

            // Move to the next container if the box does not fit vertically
            if !self.fits_height(container, y, page.height())
                || !self.fits_width(container, x, page.width())
            {
                ci += 1;
                container = containers.get(ci).ok_or(ImposeError::InsufficientContainers {
                    available: containers.len(),
                    placed: box_index,
                    total: boxes.len(),
                })?;
                x = self.padding;
                y = self.padding;
                row_height = 0.0;

                if !self.fits_empty(container, page) {
                    return Err(ImposeError::BoxTooLarge {
                        box_index,
                        width: page.width(),
                        height: page.height(),
                    });
                }
            }

            log::trace!("grid: box {} -> container {} at ({}, {})", box_index, ci, x, y);
            applied_boxes.push(AppliedBox::new(box_index, ci, (x, y)));

            x += page.width() + self.gap;
            row_height = row_height.max(page.height());
        }

        let used_containers = containers[..=ci].to_vec();
        log::debug!(
            "grid: placed {} boxes on {} of {} containers",
            applied_boxes.len(),
            used_containers.len(),
            containers.len()
        );

        Ok(LayoutResult {
            used_containers,
            applied_boxes,
            metadata: self.metadata(),
        })
    }

    /// Lay out `boxes` in runs of `per_side`, one run per container.
    ///
    /// A run that does not fit its container fails instead of spilling onto
    /// the next one, so run `k` always lands on container `k`.
    pub(crate) fn layout_per_side(
        &self,
        containers: &[Container],
        boxes: &[PageBox],
        per_side: usize,
    ) -> Result<LayoutResult> {
        let per_side = per_side.max(1);
        let sides = boxes.len().div_ceil(per_side);
        if containers.len() < sides {
            return Err(ImposeError::InsufficientSheetSides {
                required: sides,
                available: containers.len(),
            });
        }

        let mut applied_boxes = Vec::with_capacity(boxes.len());
        for (side, (container, run)) in containers.iter().zip(boxes.chunks(per_side)).enumerate() {
            let offset = side * per_side;
            let placed = self
                .layout_into(std::slice::from_ref(container), run)
                .map_err(|err| match err {
                    ImposeError::BoxTooLarge {
                        box_index,
                        width,
                        height,
                    } => ImposeError::BoxTooLarge {
                        box_index: offset + box_index,
                        width,
                        height,
                    },
                    ImposeError::InsufficientContainers { placed, .. } => {
                        ImposeError::InsufficientContainers {
                            available: containers.len(),
                            placed: offset + placed,
                            total: boxes.len(),
                        }
                    }
                    other => other,
                })?;

            applied_boxes.extend(placed.applied_boxes.into_iter().map(|applied| AppliedBox {
                box_index: offset + applied.box_index,
                container_index: side,
                ..applied
            }));
        }

        log::debug!(
            "grid: placed {} boxes, {} per side, on {} sides",
            applied_boxes.len(),
            per_side,
            sides
        );

        Ok(LayoutResult {
            used_containers: containers[..sides].to_vec(),
            applied_boxes,
            metadata: self.metadata(),
        })
    }
}

impl Layouter for GridLayouter {
    fn perform_layout(&self, containers: &Containers, boxes: &[PageBox]) -> Result<LayoutResult> {
        self.layout_into(&containers.resolve(), boxes)
    }
}

// =============================================================================
// Tests
// =============================================================================
