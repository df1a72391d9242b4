//! Greedy rectangle packing
//!
//! Boxes are placed largest area first. Each container keeps a frontier of
//! candidate points, seeded at the padded origin and sorted by `(y, x)`;
//! every placement adds one candidate to its right and one above it.

use std::cmp::Ordering;

use crate::constants::GEOMETRY_EPSILON;
use crate::types::{ImposeError, Result};

use super::{
    AppliedBox, Container, Containers, LayoutMetadata, LayoutResult, Layouter, PageBox, Rect,
};

/// Candidate-point rectangle packer with 0° and 90° orientations
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PackingLayouter {
    pub padding: f32,
    pub gap: f32,
    pub leeway: f32,
}

/// Packing state of one container
#[derive(Debug)]
struct Bin {
    /// Index into the resolved container list
    source_index: usize,
    /// Index into the used container list
    used_index: usize,
    candidates: Vec<(f32, f32)>,
    placed: Vec<Rect>,
}

impl Bin {
    fn new(source_index: usize, used_index: usize, padding: f32) -> Self {
        Self {
            source_index,
            used_index,
            candidates: vec![(padding, padding)],
            placed: Vec::new(),
        }
    }

    fn add_candidate(&mut self, point: (f32, f32)) {
        let duplicate = self.candidates.iter().any(|&(x, y)| {
            (x - point.0).abs() < GEOMETRY_EPSILON && (y - point.1).abs() < GEOMETRY_EPSILON
        });
        if !duplicate {
            self.candidates.push(point);
        }
    }

    fn sort_candidates(&mut self) {
        self.candidates
            .sort_by(|a, b| match a.1.total_cmp(&b.1) {
                Ordering::Equal => a.0.total_cmp(&b.0),
                other => other,
            });
    }
}

/// Where a box goes inside one bin
#[derive(Debug, Clone, Copy)]
struct Spot {
    candidate: usize,
    rect: Rect,
    rotated: bool,
}

impl PackingLayouter {
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

    fn metadata(&self) -> LayoutMetadata {
        LayoutMetadata {
            padding: self.padding,
            gap: self.gap,
            leeway: self.leeway,
            sides_per_sheet: 1,
            ..Default::default()
        }
    }

    fn is_feasible(&self, container: &Container, bin: &Bin, rect: &Rect) -> bool {
        let interior = container.padded_interior(self.padding);
        interior.contains(rect, self.leeway)
            && bin
                .placed
                .iter()
                .all(|other| rect.is_separated(other, self.gap, GEOMETRY_EPSILON))
    }

    /// First candidate (lowest y, then lowest x) admitting either orientation
    fn find_spot(&self, container: &Container, bin: &Bin, page: &PageBox) -> Option<Spot> {
        let orientations = [
            (page.width(), page.height(), false),
            (page.height(), page.width(), true),
        ];
        bin.candidates
            .iter()
            .enumerate()
            .find_map(|(candidate, &(x, y))| {
                orientations.iter().find_map(|&(w, h, rotated)| {
                    let rect = Rect::new(x, y, w, h);
                    self.is_feasible(container, bin, &rect).then_some(Spot {
                        candidate,
                        rect,
                        rotated,
                    })
                })
            })
    }

    fn place(&self, bin: &mut Bin, spot: Spot) {
        bin.candidates.remove(spot.candidate);
        bin.placed.push(spot.rect);
        bin.add_candidate((spot.rect.right() + self.gap, spot.rect.y));
        bin.add_candidate((spot.rect.x, spot.rect.top() + self.gap));
        bin.sort_candidates();
    }
}

impl Layouter for PackingLayouter {
    fn perform_layout(&self, containers: &Containers, boxes: &[PageBox]) -> Result<LayoutResult> {
        let containers = containers.resolve();
        if boxes.is_empty() {
            return Ok(LayoutResult::empty(self.metadata()));
        }

        // Largest area first; the stable sort keeps input order on ties
        let mut order: Vec<usize> = (0..boxes.len()).collect();
        order.sort_by(|&a, &b| boxes[b].area().total_cmp(&boxes[a].area()));

        // Bins indexed by position in `containers`, opened lazily
        let mut bins: Vec<Option<Bin>> = containers.iter().map(|_| None).collect();
        let mut used_containers: Vec<Container> = Vec::new();
        let mut applied_boxes = Vec::with_capacity(boxes.len());

        for (placed, &box_index) in order.iter().enumerate() {
            let page = &boxes[box_index];
            let mut landed = None;

            for (source_index, container) in containers.iter().enumerate() {
                let fresh;
                let bin = match &bins[source_index] {
                    Some(bin) => bin,
                    None => {
                        fresh = Bin::new(source_index, used_containers.len(), self.padding);
                        &fresh
                    }
                };
                if let Some(spot) = self.find_spot(container, bin, page) {
                    landed = Some((source_index, spot));
                    break;
                }
            }

            let Some((source_index, spot)) = landed else {
                let fits_anywhere = containers.iter().any(|container| {
                    let empty = Bin::new(0, 0, self.padding);
                    self.find_spot(container, &empty, page).is_some()
                });
                return Err(if fits_anywhere || containers.is_empty() {
                    ImposeError::InsufficientContainers {
                        available: containers.len(),
                        placed,
                        total: boxes.len(),
                    }
                } else {
                    ImposeError::BoxTooLarge {
                        box_index,
                        width: page.width(),
                        height: page.height(),
                    }
                });
            };

            let bin = bins[source_index].get_or_insert_with(|| {
                used_containers.push(containers[source_index].clone());
                Bin::new(source_index, used_containers.len() - 1, self.padding)
            });
            log::trace!(
                "packer: box {} -> container {} at ({}, {}){}",
                box_index,
                bin.source_index,
                spot.rect.x,
                spot.rect.y,
                if spot.rotated { " rotated" } else { "" }
            );

            let mut applied = AppliedBox::new(box_index, bin.used_index, (spot.rect.x, spot.rect.y));
            if spot.rotated {
                applied = applied.with_rotation(90.0);
            }
            applied_boxes.push(applied);
            self.place(bin, spot);
        }

        log::debug!(
            "packer: placed {} boxes on {} of {} containers",
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
}

// =============================================================================
// Tests
// =============================================================================
