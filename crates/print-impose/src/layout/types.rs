//! Geometry model for imposition layouts
//!
//! Boxes are the pages to place, containers are the sheet sides they land
//! on. Layout strategies consume both and produce a [`LayoutResult`].

use std::collections::BTreeSet;

use crate::types::{ImposeError, Result};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Tag carried by padding boxes injected by signature-style layouts
pub const BLANK_TAG: &str = "blank";

fn validate_dimensions(width: f32, height: f32) -> Result<()> {
    // NaN fails both comparisons
    if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
        Ok(())
    } else {
        Err(ImposeError::InvalidGeometry { width, height })
    }
}

// =============================================================================
// Boxes and Containers
// =============================================================================

/// A placeable rectangle (one input page), in points.
///
/// Identity is the position in the input slice, not the value: two boxes
/// with equal dimensions stay distinguishable through their index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PageBox {
    width: f32,
    height: f32,
    tags: BTreeSet<String>,
}

impl PageBox {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            tags: BTreeSet::new(),
        })
    }

    /// A padding page with the same dimensions as `template`
    pub fn blank_like(template: &PageBox) -> Self {
        Self {
            width: template.width,
            height: template.height,
            tags: BTreeSet::from([BLANK_TAG.to_string()]),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_blank(&self) -> bool {
        self.has_tag(BLANK_TAG)
    }
}

/// A placement target (one printed sheet side), in points
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Container {
    width: f32,
    height: f32,
    tags: BTreeSet<String>,
}

impl Container {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            tags: BTreeSet::new(),
        })
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// The interior left after removing `padding` from every edge
    pub fn padded_interior(&self, padding: f32) -> Rect {
        Rect::new(
            padding,
            padding,
            self.width - 2.0 * padding,
            self.height - 2.0 * padding,
        )
    }
}

/// One template container replicated on demand.
///
/// `max_amount` is a generation policy: layouts that need more containers
/// fail instead of dropping boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    pub container: Container,
    pub max_amount: usize,
}

impl ContainerSpec {
    pub fn new(container: Container, max_amount: usize) -> Self {
        Self {
            container,
            max_amount,
        }
    }

    /// Exactly `n` independent copies of the template
    pub fn generate(&self, n: usize) -> Vec<Container> {
        (0..n).map(|_| self.container.clone()).collect()
    }

    pub fn generate_containers(&self) -> Vec<Container> {
        self.generate(self.max_amount)
    }
}

/// The containers handed to a layout: an explicit list or a generation spec
#[derive(Debug, Clone, PartialEq)]
pub enum Containers {
    List(Vec<Container>),
    Spec(ContainerSpec),
}

impl Containers {
    pub fn resolve(&self) -> Vec<Container> {
        match self {
            Containers::List(list) => list.clone(),
            Containers::Spec(spec) => spec.generate_containers(),
        }
    }

    /// Number of containers `resolve` would return
    pub fn len(&self) -> usize {
        match self {
            Containers::List(list) => list.len(),
            Containers::Spec(spec) => spec.max_amount,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Container>> for Containers {
    fn from(list: Vec<Container>) -> Self {
        Containers::List(list)
    }
}

impl From<ContainerSpec> for Containers {
    fn from(spec: ContainerSpec) -> Self {
        Containers::Spec(spec)
    }
}

// =============================================================================
// Layout Results
// =============================================================================

/// The placement of one input box
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AppliedBox {
    /// Index of the box in the caller's input slice
    pub box_index: usize,
    /// Index into `LayoutResult::used_containers`
    pub container_index: usize,
    /// Lower-left corner of the box footprint, relative to the container
    pub position: (f32, f32),
    pub scale: f32,
    /// Clockwise degrees
    pub rotation: f32,
    pub mirror_horizontal: bool,
    pub mirror_vertical: bool,
}

impl AppliedBox {
    pub fn new(box_index: usize, container_index: usize, position: (f32, f32)) -> Self {
        Self {
            box_index,
            container_index,
            position,
            scale: 1.0,
            rotation: 0.0,
            mirror_horizontal: false,
            mirror_vertical: false,
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees.rem_euclid(360.0);
        self
    }

    /// Add `degrees` to the current rotation, normalized to `[0, 360)`
    pub fn rotated_by(mut self, degrees: f32) -> Self {
        self.rotation = (self.rotation + degrees).rem_euclid(360.0);
        self
    }

    /// True when the footprint is the box with width and height swapped
    pub fn is_quarter_turn(&self) -> bool {
        let r = self.rotation.rem_euclid(180.0);
        (r - 90.0).abs() < 1e-3
    }

    /// The rectangle this placement covers on its container
    pub fn footprint(&self, page: &PageBox) -> Rect {
        let (w, h) = if self.is_quarter_turn() {
            (page.height(), page.width())
        } else {
            (page.width(), page.height())
        };
        Rect::new(
            self.position.0,
            self.position.1,
            w * self.scale,
            h * self.scale,
        )
    }
}

/// Parameters and bookkeeping recorded by the strategy that produced a result
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LayoutMetadata {
    pub padding: f32,
    pub gap: f32,
    pub leeway: f32,
    /// Blank boxes injected to complete a signature
    pub blanks_added: usize,
    /// 1-based page order applied before placement, if any
    pub page_order: Option<Vec<usize>>,
    /// Containers per physical sheet (2 for duplex layouts)
    pub sides_per_sheet: usize,
}

/// Output of a layout pass
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LayoutResult {
    /// Containers in the order they were opened
    pub used_containers: Vec<Container>,
    /// Placements in placement order
    pub applied_boxes: Vec<AppliedBox>,
    pub metadata: LayoutMetadata,
}

impl LayoutResult {
    pub fn empty(metadata: LayoutMetadata) -> Self {
        Self {
            used_containers: Vec::new(),
            applied_boxes: Vec::new(),
            metadata,
        }
    }

    /// Placements targeting one container, in placement order
    pub fn boxes_on(&self, container_index: usize) -> impl Iterator<Item = &AppliedBox> {
        self.applied_boxes
            .iter()
            .filter(move |applied| applied.container_index == container_index)
    }

    /// The placement of a given input box
    pub fn placement_of(&self, box_index: usize) -> Option<&AppliedBox> {
        self.applied_boxes
            .iter()
            .find(|applied| applied.box_index == box_index)
    }
}

// =============================================================================
// Rectangles
// =============================================================================

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// True if `other` lies inside `self`, allowing `slack` on every edge
    pub fn contains(&self, other: &Rect, slack: f32) -> bool {
        other.x >= self.x - slack
            && other.y >= self.y - slack
            && other.right() <= self.right() + slack
            && other.top() <= self.top() + slack
    }

    /// True if the two rectangles are at least `gap` apart along one axis
    pub fn is_separated(&self, other: &Rect, gap: f32, tolerance: f32) -> bool {
        self.right() + gap <= other.x + tolerance
            || other.right() + gap <= self.x + tolerance
            || self.top() + gap <= other.y + tolerance
            || other.top() + gap <= self.y + tolerance
    }
}
