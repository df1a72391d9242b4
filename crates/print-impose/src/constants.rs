//! Shared constants for imposition
//!
//! This module centralizes magic numbers and constants used throughout
//! layout and rendering.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Layout Tolerances
// =============================================================================

/// Slack accepted by the leeway grid and the packer when nothing is configured (points)
pub const DEFAULT_LEEWAY_PT: f32 = 0.5;

/// Tolerance for float comparisons between placed rectangles (points)
pub const GEOMETRY_EPSILON: f32 = 1e-3;

/// Shortfall accepted when splitting a page into whole tiles, and the
/// narrowest edge tile kept (points)
pub const DEFAULT_SPLIT_EPSILON_PT: f32 = 2.0;

// =============================================================================
// Sheets
// =============================================================================

/// Pages per saddle-stitch sheet (two up, front and back)
pub const PAGES_PER_FOLIO_SHEET: usize = 4;

/// Pages per quarter-fold sheet (four up, front and back)
pub const PAGES_PER_QUARTO_SHEET: usize = 8;
