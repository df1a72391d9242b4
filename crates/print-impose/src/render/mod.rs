//! Rendering boundary for imposition
//!
//! Layout only sees page sizes; drawing is delegated to these traits:
//! - [`PageGeometrySource`] reports the size of each input page
//! - [`PaperSizeLookup`] turns paper names into sheet dimensions
//! - [`SheetRenderer`] allocates sheets and merges transformed pages onto them
//!
//! [`PdfPageSource`] and [`PdfSheetRenderer`] implement them over lopdf.

mod pdf;

pub use pdf::{PdfPageSource, PdfSheetRenderer};

use crate::transform::Transform;
use crate::types::{PaperRef, Result};

/// Source of page dimensions
pub trait PageGeometrySource {
    type Page;

    /// `(width, height)` of `page` in points
    fn page_size(&self, page: &Self::Page) -> Result<(f32, f32)>;
}

/// Paper name resolution
pub trait PaperSizeLookup {
    /// `(width, height)` in points, or `UnknownPaperSize`
    fn lookup(&self, paper: &PaperRef) -> Result<(f32, f32)>;
}

/// The built-in ISO and US paper table
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPaperSizes;

impl PaperSizeLookup for StandardPaperSizes {
    fn lookup(&self, paper: &PaperRef) -> Result<(f32, f32)> {
        paper.resolve()
    }
}

/// Sheet allocation and page compositing.
///
/// `merge` draws on top of whatever the sheet already holds and never
/// modifies the source page.
pub trait SheetRenderer {
    type Page;
    type Sheet;

    fn allocate_sheet(&mut self, width: f32, height: f32) -> Result<Self::Sheet>;

    fn merge(&mut self, sheet: &Self::Sheet, page: &Self::Page, transform: &Transform)
    -> Result<()>;
}
