//! Imposition pipeline
//!
//! Runs the full flow for one job:
//! 1. Measure the source pages
//! 2. Lay them out onto containers
//! 3. Allocate one sheet per used container
//! 4. Merge every placed page onto its sheet, in placement order
//!
//! Splitting runs the same flow in reverse: each tile of a source page gets
//! a sheet of its own, and the page is shifted so the tile sits at the
//! sheet origin.

use lopdf::Document;

use crate::layout::{Containers, LayoutResult, Layouter, PageBox, SplitLayouter, Tile};
use crate::options::{ImpositionOptions, SplitOptions};
use crate::render::{
    PageGeometrySource, PdfPageSource, PdfSheetRenderer, SheetRenderer, StandardPaperSizes,
};
use crate::stats::calculate_statistics;
use crate::transform::{Transform, placement_transform};
use crate::types::*;

/// A finished imposition
#[derive(Debug, Clone)]
pub struct Imposition {
    pub document: Document,
    /// Measured source pages, indexed like `layout.applied_boxes[..].box_index`
    pub boxes: Vec<PageBox>,
    pub layout: LayoutResult,
}

impl Imposition {
    pub fn statistics(&self) -> ImpositionStatistics {
        calculate_statistics(&self.boxes, &self.layout)
    }
}

fn measure_pages<S: PageGeometrySource>(source: &S, pages: &[S::Page]) -> Result<Vec<PageBox>> {
    pages
        .iter()
        .map(|page| {
            let (width, height) = source.page_size(page)?;
            PageBox::new(width, height)
        })
        .collect()
}

/// Lay out `pages` and draw them through `renderer`.
///
/// Returns the layout together with the sheet handle of every used
/// container. Nothing is allocated if the layout fails.
pub fn impose_pages<S, R, L>(
    source: &S,
    renderer: &mut R,
    pages: &[S::Page],
    layouter: &L,
    containers: &Containers,
) -> Result<(LayoutResult, Vec<R::Sheet>)>
where
    S: PageGeometrySource,
    R: SheetRenderer<Page = S::Page>,
    L: Layouter + ?Sized,
{
    let boxes = measure_pages(source, pages)?;
    let layout = layouter.perform_layout(containers, &boxes)?;

    let sheets = layout
        .used_containers
        .iter()
        .map(|container| renderer.allocate_sheet(container.width(), container.height()))
        .collect::<Result<Vec<_>>>()?;

    for applied in &layout.applied_boxes {
        let page = &boxes[applied.box_index];
        let transform = placement_transform(applied, page.width(), page.height());
        log::trace!(
            "merge page {} onto sheet side {}: {}",
            applied.box_index,
            applied.container_index,
            transform.to_pdf_operator()
        );
        renderer.merge(
            &sheets[applied.container_index],
            &pages[applied.box_index],
            &transform,
        )?;
    }

    Ok((layout, sheets))
}

/// Impose every page of `document` according to `options`.
///
/// Runs on the blocking thread pool; the returned document holds one page
/// per used sheet side.
pub async fn impose(document: Document, options: &ImpositionOptions) -> Result<Imposition> {
    let options = options.clone();

    tokio::task::spawn_blocking(move || impose_document(document, &options)).await?
}

/// Synchronous body of [`impose`]
pub fn impose_document(document: Document, options: &ImpositionOptions) -> Result<Imposition> {
    options.validate()?;

    let source = PdfPageSource::new(document)?;
    let boxes = source.page_boxes()?;
    let containers = options.containers(&StandardPaperSizes, boxes.len())?;

    let mut renderer = PdfSheetRenderer::new(source.document());
    let (layout, _) = impose_pages(
        &source,
        &mut renderer,
        source.pages(),
        &options.strategy,
        &containers,
    )?;
    let document = renderer.finish()?;

    log::debug!(
        "imposed {} pages onto {} sheet sides ({} blanks)",
        boxes.len(),
        layout.used_containers.len(),
        layout.metadata.blanks_added
    );

    Ok(Imposition {
        document,
        boxes,
        layout,
    })
}

// =============================================================================
// Splitting
// =============================================================================

/// A finished split
#[derive(Debug, Clone)]
pub struct Split {
    pub document: Document,
    /// One tile per output page, in page order
    pub tiles: Vec<Tile>,
}

/// Cut `pages` into tiles and draw each tile onto a sheet of its own.
///
/// The sheet has the tile's size, so it crops away the rest of the page.
pub fn split_pages<S, R>(
    source: &S,
    renderer: &mut R,
    pages: &[S::Page],
    layouter: &SplitLayouter,
) -> Result<(Vec<Tile>, Vec<R::Sheet>)>
where
    S: PageGeometrySource,
    R: SheetRenderer<Page = S::Page>,
{
    let boxes = measure_pages(source, pages)?;
    let tiles = layouter.split(&boxes);

    let mut sheets = Vec::with_capacity(tiles.len());
    for tile in &tiles {
        let sheet = renderer.allocate_sheet(tile.source.width, tile.source.height)?;
        let transform = Transform::translate(-tile.source.x, -tile.source.y);
        log::trace!(
            "tile ({}, {}) of page {}: {}",
            tile.row,
            tile.col,
            tile.page_index,
            transform.to_pdf_operator()
        );
        renderer.merge(&sheet, &pages[tile.page_index], &transform)?;
        sheets.push(sheet);
    }

    Ok((tiles, sheets))
}

/// Split every page of `document` into tiles of the configured paper size
pub async fn split(document: Document, options: &SplitOptions) -> Result<Split> {
    let options = options.clone();

    tokio::task::spawn_blocking(move || split_document(document, &options)).await?
}

/// Synchronous body of [`split`]
pub fn split_document(document: Document, options: &SplitOptions) -> Result<Split> {
    options.validate()?;
    let layouter = options.layouter(&StandardPaperSizes)?;

    let source = PdfPageSource::new(document)?;
    let mut renderer = PdfSheetRenderer::new(source.document());
    let (tiles, _) = split_pages(&source, &mut renderer, source.pages(), &layouter)?;
    let document = renderer.finish()?;

    log::debug!(
        "split {} pages into {} tiles",
        source.pages().len(),
        tiles.len()
    );

    Ok(Split { document, tiles })
}
