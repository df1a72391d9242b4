//! Page splitting
//!
//! The reverse of imposition: one large page is cut into tiles of a target
//! sheet size. Tiles are counted from the bottom-left corner, row by row.
//! A page only yields whole tiles, where "whole" allows `epsilon` of
//! shortfall; edge tiles are clipped to the page and any tile thinner than
//! `epsilon` on either axis is dropped.

use crate::constants::DEFAULT_SPLIT_EPSILON_PT;
use crate::types::{ImposeError, Result};

use super::{PageBox, Rect};

#[cfg(feature = "serde")]
use serde::Serialize;

/// One tile cut from a source page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Tile {
    /// Index of the source page in the caller's input slice
    pub page_index: usize,
    /// Row, counted from the bottom
    pub row: usize,
    /// Column, counted from the left
    pub col: usize,
    /// Area of the source page covered by this tile
    pub source: Rect,
}

/// Cuts pages into tiles of `tile_width` × `tile_height`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitLayouter {
    pub tile_width: f32,
    pub tile_height: f32,
    pub epsilon: f32,
}

impl SplitLayouter {
    pub fn new(tile_width: f32, tile_height: f32) -> Result<Self> {
        if !(tile_width.is_finite() && tile_height.is_finite() && tile_width > 0.0 && tile_height > 0.0)
        {
            return Err(ImposeError::InvalidGeometry {
                width: tile_width,
                height: tile_height,
            });
        }
        Ok(Self {
            tile_width,
            tile_height,
            epsilon: DEFAULT_SPLIT_EPSILON_PT,
        })
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon.max(0.0);
        self
    }

    /// Columns and rows of tiles taken from `page`
    pub fn grid_dimensions(&self, page: &PageBox) -> (usize, usize) {
        let cols = ((page.width() + self.epsilon) / self.tile_width).floor() as usize;
        let rows = ((page.height() + self.epsilon) / self.tile_height).floor() as usize;
        (cols, rows)
    }

    /// Tiles of a single page, bottom row first
    pub fn tiles_for(&self, page_index: usize, page: &PageBox) -> Vec<Tile> {
        let (cols, rows) = self.grid_dimensions(page);
        let mut tiles = Vec::with_capacity(cols * rows);

        for row in 0..rows {
            for col in 0..cols {
                let x = col as f32 * self.tile_width;
                let y = row as f32 * self.tile_height;
                let width = (x + self.tile_width).min(page.width()) - x;
                let height = (y + self.tile_height).min(page.height()) - y;

                if width < self.epsilon || height < self.epsilon {
                    log::trace!("split: page {} skips sliver at ({}, {})", page_index, row, col);
                    continue;
                }

                tiles.push(Tile {
                    page_index,
                    row,
                    col,
                    source: Rect::new(x, y, width, height),
                });
            }
        }
        tiles
    }

    /// Tiles of every page, in page order
    pub fn split(&self, pages: &[PageBox]) -> Vec<Tile> {
        let tiles: Vec<Tile> = pages
            .iter()
            .enumerate()
            .flat_map(|(index, page)| {
                let tiles = self.tiles_for(index, page);
                if tiles.is_empty() {
                    log::warn!(
                        "split: page {} ({} x {}) is smaller than a {} x {} tile",
                        index,
                        page.width(),
                        page.height(),
                        self.tile_width,
                        self.tile_height
                    );
                }
                tiles
            })
            .collect();

        log::debug!("split: {} pages into {} tiles", pages.len(), tiles.len());
        tiles
    }
}

// =============================================================================
// Tests
// =============================================================================
