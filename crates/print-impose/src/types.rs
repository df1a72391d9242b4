use crate::constants::mm_to_pt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("Invalid geometry: {width}x{height} (width and height must be positive)")]
    InvalidGeometry { width: f32, height: f32 },
    #[error("Invalid page count: {count} is not a multiple of {multiple}")]
    InvalidPageCount { count: usize, multiple: usize },
    #[error("Not enough containers: placed {placed} of {total} boxes using all {available}")]
    InsufficientContainers {
        available: usize,
        placed: usize,
        total: usize,
    },
    #[error("Not enough sheet sides: {required} required, {available} available")]
    InsufficientSheetSides { required: usize, available: usize },
    #[error("Box {box_index} ({width}x{height}) does not fit in any container")]
    BoxTooLarge {
        box_index: usize,
        width: f32,
        height: f32,
    },
    #[error("Unknown paper size: {0}")]
    UnknownPaperSize(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
}

impl ImposeError {
    /// True for failures a caller can recover from by supplying more
    /// containers or a larger paper size.
    pub fn is_capacity_error(&self) -> bool {
        matches!(
            self,
            ImposeError::InsufficientContainers { .. }
                | ImposeError::InsufficientSheetSides { .. }
                | ImposeError::BoxTooLarge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Dimensions in points with orientation applied
    pub fn dimensions_pt(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_with_orientation(orientation);
        (mm_to_pt(w), mm_to_pt(h))
    }

    /// Parse a paper name such as `"A4"`, `"a4-landscape"` or `"LETTER"`.
    pub fn parse(name: &str) -> Result<(PaperSize, Orientation)> {
        let lower = name.trim().to_ascii_lowercase();
        let (base, orientation) = if let Some(base) = lower.strip_suffix("-landscape") {
            (base, Orientation::Landscape)
        } else if let Some(base) = lower.strip_suffix("-portrait") {
            (base, Orientation::Portrait)
        } else {
            (lower.as_str(), Orientation::Portrait)
        };

        let size = match base {
            "a3" => PaperSize::A3,
            "a4" => PaperSize::A4,
            "a5" => PaperSize::A5,
            "letter" => PaperSize::Letter,
            "legal" => PaperSize::Legal,
            "tabloid" => PaperSize::Tabloid,
            _ => return Err(ImposeError::UnknownPaperSize(name.to_string())),
        };
        Ok((size, orientation))
    }
}

/// Look up a named paper size and return `(width, height)` in points.
pub fn paper_dimensions(name: &str) -> Result<(f32, f32)> {
    let (size, orientation) = PaperSize::parse(name)?;
    Ok(size.dimensions_pt(orientation))
}

/// A paper reference: either a name or explicit dimensions in points
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PaperRef {
    Named(String),
    Dimensions(f32, f32),
}

impl Default for PaperRef {
    fn default() -> Self {
        PaperRef::Named("A4".to_string())
    }
}

impl PaperRef {
    /// Resolve to `(width, height)` in points
    pub fn resolve(&self) -> Result<(f32, f32)> {
        match self {
            PaperRef::Named(name) => paper_dimensions(name),
            PaperRef::Dimensions(width, height) => {
                if *width > 0.0 && *height > 0.0 {
                    Ok((*width, *height))
                } else {
                    Err(ImposeError::InvalidGeometry {
                        width: *width,
                        height: *height,
                    })
                }
            }
        }
    }
}

impl From<&str> for PaperRef {
    fn from(name: &str) -> Self {
        PaperRef::Named(name.to_string())
    }
}

impl From<(f32, f32)> for PaperRef {
    fn from((width, height): (f32, f32)) -> Self {
        PaperRef::Dimensions(width, height)
    }
}

/// Statistics about the imposition
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Number of containers (printed sheet sides) used
    pub sheet_sides: usize,
    /// Number of physical sheets (two sides each for duplex layouts)
    pub physical_sheets: usize,
    /// Number of blank pages added for padding
    pub blank_pages_added: usize,
    /// Placed pages on each used sheet side
    pub placements_per_side: Vec<usize>,
    /// Fraction of the used sheet area covered by placed pages
    pub coverage: f32,
}
