use crate::constants::DEFAULT_SPLIT_EPSILON_PT;
use crate::layout::{Container, ContainerSpec, Containers, LayoutStrategy, SplitLayouter};
use crate::render::PaperSizeLookup;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical sheets generated when `max_sheets` is unset: the page count
/// rounded up to a whole quarter-fold sheet, which holds every strategy.
fn default_sheet_budget(pages: usize) -> usize {
    pages.div_ceil(8).max(1) * 8
}

/// Imposition configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpositionOptions {
    /// Layout strategy and its parameters
    pub strategy: LayoutStrategy,

    /// Output sheet size; each sheet side is one container
    pub paper: PaperRef,

    /// Upper bound on physical sheets. Layouts needing more fail instead
    /// of dropping pages.
    pub max_sheets: Option<usize>,
}

impl ImpositionOptions {
    pub fn new(strategy: LayoutStrategy, paper: impl Into<PaperRef>) -> Self {
        Self {
            strategy,
            paper: paper.into(),
            max_sheets: None,
        }
    }

    pub fn with_max_sheets(mut self, max_sheets: usize) -> Self {
        self.max_sheets = Some(max_sheets);
        self
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.strategy.validate()?;
        self.paper.resolve()?;

        if self.max_sheets == Some(0) {
            return Err(ImposeError::Config(
                "max_sheets must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Containers for imposing `pages` pages: one per sheet side
    pub fn containers(&self, paper: &impl PaperSizeLookup, pages: usize) -> Result<Containers> {
        let (width, height) = paper.lookup(&self.paper)?;
        let sheets = self
            .max_sheets
            .unwrap_or_else(|| default_sheet_budget(pages));
        let sides = sheets * self.strategy.sides_per_sheet();
        Ok(ContainerSpec::new(Container::new(width, height)?, sides).into())
    }
}

/// Page splitting configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SplitOptions {
    /// Tile size; each tile becomes one output page
    pub paper: PaperRef,

    /// Shortfall accepted for a whole tile, and the narrowest tile kept
    pub epsilon: f32,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            paper: PaperRef::default(),
            epsilon: DEFAULT_SPLIT_EPSILON_PT,
        }
    }
}

impl SplitOptions {
    pub fn new(paper: impl Into<PaperRef>) -> Self {
        Self {
            paper: paper.into(),
            ..Default::default()
        }
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ImposeError::Config(format!(
                "split epsilon must be a non-negative number, got {}",
                self.epsilon
            )));
        }
        self.paper.resolve()?;
        Ok(())
    }

    /// Tile layouter for the configured paper
    pub fn layouter(&self, paper: &impl PaperSizeLookup) -> Result<SplitLayouter> {
        let (width, height) = paper.lookup(&self.paper)?;
        Ok(SplitLayouter::new(width, height)?.with_epsilon(self.epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::StandardPaperSizes;

    #[test]
    fn test_default_budget_covers_pages() {
        assert_eq!(default_sheet_budget(0), 8);
        assert_eq!(default_sheet_budget(9), 16);
    }

    #[test]
    fn test_containers_per_side() {
        let options = ImpositionOptions::new(LayoutStrategy::default(), "A4-landscape")
            .with_max_sheets(3);
        let containers = options.containers(&StandardPaperSizes, 12).unwrap();
        assert_eq!(containers.len(), 6);
        let first = &containers.resolve()[0];
        assert!(first.width() > first.height());
    }

    #[test]
    fn test_split_options_validate() {
        assert!(SplitOptions::default().validate().is_ok());
        assert!(matches!(
            SplitOptions::new("A4").with_epsilon(-1.0).validate(),
            Err(ImposeError::Config(_))
        ));
        assert!(matches!(
            SplitOptions::new("B7").validate(),
            Err(ImposeError::UnknownPaperSize(_))
        ));
    }

    #[test]
    fn test_split_layouter_uses_paper() {
        let layouter = SplitOptions::new((300.0, 400.0))
            .with_epsilon(1.0)
            .layouter(&StandardPaperSizes)
            .unwrap();
        assert_eq!(layouter.tile_width, 300.0);
        assert_eq!(layouter.tile_height, 400.0);
        assert_eq!(layouter.epsilon, 1.0);
    }
}
