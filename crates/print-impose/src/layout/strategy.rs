//! Strategy selection
//!
//! [`LayoutStrategy`] names a strategy together with its parameters, so a
//! layout can be chosen from configuration and run through one entry point.

use crate::constants::PAGES_PER_FOLIO_SHEET;
use crate::types::{ImposeError, Result};

use super::{
    BookletLayouter, Containers, GridLayouter, LayoutResult, Layouter, PackingLayouter, PageBox,
    QuarterFoldLayouter, SignatureLayouter,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
fn default_leeway() -> f32 {
    crate::constants::DEFAULT_LEEWAY_PT
}

/// A layout strategy and its parameters (all lengths in points)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum LayoutStrategy {
    Grid {
        #[cfg_attr(feature = "serde", serde(default))]
        padding: f32,
        #[cfg_attr(feature = "serde", serde(default))]
        gap: f32,
    },
    LeewayGrid {
        #[cfg_attr(feature = "serde", serde(default))]
        padding: f32,
        #[cfg_attr(feature = "serde", serde(default))]
        gap: f32,
        #[cfg_attr(feature = "serde", serde(default = "default_leeway"))]
        leeway: f32,
    },
    Packer {
        #[cfg_attr(feature = "serde", serde(default))]
        padding: f32,
        #[cfg_attr(feature = "serde", serde(default))]
        gap: f32,
        #[cfg_attr(feature = "serde", serde(default = "default_leeway"))]
        leeway: f32,
    },
    Booklet {
        #[cfg_attr(feature = "serde", serde(default))]
        padding: f32,
        #[cfg_attr(feature = "serde", serde(default))]
        gap: f32,
    },
    Signature {
        #[cfg_attr(feature = "serde", serde(default))]
        signature_pages: Option<usize>,
        #[cfg_attr(feature = "serde", serde(default))]
        mirror_back: bool,
        #[cfg_attr(feature = "serde", serde(default))]
        rotate_back_180: bool,
        #[cfg_attr(feature = "serde", serde(default))]
        padding: f32,
        #[cfg_attr(feature = "serde", serde(default))]
        gap: f32,
    },
    QuarterFold {
        #[cfg_attr(feature = "serde", serde(default))]
        padding: f32,
        #[cfg_attr(feature = "serde", serde(default))]
        gap: f32,
    },
}

impl Default for LayoutStrategy {
    fn default() -> Self {
        LayoutStrategy::Booklet {
            padding: 0.0,
            gap: 0.0,
        }
    }
}

impl LayoutStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            LayoutStrategy::Grid { .. } => "grid",
            LayoutStrategy::LeewayGrid { .. } => "leeway grid",
            LayoutStrategy::Packer { .. } => "packer",
            LayoutStrategy::Booklet { .. } => "booklet",
            LayoutStrategy::Signature { .. } => "signature",
            LayoutStrategy::QuarterFold { .. } => "quarter fold",
        }
    }

    /// Pages consumed by one physical sheet, front and back.
    ///
    /// `None` for strategies with no fixed page count per sheet.
    pub fn pages_per_sheet(&self) -> Option<usize> {
        match self {
            LayoutStrategy::Booklet { .. } | LayoutStrategy::Signature { .. } => Some(4),
            LayoutStrategy::QuarterFold { .. } => Some(8),
            _ => None,
        }
    }

    /// Containers per physical sheet
    pub fn sides_per_sheet(&self) -> usize {
        match self.pages_per_sheet() {
            Some(_) => 2,
            None => 1,
        }
    }

    fn lengths(&self) -> (f32, f32, f32) {
        match *self {
            LayoutStrategy::Grid { padding, gap }
            | LayoutStrategy::Booklet { padding, gap }
            | LayoutStrategy::Signature { padding, gap, .. }
            | LayoutStrategy::QuarterFold { padding, gap } => (padding, gap, 0.0),
            LayoutStrategy::LeewayGrid {
                padding,
                gap,
                leeway,
            }
            | LayoutStrategy::Packer {
                padding,
                gap,
                leeway,
            } => (padding, gap, leeway),
        }
    }

    /// Reject negative or non-finite lengths and bad signature sizes
    pub fn validate(&self) -> Result<()> {
        let (padding, gap, leeway) = self.lengths();
        for (name, value) in [("padding", padding), ("gap", gap), ("leeway", leeway)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ImposeError::Config(format!(
                    "{} {} must be a non-negative number, got {}",
                    self.name(),
                    name,
                    value
                )));
            }
        }

        match *self {
            LayoutStrategy::Signature {
                signature_pages: Some(pages),
                ..
            } if pages == 0 || pages % PAGES_PER_FOLIO_SHEET != 0 => {
                Err(ImposeError::InvalidPageCount {
                    count: pages,
                    multiple: PAGES_PER_FOLIO_SHEET,
                })
            }
            _ => Ok(()),
        }
    }
}

impl Layouter for LayoutStrategy {
    fn perform_layout(&self, containers: &Containers, boxes: &[PageBox]) -> Result<LayoutResult> {
        log::debug!("{} layout of {} boxes", self.name(), boxes.len());
        match *self {
            LayoutStrategy::Grid { padding, gap } => {
                GridLayouter::new(padding, gap).perform_layout(containers, boxes)
            }
            LayoutStrategy::LeewayGrid {
                padding,
                gap,
                leeway,
            } => GridLayouter::new(padding, gap)
                .with_leeway(leeway)
                .perform_layout(containers, boxes),
            LayoutStrategy::Packer {
                padding,
                gap,
                leeway,
            } => PackingLayouter::new(padding, gap)
                .with_leeway(leeway)
                .perform_layout(containers, boxes),
            LayoutStrategy::Booklet { padding, gap } => {
                BookletLayouter::new(GridLayouter::new(padding, gap))
                    .perform_layout(containers, boxes)
            }
            LayoutStrategy::Signature {
                signature_pages,
                mirror_back,
                rotate_back_180,
                padding,
                gap,
            } => SignatureLayouter::new(signature_pages, GridLayouter::new(padding, gap))?
                .with_mirror_back(mirror_back)
                .with_rotate_back_180(rotate_back_180)
                .perform_layout(containers, boxes),
            LayoutStrategy::QuarterFold { padding, gap } => {
                QuarterFoldLayouter::new(GridLayouter::new(padding, gap))
                    .perform_layout(containers, boxes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Container, ContainerSpec};

    #[test]
    fn test_validate_rejects_negative_gap() {
        let strategy = LayoutStrategy::Grid {
            padding: 0.0,
            gap: -1.0,
        };
        assert!(matches!(strategy.validate(), Err(ImposeError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_signature_size() {
        let strategy = LayoutStrategy::Signature {
            signature_pages: Some(10),
            mirror_back: false,
            rotate_back_180: false,
            padding: 0.0,
            gap: 0.0,
        };
        assert!(matches!(
            strategy.validate(),
            Err(ImposeError::InvalidPageCount { count: 10, .. })
        ));
    }

    #[test]
    fn test_dispatch_matches_concrete_layouter() {
        let boxes: Vec<PageBox> = (0..5).map(|_| PageBox::new(50.0, 50.0).unwrap()).collect();
        let containers: Containers =
            ContainerSpec::new(Container::new(120.0, 120.0).unwrap(), 4).into();

        let strategy = LayoutStrategy::Grid {
            padding: 5.0,
            gap: 2.0,
        };
        let expected = GridLayouter::new(5.0, 2.0)
            .perform_layout(&containers, &boxes)
            .unwrap();
        assert_eq!(strategy.perform_layout(&containers, &boxes).unwrap(), expected);
    }

    #[test]
    fn test_sides_per_sheet() {
        assert_eq!(LayoutStrategy::default().sides_per_sheet(), 2);
        let packer = LayoutStrategy::Packer {
            padding: 0.0,
            gap: 0.0,
            leeway: 0.5,
        };
        assert_eq!(packer.sides_per_sheet(), 1);
        assert_eq!(packer.pages_per_sheet(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_uses_kind_tag_and_defaults() {
        let strategy: LayoutStrategy =
            serde_json::from_str(r#"{"kind": "packer", "gap": 2.0}"#).unwrap();
        assert_eq!(
            strategy,
            LayoutStrategy::Packer {
                padding: 0.0,
                gap: 2.0,
                leeway: crate::constants::DEFAULT_LEEWAY_PT,
            }
        );

        let json = serde_json::to_string(&LayoutStrategy::QuarterFold {
            padding: 1.0,
            gap: 0.0,
        })
        .unwrap();
        assert!(json.contains(r#""kind":"quarter_fold""#));
    }
}
