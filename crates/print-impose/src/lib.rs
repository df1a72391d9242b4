pub mod constants;
pub mod impose;
pub mod layout;
mod options;
pub mod render;
mod stats;
pub mod transform;
mod types;

pub use impose::{
    Imposition, Split, impose, impose_document, impose_pages, split, split_document, split_pages,
};
pub use layout::{
    AppliedBox, Container, ContainerSpec, Containers, LayoutResult, LayoutStrategy, Layouter,
    PageBox, SplitLayouter, Tile, quarter_fold_order, saddle_order,
};
pub use options::*;
pub use render::{PageGeometrySource, PaperSizeLookup, SheetRenderer};
pub use stats::calculate_statistics;
pub use transform::{Transform, compile_transform};
pub use types::*;
