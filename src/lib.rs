//! Bar marks: laid-out rows in, styled rectangles out.
//!
//! A render pass reads `(key, rows, surface)` splits from the grouping stage,
//! resolves each row's style, builds one rectangle per row with a non-zero
//! value, and hands the result to the target [`Surface`] either as
//! individual clipped shapes or as one collection per surface.
//!
//! ```no_run
//! use barmark::{BarMark, Canvas, Column, Orientation, RowTable, Scales, Split, StyleConfig, SurfaceId};
//!
//! let rows = RowTable::from_columns([
//!     ("x", Column::from(vec![0.0, 1.0, 2.0])),
//!     ("y", Column::from(vec![5.0, 0.0, 3.0])),
//!     ("width", Column::from(vec![0.8; 3])),
//!     ("baseline", Column::from(vec![0.0; 3])),
//! ])?;
//! let mut surfaces = vec![Canvas::new(640.0, 480.0, 100.0)];
//! let summary = barmark::plot_bars(
//!     &BarMark::bar(),
//!     [Split::new(rows, SurfaceId(0))],
//!     &Scales::new(),
//!     Orientation::Vertical,
//!     &mut surfaces,
//!     &StyleConfig::default(),
//! )?;
//! assert_eq!(summary.shapes, 2);
//! # Ok::<(), barmark::BarError>(())
//! ```

use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "style.pest"]
pub struct StyleParser;

pub mod canvas;
pub mod color;
pub mod config;
pub mod data;
pub mod errors;
pub mod linestyle;
pub mod log;
pub mod mark;
pub mod parse;
pub mod properties;
pub mod render;
pub mod scale;
pub mod surface;
pub mod types;

pub use canvas::Canvas;
pub use color::{ColorSpec, ColorTuple, Rgba};
pub use config::{RcParam, StyleConfig};
pub use data::{Column, Datum, GroupKey, RowTable, Split, SurfaceId};
pub use errors::{BarError, ContractViolationError, PropertyResolutionError, StyleParseError};
pub use linestyle::{DashPattern, LineStyle};
pub use mark::{BarMark, Mappable, Strategy};
pub use properties::{Attribute, PropertyResolver, ResolvedStyle, legend_swatch};
pub use render::shapes::{BarContainer, BarShape, ClipPath, ShapeCollection};
pub use render::{RenderPass, RenderStrategy, RenderSummary, Renderer};
pub use scale::{Mapped, Scale, ScaleFailure, ScaleRegistry, Scales};
pub use surface::{AutoscaleBound, CollectionId, ShapeId, Surface, SurfaceSet, Transform};
pub use types::{Axis, Orientation, Points};

/// Render `mark` for every split onto its surface.
///
/// The strategy (immediate or batch) comes from the mark. Splits are
/// consumed once, in order.
///
/// On an error the batch strategy leaves every surface untouched. The
/// immediate strategy draws split by split, so splits before the failing
/// one stay on their surfaces.
pub fn plot_bars(
    mark: &BarMark,
    splits: impl IntoIterator<Item = Split>,
    scales: &dyn ScaleRegistry,
    orient: Orientation,
    surfaces: &mut dyn SurfaceSet,
    config: &StyleConfig,
) -> Result<RenderSummary, BarError> {
    let pass = RenderPass::new(mark, scales, orient, config);
    let mut splits = splits.into_iter();
    let summary = RenderStrategy::for_mark(mark).render(&pass, &mut splits, surfaces)?;
    crate::log::debug!(?summary, %orient, "rendered bars");
    Ok(summary)
}
