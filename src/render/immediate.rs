//! Immediate strategy: one clipped shape per bar

use crate::data::Split;
use crate::errors::BarError;
use crate::log::debug;
use crate::surface::{AutoscaleBound, SurfaceSet};

use super::geometry::make_bars;
use super::shapes::{BarContainer, BarShape};
use super::{RenderPass, RenderSummary, Renderer, surface_mut};

/// Adds every bar as its own shape and records one results container per
/// split.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateRenderer;

impl Renderer for ImmediateRenderer {
    fn render(
        &self,
        pass: &RenderPass<'_>,
        splits: &mut dyn Iterator<Item = Split>,
        surfaces: &mut dyn SurfaceSet,
    ) -> Result<RenderSummary, BarError> {
        let sticky = AutoscaleBound::from_zero(pass.orient.value_axis());
        let mut summary = RenderSummary::default();

        for split in splits {
            let surface = surface_mut(surfaces, split.surface)?;
            let geometry = make_bars(&split.data, pass)?;
            debug!(
                key = ?split.key,
                surface = split.surface.0,
                rows = split.data.len(),
                shapes = geometry.bars.len(),
                "immediate split"
            );
            summary.skipped += geometry.skipped;

            let mut ids = Vec::with_capacity(geometry.bars.len());
            let mut values = Vec::with_capacity(geometry.bars.len());
            for bar in geometry.bars {
                values.push(bar.value);
                let mut shape = BarShape::from(bar);
                shape.apply_stroke_clip();
                shape.clip_to_plot_area = pass.mark.clip_on;
                shape.sticky_edges = Some(sticky);
                ids.push(surface.add_shape(shape));
            }
            if !ids.is_empty() {
                surface.register_sticky_bound(sticky);
            }
            summary.shapes += ids.len();

            // Empty splits still get a (possibly empty) container
            let container = BarContainer::new(ids, values, pass.orient);
            if surface.supports_container_metadata() {
                surface.add_container(container);
            } else {
                surface.add_container(container.without_metadata());
            }
        }

        Ok(summary)
    }
}
