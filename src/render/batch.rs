//! Batch strategy: one collection per surface

use std::collections::BTreeMap;

use crate::data::{Split, SurfaceId};
use crate::errors::BarError;
use crate::log::debug;
use crate::surface::{AutoscaleBound, SurfaceSet};

use super::geometry::make_bars;
use super::heuristic::EdgeWidthHeuristic;
use super::shapes::ShapeCollection;
use super::{RenderPass, RenderSummary, Renderer, surface_mut, unknown_surface};

/// Gathers every split's bars into one collection per surface, hands the
/// collections off once all splits are read, then picks an automatic edge
/// width when the mark asks for one.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchRenderer;

impl Renderer for BatchRenderer {
    fn render(
        &self,
        pass: &RenderPass<'_>,
        splits: &mut dyn Iterator<Item = Split>,
        surfaces: &mut dyn SurfaceSet,
    ) -> Result<RenderSummary, BarError> {
        let sticky = AutoscaleBound::from_zero(pass.orient.value_axis());
        let mut summary = RenderSummary::default();

        // Surfaces are untouched until every split has been laid out
        let mut pending: BTreeMap<SurfaceId, ShapeCollection> = BTreeMap::new();
        for split in splits {
            if surfaces.surface(split.surface).is_none() {
                return Err(unknown_surface(split.surface));
            }
            let geometry = make_bars(&split.data, pass)?;
            debug!(
                key = ?split.key,
                surface = split.surface.0,
                rows = split.data.len(),
                shapes = geometry.bars.len(),
                "batch split"
            );
            summary.skipped += geometry.skipped;
            pending.entry(split.surface).or_default().extend(geometry.bars);
        }

        let mut handed_off = Vec::with_capacity(pending.len());
        for (id, mut collection) in pending {
            let surface = surface_mut(surfaces, id)?;
            collection.sticky_edges = Some(sticky);
            let vertices = collection.vertices();
            summary.shapes += collection.len();
            debug!(surface = id.0, members = collection.len(), "handing off collection");

            let collection_id = surface.add_collection(collection);
            surface.register_sticky_bound(sticky);
            // Surfaces do not autoscale on collections; feed them the extent
            if !vertices.is_empty() {
                surface.merge_data_bounds(&vertices);
            }
            handed_off.push((id, collection_id));
        }

        if pass.wants_auto_edge_width() {
            summary.edge_width = EdgeWidthHeuristic::new(pass.orient, pass.config).apply(surfaces, &handed_off)?;
        }

        Ok(summary)
    }
}
