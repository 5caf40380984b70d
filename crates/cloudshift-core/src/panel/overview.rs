//! 3D overview of both clouds

use tracing::debug;

use super::{PanelContext, PanelRenderer, AFTER_LABEL, BEFORE_LABEL};
use crate::cloud::Axis;
use crate::error::{CompareError, CompareResult};
use crate::geometry::BoundingBox;
use crate::layout::OVERVIEW;
use crate::surface::{
    AxesSpec, AxisSpec, MarkerSeries, PlotCanvas, SegmentSeries, Vertices, ViewAngle,
};

pub const TITLE: &str = "3D Point Cloud Movement";

/// Before/after scatter in 3D with one segment per moved point
///
/// Limits form a cube around both clouds so distances along every axis
/// read the same.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverviewPanel;

impl PanelRenderer for OverviewPanel {
    fn region(&self) -> &'static str {
        OVERVIEW
    }

    fn render(&self, ctx: &PanelContext<'_>, canvas: &mut dyn PlotCanvas) -> CompareResult<()> {
        let cube = BoundingBox::enclosing(ctx.before, ctx.after)
            .ok_or(CompareError::EmptyInput)?
            .cube();
        let view = ViewAngle {
            elevation_deg: ctx.config.overview.elevation_deg,
            azimuth_deg: ctx.config.overview.azimuth_deg,
        };

        let axes = AxesSpec::spatial(
            TITLE,
            AxisSpec::new("X", cube.range(Axis::X)),
            AxisSpec::new("Y", cube.range(Axis::Y)),
            AxisSpec::new("Z", cube.range(Axis::Z)),
        )
        .with_equal_aspect()
        .with_view(view)
        .with_legend();
        canvas.configure_axes(OVERVIEW, &axes)?;

        let style = &ctx.config.style;
        let before = Vertices::Spatial(ctx.before.iter().collect());
        let after = Vertices::Spatial(ctx.after.iter().collect());

        canvas.draw_segments(
            OVERVIEW,
            &SegmentSeries::new(
                before.clone(),
                after.clone(),
                ctx.palette.segment,
                style.segment_width,
            ),
        )?;
        canvas.draw_markers(
            OVERVIEW,
            &MarkerSeries::new(before, ctx.before_fill(), style.marker_size).with_label(BEFORE_LABEL),
        )?;
        canvas.draw_markers(
            OVERVIEW,
            &MarkerSeries::new(after, ctx.after_fill(), style.marker_size).with_label(AFTER_LABEL),
        )?;
        canvas.attach_colorbar(OVERVIEW, &ctx.colorbar())?;

        debug!(side = cube.max_dimension(), "Rendered overview");
        Ok(())
    }
}
