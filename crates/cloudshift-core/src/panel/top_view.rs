//! X-Y projection of both clouds

use super::{PanelContext, PanelRenderer, AFTER_LABEL, BEFORE_LABEL};
use crate::cloud::Axis;
use crate::error::{CompareError, CompareResult};
use crate::geometry::BoundingBox;
use crate::layout::TOP_VIEW;
use crate::surface::{AxesSpec, AxisSpec, MarkerSeries, PlotCanvas, SegmentSeries, Vertices};

pub const TITLE: &str = "Top View (X-Y Plane)";

/// The overview seen from above, with equal-aspect axes
#[derive(Debug, Clone, Copy, Default)]
pub struct TopViewPanel;

impl PanelRenderer for TopViewPanel {
    fn region(&self) -> &'static str {
        TOP_VIEW
    }

    fn render(&self, ctx: &PanelContext<'_>, canvas: &mut dyn PlotCanvas) -> CompareResult<()> {
        let bounds = BoundingBox::enclosing(ctx.before, ctx.after)
            .ok_or(CompareError::EmptyInput)?
            .padded(ctx.config.top_view.padding);

        let axes = AxesSpec::planar(
            TITLE,
            AxisSpec::new("X", bounds.range(Axis::X)),
            AxisSpec::new("Y", bounds.range(Axis::Y)),
        )
        .with_equal_aspect()
        .with_legend();
        canvas.configure_axes(TOP_VIEW, &axes)?;

        let style = &ctx.config.style;
        let before = Vertices::Planar(ctx.before.planar());
        let after = Vertices::Planar(ctx.after.planar());

        canvas.draw_segments(
            TOP_VIEW,
            &SegmentSeries::new(
                before.clone(),
                after.clone(),
                ctx.palette.segment,
                style.segment_width,
            ),
        )?;
        canvas.draw_markers(
            TOP_VIEW,
            &MarkerSeries::new(before, ctx.before_fill(), style.marker_size).with_label(BEFORE_LABEL),
        )?;
        canvas.draw_markers(
            TOP_VIEW,
            &MarkerSeries::new(after, ctx.after_fill(), style.marker_size).with_label(AFTER_LABEL),
        )?;
        canvas.attach_colorbar(TOP_VIEW, &ctx.colorbar())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::fixtures::{started_surface, Fixture};
    use crate::surface::PlotSurface;

    #[test]
    fn test_top_view_projects_xy() {
        let fixture = Fixture::new(
            &[[0.0, 0.0, 5.0], [10.0, 0.0, 0.0]],
            &[[0.0, 2.0, 5.0], [10.0, 0.0, 9.0]],
        );
        let mut surface = started_surface();
        TopViewPanel.render(&fixture.ctx(), &mut surface).unwrap();

        let scene = surface.finish().unwrap();
        let panel = scene.panel(TOP_VIEW).unwrap();
        let axes = panel.axes.as_ref().unwrap();
        assert!(axes.equal_aspect);
        assert!(axes.z.is_none());

        // padded by 5% of the largest extent (10)
        assert_eq!(axes.x.limits, (-0.5, 10.5));
        assert_eq!(axes.y.limits, (-0.5, 2.5));

        let before = panel.markers().next().unwrap();
        assert_eq!(
            before.vertices,
            Vertices::Planar(vec![[0.0, 0.0], [10.0, 0.0]])
        );
        assert_eq!(panel.colorbar.as_ref().unwrap().range, (0.0, 9.0));
    }

    #[test]
    fn test_single_point_without_movement() {
        let fixture = Fixture::new(&[[1.0, 1.0, 1.0]], &[[1.0, 1.0, 1.0]]);
        let mut surface = started_surface();
        TopViewPanel.render(&fixture.ctx(), &mut surface).unwrap();

        let scene = surface.finish().unwrap();
        let panel = scene.panel(TOP_VIEW).unwrap();
        assert_eq!(panel.axes.as_ref().unwrap().x.limits, (0.5, 1.5));
        assert_eq!(panel.colorbar.as_ref().unwrap().range, (0.0, 0.0));
    }
}
