//! In-memory surface that records every drawing call
//!
//! The recorded [`Scene`] is plain data: tests inspect it directly and the
//! SVG backend replays it through plotters.

use serde::Serialize;
use tracing::trace;

use crate::error::{RenderError, RenderResult};
use crate::layout::{FigureLayout, Projection, RegionSpec};
use crate::surface::{
    check_projection, validate_colorbar, validate_markers, validate_segments, AxesSpec, Colorbar,
    HistogramSeries, MarkerSeries, PlotCanvas, PlotSurface, SegmentSeries, TextAnnotation,
};

/// One drawing call
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum SceneItem {
    Markers(MarkerSeries),
    Segments(SegmentSeries),
    Histogram(HistogramSeries),
    Text(TextAnnotation),
}

/// Everything drawn into one region
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PanelScene {
    pub region: RegionSpec,
    pub axes: Option<AxesSpec>,
    /// Drawing calls in the order they were made
    pub items: Vec<SceneItem>,
    pub colorbar: Option<Colorbar>,
}

impl PanelScene {
    fn new(region: RegionSpec) -> Self {
        Self {
            region,
            axes: None,
            items: Vec::new(),
            colorbar: None,
        }
    }

    /// Region name
    pub fn name(&self) -> &str {
        &self.region.name
    }

    /// Marker series in draw order
    pub fn markers(&self) -> impl Iterator<Item = &MarkerSeries> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Markers(series) => Some(series),
            _ => None,
        })
    }

    /// Segment series in draw order
    pub fn segments(&self) -> impl Iterator<Item = &SegmentSeries> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Segments(series) => Some(series),
            _ => None,
        })
    }

    /// Histogram series in draw order
    pub fn histograms(&self) -> impl Iterator<Item = &HistogramSeries> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Histogram(series) => Some(series),
            _ => None,
        })
    }

    /// Text annotations in draw order
    pub fn texts(&self) -> impl Iterator<Item = &TextAnnotation> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Text(text) => Some(text),
            _ => None,
        })
    }

    fn configured_axes(&self) -> RenderResult<&AxesSpec> {
        self.axes.as_ref().ok_or_else(|| RenderError::AxesNotConfigured {
            region: self.region.name.clone(),
        })
    }
}

/// A finished figure
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub layout: FigureLayout,
    /// One entry per layout region, in layout order
    pub panels: Vec<PanelScene>,
}

impl Scene {
    /// Look up a panel by region name
    pub fn panel(&self, name: &str) -> Option<&PanelScene> {
        self.panels.iter().find(|p| p.region.name == name)
    }

    /// Serialize the scene to JSON
    pub fn to_json(&self) -> RenderResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RenderError::Backend {
            message: e.to_string(),
        })
    }
}

/// Surface producing a [`Scene`]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    scene: Option<Scene>,
}

impl RecordingSurface {
    /// Create an idle surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene being recorded, if a figure has been started
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    fn panel_mut(&mut self, region: &str) -> RenderResult<&mut PanelScene> {
        let scene = self.scene.as_mut().ok_or(RenderError::FigureNotStarted)?;
        scene
            .panels
            .iter_mut()
            .find(|p| p.region.name == region)
            .ok_or_else(|| RenderError::UnknownRegion {
                region: region.to_string(),
            })
    }
}

impl PlotCanvas for RecordingSurface {
    fn begin_figure(&mut self, layout: &FigureLayout) -> RenderResult<()> {
        layout.validate()?;
        trace!(
            width = layout.width,
            height = layout.height,
            regions = layout.regions.len(),
            "Recording figure"
        );
        self.scene = Some(Scene {
            layout: layout.clone(),
            panels: layout.regions.iter().cloned().map(PanelScene::new).collect(),
        });
        Ok(())
    }

    fn configure_axes(&mut self, region: &str, axes: &AxesSpec) -> RenderResult<()> {
        let panel = self.panel_mut(region)?;
        check_projection(region, panel.region.projection, axes.projection())?;
        axes.validate()?;
        panel.axes = Some(axes.clone());
        Ok(())
    }

    fn draw_markers(&mut self, region: &str, series: &MarkerSeries) -> RenderResult<()> {
        let panel = self.panel_mut(region)?;
        panel.configured_axes()?;
        validate_markers(region, panel.region.projection, series)?;
        panel.items.push(SceneItem::Markers(series.clone()));
        Ok(())
    }

    fn draw_segments(&mut self, region: &str, series: &SegmentSeries) -> RenderResult<()> {
        let panel = self.panel_mut(region)?;
        panel.configured_axes()?;
        validate_segments(region, panel.region.projection, series)?;
        panel.items.push(SceneItem::Segments(series.clone()));
        Ok(())
    }

    fn draw_histogram(&mut self, region: &str, series: &HistogramSeries) -> RenderResult<()> {
        let panel = self.panel_mut(region)?;
        panel.configured_axes()?;
        check_projection(region, panel.region.projection, Projection::Planar)?;
        panel.items.push(SceneItem::Histogram(series.clone()));
        Ok(())
    }

    fn draw_text(&mut self, region: &str, text: &TextAnnotation) -> RenderResult<()> {
        let panel = self.panel_mut(region)?;
        panel.configured_axes()?;
        check_projection(region, panel.region.projection, Projection::Planar)?;
        panel.items.push(SceneItem::Text(text.clone()));
        Ok(())
    }

    fn attach_colorbar(&mut self, region: &str, colorbar: &Colorbar) -> RenderResult<()> {
        let panel = self.panel_mut(region)?;
        validate_colorbar(colorbar)?;
        panel.colorbar = Some(colorbar.clone());
        Ok(())
    }
}

impl PlotSurface for RecordingSurface {
    type Output = Scene;

    fn finish(&mut self) -> RenderResult<Scene> {
        self.scene.take().ok_or(RenderError::FigureNotStarted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::Color;
    use crate::layout::{RegionRect, HISTOGRAM, OVERVIEW, TOP_VIEW};
    use crate::surface::{AxisSpec, Fill, Vertices};

    fn unit_axes() -> AxesSpec {
        AxesSpec::planar(
            "Top",
            AxisSpec::new("X", (0.0, 1.0)),
            AxisSpec::new("Y", (0.0, 1.0)),
        )
    }

    fn dot() -> MarkerSeries {
        MarkerSeries::new(
            Vertices::Planar(vec![[0.5, 0.5]]),
            Fill::Uniform(Color::default()),
            3,
        )
    }

    #[test]
    fn test_draw_before_begin() {
        let mut surface = RecordingSurface::new();
        assert_eq!(
            surface.configure_axes(TOP_VIEW, &unit_axes()),
            Err(RenderError::FigureNotStarted)
        );
        assert_eq!(surface.finish(), Err(RenderError::FigureNotStarted));
    }

    #[test]
    fn test_begin_creates_panels() {
        let mut surface = RecordingSurface::new();
        surface
            .begin_figure(&FigureLayout::comparison(800, 600))
            .unwrap();
        let scene = surface.scene().unwrap();
        let names: Vec<_> = scene.panels.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec![OVERVIEW, HISTOGRAM, TOP_VIEW]);
    }

    #[test]
    fn test_unknown_region() {
        let mut surface = RecordingSurface::new();
        surface
            .begin_figure(&FigureLayout::comparison(800, 600))
            .unwrap();
        assert!(matches!(
            surface.configure_axes("side_view", &unit_axes()),
            Err(RenderError::UnknownRegion { .. })
        ));
    }

    #[test]
    fn test_axes_required_before_drawing() {
        let mut surface = RecordingSurface::new();
        surface
            .begin_figure(&FigureLayout::comparison(800, 600))
            .unwrap();
        assert!(matches!(
            surface.draw_markers(TOP_VIEW, &dot()),
            Err(RenderError::AxesNotConfigured { .. })
        ));
    }

    #[test]
    fn test_planar_axes_rejected_in_spatial_region() {
        let mut surface = RecordingSurface::new();
        surface
            .begin_figure(&FigureLayout::comparison(800, 600))
            .unwrap();
        assert!(matches!(
            surface.configure_axes(OVERVIEW, &unit_axes()),
            Err(RenderError::ProjectionMismatch { .. })
        ));
    }

    #[test]
    fn test_records_in_order() {
        let layout = FigureLayout::new(400, 400).with_region(
            "only",
            RegionRect::new(0.0, 0.0, 1.0, 1.0),
            Projection::Planar,
        );
        let mut surface = RecordingSurface::new();
        surface.begin_figure(&layout).unwrap();
        surface.configure_axes("only", &unit_axes()).unwrap();
        surface.draw_markers("only", &dot()).unwrap();
        surface
            .draw_text(
                "only",
                &TextAnnotation {
                    position: [0.1, 0.9],
                    lines: vec!["hello".to_string()],
                    font_size: 12,
                },
            )
            .unwrap();

        let scene = surface.finish().unwrap();
        let panel = scene.panel("only").unwrap();
        assert!(matches!(panel.items[0], SceneItem::Markers(_)));
        assert!(matches!(panel.items[1], SceneItem::Text(_)));
        assert_eq!(panel.markers().count(), 1);
        assert!(scene.to_json().unwrap().contains("hello"));

        // finishing consumes the figure
        assert_eq!(surface.finish(), Err(RenderError::FigureNotStarted));
    }
}
