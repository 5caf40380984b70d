//! SVG output through plotters
//!
//! Drawing calls are recorded first and replayed once the figure is
//! finished, so every region's axes are known before anything is drawn.

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, info};

use super::recording::{PanelScene, RecordingSurface, Scene, SceneItem};
use crate::colormap::Color as Rgba;
use crate::error::{RenderError, RenderResult};
use crate::geometry::{equal_aspect_limits, padded_range};
use crate::layout::{FigureLayout, Projection};
use crate::surface::{
    AxesSpec, Colorbar, HistogramSeries, MarkerSeries, PlotCanvas, PlotSurface, SegmentSeries,
    TextAnnotation, Vertices,
};

const FONT: &str = "sans-serif";
const FIGURE_TITLE_SIZE: f64 = 28.0;
const TITLE_SIZE: f64 = 20.0;
const LABEL_SIZE: f64 = 14.0;
const MARGIN: u32 = 10;
const X_LABEL_AREA: u32 = 40;
const Y_LABEL_AREA: u32 = 60;
const COLORBAR_WIDTH: i32 = 100;
const COLORBAR_LABEL_AREA: u32 = 60;

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type DrawResult = Result<(), Box<dyn Error>>;

/// A rendered figure
#[derive(Clone, Debug, PartialEq)]
pub struct SvgDocument {
    /// SVG markup
    pub svg: String,
    /// File the markup was written to, if any
    pub path: Option<PathBuf>,
}

/// Surface rendering figures to SVG
#[derive(Debug, Default)]
pub struct SvgSurface {
    recorder: RecordingSurface,
    path: Option<PathBuf>,
}

impl SvgSurface {
    /// Keep the SVG in memory only
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Also write every finished figure to `path`
    pub fn to_file(path: impl AsRef<Path>) -> Self {
        Self {
            recorder: RecordingSurface::new(),
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Output file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl PlotCanvas for SvgSurface {
    fn begin_figure(&mut self, layout: &FigureLayout) -> RenderResult<()> {
        self.recorder.begin_figure(layout)
    }

    fn configure_axes(&mut self, region: &str, axes: &AxesSpec) -> RenderResult<()> {
        self.recorder.configure_axes(region, axes)
    }

    fn draw_markers(&mut self, region: &str, series: &MarkerSeries) -> RenderResult<()> {
        self.recorder.draw_markers(region, series)
    }

    fn draw_segments(&mut self, region: &str, series: &SegmentSeries) -> RenderResult<()> {
        self.recorder.draw_segments(region, series)
    }

    fn draw_histogram(&mut self, region: &str, series: &HistogramSeries) -> RenderResult<()> {
        self.recorder.draw_histogram(region, series)
    }

    fn draw_text(&mut self, region: &str, text: &TextAnnotation) -> RenderResult<()> {
        self.recorder.draw_text(region, text)
    }

    fn attach_colorbar(&mut self, region: &str, colorbar: &Colorbar) -> RenderResult<()> {
        self.recorder.attach_colorbar(region, colorbar)
    }
}

impl PlotSurface for SvgSurface {
    type Output = SvgDocument;

    fn finish(&mut self) -> RenderResult<SvgDocument> {
        let scene = self.recorder.finish()?;
        let svg = render_scene(&scene)?;

        if let Some(path) = &self.path {
            std::fs::write(path, &svg).map_err(|e| RenderError::Backend {
                message: format!("failed to write {}: {e}", path.display()),
            })?;
            info!(path = %path.display(), bytes = svg.len(), "Wrote figure");
        }

        Ok(SvgDocument {
            svg,
            path: self.path.clone(),
        })
    }
}

/// Render a recorded scene to SVG markup
pub fn render_scene(scene: &Scene) -> RenderResult<String> {
    let mut svg = String::new();
    draw_scene(scene, &mut svg).map_err(|e| RenderError::Backend {
        message: e.to_string(),
    })?;
    Ok(svg)
}

fn draw_scene(scene: &Scene, buf: &mut String) -> DrawResult {
    let layout = &scene.layout;
    let root = SVGBackend::with_string(buf, (layout.width, layout.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let figure = match &layout.title {
        Some(title) => root.titled(title, (FONT, FIGURE_TITLE_SIZE))?,
        None => root.clone(),
    };
    let (width, height) = figure.dim_in_pixel();

    for panel in &scene.panels {
        let (offset, size) = panel.region.rect.to_pixels(width, height);
        let area = figure.clone().shrink(offset, size);
        draw_panel(&area, panel)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel(area: &Area<'_>, panel: &PanelScene) -> DrawResult {
    let Some(axes) = &panel.axes else {
        debug!(region = %panel.name(), "Skipping region without axes");
        return Ok(());
    };

    let plot_area = match &panel.colorbar {
        Some(colorbar) => {
            let (width, _) = area.dim_in_pixel();
            let (main, bar) = area.split_horizontally((width as i32 - COLORBAR_WIDTH).max(0));
            draw_colorbar(&bar, colorbar)?;
            main
        }
        None => area.clone(),
    };

    match panel.region.projection {
        Projection::Planar => draw_planar(&plot_area, axes, &panel.items),
        Projection::Spatial => draw_spatial(&plot_area, axes, &panel.items),
    }
}

fn to_rgba(color: Rgba) -> RGBAColor {
    let [r, g, b] = color.to_rgb8();
    RGBAColor(r, g, b, color.a as f64)
}

fn has_labels(items: &[SceneItem]) -> bool {
    items
        .iter()
        .any(|item| matches!(item, SceneItem::Markers(series) if series.label.is_some()))
}

fn draw_planar(area: &Area<'_>, axes: &AxesSpec, items: &[SceneItem]) -> DrawResult {
    let area = area.titled(&axes.title, (FONT, TITLE_SIZE))?;

    let mut x = padded_range(axes.x.limits);
    let mut y = padded_range(axes.y.limits);
    if axes.equal_aspect {
        let (width, height) = area.dim_in_pixel();
        let plot_width = width as f64 - (2 * MARGIN + Y_LABEL_AREA) as f64;
        let plot_height = height as f64 - (2 * MARGIN + X_LABEL_AREA) as f64;
        (x, y) = equal_aspect_limits(x, y, plot_width, plot_height);
    }

    let mut chart = ChartBuilder::on(&area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x.0..x.1, y.0..y.1)?;

    chart
        .configure_mesh()
        .x_desc(axes.x.label.as_str())
        .y_desc(axes.y.label.as_str())
        .label_style((FONT, LABEL_SIZE))
        .axis_desc_style((FONT, LABEL_SIZE))
        .draw()?;

    for item in items {
        match item {
            SceneItem::Markers(series) => {
                let Vertices::Planar(points) = &series.vertices else {
                    continue;
                };
                let anno = chart.draw_series(points.iter().enumerate().map(|(i, p)| {
                    Circle::new(
                        (p[0], p[1]),
                        series.size,
                        to_rgba(series.fill.color_at(i)).filled(),
                    )
                }))?;
                if let Some(label) = &series.label {
                    let swatch = to_rgba(series.fill.legend_color());
                    anno.label(label.as_str())
                        .legend(move |(x, y)| Circle::new((x, y), 4, swatch.filled()));
                }
            }
            SceneItem::Segments(series) => {
                let (Vertices::Planar(from), Vertices::Planar(to)) = (&series.from, &series.to)
                else {
                    continue;
                };
                chart.draw_series(from.iter().zip(to).map(|(a, b)| {
                    PathElement::new(
                        vec![(a[0], a[1]), (b[0], b[1])],
                        to_rgba(series.color).stroke_width(series.width),
                    )
                }))?;
            }
            SceneItem::Histogram(series) => {
                chart.draw_series(series.histogram.bins().map(|(lo, hi, count)| {
                    Rectangle::new([(lo, 0.0), (hi, count as f64)], to_rgba(series.fill).filled())
                }))?;
                chart.draw_series(series.histogram.bins().map(|(lo, hi, count)| {
                    Rectangle::new(
                        [(lo, 0.0), (hi, count as f64)],
                        to_rgba(series.edge).stroke_width(1),
                    )
                }))?;
            }
            SceneItem::Text(text) => {
                let style = (FONT, text.font_size as f64).into_font().color(&BLACK);
                let line_height = (text.font_size as f64 * 1.3).round() as i32;
                for (i, line) in text.lines.iter().enumerate() {
                    chart.draw_series(std::iter::once(
                        EmptyElement::at((text.position[0], text.position[1]))
                            + Text::new(line.clone(), (0, i as i32 * line_height), style.clone()),
                    ))?;
                }
            }
        }
    }

    if axes.legend && has_labels(items) {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

fn draw_spatial(area: &Area<'_>, axes: &AxesSpec, items: &[SceneItem]) -> DrawResult {
    let z_axis = axes.z.as_ref().ok_or("spatial region without a z axis")?;
    let area = area.titled(&axes.title, (FONT, TITLE_SIZE))?;

    let x = padded_range(axes.x.limits);
    let y = padded_range(axes.y.limits);
    let z = padded_range(z_axis.limits);
    let view = axes.view.unwrap_or_default();

    // plotters treats the second axis as vertical, so z goes in the middle
    let mut chart = ChartBuilder::on(&area)
        .margin(MARGIN)
        .build_cartesian_3d(x.0..x.1, z.0..z.1, y.0..y.1)?;

    chart.with_projection(|mut pb| {
        pb.yaw = view.azimuth_deg.to_radians();
        pb.pitch = view.elevation_deg.to_radians();
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    let label_style = (FONT, LABEL_SIZE).into_font().color(&BLACK);
    chart.draw_series([
        Text::new(axes.x.label.clone(), (x.1, z.0, y.0), label_style.clone()),
        Text::new(axes.y.label.clone(), (x.0, z.0, y.1), label_style.clone()),
        Text::new(z_axis.label.clone(), (x.0, z.1, y.0), label_style),
    ])?;

    for item in items {
        match item {
            SceneItem::Markers(series) => {
                let Vertices::Spatial(points) = &series.vertices else {
                    continue;
                };
                let anno = chart.draw_series(points.iter().enumerate().map(|(i, p)| {
                    Circle::new(
                        (p[0], p[2], p[1]),
                        series.size,
                        to_rgba(series.fill.color_at(i)).filled(),
                    )
                }))?;
                if let Some(label) = &series.label {
                    let swatch = to_rgba(series.fill.legend_color());
                    anno.label(label.as_str())
                        .legend(move |(x, y)| Circle::new((x, y), 4, swatch.filled()));
                }
            }
            SceneItem::Segments(series) => {
                let (Vertices::Spatial(from), Vertices::Spatial(to)) = (&series.from, &series.to)
                else {
                    continue;
                };
                chart.draw_series(from.iter().zip(to).map(|(a, b)| {
                    PathElement::new(
                        vec![(a[0], a[2], a[1]), (b[0], b[2], b[1])],
                        to_rgba(series.color).stroke_width(series.width),
                    )
                }))?;
            }
            SceneItem::Histogram(_) | SceneItem::Text(_) => {}
        }
    }

    if axes.legend && has_labels(items) {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

/// Displayed value range of a colorbar
///
/// A zero-width domain only ever comes from "nothing moved", so it is
/// widened upward and never shows negative magnitudes.
fn colorbar_limits((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo, lo + 1.0)
    }
}

fn draw_colorbar(area: &Area<'_>, colorbar: &Colorbar) -> DrawResult {
    let (lo, hi) = colorbar_limits(colorbar.range);

    let mut chart = ChartBuilder::on(area)
        .margin_top(40)
        .margin_bottom(X_LABEL_AREA + MARGIN)
        .margin_right(MARGIN)
        .y_label_area_size(COLORBAR_LABEL_AREA)
        .build_cartesian_2d(0.0..1.0, lo..hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_desc(colorbar.label.as_str())
        .y_label_formatter(&|v: &f64| format!("{v:.2}"))
        .label_style((FONT, LABEL_SIZE))
        .axis_desc_style((FONT, LABEL_SIZE))
        .draw()?;

    // a zero-width range fills the whole bar with its single color
    let step = (hi - lo) / colorbar.samples.len().max(1) as f64;
    chart.draw_series(colorbar.samples.iter().enumerate().map(|(i, color)| {
        let y0 = lo + i as f64 * step;
        Rectangle::new([(0.0, y0), (1.0, y0 + step)], to_rgba(*color).filled())
    }))?;

    Ok(())
}
