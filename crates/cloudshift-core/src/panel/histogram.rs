//! Frequency distribution of the displacement magnitudes

use cloudshift_stats::{Histogram, SummaryStatistics};
use tracing::debug;

use super::{PanelContext, PanelRenderer};
use crate::error::CompareResult;
use crate::layout::HISTOGRAM;
use crate::surface::{AxesSpec, AxisSpec, HistogramSeries, PlotCanvas, TextAnnotation};

pub const TITLE: &str = "Delta Distribution";

const FONT_SIZE: u32 = 12;
const HEADROOM: f64 = 1.1;

/// Histogram of magnitudes with a statistics overlay
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramPanel;

/// Overlay lines, formatted to `decimals` places
pub fn overlay_lines(stats: &SummaryStatistics, decimals: usize) -> Vec<String> {
    vec![
        format!("Mean: {:.*}", decimals, stats.mean),
        format!("Std: {:.*}", decimals, stats.std_dev),
        format!("Max: {:.*}", decimals, stats.max),
        format!("Min: {:.*}", decimals, stats.min),
    ]
}

impl PanelRenderer for HistogramPanel {
    fn region(&self) -> &'static str {
        HISTOGRAM
    }

    fn render(&self, ctx: &PanelContext<'_>, canvas: &mut dyn PlotCanvas) -> CompareResult<()> {
        let settings = &ctx.config.histogram;
        let histogram = Histogram::with_bins(ctx.delta.values(), settings.bins)?;
        let (lo, hi) = histogram.range();
        let tallest = histogram.max_count() as f64;

        let axes = AxesSpec::planar(
            TITLE,
            AxisSpec::new("Delta Magnitude", (lo, hi)),
            AxisSpec::new("Frequency", (0.0, tallest * HEADROOM)),
        );
        canvas.configure_axes(HISTOGRAM, &axes)?;

        debug!(
            bins = histogram.bin_count(),
            tallest = histogram.max_count(),
            "Rendering histogram"
        );

        canvas.draw_histogram(
            HISTOGRAM,
            &HistogramSeries {
                histogram,
                fill: ctx.palette.histogram_fill,
                edge: ctx.palette.histogram_edge,
            },
        )?;

        canvas.draw_text(
            HISTOGRAM,
            &TextAnnotation {
                position: [
                    lo + (hi - lo) * settings.text_x_fraction,
                    tallest * settings.text_y_fraction,
                ],
                lines: overlay_lines(ctx.stats, settings.decimals),
                font_size: FONT_SIZE,
            },
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::fixtures::{started_surface, Fixture};
    use crate::surface::PlotSurface;

    #[test]
    fn test_overlay_lines() {
        let stats = SummaryStatistics::from_data(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            overlay_lines(&stats, 3),
            vec!["Mean: 2.000", "Std: 1.000", "Max: 3.000", "Min: 1.000"]
        );
    }

    #[test]
    fn test_histogram_panel() {
        let fixture = Fixture::new(
            &[[0.0; 3], [0.0; 3], [0.0; 3], [0.0; 3]],
            &[
                [1.0, 0.0, 0.0],
                [2.0, 0.0, 0.0],
                [3.0, 0.0, 0.0],
                [4.0, 0.0, 0.0],
            ],
        );
        let mut surface = started_surface();
        HistogramPanel.render(&fixture.ctx(), &mut surface).unwrap();

        let scene = surface.finish().unwrap();
        let panel = scene.panel(HISTOGRAM).unwrap();
        let axes = panel.axes.as_ref().unwrap();
        assert_eq!(axes.title, TITLE);
        assert_eq!(axes.x.label, "Delta Magnitude");
        assert_eq!(axes.y.label, "Frequency");

        let series = panel.histograms().next().unwrap();
        assert_eq!(series.histogram.bin_count(), 20);
        assert_eq!(series.histogram.total(), 4);

        let text = panel.texts().next().unwrap();
        let [x, y] = text.position;
        assert!(x >= axes.x.limits.0 && x <= axes.x.limits.1);
        assert!(y >= axes.y.limits.0 && y <= axes.y.limits.1);
        assert_eq!(text.lines[0], "Mean: 2.500");
    }

    #[test]
    fn test_no_movement_still_renders() {
        let fixture = Fixture::new(&[[1.0; 3], [2.0; 3]], &[[1.0; 3], [2.0; 3]]);
        let mut surface = started_surface();
        HistogramPanel.render(&fixture.ctx(), &mut surface).unwrap();

        let scene = surface.finish().unwrap();
        let panel = scene.panel(HISTOGRAM).unwrap();
        let (lo, hi) = panel.axes.as_ref().unwrap().x.limits;
        assert!(lo < hi);
        assert_eq!(panel.histograms().next().unwrap().histogram.total(), 2);
    }
}
