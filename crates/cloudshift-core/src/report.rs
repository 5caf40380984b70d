//! Comparison orchestration and the console report
//!
//! [`ComparisonReport::run`] validates the clouds, computes displacements
//! and statistics, renders every panel into one figure and prints a fixed
//! format statistics block.

use std::io::{self, Write};

use cloudshift_stats::SummaryStatistics;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cloud::{check_shapes, PointCloud};
use crate::colormap::ColorScale;
use crate::config::{CompareConfig, Palette};
use crate::delta::{displacements, DeltaMagnitude, Displacements};
use crate::error::{CompareError, CompareResult};
use crate::layout::FigureLayout;
use crate::panel::{default_panels, PanelContext, PanelRenderer};
use crate::surface::PlotSurface;

const REPORT_HEADER: &str = "=== Point Cloud Movement Analysis ===";
const REPORT_FOOTER: &str = "====================================";
/// Decimal places of every statistic in the console report
pub const REPORT_DECIMALS: usize = 4;

/// Displacements and their statistics, without rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub displacements: Displacements,
    pub stats: SummaryStatistics,
}

/// Validate the clouds and compute displacement statistics
pub fn analyze(before: &PointCloud, after: &PointCloud) -> CompareResult<Analysis> {
    check_shapes(before, after)?;
    if before.is_empty() {
        return Err(CompareError::EmptyInput);
    }

    let displacements = displacements(before, after)?;
    let stats = displacements.magnitudes.summarize()?;

    if stats.count == 1 {
        warn!("Single point comparison, standard deviation reported as 0");
    }
    if stats.max == 0.0 {
        warn!(points = stats.count, "No point moved, color scale is degenerate");
    }

    Ok(Analysis {
        displacements,
        stats,
    })
}

/// Result of a completed comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedFigure<T> {
    pub delta: DeltaMagnitude,
    pub stats: SummaryStatistics,
    /// The text block that was printed
    pub report: String,
    /// Whatever the plot surface produced
    pub output: T,
}

/// Format the console statistics block
pub fn format_report(count: usize, stats: &SummaryStatistics) -> String {
    let rows = [
        ("Mean delta", stats.mean),
        ("Median delta", stats.median),
        ("Std deviation", stats.std_dev),
        ("Max delta", stats.max),
        ("Min delta", stats.min),
    ];

    let mut report = format!("{REPORT_HEADER}\nTotal points: {count}\n");
    for (name, value) in rows {
        report.push_str(&format!("{name}: {:.*}\n", REPORT_DECIMALS, value));
    }
    report.push_str(REPORT_FOOTER);
    report.push('\n');
    report
}

/// Runs comparisons with one configuration
pub struct ComparisonReport {
    config: CompareConfig,
    palette: Palette,
    panels: Vec<Box<dyn PanelRenderer>>,
}

impl ComparisonReport {
    /// Create a report runner, validating the configuration
    pub fn new(config: CompareConfig) -> CompareResult<Self> {
        config.validate()?;
        let palette = config.palette()?;
        Ok(Self {
            config,
            palette,
            panels: default_panels(),
        })
    }

    /// Runner with the default configuration
    pub fn with_defaults() -> CompareResult<Self> {
        Self::new(CompareConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Figure layout used for every run
    pub fn layout(&self) -> FigureLayout {
        let figure = &self.config.figure;
        let layout = FigureLayout::comparison(figure.width, figure.height);
        match &figure.title {
            Some(title) => layout.with_title(title.clone()),
            None => layout,
        }
    }

    /// Compare the clouds, render the figure and print the report to stdout
    pub fn run<S: PlotSurface>(
        &self,
        before: &PointCloud,
        after: &PointCloud,
        surface: &mut S,
    ) -> CompareResult<RenderedFigure<S::Output>> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_writer(before, after, surface, &mut out)
    }

    /// Like [`run`](Self::run), writing the report to `out`
    pub fn run_with_writer<S, W>(
        &self,
        before: &PointCloud,
        after: &PointCloud,
        surface: &mut S,
        out: &mut W,
    ) -> CompareResult<RenderedFigure<S::Output>>
    where
        S: PlotSurface,
        W: Write,
    {
        let analysis = analyze(before, after)?;
        let delta = analysis.displacements.magnitudes;
        let stats = analysis.stats;
        let scale = ColorScale::for_delta(self.palette.colormap.clone(), &delta);
        debug!(
            points = delta.len(),
            domain_max = scale.domain().1,
            colormap = scale.colormap().name(),
            "Rendering comparison"
        );

        surface.begin_figure(&self.layout())?;
        let ctx = PanelContext {
            before,
            after,
            delta: &delta,
            stats: &stats,
            scale: &scale,
            config: &self.config,
            palette: &self.palette,
        };
        for panel in &self.panels {
            debug!(region = panel.region(), "Rendering panel");
            panel.render(&ctx, &mut *surface)?;
        }
        let output = surface.finish()?;

        let report = format_report(delta.len(), &stats);
        out.write_all(report.as_bytes())?;
        out.flush()?;

        info!(
            points = stats.count,
            mean = stats.mean,
            max = stats.max,
            "Comparison complete"
        );

        Ok(RenderedFigure {
            delta,
            stats,
            report,
            output,
        })
    }
}

impl std::fmt::Debug for ComparisonReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let regions: Vec<_> = self.panels.iter().map(|p| p.region()).collect();
        f.debug_struct("ComparisonReport")
            .field("config", &self.config)
            .field("panels", &regions)
            .finish()
    }
}
