//! Panel renderers
//!
//! Each panel reads the comparison data by reference and draws one region
//! of the shared figure through a [`PlotCanvas`]:
//!
//! - [`OverviewPanel`]: 3D scatter of both clouds with connecting segments
//! - [`HistogramPanel`]: frequency distribution of the magnitudes
//! - [`TopViewPanel`]: the overview projected onto the X-Y plane

mod histogram;
mod overview;
mod top_view;

pub use histogram::HistogramPanel;
pub use overview::OverviewPanel;
pub use top_view::TopViewPanel;

use cloudshift_stats::SummaryStatistics;

use crate::cloud::PointCloud;
use crate::colormap::ColorScale;
use crate::config::{CompareConfig, Palette};
use crate::delta::DeltaMagnitude;
use crate::error::CompareResult;
use crate::surface::{Colorbar, Fill, PlotCanvas};

/// Colorbar label shared by the panels that color by magnitude
pub const DELTA_LABEL: &str = "Delta magnitude";
/// Legend entry for the original positions
pub const BEFORE_LABEL: &str = "Before";
/// Legend entry for the moved positions
pub const AFTER_LABEL: &str = "After";

/// Everything a panel may read while rendering
#[derive(Debug, Clone, Copy)]
pub struct PanelContext<'a> {
    pub before: &'a PointCloud,
    pub after: &'a PointCloud,
    pub delta: &'a DeltaMagnitude,
    pub stats: &'a SummaryStatistics,
    pub scale: &'a ColorScale,
    pub config: &'a CompareConfig,
    pub palette: &'a Palette,
}

impl PanelContext<'_> {
    /// Uniform fill for the "before" markers
    pub fn before_fill(&self) -> Fill {
        Fill::Uniform(self.palette.before)
    }

    /// Per-point magnitude colors for the "after" markers
    pub fn after_fill(&self) -> Fill {
        let alpha = self.palette.after_alpha;
        Fill::PerPoint(
            self.delta
                .iter()
                .map(|v| self.scale.color(v).with_alpha(alpha))
                .collect(),
        )
    }

    /// Colorbar bound to the color scale domain
    pub fn colorbar(&self) -> Colorbar {
        Colorbar {
            label: DELTA_LABEL.to_string(),
            range: self.scale.domain(),
            samples: self.scale.gradient(self.config.style.colorbar_steps),
        }
    }
}

/// Renders one region of the comparison figure
pub trait PanelRenderer {
    /// Region this panel draws into
    fn region(&self) -> &'static str;

    /// Draw the panel
    fn render(&self, ctx: &PanelContext<'_>, canvas: &mut dyn PlotCanvas) -> CompareResult<()>;
}

/// Overview, histogram and top view, in draw order
pub fn default_panels() -> Vec<Box<dyn PanelRenderer>> {
    vec![
        Box::new(OverviewPanel),
        Box::new(HistogramPanel),
        Box::new(TopViewPanel),
    ]
}
