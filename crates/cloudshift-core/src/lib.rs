//! cloudshift-core - Displacement analysis for paired point clouds
//!
//! Compares two point clouds whose points correspond by index, measures how
//! far every point moved, and renders a three panel figure describing the
//! movement together with a textual statistics report.
//!
//! # Key Components
//!
//! - **PointCloud**: three parallel coordinate columns
//! - **delta**: per-point displacement vectors and magnitudes
//! - **ColorScale**: maps magnitudes onto a colormap bound to `[0, max]`
//! - **PlotCanvas / PlotSurface**: the drawing capability panels render into
//! - **Panels**: 3D overview, delta histogram and X-Y top view
//! - **ComparisonReport**: validates, analyzes, renders and prints
//!
//! # Backends
//!
//! - [`backend::RecordingSurface`] records drawing calls into a [`backend::Scene`]
//! - `backend::SvgSurface` (feature `svg`) renders the scene with plotters

pub mod backend;
pub mod cloud;
pub mod colormap;
pub mod config;
pub mod delta;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod panel;
pub mod report;
pub mod surface;

pub use cloud::*;
pub use colormap::{Color, ColorScale, Colormap, ColormapKind};
pub use config::*;
pub use delta::*;
pub use error::{CompareError, CompareResult, ConfigError, RenderError, RenderResult};
pub use layout::*;
pub use panel::{PanelContext, PanelRenderer};
pub use report::*;
pub use surface::*;

pub use cloudshift_stats::{Histogram, SummaryStatistics};
