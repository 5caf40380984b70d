//! Plot surfaces
//!
//! - [`RecordingSurface`]: keeps the drawing calls as a [`Scene`]
//! - `SvgSurface` (feature `svg`): renders the scene to SVG with plotters

pub mod recording;
#[cfg(feature = "svg")]
pub mod svg;

pub use recording::{PanelScene, RecordingSurface, Scene, SceneItem};
#[cfg(feature = "svg")]
pub use svg::{render_scene, SvgDocument, SvgSurface};
