//! Colormaps and displacement color scales
//!
//! Built-in gradients are stored as packed `0xRRGGBB` stops and expanded
//! into a [`Colormap`] on demand. `jet` is the default; `viridis`, `plasma`,
//! `inferno`, `magma` and `coolwarm` can be picked by name in the config.
//!
//! A [`ColorScale`] binds a colormap to `[0, max(delta)]` of one comparison,
//! so separate comparisons are scaled independently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::delta::DeltaMagnitude;
use crate::error::ConfigError;

/// Linear RGBA color, channels in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from a packed `0xRRGGBB` value
    pub fn from_packed(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as f32 / 255.0,
            g: ((rgb >> 8) & 0xFF) as f32 / 255.0,
            b: (rgb & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor {
                value: hex.to_string(),
            });
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_packed)
            .map_err(|_| ConfigError::InvalidColor {
                value: hex.to_string(),
            })
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Blend towards `other`; `t` is clamped to `[0, 1]`
    pub fn mix(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let channel = |from: f32, to: f32| from + (to - from) * t;
        Color {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: channel(self.a, other.a),
        }
    }

    /// 8-bit RGB channels
    pub fn to_rgb8(&self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_packed(0x808080)
    }
}

/// Piecewise linear gradient over `[0, 1]`
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    name: String,
    /// Stops sorted by position
    stops: Vec<(f32, Color)>,
}

impl Colormap {
    /// Gradient from explicit `(position, color)` stops
    pub fn from_stops(name: impl Into<String>, mut stops: Vec<(f32, Color)>) -> Self {
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self {
            name: name.into(),
            stops,
        }
    }

    /// Gradient with the colors spread evenly over `[0, 1]`
    pub fn evenly_spaced(name: impl Into<String>, colors: impl IntoIterator<Item = Color>) -> Self {
        let colors: Vec<Color> = colors.into_iter().collect();
        let last = colors.len().saturating_sub(1).max(1) as f32;
        let stops = colors
            .into_iter()
            .enumerate()
            .map(|(i, c)| (i as f32 / last, c))
            .collect();
        Self::from_stops(name, stops)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color at position `t`, clamped to the gradient's ends
    pub fn sample(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        // first stop at or past t
        let upper = self.stops.partition_point(|(pos, _)| *pos < t);
        match (upper.checked_sub(1), self.stops.get(upper)) {
            (Some(lo), Some(&(hi_pos, hi))) => {
                let (lo_pos, lo) = self.stops[lo];
                let span = hi_pos - lo_pos;
                if span <= 0.0 {
                    hi
                } else {
                    lo.mix(hi, (t - lo_pos) / span)
                }
            }
            (None, Some(&(_, first))) => first,
            (Some(_), None) => self.stops.last().map(|s| s.1).unwrap_or_default(),
            (None, None) => Color::default(),
        }
    }

    /// Color at the low end of the gradient
    pub fn min_color(&self) -> Color {
        self.sample(0.0)
    }

    /// `steps` evenly spaced samples, low to high
    pub fn ramp(&self, steps: usize) -> Vec<Color> {
        let last = steps.saturating_sub(1).max(1) as f32;
        (0..steps).map(|i| self.sample(i as f32 / last)).collect()
    }
}

/// Named gradients shipped with the crate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColormapKind {
    Jet,
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Coolwarm,
}

// Matplotlib's jet uses uneven breakpoints; the rest are evenly spaced.
const JET: &[(f32, u32)] = &[
    (0.00, 0x000080),
    (0.11, 0x0000FF),
    (0.34, 0x00DBFF),
    (0.50, 0x7BFF7B),
    (0.65, 0xF7FF00),
    (0.89, 0xFF1300),
    (1.00, 0x800000),
];

const VIRIDIS: &[u32] = &[
    0x440154, 0x482878, 0x3E4A89, 0x31688E, 0x26828E, 0x1F9E89, 0x35B779, 0x6DCD59, 0xB4DE2C,
    0xFDE725,
];

const PLASMA: &[u32] = &[
    0x0D0887, 0x46039F, 0x7201A8, 0x9C179E, 0xBD3786, 0xD8576B, 0xED7953, 0xFB9F3A, 0xFDCA26,
    0xF0F921,
];

const INFERNO: &[u32] = &[
    0x000004, 0x1B0C41, 0x4A0C6B, 0x781C6D, 0xA52C60, 0xCF4446, 0xED6925, 0xFB9B06, 0xF7D13D,
    0xFCFFA4,
];

const MAGMA: &[u32] = &[
    0x000004, 0x180F3D, 0x440F76, 0x721F81, 0x9E2F7F, 0xCD4071, 0xF1605D, 0xFD9668, 0xFECA8D,
    0xFCFDBF,
];

const COOLWARM: &[u32] = &[0x3B4CC0, 0x8DB0FE, 0xDDDDDD, 0xF49A7B, 0xB40426];

impl ColormapKind {
    pub const ALL: [ColormapKind; 6] = [
        ColormapKind::Jet,
        ColormapKind::Viridis,
        ColormapKind::Plasma,
        ColormapKind::Inferno,
        ColormapKind::Magma,
        ColormapKind::Coolwarm,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColormapKind::Jet => "jet",
            ColormapKind::Viridis => "viridis",
            ColormapKind::Plasma => "plasma",
            ColormapKind::Inferno => "inferno",
            ColormapKind::Magma => "magma",
            ColormapKind::Coolwarm => "coolwarm",
        }
    }

    /// Expand the packed table into a gradient
    pub fn colormap(self) -> Colormap {
        let even = |table: &[u32]| {
            Colormap::evenly_spaced(self.name(), table.iter().map(|&c| Color::from_packed(c)))
        };
        match self {
            ColormapKind::Jet => Colormap::from_stops(
                self.name(),
                JET.iter()
                    .map(|&(pos, c)| (pos, Color::from_packed(c)))
                    .collect(),
            ),
            ColormapKind::Viridis => even(VIRIDIS),
            ColormapKind::Plasma => even(PLASMA),
            ColormapKind::Inferno => even(INFERNO),
            ColormapKind::Magma => even(MAGMA),
            ColormapKind::Coolwarm => even(COOLWARM),
        }
    }
}

impl fmt::Display for ColormapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColormapKind {
    type Err = ConfigError;

    /// Case-insensitive lookup by name
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownColormap {
                name: name.to_string(),
            })
    }
}

/// Colormap bound to the displacement range `[0, max]` of one comparison
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    colormap: Colormap,
    max: f64,
}

impl ColorScale {
    /// Bind a colormap to `[0, max(delta)]`
    pub fn for_delta(colormap: Colormap, delta: &DeltaMagnitude) -> Self {
        Self {
            colormap,
            max: delta.max(),
        }
    }

    /// Value domain `(0, max)`
    pub fn domain(&self) -> (f64, f64) {
        (0.0, self.max)
    }

    /// Zero-width domain, i.e. nothing moved
    pub fn is_degenerate(&self) -> bool {
        self.max <= 0.0
    }

    pub fn colormap(&self) -> &Colormap {
        &self.colormap
    }

    /// Position of `value` within the domain.
    ///
    /// A degenerate domain maps everything to 0, the gradient's minimum.
    pub fn normalize(&self, value: f64) -> f32 {
        if self.is_degenerate() {
            return 0.0;
        }
        (value / self.max).clamp(0.0, 1.0) as f32
    }

    pub fn color(&self, value: f64) -> Color {
        self.colormap.sample(self.normalize(value))
    }

    /// Colors for every magnitude, in point order
    pub fn colors(&self, delta: &DeltaMagnitude) -> Vec<Color> {
        delta.iter().map(|v| self.color(v)).collect()
    }

    /// Evenly spaced colors across the domain, low to high
    pub fn gradient(&self, steps: usize) -> Vec<Color> {
        if self.is_degenerate() {
            return vec![self.colormap.min_color(); steps];
        }
        self.colormap.ramp(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jet() -> Colormap {
        ColormapKind::Jet.colormap()
    }

    #[test]
    fn test_hex_parsing() {
        let color = Color::from_hex("#FF8000").unwrap();
        assert_eq!(color.to_rgb8(), [255, 128, 0]);
        assert_eq!(Color::from_hex("FF8000").unwrap(), color);
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("zzzzzz").is_err());
        assert!(Color::from_hex("#+12345").is_err());
    }

    #[test]
    fn test_mix_midpoint() {
        let black = Color::from_packed(0x000000);
        let white = Color::from_packed(0xFFFFFF);
        let mid = black.mix(white, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert_eq!(black.mix(white, 2.0), white);
    }

    #[test]
    fn test_sample_hits_stops_exactly() {
        let cmap = Colormap::from_stops(
            "two",
            vec![(1.0, Color::from_packed(0xFF0000)), (0.0, Color::from_packed(0x0000FF))],
        );
        assert_eq!(cmap.sample(0.0).to_rgb8(), [0, 0, 255]);
        assert_eq!(cmap.sample(1.0).to_rgb8(), [255, 0, 0]);
        assert_eq!(cmap.sample(-3.0), cmap.sample(0.0));
    }

    #[test]
    fn test_jet_runs_blue_to_red() {
        let low = jet().sample(0.0);
        let high = jet().sample(1.0);
        assert!(low.b > low.r);
        assert!(high.r > high.b);
    }

    #[test]
    fn test_ramp_length() {
        let cmap = ColormapKind::Viridis.colormap();
        let ramp = cmap.ramp(256);
        assert_eq!(ramp.len(), 256);
        assert_eq!(ramp[0], cmap.min_color());
        assert_eq!(ramp[255], cmap.sample(1.0));
    }

    #[test]
    fn test_kind_lookup() {
        for kind in ColormapKind::ALL {
            assert_eq!(kind.name().parse::<ColormapKind>().unwrap(), kind);
            assert_eq!(kind.colormap().name(), kind.to_string());
        }
        assert_eq!("JET".parse::<ColormapKind>().unwrap(), ColormapKind::Jet);
        assert!(matches!(
            "rainbow".parse::<ColormapKind>(),
            Err(ConfigError::UnknownColormap { .. })
        ));
    }

    #[test]
    fn test_scale_binds_to_delta_max() {
        let delta = DeltaMagnitude::from(vec![0.0, 2.0, 4.0]);
        let scale = ColorScale::for_delta(jet(), &delta);

        assert_eq!(scale.domain(), (0.0, 4.0));
        assert_eq!(scale.normalize(2.0), 0.5);
        assert_eq!(scale.color(4.0), jet().sample(1.0));
    }

    #[test]
    fn test_scales_are_independent_per_delta() {
        let small = ColorScale::for_delta(jet(), &DeltaMagnitude::from(vec![1.0]));
        let large = ColorScale::for_delta(jet(), &DeltaMagnitude::from(vec![10.0]));
        assert_eq!(small.color(1.0), large.color(10.0));
    }

    #[test]
    fn test_degenerate_scale_uses_min_color() {
        let delta = DeltaMagnitude::from(vec![0.0, 0.0]);
        let scale = ColorScale::for_delta(jet(), &delta);

        assert!(scale.is_degenerate());
        assert_eq!(scale.domain(), (0.0, 0.0));
        assert!(scale.colors(&delta).iter().all(|c| *c == jet().min_color()));
        assert!(scale.gradient(8).iter().all(|c| *c == jet().min_color()));
    }
}
