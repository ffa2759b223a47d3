//! Plot configuration shared across visualization modules
//!
//! This module defines the configuration used by the profile, heatmap and
//! surface plots, plus the colormaps used to render temperature.

use plotters::prelude::*;

/// Colormap for temperature-colored plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    /// Black → red → yellow → white
    #[default]
    Hot,

    /// Dark purple → blue → green → yellow (perceptually uniform)
    Viridis,
}

/// Viridis anchor colors, evenly spaced over [0, 1]
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

impl Colormap {
    /// Color of a normalized value `t` (clamped to [0, 1])
    pub fn color(self, t: f64) -> RGBColor {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

        match self {
            Colormap::Hot => {
                let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
                RGBColor(channel(3.0 * t), channel(3.0 * t - 1.0), channel(3.0 * t - 2.0))
            }
            Colormap::Viridis => {
                let scaled = t * (VIRIDIS.len() - 1) as f64;
                let lower = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
                let frac = scaled - lower as f64;
                let (r0, g0, b0) = VIRIDIS[lower];
                let (r1, g1, b1) = VIRIDIS[lower + 1];
                let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
                RGBColor(mix(r0, r1), mix(g0, g1), mix(b0, b1))
            }
        }
    }

    /// Color of `value` within `[min, max]`
    pub fn color_in_range(self, value: f64, min: f64, max: f64) -> RGBColor {
        let span = max - min;
        if span > 0.0 {
            self.color((value - min) / span)
        } else {
            self.color(0.5)
        }
    }
}

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `profile_colors`: Optional line colors, one per plotted time row
/// - `colormap`: Colormap for heatmap and surface plots
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
/// - `max_rows`, `max_columns`: Rendering limits (grid is downsampled above)
///
/// # Example
///
/// ```rust
/// use heat1d::output::visualization::{PlotConfig, NO_TITLE};
///
/// let mut config = PlotConfig::profiles(NO_TITLE);
/// config.width = 1920;
/// config.height = 1080;
/// assert_eq!(config.xlabel, "Position x (m)");
/// ```
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: "Position x (m)")
    pub xlabel: String,

    /// Y-axis label (default: "Temperature")
    pub ylabel: String,

    /// Optional colors for line plots (one per time row)
    ///
    /// If None, uses default palette: [RED, BLUE, GREEN, MAGENTA, CYAN, ...]
    pub profile_colors: Option<Vec<RGBColor>>,

    /// Colormap for heatmap and surface plots (default: hot)
    pub colormap: Colormap,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Maximum number of time rows rendered by heatmap and surface plots
    pub max_rows: usize,

    /// Maximum number of spatial points rendered by surface plots
    pub max_columns: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: "Position x (m)".to_string(),
            ylabel: "Temperature".to_string(),
            profile_colors: None,
            colormap: Colormap::Hot,
            background: WHITE,
            line_width: 2,
            show_grid: true,
            max_rows: 500,
            max_columns: 500,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// # Example
///
/// ```rust
/// use heat1d::output::visualization::{PlotConfig, NO_TITLE};
///
/// let config = PlotConfig::heatmap(NO_TITLE);
/// assert_eq!(config.title, "Temperature Distribution");
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Config for temperature profiles T(x) at a few times
    ///
    /// Default title: "Temperature Profiles"
    ///
    /// # Examples
    ///
    /// ```rust
    /// use heat1d::output::visualization::PlotConfig;
    ///
    /// let config = PlotConfig::profiles("sin(pi * x)");
    /// assert_eq!(config.title, "sin(pi * x)");
    /// ```
    pub fn profiles(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Temperature Profiles".to_string()),
            ..Self::default()
        }
    }

    /// Config for the space × time heatmap
    ///
    /// Y axis is time, hot colormap. Default title: "Temperature Distribution"
    pub fn heatmap(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Temperature Distribution".to_string()),
            ylabel: "Time t (s)".to_string(),
            colormap: Colormap::Hot,
            ..Self::default()
        }
    }

    /// Config for the 3D surface T(x, t)
    ///
    /// Viridis colormap, grid limited to 60 × 60 cells. Default title:
    /// "Temperature Surface"
    pub fn surface(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Temperature Surface".to_string()),
            colormap: Colormap::Viridis,
            max_rows: 60,
            max_columns: 60,
            ..Self::default()
        }
    }

    /// Config with custom line colors
    pub fn profile_colors(colors: Vec<RGBColor>) -> Self {
        Self {
            profile_colors: Some(colors),
            ..Self::profiles(NO_TITLE)
        }
    }

    /// Get color for plotted row i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_profile_color(&self, index: usize) -> RGBColor {
        if let Some(ref colors) = self.profile_colors {
            if index < colors.len() {
                return colors[index];
            }
        }

        let default_colors = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),   // Orange
            RGBColor(128, 0, 128),   // Purple
            RGBColor(255, 192, 203), // Pink
            RGBColor(165, 42, 42),   // Brown
        ];

        default_colors[index % default_colors.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
