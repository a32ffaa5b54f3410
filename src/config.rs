/*
	colplot - Plot Column Data Against Time

	Copyright(c) 2025 Luo Jie

	Permission is hereby granted, free of charge, to any person obtaining a copy
	of this softwareand associated documentation files(the "Software"), to deal
	in the Software without restriction, including without limitation the rights
	to use, copy, modify, merge, publish, distribute, sublicense, and /or sell
	copies of the Software, and to permit persons to whom the Software is
	furnished to do so, subject to the following conditions :

	The above copyright noticeand this permission notice shall be included in all
	copies or substantial portions of the Software.

	THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
	IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
	FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.IN NO EVENT SHALL THE
	AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
	LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
	OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
	SOFTWARE.
 */

//! Plot style: image size, colors, stroke and legend font.
//!
//! The style is read from a JSON file. Every field is optional, missing
//! fields take their default value.

use std::cell::OnceCell;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::ShapeStyle;
use serde::{Deserialize, Serialize};

use crate::error::PlotError;

/// Style file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "plot_config.json";

/// Ten-color category cycle used when the style file names no line colors.
const CATEGORY_COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    plot_width: u32,
    plot_height: u32,

    #[serde(rename = "bg_color")]
    bg_color_str: String,
    #[serde(skip)]
    bg_color: OnceCell<RGBColor>,

    #[serde(rename = "grid_color")]
    grid_color_str: String,
    #[serde(skip)]
    grid_color: OnceCell<RGBColor>,

    #[serde(rename = "line_colors")]
    line_colors_str: Vec<String>,
    #[serde(skip)]
    line_colors: OnceCell<Vec<RGBColor>>,

    stroke_size: u32,

    legend_font: String,
    legend_size: f64,
    legend_position: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            plot_width: 640,
            plot_height: 480,
            bg_color_str: String::from("WHITE"),
            bg_color: OnceCell::new(),
            grid_color_str: String::from("#b0b0b0"),
            grid_color: OnceCell::new(),
            line_colors_str: CATEGORY_COLORS.iter().map(|c| c.to_string()).collect(),
            line_colors: OnceCell::new(),
            stroke_size: 2,
            legend_font: String::from("sans-serif"),
            legend_size: 14.0,
            legend_position: String::from("UpperRight"),
        }
    }
}

/// What the writer needs to know to draw a figure.
pub trait PlotStyle {
    fn plot_size(&self) -> (u32, u32);
    fn bg_color(&self) -> RGBColor;
    fn grid_color(&self) -> RGBColor;
    fn line_color(&self, n: usize) -> RGBColor;
    fn line_stroke_style(&self, n: usize) -> ShapeStyle;
    fn legend_style(&'_ self) -> TextStyle<'_>;
    fn legend_position(&self) -> SeriesLabelPosition;
}

macro_rules! str2color {
    ($e:expr; $($c:ident),+; $d:expr) => {
        match $e {
            $(stringify!($c) => $c,)+
            _ => $d,
        }
    };
}

macro_rules! str2position {
    ($e:expr; $($p:ident),+; $d:ident) => {
        match $e {
            $(stringify!($p) => SeriesLabelPosition::$p,)+
            _ => SeriesLabelPosition::$d,
        }
    };
}

macro_rules! fn_color {
    ($id:ident, $strid:ident) => {
        fn $id(&self) -> RGBColor {
            *self.$id.get_or_init(|| PlotConfig::str2color(&self.$strid))
        }
    };
}

impl PlotConfig {
    fn hex2color(color: &str) -> Option<RGBColor> {
        let hex = color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
    }

    fn digi2color(color: &str) -> RGBColor {
        let color: Vec<u8> = color.split(",").filter_map(|s| s.trim().parse::<u8>().ok()).collect();
        if color.len() == 3 {RGBColor(color[0], color[1], color[2])} else {BLACK}
    }

    pub(crate) fn str2color(color: &str) -> RGBColor {
        let color = color.trim();
        str2color!(color; BLACK, BLUE, CYAN, GREEN, MAGENTA, RED, WHITE, YELLOW;
            PlotConfig::hex2color(color).unwrap_or_else(|| PlotConfig::digi2color(color)))
    }

    fn line_colors(&self) -> &[RGBColor] {
        self.line_colors.get_or_init(|| self.line_colors_str.iter().map(|c| PlotConfig::str2color(c)).collect())
    }
}

impl PlotStyle for PlotConfig {
    fn plot_size(&self) -> (u32, u32) {
        (self.plot_width, self.plot_height)
    }

    fn_color!(bg_color, bg_color_str);
    fn_color!(grid_color, grid_color_str);

    fn line_color(&self, n: usize) -> RGBColor {
        let colors = self.line_colors();
        if colors.is_empty() {BLACK} else {colors[n % colors.len()]}
    }

    fn line_stroke_style(&self, n: usize) -> ShapeStyle {
        ShapeStyle {
            color: self.line_color(n).mix(1.0),
            filled: true,
            stroke_width: self.stroke_size,
        }
    }

    fn legend_style(&'_ self) -> TextStyle<'_> {
        (self.legend_font.as_str(), self.legend_size).into()
    }

    fn legend_position(&self) -> SeriesLabelPosition {
        str2position!(self.legend_position.as_str();
            UpperLeft, UpperMiddle, UpperRight, MiddleLeft, MiddleRight, LowerLeft, LowerMiddle, LowerRight;
            UpperRight)
    }
}

fn read_conf_file(path: &Path) -> Result<PlotConfig, PlotError> {
    let conf_err = |message: String| PlotError::Config { path: path.to_path_buf(), message };
    let conf_str = std::fs::read_to_string(path).map_err(|e| conf_err(e.to_string()))?;
    serde_json::from_str(&conf_str).map_err(|e| conf_err(e.to_string()))
}

/// Load the plot style.
///
/// An explicit path must exist and parse. Without one, `plot_config.json` in
/// the working directory is used when present, the built-in style otherwise.
pub fn load_plot_config(explicit: Option<&Path>) -> Result<PlotConfig, PlotError> {
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    let conf = match explicit {
        Some(path) => read_conf_file(path),
        None if default_path.is_file() => read_conf_file(default_path),
        None => Ok(PlotConfig::default()),
    };
    conf.inspect(|conf| log::debug!("plot size {:?}, stroke {}", conf.plot_size(), conf.stroke_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_hex_and_decimal_colors() {
        assert_eq!(PlotConfig::str2color("RED"), RED);
        assert_eq!(PlotConfig::str2color("#1f77b4"), RGBColor(31, 119, 180));
        assert_eq!(PlotConfig::str2color("10, 20, 30"), RGBColor(10, 20, 30));
    }

    #[test]
    fn unparseable_color_is_black() {
        assert_eq!(PlotConfig::str2color("chartreuse"), BLACK);
        assert_eq!(PlotConfig::str2color("#12345"), BLACK);
        assert_eq!(PlotConfig::str2color("1,2"), BLACK);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let conf: PlotConfig = serde_json::from_str(r#"{ "plot_width": 1024, "stroke_size": 3 }"#).unwrap();
        assert_eq!(conf.plot_size(), (1024, 480));
        assert_eq!(conf.line_stroke_style(0).stroke_width, 3);
        assert_eq!(conf.bg_color(), WHITE);
    }

    #[test]
    fn line_colors_cycle_and_share_stroke_width() {
        let conf: PlotConfig = serde_json::from_str(r#"{ "line_colors": ["RED", "BLUE"] }"#).unwrap();
        assert_eq!(conf.line_color(0), RED);
        assert_eq!(conf.line_color(1), BLUE);
        assert_eq!(conf.line_color(2), RED);
        assert_eq!(conf.line_stroke_style(0).stroke_width, conf.line_stroke_style(5).stroke_width);
    }

    #[test]
    fn default_palette_starts_with_category_blue() {
        let conf = PlotConfig::default();
        assert_eq!(conf.line_color(0), RGBColor(0x1f, 0x77, 0xb4));
        assert_eq!(conf.line_color(10), conf.line_color(0));
    }

    #[test]
    fn legend_position_falls_back_to_upper_right() {
        let conf: PlotConfig = serde_json::from_str(r#"{ "legend_position": "LowerLeft" }"#).unwrap();
        assert!(matches!(conf.legend_position(), SeriesLabelPosition::LowerLeft));
        let conf: PlotConfig = serde_json::from_str(r#"{ "legend_position": "Nowhere" }"#).unwrap();
        assert!(matches!(conf.legend_position(), SeriesLabelPosition::UpperRight));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_plot_config(Some(Path::new("/nonexistent/colplot/style.json"))).err();
        assert!(matches!(err, Some(PlotError::Config { .. })));
    }
}
