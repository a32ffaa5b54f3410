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

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::config::PlotStyle;
use crate::error::PlotError;
use crate::figure::Figure;

/// Extension given to derived output names.
pub const IMAGE_EXTENSION: &str = "png";

/// Where the image goes: the explicit path verbatim, otherwise the input path
/// with its last extension replaced by `.png`. An input without extension
/// gets `.png` appended.
pub fn resolve_output_path(input: &Path, explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| input.with_extension(IMAGE_EXTENSION), Path::to_path_buf)
}

fn is_svg(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

fn draw<DB, S>(root: DrawingArea<DB, Shift>, figure: &Figure, style: &S)
    -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
    S: PlotStyle,
{
    root.fill(&style.bg_color())?;

    // No caption and no label areas: the axes cover the whole image.
    let mut chart = ChartBuilder::on(&root)
        .margin(0)
        .build_cartesian_2d(figure.x_range(), figure.y_range())?;

    chart.configure_mesh()
        .bold_line_style(style.grid_color())
        .light_line_style(plotters::style::TRANSPARENT)
        .draw()?;

    for (n, series) in figure.series().iter().enumerate() {
        let stroke = style.line_stroke_style(n);
        let segments = series.segments();
        chart.draw_series(segments.into_iter().flat_map(|seg| LineSeries::new(seg, stroke)))?
            .label(series.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));
    }

    if figure.has_legend() {
        chart.configure_series_labels()
            .position(style.legend_position())
            .border_style(BLACK.mix(0.3))
            .background_style(WHITE.mix(0.8))
            .label_font(style.legend_style())
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Draw the figure into `path`, replacing any existing file. `.svg` paths are
/// written as vector images, anything else goes through the bitmap encoder
/// picked by the extension.
pub fn write_figure<P, S>(figure: &Figure, path: P, style: &S) -> Result<(), PlotError>
where
    P: AsRef<Path>,
    S: PlotStyle,
{
    let path = path.as_ref();
    let size = style.plot_size();
    let print_err = |e: &PlotError| log::error!("plot {} err {e}!", path.display());

    let written = if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw(root, figure, style).map_err(|e| PlotError::write(path, e))
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw(root, figure, style).map_err(|e| PlotError::write(path, e))
    };
    written.inspect_err(print_err)?;

    log::info!("wrote {} ({}x{})", path.display(), size.0, size.1);
    Ok(())
}
