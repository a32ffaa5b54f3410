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

use std::ops::Range;

use itertools::{Itertools, MinMaxResult};

use crate::error::PlotError;
use crate::loader::DataTable;

/// Fraction of the data span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

/// One line of the figure: a signal column against the time column.
#[derive(Clone, Copy)]
pub struct Series<'a> {
    label: &'a str,
    column: usize,
    table: &'a DataTable,
    scale: (f64, f64),
}

impl<'a> Series<'a> {
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// Samples as read from the table.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + Clone + 'a {
        self.table.time().zip(self.table.column(self.column))
    }

    /// Runs of finite points in axis coordinates. A `nan` or `inf` on either
    /// axis ends a run.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let (sx, sy) = self.scale;
        let is_finite = |(x, y): &(f64, f64)| x.is_finite() && y.is_finite();
        let chunks = self.points().chunk_by(is_finite);
        let segments = chunks.into_iter()
            .filter_map(|(finite, run)| finite.then(|| run.map(|(x, y)| (x * sx, y * sy)).collect()))
            .collect();
        segments
    }
}

/// An in-memory figure: one set of axes, a grid, a legend, no outer margin.
pub struct Figure<'a> {
    series: Vec<Series<'a>>,
    x_range: Range<f64>,
    y_range: Range<f64>,
}

impl<'a> Figure<'a> {
    pub fn series(&self) -> &[Series<'a>] {
        &self.series
    }

    pub fn x_range(&self) -> Range<f64> {
        self.x_range.clone()
    }

    pub fn y_range(&self) -> Range<f64> {
        self.y_range.clone()
    }

    pub fn has_legend(&self) -> bool {
        !self.series.is_empty()
    }
}

fn finite(v: &f64) -> bool { v.is_finite() }

fn padded(lo: f64, hi: f64) -> Range<f64> {
    let pad = hi * AXIS_MARGIN - lo * AXIS_MARGIN;
    (lo - pad).max(f64::MIN)..(hi + pad).min(f64::MAX)
}

/// Span of the finite values widened by the axis margin, and the factor the
/// values are multiplied by to fit it.
///
/// The factor is 1 unless the padded span would not be representable; then
/// the axis is halved until it is. Ticks are never labeled, so a scaled axis
/// draws the same picture.
pub(crate) fn axis_range(values: impl Iterator<Item = f64>) -> (Range<f64>, f64) {
    let (lo, hi) = match values.filter(finite).minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => return (0.0..1.0, 1.0),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };
    if lo == hi {
        let pad = (lo.abs() * AXIS_MARGIN).max(0.5);
        return ((lo - pad).max(f64::MIN)..(hi + pad).min(f64::MAX), 1.0);
    }

    let mut scale = 1.0;
    loop {
        let range = padded(lo * scale, hi * scale);
        // The padded span is at most 0.55 * f64::MAX once scale reaches 0.25.
        if (range.end - range.start).is_finite() {
            return (range, scale);
        }
        scale *= 0.5;
    }
}

/// Build the figure for a table: every column after the first becomes a
/// series labeled by its header token.
pub fn render(table: &DataTable) -> Result<Figure<'_>, PlotError> {
    let header = table.header();
    let mut series = (1..table.ncols())
        .map(|column| {
            header.get(column)
                .map(|label| Series { label: label.as_str(), column, table, scale: (1.0, 1.0) })
                .ok_or_else(|| PlotError::LabelIndex { column, header_len: header.len() })
        })
        .collect::<Result<Vec<_>, PlotError>>()?;

    for s in &series {
        let dropped = s.points().filter(|(x, y)| !(x.is_finite() && y.is_finite())).count();
        if dropped > 0 {
            log::warn!("series '{}': {dropped} non-finite samples left as gaps", s.label);
        }
        log::debug!("series {} '{}'", s.column, s.label);
    }

    let (x_range, sx) = axis_range(table.time());
    let (y_range, sy) = axis_range(series.iter().flat_map(|s| table.column(s.column)));
    if sx != 1.0 || sy != 1.0 {
        log::warn!("data span too wide for f64, axes scaled by {sx} x {sy}");
    }
    series.iter_mut().for_each(|s| s.scale = (sx, sy));
    log::info!("rendered {} series", series.len());

    Ok(Figure { series, x_range, y_range })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::read_table;
    use std::path::Path;

    fn table(text: &str) -> DataTable {
        read_table(text.as_bytes(), Path::new("test.txt")).unwrap()
    }

    #[test]
    fn one_series_per_signal_column() {
        let table = table("t a b\n0 1 2\n1 3 4\n2 5 6\n");
        let figure = render(&table).unwrap();
        let labels: Vec<_> = figure.series().iter().map(Series::label).collect();
        assert_eq!(labels, ["a", "b"]);
        for s in figure.series() {
            let xs: Vec<f64> = s.points().map(|(x, _)| x).collect();
            assert_eq!(xs, table.time().collect::<Vec<_>>());
        }
        assert_eq!(figure.series()[1].points().map(|(_, y)| y).collect::<Vec<_>>(), [2.0, 4.0, 6.0]);
        assert!(figure.has_legend());
    }

    #[test]
    fn time_only_gives_empty_figure() {
        let table = table("t\n0\n1\n");
        let figure = render(&table).unwrap();
        assert!(figure.series().is_empty());
        assert!(!figure.has_legend());
    }

    #[test]
    fn short_header_is_a_label_error() {
        let table = table("t a\n0 1 2\n1 3 4\n");
        let err = render(&table).err();
        assert!(matches!(err, Some(PlotError::LabelIndex { column: 2, header_len: 2 })));
    }

    #[test]
    fn long_header_is_tolerated() {
        let table = table("t a b c\n0 1\n1 2\n");
        let figure = render(&table).unwrap();
        assert_eq!(figure.series().len(), 1);
        assert_eq!(figure.series()[0].label(), "a");
    }

    #[test]
    fn ranges_have_margins() {
        let table = table("t a b\n0 -1 0\n10 1 3\n");
        let figure = render(&table).unwrap();
        let x = figure.x_range();
        assert!((x.start - -0.5).abs() < 1e-12);
        assert!((x.end - 10.5).abs() < 1e-12);
        let y = figure.y_range();
        assert!((y.start - -1.2).abs() < 1e-12);
        assert!((y.end - 3.2).abs() < 1e-12);
    }

    #[test]
    fn degenerate_ranges() {
        assert_eq!(axis_range([2.0, 2.0].into_iter()), (1.5..2.5, 1.0));
        assert_eq!(axis_range([f64::NAN].into_iter()), (0.0..1.0, 1.0));
        assert_eq!(axis_range(std::iter::empty()), (0.0..1.0, 1.0));
        assert_eq!(axis_range([3.0].into_iter()), (2.5..3.5, 1.0));
        let (range, _) = axis_range([f64::MAX].into_iter());
        assert!(range.start < range.end);
    }

    #[test]
    fn non_finite_samples_split_segments() {
        let table = table("t a\n0 1\n1 nan\n2 3\n3 4\n4 inf\n");
        let figure = render(&table).unwrap();
        let segments = figure.series()[0].segments();
        assert_eq!(segments, vec![vec![(0.0, 1.0)], vec![(2.0, 3.0), (3.0, 4.0)]]);
        assert!((figure.y_range().start - 0.85).abs() < 1e-12);
    }

    #[test]
    fn span_wider_than_f64_is_scaled_into_range() {
        let table = table("t a\n0 -1e308\n1 1e308\n");
        let figure = render(&table).unwrap();
        let y = figure.y_range();
        assert!(y.start.is_finite() && y.end.is_finite());
        assert!((y.end - y.start).is_finite());
        for (_, v) in figure.series()[0].segments().concat() {
            assert!(y.start <= v && v <= y.end);
        }
        assert_eq!(figure.series()[0].points().map(|(_, v)| v).collect::<Vec<_>>(), [-1e308, 1e308]);
    }

    #[test]
    fn padding_near_f64_max_stays_finite() {
        let (range, scale) = axis_range([0.0, f64::MAX].into_iter());
        assert!((range.end - range.start).is_finite());
        assert!(range.start <= 0.0 && f64::MAX * scale <= range.end);
        let (range, scale) = axis_range([0.0, 1.0].into_iter());
        assert_eq!(scale, 1.0);
        assert!((range.start - -0.05).abs() < 1e-12);
    }
}
