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

use std::io::BufRead;
use std::path::Path;

use crate::error::PlotError;

/// Header labels plus a row-major matrix of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    header: Vec<String>,
    values: Vec<f64>,
    ncols: usize,
}

impl DataTable {
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn nrows(&self) -> usize {
        if self.ncols == 0 {0} else {self.values.len() / self.ncols}
    }

    /// Column `n` as a strided view into the matrix.
    pub fn column(&self, n: usize) -> impl Iterator<Item = f64> + Clone + '_ {
        self.values.iter().skip(n).step_by(self.ncols.max(1)).copied()
    }

    /// The shared x-axis.
    pub fn time(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.column(0)
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(data, _)| data)
}

fn parse_row(lineno: usize, line: &str) -> Result<Vec<f64>, PlotError> {
    line.split_whitespace()
        .map(|token| token.parse::<f64>().map_err(|_| PlotError::Parse { line: lineno, token: token.to_string() }))
        .collect()
}

/// Parse a header line followed by rows of whitespace separated numbers.
///
/// Line numbers in errors are 1-based and count every physical line.
pub fn read_table(reader: impl BufRead, path: &Path) -> Result<DataTable, PlotError> {
    let load_err = |source| PlotError::Load { path: path.to_path_buf(), source };

    let mut lines = reader.lines().enumerate()
        .map(|(n, l)| l.map(|l| (n + 1, l)).map_err(load_err));

    let header: Vec<String> = loop {
        let Some((_, line)) = lines.next().transpose()? else {
            return Err(PlotError::MissingHeader { path: path.to_path_buf() });
        };
        let line = strip_comment(&line);
        if !line.trim().is_empty() {
            break line.split_whitespace().map(String::from).collect();
        }
    };

    let mut values = Vec::new();
    let mut ncols = None;
    for item in lines {
        let (lineno, line) = item?;
        let line = strip_comment(&line);
        if line.trim().is_empty() {
            continue;
        }
        let row = parse_row(lineno, line)?;
        let expected = *ncols.get_or_insert(row.len());
        if row.len() != expected {
            return Err(PlotError::Shape { line: lineno, expected, found: row.len() });
        }
        values.extend(row);
    }

    let ncols = ncols.ok_or_else(|| PlotError::NoData { path: path.to_path_buf() })?;
    Ok(DataTable { header, values, ncols })
}

/// Load a data file from disk.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<DataTable, PlotError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| PlotError::Load { path: path.to_path_buf(), source })?;
    let table = read_table(std::io::BufReader::new(file), path)?;
    log::info!("loaded {}: {} columns x {} rows", path.display(), table.ncols(), table.nrows());
    Ok(table)
}
