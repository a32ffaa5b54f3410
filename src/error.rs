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

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a plotting run.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("cannot read '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' has no header line", path.display())]
    MissingHeader { path: PathBuf },

    #[error("'{}' has a header but no data rows", path.display())]
    NoData { path: PathBuf },

    #[error("line {line}: cannot parse '{token}' as a number")]
    Parse { line: usize, token: String },

    #[error("line {line}: expected {expected} columns, found {found}")]
    Shape {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("no header label for column {column} (header has {header_len} labels)")]
    LabelIndex { column: usize, header_len: usize },

    #[error("cannot write '{}': {message}", path.display())]
    Write { path: PathBuf, message: String },

    #[error("bad plot config '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl PlotError {
    pub(crate) fn write(path: impl Into<PathBuf>, e: impl std::fmt::Display) -> PlotError {
        PlotError::Write { path: path.into(), message: e.to_string() }
    }
}
