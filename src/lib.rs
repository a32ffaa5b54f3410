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

//! Plot every column of a whitespace-delimited data file against its first
//! (time) column and save the figure as an image.
//!
//! The work is split in three stages that can be called on their own:
//! [`load_table`], [`render`] and [`write_figure`].

pub mod config;
pub mod error;
pub mod figure;
pub mod loader;
pub mod writer;

use std::path::{Path, PathBuf};

pub use config::{load_plot_config, PlotConfig, PlotStyle};
pub use error::PlotError;
pub use figure::{render, Figure, Series};
pub use loader::{load_table, read_table, DataTable};
pub use writer::{resolve_output_path, write_figure};

/// Input file used when none is named.
pub const DEFAULT_INPUT: &str = "filter.txt";

/// Load `input`, plot it and write the image. Returns the path written.
///
/// Nothing is written when loading or rendering fails.
pub fn read_and_plot_data(input: &Path, output: Option<&Path>, config: &impl PlotStyle)
    -> Result<PathBuf, PlotError>
{
    let out = resolve_output_path(input, output);

    let table = load_table(input)?;
    let figure = render(&table)?;
    write_figure(&figure, &out, config)?;

    Ok(out)
}
