use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colplot::{load_plot_config, read_and_plot_data, DEFAULT_INPUT};

/// Plot every column of a data file against its first column.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Whitespace-delimited data file with a header line
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Image to write, format taken from the extension [default: <input>.png]
    output: Option<PathBuf>,

    /// JSON plot style [default: ./plot_config.json when present]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let plotted = load_plot_config(cli.config.as_deref())
        .and_then(|conf| read_and_plot_data(&cli.input, cli.output.as_deref(), &conf));

    match plotted {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error! {e}");
            ExitCode::FAILURE
        }
    }
}
