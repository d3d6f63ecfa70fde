use std::path::PathBuf;

use clap::Parser;
use ttfmunge::ConvertRequest;

/// Font converted when no input is named on the command line.
pub const DEFAULT_INPUT: &str = "Zain-Bold.ttf";

/// Embeds TrueType fonts in C headers as byte arrays.
#[derive(Parser, Debug)]
#[command(name = "ttf2h", version)]
pub struct ConvertArgs {
    /// Fonts to convert, in order. Each produces `<name>.h`.
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    pub inputs: Vec<PathBuf>,

    /// Directory to write headers into (default: current directory).
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// More log output; repeat for more.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ConvertArgs {
    pub fn requests(&self) -> Vec<ConvertRequest> {
        self.inputs
            .iter()
            .map(|input| {
                let req = ConvertRequest::new(input);
                match &self.out_dir {
                    Some(dir) => req.with_out_dir(dir),
                    None => req,
                }
            })
            .collect()
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
