//! Command-line front end for `ttfmunge`.

mod args;

use std::process::ExitCode;

use clap::Parser;
use log::debug;

use crate::args::ConvertArgs;

fn main() -> ExitCode {
    let args = ConvertArgs::parse();

    env_logger::Builder::new()
        .filter_level(args.log_filter())
        .parse_default_env()
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Exit status for a failed run: the converter's own code if one is found
/// anywhere in the chain, 1 otherwise.
fn exit_code(e: &anyhow::Error) -> u8 {
    e.chain()
        .find_map(|cause| cause.downcast_ref::<ttfmunge::Error>())
        .map(ttfmunge::Error::exit_code)
        .unwrap_or(1)
}

/// Converts each input in order, stopping at the first failure.
fn run(args: &ConvertArgs) -> anyhow::Result<()> {
    let requests = args.requests();
    debug!("converting {} font(s)", requests.len());
    for request in requests {
        let report = ttfmunge::convert(&request)?;
        println!("{}", report);
    }
    Ok(())
}
