mod args;
mod survey;

use clap::Parser;
use log::{debug, LevelFilter};

use crate::args::Args;
use crate::survey::{error_report, read_config, run_conversion, ConversionSettings, SurveyResult};

fn run(args: &Args) -> SurveyResult<()> {
    let config = match &args.config {
        Some(config_path) => Some(read_config(config_path)?),
        None => None,
    };
    let settings = ConversionSettings::from_config(
        config,
        args.inputs(),
        args.out.clone(),
        args.combined_only,
        args.reference.clone(),
    );
    run_conversion(&settings)
}

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(LevelFilter::Info);
    }
    builder.init();
    debug!("args: {:?}", args);

    if let Err(e) = run(&args) {
        eprintln!("An error occurred: {}", error_report(&e));
        std::process::exit(1);
    }
}
