use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use log::LevelFilter;

use crate::context::Context;
use crate::error::DatagenError;
use crate::generator;
use crate::global_properties::ContextGlobalPropertiesExt;
use crate::log::set_log_level;
use crate::parameters::{Parameters, ParametersValues};
use crate::random::ContextRandomExt;
use crate::report::ContextReportExt;

/// Command line arguments for the dataset generator.
#[derive(Parser, Debug)]
#[command(
    name = "covid-datagen",
    about = "Generate the synthetic COVID-19 health datasets"
)]
pub struct BaseArgs {
    /// Random seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// First date of the time series (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last date of the time series (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Directory where the CSV files will be written
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Optional path for a JSON parameter file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short, long)]
    pub log_level: Option<LevelFilter>,
}

/// Runs a full generation with the given arguments: load parameters,
/// validate, generate the five tables and write them out.
///
/// # Errors
///
/// Returns a `DatagenError` on invalid configuration, an internal
/// invariant violation or a write failure.
pub fn run_with_args(args: BaseArgs) -> Result<Context, DatagenError> {
    if let Some(level) = args.log_level {
        set_log_level(level);
    }

    let mut context = Context::new();

    // Parameters come from the optional JSON file; explicit command line
    // values override it.
    let mut parameters = match &args.config {
        Some(path) => context.load_parameters_from_json::<ParametersValues>(path)?,
        None => ParametersValues::default(),
    };
    if let Some(seed) = args.seed {
        parameters.seed = seed;
    }
    if let Some(start_date) = args.start_date {
        parameters.start_date = start_date;
    }
    if let Some(end_date) = args.end_date {
        parameters.end_date = end_date;
    }
    parameters.validate()?;

    // Fail fast on an unwritable output location, before any generation.
    context.set_report_directory(args.output_dir.clone())?;

    context.init_random(parameters.seed);
    context.set_global_property_value(Parameters, parameters);

    let bundle = generator::generate(&context)?;
    bundle.write_csv(&mut context)?;
    Ok(context)
}

/// Parses the process arguments and runs the generator.
///
/// # Errors
///
/// Returns a `DatagenError` if the run fails.
pub fn run() -> Result<Context, DatagenError> {
    run_with_args(BaseArgs::parse())
}
