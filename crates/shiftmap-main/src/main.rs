// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod almanac;
mod config;
mod err;

use crate::{
    almanac::Almanac,
    config::{RunConfig, SeedMode, Strategy},
    err::AppError,
};
use clap::Parser;
use serde::Serialize;
use shiftmap_engine::pipeline::{Pipeline, merge_ranges, reduce_minimum};
use std::{path::PathBuf, process::ExitCode, time::Instant};
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Parser)]
#[command(
    name = "shiftmap",
    version,
    about = "Find the lowest location reachable from the seeds of an almanac"
)]
struct Args {
    /// Almanac file to evaluate
    input: PathBuf,

    /// How to read the numbers on the `seeds:` line
    #[arg(long, value_enum, default_value_t = SeedMode::Ranges)]
    seeds: SeedMode,

    /// Fold the maps one by one, or compose them into a single map first
    #[arg(long, value_enum, default_value_t = Strategy::Staged)]
    strategy: Strategy,

    /// Evaluate seed ranges in parallel
    #[arg(long)]
    parallel: bool,

    /// Print a JSON report instead of the bare minimum
    #[arg(long)]
    json: bool,
}

impl Args {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            seeds: self.seeds,
            strategy: self.strategy,
            parallel: self.parallel,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct RunReport {
    input: String,
    seeds: SeedMode,
    strategy: Strategy,
    parallel: bool,
    stages: usize,
    seed_count: usize,
    result_count: usize,
    covered_locations: i64,
    minimum: i64,
    elapsed_us: u128,
}

/// The outcome of one evaluation, before it is tied to an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Evaluation {
    seed_count: usize,
    result_count: usize,
    /// Distinct locations reached by any seed.
    covered_locations: i64,
    minimum: i64,
}

fn build_pipeline(almanac: &Almanac, strategy: Strategy) -> Result<Pipeline<i64>, AppError> {
    let staged = almanac.pipeline()?;
    match strategy {
        Strategy::Staged => Ok(staged),
        Strategy::Composed => Ok(Pipeline::new(vec![staged.composed()?])?),
    }
}

#[instrument(level = "info", skip_all, fields(seeds = %config.seeds, strategy = %config.strategy, parallel = config.parallel))]
fn evaluate(almanac: &Almanac, config: &RunConfig) -> Result<Evaluation, AppError> {
    let pipeline = build_pipeline(almanac, config.strategy)?;
    let chain = pipeline.stage();
    debug!(
        from = almanac.domain_name(chain.input()).unwrap_or("?"),
        to = almanac.domain_name(chain.output()).unwrap_or("?"),
        maps = almanac.stages().len(),
        stages = pipeline.len(),
        seed_numbers = almanac.seeds().len(),
        "Built pipeline"
    );

    let evaluation = match config.seeds {
        SeedMode::Points => {
            let seeds = almanac.seed_points();
            let locations = pipeline.apply_points(&seeds);
            let minimum = locations
                .first()
                .copied()
                .ok_or(shiftmap_engine::err::EmptyReductionError)?;
            Evaluation {
                seed_count: seeds.len(),
                result_count: locations.len(),
                covered_locations: locations.len() as i64,
                minimum,
            }
        }
        SeedMode::Ranges => {
            let seeds = almanac.seed_ranges()?;
            let locations = if config.parallel {
                pipeline.par_apply_ranges(&seeds)
            } else {
                pipeline.apply_ranges(&seeds)
            };
            Evaluation {
                seed_count: seeds.len(),
                result_count: locations.len(),
                covered_locations: merge_ranges(&locations).measure(),
                minimum: reduce_minimum(&locations)?,
            }
        }
    };
    info!(
        minimum = evaluation.minimum,
        results = evaluation.result_count,
        "Evaluated almanac"
    );
    Ok(evaluation)
}

fn run(args: &Args) -> Result<RunReport, AppError> {
    let config = args.run_config();
    let text = std::fs::read_to_string(&args.input)?;
    let almanac = Almanac::parse(&text)?;

    let started = Instant::now();
    let evaluation = evaluate(&almanac, &config)?;
    let elapsed = started.elapsed();

    Ok(RunReport {
        input: args.input.display().to_string(),
        seeds: config.seeds,
        strategy: config.strategy,
        parallel: config.parallel,
        stages: almanac.stages().len(),
        seed_count: evaluation.seed_count,
        result_count: evaluation.result_count,
        covered_locations: evaluation.covered_locations,
        minimum: evaluation.minimum,
        elapsed_us: elapsed.as_micros(),
    })
}

fn main() -> ExitCode {
    enable_tracing();
    let args = Args::parse();

    let report = match run(&args) {
        Ok(report) => report,
        Err(e) => {
            if let AppError::Almanac(parse) = &e {
                error!(line = parse.line(), kind = %parse.kind(), "Rejected almanac");
            }
            error!(input = %args.input.display(), "{}", e);
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to write report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", report.minimum);
    }
    ExitCode::SUCCESS
}
