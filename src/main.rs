//! segmental CLI
//!
//! Loads a scenario YAML, computes the larger segment's area by formula and
//! by Monte Carlo, prints the comparison, and appends the record to the
//! configured results file (in-memory when none is configured).

use std::process::ExitCode;

use segmental::config::RunConfig;
use segmental::engine::rng::SegRng;
use segmental::montecarlo::MonteCarloEstimator;
use segmental::recorder::ResultRecorder;
use segmental::storage::{JsonlStorage, MemoryStorage, Storage};
use segmental::SegResult;

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        println!("segmental v{}", env!("CARGO_PKG_VERSION"));
        println!("Circle segment area: closed form vs Monte Carlo");
        println!();
        println!("Usage: segmental <scenario.yaml>");
        return ExitCode::SUCCESS;
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> SegResult<()> {
    let config = RunConfig::load(path)?;

    match &config.results_path {
        Some(results) => run_with(&config, JsonlStorage::new(results)),
        None => run_with(&config, MemoryStorage::new()),
    }
}

fn run_with<S: Storage>(config: &RunConfig, storage: S) -> SegResult<()> {
    let mut recorder = ResultRecorder::new(storage);
    let mut rng = SegRng::new(config.seed);

    let outcome = recorder.compute_and_record(&config.raw_inputs(), &mut rng)?;
    let result = &outcome.result;

    println!("Formula area:      {:.4}", result.formula_area);
    println!("Monte Carlo area:  {:.4}", result.monte_carlo_area);
    println!(
        "Difference:        {:.4} ({} samples)",
        result.difference(),
        result.samples
    );

    if config.workers > 1 {
        let parallel = MonteCarloEstimator::new(result.samples).estimate_parallel(
            &result.circle,
            &result.cut,
            config.workers,
            &mut rng,
        );
        println!(
            "Parallel estimate: {:.4} ({} workers)",
            parallel.estimate, config.workers
        );
    }

    match outcome.stored {
        Ok(id) => println!("Recorded as #{id}"),
        // Partial success: the computation stands, only durability failed.
        Err(e) => eprintln!("warning: result not recorded: {e}"),
    }

    Ok(())
}
