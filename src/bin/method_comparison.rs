//! Compare depreciation methods on the same project
//!
//! Runs sum-of-years-digits and double-declining-balance against one configuration and
//! prints the KPIs side by side. Pass a JSON config path as the only argument, or nothing
//! for the default example project. Set OUTPUT_JSON=1 for JSON output.

use anyhow::{Context, Result};
use std::env;
use std::time::Instant;

use project_economics::report::{format_comparison, summaries_to_json};
use project_economics::{DepreciationMethod, EconomicsConfig, ScenarioRunner};

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => EconomicsConfig::from_json_path(&path).with_context(|| format!("reading config {}", path))?,
        None => EconomicsConfig::default(),
    };
    let json_output = env::var("OUTPUT_JSON").map(|v| v == "1").unwrap_or(false);

    let start = Instant::now();
    let runner = ScenarioRunner::new(config)?;
    let evaluations = runner.compare_methods(&[
        DepreciationMethod::SumOfYearsDigits,
        DepreciationMethod::double_declining(),
    ])?;
    let summaries: Vec<_> = evaluations.iter().map(|e| e.summary()).collect();

    if json_output {
        println!("{}", summaries_to_json(&summaries)?);
        return Ok(());
    }

    print!("{}", format_comparison(&summaries));
    for s in summaries.iter().filter(|s| s.depreciation_truncated) {
        println!("\nwarning: {} schedule truncated at the horizon", s.method);
    }
    println!("\nEvaluated {} methods in {:?}", summaries.len(), start.elapsed());

    Ok(())
}
