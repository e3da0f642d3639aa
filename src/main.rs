//! Project Economics CLI
//!
//! Evaluates one capital project under a chosen depreciation method and prints the KPI
//! summary. Configuration comes from defaults, an optional JSON file and per-field flags,
//! in that order of precedence (flags win).

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use project_economics::report::{format_summary, summaries_to_json, write_outputs};
use project_economics::{ConfigOverrides, DepreciationMethod, EconomicsConfig, PeriodSequences, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "project_economics", version, about = "Discounted cash flow evaluation of a capital project")]
struct Cli {
    /// JSON configuration file (missing keys keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Depreciation method: SOYD or DDB
    #[arg(long, default_value = "SOYD")]
    method: DepreciationMethod,

    /// CSV with per-period revenue and operating cost (period,revenue,operating_cost)
    #[arg(long)]
    sequences: Option<PathBuf>,

    #[arg(long)]
    fci_l1: Option<f64>,
    #[arg(long)]
    fci_l2: Option<f64>,
    #[arg(long)]
    land: Option<f64>,
    #[arg(long)]
    working_capital: Option<f64>,
    #[arg(long)]
    salvage: Option<f64>,
    #[arg(long)]
    discount_rate: Option<f64>,
    #[arg(long)]
    tax_rate: Option<f64>,

    /// Flat revenue per period
    #[arg(long)]
    revenue: Option<f64>,

    /// Flat operating cost per period
    #[arg(long)]
    operating_cost: Option<f64>,

    #[arg(long)]
    life_years: Option<usize>,
    #[arg(long)]
    depr_start_idx: Option<usize>,
    #[arg(long)]
    periods: Option<usize>,
    #[arg(long)]
    irr_scan_min: Option<f64>,
    #[arg(long)]
    irr_scan_max: Option<f64>,
    #[arg(long)]
    irr_scan_points: Option<usize>,

    /// Declining-balance factor (2.0 = double-declining)
    #[arg(long)]
    ddb_factor: Option<f64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Write cash_flows.csv and npv_scan.csv into this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            fci_l1: self.fci_l1,
            fci_l2: self.fci_l2,
            land: self.land,
            working_capital: self.working_capital,
            salvage: self.salvage,
            discount_rate: self.discount_rate,
            tax_rate: self.tax_rate,
            revenue_per_period: self.revenue,
            operating_cost_per_period: self.operating_cost,
            life_years: self.life_years,
            depr_start_idx: self.depr_start_idx,
            periods: self.periods,
            declining_balance_factor: self.ddb_factor,
            irr_scan_min: self.irr_scan_min,
            irr_scan_max: self.irr_scan_max,
            irr_scan_points: self.irr_scan_points,
        }
    }

    fn load_config(&self) -> Result<EconomicsConfig> {
        let base = match &self.config {
            Some(path) => EconomicsConfig::from_json_path(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => EconomicsConfig::default(),
        };
        Ok(self.overrides().apply(&base))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli.load_config()?;
    let runner = match &cli.sequences {
        Some(path) => {
            let sequences = PeriodSequences::from_csv_path(path, config.periods)
                .with_context(|| format!("reading sequences {}", path.display()))?;
            ScenarioRunner::with_sequences(config, sequences)?
        }
        None => ScenarioRunner::new(config)?,
    };

    let evaluation = runner.evaluate(&cli.method)?;
    let summary = evaluation.summary();

    if summary.depreciation_truncated {
        eprintln!(
            "warning: depreciation schedule does not fit in {} periods; the write-off tail was dropped",
            runner.config().periods
        );
    }

    if cli.json {
        println!("{}", summaries_to_json(std::slice::from_ref(&summary))?);
    } else {
        print!("{}", format_summary(&summary));
    }

    if let Some(dir) = &cli.output_dir {
        let (cash_flows, scan) = write_outputs(dir, &evaluation)
            .with_context(|| format!("writing outputs to {}", dir.display()))?;
        if !cli.json {
            println!("\nCash flows written to: {}", cash_flows.display());
            println!("NPV scan written to: {}", scan.display());
        }
    }

    Ok(())
}
