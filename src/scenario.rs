//! Scenario runner for end-to-end project evaluations
//!
//! Holds one immutable configuration plus its revenue/cost sequences and runs the full
//! pipeline (depreciation, DCF, rate-of-return scan) for any depreciation method.

use serde::{Deserialize, Serialize};

use crate::config::{EconomicsConfig, PeriodSequences};
use crate::depreciation::{depreciation_schedule, DepreciationMethod, DepreciationSchedule};
use crate::error::{EconomicsError, EconomicsResult};
use crate::finance::{run_dcf, scan_rate_of_return, DcfResult, RateScan};

/// Everything produced by one evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEvaluation {
    pub method: DepreciationMethod,
    pub depreciation: DepreciationSchedule,
    pub dcf: DcfResult,
    pub scan: RateScan,
}

impl ProjectEvaluation {
    /// Scalar KPIs for reporting
    pub fn summary(&self) -> EvaluationSummary {
        EvaluationSummary {
            method: self.method.label().to_string(),
            npv: self.dcf.npv,
            ccp: self.dcf.ccp,
            ccr: self.dcf.ccr,
            ccr_discounted: self.dcf.ccr_discounted,
            payback_period: self.dcf.payback(),
            roroi: self.dcf.roroi,
            roroi_discounted: self.dcf.roroi_discounted,
            dcfror: self.scan.crossing,
            depreciation_truncated: self.depreciation.truncated,
        }
    }
}

/// Scalar KPIs of an evaluation; `None` marks a payback or DCFROR that was not reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub method: String,
    pub npv: f64,
    pub ccp: f64,
    pub ccr: f64,
    pub ccr_discounted: f64,
    pub payback_period: Option<f64>,
    pub roroi: f64,
    pub roroi_discounted: f64,
    pub dcfror: Option<f64>,
    pub depreciation_truncated: bool,
}

/// Pre-validated runner for project evaluations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(EconomicsConfig::default())?;
/// let evaluation = runner.evaluate(&DepreciationMethod::SumOfYearsDigits)?;
/// println!("NPV: {:.4}", evaluation.dcf.npv);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: EconomicsConfig,
    sequences: PeriodSequences,
}

impl ScenarioRunner {
    /// Create runner with flat revenue and cost from the configuration
    pub fn new(config: EconomicsConfig) -> EconomicsResult<Self> {
        let sequences = PeriodSequences::flat(&config);
        Self::with_sequences(config, sequences)
    }

    /// Create runner with explicit per-period revenue and cost
    pub fn with_sequences(config: EconomicsConfig, sequences: PeriodSequences) -> EconomicsResult<Self> {
        config.validate()?;
        if sequences.periods() != config.periods {
            return Err(EconomicsError::ShapeMismatch {
                what: "revenue",
                expected: config.periods,
                actual: sequences.periods(),
            });
        }
        Ok(Self { config, sequences })
    }

    pub fn config(&self) -> &EconomicsConfig {
        &self.config
    }

    pub fn sequences(&self) -> &PeriodSequences {
        &self.sequences
    }

    /// Method with the configured declining-balance factor applied
    fn configured(&self, method: &DepreciationMethod) -> DepreciationMethod {
        method.with_factor(self.config.declining_balance_factor)
    }

    /// Run depreciation, DCF and the rate-of-return scan for one method
    pub fn evaluate(&self, method: &DepreciationMethod) -> EconomicsResult<ProjectEvaluation> {
        let method = self.configured(method);
        let config = &self.config;

        let depreciation = depreciation_schedule(&method, &config.depreciation_basis())?;
        if depreciation.len() != config.periods {
            return Err(EconomicsError::ShapeMismatch {
                what: "depreciation",
                expected: config.periods,
                actual: depreciation.len(),
            });
        }

        let dcf = run_dcf(
            &self.sequences.revenue,
            &self.sequences.operating_cost,
            &depreciation.charges,
            &config.dcf_params(),
        )?;

        let (rate_min, rate_max, points) = config.scan_bounds();
        let scan = scan_rate_of_return(&dcf.cf, rate_min, rate_max, points);

        log::info!(
            "{} evaluation: NPV {:.4}, DCFROR {:?}",
            method.label(),
            dcf.npv,
            scan.crossing
        );

        Ok(ProjectEvaluation {
            method,
            depreciation,
            dcf,
            scan,
        })
    }

    /// Evaluate several methods against the same inputs
    pub fn compare_methods(&self, methods: &[DepreciationMethod]) -> EconomicsResult<Vec<ProjectEvaluation>> {
        methods.iter().map(|m| self.evaluate(m)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> EconomicsConfig {
        EconomicsConfig {
            irr_scan_points: 2_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_method_switch_changes_timing_only() {
        let runner = ScenarioRunner::new(quick_config()).unwrap();
        let results = runner
            .compare_methods(&[DepreciationMethod::SumOfYearsDigits, DepreciationMethod::double_declining()])
            .unwrap();
        assert_eq!(results.len(), 2);

        let (soyd, ddb) = (&results[0].dcf, &results[1].dcf);
        assert_eq!(&soyd.cf[..3], &ddb.cf[..3]);
        assert!((soyd.npv - ddb.npv).abs() > 1.0);
        assert!((soyd.roroi_discounted - ddb.roroi_discounted).abs() > 1e-4);

        // Accelerated SOYD front-loads the tax shield
        assert!(soyd.npv > ddb.npv);
        assert!(results[0].scan.crossing.unwrap() > results[1].scan.crossing.unwrap());
    }

    #[test]
    fn test_configured_factor_reaches_schedule() {
        let config = EconomicsConfig {
            declining_balance_factor: 1.5,
            ..quick_config()
        };
        let runner = ScenarioRunner::new(config).unwrap();
        let eval = runner.evaluate(&DepreciationMethod::double_declining()).unwrap();
        assert_eq!(eval.method, DepreciationMethod::DecliningBalance { factor: 1.5 });
    }

    #[test]
    fn test_sequence_length_must_match_periods() {
        let config = quick_config();
        let seqs = PeriodSequences::new(vec![110.0; 12], vec![30.0; 12]).unwrap();
        assert!(matches!(
            ScenarioRunner::with_sequences(config, seqs),
            Err(EconomicsError::ShapeMismatch { expected: 13, actual: 12, .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let config = EconomicsConfig {
            life_years: 0,
            ..quick_config()
        };
        assert!(ScenarioRunner::new(config).is_err());

        let config = EconomicsConfig {
            life_years: usize::MAX,
            ..quick_config()
        };
        assert!(matches!(ScenarioRunner::new(config), Err(EconomicsError::InvalidConfig(_))));
    }

    #[test]
    fn test_summary_sentinels() {
        let config = EconomicsConfig {
            revenue_per_period: 50.0,
            ..quick_config()
        };
        let runner = ScenarioRunner::new(config).unwrap();
        let summary = runner.evaluate(&DepreciationMethod::SumOfYearsDigits).unwrap().summary();
        assert_eq!(summary.payback_period, None);
        assert_eq!(summary.dcfror, None);
        assert!(summary.npv < 0.0);
    }

    #[test]
    fn test_short_horizon_flagged() {
        let config = EconomicsConfig {
            periods: 10,
            ..quick_config()
        };
        let runner = ScenarioRunner::new(config).unwrap();
        let eval = runner.evaluate(&DepreciationMethod::SumOfYearsDigits).unwrap();
        assert!(eval.depreciation.truncated);
        assert!(eval.summary().depreciation_truncated);
        assert_eq!(eval.dcf.periods(), 10);
    }
}
