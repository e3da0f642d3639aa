//! Project Economics - Discounted cash flow engine for capital project evaluation
//!
//! This library provides:
//! - Depreciation schedules (declining-balance and sum-of-years-digits) with book values
//! - Raw, discounted and cumulative cash flow sequences for a staged capital project
//! - Project KPIs (NPV, payback period, cash-cost ratio, return on investment)
//! - Discounted cash flow rate of return by parallel rate scan
//! - Scenario runner for comparing depreciation methods on one configuration

pub mod config;
pub mod depreciation;
pub mod error;
pub mod finance;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use config::{ConfigOverrides, EconomicsConfig, PeriodSequences};
pub use depreciation::{depreciation_schedule, DepreciationMethod, DepreciationSchedule};
pub use error::{EconomicsError, EconomicsResult};
pub use finance::{run_dcf, scan_rate_of_return, DcfParams, DcfResult, RateScan};
pub use scenario::{EvaluationSummary, ProjectEvaluation, ScenarioRunner};
