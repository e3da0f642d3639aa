//! Discounted cash flow engine, project KPIs and rate-of-return scan

mod cashflows;
mod discount;
mod engine;
mod metrics;
mod ror;

pub use cashflows::{build_cash_flows, DcfParams, INVESTMENT_PERIODS};
pub use discount::{compound_factor, cumulative, discount, discounted_cumulative, npv_at_rate};
pub use engine::{run_dcf, DcfResult};
pub use metrics::{
    cash_cost_ratios, payback_period, rate_of_return_on_investment, PAYBACK_BASE_IDX,
    ROROI_CORRECTION, ROROI_RECOVERY_EXPONENT,
};
pub use ror::{rate_grid, scan_rate_of_return, RateScan};
