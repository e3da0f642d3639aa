//! Raw (undiscounted) project cash flow construction
//!
//! Period convention:
//! - 0: land acquisition
//! - 1: first capital tranche
//! - 2: second capital tranche plus working capital
//! - 3..: after-tax operating cash flow, depreciation added back
//! - last: also receives after-tax salvage, working capital and land recovery

use serde::{Deserialize, Serialize};

use super::discount::compound_factor;
use crate::error::{EconomicsError, EconomicsResult};

/// Number of leading periods that carry investment outflows only
pub const INVESTMENT_PERIODS: usize = 3;

/// Monetary and rate inputs for the cash flow engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcfParams {
    /// Discount rate (fraction, e.g. 0.08)
    pub discount_rate: f64,

    /// Tax rate (fraction)
    pub tax_rate: f64,

    /// First capital tranche
    pub fci_l1: f64,

    /// Second capital tranche
    pub fci_l2: f64,

    pub working_capital: f64,
    pub salvage: f64,
    pub land: f64,
}

impl DcfParams {
    /// Total fixed capital investment
    pub fn fci_net(&self) -> f64 {
        self.fci_l1 + self.fci_l2
    }

    /// Fixed capital investment discounted to period 0
    pub fn fci_net_discounted(&self) -> f64 {
        let rate = self.discount_rate;
        self.fci_l1 / compound_factor(rate, 1) + self.fci_l2 / compound_factor(rate, 2)
    }

    /// Amount added to the final period's cash flow
    pub fn terminal_recovery(&self) -> f64 {
        (1.0 - self.tax_rate) * self.salvage + self.working_capital + self.land
    }

    pub fn validate(&self) -> EconomicsResult<()> {
        let fields = [
            ("discount_rate", self.discount_rate),
            ("tax_rate", self.tax_rate),
            ("fci_l1", self.fci_l1),
            ("fci_l2", self.fci_l2),
            ("working_capital", self.working_capital),
            ("salvage", self.salvage),
            ("land", self.land),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EconomicsError::InvalidConfig(format!("{} must be finite, got {}", name, value)));
        }
        if self.discount_rate <= -1.0 {
            return Err(EconomicsError::InvalidConfig(format!(
                "discount_rate must exceed -1, got {}",
                self.discount_rate
            )));
        }
        Ok(())
    }
}

/// Check that `values` has exactly `expected` entries
pub(crate) fn check_length(what: &'static str, values: &[f64], expected: usize) -> EconomicsResult<()> {
    if values.len() != expected {
        return Err(EconomicsError::ShapeMismatch {
            what,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Check that `values` covers at least the investment phase
pub(crate) fn check_min_length(what: &'static str, values: &[f64]) -> EconomicsResult<()> {
    if values.len() < INVESTMENT_PERIODS {
        return Err(EconomicsError::SequenceTooShort {
            what,
            len: values.len(),
        });
    }
    Ok(())
}

/// Build the per-period cash flow sequence.
///
/// `revenue`, `operating_cost` and `depreciation` must share one length of at least 3.
pub fn build_cash_flows(
    revenue: &[f64],
    operating_cost: &[f64],
    depreciation: &[f64],
    params: &DcfParams,
) -> EconomicsResult<Vec<f64>> {
    check_min_length("revenue", revenue)?;
    let n = revenue.len();
    check_length("operating_cost", operating_cost, n)?;
    check_length("depreciation", depreciation, n)?;

    let mut cf = vec![0.0; n];
    cf[0] = -params.land;
    cf[1] = -params.fci_l1;
    cf[2] = -params.fci_l2 - params.working_capital;

    for i in INVESTMENT_PERIODS..n {
        let operating_result = revenue[i] - operating_cost[i] - depreciation[i];
        cf[i] = operating_result * (1.0 - params.tax_rate) + depreciation[i];
    }

    cf[n - 1] += params.terminal_recovery();

    log::debug!("Built {} cash flows, terminal recovery {:.4}", n, params.terminal_recovery());

    Ok(cf)
}
