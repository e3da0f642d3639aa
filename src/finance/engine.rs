//! Discounted cash flow engine: cash flows, discounting, cumulation and KPIs in one pass

use serde::{Deserialize, Serialize};

use super::cashflows::{build_cash_flows, DcfParams};
use super::discount::{cumulative, discount};
use super::metrics::{cash_cost_ratios, payback_period, rate_of_return_on_investment, PAYBACK_BASE_IDX};
use crate::error::EconomicsResult;

/// Complete DCF result for one set of inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcfResult {
    /// Undiscounted cash flow per period
    pub cf: Vec<f64>,

    /// Discounted cash flow per period
    pub dcf: Vec<f64>,

    /// Cumulative cash flow
    pub ccf: Vec<f64>,

    /// Discounted cumulative cash flow
    pub dccf: Vec<f64>,

    /// Period times (0, 1, ..., n-1)
    pub time: Vec<f64>,

    /// Net present value (final DCCF)
    pub npv: f64,

    /// Cumulative cash position (final CCF)
    pub ccp: f64,

    /// Total fixed capital investment
    pub fci_net: f64,

    /// Fixed capital investment discounted to period 0
    pub fci_net_discounted: f64,

    /// Payback period in periods after period 2; infinite when never reached
    pub payback_period: f64,

    pub ccr: f64,
    pub ccr_discounted: f64,
    pub roroi: f64,
    pub roroi_discounted: f64,
}

impl DcfResult {
    pub fn periods(&self) -> usize {
        self.cf.len()
    }

    /// Whether fixed investment is recovered inside the horizon
    pub fn payback_reached(&self) -> bool {
        self.payback_period.is_finite()
    }

    /// Payback period, or None when never reached
    pub fn payback(&self) -> Option<f64> {
        self.payback_reached().then_some(self.payback_period)
    }
}

/// Run the DCF engine over per-period revenue, operating cost and depreciation
pub fn run_dcf(
    revenue: &[f64],
    operating_cost: &[f64],
    depreciation: &[f64],
    params: &DcfParams,
) -> EconomicsResult<DcfResult> {
    params.validate()?;

    let cf = build_cash_flows(revenue, operating_cost, depreciation, params)?;
    let n = cf.len();

    let dcf = discount(&cf, params.discount_rate);
    let ccf = cumulative(&cf);
    let dccf = cumulative(&dcf);
    let time: Vec<f64> = (0..n).map(|i| i as f64).collect();

    let npv = dccf[n - 1];
    let ccp = ccf[n - 1];
    let fci_net = params.fci_net();
    let fci_net_discounted = params.fci_net_discounted();

    let payback_period = payback_period(&ccf, fci_net, PAYBACK_BASE_IDX)?;
    let (ccr, ccr_discounted) = cash_cost_ratios(&ccf, &dccf)?;
    let (roroi, roroi_discounted) = rate_of_return_on_investment(&ccf, &dccf, &time, params)?;

    log::debug!(
        "DCF over {} periods: NPV {:.4}, CCP {:.4}, PBP {}",
        n,
        npv,
        ccp,
        payback_period
    );

    Ok(DcfResult {
        cf,
        dcf,
        ccf,
        dccf,
        time,
        npv,
        ccp,
        fci_net,
        fci_net_discounted,
        payback_period,
        ccr,
        ccr_discounted,
        roroi,
        roroi_discounted,
    })
}
