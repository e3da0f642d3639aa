//! Project KPIs derived from cumulative cash flows
//!
//! - Payback period measured from the end of the investment phase
//! - Cash-cost ratio (nominal and discounted)
//! - Rate of return on investment (ROROI), nominal and discounted

use super::cashflows::{check_length, check_min_length, DcfParams};
use super::discount::compound_factor;
use crate::error::{EconomicsError, EconomicsResult};

/// Index of the end of the investment phase
pub const PAYBACK_BASE_IDX: usize = 2;

/// Monthly-equivalent correction subtracted from both ROROI variants
pub const ROROI_CORRECTION: f64 = 1.0 / 12.0;

/// Exponent used when discounting the working-capital/land adjustment in ROROI_d
pub const ROROI_RECOVERY_EXPONENT: usize = 12;

/// Fractional number of periods after `base_idx` until cumulative cash flow has grown
/// by `fci_net`.
///
/// Returns `f64::INFINITY` when the threshold is never reached inside the horizon.
pub fn payback_period(ccf: &[f64], fci_net: f64, base_idx: usize) -> EconomicsResult<f64> {
    check_min_length("ccf", ccf)?;
    if base_idx >= ccf.len() {
        return Err(EconomicsError::InvalidConfig(format!(
            "payback base index {} outside {} periods",
            base_idx,
            ccf.len()
        )));
    }

    let base = ccf[base_idx];
    let delta = |i: usize| ccf[i] - base;

    if delta(base_idx) >= fci_net {
        return Ok(0.0);
    }

    let recovered_at = (base_idx + 1..ccf.len()).find(|&i| delta(i) >= fci_net);

    Ok(match recovered_at {
        Some(i) => {
            let m = i - 1;
            let fraction = (fci_net - delta(m)) / (delta(i) - delta(m));
            (m - base_idx) as f64 + fraction
        }
        None => f64::INFINITY,
    })
}

/// Cash-cost ratios `(CCR, CCR_d)`.
///
/// Both use the nominal final cumulative cash flow as numerator; the discounted variant
/// swaps only the period-2 denominator for its discounted value.
pub fn cash_cost_ratios(ccf: &[f64], dccf: &[f64]) -> EconomicsResult<(f64, f64)> {
    check_min_length("ccf", ccf)?;
    check_length("dccf", dccf, ccf.len())?;

    let ccp = ccf[ccf.len() - 1];
    let ccr = 1.0 + ccp / -ccf[PAYBACK_BASE_IDX];
    let ccr_discounted = 1.0 + ccp / -dccf[PAYBACK_BASE_IDX];
    Ok((ccr, ccr_discounted))
}

/// Rate of return on investment `(ROROI, ROROI_d)` from the average slope of cumulative
/// cash flow between period 2 and the final period.
pub fn rate_of_return_on_investment(
    ccf: &[f64],
    dccf: &[f64],
    time: &[f64],
    params: &DcfParams,
) -> EconomicsResult<(f64, f64)> {
    check_min_length("ccf", ccf)?;
    let n = ccf.len();
    check_length("dccf", dccf, n)?;
    check_length("time", time, n)?;

    let last = n - 1;
    let span = time[last] - time[PAYBACK_BASE_IDX];
    let recovery = params.working_capital + params.land;
    let discounted_recovery = (params.working_capital - params.land)
        / compound_factor(params.discount_rate, ROROI_RECOVERY_EXPONENT);

    let nominal_slope = (ccf[last] - ccf[PAYBACK_BASE_IDX] - recovery) / span;
    let discounted_slope = (dccf[last] - dccf[PAYBACK_BASE_IDX] - discounted_recovery) / span;

    let roroi = nominal_slope / params.fci_net() - ROROI_CORRECTION;
    let roroi_discounted = discounted_slope / params.fci_net_discounted() - ROROI_CORRECTION;
    Ok((roroi, roroi_discounted))
}
