//! Discounted cash flow rate of return (DCFROR) by grid scan
//!
//! NPV is evaluated on an evenly spaced grid of discount rates and the first
//! positive-to-negative transition is located by linear interpolation. Resolution is
//! bounded by the grid spacing; this is not an iterative root solver.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::discount::npv_at_rate;

/// NPV profile over a grid of discount rates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateScan {
    /// Scanned discount rates, increasing
    pub rates: Vec<f64>,

    /// NPV at each scanned rate
    pub npv: Vec<f64>,

    /// Interpolated zero crossing, if NPV turns from positive to negative in range
    pub crossing: Option<f64>,
}

impl RateScan {
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Grid spacing, or None with fewer than two points
    pub fn step(&self) -> Option<f64> {
        match self.rates.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }
}

/// `points` evenly spaced rates over `[rate_min, rate_max]`, both ends included
pub fn rate_grid(rate_min: f64, rate_max: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![rate_min],
        _ => {
            let step = (rate_max - rate_min) / (points - 1) as f64;
            let mut rates: Vec<f64> = (0..points).map(|j| rate_min + step * j as f64).collect();
            rates[points - 1] = rate_max;
            rates
        }
    }
}

/// First strict positive-to-negative transition, linearly interpolated
fn find_crossing(rates: &[f64], npv: &[f64]) -> Option<f64> {
    rates
        .windows(2)
        .zip(npv.windows(2))
        .find(|(_, y)| y[0] > 0.0 && y[1] < 0.0)
        .map(|(x, y)| {
            let (x1, x2) = (x[0], x[1]);
            let (y1, y2) = (y[0], y[1]);
            x1 + (x1 - x2) / (y1 - y2) * (-y1)
        })
}

/// Scan NPV over `n_points` rates in `[rate_min, rate_max]` and locate the DCFROR.
///
/// NPVs are evaluated in parallel; each rate is independent so the output is identical
/// to a sequential sweep.
pub fn scan_rate_of_return(cash_flows: &[f64], rate_min: f64, rate_max: f64, n_points: usize) -> RateScan {
    let rates = rate_grid(rate_min, rate_max, n_points);
    let npv: Vec<f64> = rates.par_iter().map(|&r| npv_at_rate(cash_flows, r)).collect();
    let crossing = find_crossing(&rates, &npv);

    log::debug!(
        "Scanned {} rates in [{}, {}]: crossing {:?}",
        rates.len(),
        rate_min,
        rate_max,
        crossing
    );

    RateScan { rates, npv, crossing }
}
