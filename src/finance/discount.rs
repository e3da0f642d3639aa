//! Present-value and running-total transforms over per-period sequences

/// Growth of one unit from period 0 to `period` at `rate`
pub fn compound_factor(rate: f64, period: usize) -> f64 {
    (1.0 + rate).powi(period as i32)
}

/// Present value of each element, indexed from period 0
pub fn discount(values: &[f64], rate: f64) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| v / compound_factor(rate, i))
        .collect()
}

/// Running total in period order
pub fn cumulative(values: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    values
        .iter()
        .map(|&v| {
            total += v;
            total
        })
        .collect()
}

pub fn discounted_cumulative(values: &[f64], rate: f64) -> Vec<f64> {
    cumulative(&discount(values, rate))
}

/// Net present value of a cash flow sequence at `rate`
pub fn npv_at_rate(values: &[f64], rate: f64) -> f64 {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| v / compound_factor(rate, i))
        .sum()
}
