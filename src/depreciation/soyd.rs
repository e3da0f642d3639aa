//! Sum-of-years-digits depreciation

use super::{DepreciationBasis, DepreciationStrategy};

/// Sum-of-years-digits strategy: year `k` of an `n`-year life takes `(n - k) / (n(n+1)/2)`
/// of the depreciable base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumOfYearsDigits;

impl SumOfYearsDigits {
    /// Sum of the digits `1 + 2 + ... + life_years`
    pub fn digits_sum(life_years: usize) -> f64 {
        let n = life_years as f64;
        n * (n + 1.0) / 2.0
    }

    /// Fraction of the depreciable base charged in `year` (0-indexed)
    pub fn weight(year: usize, life_years: usize) -> f64 {
        if year >= life_years {
            return 0.0;
        }
        (life_years - year) as f64 / Self::digits_sum(life_years)
    }
}

impl DepreciationStrategy for SumOfYearsDigits {
    fn name(&self) -> &'static str {
        "SOYD"
    }

    fn planned_charge(&self, year: usize, _opening_book_value: f64, basis: &DepreciationBasis) -> f64 {
        basis.depreciable_base() * Self::weight(year, basis.life_years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depreciation::build_schedule;
    use approx::assert_abs_diff_eq;

    fn example_basis() -> DepreciationBasis {
        DepreciationBasis {
            cost_l1: 175.0,
            cost_l2: 125.0,
            salvage: 10.0,
            periods: 13,
            life_years: 7,
            start_idx: 3,
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        for life in 1..=40 {
            let total: f64 = (0..life).map(|k| SumOfYearsDigits::weight(k, life)).sum();
            assert!((total - 1.0).abs() < 1e-12, "life {} weights sum to {}", life, total);
        }
    }

    #[test]
    fn test_example_charges() {
        let schedule = build_schedule(&SumOfYearsDigits, &example_basis()).unwrap();
        let expected = [72.5, 62.142857, 51.785714, 41.428571, 31.071429, 20.714286, 10.357143];
        for (k, &e) in expected.iter().enumerate() {
            assert_abs_diff_eq!(schedule.charges[3 + k], e, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_planned_life_charges_depreciable_base() {
        let schedule = build_schedule(&SumOfYearsDigits, &example_basis()).unwrap();
        let planned: f64 = schedule.charges[3..10].iter().sum();
        assert_abs_diff_eq!(planned, 290.0, epsilon = 1e-9);
        assert_abs_diff_eq!(schedule.book_values[9], 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_salvage_written_off_in_next_period() {
        let schedule = build_schedule(&SumOfYearsDigits, &example_basis()).unwrap();
        assert_abs_diff_eq!(schedule.charges[10], 10.0, epsilon = 1e-9);
        assert_eq!(schedule.charges[11], 0.0);
        assert_eq!(schedule.charges[12], 0.0);
    }

    #[test]
    fn test_zero_salvage_has_no_tail() {
        let mut basis = example_basis();
        basis.salvage = 0.0;
        let schedule = build_schedule(&SumOfYearsDigits, &basis).unwrap();
        assert!(schedule.charges[10] < 1e-9);
        assert_abs_diff_eq!(schedule.total_charged(), 300.0, epsilon = 1e-9);
    }
}
