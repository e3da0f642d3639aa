//! Shared book-value bookkeeping for all depreciation strategies

use serde::{Deserialize, Serialize};

use super::DepreciationStrategy;
use crate::error::{EconomicsError, EconomicsResult};

/// Period at which both capital tranches are in service and book value appears
pub const IN_SERVICE_PERIOD: usize = 2;

/// Earliest period that may carry a depreciation charge
pub const FIRST_CHARGE_PERIOD: usize = IN_SERVICE_PERIOD + 1;

/// Asset and timing inputs for a depreciation schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepreciationBasis {
    /// First capital tranche (deployed in period 1)
    pub cost_l1: f64,

    /// Second capital tranche (deployed in period 2)
    pub cost_l2: f64,

    /// Salvage value at end of life
    pub salvage: f64,

    /// Total number of periods in the horizon
    pub periods: usize,

    /// Planned depreciation life in years
    pub life_years: usize,

    /// Period index of the first planned charge
    pub start_idx: usize,
}

impl DepreciationBasis {
    /// Total depreciable cost placed in service at period 2
    pub fn cost(&self) -> f64 {
        self.cost_l1 + self.cost_l2
    }

    /// Amount spread over the planned life (cost less salvage)
    pub fn depreciable_base(&self) -> f64 {
        self.cost() - self.salvage
    }

    /// Period that receives any residual book value after the planned life
    pub fn write_off_idx(&self) -> usize {
        self.start_idx.saturating_add(self.life_years)
    }

    /// Whether the planned life plus the write-off period fits inside the horizon
    pub fn fits_horizon(&self) -> bool {
        self.write_off_idx() < self.periods
    }

    pub fn validate(&self) -> EconomicsResult<()> {
        if self.periods < FIRST_CHARGE_PERIOD {
            return Err(EconomicsError::InvalidConfig(format!(
                "periods must be at least {}, got {}",
                FIRST_CHARGE_PERIOD, self.periods
            )));
        }
        if self.life_years == 0 {
            return Err(EconomicsError::InvalidConfig(
                "life_years must be at least 1".to_string(),
            ));
        }
        if self.start_idx < FIRST_CHARGE_PERIOD {
            return Err(EconomicsError::InvalidConfig(format!(
                "depr_start_idx must be at least {} (periods 0-2 are the investment phase), got {}",
                FIRST_CHARGE_PERIOD, self.start_idx
            )));
        }
        if self.start_idx.checked_add(self.life_years).is_none() {
            return Err(EconomicsError::InvalidConfig(format!(
                "depr_start_idx {} + life_years {} overflows the period index",
                self.start_idx, self.life_years
            )));
        }
        if !self.cost_l1.is_finite() || !self.cost_l2.is_finite() || !self.salvage.is_finite() {
            return Err(EconomicsError::InvalidConfig(
                "capital costs and salvage must be finite".to_string(),
            ));
        }
        if self.salvage < 0.0 || self.salvage > self.cost() {
            return Err(EconomicsError::InvalidConfig(format!(
                "salvage {} must lie within [0, {}]",
                self.salvage,
                self.cost()
            )));
        }
        Ok(())
    }
}

/// Per-period depreciation charges with the book values they imply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationSchedule {
    /// Charge booked in each period
    pub charges: Vec<f64>,

    /// Book value at the end of each period
    pub book_values: Vec<f64>,

    /// True when the horizon cut off planned charges or the write-off period
    pub truncated: bool,
}

impl DepreciationSchedule {
    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    /// Sum of all charges inside the horizon
    pub fn total_charged(&self) -> f64 {
        self.charges.iter().sum()
    }

    /// Book value left on the books at the end of the horizon
    pub fn final_book_value(&self) -> f64 {
        self.book_values.last().copied().unwrap_or(0.0)
    }
}

/// Run one bookkeeping pass for `strategy`, producing charges and book values together.
///
/// Planned charges fall on `start_idx..start_idx + life_years`. Any book value still
/// positive after the last planned year is written off in full in the next period.
/// Charges that would land beyond the horizon are dropped and the schedule is flagged
/// as truncated.
pub fn build_schedule<S>(strategy: &S, basis: &DepreciationBasis) -> EconomicsResult<DepreciationSchedule>
where
    S: DepreciationStrategy + ?Sized,
{
    basis.validate()?;
    strategy.validate(basis)?;

    let periods = basis.periods;
    let mut charges = vec![0.0; periods];
    let mut book_values = vec![0.0; periods];
    book_values[IN_SERVICE_PERIOD] = basis.cost();

    let write_off_idx = basis.write_off_idx();

    for i in FIRST_CHARGE_PERIOD..periods {
        let opening = book_values[i - 1];

        let charge = if i >= basis.start_idx && i < write_off_idx {
            strategy
                .planned_charge(i - basis.start_idx, opening, basis)
                .max(0.0)
        } else if i == write_off_idx && opening > 0.0 {
            opening
        } else {
            0.0
        };

        charges[i] = charge;
        book_values[i] = (opening - charge).max(0.0);
    }

    let truncated = !basis.fits_horizon();
    if truncated {
        log::warn!(
            "{} schedule truncated: start {} + life {} reaches past {} periods; {:.4} of book value left undepreciated",
            strategy.name(),
            basis.start_idx,
            basis.life_years,
            periods,
            book_values[periods - 1]
        );
    }

    log::debug!(
        "{} schedule built over {} periods, total charged {:.4}",
        strategy.name(),
        periods,
        charges.iter().sum::<f64>()
    );

    Ok(DepreciationSchedule {
        charges,
        book_values,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depreciation::{DecliningBalance, SumOfYearsDigits};

    fn basis(periods: usize, life_years: usize, start_idx: usize) -> DepreciationBasis {
        DepreciationBasis {
            cost_l1: 175.0,
            cost_l2: 125.0,
            salvage: 10.0,
            periods,
            life_years,
            start_idx,
        }
    }

    fn assert_book_value_invariants(schedule: &DepreciationSchedule) {
        assert_eq!(schedule.book_values[0], 0.0);
        assert_eq!(schedule.book_values[1], 0.0);
        for i in (IN_SERVICE_PERIOD + 1)..schedule.len() {
            assert!(schedule.book_values[i] >= 0.0, "negative BV at {}", i);
            assert!(
                schedule.book_values[i] <= schedule.book_values[i - 1] + 1e-12,
                "BV increased at {}",
                i
            );
        }
        for i in 0..FIRST_CHARGE_PERIOD {
            assert_eq!(schedule.charges[i], 0.0);
        }
    }

    #[test]
    fn test_schedule_length_matches_periods() {
        for periods in [3, 5, 10, 13, 25] {
            for life in [1, 4, 7, 12] {
                let b = basis(periods, life, 3);
                let soyd = build_schedule(&SumOfYearsDigits, &b).unwrap();
                let ddb = build_schedule(&DecliningBalance::double(), &b).unwrap();
                assert_eq!(soyd.len(), periods);
                assert_eq!(soyd.book_values.len(), periods);
                assert_eq!(ddb.len(), periods);
                assert_eq!(ddb.book_values.len(), periods);
            }
        }
    }

    #[test]
    fn test_book_value_monotone_and_non_negative() {
        for start in [3, 4, 6] {
            for life in [1, 3, 7, 10] {
                let b = basis(20, life, start);
                assert_book_value_invariants(&build_schedule(&SumOfYearsDigits, &b).unwrap());
                assert_book_value_invariants(&build_schedule(&DecliningBalance::double(), &b).unwrap());
                assert_book_value_invariants(&build_schedule(&DecliningBalance::new(1.5), &b).unwrap());
            }
        }
    }

    #[test]
    fn test_book_value_consistent_with_charges() {
        let b = basis(13, 7, 3);
        let schedule = build_schedule(&DecliningBalance::double(), &b).unwrap();
        let mut bv = b.cost();
        for i in FIRST_CHARGE_PERIOD..13 {
            bv = (bv - schedule.charges[i]).max(0.0);
            assert!((schedule.book_values[i] - bv).abs() < 1e-12);
        }
    }

    #[test]
    fn test_full_life_writes_off_everything() {
        let b = basis(13, 7, 3);
        let schedule = build_schedule(&SumOfYearsDigits, &b).unwrap();
        assert!(!schedule.truncated);
        assert!((schedule.total_charged() - b.cost()).abs() < 1e-9);
        assert!(schedule.final_book_value().abs() < 1e-9);
    }

    #[test]
    fn test_delayed_start_keeps_cost_on_books() {
        let b = basis(15, 5, 6);
        let schedule = build_schedule(&SumOfYearsDigits, &b).unwrap();
        for i in 3..6 {
            assert_eq!(schedule.charges[i], 0.0);
            assert_eq!(schedule.book_values[i], 300.0);
        }
        assert!(schedule.charges[6] > 0.0);
    }

    #[test]
    fn test_short_horizon_truncates() {
        // Write-off period 10 falls exactly on the horizon
        let b = basis(10, 7, 3);
        let schedule = build_schedule(&SumOfYearsDigits, &b).unwrap();
        assert!(schedule.truncated);
        assert_eq!(schedule.len(), 10);
        assert!((schedule.final_book_value() - 10.0).abs() < 1e-9);

        // Planned life itself runs past the horizon
        let b = basis(6, 7, 3);
        let schedule = build_schedule(&DecliningBalance::double(), &b).unwrap();
        assert!(schedule.truncated);
        assert_eq!(schedule.len(), 6);
        assert!(schedule.final_book_value() > 10.0);
    }

    #[test]
    fn test_rejects_invalid_basis() {
        assert!(build_schedule(&SumOfYearsDigits, &basis(2, 7, 3)).is_err());
        assert!(build_schedule(&SumOfYearsDigits, &basis(13, 0, 3)).is_err());
        assert!(build_schedule(&SumOfYearsDigits, &basis(13, 7, 2)).is_err());

        let mut b = basis(13, 7, 3);
        b.salvage = 400.0;
        assert!(matches!(
            build_schedule(&SumOfYearsDigits, &b),
            Err(EconomicsError::InvalidConfig(_))
        ));

        b.salvage = -1.0;
        assert!(build_schedule(&SumOfYearsDigits, &b).is_err());

        b.salvage = f64::NAN;
        assert!(build_schedule(&SumOfYearsDigits, &b).is_err());
    }

    #[test]
    fn test_rejects_life_overflowing_period_index() {
        let b = basis(13, usize::MAX, 3);
        assert!(matches!(b.validate(), Err(EconomicsError::InvalidConfig(_))));
        assert!(build_schedule(&SumOfYearsDigits, &b).is_err());
        assert!(build_schedule(&DecliningBalance::double(), &b).is_err());

        // Unvalidated basis still reports the schedule as not fitting
        assert_eq!(b.write_off_idx(), usize::MAX);
        assert!(!b.fits_horizon());
    }

    #[test]
    fn test_long_life_within_index_range_truncates() {
        let b = basis(13, usize::MAX - 3, 3);
        let schedule = build_schedule(&SumOfYearsDigits, &b).unwrap();
        assert!(schedule.truncated);
        assert_eq!(schedule.len(), 13);
    }
}
