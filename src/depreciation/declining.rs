//! Declining-balance depreciation with a switch-to-straight-line cap

use super::{DepreciationBasis, DepreciationStrategy};
use crate::error::{EconomicsError, EconomicsResult};

/// Default factor (double-declining balance)
pub const DEFAULT_DECLINING_FACTOR: f64 = 2.0;

/// Declining-balance strategy.
///
/// Each planned year charges `factor / life` of the opening book value, capped at the
/// straight-line amount that reaches salvage over the remaining planned years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecliningBalance {
    factor: f64,
}

impl DecliningBalance {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Double-declining balance
    pub fn double() -> Self {
        Self::new(DEFAULT_DECLINING_FACTOR)
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Annual declining-balance rate for a given life
    pub fn rate(&self, life_years: usize) -> f64 {
        self.factor / life_years as f64
    }
}

impl Default for DecliningBalance {
    fn default() -> Self {
        Self::double()
    }
}

impl DepreciationStrategy for DecliningBalance {
    fn name(&self) -> &'static str {
        "DDB"
    }

    fn validate(&self, _basis: &DepreciationBasis) -> EconomicsResult<()> {
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(EconomicsError::InvalidConfig(format!(
                "declining-balance factor must be positive, got {}",
                self.factor
            )));
        }
        Ok(())
    }

    fn planned_charge(&self, year: usize, opening_book_value: f64, basis: &DepreciationBasis) -> f64 {
        let remaining_years = (basis.life_years - year) as f64;
        let declining = opening_book_value * self.rate(basis.life_years);
        let straight_line_cap = ((opening_book_value - basis.salvage) / remaining_years).max(0.0);
        declining.min(straight_line_cap).max(0.0)
    }
}
