//! Run configuration for a project evaluation
//!
//! A single immutable record built from defaults, an optional JSON file and explicit
//! overrides, then threaded through every component call.

mod sequences;

pub use sequences::PeriodSequences;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::depreciation::{DepreciationBasis, DEFAULT_DECLINING_FACTOR};
use crate::error::{EconomicsError, EconomicsResult};
use crate::finance::DcfParams;

/// Project economics configuration
///
/// JSON files may use either the field names below or the worksheet-style short keys
/// (`FCI_L1`, `intr`, `t`, `R_scalar`, ...). Missing keys keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicsConfig {
    /// First fixed capital tranche (period 1)
    #[serde(alias = "FCI_L1")]
    pub fci_l1: f64,

    /// Second fixed capital tranche (period 2)
    #[serde(alias = "FCI_L2")]
    pub fci_l2: f64,

    /// Land cost (period 0, recovered at the end)
    #[serde(alias = "L")]
    pub land: f64,

    /// Working capital (period 2, recovered at the end)
    #[serde(alias = "WC")]
    pub working_capital: f64,

    /// Salvage value of the fixed capital
    #[serde(alias = "S")]
    pub salvage: f64,

    /// Discount rate (fraction)
    #[serde(alias = "intr")]
    pub discount_rate: f64,

    /// Tax rate (fraction)
    #[serde(alias = "t")]
    pub tax_rate: f64,

    /// Flat revenue per period
    #[serde(alias = "R_scalar")]
    pub revenue_per_period: f64,

    /// Flat operating cost per period
    #[serde(alias = "COM_scalar")]
    pub operating_cost_per_period: f64,

    /// Planned depreciation life in years
    pub life_years: usize,

    /// First period carrying a depreciation charge
    pub depr_start_idx: usize,

    /// Total number of periods
    pub periods: usize,

    /// Declining-balance factor (2.0 = double-declining)
    #[serde(alias = "ddb_factor")]
    pub declining_balance_factor: f64,

    /// Lowest discount rate in the DCFROR scan
    pub irr_scan_min: f64,

    /// Highest discount rate in the DCFROR scan
    pub irr_scan_max: f64,

    /// Number of grid points in the DCFROR scan
    pub irr_scan_points: usize,
}

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            fci_l1: 175.0,
            fci_l2: 125.0,
            land: 10.0,
            working_capital: 20.0,
            salvage: 10.0,
            discount_rate: 0.08,
            tax_rate: 0.25,
            revenue_per_period: 110.0,
            operating_cost_per_period: 30.0,
            // Periods 3..9 carry planned charges, period 10 writes off the rest
            life_years: 7,
            depr_start_idx: 3,
            periods: 13,
            declining_balance_factor: DEFAULT_DECLINING_FACTOR,
            irr_scan_min: 0.05,
            irr_scan_max: 0.30,
            irr_scan_points: 10_000,
        }
    }
}

impl EconomicsConfig {
    /// Parse a JSON document, filling unspecified fields from defaults
    pub fn from_json_str(json: &str) -> EconomicsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> EconomicsResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Depreciation inputs derived from this configuration
    pub fn depreciation_basis(&self) -> DepreciationBasis {
        DepreciationBasis {
            cost_l1: self.fci_l1,
            cost_l2: self.fci_l2,
            salvage: self.salvage,
            periods: self.periods,
            life_years: self.life_years,
            start_idx: self.depr_start_idx,
        }
    }

    /// Cash flow engine inputs derived from this configuration
    pub fn dcf_params(&self) -> DcfParams {
        DcfParams {
            discount_rate: self.discount_rate,
            tax_rate: self.tax_rate,
            fci_l1: self.fci_l1,
            fci_l2: self.fci_l2,
            working_capital: self.working_capital,
            salvage: self.salvage,
            land: self.land,
        }
    }

    /// Rate-of-return scan range as `(min, max, points)`
    pub fn scan_bounds(&self) -> (f64, f64, usize) {
        (self.irr_scan_min, self.irr_scan_max, self.irr_scan_points)
    }

    /// Check every derived parameter record and the scan bounds
    pub fn validate(&self) -> EconomicsResult<()> {
        self.dcf_params().validate()?;
        self.depreciation_basis().validate()?;

        if !self.revenue_per_period.is_finite() || !self.operating_cost_per_period.is_finite() {
            return Err(EconomicsError::InvalidConfig(
                "per-period revenue and operating cost must be finite".to_string(),
            ));
        }
        if !self.irr_scan_min.is_finite() || !self.irr_scan_max.is_finite() {
            return Err(EconomicsError::InvalidConfig("scan bounds must be finite".to_string()));
        }
        if self.irr_scan_min <= -1.0 {
            return Err(EconomicsError::InvalidConfig(format!(
                "irr_scan_min must exceed -1, got {}",
                self.irr_scan_min
            )));
        }
        if self.irr_scan_min > self.irr_scan_max {
            return Err(EconomicsError::InvalidConfig(format!(
                "irr_scan_min {} exceeds irr_scan_max {}",
                self.irr_scan_min, self.irr_scan_max
            )));
        }
        if self.irr_scan_points == 0 {
            return Err(EconomicsError::InvalidConfig(
                "irr_scan_points must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Optional per-field replacements applied on top of a base configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub fci_l1: Option<f64>,
    pub fci_l2: Option<f64>,
    pub land: Option<f64>,
    pub working_capital: Option<f64>,
    pub salvage: Option<f64>,
    pub discount_rate: Option<f64>,
    pub tax_rate: Option<f64>,
    pub revenue_per_period: Option<f64>,
    pub operating_cost_per_period: Option<f64>,
    pub life_years: Option<usize>,
    pub depr_start_idx: Option<usize>,
    pub periods: Option<usize>,
    pub declining_balance_factor: Option<f64>,
    pub irr_scan_min: Option<f64>,
    pub irr_scan_max: Option<f64>,
    pub irr_scan_points: Option<usize>,
}

impl ConfigOverrides {
    /// Produce a new configuration with every present override applied
    pub fn apply(&self, base: &EconomicsConfig) -> EconomicsConfig {
        EconomicsConfig {
            fci_l1: self.fci_l1.unwrap_or(base.fci_l1),
            fci_l2: self.fci_l2.unwrap_or(base.fci_l2),
            land: self.land.unwrap_or(base.land),
            working_capital: self.working_capital.unwrap_or(base.working_capital),
            salvage: self.salvage.unwrap_or(base.salvage),
            discount_rate: self.discount_rate.unwrap_or(base.discount_rate),
            tax_rate: self.tax_rate.unwrap_or(base.tax_rate),
            revenue_per_period: self.revenue_per_period.unwrap_or(base.revenue_per_period),
            operating_cost_per_period: self
                .operating_cost_per_period
                .unwrap_or(base.operating_cost_per_period),
            life_years: self.life_years.unwrap_or(base.life_years),
            depr_start_idx: self.depr_start_idx.unwrap_or(base.depr_start_idx),
            periods: self.periods.unwrap_or(base.periods),
            declining_balance_factor: self
                .declining_balance_factor
                .unwrap_or(base.declining_balance_factor),
            irr_scan_min: self.irr_scan_min.unwrap_or(base.irr_scan_min),
            irr_scan_max: self.irr_scan_max.unwrap_or(base.irr_scan_max),
            irr_scan_points: self.irr_scan_points.unwrap_or(base.irr_scan_points),
        }
    }
}
