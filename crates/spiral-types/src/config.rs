// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ensure_finite, ensure_in_range, SpiralError, SpiralResult};
use crate::mineral::{MineralTable, MineralValues};

/// Top-level twin configuration: one immutable parameter snapshot.
/// Every section falls back to the plant's initial dashboard values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwinConfig {
    #[serde(default)]
    pub minerals: MineralTable,
    #[serde(default)]
    pub process: ProcessParameters,
    #[serde(default)]
    pub recovery_targets: RecoveryTargets,
    #[serde(default)]
    pub economics: EconomicParameters,
    #[serde(default)]
    pub kpi: KpiTargets,
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Feed conditions and spiral mechanics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessParameters {
    /// Feed rate [t/h].
    #[serde(default = "default_feed_rate")]
    pub feed_rate_tph: f64,
    /// Slurry solids [%]. Carried through; no model term uses it yet.
    #[serde(default = "default_solids")]
    pub solids_pct: f64,
    /// Feed particle size d80 [µm].
    #[serde(default = "default_d80")]
    pub feed_d80_um: f64,
    /// Splitter position, 0 = tight .. 2 = wide.
    #[serde(default = "default_splitter")]
    pub splitter_position: f64,
}

fn default_feed_rate() -> f64 {
    DEFAULT_FEED_RATE_TPH
}
fn default_solids() -> f64 {
    DEFAULT_SOLIDS_PCT
}
fn default_d80() -> f64 {
    DEFAULT_FEED_D80_UM
}
fn default_splitter() -> f64 {
    DEFAULT_SPLITTER_POSITION
}

impl Default for ProcessParameters {
    fn default() -> Self {
        ProcessParameters {
            feed_rate_tph: default_feed_rate(),
            solids_pct: default_solids(),
            feed_d80_um: default_d80(),
            splitter_position: default_splitter(),
        }
    }
}

impl ProcessParameters {
    /// Splitter values outside [0, 2] are accepted; the mass pull extrapolates.
    pub fn validate(&self) -> SpiralResult<()> {
        validate_feed_rate(self.feed_rate_tph)?;
        ensure_in_range("solids_pct", self.solids_pct, 0.0, 100.0, "[0, 100]")?;
        ensure_finite("feed_d80_um", self.feed_d80_um)?;
        ensure_finite("splitter_position", self.splitter_position)?;
        Ok(())
    }
}

pub fn validate_feed_rate(feed_rate_tph: f64) -> SpiralResult<f64> {
    ensure_in_range("feed_rate_tph", feed_rate_tph, 0.0, f64::MAX, ">= 0")
}

/// User-overridable recovery [%] per mineral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecoveryTargets(pub MineralValues);

impl RecoveryTargets {
    /// Base recoveries of `table`.
    pub fn from_table(table: &MineralTable) -> Self {
        RecoveryTargets(table.base_recoveries())
    }

    pub fn get(&self, mineral: &str) -> Option<f64> {
        self.0.get(mineral).copied()
    }

    /// Override one mineral's target, returning the updated set.
    pub fn with(mut self, mineral: &str, recovery_pct: f64) -> Self {
        self.0.insert(mineral.to_string(), recovery_pct);
        self
    }

    pub fn values(&self) -> &MineralValues {
        &self.0
    }

    pub fn validate(&self, table: &MineralTable) -> SpiralResult<()> {
        table.check_keys("recovery targets", &self.0)?;
        for (name, &rec) in &self.0 {
            ensure_in_range(&format!("recovery[{name}]"), rec, 0.0, 100.0, "[0, 100]")?;
        }
        Ok(())
    }
}

impl Default for RecoveryTargets {
    fn default() -> Self {
        Self::from_table(&MineralTable::reference())
    }
}

/// Market prices and operating cost inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicParameters {
    /// Unit price per mineral, in the mineral's price unit.
    #[serde(default = "default_prices")]
    pub prices: MineralValues,
    #[serde(default)]
    pub opex: OpexParameters,
}

fn default_prices() -> MineralValues {
    MineralTable::reference().default_prices()
}

impl Default for EconomicParameters {
    fn default() -> Self {
        EconomicParameters {
            prices: default_prices(),
            opex: OpexParameters::default(),
        }
    }
}

impl EconomicParameters {
    pub fn validate(&self, table: &MineralTable) -> SpiralResult<()> {
        validate_prices(table, &self.prices)?;
        self.opex.validate()
    }
}

pub fn validate_prices(table: &MineralTable, prices: &MineralValues) -> SpiralResult<()> {
    table.check_keys("prices", prices)?;
    for (name, &price) in prices {
        ensure_finite(&format!("price[{name}]"), price)?;
    }
    Ok(())
}

/// Hourly operating cost line items. Only mining cost scales with throughput.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpexParameters {
    #[serde(default = "default_labour")]
    pub labour_per_hr: f64,
    /// Installed power [kW], charged as a fixed hourly load.
    #[serde(default = "default_power_kw")]
    pub power_kw: f64,
    #[serde(default = "default_power_rate")]
    pub power_rate_per_kwh: f64,
    #[serde(default = "default_water")]
    pub water_per_hr: f64,
    #[serde(default = "default_maintenance")]
    pub maintenance_per_hr: f64,
    /// Mining cost per processed ton.
    #[serde(default = "default_mining_cost")]
    pub mining_cost_per_ton: f64,
    #[serde(default = "default_lease_tax")]
    pub lease_tax_per_hr: f64,
}

fn default_labour() -> f64 {
    DEFAULT_LABOUR_PER_HR
}
fn default_power_kw() -> f64 {
    DEFAULT_POWER_KW
}
fn default_power_rate() -> f64 {
    DEFAULT_POWER_RATE_PER_KWH
}
fn default_water() -> f64 {
    DEFAULT_WATER_PER_HR
}
fn default_maintenance() -> f64 {
    DEFAULT_MAINTENANCE_PER_HR
}
fn default_mining_cost() -> f64 {
    DEFAULT_MINING_COST_PER_TON
}
fn default_lease_tax() -> f64 {
    DEFAULT_LEASE_TAX_PER_HR
}

impl Default for OpexParameters {
    fn default() -> Self {
        OpexParameters {
            labour_per_hr: default_labour(),
            power_kw: default_power_kw(),
            power_rate_per_kwh: default_power_rate(),
            water_per_hr: default_water(),
            maintenance_per_hr: default_maintenance(),
            mining_cost_per_ton: default_mining_cost(),
            lease_tax_per_hr: default_lease_tax(),
        }
    }
}

impl OpexParameters {
    pub fn validate(&self) -> SpiralResult<()> {
        let items = [
            ("labour_per_hr", self.labour_per_hr),
            ("power_kw", self.power_kw),
            ("power_rate_per_kwh", self.power_rate_per_kwh),
            ("water_per_hr", self.water_per_hr),
            ("maintenance_per_hr", self.maintenance_per_hr),
            ("mining_cost_per_ton", self.mining_cost_per_ton),
            ("lease_tax_per_hr", self.lease_tax_per_hr),
        ];
        for (name, value) in items {
            ensure_in_range(name, value, 0.0, f64::MAX, ">= 0")?;
        }
        Ok(())
    }
}

/// Targets the live values are checked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiTargets {
    #[serde(default = "default_target_throughput")]
    pub throughput_tph: f64,
    #[serde(default = "default_target_margin")]
    pub margin_pct: f64,
    #[serde(default = "default_target_profit")]
    pub profit_per_hr: f64,
    /// Minimum concentrate grade per mineral, in the mineral's grade unit.
    #[serde(default = "default_grade_targets")]
    pub grade_targets: MineralValues,
}

fn default_target_throughput() -> f64 {
    DEFAULT_TARGET_THROUGHPUT_TPH
}
fn default_target_margin() -> f64 {
    DEFAULT_TARGET_MARGIN_PCT
}
fn default_target_profit() -> f64 {
    DEFAULT_TARGET_PROFIT_PER_HR
}
fn default_grade_targets() -> MineralValues {
    MineralTable::reference()
        .iter()
        .map(|m| (m.name.clone(), DEFAULT_TARGET_GRADE))
        .collect()
}

impl Default for KpiTargets {
    fn default() -> Self {
        KpiTargets {
            throughput_tph: default_target_throughput(),
            margin_pct: default_target_margin(),
            profit_per_hr: default_target_profit(),
            grade_targets: default_grade_targets(),
        }
    }
}

impl KpiTargets {
    pub fn validate(&self, table: &MineralTable) -> SpiralResult<()> {
        ensure_finite("target throughput_tph", self.throughput_tph)?;
        ensure_finite("target margin_pct", self.margin_pct)?;
        ensure_finite("target profit_per_hr", self.profit_per_hr)?;
        table.check_keys("grade targets", &self.grade_targets)?;
        for (name, &grade) in &self.grade_targets {
            ensure_finite(&format!("grade_target[{name}]"), grade)?;
        }
        Ok(())
    }
}

/// Evenly spaced sensitivity axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_sweep_feed_min")]
    pub feed_rate_min: f64,
    #[serde(default = "default_sweep_feed_max")]
    pub feed_rate_max: f64,
    #[serde(default = "default_sweep_samples")]
    pub feed_rate_samples: usize,
    #[serde(default = "default_sweep_split_min")]
    pub splitter_min: f64,
    #[serde(default = "default_sweep_split_max")]
    pub splitter_max: f64,
    #[serde(default = "default_sweep_samples")]
    pub splitter_samples: usize,
}

fn default_sweep_feed_min() -> f64 {
    SWEEP_FEED_RATE_MIN
}
fn default_sweep_feed_max() -> f64 {
    SWEEP_FEED_RATE_MAX
}
fn default_sweep_split_min() -> f64 {
    SWEEP_SPLITTER_MIN
}
fn default_sweep_split_max() -> f64 {
    SWEEP_SPLITTER_MAX
}
fn default_sweep_samples() -> usize {
    SWEEP_SAMPLES
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            feed_rate_min: default_sweep_feed_min(),
            feed_rate_max: default_sweep_feed_max(),
            feed_rate_samples: default_sweep_samples(),
            splitter_min: default_sweep_split_min(),
            splitter_max: default_sweep_split_max(),
            splitter_samples: default_sweep_samples(),
        }
    }
}

impl SweepConfig {
    /// Default axes with both sample counts set to `samples`.
    pub fn with_samples(feed_rate_samples: usize, splitter_samples: usize) -> Self {
        SweepConfig {
            feed_rate_samples,
            splitter_samples,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SpiralResult<()> {
        check_axis(
            "feed_rate",
            self.feed_rate_min,
            self.feed_rate_max,
            self.feed_rate_samples,
        )?;
        if self.feed_rate_min < 0.0 {
            return Err(SpiralError::InvalidSweep {
                axis: "feed_rate",
                message: format!("minimum {} is negative", self.feed_rate_min),
            });
        }
        check_axis(
            "splitter",
            self.splitter_min,
            self.splitter_max,
            self.splitter_samples,
        )
    }
}

fn check_axis(axis: &'static str, min: f64, max: f64, samples: usize) -> SpiralResult<()> {
    if samples == 0 {
        return Err(SpiralError::InvalidSweep {
            axis,
            message: "sample count must be at least 1".to_string(),
        });
    }
    if !min.is_finite() || !max.is_finite() {
        return Err(SpiralError::InvalidSweep {
            axis,
            message: format!("bounds must be finite, got [{min}, {max}]"),
        });
    }
    if min > max {
        return Err(SpiralError::InvalidSweep {
            axis,
            message: format!("minimum {min} exceeds maximum {max}"),
        });
    }
    Ok(())
}

impl TwinConfig {
    /// Load from a JSON file. Missing sections take their defaults.
    pub fn from_file(path: &str) -> SpiralResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> SpiralResult<()> {
        self.minerals.validate()?;
        self.process.validate()?;
        self.recovery_targets.validate(&self.minerals)?;
        self.economics.validate(&self.minerals)?;
        self.kpi.validate(&self.minerals)?;
        self.sweep.validate()
    }
}
