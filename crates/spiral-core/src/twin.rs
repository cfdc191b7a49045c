// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — Digital Twin
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Spiral concentrator digital twin.
//!
//! Runs engine → OPEX → profit/margin → KPI checks → sensitivity sweep over
//! one immutable [`TwinConfig`] snapshot. A changed parameter means a new
//! config and a fresh evaluation; nothing is cached between calls.

use serde::{Deserialize, Serialize};
use spiral_types::config::{ProcessParameters, TwinConfig};
use spiral_types::error::SpiralResult;
use spiral_types::state::{EconomicSummary, EngineResult, KpiStatus, OpexBreakdown, SweepGrid};

use crate::economics::{opex_breakdown, summarize};
use crate::engine::SpiralEngine;
use crate::kpi::check_kpis;
use crate::sweep::SensitivitySweep;

/// Everything the presentation layer needs for one parameter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwinSnapshot {
    pub process: ProcessParameters,
    pub result: EngineResult,
    pub economics: EconomicSummary,
    pub opex: OpexBreakdown,
    pub kpi: KpiStatus,
    pub heatmap: SweepGrid,
}

pub struct SpiralTwin {
    config: TwinConfig,
    engine: SpiralEngine,
    parallel_sweep: bool,
}

impl SpiralTwin {
    /// Validate the snapshot and bind an engine to its mineral table.
    pub fn from_config(config: TwinConfig) -> SpiralResult<Self> {
        config.validate()?;
        let engine = SpiralEngine::new(config.minerals.clone())?;
        Ok(SpiralTwin {
            config,
            engine,
            parallel_sweep: false,
        })
    }

    /// Load and validate a JSON twin configuration.
    pub fn from_file(path: &str) -> SpiralResult<Self> {
        Self::from_config(TwinConfig::from_file(path)?)
    }

    /// Fill the sweep grid on the rayon pool.
    pub fn with_parallel_sweep(mut self, parallel: bool) -> Self {
        self.parallel_sweep = parallel;
        self
    }

    pub fn config(&self) -> &TwinConfig {
        &self.config
    }

    pub fn engine(&self) -> &SpiralEngine {
        &self.engine
    }

    /// Point estimate plus heatmap for the current snapshot.
    pub fn evaluate(&self) -> SpiralResult<TwinSnapshot> {
        let cfg = &self.config;
        let feed = cfg.process.feed_rate_tph;

        let result = self
            .engine
            .evaluate_point(&cfg.process, &cfg.recovery_targets, &cfg.economics)?;
        let economics = summarize(&result, &cfg.economics.opex, feed);
        let opex = opex_breakdown(&cfg.economics.opex, feed);
        let kpi = check_kpis(&cfg.process, &economics, &result, &cfg.kpi);

        let sweep = SensitivitySweep::new(&self.engine, cfg.sweep.clone())?;
        let heatmap = if self.parallel_sweep {
            sweep.run_parallel(
                &cfg.recovery_targets,
                &cfg.economics.prices,
                cfg.process.feed_d80_um,
                &cfg.economics.opex,
            )?
        } else {
            sweep.run(
                &cfg.recovery_targets,
                &cfg.economics.prices,
                cfg.process.feed_d80_um,
                &cfg.economics.opex,
            )?
        };

        log::info!(
            "Twin evaluated: feed={feed:.1} t/h conc={:.2} t/h revenue={:.2} $/h profit={:.2} $/h margin={:.1}%",
            result.concentrate_tph,
            economics.total_revenue_per_hr,
            economics.profit_per_hr,
            economics.margin_pct
        );

        Ok(TwinSnapshot {
            process: cfg.process.clone(),
            result,
            economics,
            opex,
            kpi,
            heatmap,
        })
    }
}
