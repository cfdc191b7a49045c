// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — Sensitivity Sweep
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Profitability surface over feed rate and splitter position.
//!
//! Each cell re-runs the engine at (feed_rate_axis[i], splitter_axis[j]) and
//! subtracts the OPEX at that feed rate. Cells are independent; the parallel
//! variant writes each one to its pre-determined index.

use ndarray::{Array1, Array2};
use rayon::prelude::*;
use spiral_types::config::{OpexParameters, RecoveryTargets, SweepConfig};
use spiral_types::error::{ensure_finite, SpiralError, SpiralResult};
use spiral_types::mineral::MineralValues;
use spiral_types::state::SweepGrid;

use crate::economics::total_opex;
use crate::engine::SpiralEngine;

/// Evenly spaced (feed rate, splitter) axes.
pub fn sweep_axes(config: &SweepConfig) -> (Array1<f64>, Array1<f64>) {
    (
        Array1::linspace(
            config.feed_rate_min,
            config.feed_rate_max,
            config.feed_rate_samples,
        ),
        Array1::linspace(
            config.splitter_min,
            config.splitter_max,
            config.splitter_samples,
        ),
    )
}

/// Grid sweep bound to an engine and axis configuration.
#[derive(Debug, Clone)]
pub struct SensitivitySweep<'a> {
    engine: &'a SpiralEngine,
    config: SweepConfig,
}

impl<'a> SensitivitySweep<'a> {
    pub fn new(engine: &'a SpiralEngine, config: SweepConfig) -> SpiralResult<Self> {
        config.validate()?;
        Ok(SensitivitySweep { engine, config })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Sequential sweep.
    pub fn run(
        &self,
        targets: &RecoveryTargets,
        prices: &MineralValues,
        feed_d80_um: f64,
        opex: &OpexParameters,
    ) -> SpiralResult<SweepGrid> {
        self.check_inputs(targets, prices, feed_d80_um, opex)?;
        let (feed_axis, split_axis) = sweep_axes(&self.config);
        let shape = (feed_axis.len(), split_axis.len());
        log::debug!("Sequential sweep {}x{} at d80={feed_d80_um}", shape.0, shape.1);

        let profit = Array2::from_shape_fn(shape, |(i, j)| {
            self.cell_profit(
                feed_axis[i],
                split_axis[j],
                targets,
                prices,
                feed_d80_um,
                opex,
            )
        });

        Ok(SweepGrid {
            profit,
            feed_rate_axis: feed_axis,
            splitter_axis: split_axis,
        })
    }

    /// Parallel sweep over the rayon pool. Same grid as [`Self::run`].
    pub fn run_parallel(
        &self,
        targets: &RecoveryTargets,
        prices: &MineralValues,
        feed_d80_um: f64,
        opex: &OpexParameters,
    ) -> SpiralResult<SweepGrid> {
        self.check_inputs(targets, prices, feed_d80_um, opex)?;
        let (feed_axis, split_axis) = sweep_axes(&self.config);
        let (nf, ns) = (feed_axis.len(), split_axis.len());
        log::debug!(
            "Parallel sweep {nf}x{ns} on {} threads",
            rayon::current_num_threads()
        );

        let cells: Vec<f64> = (0..nf * ns)
            .into_par_iter()
            .map(|k| {
                let (i, j) = (k / ns, k % ns);
                self.cell_profit(
                    feed_axis[i],
                    split_axis[j],
                    targets,
                    prices,
                    feed_d80_um,
                    opex,
                )
            })
            .collect();

        let profit =
            Array2::from_shape_vec((nf, ns), cells).map_err(|e| SpiralError::InvalidSweep {
                axis: "grid",
                message: e.to_string(),
            })?;

        Ok(SweepGrid {
            profit,
            feed_rate_axis: feed_axis,
            splitter_axis: split_axis,
        })
    }

    /// Profit [$/h] of one grid cell.
    fn cell_profit(
        &self,
        feed_rate_tph: f64,
        splitter_position: f64,
        targets: &RecoveryTargets,
        prices: &MineralValues,
        feed_d80_um: f64,
        opex: &OpexParameters,
    ) -> f64 {
        let revenue = self
            .engine
            .evaluate_unchecked(feed_rate_tph, targets, prices, splitter_position, feed_d80_um)
            .total_revenue_per_hr;
        revenue - total_opex(opex, feed_rate_tph)
    }

    fn check_inputs(
        &self,
        targets: &RecoveryTargets,
        prices: &MineralValues,
        feed_d80_um: f64,
        opex: &OpexParameters,
    ) -> SpiralResult<()> {
        ensure_finite("feed_d80_um", feed_d80_um)?;
        opex.validate()?;
        // Axis bounds were validated in new(); probe the lower corner.
        self.engine.validate_inputs(
            self.config.feed_rate_min,
            targets,
            prices,
            self.config.splitter_min,
            feed_d80_um,
        )
    }
}

/// Sequential sweep with the given axis configuration.
pub fn sweep(
    engine: &SpiralEngine,
    config: &SweepConfig,
    targets: &RecoveryTargets,
    prices: &MineralValues,
    feed_d80_um: f64,
    opex: &OpexParameters,
) -> SpiralResult<SweepGrid> {
    SensitivitySweep::new(engine, config.clone())?.run(targets, prices, feed_d80_um, opex)
}

/// Parallel sweep with the given axis configuration.
pub fn sweep_parallel(
    engine: &SpiralEngine,
    config: &SweepConfig,
    targets: &RecoveryTargets,
    prices: &MineralValues,
    feed_d80_um: f64,
    opex: &OpexParameters,
) -> SpiralResult<SweepGrid> {
    SensitivitySweep::new(engine, config.clone())?
        .run_parallel(targets, prices, feed_d80_um, opex)
}
