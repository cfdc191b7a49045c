// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — Recovery/Economics Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Spiral concentrator recovery, grade and revenue model.
//!
//! Maps feed rate, splitter position and feed d80 plus per-mineral recovery
//! targets and prices to a per-mineral result table, the concentrate mass
//! flow and the total hourly revenue.

use spiral_types::config::{
    validate_feed_rate, validate_prices, EconomicParameters, ProcessParameters, RecoveryTargets,
};
use spiral_types::constants::{
    D80_COARSE_LIMIT_UM, D80_COARSE_SPAN_UM, D80_FINE_LIMIT_UM, MASS_PULL_BASE,
    MASS_PULL_PER_SPLITTER, SIZE_FACTOR_FLOOR, SPLITTER_MAX, SPLITTER_MIN,
};
use spiral_types::error::{ensure_finite, SpiralResult};
use spiral_types::mineral::{MineralTable, MineralValues};
use spiral_types::state::{EngineResult, MineralResult};

/// Particle-size recovery factor [-].
///
/// Piecewise linear in d80: `d80/100` below 100 µm, exactly 1 on
/// [100, 400] µm, `max(0.4, 1 − (d80 − 400)/800)` above 400 µm.
pub fn size_factor(feed_d80_um: f64) -> f64 {
    if feed_d80_um < D80_FINE_LIMIT_UM {
        feed_d80_um / D80_FINE_LIMIT_UM
    } else if feed_d80_um > D80_COARSE_LIMIT_UM {
        (1.0 - (feed_d80_um - D80_COARSE_LIMIT_UM) / D80_COARSE_SPAN_UM).max(SIZE_FACTOR_FLOOR)
    } else {
        1.0
    }
}

/// Fraction of feed mass reporting to concentrate. Not clamped.
pub fn mass_pull(splitter_position: f64) -> f64 {
    MASS_PULL_BASE + MASS_PULL_PER_SPLITTER * splitter_position
}

/// Concentrate mass flow [t/h].
pub fn concentrate_flow(feed_rate_tph: f64, splitter_position: f64) -> f64 {
    feed_rate_tph * mass_pull(splitter_position)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Recovery/economics engine bound to a mineral table.
#[derive(Debug, Clone)]
pub struct SpiralEngine {
    table: MineralTable,
}

impl SpiralEngine {
    pub fn new(table: MineralTable) -> SpiralResult<Self> {
        table.validate()?;
        Ok(SpiralEngine { table })
    }

    /// Engine over the reference Attock mineral set.
    pub fn reference() -> Self {
        SpiralEngine {
            table: MineralTable::reference(),
        }
    }

    pub fn table(&self) -> &MineralTable {
        &self.table
    }

    /// Check one evaluation's inputs against the mineral table.
    pub fn validate_inputs(
        &self,
        feed_rate_tph: f64,
        targets: &RecoveryTargets,
        prices: &MineralValues,
        splitter_position: f64,
        feed_d80_um: f64,
    ) -> SpiralResult<()> {
        validate_feed_rate(feed_rate_tph)?;
        ensure_finite("splitter_position", splitter_position)?;
        ensure_finite("feed_d80_um", feed_d80_um)?;
        targets.validate(&self.table)?;
        validate_prices(&self.table, prices)
    }

    /// Evaluate one operating point.
    ///
    /// Rows follow mineral-table order. Grades are 0 when the concentrate
    /// flow is 0 (zero feed, or splitter at −1).
    pub fn evaluate(
        &self,
        feed_rate_tph: f64,
        targets: &RecoveryTargets,
        prices: &MineralValues,
        splitter_position: f64,
        feed_d80_um: f64,
    ) -> SpiralResult<EngineResult> {
        self.validate_inputs(
            feed_rate_tph,
            targets,
            prices,
            splitter_position,
            feed_d80_um,
        )?;

        if !(SPLITTER_MIN..=SPLITTER_MAX).contains(&splitter_position) {
            log::debug!(
                "Splitter {splitter_position:.3} outside [{SPLITTER_MIN}, {SPLITTER_MAX}], mass pull extrapolated to {:.3}",
                mass_pull(splitter_position)
            );
        }
        if size_factor(feed_d80_um) <= SIZE_FACTOR_FLOOR {
            log::warn!("Feed d80 {feed_d80_um:.0} µm is at the coarse-size recovery floor");
        }

        Ok(self.evaluate_unchecked(
            feed_rate_tph,
            targets,
            prices,
            splitter_position,
            feed_d80_um,
        ))
    }

    /// Evaluate using the parameter structs of a twin snapshot.
    pub fn evaluate_point(
        &self,
        process: &ProcessParameters,
        targets: &RecoveryTargets,
        economics: &EconomicParameters,
    ) -> SpiralResult<EngineResult> {
        self.evaluate(
            process.feed_rate_tph,
            targets,
            &economics.prices,
            process.splitter_position,
            process.feed_d80_um,
        )
    }

    /// Model evaluation without input checks. Callers must have run
    /// [`SpiralEngine::validate_inputs`] on the same targets and prices.
    pub(crate) fn evaluate_unchecked(
        &self,
        feed_rate_tph: f64,
        targets: &RecoveryTargets,
        prices: &MineralValues,
        splitter_position: f64,
        feed_d80_um: f64,
    ) -> EngineResult {
        let sf = size_factor(feed_d80_um);
        let conc_tph = concentrate_flow(feed_rate_tph, splitter_position);

        let mut rows = Vec::with_capacity(self.table.len());
        let mut total_revenue = 0.0;

        for mineral in self.table.iter() {
            // Key sets were checked against the table in validate_inputs.
            let target = targets.get(&mineral.name).unwrap_or_default();
            let price = prices.get(&mineral.name).copied().unwrap_or_default();

            let eff_rec = target * sf;
            let feed_mass = feed_rate_tph * mineral.grade_unit.feed_fraction(mineral.feed_grade);
            let conc_mass = feed_mass * (eff_rec / 100.0);
            let grade = if conc_tph == 0.0 {
                0.0
            } else {
                mineral.grade_unit.report_grade(conc_mass / conc_tph)
            };
            let revenue = conc_mass * price;
            total_revenue += revenue;

            log::trace!(
                "{}: rec={eff_rec:.2}% conc={conc_mass:.4} t/h grade={grade:.4} rev={revenue:.2}",
                mineral.name
            );

            rows.push(MineralResult {
                mineral: mineral.name.clone(),
                recovery_pct: round_to(eff_rec, 2),
                concentrate_grade: round_to(grade, 4),
                revenue_per_hr: round_to(revenue, 2),
            });
        }

        EngineResult {
            rows,
            concentrate_tph: conc_tph,
            total_revenue_per_hr: total_revenue,
        }
    }
}

impl Default for SpiralEngine {
    fn default() -> Self {
        Self::reference()
    }
}
