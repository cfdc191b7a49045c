// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// One row of the engine's per-mineral table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineralResult {
    pub mineral: String,
    pub recovery_pct: f64,      // Effective recovery [%], 2 dp
    pub concentrate_grade: f64, // Mineral's grade unit, 4 dp
    pub revenue_per_hr: f64,    // [$/h], 2 dp
}

/// Engine output for one parameter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineResult {
    /// Rows in mineral-table order.
    pub rows: Vec<MineralResult>,
    /// Concentrate mass flow [t/h].
    pub concentrate_tph: f64,
    /// Sum of unrounded per-mineral revenues [$/h].
    pub total_revenue_per_hr: f64,
}

impl EngineResult {
    pub fn row(&self, mineral: &str) -> Option<&MineralResult> {
        self.rows.iter().find(|r| r.mineral == mineral)
    }

    /// Fraction of revenue contributed by each row, in row order.
    /// All zero when total revenue is not positive.
    pub fn revenue_shares(&self) -> Vec<(String, f64)> {
        let total: f64 = self.rows.iter().map(|r| r.revenue_per_hr).sum();
        self.rows
            .iter()
            .map(|r| {
                let share = if total > 0.0 {
                    r.revenue_per_hr / total
                } else {
                    0.0
                };
                (r.mineral.clone(), share)
            })
            .collect()
    }
}

/// Hourly OPEX line items [$/h].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpexBreakdown {
    pub labour: f64,
    pub power: f64,
    pub water: f64,
    pub maintenance: f64,
    pub mining: f64,
    pub lease_tax: f64,
    pub total: f64,
}

/// Headline economics derived from engine output and the cost model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicSummary {
    pub total_revenue_per_hr: f64,
    pub total_opex_per_hr: f64,
    pub profit_per_hr: f64,
    pub margin_pct: f64,
    pub cost_per_ton: f64,
    pub profit_per_ton: f64,
}

/// Pass/fail of live values against KPI targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiStatus {
    pub throughput_ok: bool,
    pub margin_ok: bool,
    pub profit_ok: bool,
    /// Concentrate grade at or above target, per mineral in row order.
    pub grade_ok: Vec<(String, bool)>,
}

impl KpiStatus {
    /// Throughput, margin and profit all pass. Grade flags are advisory.
    pub fn all_passed(&self) -> bool {
        self.throughput_ok && self.margin_ok && self.profit_ok
    }

    /// Labelled headline checks in display order.
    pub fn headline(&self) -> [(&'static str, bool); 3] {
        [
            ("Throughput OK", self.throughput_ok),
            ("Profit Margin OK", self.margin_ok),
            ("Profit/hr OK", self.profit_ok),
        ]
    }
}

/// Most profitable cell of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepCell {
    pub feed_rate_index: usize,
    pub splitter_index: usize,
    pub feed_rate_tph: f64,
    pub splitter_position: f64,
    pub profit_per_hr: f64,
}

/// Profit surface over (feed rate, splitter position).
/// Row i ↔ feed_rate_axis[i], column j ↔ splitter_axis[j].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
    pub profit: Array2<f64>,         // [n_feed, n_split] profit [$/h]
    pub feed_rate_axis: Array1<f64>, // linspace(feed_min, feed_max, n_feed)
    pub splitter_axis: Array1<f64>,  // linspace(split_min, split_max, n_split)
}

impl SweepGrid {
    pub fn shape(&self) -> (usize, usize) {
        self.profit.dim()
    }

    pub fn profit_at(&self, i: usize, j: usize) -> Option<f64> {
        self.profit.get([i, j]).copied()
    }

    pub fn best_cell(&self) -> Option<SweepCell> {
        let mut best: Option<SweepCell> = None;
        for ((i, j), &p) in self.profit.indexed_iter() {
            if best.as_ref().is_none_or(|b| p > b.profit_per_hr) {
                best = Some(SweepCell {
                    feed_rate_index: i,
                    splitter_index: j,
                    feed_rate_tph: self.feed_rate_axis[i],
                    splitter_position: self.splitter_axis[j],
                    profit_per_hr: p,
                });
            }
        }
        best
    }

    /// (min, max) profit across the grid; `None` for an empty grid.
    pub fn profit_range(&self) -> Option<(f64, f64)> {
        if self.profit.is_empty() {
            return None;
        }
        let min = self.profit.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .profit
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}
