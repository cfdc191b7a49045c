// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — KPI Checks
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use spiral_types::config::{KpiTargets, ProcessParameters};
use spiral_types::state::{EconomicSummary, EngineResult, KpiStatus};

/// Compare live values against targets. Each check passes at equality.
///
/// Minerals without a grade target are reported as passing.
pub fn check_kpis(
    process: &ProcessParameters,
    summary: &EconomicSummary,
    result: &EngineResult,
    targets: &KpiTargets,
) -> KpiStatus {
    let grade_ok = result
        .rows
        .iter()
        .map(|row| {
            let ok = targets
                .grade_targets
                .get(&row.mineral)
                .is_none_or(|&target| row.concentrate_grade >= target);
            (row.mineral.clone(), ok)
        })
        .collect();

    KpiStatus {
        throughput_ok: process.feed_rate_tph >= targets.throughput_tph,
        margin_ok: summary.margin_pct >= targets.margin_pct,
        profit_ok: summary.profit_per_hr >= targets.profit_per_hr,
        grade_ok,
    }
}
