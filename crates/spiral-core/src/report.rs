// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — Executive Report
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Export data model for the engineering report.
//!
//! Built only from a [`TwinSnapshot`]; document and chart renderers consume
//! the JSON or the fixed-width table.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use spiral_types::error::SpiralResult;
use spiral_types::state::{EconomicSummary, KpiStatus, MineralResult, SweepCell, SweepGrid};

use crate::twin::TwinSnapshot;

pub const REPORT_TITLE: &str = "Engineering Report: Spiral Digital Twin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveReport {
    pub title: String,
    pub summary: String,
    pub rows: Vec<MineralResult>,
    /// Revenue fraction per mineral, for pie charts.
    pub revenue_shares: Vec<(String, f64)>,
    pub concentrate_tph: f64,
    pub economics: EconomicSummary,
    pub kpi: KpiStatus,
    pub heatmap: SweepGrid,
    pub best_operating_point: Option<SweepCell>,
}

impl ExecutiveReport {
    pub fn from_snapshot(snapshot: &TwinSnapshot) -> Self {
        let p = &snapshot.process;
        ExecutiveReport {
            title: REPORT_TITLE.to_string(),
            summary: format!(
                "Feed: {} tph | d80: {} um | Splitter: {}",
                p.feed_rate_tph, p.feed_d80_um, p.splitter_position
            ),
            rows: snapshot.result.rows.clone(),
            revenue_shares: snapshot.result.revenue_shares(),
            concentrate_tph: snapshot.result.concentrate_tph,
            economics: snapshot.economics.clone(),
            kpi: snapshot.kpi.clone(),
            heatmap: snapshot.heatmap.clone(),
            best_operating_point: snapshot.heatmap.best_cell(),
        }
    }

    pub fn to_json(&self) -> SpiralResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Per-mineral table as fixed-width text.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<12} {:>12} {:>12} {:>14}",
            "Mineral", "Recovery %", "Conc Grade", "Revenue $/hr"
        );
        let _ = writeln!(out, "{}", "-".repeat(53));
        for r in &self.rows {
            let _ = writeln!(
                out,
                "{:<12} {:>12.2} {:>12.4} {:>14.2}",
                r.mineral, r.recovery_pct, r.concentrate_grade, r.revenue_per_hr
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twin::SpiralTwin;
    use spiral_types::config::TwinConfig;

    fn default_report() -> ExecutiveReport {
        let snap = SpiralTwin::from_config(TwinConfig::default())
            .unwrap()
            .evaluate()
            .unwrap();
        ExecutiveReport::from_snapshot(&snap)
    }

    #[test]
    fn test_summary_line() {
        let report = default_report();
        assert_eq!(report.summary, "Feed: 300 tph | d80: 150 um | Splitter: 1");
        assert_eq!(report.title, REPORT_TITLE);
    }

    #[test]
    fn test_table_lists_every_mineral() {
        let table = default_report().render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[2].starts_with("Gold"));
        assert!(lines[2].contains("12480.00"), "gold row: {}", lines[2]);
        assert!(lines[6].starts_with("Monazite"));
    }

    #[test]
    fn test_json_roundtrip() {
        let report = default_report();
        let json = report.to_json().unwrap();
        let back: ExecutiveReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rows, report.rows);
        assert_eq!(back.heatmap.shape(), (10, 10));
        assert_eq!(back.summary, report.summary);
    }

    #[test]
    fn test_best_point_on_max_feed() {
        let best = default_report().best_operating_point.unwrap();
        assert!((best.feed_rate_tph - 500.0).abs() < 1e-9);
    }
}
