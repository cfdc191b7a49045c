// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — Mineral Reference Table
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fixed mineral reference set.
//!
//! Feed grades are stored in the unit named by [`GradeUnit`]: precious metal
//! as a direct mass ratio, everything else as a percentage. The engine
//! branches once on the tag, never on the mineral name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_in_range, SpiralError, SpiralResult};

/// Per-mineral scalar values keyed by mineral name.
pub type MineralValues = BTreeMap<String, f64>;

/// How a mineral's feed grade is stored and its concentrate grade reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeUnit {
    /// Mass per feed unit, used as-is. Concentrate grade is a mass fraction.
    Ratio,
    /// Percent of feed mass. Concentrate grade is reported in percent.
    Percent,
}

impl GradeUnit {
    /// Convert a stored feed grade to a mass fraction of feed.
    pub fn feed_fraction(self, feed_grade: f64) -> f64 {
        match self {
            GradeUnit::Ratio => feed_grade,
            GradeUnit::Percent => feed_grade / 100.0,
        }
    }

    /// Scale a concentrate mass fraction into the reporting unit.
    pub fn report_grade(self, fraction: f64) -> f64 {
        match self {
            GradeUnit::Ratio => fraction,
            GradeUnit::Percent => fraction * 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineralSpec {
    pub name: String,
    pub feed_grade: f64,
    pub grade_unit: GradeUnit,
    /// Base recovery [%].
    pub base_recovery_pct: f64,
    pub default_price: f64,
    /// Display label for the price, e.g. "$/t".
    pub price_unit: String,
}

impl MineralSpec {
    pub fn new(
        name: &str,
        feed_grade: f64,
        grade_unit: GradeUnit,
        base_recovery_pct: f64,
        default_price: f64,
        price_unit: &str,
    ) -> Self {
        MineralSpec {
            name: name.to_string(),
            feed_grade,
            grade_unit,
            base_recovery_pct,
            default_price,
            price_unit: price_unit.to_string(),
        }
    }
}

/// Ordered mineral table. Iteration order is insertion order and defines
/// the row order of every engine result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MineralTable {
    minerals: Vec<MineralSpec>,
}

impl MineralTable {
    pub fn new(minerals: Vec<MineralSpec>) -> SpiralResult<Self> {
        let table = MineralTable { minerals };
        table.validate()?;
        Ok(table)
    }

    /// Non-empty, unique names, finite grades and recoveries in [0, 100].
    pub fn validate(&self) -> SpiralResult<()> {
        if self.minerals.is_empty() {
            return Err(SpiralError::ConfigError(
                "mineral table must contain at least one mineral".to_string(),
            ));
        }
        for (i, m) in self.minerals.iter().enumerate() {
            if self.minerals[..i].iter().any(|other| other.name == m.name) {
                return Err(SpiralError::ConfigError(format!(
                    "duplicate mineral '{}' in table",
                    m.name
                )));
            }
            ensure_in_range(
                &format!("feed_grade[{}]", m.name),
                m.feed_grade,
                0.0,
                f64::MAX,
                ">= 0",
            )?;
            ensure_in_range(
                &format!("base_recovery[{}]", m.name),
                m.base_recovery_pct,
                0.0,
                100.0,
                "[0, 100]",
            )?;
        }
        Ok(())
    }

    /// Attock spiral plant reference set.
    pub fn reference() -> Self {
        MineralTable {
            minerals: vec![
                MineralSpec::new("Gold", 0.80, GradeUnit::Ratio, 65.0, 80.0, "$/g"),
                MineralSpec::new("Magnetite", 6.0, GradeUnit::Percent, 70.0, 100.0, "$/t"),
                MineralSpec::new("Ilmenite", 1.5, GradeUnit::Percent, 60.0, 250.0, "$/t"),
                MineralSpec::new("Rutile", 0.30, GradeUnit::Percent, 55.0, 800.0, "$/t"),
                MineralSpec::new("Monazite", 0.15, GradeUnit::Percent, 50.0, 1500.0, "$/t"),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MineralSpec> {
        self.minerals.iter()
    }

    pub fn len(&self) -> usize {
        self.minerals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minerals.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&MineralSpec> {
        self.minerals.iter().find(|m| m.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.minerals.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn base_recoveries(&self) -> MineralValues {
        self.minerals
            .iter()
            .map(|m| (m.name.clone(), m.base_recovery_pct))
            .collect()
    }

    pub fn default_prices(&self) -> MineralValues {
        self.minerals
            .iter()
            .map(|m| (m.name.clone(), m.default_price))
            .collect()
    }

    /// Require `values` to cover exactly this table's minerals.
    ///
    /// Missing keys are reported in table order, before unknown keys.
    pub fn check_keys(&self, table: &'static str, values: &MineralValues) -> SpiralResult<()> {
        if let Some(missing) = self.minerals.iter().find(|m| !values.contains_key(&m.name)) {
            return Err(SpiralError::MissingMineral {
                table,
                name: missing.name.clone(),
            });
        }
        if let Some(unknown) = values.keys().find(|k| self.get(k).is_none()) {
            return Err(SpiralError::UnknownMineral {
                table,
                name: unknown.clone(),
            });
        }
        Ok(())
    }
}

impl Default for MineralTable {
    fn default() -> Self {
        Self::reference()
    }
}
