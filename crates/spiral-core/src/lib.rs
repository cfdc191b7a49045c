// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Recovery/economics engine, cost model, sensitivity sweep and the twin
//! that ties them together for one parameter snapshot.

pub mod economics;
pub mod engine;
pub mod kpi;
pub mod report;
pub mod sweep;
pub mod twin;
