use std::fmt::Write as _;
use std::path::Path;

use crate::error::{Result, ScoutError};
use crate::score::ScoredEntity;

pub const CSV_HEADER: &[&str] = &[
    "model",
    "intelligence",
    "speed",
    "cost",
    "intelligence_norm",
    "speed_norm",
    "cost_norm",
    "intelligence_score",
    "speed_score",
    "cost_score",
    "total_score",
];

/// Render results as CSV, one row per model in the given order.
pub fn to_csv(results: &[ScoredEntity]) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push('\n');
    for r in results {
        let e = &r.entity;
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{}",
            csv_field(&e.name),
            e.intelligence,
            e.speed,
            e.cost,
            r.normalized.intelligence,
            r.normalized.speed,
            r.normalized.cost,
            r.weighted.intelligence,
            r.weighted.speed,
            r.weighted.cost,
            r.total,
        );
    }
    out
}

pub fn write_csv(path: &Path, results: &[ScoredEntity]) -> Result<()> {
    std::fs::write(path, to_csv(results))
        .map_err(|e| ScoutError::Io(format!("failed to write {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), rows = results.len(), "wrote csv");
    Ok(())
}

/// Pretty JSON array of results.
pub fn to_json(results: &[ScoredEntity]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
