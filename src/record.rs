use std::path::{Path, PathBuf};
use serde::Serialize;

/// Why a postal code never made it onto the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Reason {
    /// the dataset has no row for the code
    NoMatch,
    /// a row exists but carries no place name to group under
    NoPlaceName,
    /// the lookup itself failed
    LookupFailed,
}

/// One row of the unresolved-codes sidecar CSV.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct UnresolvedRecord {
    pub postal_code: String,
    pub reason: Reason,
}

impl UnresolvedRecord {
    pub fn new(postal_code: impl Into<String>, reason: Reason) -> Self {
        Self {
            postal_code: postal_code.into(),
            reason,
        }
    }
}

/// Sidecar path next to the map artifact: `usa_city_map.html` gets its
/// failures in `usa_city_map.unresolved.csv`.
pub fn sidecar_path(map_path: &Path) -> PathBuf {
    let stem = map_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "map".to_string());
    map_path.with_file_name(format!("{stem}.unresolved.csv"))
}

/// write unresolved codes to a CSV file
pub fn save_unresolved(mut records: Vec<UnresolvedRecord>, save_path: impl AsRef<Path>) -> color_eyre::Result<()> {
    records.sort_by(|r1, r2| (&r1.reason, &r1.postal_code).cmp(&(&r2.reason, &r2.postal_code)));
    if let Some(parent) = save_path.as_ref().parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut wtr = csv::Writer::from_path(save_path)?;
    for record in &records {
        wtr.serialize(record)?;
    }
    Ok(())
}
