//! Candidate loading for the CLI: CSV through polars, JSON through the codec.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use votermap::codec::decode_candidates;
use votermap::geo::LatLng;
use votermap::select::Candidate;

/// Load voter locations by file extension (`.csv` or `.json`).
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate<String>>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_csv(path),
        Some("json") => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            decode_candidates(&text).with_context(|| format!("decoding {}", path.display()))
        }
        _ => bail!(
            "unsupported voters file {} (expected .csv or .json)",
            path.display()
        ),
    }
}

/// Columns `id,latitude,longitude`; other columns are ignored. Rows with a
/// missing or unparsable field are skipped with a warning.
///
/// `id` is always read as text, so ids come back exactly as written.
fn load_csv(path: &Path) -> Result<Vec<Candidate<String>>> {
    let id_schema = Schema::from_iter([Field::new("id".into(), DataType::String)]);
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .with_dtype_overwrite(Some(Arc::new(id_schema)))
        .finish()?
        .select([
            col("id"),
            col("latitude").cast(DataType::Float64),
            col("longitude").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    let ids = df.column("id")?.str()?;
    let lat = df.column("latitude")?.f64()?;
    let lng = df.column("longitude")?.f64()?;
    let mut out = Vec::with_capacity(df.height());
    for (row, ((id, la), lo)) in ids.into_iter().zip(lat).zip(lng).enumerate() {
        match (id, la, lo) {
            (Some(id), Some(la), Some(lo)) => {
                out.push(Candidate::new(id.to_owned(), LatLng::new(la, lo)))
            }
            _ => tracing::warn!(row, "skipping voter row with missing fields"),
        }
    }
    tracing::info!(rows = df.height(), kept = out.len(), "voters_csv");
    Ok(out)
}
