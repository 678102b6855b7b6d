//! JSON reports written by the CLI.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use votermap::codec::SkippedItem;
use votermap::geo::{BBox, LatLng};
use votermap::shape::Shape;

/// Matching ids for one persisted shape.
#[derive(Debug, Serialize)]
pub struct ShapeSelection {
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub count: usize,
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SkipLine {
    pub index: usize,
    pub reason: String,
}

impl From<&SkippedItem> for SkipLine {
    fn from(s: &SkippedItem) -> Self {
        Self {
            index: s.index,
            reason: s.reason.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl From<BBox> for Bounds {
    fn from(b: BBox) -> Self {
        Self {
            south_west: b.south_west(),
            north_east: b.north_east(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SelectReport {
    pub candidates: usize,
    pub shapes: Vec<ShapeSelection>,
    /// Ids inside at least one shape.
    pub any: Vec<String>,
    pub skipped: Vec<SkipLine>,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub valid: usize,
    pub kinds: Vec<&'static str>,
    pub skipped: Vec<SkipLine>,
    pub bounds: Option<Bounds>,
}

/// Pair decoded shapes with their selections. Indices are positions among the
/// decoded shapes, not the raw batch.
pub fn shape_selections(shapes: &[Shape], selections: Vec<Vec<String>>) -> Vec<ShapeSelection> {
    shapes
        .iter()
        .zip(selections)
        .enumerate()
        .map(|(index, (shape, ids))| ShapeSelection {
            index,
            kind: shape.kind().as_str(),
            count: ids.len(),
            ids,
        })
        .collect()
}

/// Write pretty JSON, creating parent directories as needed.
pub fn write_json<P: AsRef<Path>, T: Serialize>(out: P, value: &T) -> Result<()> {
    let out = out.as_ref();
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}
