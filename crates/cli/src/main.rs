use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use votermap::codec;
use votermap::geo::GeoCfg;
use votermap::select::{select_each, select_in_any, SelectCfg};
use votermap::shape::{bounds_of, ShapeKind};

mod report;
mod voters;

use report::{CheckReport, SelectReport, SkipLine};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Select voters inside drawn map regions")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Select voter ids inside each persisted shape
    Select {
        /// Persisted shapes (JSON array)
        #[arg(long)]
        shapes: PathBuf,
        /// Voter locations, `.csv` (id,latitude,longitude) or `.json`
        #[arg(long)]
        voters: PathBuf,
        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Run the precise test on every candidate
        #[arg(long)]
        no_prefilter: bool,
        /// Sphere radius for circle distances, in meters
        #[arg(long)]
        earth_radius_m: Option<f64>,
    },
    /// Validate a persisted shapes file and print its bounds
    Check {
        #[arg(long)]
        shapes: PathBuf,
    },
    /// Print version and default configuration
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Select {
            shapes,
            voters,
            out,
            no_prefilter,
            earth_radius_m,
        } => {
            let cfg = select_cfg(no_prefilter, earth_radius_m)?;
            let report = select(&shapes, &voters, cfg)?;
            match out {
                Some(out) => report::write_json(out, &report),
                None => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(())
                }
            }
        }
        Action::Check { shapes } => {
            let report = check(&shapes)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Action::Report => report_defaults(),
    }
}

fn select_cfg(no_prefilter: bool, earth_radius_m: Option<f64>) -> Result<SelectCfg> {
    let geo = match earth_radius_m {
        Some(r) => GeoCfg::new(r).context("--earth-radius-m")?,
        None => GeoCfg::default(),
    };
    Ok(SelectCfg {
        geo,
        bbox_prefilter: !no_prefilter,
    })
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn select(shapes_path: &Path, voters_path: &Path, cfg: SelectCfg) -> Result<SelectReport> {
    let text = read_text(shapes_path)?;
    // A malformed shapes file restores nothing; the selection is then empty.
    let decoded = codec::deserialize(&text).unwrap_or_else(|err| {
        tracing::warn!(%err, shapes = %shapes_path.display(), "nothing to restore");
        codec::Decoded::default()
    });
    let candidates = voters::load_candidates(voters_path)?;
    tracing::info!(
        shapes = decoded.shapes.len(),
        skipped = decoded.skipped.len(),
        candidates = candidates.len(),
        prefilter = cfg.bbox_prefilter,
        "select"
    );
    let selections = select_each(&decoded.shapes, &candidates, cfg);
    Ok(SelectReport {
        candidates: candidates.len(),
        shapes: report::shape_selections(&decoded.shapes, selections),
        any: select_in_any(&decoded.shapes, &candidates, cfg),
        skipped: decoded.skipped.iter().map(SkipLine::from).collect(),
    })
}

fn check(shapes_path: &Path) -> Result<CheckReport> {
    let text = read_text(shapes_path)?;
    let decoded = codec::deserialize(&text)
        .with_context(|| format!("decoding {}", shapes_path.display()))?;
    let geo = GeoCfg::default();
    tracing::info!(
        valid = decoded.shapes.len(),
        skipped = decoded.skipped.len(),
        "check"
    );
    Ok(CheckReport {
        valid: decoded.shapes.len(),
        kinds: decoded.shapes.iter().map(|s| s.kind().as_str()).collect(),
        skipped: decoded.skipped.iter().map(SkipLine::from).collect(),
        bounds: bounds_of(&decoded.shapes, &geo).map(Into::into),
    })
}

fn report_defaults() -> Result<()> {
    let cfg = SelectCfg::default();
    let obj = serde_json::json!({
        "version": votermap::VERSION,
        "earth_radius_m": cfg.geo.earth_radius_m,
        "bbox_prefilter": cfg.bbox_prefilter,
        "shape_types": ShapeKind::ALL.map(ShapeKind::as_str),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
