use crate::cli::ArrowsArgs;
use crate::config::PartialConfig;
use crate::error::{CliError, Result};
use crate::utils::loader::load_sources;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;
use viewfreq::engine::arrows::Arrow;
use viewfreq::workflows::animate::{arrows_for_mode, mode_label, select_mode};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArrowRecord {
    atom_index: usize,
    start: [f64; 3],
    end: [f64; 3],
    shaft_radius: f64,
    head_ratio: f64,
    mid_fraction: f64,
}

impl From<&Arrow> for ArrowRecord {
    fn from(arrow: &Arrow) -> Self {
        Self {
            atom_index: arrow.atom_index,
            start: [arrow.start.x, arrow.start.y, arrow.start.z],
            end: [arrow.end.x, arrow.end.y, arrow.end.z],
            shaft_radius: arrow.shaft_radius,
            head_ratio: arrow.head_ratio,
            mid_fraction: arrow.mid_fraction,
        }
    }
}

#[derive(Debug, Serialize)]
struct ArrowSet {
    mode: usize,
    frequency: f64,
    arrows: Vec<ArrowRecord>,
}

pub fn run(args: ArrowsArgs) -> Result<()> {
    let params = PartialConfig::load(args.source.config.as_deref())?.merge_arrows(&args)?;
    let (geometry, modes) = load_sources(&args.source)?;

    let arrows = arrows_for_mode(&geometry, &modes, args.mode, &params)?;
    let mode = select_mode(&modes, args.mode)?;
    let set = ArrowSet {
        mode: args.mode,
        frequency: mode.frequency,
        arrows: arrows.iter().map(Into::into).collect(),
    };

    let writer = BufWriter::new(File::create(&args.output)?);
    serde_json::to_writer_pretty(writer, &set).map_err(|e| CliError::Other(e.into()))?;
    info!("Wrote {} arrow(s) to {:?}", set.arrows.len(), &args.output);

    println!(
        "✓ {}: {} arrow(s) written to: {}",
        mode_label(args.mode, mode),
        set.arrows.len(),
        args.output.display()
    );
    Ok(())
}
