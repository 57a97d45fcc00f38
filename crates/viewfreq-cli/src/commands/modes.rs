use crate::cli::ModesArgs;
use crate::error::Result;
use crate::utils::loader::load_modes;
use tracing::info;
use viewfreq::core::models::mode::VibrationMode;
use viewfreq::workflows::animate::mode_label;

/// Formats one line per mode: label, displacement count and largest magnitude.
pub fn mode_table(modes: &[VibrationMode]) -> Vec<String> {
    modes
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            format!(
                "  {:<28} {:>3} atom(s)  max |d| = {:.4}",
                mode_label(i + 1, mode),
                mode.displacements.len(),
                mode.max_magnitude()
            )
        })
        .collect()
}

pub fn run(args: ModesArgs) -> Result<()> {
    let modes = load_modes(&args.input)?;
    info!("Listing {} mode(s) from {:?}", modes.len(), &args.input);

    if modes.is_empty() {
        println!("No vibrational modes found in {}.", args.input.display());
        return Ok(());
    }
    println!("{} vibrational mode(s) in {}:", modes.len(), args.input.display());
    for line in mode_table(&modes) {
        println!("{}", line);
    }
    Ok(())
}
