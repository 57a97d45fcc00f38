use crate::cli::AnimateArgs;
use crate::config::PartialConfig;
use crate::error::{CliError, Result};
use crate::utils::loader::load_sources;
use crate::utils::progress::CliProgressHandler;
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;
use viewfreq::core::io::xyz::write_trajectory;
use viewfreq::core::models::geometry::Geometry;
use viewfreq::engine::frames::Frame;
use viewfreq::engine::progress::ProgressReporter;
use viewfreq::workflows::animate::{animate_all, animate_mode, mode_label, select_mode};

/// Inserts `_mode<N>` before the extension of `template`.
pub fn numbered_output_path(template: &Path, position: usize) -> PathBuf {
    let stem = template
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match template.extension() {
        Some(ext) => format!("{}_mode{}.{}", stem, position, ext.to_string_lossy()),
        None => format!("{}_mode{}", stem, position),
    };
    template.with_file_name(file_name)
}

fn write_frames(geometry: &Geometry, frames: &[Frame], title: &str, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_trajectory(geometry, frames, title, &mut writer).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub fn run(args: AnimateArgs) -> Result<()> {
    let params = PartialConfig::load(args.source.config.as_deref())?.merge_animation(&args)?;
    let (geometry, modes) = load_sources(&args.source)?;
    info!(
        "Animating with amplitude {}, {} frame(s) per period, {} ms per frame.",
        params.amplitude, params.frame_count, params.interval_ms
    );

    if args.selection.all {
        let progress_handler = CliProgressHandler::new();
        let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
        let animations = animate_all(&geometry, &modes, &params, &reporter)?;

        let written = animations
            .par_iter()
            .map(|animation| {
                let path = numbered_output_path(&args.output, animation.position);
                let title = format!("Mode {}: {:.2} cm⁻¹", animation.position, animation.frequency);
                write_frames(&geometry, &animation.frames, &title, &path)?;
                Ok((title, path))
            })
            .collect::<Result<Vec<_>>>()?;

        println!("Wrote {} trajectory file(s):", written.len());
        for (title, path) in written {
            println!("  ✓ {} -> {}", title, path.display());
        }
        return Ok(());
    }

    let mode_number = args.selection.mode.ok_or_else(|| {
        CliError::Argument("either --mode <N> or --all is required".to_string())
    })?;
    let frames = animate_mode(&geometry, &modes, mode_number, &params)?;
    let title = mode_label(mode_number, select_mode(&modes, mode_number)?);
    write_frames(&geometry, &frames, &title, &args.output)?;

    println!(
        "✓ {} ({} frames, {} ms per frame) written to: {}",
        title,
        frames.len(),
        params.interval_ms,
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ModeSelection, SourceArgs};
    use std::fs;
    use tempfile::tempdir;

    const WATER_LOG: &str = "\
                         Standard orientation:
 ---------------------------------------------------------------------
 Center     Atomic      Atomic             Coordinates (Angstroms)
 Number     Number       Type             X           Y           Z
 ---------------------------------------------------------------------
      1          8           0        0.000000    0.000000    0.119262
      2          1           0        0.000000    0.763239   -0.477047
      3          1           0        0.000000   -0.763239   -0.477047
 ---------------------------------------------------------------------
 Frequencies --   1642.3100              3756.9000
 Red. masses --      1.0825                 1.0453
  Atom  AN      X      Y      Z        X      Y      Z
     1   8     0.00   0.00   0.07     0.00   0.00   0.05
     2   1     0.00   0.43  -0.56     0.00   0.58   0.40
     3   1     0.00  -0.43  -0.56     0.00  -0.58   0.40

";

    fn args(dir: &Path, selection: ModeSelection, output: &str) -> AnimateArgs {
        let log = dir.join("water.log");
        fs::write(&log, WATER_LOG).unwrap();
        AnimateArgs {
            source: SourceArgs {
                geometry: log,
                modes: None,
                config: None,
                set_values: vec!["animation.frames=4".to_string()],
            },
            selection,
            output: dir.join(output),
            amplitude: None,
            frames: None,
            interval_ms: None,
        }
    }

    #[test]
    fn numbered_output_path_keeps_extension() {
        assert_eq!(
            numbered_output_path(Path::new("out/water.xyz"), 3),
            Path::new("out/water_mode3.xyz")
        );
        assert_eq!(
            numbered_output_path(Path::new("traj"), 1),
            Path::new("traj_mode1")
        );
    }

    #[test]
    fn single_mode_writes_one_trajectory() {
        let dir = tempdir().unwrap();
        let selection = ModeSelection {
            mode: Some(2),
            all: false,
        };
        run(args(dir.path(), selection, "bend.xyz")).unwrap();

        let text = fs::read_to_string(dir.path().join("bend.xyz")).unwrap();
        assert_eq!(text.lines().count(), 4 * 5);
        assert!(text.contains("Mode 2: 3756.90 cm⁻¹ (frame 1/4)"));
    }

    #[test]
    fn all_modes_write_numbered_trajectories() {
        let dir = tempdir().unwrap();
        let selection = ModeSelection {
            mode: None,
            all: true,
        };
        run(args(dir.path(), selection, "water.xyz")).unwrap();

        assert!(dir.path().join("water_mode1.xyz").exists());
        assert!(dir.path().join("water_mode2.xyz").exists());
    }

    #[test]
    fn unknown_mode_is_a_core_error() {
        let dir = tempdir().unwrap();
        let selection = ModeSelection {
            mode: Some(5),
            all: false,
        };
        assert!(matches!(
            run(args(dir.path(), selection, "none.xyz")),
            Err(CliError::Core(_))
        ));
    }
}
