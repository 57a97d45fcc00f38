use crate::cli::ParseArgs;
use crate::commands::modes::mode_table;
use crate::error::{CliError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use viewfreq::engine::error::EngineError;
use viewfreq::workflows::parse::export_for_viewer;

/// Returns the `<stem>.xyz` and `<stem>.modes.json` paths for an input log.
fn output_paths(input: &Path, output_dir: Option<&Path>) -> (PathBuf, PathBuf) {
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "molecule".to_string());
    (
        dir.join(format!("{}.xyz", stem)),
        dir.join(format!("{}.modes.json", stem)),
    )
}

pub fn run(args: ParseArgs) -> Result<()> {
    info!("Reading Gaussian log from {:?}", &args.input);
    let transcript = fs::read_to_string(&args.input)?;

    let bundle = export_for_viewer(&transcript, args.title.as_deref()).map_err(|e| match e {
        EngineError::Log { source } => CliError::FileParsing {
            path: args.input.clone(),
            source: source.into(),
        },
        other => other.into(),
    })?;
    let log = &bundle.log;

    let (xyz_path, modes_path) = output_paths(&args.input, args.output_dir.as_deref());
    if let Some(dir) = xyz_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(&xyz_path, &bundle.xyz_text)?;
    info!("Wrote {:?}", &xyz_path);
    if let Some(modes_json) = &bundle.modes_json {
        fs::write(&modes_path, modes_json)?;
        info!("Wrote {:?}", &modes_path);
    }

    println!(
        "Parsed {}: {} atom(s), {} frequency(ies), {} animatable mode(s).",
        args.input.display(),
        log.atom_count(),
        log.frequencies.len(),
        log.mode_count()
    );
    if log.imaginary_count() > 0 {
        println!(
            "  Note: {} imaginary frequency(ies) were skipped.",
            log.imaginary_count()
        );
    }
    for line in mode_table(&log.modes) {
        println!("{}", line);
    }
    println!("✓ Geometry written to: {}", xyz_path.display());
    if bundle.modes_json.is_some() {
        println!("✓ Modes written to:    {}", modes_path.display());
    } else {
        warn!("No vibrational modes with displacements were found.");
        println!("  No modes found; {} was not written.", modes_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
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
 Frequencies --   1642.3100
 Red. masses --      1.0825
  Atom  AN      X      Y      Z
     1   8     0.00   0.00   0.07
     2   1     0.00   0.43  -0.56
     3   1     0.00  -0.43  -0.56

";

    #[test]
    fn output_paths_default_to_the_log_directory() {
        let (xyz, json) = output_paths(Path::new("runs/water.log"), None);
        assert_eq!(xyz, Path::new("runs/water.xyz"));
        assert_eq!(json, Path::new("runs/water.modes.json"));

        let (xyz, _) = output_paths(Path::new("water.log"), Some(Path::new("out")));
        assert_eq!(xyz, Path::new("out/water.xyz"));
    }

    #[test]
    fn run_writes_both_exchange_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("water.log");
        fs::write(&input, WATER_LOG).unwrap();
        let out_dir = dir.path().join("export");

        run(ParseArgs {
            input,
            output_dir: Some(out_dir.clone()),
            title: Some("water".to_string()),
        })
        .unwrap();

        let xyz = fs::read_to_string(out_dir.join("water.xyz")).unwrap();
        assert!(xyz.starts_with("3\nwater\n"));
        let json = fs::read_to_string(out_dir.join("water.modes.json")).unwrap();
        assert!(json.contains("\"frequency\": 1642.31"));
    }

    #[test]
    fn geometry_only_log_writes_no_mode_record() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("opt.log");
        let geometry_only = WATER_LOG.split(" Frequencies").next().unwrap();
        fs::write(&input, geometry_only).unwrap();

        run(ParseArgs {
            input,
            output_dir: None,
            title: None,
        })
        .unwrap();

        assert!(dir.path().join("opt.xyz").exists());
        assert!(!dir.path().join("opt.modes.json").exists());
    }

    #[test]
    fn log_without_geometry_is_file_parsing_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.log");
        fs::write(&input, " Normal termination of Gaussian 16.\n").unwrap();

        let result = run(ParseArgs {
            input,
            output_dir: None,
            title: None,
        });
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
