mod defaults;
mod file;

pub use file::PartialConfig;

use crate::cli::{AnimateArgs, ArrowsArgs};
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use std::str::FromStr;
use tracing::debug;
use viewfreq::engine::config as core_config;

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

impl PartialConfig {
    /// Applies `-S KEY=VALUE` overrides on top of the file values.
    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            debug!("Applying override {} = {}", key, value_str);

            match key {
                "animation.amplitude" => {
                    self.animation.get_or_insert_with(Default::default).amplitude =
                        Some(parse_value(key, value_str, "float")?);
                }
                "animation.frames" => {
                    self.animation.get_or_insert_with(Default::default).frames =
                        Some(parse_value(key, value_str, "integer")?);
                }
                "animation.interval-ms" => {
                    self.animation.get_or_insert_with(Default::default).interval_ms =
                        Some(parse_value(key, value_str, "integer")?);
                }
                "arrows.scale" => {
                    self.arrows.get_or_insert_with(Default::default).scale =
                        Some(parse_value(key, value_str, "float")?);
                }
                "arrows.radius" => {
                    self.arrows.get_or_insert_with(Default::default).radius =
                        Some(parse_value(key, value_str, "float")?);
                }
                "arrows.threshold" => {
                    self.arrows.get_or_insert_with(Default::default).threshold =
                        Some(parse_value(key, value_str, "float")?);
                }
                "arrows.head-width" => {
                    self.arrows.get_or_insert_with(Default::default).head_width =
                        Some(parse_value(key, value_str, "float")?);
                }
                "arrows.head-length" => {
                    self.arrows.get_or_insert_with(Default::default).head_length =
                        Some(parse_value(key, value_str, "float")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn merge_animation(mut self, args: &AnimateArgs) -> Result<core_config::AnimationParams> {
        self.apply_set_values(&args.source.set_values)?;
        let file = self.animation.unwrap_or_default();
        let defaults = DefaultsConfig::default();

        core_config::AnimationParamsBuilder::new()
            .amplitude(args.amplitude.or(file.amplitude).unwrap_or(defaults.amplitude))
            .frame_count(args.frames.or(file.frames).unwrap_or(defaults.frames))
            .interval_ms(
                args.interval_ms
                    .or(file.interval_ms)
                    .unwrap_or(defaults.interval_ms),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn merge_arrows(mut self, args: &ArrowsArgs) -> Result<core_config::ArrowParams> {
        self.apply_set_values(&args.source.set_values)?;
        let file = self.arrows.unwrap_or_default();
        let defaults = DefaultsConfig::default();

        core_config::ArrowParamsBuilder::new()
            .scale(args.scale.or(file.scale).unwrap_or(defaults.arrow_scale))
            .radius(args.radius.or(file.radius).unwrap_or(defaults.arrow_radius))
            .threshold(
                args.threshold
                    .or(file.threshold)
                    .unwrap_or(defaults.arrow_threshold),
            )
            .head_width(
                args.head_width
                    .or(file.head_width)
                    .unwrap_or(defaults.head_width),
            )
            .head_length(
                args.head_length
                    .or(file.head_length)
                    .unwrap_or(defaults.head_length),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn animate_args(extra: &[&str]) -> AnimateArgs {
        let mut argv = vec!["viewfreq", "animate", "-g", "water.log", "--mode", "1", "-o", "out.xyz"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Animate(args) => args,
            other => panic!("parsed the wrong subcommand: {:?}", other),
        }
    }

    fn arrows_args(extra: &[&str]) -> ArrowsArgs {
        let mut argv = vec!["viewfreq", "arrows", "-g", "water.log", "--mode", "1", "-o", "out.json"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Arrows(args) => args,
            other => panic!("parsed the wrong subcommand: {:?}", other),
        }
    }

    fn load(path: &Path) -> PartialConfig {
        PartialConfig::load(Some(path)).unwrap()
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let params = PartialConfig::load(None)
            .unwrap()
            .merge_animation(&animate_args(&[]))
            .unwrap();
        assert_eq!(params, core_config::AnimationParams::default());

        let params = PartialConfig::default()
            .merge_arrows(&arrows_args(&[]))
            .unwrap();
        assert_eq!(params, core_config::ArrowParams::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let path = write_config_file(
            "file_values.toml",
            r#"
            [animation]
            amplitude = 1.25
            interval-ms = 30

            [arrows]
            head-width = 3.0
            "#,
        );
        let params = load(&path).merge_animation(&animate_args(&[])).unwrap();
        assert_eq!(params.amplitude, 1.25);
        assert_eq!(params.frame_count, 20);
        assert_eq!(params.interval_ms, 30);

        let arrows = load(&path).merge_arrows(&arrows_args(&[])).unwrap();
        assert_eq!(arrows.head_width, 3.0);
        assert_eq!(arrows.scale, 10.0);
    }

    #[test]
    fn precedence_is_flag_then_set_then_file() {
        let path = write_config_file(
            "precedence.toml",
            "[animation]\namplitude = 0.8\nframes = 10\n",
        );

        let params = load(&path)
            .merge_animation(&animate_args(&["-S", "animation.frames=30"]))
            .unwrap();
        assert_eq!(params.frame_count, 30);
        assert_eq!(params.amplitude, 0.8);

        let params = load(&path)
            .merge_animation(&animate_args(&["-S", "animation.frames=30", "--frames", "40"]))
            .unwrap();
        assert_eq!(params.frame_count, 40);
    }

    #[test]
    fn set_values_reach_arrow_parameters() {
        let params = PartialConfig::default()
            .merge_arrows(&arrows_args(&["-S", "arrows.threshold=0.05", "-S", "arrows.head-length=0.5"]))
            .unwrap();
        assert_eq!(params.threshold, 0.05);
        assert_eq!(params.head_length, 0.5);
    }

    #[test]
    fn malformed_set_values_are_config_errors() {
        for bad in ["animation.frames", "animation.frames=many", "render.quality=high"] {
            let result = PartialConfig::default().merge_animation(&animate_args(&["-S", bad]));
            assert!(matches!(result, Err(CliError::Config(_))), "accepted {}", bad);
        }
    }

    #[test]
    fn out_of_range_values_are_config_errors() {
        let result = PartialConfig::default().merge_animation(&animate_args(&["--amplitude=-1"]));
        assert!(matches!(result, Err(CliError::Config(_))));

        let result = PartialConfig::default().merge_arrows(&arrows_args(&["--radius", "0"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let path = write_config_file("unknown.toml", "[animation]\nspeed = 3\n");
        assert!(matches!(
            PartialConfig::load(Some(path.as_path())),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let path = TEST_DIR.path().join("absent.toml");
        assert!(matches!(
            PartialConfig::load(Some(path.as_path())),
            Err(CliError::Io(_))
        ));
    }
}
