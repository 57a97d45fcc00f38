use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use viewfreq::engine::progress::{Progress, ProgressCallback};

/// Shows a batch animation as one bar with a tick per mode.
///
/// `ProgressBar` is internally shared, so clones handed to the callback and
/// kept by the handler drive the same bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(Self::bar_style());
        Self { bar }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |progress: Progress| match progress {
            Progress::PhaseStart { name } => bar.set_prefix(name),
            Progress::TaskStart { total_steps } => {
                bar.set_length(total_steps);
                bar.set_position(0);
            }
            Progress::ModeProcessed {
                position,
                frequency,
            } => {
                bar.set_message(format!("mode {} ({:.2} cm⁻¹)", position, frequency));
                bar.inc(1);
            }
            Progress::TaskFinish => {
                bar.finish_with_message(format!("{} mode(s) done", bar.position()));
            }
            Progress::PhaseFinish => {}
            // Skipped-mode notes go above the bar and survive it being cleared.
            Progress::Message(note) => bar.suspend(|| eprintln!("  {}", note)),
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
