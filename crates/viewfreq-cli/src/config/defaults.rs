use viewfreq::engine::config as core_config;

pub struct DefaultsConfig {
    pub amplitude: f64,
    pub frames: usize,
    pub interval_ms: u64,
    pub arrow_scale: f64,
    pub arrow_radius: f64,
    pub arrow_threshold: f64,
    pub head_width: f64,
    pub head_length: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            amplitude: core_config::DEFAULT_AMPLITUDE,
            frames: core_config::DEFAULT_FRAME_COUNT,
            interval_ms: core_config::DEFAULT_INTERVAL_MS,
            arrow_scale: core_config::DEFAULT_ARROW_SCALE,
            arrow_radius: core_config::DEFAULT_ARROW_RADIUS,
            arrow_threshold: core_config::DEFAULT_ARROW_THRESHOLD,
            head_width: core_config::DEFAULT_HEAD_WIDTH,
            head_length: core_config::DEFAULT_HEAD_LENGTH,
        }
    }
}
