use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub const DEFAULT_AMPLITUDE: f64 = 0.5;
pub const DEFAULT_FRAME_COUNT: usize = 20;
pub const DEFAULT_INTERVAL_MS: u64 = 50;

pub const DEFAULT_ARROW_SCALE: f64 = 10.0;
pub const DEFAULT_ARROW_RADIUS: f64 = 0.05;
pub const DEFAULT_ARROW_THRESHOLD: f64 = 0.01;
pub const DEFAULT_HEAD_WIDTH: f64 = 2.0;
pub const DEFAULT_HEAD_LENGTH: f64 = 0.3;

/// Parameters for the vibration frame generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    /// Peak displacement scale applied to the unit-scale mode vectors.
    pub amplitude: f64,
    /// Frames per full oscillation period.
    pub frame_count: usize,
    /// Playback delay between frames, in milliseconds.
    pub interval_ms: u64,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            amplitude: DEFAULT_AMPLITUDE,
            frame_count: DEFAULT_FRAME_COUNT,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

/// Parameters for turning displacements into arrows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowParams {
    pub scale: f64,
    pub radius: f64,
    /// Displacements with a magnitude at or below this are not drawn.
    pub threshold: f64,
    pub head_width: f64,
    pub head_length: f64,
}

impl Default for ArrowParams {
    fn default() -> Self {
        Self {
            scale: DEFAULT_ARROW_SCALE,
            radius: DEFAULT_ARROW_RADIUS,
            threshold: DEFAULT_ARROW_THRESHOLD,
            head_width: DEFAULT_HEAD_WIDTH,
            head_length: DEFAULT_HEAD_LENGTH,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be a positive finite number, got {}", value),
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be a non-negative finite number, got {}", value),
        })
    }
}

impl AnimationParams {
    /// Checks the invariants the frame generator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("amplitude", self.amplitude)?;
        if self.frame_count == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "frame_count",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "interval_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl ArrowParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("scale", self.scale)?;
        positive("radius", self.radius)?;
        non_negative("threshold", self.threshold)?;
        positive("head_width", self.head_width)?;
        non_negative("head_length", self.head_length)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct AnimationParamsBuilder {
    amplitude: Option<f64>,
    frame_count: Option<usize>,
    interval_ms: Option<u64>,
}

impl AnimationParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = Some(amplitude);
        self
    }
    pub fn frame_count(mut self, frames: usize) -> Self {
        self.frame_count = Some(frames);
        self
    }
    pub fn interval_ms(mut self, interval: u64) -> Self {
        self.interval_ms = Some(interval);
        self
    }

    pub fn build(self) -> Result<AnimationParams, ConfigError> {
        let params = AnimationParams {
            amplitude: self
                .amplitude
                .ok_or(ConfigError::MissingParameter("amplitude"))?,
            frame_count: self
                .frame_count
                .ok_or(ConfigError::MissingParameter("frame_count"))?,
            interval_ms: self
                .interval_ms
                .ok_or(ConfigError::MissingParameter("interval_ms"))?,
        };
        params.validate()?;
        Ok(params)
    }
}

#[derive(Default)]
pub struct ArrowParamsBuilder {
    scale: Option<f64>,
    radius: Option<f64>,
    threshold: Option<f64>,
    head_width: Option<f64>,
    head_length: Option<f64>,
}

impl ArrowParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }
    pub fn head_width(mut self, width: f64) -> Self {
        self.head_width = Some(width);
        self
    }
    pub fn head_length(mut self, length: f64) -> Self {
        self.head_length = Some(length);
        self
    }

    pub fn build(self) -> Result<ArrowParams, ConfigError> {
        let params = ArrowParams {
            scale: self.scale.ok_or(ConfigError::MissingParameter("scale"))?,
            radius: self.radius.ok_or(ConfigError::MissingParameter("radius"))?,
            threshold: self
                .threshold
                .ok_or(ConfigError::MissingParameter("threshold"))?,
            head_width: self
                .head_width
                .ok_or(ConfigError::MissingParameter("head_width"))?,
            head_length: self
                .head_length
                .ok_or(ConfigError::MissingParameter("head_length"))?,
        };
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_builder_reports_first_missing_parameter() {
        let result = AnimationParamsBuilder::new().amplitude(0.5).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("frame_count")));
    }

    #[test]
    fn animation_builder_builds_valid_params() {
        let params = AnimationParamsBuilder::new()
            .amplitude(1.0)
            .frame_count(40)
            .interval_ms(25)
            .build()
            .unwrap();
        assert_eq!(params.frame_count, 40);
        assert_eq!(params.interval_ms, 25);
    }

    #[test]
    fn animation_builder_rejects_bad_values() {
        let base = || AnimationParamsBuilder::new().frame_count(20).interval_ms(50);
        for amplitude in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                base().amplitude(amplitude).build(),
                Err(ConfigError::InvalidParameter { name: "amplitude", .. })
            ));
        }
        assert!(matches!(
            base().amplitude(0.5).frame_count(0).build(),
            Err(ConfigError::InvalidParameter { name: "frame_count", .. })
        ));
    }

    #[test]
    fn arrow_builder_reports_missing_and_invalid_parameters() {
        assert_eq!(
            ArrowParamsBuilder::new().scale(10.0).build(),
            Err(ConfigError::MissingParameter("radius"))
        );
        let result = ArrowParamsBuilder::new()
            .scale(10.0)
            .radius(0.05)
            .threshold(-0.1)
            .head_width(2.0)
            .head_length(0.3)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "threshold", .. })
        ));
    }

    #[test]
    fn arrow_builder_accepts_zero_threshold_and_head_length() {
        let params = ArrowParamsBuilder::new()
            .scale(1.0)
            .radius(0.1)
            .threshold(0.0)
            .head_width(1.0)
            .head_length(0.0)
            .build()
            .unwrap();
        assert_eq!(params.threshold, 0.0);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(AnimationParams::default().validate().is_ok());
        assert!(ArrowParams::default().validate().is_ok());
        assert_eq!(AnimationParams::default().frame_count, 20);
        assert_eq!(ArrowParams::default().head_length, 0.3);
    }
}
