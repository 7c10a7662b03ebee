//! Pipeline configuration.

use super::ConfigError;
use crate::color::DistanceMetric;

/// Parameters for one [`Pipeline`](super::Pipeline).
///
/// # Defaults
///
/// - Distance metric: Manhattan
/// - Blur: disabled, radius 3, threshold 10.0
/// - Brightness correction: enabled, smooth (not stepped), hue not preserved
/// - Debug: disabled (intermediate stage images are not kept)
/// - Progress: reported every 5% of a stage's columns
///
/// # Example
///
/// ```
/// use palettone_core::{DistanceMetric, PipelineOptions};
///
/// let options = PipelineOptions::new()
///     .distance_metric(DistanceMetric::Euclidean)
///     .blur(true)
///     .blur_radius(2)
///     .brightness_stepped(true);
///
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub distance_metric: DistanceMetric,

    /// Run the edge-masked blur stage.
    pub blur: bool,

    /// Dilation radius of the edge mask and standard deviation of the blur.
    ///
    /// Also the width of the border that is never scanned for edges.
    pub blur_radius: u32,

    /// Minimum absolute Laplacian response (in luminance units) that counts
    /// as an edge.
    pub blur_threshold: f64,

    /// Run the brightness correction stage.
    pub brightness_tweak: bool,

    /// Round correction factors to one decimal place.
    pub brightness_stepped: bool,

    /// Never let brightness correction clip a channel.
    pub preserve_hue: bool,

    /// Keep intermediate stage images in the result.
    pub debug: bool,

    /// Report progress each time a stage crosses a multiple of this many
    /// percent of its columns. Must be in `1..=100`.
    pub progress_step: u8,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            distance_metric: DistanceMetric::default(),
            blur: false,
            blur_radius: 3,
            blur_threshold: 10.0,
            brightness_tweak: true,
            brightness_stepped: false,
            preserve_hue: false,
            debug: false,
            progress_step: 5,
        }
    }
}

impl PipelineOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    #[inline]
    pub fn blur(mut self, enabled: bool) -> Self {
        self.blur = enabled;
        self
    }

    #[inline]
    pub fn blur_radius(mut self, radius: u32) -> Self {
        self.blur_radius = radius;
        self
    }

    #[inline]
    pub fn blur_threshold(mut self, threshold: f64) -> Self {
        self.blur_threshold = threshold;
        self
    }

    #[inline]
    pub fn brightness_tweak(mut self, enabled: bool) -> Self {
        self.brightness_tweak = enabled;
        self
    }

    #[inline]
    pub fn brightness_stepped(mut self, enabled: bool) -> Self {
        self.brightness_stepped = enabled;
        self
    }

    #[inline]
    pub fn preserve_hue(mut self, enabled: bool) -> Self {
        self.preserve_hue = enabled;
        self
    }

    #[inline]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    #[inline]
    pub fn progress_step(mut self, percent: u8) -> Self {
        self.progress_step = percent;
        self
    }

    /// Check the progress step and the blur parameters.
    ///
    /// Radius and threshold are only checked when blur is enabled, since
    /// they are unused otherwise.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.progress_step) {
            return Err(ConfigError::InvalidProgressStep(self.progress_step));
        }
        if !self.blur {
            return Ok(());
        }
        if self.blur_radius == 0 {
            return Err(ConfigError::NonPositiveBlurRadius);
        }
        if !self.blur_threshold.is_finite() || self.blur_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.blur_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PipelineOptions::new();
        assert_eq!(options.distance_metric, DistanceMetric::Manhattan);
        assert!(!options.blur);
        assert_eq!(options.blur_radius, 3);
        assert!((options.blur_threshold - 10.0).abs() < f64::EPSILON);
        assert!(options.brightness_tweak);
        assert!(!options.brightness_stepped);
        assert!(!options.preserve_hue);
        assert!(!options.debug);
        assert_eq!(options.progress_step, 5);
    }

    #[test]
    fn test_progress_step_range() {
        assert_eq!(
            PipelineOptions::new().progress_step(0).validate(),
            Err(ConfigError::InvalidProgressStep(0))
        );
        assert_eq!(
            PipelineOptions::new().progress_step(101).validate(),
            Err(ConfigError::InvalidProgressStep(101))
        );
        assert!(PipelineOptions::new().progress_step(1).validate().is_ok());
        assert!(PipelineOptions::new().progress_step(100).validate().is_ok());
    }

    #[test]
    fn test_zero_radius_rejected_only_with_blur() {
        let options = PipelineOptions::new().blur_radius(0);
        assert_eq!(options.validate(), Ok(()));
        assert_eq!(
            options.blur(true).validate(),
            Err(ConfigError::NonPositiveBlurRadius)
        );
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let negative = PipelineOptions::new().blur(true).blur_threshold(-1.0);
        assert_eq!(negative.validate(), Err(ConfigError::InvalidThreshold(-1.0)));

        let nan = PipelineOptions::new().blur(true).blur_threshold(f64::NAN);
        assert!(matches!(nan.validate(), Err(ConfigError::InvalidThreshold(_))));

        let inf = PipelineOptions::new().blur(true).blur_threshold(f64::INFINITY);
        assert!(inf.validate().is_err());
    }
}
