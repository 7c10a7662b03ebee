//! The [`Pipeline`] runner -- the primary entry point for the crate.
//!
//! One run over one image is a fixed sequence:
//!
//! ```text
//! source ──> Quantize ──> [Blur: mask + masked paste] ──> [BrightnessCorrect] ──> result
//!   │                                                            ▲
//!   └────────────────────────── source luminance ────────────────┘
//! ```
//!
//! Each stage's output is fully built before the next starts. Stages are
//! never re-entered and the source image is only read.

use std::fmt;

use super::{PipelineError, PipelineOptions};
use crate::blur;
use crate::brightness::BrightnessCorrector;
use crate::edge::{build_mask, build_mask_with_progress, BlurMask};
use crate::palette::Palette;
use crate::raster::Image;

/// A pipeline stage that reports progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Quantize,
    BlurMask,
    BrightnessCorrect,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Quantize => "color matching",
            Stage::BlurMask => "blur map",
            Stage::BrightnessCorrect => "brightness tweaking",
        })
    }
}

/// Emitted when a stage crosses a multiple of
/// [`PipelineOptions::progress_step`] percent of its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub stage: Stage,
    pub percent: u8,
}

/// Intermediate images, kept when [`PipelineOptions::debug`] is set.
#[derive(Debug, Clone)]
pub struct StageImages {
    pub quantized: Image,
    /// Present when blur ran.
    pub mask: Option<BlurMask>,
    /// Present when blur ran.
    pub blurred: Option<Image>,
}

/// Output of [`Pipeline::process()`].
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub image: Image,
    pub stages: Option<StageImages>,
}

/// Turns a column counter into deduplicated [`Progress`] events.
struct ProgressTracker<'a> {
    stage: Stage,
    columns: usize,
    step: u8,
    last: u8,
    sink: &'a mut dyn FnMut(Progress),
}

impl<'a> ProgressTracker<'a> {
    fn new(stage: Stage, columns: usize, step: u8, sink: &'a mut dyn FnMut(Progress)) -> Self {
        Self {
            stage,
            columns,
            step,
            last: 0,
            sink,
        }
    }

    fn column_done(&mut self, done: usize) {
        if self.columns == 0 {
            return;
        }
        let percent = ((done as f64 / self.columns as f64) * 100.0).round() as u8;
        if percent != self.last && percent % self.step == 0 {
            self.last = percent;
            (self.sink)(Progress {
                stage: self.stage,
                percent,
            });
        }
    }
}

/// Palette conversion pipeline for one palette and one set of options.
///
/// Construction validates the options, so [`process()`](Self::process) has
/// no configuration failures left. The pipeline holds no per-image state
/// and can be shared across threads to process many images.
///
/// # Example
///
/// ```
/// use palettone_core::{Image, Palette, Pipeline, PipelineOptions, Pixel};
///
/// let palette = Palette::from_hex(&["#000000", "#808080", "#ffffff"]).unwrap();
/// let pipeline = Pipeline::new(palette, PipelineOptions::new().blur(true)).unwrap();
///
/// let source = Image::filled(8, 8, Pixel::rgb(120, 130, 125));
/// let result = pipeline.process(&source).unwrap();
///
/// assert_eq!(result.image.width(), 8);
/// assert!(result.stages.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    palette: Palette,
    options: PipelineOptions,
    corrector: BrightnessCorrector,
}

impl Pipeline {
    /// # Errors
    ///
    /// [`PipelineError::Config`] when the options fail
    /// [`PipelineOptions::validate()`].
    pub fn new(palette: Palette, options: PipelineOptions) -> Result<Self, PipelineError> {
        options.validate()?;
        let corrector = BrightnessCorrector::new()
            .stepped(options.brightness_stepped)
            .preserve_hue(options.preserve_hue);
        Ok(Self {
            palette,
            options,
            corrector,
        })
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run all enabled stages over `source`.
    pub fn process(&self, source: &Image) -> Result<ProcessedImage, PipelineError> {
        self.process_with_progress(source, &mut |_| {})
    }

    /// [`process()`](Self::process), reporting stage progress to `on_progress`.
    pub fn process_with_progress(
        &self,
        source: &Image,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<ProcessedImage, PipelineError> {
        let columns = source.width();
        let step = self.options.progress_step;

        let quantized = {
            let mut tracker = ProgressTracker::new(Stage::Quantize, columns, step, on_progress);
            self.palette.quantize_with_progress(
                source,
                self.options.distance_metric,
                &mut |done| tracker.column_done(done),
            )
        };

        let blurred = if self.options.blur {
            let radius = self.options.blur_radius as usize;
            let mask = {
                let mut tracker = ProgressTracker::new(Stage::BlurMask, columns, step, on_progress);
                build_mask_with_progress(
                    &quantized,
                    radius,
                    self.options.blur_threshold,
                    &mut |done| tracker.column_done(done),
                )
            };
            let image = blur::apply(&quantized, &mask, radius)?;
            Some((mask, image))
        } else {
            None
        };
        let candidate = blurred.as_ref().map_or(&quantized, |(_, image)| image);

        let image = if self.options.brightness_tweak {
            let mut tracker =
                ProgressTracker::new(Stage::BrightnessCorrect, columns, step, on_progress);
            self.corrector
                .correct_image_with_progress(source, candidate, &mut |done| {
                    tracker.column_done(done)
                })?
        } else {
            candidate.clone()
        };

        let stages = self.options.debug.then(|| {
            let (mask, blurred) = blurred.unzip();
            StageImages {
                quantized,
                mask,
                blurred,
            }
        });

        Ok(ProcessedImage { image, stages })
    }

    /// The blur mask this pipeline would build for an already quantized
    /// image.
    pub fn blur_mask(&self, quantized: &Image) -> BlurMask {
        build_mask(
            quantized,
            self.options.blur_radius as usize,
            self.options.blur_threshold,
        )
    }
}

/// Build a [`Pipeline`] and run it once.
///
/// ```
/// use palettone_core::{process_image, Image, Palette, PipelineOptions, Pixel};
///
/// let palette = Palette::from_hex(&["#000", "#fff"]).unwrap();
/// let options = PipelineOptions::new().brightness_tweak(false);
/// let source = Image::filled(2, 2, Pixel::rgb(10, 10, 10));
///
/// let result = process_image(&source, &palette, &options).unwrap();
/// assert_eq!(result.image, Image::filled(2, 2, Pixel::rgb(0, 0, 0)));
/// ```
pub fn process_image(
    image: &Image,
    palette: &Palette,
    options: &PipelineOptions,
) -> Result<ProcessedImage, PipelineError> {
    Pipeline::new(palette.clone(), options.clone())?.process(image)
}
