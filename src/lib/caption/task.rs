//! Module implementing the actual captioning task.
//! Most if not all captioning logic lives here.

use std::io::Cursor;
use std::ops::Deref;
use std::sync::Arc;

use image::{DynamicImage, ImageOutputFormat};

use crate::canvas::{prepare, Canvas};
use crate::model::{Caption, CaptionRequest, FontChoice, ImageSource};
use crate::resources::{decode_image, load_image_file, Font, Loader};
use crate::text::{self, fit, layout, render, Style};
use super::engine::{self, Config, OutputFormat};
use super::error::CaptionError;
use super::output::CaptionOutput;


/// Represents a single captioning task and contains all the relevant logic.
///
/// The task works on a snapshot of the engine configuration
/// taken when it was created.
pub(super) struct CaptionTask<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    request: CaptionRequest,
    config: Config,
    engine: Arc<engine::Inner<Il, Fl>>,
}

impl<Il, Fl> Deref for CaptionTask<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    type Target = CaptionRequest;
    fn deref(&self) -> &Self::Target {
        &self.request  // makes the rendering code a little terser
    }
}

impl<Il, Fl> CaptionTask<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    #[inline]
    pub fn new(request: CaptionRequest, config: Config,
               engine: Arc<engine::Inner<Il, Fl>>) -> Self {
        CaptionTask{request, config, engine}
    }
}

impl<Il, Fl> CaptionTask<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    /// Perform the captioning task.
    pub fn perform(self) -> Result<CaptionOutput, CaptionError> {
        debug!("Rendering {:?}", self.request);

        // Fonts are loaded before anything is drawn,
        // so that a missing one doesn't leave a half-captioned image behind.
        let captions = self.captions().into_iter()
            .map(|caption| {
                let font = self.load_font(caption.font)?;
                Ok((caption, font))
            })
            .collect::<Result<Vec<_>, CaptionError>>()?;
        if captions.is_empty() {
            debug!("No caption text, the image will be left as-is");
        }

        let image = self.load_image()?;
        let target_size = self.target_size.or(self.config.default_target_size);
        let mut canvas = prepare(image, target_size)?;

        for &(ref caption, ref font) in &captions {
            self.draw_caption(&mut canvas, caption, font);
        }

        self.encode_result(canvas)
    }

    fn load_font(&self, choice: FontChoice) -> Result<Arc<Font>, CaptionError> {
        let name = choice.resource_name();
        trace!("Loading font `{}`...", name);
        self.engine.font_loader.load(name)
            .map_err(|e| CaptionError::font_load(name, e))
    }

    fn load_image(&self) -> Result<DynamicImage, CaptionError> {
        let name = self.image.name();
        trace!("Loading image {}...", name);
        match self.image {
            ImageSource::Preset(ref preset) => self.engine.image_loader.load(preset)
                .map(|img| (*img).clone())
                .map_err(|e| CaptionError::image_load(name, e)),
            ImageSource::Path(ref path) => load_image_file(path)
                .map_err(|e| CaptionError::image_load(name, e)),
            ImageSource::Bytes(ref bytes) => decode_image(bytes)
                .map_err(|e| CaptionError::image_load(name, e)),
        }
    }

    /// Fit, lay out and draw a single caption.
    fn draw_caption(&self, canvas: &mut Canvas, caption: &Caption, font: &Font) {
        let text = caption.normalized_text();
        debug!("Rendering {:?} caption: {:?}", caption.slot, text);

        trace!("Checking if font `{}` has all glyphs for the caption", font.name());
        text::check(font, &text);

        let max_width = self.config.max_text_width(canvas.width());
        let fitted = fit(&text, font, max_width,
            self.config.initial_font_size, self.config.min_font_size,
            self.config.font_size_step);
        debug!("Caption fitted into {} line(s) at font size {}",
            fitted.lines.len(), fitted.font_size);

        let lines = layout(&fitted, canvas.width(), canvas.height(),
            caption.slot, &self.config.margins);
        let style = Style::for_font(caption.font, self.config.outline_width);
        render(canvas, &lines, font, &style);
    }

    /// Encode final result as bytes of the configured image format.
    fn encode_result(&self, canvas: Canvas) -> Result<CaptionOutput, CaptionError> {
        let format = self.config.output_format;
        debug!("Encoding final image as {}...", format);

        let image = canvas.into_rgb();
        let dimensions = image.dimensions();
        let output_format = match format {
            OutputFormat::Jpeg => {
                trace!("Writing JPEG with quality {}", self.config.jpeg_quality);
                ImageOutputFormat::Jpeg(self.config.jpeg_quality)
            }
            OutputFormat::Png => ImageOutputFormat::Png,
        };

        let mut result = vec![];
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut result), output_format)
            .map_err(CaptionError::Encode)?;
        trace!("Encoded image has {} byte(s)", result.len());

        Ok(CaptionOutput::new(format, dimensions, result))
    }
}
