//! Module implementing the canvas that captions are drawn on.

use std::fmt;

use image::{DynamicImage, GenericImageView, RgbImage, RgbaImage};
use image::imageops::FilterType;

use crate::caption::CaptionError;
use crate::model::Color;


/// Raster buffer that caption text is rendered onto.
///
/// Pixels are kept as RGBA so that text can be alpha-blended;
/// the alpha channel is dropped on export.
#[derive(Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    #[inline]
    pub fn new(image: RgbaImage) -> Self {
        Canvas{image}
    }

    /// Create a canvas filled with a single color.
    #[inline]
    pub fn blank(width: u32, height: u32, color: Color) -> Self {
        Canvas::new(RgbaImage::from_pixel(width, height, color.to_rgba(0xff)))
    }
}

impl Canvas {
    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    #[inline]
    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Convert the canvas into an opaque RGB image, suitable for export.
    pub fn into_rgb(self) -> RgbImage {
        DynamicImage::ImageRgba8(self.image).to_rgb8()
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Canvas({}x{})", self.width(), self.height())
    }
}


/// Prepare the source image for captioning.
///
/// If `target_size` is given, the image is scaled (preserving its aspect ratio)
/// so that its shorter side matches the target, and then center-cropped
/// to a `target_size`x`target_size` square.
/// Otherwise the image keeps its original dimensions.
///
/// The square is cut out of the source before resizing,
/// so no intermediate buffer is ever bigger than the source or the result.
pub fn prepare(image: DynamicImage, target_size: Option<u32>) -> Result<Canvas, CaptionError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CaptionError::Render(format!("image has no pixels ({}x{})", width, height)));
    }
    trace!("Preparing {}x{} image (target size: {:?})", width, height, target_size);

    let target = match target_size {
        Some(0) => return Err(CaptionError::Render("target size must be positive".into())),
        Some(t) => t,
        None => {
            debug!("Keeping original image size of {}x{}", width, height);
            return Ok(Canvas::new(image.to_rgba8()));
        }
    };

    let (x, y, side) = center_square(width, height);
    let image = if (width, height) != (side, side) {
        trace!("Cropping {}x{} square at ({}, {})", side, side, x, y);
        image.crop_imm(x, y, side, side)
    } else {
        image
    };
    let image = if side != target {
        debug!("Resizing {}x{} square to {}x{}", side, side, target, target);
        image.resize_exact(target, target, FilterType::Lanczos3)
    } else {
        image
    };
    Ok(Canvas::new(image.to_rgba8()))
}

/// Largest centered square within an image of given size,
/// as `(x, y, side)`.
fn center_square(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}
