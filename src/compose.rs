//! Side-by-side compositing of fetched images.
//!
//! Sources are decoded into RGBA8, copied onto a fresh canvas at their
//! origins, and the canvas is re-encoded. The blit is a plain overwrite:
//! no scaling, no alpha blending, pixels outside the canvas are clipped and
//! later placements win where they overlap.
//!
//! The canvas starts fully transparent black `(0, 0, 0, 0)`. Formats without
//! alpha drop the channel, so uncovered areas come out black in JPEG output.

use std::io::Cursor;

use clap::ValueEnum;
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, ImageFormat, RgbaImage};

use crate::error::CatError;

/// Encoded image bytes, as fetched or as produced by [`compose`].
pub type RawImage = Vec<u8>;

/// Default JPEG quality for the composite.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Largest RGBA8 working buffer a canvas may need (1 GiB).
pub const MAX_CANVAS_BYTES: u64 = 1 << 30;

/// Encoding of the composite image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Lossy JPEG at [`Canvas::jpeg_quality`].
    Jpeg,
    /// Lossless PNG with alpha.
    Png,
    /// Lossless WebP with alpha.
    Webp,
}

impl OutputFormat {
    /// Short lowercase name used in messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    /// Map a file extension (case-insensitive) to a format.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }
}

/// Where one source image lands on the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    /// Encoded source bytes.
    pub image: &'a [u8],
    /// Canvas x of the source's top-left corner.
    pub origin_x: i64,
    /// Canvas y of the source's top-left corner.
    pub origin_y: i64,
}

/// Output dimensions and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output encoding.
    pub format: OutputFormat,
    /// Quality used when `format` is JPEG (1-100).
    pub jpeg_quality: u8,
}

impl Canvas {
    /// Canvas for two `width` x `height` images laid out left to right.
    ///
    /// # Errors
    ///
    /// Returns an error if the doubled width overflows or the working buffer
    /// would exceed [`MAX_CANVAS_BYTES`].
    pub fn two_up(width: u32, height: u32, format: OutputFormat) -> Result<Self, CatError> {
        let total = width.checked_mul(2).ok_or_else(|| {
            CatError::InvalidArgument(format!("Canvas width 2 x {width} is too large"))
        })?;
        let canvas = Self { width: total, height, format, jpeg_quality: DEFAULT_JPEG_QUALITY };
        canvas.check_size()?;
        Ok(canvas)
    }

    /// Bytes needed for the RGBA8 working buffer, or `None` on overflow.
    #[must_use]
    pub fn buffer_bytes(&self) -> Option<u64> {
        u64::from(self.width).checked_mul(u64::from(self.height))?.checked_mul(4)
    }

    /// Reject canvases whose working buffer would exceed [`MAX_CANVAS_BYTES`].
    ///
    /// # Errors
    ///
    /// Returns [`CatError::InvalidArgument`] if the canvas is too large.
    pub fn check_size(&self) -> Result<(), CatError> {
        match self.buffer_bytes() {
            Some(bytes) if bytes <= MAX_CANVAS_BYTES => Ok(()),
            _ => Err(CatError::InvalidArgument(format!(
                "Canvas {}x{} needs more than {MAX_CANVAS_BYTES} bytes",
                self.width, self.height
            ))),
        }
    }

    /// Override the JPEG quality.
    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }
}

/// Placements for the two-up layout.
///
/// The second image's x offset is the configured `width`, not the decoded
/// width of the first image.
#[must_use]
pub fn two_up_placements<'a>(left: &'a [u8], right: &'a [u8], width: u32) -> [Placement<'a>; 2] {
    [
        Placement { image: left, origin_x: 0, origin_y: 0 },
        Placement { image: right, origin_x: i64::from(width), origin_y: 0 },
    ]
}

/// Decode both placements, blit them onto the canvas, and encode the result.
///
/// # Errors
///
/// Returns [`CatError::InvalidArgument`] if the canvas is too large,
/// [`CatError::Decode`] if a source cannot be decoded (nothing is encoded in
/// that case) and [`CatError::Encode`] if the composite cannot be written in
/// the canvas format.
pub fn compose(placements: [Placement<'_>; 2], canvas: &Canvas) -> Result<RawImage, CatError> {
    canvas.check_size()?;

    let mut layers = Vec::with_capacity(placements.len());
    for (index, placement) in placements.iter().enumerate() {
        let decoded = image::load_from_memory(placement.image)
            .map_err(|source| CatError::Decode { index, source })?
            .to_rgba8();
        layers.push((decoded, placement.origin_x, placement.origin_y));
    }

    let buffer = blit(canvas.width, canvas.height, &layers);
    encode(buffer, canvas)
}

/// Copy decoded layers onto a transparent `width` x `height` buffer in order.
#[must_use]
pub fn blit(width: u32, height: u32, layers: &[(RgbaImage, i64, i64)]) -> RgbaImage {
    let mut target = RgbaImage::new(width, height);
    for (layer, x, y) in layers {
        imageops::replace(&mut target, layer, *x, *y);
    }
    target
}

fn encode(buffer: RgbaImage, canvas: &Canvas) -> Result<RawImage, CatError> {
    let mut out = Cursor::new(Vec::new());
    let image = DynamicImage::ImageRgba8(buffer);

    let result = match canvas.format {
        OutputFormat::Jpeg => {
            let rgb = image.to_rgb8();
            JpegEncoder::new_with_quality(&mut out, canvas.jpeg_quality).encode_image(&rgb)
        }
        OutputFormat::Png => image.write_to(&mut out, ImageFormat::Png),
        OutputFormat::Webp => image.write_to(&mut out, ImageFormat::WebP),
    };
    result.map_err(|source| CatError::Encode { format: canvas.format.name(), source })?;

    Ok(out.into_inner())
}
