//! Image decoding and texture upload.

use std::path::Path;

use image::DynamicImage;
use log::debug;

use crate::context::{GlHandle, RenderContext, TextureImage};

/// GL enum values passed to `glTexParameteri`, pre-cast to `i32`.
///
/// GL constant values are small enough that the cast is always safe.
#[expect(clippy::cast_possible_wrap)]
mod params {
    pub const REPEAT: i32 = glow::REPEAT as i32;
    pub const LINEAR: i32 = glow::LINEAR as i32;
    pub const LINEAR_MIPMAP_LINEAR: i32 = glow::LINEAR_MIPMAP_LINEAR as i32;
}

/// A decoded image, flipped so that row 0 is the bottom row as GL expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// 3 (RGB) or 4 (RGBA).
    pub channels: u8,
    /// Row-major, tightly packed, `width * height * channels` bytes.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Open and decode an image file.
    ///
    /// # Errors
    ///
    /// Returns the [`image::ImageError`] if the file cannot be read or is not
    /// a supported image.
    pub fn load(path: &Path) -> Result<Self, image::ImageError> {
        let image = image::open(path)?;
        let decoded = Self::from_image(&image);
        debug!(
            "Decoded {}: {}x{}, {} channels",
            path.display(),
            decoded.width,
            decoded.height,
            decoded.channels
        );
        Ok(decoded)
    }

    /// RGB images stay RGB; everything else is converted to RGBA.
    #[must_use]
    pub fn from_image(image: &DynamicImage) -> Self {
        let flipped = image.flipv();
        let (width, height) = (flipped.width(), flipped.height());
        let (channels, pixels) = if flipped.color().channel_count() == 3 {
            (3, flipped.into_rgb8().into_raw())
        } else {
            (4, flipped.into_rgba8().into_raw())
        };
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// `glow::RGB` or `glow::RGBA`.
    #[must_use]
    pub fn format(&self) -> u32 {
        if self.channels == 3 {
            glow::RGB
        } else {
            glow::RGBA
        }
    }
}

/// Upload `image` into a new repeating, mipmapped texture.
///
/// The texture is left unbound.
///
/// # Errors
///
/// Returns the driver's message if no texture object could be allocated, or
/// if the image is too large for GL's `i32` dimensions.
pub fn upload<C: RenderContext>(ctx: &C, image: &DecodedImage) -> Result<GlHandle, String> {
    let width = i32::try_from(image.width).map_err(|_| "texture too wide".to_string())?;
    let height = i32::try_from(image.height).map_err(|_| "texture too tall".to_string())?;

    let texture = ctx.create_texture()?;
    ctx.bind_texture(Some(texture));
    ctx.tex_parameter_i32(glow::TEXTURE_WRAP_S, params::REPEAT);
    ctx.tex_parameter_i32(glow::TEXTURE_WRAP_T, params::REPEAT);
    ctx.tex_parameter_i32(glow::TEXTURE_MIN_FILTER, params::LINEAR_MIPMAP_LINEAR);
    ctx.tex_parameter_i32(glow::TEXTURE_MAG_FILTER, params::LINEAR);

    // RGB rows are not 4-byte aligned in general.
    ctx.pixel_unpack_alignment(1);
    ctx.tex_image_2d(TextureImage {
        width,
        height,
        format: image.format(),
        pixels: &image.pixels,
    });
    ctx.generate_mipmap();
    ctx.bind_texture(None);

    debug!("Uploaded {width}x{height} texture {texture}");
    Ok(texture)
}
