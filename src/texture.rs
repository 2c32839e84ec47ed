//! Texture objects and per-unit texture state.

use crate::matrix_stack::MatrixStack;
use crate::state::ClientArray;

/// Number of texture units a context carries.
pub const MAX_TEXTURE_UNITS: usize = 2;

/// Depth cap of each unit's texture matrix stack.
pub const MAX_TEXTURE_STACK_DEPTH: usize = 2;

/// Largest accepted texture edge, in pixels.
pub const MAX_TEXTURE_SIZE: u32 = 512;

/// Internal format declared at image upload.
///
/// Only `Rgba` is actually sampled; other formats are recorded but
/// their texels are read as 4-byte RGBA (the upload warns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    Rgba,
    Rgb,
    Alpha,
    Luminance,
    LuminanceAlpha,
}

impl TextureFormat {
    /// Bytes per pixel of the declared client data.
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgba => 4,
            TextureFormat::Rgb => 3,
            TextureFormat::LuminanceAlpha => 2,
            TextureFormat::Alpha | TextureFormat::Luminance => 1,
        }
    }
}

/// Pixel type of uploaded image data. Only `UnsignedByte` is sampled
/// correctly; anything else is accepted with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelType {
    UnsignedByte,
    UnsignedShort565,
    UnsignedShort4444,
    UnsignedShort5551,
}

/// Minification filter. Stored and queryable; sampling is always
/// nearest (filtering is outside the pipeline's scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

/// Magnification filter. Stored and queryable; sampling is always
/// nearest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagFilter {
    Nearest,
    Linear,
}

/// Texture coordinate wrap mode. Stored and queryable; sampling always
/// clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
}

/// A texture object: dimensions, declared format, and texel storage.
///
/// Storage is allocated at four bytes per pixel whatever the declared
/// format, so the sampler can always read RGBA quads. A freshly
/// generated or bound-into-existence texture has no storage and is
/// skipped by the fragment stage.
#[derive(Debug, Default)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub format: Option<TextureFormat>,
    pub pixels: Option<Vec<u8>>,
}

impl Texture {
    /// Whether the texture can be sampled.
    #[inline]
    pub fn has_storage(&self) -> bool {
        self.pixels.is_some()
    }
}

/// One texture unit: a binding slot with its own matrix stack, enable
/// flag, sampling parameters, and client texcoord array.
#[derive(Debug)]
pub struct TextureUnit {
    pub(crate) matrix_stack: MatrixStack,
    pub(crate) bound_texture: u32,
    pub(crate) enabled: bool,
    pub(crate) min_filter: MinFilter,
    pub(crate) mag_filter: MagFilter,
    pub(crate) wrap_s: WrapMode,
    pub(crate) wrap_t: WrapMode,
    pub(crate) tex_coord_array: ClientArray,
}

impl Default for TextureUnit {
    fn default() -> Self {
        Self {
            matrix_stack: MatrixStack::new(MAX_TEXTURE_STACK_DEPTH),
            bound_texture: 0,
            enabled: false,
            min_filter: MinFilter::NearestMipmapLinear,
            mag_filter: MagFilter::Linear,
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
            tex_coord_array: ClientArray::new(4),
        }
    }
}
