//! Texture-object management and image upload.

use log::warn;

use super::Context;
use crate::error::GlError;
use crate::texture::{
    MagFilter, MinFilter, PixelType, TextureFormat, WrapMode, MAX_TEXTURE_UNITS,
};

/// One sampling parameter of the active texture unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexParameter {
    MinFilter(MinFilter),
    MagFilter(MagFilter),
    WrapS(WrapMode),
    WrapT(WrapMode),
    /// Recognized and ignored; mipmaps are outside the pipeline's
    /// scope.
    GenerateMipmap(bool),
}

impl Context {
    /// Selects the texture unit server-side operations target
    /// (binding, image upload, parameters, the texture matrix).
    /// An out-of-range unit latches invalid-enum.
    pub fn active_texture(&mut self, unit: usize) {
        if unit >= MAX_TEXTURE_UNITS {
            self.record_error(GlError::InvalidEnum);
            return;
        }
        self.active_texture = unit;
    }

    /// Selects the texture unit client-side array setup targets,
    /// independently of [`Context::active_texture`].
    pub fn client_active_texture(&mut self, unit: usize) {
        if unit >= MAX_TEXTURE_UNITS {
            self.record_error(GlError::InvalidEnum);
            return;
        }
        self.client_active_texture = unit;
    }

    /// Allocates one fresh texture handle per slot of `ids`.
    pub fn gen_textures(&mut self, ids: &mut [u32]) {
        self.textures.generate(ids);
    }

    /// Deletes textures, releasing their pixel storage. Every unit
    /// whose binding refers to a deleted texture falls back to 0.
    pub fn delete_textures(&mut self, ids: &[u32]) {
        for &id in ids {
            self.textures.remove(id);
            for unit in &mut self.texture_units {
                if unit.bound_texture == id {
                    unit.bound_texture = 0;
                }
            }
        }
    }

    /// Binds a texture to the active unit. Binding 0 clears the slot;
    /// binding an unknown nonzero id creates an empty record for it.
    pub fn bind_texture(&mut self, id: u32) {
        if id != 0 {
            self.textures.ensure(id);
        }
        self.texture_units[self.active_texture].bound_texture = id;
    }

    /// Whether `id` names an existing texture. 0 never does.
    pub fn is_texture(&self, id: u32) -> bool {
        id != 0 && self.textures.contains(id)
    }

    /// Sets one sampling parameter on the active unit. The values are
    /// stored and queryable; sampling itself always clamps and always
    /// picks the nearest texel.
    pub fn tex_parameter(&mut self, param: TexParameter) {
        let unit = &mut self.texture_units[self.active_texture];
        match param {
            TexParameter::MinFilter(filter) => unit.min_filter = filter,
            TexParameter::MagFilter(filter) => unit.mag_filter = filter,
            TexParameter::WrapS(mode) => unit.wrap_s = mode,
            TexParameter::WrapT(mode) => unit.wrap_t = mode,
            TexParameter::GenerateMipmap(_) => warn!("tex_parameter: mipmap generation is not implemented"),
        }
    }

    /// Uploads a full image to the texture bound on the active unit.
    ///
    /// `internal_format` must equal `format` (invalid-operation
    /// otherwise); `level` must be 0 and `border` 0. Formats other
    /// than RGBA and pixel types other than unsigned bytes are
    /// accepted with a warning and sampled as if they were RGBA.
    /// Storage is reused when the texture already has some.
    #[allow(clippy::too_many_arguments)]
    pub fn tex_image_2d(
        &mut self,
        level: i32,
        internal_format: TextureFormat,
        width: i32,
        height: i32,
        border: i32,
        format: TextureFormat,
        pixel_type: PixelType,
        pixels: Option<&[u8]>,
    ) {
        if level < 0 || border != 0 {
            self.record_error(GlError::InvalidValue);
            return;
        }
        if internal_format != format {
            self.record_error(GlError::InvalidOperation);
            return;
        }
        if width < 0 || height < 0 {
            self.record_error(GlError::InvalidValue);
            return;
        }
        if pixel_type != PixelType::UnsignedByte || level != 0 || format != TextureFormat::Rgba {
            warn!("tex_image_2d: only level-0 RGBA unsigned-byte uploads are sampled correctly");
        }

        let bound = self.texture_units[self.active_texture].bound_texture;
        let texture = self.textures.ensure(bound);
        texture.width = width as u32;
        texture.height = height as u32;
        texture.format = Some(internal_format);

        // Four bytes per pixel whatever the declared format, so the
        // sampler can always read RGBA quads.
        let storage_len = width as usize * height as usize * 4;
        let storage = texture.pixels.get_or_insert_with(Vec::new);
        storage.resize(storage_len, 0);
        if let Some(pixels) = pixels {
            let upload_len = width as usize * height as usize * internal_format.bytes_per_pixel();
            let n = upload_len.min(pixels.len()).min(storage.len());
            storage[..n].copy_from_slice(&pixels[..n]);
        }
    }

    /// Replaces a region of the bound texture's image. The region must
    /// lie inside the texture (invalid-value otherwise) and the
    /// texture must already have storage (invalid-operation).
    #[allow(clippy::too_many_arguments)]
    pub fn tex_sub_image_2d(
        &mut self,
        level: i32,
        x_offset: i32,
        y_offset: i32,
        width: i32,
        height: i32,
        format: TextureFormat,
        pixel_type: PixelType,
        pixels: Option<&[u8]>,
    ) {
        if level < 0 || width < 0 || height < 0 {
            self.record_error(GlError::InvalidValue);
            return;
        }
        if pixel_type != PixelType::UnsignedByte || level != 0 || format != TextureFormat::Rgba {
            warn!("tex_sub_image_2d: only level-0 RGBA unsigned-byte uploads are sampled correctly");
        }

        let bound = self.texture_units[self.active_texture].bound_texture;
        let texture = self.textures.ensure(bound);
        if x_offset < 0
            || y_offset < 0
            || x_offset + width > texture.width as i32
            || y_offset + height > texture.height as i32
        {
            self.record_error(GlError::InvalidValue);
            return;
        }
        let Some(storage) = &mut texture.pixels else {
            self.record_error(GlError::InvalidOperation);
            return;
        };
        let Some(pixels) = pixels else {
            return;
        };

        let bpp = format.bytes_per_pixel();
        let tex_width = texture.width as usize;
        for row in 0..height as usize {
            let src = row * width as usize * bpp;
            let dst = ((row + y_offset as usize) * tex_width + x_offset as usize) * bpp;
            let len = width as usize * bpp;
            storage[dst..dst + len].copy_from_slice(&pixels[src..src + len]);
        }
    }

    /// Compressed uploads are outside the pipeline's scope.
    pub fn compressed_tex_image_2d(&mut self) {
        warn!("compressed_tex_image_2d is not implemented");
    }

    /// Framebuffer-to-texture copies are outside the pipeline's scope.
    pub fn copy_tex_image_2d(&mut self) {
        warn!("copy_tex_image_2d is not implemented");
    }

    /// Mipmap generation is outside the pipeline's scope.
    pub fn generate_mipmap(&mut self) {
        warn!("generate_mipmap is not implemented");
    }
}
