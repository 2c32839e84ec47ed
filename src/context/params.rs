//! State queries.
//!
//! Numeric state goes through the bulk [`Context::get`] the way the
//! emulated API's `glGet*` family works: the value count is returned
//! and as many components as fit are written. Enum-valued state has
//! typed accessors instead, since the re-typed API has no numeric
//! codes to hand back.

use log::warn;

use super::{Context, MAX_MODELVIEW_STACK_DEPTH, MAX_PROJECTION_STACK_DEPTH};
use crate::state::{BlendFactor, ClientArray, CompareFunc, CullFaceMode, FrontFace, MatrixMode};
use crate::texture::{MAX_TEXTURE_SIZE, MAX_TEXTURE_STACK_DEPTH, MAX_TEXTURE_UNITS};

/// A numeric state query. Queries against the active texture unit
/// (matrix, binding, enable) follow [`Context::active_texture`];
/// texcoord-array queries follow [`Context::client_active_texture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetParam {
    ActiveTexture,
    AlphaBits,
    AlphaTest,
    AlphaTestRef,
    ArrayBufferBinding,
    Blend,
    BlueBits,
    ClientActiveTexture,
    ColorArray,
    ColorArraySize,
    ColorArrayStride,
    ColorClearValue,
    CullFace,
    DepthBits,
    DepthClearValue,
    ElementArrayBufferBinding,
    GreenBits,
    MaxModelViewStackDepth,
    MaxProjectionStackDepth,
    MaxTextureSize,
    MaxTextureStackDepth,
    MaxTextureUnits,
    MaxViewportDims,
    ModelViewMatrix,
    ModelViewStackDepth,
    NormalArray,
    NormalArrayStride,
    ProjectionMatrix,
    ProjectionStackDepth,
    RedBits,
    StencilBits,
    StencilClearValue,
    Texture2d,
    TextureBinding2d,
    TextureCoordArray,
    TextureCoordArraySize,
    TextureCoordArrayStride,
    TextureMatrix,
    TextureStackDepth,
    VertexArray,
    VertexArraySize,
    VertexArrayStride,
    Viewport,
}

/// Identification strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringName {
    Vendor,
    Renderer,
    Version,
    Extensions,
}

impl Context {
    /// Answers a numeric query. Writes as many components as fit into
    /// `out` and returns the query's full component count.
    pub fn get(&self, param: GetParam, out: &mut [f32]) -> usize {
        let mut scratch = [0.0f32; 16];
        let values: &[f32] = match param {
            GetParam::ActiveTexture => {
                scratch[0] = self.active_texture as f32;
                &scratch[..1]
            }
            GetParam::AlphaBits => {
                scratch[0] = self.config.alpha_size as f32;
                &scratch[..1]
            }
            GetParam::AlphaTest => {
                scratch[0] = self.alpha_test as u8 as f32;
                &scratch[..1]
            }
            GetParam::AlphaTestRef => {
                scratch[0] = self.alpha_ref;
                &scratch[..1]
            }
            GetParam::ArrayBufferBinding => {
                scratch[0] = self.bound_array_buffer as f32;
                &scratch[..1]
            }
            GetParam::Blend => {
                scratch[0] = self.blend as u8 as f32;
                &scratch[..1]
            }
            GetParam::BlueBits => {
                scratch[0] = self.config.blue_size as f32;
                &scratch[..1]
            }
            GetParam::ClientActiveTexture => {
                scratch[0] = self.client_active_texture as f32;
                &scratch[..1]
            }
            GetParam::ColorArray => {
                scratch[0] = self.color_array.enabled as u8 as f32;
                &scratch[..1]
            }
            GetParam::ColorArraySize => {
                scratch[0] = self.color_array.size as f32;
                &scratch[..1]
            }
            GetParam::ColorArrayStride => {
                scratch[0] = self.color_array.stride as f32;
                &scratch[..1]
            }
            GetParam::ColorClearValue => {
                scratch[..4].copy_from_slice(&self.clear_color);
                &scratch[..4]
            }
            GetParam::CullFace => {
                scratch[0] = self.cull_face as u8 as f32;
                &scratch[..1]
            }
            GetParam::DepthBits => {
                scratch[0] = self.config.depth_size as f32;
                &scratch[..1]
            }
            GetParam::DepthClearValue => {
                scratch[0] = self.clear_depth;
                &scratch[..1]
            }
            GetParam::ElementArrayBufferBinding => {
                scratch[0] = self.bound_element_array_buffer as f32;
                &scratch[..1]
            }
            GetParam::GreenBits => {
                scratch[0] = self.config.green_size as f32;
                &scratch[..1]
            }
            GetParam::MaxModelViewStackDepth => {
                scratch[0] = MAX_MODELVIEW_STACK_DEPTH as f32;
                &scratch[..1]
            }
            GetParam::MaxProjectionStackDepth => {
                scratch[0] = MAX_PROJECTION_STACK_DEPTH as f32;
                &scratch[..1]
            }
            GetParam::MaxTextureSize => {
                scratch[0] = MAX_TEXTURE_SIZE as f32;
                &scratch[..1]
            }
            GetParam::MaxTextureStackDepth => {
                scratch[0] = MAX_TEXTURE_STACK_DEPTH as f32;
                &scratch[..1]
            }
            GetParam::MaxTextureUnits => {
                scratch[0] = MAX_TEXTURE_UNITS as f32;
                &scratch[..1]
            }
            GetParam::MaxViewportDims => {
                scratch[0] = self.framebuffer.width() as f32;
                scratch[1] = self.framebuffer.height() as f32;
                &scratch[..2]
            }
            GetParam::ModelViewMatrix => {
                scratch.copy_from_slice(&self.modelview.top().m);
                &scratch
            }
            GetParam::ModelViewStackDepth => {
                scratch[0] = self.modelview.depth() as f32;
                &scratch[..1]
            }
            GetParam::NormalArray => {
                scratch[0] = self.normal_array.enabled as u8 as f32;
                &scratch[..1]
            }
            GetParam::NormalArrayStride => {
                scratch[0] = self.normal_array.stride as f32;
                &scratch[..1]
            }
            GetParam::ProjectionMatrix => {
                scratch.copy_from_slice(&self.projection.top().m);
                &scratch
            }
            GetParam::ProjectionStackDepth => {
                scratch[0] = self.projection.depth() as f32;
                &scratch[..1]
            }
            GetParam::RedBits => {
                scratch[0] = self.config.red_size as f32;
                &scratch[..1]
            }
            GetParam::StencilBits => {
                scratch[0] = self.config.stencil_size as f32;
                &scratch[..1]
            }
            GetParam::StencilClearValue => {
                scratch[0] = self.clear_stencil as f32;
                &scratch[..1]
            }
            GetParam::Texture2d => {
                scratch[0] = self.texture_units[self.active_texture].enabled as u8 as f32;
                &scratch[..1]
            }
            GetParam::TextureBinding2d => {
                scratch[0] = self.texture_units[self.active_texture].bound_texture as f32;
                &scratch[..1]
            }
            GetParam::TextureCoordArray => {
                scratch[0] = self.texture_units[self.client_active_texture]
                    .tex_coord_array
                    .enabled as u8 as f32;
                &scratch[..1]
            }
            GetParam::TextureCoordArraySize => {
                scratch[0] =
                    self.texture_units[self.client_active_texture].tex_coord_array.size as f32;
                &scratch[..1]
            }
            GetParam::TextureCoordArrayStride => {
                scratch[0] =
                    self.texture_units[self.client_active_texture].tex_coord_array.stride as f32;
                &scratch[..1]
            }
            GetParam::TextureMatrix => {
                scratch.copy_from_slice(&self.texture_units[self.active_texture].matrix_stack.top().m);
                &scratch
            }
            GetParam::TextureStackDepth => {
                scratch[0] = self.texture_units[self.active_texture].matrix_stack.depth() as f32;
                &scratch[..1]
            }
            GetParam::VertexArray => {
                scratch[0] = self.vertex_array.enabled as u8 as f32;
                &scratch[..1]
            }
            GetParam::VertexArraySize => {
                scratch[0] = self.vertex_array.size as f32;
                &scratch[..1]
            }
            GetParam::VertexArrayStride => {
                scratch[0] = self.vertex_array.stride as f32;
                &scratch[..1]
            }
            GetParam::Viewport => {
                scratch[0] = self.viewport.0 as f32;
                scratch[1] = self.viewport.1 as f32;
                scratch[2] = self.viewport.2 as f32;
                scratch[3] = self.viewport.3 as f32;
                &scratch[..4]
            }
        };
        for (slot, value) in out.iter_mut().zip(values) {
            *slot = *value;
        }
        values.len()
    }

    /// Integer convenience wrapper over [`Context::get`].
    pub fn get_integer(&self, param: GetParam, out: &mut [i32]) -> usize {
        let mut floats = [0.0f32; 16];
        let count = self.get(param, &mut floats);
        for (slot, value) in out.iter_mut().zip(&floats[..count.min(16)]) {
            *slot = *value as i32;
        }
        count
    }

    /// Boolean convenience wrapper over [`Context::get`].
    pub fn get_boolean(&self, param: GetParam, out: &mut [bool]) -> usize {
        let mut floats = [0.0f32; 16];
        let count = self.get(param, &mut floats);
        for (slot, value) in out.iter_mut().zip(&floats[..count.min(16)]) {
            *slot = *value != 0.0;
        }
        count
    }

    /// Identification strings for clients that sniff them.
    pub fn get_string(&self, name: StringName) -> &'static str {
        match name {
            StringName::Vendor => "softgles",
            StringName::Renderer => "softgles software rasterizer",
            StringName::Version => "OpenGL ES-CM 1.0",
            StringName::Extensions => "",
        }
    }

    /// The selected matrix mode.
    pub fn current_matrix_mode(&self) -> MatrixMode {
        self.matrix_mode
    }

    /// The alpha-test comparator and reference.
    pub fn current_alpha_func(&self) -> (CompareFunc, f32) {
        (self.alpha_func, self.alpha_ref)
    }

    /// The four blend factor selectors, `(src_rgb, dst_rgb,
    /// src_alpha, dst_alpha)`.
    pub fn current_blend_func(&self) -> (BlendFactor, BlendFactor, BlendFactor, BlendFactor) {
        (
            self.blend_src_rgb,
            self.blend_dst_rgb,
            self.blend_src_alpha,
            self.blend_dst_alpha,
        )
    }

    /// The face-culling mode.
    pub fn current_cull_face_mode(&self) -> CullFaceMode {
        self.cull_face_mode
    }

    /// The front-facing winding.
    pub fn current_front_face(&self) -> FrontFace {
        self.front_face
    }

    /// The vertex-array descriptor.
    pub fn current_vertex_array(&self) -> &ClientArray {
        &self.vertex_array
    }

    /// The color-array descriptor.
    pub fn current_color_array(&self) -> &ClientArray {
        &self.color_array
    }

    /// The texcoord-array descriptor of the client-active unit.
    pub fn current_tex_coord_array(&self) -> &ClientArray {
        &self.texture_units[self.client_active_texture].tex_coord_array
    }

    /// Pointer queries are answered by the descriptor accessors.
    pub fn get_pointer(&self) {
        warn!("get_pointer is not implemented; use the array accessors");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface;

    fn context() -> Context {
        Context::new(&surface::configs()[2], 16, 8)
    }

    #[test]
    fn scalar_and_vector_counts() {
        let gl = context();
        let mut out = [0.0f32; 16];
        assert_eq!(gl.get(GetParam::RedBits, &mut out), 1);
        assert_eq!(out[0], 5.0);
        assert_eq!(gl.get(GetParam::GreenBits, &mut out), 1);
        assert_eq!(out[0], 6.0);
        assert_eq!(gl.get(GetParam::ColorClearValue, &mut out), 4);
        assert_eq!(gl.get(GetParam::ModelViewMatrix, &mut out), 16);
        assert_eq!(out[0], 1.0);
        assert_eq!(gl.get(GetParam::MaxViewportDims, &mut out), 2);
        assert_eq!(&out[..2], &[16.0, 8.0]);
    }

    #[test]
    fn a_short_buffer_still_reports_the_full_count() {
        let gl = context();
        let mut out = [0.0f32; 2];
        assert_eq!(gl.get(GetParam::ModelViewMatrix, &mut out), 16);
        assert_eq!(out, [1.0, 0.0]);
    }

    #[test]
    fn limits_match_the_advertised_maxima() {
        let gl = context();
        let mut out = [0i32; 1];
        gl.get_integer(GetParam::MaxModelViewStackDepth, &mut out);
        assert_eq!(out[0], 16);
        gl.get_integer(GetParam::MaxProjectionStackDepth, &mut out);
        assert_eq!(out[0], 2);
        gl.get_integer(GetParam::MaxTextureSize, &mut out);
        assert_eq!(out[0], 512);
        gl.get_integer(GetParam::MaxTextureUnits, &mut out);
        assert_eq!(out[0], 2);
    }

    #[test]
    fn booleans_reflect_capability_state() {
        let mut gl = context();
        let mut out = [false];
        gl.get_boolean(GetParam::Blend, &mut out);
        assert!(!out[0]);
        gl.enable(crate::state::Capability::Blend);
        gl.get_boolean(GetParam::Blend, &mut out);
        assert!(out[0]);
    }

    #[test]
    fn strings_are_stable() {
        let gl = context();
        assert_eq!(gl.get_string(StringName::Version), "OpenGL ES-CM 1.0");
        assert_eq!(gl.get_string(StringName::Extensions), "");
    }
}
