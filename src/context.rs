//! The rendering context: the state machine every entry point mutates.

use log::warn;

use crate::error::GlError;
use crate::framebuffer::{ClearMask, Framebuffer};
use crate::matrix_stack::MatrixStack;
use crate::resources::{BufferObject, ResourceTable};
use crate::state::{
    BlendFactor, Capability, ClientArray, CompareFunc, CullFaceMode, FrontFace, MatrixMode,
};
use crate::surface::Config;
use crate::texture::{Texture, TextureUnit, MAX_TEXTURE_UNITS};

mod arrays;
mod draw;
mod matrices;
mod params;
mod resources;
mod textures;

pub use params::{GetParam, StringName};
pub use textures::TexParameter;

/// Depth cap of the model-view matrix stack.
pub const MAX_MODELVIEW_STACK_DEPTH: usize = 16;

/// Depth cap of the projection matrix stack.
pub const MAX_PROJECTION_STACK_DEPTH: usize = 2;

/// Scale of the fixed-point (16.16) entry-point variants.
pub(crate) const FIXED_TO_FLOAT: f32 = 1.0 / 65536.0;

/// A software GL ES 1.x rendering context.
///
/// The context owns its framebuffer planes, resource tables, and
/// matrix stacks; there is no global instance and no thread-local
/// state. Every entry point of the emulated API is a method. Calls
/// that fail latch a [`GlError`] retrievable through
/// [`Context::get_error`] and leave all state untouched; they never
/// panic and never return the error directly, matching the API being
/// emulated.
///
/// # Examples
///
/// ```
/// use softgles::{ClearMask, Context, surface};
///
/// let config = surface::configs()[0];
/// let mut gl = Context::new(&config, 32, 32);
/// gl.clear_color(0.0, 0.0, 1.0, 1.0);
/// gl.clear(ClearMask::COLOR);
/// assert_eq!(gl.get_error(), None);
/// ```
pub struct Context {
    pub(crate) config: Config,
    pub(crate) framebuffer: Framebuffer,

    pub(crate) clear_color: [f32; 4],
    pub(crate) clear_depth: f32,
    pub(crate) clear_stencil: u8,

    pub(crate) matrix_mode: MatrixMode,
    pub(crate) modelview: MatrixStack,
    pub(crate) projection: MatrixStack,

    pub(crate) textures: ResourceTable<Texture>,
    pub(crate) buffers: ResourceTable<BufferObject>,
    pub(crate) bound_array_buffer: u32,
    pub(crate) bound_element_array_buffer: u32,

    pub(crate) texture_units: [TextureUnit; MAX_TEXTURE_UNITS],
    pub(crate) active_texture: usize,
    pub(crate) client_active_texture: usize,

    pub(crate) vertex_array: ClientArray,
    pub(crate) color_array: ClientArray,
    pub(crate) normal_array: ClientArray,

    pub(crate) cull_face: bool,
    pub(crate) cull_face_mode: CullFaceMode,
    pub(crate) front_face: FrontFace,

    pub(crate) blend: bool,
    pub(crate) blend_src_rgb: BlendFactor,
    pub(crate) blend_dst_rgb: BlendFactor,
    pub(crate) blend_src_alpha: BlendFactor,
    pub(crate) blend_dst_alpha: BlendFactor,

    pub(crate) alpha_test: bool,
    pub(crate) alpha_func: CompareFunc,
    pub(crate) alpha_ref: f32,

    pub(crate) viewport: (i32, i32, i32, i32),

    pub(crate) error: Option<GlError>,
}

impl Context {
    /// Creates a context for the given config and surface dimensions.
    /// Planes are allocated per the config's channel sizes and the
    /// viewport starts out covering the whole surface.
    pub fn new(config: &Config, width: u32, height: u32) -> Self {
        Self {
            config: *config,
            framebuffer: Framebuffer::new(config, width, height),
            clear_color: [0.0; 4],
            clear_depth: 1.0,
            clear_stencil: 0,
            matrix_mode: MatrixMode::ModelView,
            modelview: MatrixStack::new(MAX_MODELVIEW_STACK_DEPTH),
            projection: MatrixStack::new(MAX_PROJECTION_STACK_DEPTH),
            textures: ResourceTable::new(),
            buffers: ResourceTable::new(),
            bound_array_buffer: 0,
            bound_element_array_buffer: 0,
            texture_units: Default::default(),
            active_texture: 0,
            client_active_texture: 0,
            vertex_array: ClientArray::new(4),
            color_array: ClientArray::new(4),
            normal_array: ClientArray::new(3),
            cull_face: false,
            cull_face_mode: CullFaceMode::Back,
            front_face: FrontFace::Ccw,
            blend: false,
            blend_src_rgb: BlendFactor::One,
            blend_dst_rgb: BlendFactor::Zero,
            blend_src_alpha: BlendFactor::One,
            blend_dst_alpha: BlendFactor::Zero,
            alpha_test: false,
            alpha_func: CompareFunc::Always,
            alpha_ref: 0.0,
            viewport: (0, 0, width as i32, height as i32),
            error: None,
        }
    }

    /// The framebuffer planes, for presentation and inspection.
    #[inline]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// The config this context was created with.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches and clears the latched error. `None` means no error has
    /// occurred since the previous fetch.
    pub fn get_error(&mut self) -> Option<GlError> {
        self.error.take()
    }

    /// Latches `error` unless an earlier one is already held.
    #[inline]
    pub(crate) fn record_error(&mut self, error: GlError) {
        self.error.get_or_insert(error);
    }

    /// Runs a fallible operation, latching its error.
    #[inline]
    pub(crate) fn latch(&mut self, result: Result<(), GlError>) {
        if let Err(error) = result {
            self.record_error(error);
        }
    }

    /// Turns a capability on.
    pub fn enable(&mut self, cap: Capability) {
        self.set_capability(cap, true);
    }

    /// Turns a capability off.
    pub fn disable(&mut self, cap: Capability) {
        self.set_capability(cap, false);
    }

    fn set_capability(&mut self, cap: Capability, value: bool) {
        match cap {
            Capability::AlphaTest => self.alpha_test = value,
            Capability::Blend => self.blend = value,
            Capability::CullFace => self.cull_face = value,
            Capability::Texture2d => self.texture_units[self.active_texture].enabled = value,
            other => warn!("enable/disable: capability {other:?} is not implemented"),
        }
    }

    /// Whether a capability is on. Unimplemented capabilities report
    /// `false` and log.
    pub fn is_enabled(&self, cap: Capability) -> bool {
        match cap {
            Capability::AlphaTest => self.alpha_test,
            Capability::Blend => self.blend,
            Capability::CullFace => self.cull_face,
            Capability::Texture2d => self.texture_units[self.active_texture].enabled,
            other => {
                warn!("is_enabled: capability {other:?} is not implemented");
                false
            }
        }
    }

    /// Sets the clear color, each channel clamped to [0, 1].
    pub fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.clear_color = [
            red.clamp(0.0, 1.0),
            green.clamp(0.0, 1.0),
            blue.clamp(0.0, 1.0),
            alpha.clamp(0.0, 1.0),
        ];
    }

    /// Fixed-point variant of [`Context::clear_color`].
    pub fn clear_color_fixed(&mut self, red: i32, green: i32, blue: i32, alpha: i32) {
        self.clear_color(
            red as f32 * FIXED_TO_FLOAT,
            green as f32 * FIXED_TO_FLOAT,
            blue as f32 * FIXED_TO_FLOAT,
            alpha as f32 * FIXED_TO_FLOAT,
        );
    }

    /// Sets the clear depth, clamped to [0, 1].
    pub fn clear_depth(&mut self, depth: f32) {
        self.clear_depth = depth.clamp(0.0, 1.0);
    }

    /// Fixed-point variant of [`Context::clear_depth`].
    pub fn clear_depth_fixed(&mut self, depth: i32) {
        self.clear_depth(depth as f32 * FIXED_TO_FLOAT);
    }

    /// Sets the stencil clear value, clamped to the config's stencil
    /// bit range.
    pub fn clear_stencil(&mut self, stencil: i32) {
        let max = (1i32 << self.config.stencil_size) - 1;
        self.clear_stencil = stencil.clamp(0, max) as u8;
    }

    /// Fills the planes selected by `mask` with their clear values.
    /// A mask with no recognized bit latches invalid-value.
    pub fn clear(&mut self, mask: ClearMask) {
        if mask.is_empty() {
            self.record_error(GlError::InvalidValue);
            return;
        }
        if mask.contains(ClearMask::COLOR) {
            self.framebuffer.clear_color(self.clear_color);
        }
        if mask.contains(ClearMask::DEPTH) {
            self.framebuffer.clear_depth(self.clear_depth);
        }
        if mask.contains(ClearMask::STENCIL) {
            self.framebuffer.clear_stencil(self.clear_stencil);
        }
    }

    /// Sets the alpha-test comparator and reference; the reference is
    /// clamped to [0, 1].
    pub fn alpha_func(&mut self, func: CompareFunc, reference: f32) {
        self.alpha_func = func;
        self.alpha_ref = reference.clamp(0.0, 1.0);
    }

    /// Fixed-point variant of [`Context::alpha_func`].
    pub fn alpha_func_fixed(&mut self, func: CompareFunc, reference: i32) {
        self.alpha_func(func, reference as f32 * FIXED_TO_FLOAT);
    }

    /// Sets both the RGB and alpha blend factors, validating each side
    /// against its accepted set.
    pub fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        if !src.valid_as_src() {
            self.record_error(GlError::InvalidEnum);
            return;
        }
        if !dst.valid_as_dst() {
            self.record_error(GlError::InvalidEnum);
            return;
        }
        self.blend_src_rgb = src;
        self.blend_src_alpha = src;
        self.blend_dst_rgb = dst;
        self.blend_dst_alpha = dst;
    }

    /// Sets the four blend factor selectors independently. Each source
    /// selector is validated against the source set and each
    /// destination selector against the destination set, the same sets
    /// [`Context::blend_func`] enforces.
    pub fn blend_func_separate(
        &mut self,
        src_rgb: BlendFactor,
        dst_rgb: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    ) {
        if !src_rgb.valid_as_src() || !src_alpha.valid_as_src() {
            self.record_error(GlError::InvalidEnum);
            return;
        }
        if !dst_rgb.valid_as_dst() || !dst_alpha.valid_as_dst() {
            self.record_error(GlError::InvalidEnum);
            return;
        }
        self.blend_src_rgb = src_rgb;
        self.blend_dst_rgb = dst_rgb;
        self.blend_src_alpha = src_alpha;
        self.blend_dst_alpha = dst_alpha;
    }

    /// Selects which faces culling removes.
    pub fn cull_face(&mut self, mode: CullFaceMode) {
        self.cull_face_mode = mode;
    }

    /// Selects the winding considered front-facing.
    pub fn front_face(&mut self, mode: FrontFace) {
        self.front_face = mode;
    }

    /// Stores the viewport rectangle. The rasterizer does not consult
    /// it; it exists for clients that read it back.
    pub fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if width < 0 || height < 0 {
            self.record_error(GlError::InvalidValue);
            return;
        }
        self.viewport = (x, y, width, height);
    }

    // Recognized entry points outside the pipeline's scope. Each logs
    // once per call and leaves the context untouched.

    /// Depth comparisons are outside the pipeline's scope.
    pub fn depth_func(&mut self, _func: CompareFunc) {
        warn!("depth_func is not implemented");
    }

    /// Depth writes are outside the pipeline's scope.
    pub fn depth_mask(&mut self, _flag: bool) {
        warn!("depth_mask is not implemented");
    }

    /// Depth range mapping is outside the pipeline's scope.
    pub fn depth_range(&mut self, _near: f32, _far: f32) {
        warn!("depth_range is not implemented");
    }

    /// Stencil comparisons are outside the pipeline's scope.
    pub fn stencil_func(&mut self, _func: CompareFunc, _reference: i32, _mask: u32) {
        warn!("stencil_func is not implemented");
    }

    /// Stencil writes are outside the pipeline's scope.
    pub fn stencil_mask(&mut self, _mask: u32) {
        warn!("stencil_mask is not implemented");
    }

    /// Scissoring is outside the pipeline's scope.
    pub fn scissor(&mut self, _x: i32, _y: i32, _width: i32, _height: i32) {
        warn!("scissor is not implemented");
    }

    /// Fog is outside the pipeline's scope.
    pub fn fog(&mut self, _density: f32) {
        warn!("fog is not implemented");
    }

    /// Lighting is outside the pipeline's scope.
    pub fn light(&mut self, _light: u32, _param: f32) {
        warn!("light is not implemented");
    }

    /// Point size is outside the pipeline's scope; points are always
    /// one pixel.
    pub fn point_size(&mut self, _size: f32) {
        warn!("point_size is not implemented");
    }

    /// Line width is outside the pipeline's scope.
    pub fn line_width(&mut self, _width: f32) {
        warn!("line_width is not implemented");
    }

    /// Polygon offset is outside the pipeline's scope.
    pub fn polygon_offset(&mut self, _factor: f32, _units: f32) {
        warn!("polygon_offset is not implemented");
    }

    /// Framebuffer objects are outside the pipeline's scope; rendering
    /// always targets the surface planes.
    pub fn gen_framebuffers(&mut self, _ids: &mut [u32]) {
        warn!("gen_framebuffers is not implemented");
    }

    /// See [`Context::gen_framebuffers`].
    pub fn bind_framebuffer(&mut self, _id: u32) {
        warn!("bind_framebuffer is not implemented");
    }

    /// Renderbuffer objects are outside the pipeline's scope.
    pub fn gen_renderbuffers(&mut self, _ids: &mut [u32]) {
        warn!("gen_renderbuffers is not implemented");
    }

    /// See [`Context::gen_renderbuffers`].
    pub fn bind_renderbuffer(&mut self, _id: u32) {
        warn!("bind_renderbuffer is not implemented");
    }

    /// Reading pixels back through the API is outside the pipeline's
    /// scope; use [`Context::framebuffer`] instead.
    pub fn read_pixels(&mut self) {
        warn!("read_pixels is not implemented; read the framebuffer directly");
    }

    /// A full pipeline flush is meaningless for a synchronous software
    /// rasterizer; every call completes before returning.
    pub fn flush(&mut self) {}

    /// See [`Context::flush`].
    pub fn finish(&mut self) {}
}
