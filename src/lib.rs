//! # softgles
//!
//! softgles is a software implementation of the fixed-function
//! OpenGL ES 1.x pipeline for devices with a linear RGB565
//! framebuffer. Everything runs on the CPU: vertex assembly from
//! strided client arrays, matrix transforms, edge-function triangle
//! rasterization, texturing, alpha testing, and blending, with
//! write-back into a byte-swapped 16-bit color plane plus an 8-bit
//! alpha side-plane.
//!
//! The API is the emulated one re-expressed in Rust: a caller-owned
//! [`Context`] value replaces the global context, integer enums become
//! Rust enums, and failures latch a [`GlError`] fetched through
//! [`Context::get_error`] instead of being returned. Presentation is
//! delegated to an external display behind the narrow
//! [`surface::Display`] trait.
//!
//! ## Basic usage
//!
//! ```
//! use softgles::{ClearMask, ComponentType, Context, PrimitiveMode, surface};
//! use softgles::state::ClientState;
//!
//! // Pick a config and create a context for a 64x64 surface.
//! let config = surface::configs()[0];
//! let mut gl = Context::new(&config, 64, 64);
//!
//! gl.clear_color(0.2, 0.2, 0.2, 1.0);
//! gl.clear(ClearMask::COLOR);
//!
//! // A single triangle from a client array.
//! let positions: [f32; 9] = [
//!     -0.5, -0.5, 0.0, //
//!     0.5, -0.5, 0.0, //
//!     0.0, 0.5, 0.0,
//! ];
//! gl.enable_client_state(ClientState::VertexArray);
//! unsafe {
//!     gl.vertex_pointer(3, ComponentType::Float, 0, positions.as_ptr() as *const u8);
//! }
//! gl.draw_arrays(PrimitiveMode::Triangles, 0, 3);
//! assert_eq!(gl.get_error(), None);
//!
//! // The finished frame is in the context's framebuffer.
//! let pixels = gl.framebuffer().color();
//! assert!(pixels.iter().any(|&px| px != 0));
//! ```

pub mod color;
mod context;
mod error;
mod framebuffer;
mod math;
mod matrix_stack;
mod raster;
mod resources;
pub mod state;
pub mod surface;
pub mod texture;
mod vertex;

pub use context::{
    Context, GetParam, StringName, TexParameter, MAX_MODELVIEW_STACK_DEPTH,
    MAX_PROJECTION_STACK_DEPTH,
};
pub use error::GlError;
pub use framebuffer::{ClearMask, Framebuffer};
pub use math::Mat4;
pub use matrix_stack::MatrixStack;
pub use state::{
    BlendFactor, Capability, ClientArray, ClientState, CompareFunc, ComponentType, CullFaceMode,
    FrontFace, MatrixMode, PrimitiveMode,
};
pub use surface::{Config, ConfigAttrib, Display, Surface};
pub use texture::{
    MagFilter, MinFilter, PixelType, TextureFormat, WrapMode, MAX_TEXTURE_SIZE, MAX_TEXTURE_UNITS,
};
