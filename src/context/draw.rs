//! The draw call: vertex assembly, primitive assembly, rasterization.

use log::warn;

use super::Context;
use crate::error::GlError;
use crate::raster::{
    plot_point, rasterize_triangle, BlendState, FragmentState, RenderTarget, TextureSampler,
};
use crate::state::{CullFaceMode, PrimitiveMode};
use crate::vertex::{assemble, transform, Vertex};

impl Context {
    /// Draws `count` vertices starting at `first` from the current
    /// client arrays.
    ///
    /// A draw with the vertex array disabled is a silent no-op.
    /// Negative `first` or `count` latches invalid-value. Line modes
    /// are recognized but not rendered. With cull-face enabled in
    /// front-and-back mode, triangle draws are discarded whole.
    pub fn draw_arrays(&mut self, mode: PrimitiveMode, first: i32, count: i32) {
        if first < 0 || count < 0 {
            self.record_error(GlError::InvalidValue);
            return;
        }
        if !self.vertex_array.enabled {
            return;
        }
        if self.cull_face && self.cull_face_mode == CullFaceMode::FrontAndBack && mode.is_triangles()
        {
            return;
        }
        if self.bound_array_buffer != 0 {
            warn!("draw_arrays: ignoring the bound array buffer, reading client pointers");
        }

        let first = first as usize;
        let count = count as usize;

        let mvp = self.mvp_matrix();
        let texture_matrix = *self.texture_units[self.active_texture].matrix_stack.top();

        // Descriptors are tiny; copy them out so the borrow of `self`
        // can be split between the texture table and the planes below.
        let vertex_array = self.vertex_array;
        let color_array = self.color_array;
        let tex_coord_array = self.texture_units[self.client_active_texture].tex_coord_array;

        // The texcoord array comes from the client-active unit, the
        // sampled texture from the server-active one.
        let sampler = if tex_coord_array.enabled {
            let bound = self.texture_units[self.active_texture].bound_texture;
            self.textures
                .get(bound)
                .filter(|texture| texture.has_storage() && texture.width > 0 && texture.height > 0)
                .map(|texture| TextureSampler {
                    pixels: texture.pixels.as_deref().unwrap_or(&[]),
                    width: texture.width as i32,
                    height: texture.height as i32,
                    coord_size: tex_coord_array.size,
                })
        } else {
            None
        };

        let frag = FragmentState {
            texture: sampler,
            vertex_color: color_array.enabled,
            alpha_test: self.alpha_test.then_some((self.alpha_func, self.alpha_ref)),
            blend: self.blend.then_some(BlendState {
                src_rgb: self.blend_src_rgb,
                dst_rgb: self.blend_dst_rgb,
                src_alpha: self.blend_src_alpha,
                dst_alpha: self.blend_dst_alpha,
            }),
            culling: self.cull_face.then_some((self.front_face, self.cull_face_mode)),
        };

        let width = self.framebuffer.width() as i32;
        let height = self.framebuffer.height() as i32;
        let (color_plane, alpha_plane) = self.framebuffer.render_planes();
        let mut target = RenderTarget {
            width,
            height,
            color: color_plane,
            alpha: alpha_plane,
        };

        let fetch = |index: usize| -> Vertex {
            let mut vertex = unsafe {
                assemble(
                    &vertex_array,
                    color_array.enabled.then_some(&color_array),
                    tex_coord_array.enabled.then_some(&tex_coord_array),
                    index,
                )
            };
            transform(&mut vertex, &mvp, &texture_matrix);
            vertex
        };

        match mode {
            PrimitiveMode::Points => {
                for i in 0..count {
                    plot_point(&fetch(first + i), &mut target);
                }
            }
            PrimitiveMode::Triangles => {
                let mut tri = [Vertex::default(); 3];
                let mut filled = 0;
                for i in 0..count {
                    tri[filled] = fetch(first + i);
                    filled += 1;
                    if filled == 3 {
                        rasterize_triangle(&tri[0], &tri[1], &tri[2], &frag, &mut target);
                        filled = 0;
                    }
                }
            }
            PrimitiveMode::TriangleStrip => {
                let mut prev2 = Vertex::default();
                let mut prev1 = Vertex::default();
                for i in 0..count {
                    let vertex = fetch(first + i);
                    if i >= 2 {
                        // Odd triangles swap their leading vertices so
                        // every emitted triangle faces the same way.
                        if (i - 2) % 2 == 0 {
                            rasterize_triangle(&prev2, &prev1, &vertex, &frag, &mut target);
                        } else {
                            rasterize_triangle(&prev1, &prev2, &vertex, &frag, &mut target);
                        }
                    }
                    prev2 = prev1;
                    prev1 = vertex;
                }
            }
            PrimitiveMode::TriangleFan => {
                let mut hub = Vertex::default();
                let mut prev = Vertex::default();
                for i in 0..count {
                    let vertex = fetch(first + i);
                    if i == 0 {
                        hub = vertex;
                    } else {
                        if i >= 2 {
                            rasterize_triangle(&hub, &prev, &vertex, &frag, &mut target);
                        }
                        prev = vertex;
                    }
                }
            }
            PrimitiveMode::Lines | PrimitiveMode::LineStrip | PrimitiveMode::LineLoop => {
                warn!("draw_arrays: line primitives are not implemented");
            }
        }
    }

    /// Indexed drawing is outside the pipeline's scope.
    pub fn draw_elements(&mut self, _mode: PrimitiveMode, _count: i32) {
        warn!("draw_elements is not implemented; use draw_arrays");
    }
}
