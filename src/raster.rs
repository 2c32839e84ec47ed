//! Triangle rasterization and the fragment stage.
//!
//! Triangles arrive in NDC. Coverage is decided by three edge
//! functions evaluated at pixel positions inside the triangle's
//! clamped bounding box; covered pixels are shaded with
//! barycentric-interpolated attributes and written back as
//! byte-swapped RGB565 plus the alpha side-channel.

use crate::color::{channel_to_u8, float_rgb_to_565, rgb_from_565, swap_bytes};
use crate::state::{BlendFactor, CompareFunc, CullFaceMode, FrontFace};
use crate::vertex::Vertex;

/// The planes a draw call writes into.
pub(crate) struct RenderTarget<'a> {
    pub width: i32,
    pub height: i32,
    pub color: &'a mut [u16],
    pub alpha: Option<&'a mut [u8]>,
}

/// Texel storage of the sampled texture, always read as RGBA quads.
pub(crate) struct TextureSampler<'a> {
    pub pixels: &'a [u8],
    pub width: i32,
    pub height: i32,
    /// Components the texcoord array supplies per vertex.
    pub coord_size: u8,
}

/// Separate RGB and alpha factor selectors.
#[derive(Clone, Copy)]
pub(crate) struct BlendState {
    pub src_rgb: BlendFactor,
    pub dst_rgb: BlendFactor,
    pub src_alpha: BlendFactor,
    pub dst_alpha: BlendFactor,
}

/// Everything the fragment stage needs, resolved once per draw.
pub(crate) struct FragmentState<'a> {
    pub texture: Option<TextureSampler<'a>>,
    /// Whether the color client array contributes.
    pub vertex_color: bool,
    pub alpha_test: Option<(CompareFunc, f32)>,
    pub blend: Option<BlendState>,
    pub culling: Option<(FrontFace, CullFaceMode)>,
}

/// The signed 2D edge function: positive when `c` lies on one side of
/// the line `a -> b`, negative on the other, and twice the signed
/// triangle area when `c` is a third vertex.
#[inline(always)]
pub(crate) fn edge_function(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Shades one covered pixel. Returns the 565 word and alpha byte to
/// store, or `None` when the alpha test discards the fragment.
#[allow(clippy::too_many_arguments)]
fn shade_fragment(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    weights: [f32; 3],
    same_color: bool,
    dst_color: u16,
    dst_alpha: u8,
    frag: &FragmentState<'_>,
) -> Option<(u16, u8)> {
    let mut src = [1.0f32; 4];

    if let Some(tex) = &frag.texture {
        let mut coord = [0.0f32; 4];
        for i in 0..tex.coord_size as usize {
            coord[i] = v0.tex[i] * weights[0] + v1.tex[i] * weights[1] + v2.tex[i] * weights[2];
        }
        let u = coord[0].clamp(0.0, 1.0);
        let v = coord[1].clamp(0.0, 1.0);
        let mut px = (u * tex.width as f32) as i32;
        let mut py = (v * tex.height as f32) as i32;
        if px == tex.width {
            px -= 1;
        }
        if py == tex.height {
            py -= 1;
        }
        let base = ((py * tex.width + px) * 4) as usize;
        let texel = &tex.pixels[base..base + 4];
        src[0] *= texel[0] as f32 * (1.0 / 255.0);
        src[1] *= texel[1] as f32 * (1.0 / 255.0);
        src[2] *= texel[2] as f32 * (1.0 / 255.0);
        src[3] *= texel[3] as f32 * (1.0 / 255.0);
    }

    if frag.vertex_color {
        if same_color {
            // Flat-shaded triangle: skip the per-pixel interpolation.
            for i in 0..4 {
                src[i] *= v0.col[i];
            }
        } else {
            for i in 0..4 {
                src[i] *=
                    v0.col[i] * weights[0] + v1.col[i] * weights[1] + v2.col[i] * weights[2];
            }
        }
    }

    if let Some((func, reference)) = frag.alpha_test {
        if !func.passes(src[3], reference) {
            return None;
        }
    }

    if let Some(blend) = &frag.blend {
        let [dr, dg, db] = rgb_from_565(dst_color);
        let dst = [dr, dg, db, dst_alpha as f32 * (1.0 / 255.0)];
        let mut result = [0.0f32; 4];
        for (i, out) in result.iter_mut().enumerate().take(3) {
            let sf = blend.src_rgb.factor(&src, &dst, i);
            let df = blend.dst_rgb.factor(&src, &dst, i);
            *out = (sf * src[i] + df * dst[i]).clamp(0.0, 1.0);
        }
        let sf = blend.src_alpha.factor(&src, &dst, 3);
        let df = blend.dst_alpha.factor(&src, &dst, 3);
        result[3] = (sf * src[3] + df * dst[3]).clamp(0.0, 1.0);
        src = result;
    }

    Some((
        float_rgb_to_565(src[0], src[1], src[2]),
        channel_to_u8(src[3]),
    ))
}

/// Rasterizes one NDC triangle into the target.
pub(crate) fn rasterize_triangle(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    frag: &FragmentState<'_>,
    target: &mut RenderTarget<'_>,
) {
    let p0 = [v0.pos[0], v0.pos[1]];
    let p1 = [v1.pos[0], v1.pos[1]];
    let p2 = [v2.pos[0], v2.pos[1]];

    let area = edge_function(p0, p1, p2);

    if let Some((front_face, cull_mode)) = frag.culling {
        let culls_positive = matches!(
            (front_face, cull_mode),
            (FrontFace::Ccw, CullFaceMode::Back) | (FrontFace::Cw, CullFaceMode::Front)
        );
        let culls_negative = matches!(
            (front_face, cull_mode),
            (FrontFace::Cw, CullFaceMode::Back) | (FrontFace::Ccw, CullFaceMode::Front)
        );
        if (culls_positive && area > 0.0) || (culls_negative && area < 0.0) {
            return;
        }
    }

    let same_color = v0.col[0] == v1.col[0]
        && v1.col[0] == v2.col[0]
        && v0.col[1] == v1.col[1]
        && v1.col[1] == v2.col[1]
        && v0.col[2] == v1.col[2]
        && v1.col[2] == v2.col[2];

    let mut min = [f32::MAX; 2];
    let mut max = [f32::MIN; 2];
    for p in [p0, p1, p2] {
        for axis in 0..2 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    for axis in 0..2 {
        min[axis] = min[axis].clamp(-1.0, 1.0);
        max[axis] = max[axis].clamp(-1.0, 1.0);
    }

    let width = target.width;
    let height = target.height;
    let pixel_width = 2.0 / width as f32;
    let pixel_height = 2.0 / height as f32;
    let inv_area = 1.0 / area;

    let min_x = ((0.5 + 0.5 * min[0]) * width as f32).floor() as i32;
    let max_x = ((0.5 + 0.5 * max[0]) * width as f32).ceil() as i32;
    let min_y = ((0.5 + 0.5 * min[1]) * height as f32).floor() as i32;
    let max_y = ((0.5 + 0.5 * max[1]) * height as f32).ceil() as i32;

    for iy in min_y..max_y {
        let py = -1.0 + iy as f32 * pixel_height;
        let mut entered_triangle = false;
        for ix in min_x..max_x {
            let px = -1.0 + ix as f32 * pixel_width;
            let p = [px, py];
            let w0 = edge_function(p1, p2, p);
            let w1 = edge_function(p2, p0, p);
            let w2 = edge_function(p0, p1, p);

            let covered = (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0)
                || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
            if !covered {
                // Triangles are convex: once a row has been entered and
                // left again there is nothing further right.
                if entered_triangle {
                    break;
                }
                continue;
            }
            entered_triangle = true;

            let index = ((height - iy - 1) * width + ix) as usize;
            let weights = [w0 * inv_area, w1 * inv_area, w2 * inv_area];

            let mut dst_color = 0u16;
            let mut dst_alpha = 255u8;
            if frag.blend.is_some() {
                dst_color = swap_bytes(target.color[index]);
                if let Some(alpha) = &target.alpha {
                    dst_alpha = alpha[index];
                }
            }

            if let Some((color, alpha)) =
                shade_fragment(v0, v1, v2, weights, same_color, dst_color, dst_alpha, frag)
            {
                target.color[index] = swap_bytes(color);
                if let Some(plane) = &mut target.alpha {
                    plane[index] = alpha;
                }
            }
        }
    }
}

/// Writes a single point-primitive vertex straight to its pixel.
/// Points ignore texturing, the alpha test, and blending.
pub(crate) fn plot_point(vertex: &Vertex, target: &mut RenderTarget<'_>) {
    let [x, y, ..] = vertex.pos;
    if !(-1.0..1.0).contains(&x) || !(-1.0..1.0).contains(&y) {
        return;
    }
    let px = ((x + 1.0) * (target.width / 2) as f32) as i32;
    let py = ((-y + 1.0) * (target.height / 2) as f32) as i32;
    let index = (py * target.width + px) as usize;
    let color = swap_bytes(float_rgb_to_565(
        vertex.col[0],
        vertex.col[1],
        vertex.col[2],
    ));
    if let Some(pixel) = target.color.get_mut(index) {
        *pixel = color;
    }
}
