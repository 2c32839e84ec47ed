//! Vertex assembly and transform.
//!
//! A draw call streams homogeneous vertex records out of the enabled
//! client arrays, pushes positions through the composed
//! model-view-projection matrix, and texcoords through the active
//! unit's texture matrix.

use crate::math::Mat4;
use crate::state::{ClientArray, ComponentType};

/// One assembled vertex. Unwritten trailing components keep the
/// `(0, 0, 0, 1)` defaults, so a 2-component position is still a valid
/// homogeneous point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Vertex {
    pub pos: [f32; 4],
    pub col: [f32; 4],
    pub tex: [f32; 4],
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            pos: [0.0, 0.0, 0.0, 1.0],
            col: [0.0, 0.0, 0.0, 1.0],
            tex: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Reads one component at `ptr`, widening to float. The pointer may be
/// arbitrarily aligned; client strides make no alignment promises.
#[inline]
unsafe fn read_component(ptr: *const u8, ty: ComponentType) -> f32 {
    match ty {
        ComponentType::Float => (ptr as *const f32).read_unaligned(),
        ComponentType::Short => (ptr as *const i16).read_unaligned() as f32,
        ComponentType::UnsignedShort => (ptr as *const u16).read_unaligned() as f32,
        ComponentType::Byte => (ptr as *const i8).read_unaligned() as f32,
        ComponentType::UnsignedByte => ptr.read() as f32,
    }
}

/// Reads the element at `index` out of a client array into the leading
/// components of `out`. When `normalize_unsigned_bytes` is set,
/// unsigned-byte components are scaled by 1/255 (the color-array
/// convention); every other type is used as a raw float.
///
/// # Safety
///
/// The array's pointer must reference at least `index + 1` elements of
/// the declared layout.
#[inline]
pub(crate) unsafe fn read_element(
    array: &ClientArray,
    index: usize,
    out: &mut [f32; 4],
    normalize_unsigned_bytes: bool,
) {
    let ty = array.component_type;
    let base = array.pointer.add(index * array.effective_stride());
    for (j, slot) in out.iter_mut().enumerate().take(array.size as usize) {
        let value = read_component(base.add(j * ty.size()), ty);
        *slot = if normalize_unsigned_bytes && ty == ComponentType::UnsignedByte {
            value * (1.0 / 255.0)
        } else {
            value
        };
    }
}

/// Assembles the vertex at `index` from the given arrays. Disabled or
/// absent channels keep the record's defaults.
///
/// # Safety
///
/// Every supplied array's pointer must cover element `index`.
pub(crate) unsafe fn assemble(
    position: &ClientArray,
    color: Option<&ClientArray>,
    tex_coord: Option<&ClientArray>,
    index: usize,
) -> Vertex {
    let mut vertex = Vertex::default();
    read_element(position, index, &mut vertex.pos, false);
    if let Some(color) = color {
        read_element(color, index, &mut vertex.col, true);
    }
    if let Some(tex_coord) = tex_coord {
        read_element(tex_coord, index, &mut vertex.tex, false);
    }
    vertex
}

/// Applies the per-vertex transforms: position through the MVP with a
/// perspective divide when `w` lands off 1, texcoord through the
/// texture matrix. No view-volume clipping happens here; positions
/// behind the eye divide to whatever they divide to.
pub(crate) fn transform(vertex: &mut Vertex, mvp: &Mat4, texture_matrix: &Mat4) {
    let mut pos = mvp.transform(vertex.pos);
    if pos[3] != 1.0 {
        let inv_w = 1.0 / pos[3];
        pos[0] *= inv_w;
        pos[1] *= inv_w;
        pos[2] *= inv_w;
    }
    vertex.pos = pos;
    vertex.tex = texture_matrix.transform(vertex.tex);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array(size: u8, ty: ComponentType, stride: usize, ptr: *const u8) -> ClientArray {
        let mut a = ClientArray::new(size);
        a.component_type = ty;
        a.stride = stride;
        a.pointer = ptr;
        a.enabled = true;
        a
    }

    #[test]
    fn short_positions_widen_and_keep_defaults() {
        let data: [i16; 4] = [10, -20, 7, 3];
        let desc = array(2, ComponentType::Short, 0, data.as_ptr() as *const u8);
        let vertex = unsafe { assemble(&desc, None, None, 1) };
        assert_eq!(vertex.pos, [7.0, 3.0, 0.0, 1.0]);
        assert_eq!(vertex.col, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn unsigned_byte_colors_normalize() {
        let pos: [f32; 6] = [0.0; 6];
        let col: [u8; 8] = [255, 0, 128, 255, 0, 255, 0, 51];
        let pos_desc = array(3, ComponentType::Float, 0, pos.as_ptr() as *const u8);
        let col_desc = array(4, ComponentType::UnsignedByte, 0, col.as_ptr() as *const u8);
        let v0 = unsafe { assemble(&pos_desc, Some(&col_desc), None, 0) };
        assert_eq!(v0.col[0], 1.0);
        assert_eq!(v0.col[2], 128.0 / 255.0);
        let v1 = unsafe { assemble(&pos_desc, Some(&col_desc), None, 1) };
        assert_eq!(v1.col[3], 51.0 / 255.0);
    }

    #[test]
    fn explicit_stride_skips_interleaved_data() {
        // x, y, padding, padding per element.
        let data: [f32; 8] = [1.0, 2.0, 9.0, 9.0, 3.0, 4.0, 9.0, 9.0];
        let desc = array(2, ComponentType::Float, 16, data.as_ptr() as *const u8);
        let vertex = unsafe { assemble(&desc, None, None, 1) };
        assert_eq!(vertex.pos[0], 3.0);
        assert_eq!(vertex.pos[1], 4.0);
    }

    #[test]
    fn transform_divides_by_w() {
        let mut vertex = Vertex {
            pos: [2.0, 4.0, 6.0, 2.0],
            ..Default::default()
        };
        transform(&mut vertex, &Mat4::IDENTITY, &Mat4::IDENTITY);
        assert_eq!(vertex.pos, [1.0, 2.0, 3.0, 2.0]);
    }

    #[test]
    fn texture_matrix_moves_texcoords() {
        let mut vertex = Vertex {
            tex: [0.25, 0.5, 0.0, 1.0],
            ..Default::default()
        };
        transform(
            &mut vertex,
            &Mat4::IDENTITY,
            &Mat4::translation(0.5, 0.0, 0.0),
        );
        assert_eq!(vertex.tex[0], 0.75);
        assert_eq!(vertex.tex[1], 0.5);
    }
}
