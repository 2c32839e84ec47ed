//! Client-array setup.
//!
//! The pointer-taking entry points are `unsafe`: the context stores
//! the raw pointers and draws read through them later, so validity is
//! the caller's contract, exactly as it is for clients of the emulated
//! API.

use super::Context;
use crate::error::GlError;
use crate::state::{ClientState, ComponentType};

/// Validated parameters for one pointer call.
struct PointerSpec {
    size: u8,
    component_type: ComponentType,
    stride: usize,
}

fn check_pointer(
    size: i32,
    sizes: &[i32],
    component_type: ComponentType,
    types: &[ComponentType],
    stride: i32,
) -> Result<PointerSpec, GlError> {
    if !sizes.contains(&size) || stride < 0 {
        return Err(GlError::InvalidValue);
    }
    if !types.contains(&component_type) {
        return Err(GlError::InvalidEnum);
    }
    Ok(PointerSpec {
        size: size as u8,
        component_type,
        stride: stride as usize,
    })
}

impl Context {
    /// Describes the position array: `size` components (2–4) of
    /// `Float` or `Short` per vertex, `stride` bytes apart (0 = tightly
    /// packed).
    ///
    /// # Safety
    ///
    /// `pointer` must stay valid, covering every element any
    /// subsequent draw touches, until it is replaced by another call.
    pub unsafe fn vertex_pointer(
        &mut self,
        size: i32,
        component_type: ComponentType,
        stride: i32,
        pointer: *const u8,
    ) {
        match check_pointer(
            size,
            &[2, 3, 4],
            component_type,
            &[ComponentType::Float, ComponentType::Short],
            stride,
        ) {
            Ok(spec) => {
                self.vertex_array.size = spec.size;
                self.vertex_array.component_type = spec.component_type;
                self.vertex_array.stride = spec.stride;
                self.vertex_array.pointer = pointer;
            }
            Err(error) => self.record_error(error),
        }
    }

    /// Describes the color array: 3 or 4 components of any supported
    /// type per vertex. Unsigned-byte colors are normalized by 1/255
    /// at assembly; every other type is read as a raw float.
    ///
    /// # Safety
    ///
    /// See [`Context::vertex_pointer`].
    pub unsafe fn color_pointer(
        &mut self,
        size: i32,
        component_type: ComponentType,
        stride: i32,
        pointer: *const u8,
    ) {
        match check_pointer(
            size,
            &[3, 4],
            component_type,
            &[
                ComponentType::Byte,
                ComponentType::UnsignedByte,
                ComponentType::Short,
                ComponentType::UnsignedShort,
                ComponentType::Float,
            ],
            stride,
        ) {
            Ok(spec) => {
                self.color_array.size = spec.size;
                self.color_array.component_type = spec.component_type;
                self.color_array.stride = spec.stride;
                self.color_array.pointer = pointer;
            }
            Err(error) => self.record_error(error),
        }
    }

    /// Describes the normal array: always 3 components of `Float`,
    /// `Short`, or `Byte`. Recorded and queryable; the pipeline has no
    /// lighting to feed it into.
    ///
    /// # Safety
    ///
    /// See [`Context::vertex_pointer`].
    pub unsafe fn normal_pointer(
        &mut self,
        component_type: ComponentType,
        stride: i32,
        pointer: *const u8,
    ) {
        match check_pointer(
            3,
            &[3],
            component_type,
            &[
                ComponentType::Byte,
                ComponentType::Short,
                ComponentType::Float,
            ],
            stride,
        ) {
            Ok(spec) => {
                self.normal_array.component_type = spec.component_type;
                self.normal_array.stride = spec.stride;
                self.normal_array.pointer = pointer;
            }
            Err(error) => self.record_error(error),
        }
    }

    /// Describes the texcoord array of the client-active texture unit:
    /// 1–4 components of `Float` or `Short` per vertex.
    ///
    /// # Safety
    ///
    /// See [`Context::vertex_pointer`].
    pub unsafe fn tex_coord_pointer(
        &mut self,
        size: i32,
        component_type: ComponentType,
        stride: i32,
        pointer: *const u8,
    ) {
        match check_pointer(
            size,
            &[1, 2, 3, 4],
            component_type,
            &[ComponentType::Float, ComponentType::Short],
            stride,
        ) {
            Ok(spec) => {
                let array = &mut self.texture_units[self.client_active_texture].tex_coord_array;
                array.size = spec.size;
                array.component_type = spec.component_type;
                array.stride = spec.stride;
                array.pointer = pointer;
            }
            Err(error) => self.record_error(error),
        }
    }

    /// Enables one of the client-side arrays. The texcoord flag
    /// belongs to the client-active texture unit.
    pub fn enable_client_state(&mut self, array: ClientState) {
        self.set_client_state(array, true);
    }

    /// Disables one of the client-side arrays.
    pub fn disable_client_state(&mut self, array: ClientState) {
        self.set_client_state(array, false);
    }

    fn set_client_state(&mut self, array: ClientState, value: bool) {
        match array {
            ClientState::VertexArray => self.vertex_array.enabled = value,
            ClientState::ColorArray => self.color_array.enabled = value,
            ClientState::NormalArray => self.normal_array.enabled = value,
            ClientState::TextureCoordArray => {
                self.texture_units[self.client_active_texture]
                    .tex_coord_array
                    .enabled = value;
            }
        }
    }
}
