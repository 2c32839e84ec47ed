//! Buffer-object management.
//!
//! Buffer objects are honored as handles only: creation, deletion,
//! binding, and existence queries work, while data uploads are
//! rejected with a warning and draws keep reading the client pointers.

use log::warn;

use super::Context;
use crate::state::BufferTarget;

impl Context {
    /// Allocates one fresh buffer handle per slot of `ids`.
    pub fn gen_buffers(&mut self, ids: &mut [u32]) {
        self.buffers.generate(ids);
    }

    /// Deletes buffers. A binding that refers to a deleted buffer
    /// falls back to 0 on both targets.
    pub fn delete_buffers(&mut self, ids: &[u32]) {
        for &id in ids {
            self.buffers.remove(id);
            if self.bound_array_buffer == id {
                self.bound_array_buffer = 0;
            }
            if self.bound_element_array_buffer == id {
                self.bound_element_array_buffer = 0;
            }
        }
    }

    /// Binds a buffer to a target. Binding 0 clears the target;
    /// binding an unknown nonzero id creates an empty record for it.
    pub fn bind_buffer(&mut self, target: BufferTarget, id: u32) {
        if id != 0 {
            self.buffers.ensure(id);
        }
        match target {
            BufferTarget::Array => self.bound_array_buffer = id,
            BufferTarget::ElementArray => self.bound_element_array_buffer = id,
        }
    }

    /// Whether `id` names an existing buffer. 0 never does.
    pub fn is_buffer(&self, id: u32) -> bool {
        id != 0 && self.buffers.contains(id)
    }

    /// Buffer data uploads are outside the pipeline's scope; draws
    /// read client pointers even while a buffer is bound.
    pub fn buffer_data(&mut self, _target: BufferTarget, _data: &[u8]) {
        warn!("buffer_data is not implemented; draws read client arrays");
    }

    /// See [`Context::buffer_data`].
    pub fn buffer_sub_data(&mut self, _target: BufferTarget, _offset: usize, _data: &[u8]) {
        warn!("buffer_sub_data is not implemented; draws read client arrays");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface;

    fn context() -> Context {
        Context::new(&surface::configs()[0], 4, 4)
    }

    #[test]
    fn generated_buffers_exist_and_zero_does_not() {
        let mut gl = context();
        let mut ids = [0u32; 2];
        gl.gen_buffers(&mut ids);
        assert!(ids.iter().all(|&id| id > 0));
        assert!(gl.is_buffer(ids[0]));
        assert!(gl.is_buffer(ids[1]));
        assert!(!gl.is_buffer(0));
        assert!(!gl.is_buffer(ids[1] + 1));
    }

    #[test]
    fn delete_clears_both_bindings() {
        let mut gl = context();
        let mut ids = [0u32; 1];
        gl.gen_buffers(&mut ids);
        gl.bind_buffer(BufferTarget::Array, ids[0]);
        gl.bind_buffer(BufferTarget::ElementArray, ids[0]);
        gl.delete_buffers(&ids);
        assert_eq!(gl.bound_array_buffer, 0);
        assert_eq!(gl.bound_element_array_buffer, 0);
        assert!(!gl.is_buffer(ids[0]));
    }

    #[test]
    fn binding_an_unknown_id_creates_it() {
        let mut gl = context();
        gl.bind_buffer(BufferTarget::Array, 99);
        assert!(gl.is_buffer(99));
        gl.bind_buffer(BufferTarget::Array, 0);
        assert_eq!(gl.bound_array_buffer, 0);
        assert!(gl.is_buffer(99));
    }
}
