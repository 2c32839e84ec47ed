//! Matrix-mode operations.

use super::{Context, FIXED_TO_FLOAT};
use crate::error::GlError;
use crate::math::Mat4;
use crate::matrix_stack::MatrixStack;
use crate::state::MatrixMode;

impl Context {
    /// Selects the stack subsequent matrix operations target. The
    /// texture mode targets the active unit's stack.
    pub fn matrix_mode(&mut self, mode: MatrixMode) {
        self.matrix_mode = mode;
    }

    fn active_stack(&mut self) -> &mut MatrixStack {
        match self.matrix_mode {
            MatrixMode::ModelView => &mut self.modelview,
            MatrixMode::Projection => &mut self.projection,
            MatrixMode::Texture => &mut self.texture_units[self.active_texture].matrix_stack,
        }
    }

    /// Replaces the active stack's top with the identity.
    pub fn load_identity(&mut self) {
        self.active_stack().load(Mat4::IDENTITY);
    }

    /// Replaces the active stack's top with a column-major matrix.
    pub fn load_matrix(&mut self, m: &[f32; 16]) {
        self.active_stack().load(Mat4::from_array(*m));
    }

    /// Fixed-point variant of [`Context::load_matrix`].
    pub fn load_matrix_fixed(&mut self, m: &[i32; 16]) {
        self.load_matrix(&m.map(|x| x as f32 * FIXED_TO_FLOAT));
    }

    /// Right-multiplies the active stack's top `T` by `m`, leaving
    /// `T · m`.
    pub fn mult_matrix(&mut self, m: &[f32; 16]) {
        self.active_stack().mult(&Mat4::from_array(*m));
    }

    /// Fixed-point variant of [`Context::mult_matrix`].
    pub fn mult_matrix_fixed(&mut self, m: &[i32; 16]) {
        self.mult_matrix(&m.map(|x| x as f32 * FIXED_TO_FLOAT));
    }

    /// Duplicates the active stack's top. Latches stack-overflow at
    /// the stack's depth cap.
    pub fn push_matrix(&mut self) {
        let result = self.active_stack().push();
        self.latch(result);
    }

    /// Discards the active stack's top. Latches stack-underflow when
    /// only one matrix remains.
    pub fn pop_matrix(&mut self) {
        let result = self.active_stack().pop();
        self.latch(result);
    }

    /// Composes a translation onto the active stack's top.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.active_stack().mult(&Mat4::translation(x, y, z));
    }

    /// Fixed-point variant of [`Context::translate`].
    pub fn translate_fixed(&mut self, x: i32, y: i32, z: i32) {
        self.translate(
            x as f32 * FIXED_TO_FLOAT,
            y as f32 * FIXED_TO_FLOAT,
            z as f32 * FIXED_TO_FLOAT,
        );
    }

    /// Composes a rotation of `angle` degrees about `(x, y, z)` onto
    /// the active stack's top.
    pub fn rotate(&mut self, angle: f32, x: f32, y: f32, z: f32) {
        self.active_stack().mult(&Mat4::rotation_deg(angle, x, y, z));
    }

    /// Fixed-point variant of [`Context::rotate`].
    pub fn rotate_fixed(&mut self, angle: i32, x: i32, y: i32, z: i32) {
        self.rotate(
            angle as f32 * FIXED_TO_FLOAT,
            x as f32 * FIXED_TO_FLOAT,
            y as f32 * FIXED_TO_FLOAT,
            z as f32 * FIXED_TO_FLOAT,
        );
    }

    /// Composes an axis scaling onto the active stack's top.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.active_stack().mult(&Mat4::scaling(x, y, z));
    }

    /// Fixed-point variant of [`Context::scale`].
    pub fn scale_fixed(&mut self, x: i32, y: i32, z: i32) {
        self.scale(
            x as f32 * FIXED_TO_FLOAT,
            y as f32 * FIXED_TO_FLOAT,
            z as f32 * FIXED_TO_FLOAT,
        );
    }

    /// Composes an orthographic projection onto the active stack's
    /// top. Degenerate extents latch invalid-value.
    pub fn ortho(&mut self, l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) {
        if l == r || b == t || n == f {
            self.record_error(GlError::InvalidValue);
            return;
        }
        self.active_stack().mult(&Mat4::ortho(l, r, b, t, n, f));
    }

    /// Fixed-point variant of [`Context::ortho`].
    pub fn ortho_fixed(&mut self, l: i32, r: i32, b: i32, t: i32, n: i32, f: i32) {
        self.ortho(
            l as f32 * FIXED_TO_FLOAT,
            r as f32 * FIXED_TO_FLOAT,
            b as f32 * FIXED_TO_FLOAT,
            t as f32 * FIXED_TO_FLOAT,
            n as f32 * FIXED_TO_FLOAT,
            f as f32 * FIXED_TO_FLOAT,
        );
    }

    /// Composes a perspective frustum onto the active stack's top.
    /// Degenerate extents latch invalid-value.
    pub fn frustum(&mut self, l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) {
        if l == r || b == t || n == f {
            self.record_error(GlError::InvalidValue);
            return;
        }
        self.active_stack().mult(&Mat4::frustum(l, r, b, t, n, f));
    }

    /// Fixed-point variant of [`Context::frustum`].
    pub fn frustum_fixed(&mut self, l: i32, r: i32, b: i32, t: i32, n: i32, f: i32) {
        self.frustum(
            l as f32 * FIXED_TO_FLOAT,
            r as f32 * FIXED_TO_FLOAT,
            b as f32 * FIXED_TO_FLOAT,
            t as f32 * FIXED_TO_FLOAT,
            n as f32 * FIXED_TO_FLOAT,
            f as f32 * FIXED_TO_FLOAT,
        );
    }

    /// Composed model-view-projection for the next draw: `P · MV`.
    pub(crate) fn mvp_matrix(&self) -> Mat4 {
        self.projection.top().mul(self.modelview.top())
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
    fn load_identity_targets_the_selected_stack() {
        let mut gl = context();
        gl.matrix_mode(MatrixMode::Projection);
        gl.translate(1.0, 2.0, 3.0);
        assert_ne!(*gl.projection.top(), Mat4::IDENTITY);
        gl.load_identity();
        assert_eq!(*gl.projection.top(), Mat4::IDENTITY);
        // The model-view stack was never touched.
        assert_eq!(*gl.modelview.top(), Mat4::IDENTITY);
    }

    #[test]
    fn texture_mode_targets_the_active_unit() {
        let mut gl = context();
        gl.matrix_mode(MatrixMode::Texture);
        gl.active_texture(1);
        gl.translate(0.5, 0.0, 0.0);
        assert_eq!(*gl.texture_units[0].matrix_stack.top(), Mat4::IDENTITY);
        assert_ne!(*gl.texture_units[1].matrix_stack.top(), Mat4::IDENTITY);
    }

    #[test]
    fn projection_stack_overflows_at_its_cap() {
        let mut gl = context();
        gl.matrix_mode(MatrixMode::Projection);
        gl.push_matrix();
        assert_eq!(gl.get_error(), None);
        gl.push_matrix();
        assert_eq!(gl.get_error(), Some(GlError::StackOverflow));
        assert_eq!(gl.projection.depth(), 2);
    }

    #[test]
    fn pop_on_a_single_entry_underflows() {
        let mut gl = context();
        gl.pop_matrix();
        assert_eq!(gl.get_error(), Some(GlError::StackUnderflow));
        assert_eq!(gl.modelview.depth(), 1);
    }

    #[test]
    fn degenerate_ortho_leaves_the_top_alone() {
        let mut gl = context();
        gl.ortho(1.0, 1.0, 0.0, 1.0, -1.0, 1.0);
        assert_eq!(gl.get_error(), Some(GlError::InvalidValue));
        assert_eq!(*gl.modelview.top(), Mat4::IDENTITY);
    }

    #[test]
    fn fixed_point_is_two_to_the_minus_sixteen() {
        let mut gl = context();
        gl.translate_fixed(1 << 16, 2 << 16, -(3 << 16));
        let expected = Mat4::translation(1.0, 2.0, -3.0);
        assert_eq!(*gl.modelview.top(), expected);
    }

    #[test]
    fn mvp_composes_projection_over_modelview() {
        let mut gl = context();
        gl.matrix_mode(MatrixMode::Projection);
        gl.scale(2.0, 2.0, 2.0);
        gl.matrix_mode(MatrixMode::ModelView);
        gl.translate(1.0, 0.0, 0.0);
        let p = gl.mvp_matrix().transform([0.0, 0.0, 0.0, 1.0]);
        // Translate first, then scale.
        assert_eq!(p[0], 2.0);
    }
}
