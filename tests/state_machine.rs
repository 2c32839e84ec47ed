//! State-machine behavior through the public API: matrix stacks,
//! resource tables, error latching, clears.

use approx::assert_relative_eq;
use softgles::{
    ClearMask, Context, GetParam, GlError, MatrixMode, surface,
};

fn context() -> Context {
    Context::new(&surface::configs()[2], 8, 8)
}

fn matrix(gl: &Context, param: GetParam) -> [f32; 16] {
    let mut out = [0.0f32; 16];
    assert_eq!(gl.get(param, &mut out), 16);
    out
}

const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

#[test]
fn load_identity_is_bit_exact_on_every_stack() {
    let mut gl = context();
    for (mode, param) in [
        (MatrixMode::ModelView, GetParam::ModelViewMatrix),
        (MatrixMode::Projection, GetParam::ProjectionMatrix),
        (MatrixMode::Texture, GetParam::TextureMatrix),
    ] {
        gl.matrix_mode(mode);
        gl.translate(1.0, 2.0, 3.0);
        gl.load_identity();
        assert_eq!(matrix(&gl, param), IDENTITY);
    }
}

#[test]
fn push_pop_restores_the_top_bit_exactly() {
    let mut gl = context();
    gl.rotate(31.0, 0.0, 1.0, 0.0);
    gl.translate(0.25, -0.5, 4.0);
    let before = matrix(&gl, GetParam::ModelViewMatrix);
    gl.push_matrix();
    gl.scale(3.0, 3.0, 3.0);
    gl.rotate(-90.0, 1.0, 0.0, 0.0);
    gl.pop_matrix();
    assert_eq!(matrix(&gl, GetParam::ModelViewMatrix), before);
    assert_eq!(gl.get_error(), None);
}

#[test]
fn opposite_translations_compose_to_identity() {
    let mut gl = context();
    gl.translate(1.5, -2.25, 0.125);
    gl.translate(-1.5, 2.25, -0.125);
    let top = matrix(&gl, GetParam::ModelViewMatrix);
    for i in 0..16 {
        assert_relative_eq!(top[i], IDENTITY[i], epsilon = 1e-5);
    }
}

#[test]
fn opposite_rotations_compose_to_identity() {
    let mut gl = context();
    gl.rotate(73.0, 0.0, 0.0, 1.0);
    gl.rotate(-73.0, 0.0, 0.0, 1.0);
    let top = matrix(&gl, GetParam::ModelViewMatrix);
    for i in 0..16 {
        assert_relative_eq!(top[i], IDENTITY[i], epsilon = 1e-4);
    }
}

#[test]
fn projection_stack_overflow_scenario() {
    let mut gl = context();
    gl.matrix_mode(MatrixMode::Projection);
    gl.push_matrix();
    gl.push_matrix();
    assert_eq!(gl.get_error(), Some(GlError::StackOverflow));
    let mut depth = [0i32];
    gl.get_integer(GetParam::ProjectionStackDepth, &mut depth);
    assert_eq!(depth[0], 2);
}

#[test]
fn stack_depth_never_leaves_its_bounds() {
    let mut gl = context();
    let mut depth = [0i32];
    gl.pop_matrix();
    gl.get_integer(GetParam::ModelViewStackDepth, &mut depth);
    assert_eq!(depth[0], 1);
    for _ in 0..40 {
        gl.push_matrix();
    }
    gl.get_integer(GetParam::ModelViewStackDepth, &mut depth);
    assert_eq!(depth[0], 16);
}

#[test]
fn error_latch_clears_on_fetch() {
    let mut gl = context();
    gl.clear(ClearMask(0));
    assert_eq!(gl.get_error(), Some(GlError::InvalidValue));
    assert_eq!(gl.get_error(), None);
    assert_eq!(gl.get_error(), None);
}

#[test]
fn generated_texture_ids_are_positive_and_distinct() {
    let mut gl = context();
    let mut ids = [0u32; 8];
    gl.gen_textures(&mut ids);
    for (i, &id) in ids.iter().enumerate() {
        assert!(id > 0);
        assert!(ids[..i].iter().all(|&other| other != id));
        assert!(gl.is_texture(id));
    }
}

#[test]
fn deleting_a_bound_texture_resets_the_binding() {
    let mut gl = context();
    let mut ids = [0u32; 1];
    gl.gen_textures(&mut ids);
    gl.bind_texture(ids[0]);
    let mut binding = [0i32];
    gl.get_integer(GetParam::TextureBinding2d, &mut binding);
    assert_eq!(binding[0] as u32, ids[0]);
    gl.delete_textures(&ids);
    gl.get_integer(GetParam::TextureBinding2d, &mut binding);
    assert_eq!(binding[0], 0);
}

#[test]
fn clear_fills_every_enabled_plane() {
    let mut gl = context();
    gl.clear_color(0.0, 1.0, 0.0, 0.5);
    gl.clear_depth(0.5);
    gl.clear_stencil(7);
    gl.clear(ClearMask::COLOR | ClearMask::DEPTH | ClearMask::STENCIL);

    let fb = gl.framebuffer();
    // Byte-swapped 565 green.
    assert!(fb.color().iter().all(|&px| px == 0xE007));
    assert!(fb.alpha().unwrap().iter().all(|&a| a == 128));
    assert!(fb.depth().unwrap().iter().all(|&d| d == 32767));
    assert!(fb.stencil().unwrap().iter().all(|&s| s == 7));
}

#[test]
fn server_and_client_unit_selection_are_independent() {
    let mut gl = context();
    gl.active_texture(1);
    gl.client_active_texture(0);
    let mut out = [0i32];
    gl.get_integer(GetParam::ActiveTexture, &mut out);
    assert_eq!(out[0], 1);
    gl.get_integer(GetParam::ClientActiveTexture, &mut out);
    assert_eq!(out[0], 0);
}
