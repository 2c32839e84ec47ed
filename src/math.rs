//! A 4×4 column-major matrix and the canonical transform constructors.
//!
//! Matrices are stored the way the client API supplies them: sixteen
//! floats, column-major, so `m[12..15]` is the translation column.

/// A 4×4 column-major matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// Elements in column-major order: `m[col * 4 + row]`.
    pub m: [f32; 16],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Wraps a column-major element array.
    #[inline]
    pub fn from_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// Multiplies `self · other`. `other`'s columns are the second
    /// operand, which is what makes `mult_matrix` compose client
    /// matrices onto the stack top in call order.
    pub fn mul(&self, other: &Mat4) -> Mat4 {
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.m[k * 4 + row] * other.m[col * 4 + k];
                }
                out[col * 4 + row] = acc;
            }
        }
        Mat4 { m: out }
    }

    /// Transforms a homogeneous column vector.
    #[inline]
    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let m = &self.m;
        [
            m[0] * v[0] + m[4] * v[1] + m[8] * v[2] + m[12] * v[3],
            m[1] * v[0] + m[5] * v[1] + m[9] * v[2] + m[13] * v[3],
            m[2] * v[0] + m[6] * v[1] + m[10] * v[2] + m[14] * v[3],
            m[3] * v[0] + m[7] * v[1] + m[11] * v[2] + m[15] * v[3],
        ]
    }

    /// Translation matrix.
    #[inline]
    pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4 {
            m: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                x, y, z, 1.0,
            ],
        }
    }

    /// Axis scaling matrix.
    #[inline]
    pub fn scaling(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4 {
            m: [
                x, 0.0, 0.0, 0.0, //
                0.0, y, 0.0, 0.0, //
                0.0, 0.0, z, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Rotation of `angle_deg` degrees about the axis `(x, y, z)`.
    /// The axis is used as given; callers pass unit axes.
    pub fn rotation_deg(angle_deg: f32, x: f32, y: f32, z: f32) -> Mat4 {
        let (s, c) = angle_deg.to_radians().sin_cos();
        let t = 1.0 - c;
        Mat4 {
            m: [
                x * x * t + c,
                y * x * t + z * s,
                x * z * t - y * s,
                0.0,
                x * y * t - z * s,
                y * y * t + c,
                y * z * t + x * s,
                0.0,
                x * z * t + y * s,
                y * z * t - x * s,
                z * z * t + c,
                0.0,
                0.0,
                0.0,
                0.0,
                1.0,
            ],
        }
    }

    /// Orthographic projection. Callers reject degenerate extents.
    pub fn ortho(l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) -> Mat4 {
        let tx = -(r + l) / (r - l);
        let ty = -(t + b) / (t - b);
        let tz = -(f + n) / (f - n);
        Mat4 {
            m: [
                2.0 / (r - l),
                0.0,
                0.0,
                0.0,
                0.0,
                2.0 / (t - b),
                0.0,
                0.0,
                0.0,
                0.0,
                -2.0 / (f - n),
                0.0,
                tx,
                ty,
                tz,
                1.0,
            ],
        }
    }

    /// Perspective frustum projection. Callers reject degenerate extents.
    pub fn frustum(l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) -> Mat4 {
        let a = (r + l) / (r - l);
        let b_ = (t + b) / (t - b);
        let c = -(f + n) / (f - n);
        let d = -2.0 * f * n / (f - n);
        Mat4 {
            m: [
                2.0 * n / (r - l),
                0.0,
                0.0,
                0.0,
                0.0,
                2.0 * n / (t - b),
                0.0,
                0.0,
                a,
                b_,
                c,
                -1.0,
                0.0,
                0.0,
                d,
                0.0,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_mat_eq(a: &Mat4, b: &Mat4, epsilon: f32) {
        for i in 0..16 {
            assert_relative_eq!(a.m[i], b.m[i], epsilon = epsilon);
        }
    }

    #[test]
    fn identity_is_multiplicative_unit() {
        let m = Mat4::translation(3.0, -2.0, 7.5).mul(&Mat4::scaling(2.0, 2.0, 0.5));
        assert_eq!(Mat4::IDENTITY.mul(&m), m);
        assert_eq!(m.mul(&Mat4::IDENTITY), m);
    }

    #[test]
    fn translation_moves_points() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(m.transform([0.0, 0.0, 0.0, 1.0]), [1.0, 2.0, 3.0, 1.0]);
        // Direction vectors (w = 0) are unaffected.
        assert_eq!(m.transform([1.0, 0.0, 0.0, 0.0]), [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn opposite_translations_cancel() {
        let m = Mat4::translation(4.0, -1.5, 9.0).mul(&Mat4::translation(-4.0, 1.5, -9.0));
        assert_mat_eq(&m, &Mat4::IDENTITY, 1e-5);
    }

    #[test]
    fn opposite_rotations_cancel() {
        let m = Mat4::rotation_deg(37.0, 0.0, 0.0, 1.0).mul(&Mat4::rotation_deg(
            -37.0, 0.0, 0.0, 1.0,
        ));
        assert_mat_eq(&m, &Mat4::IDENTITY, 1e-4);
    }

    #[test]
    fn quarter_turn_about_z() {
        let m = Mat4::rotation_deg(90.0, 0.0, 0.0, 1.0);
        let p = m.transform([1.0, 0.0, 0.0, 1.0]);
        assert_relative_eq!(p[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(p[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn ortho_maps_extents_to_ndc() {
        let m = Mat4::ortho(0.0, 320.0, 0.0, 240.0, -1.0, 1.0);
        let lo = m.transform([0.0, 0.0, 0.0, 1.0]);
        let hi = m.transform([320.0, 240.0, 0.0, 1.0]);
        assert_relative_eq!(lo[0], -1.0, epsilon = 1e-6);
        assert_relative_eq!(lo[1], -1.0, epsilon = 1e-6);
        assert_relative_eq!(hi[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(hi[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn frustum_projects_onto_near_plane() {
        let m = Mat4::frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        // A point on the near plane at the frustum corner keeps its
        // position after the divide.
        let p = m.transform([1.0, 1.0, -1.0, 1.0]);
        assert_relative_eq!(p[0] / p[3], 1.0, epsilon = 1e-6);
        assert_relative_eq!(p[1] / p[3], 1.0, epsilon = 1e-6);
    }
}
