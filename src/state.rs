//! State enums and the client-array descriptor.
//!
//! The emulated API's integer enums are re-expressed as Rust enums, so
//! "invalid enum" survives only where a value is rejected for the
//! specific call site (a component type an array does not accept, a
//! blend factor the wrong side of the equation, and so on).

/// A server-side capability toggled by `enable`/`disable`.
///
/// Only the first four are implemented by the pipeline; the rest are
/// recognized so callers ported from real hardware keep working, and
/// toggling them logs a warning and does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    AlphaTest,
    Blend,
    CullFace,
    /// Texturing for the currently active texture unit.
    Texture2d,
    ColorLogicOp,
    ColorMaterial,
    DepthTest,
    Dither,
    Fog,
    Lighting,
    LineSmooth,
    Multisample,
    Normalize,
    PointSmooth,
    PolygonOffsetFill,
    RescaleNormal,
    SampleAlphaToCoverage,
    SampleAlphaToOne,
    SampleCoverage,
    ScissorTest,
    StencilTest,
}

/// Which matrix stack subsequent matrix operations target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixMode {
    ModelView,
    Projection,
    /// The texture stack of the active texture unit.
    Texture,
}

/// Comparison function for the alpha test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareFunc {
    Never,
    Less,
    Lequal,
    Equal,
    Greater,
    Notequal,
    Gequal,
    Always,
}

impl CompareFunc {
    /// Evaluates `value <op> reference`.
    #[inline]
    pub fn passes(self, value: f32, reference: f32) -> bool {
        match self {
            CompareFunc::Never => false,
            CompareFunc::Less => value < reference,
            CompareFunc::Lequal => value <= reference,
            CompareFunc::Equal => value == reference,
            CompareFunc::Greater => value > reference,
            CompareFunc::Notequal => value != reference,
            CompareFunc::Gequal => value >= reference,
            CompareFunc::Always => true,
        }
    }
}

/// A blend-equation factor selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    SrcAlphaSaturate,
}

impl BlendFactor {
    /// Resolves the factor for one channel. `component` 3 is alpha,
    /// where `SrcAlphaSaturate` collapses to 1.
    #[inline]
    pub fn factor(self, src: &[f32; 4], dst: &[f32; 4], component: usize) -> f32 {
        match self {
            BlendFactor::Zero => 0.0,
            BlendFactor::One => 1.0,
            BlendFactor::SrcColor => src[component],
            BlendFactor::OneMinusSrcColor => 1.0 - src[component],
            BlendFactor::DstColor => dst[component],
            BlendFactor::OneMinusDstColor => 1.0 - dst[component],
            BlendFactor::SrcAlpha => src[3],
            BlendFactor::OneMinusSrcAlpha => 1.0 - src[3],
            BlendFactor::DstAlpha => dst[3],
            BlendFactor::OneMinusDstAlpha => 1.0 - dst[3],
            BlendFactor::SrcAlphaSaturate => {
                if component == 3 {
                    1.0
                } else {
                    src[3].min(1.0 - dst[3])
                }
            }
        }
    }

    /// The factors `blend_func` accepts on the source side.
    #[inline]
    pub(crate) fn valid_as_src(self) -> bool {
        !matches!(self, BlendFactor::SrcColor | BlendFactor::OneMinusSrcColor)
    }

    /// The factors `blend_func` accepts on the destination side.
    #[inline]
    pub(crate) fn valid_as_dst(self) -> bool {
        !matches!(
            self,
            BlendFactor::DstColor | BlendFactor::OneMinusDstColor | BlendFactor::SrcAlphaSaturate
        )
    }
}

/// Which faces `cull_face` removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullFaceMode {
    Front,
    Back,
    /// Discards every triangle of a draw up front.
    FrontAndBack,
}

/// The winding that makes a triangle front-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontFace {
    Ccw,
    Cw,
}

/// How a draw call interprets its run of vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveMode {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl PrimitiveMode {
    #[inline]
    pub(crate) fn is_triangles(self) -> bool {
        matches!(
            self,
            PrimitiveMode::Triangles | PrimitiveMode::TriangleStrip | PrimitiveMode::TriangleFan
        )
    }
}

/// The element type of a client array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Float,
}

impl ComponentType {
    /// Size of one component in bytes.
    #[inline]
    pub fn size(self) -> usize {
        match self {
            ComponentType::Byte | ComponentType::UnsignedByte => 1,
            ComponentType::Short | ComponentType::UnsignedShort => 2,
            ComponentType::Float => 4,
        }
    }
}

/// A buffer-object binding point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

/// One of the four switchable client-side arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    VertexArray,
    ColorArray,
    NormalArray,
    /// The texcoord array of the client-active texture unit.
    TextureCoordArray,
}

/// A client-array descriptor: where a draw reads one vertex channel.
///
/// The pointer is an unvalidated external reference; it must stay
/// valid for every draw issued while this descriptor is current (see
/// [`Context::vertex_pointer`]).
///
/// [`Context::vertex_pointer`]: crate::Context::vertex_pointer
#[derive(Debug, Clone, Copy)]
pub struct ClientArray {
    pub enabled: bool,
    /// Components per element.
    pub size: u8,
    pub component_type: ComponentType,
    /// Byte stride between elements; 0 means tightly packed.
    pub stride: usize,
    pub pointer: *const u8,
}

impl ClientArray {
    pub(crate) fn new(size: u8) -> Self {
        Self {
            enabled: false,
            size,
            component_type: ComponentType::Float,
            stride: 0,
            pointer: std::ptr::null(),
        }
    }

    /// Byte distance between consecutive elements.
    #[inline]
    pub fn effective_stride(&self) -> usize {
        if self.stride != 0 {
            self.stride
        } else {
            self.size as usize * self.component_type.size()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tightly_packed_stride_follows_type() {
        let mut array = ClientArray::new(3);
        assert_eq!(array.effective_stride(), 12);
        array.component_type = ComponentType::Short;
        assert_eq!(array.effective_stride(), 6);
        array.stride = 20;
        assert_eq!(array.effective_stride(), 20);
    }

    #[test]
    fn saturate_factor_differs_per_channel() {
        let src = [0.0, 0.0, 0.0, 0.25];
        let dst = [0.0, 0.0, 0.0, 0.5];
        assert_eq!(BlendFactor::SrcAlphaSaturate.factor(&src, &dst, 0), 0.25);
        assert_eq!(BlendFactor::SrcAlphaSaturate.factor(&src, &dst, 3), 1.0);
    }

    #[test]
    fn compare_funcs_cover_the_boundary() {
        assert!(CompareFunc::Lequal.passes(0.5, 0.5));
        assert!(!CompareFunc::Less.passes(0.5, 0.5));
        assert!(CompareFunc::Gequal.passes(0.5, 0.5));
        assert!(!CompareFunc::Greater.passes(0.5, 0.5));
        assert!(CompareFunc::Always.passes(f32::NAN, 0.0));
        assert!(!CompareFunc::Never.passes(1.0, 0.0));
    }
}
