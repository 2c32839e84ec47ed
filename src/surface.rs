//! Surface configs and the display handoff.
//!
//! The display itself lives outside this crate, behind the narrow
//! [`Display`] trait: the library hands it a finished color plane and
//! frame boundary signals, nothing more.

use crate::context::Context;

/// The surface supports window rendering.
pub const WINDOW_BIT: u32 = 0x0004;
/// The surface supports pbuffer rendering.
pub const PBUFFER_BIT: u32 = 0x0001;
/// The config renders ES 1.x clients.
pub const OPENGL_ES1_BIT: u32 = 0x0001;

/// Performance caveat attached to a config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCaveat {
    None,
    Slow,
    NonConformant,
}

/// An immutable framebuffer configuration: channel sizes, sampling,
/// and renderability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub red_size: u8,
    pub green_size: u8,
    pub blue_size: u8,
    pub alpha_size: u8,
    pub depth_size: u8,
    pub stencil_size: u8,
    pub sample_buffers: u8,
    pub samples: u8,
    pub caveat: ConfigCaveat,
    /// Bitmask of `WINDOW_BIT` / `PBUFFER_BIT`.
    pub surface_type: u32,
    /// Bitmask of renderable client API bits.
    pub renderable_type: u32,
}

/// A queryable config attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAttrib {
    RedSize,
    GreenSize,
    BlueSize,
    AlphaSize,
    DepthSize,
    StencilSize,
    SampleBuffers,
    Samples,
    SurfaceType,
    RenderableType,
}

impl Config {
    /// Key/value query over the advertised attributes.
    pub fn attrib(&self, attrib: ConfigAttrib) -> u32 {
        match attrib {
            ConfigAttrib::RedSize => self.red_size as u32,
            ConfigAttrib::GreenSize => self.green_size as u32,
            ConfigAttrib::BlueSize => self.blue_size as u32,
            ConfigAttrib::AlphaSize => self.alpha_size as u32,
            ConfigAttrib::DepthSize => self.depth_size as u32,
            ConfigAttrib::StencilSize => self.stencil_size as u32,
            ConfigAttrib::SampleBuffers => self.sample_buffers as u32,
            ConfigAttrib::Samples => self.samples as u32,
            ConfigAttrib::SurfaceType => self.surface_type,
            ConfigAttrib::RenderableType => self.renderable_type,
        }
    }
}

const fn config(depth_size: u8, stencil_size: u8) -> Config {
    Config {
        red_size: 5,
        green_size: 6,
        blue_size: 5,
        alpha_size: 8,
        depth_size,
        stencil_size,
        sample_buffers: 0,
        samples: 0,
        caveat: ConfigCaveat::None,
        surface_type: WINDOW_BIT | PBUFFER_BIT,
        renderable_type: OPENGL_ES1_BIT,
    }
}

static CONFIGS: [Config; 4] = [
    config(0, 0),
    config(16, 0),
    config(16, 8),
    config(0, 8),
];

/// The advertised configs, in their advertised order. All are RGB565
/// with an 8-bit alpha side-plane; they differ in depth and stencil.
pub fn configs() -> &'static [Config; 4] {
    &CONFIGS
}

/// The external display a surface presents to.
///
/// Implementations typically push the plane to a panel over DMA or
/// copy it into a window. The plane is in display byte order (see
/// [`Framebuffer::color_bytes`]).
///
/// [`Framebuffer::color_bytes`]: crate::Framebuffer::color_bytes
pub trait Display {
    /// Called once per swap with the finished color plane.
    fn present(&mut self, pixels: &[u16]);

    /// Called after each present to mark the next frame's start.
    fn frame_start(&mut self);
}

/// A render surface: the bridge between a context and a display.
pub struct Surface {
    display: Box<dyn Display>,
    width: u32,
    height: u32,
}

impl Surface {
    /// Wraps a display of the given dimensions.
    pub fn new(display: Box<dyn Display>, width: u32, height: u32) -> Self {
        Self {
            display,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ends the frame: hands the context's color plane to the display
    /// and signals the next frame's start.
    pub fn swap_buffers(&mut self, context: &Context) {
        self.display.present(context.framebuffer().color());
        self.display.frame_start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_configs_in_the_documented_order() {
        let configs = configs();
        assert_eq!(configs.len(), 4);
        for config in configs {
            assert_eq!(
                (config.red_size, config.green_size, config.blue_size, config.alpha_size),
                (5, 6, 5, 8)
            );
            assert_eq!(config.surface_type, WINDOW_BIT | PBUFFER_BIT);
            assert_eq!(config.renderable_type, OPENGL_ES1_BIT);
        }
        assert_eq!(
            configs.map(|c| (c.depth_size, c.stencil_size)),
            [(0, 0), (16, 0), (16, 8), (0, 8)]
        );
    }

    #[test]
    fn attrib_answers_every_key() {
        let config = configs()[2];
        assert_eq!(config.attrib(ConfigAttrib::RedSize), 5);
        assert_eq!(config.attrib(ConfigAttrib::GreenSize), 6);
        assert_eq!(config.attrib(ConfigAttrib::DepthSize), 16);
        assert_eq!(config.attrib(ConfigAttrib::StencilSize), 8);
        assert_eq!(config.attrib(ConfigAttrib::Samples), 0);
        assert_eq!(
            config.attrib(ConfigAttrib::SurfaceType),
            WINDOW_BIT | PBUFFER_BIT
        );
    }

    #[test]
    fn swap_hands_the_plane_over_and_brackets_the_frame() {
        use std::cell::RefCell;
        use std::rc::Rc;

        #[derive(Default)]
        struct Recorder {
            events: Vec<String>,
        }

        struct TestDisplay(Rc<RefCell<Recorder>>);

        impl Display for TestDisplay {
            fn present(&mut self, pixels: &[u16]) {
                self.0
                    .borrow_mut()
                    .events
                    .push(format!("present:{}", pixels.len()));
            }
            fn frame_start(&mut self) {
                self.0.borrow_mut().events.push("frame_start".into());
            }
        }

        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut surface = Surface::new(Box::new(TestDisplay(recorder.clone())), 4, 4);
        let context = Context::new(&configs()[0], 4, 4);
        surface.swap_buffers(&context);
        assert_eq!(
            recorder.borrow().events,
            vec!["present:16".to_string(), "frame_start".to_string()]
        );
    }
}
