//! Rendering abstraction layer.
//!
//! *The game loop never touches pixels directly.*  It hands a [`Level`] and
//! a [`Camera`] to a type that implements [`Renderer`] once per frame and
//! gets the finished buffer back through a closure.
//!
//! * [`software`] is the CPU column renderer; [`render_view`] is its core
//!   and can also paint straight into a caller-owned buffer.
//! * A blanket-impl [`RendererExt`] adds `draw_frame` so call-sites stay
//!   short.

use crate::world::{Camera, Level};

/// Pixel format of the software frame-buffer (0xAARRGGBB, alpha = 0xFF).
pub type Rgba = u32;

/// A renderer that owns an internal scratch buffer for the whole frame.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Ray-cast every screen column of the view from `camera`.
    fn draw_view(&mut self, level: &Level, camera: &Camera);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(
        &mut self,
        width: usize,
        height: usize,
        level: &Level,
        camera: &Camera,
        submit: F,
    ) where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        self.draw_view(level, camera);
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::{Software, render_view};
