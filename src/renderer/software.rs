//! ---------------------------------------------------------------------------
//! Classic software (CPU) column renderer
//!
//! * Fills an `&mut [u32]` frame-buffer in **0xAARRGGBB** format.
//! * One [`RayChain`] is built per screen column and painted immediately by
//!   the compositor; columns never share pixels, so no Z-buffer is needed.
//! * The chain buffer lives in the renderer and is reused for every column
//!   of every frame.
//! ---------------------------------------------------------------------------

pub mod compositor;
pub mod palette;

use crate::{
    engine::{ChainBuilder, RayChain, Screen},
    renderer::{Renderer, Rgba},
    world::{Camera, Level},
};

pub use compositor::{PaintContext, paint_column};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Portal-aware ray-casting column renderer.
pub struct Software {
    scratch: Vec<Rgba>,
    chain: RayChain,
    builder: ChainBuilder,
    screen: Screen,
}

impl Default for Software {
    fn default() -> Self {
        Self::with_builder(ChainBuilder::default())
    }
}

impl Software {
    /// Renderer whose columns follow portals as `builder` says.
    pub fn with_builder(builder: ChainBuilder) -> Self {
        Self {
            scratch: Vec::new(),
            chain: RayChain::new(),
            builder,
            screen: Screen::new(0, 0),
        }
    }

    #[inline]
    pub fn screen(&self) -> Screen {
        self.screen
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.screen.w || h != self.screen.h {
            self.screen = Screen::new(w, h);
            self.scratch.resize(w * h, 0);
        }

        self.scratch.fill(palette::CLEAR);
    }

    fn draw_view(&mut self, level: &Level, camera: &Camera) {
        render_view(
            &mut self.scratch,
            self.screen,
            level,
            camera,
            &self.builder,
            &mut self.chain,
        );
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.screen.w, self.screen.h);
    }
}

/// Ray-cast and paint every column of `screen` into `buf`.
///
/// `buf` is row-major (`y * w + x`) and must hold `screen.w * screen.h`
/// pixels.  `chain` is scratch space, overwritten per column.
pub fn render_view(
    buf: &mut [Rgba],
    screen: Screen,
    level: &Level,
    camera: &Camera,
    builder: &ChainBuilder,
    chain: &mut RayChain,
) {
    debug_assert_eq!(buf.len(), screen.len());
    if screen.is_empty() {
        return;
    }
    for x in 0..screen.w {
        builder.build_column(level, camera, x, screen.w, chain);
        paint_column(buf, screen, x, chain);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
