//! Column compositor: turns one [`RayChain`] into the pixels of one screen
//! column.
//!
//! * The wall is the chain's *terminal* hit, i.e. whatever is seen through
//!   every portal on the way.  Portal cells themselves are never drawn.
//! * Floor and ceiling are painted per chain entry, farthest first.  Entry
//!   `i` owns the floor rows between its own wall bottom and the wall bottom
//!   of the next *nearer* entry; the nearest one runs to the screen edge.
//!   Each entry projects its rows against its own (possibly re-originated)
//!   origin, which keeps the checkerboard continuous across a portal.
//! * The ceiling mirrors the floor: floor row `y` also paints row `h - y`.

use crate::{
    engine::{Ray, RayChain, Screen},
    renderer::{
        Rgba,
        software::palette::{self, CEILING, FLOOR},
    },
};

/// Screen-space extent of one projected wall hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintContext {
    /// Unclamped projected wall height in pixels.
    pub line_height: i32,
    /// First wall row, clamped to `0..h`.
    pub draw_start: i32,
    /// Last wall row, clamped to `0..h`.
    pub draw_end: i32,
    /// The unclamped bottom ran past the screen: this wall fills the
    /// column's lower half and leaves no floor of its own.
    pub clipped: bool,
}

impl PaintContext {
    /// ```text
    /// H     = h / distance
    /// start = clamp(h/2 - H/2, 0, h-1)
    /// end   = clamp(h/2 + H/2, 0, h-1)
    /// ```
    pub fn project(ray: &Ray, screen: Screen) -> Self {
        let last = screen.h as i32 - 1;
        // distance → 0 gives +inf; the float→int cast saturates.
        let distance = if ray.distance > 0.0 { ray.distance } else { 0.0 };
        let line_height = (screen.h as f64 / distance) as i32;
        let half = line_height / 2;
        let start = screen.half_h.saturating_sub(half);
        let end = screen.half_h.saturating_add(half);

        Self {
            line_height,
            draw_start: start.clamp(0, last),
            draw_end: end.clamp(0, last),
            clipped: end > last,
        }
    }

    /// First screen row of this hit's own floor.  Clipped walls own none,
    /// which pushes it one past the ceiling-only row `h`.
    #[inline]
    fn floor_from(&self, screen: Screen) -> i32 {
        if self.clipped {
            screen.h as i32 + 1
        } else {
            self.draw_end
        }
    }
}

/// Paint column `x` of `buf` from `chain`.
pub fn paint_column(buf: &mut [Rgba], screen: Screen, x: usize, chain: &RayChain) {
    if screen.is_empty() {
        return;
    }
    let Some(wall) = chain.terminal() else {
        return;
    };
    paint_floors(buf, screen, x, chain);
    // last, so its top and bottom rows win over the mirrored ceiling
    paint_wall(buf, screen, x, wall);
}

/// Solid wall strip `draw_start ..= draw_end`, shaded by face and distance.
fn paint_wall(buf: &mut [Rgba], screen: Screen, x: usize, ray: &Ray) {
    let ctx = PaintContext::project(ray, screen);
    let shade = palette::wall_colour(ray.face, ray.side, ray.distance);

    for y in ctx.draw_start as usize..=ctx.draw_end as usize {
        buf[y * screen.w + x] = shade;
    }
}

/// Floor/ceiling spans for every chain entry, farthest first.
fn paint_floors(buf: &mut [Rgba], screen: Screen, x: usize, chain: &RayChain) {
    // one past the bottom row: y == h only feeds ceiling row 0
    let edge = screen.h as i32 + 1;
    let rays = chain.as_slice();

    for (i, ray) in rays.iter().enumerate().rev() {
        let from = PaintContext::project(ray, screen).floor_from(screen);
        let to = match i {
            0 => edge,
            _ => PaintContext::project(&rays[i - 1], screen).floor_from(screen),
        };
        paint_floor(buf, screen, x, ray, from, to.min(edge));
    }
}

/// Rows `from .. to` of one hit's floor plus their mirrored ceiling rows.
fn paint_floor(buf: &mut [Rgba], screen: Screen, x: usize, ray: &Ray, from: i32, to: i32) {
    let h = screen.h as i32;
    let h_f = screen.h as f64;
    let wall_pt = ray.wall_floor_point();

    // rows at or above the horizon have no floor (2y - h <= 0)
    let from = from.max(screen.half_h + 1);

    for y in from..to {
        // screen row → distance of the floor point it shows
        let cur_dist = h_f / (2.0 * y as f64 - h_f);
        let weight = cur_dist / ray.distance;
        let floor_pt = wall_pt * weight + ray.origin * (1.0 - weight);
        let parity = palette::checker_parity(floor_pt);

        if y < h {
            buf[y as usize * screen.w + x] = FLOOR[parity];
        }
        buf[(h - y) as usize * screen.w + x] = CEILING[parity];
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
