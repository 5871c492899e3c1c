//! Colours and shading rules.  Walls are flat colours picked by face and
//! darkened with distance; floor and ceiling are two-colour checkerboards.

use glam::DVec2;

use crate::{
    engine::{Face, Side},
    renderer::Rgba,
};

/// Pack an opaque colour as 0xAARRGGBB.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Frame clear (dark grey); only visible where nothing was painted.
pub const CLEAR: Rgba = 0xFF_202020;

/// Floor checker colours indexed by [`checker_parity`].
pub const FLOOR: [Rgba; 2] = [rgb(119, 119, 119), rgb(51, 51, 51)];

/// Ceiling checker colours indexed by [`checker_parity`].
pub const CEILING: [Rgba; 2] = [rgb(119, 119, 119), rgb(226, 226, 226)];

/// Intensity lost per unit of wall distance.
pub const DIST_FADE: f64 = 2.0;

/// Per-face channel mask; multiplying by an intensity in `0..=255` fills
/// exactly those channels.
#[inline]
const fn face_mask(face: Face) -> u32 {
    match face {
        Face::North => 0x00_0001, // blue
        Face::South => 0x00_0100, // green
        Face::East => 0x01_0000,  // red
        Face::West => 0x00_0101,  // cyan
    }
}

/// Start intensity by crossed axis, so the two axes read differently even
/// on faces of the same hue.
#[inline]
const fn base_intensity(side: Side) -> i32 {
    match side {
        Side::X => 255,
        Side::Y => 150,
    }
}

/// Linear distance fade, floored at zero.
#[inline]
pub fn wall_intensity(side: Side, distance: f64) -> u8 {
    let fade = (distance * DIST_FADE) as i32;
    base_intensity(side).saturating_sub(fade).clamp(0, 255) as u8
}

/// Final wall colour for a hit.
#[inline]
pub fn wall_colour(face: Face, side: Side, distance: f64) -> Rgba {
    0xFF00_0000 | face_mask(face) * wall_intensity(side, distance) as u32
}

/// `(floor(x) + floor(y)) mod 2`, well-defined for negative coordinates.
#[inline]
pub fn checker_parity(p: DVec2) -> usize {
    (p.x.floor() as i64 + p.y.floor() as i64).rem_euclid(2) as usize
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn packs_argb() {
        assert_eq!(rgb(0x12, 0x34, 0x56), 0xFF_123456);
        assert_eq!(FLOOR[1], 0xFF_333333);
    }

    #[test]
    fn faces_get_distinct_hues() {
        let colours = [Face::North, Face::South, Face::East, Face::West]
            .map(|f| wall_colour(f, Side::X, 0.0));
        assert_eq!(colours, [0xFF_0000FF, 0xFF_00FF00, 0xFF_FF0000, 0xFF_00FFFF]);
    }

    #[test]
    fn intensity_fades_and_floors_at_zero() {
        assert_eq!(wall_intensity(Side::X, 0.0), 255);
        assert_eq!(wall_intensity(Side::Y, 0.0), 150);
        assert_eq!(wall_intensity(Side::X, 10.0), 235);
        assert_eq!(wall_intensity(Side::Y, 74.9), 1);
        assert_eq!(wall_intensity(Side::Y, 500.0), 0);
        assert_eq!(wall_colour(Face::West, Side::Y, 1e9), 0xFF_000000);
    }

    #[test]
    fn adjacent_cells_alternate() {
        for x in -4..4 {
            for y in -4..4 {
                let p = dvec2(x as f64 + 0.5, y as f64 + 0.5);
                let here = checker_parity(p);
                assert_ne!(here, checker_parity(p + dvec2(1.0, 0.0)));
                assert_ne!(here, checker_parity(p + dvec2(0.0, 1.0)));
                assert_eq!(here, checker_parity(p + dvec2(1.0, 1.0)));
            }
        }
    }
}
