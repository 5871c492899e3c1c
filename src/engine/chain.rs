//! Portal chaining.
//!
//! A column's ray is cast once; while the hit cell is a portal the ray is
//! re-originated into the exit's frame (same direction, origin shifted by
//! `exit - entry`) and cast again.  Each hop appends one [`Ray`], so the
//! chain runs nearest → farthest.  The hop count is capped, which bounds
//! the work for portal pairs that look into each other forever.

use glam::DVec2;
use smallvec::SmallVec;

use crate::{
    engine::dda::{self, Ray},
    world::{Camera, Level},
};

/// Default cap on portal hops per column.
pub const MAX_PORTAL_HOPS: usize = 8;

/// Hits for one screen column, index 0 = nearest.
///
/// Stored inline up to the default hop cap; one chain is cleared and
/// refilled for every column of every frame.
#[derive(Clone, Debug, Default)]
pub struct RayChain {
    rays: SmallVec<[Ray; MAX_PORTAL_HOPS + 1]>,
}

impl RayChain {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.rays.clear();
    }

    #[inline]
    pub fn push(&mut self, ray: Ray) {
        self.rays.push(ray);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rays.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }

    /// First hit along the ray (the portal cell, if any was crossed).
    #[inline]
    pub fn nearest(&self) -> Option<&Ray> {
        self.rays.first()
    }

    /// Last hit: the wall actually seen through every portal on the way.
    #[inline]
    pub fn terminal(&self) -> Option<&Ray> {
        self.rays.last()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Ray] {
        &self.rays
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ray> {
        self.rays.iter()
    }
}

impl<'a> IntoIterator for &'a RayChain {
    type Item = &'a Ray;
    type IntoIter = std::slice::Iter<'a, Ray>;

    fn into_iter(self) -> Self::IntoIter {
        self.rays.iter()
    }
}

/// Builds a [`RayChain`] per column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainBuilder {
    max_hops: usize,
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self {
            max_hops: MAX_PORTAL_HOPS,
        }
    }
}

impl ChainBuilder {
    pub fn with_max_hops(max_hops: usize) -> Self {
        Self { max_hops }
    }

    #[inline]
    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Fill `chain` with the hits of the ray `origin + t * dir`.
    ///
    /// Stops at the first non-portal hit or after `max_hops` portal hops; in
    /// the latter case the last ray stands as an ordinary wall.
    pub fn build(&self, level: &Level, origin: DVec2, dir: DVec2, chain: &mut RayChain) {
        chain.clear();

        let mut ray = dda::cast(&level.grid, origin, origin.floor().as_ivec2(), dir);
        chain.push(ray);

        for _ in 0..self.max_hops {
            let Some(exit) = level.portals.exit(ray.cell) else {
                break;
            };
            // keep the origin's offset from the entry cell, relative to the exit
            let offset = ray.origin - ray.cell.as_dvec2();
            let origin = offset + exit.as_dvec2();

            ray = dda::cast(&level.grid, origin, exit, dir);
            chain.push(ray);
        }
    }

    /// Chain for screen column `x` of a `width`-wide view from `camera`.
    #[inline]
    pub fn build_column(
        &self,
        level: &Level,
        camera: &Camera,
        x: usize,
        width: usize,
        chain: &mut RayChain,
    ) {
        self.build(level, camera.pos, camera.ray_dir(x, width), chain);
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::dda::{Face, Side, cast},
        world::Grid,
    };
    use glam::{dvec2, ivec2};

    const EPS: f64 = 1e-9;

    fn walled_rows(w: usize, h: usize) -> Vec<Vec<u8>> {
        (0..h)
            .map(|y| {
                (0..w)
                    .map(|x| u8::from(x == 0 || y == 0 || x == w - 1 || y == h - 1))
                    .collect()
            })
            .collect()
    }

    fn spawn() -> Camera {
        Camera::new(dvec2(2.0, 2.0), dvec2(-1.0, 0.0), dvec2(0.0, 0.66))
    }

    fn portal_level() -> Level {
        let grid = Grid::from_rows(&walled_rows(15, 15)).unwrap();
        let mut level = Level::new("portal", grid, spawn());
        level.link_portal(ivec2(0, 2), ivec2(14, 13)).unwrap();
        level
    }

    /// 10x3 corridor whose two end caps are linked to each other.
    fn mirror_corridor() -> Level {
        let grid = Grid::from_rows(&walled_rows(10, 3)).unwrap();
        let mut level = Level::new("corridor", grid, spawn());
        level.link_portal(ivec2(0, 1), ivec2(9, 1)).unwrap();
        level
    }

    #[test]
    fn plain_wall_gives_single_ray() {
        let grid = Grid::from_rows(&walled_rows(15, 15)).unwrap();
        let level = Level::new("plain", grid, spawn());
        let mut chain = RayChain::new();
        ChainBuilder::default().build_column(&level, &level.spawn, 200, 400, &mut chain);

        assert_eq!(chain.len(), 1);
        let ray = chain.nearest().unwrap();
        assert_eq!(ray.side, Side::X);
        assert!((ray.distance - (level.spawn.pos.x - 1.0)).abs() < EPS);
    }

    #[test]
    fn portal_hit_extends_chain() {
        let level = portal_level();
        let cam = level.spawn;
        let mut chain = RayChain::new();
        ChainBuilder::default().build_column(&level, &cam, 200, 400, &mut chain);

        assert!(chain.len() >= 2);
        let first = chain.as_slice()[0];
        let second = chain.as_slice()[1];
        assert_eq!(first.cell, ivec2(0, 2));

        // origin shifted by the player's offset into (0,2), re-based on (14,13)
        let offset = cam.pos - dvec2(0.0, 2.0);
        assert!((second.origin - (offset + dvec2(14.0, 13.0))).length() < EPS);
        assert!(second.distance > first.distance);
        assert_eq!(chain.terminal().unwrap().cell, ivec2(0, 13));
    }

    #[test]
    fn continuation_matches_unported_cast() {
        let level = portal_level();
        let origin = dvec2(2.5, 2.4);
        let dir = dvec2(-1.0, 0.15);
        let mut chain = RayChain::new();
        ChainBuilder::default().build(&level, origin, dir, &mut chain);
        assert_eq!(chain.nearest().unwrap().cell, ivec2(0, 2));
        let through = chain.as_slice()[1];

        // Same ray started just after it leaves the exit cell (14,13),
        // without any portal involved.
        let t_exit = (through.origin.x - 14.0) / -dir.x;
        let start = through.origin + dir * (t_exit + 1e-6);
        let direct = cast(&level.grid, start, start.floor().as_ivec2(), dir);

        assert_eq!(direct.cell, through.cell);
        assert_eq!(direct.face, through.face);
        assert_eq!(direct.side, through.side);
        assert!((direct.wall_x - through.wall_x).abs() < 1e-6);
        assert!((direct.distance + t_exit + 1e-6 - through.distance).abs() < 1e-6);
        assert!((direct.wall_floor_point() - through.wall_floor_point()).length() < 1e-6);
    }

    #[test]
    fn facing_portals_are_capped() {
        let level = mirror_corridor();
        let mut chain = RayChain::new();
        let builder = ChainBuilder::default();
        builder.build(&level, dvec2(5.5, 1.5), dvec2(-1.0, 0.0), &mut chain);

        assert_eq!(chain.len(), MAX_PORTAL_HOPS + 1);
        // every hop sees the same cap one corridor length farther away
        let d: Vec<f64> = chain.iter().map(|r| r.distance).collect();
        assert!((d[0] - 4.5).abs() < EPS);
        for pair in d.windows(2) {
            assert!((pair[1] - pair[0] - 9.0).abs() < EPS);
        }
        // the capped ray is still a wall hit
        let last = chain.terminal().unwrap();
        assert_eq!(last.cell, ivec2(0, 1));
        assert_eq!(last.face, Face::South);
    }

    #[test]
    fn custom_cap_and_zero_hops() {
        let level = mirror_corridor();
        let mut chain = RayChain::new();
        ChainBuilder::with_max_hops(3).build(&level, dvec2(5.5, 1.5), dvec2(-1.0, 0.0), &mut chain);
        assert_eq!(chain.len(), 4);

        ChainBuilder::with_max_hops(0).build(&level, dvec2(5.5, 1.5), dvec2(-1.0, 0.0), &mut chain);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn chain_buffer_is_reused() {
        let level = portal_level();
        let mut chain = RayChain::new();
        let builder = ChainBuilder::default();
        builder.build(&level, dvec2(2.0, 2.0), dvec2(-1.0, 0.0), &mut chain);
        assert_eq!(chain.len(), 2);
        builder.build(&level, dvec2(2.0, 2.0), dvec2(1.0, 0.0), &mut chain);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.nearest().unwrap().cell, ivec2(14, 2));
    }
}
