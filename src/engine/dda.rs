//! Grid Digital Differential Analyzer.
//!
//! Walks one ray cell by cell, always stepping along whichever axis reaches
//! its next grid line first, and stops on the first solid cell.  Termination
//! comes from the grid's walled border (and out-of-grid cells reading solid),
//! so the loop carries no step cap.

use glam::{DVec2, IVec2, ivec2};

use crate::world::{Cell, Grid};

/// Grid axis crossed on the final DDA step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Stepped along X: the ray struck a face parallel to the Y axis.
    X,
    /// Stepped along Y: the ray struck a face parallel to the X axis.
    Y,
}

/// Which face of the hit cell the ray struck.
///
/// The naming is a fixed convention rather than a compass reading:
///
/// | side | ray component | face  |
/// |------|---------------|-------|
/// | X    | `dir.x >= 0`  | North |
/// | X    | `dir.x < 0`   | South |
/// | Y    | `dir.y >= 0`  | West  |
/// | Y    | `dir.y < 0`   | East  |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    North,
    South,
    East,
    West,
}

impl Face {
    #[inline]
    pub fn from_hit(side: Side, dir: DVec2) -> Self {
        match side {
            Side::X if dir.x >= 0.0 => Face::North,
            Side::X => Face::South,
            Side::Y if dir.y >= 0.0 => Face::West,
            Side::Y => Face::East,
        }
    }
}

/// Result of one cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Solid cell the ray stopped in.
    pub cell: Cell,
    /// Its code (`0` only for out-of-grid hits, which read as solid).
    pub code: u8,
    /// Perpendicular distance to the struck face (no fisheye).
    pub distance: f64,
    pub side: Side,
    pub face: Face,
    /// Fractional position along the struck face, in `[0, 1)`.
    pub wall_x: f64,
    /// Point the ray was cast from.  After a portal hop this is the
    /// re-originated point in the exit's frame, not the camera.
    pub origin: DVec2,
    pub dir: DVec2,
}

impl Ray {
    /// Where the ray meets the floor at the foot of the struck face.
    ///
    /// Equal to `origin + dir * distance`, but rebuilt from the integer cell
    /// so neighbouring columns agree exactly on which grid line they sit on.
    #[inline]
    pub fn wall_floor_point(&self) -> DVec2 {
        let cell = self.cell.as_dvec2();
        match self.face {
            Face::North => DVec2::new(cell.x, cell.y + self.wall_x),
            Face::South => DVec2::new(cell.x + 1.0, cell.y + self.wall_x),
            Face::West => DVec2::new(cell.x + self.wall_x, cell.y),
            Face::East => DVec2::new(cell.x + self.wall_x, cell.y + 1.0),
        }
    }
}

/// Cast from `origin` along `dir`, starting the walk in `cell`.
///
/// `cell` is normally `origin.floor()`.  After a portal hop it is the exit
/// cell while `origin` lies outside it; the side distances below are plain
/// ray parameters, so the walk is still exact.
///
/// `dir` must not be the zero vector.
pub fn cast(grid: &Grid, origin: DVec2, cell: Cell, dir: DVec2) -> Ray {
    // |1/d|; a zero component gives +inf and that axis never wins.
    let delta = dir.recip().abs();

    let step = ivec2(
        if dir.x < 0.0 { -1 } else { 1 },
        if dir.y < 0.0 { -1 } else { 1 },
    );

    let base = cell.as_dvec2();
    let mut side_dist = DVec2::new(
        if step.x < 0 {
            (origin.x - base.x) * delta.x
        } else {
            (base.x + 1.0 - origin.x) * delta.x
        },
        if step.y < 0 {
            (origin.y - base.y) * delta.y
        } else {
            (base.y + 1.0 - origin.y) * delta.y
        },
    );

    let mut map: IVec2 = cell;
    let side = loop {
        let side = if side_dist.x < side_dist.y {
            side_dist.x += delta.x;
            map.x += step.x;
            Side::X
        } else {
            side_dist.y += delta.y;
            map.y += step.y;
            Side::Y
        };
        if grid.is_solid(map) {
            break side;
        }
    };

    let distance = match side {
        Side::X => (map.x as f64 - origin.x + ((1 - step.x) / 2) as f64) / dir.x,
        Side::Y => (map.y as f64 - origin.y + ((1 - step.y) / 2) as f64) / dir.y,
    };
    // an origin lying on the struck face gives -0.0
    let distance = if distance > 0.0 { distance } else { 0.0 };

    let along = match side {
        Side::X => origin.y + distance * dir.y,
        Side::Y => origin.x + distance * dir.x,
    };

    Ray {
        cell: map,
        code: grid.code(map).unwrap_or(0),
        distance,
        side,
        face: Face::from_hit(side, dir),
        wall_x: along - along.floor(),
        origin,
        dir,
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
