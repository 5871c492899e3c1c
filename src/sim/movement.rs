//! Player movement against grid occupancy.
//!
//! Each axis is clamped on its own: a step that would put the look-ahead
//! point inside a wall is dropped for that axis only, so the player slides
//! along walls instead of sticking to them.  Portals are never crossed;
//! they only bend rays.

use glam::DVec2;

use crate::world::{Camera, Grid};

/// Look-ahead multiplier applied to a step before the occupancy test.
pub const HITBOX: f64 = 10.0;

/// Map-units per second at walking pace.
pub const MOVE_SPEED: f64 = 2.0;
/// Radians per second (180°/s).
pub const TURN_RATE: f64 = std::f64::consts::PI;
/// Speed multiplier while the run key is held.
pub const RUN_FACTOR: f64 = 2.0;

/// One frame of player intent, filled in by the front-end.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputCmd {
    pub forward: f64, // –1 … +1
    pub strafe: f64,  // –1 … +1  (left / right)
    pub turn: f64,    // –1 … +1  (right / left)
    pub run: bool,
}

/// Which axes a move was stopped on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blocked {
    pub x: bool,
    pub y: bool,
}

impl Blocked {
    #[inline]
    pub fn any(self) -> bool {
        self.x || self.y
    }
}

/// Walk `speed` units along the facing vector (negative = backwards).
pub fn try_move(camera: &mut Camera, grid: &Grid, speed: f64) -> Blocked {
    clamp_step(&mut camera.pos, grid, camera.dir * speed)
}

/// Side-step `speed` units along the camera plane (positive = right of
/// the view, as seen on screen).
pub fn strafe(camera: &mut Camera, grid: &Grid, speed: f64) -> Blocked {
    let side = camera.plane.normalize_or_zero();
    clamp_step(&mut camera.pos, grid, side * speed)
}

/// Turn, then move, for one frame lasting `dt` seconds.
pub fn apply_input(camera: &mut Camera, grid: &Grid, cmd: InputCmd, dt: f64) -> Blocked {
    if cmd.turn != 0.0 {
        camera.rotate(cmd.turn * TURN_RATE * dt);
    }

    let speed = MOVE_SPEED * dt * if cmd.run { RUN_FACTOR } else { 1.0 };
    let mut blocked = Blocked::default();
    if cmd.forward != 0.0 {
        blocked = try_move(camera, grid, cmd.forward * speed);
    }
    if cmd.strafe != 0.0 {
        let b = strafe(camera, grid, cmd.strafe * speed);
        blocked.x |= b.x;
        blocked.y |= b.y;
    }
    blocked
}

/// X first, then Y from the updated position.
fn clamp_step(pos: &mut DVec2, grid: &Grid, step: DVec2) -> Blocked {
    let mut blocked = Blocked::default();

    let probe = DVec2::new(pos.x + step.x * HITBOX, pos.y);
    if grid.is_solid(probe.floor().as_ivec2()) {
        blocked.x = step.x != 0.0;
    } else {
        pos.x += step.x;
    }

    let probe = DVec2::new(pos.x, pos.y + step.y * HITBOX);
    if grid.is_solid(probe.floor().as_ivec2()) {
        blocked.y = step.y != 0.0;
    } else {
        pos.y += step.y;
    }

    blocked
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn room() -> Grid {
        // 6x5 room, one pillar at (3,2)
        Grid::from_rows(&[
            [1u8, 1, 1, 1, 1, 1],
            [1, 0, 0, 0, 0, 1],
            [1, 0, 0, 1, 0, 1],
            [1, 0, 0, 0, 0, 1],
            [1, 1, 1, 1, 1, 1],
        ])
        .unwrap()
    }

    #[test]
    fn open_floor_moves_along_facing() {
        let grid = room();
        let mut cam = Camera::looking(dvec2(1.5, 1.5), dvec2(0.0, 1.0), 0.66);
        let b = try_move(&mut cam, &grid, 0.05);
        assert!(!b.any());
        assert!((cam.pos - dvec2(1.5, 1.55)).length() < 1e-12);
    }

    #[test]
    fn look_ahead_stops_short_of_wall() {
        let grid = room();
        // 0.05 * HITBOX = 0.5 ahead lands in the west wall
        let mut cam = Camera::looking(dvec2(1.4, 1.5), dvec2(-1.0, 0.0), 0.66);
        let b = try_move(&mut cam, &grid, 0.05);
        assert_eq!(b, Blocked { x: true, y: false });
        assert_eq!(cam.pos, dvec2(1.4, 1.5));
    }

    #[test]
    fn diagonal_slides_along_wall() {
        let grid = room();
        let dir = dvec2(-1.0, 1.0).normalize();
        let mut cam = Camera::looking(dvec2(1.3, 2.0), dir, 0.66);
        let b = try_move(&mut cam, &grid, 0.05);
        assert!(b.x && !b.y);
        assert_eq!(cam.pos.x, 1.3);
        assert!(cam.pos.y > 2.0);
    }

    #[test]
    fn pillar_blocks_only_its_axis() {
        let grid = room();
        let mut cam = Camera::looking(dvec2(2.6, 2.5), dvec2(1.0, 0.0), 0.66);
        assert!(try_move(&mut cam, &grid, 0.05).x);
        assert_eq!(cam.pos, dvec2(2.6, 2.5));

        // backwards is free
        assert!(!try_move(&mut cam, &grid, -0.05).any());
        assert!((cam.pos.x - 2.55).abs() < 1e-12);
    }

    #[test]
    fn strafe_follows_camera_plane() {
        let grid = room();
        // facing -x, plane (0, 0.66): strafing right moves +y
        let mut cam = Camera::new(dvec2(2.5, 1.5), dvec2(-1.0, 0.0), dvec2(0.0, 0.66));
        assert!(!strafe(&mut cam, &grid, 0.05).any());
        assert!((cam.pos - dvec2(2.5, 1.55)).length() < 1e-12);
    }

    #[test]
    fn apply_input_turns_and_runs() {
        let grid = room();
        let mut cam = Camera::new(dvec2(1.5, 1.5), dvec2(1.0, 0.0), dvec2(0.0, -0.66));
        let cmd = InputCmd {
            turn: 0.5,
            ..Default::default()
        };
        apply_input(&mut cam, &grid, cmd, 1.0);
        // half a second of turning is a quarter turn
        assert!((cam.dir - dvec2(0.0, 1.0)).length() < 1e-9);
        assert!(cam.dir.dot(cam.plane).abs() < 1e-9);

        let walk = InputCmd {
            forward: 1.0,
            ..Default::default()
        };
        let run = InputCmd { run: true, ..walk };
        let mut a = cam;
        let mut b = cam;
        apply_input(&mut a, &grid, walk, 0.01);
        apply_input(&mut b, &grid, run, 0.01);
        let da = (a.pos - cam.pos).length();
        let db = (b.pos - cam.pos).length();
        assert!((db - da * RUN_FACTOR).abs() < 1e-12);
    }
}
