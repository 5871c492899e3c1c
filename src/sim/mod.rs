//! Player simulation: turning and grid-clamped movement.

mod movement;

pub use movement::{
    Blocked, HITBOX, InputCmd, MOVE_SPEED, RUN_FACTOR, TURN_RATE, apply_input, strafe, try_move,
};
