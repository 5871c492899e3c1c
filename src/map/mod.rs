//! Text map format (`.pmap`).
//!
//! ```text
//! # comment
//! name Portal Demo
//! spawn <x> <y> <dir_x> <dir_y> <plane_x> <plane_y>
//! portal <x>,<y> <x>,<y>
//! grid
//! 11111
//! 10001
//! 11111
//! end
//! ```
//!
//! Grid rows are listed top to bottom (row index = y); each digit is one
//! cell code.  `portal` lines install a matched pair and may appear before
//! or after the grid.

mod loader;

pub use loader::{MapError, load_level, parse_level};

use crate::world::Level;

const DEMO: &str = include_str!("../../maps/demo.pmap");

/// The built-in 15x15 demo room with one portal pair.
pub fn demo_level() -> Result<Level, MapError> {
    parse_level(DEMO)
}

/// Load `path` if given, otherwise the built-in demo level.
pub fn load_or_demo<P: AsRef<std::path::Path>>(path: Option<P>) -> Result<Level, MapError> {
    match path {
        Some(p) => load_level(p),
        None => demo_level(),
    }
}
