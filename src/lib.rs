//! Grid ray caster that can look *through* portal tiles.
//!
//! * [`world`]    – immutable map snapshot: grid, portal table, camera.
//! * [`engine`]   – DDA ray caster and the portal chain builder.
//! * [`renderer`] – column compositor painting chains into a `u32` buffer.
//! * [`map`]      – text map loader and the built-in demo level.
//! * [`sim`]      – player movement against grid occupancy.

pub mod engine;
pub mod map;
pub mod renderer;
pub mod sim;
pub mod world;
