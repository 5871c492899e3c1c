//! Per-column ray work: the grid DDA and portal chaining on top of it.

pub mod chain;
pub mod dda;
pub mod types;

pub use chain::{ChainBuilder, MAX_PORTAL_HOPS, RayChain};
pub use dda::{Face, Ray, Side, cast};
pub use types::Screen;
