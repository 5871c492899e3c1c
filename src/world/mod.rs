mod camera;
mod grid;
mod level;
mod portal;

pub use camera::Camera;
pub use grid::{Cell, Grid, GridError};
pub use level::Level;
pub use portal::{PortalError, PortalTable};
