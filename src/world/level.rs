use super::{
    camera::Camera,
    grid::{Cell, Grid},
    portal::{PortalError, PortalTable},
};

/// Runtime snapshot of one map (immutable while rendering).
#[derive(Clone, Debug)]
pub struct Level {
    pub name: String,
    pub grid: Grid,
    pub portals: PortalTable,
    /// Where the player starts.
    pub spawn: Camera,
}

impl Level {
    /// Level without portals.
    pub fn new<S: Into<String>>(name: S, grid: Grid, spawn: Camera) -> Self {
        Self {
            name: name.into(),
            grid,
            portals: PortalTable::new(),
            spawn,
        }
    }

    /// Install the portal pair `a ↔ b`; both cells must be walls.
    pub fn link_portal(&mut self, a: Cell, b: Cell) -> Result<(), PortalError> {
        self.portals.link_checked(&self.grid, a, b)
    }
}
