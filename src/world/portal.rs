//! Teleport table: a ray that hits an entry cell continues from the paired
//! exit cell.  Entries are always installed in matched pairs.

use std::collections::HashMap;

use super::grid::{Cell, Grid};

/// Things that can go wrong when linking portals.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PortalError {
    /// One endpoint already belongs to another pair.
    #[error("cell ({}, {}) is already a portal", .0.x, .0.y)]
    AlreadyLinked(Cell),

    /// Endpoint lies outside the grid.
    #[error("portal cell ({}, {}) is outside the grid", .0.x, .0.y)]
    OutOfBounds(Cell),

    /// Endpoint is passable; rays only ever stop on walls.
    #[error("portal cell ({}, {}) is not a wall", .0.x, .0.y)]
    Passable(Cell),
}

/// Symmetric `entry → exit` map between wall cells.
///
/// If `a → b` is present then `b → a` is present too, so a ray can always
/// come back through the portal it went in by.  A cell is a key at most once.
#[derive(Clone, Debug, Default)]
pub struct PortalTable {
    exits: HashMap<Cell, Cell>,
}

impl PortalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link `a` and `b` in both directions.
    ///
    /// `a == b` is allowed: the ray then continues from its own origin
    /// through the cell as if it were open.
    pub fn link(&mut self, a: Cell, b: Cell) -> Result<(), PortalError> {
        for cell in [a, b] {
            if self.exits.contains_key(&cell) {
                return Err(PortalError::AlreadyLinked(cell));
            }
        }
        self.exits.insert(a, b);
        self.exits.insert(b, a);
        Ok(())
    }

    /// Link `a` and `b` after checking both sit on walls inside `grid`.
    pub fn link_checked(&mut self, grid: &Grid, a: Cell, b: Cell) -> Result<(), PortalError> {
        for cell in [a, b] {
            match grid.code(cell) {
                None => return Err(PortalError::OutOfBounds(cell)),
                Some(0) => return Err(PortalError::Passable(cell)),
                Some(_) => {}
            }
        }
        self.link(a, b)
    }

    /// Exit cell paired with `entry`, if `entry` is a portal.
    #[inline]
    pub fn exit(&self, entry: Cell) -> Option<Cell> {
        self.exits.get(&entry).copied()
    }

    /// Number of directed entries (twice the number of pairs, minus
    /// self-linked cells counted once).
    pub fn len(&self) -> usize {
        self.exits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exits.is_empty()
    }

    /// Number of linked pairs (a self-linked cell is one pair).
    pub fn pair_count(&self) -> usize {
        self.exits
            .iter()
            .filter(|(a, b)| (a.x, a.y) <= (b.x, b.y))
            .count()
    }

    /// Iterate `(entry, exit)` in no particular order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Cell, Cell)> + '_ {
        self.exits.iter().map(|(&a, &b)| (a, b))
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
