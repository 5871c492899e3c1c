//! Rectangular occupancy map the ray caster walks through.
//! Immutable once built; the border invariant is checked here so the DDA
//! loop never needs an iteration cap.

use glam::IVec2;

/// Integer grid coordinate `(x, y)` of one cell.
pub type Cell = IVec2;

/// Things that can go wrong when building a grid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero.
    #[error("grid must be at least 1x1")]
    Empty,

    /// `cells.len()` does not equal `width * height`.
    #[error("grid expects {expected} cells, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A border cell is passable, so a ray could run off the map.
    #[error("border cell ({x}, {y}) is passable")]
    OpenBorder { x: i32, y: i32 },
}

/// Row-major cell codes: `0` = passable, anything else = wall.
///
/// The specific non-zero code is kept (maps use it to mark wall variants)
/// but the renderer shades by hit geometry only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Build a grid from row-major `cells` (`index = y * width + x`).
    ///
    /// Fails unless every border cell is a wall.
    pub fn new(width: usize, height: usize, cells: Vec<u8>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: cells.len(),
            });
        }

        let grid = Self {
            width,
            height,
            cells,
        };
        if let Some(open) = grid.border().find(|&c| grid.code(c) == Some(0)) {
            return Err(GridError::OpenBorder {
                x: open.x,
                y: open.y,
            });
        }
        Ok(grid)
    }

    /// Build from rows (`rows[y][x]`), the way maps are written down.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            cells.extend_from_slice(row.as_ref());
        }
        Self::new(width, height, cells)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Raw cell code, `None` outside the grid.
    #[inline]
    pub fn code(&self, cell: Cell) -> Option<u8> {
        if !self.contains(cell) {
            return None;
        }
        Some(self.cells[cell.y as usize * self.width + cell.x as usize])
    }

    /// True for walls. Cells outside the grid read as solid so a ray
    /// re-originated next to the edge still stops.
    #[inline(always)]
    pub fn is_solid(&self, cell: Cell) -> bool {
        self.code(cell).is_none_or(|c| c > 0)
    }

    /// Every border cell, clockwise from the top-left corner.
    fn border(&self) -> impl Iterator<Item = Cell> + '_ {
        let (w, h) = (self.width as i32, self.height as i32);
        let top = (0..w).map(|x| IVec2::new(x, 0));
        let right = (1..h).map(move |y| IVec2::new(w - 1, y));
        let bottom = (0..w - 1).rev().map(move |x| IVec2::new(x, h - 1));
        let left = (1..h - 1).rev().map(|y| IVec2::new(0, y));
        top.chain(right).chain(bottom).chain(left)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
