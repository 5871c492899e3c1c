// ──────────────────────────────────────────────────────────────────────────
// map/loader.rs
//
//  *   `.pmap` text           ──╮
//  *   grid rows / portals      │   --->  world::Level
//  *   spawn camera             ╯
// ──────────────────────────────────────────────────────────────────────────

use std::{fs, io, path::Path};

use glam::{DVec2, IVec2, ivec2};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::world::{Camera, Grid, GridError, Level, PortalError};

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum MapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: cannot parse `{text}`")]
    Syntax { line: usize, text: String },

    #[error("line {line}: row has {actual} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("map has no grid section")]
    NoGrid,

    #[error("map has no spawn line")]
    NoSpawn,

    #[error("spawn point ({x}, {y}) is not on open floor")]
    SpawnInWall { x: f64, y: f64 },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Portal(#[from] PortalError),
}

/*──────────────────────────── Line patterns ─────────────────────────*/

static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^name\s+(.+)$").unwrap());

static SPAWN: Lazy<Regex> = Lazy::new(|| {
    let num = r"(-?\d+(?:\.\d+)?)";
    Regex::new(&format!(r"^spawn{}$", format!(r"\s+{num}").repeat(6))).unwrap()
});

static PORTAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^portal\s+(\d+)\s*,\s*(\d+)\s+(\d+)\s*,\s*(\d+)$").unwrap()
});

static ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Read and parse a `.pmap` file.
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<Level, MapError> {
    let src = fs::read_to_string(path)?;
    parse_level(&src)
}

/// Parse `.pmap` source into a validated [`Level`].
pub fn parse_level(src: &str) -> Result<Level, MapError> {
    let mut name = None;
    let mut spawn = None;
    let mut portals: Vec<(IVec2, IVec2)> = Vec::new();
    let mut rows: Vec<Vec<u8>> = Vec::new();
    let mut saw_grid = false;
    let mut in_grid = false;

    for (idx, raw) in src.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        /*----- grid body -------------------------------------------------*/
        if in_grid {
            if text == "end" {
                in_grid = false;
            } else if ROW.is_match(text) {
                let row: Vec<u8> = text.bytes().map(|b| b - b'0').collect();
                if let Some(first) = rows.first() {
                    if first.len() != row.len() {
                        return Err(MapError::RaggedRow {
                            line,
                            expected: first.len(),
                            actual: row.len(),
                        });
                    }
                }
                rows.push(row);
            } else {
                return Err(syntax(line, text));
            }
            continue;
        }

        /*----- header lines ----------------------------------------------*/
        if text == "grid" {
            if saw_grid {
                return Err(syntax(line, text));
            }
            saw_grid = true;
            in_grid = true;
        } else if let Some(c) = NAME.captures(text) {
            name = Some(c[1].to_string());
        } else if let Some(c) = SPAWN.captures(text) {
            let mut v = [0.0f64; 6];
            for (slot, m) in v.iter_mut().zip(c.iter().skip(1)) {
                let m = m.ok_or_else(|| syntax(line, text))?;
                *slot = m.as_str().parse().map_err(|_| syntax(line, text))?;
            }
            spawn = Some(Camera::new(
                DVec2::new(v[0], v[1]),
                DVec2::new(v[2], v[3]),
                DVec2::new(v[4], v[5]),
            ));
        } else if let Some(c) = PORTAL.captures(text) {
            let mut v = [0i32; 4];
            for (slot, m) in v.iter_mut().zip(c.iter().skip(1)) {
                let m = m.ok_or_else(|| syntax(line, text))?;
                *slot = m.as_str().parse().map_err(|_| syntax(line, text))?;
            }
            portals.push((ivec2(v[0], v[1]), ivec2(v[2], v[3])));
        } else {
            return Err(syntax(line, text));
        }
    }

    if !saw_grid || rows.is_empty() {
        return Err(MapError::NoGrid);
    }
    let grid = Grid::from_rows(&rows)?;

    let spawn = spawn.ok_or(MapError::NoSpawn)?;
    if grid.is_solid(spawn.cell()) {
        return Err(MapError::SpawnInWall {
            x: spawn.pos.x,
            y: spawn.pos.y,
        });
    }

    let mut level = Level::new(name.unwrap_or_else(|| "untitled".into()), grid, spawn);
    for (a, b) in portals {
        level.link_portal(a, b)?;
    }
    Ok(level)
}

fn syntax(line: usize, text: &str) -> MapError {
    MapError::Syntax {
        line,
        text: text.to_string(),
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::demo_level;
    use glam::dvec2;

    const SMALL: &str = "
        name Small
        spawn 1.5 1.5 1 0 0 -0.66
        grid
        1111
        1001
        1111
        end
        portal 0,1 3,1   # the two end caps
    ";

    #[test]
    fn demo_level_contents() {
        let level = demo_level().unwrap();
        assert_eq!(level.name, "Portal Demo");
        assert_eq!((level.grid.width(), level.grid.height()), (15, 15));
        assert_eq!(level.spawn.pos, dvec2(2.0, 2.0));
        assert_eq!(level.spawn.dir, dvec2(-1.0, 0.0));
        assert_eq!(level.spawn.plane, dvec2(0.0, 0.66));
        assert_eq!(level.portals.exit(ivec2(0, 2)), Some(ivec2(14, 13)));
        assert_eq!(level.portals.exit(ivec2(14, 13)), Some(ivec2(0, 2)));
        // wall variants survive loading
        assert_eq!(level.grid.code(ivec2(7, 3)), Some(5));
        assert_eq!(level.grid.code(ivec2(11, 4)), Some(3));
        assert_eq!(level.grid.code(ivec2(5, 10)), Some(2));
        assert_eq!(level.grid.code(ivec2(13, 2)), Some(2));
    }

    #[test]
    fn small_level_parses() {
        let level = parse_level(SMALL).unwrap();
        assert_eq!(level.name, "Small");
        assert_eq!((level.grid.width(), level.grid.height()), (4, 3));
        assert_eq!(level.portals.exit(ivec2(3, 1)), Some(ivec2(0, 1)));
        assert_eq!(level.spawn.plane, dvec2(0.0, -0.66));
    }

    #[test]
    fn ragged_row_reports_line() {
        let src = "spawn 1.5 1.5 1 0 0 0.66\ngrid\n111\n10\n111\nend\n";
        match parse_level(src).unwrap_err() {
            MapError::RaggedRow {
                line,
                expected,
                actual,
            } => assert_eq!((line, expected, actual), (4, 3, 2)),
            e => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn garbage_line_is_syntax_error() {
        let src = "name X\nteleport 1,1 2,2\n";
        assert!(matches!(
            parse_level(src).unwrap_err(),
            MapError::Syntax { line: 2, .. }
        ));
        let src = "spawn 1.5 1.5 1 0 0\ngrid\n111\n101\n111\n";
        assert!(matches!(
            parse_level(src).unwrap_err(),
            MapError::Syntax { line: 1, .. }
        ));
    }

    #[test]
    fn missing_sections() {
        assert!(matches!(
            parse_level("spawn 1.5 1.5 1 0 0 0.66\n").unwrap_err(),
            MapError::NoGrid
        ));
        assert!(matches!(
            parse_level("grid\n111\n101\n111\nend\n").unwrap_err(),
            MapError::NoSpawn
        ));
    }

    #[test]
    fn invariants_are_enforced() {
        let open_border = "spawn 1.5 1.5 1 0 0 0.66\ngrid\n111\n100\n111\nend\n";
        assert!(matches!(
            parse_level(open_border).unwrap_err(),
            MapError::Grid(GridError::OpenBorder { x: 2, y: 1 })
        ));

        let in_wall = "spawn 0.5 0.5 1 0 0 0.66\ngrid\n111\n101\n111\nend\n";
        assert!(matches!(
            parse_level(in_wall).unwrap_err(),
            MapError::SpawnInWall { .. }
        ));

        let open_portal = "spawn 1.5 1.5 1 0 0 0.66\nportal 1,1 0,0\ngrid\n111\n101\n111\nend\n";
        assert!(matches!(
            parse_level(open_portal).unwrap_err(),
            MapError::Portal(PortalError::Passable(_))
        ));
    }

    #[test]
    fn loads_from_disk() {
        let tmp = tempfile::NamedTempFile::new().expect("tempfile");
        std::fs::write(tmp.path(), SMALL).unwrap();
        let level = load_level(tmp.path()).unwrap();
        assert_eq!(level.name, "Small");

        let missing = tmp.path().with_extension("missing");
        assert!(matches!(load_level(missing).unwrap_err(), MapError::Io(_)));
    }
}
