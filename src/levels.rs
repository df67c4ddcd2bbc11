//! Brick layouts: level grids, map files and random generation
//!
//! A level is a grid of cells, `grid_columns` wide and at most
//! `max_level_rows` tall. On disk each cell is one character: `e` for empty,
//! `0`-`9` for a palette color. Newlines are only for readability.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::sim::{Brick, Rect};

/// Brick colors by palette index
pub const PALETTE: [(&str, [u8; 3]); 10] = [
    ("red", [255, 0, 0]),
    ("orange", [255, 165, 0]),
    ("yellow", [255, 255, 0]),
    ("green", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("cyan", [0, 255, 255]),
    ("purple", [160, 32, 240]),
    ("pink", [255, 192, 203]),
    ("grey", [190, 190, 190]),
    ("white", [255, 255, 255]),
];

/// Character for an empty cell
const EMPTY_CELL: char = 'e';

/// Shipped levels or player-authored ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelKind {
    Standard,
    Custom,
}

impl LevelKind {
    /// File name for a level number, e.g. `Level-3` or `CustomLevel-3`
    pub fn file_name(&self, level: u32) -> String {
        match self {
            LevelKind::Standard => format!("Level-{level}"),
            LevelKind::Custom => format!("CustomLevel-{level}"),
        }
    }
}

/// Rectangle of the brick in a grid cell, inset one unit on every side
pub fn brick_rect(column: usize, row: usize, settings: &Settings) -> Rect {
    let w = settings.cell_width();
    let h = settings.cell_height();
    Rect::new(column as f32 * w + 1.0, row as f32 * h + 1.0, w - 2.0, h - 2.0)
}

/// A level layout: one optional palette index per cell, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Option<u8>>,
}

impl LevelGrid {
    /// All-empty grid
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![None; columns * rows],
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.grid_columns, settings.max_level_rows)
    }

    /// Top `filled` rows packed with bricks, one color per row
    pub fn filled_rows(columns: usize, rows: usize, filled: usize) -> Self {
        let mut grid = Self::new(columns, rows);
        for row in 0..filled.min(rows) {
            for column in 0..columns {
                grid.set(column, row, Some((row % PALETTE.len()) as u8));
            }
        }
        grid
    }

    /// Random layout: 1..=rows populated rows, each cell independently a
    /// random color or (3 times in 13) empty
    pub fn random<R: Rng + ?Sized>(rng: &mut R, columns: usize, rows: usize) -> Self {
        let mut grid = Self::new(columns, rows);
        let used_rows = rng.random_range(1..=rows.max(1)).min(rows);
        for row in 0..used_rows {
            for column in 0..columns {
                let roll: i32 = rng.random_range(-3..=9);
                if roll >= 0 {
                    grid.set(column, row, Some(roll as u8));
                }
            }
        }
        grid
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, column: usize, row: usize) -> Option<u8> {
        if column < self.columns && row < self.rows {
            self.cells[row * self.columns + column]
        } else {
            None
        }
    }

    /// Set a cell; returns false if it lies outside the grid
    pub fn set(&mut self, column: usize, row: usize, color: Option<u8>) -> bool {
        if column >= self.columns || row >= self.rows {
            return false;
        }
        self.cells[row * self.columns + column] = color.map(|c| c % PALETTE.len() as u8);
        true
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn brick_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Bricks for every filled cell, top row first, left to right
    pub fn bricks(&self, settings: &Settings) -> Vec<Brick> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| {
                cell.map(|color| Brick {
                    rect: brick_rect(i % self.columns, i / self.columns, settings),
                    color,
                })
            })
            .collect()
    }

    /// Grid cell under a screen point, if it falls inside the grid
    pub fn cell_at(&self, point: Vec2, settings: &Settings) -> Option<(usize, usize)> {
        let area = Rect::new(
            0.0,
            0.0,
            settings.cell_width() * self.columns as f32,
            settings.cell_height() * self.rows as f32,
        );
        if !area.contains_point(point) {
            return None;
        }
        let column = (point.x / settings.cell_width()) as usize;
        let row = (point.y / settings.cell_height()) as usize;
        (column < self.columns && row < self.rows).then_some((column, row))
    }

    /// Read a level from its text form. Short files leave trailing rows empty.
    pub fn parse(text: &str, columns: usize, rows: usize) -> Result<Self> {
        let mut grid = Self::new(columns, rows);
        let max = columns * rows;
        let chars: Vec<char> = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if chars.len() > max {
            return Err(Error::TooManyCells {
                cells: chars.len(),
                max,
            });
        }
        for (index, ch) in chars.into_iter().enumerate() {
            grid.cells[index] = match ch {
                EMPTY_CELL => None,
                _ => match ch.to_digit(10) {
                    Some(d) => Some(d as u8),
                    None => return Err(Error::InvalidCell { index, found: ch }),
                },
            };
        }
        Ok(grid)
    }

    /// Text form: every row, one line each
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.columns + 1) * self.rows);
        // A zero-column grid has no cells
        for row in self.cells.chunks(self.columns.max(1)) {
            for cell in row {
                match cell {
                    Some(c) => out.push(char::from(b'0' + c)),
                    None => out.push(EMPTY_CELL),
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Where level grids are loaded from and saved to
pub trait LevelSource {
    fn load_grid(&self, kind: LevelKind, level: u32) -> Result<LevelGrid>;
    fn save_grid(&mut self, kind: LevelKind, level: u32, grid: &LevelGrid) -> Result<()>;
}

/// Level files in a directory (`Level-N`, `CustomLevel-N`)
#[derive(Debug, Clone)]
pub struct MapDir {
    root: PathBuf,
    columns: usize,
    rows: usize,
}

impl MapDir {
    pub fn new(root: impl Into<PathBuf>, settings: &Settings) -> Self {
        Self {
            root: root.into(),
            columns: settings.grid_columns,
            rows: settings.max_level_rows,
        }
    }

    pub fn path_for(&self, kind: LevelKind, level: u32) -> PathBuf {
        self.root.join(kind.file_name(level))
    }
}

impl LevelSource for MapDir {
    /// Missing custom levels read as empty; missing standard levels are an error
    fn load_grid(&self, kind: LevelKind, level: u32) -> Result<LevelGrid> {
        let path = self.path_for(kind, level);
        match fs::read_to_string(&path) {
            Ok(text) => LevelGrid::parse(&text, self.columns, self.rows),
            Err(e) if e.kind() == ErrorKind::NotFound && kind == LevelKind::Custom => {
                log::warn!("No custom level at {}, starting empty", path.display());
                Ok(LevelGrid::new(self.columns, self.rows))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save_grid(&mut self, kind: LevelKind, level: u32, grid: &LevelGrid) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(kind, level);
        fs::write(&path, grid.to_text())?;
        log::info!("Saved level to {}", path.display());
        Ok(())
    }
}

/// Levels held in memory; anything never stored reads as an empty grid
#[derive(Debug, Clone)]
pub struct MemoryLevels {
    grids: HashMap<(LevelKind, u32), LevelGrid>,
    columns: usize,
    rows: usize,
}

impl MemoryLevels {
    pub fn new(settings: &Settings) -> Self {
        Self {
            grids: HashMap::new(),
            columns: settings.grid_columns,
            rows: settings.max_level_rows,
        }
    }

    /// Standard level N is N full rows, so its brick count matches the
    /// running round target
    pub fn builtin(settings: &Settings) -> Self {
        let mut levels = Self::new(settings);
        for level in 1..=settings.round_count {
            let grid = LevelGrid::filled_rows(levels.columns, levels.rows, level as usize);
            levels.grids.insert((LevelKind::Standard, level), grid);
        }
        levels
    }

    pub fn insert(&mut self, kind: LevelKind, level: u32, grid: LevelGrid) {
        self.grids.insert((kind, level), grid);
    }
}

impl LevelSource for MemoryLevels {
    fn load_grid(&self, kind: LevelKind, level: u32) -> Result<LevelGrid> {
        Ok(self
            .grids
            .get(&(kind, level))
            .cloned()
            .unwrap_or_else(|| LevelGrid::new(self.columns, self.rows)))
    }

    fn save_grid(&mut self, kind: LevelKind, level: u32, grid: &LevelGrid) -> Result<()> {
        self.insert(kind, level, grid.clone());
        Ok(())
    }
}
