//! The cell grid rendering draws into.

use crate::style::Rgb;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    /// Right half of a wide char drawn in the cell to the left.
    pub continuation: bool,
}

impl Cell {
    pub const fn blank(fg: Rgb, bg: Rgb) -> Self {
        Self {
            ch: ' ',
            fg,
            bg,
            bold: false,
            continuation: false,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Rgb::WHITE, Rgb::BLACK)
    }
}

/// A `width` x `height` grid addressed with signed coordinates. Anything
/// outside the grid is silently dropped, so callers can draw partially
/// off-screen elements without clipping first.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < usize::from(self.width))?;
        let y = usize::try_from(y).ok().filter(|&y| y < usize::from(self.height))?;
        Some(y * usize::from(self.width) + x)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Visible characters of line `y`.
    pub fn line(&self, y: u16) -> String {
        self.cells
            .chunks(usize::from(self.width).max(1))
            .nth(usize::from(y))
            .map(|line| {
                line.iter()
                    .filter(|c| !c.continuation)
                    .map(|c| c.ch)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cells of `self` that differ from `before`, with their positions.
    pub fn changes<'a>(&'a self, before: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        let width = usize::from(self.width).max(1);
        self.cells
            .iter()
            .zip(&before.cells)
            .enumerate()
            .filter(|(_, (now, then))| now != then)
            .map(move |(i, (cell, _))| ((i % width) as u16, (i / width) as u16, cell))
    }

    pub fn fill(&mut self, fg: Rgb, bg: Rgb) {
        self.cells.fill(Cell::blank(fg, bg));
    }

    /// Make every cell differ from anything a render can produce, so the
    /// next diff against this buffer covers the whole screen.
    pub fn invalidate(&mut self) {
        self.cells.fill(Cell {
            ch: '\0',
            ..Cell::default()
        });
    }
}
