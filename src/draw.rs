/*
draw.rs

Copyright 2025 Hervé Quatremain

This file is part of Hexwalk.

Hexwalk is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Hexwalk is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Hexwalk. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Draw the generated map as text.
//!
//! [`TextSurface`] lays pointy-top hexagons out in rows. Odd rows are shifted to the right by
//! half a cell. World coordinates grow to the right and to the top, so the rows are printed from
//! the highest to the lowest.
//!
//! ```text
//!  . o o
//! o o o .
//!  x o .
//! ```

use log::debug;
use std::collections::HashMap;

use crate::config::MapSize;
use crate::generator::bounds::Bounds;
use crate::generator::hex::{Cell, Orientation};
use crate::surface::{Surface, SurfaceResult};

const SQRT_3: f32 = 1.732_050_8_f32;

/// Distance between the center and a corner of the hexagons, in world units.
pub const CELL_SIZE: f32 = 1.0;

/// What is drawn in a cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mark {
    Tile,

    /// Tile placed outside the bounds.
    OutOfBounds,
}

impl Mark {
    fn symbol(self) -> char {
        match self {
            Mark::Tile => 'o',
            Mark::OutOfBounds => 'x',
        }
    }
}

/// In-memory hexagonal grid.
#[derive(Debug, Clone)]
pub struct TextSurface {
    /// Distance between the center and a corner of the hexagons.
    cell_size: f32,

    marks: HashMap<Cell, Mark>,
}

impl Default for TextSurface {
    fn default() -> Self {
        Self::new(CELL_SIZE)
    }
}

impl TextSurface {
    /// Create a [`TextSurface`] object.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            marks: HashMap::new(),
        }
    }

    /// Return the bounds that cover a map of the given size, centered on the origin.
    ///
    /// For even sizes, the extra row and column are on the negative side.
    pub fn default_bounds(map_size: MapSize, cell_size: f32) -> Bounds {
        let width: f32 = SQRT_3 * cell_size;
        let row_height: f32 = 1.5 * cell_size;
        let half_w: i64 = i64::from(map_size.width / 2);
        let half_h: i64 = i64::from(map_size.height / 2);

        let left: f32 = -(half_w as f32 + 0.5) * width;
        let right: f32 = (i64::from(map_size.width) - half_w) as f32 * width;
        let bottom: f32 = -(half_h as f32 * row_height) - row_height / 2.0;
        let top: f32 =
            (i64::from(map_size.height) - half_h - 1) as f32 * row_height + row_height / 2.0;

        debug!("Default bounds: top={top} bottom={bottom} left={left} right={right}");
        Bounds::new(top, bottom, left, right)
    }

    /// Return the mark of the cell.
    pub fn get(&self, cell: Cell) -> Option<Mark> {
        self.marks.get(&cell).copied()
    }

    /// Number of cells with the given mark.
    pub fn count(&self, mark: Mark) -> usize {
        self.marks.values().filter(|m| **m == mark).count()
    }

    /// Number of cells with a tile.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Draw the grid.
    ///
    /// Only the rectangle that contains the tiles is drawn. Empty cells are drawn with a dot.
    pub fn render(&self) -> String {
        let mut s: String = String::new();
        if self.marks.is_empty() {
            return s;
        }

        let min_col: i32 = self.marks.keys().map(|c| c.col).min().unwrap_or(0);
        let max_col: i32 = self.marks.keys().map(|c| c.col).max().unwrap_or(0);
        let min_row: i32 = self.marks.keys().map(|c| c.row).min().unwrap_or(0);
        let max_row: i32 = self.marks.keys().map(|c| c.row).max().unwrap_or(0);

        for row in (min_row..=max_row).rev() {
            let line: Vec<String> = (min_col..=max_col)
                .map(|col| {
                    self.get(Cell::new(col, row))
                        .map_or('.', Mark::symbol)
                        .to_string()
                })
                .collect();
            if Orientation::from_row(row) == Orientation::Odd {
                s.push(' ');
            }
            s.push_str(&line.join(" "));
            s.push('\n');
        }
        s
    }
}

impl Surface for TextSurface {
    fn place_tile(&mut self, cell: Cell) -> SurfaceResult {
        self.marks.insert(cell, Mark::Tile);
        Ok(())
    }

    fn mark_out_of_bounds(&mut self, cell: Cell) -> SurfaceResult {
        self.marks.insert(cell, Mark::OutOfBounds);
        Ok(())
    }

    fn cell_to_world(&self, cell: Cell) -> (f32, f32) {
        let shift: f32 = match cell.orientation() {
            Orientation::Even => 0.0,
            Orientation::Odd => 0.5,
        };
        (
            self.cell_size * SQRT_3 * (cell.col as f32 + shift),
            self.cell_size * 1.5 * cell.row as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_rows_are_shifted() {
        let surface = TextSurface::new(2.0);
        assert_eq!(surface.cell_to_world(Cell::new(0, 0)), (0.0, 0.0));
        assert_eq!(surface.cell_to_world(Cell::new(1, 2)), (2.0 * SQRT_3, 6.0));
        assert_eq!(surface.cell_to_world(Cell::new(0, -1)), (SQRT_3, -3.0));
    }

    #[test]
    fn default_bounds_cover_the_map() {
        let surface = TextSurface::default();
        for (width, height) in [(10, 10), (7, 5), (4, 3)] {
            let bounds = TextSurface::default_bounds(MapSize::new(width, height), CELL_SIZE);
            let mut inside: u32 = 0;
            for row in -20..20 {
                for col in -20..20 {
                    if bounds.within_bounds(&surface, Cell::new(col, row)) {
                        inside += 1;
                    }
                }
            }
            assert_eq!(inside, width * height, "map {width}x{height}");
            assert!(bounds.within_bounds(&surface, Cell::ORIGIN));
        }
    }

    #[test]
    fn render_draws_rows_from_the_top() {
        let mut surface = TextSurface::default();
        assert_eq!(surface.render(), "");

        surface.place_tile(Cell::new(0, 0)).expect("in-memory surface");
        surface.place_tile(Cell::new(1, 0)).expect("in-memory surface");
        surface.place_tile(Cell::new(0, 1)).expect("in-memory surface");
        surface
            .mark_out_of_bounds(Cell::new(1, 0))
            .expect("in-memory surface");

        assert_eq!(surface.render(), " o .\no x\n");
        assert_eq!(surface.len(), 3);
        assert_eq!(surface.count(Mark::OutOfBounds), 1);
        assert_eq!(surface.get(Cell::new(1, 1)), None);
    }
}
