/*
hex.rs

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

//! Hexagonal grid coordinates and neighbor directions.
//!
//! Cells use offset coordinates: a column and a row.
//! Every other row is shifted by half a cell, so the six neighbors of a cell depend on the
//! parity of its row.
//! [`neighbor_offsets`] returns the offsets for the given row:
//!
//! ```text
//!  even row            odd row
//!
//!  (-1,-1) (0,-1)        (0,-1) (1,-1)
//! (-1,0)  X  (1,0)     (-1,0)  X  (1,0)
//!  (-1,1)  (0,1)         (0,1)  (1,1)
//! ```

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Grid cell, as a column and a row.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    /// Starting cell of every walk.
    pub const ORIGIN: Cell = Cell { col: 0, row: 0 };

    /// Create a [`Cell`] object.
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Return the orientation of the cell row.
    pub fn orientation(self) -> Orientation {
        Orientation::from_row(self.row)
    }
}

impl Add<Direction> for Cell {
    type Output = Cell;

    fn add(self, direction: Direction) -> Cell {
        Cell {
            col: self.col + direction.dx,
            row: self.row + direction.dy,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// Offset from a cell to one of its six neighbors.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    /// Create a [`Direction`] object.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.dx, self.dy)
    }
}

/// Row parity, which selects the neighbor table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    Even,
    Odd,
}

impl Orientation {
    /// Orientation of the given row. Negative rows follow the same alternation.
    pub fn from_row(row: i32) -> Self {
        if row.rem_euclid(2) == 0 {
            Orientation::Even
        } else {
            Orientation::Odd
        }
    }

    /// Neighbor offsets for this orientation, in their fixed order.
    pub fn directions(self) -> [Direction; 6] {
        match self {
            Orientation::Even => EVEN_DIRECTIONS,
            Orientation::Odd => ODD_DIRECTIONS,
        }
    }
}

// Right top, right, right bottom, left bottom, left, left top
const EVEN_DIRECTIONS: [Direction; 6] = [
    Direction::new(0, -1),
    Direction::new(1, 0),
    Direction::new(0, 1),
    Direction::new(-1, 1),
    Direction::new(-1, 0),
    Direction::new(-1, -1),
];

const ODD_DIRECTIONS: [Direction; 6] = [
    Direction::new(1, -1),
    Direction::new(1, 0),
    Direction::new(1, 1),
    Direction::new(0, 1),
    Direction::new(-1, 0),
    Direction::new(0, -1),
];

/// Return the neighbor offsets for a cell in the given row.
///
/// When `shuffle` is set, the six offsets are returned in a random order.
pub fn neighbor_offsets<R: Rng + ?Sized>(row: i32, shuffle: bool, rng: &mut R) -> [Direction; 6] {
    let mut directions: [Direction; 6] = Orientation::from_row(row).directions();
    if shuffle {
        directions.shuffle(rng);
    }
    directions
}

/// Whether `to` is one of the six neighbors of `from`.
pub fn is_neighbor(from: Cell, to: Cell) -> bool {
    from.orientation()
        .directions()
        .iter()
        .any(|d| from + *d == to)
}
