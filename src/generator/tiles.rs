/*
tiles.rs

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

//! Ordered set of cells.

use std::collections::HashSet;

use super::hex::Cell;

/// Cells in insertion order, without duplicates.
#[derive(Debug, Default, Clone)]
pub struct Tiles {
    /// Cells in the order they were added.
    cells: Vec<Cell>,

    /// Stores the membership of the cells.
    /// Instead of looking for the cell in the [`Tiles::cells`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    members: HashSet<Cell>,
}

impl PartialEq for Tiles {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Tiles {
    /// Create an empty [`Tiles`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`Tiles`] object with room for the given number of cells.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
        }
    }

    /// Add a cell at the end of the list.
    ///
    /// Return `false`, and leave the list untouched, if the cell is already present.
    pub fn push(&mut self, cell: Cell) -> bool {
        if !self.members.insert(cell) {
            return false;
        }
        self.cells.push(cell);
        true
    }

    /// Get the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the cell is in the list or not.
    pub fn contains(&self, cell: Cell) -> bool {
        self.members.contains(&cell)
    }

    /// Return the cells in insertion order.
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    /// Return the last added cell.
    pub fn last(&self) -> Option<Cell> {
        self.cells.last().copied()
    }
}

impl From<&Tiles> for Vec<Cell> {
    fn from(tiles: &Tiles) -> Self {
        tiles.cells.clone()
    }
}
