/*
surface.rs

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

//! Grid surface that receives the generated tiles.
//!
//! The walker never reads back the state of the surface.
//! It only notifies the surface of the new tiles, and uses the surface to convert cells to world
//! coordinates when testing the bounds.
//! See [`crate::draw::TextSurface`] for an implementation that renders the grid as text.

use std::error::Error;

use crate::generator::hex::Cell;

/// Result of the surface notifications.
pub type SurfaceResult = Result<(), Box<dyn Error>>;

/// Operations the walker needs from a grid surface.
pub trait Surface {
    /// Draw a tile at the given cell.
    fn place_tile(&mut self, cell: Cell) -> SurfaceResult;

    /// Flag the tile at the given cell as being outside the bounds.
    fn mark_out_of_bounds(&mut self, cell: Cell) -> SurfaceResult;

    /// Convert a cell to world coordinates.
    fn cell_to_world(&self, cell: Cell) -> (f32, f32);
}
