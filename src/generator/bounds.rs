/*
bounds.rs

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

//! World-space rectangle that limits the walk.

use serde::{Deserialize, Serialize};

use super::hex::Cell;
use crate::surface::Surface;

// Horizontal margin, so that cells exactly on a vertical edge do not flicker in and out because
// of floating point rounding.
const EPSILON: f32 = 0.1;

/// Rectangle in world units.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Bounds {
    /// Create a [`Bounds`] object.
    pub fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Whether the world point is strictly inside the rectangle.
    pub fn contains_point(&self, (x, y): (f32, f32)) -> bool {
        x - EPSILON > self.left && x + EPSILON < self.right && y > self.bottom && y < self.top
    }

    /// Whether the cell, converted to world coordinates by the surface, is inside the rectangle.
    pub fn within_bounds<S: Surface + ?Sized>(&self, surface: &S, cell: Cell) -> bool {
        self.contains_point(surface.cell_to_world(cell))
    }
}
