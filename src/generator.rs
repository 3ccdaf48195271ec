/*
generator.rs

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

//! Generate random hexagonal maps.
//!
//! A map is a connected region of cells grown by a random walk on a hexagonal grid.
//!
//! * [`hex`] defines the cell coordinates and the six neighbor directions, which depend on the
//!   parity of the row.
//! * [`bounds::Bounds`] is the world-space rectangle that the walk can be constrained to.
//! * [`tiles::Tiles`] stores the cells of the region in walk order.
//! * [`random_walk::RandomWalker`] runs the walk.
//!   You create this object from a [`crate::config::WalkConfig`] object, and you drive it with
//!   its [`random_walk::RandomWalker::step`] method, or run it to completion with its
//!   [`random_walk::RandomWalker::generate`] method.
//!   Both notify a [`crate::surface::Surface`] object of every new tile.
//!   If the walk gets stuck, the methods return an error.

pub mod bounds;
pub mod hex;
pub mod random_walk;
pub mod tiles;
