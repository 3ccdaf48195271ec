/*
random_walk.rs

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

//! Grow a random region of hexagonal cells.
//!
//! The walk starts at [`Cell::ORIGIN`] and moves to a random free neighbor of the last cell.
//! When the last cell has no usable neighbor (it is clamped), the walk resumes from an unsettled
//! cell: a free cell next to the region.
//! The walk stops when the region covers the requested percentage of the map.

use log::{debug, warn};
use rand::Rng;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hex::{Cell, Direction, Orientation, neighbor_offsets};
use super::tiles::Tiles;
use crate::config::WalkConfig;
use crate::surface::Surface;

/// Smallest map, in cells, that can be generated.
pub const MIN_MAP_SIZE: u64 = 10;

// Above this fill percentage, the fallback search accepts any free neighbor. Below, it prefers
// neighbors that still have room around them.
const HIGH_FILL_PERCENTAGE: f32 = 0.7;

// Minimum number of free cells around an unsettled cell when the fill percentage is low.
const MIN_FREE_NEIGHBORS: usize = 2;

// Upper limit of the initial capacity of the tile list. Large maps with a low fill percentage
// only need a few tiles.
const MAX_PREALLOCATED_TILES: usize = 4096;

/// Type of errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalkError {
    /// The map does not have enough cells.
    #[error("map size of {cells} cells is not enough to generate a tilemap (minimum {minimum})")]
    MapTooSmall { cells: u64, minimum: u64 },

    /// The walk was clamped and no unsettled cell is left to resume from.
    #[error("growth stalled: no unsettled cell left after clamping at {clamped}")]
    Stalled { clamped: Cell },

    /// The surface rejected a tile.
    #[error("surface error: {0}")]
    Surface(String),
}

/// Result of a walk.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Output {
    /// Cells of the region, in walk order. The first cell is [`Cell::ORIGIN`].
    pub occupied_cells: Vec<Cell>,

    /// Cells at which the walk had no usable neighbor.
    pub clamped_cells: Vec<Cell>,

    /// Free cells found next to the region when resuming after a clamp.
    pub unsettled_cells: Vec<Cell>,

    /// Direction of each move to a neighbor. Jumps to unsettled cells are not recorded.
    pub directions_taken: Vec<Direction>,
}

/// Outcome of [`RandomWalker::step`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Step {
    /// A tile has been placed next to the previous one. The very first tile, at the origin, has
    /// no direction.
    Placed {
        cell: Cell,
        direction: Option<Direction>,
    },

    /// The walk was clamped at `clamped`, and resumed at the unsettled `cell`.
    Relocated { clamped: Cell, cell: Cell },

    /// The fill percentage is reached.
    Complete,
}

impl Step {
    /// Whether the walk is over.
    pub fn is_complete(&self) -> bool {
        matches!(self, Step::Complete)
    }
}

/// Outcome of the search for an unsettled cell.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UnsettledSearch {
    /// Cell to resume the walk from.
    pub cell: Option<Cell>,

    /// All the candidates found during the search, in discovery order.
    pub discovered: Vec<Cell>,
}

/// [`RandomWalker`] object.
///
/// The walker owns the whole state of a run. Call [`RandomWalker::step`] repeatedly to pace the
/// generation, or [`RandomWalker::generate`] to run it to completion.
pub struct RandomWalker<R: Rng = ThreadRng> {
    config: WalkConfig,

    /// Number of cells the map can hold. See [`crate::config::MapSize::target_length`].
    target_length: u64,

    tiles: Tiles,
    clamped: Tiles,
    unsettled: Tiles,
    directions: Vec<Direction>,

    /// Number of steps after the first tile.
    iteration: usize,

    /// Error that ended the walk. Once set, the walk cannot continue.
    failure: Option<WalkError>,

    rng: R,
}

impl RandomWalker<ThreadRng> {
    /// Create a walker that uses the thread random generator.
    ///
    /// # Errors
    ///
    /// The method returns [`WalkError::MapTooSmall`] when the map has less than
    /// [`MIN_MAP_SIZE`] cells.
    pub fn new(config: WalkConfig) -> Result<Self, WalkError> {
        Self::with_rng(config, rand::rng())
    }
}

impl<R: Rng> RandomWalker<R> {
    /// Create a walker that uses the provided random generator.
    ///
    /// # Errors
    ///
    /// The method returns [`WalkError::MapTooSmall`] when the map has less than
    /// [`MIN_MAP_SIZE`] cells.
    pub fn with_rng(config: WalkConfig, rng: R) -> Result<Self, WalkError> {
        let cells: u64 = config.map_size().cells();
        if cells < MIN_MAP_SIZE {
            warn!("Map size is not enough to generate a tilemap: {cells} cells");
            return Err(WalkError::MapTooSmall {
                cells,
                minimum: MIN_MAP_SIZE,
            });
        }
        let target_length: u64 = config.map_size().target_length();

        debug!(
            "Map size = {}x{}  Target length = {}  Fill percentage = {}  Inside bounds = {}",
            config.map_size().width,
            config.map_size().height,
            target_length,
            config.fill_percentage(),
            config.constrain_to_bounds()
        );

        let capacity: usize =
            usize::try_from(target_length).map_or(MAX_PREALLOCATED_TILES, |n| {
                n.min(MAX_PREALLOCATED_TILES)
            });

        Ok(Self {
            config,
            target_length,
            tiles: Tiles::with_capacity(capacity),
            clamped: Tiles::new(),
            unsettled: Tiles::new(),
            directions: Vec::with_capacity(capacity),
            iteration: 0,
            failure: None,
            rng,
        })
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    pub fn target_length(&self) -> u64 {
        self.target_length
    }

    /// Number of steps run after placing the first tile.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Whether the region covers the requested percentage of the map.
    pub fn is_complete(&self) -> bool {
        !self.tiles.is_empty()
            && self.tiles.len() as f32 / self.target_length as f32
                >= self.config.fill_percentage()
    }

    /// Return the current state of the walk.
    pub fn output(&self) -> Output {
        Output {
            occupied_cells: Vec::from(&self.tiles),
            clamped_cells: Vec::from(&self.clamped),
            unsettled_cells: Vec::from(&self.unsettled),
            directions_taken: self.directions.clone(),
        }
    }

    /// Run the walk to completion and return the result.
    ///
    /// # Errors
    ///
    /// See [`RandomWalker::step`].
    pub fn generate<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<Output, WalkError> {
        while !self.step(surface)?.is_complete() {}
        debug!(
            "Tiles = {}  Clamped = {}  Unsettled = {}  Iterations = {}",
            self.tiles.len(),
            self.clamped.len(),
            self.unsettled.len(),
            self.iteration
        );
        Ok(self.output())
    }

    /// Place one tile, or report that the walk is complete.
    ///
    /// # Errors
    ///
    /// The method returns [`WalkError::Stalled`] when the walk is clamped and no unsettled cell
    /// can be found, and [`WalkError::Surface`] when the surface fails.
    /// After an error, all subsequent calls return the same error.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<Step, WalkError> {
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        let res: Result<Step, WalkError> = self.advance(surface);
        if let Err(e) = &res {
            warn!("Walk aborted after {} tiles: {e}", self.tiles.len());
            self.failure = Some(e.clone());
        }
        res
    }

    fn advance<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<Step, WalkError> {
        // The first tile is the starting position
        let Some(last) = self.tiles.last() else {
            surface
                .place_tile(Cell::ORIGIN)
                .map_err(|e| WalkError::Surface(e.to_string()))?;
            self.tiles.push(Cell::ORIGIN);
            debug!("First tile at {}", Cell::ORIGIN);
            return Ok(Step::Placed {
                cell: Cell::ORIGIN,
                direction: None,
            });
        };

        if self.is_complete() {
            return Ok(Step::Complete);
        }

        self.iteration += 1;
        let directions: [Direction; 6] = neighbor_offsets(last.row, true, &mut self.rng);

        if let Some((cell, direction)) = self.select_candidate(&*surface, last, &directions) {
            self.place(surface, cell)?;
            self.directions.push(direction);
            debug!("== Step {}: {last} -> {cell}", self.iteration);
            return Ok(Step::Placed {
                cell,
                direction: Some(direction),
            });
        }

        // No usable direction: the cell computed from the last direction is recorded as clamped
        let clamped: Cell = last + directions[directions.len() - 1];
        self.clamped.push(clamped);
        debug!("== Step {}: clamped at {clamped}", self.iteration);

        let search: UnsettledSearch = self.find_unsettled_cell(&*surface);
        for cell in search.discovered {
            self.unsettled.push(cell);
        }
        let cell: Cell = search.cell.ok_or(WalkError::Stalled { clamped })?;
        self.place(surface, cell)?;
        debug!("    Resuming from unsettled cell {cell}");
        Ok(Step::Relocated { clamped, cell })
    }

    /// Return the first of the given directions that leads to a usable cell.
    ///
    /// A cell is usable when it is not part of the region yet and, if the walk is constrained,
    /// when it is inside the bounds.
    fn select_candidate<S: Surface + ?Sized>(
        &self,
        surface: &S,
        last: Cell,
        directions: &[Direction],
    ) -> Option<(Cell, Direction)> {
        let bounds = self.config.bounds();
        let constrained: bool = self.config.constrain_to_bounds();

        directions
            .iter()
            .map(|d| (last + *d, *d))
            .find(|(cell, _)| {
                !self.tiles.contains(*cell)
                    && (!constrained || bounds.within_bounds(surface, *cell))
            })
    }

    /// Add a tile to the region and notify the surface.
    fn place<S: Surface + ?Sized>(&mut self, surface: &mut S, cell: Cell) -> Result<(), WalkError> {
        surface
            .place_tile(cell)
            .map_err(|e| WalkError::Surface(e.to_string()))?;

        // Without constraint, the bounds only flag the tiles that escape
        if !self.config.constrain_to_bounds()
            && !self.config.bounds().within_bounds(&*surface, cell)
        {
            debug!("    Tile {cell} is outside the bounds");
            surface
                .mark_out_of_bounds(cell)
                .map_err(|e| WalkError::Surface(e.to_string()))?;
        }
        self.tiles.push(cell);
        Ok(())
    }

    /// Look for a free cell inside the bounds, next to the region.
    ///
    /// All the cells of the region are scanned, and each one can provide a candidate: the
    /// candidate of the last scanned cell wins.
    /// For high fill percentages, the first free neighbor of a cell is its candidate.
    /// Otherwise, the free neighbor must itself have at least two free neighbors. These are
    /// computed with the orientation of the last cell of the walk.
    pub fn find_unsettled_cell<S: Surface + ?Sized>(&self, surface: &S) -> UnsettledSearch {
        let mut search: UnsettledSearch = UnsettledSearch::default();
        let Some(last) = self.tiles.last() else {
            return search;
        };
        let high_fill: bool = self.config.fill_percentage() > HIGH_FILL_PERCENTAGE;
        let last_orientation: Orientation = last.orientation();

        for &cell in self.tiles.as_slice() {
            let found: Option<Cell> = cell
                .orientation()
                .directions()
                .iter()
                .map(|d| cell + *d)
                .find(|nearby| {
                    self.is_free(surface, *nearby)
                        && (high_fill
                            || self.free_neighbors(surface, *nearby, last_orientation)
                                >= MIN_FREE_NEIGHBORS)
                });

            if let Some(nearby) = found {
                search.cell = Some(nearby);
                if !search.discovered.contains(&nearby) {
                    search.discovered.push(nearby);
                }
            }
        }
        search
    }

    /// Whether the cell is outside the region and inside the bounds.
    fn is_free<S: Surface + ?Sized>(&self, surface: &S, cell: Cell) -> bool {
        !self.tiles.contains(cell) && self.config.bounds().within_bounds(surface, cell)
    }

    /// Count the free cells around the given cell, using the neighbor offsets of `orientation`.
    fn free_neighbors<S: Surface + ?Sized>(
        &self,
        surface: &S,
        cell: Cell,
        orientation: Orientation,
    ) -> usize {
        orientation
            .directions()
            .iter()
            .filter(|d| self.is_free(surface, cell + **d))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapSize;
    use crate::generator::bounds::Bounds;
    use crate::surface::SurfaceResult;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Surface where a cell maps to its own coordinates.
    #[derive(Default)]
    struct GridSurface {
        placed: Vec<Cell>,
        out_of_bounds: Vec<Cell>,
    }

    impl Surface for GridSurface {
        fn place_tile(&mut self, cell: Cell) -> SurfaceResult {
            self.placed.push(cell);
            Ok(())
        }

        fn mark_out_of_bounds(&mut self, cell: Cell) -> SurfaceResult {
            self.out_of_bounds.push(cell);
            Ok(())
        }

        fn cell_to_world(&self, cell: Cell) -> (f32, f32) {
            (cell.col as f32, cell.row as f32)
        }
    }

    struct BrokenSurface;

    impl Surface for BrokenSurface {
        fn place_tile(&mut self, _cell: Cell) -> SurfaceResult {
            Err("no tilemap".into())
        }

        fn mark_out_of_bounds(&mut self, _cell: Cell) -> SurfaceResult {
            Ok(())
        }

        fn cell_to_world(&self, cell: Cell) -> (f32, f32) {
            (cell.col as f32, cell.row as f32)
        }
    }

    fn wide_bounds() -> Bounds {
        Bounds::new(1000.0, -1000.0, -1000.0, 1000.0)
    }

    fn new_walker(fill: f32, bounds: Bounds, constrained: bool, seed: u64) -> RandomWalker<StdRng> {
        RandomWalker::with_rng(
            WalkConfig::new(MapSize::new(10, 10), fill, bounds, constrained),
            StdRng::seed_from_u64(seed),
        )
        .expect("valid map size")
    }

    #[test]
    fn small_map_is_rejected() {
        let config = WalkConfig::new(MapSize::new(2, 2), 0.5, wide_bounds(), true);
        let res = RandomWalker::with_rng(config, StdRng::seed_from_u64(0));
        assert_eq!(
            res.err(),
            Some(WalkError::MapTooSmall {
                cells: 4,
                minimum: 10
            })
        );
    }

    #[test]
    fn first_step_places_the_origin() {
        let mut surface = GridSurface::default();
        let mut walker = new_walker(0.5, wide_bounds(), true, 3);

        assert_eq!(
            walker.step(&mut surface),
            Ok(Step::Placed {
                cell: Cell::ORIGIN,
                direction: None
            })
        );
        assert_eq!(surface.placed, vec![Cell::ORIGIN]);
        assert_eq!(walker.output().occupied_cells, vec![Cell::ORIGIN]);
        assert!(walker.output().directions_taken.is_empty());
    }

    #[test]
    fn complete_walk_stops_at_the_target() {
        let mut surface = GridSurface::default();
        let mut walker = new_walker(0.5, wide_bounds(), true, 11);

        let output = walker.generate(&mut surface).expect("walk completes");
        assert_eq!(output.occupied_cells.len(), 48);
        assert_eq!(surface.placed, output.occupied_cells);
        assert_eq!(walker.step(&mut surface), Ok(Step::Complete));
        assert_eq!(surface.placed.len(), 48);
    }

    #[test]
    fn outside_tiles_are_flagged_when_not_constrained() {
        let mut surface = GridSurface::default();
        // Only the origin fits inside the bounds
        let bounds = Bounds::new(0.5, -0.5, -0.5, 0.5);
        let mut walker = new_walker(0.5, bounds, false, 5);

        for _ in 0..5 {
            assert!(walker.step(&mut surface).is_ok());
        }
        let output = walker.output();
        assert_eq!(output.occupied_cells.len(), 5);
        assert_eq!(surface.out_of_bounds, output.occupied_cells[1..].to_vec());
    }

    #[test]
    fn unsettled_search_keeps_the_last_candidate() {
        let surface = GridSurface::default();
        let mut walker = new_walker(0.9, wide_bounds(), true, 0);
        walker.tiles.push(Cell::new(0, 0));
        walker.tiles.push(Cell::new(1, 0));

        let search = walker.find_unsettled_cell(&surface);
        // First free neighbor of (0,0) in table order is (0,-1), then (1,-1) for (1,0)
        assert_eq!(search.discovered, vec![Cell::new(0, -1), Cell::new(1, -1)]);
        assert_eq!(search.cell, Some(Cell::new(1, -1)));
    }

    #[test]
    fn unsettled_search_needs_room_on_low_fill() {
        let surface = GridSurface::default();
        // Bounds only allow the cells of row 0 with a column between 0 and 2
        let bounds = Bounds::new(0.5, -0.5, -0.5, 2.5);
        let mut walker = new_walker(0.5, bounds, true, 0);
        walker.tiles.push(Cell::new(0, 0));
        walker.tiles.push(Cell::new(2, 0));

        // (1,0) is free but has no other free cell around it
        let search = walker.find_unsettled_cell(&surface);
        assert_eq!(search.cell, None);
        assert!(search.discovered.is_empty());

        // With a high fill percentage, any free cell is accepted
        let mut walker = new_walker(0.8, bounds, true, 0);
        walker.tiles.push(Cell::new(0, 0));
        walker.tiles.push(Cell::new(2, 0));
        assert_eq!(walker.find_unsettled_cell(&surface).cell, Some(Cell::new(1, 0)));
    }

    #[test]
    fn unsettled_search_uses_the_orientation_of_the_last_cell() {
        let surface = GridSurface::default();
        // Bounds only allow the cells with a column between 0 and 2 and a row between -1 and 1
        let bounds = Bounds::new(1.5, -1.5, -0.5, 2.5);
        // Only (1,0), (2,-1) and (2,1) are left free
        let occupied: [Cell; 6] = [
            Cell::new(0, 0),
            Cell::new(2, 0),
            Cell::new(0, -1),
            Cell::new(0, 1),
            Cell::new(1, -1),
            Cell::new(1, 1),
        ];

        // The last cell is on an odd row: around (1,0), the odd offsets reach (2,-1) and (2,1)
        let mut walker = new_walker(0.5, bounds, true, 0);
        for cell in occupied {
            walker.tiles.push(cell);
        }
        assert_eq!(walker.tiles.last(), Some(Cell::new(1, 1)));
        let search = walker.find_unsettled_cell(&surface);
        assert_eq!(search.cell, Some(Cell::new(1, 0)));
        assert_eq!(search.discovered, vec![Cell::new(1, 0)]);

        // The last cell is on an even row: around (1,0), the even offsets only reach occupied cells
        let mut walker = new_walker(0.5, bounds, true, 0);
        for cell in occupied.iter().rev() {
            walker.tiles.push(*cell);
        }
        assert_eq!(walker.tiles.last(), Some(Cell::new(0, 0)));
        let search = walker.find_unsettled_cell(&surface);
        assert_eq!(search.cell, None);
        assert!(search.discovered.is_empty());
    }

    #[test]
    fn unsettled_search_on_low_fill_keeps_the_last_candidate() {
        let surface = GridSurface::default();
        let mut walker = new_walker(0.5, wide_bounds(), true, 0);
        walker.tiles.push(Cell::new(0, 0));
        walker.tiles.push(Cell::new(4, 0));

        // Both cells have room around them: each one provides its first free neighbor
        let search = walker.find_unsettled_cell(&surface);
        assert_eq!(search.discovered, vec![Cell::new(0, -1), Cell::new(4, -1)]);
        assert_eq!(search.cell, Some(Cell::new(4, -1)));
    }

    #[test]
    fn huge_map_is_accepted() {
        let mut surface = GridSurface::default();
        let config = WalkConfig::new(MapSize::new(u32::MAX, u32::MAX), 0.0, wide_bounds(), true);
        let mut walker =
            RandomWalker::with_rng(config, StdRng::seed_from_u64(0)).expect("valid map size");

        assert_eq!(walker.target_length(), walker.config().map_size().target_length());
        assert!(walker.step(&mut surface).is_ok());
        assert_eq!(walker.step(&mut surface), Ok(Step::Complete));
        assert_eq!(surface.placed, vec![Cell::ORIGIN]);
    }

    #[test]
    fn stalled_walk_is_reported() {
        let mut surface = GridSurface::default();
        // Only the origin fits inside the bounds
        let bounds = Bounds::new(0.5, -0.5, -0.5, 0.5);
        let mut walker = new_walker(0.5, bounds, true, 9);

        assert!(walker.step(&mut surface).is_ok());
        let res = walker.step(&mut surface);

        // The clamped cell comes from the last of the shuffled offsets. The origin step does not
        // use the random generator, so the same seed gives the same shuffle.
        let directions = neighbor_offsets(0, true, &mut StdRng::seed_from_u64(9));
        let clamped: Cell = Cell::ORIGIN + directions[5];
        assert_eq!(res, Err(WalkError::Stalled { clamped }));
        assert_eq!(walker.output().occupied_cells, vec![Cell::ORIGIN]);
        assert_eq!(walker.output().clamped_cells, vec![clamped]);
        // The walk cannot resume
        assert_eq!(walker.step(&mut surface), res);
    }

    #[test]
    fn surface_errors_abort_the_walk() {
        let mut walker = new_walker(0.5, wide_bounds(), true, 1);
        let res = walker.generate(&mut BrokenSurface);
        assert_eq!(res, Err(WalkError::Surface("no tilemap".to_string())));
        assert!(walker.output().occupied_cells.is_empty());
    }
}
