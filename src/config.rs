/*
config.rs

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

//! Run configuration.
//!
//! A [`WalkConfig`] object is built with [`WalkConfig::new`], which normalizes the fill
//! percentage.
//! The configuration can also be read from a JSON file, such as:
//!
//! ```json
//! {
//!   "map_size": { "width": 12, "height": 8 },
//!   "fill_percentage": 0.6,
//!   "constrain_to_bounds": true,
//!   "bounds": { "top": 6.0, "bottom": -6.0, "left": -10.0, "right": 10.0 }
//! }
//! ```
//!
//! All the fields are optional in the file.
//! See [`ConfigFile`].

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::generator::bounds::Bounds;

/// Fill percentage used for negative or undefined values.
pub const MIN_FILL_PERCENTAGE: f32 = 0.1;

/// Map dimensions, in cells.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct MapSize {
    pub width: u32,
    pub height: u32,
}

impl MapSize {
    /// Create a [`MapSize`] object.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of cells in the rectangle.
    pub fn cells(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Number of cells that the walk can reach in the rectangle.
    ///
    /// Every other row is shifted by half a cell, so half a row of cells is lost: the length is
    /// `floor(width * height - height / 2)`, which is `width * height - ceil(height / 2)`.
    pub fn target_length(&self) -> u64 {
        self.cells()
            .saturating_sub(u64::from(self.height.div_ceil(2)))
    }
}

impl Default for MapSize {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

/// Parameters of a walk.
///
/// The fill percentage is normalized again when the object is deserialized.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct WalkConfig {
    map_size: MapSize,
    fill_percentage: f32,
    bounds: Bounds,
    constrain_to_bounds: bool,
}

impl WalkConfig {
    /// Create a [`WalkConfig`] object.
    ///
    /// A fill percentage above 1 becomes 1. A negative (or NaN) fill percentage becomes
    /// [`MIN_FILL_PERCENTAGE`].
    pub fn new(
        map_size: MapSize,
        fill_percentage: f32,
        bounds: Bounds,
        constrain_to_bounds: bool,
    ) -> Self {
        Self {
            map_size,
            fill_percentage: normalize_fill_percentage(fill_percentage),
            bounds,
            constrain_to_bounds,
        }
    }

    pub fn map_size(&self) -> MapSize {
        self.map_size
    }

    pub fn fill_percentage(&self) -> f32 {
        self.fill_percentage
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether the walk must stay inside the bounds. Otherwise, the bounds only flag the tiles
    /// that go outside.
    pub fn constrain_to_bounds(&self) -> bool {
        self.constrain_to_bounds
    }
}

/// Deserialize a [`WalkConfig`] object through [`WalkConfig::new`].
impl<'de> Deserialize<'de> for WalkConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields {
            map_size: MapSize,
            fill_percentage: f32,
            bounds: Bounds,
            constrain_to_bounds: bool,
        }

        let fields: Fields = Fields::deserialize(deserializer)?;
        Ok(WalkConfig::new(
            fields.map_size,
            fields.fill_percentage,
            fields.bounds,
            fields.constrain_to_bounds,
        ))
    }
}

/// Bring the fill percentage back into a usable range.
pub fn normalize_fill_percentage(fill_percentage: f32) -> f32 {
    if fill_percentage.is_nan() || fill_percentage < 0.0 {
        MIN_FILL_PERCENTAGE
    } else if fill_percentage > 1.0 {
        1.0
    } else {
        fill_percentage
    }
}

/// Content of a configuration file. Missing fields are left to the caller.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub map_size: Option<MapSize>,
    pub fill_percentage: Option<f32>,
    pub constrain_to_bounds: Option<bool>,
    pub bounds: Option<Bounds>,
}

impl ConfigFile {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        debug!("Configuration file: {path:?}");
        let file: File = File::open(path)?;
        let reader: BufReader<File> = BufReader::new(file);
        let config: ConfigFile = serde_json::from_reader(reader)?;
        Ok(config)
    }
}
