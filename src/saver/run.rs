/*
run.rs

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

//! Save and restore the result of a walk.
//!
//! The saved object is a serialization of the [`SavedRun`] object in JSON format by using
//! [`serde`].
//! Together with the seed, the configuration is enough to generate the same map again.

use chrono::{Local, SecondsFormat};
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::config::WalkConfig;
use crate::generator::random_walk::Output;

/// Content of the save file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedRun {
    /// Local time of the generation, in RFC 3339 format.
    pub generated_at: String,

    /// Seed of the random generator.
    pub seed: u64,

    pub config: WalkConfig,

    pub output: Output,
}

impl SavedRun {
    /// Create a [`SavedRun`] object timestamped with the current time.
    pub fn new(config: WalkConfig, seed: u64, output: Output) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            seed,
            config,
            output,
        }
    }
}

/// Object to save and restore a walk result.
pub struct SaverRun {
    /// Path to the save file.
    save_file: PathBuf,
}

impl SaverRun {
    /// Create a [`SaverRun`] object for the provided file.
    pub fn new(save_file: PathBuf) -> Self {
        debug!("Save file: {save_file:?}");
        Self { save_file }
    }

    /// Retrieve the [`SavedRun`] object from the save file.
    ///
    /// Return the [`SavedRun`] object or None if the save file does not exist.
    pub fn get_run(&self) -> Result<Option<SavedRun>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let run: SavedRun = serde_json::from_reader(reader)?;
        Ok(Some(run))
    }

    /// Save the provided [`SavedRun`] object.
    pub fn save_run(&self, run: &SavedRun) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, run)?;
        writer.flush()?;
        Ok(())
    }
}
