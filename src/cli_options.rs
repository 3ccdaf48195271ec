/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! Generate a 12x8 map, filled at 60%, that stays inside the map bounds:
//!
//! ```
//! $ hexwalk -W 12 -H 8 -f 0.6 --inside-bounds --summary
//!      o o o
//!   o o o o o o
//!  o o o o o o o
//!     o o o o o .
//!  . o o o o o o
//!   . o o . . o
//!
//!       tiles = 58
//!     clamped = 2
//!   unsettled = 3
//!  directions = 55
//!     outside = 0
//!       steps = 57
//!        seed = 6204912207369734561
//! ```
//!
//! Watch the generation, one step every 100 ms, and save the result:
//!
//! ```
//! $ hexwalk --delay-ms 100 --seed 42 -o map.json
//! ```
//!
//! Generate the saved map again, from its configuration and seed:
//!
//! ```
//! $ hexwalk --replay map.json
//! ```

use clap::Parser;
use log::{Level, LevelFilter, debug, log_enabled, warn};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use hexwalk::config::{ConfigFile, MapSize, WalkConfig};
use hexwalk::draw::{CELL_SIZE, Mark, TextSurface};
use hexwalk::generator::bounds::Bounds;
use hexwalk::generator::random_walk::{Output, RandomWalker, Step};
use hexwalk::saver::run::{SavedRun, SaverRun};

/// Fill percentage when neither the command line nor the configuration file provide one.
const DEFAULT_FILL_PERCENTAGE: f32 = 0.5;

// Clear the terminal and move the cursor to the top left corner
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Grow a random map on a hexagonal grid.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
struct Args {
    /// Number of columns in the map [default: 10]
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Number of rows in the map [default: 10]
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Percentage of the map to fill, between 0 and 1 [default: 0.5]
    #[arg(short, long, allow_negative_numbers = true)]
    fill: Option<f32>,

    /// Prevent the tiles from being set outside the bounds
    #[arg(short = 'b', long, default_value_t = false, overrides_with = "no_inside_bounds")]
    inside_bounds: bool,

    /// Let the tiles go outside the bounds, even if the configuration file prevents it
    #[arg(long, default_value_t = false, overrides_with = "inside_bounds")]
    no_inside_bounds: bool,

    /// Bounds in world units, as TOP,BOTTOM,LEFT,RIGHT [default: the map rectangle]
    #[arg(long, value_parser = parse_bounds, allow_hyphen_values = true)]
    bounds: Option<Bounds>,

    /// JSON configuration file. Command-line options take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// Redraw the map after each step, waiting the given number of milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Save the result to the given JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generate again a map saved with --output, by using its configuration and seed
    #[arg(
        short,
        long,
        conflicts_with_all = [
            "width", "height", "fill", "inside_bounds", "no_inside_bounds", "bounds", "config",
            "seed",
        ]
    )]
    replay: Option<PathBuf>,

    /// Print some statistics after generating the map
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse bounds in the TOP,BOTTOM,LEFT,RIGHT format.
fn parse_bounds(s: &str) -> Result<Bounds, String> {
    let values: Vec<f32> = s
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid bounds {s:?}: {e}"))?;
    match values[..] {
        [top, bottom, left, right] => Ok(Bounds::new(top, bottom, left, right)),
        _ => Err(format!(
            "invalid bounds {s:?}: expected TOP,BOTTOM,LEFT,RIGHT"
        )),
    }
}

/// Merge the configuration file and the command-line options.
fn build_config(args: &Args) -> Result<WalkConfig, Box<dyn Error>> {
    let file: ConfigFile = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };

    let file_size: MapSize = file.map_size.unwrap_or_default();
    let map_size: MapSize = MapSize::new(
        args.width.unwrap_or(file_size.width),
        args.height.unwrap_or(file_size.height),
    );
    let fill_percentage: f32 = args
        .fill
        .or(file.fill_percentage)
        .unwrap_or(DEFAULT_FILL_PERCENTAGE);
    let bounds: Bounds = args
        .bounds
        .or(file.bounds)
        .unwrap_or_else(|| TextSurface::default_bounds(map_size, CELL_SIZE));
    let constrain_to_bounds: bool = if args.inside_bounds {
        true
    } else if args.no_inside_bounds {
        false
    } else {
        file.constrain_to_bounds.unwrap_or(false)
    };

    Ok(WalkConfig::new(
        map_size,
        fill_percentage,
        bounds,
        constrain_to_bounds,
    ))
}

/// Read a result saved with --output.
fn load_replay(path: &Path) -> Result<SavedRun, Box<dyn Error>> {
    match SaverRun::new(path.to_path_buf()).get_run()? {
        Some(run) => {
            debug!("Replaying the run generated at {}", run.generated_at);
            Ok(run)
        }
        None => Err(format!("{} does not exist", path.display()).into()),
    }
}

/// Run the walk, redrawing the map after each step.
fn generate_paced(
    walker: &mut RandomWalker<StdRng>,
    surface: &mut TextSurface,
    delay: Duration,
) -> Result<Output, Box<dyn Error>> {
    loop {
        let step: Step = walker.step(surface)?;
        if step.is_complete() {
            return Ok(walker.output());
        }
        print!("{CLEAR_SCREEN}{}", surface.render());
        if let Step::Relocated { clamped, cell } = step {
            println!("clamped at {clamped}, resuming at {cell}");
        }
        thread::sleep(delay);
    }
}

/// Parse and process command-line options, and return the exit code.
pub fn run() -> u8 {
    let args: Args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    // The output of a replayed run is compared to the saved one
    let (config, seed, saved_output): (WalkConfig, u64, Option<Output>) = match &args.replay {
        Some(path) => match load_replay(path) {
            Ok(run) => (run.config, run.seed, Some(run.output)),
            Err(e) => {
                eprintln!("Error: replay: {e}");
                return 1;
            }
        },
        None => match build_config(&args) {
            Ok(c) => (c, args.seed.unwrap_or_else(|| rand::rng().random()), None),
            Err(e) => {
                eprintln!("Error: configuration: {e}");
                return 1;
            }
        },
    };
    debug!("Seed = {seed}");

    let mut walker: RandomWalker<StdRng> =
        match RandomWalker::with_rng(config, StdRng::seed_from_u64(seed)) {
            Ok(w) => w,
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        };
    let mut surface: TextSurface = TextSurface::default();

    let res: Result<Output, Box<dyn Error>> = match args.delay_ms {
        Some(ms) => generate_paced(&mut walker, &mut surface, Duration::from_millis(ms)),
        None => walker.generate(&mut surface).map_err(Into::into),
    };
    let output: Output = match res {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", surface.render());
            eprintln!("Error: {e}");
            return 1;
        }
    };

    if args.delay_ms.is_some() {
        print!("{CLEAR_SCREEN}");
    }
    print!("{}", surface.render());
    if log_enabled!(Level::Debug) {
        debug!("Walk: {:?}", output.occupied_cells);
    }
    if saved_output.as_ref().is_some_and(|saved| *saved != output) {
        warn!("The replayed map differs from the saved one");
    }

    // Print some stats
    if args.summary {
        println!(
            "
      tiles = {}
    clamped = {}
  unsettled = {}
 directions = {}
    outside = {}
      steps = {}
       seed = {}",
            output.occupied_cells.len(),
            output.clamped_cells.len(),
            output.unsettled_cells.len(),
            output.directions_taken.len(),
            surface.count(Mark::OutOfBounds),
            walker.iteration(),
            seed
        );
    }

    if let Some(path) = args.output {
        let saver: SaverRun = SaverRun::new(path);
        if let Err(e) = saver.save_run(&SavedRun::new(config, seed, output)) {
            eprintln!("Error: cannot save the result: {e}");
            return 1;
        }
    }
    0
}
