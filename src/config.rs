//! Command line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use tracing::Level;

use crate::session::SessionConfig;

/// Configuration of a game, read from the command line.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Number of maze columns.
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(u16).range(2..=200))]
    pub cols: u16,
    /// Number of maze rows.
    #[arg(long, default_value_t = 14, value_parser = clap::value_parser!(u16).range(2..=200))]
    pub rows: u16,
    /// Seed for the maze and the collectibles; a random one is picked and logged when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of collectibles to scatter over the maze.
    #[arg(long, default_value_t = 5)]
    pub collectibles: usize,
    /// Number of random samples spent looking for collectible spots.
    #[arg(long, default_value_t = 100)]
    pub placement_attempts: usize,
    /// Carving steps performed per animation frame.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub steps_per_frame: u16,
    /// Delay between animation frames, in milliseconds.
    #[arg(long, default_value_t = 16)]
    pub frame_delay_ms: u64,
    /// Resize the maze to fill the terminal whenever the terminal is resized.
    #[arg(long)]
    pub fit_terminal: bool,
    /// Write the walls of every completed maze to this JSON file.
    #[arg(long, value_name = "PATH")]
    pub walls_dump: Option<PathBuf>,
    /// File receiving the log output.
    #[arg(long, value_name = "PATH", default_value = "mazecarver.log")]
    pub log_file: PathBuf,
    /// Most verbose level written to the log file.
    #[arg(long, default_value = "info")]
    pub log_level: Level,
}

impl Config {
    /// Returns the session parameters.
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            cols: usize::from(self.cols),
            rows: usize::from(self.rows),
            collectibles: self.collectibles,
            placement_attempts: self.placement_attempts,
        }
    }

    /// Returns the delay between two animation frames.
    #[must_use]
    pub const fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}
