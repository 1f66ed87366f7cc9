//! JSON files for puzzles and solver reports.
//!
//! Puzzle file layout:
//!
//! ```json
//! {
//!   "grid": [[2, 2, 0], [1, 1, 99]],
//!   "exit_row": 1,
//!   "exit_col": 2,
//!   "goal_vehicle": 1
//! }
//! ```
//!
//! `width` and `height` default to the grid's own dimensions. Without
//! `exit_col` the exit is the marker on `exit_row`, or past the right edge if
//! the row has none. `goal_vehicle` defaults to vehicle 1.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Exit};
use crate::error::{Error, GridError};
use crate::solver::SearchReport;
use crate::vehicle::{VehicleId, GOAL_VEHICLE};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleFile {
    pub grid: Vec<Vec<Cell>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<usize>,
    pub exit_row: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_col: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_vehicle: Option<VehicleId>,
}

impl PuzzleFile {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        log::debug!("loading puzzle from {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Validates the grid and builds the initial board.
    pub fn board(&self) -> Result<Board, GridError> {
        let width = self
            .width
            .unwrap_or_else(|| self.grid.first().map_or(0, Vec::len));
        let height = self.height.unwrap_or(self.grid.len());
        let exit = match self.exit_col {
            Some(col) => Exit::new(self.exit_row, col),
            None => Exit::locate(&self.grid, self.exit_row, width),
        };
        Board::new(
            &self.grid,
            width,
            height,
            exit,
            self.goal_vehicle.unwrap_or(GOAL_VEHICLE),
        )
    }
}

/// Writes `report` as pretty-printed JSON.
pub fn save_report(path: impl AsRef<Path>, report: &SearchReport) -> Result<(), Error> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    log::debug!("wrote {} report to {}", report.method, path.display());
    Ok(())
}
