//! Wall snapshot export.
//!
//! A snapshot is a JSON array with one `{x, y, walls: {top, right, bottom, left}}` record per cell,
//! in row-major order. It records a finished maze for inspection; sessions never load it back.

use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use color_eyre::eyre::{Result, WrapErr as _};

use crate::grid::Grid;

/// Writes the wall snapshot of `grid` to `path`, replacing any existing file.
///
/// # Errors
///
/// This function may return errors if:
/// - The file cannot be created
/// - Writing or flushing the file fails
pub fn write(grid: &Grid, path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create wall snapshot {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, grid.cells())
        .wrap_err("failed to serialize wall snapshot")?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use serde_json::{json, Value};

    use super::*;
    use crate::grid::Position;

    /// Serializes the walls of every cell the way [`write`] does.
    fn to_json(grid: &Grid) -> serde_json::Result<String> {
        serde_json::to_string(grid.cells())
    }

    /// Builds a 2x1 grid with its only inner wall carved.
    fn carved_pair() -> Grid {
        let mut grid = Grid::build(2, 1);
        grid.remove_wall_between(Position::new(0, 0), Position::new(1, 0))
            .expect("adjacent in-bounds cells can be carved");
        grid
    }

    #[test]
    fn test_to_json_records() {
        let json = to_json(&carved_pair()).expect("grid serializes");
        let value: Value = serde_json::from_str(&json).expect("snapshot is valid JSON");

        assert_eq!(
            value,
            json!([
                {"x": 0, "y": 0, "walls": {"top": true, "right": false, "bottom": true, "left": true}},
                {"x": 1, "y": 0, "walls": {"top": true, "right": true, "bottom": true, "left": false}},
            ])
        );
    }

    #[test]
    fn test_to_json_row_major_order() {
        let grid = Grid::build(3, 2);
        let value: Value =
            serde_json::from_str(&to_json(&grid).expect("grid serializes")).expect("valid JSON");

        let coords: Vec<(u64, u64)> = value
            .as_array()
            .expect("snapshot is an array")
            .iter()
            .map(|record| {
                (
                    record.get("x").and_then(Value::as_u64).expect("x is a number"),
                    record.get("y").and_then(Value::as_u64).expect("y is a number"),
                )
            })
            .collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_write_creates_file() {
        let path = env::temp_dir().join(format!("mazecarver-walls-{}.json", process::id()));
        let grid = carved_pair();

        write(&grid, &path).expect("temp dir is writable");
        let contents = fs::read_to_string(&path).expect("snapshot was written");
        fs::remove_file(&path).expect("snapshot can be removed");

        assert_eq!(contents, to_json(&grid).expect("grid serializes"));
    }

    #[test]
    fn test_write_reports_missing_directory() {
        let path = env::temp_dir()
            .join(format!("mazecarver-missing-{}", process::id()))
            .join("walls.json");

        let result = write(&Grid::build(2, 2), &path);

        assert!(result.is_err(), "writing into a missing directory should fail");
    }
}
