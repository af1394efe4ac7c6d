use crate::maze_grid::{GridError, MazeGrid};
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::debug;
use std::str::FromStr;

/// Records the position of a marker tile, rejecting a second occurrence.
fn place_marker(
    slot: &mut Option<Point>,
    cell: Point,
    duplicate: impl FnOnce(Point, Point) -> GridError,
) -> Result<(), GridError> {
    match slot {
        Some(first) => Err(duplicate(*first, cell)),
        None => {
            *slot = Some(cell);
            Ok(())
        }
    }
}

/// Parses a maze drawn with `#` for walls, `.` for open tiles, `S` for the start and `E` for the
/// end. Blank lines at the end of the input are ignored.
impl FromStr for MazeGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let width = lines.first().ok_or(GridError::Empty)?.chars().count();
        if width == 0 {
            return Err(GridError::Empty);
        }
        let height = lines.len();

        let mut grid = BoolGrid::new(width, height, false);
        let mut start = None;
        let mut end = None;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (column, tile) in line.chars().enumerate() {
                let cell = Point::new(column as i32, row as i32);
                match tile {
                    '#' => {
                        grid.set_point(cell, true);
                    }
                    '.' => {}
                    'S' => place_marker(&mut start, cell, |first, second| {
                        GridError::DuplicateStart { first, second }
                    })?,
                    'E' => place_marker(&mut end, cell, |first, second| GridError::DuplicateEnd {
                        first,
                        second,
                    })?,
                    _ => return Err(GridError::UnexpectedTile { row, column, tile }),
                }
            }
        }
        let start = start.ok_or(GridError::MissingStart)?;
        let end = end.ok_or(GridError::MissingEnd)?;
        debug!("Parsed {}x{} maze from {} to {}", width, height, start, end);
        MazeGrid::new(grid, start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_markers_and_walls() {
        let maze: MazeGrid = "#####\n#S.E#\n#####\n".parse().unwrap();
        assert_eq!(maze.width(), 5);
        assert_eq!(maze.height(), 3);
        assert_eq!(maze.start(), Point::new(1, 1));
        assert_eq!(maze.end(), Point::new(3, 1));
        assert!(maze.is_open(Point::new(2, 1)));
        assert!(!maze.is_open(Point::new(0, 0)));
        assert_eq!(maze.to_string(), "#####\n#S.E#\n#####\n");
    }

    #[test]
    fn accepts_crlf() {
        let maze: MazeGrid = "S.\r\n.E\r\n".parse().unwrap();
        assert_eq!(maze.width(), 2);
        assert_eq!(maze.end(), Point::new(1, 1));
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!("".parse::<MazeGrid>().unwrap_err(), GridError::Empty);
        assert_eq!("\n\n".parse::<MazeGrid>().unwrap_err(), GridError::Empty);
    }

    #[test]
    fn rejects_ragged_rows() {
        assert_eq!(
            "S..\n.E\n".parse::<MazeGrid>().unwrap_err(),
            GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn rejects_unknown_tiles() {
        assert_eq!(
            "S.x\n..E\n".parse::<MazeGrid>().unwrap_err(),
            GridError::UnexpectedTile {
                row: 0,
                column: 2,
                tile: 'x'
            }
        );
    }

    #[test]
    fn rejects_missing_markers() {
        assert_eq!(
            "...\n..E\n".parse::<MazeGrid>().unwrap_err(),
            GridError::MissingStart
        );
        assert_eq!(
            "S..\n...\n".parse::<MazeGrid>().unwrap_err(),
            GridError::MissingEnd
        );
    }

    #[test]
    fn rejects_duplicate_markers() {
        assert_eq!(
            "S.S\n..E\n".parse::<MazeGrid>().unwrap_err(),
            GridError::DuplicateStart {
                first: Point::new(0, 0),
                second: Point::new(2, 0)
            }
        );
        assert_eq!(
            "S.E\nE..\n".parse::<MazeGrid>().unwrap_err(),
            GridError::DuplicateEnd {
                first: Point::new(2, 0),
                second: Point::new(0, 1)
            }
        );
    }
}
