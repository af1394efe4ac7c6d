use crate::{State, MOVE_COST, N_SMALLVEC_SIZE, START_FACING, TURN_COST};
use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use itertools::Itertools;
use petgraph::unionfind::UnionFind;
use smallvec::{smallvec, SmallVec};
use thiserror::Error;

/// Structural problems detected while building a [MazeGrid]. These are never repaired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("maze has no rows")]
    Empty,
    #[error("row {row} has length {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unexpected tile {tile:?} at row {row}, column {column}")]
    UnexpectedTile { row: usize, column: usize, tile: char },
    #[error("maze has no start tile")]
    MissingStart,
    #[error("maze has no end tile")]
    MissingEnd,
    #[error("maze has a second start tile at {second} (first at {first})")]
    DuplicateStart { first: Point, second: Point },
    #[error("maze has a second end tile at {second} (first at {first})")]
    DuplicateEnd { first: Point, second: Point },
    #[error("{0} is a wall")]
    Blocked(Point),
    #[error("{0} lies outside the maze")]
    OutOfBounds(Point),
}

/// [MazeGrid] holds the wall layout of a maze in a [BoolGrid], where a wall is [true] and an open
/// tile is [false], together with the start and end tiles. Connected components of open tiles
/// are computed once on construction using a [UnionFind] structure, so that an unreachable end
/// can be reported without searching.
///
/// The grid is read-only after construction; [with_wall](Self::with_wall) builds a new grid.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    grid: BoolGrid,
    start: Point,
    end: Point,
    components: UnionFind<usize>,
}

impl MazeGrid {
    /// Builds a maze from a wall layout. Fails if the start or end is out of bounds or a wall.
    pub fn new(grid: BoolGrid, start: Point, end: Point) -> Result<MazeGrid, GridError> {
        let mut maze = MazeGrid {
            components: UnionFind::new(grid.width() * grid.height()),
            grid,
            start,
            end,
        };
        maze.check_open(start)?;
        maze.check_open(end)?;
        maze.generate_components();
        Ok(maze)
    }

    fn check_open(&self, cell: Point) -> Result<(), GridError> {
        if !self.in_bounds(cell) {
            Err(GridError::OutOfBounds(cell))
        } else if self.grid.get_point(cell) {
            Err(GridError::Blocked(cell))
        } else {
            Ok(())
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// The state the search begins in: the start tile, facing [START_FACING].
    pub fn start_state(&self) -> State {
        State::new(self.start, START_FACING)
    }

    pub fn in_bounds(&self, cell: Point) -> bool {
        self.grid.point_in_bounds(cell)
    }

    /// Whether `cell` can be stood on. Anything outside the maze counts as a wall.
    pub fn is_open(&self, cell: Point) -> bool {
        self.in_bounds(cell) && !self.grid.get_point(cell)
    }

    /// The states reachable from `state` in one transition with their costs: a left turn, a right
    /// turn and, if the tile ahead is open, a step forward.
    pub fn successors(&self, state: &State) -> SmallVec<[(State, u32); N_SMALLVEC_SIZE]> {
        let mut succ: SmallVec<[(State, u32); N_SMALLVEC_SIZE]> = smallvec![
            (state.rotate_left(), TURN_COST),
            (state.rotate_right(), TURN_COST)
        ];
        let ahead = state.forward();
        if self.is_open(ahead.cell) {
            succ.push((ahead, MOVE_COST));
        }
        succ
    }

    /// Returns a copy of this maze with `cell` turned into a wall. The start and end cannot be
    /// walled over.
    pub fn with_wall(mut self, cell: Point) -> Result<MazeGrid, GridError> {
        if !self.in_bounds(cell) {
            return Err(GridError::OutOfBounds(cell));
        }
        if cell == self.start || cell == self.end {
            return Err(GridError::Blocked(cell));
        }
        if !self.grid.get_point(cell) {
            self.grid.set_point(cell, true);
            // Adding a wall can split a component, so the union-find is rebuilt from scratch.
            self.generate_components();
        }
        Ok(self)
    }

    /// All open tiles in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height() as i32)
            .cartesian_product(0..self.width() as i32)
            .map(|(y, x)| Point::new(x, y))
            .filter(move |p| self.is_open(*p))
    }

    fn open_neighbours(&self, cell: Point) -> impl Iterator<Item = Point> + '_ {
        [Point::new(cell.x + 1, cell.y), Point::new(cell.x, cell.y + 1)]
            .into_iter()
            .filter(move |p| self.is_open(*p))
    }

    /// Links up open 4-neighbours into the same components. Only right and down neighbours are
    /// visited since union is symmetric.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.width() * self.height());
        let cells = self.open_cells().collect_vec();
        for cell in cells {
            let ix = self.grid.get_ix_point(&cell);
            let neighbours = self
                .open_neighbours(cell)
                .map(|n| self.grid.get_ix_point(&n))
                .collect_vec();
            for n_ix in neighbours {
                self.components.union(ix, n_ix);
            }
        }
    }

    /// Checks if two open tiles are on the same connected component. Since turning in place is
    /// always allowed, this is exactly the condition for a path to exist between them.
    pub fn reachable(&self, from: &Point, to: &Point) -> bool {
        self.is_open(*from)
            && self.is_open(*to)
            && self.components.equiv(
                self.grid.get_ix_point(from),
                self.grid.get_ix_point(to),
            )
    }

    pub fn unreachable(&self, from: &Point, to: &Point) -> bool {
        !self.reachable(from, to)
    }

    fn tile_char(&self, cell: Point) -> char {
        if cell == self.start {
            'S'
        } else if cell == self.end {
            'E'
        } else if self.grid.get_point(cell) {
            '#'
        } else {
            '.'
        }
    }

    /// Renders the maze with the given states drawn on top using their facing symbols. The start
    /// and end tiles keep their own markers.
    pub fn render_path(&self, path: &[State]) -> String {
        let mut rows = (0..self.height() as i32)
            .map(|y| {
                (0..self.width() as i32)
                    .map(|x| self.tile_char(Point::new(x, y)))
                    .collect_vec()
            })
            .collect_vec();
        for state in path {
            let cell = state.cell;
            if self.in_bounds(cell) && cell != self.start && cell != self.end {
                rows[cell.y as usize][cell.x as usize] = state.facing.symbol();
            }
        }
        rows.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .join("\n")
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| self.tile_char(Point::new(x, y)))
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
