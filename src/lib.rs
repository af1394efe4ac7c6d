//! # oriented_pathfinding
//!
//! Minimum-cost pathfinding on a maze where the searcher has a facing. Moving one tile forward
//! costs [MOVE_COST] and rotating 90 degrees in place costs [TURN_COST], so the cost of a route
//! depends on the compound state of position *and* facing rather than on position alone.
//!
//! The search is a [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) sweep over
//! `(tile, facing)` states, with an [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! variant that uses the exact cost on a wall-free grid as heuristic. Besides the minimum cost it
//! can recover one optimal route and the set of all tiles that lie on at least one optimal
//! route. [Connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! are pre-computed so that an unreachable end is reported without exploring the maze.
//!
//! ```
//! use oriented_pathfinding::{maze_grid::MazeGrid, solver::{dijkstra::DijkstraSolver, MazeSolver}};
//!
//! let maze: MazeGrid = "#######\n#S...E#\n#######".parse().unwrap();
//! assert_eq!(DijkstraSolver::new().minimum_cost(&maze).unwrap(), Some(4));
//! ```
pub mod facing;
pub mod maze_grid;
pub mod parse;
pub mod search_context;
pub mod solver;

use core::fmt;
use grid_util::point::Point;

pub use facing::Facing;
pub use maze_grid::{GridError, MazeGrid};
pub use search_context::{SearchError, TieBreak};

/// Cost of moving one tile forward.
pub const MOVE_COST: u32 = 1;
/// Cost of a single quarter turn in place.
pub const TURN_COST: u32 = 1000;
/// Facing of the searcher on the start tile.
pub const START_FACING: Facing = Facing::East;

/// A state has at most three successors: two turns and one step forward.
pub const N_SMALLVEC_SIZE: usize = 3;

/// A tile together with the facing of the searcher standing on it. This is the unit explored by
/// the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State {
    pub cell: Point,
    pub facing: Facing,
}

impl State {
    pub fn new(cell: Point, facing: Facing) -> State {
        State { cell, facing }
    }

    pub fn rotate_left(&self) -> State {
        State::new(self.cell, self.facing.rotate_left())
    }

    pub fn rotate_right(&self) -> State {
        State::new(self.cell, self.facing.rotate_right())
    }

    /// The state one tile ahead, regardless of whether that tile is open.
    pub fn forward(&self) -> State {
        State::new(self.facing.step(self.cell), self.facing)
    }

    /// Cost of going directly from this state to `next`, or [None] if `next` is not a single
    /// turn or a single step forward. Whether the tile stepped onto is open is not checked here.
    pub fn transition_cost(&self, next: &State) -> Option<u32> {
        if next.cell == self.cell
            && (next.facing == self.facing.rotate_left()
                || next.facing == self.facing.rotate_right())
        {
            Some(TURN_COST)
        } else if *next == self.forward() {
            Some(MOVE_COST)
        } else {
            None
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.cell, self.facing)
    }
}
