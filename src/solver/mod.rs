use crate::maze_grid::MazeGrid;
use crate::search_context::{Reached, SearchContext, SearchError, TieBreak};
use crate::{State, N_SMALLVEC_SIZE};
use fxhash::FxHashSet;
use grid_util::Point;
use itertools::Itertools;
use log::{info, warn};
use smallvec::SmallVec;

pub mod astar;
pub mod dijkstra;

/// The tiles lying on at least one minimum-cost route.
pub type TileSet = FxHashSet<Point>;

/// Everything a single search over a maze yields.
#[derive(Clone, Debug)]
pub struct Solution {
    /// The minimum cost from the start state to any state on the end tile.
    pub cost: u32,
    /// The states on the end tile reached at [cost](Self::cost), one per arriving facing.
    pub goals: Vec<State>,
    /// One optimal route, from the start state to the first goal.
    pub path: Vec<State>,
    /// Union of the tiles of all optimal routes, start and end included.
    pub tiles: TileSet,
}

/// Runs one search and hands back the context so that routes can be reconstructed from it.
fn run<S: MazeSolver + ?Sized>(
    solver: &S,
    grid: &MazeGrid,
) -> Result<Option<(SearchContext<State, u32>, Reached<u32>)>, SearchError> {
    let start = grid.start_state();
    let end = grid.end();
    // Check if start and end are on the same connected component.
    if grid.unreachable(&start.cell, &end) {
        info!("{} is not reachable from {}", end, start.cell);
        return Ok(None);
    }
    info!("{} is reachable from {}, computing path", end, start.cell);
    let mut ct = SearchContext::with_tie_break(solver.tie_break());
    let reached = ct.search(
        &start,
        |state| solver.successors(grid, state),
        |state| solver.heuristic(grid, state),
        |state| state.cell == end,
    )?;
    match reached {
        Some(reached) => Ok(Some((ct, reached))),
        None => {
            warn!("Reachable goal could not be pathed to, is reachable graph correct?");
            Ok(None)
        }
    }
}

pub trait MazeSolver {
    /// Lower bound on the remaining cost from `state` to the end tile. Must be consistent for
    /// the reported costs to be optimal.
    fn heuristic(&self, grid: &MazeGrid, state: &State) -> u32;

    fn successors(
        &self,
        grid: &MazeGrid,
        state: &State,
    ) -> SmallVec<[(State, u32); N_SMALLVEC_SIZE]> {
        grid.successors(state)
    }

    /// Order in which equally promising states are expanded.
    fn tie_break(&self) -> TieBreak {
        TieBreak::default()
    }

    /// The minimum cost of reaching the end tile in any facing, or [None] if there is no route.
    fn minimum_cost(&self, grid: &MazeGrid) -> Result<Option<u32>, SearchError> {
        Ok(run(self, grid)?.map(|(_, reached)| reached.cost))
    }

    /// One minimum-cost route as a sequence of states, together with its cost.
    fn best_path(&self, grid: &MazeGrid) -> Result<Option<(Vec<State>, u32)>, SearchError> {
        match run(self, grid)? {
            Some((ct, reached)) => {
                let path = ct.reverse_path(reached.goals[0])?;
                Ok(Some((path, reached.cost)))
            }
            None => Ok(None),
        }
    }

    /// All tiles lying on at least one minimum-cost route, or [None] if there is no route.
    fn tiles_on_best_paths(&self, grid: &MazeGrid) -> Result<Option<TileSet>, SearchError> {
        match run(self, grid)? {
            Some((ct, reached)) => {
                let states = ct.optimal_nodes(&reached.goals)?;
                Ok(Some(states.into_iter().map(|s| s.cell).collect()))
            }
            None => Ok(None),
        }
    }

    /// Cost, goal states, one route and the optimal tiles, all from a single search.
    fn solve(&self, grid: &MazeGrid) -> Result<Option<Solution>, SearchError> {
        let Some((ct, reached)) = run(self, grid)? else {
            return Ok(None);
        };
        let goals = reached
            .goals
            .iter()
            .map(|&ix| ct.node(ix).copied().ok_or(SearchError::UnknownNode(ix)))
            .collect::<Result<Vec<State>, SearchError>>()?;
        let path = ct.reverse_path(reached.goals[0])?;
        let tiles = ct
            .optimal_nodes(&reached.goals)?
            .into_iter()
            .map(|s| s.cell)
            .collect();
        Ok(Some(Solution {
            cost: reached.cost,
            goals,
            path,
            tiles,
        }))
    }

    /// Adds up the cost of following `path` from the start state. Returns [None] if the path does
    /// not begin at the start state, or if any step is not a single turn or a step forward onto
    /// an open tile.
    fn path_cost(&self, grid: &MazeGrid, path: &[State]) -> Option<u32> {
        if path.first() != Some(&grid.start_state()) {
            return None;
        }
        path.iter()
            .tuple_windows()
            .map(|(from, to)| {
                if grid.is_open(to.cell) {
                    from.transition_cost(to)
                } else {
                    None
                }
            })
            .sum()
    }
}
