use crate::{maze_grid::MazeGrid, search_context::TieBreak, solver::MazeSolver, State};

/// Uniform-cost search over `(tile, facing)` states.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver {
    pub tie_break: TieBreak,
}

impl DijkstraSolver {
    pub fn new() -> DijkstraSolver {
        DijkstraSolver::default()
    }
}

impl MazeSolver for DijkstraSolver {
    /// No guidance: states are expanded purely in order of accumulated cost.
    fn heuristic(&self, _: &MazeGrid, _: &State) -> u32 {
        0
    }

    fn tie_break(&self) -> TieBreak {
        self.tie_break
    }
}
