use grid_util::Point;
use smallvec::SmallVec;

use crate::{
    maze_grid::MazeGrid, search_context::TieBreak, solver::MazeSolver, Facing, State, MOVE_COST,
    TURN_COST,
};

/// Best-first search guided by [relaxed_cost]. Expands fewer states than
/// [DijkstraSolver](super::dijkstra::DijkstraSolver) while returning the same costs and tiles.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver {
    pub tie_break: TieBreak,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver::default()
    }
}

/// Exact cost of reaching `goal` from `state` on a maze without walls: every remaining tile must
/// be stepped over, and the searcher must turn until it has faced each axis it still has to
/// travel along. Since walls only remove transitions, this never overestimates and is consistent.
pub fn relaxed_cost(state: &State, goal: &Point) -> u32 {
    let dx = goal.x - state.cell.x;
    let dy = goal.y - state.cell.y;
    let mut required: SmallVec<[Facing; 2]> = SmallVec::new();
    if dx > 0 {
        required.push(Facing::East);
    } else if dx < 0 {
        required.push(Facing::West);
    }
    if dy > 0 {
        required.push(Facing::South);
    } else if dy < 0 {
        required.push(Facing::North);
    }
    let turns = match required.as_slice() {
        [] => 0,
        [only] => state.facing.turns_to(*only),
        // One axis can be travelled first if we already face along it, else two turns are needed.
        _ => {
            if required.contains(&state.facing) {
                1
            } else {
                2
            }
        }
    };
    (dx.unsigned_abs() + dy.unsigned_abs()) * MOVE_COST + turns * TURN_COST
}

impl MazeSolver for AstarSolver {
    fn heuristic(&self, grid: &MazeGrid, state: &State) -> u32 {
        relaxed_cost(state, &grid.end())
    }

    fn tie_break(&self) -> TieBreak {
        self.tie_break
    }
}

#[cfg(test)]
mod tests {
    use grid_util::{BoolGrid, ValueGrid};

    use super::*;
    use crate::solver::dijkstra::DijkstraSolver;

    #[test]
    fn relaxed_cost_examples() {
        let goal = Point::new(4, 0);
        let at = |x, y, facing| State::new(Point::new(x, y), facing);
        assert_eq!(relaxed_cost(&at(4, 0, Facing::South), &goal), 0);
        assert_eq!(relaxed_cost(&at(0, 0, Facing::East), &goal), 4);
        assert_eq!(relaxed_cost(&at(0, 0, Facing::North), &goal), 1004);
        assert_eq!(relaxed_cost(&at(0, 0, Facing::West), &goal), 2004);
        assert_eq!(relaxed_cost(&at(0, 3, Facing::East), &goal), 1007);
        assert_eq!(relaxed_cost(&at(0, 3, Facing::North), &goal), 1007);
        assert_eq!(relaxed_cost(&at(0, 3, Facing::South), &goal), 2007);
        assert_eq!(relaxed_cost(&at(0, 3, Facing::West), &goal), 2007);
    }

    /// On a maze without walls the heuristic is the true cost from every start tile.
    #[test]
    fn relaxed_cost_is_exact_without_walls() {
        let (w, h) = (5, 4);
        let end = Point::new(3, 1);
        let dijkstra = DijkstraSolver::new();
        for x in 0..w {
            for y in 0..h {
                let start = Point::new(x, y);
                let maze =
                    MazeGrid::new(BoolGrid::new(w as usize, h as usize, false), start, end)
                        .unwrap();
                let cost = dijkstra.minimum_cost(&maze).unwrap().unwrap();
                assert_eq!(cost, relaxed_cost(&maze.start_state(), &end));
            }
        }
    }

    /// Asserts that the optimal solution around a wall is found.
    #[test]
    fn solve_simple_problem() {
        // |S  |
        // | # |
        // |  E|
        let mut grid = BoolGrid::new(3, 3, false);
        grid.set(1, 1, true);
        let maze = MazeGrid::new(grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        for tie_break in [TieBreak::Fifo, TieBreak::Lifo] {
            let solver = AstarSolver { tie_break };
            let solution = solver.solve(&maze).unwrap().unwrap();
            assert_eq!(solution.cost, TURN_COST + 4 * MOVE_COST);
            // Only the route along the top and right edge needs a single turn.
            assert_eq!(solution.tiles.len(), 5);
            assert_eq!(solution.goals, vec![State::new(maze.end(), Facing::South)]);
            assert_eq!(solver.path_cost(&maze, &solution.path), Some(solution.cost));
        }
    }

    #[test]
    fn agrees_with_dijkstra_on_unreachable_end() {
        let maze: MazeGrid = "#######\n#S..#E#\n#######".parse().unwrap();
        assert_eq!(AstarSolver::new().minimum_cost(&maze).unwrap(), None);
        assert_eq!(DijkstraSolver::new().minimum_cost(&maze).unwrap(), None);
    }
}
