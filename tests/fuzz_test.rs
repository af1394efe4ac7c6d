/// Fuzzes the search by checking properties that must hold for many random mazes: a path is found
/// exactly when the end is on the same connected component as the start, both solvers and both
/// tie-breaking orders agree, reconstructed routes cost what is reported, and walling off a tile
/// never makes the maze cheaper.
use grid_util::{BoolGrid, Point, ValueGrid};
use oriented_pathfinding::{
    maze_grid::MazeGrid,
    solver::{astar::AstarSolver, dijkstra::DijkstraSolver, MazeSolver},
    TieBreak, MOVE_COST, TURN_COST,
};
use rand::prelude::*;

fn random_maze(w: usize, h: usize, rng: &mut StdRng) -> MazeGrid {
    let mut grid = BoolGrid::new(w, h, false);
    for x in 0..w as i32 {
        for y in 0..h as i32 {
            grid.set(x, y, rng.gen_bool(0.3))
        }
    }
    let start = Point::new(0, h as i32 - 1);
    let end = Point::new(w as i32 - 1, 0);
    grid.set_point(start, false);
    grid.set_point(end, false);
    MazeGrid::new(grid, start, end).unwrap()
}

/// Cost and sorted optimal tiles, comparable across solvers.
fn summarize<S: MazeSolver>(solver: &S, maze: &MazeGrid) -> Option<(u32, Vec<(i32, i32)>)> {
    solver.solve(maze).unwrap().map(|s| {
        let mut tiles = s.tiles.into_iter().map(|p| (p.x, p.y)).collect::<Vec<_>>();
        tiles.sort();
        (s.cost, tiles)
    })
}

fn visualize_maze(maze: &MazeGrid) {
    println!("{}", maze);
}

#[test]
fn fuzz_reachability() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let solver = DijkstraSolver::new();
    for _ in 0..N_GRIDS {
        let maze = random_maze(N, N, &mut rng);
        let reachable = maze.reachable(&maze.start(), &maze.end());
        let cost = solver.minimum_cost(&maze).unwrap();
        // Show the maze if a path is not found
        if cost.is_some() != reachable {
            visualize_maze(&maze);
        }
        assert_eq!(cost.is_some(), reachable);
    }
}

#[test]
fn fuzz_solvers_agree() {
    const N: usize = 8;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    let solvers = [
        DijkstraSolver {
            tie_break: TieBreak::Fifo,
        },
        DijkstraSolver {
            tie_break: TieBreak::Lifo,
        },
    ];
    let astar_solvers = [
        AstarSolver {
            tie_break: TieBreak::Fifo,
        },
        AstarSolver {
            tie_break: TieBreak::Lifo,
        },
    ];
    for _ in 0..N_GRIDS {
        let maze = random_maze(N, N, &mut rng);
        let reference = summarize(&solvers[0], &maze);
        let summaries = solvers
            .iter()
            .map(|s| summarize(s, &maze))
            .chain(astar_solvers.iter().map(|s| summarize(s, &maze)));
        for summary in summaries {
            if summary != reference {
                visualize_maze(&maze);
            }
            assert_eq!(summary, reference);
        }
    }
}

#[test]
fn fuzz_path_round_trip() {
    const N: usize = 8;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(2);
    let solver = AstarSolver::new();
    for _ in 0..N_GRIDS {
        let maze = random_maze(N, N, &mut rng);
        if let Some((path, cost)) = solver.best_path(&maze).unwrap() {
            assert_eq!(solver.path_cost(&maze, &path), Some(cost));
            assert_eq!(path.last().map(|s| s.cell), Some(maze.end()));
            // Every cost is made up of whole moves and turns.
            let turns = path.windows(2).filter(|w| w[0].cell == w[1].cell).count() as u32;
            let moves = path.len() as u32 - 1 - turns;
            assert_eq!(cost, moves * MOVE_COST + turns * TURN_COST);
        }
    }
}

#[test]
fn fuzz_adding_walls_is_monotone() {
    const N: usize = 7;
    const N_GRIDS: usize = 300;
    let mut rng = StdRng::seed_from_u64(3);
    let solver = DijkstraSolver::new();
    for _ in 0..N_GRIDS {
        let maze = random_maze(N, N, &mut rng);
        let Some(cost) = solver.minimum_cost(&maze).unwrap() else {
            continue;
        };
        let candidates = maze
            .open_cells()
            .filter(|p| *p != maze.start() && *p != maze.end())
            .collect::<Vec<_>>();
        if let Some(cell) = candidates.choose(&mut rng) {
            let walled = maze.clone().with_wall(*cell).unwrap();
            match solver.minimum_cost(&walled).unwrap() {
                Some(walled_cost) => assert!(walled_cost >= cost),
                None => assert!(walled.unreachable(&walled.start(), &walled.end())),
            }
        }
    }
}

#[test]
fn straight_lines_cost_their_length() {
    for k in 1..20usize {
        let mut grid = BoolGrid::new(k + 1, 1, false);
        let maze = MazeGrid::new(grid, Point::new(0, 0), Point::new(k as i32, 0)).unwrap();
        assert_eq!(
            DijkstraSolver::new().minimum_cost(&maze).unwrap(),
            Some(k as u32 * MOVE_COST)
        );
    }
}
