use log::error;
use oriented_pathfinding::maze_grid::MazeGrid;
use oriented_pathfinding::solver::{astar::AstarSolver, MazeSolver};
use std::{env, fs, process};

// Solves a maze file such as
// #######
// #S...E#
// #######
// where
// - # marks a wall
// - S marks the start, entered facing east
// - E marks the end
//
// Run with `cargo run --example solve -- <maze file>`; set RUST_LOG=info to see search progress.

fn main() {
    env_logger::init();
    let Some(file_name) = env::args().nth(1) else {
        eprintln!("Usage: solve <maze file>");
        process::exit(2);
    };
    let text = match fs::read_to_string(&file_name) {
        Ok(text) => text,
        Err(e) => {
            error!("Could not read {}: {}", file_name, e);
            process::exit(1);
        }
    };
    let maze: MazeGrid = match text.parse() {
        Ok(maze) => maze,
        Err(e) => {
            error!("Malformed maze {}: {}", file_name, e);
            process::exit(1);
        }
    };
    println!("Maze is {} x {}:", maze.width(), maze.height());
    let solver = AstarSolver::new();
    match solver.solve(&maze) {
        Ok(Some(solution)) => {
            println!("{}", maze.render_path(&solution.path));
            println!("Lowest score: {}", solution.cost);
            println!("Tiles on a best path: {}", solution.tiles.len());
        }
        Ok(None) => println!("No path from {} to {}", maze.start(), maze.end()),
        Err(e) => {
            error!("Search failed: {}", e);
            process::exit(1);
        }
    }
}
