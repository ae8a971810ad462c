use std::env;

use mazepath::{generator::random_from_seed, solver, CellState, MazeGenerator};

fn main() {
    let args = env::args()
        .skip(1)
        .take(2)
        .map(|s| s.parse())
        .collect::<Result<Vec<u64>, _>>()
        .expect("Expected integers");

    assert!(
        args.len() == 1 || args.len() == 2,
        "Expected size and optional seed"
    );

    let size = args[0] as usize;
    let (mut rng, seed) = random_from_seed(args.get(1).copied());
    if args.len() == 1 {
        println!("Seed: {}", seed);
    }

    let grid = MazeGenerator::default()
        .generate_open(size, &mut rng)
        .expect("Invalid size");
    let solution = solver::solve(&grid, None, None).expect("Generated maze has no corners");
    let grid = match &solution.path {
        Some(path) => grid.annotate_path(path),
        None => grid,
    };

    for row in grid.cells().rows() {
        for cell in row {
            let (r, g, b) = match cell {
                CellState::Passable => (240, 240, 240),
                CellState::Blocked => (20, 20, 20),
                CellState::OnPath => (200, 30, 30),
            };
            print!("\x1b[48;2;{r};{g};{b}m  \x1b[0m");
        }
        println!();
    }
}
