use std::{io::Write, path::Path as FilePath};

use mazepath::{
    batch,
    generator::{self, MazeGenerator},
    loader, solver, Cell, MazeGrid,
};

use crate::{error::AppError, render, settings::Settings};

/// Options shared by every command that prints a maze.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub plain: bool,
}

/// Solves `grid` and prints it with the path marked, or the bare grid when there is none.
pub fn print_solution(
    grid: &MazeGrid,
    start: Option<Cell>,
    end: Option<Cell>,
    settings: &Settings,
    output: Output,
    out: &mut impl Write,
) -> Result<bool, AppError> {
    let solution = solver::solve(grid, start, end)?;
    log::info!(
        "Maze graph has {} vertices and {} edges",
        solution.vertex_count,
        solution.edge_count
    );

    let shown = match &solution.path {
        Some(path) => grid.annotate_path(path),
        None => grid.clone(),
    };
    render::render(&shown, &settings.get_color_scheme(), output.plain, out)?;

    match &solution.path {
        Some(path) => writeln!(out, "Shortest path: {} steps", path.steps())?,
        None => writeln!(out, "No path found")?,
    }

    Ok(solution.is_solved())
}

pub fn solve_file(
    file: &FilePath,
    delimiter: Option<char>,
    start: Option<Cell>,
    end: Option<Cell>,
    settings: &Settings,
    output: Output,
    out: &mut impl Write,
) -> Result<bool, AppError> {
    let grid = loader::load_file(file, delimiter.unwrap_or(settings.get_delimiter()))?;
    print_solution(&grid, start, end, settings, output, out)
}

#[derive(Debug, Clone, Default)]
pub struct GenerateArgs<'a> {
    pub size: Option<usize>,
    pub seed: Option<u64>,
    pub chance: Option<f64>,
    pub template: Option<&'a FilePath>,
    pub delimiter: Option<char>,
    pub solve: bool,
    pub output_file: Option<&'a FilePath>,
}

/// Reads a template maze file and flattens it into blocked flags.
fn load_template(path: &FilePath, delimiter: char) -> Result<(Vec<bool>, usize), AppError> {
    let grid = loader::load_file(path, delimiter)?;
    let template = grid.iter().map(|(_, s)| s.is_blocked()).collect();
    Ok((template, grid.rows()))
}

pub fn generate(
    args: GenerateArgs,
    settings: &Settings,
    output: Output,
    out: &mut impl Write,
) -> Result<MazeGrid, AppError> {
    let delimiter = args.delimiter.unwrap_or(settings.get_delimiter());
    let maze_gen = MazeGenerator::new(args.chance.unwrap_or(settings.get_obstacle_chance()))?;

    let (template, size) = match args.template {
        Some(path) => {
            let (template, rows) = load_template(path, delimiter)?;
            (template, args.size.unwrap_or(rows))
        }
        None => {
            let size = args.size.unwrap_or(settings.get_default_size());
            (vec![false; size * size], size)
        }
    };

    let (mut rng, seed) = generator::random_from_seed(args.seed);
    log::info!("Generating {0}x{0} maze with seed {1}", size, seed);
    let grid = maze_gen.generate(&template, size, &mut rng)?;

    if let Some(path) = args.output_file {
        std::fs::write(path, grid.to_delimited(delimiter))?;
        log::info!("Maze written to {:?}", path);
    }

    writeln!(out, "Seed: {}", seed)?;
    if args.solve {
        print_solution(&grid, None, None, settings, output, out)?;
    } else {
        render::render(&grid, &settings.get_color_scheme(), output.plain, out)?;
    }

    Ok(grid)
}

pub fn stats(
    size: Option<usize>,
    count: usize,
    seed: Option<u64>,
    chance: Option<f64>,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<batch::BatchReport, AppError> {
    let size = size.unwrap_or(settings.get_default_size());
    let maze_gen = MazeGenerator::new(chance.unwrap_or(settings.get_obstacle_chance()))?;
    let (mut rng, seed) = generator::random_from_seed(seed);

    let grids = batch::generate_many(&maze_gen, &vec![false; size * size], size, count, &mut rng)?;
    let report = batch::summarize(&batch::solve_many(&grids));

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Mazes: {} of size {}x{}", report.mazes, size, size)?;
    writeln!(out, "Solved: {}", report.solved)?;
    if report.failed > 0 {
        writeln!(out, "Failed: {}", report.failed)?;
    }
    if let Some(mean) = report.mean_steps() {
        writeln!(out, "Mean path: {:.2} steps", mean)?;
        writeln!(out, "Longest path: {} steps", report.longest)?;
    }

    Ok(report)
}
