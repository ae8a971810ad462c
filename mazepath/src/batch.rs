//! Generating and solving many mazes at once on the rayon thread pool.

use rayon::iter::{IntoParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::{
    generator::{GenerationError, MazeGenerator, Random},
    grid::MazeGrid,
    solver::{self, Solution, SolveError},
};

/// Generates `count` mazes in parallel.
///
/// Every maze gets its own random stream split off `rng`, so the output only depends on the
/// state of `rng`, not on how the work gets scheduled.
pub fn generate_many(
    generator: &MazeGenerator,
    template: &[bool],
    size: usize,
    count: usize,
    rng: &mut Random,
) -> Result<Vec<MazeGrid>, GenerationError> {
    split_rng(rng, count)
        .into_par_iter()
        .map(|mut rng| generator.generate(template, size, &mut rng))
        .collect()
}

/// Solves every maze corner to corner.
pub fn solve_many(grids: &[MazeGrid]) -> Vec<Result<Solution, SolveError>> {
    grids
        .par_iter()
        .map(|grid| solver::solve(grid, None, None))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchReport {
    pub mazes: usize,
    pub solved: usize,
    pub failed: usize,
    pub total_steps: usize,
    pub longest: usize,
}

impl BatchReport {
    pub fn mean_steps(&self) -> Option<f64> {
        (self.solved > 0).then(|| self.total_steps as f64 / self.solved as f64)
    }
}

pub fn summarize(results: &[Result<Solution, SolveError>]) -> BatchReport {
    let mut report = BatchReport {
        mazes: results.len(),
        ..Default::default()
    };

    for result in results {
        match result {
            Ok(Solution {
                path: Some(path), ..
            }) => {
                report.solved += 1;
                report.total_steps += path.steps();
                report.longest = report.longest.max(path.steps());
            }
            Ok(_) => {}
            Err(err) => {
                log::warn!("Maze could not be searched: {}", err);
                report.failed += 1;
            }
        }
    }

    report
}

fn split_rng(rng: &mut Random, count: usize) -> Vec<Random> {
    (0..count)
        .map(|_| {
            rng.long_jump();
            rng.clone()
        })
        .collect()
}
