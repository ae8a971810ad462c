use rand::{seq::SliceRandom as _, thread_rng, Rng as _, SeedableRng as _};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    array::Array2D,
    dims::Cell,
    grid::{CellState, MazeGrid},
};

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

pub const DEFAULT_OBSTACLE_CHANCE: f64 = 0.3;

/// Seeds a [`Random`], picking a fresh seed when none is given. Returns the seed as well, so it
/// can be reported and the maze reproduced later.
pub fn random_from_seed(seed: Option<u64>) -> (Random, u64) {
    let seed = seed.unwrap_or_else(|| thread_rng().gen());
    (Random::seed_from_u64(seed), seed)
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GenerationError {
    #[error("template has {found} cells, but a {size}x{size} maze needs {expected}")]
    Shape {
        size: usize,
        expected: usize,
        found: usize,
    },
    #[error("maze size must be at least 1")]
    InvalidSize,
    #[error("obstacle chance must be between 0 and 1, got {0}")]
    InvalidChance(f64),
}

/// Generates square mazes with random obstacles and at least one path between the top-left and
/// bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeGenerator {
    obstacle_chance: f64,
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self {
            obstacle_chance: DEFAULT_OBSTACLE_CHANCE,
        }
    }
}

impl MazeGenerator {
    pub fn new(obstacle_chance: f64) -> Result<Self, GenerationError> {
        if !(0.0..=1.0).contains(&obstacle_chance) {
            return Err(GenerationError::InvalidChance(obstacle_chance));
        }

        Ok(Self { obstacle_chance })
    }

    pub fn obstacle_chance(&self) -> f64 {
        self.obstacle_chance
    }

    /// Generates a `size` x `size` maze from `template`, given in row-major order with `true`
    /// meaning blocked.
    ///
    /// Template obstacles are kept, and on top of that every cell gets blocked with the obstacle
    /// chance. Afterwards a monotone walk of random down/right moves is carved from the top-left
    /// to the bottom-right corner, so the result is always solvable.
    pub fn generate(
        &self,
        template: &[bool],
        size: usize,
        rng: &mut Random,
    ) -> Result<MazeGrid, GenerationError> {
        if size == 0 {
            return Err(GenerationError::InvalidSize);
        }

        let expected = size * size;
        if template.len() != expected {
            return Err(GenerationError::Shape {
                size,
                expected,
                found: template.len(),
            });
        }

        // a draw per cell, whatever the template says
        let overlay = template
            .iter()
            .map(|&blocked| {
                let random_block = rng.gen_bool(self.obstacle_chance);
                CellState::from(blocked || random_block)
            })
            .collect();
        let cells = Array2D::from_buf(overlay, size, size).ok_or(GenerationError::InvalidSize)?;
        let mut grid = MazeGrid { cells };

        let carved = Self::carve(&mut grid, rng);
        log::debug!(
            "Generated {} maze, carved {} steps, {} blocked cells",
            grid.size(),
            carved,
            grid.count(CellState::Blocked)
        );

        Ok(grid)
    }

    /// Generates a maze without template obstacles.
    pub fn generate_open(&self, size: usize, rng: &mut Random) -> Result<MazeGrid, GenerationError> {
        self.generate(&vec![false; size * size], size, rng)
    }

    /// Carves the guaranteed path, returns the number of moves made.
    fn carve(grid: &mut MazeGrid, rng: &mut Random) -> usize {
        let (start, end) = (grid.start(), grid.end());
        let mut current = start;
        let mut steps = 0;
        grid.set(current, CellState::Passable);

        while current != end {
            let moves = [Cell::DOWN, Cell::RIGHT]
                .into_iter()
                .map(|dir| current + dir)
                .filter(|&pos| grid.is_in_bounds(pos))
                .collect::<SmallVec<[_; 2]>>();

            // there is always a move left until we reach the end
            let Some(&next) = moves.choose(rng) else {
                break;
            };

            grid.set(next, CellState::Passable);
            current = next;
            steps += 1;
        }

        grid.set(start, CellState::Passable);
        grid.set(end, CellState::Passable);

        steps
    }
}

#[cfg(test)]
mod tests {
    use rand::{seq::SliceRandom, Rng};

    use super::*;
    use crate::{graph::MazeGraph, solver};

    /// Blocked flags the generator should produce, rebuilt draw by draw from the same seed.
    fn replay(template: &[bool], size: usize, chance: f64, seed: u64) -> Vec<bool> {
        let (mut rng, _) = random_from_seed(Some(seed));
        let mut blocked: Vec<bool> = template
            .iter()
            .map(|&b| {
                let draw = rng.gen_bool(chance);
                b || draw
            })
            .collect();

        let (mut row, mut col) = (0, 0);
        blocked[0] = false;
        while (row, col) != (size - 1, size - 1) {
            let mut moves = Vec::new();
            if row + 1 < size {
                moves.push((row + 1, col));
            }
            if col + 1 < size {
                moves.push((row, col + 1));
            }
            (row, col) = *moves.choose(&mut rng).unwrap();
            blocked[row * size + col] = false;
        }

        blocked
    }

    fn blocked_flags(grid: &MazeGrid) -> Vec<bool> {
        grid.iter().map(|(_, state)| state.is_blocked()).collect()
    }

    #[test]
    fn shape_mismatch() {
        let gen = MazeGenerator::default();
        let (mut rng, _) = random_from_seed(Some(1));
        assert_eq!(
            gen.generate(&[false; 8], 3, &mut rng),
            Err(GenerationError::Shape {
                size: 3,
                expected: 9,
                found: 8
            })
        );
        assert_eq!(
            gen.generate(&[], 0, &mut rng),
            Err(GenerationError::InvalidSize)
        );
    }

    #[test]
    fn invalid_chance() {
        assert_eq!(
            MazeGenerator::new(1.5),
            Err(GenerationError::InvalidChance(1.5))
        );
        assert!(MazeGenerator::new(-0.1).is_err());
        assert!(MazeGenerator::new(0.0).is_ok());
        assert!(MazeGenerator::new(1.0).is_ok());
    }

    #[test]
    fn same_seed_same_maze() {
        let gen = MazeGenerator::default();
        let (mut a, _) = random_from_seed(Some(42));
        let (mut b, _) = random_from_seed(Some(42));
        assert_eq!(
            gen.generate_open(12, &mut a).unwrap(),
            gen.generate_open(12, &mut b).unwrap()
        );
    }

    #[test]
    fn generated_mazes_are_solvable() {
        let gen = MazeGenerator::default();
        let (mut rng, _) = random_from_seed(Some(7));

        for size in 1..=15 {
            for _ in 0..10 {
                let grid = gen.generate_open(size, &mut rng).unwrap();
                let graph = MazeGraph::build(&grid).unwrap();
                let path = solver::find_path(&graph, None, None).unwrap().unwrap();

                assert_eq!(path.start(), Some(Cell(0, 0)));
                assert_eq!(path.end(), Some(grid.end()));
                assert_eq!(path.steps(), 2 * (size - 1));
            }
        }
    }

    #[test]
    fn fully_blocked_template_leaves_only_the_carved_walk() {
        let gen = MazeGenerator::new(1.0).unwrap();
        let (mut rng, _) = random_from_seed(Some(3));
        let size = 6;
        let grid = gen.generate(&vec![true; size * size], size, &mut rng).unwrap();

        assert_eq!(grid.walkable_count(), 2 * size - 1);
        assert!(grid.is_walkable(Cell(0, 0)));
        assert!(grid.is_walkable(grid.end()));
    }

    #[test]
    fn template_obstacles_are_kept() {
        let gen = MazeGenerator::new(0.0).unwrap();
        let (mut rng, _) = random_from_seed(Some(11));
        let template = [false, true, true, false];
        let grid = gen.generate(&template, 2, &mut rng).unwrap();

        // the walk opens exactly one of (0, 1) and (1, 0)
        assert_eq!(grid.walkable_count(), 3);
        assert_ne!(grid.get(Cell(0, 1)), grid.get(Cell(1, 0)));
    }

    #[test]
    fn zero_chance_open_template_is_all_passable() {
        let gen = MazeGenerator::new(0.0).unwrap();
        let (mut rng, _) = random_from_seed(Some(5));
        let grid = gen.generate_open(5, &mut rng).unwrap();
        assert_eq!(grid.count(CellState::Blocked), 0);
    }

    #[test]
    fn fixed_seed_gives_exact_grid() {
        let gen = MazeGenerator::default();
        let size = 9;
        let (mut rng, _) = random_from_seed(Some(2024));
        let grid = gen.generate_open(size, &mut rng).unwrap();

        let expected = replay(&vec![false; size * size], size, DEFAULT_OBSTACLE_CHANCE, 2024);
        assert_eq!(blocked_flags(&grid), expected);
        // the overlay actually blocked something
        assert!(grid.count(CellState::Blocked) > 0);
    }

    #[test]
    fn template_cells_still_draw() {
        let gen = MazeGenerator::new(0.5).unwrap();
        let size = 8;
        let mut template = vec![false; size * size];
        for idx in (0..template.len()).step_by(3) {
            template[idx] = true;
        }

        let (mut rng, _) = random_from_seed(Some(77));
        let grid = gen.generate(&template, size, &mut rng).unwrap();
        assert_eq!(blocked_flags(&grid), replay(&template, size, 0.5, 77));
    }

    #[test]
    fn certain_obstacles_leave_only_the_walk() {
        let gen = MazeGenerator::new(1.0).unwrap();
        let (mut rng, _) = random_from_seed(Some(9));

        for size in 1..=10 {
            let grid = gen.generate_open(size, &mut rng).unwrap();
            assert_eq!(grid.walkable_count(), 2 * size - 1);
        }
    }

    #[test]
    fn template_does_not_change_the_walk() {
        let size = 7;
        for chance in [1.0, 0.5] {
            let gen = MazeGenerator::new(chance).unwrap();
            let (mut a, _) = random_from_seed(Some(31));
            let (mut b, _) = random_from_seed(Some(31));

            let walled = gen.generate(&vec![true; size * size], size, &mut a).unwrap();
            let open = gen.generate_open(size, &mut b).unwrap();

            // with everything walled off, the walk is all that is left
            assert_eq!(walled.walkable_count(), 2 * size - 1);
            for (pos, state) in walled.iter() {
                if state.is_walkable() {
                    assert!(open.is_walkable(pos), "{} is on the walk", pos);
                }
            }
            if chance == 1.0 {
                assert_eq!(walled, open);
            }
        }
    }
}
