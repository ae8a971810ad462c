//! Grid mazes as graphs.
//!
//! A [`MazeGrid`] is turned into a [`MazeGraph`] over its walkable cells, which is then searched
//! breadth-first for the shortest path between two cells. [`MazeGenerator`] produces random
//! mazes that are always solvable corner to corner.

pub mod array;
pub mod batch;
pub mod dims;
pub mod generator;
pub mod graph;
pub mod grid;
pub mod loader;
pub mod solver;

pub use dims::{Cell, GridSize};
pub use generator::{GenerationError, MazeGenerator, Random};
pub use graph::{GraphError, MazeGraph};
pub use grid::{CellState, GridError, MazeGrid};
pub use loader::LoadError;
pub use solver::{Path, Solution, SolveError};
