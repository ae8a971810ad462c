use hashbrown::HashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    array::Array2D,
    dims::{Cell, GridSize},
    grid::MazeGrid,
};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("maze has no passable cells")]
    Empty,
}

/// Undirected graph over the walkable cells of a [`MazeGrid`].
///
/// Vertices are numbered in row-major scan order of the grid. Edges connect 4-neighbours and are
/// numbered in the order they are discovered: for every vertex, the edge going down comes before
/// the edge going right. Each vertex keeps its neighbours in ascending edge order, which for any
/// cell works out to up, left, down, right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeGraph {
    size: GridSize,
    vertices: Vec<Cell>,
    index: HashMap<Cell, usize>,
    edges: Vec<(usize, usize)>,
    adjacency: Vec<SmallVec<[usize; 4]>>,
}

impl MazeGraph {
    pub fn build(grid: &MazeGrid) -> Result<Self, GraphError> {
        let size = grid.size();
        let mut vertices = Vec::with_capacity(grid.walkable_count());
        let mut edges = Vec::new();

        for (pos, state) in grid.iter() {
            if !state.is_walkable() {
                continue;
            }

            vertices.push(pos);
            for dir in [Cell::DOWN, Cell::RIGHT] {
                let neighbor = pos + dir;
                if grid.is_walkable(neighbor) {
                    edges.push((pos, neighbor));
                }
            }
        }

        if vertices.is_empty() {
            return Err(GraphError::Empty);
        }

        let index: HashMap<Cell, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, &pos)| (pos, i))
            .collect();

        // both endpoints were checked walkable, so they are vertices
        let edges: Vec<(usize, usize)> = edges
            .into_iter()
            .map(|(a, b)| (index[&a], index[&b]))
            .collect();

        let mut adjacency = vec![SmallVec::new(); vertices.len()];
        for &(a, b) in &edges {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }

        log::debug!(
            "Built graph for {} maze: {} vertices, {} edges",
            size,
            vertices.len(),
            edges.len()
        );

        Ok(Self {
            size,
            vertices,
            index,
            edges,
            adjacency,
        })
    }

    /// Size of the grid this graph was built from.
    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn vertices(&self) -> &[Cell] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.index.get(&cell).copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.index.contains_key(&cell)
    }

    pub fn vertex(&self, idx: usize) -> Option<Cell> {
        self.vertices.get(idx).copied()
    }

    /// Edges as cell pairs, in edge index order.
    pub fn edges(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        self.edges
            .iter()
            .map(|&(a, b)| (self.vertices[a], self.vertices[b]))
    }

    pub fn has_edge(&self, a: Cell, b: Cell) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) => self.adjacency[a].contains(&b),
            _ => false,
        }
    }

    pub(crate) fn neighbor_indices(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    /// Neighbours of `cell`, empty if `cell` isn't a vertex.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.index_of(cell)
            .map(|i| self.adjacency[i].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&n| self.vertices[n])
    }

    /// Vertex x edge incidence table; every edge column has exactly two `true` cells.
    ///
    /// Indexed as `Cell(vertex, edge)`.
    pub fn incidence(&self) -> Array2D<bool> {
        let mut table = Array2D::new(false, self.vertices.len(), self.edges.len());
        for (e, &(a, b)) in self.edges.iter().enumerate() {
            table[Cell(a as i32, e as i32)] = true;
            table[Cell(b as i32, e as i32)] = true;
        }
        table
    }
}
