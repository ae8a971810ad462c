use std::collections::VecDeque;

use hashbrown::HashMap;
use thiserror::Error;

use crate::{
    dims::Cell,
    graph::{GraphError, MazeGraph},
    grid::MazeGrid,
};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    #[error("cell {0} is blocked or outside the maze")]
    VertexNotFound(Cell),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Ordered cells from start to end, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path(Vec<Cell>);

impl Path {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.0
    }

    /// Number of cells, so a path from a cell to itself has length 1.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of moves, one less than [`Path::len`].
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Cell> {
        self.0.first().copied()
    }

    pub fn end(&self) -> Option<Cell> {
        self.0.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.0.iter()
    }

    /// Checks that every consecutive pair of cells is joined by an edge of `graph`.
    pub fn is_connected_in(&self, graph: &MazeGraph) -> bool {
        self.0.iter().all(|&c| graph.contains(c))
            && self.0.windows(2).all(|w| graph.has_edge(w[0], w[1]))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn vertex(graph: &MazeGraph, cell: Cell) -> Result<usize, SolveError> {
    graph.index_of(cell).ok_or(SolveError::VertexNotFound(cell))
}

/// Resolves [`Cell::BOTTOM_RIGHT`] against the graph's grid size.
fn resolve(graph: &MazeGraph, cell: Cell) -> Cell {
    if cell == Cell::BOTTOM_RIGHT {
        graph.size().bottom_right()
    } else {
        cell
    }
}

/// Shortest path between two cells, by number of moves.
///
/// Returns `Ok(None)` when `end` can't be reached from `start`. When more than one shortest path
/// exists, the one found follows the neighbour order of [`MazeGraph`] (up, left, down, right).
pub fn shortest_path(graph: &MazeGraph, start: Cell, end: Cell) -> Result<Option<Path>, SolveError> {
    let (start, end) = (resolve(graph, start), resolve(graph, end));
    let start_idx = vertex(graph, start)?;
    let end_idx = vertex(graph, end)?;

    if start_idx == end_idx {
        return Ok(Some(Path(vec![start])));
    }

    let mut visited = vec![false; graph.vertex_count()];
    let mut previous: Vec<Option<usize>> = vec![None; graph.vertex_count()];
    let mut queue = VecDeque::new();

    visited[start_idx] = true;
    queue.push_back(start_idx);

    while let Some(current) = queue.pop_front() {
        if current == end_idx {
            let path = reconstruct(graph, &previous, end_idx);
            log::debug!("Found path {} -> {} with {} steps", start, end, path.steps());
            return Ok(Some(path));
        }

        for &next in graph.neighbor_indices(current) {
            if !visited[next] {
                visited[next] = true;
                previous[next] = Some(current);
                queue.push_back(next);
            }
        }
    }

    log::debug!("No path {} -> {}", start, end);
    Ok(None)
}

fn reconstruct(graph: &MazeGraph, previous: &[Option<usize>], end: usize) -> Path {
    let mut cells = vec![graph.vertices()[end]];
    let mut current = end;
    while let Some(prev) = previous[current] {
        cells.push(graph.vertices()[prev]);
        current = prev;
    }
    cells.reverse();
    Path(cells)
}

/// Like [`shortest_path`], defaulting to the top-left corner as start and the bottom-right corner
/// as end.
pub fn find_path(
    graph: &MazeGraph,
    start: Option<Cell>,
    end: Option<Cell>,
) -> Result<Option<Path>, SolveError> {
    shortest_path(
        graph,
        start.unwrap_or(Cell::ZERO),
        end.unwrap_or(Cell::BOTTOM_RIGHT),
    )
}

/// Number of moves from `start` to every vertex reachable from it.
pub fn distances_from(graph: &MazeGraph, start: Cell) -> Result<HashMap<Cell, usize>, SolveError> {
    let start = resolve(graph, start);
    let start_idx = vertex(graph, start)?;

    let mut distances = vec![None; graph.vertex_count()];
    let mut queue = VecDeque::new();
    distances[start_idx] = Some(0usize);
    queue.push_back(start_idx);

    while let Some(current) = queue.pop_front() {
        let dist = distances[current].unwrap_or_default();
        for &next in graph.neighbor_indices(current) {
            if distances[next].is_none() {
                distances[next] = Some(dist + 1);
                queue.push_back(next);
            }
        }
    }

    Ok(distances
        .into_iter()
        .enumerate()
        .filter_map(|(i, d)| d.map(|d| (graph.vertices()[i], d)))
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub path: Option<Path>,
    pub vertex_count: usize,
    pub edge_count: usize,
}

impl Solution {
    pub fn is_solved(&self) -> bool {
        self.path.is_some()
    }
}

/// Builds the graph of `grid` and searches it, see [`find_path`] for the defaults.
pub fn solve(grid: &MazeGrid, start: Option<Cell>, end: Option<Cell>) -> Result<Solution, SolveError> {
    let graph = MazeGraph::build(grid)?;
    let path = find_path(&graph, start, end)?;

    Ok(Solution {
        path,
        vertex_count: graph.vertex_count(),
        edge_count: graph.edge_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellState;

    fn grid(rows: &[&str]) -> MazeGrid {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect();
        MazeGrid::from_rows(&rows).unwrap()
    }

    /// Brute force distance: relax every cell until nothing changes.
    fn reference_distance(grid: &MazeGrid, from: Cell, to: Cell) -> Option<usize> {
        let mut dist: HashMap<Cell, usize> = HashMap::new();
        dist.insert(from, 0);
        loop {
            let mut changed = false;
            for (pos, state) in grid.iter() {
                if !state.is_walkable() {
                    continue;
                }
                for off in [Cell(-1, 0), Cell(1, 0), Cell(0, -1), Cell(0, 1)] {
                    let n = pos + off;
                    if !grid.is_walkable(n) {
                        continue;
                    }
                    if let Some(&d) = dist.get(&n) {
                        if dist.get(&pos).map_or(true, |&cur| d + 1 < cur) {
                            dist.insert(pos, d + 1);
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }
        dist.get(&to).copied()
    }

    #[test]
    fn two_by_two_scenario() {
        let graph = MazeGraph::build(&grid(&[".#", ".."])).unwrap();
        let path = shortest_path(&graph, Cell(0, 0), Cell(1, 1)).unwrap().unwrap();
        assert_eq!(path.cells(), &[Cell(0, 0), Cell(1, 0), Cell(1, 1)]);
        assert!(path.is_connected_in(&graph));
    }

    #[test]
    fn single_cell() {
        let graph = MazeGraph::build(&grid(&["."])).unwrap();
        let path = find_path(&graph, None, None).unwrap().unwrap();
        assert_eq!(path.cells(), &[Cell(0, 0)]);
        assert_eq!(path.steps(), 0);
    }

    #[test]
    fn start_equals_end() {
        let graph = MazeGraph::build(&grid(&["...", "...", "..."])).unwrap();
        let path = shortest_path(&graph, Cell(1, 2), Cell(1, 2)).unwrap().unwrap();
        assert_eq!(path.cells(), &[Cell(1, 2)]);
    }

    #[test]
    fn sentinel_means_bottom_right() {
        let graph = MazeGraph::build(&grid(&["..", ".."])).unwrap();
        let path = shortest_path(&graph, Cell::ZERO, Cell::BOTTOM_RIGHT)
            .unwrap()
            .unwrap();
        assert_eq!(path.end(), Some(Cell(1, 1)));
    }

    #[test]
    fn ties_prefer_down_first() {
        let graph = MazeGraph::build(&grid(&["..", ".."])).unwrap();
        let path = find_path(&graph, None, None).unwrap().unwrap();
        assert_eq!(path.cells(), &[Cell(0, 0), Cell(1, 0), Cell(1, 1)]);
    }

    #[test]
    fn unreachable_is_not_an_error() {
        let mut g = MazeGrid::filled(CellState::Blocked, 3, 3).unwrap();
        g.set(Cell(0, 0), CellState::Passable);
        g.set(Cell(2, 2), CellState::Passable);
        let graph = MazeGraph::build(&g).unwrap();

        assert_eq!(find_path(&graph, None, None), Ok(None));
    }

    #[test]
    fn blocked_or_outside_endpoints() {
        let graph = MazeGraph::build(&grid(&[".#", ".."])).unwrap();
        assert_eq!(
            shortest_path(&graph, Cell(0, 0), Cell(0, 1)),
            Err(SolveError::VertexNotFound(Cell(0, 1)))
        );
        assert_eq!(
            shortest_path(&graph, Cell(7, 0), Cell(1, 1)),
            Err(SolveError::VertexNotFound(Cell(7, 0)))
        );
    }

    #[test]
    fn only_start_open() {
        let mut g = MazeGrid::filled(CellState::Blocked, 4, 4).unwrap();
        g.set(Cell(0, 0), CellState::Passable);
        let graph = MazeGraph::build(&g).unwrap();

        assert_eq!(
            find_path(&graph, None, None),
            Err(SolveError::VertexNotFound(Cell(3, 3)))
        );
        assert_eq!(distances_from(&graph, Cell::ZERO).unwrap().len(), 1);
    }

    #[test]
    fn detour_around_wall() {
        let g = grid(&[
            ".....", //
            "####.", //
            ".....", //
            ".####", //
            ".....",
        ]);
        let graph = MazeGraph::build(&g).unwrap();
        let path = find_path(&graph, None, None).unwrap().unwrap();
        assert_eq!(path.steps(), 16);
        assert!(path.is_connected_in(&graph));
    }

    #[test]
    fn lengths_match_reference() {
        let g = grid(&[
            "..#...", //
            ".##.#.", //
            "......", //
            "#.##.#", //
            "...#..",
        ]);
        let graph = MazeGraph::build(&g).unwrap();
        let distances = distances_from(&graph, Cell::ZERO).unwrap();

        for &target in graph.vertices() {
            let expected = reference_distance(&g, Cell::ZERO, target);
            let found = shortest_path(&graph, Cell::ZERO, target).unwrap();

            assert_eq!(found.as_ref().map(Path::steps), expected, "target {}", target);
            assert_eq!(distances.get(&target).copied(), expected, "target {}", target);
            if let Some(path) = found {
                assert!(path.is_connected_in(&graph));
                assert_eq!(path.start(), Some(Cell::ZERO));
                assert_eq!(path.end(), Some(target));
            }
        }
    }

    #[test]
    fn solve_reports_graph_size() {
        let solution = solve(&grid(&[".#", ".."]), None, None).unwrap();
        assert!(solution.is_solved());
        assert_eq!(solution.vertex_count, 3);
        assert_eq!(solution.edge_count, 2);

        let blocked = MazeGrid::filled(CellState::Blocked, 1, 1).unwrap();
        assert_eq!(
            solve(&blocked, None, None),
            Err(SolveError::Graph(GraphError::Empty))
        );
    }
}
