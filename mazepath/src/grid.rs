use thiserror::Error;

use crate::{
    array::Array2D,
    dims::{Cell, GridSize},
    solver::Path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Passable,
    Blocked,
    OnPath,
}

impl CellState {
    /// Passable and on-path cells can both be walked through.
    pub fn is_walkable(self) -> bool {
        !matches!(self, CellState::Blocked)
    }

    pub fn is_blocked(self) -> bool {
        matches!(self, CellState::Blocked)
    }

    /// Numeric code used by the delimited text format.
    pub fn code(self) -> u8 {
        match self {
            CellState::Passable => 0,
            CellState::Blocked => 1,
            CellState::OnPath => 2,
        }
    }
}

impl From<bool> for CellState {
    /// `true` means blocked.
    fn from(blocked: bool) -> Self {
        if blocked {
            CellState::Blocked
        } else {
            CellState::Passable
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("maze must have at least one row and one column")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Rectangular occupancy matrix of a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeGrid {
    pub(crate) cells: Array2D<CellState>,
}

impl MazeGrid {
    /// All-passable grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::filled(CellState::Passable, rows, cols)
    }

    pub fn filled(state: CellState, rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }

        Ok(Self {
            cells: Array2D::new(state, rows, cols),
        })
    }

    pub fn from_array(cells: Array2D<CellState>) -> Result<Self, GridError> {
        if cells.size().area() == 0 {
            return Err(GridError::Empty);
        }

        Ok(Self { cells })
    }

    /// Builds a grid from rows of blocked flags (`true` = blocked).
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, GridError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let mut buf = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            buf.extend(row.iter().map(|&blocked| CellState::from(blocked)));
        }

        Ok(Self {
            cells: Array2D::from_buf(buf, rows.len(), cols).ok_or(GridError::Empty)?,
        })
    }

    pub fn size(&self) -> GridSize {
        self.cells.size()
    }

    pub fn rows(&self) -> usize {
        self.size().rows()
    }

    pub fn cols(&self) -> usize {
        self.size().cols()
    }

    pub fn start(&self) -> Cell {
        Cell::ZERO
    }

    pub fn end(&self) -> Cell {
        self.size().bottom_right()
    }

    pub fn is_in_bounds(&self, pos: Cell) -> bool {
        self.size().contains(pos)
    }

    pub fn get(&self, pos: Cell) -> Option<CellState> {
        self.cells.get(pos).copied()
    }

    /// Out of bounds cells are never walkable.
    pub fn is_walkable(&self, pos: Cell) -> bool {
        self.get(pos).is_some_and(CellState::is_walkable)
    }

    pub fn set(&mut self, pos: Cell, state: CellState) -> bool {
        match self.cells.get_mut(pos) {
            Some(cell) => {
                *cell = state;
                true
            }
            None => false,
        }
    }

    pub fn cells(&self) -> &Array2D<CellState> {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellState)> + '_ {
        self.cells.iter_pos().zip(self.cells.iter().copied())
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|s| s.is_walkable()).count()
    }

    /// Tags every walkable cell of `path` as [`CellState::OnPath`]. Blocked cells are left as
    /// they are.
    pub fn mark_path(&mut self, path: &Path) {
        for &pos in path.cells() {
            if let Some(cell) = self.cells.get_mut(pos) {
                if cell.is_walkable() {
                    *cell = CellState::OnPath;
                }
            }
        }
    }

    /// Copy of this grid with `path` marked on it.
    pub fn annotate_path(&self, path: &Path) -> MazeGrid {
        let mut grid = self.clone();
        grid.mark_path(path);
        grid
    }

    pub fn clear_path(&mut self) {
        for cell in self.cells.iter_mut() {
            if *cell == CellState::OnPath {
                *cell = CellState::Passable;
            }
        }
    }

    /// Writes the grid as delimited text, one line per row, using [`CellState::code`].
    pub fn to_delimited(&self, delimiter: char) -> String {
        let mut out = String::with_capacity(self.size().area() * 2);
        for row in self.cells.rows() {
            let line = row
                .iter()
                .map(|s| s.code().to_string())
                .collect::<Vec<_>>()
                .join(&delimiter.to_string());
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MazeGrid {
        MazeGrid::from_rows(&[[false, true, false], [false, false, false]]).unwrap()
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(MazeGrid::new(0, 3), Err(GridError::Empty));
        assert_eq!(MazeGrid::new(3, 0), Err(GridError::Empty));
        let rows: [[bool; 0]; 1] = [[]];
        assert_eq!(MazeGrid::from_rows(&rows), Err(GridError::Empty));
    }

    #[test]
    fn rejects_ragged() {
        let rows = vec![vec![false, false], vec![false]];
        assert_eq!(
            MazeGrid::from_rows(&rows),
            Err(GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn corners_and_walkability() {
        let grid = sample();
        assert_eq!(grid.start(), Cell(0, 0));
        assert_eq!(grid.end(), Cell(1, 2));
        assert!(grid.is_walkable(Cell(0, 0)));
        assert!(!grid.is_walkable(Cell(0, 1)));
        assert!(!grid.is_walkable(Cell(2, 0)));
        assert_eq!(grid.walkable_count(), 5);
    }

    #[test]
    fn annotate_leaves_original_untouched() {
        let grid = sample();
        let path = Path::new(vec![Cell(0, 0), Cell(1, 0), Cell(1, 1), Cell(1, 2)]);
        let marked = grid.annotate_path(&path);

        assert_eq!(grid.count(CellState::OnPath), 0);
        for (pos, state) in marked.iter() {
            if path.cells().contains(&pos) {
                assert_eq!(state, CellState::OnPath);
            } else {
                assert_eq!(state, grid.get(pos).unwrap());
            }
        }
    }

    #[test]
    fn marking_never_retags_blocked() {
        let mut grid = sample();
        grid.mark_path(&Path::new(vec![Cell(0, 0), Cell(0, 1), Cell(0, 2)]));

        assert_eq!(grid.get(Cell(0, 1)), Some(CellState::Blocked));
        assert_eq!(grid.get(Cell(0, 0)), Some(CellState::OnPath));
        assert_eq!(grid.count(CellState::OnPath), 2);

        grid.clear_path();
        assert_eq!(grid, sample());
    }

    #[test]
    fn delimited_output() {
        let mut grid = sample();
        grid.mark_path(&Path::new(vec![Cell(0, 0)]));
        assert_eq!(grid.to_delimited(','), "2,1,0\n0,0,0\n");
    }
}
