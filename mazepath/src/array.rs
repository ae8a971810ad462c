use std::ops;

use crate::dims::{Cell, GridSize};

/// Dense 2D buffer stored in row-major order and addressed by [`Cell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2D<T> {
    /// Wraps an existing row-major buffer. Returns `None` if its length doesn't match the size.
    pub fn from_buf(buf: Vec<T>, rows: usize, cols: usize) -> Option<Self> {
        (buf.len() == rows * cols).then_some(Self { buf, rows, cols })
    }

    pub fn size(&self) -> GridSize {
        GridSize(self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn cell_to_idx(&self, pos: Cell) -> Option<usize> {
        if !self.size().contains(pos) {
            return None;
        }

        Some(pos.0 as usize * self.cols + pos.1 as usize)
    }

    pub fn idx_to_cell(&self, idx: usize) -> Option<Cell> {
        if idx >= self.buf.len() {
            return None;
        }

        Some(Cell((idx / self.cols) as i32, (idx % self.cols) as i32))
    }

    pub fn get(&self, pos: Cell) -> Option<&T> {
        self.cell_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Cell) -> Option<&mut T> {
        self.cell_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.buf.iter_mut()
    }

    /// Row-major cell positions, in the same order as [`Array2D::iter`].
    pub fn iter_pos(&self) -> impl Iterator<Item = Cell> {
        Cell::iter_fill(self.rows, self.cols)
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }

        Some(&self.buf[row * self.cols..(row + 1) * self.cols])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.buf.chunks(self.cols.max(1))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Array2D<U> {
        Array2D {
            buf: self.buf.into_iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, rows: usize, cols: usize) -> Self {
        Self {
            buf: vec![item; rows * cols],
            rows,
            cols,
        }
    }

    pub fn fill(&mut self, item: T) {
        self.buf.fill(item);
    }
}

impl<T> ops::Index<Cell> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Cell) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {}", index))
    }
}

impl<T> ops::IndexMut<Cell> for Array2D<T> {
    fn index_mut(&mut self, index: Cell) -> &mut Self::Output {
        self.get_mut(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {}", index))
    }
}
