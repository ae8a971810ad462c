use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use paste::paste;

/// Position of a single maze cell as `(row, column)`, both 0-indexed.
///
/// Signed, so neighbour offsets can step outside the grid and be rejected by bounds checks
/// instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell(pub i32, pub i32);

impl Cell {
    pub const ZERO: Cell = Cell(0, 0);

    /// Placeholder for "the bottom-right corner of whatever grid this is used with".
    pub const BOTTOM_RIGHT: Cell = Cell(-1, -1);

    pub const DOWN: Cell = Cell(1, 0);
    pub const RIGHT: Cell = Cell(0, 1);

    pub fn row(self) -> i32 {
        self.0
    }

    pub fn col(self) -> i32 {
        self.1
    }

    pub fn abs(self) -> Cell {
        Cell(self.0.abs(), self.1.abs())
    }

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    /// Manhattan distance, a lower bound on any path length in a 4-connected grid.
    pub fn manhattan(self, other: Cell) -> i32 {
        (self - other).abs_sum()
    }

    pub fn all_non_negative(self) -> bool {
        self.0 >= 0 && self.1 >= 0
    }

    /// Iterates all cells of a `rows` x `cols` rectangle in row-major order.
    pub fn iter_fill(rows: usize, cols: usize) -> impl Iterator<Item = Cell> {
        (0..rows as i32).flat_map(move |r| (0..cols as i32).map(move |c| Cell(r, c)))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Cell(row, col)
    }
}

impl From<Cell> for (i32, i32) {
    fn from(cell: Cell) -> Self {
        (cell.0, cell.1)
    }
}

impl From<[i32; 2]> for Cell {
    fn from(arr: [i32; 2]) -> Self {
        Cell(arr[0], arr[1])
    }
}

impl From<Cell> for [i32; 2] {
    fn from(cell: Cell) -> Self {
        [cell.0, cell.1]
    }
}

macro_rules! impl_op {
    ($trait:ident + Assign, $op:ident) => {
        impl $trait for Cell {
            type Output = Cell;

            #[inline(always)]
            fn $op(self, other: Cell) -> Cell {
                Cell(self.0.$op(other.0), self.1.$op(other.1))
            }
        }

        impl $trait<i32> for Cell {
            type Output = Cell;

            #[inline(always)]
            fn $op(self, other: i32) -> Cell {
                Cell(self.0.$op(other), self.1.$op(other))
            }
        }

        paste! {
            impl [<$trait Assign>] for Cell {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: Cell) {
                    *self = self.$op(other);
                }
            }

            impl [<$trait Assign>]<i32> for Cell {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: i32) {
                    *self = self.$op(other);
                }
            }
        }
    };
}

impl_op!(Add + Assign, add);
impl_op!(Sub + Assign, sub);

/// Size of a grid as `(rows, columns)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize(pub usize, pub usize);

impl GridSize {
    pub fn rows(self) -> usize {
        self.0
    }

    pub fn cols(self) -> usize {
        self.1
    }

    pub fn area(self) -> usize {
        self.0 * self.1
    }

    pub fn contains(self, cell: Cell) -> bool {
        cell.all_non_negative() && (cell.0 as usize) < self.0 && (cell.1 as usize) < self.1
    }

    /// The last cell of the grid, `(rows - 1, cols - 1)`.
    pub fn bottom_right(self) -> Cell {
        Cell(self.0 as i32 - 1, self.1 as i32 - 1)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.1)
    }
}
