use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
};
use mazepath::{CellState, MazeGrid};

use crate::settings::ColorScheme;

pub fn cell_char(state: CellState) -> char {
    match state {
        CellState::Passable => '.',
        CellState::Blocked => '#',
        CellState::OnPath => '*',
    }
}

fn cell_color(state: CellState, scheme: &ColorScheme) -> Color {
    match state {
        CellState::Passable => scheme.passable,
        CellState::Blocked => scheme.blocked,
        CellState::OnPath => scheme.path,
    }
}

/// Prints the grid with one character per cell.
pub fn render_plain(grid: &MazeGrid, out: &mut impl Write) -> io::Result<()> {
    for row in grid.cells().rows() {
        let line: String = row.iter().map(|&s| cell_char(s)).collect();
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Prints the grid as colored blocks, two columns wide so cells come out roughly square.
pub fn render_colored(grid: &MazeGrid, scheme: &ColorScheme, out: &mut impl Write) -> io::Result<()> {
    for row in grid.cells().rows() {
        let mut last = None;
        for &state in row {
            let color = cell_color(state, scheme);
            if last != Some(color) {
                queue!(out, SetBackgroundColor(color))?;
                last = Some(color);
            }
            queue!(out, Print("  "))?;
        }
        queue!(out, ResetColor, Print("\n"))?;
    }
    out.flush()
}

pub fn render(
    grid: &MazeGrid,
    scheme: &ColorScheme,
    plain: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    if plain {
        render_plain(grid, out)
    } else {
        render_colored(grid, scheme, out)
    }
}
