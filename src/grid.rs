//! Grid geometry and rendering for the 3x3 board.
//!
//! Tiles are stored as a flat array in column-major order: indices 0, 1, 2
//! run top-to-bottom down column 0, indices 3, 4, 5 down column 1, and so on.

/// Cells per side of the board.
pub const DIM: usize = 3;

/// Total number of cells on the board.
pub const CELLS: usize = DIM * DIM;

/// A `(row, col)` cell position, both in `0..DIM`.
pub type Position = (usize, usize);

/// Converts a `(row, col)` position to a flat column-major index.
#[inline(always)]
pub const fn pos_to_idx((row, col): Position) -> usize {
    col * DIM + row
}

/// Converts a flat column-major index to a `(row, col)` position.
#[inline(always)]
pub const fn idx_to_pos(cell_index: usize) -> Position {
    (cell_index % DIM, cell_index / DIM)
}

/// Formats tiles as a single space-separated line in storage order.
///
/// This is the line format of every output artifact.
pub fn format_tiles(tiles: &[u8; CELLS]) -> String {
    let mut output = String::with_capacity(2 * CELLS);
    for (i, tile) in tiles.iter().enumerate() {
        if i > 0 {
            output.push(' ');
        }
        output.push(char::from(b'0' + tile));
    }
    output
}

/// Formats tiles as a 3x3 grid, one row per line.
///
/// The blank shows as '.'.
pub fn format_board(tiles: &[u8; CELLS]) -> String {
    let mut output = String::with_capacity(2 * CELLS);

    for row in 0..DIM {
        for col in 0..DIM {
            if col > 0 {
                output.push(' ');
            }
            let tile = tiles[pos_to_idx((row, col))];
            output.push(if tile == 0 {
                '.'
            } else {
                char::from(b'0' + tile)
            });
        }
        output.push('\n');
    }

    output
}
