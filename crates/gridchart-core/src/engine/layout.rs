//! Grid coordinate arithmetic.
//!
//! Indexed cells are tiled four to a band: each band is two layout rows tall
//! and every cell occupies a 2x2 block.

/// Cells per band.
pub const CELLS_PER_BAND: u32 = 4;
/// Side length of an indexed cell, in layout units.
pub const CELL_SPAN: u32 = 2;

/// Maps a 1-based cell index to the `(row, col)` of its top-left corner.
///
/// Returns `None` for index 0 and for positions past `u32::MAX`.
pub fn index_to_coords(index: u32, offset: (u32, u32)) -> Option<(u32, u32)> {
    let zero_based = index.checked_sub(1)?;
    let row = (zero_based / CELLS_PER_BAND)
        .checked_mul(CELL_SPAN)?
        .checked_add(offset.0)?;
    let col = (zero_based % CELLS_PER_BAND)
        .checked_mul(CELL_SPAN)?
        .checked_add(offset.1)?;
    Some((row, col))
}
