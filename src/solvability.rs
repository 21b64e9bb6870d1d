//! Parity test deciding whether a board can reach the goal at all.
//!
//! Goal is tile `v` at index `v` with the blank in the top-left cell, so the
//! goal itself has zero inversions and the blank on row 1.

/// Pairs of tiles that appear in the wrong relative order.
///
/// The blank is skipped on both sides of each pair, so its position never
/// counts; the even-board rule adds the blank's row separately.
pub fn count_inversions(flattened: &[u32]) -> usize {
    let tiles: Vec<u32> = flattened.iter().copied().filter(|&t| t != 0).collect();
    tiles
        .iter()
        .enumerate()
        .map(|(i, &tile)| tiles[i + 1..].iter().filter(|&&later| later < tile).count())
        .sum()
}

/// Whether `flattened` (row-major, `size`×`size`) can be slid into the goal.
///
/// A horizontal slide never changes the inversion count. A vertical slide
/// jumps one tile over `size - 1` others, so on odd boards the inversion
/// parity is invariant, while on even boards it flips together with the
/// blank's row.
pub fn is_solvable(flattened: &[u32], size: usize) -> bool {
    let inversions = count_inversions(flattened);

    if size % 2 == 1 {
        inversions % 2 == 0
    } else {
        let blank_row = flattened
            .iter()
            .position(|&t| t == 0)
            .map_or(0, |index| index / size + 1);
        (inversions + blank_row) % 2 == 1
    }
}
