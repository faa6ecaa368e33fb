//! Board rules for the fixed 3×3 grid.
//!
//! Pure functions over played move sets: win detection and the ascending
//! list of open squares. No state, no side effects — every caller passes
//! in the moves it cares about and gets a deterministic answer.

use trigrid_model::Square;

/// The eight 3-cell lines that win a game: three rows, three columns,
/// two diagonals.
pub const WIN_LINES: [[Square; 3]; 8] = [
    [Square(1), Square(2), Square(3)],
    [Square(4), Square(5), Square(6)],
    [Square(7), Square(8), Square(9)],
    [Square(1), Square(4), Square(7)],
    [Square(2), Square(5), Square(8)],
    [Square(3), Square(6), Square(9)],
    [Square(1), Square(5), Square(9)],
    [Square(3), Square(5), Square(7)],
];

/// Returns the first winning line fully contained in one side's moves,
/// or `None` if no line is covered.
///
/// A side cannot win before its third move, so shorter sequences are not
/// scanned at all. Lines are checked in the fixed [`WIN_LINES`] order, so
/// a position covering two lines always reports the same one.
pub fn winning_line(side_moves: &[Square]) -> Option<[Square; 3]> {
    if side_moves.len() < 3 {
        return None;
    }
    WIN_LINES
        .into_iter()
        .find(|line| line.iter().all(|sq| side_moves.contains(sq)))
}

/// The open squares of the board, in ascending order.
///
/// The head of the returned list is the automated opponent's entire move
/// policy: always the lowest-numbered open cell.
pub fn available_squares(played: &[Square]) -> Vec<Square> {
    (Square::MIN..=Square::MAX)
        .map(Square)
        .filter(|sq| !played.contains(sq))
        .collect()
}
