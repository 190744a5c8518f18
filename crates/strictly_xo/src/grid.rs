//! The 9-cell grid and its mutation rules.

use crate::error::MatchError;
use crate::types::{Cell, Player};
use serde::{Deserialize, Serialize};

/// Number of cells on the grid.
pub const CELL_COUNT: usize = 9;

/// Cells per row and per column.
pub const SIDE: usize = 3;

/// 3x3 grid, row-major (index = row * 3 + col).
///
/// `Grid` is `Copy`: the search hands every simulated ply its own grid, so
/// hypothetical moves never alias the live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [Cell; CELL_COUNT],
}

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Builds a grid from raw cells.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Returns the value at `index`. Out-of-range indices read as empty.
    pub fn value_at(&self, index: usize) -> Cell {
        self.cells.get(index).copied().unwrap_or(Cell::Empty)
    }

    /// Places `player`'s mark at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidMove`] if `index` is outside `0..9` or the
    /// cell is not empty. The grid is left untouched in both cases.
    pub fn place(&mut self, index: usize, player: Player) -> Result<(), MatchError> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(MatchError::out_of_range(index))?;
        if !cell.is_empty() {
            return Err(MatchError::occupied(index));
        }
        *cell = player.cell();
        Ok(())
    }

    /// Resets a cell to empty. Out-of-range indices are ignored.
    pub fn clear(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Cell::Empty;
        }
    }

    /// Returns a copy of this grid with `player`'s mark at `index`.
    ///
    /// Used by the search to simulate a ply without touching the original.
    pub(crate) fn with_mark(mut self, index: usize, player: Player) -> Self {
        self.cells[index] = player.cell();
        self
    }

    /// Checks if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Number of cells holding a mark.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Indices of the empty cells, ascending.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Number of marks each player has on the grid.
    pub fn mark_counts(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(one, two), c| match c {
            Cell::PlayerOne => (one + 1, two),
            Cell::PlayerTwo => (one, two + 1),
            Cell::Empty => (one, two),
        })
    }

    /// Formats the grid as a human-readable string.
    ///
    /// Empty cells show their 1-based number; occupied cells show the symbol
    /// returned by `symbol`.
    pub fn display_with(&self, symbol: impl Fn(Player) -> char) -> String {
        let mut result = String::new();
        for row in 0..SIDE {
            for col in 0..SIDE {
                let pos = row * SIDE + col;
                match self.cells[pos].owner() {
                    Some(player) => result.push(symbol(player)),
                    None => result.push_str(&(pos + 1).to_string()),
                }
                if col < SIDE - 1 {
                    result.push('|');
                }
            }
            if row < SIDE - 1 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }

    /// Formats the grid with `1` and `2` for the two players.
    pub fn display(&self) -> String {
        self.display_with(|player| match player {
            Player::PlayerOne => '1',
            Player::PlayerTwo => '2',
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidMoveReason;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert_eq!(grid.occupied_count(), 0);
        assert!(!grid.is_full());
        assert_eq!(grid.empty_cells().count(), CELL_COUNT);
    }

    #[test]
    fn test_place_and_clear() {
        let mut grid = Grid::new();
        grid.place(4, Player::PlayerTwo).unwrap();
        assert_eq!(grid.value_at(4), Cell::PlayerTwo);
        grid.clear(4);
        assert_eq!(grid.value_at(4), Cell::Empty);
    }

    #[test]
    fn test_place_rejects_occupied() {
        let mut grid = Grid::new();
        grid.place(0, Player::PlayerOne).unwrap();
        let err = grid.place(0, Player::PlayerTwo).unwrap_err();
        assert_eq!(
            err,
            MatchError::InvalidMove {
                index: 0,
                reason: InvalidMoveReason::Occupied
            }
        );
        assert_eq!(grid.value_at(0), Cell::PlayerOne);
    }

    #[test]
    fn test_place_rejects_out_of_range() {
        let mut grid = Grid::new();
        let before = grid;
        assert!(matches!(
            grid.place(9, Player::PlayerOne),
            Err(MatchError::InvalidMove {
                reason: InvalidMoveReason::OutOfRange,
                ..
            })
        ));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_full_grid() {
        let mut grid = Grid::new();
        for i in 0..CELL_COUNT {
            let player = if i % 2 == 0 { Player::PlayerOne } else { Player::PlayerTwo };
            grid.place(i, player).unwrap();
        }
        assert!(grid.is_full());
        assert_eq!(grid.mark_counts(), (5, 4));
    }

    #[test]
    fn test_display_shows_numbers_for_empty_cells() {
        let mut grid = Grid::new();
        grid.place(0, Player::PlayerOne).unwrap();
        grid.place(8, Player::PlayerTwo).unwrap();
        let rendered = grid.display_with(|player| match player {
            Player::PlayerOne => 'X',
            Player::PlayerTwo => 'O',
        });
        assert_eq!(rendered, "X|2|3\n-+-+-\n4|5|6\n-+-+-\n7|8|O");
    }
}
