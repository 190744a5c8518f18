//! Tests for the minimax search and automated move selection.

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use strictly_xo::{
    CELL_COUNT, Difficulty, Grid, Outcome, Player, best_move, choose_automated_move, evaluate,
};

/// Plays random moves until `count` are placed or the game ends.
/// Returns the grid, the turn counter and the player to move.
fn random_position(rng: &mut StdRng, count: usize) -> Option<(Grid, u32, Player)> {
    let mut grid = Grid::new();
    let mut player = Player::PlayerOne;
    let mut turn = 1;
    for _ in 0..count {
        let index = grid.empty_cells().choose(rng)?;
        grid.place(index, player).unwrap();
        turn += 1;
        if evaluate(&grid, index, turn) != Outcome::None {
            return None;
        }
        player = player.opponent();
    }
    Some((grid, turn, player))
}

#[test]
fn test_best_move_is_always_empty() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut checked = 0;
    for round in 0..300 {
        let Some((grid, turn, player)) = random_position(&mut rng, round % 8) else {
            continue;
        };
        let found = best_move(&grid, turn, player).expect("non-full grid has a move");
        assert!(found.index < CELL_COUNT);
        assert!(grid.value_at(found.index).is_empty());
        checked += 1;
    }
    assert!(checked > 100);
}

#[test]
fn test_best_move_takes_available_win() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut wins_seen = 0;
    for round in 0..500 {
        let Some((grid, turn, player)) = random_position(&mut rng, 3 + round % 5) else {
            continue;
        };
        let has_win = grid.empty_cells().any(|index| {
            let mut child = grid;
            child.place(index, player).unwrap();
            evaluate(&child, index, turn + 1) == player.winning_outcome()
        });
        if !has_win {
            continue;
        }

        let found = best_move(&grid, turn, player).unwrap();
        let mut child = grid;
        child.place(found.index, player).unwrap();
        assert_eq!(
            evaluate(&child, found.index, turn + 1),
            player.winning_outcome(),
            "missed a win in\n{}",
            grid.display()
        );
        wins_seen += 1;
    }
    assert!(wins_seen > 20);
}

#[test]
fn test_win_or_block_on_same_cell() {
    // X . .
    // . X .
    // O O .
    let mut grid = Grid::new();
    grid.place(0, Player::PlayerOne).unwrap();
    grid.place(4, Player::PlayerOne).unwrap();
    grid.place(6, Player::PlayerTwo).unwrap();
    grid.place(7, Player::PlayerTwo).unwrap();

    for player in [Player::PlayerOne, Player::PlayerTwo] {
        assert_eq!(best_move(&grid, 5, player).map(|m| m.index), Some(8));
    }
}

#[test]
fn test_best_move_leaves_grid_untouched() {
    let mut grid = Grid::new();
    grid.place(4, Player::PlayerOne).unwrap();
    let before = grid;
    let _ = best_move(&grid, 2, Player::PlayerTwo);
    assert_eq!(grid, before);
}

#[test]
fn test_opening_move_is_uniform() {
    let mut rng = StdRng::seed_from_u64(31337);
    let grid = Grid::new();
    let samples = 9_000;
    let mut counts = [0usize; CELL_COUNT];
    for _ in 0..samples {
        let index =
            choose_automated_move(&grid, 1, Player::PlayerOne, Difficulty::Unbeatable, &mut rng)
                .unwrap();
        counts[index] += 1;
    }
    for (index, &count) in counts.iter().enumerate() {
        assert!(
            (800..=1200).contains(&count),
            "cell {index} chosen {count} times out of {samples}"
        );
    }
}

#[test]
fn test_every_difficulty_plays_a_legal_cell() {
    let mut rng = StdRng::seed_from_u64(5);
    for difficulty in [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Unbeatable,
    ] {
        for round in 0..50 {
            let Some((grid, turn, player)) = random_position(&mut rng, 1 + round % 7) else {
                continue;
            };
            let index = choose_automated_move(&grid, turn, player, difficulty, &mut rng).unwrap();
            assert!(grid.value_at(index).is_empty(), "{difficulty} chose {index}");
        }
    }
}
