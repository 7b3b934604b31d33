//! Tests for tic-tac-toe positions.

use tictactoe_tui::{GameState, Position};

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(8), Some(Position::BottomRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_row_and_col() {
    for (index, pos) in Position::ALL.into_iter().enumerate() {
        assert_eq!(pos.row(), index / 3);
        assert_eq!(pos.col(), index % 3);
        assert_eq!(Position::from_row_col(pos.row(), pos.col()), Some(pos));
    }
    assert_eq!(Position::from_row_col(3, 0), None);
}

#[test]
fn test_valid_moves_filters_occupied() {
    let mut game = GameState::new();
    assert_eq!(Position::valid_moves(game.board()).len(), 9);

    game.apply_move(0).unwrap();
    game.apply_move(4).unwrap();

    let valid = Position::valid_moves(game.board());
    assert_eq!(valid.len(), 7);
    assert!(!valid.contains(&Position::TopLeft));
    assert!(!valid.contains(&Position::Center));
    assert!(valid.contains(&Position::BottomRight));
}
