use super::*;
use shared::{
    domain::{Board, RoomCode, Side, BOARD_SIZE},
    protocol::ServerEvent,
};

fn at(row: i64, col: i64) -> Coord {
    Coord::new(row, col).expect("coord")
}

fn game(color: Option<Side>, white_to_move: bool) -> GameState {
    let mut state = GameState::default();
    state.apply(&ServerEvent::Joined {
        code: RoomCode::new("AB12"),
        color,
    });
    state.apply(&ServerEvent::State {
        code: None,
        board: Board::standard(),
        white_to_move,
    });
    state
}

#[test]
fn select_then_move_emits_proposal_and_clears_selection() {
    let state = game(Some(Side::White), true);
    let mut controller = Controller::default();

    assert_eq!(
        controller.gesture(at(6, 4), &state),
        GestureOutcome::Selected(at(6, 4))
    );
    assert_eq!(controller.selection(), Some(at(6, 4)));

    assert_eq!(
        controller.gesture(at(4, 4), &state),
        GestureOutcome::Proposed(MoveProposal {
            from: at(6, 4),
            to: at(4, 4),
        })
    );
    assert_eq!(controller.selection(), None);
}

#[test]
fn gestures_out_of_turn_are_discarded() {
    let state = game(Some(Side::Black), true);
    let mut controller = Controller::default();

    for square in [at(1, 4), at(6, 4), at(4, 4)] {
        assert_eq!(
            controller.gesture(square, &state),
            GestureOutcome::Discarded(DiscardReason::NotYourTurn)
        );
        assert_eq!(controller.selection(), None);
    }
}

#[test]
fn gestures_without_assigned_color_are_discarded() {
    let state = game(None, true);
    let mut controller = Controller::default();
    assert_eq!(
        controller.gesture(at(6, 4), &state),
        GestureOutcome::Discarded(DiscardReason::NotYourTurn)
    );
}

#[test]
fn selecting_square_not_owned_never_sets_selection() {
    for (side, white_to_move) in [(Side::White, true), (Side::Black, false)] {
        let state = game(Some(side), white_to_move);
        let board = state.board().expect("board").clone();
        for row in 0..BOARD_SIZE as i64 {
            for col in 0..BOARD_SIZE as i64 {
                let square = at(row, col);
                let occupant = board.get(square);
                if occupant.side() == Some(side) {
                    continue;
                }
                let mut controller = Controller::default();
                let expected = if occupant.is_empty() {
                    DiscardReason::EmptySquare
                } else {
                    DiscardReason::NotYourPiece
                };
                assert_eq!(
                    controller.gesture(square, &state),
                    GestureOutcome::Discarded(expected)
                );
                assert_eq!(controller.selection(), None);
            }
        }
    }
}

#[test]
fn gestures_before_first_snapshot_are_discarded() {
    let mut state = GameState::default();
    state.apply(&ServerEvent::Created {
        code: RoomCode::new("AB12"),
        color: Some(Side::White),
    });
    let mut controller = Controller::default();
    assert_eq!(
        controller.gesture(at(6, 4), &state),
        GestureOutcome::Discarded(DiscardReason::BoardUnpopulated)
    );
    assert_eq!(controller.selection(), None);
}

#[test]
fn reselecting_same_square_deselects() {
    let state = game(Some(Side::Black), false);
    let mut controller = Controller::default();

    controller.gesture(at(1, 3), &state);
    assert_eq!(controller.gesture(at(1, 3), &state), GestureOutcome::Deselected);
    assert_eq!(controller.selection(), None);
}

#[test]
fn second_tap_on_own_piece_is_still_a_proposal() {
    let state = game(Some(Side::White), true);
    let mut controller = Controller::default();

    controller.gesture(at(7, 1), &state);
    assert_eq!(
        controller.gesture(at(6, 1), &state),
        GestureOutcome::Proposed(MoveProposal {
            from: at(7, 1),
            to: at(6, 1),
        })
    );
    assert_eq!(controller.selection(), None);
}

#[test]
fn turn_guard_applies_while_selection_is_pending() {
    let mut state = game(Some(Side::White), true);
    let mut controller = Controller::default();
    controller.gesture(at(6, 0), &state);

    state.apply(&ServerEvent::State {
        code: None,
        board: Board::standard(),
        white_to_move: false,
    });
    assert_eq!(
        controller.gesture(at(5, 0), &state),
        GestureOutcome::Discarded(DiscardReason::NotYourTurn)
    );
    assert_eq!(controller.selection(), Some(at(6, 0)));
}
