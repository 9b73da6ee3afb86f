use super::*;
use crate::domain::{PieceKind, PlayerColor, Square, BOARD_SIZE};
use crate::error::ProtocolError;
use serde_json::json;

fn coord(row: i64, col: i64) -> Coord {
    Coord::new(row, col).expect("coord")
}

fn state_frame(board: serde_json::Value, white_to_move: bool) -> String {
    json!({ "type": "state", "code": "AB12", "board": board, "white_to_move": white_to_move })
        .to_string()
}

#[test]
fn room_requests_use_action_discriminator() {
    assert_eq!(
        serde_json::to_value(ClientRequest::Create).expect("encode"),
        json!({ "action": "create" })
    );
    assert_eq!(
        serde_json::to_value(ClientRequest::Join {
            code: RoomCode::new("AB12")
        })
        .expect("encode"),
        json!({ "action": "join", "code": "AB12" })
    );
}

#[test]
fn move_request_nests_coordinates_under_move() {
    let request = ClientRequest::Move(MoveProposal {
        from: coord(6, 4),
        to: coord(4, 4),
    });
    assert_eq!(
        serde_json::to_value(request).expect("encode"),
        json!({ "type": "move", "move": { "from": [6, 4], "to": [4, 4] } })
    );
}

#[test]
fn server_side_can_decode_client_requests() {
    let decoded: ClientRequest =
        serde_json::from_str(r#"{"type":"move","move":{"from":[1,2],"to":[3,2]}}"#)
            .expect("decode move");
    assert_eq!(
        decoded,
        ClientRequest::Move(MoveProposal {
            from: coord(1, 2),
            to: coord(3, 2),
        })
    );
    let ping: ClientRequest = serde_json::from_str(r#"{"type":"ping"}"#).expect("decode ping");
    assert_eq!(ping, ClientRequest::Ping);
}

#[test]
fn joined_event_carries_code_and_color() {
    let event = ServerEvent::parse(r#"{"type":"joined","code":"AB12","color":"b"}"#)
        .expect("joined");
    assert_eq!(
        event,
        ServerEvent::Joined {
            code: RoomCode::new("AB12"),
            color: Some(Side::Black),
        }
    );
}

#[test]
fn created_event_without_color_is_accepted() {
    let event = ServerEvent::parse(r#"{"type":"created","code":"ZZ99"}"#).expect("created");
    assert_eq!(
        event,
        ServerEvent::Created {
            code: RoomCode::new("ZZ99"),
            color: None,
        }
    );
}

#[test]
fn state_event_decodes_full_board() {
    let board = serde_json::to_value(Board::standard()).expect("encode board");
    let event = ServerEvent::parse(&state_frame(board, false)).expect("state");
    let ServerEvent::State {
        code,
        board,
        white_to_move,
    } = event
    else {
        panic!("expected state event");
    };
    assert_eq!(code, Some(RoomCode::new("AB12")));
    assert!(!white_to_move);
    assert_eq!(
        board.get(coord(6, 4)),
        Square::Occupied {
            side: Side::White,
            kind: PieceKind::Pawn,
        }
    );
    assert_eq!(board.get(coord(4, 4)), Square::Empty);
}

#[test]
fn state_event_with_wrong_board_shape_is_malformed() {
    let short = serde_json::to_value(vec![vec!["--"; BOARD_SIZE]; 7]).expect("encode");
    assert!(ServerEvent::parse(&state_frame(short, true)).is_none());

    let mut rows = vec![vec!["--"; BOARD_SIZE]; BOARD_SIZE];
    rows[3].push("--");
    assert!(ServerEvent::parse(&state_frame(json!(rows), true)).is_none());
}

#[test]
fn state_event_with_unknown_piece_code_is_malformed() {
    let mut rows = vec![vec!["--"; BOARD_SIZE]; BOARD_SIZE];
    rows[0][0] = "xZ";
    assert!(ServerEvent::parse(&state_frame(json!(rows), true)).is_none());
}

#[test]
fn empty_and_null_cells_decode_as_empty() {
    let mut rows = vec![vec![json!("--"); BOARD_SIZE]; BOARD_SIZE];
    rows[2][2] = json!("");
    rows[5][5] = serde_json::Value::Null;
    let event = ServerEvent::parse(&state_frame(json!(rows), true)).expect("state");
    let ServerEvent::State { board, .. } = event else {
        panic!("expected state event");
    };
    assert!(board.get(coord(2, 2)).is_empty());
    assert!(board.get(coord(5, 5)).is_empty());
}

#[test]
fn error_event_message_is_optional() {
    assert_eq!(
        ServerEvent::parse(r#"{"type":"error","message":"illegal move"}"#),
        Some(ServerEvent::Error {
            message: Some("illegal move".to_string())
        })
    );
    assert_eq!(
        ServerEvent::parse(r#"{"type":"error"}"#),
        Some(ServerEvent::Error { message: None })
    );
}

#[test]
fn unrecognized_type_decodes_as_unknown() {
    assert_eq!(
        ServerEvent::parse(r#"{"type":"opponent_undo","extra":1}"#),
        Some(ServerEvent::Unknown)
    );
    assert_eq!(
        ServerEvent::parse(r#"{"type":"opponent_left"}"#),
        Some(ServerEvent::OpponentLeft)
    );
}

#[test]
fn garbage_frames_do_not_parse() {
    assert!(ServerEvent::parse("not json").is_none());
    assert!(ServerEvent::parse(r#"{"code":"AB12"}"#).is_none());
    assert!(ServerEvent::parse(r#"{"type":"state","white_to_move":true}"#).is_none());
    assert!(ServerEvent::parse("").is_none());
}

#[test]
fn coordinates_outside_board_are_rejected() {
    assert_eq!(
        Coord::new(8, 0),
        Err(ProtocolError::CoordOutOfRange { row: 8, col: 0 })
    );
    assert!(serde_json::from_str::<Coord>("[-1, 3]").is_err());
}

#[test]
fn coord_parses_algebraic_and_numeric_forms() {
    assert_eq!(Coord::parse("e2").expect("e2"), coord(6, 4));
    assert_eq!(Coord::parse("A8").expect("a8"), coord(0, 0));
    assert_eq!(Coord::parse("6,4").expect("pair"), coord(6, 4));
    assert_eq!(Coord::parse(" 4 4 ").expect("spaced"), coord(4, 4));
    assert!(Coord::parse("i1").is_err());
    assert!(Coord::parse("e9").is_err());
    assert!(Coord::parse("9,0").is_err());
    assert_eq!(coord(6, 4).to_string(), "e2");
}

#[test]
fn player_color_owns_only_its_side() {
    let white_pawn = Square::parse("wP").expect("code");
    let black_king = Square::parse("bK").expect("code");
    assert!(PlayerColor::White.owns(white_pawn));
    assert!(!PlayerColor::White.owns(black_king));
    assert!(!PlayerColor::Black.owns(Square::Empty));
    assert!(!PlayerColor::Unknown.owns(white_pawn));
    assert_eq!(PlayerColor::Unknown.label(), "—");
}

#[test]
fn room_code_input_is_normalized() {
    assert_eq!(
        RoomCode::from_user_input("  ab12 ").expect("code"),
        RoomCode::new("AB12")
    );
    assert_eq!(
        RoomCode::from_user_input("   "),
        Err(ProtocolError::EmptyRoomCode)
    );
}
