//! Unit tests for participant and session snapshot models.

use draft_room::models::{
    DraftPhase, Participant, ParticipantId, SessionSnapshot, PARTICIPANT_COUNT,
};

#[test]
fn participant_ids_cover_both_seats() {
    assert_eq!(PARTICIPANT_COUNT, 2);
    assert_eq!(ParticipantId::from_index(0), Some(ParticipantId::FIRST));
    assert_eq!(ParticipantId::from_index(1), Some(ParticipantId::SECOND));
    assert_eq!(ParticipantId::from_index(2), None);
}

#[test]
fn other_flips_between_seats() {
    assert_eq!(ParticipantId::FIRST.other(), ParticipantId::SECOND);
    assert_eq!(ParticipantId::SECOND.other(), ParticipantId::FIRST);
    assert_eq!(ParticipantId::FIRST.other().other(), ParticipantId::FIRST);
}

#[test]
fn participant_id_displays_as_index() {
    assert_eq!(ParticipantId::FIRST.to_string(), "0");
    assert_eq!(ParticipantId::SECOND.to_string(), "1");
    assert_eq!(ParticipantId::SECOND.index(), 1);
}

#[test]
fn participant_id_serializes_as_number() {
    let json = serde_json::to_string(&ParticipantId::SECOND).expect("serialize");
    assert_eq!(json, "1");
}

#[test]
fn participant_id_deserializes_only_valid_seats() {
    let id: ParticipantId = serde_json::from_str("1").expect("seat 1");
    assert_eq!(id, ParticipantId::SECOND);

    let result: Result<ParticipantId, _> = serde_json::from_str("5");
    let err = result.expect_err("seat 5 does not exist");
    assert!(err.to_string().contains("out of range"), "got: {err}");
}

#[test]
fn draft_phase_serializes_to_snake_case() {
    let json = serde_json::to_string(&DraftPhase::AwaitingPlayers).expect("serialize");
    assert_eq!(json, "\"awaiting_players\"");
    let json = serde_json::to_string(&DraftPhase::Complete).expect("serialize");
    assert_eq!(json, "\"complete\"");
}

#[test]
fn draft_phase_rejects_unknown_value() {
    let result: Result<DraftPhase, _> = serde_json::from_str("\"overtime\"");
    assert!(result.is_err());
}

#[test]
fn new_participant_has_no_picks() {
    let participant = Participant::new(ParticipantId::FIRST, None);
    assert_eq!(participant.id, ParticipantId::FIRST);
    assert!(participant.picks.is_empty());
    assert!(participant.peer.is_none());
}

#[test]
fn snapshot_picks_for_missing_seat_is_empty() {
    let mut first = Participant::new(ParticipantId::FIRST, None);
    first.picks.push("Chicago Bears".into());
    let snapshot = SessionSnapshot {
        phase: DraftPhase::AwaitingPlayers,
        round: 1,
        rounds: 6,
        current_turn: None,
        participants: vec![first],
    };

    assert_eq!(snapshot.picks_for(ParticipantId::FIRST), ["Chicago Bears"]);
    assert!(snapshot.picks_for(ParticipantId::SECOND).is_empty());
}

#[test]
fn snapshot_json_shape() {
    let snapshot = SessionSnapshot {
        phase: DraftPhase::Drafting,
        round: 2,
        rounds: 6,
        current_turn: Some(ParticipantId::SECOND),
        participants: Vec::new(),
    };
    let value = serde_json::to_value(&snapshot).expect("serialize");
    assert_eq!(value["phase"], "drafting");
    assert_eq!(value["round"], 2);
    assert_eq!(value["current_turn"], 1);
    assert!(value["participants"].as_array().expect("array").is_empty());
}
