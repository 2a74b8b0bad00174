//! Integration tests for the room store and the turn log.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use partyline_director::{Director, RuleDirector};
use partyline_store::{RoomStore, StoreError, TurnLog};
use partyline_types::{
    BeatType, ParticipantId, PlayPlan, RoomState, TranscriptEvent, TurnId, UserPacket,
};

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("partyline-store-{}", TurnId::new().0))
}

fn plan_for(text: &str, room: &RoomState) -> PlayPlan {
    let packet = UserPacket {
        user_id: String::from("user"),
        text: text.to_owned(),
    };
    RuleDirector::default().plan_turn(&packet, room).unwrap()
}

#[tokio::test]
async fn turns_are_logged_one_per_line() {
    let dir = scratch_dir();
    let log = TurnLog::new(dir.join("nested").join("room_events.jsonl"));
    let mut store = RoomStore::new().with_log(log.clone());

    let first = plan_for("let's start an argument about pizza", store.state());
    let transcript = vec![TranscriptEvent::new(0, ParticipantId::MemeGoblin, "pizza time")];
    let after_first = store.apply_turn(&first, &transcript).await.unwrap();

    let second = plan_for("why is the sky blue?", store.state());
    let after_second = store.apply_turn(&second, &[]).await.unwrap();

    let entries = log.read_all().await.unwrap();
    assert_eq!(entries.len(), 2);
    let (a, b) = (entries.first().unwrap(), entries.get(1).unwrap());
    assert_eq!(a.plan.beat_type, BeatType::ArgumentSpike);
    assert_eq!(a.transcript, transcript);
    assert_eq!(a.room_state, after_first);
    assert_eq!(b.room_state, after_second);

    let raw = tokio::fs::read_to_string(log.path()).await.unwrap();
    assert_eq!(raw.lines().count(), 2);
    assert!(raw.ends_with('\n'));

    tokio::fs::remove_dir_all(&dir).await.ok();
}

#[tokio::test]
async fn failed_log_write_leaves_state_untouched() {
    let dir = scratch_dir();
    tokio::fs::create_dir_all(&dir).await.unwrap();
    // a directory where the log file should be cannot be opened for append
    let blocked = dir.join("room_events.jsonl");
    tokio::fs::create_dir_all(&blocked).await.unwrap();

    let mut store = RoomStore::new().with_log(TurnLog::new(blocked.clone()));
    let plan = plan_for("I had pancakes", store.state());
    let result = store.apply_turn(&plan, &[]).await;

    assert!(matches!(result, Err(StoreError::Io { .. })));
    assert_eq!(store.state(), &RoomState::default());

    tokio::fs::remove_dir_all(&dir).await.ok();
}

#[tokio::test]
async fn state_evolves_across_turns() {
    let mut store = RoomStore::new();
    for text in [
        "let's start an argument about pizza",
        "no, you're wrong about that",
        "fight me",
    ] {
        let plan = plan_for(text, store.state());
        store.apply_turn(&plan, &[]).await.unwrap();
    }

    let state = store.state();
    assert_eq!(state.turn_index, 3);
    assert!((0.0..=1.0).contains(&state.energy));
    assert!((0.0..=1.0).contains(&state.tension));
    assert!(state.recent_speakers.len() <= 6);
    assert!(state.cooldowns.speaking.values().any(|t| *t == 2));
}

#[tokio::test]
async fn missing_log_reads_as_io_error() {
    let log = TurnLog::new(scratch_dir().join("absent.jsonl"));
    assert!(matches!(log.read_all().await, Err(StoreError::Io { .. })));
}
