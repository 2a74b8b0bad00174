//! End-to-end turn tests.

#![allow(clippy::unwrap_used)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use partyline_core::{PartylineConfig, TurnEngine, TurnError};
use partyline_director::RuleDirector;
use partyline_runtime::{ContentGenerator, GenerateError, TemplateGenerator};
use partyline_store::{RoomStore, TurnLog};
use partyline_types::{
    BeatType, ContentRequest, Participant, ParticipantId, RoomState, Speaker, TurnId,
};

struct Broken;

impl ContentGenerator for Broken {
    async fn generate(
        &self,
        _request: &ContentRequest,
        _agent: &Participant,
        _room: &RoomState,
        _beat: BeatType,
        _user_text: &str,
    ) -> Result<String, GenerateError> {
        Err(GenerateError::Backend(String::from("offline")))
    }
}

fn engine() -> TurnEngine<TemplateGenerator> {
    TurnEngine::new(RuleDirector::default(), TemplateGenerator::with_seed(4).unwrap())
}

#[tokio::test]
async fn question_turn_runs_end_to_end() {
    let engine = engine();
    let mut store = RoomStore::new();
    let mut rng = StdRng::seed_from_u64(42);

    let outcome = engine
        .run_turn(&mut store, None, "  why is the sky blue?  ", &mut rng)
        .await
        .unwrap();

    assert_eq!(outcome.play_plan.beat_type, BeatType::AnswerUser);
    assert_eq!(outcome.play_plan.primary_speaker, ParticipantId::Logician);
    let first = outcome.transcript.first().unwrap();
    assert_eq!(first.at_ms, 0);
    assert_eq!(first.speaker, Speaker::Participant(ParticipantId::Logician));
    assert!(first.text.starts_with("Quick take: Here is the clean answer: why is the sky blue?"));

    assert_eq!(outcome.room_state.turn_index, 1);
    assert_eq!(&outcome.room_state, store.state());
}

#[tokio::test]
async fn blank_text_is_rejected_without_touching_state() {
    let engine = engine();
    let mut store = RoomStore::new();
    let mut rng = StdRng::seed_from_u64(1);

    let result = engine.run_turn(&mut store, Some("sam"), "   ", &mut rng).await;

    assert!(matches!(result, Err(TurnError::Input(ref msg)) if msg == "text is required"));
    assert_eq!(store.state(), &RoomState::default());
}

#[tokio::test]
async fn generation_failure_aborts_turn() {
    let engine = TurnEngine::new(RuleDirector::default(), Broken);
    let mut store = RoomStore::new();
    let mut rng = StdRng::seed_from_u64(1);

    let result = engine
        .run_turn(&mut store, None, "let's start an argument about pizza", &mut rng)
        .await;

    assert!(matches!(result, Err(TurnError::Generation(_))));
    assert_eq!(store.state(), &RoomState::default());
}

#[tokio::test]
async fn argument_turn_interrupts_and_logs() {
    let dir = std::env::temp_dir().join(format!("partyline-core-{}", TurnId::new().0));
    let log = TurnLog::new(dir.join("room_events.jsonl"));
    let mut store = RoomStore::new().with_log(log.clone());
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(7);

    let outcome = engine
        .run_turn(
            &mut store,
            Some("sam"),
            "let's start an argument about pizza",
            &mut rng,
        )
        .await
        .unwrap();

    assert_eq!(outcome.play_plan.beat_type, BeatType::ArgumentSpike);
    let interrupter = outcome.play_plan.interruptions.first().unwrap().agent;
    assert!(
        outcome
            .transcript
            .iter()
            .any(|e| e.speaker == Speaker::Participant(interrupter))
    );
    assert!(
        outcome
            .transcript
            .windows(2)
            .all(|w| matches!(w, [a, b] if a.at_ms <= b.at_ms))
    );

    let entries = log.read_all().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.first().unwrap().room_state, outcome.room_state);

    tokio::fs::remove_dir_all(&dir).await.ok();
}

#[tokio::test]
async fn engine_builds_from_config() {
    let config = PartylineConfig::parse(
        "randomness:\n  seed: 3\npacing:\n  micro_delay_ms_min: 100\n  micro_delay_ms_max: 200\n",
    )
    .unwrap();
    let engine = TurnEngine::from_config(&config).unwrap();
    let mut store = RoomStore::new();
    let mut rng = config.randomness.rng();

    let outcome = engine
        .run_turn(&mut store, None, "I had pancakes", &mut rng)
        .await
        .unwrap();

    assert_eq!(outcome.play_plan.pacing.micro_delay_ms_min, 100);
    assert_eq!(outcome.play_plan.pacing.micro_delay_ms_max, 200);
    assert!(!outcome.transcript.is_empty());
}

#[test]
fn outcome_serializes_with_wire_names() {
    let outcome = partyline_core::TurnOutcome {
        play_plan: {
            let packet = partyline_types::UserPacket {
                user_id: String::from("user"),
                text: String::from("hi"),
            };
            partyline_director::Director::plan_turn(
                &RuleDirector::default(),
                &packet,
                &RoomState::default(),
            )
            .unwrap()
        },
        transcript: Vec::new(),
        room_state: RoomState::default(),
    };
    let json = serde_json::to_value(&outcome).unwrap();
    assert!(json.get("play_plan").is_some());
    assert!(json.get("transcript").is_some());
    assert!(json.get("room_state").is_some());
}
