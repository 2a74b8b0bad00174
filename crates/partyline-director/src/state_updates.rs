//! Room changes produced by a beat.
//!
//! The director only proposes deltas and overrides; the store applies them
//! and clamps energy and tension into `[0, 1]`.

use partyline_types::{BeatType, RunningBit, StateUpdates};

/// Longest derived topic, in characters.
const MAX_TOPIC_CHARS: usize = 50;

/// Topic used when the user text has nothing usable.
const FALLBACK_TOPIC: &str = "argument topic";

/// Strength of a freshly introduced running bit.
const NEW_BIT_STRENGTH: f64 = 0.55;

/// Energy change for a beat.
pub const fn energy_delta(beat: BeatType) -> f64 {
    match beat {
        BeatType::ArgumentSpike => 0.08,
        BeatType::Deescalate => -0.04,
        BeatType::StyleReset | BeatType::HotTakeRound => 0.05,
        BeatType::RoastUserLight => 0.10,
        BeatType::BanterLoop => 0.06,
        BeatType::IntroduceNewBit => 0.04,
        BeatType::AnswerUser | BeatType::CallbackBit | BeatType::TopicPivot => 0.0,
    }
}

/// Tension change for a beat.
pub const fn tension_delta(beat: BeatType) -> f64 {
    match beat {
        BeatType::ArgumentSpike => 0.12,
        BeatType::Deescalate => -0.12,
        BeatType::RoastUserLight => 0.06,
        _ => 0.0,
    }
}

/// Turn the user text into a short topic line.
///
/// Lowercases, replaces anything outside `a-z0-9` with spaces, collapses
/// whitespace, and truncates to 50 characters.
pub fn derive_topic(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { ' ' })
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return FALLBACK_TOPIC.to_owned();
    }
    let truncated: String = collapsed.chars().take(MAX_TOPIC_CHARS).collect();
    truncated.trim_end().to_owned()
}

/// Compute the state updates for a beat.
///
/// `next_turn` is the index of the turn being planned; new running bits are
/// keyed and stamped with it.
pub fn compute_state_updates(beat: BeatType, user_text: &str, next_turn: u64) -> StateUpdates {
    let topic = match beat {
        BeatType::TopicPivot => Some(String::from("new tangent")),
        BeatType::ArgumentSpike => Some(derive_topic(user_text)),
        _ => None,
    };
    let tone = (beat == BeatType::StyleReset).then(|| String::from("snappier"));
    let running_bits_add = (beat == BeatType::IntroduceNewBit).then(|| {
        vec![RunningBit {
            bit_id: format!("bit_{next_turn}_spark"),
            strength: NEW_BIT_STRENGTH,
            last_used_turn: next_turn,
        }]
    });

    StateUpdates {
        energy_delta: energy_delta(beat),
        tension_delta: tension_delta(beat),
        topic,
        tone,
        running_bits_add,
        ..StateUpdates::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn deltas_per_beat() {
        assert!(approx(energy_delta(BeatType::ArgumentSpike), 0.08));
        assert!(approx(tension_delta(BeatType::ArgumentSpike), 0.12));
        assert!(approx(energy_delta(BeatType::Deescalate), -0.04));
        assert!(approx(tension_delta(BeatType::Deescalate), -0.12));
        assert!(approx(energy_delta(BeatType::RoastUserLight), 0.10));
        assert!(approx(tension_delta(BeatType::RoastUserLight), 0.06));
        assert!(approx(energy_delta(BeatType::AnswerUser), 0.0));
        assert!(approx(tension_delta(BeatType::BanterLoop), 0.0));
    }

    #[test]
    fn topic_is_cleaned_and_collapsed() {
        assert_eq!(
            derive_topic("Let's start an ARGUMENT about pizza!!"),
            "let s start an argument about pizza"
        );
        assert_eq!(derive_topic("  ?? !! "), "argument topic");
        assert_eq!(derive_topic("café au lait"), "caf au lait");
    }

    #[test]
    fn topic_is_truncated_and_retrimmed() {
        let long = "aaaa ".repeat(20);
        let topic = derive_topic(&long);
        assert!(topic.chars().count() <= 50);
        assert!(!topic.ends_with(' '));
        assert_eq!(topic.chars().count(), 49);
    }

    #[test]
    fn argument_spike_sets_topic() {
        let updates = compute_state_updates(BeatType::ArgumentSpike, "beef about tabs", 3);
        assert_eq!(updates.topic.as_deref(), Some("beef about tabs"));
        assert!(updates.tone.is_none());
        assert!(updates.running_bits_add.is_none());
    }

    #[test]
    fn style_reset_sets_tone_and_pivot_sets_topic() {
        let reset = compute_state_updates(BeatType::StyleReset, "so boring", 1);
        assert_eq!(reset.tone.as_deref(), Some("snappier"));
        let pivot = compute_state_updates(BeatType::TopicPivot, "anyway", 1);
        assert_eq!(pivot.topic.as_deref(), Some("new tangent"));
    }

    #[test]
    fn new_bit_is_stamped_with_next_turn() {
        let updates = compute_state_updates(BeatType::IntroduceNewBit, "hm", 5);
        let bits = updates.running_bits_add.unwrap_or_default();
        assert_eq!(bits.len(), 1);
        assert_eq!(bits.first().map(|b| b.bit_id.as_str()), Some("bit_5_spark"));
        assert_eq!(bits.first().map(|b| b.last_used_turn), Some(5));
    }
}
