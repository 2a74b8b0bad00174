//! Keyword safety screen for user utterances.
//!
//! A flagged utterance short-circuits all social and comedic logic: the
//! director forces a `deescalate` beat led by the calming participant and
//! produces no secondaries, interruptions, or reactions.
//!
//! Matching is plain substring search on the lowercased text.

use partyline_types::{SafetyCategory, SafetyFlags};

/// Phrases signalling self-harm.
const SELF_HARM_PHRASES: &[&str] = &["kill myself", "self harm", "suicide", "end it all"];

/// Phrases signalling violence.
const VIOLENCE_PHRASES: &[&str] = &["bomb", "shoot", "stab", "murder", "attack"];

/// Phrases signalling explicit sexual content.
const EXPLICIT_SEXUAL_PHRASES: &[&str] = &["explicit", "nudes", "porn", "sex", "sexual"];

/// Phrases signalling slurs or hate.
const SLUR_OR_HATE_PHRASES: &[&str] = &["slur", "hate", "racist"];

/// Categories in detection order, with their phrase sets.
const CATEGORY_PHRASES: [(SafetyCategory, &[&str]); 4] = [
    (SafetyCategory::SelfHarm, SELF_HARM_PHRASES),
    (SafetyCategory::Violence, VIOLENCE_PHRASES),
    (SafetyCategory::ExplicitSexual, EXPLICIT_SEXUAL_PHRASES),
    (SafetyCategory::SlurOrHate, SLUR_OR_HATE_PHRASES),
];

/// Whether the (already lowercased) text contains any of the phrases.
pub fn contains_any(lower: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| lower.contains(phrase))
}

/// Screen an utterance for taboo categories.
pub fn screen(text: &str) -> SafetyFlags {
    let lower = text.to_lowercase();
    let categories = CATEGORY_PHRASES
        .iter()
        .filter(|(_, phrases)| contains_any(&lower, phrases))
        .map(|(category, _)| *category)
        .collect();
    SafetyFlags::from_categories(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_is_not_flagged() {
        let flags = screen("why is the sky blue?");
        assert!(!flags.flagged);
        assert!(flags.categories.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let flags = screen("That movie was PORN-level cringe");
        assert!(flags.flagged);
        assert_eq!(flags.categories, vec![SafetyCategory::ExplicitSexual]);
    }

    #[test]
    fn multiple_categories_in_detection_order() {
        let flags = screen("I hate this, I want to attack someone and end it all");
        assert_eq!(
            flags.categories,
            vec![
                SafetyCategory::SelfHarm,
                SafetyCategory::Violence,
                SafetyCategory::SlurOrHate,
            ]
        );
    }

    #[test]
    fn each_category_detected() {
        assert_eq!(screen("self harm").categories, vec![SafetyCategory::SelfHarm]);
        assert_eq!(screen("a bomb").categories, vec![SafetyCategory::Violence]);
        assert_eq!(screen("send nudes").categories, vec![SafetyCategory::ExplicitSexual]);
        assert_eq!(screen("so racist").categories, vec![SafetyCategory::SlurOrHate]);
    }
}
