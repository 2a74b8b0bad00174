//! Play plan schema validation.
//!
//! The schema lives in the `validator` attributes on
//! [`PlayPlan`](partyline_types::PlayPlan) and its parts. This module runs
//! it and flattens the nested error tree into one line per violation, in a
//! stable order, so failures are easy to log and compare.

use serde::Deserialize as _;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use partyline_types::PlayPlan;

use crate::error::DirectorError;

/// Key `validator` uses for struct-level (schema function) errors.
const STRUCT_LEVEL_KEY: &str = "__all__";

/// Validates plans before they leave the director.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanValidator;

impl PlanValidator {
    /// Create a validator.
    pub const fn new() -> Self {
        Self
    }

    /// Check a typed plan against the schema.
    ///
    /// # Errors
    ///
    /// Returns [`DirectorError::InvalidPlan`] listing every violation.
    pub fn assert_valid(&self, plan: &PlayPlan) -> Result<(), DirectorError> {
        plan.validate().map_err(|errors| DirectorError::InvalidPlan {
            violations: flatten(&errors),
        })
    }

    /// Check an untyped JSON plan: first its shape, then the schema.
    ///
    /// # Errors
    ///
    /// Returns [`DirectorError::InvalidPlan`] when the value does not
    /// deserialize into a plan or violates the schema.
    pub fn assert_valid_json(&self, value: &serde_json::Value) -> Result<PlayPlan, DirectorError> {
        let plan = PlayPlan::deserialize(value).map_err(|e| DirectorError::InvalidPlan {
            violations: vec![format!("shape: {e}")],
        })?;
        self.assert_valid(&plan)?;
        Ok(plan)
    }
}

/// Flatten a nested error tree into sorted `"<path> <code>"` lines.
fn flatten(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort();
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let name: &str = field;
        let path = match (prefix.is_empty(), name == STRUCT_LEVEL_KEY) {
            (true, true) => String::from("/"),
            (true, false) => name.to_owned(),
            (false, true) => prefix.to_owned(),
            (false, false) => format!("{prefix}.{name}"),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.push(format!("{path} {}", error.code));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use partyline_types::{
        BeatType, ContentKind, ContentRequest, Pacing, ParticipantId, PlanVersion, SafetyBlock,
        StateUpdates,
    };

    use super::*;

    fn plan() -> PlayPlan {
        PlayPlan {
            version: PlanVersion::V1,
            beat_type: BeatType::AnswerUser,
            primary_speaker: ParticipantId::Logician,
            secondary_speakers: vec![ParticipantId::Therapist],
            interruptions: Vec::new(),
            reactions: Vec::new(),
            pacing: Pacing {
                pace_wpm: 155,
                micro_delay_ms_min: 90,
                micro_delay_ms_max: 320,
            },
            content_requests: vec![ContentRequest {
                id: String::from("full_logician"),
                agent: ParticipantId::Logician,
                kind: ContentKind::FullReply,
                max_chars: 420,
                style_hint: String::from("answer_user response in character, avoid slurs."),
            }],
            state_updates: StateUpdates::default(),
            safety: SafetyBlock::default(),
        }
    }

    fn violations(result: Result<(), DirectorError>) -> Vec<String> {
        let Err(DirectorError::InvalidPlan { violations }) = result else {
            return Vec::new();
        };
        violations
    }

    #[test]
    fn valid_plan_passes() {
        assert!(PlanValidator::new().assert_valid(&plan()).is_ok());
    }

    #[test]
    fn every_violation_is_listed() {
        let mut bad = plan();
        bad.secondary_speakers.push(ParticipantId::Logician);
        bad.pacing.micro_delay_ms_min = 500;
        if let Some(request) = bad.content_requests.first_mut() {
            request.max_chars = 999;
        }
        let found = violations(PlanValidator::new().assert_valid(&bad));
        assert_eq!(
            found,
            vec![
                String::from("/ primary_listed_as_secondary"),
                String::from("content_requests[0].max_chars range"),
                String::from("pacing micro_delay_window_inverted"),
            ]
        );
    }

    #[test]
    fn too_many_requests_rejected() {
        let mut bad = plan();
        let request = bad.content_requests.first().cloned().unwrap();
        bad.content_requests = vec![request; 5];
        let found = violations(PlanValidator::new().assert_valid(&bad));
        assert_eq!(found, vec![String::from("content_requests length")]);
    }

    #[test]
    fn json_plan_round_trips_through_validator() {
        let value = serde_json::to_value(plan()).unwrap();
        let parsed = PlanValidator::new().assert_valid_json(&value).unwrap();
        assert_eq!(parsed, plan());
    }

    #[test]
    fn json_with_wrong_shape_rejected() {
        let value = serde_json::json!({ "version": "1.0", "beat_type": "moonwalk" });
        let result = PlanValidator::new().assert_valid_json(&value);
        assert!(matches!(result, Err(DirectorError::InvalidPlan { .. })));
    }
}
