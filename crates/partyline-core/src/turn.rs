//! The turn engine.
//!
//! One turn runs plan, validate, generate, schedule, persist, in that
//! order. Everything before persistence works on a snapshot of the room, so
//! a turn that fails at any stage leaves the store untouched.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use partyline_director::{Director, PlanValidator, Roster, RuleDirector};
use partyline_runtime::{ContentGenerator, TemplateGenerator, TimingScheduler, generate_all};
use partyline_store::RoomStore;
use partyline_types::{PlayPlan, RoomState, TranscriptEvent, UserPacket};

use crate::config::PartylineConfig;
use crate::error::TurnError;

/// User id recorded when the caller gives none.
pub const DEFAULT_USER_ID: &str = "user";

/// Everything a completed turn produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnOutcome {
    /// The validated plan.
    pub play_plan: PlayPlan,
    /// The timed transcript.
    pub transcript: Vec<TranscriptEvent>,
    /// Room state after the turn.
    pub room_state: RoomState,
}

/// Drives turns through the director, generator, scheduler, and store.
#[derive(Debug)]
pub struct TurnEngine<G> {
    director: RuleDirector,
    validator: PlanValidator,
    scheduler: TimingScheduler,
    generator: G,
}

impl<G: ContentGenerator> TurnEngine<G> {
    /// Create an engine around `director` and `generator`.
    pub fn new(director: RuleDirector, generator: G) -> Self {
        let scheduler = TimingScheduler::new(director.roster().clone());
        Self {
            director,
            validator: PlanValidator::new(),
            scheduler,
            generator,
        }
    }

    /// The director planning each turn.
    pub const fn director(&self) -> &RuleDirector {
        &self.director
    }

    /// Run one turn for `text` against the room in `store`.
    ///
    /// # Errors
    ///
    /// [`TurnError::Input`] for blank text; otherwise the error of whichever
    /// stage failed. The store is only modified on success.
    pub async fn run_turn<R: Rng + Send>(
        &self,
        store: &mut RoomStore,
        user_id: Option<&str>,
        text: &str,
        rng: &mut R,
    ) -> Result<TurnOutcome, TurnError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TurnError::Input(String::from("text is required")));
        }
        let packet = UserPacket {
            user_id: user_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .unwrap_or(DEFAULT_USER_ID)
                .to_owned(),
            text: text.to_owned(),
        };

        let room = store.state().clone();
        let plan = self.director.plan_turn(&packet, &room)?;
        self.validator.assert_valid(&plan)?;
        debug!(
            turn = room.turn_index,
            beat = %plan.beat_type,
            requests = plan.content_requests.len(),
            "plan validated"
        );

        let texts = generate_all(
            &self.generator,
            &plan,
            self.director.roster(),
            &room,
            &packet.text,
        )
        .await?;
        let transcript = self.scheduler.schedule(&plan, &texts, rng);
        let room_state = store.apply_turn(&plan, &transcript).await?;

        info!(
            user = %packet.user_id,
            turn = room_state.turn_index,
            beat = %plan.beat_type,
            primary = %plan.primary_speaker,
            events = transcript.len(),
            "turn complete"
        );
        Ok(TurnOutcome {
            play_plan: plan,
            transcript,
            room_state,
        })
    }
}

impl TurnEngine<TemplateGenerator> {
    /// Build the template-backed engine described by `config`.
    pub fn from_config(config: &PartylineConfig) -> Result<Self, TurnError> {
        let director = RuleDirector::new(Roster::default(), config.conflict_graph())
            .with_micro_delay(config.pacing.micro_delay_ms_min, config.pacing.micro_delay_ms_max);
        let seed = config.randomness.seed;
        let generator = match (&config.templates_dir, seed) {
            (Some(dir), seed) => TemplateGenerator::from_dir(dir, seed)?,
            (None, Some(seed)) => TemplateGenerator::with_seed(seed)?,
            (None, None) => TemplateGenerator::new()?,
        };
        Ok(Self::new(director, generator))
    }
}
