//! Template-driven content generator.
//!
//! Lines are rendered with `minijinja` from a small set of templates, one per
//! kind of line. The built-in templates ship with the crate; any of them can
//! be overridden by dropping a file of the same name into a templates
//! directory, so personas can be tuned without recompiling.
//!
//! Templates see `agent`, `display_name`, `beat`, `prefix`, and `text` (the
//! user text, already shortened for the kind of line).

use std::future::{Future, ready};
use std::path::Path;
use std::sync::Mutex;

use minijinja::{Environment, context};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use partyline_types::{
    BeatType, ContentKind, ContentRequest, LanguageMode, Participant, ParticipantId, RoomState,
};

use crate::error::GenerateError;
use crate::generator::ContentGenerator;
use crate::timing::truncate_chars;

/// Template names, in load order.
const TEMPLATE_NAMES: [&str; 4] = [
    "full_reply.j2",
    "interruption.j2",
    "argument_quip.j2",
    "quip.j2",
];

const FULL_REPLY_TEMPLATE: &str = include_str!("../templates/full_reply.j2");
const INTERRUPTION_TEMPLATE: &str = include_str!("../templates/interruption.j2");
const ARGUMENT_QUIP_TEMPLATE: &str = include_str!("../templates/argument_quip.j2");
const QUIP_TEMPLATE: &str = include_str!("../templates/quip.j2");

/// Longest user excerpt quoted in a full reply.
const FULL_REPLY_EXCERPT: usize = 120;

/// Longest user excerpt quoted in an interruption.
const INTERRUPTION_EXCERPT: usize = 80;

/// Profanity ceiling in clean language mode.
const CLEAN_PROFANITY_CAP: f64 = 0.2;

/// Below this level no profanity is added.
const MILD_PROFANITY_LEVEL: f64 = 0.25;

/// Below this level only mild profanity is added.
const STRONG_PROFANITY_LEVEL: f64 = 0.6;

const MILD_SWEARS: [&str; 2] = ["damn", "hell"];
const STRONG_SWEARS: [&str; 2] = ["shit", "fuck"];

/// Opening phrase of every line a participant says.
pub const fn style_prefix(id: ParticipantId) -> &'static str {
    match id {
        ParticipantId::Logician => "Quick take:",
        ParticipantId::Therapist => "Gentle check-in:",
        ParticipantId::MemeGoblin => "Plot twist:",
        ParticipantId::MidwestDad => "Dad wisdom:",
    }
}

/// Shorten `text` to `limit` chars, ending in an ellipsis when cut.
fn excerpt(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        format!("{}...", truncate_chars(text, limit.saturating_sub(3)))
    } else {
        text.to_owned()
    }
}

/// Effective profanity level of `agent` in `mode`.
pub fn profanity_level(agent: &Participant, mode: LanguageMode) -> f64 {
    match mode {
        LanguageMode::Clean => agent.profanity_level.min(CLEAN_PROFANITY_CAP),
        LanguageMode::Normal | LanguageMode::Spicy => agent.profanity_level,
    }
}

/// Swear word tier for a profanity level.
pub fn swear_tier(level: f64) -> &'static [&'static str] {
    if level < MILD_PROFANITY_LEVEL {
        &[]
    } else if level < STRONG_PROFANITY_LEVEL {
        &MILD_SWEARS
    } else {
        &STRONG_SWEARS
    }
}

/// Renders lines from templates, flavoured with seeded profanity.
pub struct TemplateGenerator {
    env: Environment<'static>,
    rng: Mutex<StdRng>,
}

impl TemplateGenerator {
    /// Create a generator with the built-in templates and an OS-seeded RNG.
    pub fn new() -> Result<Self, GenerateError> {
        Self::build(None, StdRng::from_os_rng())
    }

    /// Create a generator with the built-in templates and a fixed seed.
    pub fn with_seed(seed: u64) -> Result<Self, GenerateError> {
        Self::build(None, StdRng::seed_from_u64(seed))
    }

    /// Create a generator whose templates may be overridden from `dir`.
    ///
    /// Files missing from the directory fall back to the built-in template.
    pub fn from_dir(dir: &Path, seed: Option<u64>) -> Result<Self, GenerateError> {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self::build(Some(dir), rng)
    }

    fn build(dir: Option<&Path>, rng: StdRng) -> Result<Self, GenerateError> {
        let mut env = Environment::new();
        let builtins = [
            FULL_REPLY_TEMPLATE,
            INTERRUPTION_TEMPLATE,
            ARGUMENT_QUIP_TEMPLATE,
            QUIP_TEMPLATE,
        ];
        for (name, builtin) in TEMPLATE_NAMES.into_iter().zip(builtins) {
            let source = match dir.map(|d| d.join(name)).filter(|p| p.is_file()) {
                Some(path) => std::fs::read_to_string(&path).map_err(|e| {
                    GenerateError::Template(format!("failed to read {}: {e}", path.display()))
                })?,
                None => builtin.to_owned(),
            };
            env.add_template_owned(name, source)
                .map_err(|e| GenerateError::Template(format!("failed to add {name}: {e}")))?;
        }
        Ok(Self {
            env,
            rng: Mutex::new(rng),
        })
    }

    /// Render one line synchronously.
    pub fn render(
        &self,
        request: &ContentRequest,
        agent: &Participant,
        room: &RoomState,
        beat: BeatType,
        user_text: &str,
    ) -> Result<String, GenerateError> {
        let (name, text) = match request.kind {
            ContentKind::FullReply => ("full_reply.j2", excerpt(user_text, FULL_REPLY_EXCERPT)),
            ContentKind::Interruption => {
                ("interruption.j2", excerpt(user_text, INTERRUPTION_EXCERPT))
            }
            ContentKind::Quip if beat == BeatType::ArgumentSpike => {
                ("argument_quip.j2", String::new())
            }
            ContentKind::Quip | ContentKind::Tagline => ("quip.j2", String::new()),
        };

        let line = self
            .env
            .get_template(name)
            .map_err(|e| GenerateError::Template(format!("missing {name}: {e}")))?
            .render(context! {
                agent => agent.id.as_str(),
                display_name => agent.display_name.as_str(),
                beat => beat.as_str(),
                prefix => style_prefix(agent.id),
                text => text,
            })
            .map_err(|e| GenerateError::Render(format!("{name} render failed: {e}")))?;

        let line = match self.pick_swear(profanity_level(agent, room.language_mode))? {
            Some(word) => format!("{} {word}.", line.trim_end()),
            None => line.trim_end().to_owned(),
        };
        let limit = usize::try_from(request.max_chars).unwrap_or(usize::MAX);
        Ok(truncate_chars(&line, limit))
    }

    fn pick_swear(&self, level: f64) -> Result<Option<&'static str>, GenerateError> {
        let tier = swear_tier(level);
        if tier.is_empty() {
            return Ok(None);
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| GenerateError::Backend(format!("rng lock poisoned: {e}")))?;
        Ok(tier.choose(&mut *rng).copied())
    }
}

impl core::fmt::Debug for TemplateGenerator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TemplateGenerator").finish_non_exhaustive()
    }
}

impl ContentGenerator for TemplateGenerator {
    fn generate(
        &self,
        request: &ContentRequest,
        agent: &Participant,
        room: &RoomState,
        beat: BeatType,
        user_text: &str,
    ) -> impl Future<Output = Result<String, GenerateError>> + Send {
        ready(self.render(request, agent, room, beat, user_text))
    }
}
