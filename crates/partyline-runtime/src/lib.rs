//! Content generation and transcript timing for Partyline.
//!
//! The runtime takes an assembled play plan, asks a [`ContentGenerator`]
//! for every line it budgets, and places those lines on a timeline with the
//! [`TimingScheduler`].
//!
//! # Modules
//!
//! - [`generator`] -- The content generator trait and concurrent generation
//! - [`templates`] -- Template-driven generator built on `minijinja`
//! - [`timing`] -- Speech-duration estimates and utterance splitting
//! - [`scheduler`] -- Transcript timing, including interruption splits
//! - [`error`] -- Error types

pub mod error;
pub mod generator;
pub mod scheduler;
pub mod templates;
pub mod timing;

pub use error::GenerateError;
pub use generator::{ContentGenerator, GeneratedTexts, generate_all};
pub use scheduler::TimingScheduler;
pub use templates::TemplateGenerator;
