//! Error types for the runtime.

/// Errors a content generator can raise.
///
/// Any of these aborts the whole turn; nothing is scheduled or stored.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A line template failed to load or compile.
    #[error("template error: {0}")]
    Template(String),

    /// A line template failed to render.
    #[error("template render error: {0}")]
    Render(String),

    /// The generator backend failed.
    #[error("generator backend error: {0}")]
    Backend(String),
}
