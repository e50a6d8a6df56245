//! Typed counterparts of the registered response schemas.
//!
//! Model output is deserialized into these types after schema validation and
//! normalization, then `finalize`d to enforce ordering and count invariants
//! that a JSON Schema cannot express.

pub mod exam;
pub mod question;
pub mod roadmap;

use thiserror::Error;

/// Model output that parsed and matched its schema but breaks a domain rule.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidOutput {
    #[error("{0} is empty")]
    Empty(String),

    #[error("no result found for '{0}'")]
    NoResult(String),

    #[error("expected {expected} questions, model returned {got}")]
    TooFewQuestions { expected: usize, got: usize },

    #[error("roadmap has {count} modules, expected between {min} and {max}")]
    ModuleCount { count: usize, min: usize, max: usize },

    #[error("module '{module}' has {count} lessons, expected between {min} and {max}")]
    LessonCount {
        module: String,
        count: usize,
        min: usize,
        max: usize,
    },
}

pub(crate) fn require_text(value: &str, what: impl Into<String>) -> Result<(), InvalidOutput> {
    if value.trim().is_empty() {
        Err(InvalidOutput::Empty(what.into()))
    } else {
        Ok(())
    }
}
