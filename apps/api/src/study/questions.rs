//! Multiple-choice question generation.

use tracing::info;

use crate::gateway::{CompletionError, CompletionGateway};
use crate::models::question::{Question, QuestionSet, Subject};
use crate::study::prompts::build_questions_prompt;

/// Generates exactly `quantity` questions about `subject`, ordered from 1.
pub async fn generate_questions(
    gateway: &CompletionGateway,
    subject: &Subject,
    quantity: usize,
) -> Result<Vec<Question>, CompletionError> {
    let request = build_questions_prompt(subject, quantity);
    let set: QuestionSet = gateway.complete_as(&request).await?;
    let questions = set.finalize(quantity, subject.assessment_type)?;
    info!(
        "Generated {} questions for '{}' ({:?})",
        questions.len(),
        subject.title,
        subject.assessment_type
    );
    Ok(questions)
}
