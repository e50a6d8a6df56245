use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{require_text, InvalidOutput};

/// Upper bound on questions generated per request.
pub const MAX_QUESTIONS: usize = 20;

/// Number of questions generated when the caller does not ask for a quantity.
pub const DEFAULT_QUESTION_QUANTITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectOption {
    A,
    B,
    C,
    D,
}

impl CorrectOption {
    pub const ALL: [CorrectOption; 4] = [
        CorrectOption::A,
        CorrectOption::B,
        CorrectOption::C,
        CorrectOption::D,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CorrectOption::A => "A",
            CorrectOption::B => "B",
            CorrectOption::C => "C",
            CorrectOption::D => "D",
        }
    }
}

/// Where a question is used: a full assessment, a module quiz or a lesson quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    Assessment,
    Module,
    Lesson,
}

impl Origin {
    pub const ALL: [Origin; 3] = [Origin::Assessment, Origin::Module, Origin::Lesson];

    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Assessment => "Assessment",
            Origin::Module => "Module",
            Origin::Lesson => "Lesson",
        }
    }
}

/// The topic questions are generated about.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assessment_type: Origin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Question {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub option_a: String,
    #[serde(default)]
    pub option_b: String,
    #[serde(default)]
    pub option_c: String,
    #[serde(default)]
    pub option_d: String,
    pub correct_option: CorrectOption,
    #[serde(default)]
    pub order: u32,
    pub origin: Origin,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestionSet {
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionSet {
    /// Trims the set to `quantity` items numbered `1..=quantity`, all tagged
    /// with `origin`. Fewer than `quantity` questions is an error.
    pub fn finalize(self, quantity: usize, origin: Origin) -> Result<Vec<Question>, InvalidOutput> {
        let got = self.questions.len();
        if got < quantity {
            return Err(InvalidOutput::TooFewQuestions {
                expected: quantity,
                got,
            });
        }
        if got > quantity {
            warn!("Model returned {got} questions, keeping the first {quantity}");
        }

        let mut questions = self.questions;
        questions.sort_by_key(|q| q.order);
        questions.truncate(quantity);

        for (index, question) in questions.iter_mut().enumerate() {
            let position = index + 1;
            require_text(&question.question, format!("Question {position}"))?;
            for (letter, option) in [
                ("A", &question.option_a),
                ("B", &question.option_b),
                ("C", &question.option_c),
                ("D", &question.option_d),
            ] {
                require_text(option, format!("Option{letter} of question {position}"))?;
            }

            if question.origin != origin {
                warn!(
                    "Question {position} tagged {:?}, retagging as {:?}",
                    question.origin, origin
                );
                question.origin = origin;
            }
            question.order = position as u32;
        }

        Ok(questions)
    }
}
