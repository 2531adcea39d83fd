use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{QuestionId, QuizId};
use crate::model::wire::{null_as_default, optional_text};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizAnswerError {
    #[error("please answer all questions before submitting ({missing} unanswered)")]
    Unanswered { missing: usize },

    #[error("question {0} is not part of this quiz")]
    UnknownQuestion(QuestionId),

    #[error("invalid answer choice: {0}")]
    InvalidChoice(String),
}

//
// ─── QUIZ LISTING ──────────────────────────────────────────────────────────────
//

/// Quiz entry for a course (`GET /api/student/course/{id}/quizzes`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizSummary {
    pub id: QuizId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub week_number: Option<u32>,
    #[serde(default, deserialize_with = "optional_text")]
    pub deadline: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_visible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_submitted: bool,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAvailability {
    Locked,
    Available,
    Scored { score: u32, total: u32 },
}

impl QuizSummary {
    #[must_use]
    pub fn availability(&self) -> QuizAvailability {
        if self.is_submitted {
            QuizAvailability::Scored {
                score: self.score.unwrap_or(0),
                total: self.total.unwrap_or(0),
            }
        } else if self.is_visible {
            QuizAvailability::Available
        } else {
            QuizAvailability::Locked
        }
    }
}

//
// ─── QUIZ DETAIL ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub option_a: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub option_b: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub option_c: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub option_d: String,
}

impl Question {
    /// Options in display order, paired with their choice letter.
    #[must_use]
    pub fn options(&self) -> [(AnswerChoice, &str); 4] {
        [
            (AnswerChoice::A, self.option_a.as_str()),
            (AnswerChoice::B, self.option_b.as_str()),
            (AnswerChoice::C, self.option_c.as_str()),
            (AnswerChoice::D, self.option_d.as_str()),
        ]
    }
}

/// Full quiz as served to a student (`GET /api/student/quiz/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnswerChoice {
    A,
    B,
    C,
    D,
}

impl AnswerChoice {
    #[must_use]
    pub fn letter(self) -> &'static str {
        match self {
            AnswerChoice::A => "A",
            AnswerChoice::B => "B",
            AnswerChoice::C => "C",
            AnswerChoice::D => "D",
        }
    }
}

impl std::str::FromStr for AnswerChoice {
    type Err = QuizAnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(AnswerChoice::A),
            "B" => Ok(AnswerChoice::B),
            "C" => Ok(AnswerChoice::C),
            "D" => Ok(AnswerChoice::D),
            _ => Err(QuizAnswerError::InvalidChoice(s.to_owned())),
        }
    }
}

//
// ─── ANSWER SHEET ──────────────────────────────────────────────────────────────
//

/// Answers collected while a quiz is open.
///
/// Submission is refused until every question has a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    quiz_id: QuizId,
    questions: Vec<QuestionId>,
    answers: BTreeMap<QuestionId, AnswerChoice>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new(quiz: &Quiz) -> Self {
        Self {
            quiz_id: quiz.id,
            questions: quiz.questions.iter().map(|q| q.id).collect(),
            answers: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    /// Record (or replace) the choice for a question.
    ///
    /// # Errors
    ///
    /// Returns `QuizAnswerError::UnknownQuestion` if the question is not in this quiz.
    pub fn choose(
        &mut self,
        question: QuestionId,
        choice: AnswerChoice,
    ) -> Result<(), QuizAnswerError> {
        if !self.questions.contains(&question) {
            return Err(QuizAnswerError::UnknownQuestion(question));
        }
        self.answers.insert(question, choice);
        Ok(())
    }

    #[must_use]
    pub fn choice(&self, question: QuestionId) -> Option<AnswerChoice> {
        self.answers.get(&question).copied()
    }

    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.questions.len() - self.answers.len()
    }

    /// Finish the sheet and build the submission payload.
    ///
    /// # Errors
    ///
    /// Returns `QuizAnswerError::Unanswered` if any question has no choice.
    pub fn finish(&self) -> Result<QuizSubmission, QuizAnswerError> {
        let missing = self.unanswered();
        if missing > 0 {
            return Err(QuizAnswerError::Unanswered { missing });
        }
        let answers = self
            .answers
            .iter()
            .map(|(question, choice)| (question.to_string(), *choice))
            .collect();
        Ok(QuizSubmission { answers })
    }
}

/// Body of `POST /api/student/quiz/{id}/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSubmission {
    pub answers: BTreeMap<String, AnswerChoice>,
}

/// Score returned after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct QuizScore {
    pub score: u32,
    pub total: u32,
}
