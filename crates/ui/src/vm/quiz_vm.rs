use lms_core::model::{
    AnswerChoice, AnswerSheet, Question, QuestionId, Quiz, QuizAvailability, QuizId,
    QuizResultRow, QuizSummary, TrainerQuiz,
};

use crate::vm::time_fmt::format_week;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub id: QuizId,
    pub title: String,
    pub week: Option<String>,
    pub deadline: String,
    pub status: String,
    pub can_take: bool,
}

impl From<&QuizSummary> for QuizCardVm {
    fn from(quiz: &QuizSummary) -> Self {
        let availability = quiz.availability();
        let status = match availability {
            QuizAvailability::Scored { score, total } => format!("Score: {score}/{total}"),
            QuizAvailability::Available => "Available".to_owned(),
            QuizAvailability::Locked => "Locked".to_owned(),
        };
        Self {
            id: quiz.id,
            title: quiz.title.clone(),
            week: format_week(quiz.week_number),
            deadline: quiz
                .deadline
                .clone()
                .unwrap_or_else(|| "No deadline".to_owned()),
            status,
            can_take: availability == QuizAvailability::Available,
        }
    }
}

#[must_use]
pub fn map_quiz_cards(quizzes: &[QuizSummary]) -> Vec<QuizCardVm> {
    quizzes.iter().map(QuizCardVm::from).collect()
}

/// One question while a quiz is being taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: QuestionId,
    pub number: usize,
    pub text: String,
    pub options: Vec<OptionVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub choice: AnswerChoice,
    pub label: String,
    pub selected: bool,
}

impl QuestionVm {
    fn new(number: usize, question: &Question, sheet: &AnswerSheet) -> Self {
        let selected = sheet.choice(question.id);
        Self {
            id: question.id,
            number,
            text: question.text.clone(),
            options: question
                .options()
                .into_iter()
                .map(|(choice, text)| OptionVm {
                    choice,
                    label: format!("{}. {text}", choice.letter()),
                    selected: selected == Some(choice),
                })
                .collect(),
        }
    }
}

#[must_use]
pub fn map_questions(quiz: &Quiz, sheet: &AnswerSheet) -> Vec<QuestionVm> {
    quiz.questions
        .iter()
        .enumerate()
        .map(|(index, question)| QuestionVm::new(index + 1, question, sheet))
        .collect()
}

/// Submit button caption; names how many questions are still open.
#[must_use]
pub fn submit_caption(sheet: &AnswerSheet) -> String {
    match sheet.unanswered() {
        0 => "Submit Quiz".to_owned(),
        1 => "1 question left".to_owned(),
        left => format!("{left} questions left"),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainerQuizRowVm {
    pub id: QuizId,
    pub title: String,
    pub week: String,
    pub deadline: String,
    pub questions: String,
}

impl From<&TrainerQuiz> for TrainerQuizRowVm {
    fn from(quiz: &TrainerQuiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title.clone(),
            week: format_week(quiz.week_number).unwrap_or_else(|| "-".to_owned()),
            deadline: quiz.deadline.clone().unwrap_or_else(|| "-".to_owned()),
            questions: format!("{} questions", quiz.question_count),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultVm {
    pub student: String,
    pub score: String,
    pub submitted_at: String,
}

impl From<&QuizResultRow> for QuizResultVm {
    fn from(row: &QuizResultRow) -> Self {
        Self {
            student: row.student_name.clone(),
            score: format!("{}/{}", row.score, row.total),
            submitted_at: row.submitted_at.clone().unwrap_or_else(|| "-".to_owned()),
        }
    }
}
