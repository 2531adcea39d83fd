use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use lms_core::model::{AnswerChoice, AnswerSheet, QuestionId, Quiz, QuizId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::state::{
    LoadError, ViewError, ViewState, follow_redirect, view_state_from_resource,
};
use crate::vm::{QuizCardVm, map_questions, map_quiz_cards, submit_caption};

#[derive(Clone, Debug, PartialEq)]
struct CourseQuizzesVm {
    course: String,
    cards: Vec<QuizCardVm>,
}

#[component]
pub fn StudentQuizzesView() -> Element {
    let ctx = use_context::<AppContext>();
    let student = ctx.student();
    let mut resource = use_resource(move || {
        let student = student.clone();
        async move {
            let groups = student.all_quizzes().await?;
            Ok::<_, ViewError>(
                groups
                    .iter()
                    .map(|group| CourseQuizzesVm {
                        course: group.course.name.clone(),
                        cards: map_quiz_cards(&group.quizzes),
                    })
                    .collect::<Vec<_>>(),
            )
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Quizzes" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(groups) => rsx! {
                    if groups.is_empty() {
                        p { class: "muted", "No quizzes yet." }
                    }
                    for group in groups {
                        section { class: "card",
                            h3 { "{group.course}" }
                            if group.cards.is_empty() {
                                p { class: "muted", "No quizzes for this course." }
                            }
                            ul {
                                for card in group.cards {
                                    QuizCard { card }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(error) => rsx! {
                    LoadError { error, on_retry: move |()| resource.restart() }
                },
            }
        }
    }
}

#[component]
fn QuizCard(card: QuizCardVm) -> Element {
    rsx! {
        li { class: "quiz",
            div {
                strong { "{card.title}" }
                if let Some(week) = card.week {
                    small { " {week}" }
                }
            }
            small { "Deadline: {card.deadline}" }
            span { class: "quiz__status", "{card.status}" }
            if card.can_take {
                Link { to: Route::Quiz { quiz_id: card.id.value() }, "Take Quiz" }
            }
        }
    }
}

#[component]
pub fn QuizView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let student = ctx.student();
    let resource = use_resource(move || {
        let student = student.clone();
        async move { Ok::<_, ViewError>(student.quiz(QuizId::new(quiz_id)).await?) }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(quiz) => rsx! {
                    QuizForm { quiz }
                },
                ViewState::Error(error) => rsx! {
                    LoadError { error }
                },
            }
        }
    }
}

#[component]
fn QuizForm(quiz: Quiz) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let sheet_quiz = quiz.clone();
    let mut sheet = use_signal(move || AnswerSheet::new(&sheet_quiz));
    let mut result = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

    let mut pick = move |question: QuestionId, choice: AnswerChoice| {
        if let Err(err) = sheet.write().choose(question, choice) {
            error.set(Some(err.to_string()));
        }
    };

    let submit = move |_| {
        let ctx = ctx.clone();
        let answers = sheet.read().clone();
        spawn(async move {
            match ctx.student().submit_quiz(&answers).await {
                Ok(score) => {
                    error.set(None);
                    result.set(Some(format!("You scored {}/{}", score.score, score.total)));
                }
                Err(err) => {
                    follow_redirect(&ctx, &navigator);
                    error.set(Some(ViewError::from(err).message().to_owned()));
                }
            }
        });
    };

    let questions = map_questions(&quiz, &sheet.read());
    let caption = submit_caption(&sheet.read());
    let complete = sheet.read().unanswered() == 0;

    rsx! {
        h2 { "{quiz.title}" }
        if let Some(message) = result() {
            div { class: "card quiz__result",
                p { "{message}" }
                Link { to: Route::StudentQuizzes {}, "Back to quizzes" }
            }
        } else {
            for question in questions {
                fieldset { class: "question", key: "{question.id}",
                    legend { "{question.number}. {question.text}" }
                    for option in question.options {
                        label { class: if option.selected { "option option--selected" } else { "option" },
                            input {
                                r#type: "radio",
                                name: "q-{question.id}",
                                checked: option.selected,
                                onchange: {
                                    let question_id = question.id;
                                    let choice = option.choice;
                                    move |_| pick(question_id, choice)
                                },
                            }
                            "{option.label}"
                        }
                    }
                }
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            button { r#type: "button", disabled: !complete, onclick: submit, "{caption}" }
        }
    }
}
