use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use lms_core::model::Role;
use services::Page;

use crate::context::AppContext;
use crate::views::{
    CourseCatalogueView, ForgotPasswordView, InternView, LoginView, QuizResultsView, QuizView,
    RegisterView, ResetPasswordView, ResourcesView, StudentQuizzesView, StudentView,
    TrainerCourseView, TrainerInternshipView, TrainerView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", LoginView)] Login {},
    #[route("/register", RegisterView)] Register {},
    #[route("/forgot-password", ForgotPasswordView)] ForgotPassword {},
    #[route("/reset-password/:token", ResetPasswordView)] ResetPassword { token: String },

    #[layout(Shell)]
        #[route("/student", StudentView)] Student {},
        #[route("/student/courses", CourseCatalogueView)] CourseCatalogue {},
        #[route("/student/quizzes", StudentQuizzesView)] StudentQuizzes {},
        #[route("/student/quiz/:quiz_id", QuizView)] Quiz { quiz_id: u64 },
        #[route("/student/course/:course_id/resources", ResourcesView)] Resources { course_id: u64 },
        #[route("/intern", InternView)] Intern {},
        #[route("/trainer", TrainerView)] Trainer {},
        #[route("/trainer/course/:course_id", TrainerCourseView)] TrainerCourse { course_id: u64 },
        #[route("/trainer/internship/:internship_id", TrainerInternshipView)] TrainerInternship { internship_id: u64 },
        #[route("/trainer/quiz/:quiz_id/results", QuizResultsView)] QuizResults { quiz_id: u64 },
}

impl Route {
    /// Landing page for a signed-in role.
    #[must_use]
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Student => Route::Student {},
            Role::Intern => Route::Intern {},
            Role::Trainer | Role::Admin => Route::Trainer {},
        }
    }

    #[must_use]
    pub fn for_page(page: Page) -> Self {
        match page {
            Page::Login => Route::Login {},
            Page::Dashboard(role) => Route::home_for(role),
        }
    }
}

#[component]
fn Shell() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();
    let session = use_resource(move || {
        let auth = auth.clone();
        async move { auth.current_session().await.ok().flatten() }
    });

    let logout = {
        let ctx = ctx.clone();
        move |_| {
            let ctx = ctx.clone();
            spawn(async move {
                if let Err(err) = ctx.auth().logout().await {
                    tracing::warn!(error = %err, "logout failed");
                }
                let _ = ctx.take_redirect();
                let _ = navigator.replace(Route::Login {});
            });
        }
    };

    let credentials = session.read().clone().flatten();
    rsx! {
        div { class: "app",
            nav { class: "sidebar",
                h1 { "LMS" }
                if let Some(credentials) = credentials {
                    div { class: "sidebar__user",
                        span { class: "avatar", "{credentials.initial()}" }
                        span { "{credentials.name}" }
                        span { class: "sidebar__role", "{credentials.role.label()}" }
                    }
                    ul {
                        match credentials.role {
                            Role::Student => rsx! {
                                li { Link { to: Route::Student {}, "Dashboard" } }
                                li { Link { to: Route::CourseCatalogue {}, "Courses" } }
                                li { Link { to: Route::StudentQuizzes {}, "Quizzes" } }
                            },
                            Role::Intern => rsx! {
                                li { Link { to: Route::Intern {}, "Dashboard" } }
                            },
                            Role::Trainer | Role::Admin => rsx! {
                                li { Link { to: Route::Trainer {}, "Dashboard" } }
                            },
                        }
                    }
                }
                button { class: "sidebar__logout", r#type: "button", onclick: logout, "Logout" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
