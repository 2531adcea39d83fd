use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use lms_core::model::{CourseId, InternshipId, Role};
use services::{Registration, RegistrationTarget, ResetRequestOutcome};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::state::ViewError;

fn role_from_value(value: &str) -> Role {
    value.parse().unwrap_or(Role::Student)
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(|| Role::Student);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    // A stored session skips the form.
    let auth = ctx.auth();
    use_effect(move || {
        let auth = auth.clone();
        spawn(async move {
            let stored = auth.current_session().await.ok().flatten();
            if let Some(credentials) = stored.filter(|c| c.role.can_sign_in()) {
                let _ = navigator.replace(Route::home_for(credentials.role));
            }
        });
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let ctx = ctx.clone();
        let typed_email = email.read().clone();
        let typed_password = password.read().clone();
        busy.set(true);
        spawn(async move {
            let outcome = ctx
                .auth()
                .login(&typed_email, &typed_password, role())
                .await;
            busy.set(false);
            match outcome {
                Ok(credentials) => {
                    error.set(None);
                    let _ = ctx.take_redirect();
                    let _ = navigator.replace(Route::home_for(credentials.role));
                }
                Err(err) => error.set(Some(ViewError::from(err).message().to_owned())),
            }
        });
    };

    rsx! {
        div { class: "auth",
            h2 { "Sign in" }
            form { onsubmit: submit,
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                select {
                    onchange: move |evt| role.set(role_from_value(&evt.value())),
                    for option_role in Role::SIGN_IN {
                        option {
                            value: option_role.as_str(),
                            selected: role() == option_role,
                            "{option_role.label()}"
                        }
                    }
                }
                if let Some(message) = error() {
                    p { class: "error", "{message}" }
                }
                button { r#type: "submit", disabled: busy(), "Login" }
            }
            p {
                Link { to: Route::ForgotPassword {}, "Forgot password?" }
                " · "
                Link { to: Route::Register {}, "Create an account" }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct SignUpOptions {
    courses: Vec<(u64, String)>,
    internships: Vec<(u64, String)>,
}

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(|| Role::Student);
    let mut target = use_signal(|| None::<u64>);
    let mut error = use_signal(|| None::<String>);

    let auth = ctx.auth();
    let options = use_resource(move || {
        let auth = auth.clone();
        async move {
            let courses = auth.courses().await.unwrap_or_else(|err| {
                tracing::warn!(error = %err, "course catalogue unavailable");
                Vec::new()
            });
            let internships = auth.internships().await.unwrap_or_else(|err| {
                tracing::warn!(error = %err, "internship catalogue unavailable");
                Vec::new()
            });
            SignUpOptions {
                courses: courses
                    .into_iter()
                    .map(|course| (course.id.value(), course.name))
                    .collect(),
                internships: internships
                    .into_iter()
                    .map(|internship| (internship.id.value(), internship.intern_name))
                    .collect(),
            }
        }
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let registration = Registration {
            name: name.read().clone(),
            email: email.read().clone(),
            password: password.read().clone(),
            role: role(),
            target: match (role(), target()) {
                (Role::Student, Some(id)) => Some(RegistrationTarget::Course(CourseId::new(id))),
                (Role::Intern, Some(id)) => {
                    Some(RegistrationTarget::Internship(InternshipId::new(id)))
                }
                _ => None,
            },
        };
        let ctx = ctx.clone();
        spawn(async move {
            match ctx.auth().register(&registration).await {
                Ok(message) => {
                    tracing::info!(%message, "account registered");
                    let _ = navigator.replace(Route::Login {});
                }
                Err(err) => error.set(Some(ViewError::from(err).message().to_owned())),
            }
        });
    };

    let choices = match (role(), options.read().as_ref()) {
        (Role::Student, Some(options)) => options.courses.clone(),
        (Role::Intern, Some(options)) => options.internships.clone(),
        _ => Vec::new(),
    };
    let choice_label = if role() == Role::Intern {
        "Select internship"
    } else {
        "Select course"
    };

    rsx! {
        div { class: "auth",
            h2 { "Register" }
            form { onsubmit: submit,
                input { placeholder: "Name", value: "{name}", oninput: move |evt| name.set(evt.value()) }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                select {
                    onchange: move |evt| {
                        role.set(role_from_value(&evt.value()));
                        target.set(None);
                    },
                    for option_role in [Role::Student, Role::Intern] {
                        option {
                            value: option_role.as_str(),
                            selected: role() == option_role,
                            "{option_role.label()}"
                        }
                    }
                }
                select {
                    onchange: move |evt| target.set(evt.value().parse().ok()),
                    option { value: "", "{choice_label}" }
                    for (id, label) in choices {
                        option { value: "{id}", selected: target() == Some(id), "{label}" }
                    }
                }
                if let Some(message) = error() {
                    p { class: "error", "{message}" }
                }
                button { r#type: "submit", "Register" }
            }
            p {
                Link { to: Route::Login {}, "Already registered? Sign in" }
            }
        }
    }
}

#[component]
pub fn ForgotPasswordView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut email = use_signal(String::new);
    let mut outcome = use_signal(|| None::<Result<ResetRequestOutcome, String>>);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let ctx = ctx.clone();
        let typed_email = email.read().clone();
        spawn(async move {
            let result = ctx
                .auth()
                .forgot_password(&typed_email)
                .await
                .map_err(|err| ViewError::from(err).message().to_owned());
            outcome.set(Some(result));
        });
    };

    rsx! {
        div { class: "auth",
            h2 { "Forgot password" }
            form { onsubmit: submit,
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                button { r#type: "submit", "Send reset link" }
            }
            match outcome() {
                Some(Ok(ResetRequestOutcome::LinkSent)) => rsx! {
                    p { class: "flash", "Check your inbox for a reset link." }
                },
                Some(Ok(ResetRequestOutcome::NotRegistered)) => rsx! {
                    p { class: "error",
                        "Email not registered. "
                        Link { to: Route::Register {}, "Register instead" }
                    }
                },
                Some(Err(message)) => rsx! {
                    p { class: "error", "{message}" }
                },
                None => rsx! {},
            }
            p {
                Link { to: Route::Login {}, "Back to sign in" }
            }
        }
    }
}

#[component]
pub fn ResetPasswordView(token: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let ctx = ctx.clone();
        let token = token.clone();
        let typed_password = password.read().clone();
        let typed_confirm = confirm.read().clone();
        spawn(async move {
            let result = ctx
                .auth()
                .reset_password(&token, &typed_password, &typed_confirm)
                .await;
            match result {
                Ok(()) => {
                    let _ = navigator.replace(Route::Login {});
                }
                Err(err) => error.set(Some(ViewError::from(err).message().to_owned())),
            }
        });
    };

    rsx! {
        div { class: "auth",
            h2 { "Reset password" }
            form { onsubmit: submit,
                input {
                    r#type: "password",
                    placeholder: "New password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: "{confirm}",
                    oninput: move |evt| confirm.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "error", "{message}" }
                }
                button { r#type: "submit", "Reset password" }
            }
        }
    }
}
