//! Headless subcommands over the same services the desktop client uses.

use lms_core::certificate::CertificateAffordance;
use lms_core::model::{AssignmentId, CourseId, InternshipId, Role, TaskId};
use services::{AppServices, Clock, GuardError, Navigator, Notifier, Page, ServiceError};
use ui::vm::{CertificatePanelVm, CertificateTarget, CourseSectionVm, group_intern_tasks};

use crate::cli::{CertificateArgs, Command, LoginArgs, SubmitArgs, SubmitKind};

const LOGIN_HINT: &str = "Session expired or missing. Run `lms login` first.";

/// Tells the terminal user where the desktop client would have gone.
pub struct ConsoleNavigator {
    announce_login: bool,
}

impl ConsoleNavigator {
    /// `lms logout` lands on the login page on purpose and stays quiet.
    #[must_use]
    pub fn for_command(command: &Command) -> Self {
        Self {
            announce_login: !matches!(command, Command::Logout),
        }
    }

    fn hint(&self, page: Page) -> Option<&'static str> {
        match page {
            Page::Login if self.announce_login => Some(LOGIN_HINT),
            Page::Login | Page::Dashboard(_) => None,
        }
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, page: Page) {
        match self.hint(page) {
            Some(hint) => eprintln!("{hint}"),
            None => tracing::debug!(?page, "redirect ignored"),
        }
    }
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn celebrate(&self, message: &str) {
        println!("{message}");
    }
}

pub async fn login(services: &AppServices, args: &LoginArgs) -> Result<(), ServiceError> {
    let credentials = services
        .auth()
        .login(&args.email, &args.password, args.role)
        .await?;
    println!(
        "Signed in as {} ({})",
        credentials.name,
        credentials.role.label()
    );
    Ok(())
}

pub async fn logout(services: &AppServices) -> Result<(), ServiceError> {
    services.auth().logout().await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(services: &AppServices) -> Result<(), ServiceError> {
    match services.auth().current_session().await? {
        Some(credentials) => println!(
            "{} ({})",
            credentials.name,
            credentials.role.label()
        ),
        None => println!("Not signed in"),
    }
    Ok(())
}

async fn signed_in_role(services: &AppServices) -> Result<Role, ServiceError> {
    services
        .guard()
        .current()
        .await?
        .map(|credentials| credentials.role)
        .ok_or(ServiceError::Guard(GuardError::MissingSession))
}

pub async fn tasks(services: &AppServices, clock: Clock) -> Result<(), ServiceError> {
    let today = clock.today();
    match signed_in_role(services).await? {
        Role::Student => {
            let dashboard = services.student().dashboard().await?;
            for course in &dashboard.courses {
                let section = CourseSectionVm::new(course, today);
                println!("{} ({}%)", section.name, section.percent);
                for card in &section.assignments {
                    println!(
                        "  [{}] {} - {}{}",
                        card.badge.label,
                        card.heading,
                        card.subtitle,
                        action_suffix(card.action.as_ref().map(|action| action.label)),
                    );
                }
                for task in &section.tasks {
                    println!(
                        "  [{}] task {} {} - {}{}",
                        task.badge.label,
                        task.id,
                        task.title,
                        task.due,
                        action_suffix(task.action.as_ref().map(|action| action.label)),
                    );
                }
            }
        }
        Role::Intern => {
            let tasks = services.intern().tasks().await?;
            for group in group_intern_tasks(&tasks, today) {
                println!("{}", group.name);
                for card in &group.cards {
                    println!(
                        "  [{}] {} {} - {}{}",
                        card.badge.label,
                        card.id,
                        card.title,
                        card.due,
                        action_suffix(card.action.as_ref().map(|action| action.label)),
                    );
                }
            }
        }
        role => println!("No task list for {} accounts", role.label()),
    }
    Ok(())
}

fn action_suffix(label: Option<&str>) -> String {
    label.map_or_else(String::new, |label| format!(" -> {label}"))
}

pub async fn submit(services: &AppServices, args: &SubmitArgs) -> Result<(), ServiceError> {
    let submissions = services.submissions();
    let receipt = match args.kind {
        SubmitKind::Assignment => {
            submissions
                .submit_assignment(AssignmentId::new(args.id), &args.file)
                .await?
        }
        SubmitKind::CourseTask => {
            submissions
                .submit_course_task(TaskId::new(args.id), &args.file)
                .await?
        }
        SubmitKind::Task => {
            submissions
                .complete_task(TaskId::new(args.id), &args.file)
                .await?
        }
    };
    println!("{}", receipt.message);
    Ok(())
}

pub async fn certificates(
    services: &AppServices,
    args: &CertificateArgs,
) -> Result<(), ServiceError> {
    let certificates = services.certificates();
    let panel = match signed_in_role(services).await? {
        Role::Student => {
            let dashboard = services.student().dashboard().await?;
            CertificatePanelVm::for_courses(&dashboard.courses)
        }
        Role::Intern => {
            let enrollments = services.intern().enrollments().await?;
            CertificatePanelVm::for_enrollments(&enrollments)
        }
        role => {
            println!("No certificates for {} accounts", role.label());
            return Ok(());
        }
    };
    certificates
        .celebrate_if_unlocked(panel.is_unlocked())
        .await?;

    let entries = match panel {
        CertificatePanelVm::Hidden => {
            println!("No enrollments yet");
            return Ok(());
        }
        CertificatePanelVm::Locked { hint } => {
            println!("{hint}");
            return Ok(());
        }
        CertificatePanelVm::Unlocked(entries) => entries,
    };

    for entry in &entries {
        let id = match entry.target {
            Some(CertificateTarget::Course(id)) => id.to_string(),
            Some(CertificateTarget::Internship(id)) => id.to_string(),
            None => "-".to_owned(),
        };
        println!("{id}\t{}\t{}", entry.name, entry.button_label());
    }

    let Some(wanted) = args.open else {
        return Ok(());
    };
    let chosen = entries.iter().find(|entry| match entry.target {
        Some(CertificateTarget::Course(id)) => id == CourseId::new(wanted),
        Some(CertificateTarget::Internship(id)) => id == InternshipId::new(wanted),
        None => false,
    });
    let url = match chosen.and_then(|entry| entry.target.map(|target| (entry, target))) {
        Some((entry, CertificateTarget::Course(id))) => {
            let existing = match &entry.affordance {
                CertificateAffordance::Download { url } => Some(url.as_str()),
                CertificateAffordance::Generate => None,
            };
            certificates.open_course_certificate(id, existing).await?
        }
        Some((_, CertificateTarget::Internship(id))) => {
            certificates.open_internship_certificate(Some(id)).await?
        }
        None => {
            return Err(ServiceError::Validation(format!(
                "No unlocked certificate with id {wanted}"
            )));
        }
    };
    println!("Opened {url}");
    Ok(())
}
