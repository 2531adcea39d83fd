use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use lms_core::model::Role;
use services::DEFAULT_API_BASE;

pub const DEFAULT_DB_URL: &str = "sqlite://lms-session.sqlite3";

#[derive(Parser, Debug, Clone)]
#[command(name = "lms")]
#[command(version)]
#[command(about = "Desktop and command-line client for the LMS backend", long_about = None)]
pub struct Cli {
    /// Backend base url; a trailing `/api` is accepted
    #[arg(long, global = true, env = "LMS_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Where the signed-in session is kept
    #[arg(long = "db", global = true, env = "LMS_DB_URL", default_value = DEFAULT_DB_URL)]
    pub db_url: String,

    /// Defaults to `ui`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Open the desktop client
    Ui,
    /// Sign in and store the session
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// List work items with their unlock state
    Tasks,
    /// Upload a deliverable
    Submit(SubmitArgs),
    /// Show certificate eligibility, optionally opening one
    Certificates(CertificateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "LMS_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long, value_parser = parse_role, default_value = "student")]
    pub role: Role,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    /// Student weekly assignment
    Assignment,
    /// Student task attached to a course
    CourseTask,
    /// Intern task
    Task,
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[arg(value_enum)]
    pub kind: SubmitKind,

    /// Assignment or task id
    pub id: u64,

    /// File to upload (pdf, office documents, txt or zip)
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CertificateArgs {
    /// Course id (students) or internship id (interns) to open
    #[arg(long)]
    pub open: Option<u64>,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    let role = raw.parse::<Role>().map_err(|err| err.to_string())?;
    if role.can_sign_in() {
        Ok(role)
    } else {
        Err(format!("{} accounts cannot sign in here", role.label()))
    }
}
