mod cli;
mod commands;
mod desktop;

use std::fmt;
use std::sync::Arc;

use clap::Parser;
use services::{ApiConfig, AppServices, Clock, FileOpener, Platform};
use storage::repository::Storage;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{DesktopLinkOpener, NoticeBoard, PendingRedirect};

use crate::cli::{Cli, Command};
use crate::commands::{ConsoleNavigator, ConsoleNotifier};
use crate::desktop::DesktopApp;

#[derive(Debug)]
struct InvalidDbUrl(String);

impl fmt::Display for InvalidDbUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid --db value: {}", self.0)
    }
}

impl std::error::Error for InvalidDbUrl {}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| InvalidDbUrl(db_url.to_owned()))?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(InvalidDbUrl(db_url.to_owned()).into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ApiConfig::new(&cli.api_base)?;

    // Session storage lives in the binary glue so the services stay backend-agnostic.
    let db_url = normalize_sqlite_url(&cli.db_url);
    prepare_sqlite_file(&db_url)?;
    let storage = Storage::sqlite(&db_url).await?;
    tracing::debug!(%db_url, api = %config.base(), "storage ready");

    let clock = Clock::default_clock();
    let opener: Arc<dyn FileOpener> = Arc::new(DesktopLinkOpener);

    let Some(command) = cli.command.filter(|command| !matches!(command, Command::Ui)) else {
        let redirects = Arc::new(PendingRedirect::default());
        let notices = Arc::new(NoticeBoard::default());
        let platform = Platform {
            navigator: redirects.clone(),
            notifier: notices.clone(),
            opener: Arc::clone(&opener),
        };
        let services = AppServices::new(config, storage, clock, platform);
        desktop::launch(DesktopApp {
            services,
            clock,
            opener,
            redirects,
            notices,
        });
        return Ok(());
    };

    let platform = Platform {
        navigator: Arc::new(ConsoleNavigator::for_command(&command)),
        notifier: Arc::new(ConsoleNotifier),
        opener,
    };
    let services = AppServices::new(config, storage, clock, platform);
    match command {
        Command::Ui => {}
        Command::Login(args) => commands::login(&services, &args).await?,
        Command::Logout => commands::logout(&services).await?,
        Command::Whoami => commands::whoami(&services).await?,
        Command::Tasks => commands::tasks(&services, clock).await?,
        Command::Submit(args) => commands::submit(&services, &args).await?,
        Command::Certificates(args) => commands::certificates(&services, &args).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_explicit_urls() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/lms.sqlite3"),
            "sqlite:///tmp/lms.sqlite3"
        );
    }

    #[test]
    fn normalize_makes_bare_paths_absolute() {
        let url = normalize_sqlite_url("sqlite:session.sqlite3");
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("/session.sqlite3"), "{url}");
    }

    #[test]
    fn prepare_rejects_non_sqlite_urls() {
        assert!(prepare_sqlite_file("postgres://localhost/lms").is_err());
        assert!(prepare_sqlite_file("sqlite::memory:").is_ok());
    }
}
