use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::Clock;
use services::{AppServices, AppSettingsService, QuizService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "quizify=info,services=info,ui=info";

/// Generate multiple-choice quizzes from PDF documents.
#[derive(Parser, Debug)]
#[command(name = "quizify", version, about)]
struct Args {
    /// SQLite database holding the document collection and AI settings.
    #[arg(long = "db", env = "QUIZIFY_DB_URL", default_value = "sqlite://quizify.sqlite3")]
    db_url: String,

    /// Name of the document collection to build and query.
    #[arg(long, env = "QUIZIFY_COLLECTION", default_value = "quiz_documents")]
    collection: String,
}

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
    EmptyCollection,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::EmptyCollection => write!(f, "--collection cannot be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn quiz_service(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn app_settings(&self) -> Arc<AppSettingsService> {
        self.services.app_settings()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn normalize_sqlite_url(raw: &str) -> Result<String, ArgsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: raw.to_string(),
        });
    }
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return Ok(trimmed.to_string());
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    Ok(format!("sqlite://{}", absolute.display()))
}

/// Create the directory holding the database; `sqlx` creates the file.
fn ensure_db_dir(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }
    let path = db_url
        .strip_prefix("sqlite://")
        .and_then(|rest| rest.split('?').next())
        .filter(|path| !path.is_empty())
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let db_url = normalize_sqlite_url(&args.db_url)?;
    let collection = args.collection.trim();
    if collection.is_empty() {
        return Err(ArgsError::EmptyCollection.into());
    }

    ensure_db_dir(&db_url)?;
    let services = AppServices::new_sqlite(&db_url, collection, Clock::system()).await?;
    tracing::info!(db = %db_url, collection, "storage ready");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quizify")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();
    init_tracing();
    let args = Args::parse();

    if let Err(err) = run(args).await {
        tracing::error!(error = %err, "quizify failed to start");
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_explicit_sqlite_urls() {
        assert_eq!(
            normalize_sqlite_url("sqlite://data/quizify.sqlite3").unwrap(),
            "sqlite://data/quizify.sqlite3"
        );
        assert_eq!(normalize_sqlite_url("sqlite::memory:").unwrap(), "sqlite::memory:");
    }

    #[test]
    fn bare_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("/tmp/quizify.sqlite3").unwrap();
        assert_eq!(url, "sqlite:///tmp/quizify.sqlite3");

        let relative = normalize_sqlite_url("sqlite:quizify.sqlite3").unwrap();
        assert!(relative.starts_with("sqlite:///"), "{relative}");
        assert!(relative.ends_with("/quizify.sqlite3"), "{relative}");
    }

    #[test]
    fn blank_url_is_rejected() {
        assert!(matches!(
            normalize_sqlite_url("   "),
            Err(ArgsError::InvalidDbUrl { .. })
        ));
    }

    #[test]
    fn db_dir_needs_a_file_url() {
        assert!(ensure_db_dir("postgres://localhost/db").is_err());
        assert!(ensure_db_dir("sqlite://").is_err());
        assert!(ensure_db_dir("sqlite::memory:").is_ok());
    }

    #[test]
    fn args_have_defaults() {
        let args = Args::try_parse_from(["quizify"]).unwrap();
        if std::env::var("QUIZIFY_DB_URL").is_err() {
            assert_eq!(args.db_url, "sqlite://quizify.sqlite3");
        }
        if std::env::var("QUIZIFY_COLLECTION").is_err() {
            assert_eq!(args.collection, "quiz_documents");
        }

        let args = Args::try_parse_from(["quizify", "--db", "sqlite::memory:", "--collection", "biology"])
            .unwrap();
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(args.collection, "biology");
    }
}
