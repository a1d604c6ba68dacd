use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use learn_core::LearningConfig;
use learn_core::model::QuizPolicy;
use services::{AppServices, Clock};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPassThreshold { raw: String },
    InvalidDebounce { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPassThreshold { raw } => {
                write!(f, "invalid --pass-threshold value: {raw}")
            }
            ArgsError::InvalidDebounce { raw } => write!(f, "invalid --debounce-ms value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    pass_threshold: u32,
    debounce_ms: u64,
    learner_name: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  investlab [--db <sqlite_url>] [--pass-threshold <n>] [--debounce-ms <ms>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:investlab.sqlite3");
    eprintln!("  --pass-threshold {}", QuizPolicy::DEFAULT_PASS_THRESHOLD);
    eprintln!(
        "  --debounce-ms {}",
        LearningConfig::DEFAULT_PERSIST_DEBOUNCE.as_millis()
    );
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LEARN_DB_URL, LEARN_PASS_THRESHOLD, LEARN_PERSIST_DEBOUNCE_MS, LEARN_USER");
    eprintln!("  RUST_LOG (log filter, default warn)");
}

enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    /// Parse flags, falling back to `env` and then to built-in defaults.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut db_url = env("LEARN_DB_URL")
            .map_or_else(|| normalize_sqlite_url("investlab.sqlite3".into()), normalize_sqlite_url);
        let mut pass_threshold = env("LEARN_PASS_THRESHOLD")
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(QuizPolicy::DEFAULT_PASS_THRESHOLD);
        let mut debounce_ms = env("LEARN_PERSIST_DEBOUNCE_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or_else(|| {
                u64::try_from(LearningConfig::DEFAULT_PERSIST_DEBOUNCE.as_millis())
                    .unwrap_or(500)
            });
        let learner_name = env("LEARN_USER")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Learner".into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--pass-threshold" => {
                    let value = require_value(args, "--pass-threshold")?;
                    pass_threshold = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidPassThreshold { raw: value.clone() })?;
                }
                "--debounce-ms" => {
                    let value = require_value(args, "--debounce-ms")?;
                    debounce_ms = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDebounce { raw: value.clone() })?;
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self {
            db_url,
            pass_threshold,
            debounce_ms,
            learner_name,
        }))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
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
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
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

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    init_tracing();
    let config = LearningConfig::new(args.pass_threshold, Duration::from_millis(args.debounce_ms))?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let services =
        AppServices::new_sqlite(&args.db_url, config, &args.learner_name, Clock::System).await?;
    tracing::info!(db = %args.db_url, "starting desktop shell");

    let app: Arc<dyn UiApp> = Arc::new(services.clone());
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("InvestLab")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);

    services.progress().flush().await;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Parsed, ArgsError> {
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        let mut iter = args.iter().map(|arg| (*arg).to_owned());
        Args::parse(&mut iter, |key| {
            env.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    fn expect_run(parsed: Result<Parsed, ArgsError>) -> Args {
        match parsed {
            Ok(Parsed::Run(args)) => args,
            Ok(Parsed::Help) => panic!("unexpected help"),
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let args = expect_run(parse(&[], &[]));
        assert!(args.db_url.starts_with("sqlite://"));
        assert!(args.db_url.ends_with("investlab.sqlite3"));
        assert_eq!(args.pass_threshold, 4);
        assert_eq!(args.debounce_ms, 500);
        assert_eq!(args.learner_name, "Learner");
    }

    #[test]
    fn flags_override_environment() {
        let args = expect_run(parse(
            &["--pass-threshold", "5", "--db", "sqlite::memory:"],
            &[("LEARN_PASS_THRESHOLD", "3"), ("LEARN_PERSIST_DEBOUNCE_MS", "250"), ("LEARN_USER", "Ada")],
        ));
        assert_eq!(args.pass_threshold, 5);
        assert_eq!(args.debounce_ms, 250);
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(args.learner_name, "Ada");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse(&["--debounce-ms", "soon"], &[]),
            Err(ArgsError::InvalidDebounce { .. })
        ));
        assert!(matches!(
            parse(&["--db"], &[]),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
        assert!(matches!(parse(&["--verbose"], &[]), Err(ArgsError::UnknownArg(_))));
        assert!(matches!(parse(&["--help"], &[]), Ok(Parsed::Help)));
    }

    #[test]
    fn relative_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("sqlite:data/progress.sqlite3".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/progress.sqlite3"), "{url}");
    }
}
