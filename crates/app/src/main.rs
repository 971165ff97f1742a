use std::path::PathBuf;
use std::sync::Arc;

use audit_core::time::Clock;
use clap::{Parser, Subcommand};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, AuditController, ReferenceSources};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;
use ui::{App, SharedController, UiApp, build_app_context};

#[derive(Debug, Parser)]
#[command(name = "skills-audit", about = "Walk a household through an age-graded skills checklist")]
struct Cli {
    /// `SQLite` database holding saved progress.
    #[arg(
        long = "db",
        env = "SKILLS_AUDIT_DB_URL",
        default_value = "sqlite://skills-audit.sqlite3",
        global = true
    )]
    db_url: String,

    /// Catalog JSON to use instead of the bundled one.
    #[arg(long, env = "SKILLS_AUDIT_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// Roster JSON to use instead of the bundled one.
    #[arg(long, env = "SKILLS_AUDIT_ROSTER", global = true)]
    roster: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Launch the desktop audit (default).
    Ui,
    /// Print completion statistics for the saved audit.
    Summary,
    /// Discard all saved progress.
    Reset,
}

#[derive(Debug)]
struct InvalidDbUrl {
    raw: String,
}

impl std::fmt::Display for InvalidDbUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid --db value: {}", self.raw)
    }
}

impl std::error::Error for InvalidDbUrl {}

struct DesktopApp {
    controller: SharedController,
    db_url: String,
}

impl UiApp for DesktopApp {
    fn controller(&self) -> SharedController {
        Arc::clone(&self.controller)
    }

    fn storage_label(&self) -> String {
        self.db_url.clone()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
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
        .ok_or_else(|| InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(InvalidDbUrl {
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

/// Plain-text report for the `summary` command.
fn summary_lines(controller: &AuditController) -> Vec<String> {
    let session = controller.session();
    let overall = controller.overall_stats();
    let mut lines = vec![format!(
        "Overall: {}/{} skills reviewed",
        overall.completed, overall.total
    )];

    for (index, group) in session.catalog().groups().iter().enumerate() {
        if let Some(stats) = session.group_stats(index) {
            lines.push(format!(
                "  Age {}: {}/{}",
                group.key(),
                stats.completed,
                stats.total
            ));
        }
    }

    for tally in &overall.by_person {
        lines.push(format!("  {}: {} skills", tally.person, tally.skills));
    }

    lines.push(match controller.last_saved_at() {
        Some(at) => format!("Last saved {}", at.format("%Y-%m-%d %H:%M UTC")),
        None => "Nothing saved yet".to_string(),
    });
    lines
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    if cli.db_url.trim().is_empty() {
        return Err(InvalidDbUrl { raw: cli.db_url }.into());
    }
    let db_url = normalize_sqlite_url(&cli.db_url);

    // Open and migrate SQLite here so core and services stay free of filesystem concerns.
    prepare_sqlite_file(&db_url)?;
    let sources = ReferenceSources {
        catalog: cli.catalog,
        roster: cli.roster,
    };
    let services = AppServices::new_sqlite(&db_url, Clock::system(), &sources).await?;
    tracing::info!(db = %db_url, "storage ready");

    match cli.command.unwrap_or(Command::Ui) {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                controller: Arc::new(Mutex::new(services.into_controller())),
                db_url,
            });
            let context = build_app_context(&app);

            // Dioxus/tao can default to always-on-top in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Skills Audit")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Summary => {
            for line in summary_lines(services.controller()) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Reset => {
            let mut controller = services.into_controller();
            controller.reset().await?;
            println!("Saved progress cleared ({db_url})");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // Binary glue: print once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
