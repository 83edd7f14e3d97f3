use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use exam_core::Clock;
use services::{AppServices, DEFAULT_QUESTION_LIMIT, PdfQuestionSource, QuestionSource};
use storage::Storage;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLimit { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--stats <file>] [--pdf <file>]... [--limit <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --stats stats.json");
    eprintln!("  --limit {DEFAULT_QUESTION_LIMIT}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAM_STATS_PATH, EXAM_QUESTION_LIMIT");
}

struct Args {
    stats_path: PathBuf,
    pdf_paths: Vec<PathBuf>,
    question_limit: usize,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut stats_path = std::env::var("EXAM_STATS_PATH")
            .ok()
            .map_or_else(|| PathBuf::from("stats.json"), PathBuf::from);
        let mut question_limit = std::env::var("EXAM_QUESTION_LIMIT")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(DEFAULT_QUESTION_LIMIT);
        let mut pdf_paths = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--stats" => {
                    let value = require_value(args, "--stats")?;
                    stats_path = PathBuf::from(value);
                }
                "--pdf" => {
                    let value = require_value(args, "--pdf")?;
                    pdf_paths.push(PathBuf::from(value));
                }
                "--limit" => {
                    let value = require_value(args, "--limit")?;
                    question_limit = value
                        .parse::<usize>()
                        .ok()
                        .filter(|&n| n > 0)
                        .ok_or(ArgsError::InvalidLimit { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            stats_path,
            pdf_paths,
            question_limit,
        })
    }
}

struct DesktopApp {
    services: AppServices,
    sources: Vec<Arc<dyn QuestionSource>>,
}

impl UiApp for DesktopApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn sources(&self) -> Vec<Arc<dyn QuestionSource>> {
        self.sources.clone()
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open the JSON stats store in the binary glue so services stay pure.
    let storage = Storage::json_file(args.stats_path.clone());
    let services = AppServices::with_storage(Clock::system(), storage);
    let sources: Vec<Arc<dyn QuestionSource>> = args
        .pdf_paths
        .iter()
        .map(|path| {
            Arc::new(PdfQuestionSource::open(path).with_limit(args.question_limit))
                as Arc<dyn QuestionSource>
        })
        .collect();
    tracing::info!(
        stats = %args.stats_path.display(),
        sources = sources.len(),
        "starting exam trainer"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services, sources });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Exam Trainer")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
