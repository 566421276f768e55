use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fretlog_core::history::{DEFAULT_RECENT, HistoryLimit};
use fretlog_core::model::{AssignmentCatalog, DateKey};
use services::{Clock, PracticeService, SnapshotError, export_snapshot, read_snapshot};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    MissingOperand { what: &'static str },
    UnexpectedOperand(String),
    InvalidAssignment { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            ArgsError::MissingOperand { what } => write!(f, "missing {what}"),
            ArgsError::UnexpectedOperand(arg) => write!(f, "unexpected argument: {arg}"),
            ArgsError::InvalidAssignment { raw } => {
                write!(f, "invalid assignment number: {raw} (expected 1-based position)")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  fretlog [show]          show assignments and stats for a date");
    eprintln!("  fretlog check <n>       mark assignment n completed");
    eprintln!("  fretlog uncheck <n>     mark assignment n not completed");
    eprintln!("  fretlog memo <n> <text> attach a memo to assignment n");
    eprintln!("  fretlog stats           completion tally for a date");
    eprintln!("  fretlog history [--all] recent practice days");
    eprintln!("  fretlog export [--dir <path>]");
    eprintln!("  fretlog import <file> [--yes]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --date YYYY-MM-DD  act on a past date (default: today)");
    eprintln!("  --db <sqlite_url>  database location");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://fretlog.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FRETLOG_DB_URL");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Show,
    Check { number: usize },
    Uncheck { number: usize },
    Memo { number: usize, text: String },
    Stats,
    History { all: bool },
    Export { dir: PathBuf },
    Import { file: PathBuf, assume_yes: bool },
}

struct Args {
    db_url: String,
    date: Option<String>,
    command: Command,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_assignment_number(raw: &str) -> Result<usize, ArgsError> {
    raw.parse::<usize>()
        .ok()
        .filter(|&number| number >= 1)
        .ok_or_else(|| ArgsError::InvalidAssignment { raw: raw.to_owned() })
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("FRETLOG_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://fretlog.sqlite3".into(), normalize_sqlite_url);
        let mut date = None;
        let mut dir: Option<String> = None;
        let mut all = false;
        let mut assume_yes = false;
        let mut name: Option<String> = None;
        let mut operands: Vec<String> = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--date" => date = Some(require_value(args, "--date")?),
                "--dir" => dir = Some(require_value(args, "--dir")?),
                "--all" => all = true,
                "--yes" | "-y" => assume_yes = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => {
                    if name.is_none() {
                        name = Some(arg);
                    } else {
                        operands.push(arg);
                    }
                }
            }
        }

        let command = Self::build_command(name.as_deref().unwrap_or("show"), operands, dir, all, assume_yes)?;
        Ok(Self { db_url, date, command })
    }

    fn build_command(
        name: &str,
        operands: Vec<String>,
        dir: Option<String>,
        all: bool,
        assume_yes: bool,
    ) -> Result<Command, ArgsError> {
        let mut operands = operands.into_iter();
        let command = match name {
            "show" => Command::Show,
            "check" => Command::Check {
                number: parse_assignment_number(
                    &operands
                        .next()
                        .ok_or(ArgsError::MissingOperand { what: "assignment number" })?,
                )?,
            },
            "uncheck" => Command::Uncheck {
                number: parse_assignment_number(
                    &operands
                        .next()
                        .ok_or(ArgsError::MissingOperand { what: "assignment number" })?,
                )?,
            },
            "memo" => {
                let number = parse_assignment_number(
                    &operands
                        .next()
                        .ok_or(ArgsError::MissingOperand { what: "assignment number" })?,
                )?;
                // Remaining words form the memo; no words clears it.
                let text = operands.collect::<Vec<_>>().join(" ");
                return Ok(Command::Memo { number, text });
            }
            "stats" => Command::Stats,
            "history" => Command::History { all },
            "export" => Command::Export {
                dir: PathBuf::from(dir.unwrap_or_else(|| ".".into())),
            },
            "import" => Command::Import {
                file: PathBuf::from(
                    operands
                        .next()
                        .ok_or(ArgsError::MissingOperand { what: "snapshot file" })?,
                ),
                assume_yes,
            },
            other => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };

        if let Some(extra) = operands.next() {
            return Err(ArgsError::UnexpectedOperand(extra));
        }
        Ok(command)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed.as_str());
    let path = Path::new(path_str);
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

    let path = Path::new(path);
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

fn render_day(service: &PracticeService, date: &DateKey) {
    let day = service.day(date);
    println!("Practice for {date}");
    for (index, assignment) in service.catalog().iter().enumerate() {
        let mark = if day.is_completed(index) { "x" } else { " " };
        println!("  [{mark}] {}. {assignment}", index + 1);
        let memo = day.memo(index);
        if !memo.is_empty() {
            println!("         memo: {memo}");
        }
    }
    render_stats(service, date);
}

fn render_stats(service: &PracticeService, date: &DateKey) {
    let stats = service.stats(date);
    println!(
        "{} of {} completed ({}%)",
        stats.completed, stats.total, stats.percent
    );
}

fn render_history(service: &PracticeService, all: bool) {
    let limit = if all { HistoryLimit::All } else { HistoryLimit::default() };
    let summary = service.history(limit);

    if summary.never_recorded() {
        println!("No practice recorded yet.");
        return;
    }
    if summary.all_filtered() {
        println!("Days were recorded, but none have completions or memos.");
        return;
    }

    for entry in summary.entries() {
        println!(
            "{}  {} / {} completed",
            entry.date, entry.completed_count, entry.total_count
        );
    }
    if !all && summary.total_dates() > DEFAULT_RECENT {
        println!(
            "... use --all to see everything ({} day(s) recorded)",
            summary.total_dates()
        );
    }
}

fn confirm(prompt: &str) -> Result<bool, std::io::Error> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

async fn run_import(
    service: &mut PracticeService,
    date: &DateKey,
    file: &Path,
    assume_yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let preview = match read_snapshot(file).await {
        Ok(preview) => preview,
        Err(err @ (SnapshotError::Malformed(_) | SnapshotError::Io(_))) => {
            eprintln!("import failed: {err}");
            eprintln!("Existing data is untouched.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    println!("Snapshot contains {} recorded day(s).", preview.date_count());
    if !assume_yes && !confirm("Overwrite existing data with the snapshot? [y/N] ")? {
        println!("Import cancelled; existing data untouched.");
        return Ok(());
    }

    service.replace_all(preview.into_log()).await?;
    println!("Import complete.");
    render_stats(service, date);
    render_history(service, false);
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;

    let clock = Clock::default_clock();
    let catalog = AssignmentCatalog::default_guitar();
    let mut service = PracticeService::load(catalog, Arc::clone(&storage.practice_log)).await?;

    let date = match args.date.as_deref() {
        Some(raw) => DateKey::parse(raw, clock.today())?,
        None => DateKey::from_date(clock.today()),
    };

    match args.command {
        Command::Show => render_day(&service, &date),
        Command::Check { number } => {
            service.set_completion(&date, number - 1, true).await?;
            render_day(&service, &date);
        }
        Command::Uncheck { number } => {
            service.set_completion(&date, number - 1, false).await?;
            render_day(&service, &date);
        }
        Command::Memo { number, text } => {
            service.set_memo(&date, number - 1, text).await?;
            render_day(&service, &date);
        }
        Command::Stats => render_stats(&service, &date),
        Command::History { all } => render_history(&service, all),
        Command::Export { dir } => {
            let path = export_snapshot(service.log(), &dir, &clock).await?;
            println!(
                "Exported {} recorded day(s) to {}",
                service.log().date_count(),
                path.display()
            );
        }
        Command::Import { file, assume_yes } => {
            run_import(&mut service, &date, &file, assume_yes).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
