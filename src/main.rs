//! Terminal front end: load player CSV files and print their rankings.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use player_ranking::ingestion::{TextEncoding, DEFAULT_ERROR_LOG};
use player_ranking::processing::{rank, RankedEntry};
use player_ranking::session::{LoadOutcome, RankingSession, SessionConfig};

/// Load player CSV files (name,level,score) and rank them by score.
#[derive(Debug, Parser)]
#[command(name = "player-ranking", version, about)]
struct Cli {
    /// CSV files to load, one after another
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Input encoding (latin-1, utf-8)
    #[arg(short, long, default_value = "latin-1")]
    encoding: TextEncoding,

    /// Error log path (cleared before every load)
    #[arg(long, default_value = DEFAULT_ERROR_LOG)]
    error_log: PathBuf,

    /// Print rankings as JSON
    #[arg(long)]
    json: bool,

    /// Print the error log after the last load
    #[arg(long)]
    show_log: bool,

    /// Echo rejected rows to stderr while loading
    #[arg(short, long)]
    verbose: bool,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR); RUST_LOG is used when absent
    #[arg(short = 'l', long = "log-level")]
    log_level: Option<String>,
}

#[derive(Serialize)]
struct JsonRanking<'a> {
    label: &'a str,
    rejected_rows: usize,
    ranking: Vec<RankedEntry<'a>>,
}

fn setup_logging(level: Option<&str>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        match level.parse::<log::LevelFilter>() {
            Ok(filter) => {
                builder.filter_level(filter);
            }
            Err(_) => eprintln!("Warning: Unknown log-level '{level}', using RUST_LOG"),
        }
    }
    builder.init();
}

fn print_table(entries: &[RankedEntry<'_>]) {
    println!("{:<8} {:<30} {:>10} {:>6}", "Posição", "Nome", "Pontuação", "Nível");
    for e in entries {
        let medal = e.medal.map(|m| format!(" {m:?}")).unwrap_or_default();
        println!(
            "{:<8} {:<30} {:>10} {:>6}{}",
            e.position_label(),
            e.record.name(),
            e.score_label(),
            e.record.level(),
            medal
        );
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref());

    let mut session = RankingSession::new(SessionConfig {
        encoding: cli.encoding,
        error_log: cli.error_log.clone(),
        echo_rejections: cli.verbose,
    });

    let mut failed = false;
    for file in &cli.files {
        let outcome = session.load(file);
        eprintln!("{}", outcome.message());

        match &outcome {
            LoadOutcome::Loaded {
                label,
                rejected_rows,
                ..
            } => {
                let Some(entry) = session.select(label) else {
                    continue;
                };
                let ranking = rank(&entry.records);
                if cli.json {
                    let doc = JsonRanking {
                        label,
                        rejected_rows: *rejected_rows,
                        ranking,
                    };
                    match serde_json::to_string_pretty(&doc) {
                        Ok(s) => println!("{s}"),
                        Err(e) => {
                            eprintln!("Erro ao gerar JSON: {e}");
                            failed = true;
                        }
                    }
                } else {
                    println!("== {label}");
                    print_table(&ranking);
                }
            }
            LoadOutcome::NothingValid { .. } => {}
            LoadOutcome::Failed(_) => failed = true,
        }
    }

    if session.history().len() > 1 {
        eprintln!("Histórico:");
        for label in session.history().labels() {
            eprintln!("  {label}");
        }
    }

    if cli.show_log {
        match session.error_log_text() {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Erro ao ler o log de erros: {e}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
