//! Load controller for a ranking front end.
//!
//! [`RankingSession`] implements the "load a file" action the way a front end needs it: clear
//! the previous error log, ingest once, keep non-empty results in the [`RankingHistory`], and
//! turn the outcome into a user-facing message. Widgets, file pickers and the log viewer window
//! are left to the caller.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;

use crate::error::IngestionError;
use crate::history::{HistoryEntry, RankingHistory};
use crate::ingestion::{
    ingest_from_path, CompositeObserver, ErrorLogObserver, IngestionObserver, IngestionOptions,
    StdErrObserver, TextEncoding, DEFAULT_ERROR_LOG,
};
use crate::processing::{rank, RankedEntry};

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Encoding used for every load.
    pub encoding: TextEncoding,
    /// Error log file; cleared before each load.
    pub error_log: PathBuf,
    /// Also echo rejected rows to stderr.
    pub echo_rejections: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::default(),
            error_log: PathBuf::from(DEFAULT_ERROR_LOG),
            echo_rejections: false,
        }
    }
}

/// Result of one load action.
#[derive(Debug)]
pub enum LoadOutcome {
    /// At least one valid record was loaded and stored in the history under `label`.
    Loaded {
        label: String,
        records: usize,
        rejected_rows: usize,
    },
    /// The file was read but contained no valid record.
    NothingValid { rejected_rows: usize },
    /// The file could not be ingested at all.
    Failed(IngestionError),
}

impl LoadOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, LoadOutcome::Failed(_))
    }

    /// Summary message for the user.
    pub fn message(&self) -> String {
        match self {
            LoadOutcome::Loaded {
                records,
                rejected_rows,
                ..
            } => {
                let mut msg = format!("{records} jogadores carregados com sucesso!");
                if *rejected_rows > 0 {
                    msg.push_str(&format!(
                        "\n{rejected_rows} linha(s) inválida(s); verifique o log de erros."
                    ));
                }
                msg
            }
            LoadOutcome::NothingValid { .. } => {
                "Nenhum jogador válido foi carregado do arquivo.".to_string()
            }
            LoadOutcome::Failed(IngestionError::FileNotFound { path }) => {
                format!("O arquivo '{}' não foi encontrado.", path.display())
            }
            LoadOutcome::Failed(e) => format!("Erro ao ler o arquivo: {e}"),
        }
    }
}

/// Drives loads and owns the history of loaded rankings.
pub struct RankingSession {
    config: SessionConfig,
    error_log: Arc<ErrorLogObserver>,
    history: RankingHistory,
}

impl RankingSession {
    pub fn new(config: SessionConfig) -> Self {
        let error_log = Arc::new(ErrorLogObserver::new(&config.error_log));
        Self {
            config,
            error_log,
            history: RankingHistory::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Load `path`, replacing the previous error log.
    pub fn load(&mut self, path: impl AsRef<Path>) -> LoadOutcome {
        let path = path.as_ref();
        if let Err(e) = self.error_log.clear() {
            log::warn!(
                "could not clear error log {}: {e}",
                self.error_log.path().display()
            );
        }

        let log_sink: Arc<dyn IngestionObserver> = self.error_log.clone();
        let observer: Arc<dyn IngestionObserver> = if self.config.echo_rejections {
            let stderr: Arc<dyn IngestionObserver> = Arc::new(StdErrObserver);
            Arc::new(CompositeObserver::new(vec![log_sink, stderr]))
        } else {
            log_sink
        };
        let options = IngestionOptions {
            encoding: self.config.encoding,
            observer: Some(observer),
            ..Default::default()
        };

        match ingest_from_path(path, &options) {
            Ok(report) if report.is_empty() => LoadOutcome::NothingValid {
                rejected_rows: report.rejected_rows,
            },
            Ok(report) => {
                let records = report.record_count();
                let rejected_rows = report.rejected_rows;
                let label = self.history.push(path, report.into_records(), Local::now());
                LoadOutcome::Loaded {
                    label,
                    records,
                    rejected_rows,
                }
            }
            Err(e) => LoadOutcome::Failed(e),
        }
    }

    pub fn history(&self) -> &RankingHistory {
        &self.history
    }

    /// History entry for `label`, if it was loaded in this session.
    pub fn select(&self, label: &str) -> Option<&HistoryEntry> {
        self.history.get(label)
    }

    /// Ranking of the entry stored under `label`.
    pub fn ranking(&self, label: &str) -> Option<Vec<RankedEntry<'_>>> {
        self.select(label).map(|entry| rank(&entry.records))
    }

    /// Error log contents for display, or a notice when nothing was logged.
    pub fn error_log_text(&self) -> io::Result<String> {
        Ok(self.error_log.read_to_string()?.unwrap_or_else(|| {
            format!(
                "O arquivo '{}' não existe. Nenhum erro foi registrado ainda.",
                self.error_log.path().display()
            )
        }))
    }
}
