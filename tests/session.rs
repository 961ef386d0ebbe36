use player_ranking::ingestion::TextEncoding;
use player_ranking::processing::Medal;
use player_ranking::session::{LoadOutcome, RankingSession, SessionConfig};
use player_ranking::IngestionError;

fn session_in(dir: &tempfile::TempDir) -> RankingSession {
    RankingSession::new(SessionConfig {
        encoding: TextEncoding::Utf8,
        error_log: dir.path().join("erros.log"),
        echo_rejections: false,
    })
}

#[test]
fn load_stores_ranking_in_history() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);

    let outcome = session.load("tests/fixtures/jogadores.csv");
    let LoadOutcome::Loaded {
        label,
        records,
        rejected_rows,
    } = &outcome
    else {
        panic!("unexpected outcome: {outcome:?}");
    };
    assert_eq!(*records, 2);
    assert_eq!(*rejected_rows, 2);
    assert!(label.starts_with("jogadores.csv ("));
    assert_eq!(
        outcome.message(),
        "2 jogadores carregados com sucesso!\n2 linha(s) inválida(s); verifique o log de erros."
    );

    let ranking = session.ranking(label).unwrap();
    let names: Vec<&str> = ranking.iter().map(|e| e.record.name()).collect();
    assert_eq!(names, vec!["Bruno", "Ana"]);
    assert_eq!(ranking[0].medal, Some(Medal::Gold));

    // The stored records keep source order.
    let stored: Vec<&str> = session.select(label).unwrap().records.iter().map(|r| r.name()).collect();
    assert_eq!(stored, vec!["Ana", "Bruno"]);
}

#[test]
fn each_load_starts_with_a_fresh_error_log() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);

    session.load("tests/fixtures/jogadores.csv");
    session.load("tests/fixtures/jogadores.csv");
    let text = session.error_log_text().unwrap();
    assert_eq!(text.lines().count(), 2);

    // A clean file wipes the previous diagnostics.
    session.load("tests/fixtures/blank_lines.csv");
    let text = session.error_log_text().unwrap();
    assert!(text.contains("não existe"));

    assert_eq!(session.history().len(), 3);
    let labels: Vec<&str> = session.history().labels().collect();
    assert_eq!(labels.len(), 3);
    assert!(labels[2].starts_with("blank_lines.csv"));
}

#[test]
fn nothing_valid_is_distinct_from_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);

    let outcome = session.load("tests/fixtures/header_only.csv");
    assert!(matches!(outcome, LoadOutcome::NothingValid { rejected_rows: 0 }));
    assert_eq!(outcome.message(), "Nenhum jogador válido foi carregado do arquivo.");
    assert!(!outcome.is_failure());
    assert!(session.history().is_empty());
}

#[test]
fn missing_file_is_reported_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);

    let outcome = session.load(dir.path().join("nope.csv"));
    assert!(outcome.is_failure());
    assert!(matches!(
        outcome,
        LoadOutcome::Failed(IngestionError::FileNotFound { .. })
    ));
    assert!(outcome.message().starts_with("O arquivo '"));
    assert!(outcome.message().ends_with("nope.csv' não foi encontrado."));
    assert!(session.history().is_empty());
    assert!(!dir.path().join("erros.log").exists());
}

#[test]
fn default_config_uses_latin1_and_erros_log() {
    let config = SessionConfig::default();
    assert_eq!(config.encoding, TextEncoding::Latin1);
    assert_eq!(config.error_log, std::path::PathBuf::from("erros.log"));
    assert!(!config.echo_rejections);

    let session = RankingSession::new(config);
    assert_eq!(session.config().encoding, TextEncoding::Latin1);
    assert!(session.history().is_empty());
}
