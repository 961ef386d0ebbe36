//! History of loaded rankings.
//!
//! The history is an ordinary value owned by whoever drives the loads (see
//! [`crate::session::RankingSession`]); there is no global registry.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::types::Record;

/// One previously loaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Unique, human-readable label shown in the history drop-down.
    pub label: String,
    pub source: PathBuf,
    pub loaded_at: DateTime<Local>,
    pub records: Vec<Record>,
}

/// Ordered collection of loaded rankings, oldest first.
#[derive(Debug, Clone, Default)]
pub struct RankingHistory {
    entries: Vec<HistoryEntry>,
}

impl RankingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a load and return the label it was stored under.
    ///
    /// Labels look like `jogadores.csv (14:03:22)`. A label that is already taken gets a
    /// ` #2`, ` #3`, ... suffix.
    pub fn push(
        &mut self,
        source: impl AsRef<Path>,
        records: Vec<Record>,
        loaded_at: DateTime<Local>,
    ) -> String {
        let source = source.as_ref();
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());
        let base = format!("{file_name} ({})", loaded_at.format("%H:%M:%S"));

        let mut label = base.clone();
        let mut n = 2;
        while self.get(&label).is_some() {
            label = format!("{base} #{n}");
            n += 1;
        }

        self.entries.push(HistoryEntry {
            label: label.clone(),
            source: source.to_path_buf(),
            loaded_at,
            records,
        });
        label
    }

    /// Labels in load order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn get(&self, label: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    /// Most recently loaded entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::RankingHistory;
    use crate::types::Record;

    #[test]
    fn labels_use_file_name_and_time() {
        let mut h = RankingHistory::new();
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap();
        let label = h.push("/data/exports/jogadores.csv", vec![], at);
        assert_eq!(label, "jogadores.csv (09:05:07)");
        assert_eq!(h.labels().collect::<Vec<_>>(), vec!["jogadores.csv (09:05:07)"]);
    }

    #[test]
    fn duplicate_labels_get_suffix() {
        let mut h = RankingHistory::new();
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap();
        h.push("a.csv", vec![], at);
        h.push("a.csv", vec![], at);
        h.push("a.csv", vec![], at);
        assert_eq!(
            h.labels().collect::<Vec<_>>(),
            vec!["a.csv (09:05:07)", "a.csv (09:05:07) #2", "a.csv (09:05:07) #3"]
        );
    }

    #[test]
    fn get_and_latest_return_stored_records() {
        let mut h = RankingHistory::new();
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let first = h.push("a.csv", vec![Record::new("Ana".into(), 5, 88.5)], at);
        h.push("b.csv", vec![], at);

        assert_eq!(h.len(), 2);
        assert_eq!(h.get(&first).unwrap().records[0].name(), "Ana");
        assert_eq!(h.latest().unwrap().label, "b.csv (09:00:00)");
        assert!(h.get("missing").is_none());

        h.clear();
        assert!(h.is_empty());
        assert!(h.latest().is_none());
    }
}
