//! Score ranking for ingested records.

use serde::Serialize;

use crate::types::Record;

/// Podium tier for the first three positions of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal for a 1-based position, if any.
    pub fn for_position(position: usize) -> Option<Self> {
        match position {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    /// Highlight color as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Medal::Gold => "#FFD700",
            Medal::Silver => "#C0C0C0",
            Medal::Bronze => "#CD7F32",
        }
    }
}

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry<'a> {
    /// 1-based position.
    pub position: usize,
    pub record: &'a Record,
    pub medal: Option<Medal>,
}

impl RankedEntry<'_> {
    /// Position as displayed, e.g. `1º`.
    pub fn position_label(&self) -> String {
        format!("{}º", self.position)
    }

    /// Score with two decimals.
    pub fn score_label(&self) -> String {
        format!("{:.2}", self.record.score())
    }
}

/// Rank `records` by score, highest first.
///
/// The input is left untouched. The sort is stable, so players with equal scores keep their
/// source order.
pub fn rank(records: &[Record]) -> Vec<RankedEntry<'_>> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| b.score().total_cmp(&a.score()));

    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, record)| RankedEntry {
            position: idx + 1,
            record,
            medal: Medal::for_position(idx + 1),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{rank, Medal};
    use crate::types::Record;

    fn player(name: &str, score: f64) -> Record {
        Record::new(name.to_string(), 1, score)
    }

    #[test]
    fn sorts_by_score_descending_without_touching_input() {
        let records = vec![player("a", 10.0), player("b", 30.0), player("c", 20.0)];
        let ranked = rank(&records);

        let scores: Vec<f64> = ranked.iter().map(|e| e.record.score()).collect();
        assert_eq!(scores, vec![30.0, 20.0, 10.0]);

        let source_order: Vec<f64> = records.iter().map(|r| r.score()).collect();
        assert_eq!(source_order, vec![10.0, 30.0, 20.0]);
    }

    #[test]
    fn ties_keep_source_order() {
        let records = vec![player("first", 50.0), player("second", 50.0), player("top", 70.0)];
        let names: Vec<&str> = rank(&records).iter().map(|e| e.record.name()).collect();
        assert_eq!(names, vec!["top", "first", "second"]);
    }

    #[test]
    fn podium_gets_medals() {
        let records: Vec<Record> = (0..5).map(|i| player("p", i as f64)).collect();
        let medals: Vec<Option<Medal>> = rank(&records).iter().map(|e| e.medal).collect();
        assert_eq!(
            medals,
            vec![Some(Medal::Gold), Some(Medal::Silver), Some(Medal::Bronze), None, None]
        );
    }

    #[test]
    fn labels_format_position_and_score() {
        let records = vec![player("Ana", 88.5)];
        let ranked = rank(&records);
        assert_eq!(ranked[0].position_label(), "1º");
        assert_eq!(ranked[0].score_label(), "88.50");
        assert_eq!(Medal::Gold.color(), "#FFD700");
    }

    #[test]
    fn empty_input_ranks_to_empty() {
        assert!(rank(&[]).is_empty());
    }
}
