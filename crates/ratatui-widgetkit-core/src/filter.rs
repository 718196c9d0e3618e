//! Case-insensitive search over row records.

use crate::record::Row;
use crate::record::value_to_string;

/// A lowercased search term, prepared once and matched against many rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    /// An empty query matches every row.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.is_empty()
            || row
                .values()
                .any(|v| value_to_string(v).to_lowercase().contains(&self.needle))
    }
}

/// True if some field's string form contains `term`, ignoring case.
pub fn matches(row: &Row, term: &str) -> bool {
    SearchQuery::new(term).matches(row)
}

/// Indices of the rows matching `term`, in their original order.
pub fn filter_indices(rows: &[Row], term: &str) -> Vec<usize> {
    let query = SearchQuery::new(term);
    if query.is_empty() {
        return (0..rows.len()).collect();
    }
    rows.iter()
        .enumerate()
        .filter(|(_, row)| query.matches(row))
        .map(|(i, _)| i)
        .collect()
}

pub fn filter_rows<'a>(rows: &'a [Row], term: &str) -> Vec<&'a Row> {
    filter_indices(rows, term)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn people() -> Vec<Row> {
        vec![
            Row::new().with("name", "Ada Lovelace").with("age", 36),
            Row::new().with("name", "Alan Turing").with("age", 41),
            Row::new().with("name", "Grace Hopper").with("tags", json!(["navy", "cobol"])),
            Row::new().with("name", "ÉMILE").with("active", true),
        ]
    }

    #[test]
    fn empty_term_returns_everything() {
        let rows = people();
        assert_eq!(filter_indices(&rows, ""), vec![0, 1, 2, 3]);
        let all = filter_rows(&rows, "");
        assert_eq!(all.len(), rows.len());
        assert!(all.iter().zip(&rows).all(|(a, b)| *a == b));
    }

    #[test]
    fn matching_ignores_case_across_fields() {
        let rows = people();
        assert_eq!(filter_indices(&rows, "ALAN"), vec![1]);
        assert_eq!(filter_indices(&rows, "a"), vec![0, 1, 2]);
        assert_eq!(filter_indices(&rows, "41"), vec![1]);
        assert_eq!(filter_indices(&rows, "COBOL"), vec![2]);
        assert_eq!(filter_indices(&rows, "émile"), vec![3]);
        assert_eq!(filter_indices(&rows, "true"), vec![3]);
        assert!(filter_indices(&rows, "zzz").is_empty());
    }

    #[test]
    fn every_match_contains_the_term_and_no_match_is_missed() {
        let rows = people();
        for term in ["a", "n", "ur", "36", "hop", "x"] {
            let hits = filter_indices(&rows, term);
            for (i, row) in rows.iter().enumerate() {
                let expected = row
                    .values()
                    .any(|v| value_to_string(v).to_lowercase().contains(term));
                assert_eq!(hits.contains(&i), expected, "term {term:?} row {i}");
            }
        }
    }

    #[test]
    fn filtering_twice_with_same_term_is_stable() {
        let rows = people();
        let once: Vec<Row> = filter_rows(&rows, "an").into_iter().cloned().collect();
        let twice: Vec<Row> = filter_rows(&once, "an").into_iter().cloned().collect();
        assert_eq!(once, twice);
        assert!(matches(&rows[0], "LOVE"));
    }
}
