use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::record::Row;
use crate::record::value_to_string;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub column: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Next sort state after the user asks to sort by `column`: the same column flips direction,
/// a new column starts ascending.
pub fn toggle(current: Option<&SortConfig>, column: &str) -> SortConfig {
    match current {
        Some(cfg) if cfg.column == column => SortConfig {
            column: cfg.column.clone(),
            direction: cfg.direction.flipped(),
        },
        _ => SortConfig::asc(column),
    }
}

/// Stable-sorts `indices` (into `rows`) by the configured column.
pub fn sort_indices(rows: &[Row], indices: &mut [usize], config: &SortConfig) {
    indices.sort_by(|&a, &b| {
        let ord = compare_values(rows[a].get(&config.column), rows[b].get(&config.column));
        match config.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Missing < numbers (numerically) < everything else (case-insensitive text).
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => value_to_string(a)
                .to_lowercase()
                .cmp(&value_to_string(b).to_lowercase()),
        },
    }
}
