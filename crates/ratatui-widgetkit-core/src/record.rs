//! Row records and column descriptors shared by the table widgets.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use ratatui::layout::Alignment;
use ratatui::style::Style;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// One opaque record: field keys mapped to JSON values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String form of one field; a missing field is empty.
    pub fn display(&self, key: &str) -> Cow<'_, str> {
        self.get(key).map(value_to_string).unwrap_or(Cow::Borrowed(""))
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Parses a JSON array of objects into rows.
pub fn rows_from_json(json: &str) -> Result<Vec<Row>, serde_json::Error> {
    serde_json::from_str(json)
}

/// The string form of a value as the filter and the table see it.
///
/// Strings are used verbatim (no quotes), arrays join their elements with `,`, objects fall
/// back to compact JSON.
pub fn value_to_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed("null"),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(items) => Cow::Owned(
            items
                .iter()
                .map(value_to_string)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

pub type CellRenderer = Arc<dyn Fn(&Row) -> String + Send + Sync>;

/// Column descriptor: which field to show, its header, and how to lay it out.
#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    /// Fixed width in columns; `None` shares the leftover space.
    pub width: Option<u16>,
    pub align: Alignment,
    pub sortable: bool,
    /// Patched over the row style for this column's cells.
    pub style: Style,
    render: Option<CellRenderer>,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width: None,
            align: Alignment::Left,
            sortable: false,
            style: Style::default(),
            render: None,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replaces the default `row[key]` display with a custom rule.
    pub fn render(mut self, render: impl Fn(&Row) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn has_custom_render(&self) -> bool {
        self.render.is_some()
    }

    pub fn cell_text(&self, row: &Row) -> String {
        match &self.render {
            Some(render) => render(row),
            None => row.display(&self.key).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_forms_follow_display_rules() {
        assert_eq!(value_to_string(&json!("Ada")), "Ada");
        assert_eq!(value_to_string(&json!(42)), "42");
        assert_eq!(value_to_string(&json!(1.5)), "1.5");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&Value::Null), "null");
        assert_eq!(value_to_string(&json!(["a", 1, null])), "a,1,null");
        assert_eq!(value_to_string(&json!({"k": "v"})), r#"{"k":"v"}"#);
    }

    #[test]
    fn cell_text_prefers_custom_render() {
        let row = Row::new().with("first", "Ada").with("last", "Lovelace");
        let plain = Column::new("first", "First");
        let full = Column::new("full", "Name")
            .render(|r| format!("{} {}", r.display("first"), r.display("last")));
        assert_eq!(plain.cell_text(&row), "Ada");
        assert_eq!(full.cell_text(&row), "Ada Lovelace");
        assert_eq!(Column::new("missing", "?").cell_text(&row), "");
    }

    #[test]
    fn rows_parse_from_json_array() {
        let rows = rows_from_json(r#"[{"id": 1, "name": "a"}, {"id": 2}]"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].display("name"), "a");
        assert_eq!(rows[1].display("name"), "");
        assert!(rows_from_json("[1, 2]").is_err());
    }
}
