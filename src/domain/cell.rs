use serde::Serialize;
use std::fmt;

/// One value in a dataset row.
///
/// Raw input only ever produces `Missing` and `Text`; the other variants are
/// introduced by the cleaning steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Missing,
    Text(String),
    Number(f64),
    Integer(i64),
    List(Vec<String>),
}

impl Cell {
    /// Build a cell from a raw delimited-file field. Empty fields are missing.
    pub fn from_raw(field: &str) -> Self {
        if field.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(field.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Cell::List(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric view of the cell. Text is parsed after trimming; anything that
    /// does not parse, and non-finite values, are treated as absent.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Cell::Number(n) => *n,
            Cell::Integer(i) => *i as f64,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Missing | Cell::List(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Render the cell as a delimited-file field.
    pub fn render(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Integer(i) => i.to_string(),
            Cell::List(items) => serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}
