use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TableError {
    #[error("Row {row} has {found} values but the table has {expected} columns")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A single typed cell of a [`Table`].
///
/// The variants mirror SQLite's storage classes so that query results can be
/// carried without lossy conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Parses a raw text cell (as read from CSV) into the narrowest matching value.
    ///
    /// Empty cells become [`Value::Null`]; integers are tried before reals.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Value::Real(f);
        }
        Value::Text(raw.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the numeric view of this value, if it has one.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Integer(i) => Some(Number::Integer(*i)),
            Value::Real(f) => Some(Number::Real(*f)),
            _ => None,
        }
    }

    /// Checks whether this value identifies the row selected by `key`.
    ///
    /// Integer keys match integer cells and integral real cells; text keys
    /// only match text cells.
    pub fn matches_key(&self, key: &Key) -> bool {
        match (self, key) {
            (Value::Integer(v), Key::Integer(k)) => v == k,
            (Value::Real(v), Key::Integer(k)) => *v == *k as f64,
            (Value::Text(v), Key::Text(k)) => v == k,
            _ => false,
        }
    }

    /// Display text for this value. `Null` renders as an empty string.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => f.write_str(s),
            Value::Blob(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

/// A numeric quantity that keeps integer results integral.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl Default for Number {
    fn default() -> Self {
        Number::Integer(0)
    }
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Real(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        self.as_f64() == 0.0
    }

    pub fn is_positive(self) -> bool {
        self.as_f64() > 0.0
    }

    /// Adds two numbers, staying integral when both operands are integers.
    pub fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => match a.checked_add(b) {
                Some(sum) => Number::Integer(sum),
                None => Number::Real(a as f64 + b as f64),
            },
            (a, b) => Number::Real(a.as_f64() + b.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Real(r) => write!(f, "{}", r),
        }
    }
}

/// A row identifier as written in a grid configuration (`id`, `mainids`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Key {
    Integer(i64),
    Text(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Integer(i) => write!(f, "{}", i),
            Key::Text(s) => write!(f, "'{}'", s),
        }
    }
}

/// An in-memory result set: ordered column names plus rows of typed values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from columns and rows, rejecting rows of the wrong width.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, TableError> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().map(move |values| RowRef {
            table: self,
            values,
        })
    }

    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        self.rows.get(index).map(|values| RowRef {
            table: self,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Returns the first row whose `id_column` value matches `key`.
    pub fn find_first(&self, id_column: &str, key: &Key) -> Option<RowRef<'_>> {
        let idx = self.column_index(id_column)?;
        self.rows()
            .find(|row| row.values[idx].matches_key(key))
    }

    /// Returns every row whose `id_column` value matches one of `keys`, in table order.
    pub fn rows_matching<'a>(
        &'a self,
        id_column: &str,
        keys: &'a [Key],
    ) -> impl Iterator<Item = RowRef<'a>> + 'a {
        let idx = self.column_index(id_column);
        self.rows().filter(move |row| match idx {
            Some(i) => keys.iter().any(|k| row.values[i].matches_key(k)),
            None => false,
        })
    }
}

/// A borrowed view of one table row with by-name access.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a Table,
    values: &'a [Value],
}

impl<'a> RowRef<'a> {
    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.table
            .column_index(column)
            .and_then(|i| self.values.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::from_rows(
            vec!["id".into(), "name".into(), "mass".into()],
            vec![
                vec![Value::Integer(1), Value::Text("Gly".into()), Value::Real(75.07)],
                vec![Value::Integer(2), Value::Text("Ala".into()), Value::Real(89.09)],
                vec![Value::Integer(2), Value::Text("Dup".into()), Value::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn infer_parses_integers_reals_text_and_blanks() {
        assert_eq!(Value::infer("42"), Value::Integer(42));
        assert_eq!(Value::infer(" -3 "), Value::Integer(-3));
        assert_eq!(Value::infer("2.5"), Value::Real(2.5));
        assert_eq!(Value::infer("H2O"), Value::Text("H2O".into()));
        assert_eq!(Value::infer("   "), Value::Null);
    }

    #[test]
    fn push_row_rejects_rows_of_wrong_width() {
        let mut table = Table::new(vec!["a".into(), "b".into()]);
        let err = table.push_row(vec![Value::Integer(1)]).unwrap_err();
        assert_eq!(
            err,
            TableError::RowWidth {
                row: 0,
                expected: 2,
                found: 1
            }
        );
        assert!(table.is_empty());
    }

    #[test]
    fn find_first_returns_the_first_matching_row_only() {
        let table = sample_table();
        let row = table.find_first("id", &Key::Integer(2)).unwrap();
        assert_eq!(row.get("name"), Some(&Value::Text("Ala".into())));
    }

    #[test]
    fn find_first_returns_none_for_unknown_key_or_column() {
        let table = sample_table();
        assert!(table.find_first("id", &Key::Integer(9)).is_none());
        assert!(table.find_first("missing", &Key::Integer(1)).is_none());
    }

    #[test]
    fn rows_matching_preserves_table_order() {
        let table = sample_table();
        let keys = [Key::Integer(2), Key::Integer(1)];
        let names: Vec<String> = table
            .rows_matching("id", &keys)
            .map(|r| r.get("name").unwrap().to_text())
            .collect();
        assert_eq!(names, vec!["Gly", "Ala", "Dup"]);
    }

    #[test]
    fn matches_key_does_not_coerce_text_to_integers() {
        assert!(!Value::Text("1".into()).matches_key(&Key::Integer(1)));
        assert!(Value::Real(3.0).matches_key(&Key::Integer(3)));
        assert!(Value::Text("ALA".into()).matches_key(&Key::Text("ALA".into())));
    }

    #[test]
    fn number_addition_stays_integral_for_integers() {
        assert_eq!(
            Number::Integer(2).add(Number::Integer(3)),
            Number::Integer(5)
        );
        assert_eq!(Number::Integer(2).add(Number::Real(0.5)), Number::Real(2.5));
        assert_eq!(Number::Integer(7).to_string(), "7");
    }

    #[test]
    fn null_values_display_as_empty_text() {
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(Value::Blob(vec![1, 2, 3]).to_text(), "<3 bytes>");
    }
}
