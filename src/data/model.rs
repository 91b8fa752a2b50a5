use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use super::error::DataError;
use super::schema::{competitions, historical, medals};

// ---------------------------------------------------------------------------
// Value – a single cell of a table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes found in the inputs.
///
/// Equality, ordering and hashing all agree (floats compare with
/// `total_cmp`), so values can be used as set/map keys and NaN equals NaN.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl Value {
    fn discriminant(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Integer(_) => 1,
            Value::Float(_) => 2,
            Value::Text(_) => 3,
        }
    }

    /// Numeric view of the cell, `None` for text and null.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Infer the type of a raw text cell: empty → Null, then integer,
    /// float, and finally text.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        // `f64::from_str` also accepts words like "inf" and "NaN"; keep those as text.
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }
        Value::Text(s.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        let (da, db) = (self.discriminant(), other.discriminant());
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Null => {}
        }
    }
}

/// Non-finite floats and nulls display as blank cells.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) if v.is_finite() => write!(f, "{v:.2}"),
            Value::Float(_) | Value::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – an immutable, row-oriented frame
// ---------------------------------------------------------------------------

/// A header plus rows of cells. Every operation that derives data from a
/// table returns a new one; tables are never edited in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table; short rows are padded with `Null`, long rows truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Null);
                row
            })
            .collect();
        Table { columns, rows }
    }

    /// Same header, different rows.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<Value>>) -> Self {
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Result<usize, DataError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DataError::UnknownColumn(name.to_string()))
    }

    /// Check that every `required` column is present.
    pub fn require_columns(&self, table: &str, required: &[&str]) -> Result<(), DataError> {
        match required.iter().find(|col| !self.has_column(col)) {
            Some(col) => Err(DataError::MissingColumn {
                table: table.to_string(),
                column: col.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Cell at `row` in the named column.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column).ok()?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// The named column read as numbers; non-numeric cells become NaN.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<f64>, DataError> {
        let idx = self.column_index(column)?;
        Ok(self
            .rows
            .iter()
            .map(|r| r[idx].as_f64().unwrap_or(f64::NAN))
            .collect())
    }

    /// Unique values of a column in order of first appearance.
    pub fn distinct_values(&self, column: &str) -> Result<Vec<Value>, DataError> {
        let idx = self.column_index(column)?;
        let mut seen = HashSet::new();
        Ok(self
            .rows
            .iter()
            .map(|r| &r[idx])
            .filter(|v| seen.insert(*v))
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tables – the three validated inputs
// ---------------------------------------------------------------------------

/// The dashboard's input snapshot, built through [`Tables::new`] so the
/// schemas are checked, then shared read-only for the session.
#[derive(Debug, Clone)]
pub struct Tables {
    pub medals: Table,
    pub competitions: Table,
    pub historical: Table,
}

impl Tables {
    pub fn new(medals: Table, competitions: Table, historical: Table) -> Result<Self, DataError> {
        medals.require_columns(medals::TABLE, &medals::REQUIRED)?;
        competitions.require_columns(competitions::TABLE, &competitions::REQUIRED)?;
        historical.require_columns(historical::TABLE, &historical::REQUIRED)?;

        let tables = Tables {
            medals,
            competitions,
            historical,
        };
        for team in tables.inconsistent_medal_totals() {
            log::warn!("{team}: TOTAL does not equal GOLD + SILVER + BRONZE");
        }
        Ok(tables)
    }

    /// Teams whose `TOTAL` disagrees with the sum of their medals.
    pub fn inconsistent_medal_totals(&self) -> Vec<String> {
        let t = &self.medals;
        (0..t.len())
            .filter(|&row| {
                let num = |col: &str| t.value(row, col).and_then(Value::as_f64);
                match (
                    num(medals::GOLD),
                    num(medals::SILVER),
                    num(medals::BRONZE),
                    num(medals::TOTAL),
                ) {
                    (Some(g), Some(s), Some(b), Some(total)) => g + s + b != total,
                    _ => true,
                }
            })
            .map(|row| {
                t.value(row, medals::TEAM)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn parse_infers_cell_types() {
        assert_eq!(Value::parse(""), Value::Null);
        assert_eq!(Value::parse(" 42 "), Value::Integer(42));
        assert_eq!(Value::parse("1.5"), Value::Float(1.5));
        assert_eq!(Value::parse("United States"), Value::from("United States"));
    }

    #[test]
    fn parse_keeps_float_words_as_text() {
        assert_eq!(Value::parse("Inf"), Value::from("Inf"));
        assert_eq!(Value::parse("nan"), Value::from("nan"));
        assert_eq!(Value::parse("Infinity"), Value::from("Infinity"));
        assert_eq!(Value::parse("-2.5e1"), Value::Float(-25.0));
    }

    #[test]
    fn nan_equals_nan_and_displays_blank() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Float(f64::NAN).to_string(), "");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "");
        assert_eq!(Value::Float(31.746).to_string(), "31.75");
    }

    #[test]
    fn new_pads_short_rows() {
        let t = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec![Value::Integer(1)]],
        );
        assert_eq!(t.rows()[0], vec![Value::Integer(1), Value::Null]);
    }

    #[test]
    fn distinct_values_keep_order_of_appearance() {
        let t = fixtures::competitions();
        let comps = t.distinct_values(competitions::COMPETITION).unwrap();
        assert_eq!(
            comps,
            vec![Value::from("Swimming"), Value::from("Athletics")]
        );
    }

    #[test]
    fn unknown_column_is_reported() {
        let t = fixtures::medals();
        assert_eq!(
            t.column_index("PLATINUM"),
            Err(DataError::UnknownColumn("PLATINUM".into()))
        );
    }

    #[test]
    fn tables_reject_missing_column() {
        let medals = Table::new(
            vec!["TEAM".into(), "GOLD".into(), "SILVER".into(), "BRONZE".into()],
            vec![],
        );
        let err = Tables::new(medals, fixtures::competitions(), fixtures::historical()).unwrap_err();
        assert_eq!(
            err,
            DataError::MissingColumn {
                table: medals::TABLE.into(),
                column: "TOTAL".into()
            }
        );
    }

    #[test]
    fn inconsistent_totals_are_detected() {
        let bad = Table::new(
            medals::REQUIRED.iter().map(|c| c.to_string()).collect(),
            vec![vec![
                "XYZ".into(),
                Value::Integer(1),
                Value::Integer(1),
                Value::Integer(1),
                Value::Integer(4),
            ]],
        );
        let tables = Tables::new(bad, fixtures::competitions(), fixtures::historical()).unwrap();
        assert_eq!(tables.inconsistent_medal_totals(), vec!["XYZ".to_string()]);

        let good = fixtures::tables();
        assert!(good.inconsistent_medal_totals().is_empty());
    }
}
