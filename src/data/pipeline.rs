use std::cmp::Ordering;
use std::collections::HashSet;

use super::error::DataError;
use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// Selection pipeline: pure table → table / scalar transforms
// ---------------------------------------------------------------------------

/// Append one percentage column per `(source, label)` pair:
/// `source / total * 100`.
///
/// A zero total is not special-cased; the cell holds whatever the float
/// division yields (NaN or ∞) and renders blank downstream.
pub fn percentage_columns(
    table: &Table,
    total_column: &str,
    parts: &[(&str, &str)],
) -> Result<Table, DataError> {
    let total_idx = table.column_index(total_column)?;
    let part_idx = parts
        .iter()
        .map(|(source, _)| table.column_index(source))
        .collect::<Result<Vec<_>, _>>()?;

    let mut columns = table.columns().to_vec();
    columns.extend(parts.iter().map(|(_, label)| label.to_string()));

    let rows = table
        .rows()
        .iter()
        .map(|row| {
            let total = row[total_idx].as_f64().unwrap_or(f64::NAN);
            let mut out = row.clone();
            out.extend(part_idx.iter().map(|&i| {
                let part = row[i].as_f64().unwrap_or(f64::NAN);
                Value::Float(part / total * 100.0)
            }));
            out
        })
        .collect();

    Ok(Table::new(columns, rows))
}

/// Rows whose `key_column` value is one of `selected`, in original order.
///
/// An empty selection, or keys the column never contains, give an empty
/// table rather than an error.
pub fn filter_by_keys(
    table: &Table,
    key_column: &str,
    selected: &[Value],
) -> Result<Table, DataError> {
    let idx = table.column_index(key_column)?;
    let keys: HashSet<&Value> = selected.iter().collect();
    let rows = table
        .rows()
        .iter()
        .filter(|row| keys.contains(&row[idx]))
        .cloned()
        .collect();
    Ok(table.with_rows(rows))
}

/// Order two cells by numeric value, NaN (or non-numeric) last.
fn cmp_numeric(a: f64, b: f64, descending: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if descending => b.total_cmp(&a),
        (false, false) => a.total_cmp(&b),
    }
}

/// Stable sort by the numeric value of `column`. Ties keep their original
/// relative order.
pub fn sort_rows(table: &Table, column: &str, descending: bool) -> Result<Table, DataError> {
    let idx = table.column_index(column)?;
    let mut rows = table.rows().to_vec();
    rows.sort_by(|a, b| {
        let x = a[idx].as_f64().unwrap_or(f64::NAN);
        let y = b[idx].as_f64().unwrap_or(f64::NAN);
        cmp_numeric(x, y, descending)
    });
    Ok(table.with_rows(rows))
}

/// The first `n` rows after a stable sort by `sort_column`.
pub fn top_n(
    table: &Table,
    sort_column: &str,
    n: usize,
    descending: bool,
) -> Result<Table, DataError> {
    let sorted = sort_rows(table, sort_column, descending)?;
    let rows = sorted.rows().iter().take(n).cloned().collect();
    Ok(sorted.with_rows(rows))
}

/// Symmetric matrix of pairwise Pearson correlations.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `columns.len()` × `columns.len()`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    #[cfg(test)]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    /// Lay the matrix out as a table whose first column holds the row labels.
    pub fn to_table(&self, label_column: &str) -> Table {
        let mut columns = vec![label_column.to_string()];
        columns.extend(self.columns.iter().cloned());
        let rows = self
            .columns
            .iter()
            .zip(&self.values)
            .map(|(name, row)| {
                let mut out = vec![Value::from(name.as_str())];
                out.extend(row.iter().map(|&v| Value::Float(v)));
                out
            })
            .collect();
        Table::new(columns, rows)
    }
}

fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    // Zero variance leaves this as NaN (0/0).
    cov / (var_x * var_y).sqrt()
}

/// Pairwise Pearson correlation of the named numeric columns.
///
/// Each pair uses only the rows where both cells are numeric. With fewer
/// than two such rows the entry is NaN. A constant column has an undefined
/// correlation, so its whole row and column (diagonal included) are NaN.
pub fn correlation_matrix(table: &Table, columns: &[&str]) -> Result<CorrelationMatrix, DataError> {
    let data = columns
        .iter()
        .map(|c| table.numeric_column(c))
        .collect::<Result<Vec<_>, _>>()?;
    let k = columns.len();
    let mut values = vec![vec![f64::NAN; k]; k];

    for i in 0..k {
        for j in i..k {
            let (x, y): (Vec<f64>, Vec<f64>) = data[i]
                .iter()
                .zip(&data[j])
                .filter(|(a, b)| a.is_finite() && b.is_finite())
                .map(|(&a, &b)| (a, b))
                .unzip();
            if x.len() < 2 {
                continue;
            }
            let r = pearson(&x, &y);
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        values,
    })
}

/// The `return_column` cell of the first row holding the maximum of
/// `value_column`. Non-numeric cells are skipped.
pub fn argmax_lookup(
    table: &Table,
    value_column: &str,
    return_column: &str,
) -> Result<Value, DataError> {
    let values = table.numeric_column(value_column)?;
    let ret_idx = table.column_index(return_column)?;

    let mut best: Option<(usize, f64)> = None;
    for (row, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        // Strictly greater keeps the first row on ties.
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((row, v)),
        }
    }

    best.map(|(row, _)| table.rows()[row][ret_idx].clone())
        .ok_or_else(|| DataError::EmptyTable {
            column: value_column.to_string(),
        })
}

/// Project onto `columns` without collapsing duplicates.
pub fn select_columns(table: &Table, columns: &[&str]) -> Result<Table, DataError> {
    let idx = columns
        .iter()
        .map(|c| table.column_index(c))
        .collect::<Result<Vec<_>, _>>()?;
    let rows = table
        .rows()
        .iter()
        .map(|row| idx.iter().map(|&i| row[i].clone()).collect())
        .collect();
    Ok(Table::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows,
    ))
}

/// Project onto `columns` and keep only the first occurrence of each
/// distinct combination.
pub fn distinct_rows(table: &Table, columns: &[&str]) -> Result<Table, DataError> {
    let projected = select_columns(table, columns)?;
    let mut seen = HashSet::new();
    let rows = projected
        .rows()
        .iter()
        .filter(|row| seen.insert(*row))
        .cloned()
        .collect();
    Ok(projected.with_rows(rows))
}

/// Restrict to rows where `group_column == group_value`, then take the
/// top `n` by `sort_column`, largest first.
pub fn group_and_sort(
    table: &Table,
    group_column: &str,
    group_value: &Value,
    sort_column: &str,
    n: usize,
) -> Result<Table, DataError> {
    let group = filter_by_keys(table, group_column, std::slice::from_ref(group_value))?;
    top_n(&group, sort_column, n, true)
}

/// Per-column sums, skipping non-numeric cells.
pub fn column_sums(table: &Table, columns: &[&str]) -> Result<Vec<(String, f64)>, DataError> {
    columns
        .iter()
        .map(|c| -> Result<(String, f64), DataError> {
            let sum: f64 = table
                .numeric_column(c)?
                .into_iter()
                .filter(|v| !v.is_nan())
                .sum();
            Ok((c.to_string(), sum))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::data::schema::{competitions, historical, medals};

    const EPS: f64 = 1e-9;

    fn text_column(table: &Table, column: &str) -> Vec<String> {
        let idx = table.column_index(column).unwrap();
        table.rows().iter().map(|r| r[idx].to_string()).collect()
    }

    #[test]
    fn percentages_of_usa_row() {
        let t = percentage_columns(&fixtures::medals(), medals::TOTAL, &medals::SHARES).unwrap();
        let pct = |col: &str| t.value(0, col).and_then(Value::as_f64).unwrap();
        let (g, s, b) = (pct(medals::GOLD_PCT), pct(medals::SILVER_PCT), pct(medals::BRONZE_PCT));

        assert!((g - 31.746).abs() < 1e-3);
        assert!((s - 34.921).abs() < 1e-3);
        assert!((b - 33.333).abs() < 1e-3);
        assert!((g + s + b - 100.0).abs() < EPS);
    }

    #[test]
    fn percentages_sum_to_one_hundred_for_every_row() {
        let t = percentage_columns(&fixtures::medals(), medals::TOTAL, &medals::SHARES).unwrap();
        for row in 0..t.len() {
            let sum: f64 = medals::SHARES
                .iter()
                .map(|(_, label)| t.value(row, label).and_then(Value::as_f64).unwrap())
                .sum();
            assert!((sum - 100.0).abs() < EPS, "row {row} sums to {sum}");
        }
    }

    #[test]
    fn zero_total_yields_non_finite_percentages() {
        let t = Table::new(
            medals::REQUIRED.iter().map(|c| c.to_string()).collect(),
            vec![vec![
                "NED".into(),
                Value::Integer(0),
                Value::Integer(0),
                Value::Integer(0),
                Value::Integer(0),
            ]],
        );
        let t = percentage_columns(&t, medals::TOTAL, &medals::SHARES).unwrap();
        let g = t.value(0, medals::GOLD_PCT).and_then(Value::as_f64).unwrap();
        assert!(!g.is_finite());
    }

    #[test]
    fn percentages_leave_input_untouched() {
        let input = fixtures::medals();
        let before = input.clone();
        let out = percentage_columns(&input, medals::TOTAL, &medals::SHARES).unwrap();
        assert_eq!(input, before);
        assert_eq!(out.columns().len(), input.columns().len() + 3);
    }

    #[test]
    fn filter_with_no_keys_is_empty() {
        let t = fixtures::medals();
        for col in t.columns() {
            assert!(filter_by_keys(&t, col, &[]).unwrap().is_empty());
        }
    }

    #[test]
    fn filter_preserves_original_order() {
        let t = fixtures::medals();
        let out = filter_by_keys(&t, medals::TEAM, &["AUS".into(), "USA".into()]).unwrap();
        assert_eq!(text_column(&out, medals::TEAM), vec!["USA", "AUS"]);
    }

    #[test]
    fn filter_out_of_domain_is_empty() {
        let t = fixtures::medals();
        let out = filter_by_keys(&t, medals::TEAM, &["ATLANTIS".into()]).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.columns(), t.columns());
    }

    #[test]
    fn filter_unknown_column_is_an_error() {
        let t = fixtures::medals();
        assert!(matches!(
            filter_by_keys(&t, "NOPE", &["USA".into()]),
            Err(DataError::UnknownColumn(_))
        ));
    }

    #[test]
    fn top_n_breaks_ties_by_original_order() {
        let t = fixtures::medals();
        let out = top_n(&t, medals::GOLD, 1, true).unwrap();
        assert_eq!(text_column(&out, medals::TEAM), vec!["USA"]);

        let out = top_n(&t, medals::GOLD, 2, true).unwrap();
        assert_eq!(text_column(&out, medals::TEAM), vec!["USA", "CHN"]);
    }

    #[test]
    fn top_n_length_order_and_idempotence() {
        let t = fixtures::medals();
        for n in 0..6 {
            for descending in [true, false] {
                let out = top_n(&t, medals::SILVER, n, descending).unwrap();
                assert_eq!(out.len(), n.min(t.len()));

                let vals = out.numeric_column(medals::SILVER).unwrap();
                for w in vals.windows(2) {
                    if descending {
                        assert!(w[0] >= w[1]);
                    } else {
                        assert!(w[0] <= w[1]);
                    }
                }

                let again = top_n(&out, medals::SILVER, n, descending).unwrap();
                assert_eq!(again, out);
            }
        }
    }

    #[test]
    fn sort_puts_non_numeric_last() {
        let t = Table::new(
            vec!["k".into(), "v".into()],
            vec![
                vec!["a".into(), Value::Null],
                vec!["b".into(), Value::Integer(1)],
                vec!["c".into(), Value::Float(f64::NAN)],
                vec!["d".into(), Value::Integer(5)],
            ],
        );
        let desc = sort_rows(&t, "v", true).unwrap();
        assert_eq!(text_column(&desc, "k"), vec!["d", "b", "a", "c"]);
        let asc = sort_rows(&t, "v", false).unwrap();
        assert_eq!(text_column(&asc, "k"), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal() {
        let t = fixtures::medals();
        let cols = [medals::GOLD, medals::SILVER, medals::BRONZE];
        let m = correlation_matrix(&t, &cols).unwrap();

        for i in 0..3 {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
                assert!(m.get(i, j) <= 1.0 + EPS && m.get(i, j) >= -1.0 - EPS);
            }
        }
    }

    #[test]
    fn correlation_of_perfectly_linear_columns() {
        let t = Table::new(
            vec!["x".into(), "y".into(), "z".into()],
            vec![
                vec![Value::Integer(1), Value::Integer(2), Value::Integer(9)],
                vec![Value::Integer(2), Value::Integer(4), Value::Integer(6)],
                vec![Value::Integer(3), Value::Integer(6), Value::Integer(3)],
            ],
        );
        let m = correlation_matrix(&t, &["x", "y", "z"]).unwrap();
        assert!((m.get(0, 1) - 1.0).abs() < EPS);
        assert!((m.get(0, 2) + 1.0).abs() < EPS);
    }

    #[test]
    fn correlation_skips_blank_cells_per_pair() {
        let t = Table::new(
            vec!["x".into(), "y".into(), "z".into()],
            vec![
                vec![Value::Integer(1), Value::Integer(2), Value::Integer(9)],
                vec![Value::Integer(2), Value::Integer(4), Value::Integer(6)],
                vec![Value::Integer(3), Value::Null, Value::Integer(3)],
                vec![Value::Integer(4), Value::Integer(8), Value::Integer(0)],
            ],
        );
        let m = correlation_matrix(&t, &["x", "y", "z"]).unwrap();
        assert!((m.get(0, 1) - 1.0).abs() < EPS);
        assert!((m.get(1, 2) + 1.0).abs() < EPS);
        assert!((m.get(0, 2) + 1.0).abs() < EPS);
        assert_eq!(m.get(1, 1), 1.0);
    }

    #[test]
    fn correlation_with_constant_column_is_nan() {
        let t = Table::new(
            vec!["x".into(), "c".into()],
            vec![
                vec![Value::Integer(1), Value::Integer(5)],
                vec![Value::Integer(2), Value::Integer(5)],
                vec![Value::Integer(3), Value::Integer(5)],
            ],
        );
        let m = correlation_matrix(&t, &["x", "c"]).unwrap();
        assert_eq!(m.get(0, 0), 1.0);
        assert!(m.get(0, 1).is_nan());
        assert!(m.get(1, 0).is_nan());
        assert!(m.get(1, 1).is_nan());
    }

    #[test]
    fn correlation_needs_two_rows() {
        let t = top_n(&fixtures::medals(), medals::GOLD, 1, true).unwrap();
        let m = correlation_matrix(&t, &[medals::GOLD, medals::SILVER]).unwrap();
        assert!(m.values.iter().flatten().all(|v| v.is_nan()));
    }

    #[test]
    fn correlation_matrix_as_table() {
        let m = correlation_matrix(&fixtures::medals(), &[medals::GOLD, medals::SILVER]).unwrap();
        let t = m.to_table("Medal");
        assert_eq!(t.columns(), ["Medal", "GOLD", "SILVER"]);
        assert_eq!(text_column(&t, "Medal"), vec!["GOLD", "SILVER"]);
    }

    #[test]
    fn argmax_on_empty_table_fails() {
        let empty = filter_by_keys(&fixtures::medals(), medals::TEAM, &[]).unwrap();
        assert_eq!(
            argmax_lookup(&empty, medals::TOTAL, medals::TEAM),
            Err(DataError::EmptyTable {
                column: medals::TOTAL.into()
            })
        );
    }

    #[test]
    fn argmax_single_row_and_ties() {
        let t = fixtures::medals();
        let one = filter_by_keys(&t, medals::TEAM, &["JPN".into()]).unwrap();
        assert_eq!(
            argmax_lookup(&one, medals::GOLD, medals::TEAM),
            Ok(Value::from("JPN"))
        );

        // USA and CHN tie on gold; the first row wins.
        assert_eq!(
            argmax_lookup(&t, medals::GOLD, medals::TEAM),
            Ok(Value::from("USA"))
        );
        assert_eq!(
            argmax_lookup(&t, medals::TOTAL, medals::TEAM),
            Ok(Value::from("USA"))
        );
    }

    #[test]
    fn distinct_rows_collapse_duplicates_in_first_occurrence_order() {
        let t = fixtures::historical();
        let cols = [
            historical::COUNTRY,
            historical::YEAR,
            historical::GOLD,
            historical::SILVER,
            historical::BRONZE,
        ];
        let out = distinct_rows(&t, &cols).unwrap();

        assert_eq!(out.len(), 4);
        assert_eq!(out.columns().len(), cols.len());
        let years: Vec<String> = text_column(&out, historical::YEAR);
        assert_eq!(years, vec!["2016", "2020", "2012", "2020"]);

        let unique: HashSet<&Vec<Value>> = out.rows().iter().collect();
        assert_eq!(unique.len(), out.len());
    }

    #[test]
    fn select_columns_keeps_duplicates() {
        let t = fixtures::historical();
        let out = select_columns(&t, &[historical::COUNTRY]).unwrap();
        assert_eq!(out.len(), t.len());
    }

    #[test]
    fn group_and_sort_returns_competition_top_three() {
        let t = fixtures::competitions();
        let out = group_and_sort(
            &t,
            competitions::COMPETITION,
            &"Swimming".into(),
            competitions::TOTAL,
            3,
        )
        .unwrap();
        assert_eq!(text_column(&out, competitions::RANK), vec!["1", "2", "3"]);
        assert_eq!(text_column(&out, competitions::NOC), vec!["USA", "AUS", "CHN"]);
    }

    #[test]
    fn group_and_sort_short_group() {
        let t = fixtures::competitions();
        let out = group_and_sort(
            &t,
            competitions::COMPETITION,
            &"Athletics".into(),
            competitions::TOTAL,
            3,
        )
        .unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn column_sums_skip_non_numeric() {
        let sums = column_sums(&fixtures::medals(), &[medals::GOLD, medals::TOTAL]).unwrap();
        assert_eq!(
            sums,
            vec![("GOLD".to_string(), 118.0), ("TOTAL".to_string(), 315.0)]
        );
    }
}
