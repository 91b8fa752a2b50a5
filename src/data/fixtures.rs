//! Small in-memory tables shared by the unit tests.

use super::model::{Table, Tables, Value};
use super::schema::{competitions, historical, medals};

fn header(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

fn counts(label: &str, n: [i64; 4]) -> Vec<Value> {
    let mut row = vec![Value::from(label)];
    row.extend(n.iter().map(|&v| Value::Integer(v)));
    row
}

pub fn medals() -> Table {
    Table::new(
        header(&medals::REQUIRED),
        vec![
            counts("USA", [40, 44, 42, 126]),
            counts("CHN", [40, 27, 24, 91]),
            counts("JPN", [20, 12, 13, 45]),
            counts("AUS", [18, 19, 16, 53]),
        ],
    )
}

pub fn competitions() -> Table {
    let row = |comp: &str, noc: &str, rank: i64, n: [i64; 4]| {
        let mut r = vec![Value::from(comp), Value::from(noc), Value::Integer(rank)];
        r.extend(n.iter().map(|&v| Value::Integer(v)));
        r
    };
    Table::new(
        header(&competitions::REQUIRED),
        vec![
            row("Swimming", "AUS", 2, [7, 9, 3, 19]),
            row("Swimming", "USA", 1, [8, 13, 7, 28]),
            row("Swimming", "FRA", 4, [1, 2, 4, 7]),
            row("Swimming", "CHN", 3, [2, 3, 6, 11]),
            row("Athletics", "USA", 1, [14, 11, 9, 34]),
            row("Athletics", "KEN", 2, [4, 2, 5, 11]),
        ],
    )
}

pub fn historical() -> Table {
    let row = |country: &str, year: i64, comp: &str, n: [i64; 4]| {
        let mut r = vec![Value::from(country), Value::Integer(year), Value::from(comp)];
        r.extend(n.iter().map(|&v| Value::Integer(v)));
        r
    };
    Table::new(
        header(&historical::REQUIRED),
        vec![
            row("United States", 2016, "Swimming", [16, 8, 9, 33]),
            row("United States", 2020, "Swimming", [11, 10, 9, 30]),
            row("United States", 2020, "Swimming", [11, 10, 9, 30]),
            row("United States", 2012, "Athletics", [9, 13, 7, 29]),
            row("China", 2020, "Swimming", [3, 2, 1, 6]),
        ],
    )
}

pub fn tables() -> Tables {
    Tables::new(medals(), competitions(), historical()).expect("fixture schemas are valid")
}
