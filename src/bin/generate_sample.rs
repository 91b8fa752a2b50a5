//! Writes a deterministic synthetic data set for the dashboard:
//! the three CSV tables plus a Parquet copy of the medal table.
//!
//! Usage: `generate_sample [output_dir]` (default `data`).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Medal count with the given expected value.
    fn medals(&mut self, mean: f64) -> i64 {
        (mean * 2.0 * self.next_f64()).round() as i64
    }
}

/// (NOC code, country name, relative strength)
const TEAMS: [(&str, &str, f64); 12] = [
    ("USA", "United States", 1.0),
    ("CHN", "China", 0.95),
    ("JPN", "Japan", 0.55),
    ("AUS", "Australia", 0.5),
    ("FRA", "France", 0.5),
    ("NED", "Netherlands", 0.4),
    ("GBR", "Great Britain", 0.5),
    ("KOR", "South Korea", 0.35),
    ("ITA", "Italy", 0.35),
    ("GER", "Germany", 0.3),
    ("NZL", "New Zealand", 0.2),
    ("CAN", "Canada", 0.2),
];

const COMPETITIONS: [&str; 8] = [
    "Swimming",
    "Athletics",
    "Gymnastics",
    "Cycling",
    "Rowing",
    "Fencing",
    "Judo",
    "Shooting",
];

const YEARS: [i64; 7] = [2000, 2004, 2008, 2012, 2016, 2020, 2024];

#[derive(Clone)]
struct Counts {
    gold: i64,
    silver: i64,
    bronze: i64,
}

impl Counts {
    fn draw(rng: &mut SimpleRng, mean: f64) -> Self {
        Counts {
            gold: rng.medals(mean),
            silver: rng.medals(mean),
            bronze: rng.medals(mean),
        }
    }

    fn total(&self) -> i64 {
        self.gold + self.silver + self.bronze
    }
}

fn write_medals(dir: &Path, rng: &mut SimpleRng) -> Result<Vec<(String, Counts)>> {
    let rows: Vec<(String, Counts)> = TEAMS
        .iter()
        .map(|&(noc, _, strength)| (noc.to_string(), Counts::draw(rng, 40.0 * strength)))
        .collect();

    let path = dir.join("Olympics_2024_Medals_Table.csv");
    let mut w = csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["TEAM", "GOLD", "SILVER", "BRONZE", "TOTAL"])?;
    for (team, c) in &rows {
        w.write_record([
            team.clone(),
            c.gold.to_string(),
            c.silver.to_string(),
            c.bronze.to_string(),
            c.total().to_string(),
        ])?;
    }
    w.flush()?;
    Ok(rows)
}

fn write_medals_parquet(dir: &Path, rows: &[(String, Counts)]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("TEAM", DataType::Utf8, false),
        Field::new("GOLD", DataType::Int64, false),
        Field::new("SILVER", DataType::Int64, false),
        Field::new("BRONZE", DataType::Int64, false),
        Field::new("TOTAL", DataType::Int64, false),
    ]));

    let int_column =
        |f: fn(&Counts) -> i64| Int64Array::from(rows.iter().map(|(_, c)| f(c)).collect::<Vec<_>>());
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(int_column(|c| c.gold)),
            Arc::new(int_column(|c| c.silver)),
            Arc::new(int_column(|c| c.bronze)),
            Arc::new(int_column(Counts::total)),
        ],
    )
    .context("building medal record batch")?;

    let path = dir.join("Olympics_2024_Medals_Table.parquet");
    let file = std::fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn write_competitions(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let path = dir.join("Olympics_2024.csv");
    let mut w = csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["Competitions", "NOC", "Rank", "Gold", "Silver", "Bronze", "Total"])?;

    let mut written = 0;
    for comp in COMPETITIONS {
        // Roughly two thirds of the teams medal in any one competition.
        let mut entries: Vec<(&str, Counts)> = Vec::new();
        for &(noc, _, strength) in &TEAMS {
            if rng.next_f64() >= 0.66 {
                continue;
            }
            let c = Counts::draw(rng, 3.0 * strength);
            if c.total() > 0 {
                entries.push((noc, c));
            }
        }
        entries.sort_by(|a, b| b.1.total().cmp(&a.1.total()));

        for (rank, (noc, c)) in entries.iter().enumerate() {
            w.write_record([
                comp.to_string(),
                noc.to_string(),
                (rank + 1).to_string(),
                c.gold.to_string(),
                c.silver.to_string(),
                c.bronze.to_string(),
                c.total().to_string(),
            ])?;
            written += 1;
        }
    }
    w.flush()?;
    Ok(written)
}

fn write_historical(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let path = dir.join("Olympics_Historical_Data.csv");
    let mut w = csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;
    w.write_record([
        "Country",
        "Year",
        "Competition",
        "Gold",
        "Silver",
        "Bronze",
        "Total Medals",
    ])?;

    let mut written = 0;
    for &(_, country, strength) in &TEAMS {
        for year in YEARS {
            for comp in COMPETITIONS.iter().take(4) {
                let c = Counts::draw(rng, 2.5 * strength);
                let record = [
                    country.to_string(),
                    year.to_string(),
                    comp.to_string(),
                    c.gold.to_string(),
                    c.silver.to_string(),
                    c.bronze.to_string(),
                    c.total().to_string(),
                ];
                w.write_record(&record)?;
                written += 1;
                // The historical source carries occasional duplicate rows.
                if rng.next_f64() < 0.05 {
                    w.write_record(&record)?;
                    written += 1;
                }
            }
        }
    }
    w.flush()?;
    Ok(written)
}

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(2024);
    let medals = write_medals(&dir, &mut rng)?;
    write_medals_parquet(&dir, &medals)?;
    let competitions = write_competitions(&dir, &mut rng)?;
    let historical = write_historical(&dir, &mut rng)?;

    println!(
        "Wrote {} teams, {competitions} competition rows and {historical} historical rows to {}",
        medals.len(),
        dir.display()
    );
    Ok(())
}
