/// Data layer: core types, loading, and the selection pipeline.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet  (×3)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse files → Table, check schema → Tables
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Tables   │  medals, competitions, historical (read-only)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  filter / sort / top-n / correlate / dedupe → new Table
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;
