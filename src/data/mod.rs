/// Data layer: loading, normalization, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  first sheet → Table (normalized headers)
///   └──────────┘
///        │  ColumnMapping (schema), date coercion (dates)
///        ▼
///   ┌──────────────┐
///   │ SalesDataset  │  Vec<SalesRecord>, selector options
///   └──────────────┘   cached once by source::DatasetCache
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region AND category AND date range
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  sum by date / category, count by region, histogram
///   └───────────┘
/// ```

pub mod aggregate;
pub mod dates;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
pub mod source;
