/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  allowlist regions + types, clean elevation, sort → AirportTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → FilteredResult (borrowed rows + count)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  per-region count / mean / spread, category counts
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
