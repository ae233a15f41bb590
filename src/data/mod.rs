/// Data layer: core types, loading, caching and year filtering.
///
/// Architecture:
/// ```text
///   labor-force .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → Table   (NotFound / Parse)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  path → Arc<Table>, read once until invalidated
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  distinct years, rows of one year, region chart
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
