/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///     movies.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean → MovieDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  handle   │  load once, reload on mtime change
///   └──────────┘
///        │  Arc<MovieDataset>
///        ▼
///   ┌──────────┐      ┌───────────┐
///   │  filter   │ ──▶ │ aggregate  │  metrics, rankings, buckets, correlation
///   └──────────┘      └───────────┘
///        └───────┬────────┘
///                ▼
///             views          compute_views(dataset, criteria) → Views
/// ```

pub mod aggregate;
pub mod filter;
pub mod handle;
pub mod loader;
pub mod model;
pub mod views;
