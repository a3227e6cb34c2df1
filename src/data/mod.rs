/// Data layer: core types, loading, and smoothing.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → AssayDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ AssayDataset  │  axis + x/y series
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  smooth   │  cubic spline → SmoothedCurve (300 points)
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod smooth;
