/// Data layer: parsing, the row model, filtering, sorting, and tier bands.
///
/// Architecture:
/// ```text
///  CSV text (sheet export)
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  lenient scan → raw rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  trim + project → Vec<Row>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  filter   │  →  │   sort   │  visible index pipeline
///   └──────────┘      └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   tier    │  score → display band
///   └──────────┘
/// ```
pub mod filter;
pub mod model;
pub mod parser;
pub mod sort;
pub mod tier;
