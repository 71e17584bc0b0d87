//! Data layer: intake, parsing, validation and the error taxonomy.
//!
//! Architecture:
//! ```text
//!   uploaded .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  intake   │  file name + fully buffered bytes
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  decode, split, infer column types → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ validate  │  non-empty, then ≥1 numeric column → NumericColumns
//!   └──────────┘
//! ```

pub mod error;
pub mod intake;
pub mod loader;
pub mod model;
pub mod validate;
