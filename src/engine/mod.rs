// src/engine/mod.rs
//! Extraction engine: markers → entities → co-occurrence → schema.
//!
//! ```text
//! specs::<page> → extract::load_row ──→ store::DataSet
//!                       │ (LoadMode::Related)
//!                       ↘ observe::RelationLog ← topology rules
//!                                   │
//!                    normalize::normalize (once, at the end)
//! ```
pub mod extract;
pub mod normalize;
pub mod observe;
pub mod topology;
pub mod types;

pub use extract::{load_row, load_rows};
pub use normalize::{normalize, NormalizeReport};
pub use observe::{Observation, RelationLog};
pub use types::{CancelToken, LoadMode, RawMarker, RowFragment, SdParams};
