//! # Graphstat Core
//!
//! Core types and traits for the Graphstat graph-statistics library.
//!
//! This crate provides:
//! - `CsrGraph`: weighted neighbor graph in compressed-row form
//! - `Values`: canonical feature-value containers (dense vector, dense
//!   matrix, sparse matrix)
//! - `Dataset`: injected interface to an annotated dataset container, with
//!   the resolver that normalizes slot selections into `Values`
//! - Error types shared across the workspace

pub mod dataset;
pub mod error;
pub mod graph;
pub mod values;

pub use dataset::{resolve_graph, resolve_values, Dataset, ValueSelector};
pub use error::{Error, Result};
pub use graph::CsrGraph;
pub use values::{CsrValues, Statistic, Values};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::dataset::{Dataset, ValueSelector};
    pub use crate::error::{Error, Result};
    pub use crate::graph::CsrGraph;
    pub use crate::values::{CsrValues, Statistic, Values};
}
