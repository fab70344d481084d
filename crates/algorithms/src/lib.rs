//! # Graphstat Algorithms
//!
//! Graph statistics over annotated sample datasets.
//!
//! ## Available Algorithm Categories
//!
//! - **statistics**: Global autocorrelation on weighted neighbor graphs
//!   (Moran's I)

mod maybe_rayon;

pub mod statistics;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::statistics::{
        morans_i, morans_i_matrix, morans_i_on, morans_i_sparse, morans_i_vec, MoransParams,
    };
    pub use graphstat_core::prelude::*;
}
