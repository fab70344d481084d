//! Statistical analysis on weighted neighbor graphs
//!
//! - **autocorrelation**: Global autocorrelation (Moran's I)

pub mod autocorrelation;

pub use autocorrelation::{
    morans_i, morans_i_matrix, morans_i_on, morans_i_sparse, morans_i_vec, MoransParams,
};
