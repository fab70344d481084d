//! Global autocorrelation on a weighted neighbor graph
//!
//! **Moran's I** measures how much similar values cluster among
//! graph-connected nodes: positive means clustering, negative dispersion,
//! near zero no structure. For one feature vector `x` over the N nodes of a
//! graph with edge weights `w_ij` and total weight `W`:
//!
//! ```text
//! z    = x - mean(x)
//! z2ss = sum_i z_i^2
//! inum = sum_i z_i * sum_{j in row i} w_ij * z_j
//! I    = (N / W) * inum / z2ss
//! ```
//!
//! The numerator iterates stored edges only, so a graph that is meant to be
//! symmetric must be stored with both directions present (the usual
//! connectivity-matrix convention). No symmetrization is applied here.

use crate::maybe_rayon::*;
use graphstat_core::dataset::{resolve_graph, resolve_values, Dataset, ValueSelector};
use graphstat_core::graph::CsrGraph;
use graphstat_core::values::{CsrValues, Statistic, Values};
use graphstat_core::{Error, Result};
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Parameters for the container form, [`morans_i_on`].
#[derive(Debug, Clone, Default)]
pub struct MoransParams {
    /// Explicit values; when set, the selector is ignored.
    pub values: Option<Values>,
    /// Named graph lookup is not implemented; any value other than `None`
    /// is rejected before computation.
    pub graph_key: Option<String>,
    /// Dataset slot to pull values from when `values` is not given.
    pub selector: ValueSelector,
}

/// Shared per-vector formula, with the graph total weight precomputed.
///
/// A constant vector has `z2ss == 0` and divides to a non-finite value
/// (infinity or NaN). That outcome is deliberate and matches the classical
/// statistic definition; it is returned as-is, not raised as an error.
fn morans_i_vec_w(x: ArrayView1<'_, f64>, g: &CsrGraph, w_sum: f64) -> f64 {
    let n = x.len();
    let mean = x.sum() / n as f64;
    let z: Vec<f64> = x.iter().map(|&v| v - mean).collect();
    let z2ss: f64 = z.iter().map(|d| d * d).sum();

    let mut inum = 0.0;
    for (i, &zi) in z.iter().enumerate() {
        let (targets, weights) = g.row(i);
        let mut neighbor_sum = 0.0;
        for (&j, &w) in targets.iter().zip(weights) {
            neighbor_sum += w * z[j];
        }
        inum += zi * neighbor_sum;
    }

    n as f64 / w_sum * inum / z2ss
}

/// Sparse-row variant: scatter the row's nonzeros into a zeroed length-N
/// buffer, then apply the shared formula.
fn morans_i_vec_w_sparse(
    positions: &[usize],
    data: &[f64],
    n: usize,
    g: &CsrGraph,
    w_sum: f64,
) -> f64 {
    let mut x = Array1::<f64>::zeros(n);
    for (&j, &v) in positions.iter().zip(data) {
        x[j] = v;
    }
    morans_i_vec_w(x.view(), g, w_sum)
}

/// Moran's I for a single dense feature vector.
///
/// # Arguments
/// * `g` - Weighted graph over the N nodes
/// * `x` - Feature values, length N
///
/// # Returns
/// The scalar statistic. Non-finite when `x` is constant (see module docs).
pub fn morans_i_vec(g: &CsrGraph, x: ArrayView1<'_, f64>) -> Result<f64> {
    if x.len() != g.n_nodes() {
        return Err(Error::ShapeMismatch(format!(
            "graph has {} nodes but the vector has {} entries",
            g.n_nodes(),
            x.len()
        )));
    }
    Ok(morans_i_vec_w(x, g, g.total_weight()))
}

/// Moran's I for each row of a dense (features x nodes) matrix.
///
/// The total weight W is computed once; rows are independent and evaluated
/// in parallel. Output order matches input row order.
pub fn morans_i_matrix(g: &CsrGraph, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    if x.ncols() != g.n_nodes() {
        return Err(Error::ShapeMismatch(format!(
            "graph has {} nodes but the matrix has {} columns",
            g.n_nodes(),
            x.ncols()
        )));
    }

    let w_sum = g.total_weight();
    let out: Vec<f64> = (0..x.nrows())
        .into_par_iter()
        .map(|k| morans_i_vec_w(x.row(k), g, w_sum))
        .collect();

    Ok(Array1::from_vec(out))
}

/// Moran's I for each row of a sparse (features x nodes) CSR matrix.
///
/// Each row is densified into its own scratch buffer before applying the
/// shared formula, so parallel rows never alias.
pub fn morans_i_sparse(g: &CsrGraph, vals: &CsrValues) -> Result<Array1<f64>> {
    if vals.n_nodes() != g.n_nodes() {
        return Err(Error::ShapeMismatch(format!(
            "graph has {} nodes but the sparse matrix has {} columns",
            g.n_nodes(),
            vals.n_nodes()
        )));
    }

    let n = g.n_nodes();
    let w_sum = g.total_weight();
    let out: Vec<f64> = (0..vals.n_features())
        .into_par_iter()
        .map(|k| {
            let (positions, data) = vals.row(k);
            morans_i_vec_w_sparse(positions, data, n, g, w_sum)
        })
        .collect();

    Ok(Array1::from_vec(out))
}

/// Moran's I for resolved values, dispatching on their shape.
///
/// Returns a scalar for vector input and one statistic per feature row for
/// matrix input.
///
/// # Example
///
/// ```
/// use graphstat_algorithms::statistics::morans_i;
/// use graphstat_core::{CsrGraph, Values};
/// use ndarray::array;
///
/// // Unweighted 4-cycle, stored symmetrically
/// let g = CsrGraph::from_edges(4, &[
///     (0, 1, 1.0), (1, 0, 1.0),
///     (1, 2, 1.0), (2, 1, 1.0),
///     (2, 3, 1.0), (3, 2, 1.0),
///     (3, 0, 1.0), (0, 3, 1.0),
/// ]).unwrap();
///
/// let stat = morans_i(&g, &Values::Vector(array![1.0, 2.0, 3.0, 4.0])).unwrap();
/// assert_eq!(stat.as_scalar(), Some(-0.2));
/// ```
pub fn morans_i(g: &CsrGraph, vals: &Values) -> Result<Statistic> {
    match vals {
        Values::Vector(x) => Ok(Statistic::Scalar(morans_i_vec(g, x.view())?)),
        Values::Matrix(x) => Ok(Statistic::PerFeature(morans_i_matrix(g, x.view())?)),
        Values::Sparse(x) => Ok(Statistic::PerFeature(morans_i_sparse(g, x)?)),
    }
}

/// Moran's I over values and graph pulled from a dataset container.
///
/// The graph resolves first (default connectivities, or the neighbors
/// fallback); a named `graph_key` is rejected before any values are touched.
/// Values come from `params.values` when given, otherwise from the selector.
pub fn morans_i_on<D: Dataset + ?Sized>(data: &D, params: MoransParams) -> Result<Statistic> {
    let g = resolve_graph(data, params.graph_key.as_deref())?;
    let vals = match params.values {
        Some(v) => v,
        None => resolve_values(data, &params.selector)?,
    };
    morans_i(&g, &vals)
}
