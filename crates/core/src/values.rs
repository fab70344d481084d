//! Feature value containers
//!
//! The kernel accepts exactly three value forms: a single dense vector, a
//! dense (features x nodes) matrix, or a sparse (features x nodes) matrix in
//! compressed-row form. [`Values`] is the closed union the kernel dispatches
//! on; anything else is rejected up front with
//! [`Error::UnsupportedValueType`].

use crate::error::{Error, Result};
use crate::graph::validate_csr;
use ndarray::{Array1, Array2, ArrayD, Ix1, Ix2};

/// Sparse (features x nodes) matrix in compressed-row form.
///
/// Row `k` holds the sparse length-N vector of feature `k`; its nonzero
/// positions and values are sliced in place from the shared arrays via
/// [`CsrValues::row`].
#[derive(Debug, Clone)]
pub struct CsrValues {
    n_features: usize,
    n_nodes: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl CsrValues {
    /// Create from raw CSR arrays for an (M, N) matrix.
    pub fn from_csr(
        n_features: usize,
        n_nodes: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<f64>,
    ) -> Result<Self> {
        validate_csr(n_features, n_nodes, &indptr, &indices, data.len())?;
        Ok(Self {
            n_features,
            n_nodes,
            indptr,
            indices,
            data,
        })
    }

    /// Sparse encoding of a dense matrix, skipping zero entries.
    pub fn from_dense(dense: &Array2<f64>) -> Self {
        let (n_features, n_nodes) = dense.dim();
        let mut indptr = Vec::with_capacity(n_features + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);
        for row in dense.rows() {
            for (j, &v) in row.iter().enumerate() {
                if v != 0.0 {
                    indices.push(j);
                    data.push(v);
                }
            }
            indptr.push(indices.len());
        }
        Self {
            n_features,
            n_nodes,
            indptr,
            indices,
            data,
        }
    }

    /// Number of features (rows, M)
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of nodes (columns, N)
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Nonzero positions and values of feature `k`, sliced in place.
    pub fn row(&self, k: usize) -> (&[usize], &[f64]) {
        let (start, end) = (self.indptr[k], self.indptr[k + 1]);
        (&self.indices[start..end], &self.data[start..end])
    }
}

/// Canonical value forms accepted by the statistics kernels.
///
/// Matrices are (features x nodes): each row is one feature measured over
/// all nodes of the graph.
#[derive(Debug, Clone)]
pub enum Values {
    /// One feature over N nodes
    Vector(Array1<f64>),
    /// M features over N nodes, dense
    Matrix(Array2<f64>),
    /// M features over N nodes, compressed-row sparse
    Sparse(CsrValues),
}

impl Values {
    /// Length of the node dimension, which must match the graph size.
    pub fn n_nodes(&self) -> usize {
        match self {
            Values::Vector(x) => x.len(),
            Values::Matrix(x) => x.ncols(),
            Values::Sparse(x) => x.n_nodes(),
        }
    }

    /// Number of features (1 for a vector).
    pub fn n_features(&self) -> usize {
        match self {
            Values::Vector(_) => 1,
            Values::Matrix(x) => x.nrows(),
            Values::Sparse(x) => x.n_features(),
        }
    }
}

impl From<Array1<f64>> for Values {
    fn from(x: Array1<f64>) -> Self {
        Values::Vector(x)
    }
}

impl From<Array2<f64>> for Values {
    fn from(x: Array2<f64>) -> Self {
        Values::Matrix(x)
    }
}

impl From<CsrValues> for Values {
    fn from(x: CsrValues) -> Self {
        Values::Sparse(x)
    }
}

impl TryFrom<ArrayD<f64>> for Values {
    type Error = Error;

    /// Dispatch a dynamically-dimensioned dense array on its rank.
    fn try_from(x: ArrayD<f64>) -> Result<Self> {
        match x.ndim() {
            1 => Ok(Values::Vector(
                x.into_dimensionality::<Ix1>()
                    .map_err(|e| Error::Other(e.to_string()))?,
            )),
            2 => Ok(Values::Matrix(
                x.into_dimensionality::<Ix2>()
                    .map_err(|e| Error::Other(e.to_string()))?,
            )),
            ndim => Err(Error::UnsupportedValueType(format!(
                "dense array with {ndim} dimensions; expected 1 or 2"
            ))),
        }
    }
}

/// Result of one statistic call: scalar for vector input, one value per
/// feature for matrix input (in input row order).
#[derive(Debug, Clone, PartialEq)]
pub enum Statistic {
    Scalar(f64),
    PerFeature(Array1<f64>),
}

impl Statistic {
    /// The scalar result, if the input was a single vector.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Statistic::Scalar(v) => Some(*v),
            Statistic::PerFeature(_) => None,
        }
    }

    /// The per-feature results, if the input was a matrix.
    pub fn as_per_feature(&self) -> Option<&Array1<f64>> {
        match self {
            Statistic::Scalar(_) => None,
            Statistic::PerFeature(v) => Some(v),
        }
    }
}
