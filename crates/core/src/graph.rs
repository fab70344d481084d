//! Sparse weighted graphs in compressed-row form

use crate::error::{Error, Result};
use ndarray::ArrayView2;

/// An immutable weighted graph over N nodes, stored as a square CSR matrix.
///
/// `indptr[i]..indptr[i + 1]` indexes the stored edges leaving node `i` in
/// `indices` (target node) and `weights` (edge weight). Edges are directed
/// as stored: a symmetric graph must contain both directions explicitly,
/// which is the usual convention for connectivity matrices. Weights may be
/// any real value, though neighbor graphs typically carry non-negative ones.
///
/// # Example
///
/// ```
/// use graphstat_core::CsrGraph;
///
/// // Unweighted 3-cycle, stored symmetrically
/// let g = CsrGraph::from_edges(3, &[
///     (0, 1, 1.0), (1, 0, 1.0),
///     (1, 2, 1.0), (2, 1, 1.0),
///     (2, 0, 1.0), (0, 2, 1.0),
/// ]).unwrap();
///
/// assert_eq!(g.n_nodes(), 3);
/// assert_eq!(g.total_weight(), 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct CsrGraph {
    n: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    weights: Vec<f64>,
}

impl CsrGraph {
    /// Create a graph from raw CSR arrays.
    ///
    /// The matrix must be square; `rows` and `cols` are taken separately so
    /// that a non-square adjacency is reported as a shape error rather than
    /// silently truncated.
    pub fn from_csr(
        rows: usize,
        cols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        if rows != cols {
            return Err(Error::ShapeMismatch(format!(
                "adjacency matrix must be square, got {rows}x{cols}"
            )));
        }
        validate_csr(rows, cols, &indptr, &indices, weights.len())?;
        Ok(Self {
            n: rows,
            indptr,
            indices,
            weights,
        })
    }

    /// Create a graph from `(source, target, weight)` triplets.
    ///
    /// Duplicate edges are kept as separate entries, matching sparse-matrix
    /// convention where duplicates sum implicitly in any linear operation.
    pub fn from_edges(n: usize, edges: &[(usize, usize, f64)]) -> Result<Self> {
        let mut counts = vec![0usize; n + 1];
        for &(src, dst, _) in edges {
            if src >= n || dst >= n {
                return Err(Error::InvalidCsr(format!(
                    "edge ({src}, {dst}) out of bounds for {n} nodes"
                )));
            }
            counts[src + 1] += 1;
        }
        for i in 0..n {
            counts[i + 1] += counts[i];
        }

        let indptr = counts;
        let mut next = indptr.clone();
        let mut indices = vec![0usize; edges.len()];
        let mut weights = vec![0f64; edges.len()];
        for &(src, dst, w) in edges {
            let slot = next[src];
            indices[slot] = dst;
            weights[slot] = w;
            next[src] += 1;
        }

        Ok(Self {
            n,
            indptr,
            indices,
            weights,
        })
    }

    /// Create a graph from a dense adjacency matrix, skipping zero entries.
    pub fn from_dense(adjacency: ArrayView2<'_, f64>) -> Result<Self> {
        let (rows, cols) = adjacency.dim();
        if rows != cols {
            return Err(Error::ShapeMismatch(format!(
                "adjacency matrix must be square, got {rows}x{cols}"
            )));
        }

        let mut indptr = Vec::with_capacity(rows + 1);
        let mut indices = Vec::new();
        let mut weights = Vec::new();
        indptr.push(0);
        for row in adjacency.rows() {
            for (j, &w) in row.iter().enumerate() {
                if w != 0.0 {
                    indices.push(j);
                    weights.push(w);
                }
            }
            indptr.push(indices.len());
        }

        Ok(Self {
            n: rows,
            indptr,
            indices,
            weights,
        })
    }

    /// Number of nodes (matrix dimension N)
    pub fn n_nodes(&self) -> usize {
        self.n
    }

    /// Number of stored edges
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Whether the graph has no stored edges
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Sum of all stored edge weights (the normalization constant W).
    ///
    /// Computed on demand; callers evaluating many features should compute
    /// it once and reuse it.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Targets and weights of the edges leaving node `i`, sliced in place
    /// from the shared CSR arrays.
    pub fn row(&self, i: usize) -> (&[usize], &[f64]) {
        let (start, end) = (self.indptr[i], self.indptr[i + 1]);
        (&self.indices[start..end], &self.weights[start..end])
    }

    /// Row pointer array (length N+1)
    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    /// Column index array (length nnz)
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Edge weight array (length nnz)
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Validate CSR invariants shared by graphs and value matrices.
pub(crate) fn validate_csr(
    rows: usize,
    cols: usize,
    indptr: &[usize],
    indices: &[usize],
    n_data: usize,
) -> Result<()> {
    if indptr.len() != rows + 1 {
        return Err(Error::InvalidCsr(format!(
            "indptr length {} does not match {} rows",
            indptr.len(),
            rows
        )));
    }
    if indptr[0] != 0 {
        return Err(Error::InvalidCsr("indptr must start at 0".into()));
    }
    if indptr.windows(2).any(|w| w[0] > w[1]) {
        return Err(Error::InvalidCsr(
            "indptr must be monotonically non-decreasing".into(),
        ));
    }
    let nnz = indptr[rows];
    if indices.len() != nnz || n_data != nnz {
        return Err(Error::InvalidCsr(format!(
            "indptr ends at {nnz} but got {} indices and {} values",
            indices.len(),
            n_data
        )));
    }
    if let Some(&bad) = indices.iter().find(|&&j| j >= cols) {
        return Err(Error::InvalidCsr(format!(
            "column index {bad} out of bounds for {cols} columns"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn from_edges_matches_from_dense() {
        let dense = array![[0.0, 2.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.5, 0.0]];
        let a = CsrGraph::from_dense(dense.view()).unwrap();
        let b = CsrGraph::from_edges(3, &[(0, 1, 2.0), (1, 0, 1.0), (2, 1, 0.5)]).unwrap();

        assert_eq!(a.indptr(), b.indptr());
        assert_eq!(a.indices(), b.indices());
        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.total_weight(), 3.5);
    }

    #[test]
    fn row_slices_in_place() {
        let g = CsrGraph::from_edges(4, &[(1, 0, 1.0), (1, 2, 2.0), (3, 3, 4.0)]).unwrap();
        assert_eq!(g.row(0), (&[][..], &[][..]));
        assert_eq!(g.row(1), (&[0usize, 2][..], &[1.0f64, 2.0][..]));
        assert_eq!(g.row(2), (&[][..], &[][..]));
        assert_eq!(g.row(3), (&[3usize][..], &[4.0f64][..]));
    }

    #[test]
    fn rejects_non_square() {
        let err = CsrGraph::from_csr(2, 3, vec![0, 0, 0], vec![], vec![]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    #[test]
    fn rejects_malformed_indptr() {
        // Decreasing indptr
        let err =
            CsrGraph::from_csr(2, 2, vec![0, 2, 1], vec![0, 1], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidCsr(_)));

        // Wrong indptr length
        let err = CsrGraph::from_csr(2, 2, vec![0, 0], vec![], vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidCsr(_)));
    }

    #[test]
    fn rejects_out_of_bounds_index() {
        let err = CsrGraph::from_csr(2, 2, vec![0, 1, 1], vec![5], vec![1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidCsr(_)));
    }
}
