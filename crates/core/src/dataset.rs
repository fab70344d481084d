//! Dataset container interface and input resolution
//!
//! Statistics can be computed either on explicit arrays or on values pulled
//! out of an annotated dataset container (the usual home of a neighbor graph
//! and its per-node measurements). The container is injected through the
//! [`Dataset`] trait rather than looked up through any global state; the
//! resolver functions here normalize whatever the caller selected into the
//! canonical [`Values`] form and the default [`CsrGraph`].

use crate::error::{Error, Result};
use crate::graph::CsrGraph;
use crate::values::Values;
use ndarray::Array2;

/// Read-only view over an annotated dataset container.
///
/// Each method is one named slot; `None` means the slot is absent. Slot
/// getters return owned data since containers commonly materialize views
/// (e.g. a transposed main matrix) on access.
pub trait Dataset {
    /// The main data matrix, shaped (features x nodes).
    fn primary(&self) -> Option<Values>;

    /// The raw (unprocessed) data matrix, shaped (features x nodes).
    fn raw(&self) -> Option<Values>;

    /// A named layer, shaped (features x nodes).
    fn layer(&self, name: &str) -> Option<Values>;

    /// A named embedding. Embeddings are stored (nodes x features); the
    /// resolver transposes them.
    fn embedding(&self, name: &str) -> Option<Array2<f64>>;

    /// A named node-by-node pairwise matrix.
    fn pairwise(&self, name: &str) -> Option<Values>;

    /// Directly stored default connectivity graph.
    fn connectivities(&self) -> Option<CsrGraph>;

    /// Connectivities nested inside stored neighbors results, for containers
    /// that predate a directly stored graph.
    fn neighbor_connectivities(&self) -> Option<CsrGraph>;
}

/// Which slot of a [`Dataset`] to pull values from.
///
/// At most one hint may be set. With no hints the resolver falls back to the
/// container's primary matrix.
#[derive(Debug, Clone, Default)]
pub struct ValueSelector {
    /// Use the raw data slot
    pub use_raw: bool,
    /// Use a named layer
    pub layer: Option<String>,
    /// Use a named embedding (transposed to features x nodes)
    pub embedding: Option<String>,
    /// Use a named pairwise matrix
    pub pairwise: Option<String>,
}

impl ValueSelector {
    fn hints(&self) -> Vec<&'static str> {
        let mut set = Vec::new();
        if self.use_raw {
            set.push("use_raw");
        }
        if self.layer.is_some() {
            set.push("layer");
        }
        if self.embedding.is_some() {
            set.push("embedding");
        }
        if self.pairwise.is_some() {
            set.push("pairwise");
        }
        set
    }
}

/// Resolve feature values from a dataset according to the selector.
///
/// Exactly one hint may be set; conflicting hints, or a named slot that does
/// not exist, raise [`Error::AmbiguousSource`]. With no hints the primary
/// matrix is used. Embedding sources come back transposed to
/// (features x nodes).
pub fn resolve_values<D: Dataset + ?Sized>(data: &D, selector: &ValueSelector) -> Result<Values> {
    let hints = selector.hints();
    if hints.len() > 1 {
        return Err(Error::AmbiguousSource(format!(
            "conflicting hints: {}",
            hints.join(", ")
        )));
    }

    if selector.use_raw {
        return data
            .raw()
            .ok_or_else(|| Error::AmbiguousSource("dataset has no raw slot".into()));
    }
    if let Some(name) = &selector.layer {
        return data
            .layer(name)
            .ok_or_else(|| Error::AmbiguousSource(format!("no layer named {name:?}")));
    }
    if let Some(name) = &selector.embedding {
        let emb = data
            .embedding(name)
            .ok_or_else(|| Error::AmbiguousSource(format!("no embedding named {name:?}")))?;
        // Stored (nodes x features); the kernels want features as rows.
        return Ok(Values::Matrix(emb.reversed_axes()));
    }
    if let Some(name) = &selector.pairwise {
        return data
            .pairwise(name)
            .ok_or_else(|| Error::AmbiguousSource(format!("no pairwise matrix named {name:?}")));
    }

    data.primary().ok_or_else(|| {
        Error::AmbiguousSource("no value source selected and the dataset has no primary matrix".into())
    })
}

/// Resolve the graph to compute over.
///
/// Only the default connectivities are supported: a directly stored graph is
/// preferred, falling back to connectivities nested in neighbors results.
/// Any named `graph_key` raises [`Error::UnsupportedGraphKey`] rather than
/// silently falling back.
pub fn resolve_graph<D: Dataset + ?Sized>(data: &D, graph_key: Option<&str>) -> Result<CsrGraph> {
    if let Some(key) = graph_key {
        return Err(Error::UnsupportedGraphKey {
            key: key.to_string(),
        });
    }
    data.connectivities()
        .or_else(|| data.neighbor_connectivities())
        .ok_or(Error::MissingGraph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Container with one layer, one embedding, and a stored graph.
    struct Fixture;

    impl Dataset for Fixture {
        fn primary(&self) -> Option<Values> {
            Some(Values::Matrix(array![[1.0, 2.0], [3.0, 4.0]]))
        }
        fn raw(&self) -> Option<Values> {
            None
        }
        fn layer(&self, name: &str) -> Option<Values> {
            (name == "counts").then(|| Values::Matrix(array![[5.0, 6.0]]))
        }
        fn embedding(&self, name: &str) -> Option<Array2<f64>> {
            // 2 nodes x 3 components
            (name == "pca").then(|| array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])
        }
        fn pairwise(&self, _name: &str) -> Option<Values> {
            None
        }
        fn connectivities(&self) -> Option<CsrGraph> {
            CsrGraph::from_edges(2, &[(0, 1, 1.0), (1, 0, 1.0)]).ok()
        }
        fn neighbor_connectivities(&self) -> Option<CsrGraph> {
            None
        }
    }

    #[test]
    fn no_hints_uses_primary() {
        let vals = resolve_values(&Fixture, &ValueSelector::default()).unwrap();
        assert_eq!((vals.n_features(), vals.n_nodes()), (2, 2));
    }

    #[test]
    fn embedding_is_transposed() {
        let selector = ValueSelector {
            embedding: Some("pca".into()),
            ..Default::default()
        };
        let vals = resolve_values(&Fixture, &selector).unwrap();
        // 3 components x 2 nodes after transpose
        assert_eq!((vals.n_features(), vals.n_nodes()), (3, 2));
        match vals {
            Values::Matrix(m) => assert_eq!(m, array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]),
            other => panic!("expected dense matrix, got {other:?}"),
        }
    }

    #[test]
    fn conflicting_hints_are_ambiguous() {
        let selector = ValueSelector {
            use_raw: true,
            layer: Some("counts".into()),
            ..Default::default()
        };
        let err = resolve_values(&Fixture, &selector).unwrap_err();
        assert!(matches!(err, Error::AmbiguousSource(_)));
    }

    #[test]
    fn missing_slot_is_ambiguous() {
        let selector = ValueSelector {
            layer: Some("nope".into()),
            ..Default::default()
        };
        let err = resolve_values(&Fixture, &selector).unwrap_err();
        assert!(matches!(err, Error::AmbiguousSource(_)));

        let selector = ValueSelector {
            use_raw: true,
            ..Default::default()
        };
        let err = resolve_values(&Fixture, &selector).unwrap_err();
        assert!(matches!(err, Error::AmbiguousSource(_)));
    }

    #[test]
    fn named_graph_key_not_implemented() {
        let err = resolve_graph(&Fixture, Some("distances")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedGraphKey { .. }));
    }

    #[test]
    fn default_graph_resolves() {
        let g = resolve_graph(&Fixture, None).unwrap();
        assert_eq!(g.n_nodes(), 2);
    }
}
