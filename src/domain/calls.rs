//! Call-graph construction: `calls` edges between Method individuals, with
//! the intrinsic-receiver filter.

use tracing::debug;

use crate::domain::decl::{Invocation, MethodSig};
use crate::domain::identity::individual_iri;
use crate::domain::store::{GraphStore, SchemaError};
use crate::domain::vocab::{CLASS_METHOD, PROP_CALLS, PROP_HAS_FQCN, PROP_HAS_METHOD_NAME};
use petgraph::graph::NodeIndex;

/// Get-or-creates the Method individual for a resolved signature, recording
/// `hasMethodName` (skipped for constructors) and the declaring type exactly
/// once. Safe to call from any number of traversal paths: identity is
/// content-addressed and the attribute writes are guarded, so independent
/// discoveries merge instead of duplicating.
pub fn ensure_method(store: &mut GraphStore, sig: &MethodSig) -> Result<NodeIndex, SchemaError> {
    let iri = individual_iri(CLASS_METHOD, &[&sig.declaring_type, &sig.name]);
    let (node, _) = store.get_or_create(&iri, CLASS_METHOD)?;
    if !sig.is_constructor && !store.has_data_value(node, PROP_HAS_METHOD_NAME, &sig.name) {
        store.add_data_property(node, PROP_HAS_METHOD_NAME, &sig.name)?;
    }
    if !store.has_data_value(node, PROP_HAS_FQCN, &sig.declaring_type) {
        store.add_data_property(node, PROP_HAS_FQCN, &sig.declaring_type)?;
    }
    Ok(node)
}

/// Receiver types excluded from the call graph: the host language's own
/// standard library. Matched by fully-qualified-name prefix.
#[derive(Debug, Clone)]
pub struct IntrinsicFilter {
    prefixes: Vec<String>,
}

impl Default for IntrinsicFilter {
    fn default() -> Self {
        Self {
            prefixes: vec!["kotlin.".to_string()],
        }
    }
}

impl IntrinsicFilter {
    pub fn new(prefixes: impl IntoIterator<Item = String>) -> Self {
        Self {
            prefixes: prefixes.into_iter().collect(),
        }
    }

    pub fn is_intrinsic(&self, type_fqn: &str) -> bool {
        self.prefixes.iter().any(|p| type_fqn.starts_with(p))
    }
}

/// Emits `calls` edges for invocations seen inside method bodies.
#[derive(Debug, Default)]
pub struct CallGraphBuilder {
    filter: IntrinsicFilter,
}

impl CallGraphBuilder {
    pub fn new(filter: IntrinsicFilter) -> Self {
        Self { filter }
    }

    /// Records one invocation under its resolved enclosing declaration. The
    /// caller node is ensured even when the invocation itself contributes no
    /// edge; an unresolved or intrinsic target is silently omitted.
    pub fn record_invocation(
        &self,
        store: &mut GraphStore,
        caller_sig: &MethodSig,
        invocation: &Invocation,
    ) -> Result<(), SchemaError> {
        let caller = ensure_method(store, caller_sig)?;

        let Some(target) = &invocation.target else {
            debug!(name = %invocation.name, "invocation target unresolved, omitting");
            return Ok(());
        };
        if self.filter.is_intrinsic(&target.declaring_type) {
            return Ok(());
        }
        let callee_iri = individual_iri(CLASS_METHOD, &[&target.declaring_type, &invocation.name]);
        let (callee, _) = store.get_or_create(&callee_iri, CLASS_METHOD)?;
        store.add_object_property(caller, PROP_CALLS, callee)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::base_schema;

    fn sig(declaring_type: &str, name: &str) -> MethodSig {
        MethodSig {
            declaring_type: declaring_type.into(),
            name: name.into(),
            is_constructor: false,
            return_type: None,
        }
    }

    fn store() -> GraphStore {
        let mut store = GraphStore::new();
        base_schema(&mut store).unwrap();
        store
    }

    #[test]
    fn ensure_method_records_attributes_once() {
        let mut store = store();
        let first = ensure_method(&mut store, &sig("a.B", "y")).unwrap();
        let second = ensure_method(&mut store, &sig("a.B", "y")).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.data_values(first, PROP_HAS_METHOD_NAME), ["y"]);
        assert_eq!(store.data_values(first, PROP_HAS_FQCN), ["a.B"]);
    }

    #[test]
    fn constructors_omit_the_method_name() {
        let mut store = store();
        let ctor = MethodSig {
            is_constructor: true,
            ..sig("a.B", "<constructor>")
        };
        let node = ensure_method(&mut store, &ctor).unwrap();
        assert!(store.data_values(node, PROP_HAS_METHOD_NAME).is_empty());
        assert_eq!(store.data_values(node, PROP_HAS_FQCN), ["a.B"]);
    }

    #[test]
    fn intrinsic_receivers_produce_no_edge() {
        let mut store = store();
        let builder = CallGraphBuilder::default();
        let invocation = Invocation {
            name: "let".into(),
            target: Some(sig("kotlin.StandardKt", "let")),
        };
        builder
            .record_invocation(&mut store, &sig("a.B", "y"), &invocation)
            .unwrap();
        assert_eq!(store.edge_count(), 0);
        // The caller node still exists.
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn unresolved_targets_are_omitted() {
        let mut store = store();
        let builder = CallGraphBuilder::default();
        let invocation = Invocation {
            name: "mystery".into(),
            target: None,
        };
        builder
            .record_invocation(&mut store, &sig("a.B", "y"), &invocation)
            .unwrap();
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn redundant_call_edges_are_no_ops() {
        let mut store = store();
        let builder = CallGraphBuilder::default();
        let invocation = Invocation {
            name: "findAll".into(),
            target: Some(sig("a.Repo", "findAll")),
        };
        builder
            .record_invocation(&mut store, &sig("a.B", "y"), &invocation)
            .unwrap();
        builder
            .record_invocation(&mut store, &sig("a.B", "y"), &invocation)
            .unwrap();
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn caller_and_callee_merge_across_discovery_paths() {
        let mut store = store();
        let builder = CallGraphBuilder::default();
        // Seen first as a bare callee…
        let invocation = Invocation {
            name: "doX".into(),
            target: Some(sig("a.Service", "doX")),
        };
        builder
            .record_invocation(&mut store, &sig("a.Controller", "x"), &invocation)
            .unwrap();
        let callee = ensure_method(&mut store, &sig("a.Service", "doX")).unwrap();
        // …then as a declaration: same node, attributes filled in, not duplicated.
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.data_values(callee, PROP_HAS_METHOD_NAME), ["doX"]);
    }
}
