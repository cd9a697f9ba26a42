//! Extraction Session: owns the Graph Store of one analysis run and
//! dispatches traversal callbacks to the classifier pipeline and the
//! call-graph builder.
//!
//! One session per run. The traversal engine delivers events strictly
//! sequentially; the store is mutated in place and nothing is rolled back.
//! Multiple compilation units share the session so cross-unit discoveries of
//! the same logical entity merge through content-addressed identity.

use tracing::debug;

use crate::domain::calls::{CallGraphBuilder, ensure_method};
use crate::domain::classifiers::{
    ConstructorClassifier, DeclContext, EndpointClassifier, EventProcessorConfigClassifier,
    EventProcessorConstructorClassifier, MethodClassifier, RetrofitClientClassifier,
};
use crate::domain::decl::{
    ClassDecl, ConstructorCall, Invocation, MethodDecl, MethodSig, TraversalEvent, UnitInfo,
};
use crate::domain::store::{GraphStore, SchemaError};
use crate::domain::vocab::{CLASS_METHOD, PROP_CALLS, PROP_HAS_FQCN, PROP_HAS_METHOD_NAME};

/// Declares the vocabulary every run needs before any classifier-specific
/// terms: the Method class, the call edge and the method attributes.
pub fn base_schema(store: &mut GraphStore) -> Result<(), SchemaError> {
    store.declare_class(CLASS_METHOD);
    store.declare_object_property(PROP_CALLS, CLASS_METHOD, CLASS_METHOD)?;
    store.declare_data_property(PROP_HAS_METHOD_NAME, CLASS_METHOD)?;
    store.declare_data_property(PROP_HAS_FQCN, CLASS_METHOD)?;
    Ok(())
}

/// Counts of what one replayed event stream contributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub declarations: usize,
    pub recognized: usize,
    pub invocations: usize,
    pub constructions: usize,
}

pub struct ExtractionSession {
    store: GraphStore,
    call_graph: CallGraphBuilder,
    method_classifiers: Vec<Box<dyn MethodClassifier>>,
    constructor_classifiers: Vec<Box<dyn ConstructorClassifier>>,
}

impl ExtractionSession {
    /// A session with the full default pipeline.
    pub fn new() -> Result<Self, SchemaError> {
        Self::with_classifiers(
            CallGraphBuilder::default(),
            vec![
                Box::new(EndpointClassifier),
                Box::new(RetrofitClientClassifier),
                Box::new(EventProcessorConfigClassifier::default()),
            ],
            vec![Box::new(EventProcessorConstructorClassifier)],
        )
    }

    /// A session with an explicit pipeline. The whole schema — base plus
    /// every classifier's contribution — is declared here, before any
    /// instance data; a misconfigured classifier fails the construction.
    pub fn with_classifiers(
        call_graph: CallGraphBuilder,
        method_classifiers: Vec<Box<dyn MethodClassifier>>,
        constructor_classifiers: Vec<Box<dyn ConstructorClassifier>>,
    ) -> Result<Self, SchemaError> {
        let mut store = GraphStore::new();
        base_schema(&mut store)?;
        for classifier in &method_classifiers {
            classifier.register_schema(&mut store)?;
        }
        for classifier in &constructor_classifiers {
            classifier.register_schema(&mut store)?;
        }
        Ok(Self {
            store,
            call_graph,
            method_classifiers,
            constructor_classifiers,
        })
    }

    /// A method or constructor declaration was entered. Ensures its Method
    /// node, then runs every classifier — all applicable classifiers fire,
    /// one matching early never suppresses another's output. Returns whether
    /// any classifier recognized the declaration.
    pub fn method_declared(
        &mut self,
        unit: &UnitInfo,
        class: Option<&ClassDecl>,
        method: &MethodDecl,
    ) -> Result<bool, SchemaError> {
        let Some(sig) = &method.sig else {
            debug!(name = %method.name, "declaration unresolved, skipping");
            return Ok(false);
        };
        ensure_method(&mut self.store, sig)?;

        let ctx = DeclContext { unit, class };
        let mut recognized = false;
        for classifier in &self.method_classifiers {
            recognized |= classifier.classify(&mut self.store, method, &ctx)?;
        }
        Ok(recognized)
    }

    /// An invocation was seen inside a method body. Without a resolved
    /// enclosing declaration there is no caller to attach to and the fact is
    /// omitted.
    pub fn invocation_seen(
        &mut self,
        caller: Option<&MethodSig>,
        invocation: &Invocation,
    ) -> Result<(), SchemaError> {
        let Some(caller) = caller else {
            return Ok(());
        };
        self.call_graph
            .record_invocation(&mut self.store, caller, invocation)
    }

    /// A construction expression was seen. Only resolved constructor calls
    /// are dispatched; the first classifier that produces an individual wins.
    pub fn construction_seen(
        &mut self,
        unit: &UnitInfo,
        class: Option<&ClassDecl>,
        construction: &ConstructorCall,
    ) -> Result<Option<String>, SchemaError> {
        let resolved = construction
            .sig
            .as_ref()
            .is_some_and(|sig| sig.is_constructor);
        if !resolved {
            return Ok(None);
        }
        let ctx = DeclContext { unit, class };
        for classifier in &self.constructor_classifiers {
            if let Some(name) = classifier.classify(&mut self.store, construction, &ctx)? {
                return Ok(Some(name));
            }
        }
        Ok(None)
    }

    /// Replays a recorded event stream in order.
    pub fn replay(&mut self, events: &[TraversalEvent]) -> Result<ReplaySummary, SchemaError> {
        let mut summary = ReplaySummary::default();
        for event in events {
            match event {
                TraversalEvent::MethodDeclaration { unit, class, method } => {
                    summary.declarations += 1;
                    if self.method_declared(unit, class.as_ref(), method)? {
                        summary.recognized += 1;
                    }
                }
                TraversalEvent::Invocation {
                    caller, invocation, ..
                } => {
                    summary.invocations += 1;
                    self.invocation_seen(caller.as_ref(), invocation)?;
                }
                TraversalEvent::Construction {
                    unit,
                    class,
                    construction,
                } => {
                    summary.constructions += 1;
                    self.construction_seen(unit, class.as_ref(), construction)?;
                }
            }
        }
        Ok(summary)
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn into_store(self) -> GraphStore {
        self.store
    }
}
