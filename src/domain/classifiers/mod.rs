//! Classifier pipeline: independent, composable rules that recognize
//! architectural roles from a declaration's shape and annotations.
//!
//! Each classifier owns two capabilities: contributing its vocabulary to the
//! store schema once at session construction, and classifying one declaration.
//! Classifiers are independent — the session runs every one of them for every
//! declaration and never lets one rule's outcome suppress another's side
//! effects, because a single method may play several roles at once. A
//! classifier that does not apply returns without touching the store.

pub mod endpoint;
pub mod event_config;
pub mod event_processor;
pub mod retrofit;

use crate::domain::decl::{ClassDecl, ConstructorCall, MethodDecl, UnitInfo};
use crate::domain::store::{GraphStore, SchemaError};

pub use endpoint::EndpointClassifier;
pub use event_config::EventProcessorConfigClassifier;
pub use event_processor::EventProcessorConstructorClassifier;
pub use retrofit::RetrofitClientClassifier;

/// Lexical context of the declaration being classified: its compilation unit
/// and, when present, its enclosing type.
#[derive(Debug, Clone, Copy)]
pub struct DeclContext<'a> {
    pub unit: &'a UnitInfo,
    pub class: Option<&'a ClassDecl>,
}

/// A rule over method/constructor declarations.
pub trait MethodClassifier {
    /// Declares every class and property this rule may write. Called once,
    /// before any instance data exists.
    fn register_schema(&self, store: &mut GraphStore) -> Result<(), SchemaError>;

    /// Inspects one declaration and writes the facts it recognizes. Returns
    /// whether the rule applied; `false` means no side effects.
    fn classify(
        &self,
        store: &mut GraphStore,
        method: &MethodDecl,
        ctx: &DeclContext<'_>,
    ) -> Result<bool, SchemaError>;
}

/// A rule over construction expressions. On success returns the name of the
/// individual the construction was linked to.
pub trait ConstructorClassifier {
    fn register_schema(&self, store: &mut GraphStore) -> Result<(), SchemaError>;

    fn classify(
        &self,
        store: &mut GraphStore,
        construction: &ConstructorCall,
        ctx: &DeclContext<'_>,
    ) -> Result<Option<String>, SchemaError>;
}
