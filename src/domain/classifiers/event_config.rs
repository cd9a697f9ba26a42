//! Event-processor configuration recognition: bean-factory methods returning
//! the configuration type.

use regex::Regex;
use tracing::debug;

use crate::domain::annotations::{annotation_map, as_map};
use crate::domain::calls::ensure_method;
use crate::domain::classifiers::{DeclContext, MethodClassifier};
use crate::domain::decl::{Expr, MethodDecl, Statement, Value};
use crate::domain::identity::individual_iri;
use crate::domain::store::{GraphStore, SchemaError};
use crate::domain::vocab::{
    CLASS_EVENT_PROCESSOR_CONFIGURATION, CLASS_METHOD, PROP_HAS_CONFIG, PROP_HAS_QUALIFIER,
    PROP_HAS_QUEUE_URL,
};

const ANN_BEAN: &str = "org.springframework.context.annotation.Bean";

/// Fully-qualified name of the configuration type a factory must return.
pub const TYPE_EVENT_PROCESSOR_CONFIGURATION: &str =
    "com.borrowbox.gearbox.sqs.eventprocessor.domain.EventProcessorConfiguration";

/// Recognizes dependency-factory methods that produce a named event-processor
/// configuration: one configuration individual per qualifier named in the
/// factory marker, carrying the queue URL extracted from the factory's
/// return expression.
#[derive(Debug)]
pub struct EventProcessorConfigClassifier {
    return_type: Regex,
}

impl Default for EventProcessorConfigClassifier {
    fn default() -> Self {
        Self {
            return_type: Regex::new(&regex::escape(TYPE_EVENT_PROCESSOR_CONFIGURATION))
                .expect("configuration type pattern"),
        }
    }
}

impl MethodClassifier for EventProcessorConfigClassifier {
    fn register_schema(&self, store: &mut GraphStore) -> Result<(), SchemaError> {
        store.declare_class(CLASS_METHOD);
        store.declare_class(CLASS_EVENT_PROCESSOR_CONFIGURATION);
        store.declare_object_property(
            PROP_HAS_CONFIG,
            CLASS_METHOD,
            CLASS_EVENT_PROCESSOR_CONFIGURATION,
        )?;
        store.declare_data_property(PROP_HAS_QUEUE_URL, CLASS_EVENT_PROCESSOR_CONFIGURATION)?;
        store.declare_data_property(PROP_HAS_QUALIFIER, CLASS_EVENT_PROCESSOR_CONFIGURATION)?;
        Ok(())
    }

    fn classify(
        &self,
        store: &mut GraphStore,
        method: &MethodDecl,
        ctx: &DeclContext<'_>,
    ) -> Result<bool, SchemaError> {
        let annotations = annotation_map(&method.annotations, &ctx.unit.imports);
        let Some(qualifiers) = annotations.string_values(ANN_BEAN, "value") else {
            return Ok(false);
        };
        let Some(sig) = &method.sig else {
            return Ok(false);
        };
        // A resolved non-matching return type disqualifies the method; an
        // unresolved one (e.g. inferred on an expression body) is allowed
        // through and the return-shape check below decides.
        if let Some(return_type) = &sig.return_type
            && !self.return_type.is_match(return_type)
        {
            return Ok(false);
        }
        // Extract before writing anything: a factory whose return shape is
        // not a direct construction with a named queueUrl argument fails
        // silently, leaving the store untouched.
        let Some(queue_url) = extract_queue_url(&method.body) else {
            debug!(method = %sig.name, "factory return shape not recognized, omitting");
            return Ok(false);
        };

        let method_node = ensure_method(store, sig)?;
        for qualifier in &qualifiers {
            let iri = individual_iri(CLASS_EVENT_PROCESSOR_CONFIGURATION, &[qualifier]);
            let (config, created) =
                store.get_or_create(&iri, CLASS_EVENT_PROCESSOR_CONFIGURATION)?;
            if created {
                store.add_data_property(config, PROP_HAS_QUALIFIER, qualifier)?;
                store.add_data_property(config, PROP_HAS_QUEUE_URL, &queue_url)?;
            }
            store.add_object_property(method_node, PROP_HAS_CONFIG, config)?;
            debug!(qualifier, queue_url, "event-processor configuration recognized");
        }
        Ok(true)
    }
}

/// The queue URL named in the factory's first return statement, which must be
/// a direct construction with a `queueUrl` argument. Any other shape yields
/// nothing.
fn extract_queue_url(body: &[Statement]) -> Option<String> {
    let returned = body.iter().find_map(Statement::as_return)?;
    let Expr::Construction(call) = returned else {
        return None;
    };
    let args = as_map(&call.args);
    args.get("queueUrl")?
        .first()
        .and_then(Value::as_str)
        .map(str::to_owned)
}
