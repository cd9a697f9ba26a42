//! Configuration-consumer recognition: constructions of the event-processor
//! type, linked back to the named configuration they are injected with.

use tracing::debug;

use crate::domain::annotations::{annotation_map, as_map};
use crate::domain::classifiers::{ConstructorClassifier, DeclContext};
use crate::domain::decl::{ConstructorCall, Value};
use crate::domain::identity::individual_iri;
use crate::domain::store::{GraphStore, SchemaError};
use crate::domain::vocab::CLASS_EVENT_PROCESSOR_CONFIGURATION;

const ANN_QUALIFIER: &str = "org.springframework.beans.factory.annotation.Qualifier";

/// Fully-qualified name of the processing-component type whose constructions
/// this rule recognizes.
pub const TYPE_EVENT_PROCESSOR: &str =
    "com.borrowbox.gearbox.sqs.eventprocessor.processor.EventProcessor";

/// The most information-dependent rule: from a processor construction it
/// chases `configuration` argument → enclosing type's constructor parameter
/// of that name → the parameter's qualifier annotation → the unit's
/// repository scope. Any missing link means no fact is recorded.
#[derive(Debug, Default)]
pub struct EventProcessorConstructorClassifier;

impl ConstructorClassifier for EventProcessorConstructorClassifier {
    fn register_schema(&self, store: &mut GraphStore) -> Result<(), SchemaError> {
        store.declare_class(CLASS_EVENT_PROCESSOR_CONFIGURATION);
        Ok(())
    }

    fn classify(
        &self,
        store: &mut GraphStore,
        construction: &ConstructorCall,
        ctx: &DeclContext<'_>,
    ) -> Result<Option<String>, SchemaError> {
        let Some(sig) = &construction.sig else {
            return Ok(None);
        };
        if sig.declaring_type != TYPE_EVENT_PROCESSOR {
            return Ok(None);
        }
        let Some(identifier) = configuration_identifier(construction) else {
            debug!("processor construction without a configuration argument, omitting");
            return Ok(None);
        };
        let Some(class) = ctx.class else {
            return Ok(None);
        };
        let Some(constructor) = class.constructor() else {
            return Ok(None);
        };
        let Some(param) = constructor.params.iter().find(|p| p.name == identifier) else {
            return Ok(None);
        };
        let qualifier = annotation_map(&param.annotations, &ctx.unit.imports)
            .string_values(ANN_QUALIFIER, "value")
            .and_then(|values| values.into_iter().next());
        let Some(qualifier) = qualifier else {
            return Ok(None);
        };
        let Some(repository) = ctx.unit.repository() else {
            return Ok(None);
        };

        let iri = individual_iri(CLASS_EVENT_PROCESSOR_CONFIGURATION, &[&repository, &qualifier]);
        store.get_or_create(&iri, CLASS_EVENT_PROCESSOR_CONFIGURATION)?;
        debug!(qualifier, repository, "processor wired to configuration");
        Ok(Some(iri))
    }
}

/// Textual name passed as the construction's `configuration` argument.
fn configuration_identifier(construction: &ConstructorCall) -> Option<String> {
    as_map(&construction.args)
        .get("configuration")?
        .first()
        .and_then(Value::as_str)
        .map(str::to_owned)
}
