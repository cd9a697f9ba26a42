//! Retrofit client recognition: methods declaring an outbound HTTP call.

use tracing::debug;

use crate::domain::annotations::{AnnotationMap, annotation_map};
use crate::domain::calls::ensure_method;
use crate::domain::classifiers::{DeclContext, MethodClassifier};
use crate::domain::decl::{MethodDecl, Value};
use crate::domain::identity::individual_iri;
use crate::domain::store::{GraphStore, SchemaError};
use crate::domain::vocab::{
    CLASS_METHOD, CLASS_RETROFIT_CLIENT, PROP_HAS_HTTP_METHOD, PROP_HAS_PATH,
    PROP_IS_RETROFIT_CLIENT,
};

/// Outbound-call annotations and the verb each implies, in scan order.
const OUTBOUND_ANNOTATIONS: [(&str, &str); 6] = [
    ("retrofit2.http.GET", "GET"),
    ("retrofit2.http.PUT", "PUT"),
    ("retrofit2.http.POST", "POST"),
    ("retrofit2.http.DELETE", "DELETE"),
    ("retrofit2.http.HEAD", "HEAD"),
    ("retrofit2.http.PATCH", "PATCH"),
];

/// Recognizes outbound HTTP call sites. No class-level marker and no prefix
/// combination: the path comes straight from the annotation's argument list.
/// At most one outbound annotation is expected per method; when several are
/// present the first in metadata order wins — an accepted approximation.
#[derive(Debug, Default)]
pub struct RetrofitClientClassifier;

impl MethodClassifier for RetrofitClientClassifier {
    fn register_schema(&self, store: &mut GraphStore) -> Result<(), SchemaError> {
        store.declare_class(CLASS_METHOD);
        store.declare_class(CLASS_RETROFIT_CLIENT);
        store.declare_object_property(PROP_IS_RETROFIT_CLIENT, CLASS_METHOD, CLASS_RETROFIT_CLIENT)?;
        store.declare_data_property(PROP_HAS_PATH, CLASS_RETROFIT_CLIENT)?;
        store.declare_data_property(PROP_HAS_HTTP_METHOD, CLASS_RETROFIT_CLIENT)?;
        Ok(())
    }

    fn classify(
        &self,
        store: &mut GraphStore,
        method: &MethodDecl,
        ctx: &DeclContext<'_>,
    ) -> Result<bool, SchemaError> {
        let annotations = annotation_map(&method.annotations, &ctx.unit.imports);
        if annotations.is_empty() {
            return Ok(false);
        }
        let Some((paths, verb)) = extract_paths_and_verb(&annotations) else {
            return Ok(false);
        };
        let Some(sig) = &method.sig else {
            return Ok(false);
        };

        let method_node = ensure_method(store, sig)?;
        let mut elements: Vec<&str> = vec![verb];
        elements.extend(paths.iter().map(String::as_str));
        let iri = individual_iri(CLASS_RETROFIT_CLIENT, &elements);
        let (client, created) = store.get_or_create(&iri, CLASS_RETROFIT_CLIENT)?;
        if created {
            store.add_data_property(client, PROP_HAS_HTTP_METHOD, verb)?;
            // Method-level paths verbatim, multiplicity preserved.
            for path in &paths {
                store.add_data_property(client, PROP_HAS_PATH, path)?;
            }
        }
        store.add_object_property(method_node, PROP_IS_RETROFIT_CLIENT, client)?;
        debug!(verb, method = %sig.name, "retrofit client recognized");
        Ok(true)
    }
}

fn extract_paths_and_verb(annotations: &AnnotationMap) -> Option<(Vec<String>, &'static str)> {
    for (name, args) in annotations.iter() {
        let Some((_, verb)) = OUTBOUND_ANNOTATIONS.iter().find(|(ann, _)| *ann == name) else {
            continue;
        };
        let paths = args.get("value")?;
        let paths = paths.iter().filter_map(Value::as_str).map(str::to_owned).collect();
        return Some((paths, verb));
    }
    None
}
