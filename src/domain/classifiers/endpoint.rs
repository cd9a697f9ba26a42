//! HTTP endpoint recognition: methods of controller-marked types carrying a
//! route annotation.

use tracing::debug;

use crate::domain::annotations::{AnnotationMap, annotation_map, product_of};
use crate::domain::calls::ensure_method;
use crate::domain::classifiers::{DeclContext, MethodClassifier};
use crate::domain::decl::{MethodDecl, Value};
use crate::domain::identity::individual_iri;
use crate::domain::store::{GraphStore, SchemaError};
use crate::domain::vocab::{
    CLASS_ENDPOINT, CLASS_METHOD, PROP_HAS_ENDPOINT, PROP_HAS_HTTP_METHOD, PROP_HAS_PATH,
};

const ANN_REST_CONTROLLER: &str = "org.springframework.web.bind.annotation.RestController";
const ANN_REQUEST_MAPPING: &str = "org.springframework.web.bind.annotation.RequestMapping";
const ANN_GET_MAPPING: &str = "org.springframework.web.bind.annotation.GetMapping";
const ANN_PUT_MAPPING: &str = "org.springframework.web.bind.annotation.PutMapping";
const ANN_POST_MAPPING: &str = "org.springframework.web.bind.annotation.PostMapping";
const ANN_DELETE_MAPPING: &str = "org.springframework.web.bind.annotation.DeleteMapping";

/// Recognizes one exposed HTTP route per (verb, path set) and links it from
/// the declaring Method individual.
#[derive(Debug, Default)]
pub struct EndpointClassifier;

impl MethodClassifier for EndpointClassifier {
    fn register_schema(&self, store: &mut GraphStore) -> Result<(), SchemaError> {
        store.declare_class(CLASS_METHOD);
        store.declare_class(CLASS_ENDPOINT);
        store.declare_object_property(PROP_HAS_ENDPOINT, CLASS_METHOD, CLASS_ENDPOINT)?;
        store.declare_data_property(PROP_HAS_PATH, CLASS_ENDPOINT)?;
        store.declare_data_property(PROP_HAS_HTTP_METHOD, CLASS_ENDPOINT)?;
        Ok(())
    }

    fn classify(
        &self,
        store: &mut GraphStore,
        method: &MethodDecl,
        ctx: &DeclContext<'_>,
    ) -> Result<bool, SchemaError> {
        let Some(class) = ctx.class else {
            return Ok(false);
        };
        let class_annotations = annotation_map(&class.annotations, &ctx.unit.imports);
        if !class_annotations.contains(ANN_REST_CONTROLLER) {
            return Ok(false);
        }
        // Class-level route prefixes are optional; absent means method-level
        // paths are used verbatim.
        let prefixes = class_annotations.string_values(ANN_REQUEST_MAPPING, "value");

        let method_annotations = annotation_map(&method.annotations, &ctx.unit.imports);
        if method_annotations.is_empty() {
            return Ok(false);
        }
        let Some((paths, verbs)) = extract_paths_and_verbs(&method_annotations) else {
            return Ok(false);
        };
        if verbs.is_empty() {
            return Ok(false);
        }
        let Some(sig) = &method.sig else {
            return Ok(false);
        };

        let method_node = ensure_method(store, sig)?;
        for verb in &verbs {
            let mut elements: Vec<&str> = vec![verb];
            if let Some(prefixes) = &prefixes {
                elements.extend(prefixes.iter().map(String::as_str));
            }
            elements.extend(paths.iter().map(String::as_str));

            let iri = individual_iri(CLASS_ENDPOINT, &elements);
            let (endpoint, created) = store.get_or_create(&iri, CLASS_ENDPOINT)?;
            if created {
                store.add_data_property(endpoint, PROP_HAS_HTTP_METHOD, verb)?;
                if let Some(combined) = product_of(prefixes.as_deref(), Some(&paths)) {
                    for path in combined {
                        store.add_data_property(endpoint, PROP_HAS_PATH, path)?;
                    }
                }
            }
            store.add_object_property(method_node, PROP_HAS_ENDPOINT, endpoint)?;
            debug!(verb, method = %sig.name, "endpoint recognized");
        }
        Ok(true)
    }
}

/// The first recognized route annotation in metadata order decides both the
/// path list and the verb set. `RequestMapping` takes its verbs from its
/// `method` argument; the shorthand annotations imply one verb each.
/// Unrecognized annotations are skipped, and a route annotation without a
/// path argument is an unmodeled fact.
fn extract_paths_and_verbs(annotations: &AnnotationMap) -> Option<(Vec<String>, Vec<String>)> {
    for (name, args) in annotations.iter() {
        let verbs = match name {
            ANN_REQUEST_MAPPING => args
                .get("method")
                .map(|values| {
                    let mut verbs: Vec<String> = Vec::new();
                    for verb in values.iter().filter_map(Value::as_str) {
                        if !verbs.iter().any(|v| v == verb) {
                            verbs.push(verb.to_string());
                        }
                    }
                    verbs
                })
                .unwrap_or_default(),
            ANN_GET_MAPPING => vec!["GET".to_string()],
            ANN_PUT_MAPPING => vec!["PUT".to_string()],
            ANN_POST_MAPPING => vec!["POST".to_string()],
            ANN_DELETE_MAPPING => vec!["DELETE".to_string()],
            _ => continue,
        };
        let Some(paths) = args.get("value") else {
            continue;
        };
        let paths = paths.iter().filter_map(Value::as_str).map(str::to_owned).collect();
        return Some((paths, verbs));
    }
    None
}
