//! Fixed schema vocabulary: the namespaces plus every class and property IRI
//! an extraction run may use.
//!
//! TBox IRIs name the schema (classes and properties); ABox IRIs name the
//! individuals minted by [`crate::domain::identity`]. The vocabulary is closed:
//! the [`crate::domain::store::GraphStore`] rejects instance data that uses an
//! IRI nobody declared.

/// Namespace for schema terms (classes, properties).
pub const NS_TBOX: &str = "http://servicegraph.dev/ontology/";

/// Namespace for instance data (individuals).
pub const NS_ABOX: &str = "http://servicegraph.dev/data/";

// ============ Methods & the call graph ============

pub const CLASS_METHOD: &str = "http://servicegraph.dev/ontology/Method";
pub const PROP_CALLS: &str = "http://servicegraph.dev/ontology/calls";
pub const PROP_HAS_METHOD_NAME: &str = "http://servicegraph.dev/ontology/hasMethodName";
pub const PROP_HAS_FQCN: &str = "http://servicegraph.dev/ontology/hasFullyQualifiedClassName";

// ============ HTTP endpoints (inbound) ============

pub const CLASS_ENDPOINT: &str = "http://servicegraph.dev/ontology/Endpoint";
pub const PROP_HAS_ENDPOINT: &str = "http://servicegraph.dev/ontology/hasEndpoint";
pub const PROP_HAS_PATH: &str = "http://servicegraph.dev/ontology/hasPath";
pub const PROP_HAS_HTTP_METHOD: &str = "http://servicegraph.dev/ontology/hasHttpMethod";

// ============ Retrofit clients (outbound) ============

pub const CLASS_RETROFIT_CLIENT: &str = "http://servicegraph.dev/ontology/RetrofitClient";
pub const PROP_IS_RETROFIT_CLIENT: &str = "http://servicegraph.dev/ontology/isRetrofitClient";

// ============ Event-processor configurations ============

pub const CLASS_EVENT_PROCESSOR_CONFIGURATION: &str =
    "http://servicegraph.dev/ontology/EventProcessorConfiguration";
pub const PROP_HAS_CONFIG: &str = "http://servicegraph.dev/ontology/hasConfig";
pub const PROP_HAS_QUEUE_URL: &str = "http://servicegraph.dev/ontology/hasQueueURL";
pub const PROP_HAS_QUALIFIER: &str = "http://servicegraph.dev/ontology/hasQualifier";

/// Local name of an IRI: the fragment after the last `#` or `/`.
pub fn local_name(iri: &str) -> &str {
    let cut = iri.rfind(['#', '/']).map(|i| i + 1).unwrap_or(0);
    &iri[cut..]
}
