//! Graph Store: an in-memory labeled graph of typed individuals.
//!
//! Nodes carry a stable content-addressed name, a class, and ordered
//! data-property values; edges are typed object properties between nodes. A
//! small fixed schema (class and property declarations) is established before
//! any instance data, and instance data may only use declared terms — a
//! violation is a programming error surfaced as [`SchemaError`], never a
//! runtime condition to recover from.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// Schema misconfiguration. Fatal at store-construction/classification time;
/// well-formed runs never produce one.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("class not declared: {0}")]
    UndeclaredClass(String),

    #[error("data property not declared: {0}")]
    UndeclaredDataProperty(String),

    #[error("object property not declared: {0}")]
    UndeclaredObjectProperty(String),

    #[error("data property {property} does not accept domain class {class}")]
    DataDomainViolation { property: String, class: String },

    #[error("object property {property} does not accept {class} as {position}")]
    ObjectDomainViolation {
        property: String,
        class: String,
        position: &'static str,
    },

    #[error("individual {name} already exists as {existing}, requested {requested}")]
    ClassMismatch {
        name: String,
        existing: String,
        requested: String,
    },
}

/// One node of the graph: a named, typed individual.
#[derive(Debug, Clone)]
pub struct Individual {
    pub name: String,
    pub class: String,
    /// Data property IRI → ordered values. Duplicates are permitted and kept,
    /// mirroring multiplicity in the source (e.g. repeated route paths).
    data: HashMap<String, Vec<String>>,
}

impl Individual {
    fn new(name: String, class: String) -> Self {
        Self {
            name,
            class,
            data: HashMap::new(),
        }
    }

    pub fn data_values(&self, property: &str) -> &[String] {
        self.data.get(property).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn data_properties(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

#[derive(Default)]
struct Schema {
    classes: HashSet<String>,
    /// Data property IRI → accepted domain classes.
    data_properties: HashMap<String, HashSet<String>>,
    /// Object property IRI → (accepted domain classes, accepted range classes).
    object_properties: HashMap<String, (HashSet<String>, HashSet<String>)>,
}

/// The store itself: a directed graph of [`Individual`]s with object-property
/// IRIs as edge weights, plus a name → node map for content-addressed lookup.
///
/// One store lives for one extraction run. Mutation is in-place and
/// single-threaded; nothing is ever deleted.
#[derive(Default)]
pub struct GraphStore {
    graph: DiGraph<Individual, String>,
    by_name: HashMap<String, NodeIndex>,
    schema: Schema,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Schema setup ============

    /// Declares a node class. Redeclaration is a no-op, so independent
    /// classifiers may each declare the classes they share.
    pub fn declare_class(&mut self, class: &str) {
        self.schema.classes.insert(class.to_string());
    }

    /// Declares a data property accepting `domain` as subject class. Repeat
    /// declarations accumulate domains (two kinds may share one property).
    pub fn declare_data_property(&mut self, property: &str, domain: &str) -> Result<(), SchemaError> {
        if !self.schema.classes.contains(domain) {
            return Err(SchemaError::UndeclaredClass(domain.to_string()));
        }
        self.schema
            .data_properties
            .entry(property.to_string())
            .or_default()
            .insert(domain.to_string());
        Ok(())
    }

    /// Declares an object property from `domain` to `range`. Repeat
    /// declarations accumulate both sides.
    pub fn declare_object_property(
        &mut self,
        property: &str,
        domain: &str,
        range: &str,
    ) -> Result<(), SchemaError> {
        for class in [domain, range] {
            if !self.schema.classes.contains(class) {
                return Err(SchemaError::UndeclaredClass(class.to_string()));
            }
        }
        let (domains, ranges) = self
            .schema
            .object_properties
            .entry(property.to_string())
            .or_default();
        domains.insert(domain.to_string());
        ranges.insert(range.to_string());
        Ok(())
    }

    // ============ Instance data ============

    /// Idempotent get-or-create by content-addressed name. The bool is true
    /// when the node was created by this call. An existing node under a
    /// different class is a programming error: identity keys are disjoint per
    /// kind, so this should never occur.
    pub fn get_or_create(&mut self, name: &str, class: &str) -> Result<(NodeIndex, bool), SchemaError> {
        if !self.schema.classes.contains(class) {
            return Err(SchemaError::UndeclaredClass(class.to_string()));
        }
        if let Some(&idx) = self.by_name.get(name) {
            let existing = &self.graph[idx].class;
            if existing != class {
                return Err(SchemaError::ClassMismatch {
                    name: name.to_string(),
                    existing: existing.clone(),
                    requested: class.to_string(),
                });
            }
            return Ok((idx, false));
        }
        let idx = self
            .graph
            .add_node(Individual::new(name.to_string(), class.to_string()));
        self.by_name.insert(name.to_string(), idx);
        Ok((idx, true))
    }

    /// Appends `value` to the node's ordered list for `property`. Duplicate
    /// property/value pairs are kept, not deduplicated.
    pub fn add_data_property(
        &mut self,
        node: NodeIndex,
        property: &str,
        value: impl Into<String>,
    ) -> Result<(), SchemaError> {
        let class = &self.graph[node].class;
        let domains = self
            .schema
            .data_properties
            .get(property)
            .ok_or_else(|| SchemaError::UndeclaredDataProperty(property.to_string()))?;
        if !domains.contains(class) {
            return Err(SchemaError::DataDomainViolation {
                property: property.to_string(),
                class: class.clone(),
            });
        }
        self.graph[node]
            .data
            .entry(property.to_string())
            .or_default()
            .push(value.into());
        Ok(())
    }

    /// Adds `target` to the set under `property`. Re-adding an existing edge
    /// is a no-op.
    pub fn add_object_property(
        &mut self,
        node: NodeIndex,
        property: &str,
        target: NodeIndex,
    ) -> Result<(), SchemaError> {
        let (domains, ranges) = self
            .schema
            .object_properties
            .get(property)
            .ok_or_else(|| SchemaError::UndeclaredObjectProperty(property.to_string()))?;
        for (class, accepted, position) in [
            (&self.graph[node].class, domains, "domain"),
            (&self.graph[target].class, ranges, "range"),
        ] {
            if !accepted.contains(class) {
                return Err(SchemaError::ObjectDomainViolation {
                    property: property.to_string(),
                    class: class.clone(),
                    position,
                });
            }
        }
        let already = self
            .graph
            .edges_connecting(node, target)
            .any(|e| e.weight() == property);
        if !already {
            self.graph.add_edge(node, target, property.to_string());
        }
        Ok(())
    }

    // ============ Query surface ============

    pub fn node(&self, idx: NodeIndex) -> &Individual {
        &self.graph[idx]
    }

    pub fn by_name(&self, name: &str) -> Option<NodeIndex> {
        self.by_name.get(name).copied()
    }

    pub fn nodes_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = NodeIndex> + 'a {
        self.graph
            .node_indices()
            .filter(move |&idx| self.graph[idx].class == class)
    }

    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.graph.node_weights()
    }

    pub fn data_values(&self, node: NodeIndex, property: &str) -> &[String] {
        self.graph[node].data_values(property)
    }

    pub fn has_data_value(&self, node: NodeIndex, property: &str, value: &str) -> bool {
        self.data_values(node, property).iter().any(|v| v == value)
    }

    /// Targets of the node's outgoing `property` edges, in insertion order.
    pub fn object_targets(&self, node: NodeIndex, property: &str) -> Vec<NodeIndex> {
        let mut targets: Vec<NodeIndex> = self
            .graph
            .edges(node)
            .filter(|e| e.weight() == property)
            .map(|e| e.target())
            .collect();
        // petgraph iterates outgoing edges most-recent first.
        targets.reverse();
        targets
    }

    /// All outgoing edges of a node as (property, target) pairs.
    pub fn outgoing(&self, node: NodeIndex) -> Vec<(&str, NodeIndex)> {
        let mut edges: Vec<(&str, NodeIndex)> = self
            .graph
            .edges(node)
            .map(|e| (e.weight().as_str(), e.target()))
            .collect();
        edges.reverse();
        edges
    }

    /// Subjects that have a `property` edge pointing at `target`.
    pub fn subjects_with_object(&self, property: &str, target: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .edges_directed(target, Direction::Incoming)
            .filter(|e| e.weight() == property)
            .map(|e| e.source())
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
