//! Lossless JSON export/import of a populated store.
//!
//! Every node, data value and edge recorded by the session round-trips:
//! export → import into a store carrying the same schema → export again is
//! byte-identical. Node order is normalized by name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::store::{GraphStore, SchemaError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<NodeExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeExport {
    pub name: String,
    pub class: String,
    /// Data property IRI → ordered values (duplicates preserved).
    #[serde(default)]
    pub data: BTreeMap<String, Vec<String>>,
    /// Object property IRI → sorted target names.
    #[serde(default)]
    pub edges: BTreeMap<String, Vec<String>>,
}

pub fn export(store: &GraphStore) -> GraphExport {
    let mut nodes: Vec<NodeExport> = store
        .individuals()
        .map(|individual| {
            let idx = store.by_name(&individual.name).expect("indexed individual");
            let data = individual
                .data_properties()
                .map(|(property, values)| (property.to_string(), values.to_vec()))
                .collect();
            let mut edges: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for (property, target) in store.outgoing(idx) {
                edges
                    .entry(property.to_string())
                    .or_default()
                    .push(store.node(target).name.clone());
            }
            for targets in edges.values_mut() {
                targets.sort();
            }
            NodeExport {
                name: individual.name.clone(),
                class: individual.class.clone(),
                data,
                edges,
            }
        })
        .collect();
    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    GraphExport { nodes }
}

/// Replays an export into a store whose schema is already declared. Nodes are
/// created before edges so forward references resolve.
pub fn import_into(store: &mut GraphStore, export: &GraphExport) -> Result<(), SchemaError> {
    for node in &export.nodes {
        let (idx, created) = store.get_or_create(&node.name, &node.class)?;
        if created {
            for (property, values) in &node.data {
                for value in values {
                    store.add_data_property(idx, property, value)?;
                }
            }
        }
    }
    for node in &export.nodes {
        let idx = store
            .by_name(&node.name)
            .expect("node created in first pass");
        for (property, targets) in &node.edges {
            for target in targets {
                let Some(target_idx) = store.by_name(target) else {
                    continue;
                };
                store.add_object_property(idx, property, target_idx)?;
            }
        }
    }
    Ok(())
}
