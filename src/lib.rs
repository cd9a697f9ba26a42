//! servicegraph library — architectural knowledge-graph extraction from
//! type-resolved traversal facts.

pub mod adapters;
pub mod cli;
pub mod domain;
