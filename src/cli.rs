//! Thin command implementations over the extraction core.

use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::info;

use crate::adapters::events::load_events;
use crate::adapters::{export, turtle};
use crate::domain::session::ExtractionSession;
use crate::domain::store::GraphStore;
use crate::domain::vocab::{
    CLASS_ENDPOINT, CLASS_EVENT_PROCESSOR_CONFIGURATION, CLASS_METHOD, CLASS_RETROFIT_CLIENT,
    PROP_HAS_HTTP_METHOD, PROP_HAS_PATH, local_name,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Turtle,
    Json,
}

/// Replay a recorded event stream and write the resulting graph.
pub fn run_extract(events_path: &Path, out: Option<&Path>, format: OutputFormat) -> Result<()> {
    let store = extract(events_path)?;
    let rendered = match format {
        OutputFormat::Turtle => turtle::turtle_string(&store)?,
        OutputFormat::Json => serde_json::to_string_pretty(&export::export(&store))?,
    };
    match out {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write model: {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Replay a recorded event stream and print a per-kind summary.
pub fn run_inspect(events_path: &Path) -> Result<()> {
    let store = extract(events_path)?;

    println!("Graph summary:");
    println!("  Nodes: {}", store.node_count());
    println!("  Edges: {}", store.edge_count());
    for class in [
        CLASS_METHOD,
        CLASS_ENDPOINT,
        CLASS_RETROFIT_CLIENT,
        CLASS_EVENT_PROCESSOR_CONFIGURATION,
    ] {
        println!(
            "  {}: {}",
            local_name(class),
            store.nodes_with_class(class).count()
        );
    }

    for class in [CLASS_ENDPOINT, CLASS_RETROFIT_CLIENT] {
        let mut routes: Vec<String> = store
            .nodes_with_class(class)
            .map(|idx| {
                let verb = store
                    .data_values(idx, PROP_HAS_HTTP_METHOD)
                    .first()
                    .map(String::as_str)
                    .unwrap_or("?");
                format!("{verb} {}", store.data_values(idx, PROP_HAS_PATH).join(", "))
            })
            .collect();
        if routes.is_empty() {
            continue;
        }
        routes.sort();
        println!("\n{}s:", local_name(class));
        for route in routes {
            println!("  {route}");
        }
    }
    Ok(())
}

fn extract(events_path: &Path) -> Result<GraphStore> {
    let events = load_events(events_path)?;
    let mut session = ExtractionSession::new().context("Failed to construct session schema")?;
    let summary = session
        .replay(&events)
        .context("Failed to replay event stream")?;
    info!(
        declarations = summary.declarations,
        recognized = summary.recognized,
        invocations = summary.invocations,
        constructions = summary.constructions,
        "extraction complete"
    );
    Ok(session.into_store())
}
