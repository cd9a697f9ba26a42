//! Turtle-style serialization of a populated store.
//!
//! Output is sorted by subject name so identical stores serialize to
//! identical bytes. Schema classes become `sg:`-prefixed names; individuals
//! keep their full IRIs (their names contain `#`, which a prefixed local
//! name cannot).

use std::io::Write;

use anyhow::Result;

use crate::domain::store::GraphStore;
use crate::domain::vocab::NS_TBOX;

pub fn write_turtle(store: &GraphStore, out: &mut impl Write) -> Result<()> {
    writeln!(out, "@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .")?;
    writeln!(out, "@prefix sg: <{NS_TBOX}> .")?;
    writeln!(out)?;

    let mut nodes: Vec<_> = store
        .individuals()
        .map(|individual| store.by_name(&individual.name).expect("indexed individual"))
        .collect();
    nodes.sort_by(|&a, &b| store.node(a).name.cmp(&store.node(b).name));

    for idx in nodes {
        let individual = store.node(idx);
        write!(out, "<{}> rdf:type {}", individual.name, qname(&individual.class))?;

        let mut data: Vec<(&str, &[String])> = individual.data_properties().collect();
        data.sort_by_key(|(property, _)| *property);
        for (property, values) in data {
            for value in values {
                write!(out, " ;\n    {} {}", qname(property), literal(value))?;
            }
        }

        let mut edges: Vec<(String, String)> = store
            .outgoing(idx)
            .into_iter()
            .map(|(property, target)| (property.to_string(), store.node(target).name.clone()))
            .collect();
        edges.sort();
        for (property, target) in edges {
            write!(out, " ;\n    {} <{}>", qname(&property), target)?;
        }

        writeln!(out, " .")?;
    }
    Ok(())
}

pub fn turtle_string(store: &GraphStore) -> Result<String> {
    let mut buf = Vec::new();
    write_turtle(store, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn qname(iri: &str) -> String {
    match iri.strip_prefix(NS_TBOX) {
        Some(local) => format!("sg:{local}"),
        None => format!("<{iri}>"),
    }
}

fn literal(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calls::ensure_method;
    use crate::domain::decl::MethodSig;
    use crate::domain::session::base_schema;
    use crate::domain::store::GraphStore;
    use crate::domain::vocab::local_name as ln;

    #[test]
    fn serializes_types_properties_and_edges() {
        let mut store = GraphStore::new();
        base_schema(&mut store).unwrap();
        let caller = ensure_method(
            &mut store,
            &MethodSig {
                declaring_type: "a.B".into(),
                name: "y".into(),
                is_constructor: false,
                return_type: None,
            },
        )
        .unwrap();
        let callee = ensure_method(
            &mut store,
            &MethodSig {
                declaring_type: "a.C".into(),
                name: "z".into(),
                is_constructor: false,
                return_type: None,
            },
        )
        .unwrap();
        store
            .add_object_property(caller, crate::domain::vocab::PROP_CALLS, callee)
            .unwrap();

        let text = turtle_string(&store).unwrap();
        assert!(text.contains("rdf:type sg:Method"));
        assert!(text.contains("sg:hasMethodName \"y\""));
        assert!(text.contains("sg:hasFullyQualifiedClassName \"a.B\""));
        let callee_name = store.node(callee).name.clone();
        assert!(text.contains(&format!("sg:calls <{callee_name}>")));
    }

    #[test]
    fn literals_are_escaped() {
        assert_eq!(literal(r#"a"b"#), r#""a\"b""#);
        assert_eq!(literal("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn local_name_used_for_prefixing_matches_vocab() {
        assert_eq!(ln("http://servicegraph.dev/ontology/Method"), "Method");
        assert_eq!(qname("http://servicegraph.dev/ontology/Method"), "sg:Method");
        assert_eq!(qname("urn:other"), "<urn:other>");
    }
}
