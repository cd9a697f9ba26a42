//! Annotation-argument extraction: turns heterogeneous declaration metadata
//! into uniform value maps.
//!
//! Unsupported expression shapes are unmodeled facts, not errors — they are
//! dropped silently and the classifiers simply see less.

use std::collections::HashMap;

use crate::domain::decl::{Annotation, Expr, ImportTable, Value};

/// Argument name → ordered extracted values of one annotation.
pub type ArgMap = HashMap<String, Vec<Value>>;

/// The annotations of one declaration, keyed by fully-qualified name,
/// preserving metadata order. Order matters: several classifiers resolve
/// ambiguity by "first matching annotation wins".
#[derive(Debug, Default)]
pub struct AnnotationMap {
    entries: Vec<(String, ArgMap)>,
}

impl AnnotationMap {
    /// Arguments of the first annotation with the given name.
    pub fn get(&self, name: &str) -> Option<&ArgMap> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, args)| args)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgMap)> {
        self.entries.iter().map(|(n, args)| (n.as_str(), args))
    }

    /// String values of the named argument of the named annotation, when
    /// present. Non-string values are skipped.
    pub fn string_values(&self, name: &str, arg: &str) -> Option<Vec<String>> {
        let values = self.get(name)?.get(arg)?;
        Some(
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
        )
    }
}

/// Builds the [`AnnotationMap`] of a declaration, qualifying each annotation
/// name through the unit's import table. A name without an import entry is
/// used as written, which covers fully-qualified names in source.
pub fn annotation_map(annotations: &[Annotation], imports: &ImportTable) -> AnnotationMap {
    AnnotationMap {
        entries: annotations
            .iter()
            .map(|a| (imports.resolve(&a.name).to_string(), as_map(&a.args)))
            .collect(),
    }
}

/// Folds an annotation's argument expressions into a value map:
/// a bare literal or list literal lands under `"value"`, a named assignment
/// under its target name; any other shape is dropped.
pub fn as_map(args: &[Expr]) -> ArgMap {
    let mut map = ArgMap::new();
    for expr in args {
        let entry = match expr {
            Expr::Literal(_) | Expr::ListLiteral(_) => {
                extract_value(expr).map(|v| ("value".to_string(), v))
            }
            Expr::Assignment { target, value } => {
                extract_value(value).map(|v| (target.clone(), v))
            }
            _ => None,
        };
        if let Some((key, values)) = entry {
            map.insert(key, values);
        }
    }
    map
}

/// Extracts the literal value(s) of one expression. A literal yields itself,
/// a list literal its literal elements, a field access or identifier its
/// textual name; everything else yields nothing.
pub fn extract_value(expr: &Expr) -> Option<Vec<Value>> {
    match expr {
        Expr::Literal(value) => Some(vec![value.clone()]),
        Expr::ListLiteral(elements) => Some(
            elements
                .iter()
                .filter_map(|e| match e {
                    Expr::Literal(value) => Some(value.clone()),
                    _ => None,
                })
                .collect(),
        ),
        Expr::FieldAccess { name } => Some(vec![Value::Str(name.clone())]),
        Expr::Identifier(name) => Some(vec![Value::Str(name.clone())]),
        _ => None,
    }
}

/// Cartesian combination of class-level route prefixes with method-level
/// suffixes. An absent or empty class level passes the method level through
/// verbatim (absence propagates); otherwise every `prefix + suffix`
/// concatenation, outer loop over the class level, deduplicated preserving
/// first-seen order. A non-empty class level with an absent method level
/// yields the prefixes alone.
pub fn product_of(
    class_level: Option<&[String]>,
    method_level: Option<&[String]>,
) -> Option<Vec<String>> {
    let class_level = class_level.filter(|cl| !cl.is_empty());
    let Some(class_level) = class_level else {
        return method_level.map(dedup);
    };
    let combined: Vec<String> = class_level
        .iter()
        .flat_map(|prefix| match method_level {
            Some(suffixes) if !suffixes.is_empty() => suffixes
                .iter()
                .map(|suffix| format!("{prefix}{suffix}"))
                .collect::<Vec<_>>(),
            _ => vec![prefix.clone()],
        })
        .collect();
    Some(dedup(&combined))
}

fn dedup(values: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .iter()
        .filter(|v| seen.insert(v.as_str()))
        .cloned()
        .collect()
}
