//! Typed declaration model: the contract between the type-resolved traversal
//! engine and the extraction core.
//!
//! The traversal engine (parser, type attribution, import resolution) is an
//! external collaborator. It walks a program and delivers the facts below —
//! declarations it enters, invocations and constructions it sees — as
//! [`TraversalEvent`]s in tree-walk order. Everything is serde-derived so an
//! event stream can also be replayed from a file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Per-compilation-unit context: where the unit lives and what it imports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitInfo {
    /// Source file path relative to the analysis root, when known.
    pub source_path: Option<String>,
    #[serde(default)]
    pub imports: ImportTable,
}

impl UnitInfo {
    /// Repository/module scope of this unit: the parent directory of its
    /// source path. `None` when the path is absent or has no parent, in which
    /// case scope-dependent facts are simply not recorded.
    pub fn repository(&self) -> Option<String> {
        let path = self.source_path.as_deref()?;
        let parent = Path::new(path).parent()?;
        if parent.as_os_str().is_empty() {
            return None;
        }
        Some(parent.to_string_lossy().into_owned())
    }
}

/// Import table of one compilation unit: simple name → fully-qualified name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportTable {
    map: HashMap<String, String>,
}

impl ImportTable {
    pub fn insert(&mut self, simple: impl Into<String>, qualified: impl Into<String>) {
        self.map.insert(simple.into(), qualified.into());
    }

    /// Resolves a name as written to its fully-qualified form. Names without
    /// an import entry pass through unchanged, which covers names already
    /// written fully qualified in source.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.map.get(name).map(String::as_str).unwrap_or(name)
    }
}

impl<S: Into<String>, Q: Into<String>> FromIterator<(S, Q)> for ImportTable {
    fn from_iter<T: IntoIterator<Item = (S, Q)>>(iter: T) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(s, q)| (s.into(), q.into()))
                .collect(),
        }
    }
}

/// One metadata entry attached to a declaration: the annotation's name as
/// written in source plus its raw argument expressions, in source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Expr>,
}

/// A formal parameter with its own annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Resolved signature of a method or constructor, from type attribution.
/// Absent on the enclosing declaration means the fact is unresolved and the
/// declaration contributes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSig {
    /// Fully-qualified name of the declaring type.
    pub declaring_type: String,
    pub name: String,
    #[serde(default)]
    pub is_constructor: bool,
    /// Fully-qualified return type, when the resolver produced one.
    #[serde(default)]
    pub return_type: Option<String>,
}

/// A declared method or constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub body: Vec<Statement>,
    #[serde(default)]
    pub sig: Option<MethodSig>,
}

/// The enclosing type of a declaration, as far as the core needs it:
/// its annotations and its member methods (for constructor-parameter lookup).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassDecl {
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    /// The type's own constructor declaration, when it has one.
    pub fn constructor(&self) -> Option<&MethodDecl> {
        self.methods
            .iter()
            .find(|m| m.sig.as_ref().is_some_and(|s| s.is_constructor))
    }
}

/// An invocation expression: the invoked name as written plus the resolved
/// target signature (absent when type attribution failed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invocation {
    pub name: String,
    #[serde(default)]
    pub target: Option<MethodSig>,
}

/// A construction expression (`new`-equivalent): resolved constructor
/// signature plus raw argument expressions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructorCall {
    #[serde(default)]
    pub sig: Option<MethodSig>,
    #[serde(default)]
    pub args: Vec<Expr>,
}

/// A body statement. Only return statements matter to the core; everything
/// else collapses to `Other`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    Return(Expr),
    Other,
}

impl Statement {
    pub fn as_return(&self) -> Option<&Expr> {
        match self {
            Statement::Return(expr) => Some(expr),
            Statement::Other => None,
        }
    }
}

/// Closed union of the expression shapes the extraction algebra understands.
/// Any shape outside the set arrives as `Other` and maps to "no value",
/// never to a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    Literal(Value),
    Assignment { target: String, value: Box<Expr> },
    ListLiteral(Vec<Expr>),
    /// Member access such as an enum constant reference; only the simple
    /// name survives extraction.
    FieldAccess { name: String },
    Identifier(String),
    Construction(ConstructorCall),
    Other,
}

/// A literal value as the parser delivered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Lexical form used when a value is stored as a graph literal.
    pub fn render(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
        }
    }
}

/// One callback from the traversal engine, in tree-walk order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TraversalEvent {
    /// A method or constructor declaration was entered.
    MethodDeclaration {
        unit: UnitInfo,
        /// Enclosing type, when the declaration has one.
        #[serde(default)]
        class: Option<ClassDecl>,
        method: MethodDecl,
    },
    /// An invocation expression was seen inside a method body.
    Invocation {
        unit: UnitInfo,
        /// Resolved signature of the lexically enclosing declaration.
        #[serde(default)]
        caller: Option<MethodSig>,
        invocation: Invocation,
    },
    /// A construction expression was seen.
    Construction {
        unit: UnitInfo,
        #[serde(default)]
        class: Option<ClassDecl>,
        construction: ConstructorCall,
    },
}
