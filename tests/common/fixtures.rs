//! Test fixture builders for integration tests: expression, annotation and
//! declaration shapes as the traversal engine would deliver them.
#![allow(dead_code)]

use servicegraph::domain::classifiers::event_config::TYPE_EVENT_PROCESSOR_CONFIGURATION;
use servicegraph::domain::decl::{
    Annotation, ClassDecl, ConstructorCall, Expr, ImportTable, Invocation, MethodDecl, MethodSig,
    Param, Statement, UnitInfo, Value,
};

pub fn lit(s: &str) -> Expr {
    Expr::Literal(Value::Str(s.into()))
}

pub fn list(items: &[&str]) -> Expr {
    Expr::ListLiteral(items.iter().map(|s| lit(s)).collect())
}

pub fn assign(target: &str, value: Expr) -> Expr {
    Expr::Assignment {
        target: target.into(),
        value: Box::new(value),
    }
}

pub fn field(name: &str) -> Expr {
    Expr::FieldAccess { name: name.into() }
}

pub fn ident(name: &str) -> Expr {
    Expr::Identifier(name.into())
}

pub fn ann(name: &str, args: Vec<Expr>) -> Annotation {
    Annotation {
        name: name.into(),
        args,
    }
}

pub fn marker(name: &str) -> Annotation {
    ann(name, vec![])
}

pub fn sig(declaring_type: &str, name: &str) -> MethodSig {
    MethodSig {
        declaring_type: declaring_type.into(),
        name: name.into(),
        is_constructor: false,
        return_type: None,
    }
}

pub fn ctor_sig(declaring_type: &str) -> MethodSig {
    MethodSig {
        declaring_type: declaring_type.into(),
        name: "<constructor>".into(),
        is_constructor: true,
        return_type: None,
    }
}

pub fn method(declaring_type: &str, name: &str, annotations: Vec<Annotation>) -> MethodDecl {
    MethodDecl {
        name: name.into(),
        annotations,
        params: vec![],
        body: vec![],
        sig: Some(sig(declaring_type, name)),
    }
}

pub fn param(name: &str, annotations: Vec<Annotation>) -> Param {
    Param {
        name: name.into(),
        annotations,
    }
}

pub fn invocation(name: &str, target: Option<MethodSig>) -> Invocation {
    Invocation {
        name: name.into(),
        target,
    }
}

/// Import table of a typical controller/configuration compilation unit, so
/// fixtures can annotate with simple names the way real source does.
pub fn spring_imports() -> ImportTable {
    [
        (
            "RestController",
            "org.springframework.web.bind.annotation.RestController",
        ),
        (
            "RequestMapping",
            "org.springframework.web.bind.annotation.RequestMapping",
        ),
        (
            "GetMapping",
            "org.springframework.web.bind.annotation.GetMapping",
        ),
        (
            "DeleteMapping",
            "org.springframework.web.bind.annotation.DeleteMapping",
        ),
        ("Bean", "org.springframework.context.annotation.Bean"),
        (
            "Qualifier",
            "org.springframework.beans.factory.annotation.Qualifier",
        ),
    ]
    .into_iter()
    .collect()
}

pub fn unit(source_path: Option<&str>) -> UnitInfo {
    UnitInfo {
        source_path: source_path.map(str::to_owned),
        imports: spring_imports(),
    }
}

/// A `@RestController` type with optional class-level route prefixes.
pub fn controller_class(prefixes: &[&str]) -> ClassDecl {
    let mut annotations = vec![marker("RestController")];
    if !prefixes.is_empty() {
        annotations.push(ann("RequestMapping", vec![list(prefixes)]));
    }
    ClassDecl {
        annotations,
        methods: vec![],
    }
}

/// A factory method returning a direct construction of the configuration
/// type with the given named `queueUrl` argument.
pub fn factory_method(
    declaring_type: &str,
    name: &str,
    qualifiers: &[&str],
    queue_url: Expr,
) -> MethodDecl {
    let mut decl = method(
        declaring_type,
        name,
        vec![ann("Bean", vec![assign("value", list(qualifiers))])],
    );
    decl.sig = Some(MethodSig {
        return_type: Some(TYPE_EVENT_PROCESSOR_CONFIGURATION.into()),
        ..sig(declaring_type, name)
    });
    decl.body = vec![Statement::Return(Expr::Construction(ConstructorCall {
        sig: Some(ctor_sig(TYPE_EVENT_PROCESSOR_CONFIGURATION)),
        args: vec![
            assign("enabled", Expr::Literal(Value::Bool(true))),
            assign("queueUrl", queue_url),
            assign("waitTimeInSeconds", Expr::Literal(Value::Int(10))),
        ],
    }))];
    decl
}
