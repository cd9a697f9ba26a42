//! Call-graph construction through the session: filtering, merging,
//! idempotency.

mod common;

use common::fixtures::{invocation, method, sig, unit};
use servicegraph::domain::identity::individual_iri;
use servicegraph::domain::session::ExtractionSession;
use servicegraph::domain::vocab::{CLASS_METHOD, PROP_CALLS, PROP_HAS_METHOD_NAME};

#[test]
fn resolved_invocations_produce_call_edges() {
    let mut session = ExtractionSession::new().unwrap();
    session
        .invocation_seen(
            Some(&sig("com.example.A", "x")),
            &invocation("y", Some(sig("com.example.B", "y"))),
        )
        .unwrap();

    let store = session.store();
    assert_eq!(store.node_count(), 2);
    let caller = store
        .by_name(&individual_iri(CLASS_METHOD, &["com.example.A", "x"]))
        .unwrap();
    let callee = store
        .by_name(&individual_iri(CLASS_METHOD, &["com.example.B", "y"]))
        .unwrap();
    assert_eq!(store.object_targets(caller, PROP_CALLS), vec![callee]);
}

#[test]
fn intrinsic_receivers_are_filtered() {
    let mut session = ExtractionSession::new().unwrap();
    session
        .invocation_seen(
            Some(&sig("com.example.B", "y")),
            &invocation("abs", Some(sig("kotlin.math.MathKt", "abs"))),
        )
        .unwrap();

    let store = session.store();
    // The caller exists; the intrinsic callee does not.
    assert_eq!(store.node_count(), 1);
    assert_eq!(store.edge_count(), 0);
}

#[test]
fn invocation_without_caller_or_target_is_omitted() {
    let mut session = ExtractionSession::new().unwrap();
    session
        .invocation_seen(None, &invocation("y", Some(sig("com.example.B", "y"))))
        .unwrap();
    assert_eq!(session.store().node_count(), 0);

    session
        .invocation_seen(Some(&sig("com.example.A", "x")), &invocation("y", None))
        .unwrap();
    assert_eq!(session.store().node_count(), 1);
    assert_eq!(session.store().edge_count(), 0);
}

#[test]
fn repeated_invocations_add_one_edge_per_pair() {
    let mut session = ExtractionSession::new().unwrap();
    for _ in 0..3 {
        session
            .invocation_seen(
                Some(&sig("com.example.A", "x")),
                &invocation("y", Some(sig("com.example.B", "y"))),
            )
            .unwrap();
    }
    assert_eq!(session.store().node_count(), 2);
    assert_eq!(session.store().edge_count(), 1);
}

#[test]
fn method_discovered_from_unrelated_sequences_is_one_node() {
    let mut session = ExtractionSession::new().unwrap();
    let unit = unit(None);

    // Sequence 1: seen as a declaration.
    session
        .method_declared(&unit, None, &method("a.B", "y", vec![]))
        .unwrap();
    // Sequence 2: seen as a callee, then as a caller.
    session
        .invocation_seen(
            Some(&sig("a.A", "x")),
            &invocation("y", Some(sig("a.B", "y"))),
        )
        .unwrap();
    session
        .invocation_seen(
            Some(&sig("a.B", "y")),
            &invocation("z", Some(sig("a.C", "z"))),
        )
        .unwrap();

    let store = session.store();
    let y = store
        .by_name(&individual_iri(CLASS_METHOD, &["a.B", "y"]))
        .unwrap();
    // One node carrying the union of facts from every sequence.
    assert_eq!(store.data_values(y, PROP_HAS_METHOD_NAME), ["y"]);
    let z = store
        .by_name(&individual_iri(CLASS_METHOD, &["a.C", "z"]))
        .unwrap();
    assert_eq!(store.object_targets(y, PROP_CALLS), vec![z]);
    assert_eq!(store.subjects_with_object(PROP_CALLS, y).len(), 1);
    // a.A#x, a.B#y, a.C#z — nothing duplicated.
    assert_eq!(store.node_count(), 3);
}
