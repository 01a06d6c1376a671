//! End-to-end integration tests for the schemata learner.
//!
//! These tests exercise the full pipeline from raw experience through
//! learning, ranking and inference, and check the properties every public
//! operation promises: inputs are never mutated, learning is idempotent and
//! ties are broken by order.

use schemata::action::{Action, ActionKind};
use schemata::config::SchemataConfig;
use schemata::detect::{ImageSchema, detect_schemas};
use schemata::experience::Experience;
use schemata::fact::Fact;
use schemata::infer::infer;
use schemata::matcher::match_fact;
use schemata::pattern::Pattern;
use schemata::reconcile::{reconcile_facts, reconcile_patterns};
use schemata::similarity::most_similar;
use schemata::store::{LearnOutcome, PatternStore};
use schemata::symbol::{Placeholder, Symbol, Term};

fn in_(a: (&str, &str), b: (&str, &str)) -> Fact {
    Fact::ground("in", [Symbol::new(a.0, a.1), Symbol::new(b.0, b.1)])
}

fn at(a: (&str, &str), b: (&str, &str)) -> Fact {
    Fact::ground("at", [Symbol::new(a.0, a.1), Symbol::new(b.0, b.1)])
}

fn stay(fact: Fact) -> Pattern {
    Pattern::new(vec![fact.clone()], None, vec![fact])
}

fn insert(item: &str, container: &str) -> Pattern {
    let held = in_((item, "o"), ("I", "I"));
    let action = Action::with_terms(
        ActionKind::Insert,
        vec![Term::symbol(item, "o"), Term::symbol(container, "c")],
    )
    .unwrap();
    Pattern::new(vec![held], Some(action), vec![in_((item, "o"), (container, "c"))])
}

fn placeholder_of(term: &Term) -> &Placeholder {
    term.as_placeholder().expect("expected a placeholder")
}

#[test]
fn learn_is_idempotent() {
    let orange = stay(in_(("orange", "f"), ("fridge", "c")));
    let once = PatternStore::new().learn(&orange, "CONTAINMENT");
    assert_eq!(once.learn(&orange, "CONTAINMENT"), once);

    let generalized = once
        .learn(&insert("key", "box"), "CONTAINMENT")
        .learn(&insert("map", "box"), "CONTAINMENT");
    let rule = generalized.get("CONTAINMENT").unwrap()[1].clone();
    assert!(!rule.is_ground());
    assert_eq!(generalized.learn(&rule, "CONTAINMENT"), generalized);
}

#[test]
fn operations_leave_their_inputs_untouched() {
    let store = PatternStore::new().learn(&insert("key", "box"), "CONTAINMENT");
    let query = insert("map", "box");
    let (store_before, query_before) = (store.clone(), query.clone());

    let learned = store.learn(&query, "CONTAINMENT");
    let _ = most_similar(&query, &learned);
    let rule = learned.get("CONTAINMENT").unwrap()[0].clone();
    let rule_before = rule.clone();
    let _ = infer(&rule, &query);
    let _ = reconcile_patterns(&rule, &query);

    assert_eq!(store, store_before);
    assert_eq!(query, query_before);
    assert_eq!(rule, rule_before);
    assert!(rule.placeholders().all(|p| !p.is_bound()));
}

#[test]
fn equal_matches_go_to_the_first_candidate() {
    let fact = in_(("bread", "f"), ("fridge", "c"));
    let a = in_(("orange", "f"), ("fridge", "c"));
    let b = in_(("apple", "f"), ("fridge", "c"));
    let candidates = [a.clone(), b];
    let found = match_fact(&fact, &candidates).unwrap();
    assert_eq!(found.candidate, &a);
    assert_eq!(found.index, 0);
}

#[test]
fn bread_and_orange_generalize_to_food_in_fridge() {
    let rec = reconcile_facts(
        &in_(("bread", "f"), ("fridge", "c")),
        &in_(("orange", "f"), ("fridge", "c")),
    )
    .unwrap();
    let ph = placeholder_of(&rec.fact.args[0]);
    assert_eq!(ph.position, Some(0));
    assert_eq!(rec.fact.args[1], Term::symbol("fridge", "c"));
    assert_eq!(rec.bindings.left.get(&Term::symbol("bread", "f")), Some(ph));
    assert!(rec.bindings.right.contains(&Term::symbol("orange", "f")));
}

#[test]
fn different_relations_are_irreconcilable() {
    let bread = stay(in_(("bread", "f"), ("fridge", "c")));
    let chair = stay(at(("chair", "o"), ("kitchen", "r")));
    assert!(reconcile_patterns(&bread, &chair).is_none());
}

#[test]
fn rules_and_exceptions_accumulate_under_one_schema() {
    let store = PatternStore::new().learn(&stay(in_(("orange", "f"), ("fridge", "c"))), "CONTAINMENT");
    let store = store
        .learn(&insert("key", "box"), "CONTAINMENT")
        .learn(&insert("map", "box"), "CONTAINMENT");

    let patterns = store.get("CONTAINMENT").unwrap();
    assert_eq!(patterns.len(), 2);
    let rule = &patterns[1];
    let ph = placeholder_of(&rule.pre[0].args[0]);
    let action = rule.action.as_ref().unwrap();
    assert_eq!(action.resolved()[0].as_ref().map(placeholder_of), Some(ph));
    assert_eq!(placeholder_of(&rule.post[0].args[0]), ph);

    // Inserting into a locked box leaves the key in the inventory: same
    // signature, different outcome.
    let mut refused = insert("key", "box");
    refused.post = vec![in_(("key", "o"), ("I", "I"))];
    let (store, outcome) = store.learn_with_outcome(&refused, "CONTAINMENT");
    assert_eq!(outcome, LearnOutcome::Exception { matched: 1, index: 2 });
    assert_eq!(store.get("CONTAINMENT").unwrap()[2], refused);
}

#[test]
fn stored_exceptions_are_not_learned_twice() {
    let store = PatternStore::new()
        .learn(&insert("key", "box"), "CONTAINMENT")
        .learn(&insert("map", "box"), "CONTAINMENT");
    let mut refused = insert("key", "box");
    refused.post = vec![in_(("key", "o"), ("I", "I"))];

    let once = store.learn(&refused, "CONTAINMENT");
    assert_eq!(once.get("CONTAINMENT").unwrap().len(), 2);
    let (twice, outcome) = once.learn_with_outcome(&refused, "CONTAINMENT");
    assert_eq!(outcome, LearnOutcome::Known { index: 1 });
    assert_eq!(twice, once);
}

#[test]
fn inference_predicts_the_effect_of_an_action() {
    let (x, y) = (Term::Placeholder(Placeholder::new()), Term::Placeholder(Placeholder::new()));
    let abstract_pattern = Pattern::new(
        vec![Fact::new("in", vec![x.clone(), Term::symbol("I", "I")])],
        Some(Action::with_terms(ActionKind::Insert, vec![x.clone(), y.clone()]).unwrap()),
        vec![Fact::new("in", vec![x, y])],
    );
    let mut source = insert("envelope", "box");
    source.post.clear();

    let inference = infer(&abstract_pattern, &source).unwrap();
    assert_eq!(inference.bindings.len(), 2);
    assert!(inference.bindings.values().any(|s| s.name == "envelope"));
    assert!(inference.bindings.values().any(|s| s.name == "box"));
    assert_eq!(inference.pattern.post[0].to_string(), "in(envelope, box)");
    assert!(abstract_pattern.placeholders().all(|p| !p.is_bound()));
}

#[test]
fn inference_recovers_causes_from_an_effect() {
    let (x, y, z) = (
        Term::Placeholder(Placeholder::new()),
        Term::Placeholder(Placeholder::new()),
        Term::Placeholder(Placeholder::new()),
    );
    let abstract_pattern = Pattern::new(
        vec![Fact::new("in", vec![x.clone(), y])],
        Some(Action::with_terms(ActionKind::Insert, vec![x.clone(), z.clone()]).unwrap()),
        vec![Fact::new("in", vec![x, z])],
    );
    let source = Pattern::new(vec![], None, vec![in_(("potato", "f"), ("basket", "c"))]);

    let inference = infer(&abstract_pattern, &source).unwrap();
    let action = inference.pattern.action.as_ref().unwrap();
    assert_eq!(action.to_string(), "insert potato into basket");
    assert_eq!(
        inference.pattern.pre[0].args[0].resolved(),
        Some(&Symbol::new("potato", "f"))
    );
}

#[test]
fn learned_rule_predicts_an_unseen_insertion() {
    let store = PatternStore::new()
        .learn(&insert("key", "box"), "CONTAINMENT")
        .learn(&insert("map", "drawer"), "CONTAINMENT");

    let mut query = insert("coin", "jar");
    query.post.clear();
    let found = most_similar(&query, &store).unwrap();
    assert_eq!(found.schema, "CONTAINMENT");

    let inference = infer(found.pattern, &query).unwrap();
    assert_eq!(inference.pattern.post[0].to_string(), "in(coin, jar)");
}

#[test]
fn raw_walkthrough_is_learned_under_detected_schemas() {
    let config = SchemataConfig::default();
    let kitchen = vec![
        at(("P", "P"), ("kitchen", "r")),
        in_(("key", "o"), ("box", "c")),
        in_(("map", "o"), ("box", "c")),
    ];
    let take = |item: &str, before: &[Fact], after: Vec<Fact>| {
        Experience::new(
            before.to_vec(),
            Some(Action::from_command(&format!("take {item} from box"), before).unwrap()),
            after,
        )
    };

    let mut after_key = kitchen.clone();
    after_key[1] = in_(("key", "o"), ("I", "I"));
    let mut after_map = after_key.clone();
    after_map[2] = in_(("map", "o"), ("I", "I"));
    let steps = [take("key", &kitchen, after_key.clone()), take("map", &after_key, after_map)];

    let mut store = PatternStore::new();
    for step in &steps {
        let pattern = step.to_pattern(config.diff_experiences);
        let detected = detect_schemas(&pattern, &config);
        assert_eq!(detected, vec![ImageSchema::SourcePath, ImageSchema::GoalPath]);
        for schema in detected {
            store = store.learn(&pattern, schema.store_name());
        }
    }

    assert_eq!(store.len(), 2);
    let rule = &store.get("SOURCE_PATH").unwrap()[0];
    assert_eq!(store.get("SOURCE_PATH").unwrap().len(), 1);
    assert!(rule.pre[0].args[0].is_placeholder());
    assert_eq!(rule.pre[0].args[1], Term::symbol("box", "c"));
    assert_eq!(rule.post[0].args[1], Term::symbol("I", "I"));
    assert_eq!(rule.action.as_ref().unwrap().resolved()[1], Some(Term::symbol("box", "c")));
}
