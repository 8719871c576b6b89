use pattern_dispatch::monad::{IO, State};
use pattern_dispatch::{arities, dispatch, let_in, match_value, Object, PatternSet, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

fn s(v: &str) -> Value {
    Value::from(v)
}

#[test]
fn arity_dispatch_divides() {
    let set: PatternSet<f64> = PatternSet::new()
        .with("(x:y:_)", |a| a[0].as_f64().unwrap_or(0.0) / a[1].as_f64().unwrap_or(1.0))
        .with("(x:_)", |a| a[0].as_f64().unwrap_or(0.0) / 2.0)
        .with("_", |_| 1.0);
    assert_eq!(dispatch(&set, &[Value::from(10), Value::from(5)]), 2.0);
}

#[test]
fn arities_of_cons_patterns() {
    let got: Vec<usize> = arities(["(a:b:_)", "(a:_)", "_"]).into_values().collect();
    assert_eq!(got, vec![2, 1, 0]);
}

#[test]
fn unmatched_scalars_always_reach_the_fallback() {
    let set: PatternSet<Value> = PatternSet::new()
        .with("\"foo\"", |_| s("F"))
        .with("\"bar\"", |_| s("B"))
        .with("_", |_| s("U"));
    assert_eq!(match_value(&set, &s("foo")), s("F"));
    for subject in [s("baz"), Value::from(3), Value::Float(0.5), Value::Bool(true), Value::Null, s("")] {
        assert_eq!(match_value(&set, &subject), s("U"), "{subject:?}");
    }
}

#[test]
fn quoted_numbers_match_numeric_subjects() {
    let set: PatternSet<Value> = PatternSet::new()
        .with("\"1\"", |_| s("X"))
        .with("\"2\"", |_| s("Y"))
        .with("_", |_| s("Z"));
    assert_eq!(match_value(&set, &Value::from(1)), s("X"));
    assert_eq!(match_value(&set, &Value::from(24)), s("Z"));
}

#[test]
fn list_patterns_bind_trailing_element() {
    let set: PatternSet<Value> = PatternSet::new()
        .with("[\"foo\", \"bar\", baz]", |a| s(&a[0].as_str().unwrap_or_default().to_uppercase()))
        .with("[\"foo\", \"bar\"]", |_| s("foo-bar"))
        .with("_", |_| s("undefined"));
    assert_eq!(match_value(&set, &Value::from(vec!["foo", "bar"])), s("foo-bar"));
    assert_eq!(match_value(&set, &Value::from(vec!["foo", "bar", "cat"])), s("CAT"));
    assert_eq!(match_value(&set, &Value::List(vec![])), s("undefined"));
}

#[test]
fn list_matches_never_cross_lengths_or_miscount_bindings() {
    let set: PatternSet<Value> = PatternSet::new()
        .with("[a]", |a| Value::from(vec![Value::from(1), Value::List(a.to_vec())]))
        .with("[a, _, b]", |a| Value::from(vec![Value::from(3), Value::List(a.to_vec())]))
        .with("[_, _]", |a| Value::from(vec![Value::from(2), Value::List(a.to_vec())]))
        .with("_", |_| Value::Null);

    let subject = Value::from(json!([7, 8, 9]));
    assert_eq!(match_value(&set, &subject), Value::from(json!([3, [7, 9]])));

    let subject = Value::from(json!(["x", "y"]));
    assert_eq!(match_value(&set, &subject), Value::from(json!([2, []])));

    let subject = Value::from(json!([1, 2, 3, 4]));
    assert_eq!(match_value(&set, &subject), Value::Null);
}

#[test]
fn wildcard_list_beats_fallback() {
    let set: PatternSet<Value> = PatternSet::new()
        .with("[_, \"chemem\"]", |_| s("chemem"))
        .with("_", |_| s("don't care"));
    assert_eq!(match_value(&set, &Value::from(vec!["func", "chemem"])), s("chemem"));
}

#[test]
fn objects_match_by_type() {
    let set: PatternSet<Value> = PatternSet::new()
        .with("IO", |_| s("IO monad"))
        .with("State", |_| s("State monad"))
        .with("_", |_| s("NaN"));
    assert_eq!(match_value(&set, &Object::new(IO::of(12)).into()), s("IO monad"));
    assert_eq!(match_value(&set, &Object::new(State::<i64, i64>::of(0)).into()), s("State monad"));
    assert_eq!(match_value(&set, &Value::from(json!({"a": 1}))), s("NaN"));
}

#[test]
fn let_in_resolves_names() {
    let scope = let_in(&["a", "b", "c"], 1..=10);
    assert_eq!(scope.bind(&["c"], |v| v[0].as_i64().unwrap_or(0) * 10), 30);

    let scope = let_in(&["a", "_", "_", "b"], 1..=10);
    let sum = scope.bind(&["a", "b"], |v| v[0].as_i64().unwrap_or(0) + v[1].as_i64().unwrap_or(0));
    assert_eq!(sum, 5);
}

#[test]
fn let_in_undeclared_name_gets_residual_list() {
    let scope = let_in(&["a", "_", "_", "b"], 1..=4);
    let got = scope.bind(&["missing"], |v| v);
    assert_eq!(got, vec![Value::from(vec![2, 3])]);
}

#[test]
fn matching_has_no_hidden_state() {
    let set: PatternSet<Value> = PatternSet::new()
        .with("[\"k\", v]", |a| a[0].clone())
        .with("\"k\"", |_| s("scalar"))
        .with("_", |_| Value::Null);
    let subjects = [Value::from(vec!["k", "v"]), s("k"), Value::from(5)];
    let first: Vec<Value> = subjects.iter().map(|x| match_value(&set, x)).collect();
    let second: Vec<Value> = subjects.iter().rev().map(|x| match_value(&set, x)).collect();
    assert_eq!(first, second.into_iter().rev().collect::<Vec<_>>());
}
