//! Small combinators the engine and its callers lean on.
//!
//! `map`/`filter`/`fold` are iterator adapters and aren't re-wrapped here.
use indexmap::IndexMap;
use std::hash::Hash;
use thiserror::Error;

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AlgorithmError {
    #[error("empty sequence")]
    EmptySequence,
}

pub fn identity<T>(x: T) -> T {
    x
}

pub fn constant_function<T: Clone>(x: T) -> impl Fn() -> T {
    move || x.clone()
}

/// Right-to-left: `compose(f, g)(x) == f(g(x))`.
pub fn compose<A, B, C>(f: impl Fn(B) -> C, g: impl Fn(A) -> B) -> impl Fn(A) -> C {
    move |x| f(g(x))
}

pub fn partial_left<A: Clone, B, C>(f: impl Fn(A, B) -> C, a: A) -> impl Fn(B) -> C {
    move |b| f(a.clone(), b)
}

pub fn partial_right<A, B: Clone, C>(f: impl Fn(A, B) -> C, b: B) -> impl Fn(A) -> C {
    move |a| f(a, b.clone())
}

pub fn flip<A, B, C>(f: impl Fn(A, B) -> C) -> impl Fn(B, A) -> C {
    move |b, a| f(a, b)
}

pub fn head<T>(seq: &[T]) -> Result<&T, AlgorithmError> {
    seq.first().ok_or(AlgorithmError::EmptySequence)
}

pub fn tail<T>(seq: &[T]) -> Result<&[T], AlgorithmError> {
    match seq {
        [] => Err(AlgorithmError::EmptySequence),
        [_, rest @ ..] => Ok(rest),
    }
}

/// Position of the first element equal to `value`; `None` is the not-found
/// sentinel.
pub fn index_of<T: PartialEq>(seq: &[T], value: &T) -> Option<usize> {
    seq.iter().position(|x| x == value)
}

/// Concatenate sequences in order.
pub fn extend<T: Clone>(lists: &[&[T]]) -> Vec<T> {
    lists.iter().flat_map(|xs| xs.iter().cloned()).collect()
}

/// Merge keyed maps left to right. A later key overwrites the value but
/// keeps the position where the key first appeared.
pub fn extend_keyed<K: Hash + Eq + Clone, V: Clone>(maps: &[&IndexMap<K, V>]) -> IndexMap<K, V> {
    let mut out = IndexMap::new();
    for map in maps {
        for (k, v) in map.iter() {
            out.insert(k.clone(), v.clone());
        }
    }
    out
}

/// Drop nulls and booleans.
pub fn compact(values: &[Value]) -> Vec<Value> {
    values.iter().filter(|v| !matches!(v, Value::Null | Value::Bool(_))).cloned().collect()
}

/// Flatten nested lists depth-first.
pub fn flatten(values: &[Value]) -> Vec<Value> {
    let mut out = Vec::new();
    for v in values {
        match v {
            Value::List(xs) => out.extend(flatten(xs)),
            other => out.push(other.clone()),
        }
    }
    out
}

pub fn every<T>(seq: &[T], pred: impl Fn(&T) -> bool) -> bool {
    seq.iter().all(pred)
}

pub fn any<T>(seq: &[T], pred: impl Fn(&T) -> bool) -> bool {
    seq.iter().any(pred)
}

/// Two-element lists become entries; anything else is skipped.
pub fn from_pairs(pairs: &[Value]) -> IndexMap<String, Value> {
    pairs
        .iter()
        .filter_map(|p| match p.as_list() {
            Some([Value::Str(k), v]) => Some((k.clone(), v.clone())),
            _ => None,
        })
        .collect()
}

// ------------------------------- Tests ------------------------------------ //
