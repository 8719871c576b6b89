//! Binding counts per pattern, for positional dispatch.
use indexmap::IndexMap;

use crate::algorithms::index_of;
use crate::pattern::{self, PatternSpec};
use crate::pattern_set::PatternSet;

/// Number of binding holes a pattern exposes.
pub fn arity(src: &str) -> usize {
    arity_of(&pattern::parse(src))
}

pub fn arity_of(spec: &PatternSpec) -> usize {
    match spec {
        PatternSpec::Wildcard | PatternSpec::Literal(_) => 0,
        PatternSpec::Ident(_) => 1,
        PatternSpec::List(xs) | PatternSpec::Cons(xs) => xs.iter().map(arity_of).sum(),
    }
}

/// Arity of every pattern, keyed and ordered like the input.
pub fn arities<I>(patterns: I) -> IndexMap<String, usize>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|p| (p.as_ref().to_string(), arity(p.as_ref())))
        .collect()
}

/// Arities of one pattern set, computed once per dispatch call.
#[derive(Debug)]
pub struct ArityIndex<'s> {
    keys: Vec<&'s str>,
    /// `None` marks the fallback, which never competes on arity.
    arities: Vec<Option<usize>>,
}

impl<'s> ArityIndex<'s> {
    pub fn new<R>(set: &'s PatternSet<'_, R>) -> Self {
        let mut keys = Vec::with_capacity(set.len());
        let mut arities = Vec::with_capacity(set.len());
        for key in set.patterns() {
            keys.push(key);
            arities.push(set.spec(key).filter(|spec| !spec.is_wildcard()).map(arity_of));
        }
        Self { keys, arities }
    }

    pub fn get(&self, pattern: &str) -> Option<usize> {
        let i = index_of(&self.keys, &pattern)?;
        Some(self.arities[i].unwrap_or(0))
    }

    /// First pattern, in declaration order, whose arity is `n`.
    pub fn first_with(&self, n: usize) -> Option<&'s str> {
        if n == 0 && self.keys.len() == 1 && self.arities[0].is_none() {
            return Some(self.keys[0]);
        }
        index_of(&self.arities, &Some(n)).map(|i| self.keys[i])
    }
}

// ------------------------------- Tests ------------------------------------ //
