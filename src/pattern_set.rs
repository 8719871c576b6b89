//! Ordered pattern → handler table.
use std::fmt;

use indexmap::IndexMap;

use crate::pattern::{self, PatternSpec, WILDCARD};
use crate::value::Value;

/// Handlers receive the bound values positionally.
pub type Handler<'a, R> = Box<dyn Fn(&[Value]) -> R + 'a>;

struct Entry<'a, R> {
    spec: PatternSpec,
    handler: Handler<'a, R>,
}

/// Declaration order is the tie-break of last resort, so this is an
/// `IndexMap` rather than a hash map. Patterns are parsed once, on insert.
pub struct PatternSet<'a, R> {
    entries: IndexMap<String, Entry<'a, R>>,
}

impl<'a, R> Default for PatternSet<'a, R> {
    fn default() -> Self {
        Self { entries: IndexMap::new() }
    }
}

impl<'a, R> PatternSet<'a, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`PatternSet::insert`].
    pub fn with(mut self, pattern: impl Into<String>, handler: impl Fn(&[Value]) -> R + 'a) -> Self {
        self.insert(pattern, handler);
        self
    }

    /// Re-inserting a pattern replaces its handler but keeps its position.
    pub fn insert(&mut self, pattern: impl Into<String>, handler: impl Fn(&[Value]) -> R + 'a) {
        let pattern = pattern.into();
        let spec = pattern::parse(&pattern);
        self.entries.insert(pattern, Entry { spec, handler: Box::new(handler) });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Any key that parses to `_` (surrounding whitespace allowed) counts.
    pub fn has_fallback(&self) -> bool {
        self.fallback_entry().is_some()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Patterns other than the fallback, with their parsed form.
    pub fn specs(&self) -> impl Iterator<Item = (&str, &PatternSpec)> {
        self.entries
            .iter()
            .filter(|(_, e)| !e.spec.is_wildcard())
            .map(|(k, e)| (k.as_str(), &e.spec))
    }

    pub fn spec(&self, pattern: &str) -> Option<&PatternSpec> {
        self.entries.get(pattern).map(|e| &e.spec)
    }

    fn fallback_entry(&self) -> Option<&Entry<'a, R>> {
        self.entries.get(WILDCARD).or_else(|| self.entries.values().find(|e| e.spec.is_wildcard()))
    }
}

impl<'a, R: From<bool>> PatternSet<'a, R> {
    /// Run the handler registered under `pattern`, or the fallback if there
    /// is none.
    pub fn invoke(&self, pattern: &str, args: &[Value]) -> R {
        match self.entries.get(pattern) {
            Some(entry) => (entry.handler)(args),
            None => self.fallback(),
        }
    }

    /// The `_` handler with no arguments. A set declared without one answers
    /// `false`.
    pub fn fallback(&self) -> R {
        match self.fallback_entry() {
            Some(entry) => (entry.handler)(&[]),
            None => R::from(false),
        }
    }
}

impl<'a, R> fmt::Debug for PatternSet<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|(k, e)| (k, &e.spec))).finish()
    }
}

// ------------------------------- Tests ------------------------------------ //
