use crate::pattern::PatternSpec;
use crate::pattern_set::PatternSet;
use crate::value::Value;

use super::scalar::literal_eq;

/// Match a list subject of length L against the `[...]` patterns of exactly
/// L elements.
///
/// Literal positions must equal the element at that position; wildcards and
/// bindings accept anything. Of the surviving candidates the one with the
/// fewest open positions wins, then declaration order. Elements under
/// binding positions are passed to the handler left to right.
pub fn match_list<R: From<bool>>(set: &PatternSet<'_, R>, subject: &[Value]) -> R {
    let mut best: Option<Candidate<'_>> = None;

    for (pattern, spec) in set.specs() {
        let Some(elems) = spec.as_list() else { continue };
        if elems.len() != subject.len() {
            continue;
        }
        let mut bound = Vec::new();
        if !bind_positions(elems, subject, &mut bound) {
            tracing::trace!(pattern, "literal mismatch");
            continue;
        }
        let open = open_positions(elems);
        if best.as_ref().is_none_or(|b| open < b.open) {
            best = Some(Candidate { pattern, open, bound });
        }
    }

    match best {
        Some(Candidate { pattern, bound, .. }) => {
            tracing::trace!(pattern, bindings = bound.len(), "list match");
            set.invoke(pattern, &bound)
        }
        None => {
            tracing::debug!(len = subject.len(), "no list pattern matched, using fallback");
            set.fallback()
        }
    }
}

struct Candidate<'s> {
    pattern: &'s str,
    open: usize,
    bound: Vec<Value>,
}

/// Walk pattern and subject in lockstep, collecting the values under
/// bindings. Returns `false` on the first mismatch.
fn bind_positions(pats: &[PatternSpec], values: &[Value], bound: &mut Vec<Value>) -> bool {
    for (pat, value) in pats.iter().zip(values) {
        let ok = match pat {
            PatternSpec::Wildcard => true,
            PatternSpec::Ident(_) => {
                bound.push(value.clone());
                true
            }
            PatternSpec::Literal(lit) => literal_eq(lit, value),
            PatternSpec::List(inner) => match value.as_list() {
                Some(xs) if xs.len() == inner.len() => bind_positions(inner, xs, bound),
                _ => false,
            },
            PatternSpec::Cons(_) => false,
        };
        if !ok {
            return false;
        }
    }
    true
}

/// Wildcard and binding leaves, counted through nested lists.
fn open_positions(pats: &[PatternSpec]) -> usize {
    pats.iter()
        .map(|p| match p {
            PatternSpec::Wildcard | PatternSpec::Ident(_) => 1,
            PatternSpec::List(inner) => open_positions(inner),
            PatternSpec::Literal(_) | PatternSpec::Cons(_) => 0,
        })
        .sum()
}

// ------------------------------- Tests ------------------------------------ //
