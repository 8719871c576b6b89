//! Destructuring by name on top of the scalar matcher.
//!
//! `let_in(["a", "_", "b"], values)` builds a pattern set with one quoted
//! literal per named parameter, each answering its value, and a `_` entry
//! answering the values under wildcard parameters. Resolving a name is then
//! just a scalar match of that name against the set.
use crate::algorithms::extend;
use crate::matcher::match_scalar;
use crate::pattern::WILDCARD;
use crate::pattern_set::PatternSet;
use crate::value::Value;

pub struct LetIn {
    patterns: PatternSet<'static, Value>,
}

/// Pair `params` with `values` positionally.
///
/// Values past the end of `params` join the wildcard residual; parameters
/// past the end of `values` are bound to `Null`. A repeated name keeps its
/// last value.
pub fn let_in<S, I>(params: &[S], values: I) -> LetIn
where
    S: AsRef<str>,
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    let mut patterns = PatternSet::new();
    let mut residual = Vec::new();

    for (i, name) in params.iter().enumerate() {
        let value = values.get(i).cloned().unwrap_or(Value::Null);
        match name.as_ref() {
            WILDCARD => residual.push(value),
            name => patterns.insert(format!("\"{name}\""), move |_: &[Value]| value.clone()),
        }
    }

    let overflow = values.get(params.len()..).unwrap_or(&[]);
    let residual = Value::List(extend(&[residual.as_slice(), overflow]));
    patterns.insert(WILDCARD, move |_: &[Value]| residual.clone());

    LetIn { patterns }
}

impl LetIn {
    /// Resolve each of `requested` and pass the results, in order, to `body`.
    ///
    /// A name that was never declared resolves to the wildcard residual (a
    /// list, possibly empty) rather than failing.
    pub fn bind<S, R>(&self, requested: &[S], body: impl FnOnce(Vec<Value>) -> R) -> R
    where
        S: AsRef<str>,
    {
        let resolved = requested
            .iter()
            .map(|name| match_scalar(&self.patterns, &Value::from(name.as_ref())))
            .collect();
        body(resolved)
    }
}

// ------------------------------- Tests ------------------------------------ //
