use crate::pattern::{Literal, LiteralValue};
use crate::pattern_set::PatternSet;
use crate::value::Value;

/// First literal pattern (declaration order) equal to `subject`, else `_`.
/// Empty subjects (`null`, `""`) always take the fallback.
pub fn match_scalar<R: From<bool>>(set: &PatternSet<'_, R>, subject: &Value) -> R {
    if subject.is_empty_scalar() {
        tracing::trace!("empty scalar, using fallback");
        return set.fallback();
    }
    let hit = set
        .specs()
        .find(|(_, spec)| spec.as_literal().is_some_and(|lit| literal_eq(lit, subject)));
    match hit {
        Some((pattern, _)) => {
            tracing::trace!(pattern, "scalar match");
            set.invoke(pattern, &[])
        }
        None => {
            tracing::debug!(?subject, "no literal matched, using fallback");
            set.fallback()
        }
    }
}

/// Numbers compare numerically against numeric literals, strings compare
/// against the unquoted text, booleans against `true`/`false`.
pub(crate) fn literal_eq(lit: &Literal, subject: &Value) -> bool {
    match subject {
        Value::Int(i) => match lit.value {
            LiteralValue::Int(j) => *i == j,
            _ => lit.as_f64().is_some_and(|f| *i as f64 == f),
        },
        Value::Float(x) => lit.as_f64().is_some_and(|f| *x == f),
        Value::Str(s) => *s == lit.text,
        Value::Bool(b) => lit.text == if *b { "true" } else { "false" },
        Value::Null | Value::List(_) | Value::Object(_) => false,
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn strings() -> PatternSet<'static, Value> {
        PatternSet::new()
            .with("\"foo\"", |_| "foo".into())
            .with("\"bar\"", |_| "bar".into())
            .with("_", |_| "undefined".into())
    }

    fn numbers() -> PatternSet<'static, Value> {
        PatternSet::new()
            .with("\"1\"", |_| "first".into())
            .with("\"2\"", |_| "second".into())
            .with("_", |_| "undefined".into())
    }

    #[test]
    fn strings_match_by_content() {
        assert_eq!(match_scalar(&strings(), &"foo".into()), Value::from("foo"));
        assert_eq!(match_scalar(&strings(), &"bar".into()), Value::from("bar"));
        assert_eq!(match_scalar(&strings(), &"baz".into()), Value::from("undefined"));
    }

    #[test]
    fn numbers_match_numeric_literals() {
        assert_eq!(match_scalar(&numbers(), &Value::from(1)), Value::from("first"));
        assert_eq!(match_scalar(&numbers(), &Value::from(2.0)), Value::from("second"));
        assert_eq!(match_scalar(&numbers(), &Value::from(24)), Value::from("undefined"));
        assert_eq!(match_scalar(&numbers(), &"1".into()), Value::from("first"));
    }

    #[test]
    fn empty_subjects_fall_through() {
        let set: PatternSet<Value> = PatternSet::new().with("\"\"", |_| "empty".into()).with("_", |_| "fallback".into());
        assert_eq!(match_scalar(&set, &"".into()), Value::from("fallback"));
        assert_eq!(match_scalar(&set, &Value::Null), Value::from("fallback"));
    }

    #[test]
    fn first_declared_literal_wins() {
        let set: PatternSet<i64> = PatternSet::new().with("\"1\"", |_| 1).with("\"1.0\"", |_| 2).with("_", |_| 0);
        assert_eq!(match_scalar(&set, &Value::from(1)), 1);
        assert_eq!(match_scalar(&set, &"1.0".into()), 2);
    }

    #[test]
    fn booleans_and_zero_are_ordinary() {
        let set: PatternSet<i64> = PatternSet::new().with("\"true\"", |_| 1).with("\"0\"", |_| 2).with("_", |_| 0);
        assert_eq!(match_scalar(&set, &Value::Bool(true)), 1);
        assert_eq!(match_scalar(&set, &Value::Bool(false)), 0);
        assert_eq!(match_scalar(&set, &Value::from(0)), 2);
    }

    #[test]
    fn non_literal_patterns_never_match_scalars() {
        let set: PatternSet<i64> = PatternSet::new().with("foo", |_| 1).with("[\"foo\"]", |_| 2);
        assert_eq!(match_scalar(&set, &"foo".into()), 0);
    }
}
