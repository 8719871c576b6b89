//! Structural matcher: pick one handler from a [`PatternSet`] and run it.
//!
//! Two entry points:
//! - [`dispatch`] takes a positional argument list and selects by arity.
//! - [`match_value`] takes a single value, classifies it once as a scalar,
//!   list or object, and hands it to the evaluator for that shape.
//!
//! Neither ever fails. Anything that doesn't match lands on `_`.
pub mod list;
pub mod object;
pub mod scalar;

use crate::arity::ArityIndex;
use crate::pattern_set::PatternSet;
use crate::value::{Subject, TypeRegistry, Value};

pub use list::match_list;
pub use object::match_object;
pub use scalar::match_scalar;

/// Positional dispatch: the first pattern (declaration order) whose arity
/// equals `args.len()` receives all of `args`. No such pattern → `_()`.
pub fn dispatch<R: From<bool>>(set: &PatternSet<'_, R>, args: &[Value]) -> R {
    let index = ArityIndex::new(set);
    match index.first_with(args.len()) {
        Some(pattern) => {
            tracing::trace!(pattern, arity = args.len(), "arity dispatch");
            set.invoke(pattern, args)
        }
        None => {
            tracing::debug!(arity = args.len(), "no pattern with matching arity, using fallback");
            set.fallback()
        }
    }
}

/// Value-directed dispatch against the shared type registry.
pub fn match_value<R: From<bool>>(set: &PatternSet<'_, R>, subject: &Value) -> R {
    match_value_in(TypeRegistry::global(), set, subject)
}

pub fn match_value_in<R: From<bool>>(registry: &TypeRegistry, set: &PatternSet<'_, R>, subject: &Value) -> R {
    match Subject::classify(subject) {
        Subject::Scalar(v) => match_scalar(set, v),
        Subject::List(xs) => match_list(set, xs),
        Subject::Object(o) => match_object(registry, set, o),
    }
}

// ------------------------------- Tests ------------------------------------ //
