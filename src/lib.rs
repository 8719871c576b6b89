//! String-encoded pattern matching over dynamic values.
//!
//! A [`PatternSet`] maps pattern strings to handlers. [`match_value`] picks
//! the handler whose pattern fits a single value (scalar literal, list shape,
//! or object type name); [`dispatch`] picks by the number of positional
//! arguments. [`let_in`] builds name-based destructuring on top of both.
//!
//! ```
//! use pattern_dispatch::{match_value, PatternSet, Value};
//!
//! let set = PatternSet::new()
//!     .with(r#"["foo", "bar", baz]"#, |args: &[Value]| args[0].clone())
//!     .with("_", |_: &[Value]| Value::from("undefined"));
//!
//! let subject = Value::from(vec!["foo", "bar", "cat"]);
//! assert_eq!(match_value(&set, &subject), Value::from("cat"));
//! ```
pub mod algorithms;
pub mod arity;
pub mod let_in;
pub mod matcher;
pub mod monad;
pub mod pattern;
pub mod pattern_set;
pub mod value;

pub use arity::{arities, arity, ArityIndex};
pub use let_in::{let_in, LetIn};
pub use matcher::{dispatch, match_value, match_value_in};
pub use pattern::{parse, parse_strict, PatternError, PatternSpec};
pub use pattern_set::PatternSet;
pub use value::{Named, Object, Subject, TypeRegistry, Value};
