//! jq pre-processing of input documents, compiled once per run.
use jaq_core::{compile::Undefined, load, Compiler, Ctx, Filter, Native, RcIter};
use jaq_json::Val;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JqError {
    #[error("jq filter `{filter}` does not parse: {detail}")]
    Parse { filter: String, detail: String },
    #[error("jq filter `{filter}` uses undefined {names}")]
    Undefined { filter: String, names: String },
    #[error("jq runtime error: {0}")]
    Runtime(String),
}

/// A compiled jq program with the standard and JSON libraries loaded.
pub struct JqFilter {
    source: String,
    filter: Filter<Native<Val>>,
}

impl JqFilter {
    pub fn compile(source: &str) -> Result<Self, JqError> {
        let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
        let arena = load::Arena::default();
        let modules = loader
            .load(&arena, load::File { code: source, path: () })
            .map_err(|errs| parse_error(source, errs))?;
        let filter = Compiler::default()
            .with_funs(jaq_std::funs().chain(jaq_json::funs()))
            .compile(modules)
            .map_err(|errs| undefined_error(source, errs))?;
        Ok(Self { source: source.to_string(), filter })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Every output of the program for one document, in emission order.
    pub fn run(&self, input: &Value) -> Result<Vec<Value>, JqError> {
        let inputs = RcIter::new(core::iter::empty());
        self.filter
            .run((Ctx::new([], &inputs), Val::from(input.clone())))
            .map(|item| item.map(Value::from).map_err(|e| JqError::Runtime(e.to_string())))
            .collect()
    }
}

impl std::fmt::Debug for JqFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("JqFilter").field(&self.source).finish()
    }
}

fn parse_error(source: &str, errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> JqError {
    let detail = errs.iter().map(|(_, err)| format!("{err:?}")).collect::<Vec<_>>().join("; ");
    JqError::Parse { filter: source.to_string(), detail }
}

fn undefined_error(source: &str, errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> JqError {
    let names = errs
        .iter()
        .flat_map(|(_, list)| list.iter().map(|(name, kind)| format!("`{name}` ({kind:?})")))
        .collect::<Vec<_>>()
        .join(", ");
    JqError::Undefined { filter: source.to_string(), names }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn comma_emits_every_output_in_order() {
        let filter = JqFilter::compile(".a, .b").unwrap();
        let got = filter.run(&json!({"a": "x", "b": [1, 2]})).unwrap();
        assert_eq!(got, vec![json!("x"), json!([1, 2])]);
    }

    #[test]
    fn one_compilation_serves_many_documents() {
        let filter = JqFilter::compile(".[] | select(. > 1)").unwrap();
        assert_eq!(filter.run(&json!([1, 2, 3])).unwrap(), vec![json!(2), json!(3)]);
        assert_eq!(filter.run(&json!([0])).unwrap(), Vec::<Value>::new());
        assert_eq!(filter.source(), ".[] | select(. > 1)");
    }

    #[test]
    fn bad_programs_are_reported() {
        assert!(matches!(JqFilter::compile(".a |"), Err(JqError::Parse { .. })));
        match JqFilter::compile("no_such_function") {
            Err(JqError::Undefined { names, .. }) => assert!(names.contains("no_such_function"), "{names}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn runtime_errors_surface() {
        let filter = JqFilter::compile(".a").unwrap();
        assert!(matches!(filter.run(&json!(3)), Err(JqError::Runtime(_))));
    }
}
