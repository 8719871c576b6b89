use std::path::Path;

use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;

/// Pattern → response template, in declaration order.
pub type PatternFile = IndexMap<String, serde_json::Value>;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path} → {}", err.into_inner())
    })
}

pub fn load_pattern_file(path: &Path) -> Result<PatternFile> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pattern file {}", path.display()))?;
    from_str_with_path(&src).with_context(|| format!("invalid pattern file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declaration_order() {
        let file: PatternFile = from_str_with_path(r#"{"[a, b]": 1, "\"x\"": 2, "_": 3}"#).unwrap();
        assert_eq!(file.keys().collect::<Vec<_>>(), vec!["[a, b]", "\"x\"", "_"]);
    }

    #[test]
    fn errors_carry_the_path() {
        let err = from_str_with_path::<IndexMap<String, Vec<u8>>>(r#"{"a": [1, "x"]}"#).unwrap_err();
        assert!(err.to_string().contains("a[1]"), "{err}");
    }
}
