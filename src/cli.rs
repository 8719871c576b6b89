//! Minimal CLI: parse | arity | check | eval
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde_json::{json, Value as Json};

use pattern_dispatch::{PatternSet, Value};

use crate::jq_exec::JqFilter;
use crate::path_de::{load_pattern_file, PatternFile};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// dispatch JSON documents through string-encoded patterns
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print the parsed form of each pattern
    Parse(PatternArgs),
    /// print the binding count of each pattern
    Arity(PatternArgs),
    /// validate patterns against the strict grammar
    Check(CheckArgs),
    /// match every input document against a pattern file
    Eval(EvalOut),
}

#[derive(Args, Debug, Clone)]
struct PatternArgs {
    /// one or more pattern strings, e.g. '["foo", bar]'
    #[arg(num_args = 1.., required = true)]
    patterns: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct CheckArgs {
    /// pattern strings to validate
    patterns: Vec<String>,

    /// also validate every key of this pattern file
    #[arg(long)]
    pattern_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct EvalOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// JSON object mapping pattern strings to response templates
    #[arg(long, short)]
    patterns: PathBuf,

    /// dispatch on argument count (each document must be an array)
    #[arg(long)]
    positional: bool,

    /// reject malformed patterns before matching
    #[arg(long)]
    strict: bool,

    /// output .ndjson file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(&self, mut apply: impl FnMut(Json) -> Result<()>) -> Result<()> {
        let jq = self.jq_expr.as_deref().map(JqFilter::compile).transpose()?;
        if let Some(jq) = jq.as_ref() {
            tracing::debug!(filter = jq.source(), "jq filter compiled");
        }
        let source_paths = resolve_file_path_patterns(&self.input)?;
        for source_path in source_paths {
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {}", source_path.display()))?;
            let documents: Vec<&str> = if self.ndjson {
                source.lines().filter(|l| !l.trim().is_empty()).collect()
            } else {
                vec![source.as_str()]
            };
            for (line, document) in documents.into_iter().enumerate() {
                let json_value = serde_json::from_str::<Json>(document).with_context(|| {
                    format!("failed to parse JSON ({}, document {})", source_path.display(), line + 1)
                })?;
                let json_value = match self.json_pointer.as_deref() {
                    None => json_value,
                    Some(ptr) => match json_value.pointer(ptr) {
                        Some(node) => node.clone(),
                        None => {
                            tracing::debug!(ptr, path = %source_path.display(), "pointer matched nothing, skipping");
                            continue;
                        }
                    },
                };
                match jq.as_ref() {
                    None => apply(json_value)?,
                    Some(jq) => {
                        let results = jq.run(&json_value).with_context(|| {
                            format!("failed to apply jq expression to {}", source_path.display())
                        })?;
                        for result in results {
                            apply(result)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Parse(target) => {
                let parsed: Vec<Json> = target
                    .patterns
                    .iter()
                    .map(|p| json!({ "pattern": p, "spec": pattern_dispatch::parse(p) }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            }
            Command::Arity(target) => {
                let arities = pattern_dispatch::arities(&target.patterns);
                println!("{}", serde_json::to_string_pretty(&arities)?);
            }
            Command::Check(target) => target.check()?,
            Command::Eval(target) => {
                let output = target.evaluate()?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(out, &output).with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    print!("{output}");
                }
            }
        }
        Ok(())
    }
}

impl CheckArgs {
    fn check(&self) -> Result<()> {
        let mut patterns = self.patterns.clone();
        if let Some(path) = self.pattern_file.as_ref() {
            patterns.extend(load_pattern_file(path)?.into_keys());
        }
        if patterns.is_empty() {
            bail!("nothing to check: pass patterns or --pattern-file");
        }
        let mut failures = 0usize;
        for pattern in &patterns {
            match pattern_dispatch::parse_strict(pattern) {
                Ok(_) => println!("{} {pattern}", "ok".green()),
                Err(error) => {
                    failures += 1;
                    println!("{} {pattern}: {error}", "error".red().bold());
                }
            }
        }
        if failures > 0 {
            bail!("{failures} of {} patterns are malformed", patterns.len());
        }
        Ok(())
    }
}

impl EvalOut {
    /// One NDJSON line per processed document.
    fn evaluate(&self) -> Result<String> {
        let file = load_pattern_file(&self.patterns)?;
        if self.strict {
            for pattern in file.keys() {
                pattern_dispatch::parse_strict(pattern)
                    .with_context(|| format!("in {}", self.patterns.display()))?;
            }
        }
        let set = build_pattern_set(&file);
        tracing::debug!(patterns = set.len(), fallback = set.has_fallback(), "pattern set loaded");

        let mut output = String::new();
        self.input_settings.load_process(|document| {
            let subject = Value::from(document);
            let result = if self.positional {
                let Some(args) = subject.as_list() else {
                    bail!("--positional expects every document to be an array, got {}", subject.to_json());
                };
                pattern_dispatch::dispatch(&set, args)
            } else {
                pattern_dispatch::match_value(&set, &subject)
            };
            output.push_str(&result.to_string());
            output.push('\n');
            Ok(())
        })?;
        Ok(output)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Every pattern answers `{"pattern", "bindings", "result"}`; `"$N"` strings
/// in a template are replaced by the N-th binding.
fn build_pattern_set(file: &PatternFile) -> PatternSet<'_, Json> {
    let mut set = PatternSet::new();
    for (pattern, template) in file {
        set.insert(pattern.clone(), move |args: &[Value]| {
            let bindings: Vec<Json> = args.iter().map(Value::to_json).collect();
            json!({
                "pattern": pattern,
                "result": render(template, &bindings),
                "bindings": bindings,
            })
        });
    }
    set
}

fn render(template: &Json, bindings: &[Json]) -> Json {
    match template {
        Json::String(s) => s
            .strip_prefix('$')
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| bindings.get(n).cloned())
            .unwrap_or_else(|| template.clone()),
        Json::Array(xs) => Json::Array(xs.iter().map(|x| render(x, bindings)).collect()),
        Json::Object(m) => Json::Object(m.iter().map(|(k, v)| (k.clone(), render(v, bindings))).collect()),
        other => other.clone(),
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
