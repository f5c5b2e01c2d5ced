use std::io::Read;

use anyhow::{bail, Context, Result};
use isoshim_core::variables::{self, Scope};
use isoshim_core::VariableValue;
use serde_json::Value;
use tracing::info;

/// Evaluate `expression` against a JSON scope read from `input`.
pub fn execute(expression: &str, mut input: impl Read) -> Result<Value> {
    let mut raw = String::new();
    input
        .read_to_string(&mut raw)
        .context("Failed to read scope from stdin")?;

    let scope = parse_scope(&raw)?;

    info!(
        "Evaluating expression against {} scope variables",
        scope.len()
    );

    let rendered = variables::eval_variables(expression, &scope)
        .with_context(|| format!("Failed to evaluate expression {expression:?}"))?;

    Ok(Value::String(rendered))
}

/// A scope is a JSON object whose members are strings or integers.
fn parse_scope(raw: &str) -> Result<Scope> {
    let doc: Value = serde_json::from_str(raw).context("Failed to parse scope JSON")?;

    let Value::Object(members) = doc else {
        bail!("Scope must be a JSON object mapping variable names to values");
    };

    let mut scope = Scope::new();
    for (name, value) in members {
        let value = match value {
            Value::String(s) => VariableValue::Str(s),
            Value::Number(ref n) => match n.as_i64() {
                Some(i) => VariableValue::Int(i),
                None => bail!("Scope variable {name:?} must be a string or integer"),
            },
            _ => bail!("Scope variable {name:?} must be a string or integer"),
        };
        scope.insert(name, value);
    }
    Ok(scope)
}
