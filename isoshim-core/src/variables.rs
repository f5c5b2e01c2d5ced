//! `<(VAR)` substitution over a variable scope
//!
//! Implements the `.isolate` dialect's variable references: `<(FOO)` is
//! replaced by the scope's binding for `FOO`, everything else passes through
//! verbatim, including unmatched `<(` sequences.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::EvalError;
use crate::options::VariableValue;

/// Pattern a variable name must match, shared with the option parser.
pub const VALID_VARIABLE_NAME: &str = "[A-Za-z_][A-Za-z_0-9]*";

static VARIABLE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"<\({VALID_VARIABLE_NAME}\)")).unwrap());

/// Mapping of variable names to values, ordered for stable serialization.
pub type Scope = BTreeMap<String, VariableValue>;

/// Replace every `<(VAR)` reference in `expression` with its scope binding.
///
/// A reference to a variable the scope does not bind is an error; text that
/// does not form a well-formed reference is copied through unchanged.
pub fn eval_variables(expression: &str, scope: &Scope) -> Result<String, EvalError> {
    let mut out = String::with_capacity(expression.len());
    let mut tail = 0;

    for reference in VARIABLE_REF.find_iter(expression) {
        // Strip the "<(" and ")" delimiters to recover the variable name.
        let name = &expression[reference.start() + 2..reference.end() - 1];

        let value = scope
            .get(name)
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_owned()))?;

        out.push_str(&expression[tail..reference.start()]);
        out.push_str(&value.to_string());
        tail = reference.end();
    }

    out.push_str(&expression[tail..]);
    Ok(out)
}
