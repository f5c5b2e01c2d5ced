use anyhow::{Context, Result};
use serde_json::Value;

/// Sum integer tokens; the empty sequence sums to zero.
pub fn execute(tokens: &[String]) -> Result<Value> {
    let mut total: i64 = 0;
    for token in tokens {
        let term: i64 = token
            .parse()
            .with_context(|| format!("Invalid integer token {token:?}"))?;
        total = total
            .checked_add(term)
            .with_context(|| format!("Sum overflows while adding {term}"))?;
    }
    Ok(Value::from(total))
}
