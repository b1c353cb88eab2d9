// src/input.rs
//! Interactive cash-flow entry
//!
//! Reads a period count followed by one cash flow per period. Prompts go to
//! `output` and answers come from `input`, so the same code drives stdin in
//! the binary and in-memory buffers in tests.

use crate::cashflow::CashFlows;
use crate::error::{FinError, FinResult};
use std::io::{BufRead, Write};

const PERIODS_PROMPT: &str = "Enter number of periods (including t=0): ";

/// Parse a period count: a positive integer
pub fn parse_period_count(raw: &str) -> FinResult<usize> {
    let trimmed = raw.trim();
    let count = trimmed.parse::<usize>().map_err(|_| FinError::InvalidInput {
        field: "number of periods".to_string(),
        value: trimmed.to_string(),
        reason: "must be a positive integer".to_string(),
    })?;
    if count == 0 {
        return Err(FinError::InvalidInput {
            field: "number of periods".to_string(),
            value: trimmed.to_string(),
            reason: "at least one period (t=0) is required".to_string(),
        });
    }
    Ok(count)
}

/// Parse the cash flow entered for period `t`
pub fn parse_cash_flow(t: usize, raw: &str) -> FinResult<f64> {
    let trimmed = raw.trim();
    let field = format!("cash flow at t={}", t);
    let value = trimmed.parse::<f64>().map_err(|_| FinError::InvalidInput {
        field: field.clone(),
        value: trimmed.to_string(),
        reason: "not a number".to_string(),
    })?;
    if !value.is_finite() {
        return Err(FinError::InvalidInput {
            field,
            value: trimmed.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(value)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> FinResult<String> {
    write!(output, "{}", text).map_err(|e| FinError::io("writing prompt", e))?;
    output
        .flush()
        .map_err(|e| FinError::io("writing prompt", e))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| FinError::io("reading input", e))?;
    if read == 0 {
        return Err(FinError::InvalidInput {
            field: text.trim().trim_end_matches(':').to_string(),
            value: String::new(),
            reason: "unexpected end of input".to_string(),
        });
    }
    Ok(line)
}

/// Prompt for a period count and then each period's cash flow
pub fn read_cash_flows<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> FinResult<CashFlows> {
    let periods = parse_period_count(&prompt(input, output, PERIODS_PROMPT)?)?;

    let mut values = Vec::with_capacity(periods);
    for t in 0..periods {
        let text = format!("Enter cash flow at time t={}: ", t);
        values.push(parse_cash_flow(t, &prompt(input, output, &text)?)?);
    }
    tracing::debug!(periods, "Cash flows entered");
    CashFlows::try_new(values)
}
