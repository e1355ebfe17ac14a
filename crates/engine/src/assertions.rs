//! Assertion evaluation.
//!
//! Evaluates a single assertion against a captured response. A response
//! body that is not valid JSON fails any JSON-path assertion rather than
//! raising a separate error class.

use clinicheck_domain::{Assertion, AssertionResult, CheckResponse};

/// Evaluates one assertion against a response.
#[must_use]
pub fn evaluate(assertion: &Assertion, response: &CheckResponse) -> AssertionResult {
    match assertion {
        Assertion::StatusCode { expected } => check_status(assertion, response, *expected),
        Assertion::ContentType { expected } => check_content_type(assertion, response, expected),
        Assertion::JsonPathEquals { path, expected } => {
            check_json_path_equals(assertion, response, path, expected)
        }
        Assertion::JsonPathCountAtLeast { path, min } => {
            check_json_path_count(assertion, response, path, *min)
        }
    }
}

fn check_status(assertion: &Assertion, response: &CheckResponse, expected: u16) -> AssertionResult {
    let actual = response.status;
    if actual == expected {
        AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            actual.to_string(),
            format!("expected status {expected}, got {actual}"),
        )
    }
}

fn check_content_type(
    assertion: &Assertion,
    response: &CheckResponse,
    expected: &str,
) -> AssertionResult {
    match response.content_type() {
        Some(actual) if actual.contains(expected) => {
            AssertionResult::pass_with_value(assertion.clone(), actual.clone())
        }
        Some(actual) => AssertionResult::fail_with_value(
            assertion.clone(),
            actual.clone(),
            format!("Content-Type '{actual}' does not contain '{expected}'"),
        ),
        None => AssertionResult::fail(assertion.clone(), "no Content-Type header present"),
    }
}

fn check_json_path_equals(
    assertion: &Assertion,
    response: &CheckResponse,
    path: &str,
    expected: &serde_json::Value,
) -> AssertionResult {
    let json = match parse_body(assertion, response) {
        Ok(json) => json,
        Err(failure) => return failure,
    };
    match query_json_path(&json, path) {
        Ok(Some(value)) => {
            if &value == expected {
                AssertionResult::pass_with_value(assertion.clone(), value.to_string())
            } else {
                AssertionResult::fail_with_value(
                    assertion.clone(),
                    value.to_string(),
                    format!("JSON path '{path}': expected {expected}, got {value}"),
                )
            }
        }
        Ok(None) => AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found")),
        Err(e) => AssertionResult::fail(assertion.clone(), format!("invalid JSON path '{path}': {e}")),
    }
}

fn check_json_path_count(
    assertion: &Assertion,
    response: &CheckResponse,
    path: &str,
    min: usize,
) -> AssertionResult {
    let json = match parse_body(assertion, response) {
        Ok(json) => json,
        Err(failure) => return failure,
    };
    match query_json_path(&json, path) {
        Ok(Some(serde_json::Value::Array(items))) => {
            let len = items.len();
            if len >= min {
                AssertionResult::pass_with_value(assertion.clone(), format!("{len} elements"))
            } else {
                AssertionResult::fail_with_value(
                    assertion.clone(),
                    format!("{len} elements"),
                    format!("JSON path '{path}': expected >= {min} elements, got {len}"),
                )
            }
        }
        Ok(Some(value)) => AssertionResult::fail_with_value(
            assertion.clone(),
            value.to_string(),
            format!("JSON path '{path}' is not an array"),
        ),
        Ok(None) => AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found")),
        Err(e) => AssertionResult::fail(assertion.clone(), format!("invalid JSON path '{path}': {e}")),
    }
}

/// Parses the response body as JSON, or produces the failed result.
fn parse_body(
    assertion: &Assertion,
    response: &CheckResponse,
) -> Result<serde_json::Value, AssertionResult> {
    serde_json::from_str(&response.body).map_err(|e| {
        AssertionResult::fail(
            assertion.clone(),
            format!("response body is not valid JSON: {e}"),
        )
    })
}

/// Queries a JSON value with a dot path.
///
/// Accepts an optional leading `$` or `$.`, so `_embedded.clinics`,
/// `$.status` and `items[0].id` are all valid.
fn query_json_path(json: &serde_json::Value, path: &str) -> Result<Option<serde_json::Value>, String> {
    let path = path.trim();
    let path = path.strip_prefix('$').unwrap_or(path);
    let path = path.strip_prefix('.').unwrap_or(path);
    if path.is_empty() {
        return Ok(Some(json.clone()));
    }

    let mut current = json.clone();
    for segment in split_path_segments(path) {
        if let Some((name, index)) = parse_array_access(&segment) {
            if !name.is_empty() {
                current = match current.get(&name) {
                    Some(v) => v.clone(),
                    None => return Ok(None),
                };
            }
            let idx: usize = index
                .parse()
                .map_err(|_| format!("invalid array index: {index}"))?;
            current = match current.get(idx) {
                Some(v) => v.clone(),
                None => return Ok(None),
            };
        } else {
            current = match current.get(&segment) {
                Some(v) => v.clone(),
                None => return Ok(None),
            };
        }
    }

    Ok(Some(current))
}

/// Splits a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parses array access like `clinics[0]` into (`clinics`, `0`).
fn parse_array_access(segment: &str) -> Option<(String, String)> {
    let bracket_start = segment.find('[')?;
    if !segment.ends_with(']') {
        return None;
    }
    let name = segment[..bracket_start].to_string();
    let index = segment[bracket_start + 1..segment.len() - 1].to_string();
    Some((name, index))
}
