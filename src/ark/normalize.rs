//! Turns a raw upstream response into either a payload or an [`Error`].
//!
//! Generation calls and task queries are checked differently: generation
//! bodies carry a structured `error` object that wins over the HTTP status,
//! while task queries only fail on a non-2xx status. A task query answered
//! with 2xx and a non-zero `code` is passed through, since that code can mean
//! the task is still running.

use serde_json::Value;

use super::transport::RawResponse;
use super::types::ApiError;
use crate::error::{Error, Result};

const UNKNOWN_ERROR: &str = "unknown error";

pub fn check_generation(operation: &'static str, resp: RawResponse) -> Result<Value> {
    if let Some(err) = resp.body.as_ref().and_then(|b| b.get("error")) {
        if !err.is_null() {
            let api_err: ApiError = serde_json::from_value(err.clone()).unwrap_or_default();
            let message = api_err
                .message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(UNKNOWN_ERROR)
                .to_string();
            return Err(Error::Generation {
                operation,
                code: api_err.code_string(),
                message,
            });
        }
    }

    if !resp.status.is_success() {
        return Err(Error::Transport(resp.reason()));
    }

    Ok(resp.body.unwrap_or(Value::Null))
}

pub fn check_task_query(resp: RawResponse) -> Result<Value> {
    if !resp.status.is_success() {
        let msg = resp
            .body
            .as_ref()
            .and_then(|b| b.get("msg"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(String::from)
            .unwrap_or_else(|| resp.reason());
        return Err(Error::Transport(format!("video task query failed: {msg}")));
    }

    Ok(resp.body.unwrap_or(Value::Null))
}
