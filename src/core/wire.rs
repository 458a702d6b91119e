//! Pure JSON-RPC 2.0 envelope codec. No I/O; the dispatcher owns the pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::core::error::RpcError;

pub const JSONRPC_VERSION: &str = "2.0";

/// Request parameters: positional or named, never any other shape.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Params {
    Array(Vec<Value>),
    Map(Map<String, Value>),
}

impl Params {
    pub fn len(&self) -> usize {
        match self {
            Params::Array(items) => items.len(),
            Params::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A validated request.
///
/// `id` keeps the absent/null distinction: `None` means the request carried no
/// `id` member at all (a notification, which must never be answered), while
/// `Some(Value::Null)` is a legitimately-null id that is echoed back.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: String,
    pub params: Option<Params>,
    pub id: Option<Value>,
}

impl Request {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Deserialize raw text into a generic JSON value.
///
/// Only syntax failures surface here; a well-formed value of the wrong shape
/// (non-object top level) passes through and fails validation instead.
pub fn parse_envelope(raw: &str) -> Result<Value, RpcError> {
    serde_json::from_str(raw).map_err(|e| {
        tracing::debug!(error = %e, "request text is not valid JSON");
        RpcError::Parse
    })
}

/// Recover the request id from a parsed value, if one is present.
///
/// Usable even when validation fails: an invalid request may still carry an id
/// worth echoing in the error envelope. Returns `None` (the absent marker) when
/// the value is not an object or has no `id` member.
pub fn recover_id(parsed: &Value) -> Option<Value> {
    parsed.as_object()?.get("id").cloned()
}

/// Check protocol shape: `jsonrpc` exactly "2.0", `method` a string, `params`
/// (when present) an array or an object.
pub fn validate_request(parsed: &Value) -> Result<Request, RpcError> {
    let obj = parsed.as_object().ok_or(RpcError::InvalidRequest)?;

    match obj.get("jsonrpc").and_then(Value::as_str) {
        Some(JSONRPC_VERSION) => {}
        _ => return Err(RpcError::InvalidRequest),
    }

    let method = obj
        .get("method")
        .and_then(Value::as_str)
        .ok_or(RpcError::InvalidRequest)?
        .to_owned();

    let params = match obj.get("params") {
        None => None,
        Some(Value::Array(items)) => Some(Params::Array(items.clone())),
        Some(Value::Object(map)) => Some(Params::Map(map.clone())),
        Some(_) => return Err(RpcError::InvalidRequest),
    };

    Ok(Request {
        method,
        params,
        id: obj.get("id").cloned(),
    })
}

/// Success envelope. All three members are always emitted, a null id included.
pub fn build_response(result: Value, id: Value) -> String {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "result": result,
        "id": id,
    })
    .to_string()
}

/// Error envelope. An absent id (`None`) serializes as null; that null is a
/// placeholder for "never knew the id", not a claim the request carried one.
pub fn build_error(error: RpcError, id: Option<&Value>) -> String {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "error": error.to_object(),
        "id": id.cloned().unwrap_or(Value::Null),
    })
    .to_string()
}
