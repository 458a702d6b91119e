use std::sync::Arc;

use metrics::counter;
use serde_json::Value;

use crate::core::error::RpcError;
use crate::core::handler::HandlerError;
use crate::core::wire::{self, Request};
use crate::rpc::registry::Registry;

/// The request pipeline: parse → validate → resolve → invoke → encode.
///
/// One call per raw message; the caller (a transport) writes the returned text
/// if there is any. Cloning is cheap, the registry is shared and read-only.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Dispatch one raw request text.
    ///
    /// Returns the serialized reply envelope, or `None` when the request was a
    /// notification — a validated request with no `id` never gets a reply,
    /// success or failure. Input that fails parsing or validation never became
    /// a request, so those failures always produce an error envelope, with the
    /// id recovered from the parsed object when possible.
    pub async fn dispatch(&self, raw: &str) -> Option<String> {
        counter!("rpc_requests_total").increment(1);

        let parsed = match wire::parse_envelope(raw) {
            Ok(v) => v,
            // Id never known here; the envelope carries the null placeholder.
            Err(e) => return Some(self.fail(e, None)),
        };

        let req = match wire::validate_request(&parsed) {
            Ok(req) => req,
            Err(e) => {
                // Even an invalid request may carry a usable id.
                let id = wire::recover_id(&parsed);
                return Some(self.fail(e, id.as_ref()));
            }
        };

        tracing::debug!(
            method = %req.method,
            id = ?req.id,
            notification = req.is_notification(),
            "dispatching"
        );

        let outcome = self.execute(&req).await;

        match req.id {
            None => {
                if let Err(e) = outcome {
                    counter!("rpc_errors_total", "kind" => e.kind()).increment(1);
                    tracing::debug!(
                        method = %req.method,
                        error = %e,
                        "notification failed, reply suppressed"
                    );
                }
                None
            }
            Some(id) => Some(match outcome {
                Ok(result) => wire::build_response(result, id),
                Err(e) => self.fail(e, Some(&id)),
            }),
        }
    }

    async fn execute(&self, req: &Request) -> Result<Value, RpcError> {
        let handler = self.registry.resolve(&req.method).map_err(|e| {
            tracing::debug!(method = %req.method, "method not registered");
            e
        })?;

        // Await the handler to completion; it may suspend on its own work.
        // Argument mismatches map to InvalidParams, anything else stays opaque.
        match handler.invoke(req.params.clone()).await {
            Ok(value) => Ok(value),
            Err(HandlerError::InvalidParams(detail)) => {
                tracing::warn!(method = %req.method, %detail, "argument binding rejected");
                Err(RpcError::InvalidParams)
            }
            Err(HandlerError::Failed(e)) => {
                tracing::error!(method = %req.method, error = %e, "handler failed");
                Err(RpcError::Internal)
            }
        }
    }

    fn fail(&self, error: RpcError, id: Option<&Value>) -> String {
        counter!("rpc_errors_total", "kind" => error.kind()).increment(1);
        tracing::warn!(code = error.code(), kind = error.kind(), "request failed");
        wire::build_error(error, id)
    }
}
