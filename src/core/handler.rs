//! The uniform invoke contract between the dispatcher and registered methods.
//!
//! Handlers accept either positional or named arguments and always go through
//! the same async path; [`sync_method`] and [`async_method`] adapt plain
//! closures into that shape at registration time, so the dispatcher has a
//! single invocation path regardless of how a method was written.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::wire::Params;

/// How a handler invocation can fail.
///
/// The distinction matters at the dispatch boundary: `InvalidParams` becomes
/// the protocol's invalid-params error, everything else becomes the opaque
/// internal error. Detail strings are for logs only and never reach the wire.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The call does not match the handler's declared signature.
    #[error("{0}")]
    InvalidParams(String),
    /// Any other failure inside the handler body.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// An invokable method bound to a name in the registry.
///
/// Implementations must tolerate concurrent invocation; the dispatcher shares
/// them across independent requests without locking.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn invoke(&self, params: Option<Params>) -> Result<Value, HandlerError>;
}

/// Reorder a call's arguments into the declared positional order.
///
/// Named maps are matched against `names`; unknown keys and missing required
/// parameters fail, as do positional arity mismatches. Absent params are a
/// zero-argument call.
pub fn bind_args(
    names: &[&str],
    params: Option<Params>,
) -> Result<Vec<Value>, HandlerError> {
    match params {
        None => {
            if names.is_empty() {
                Ok(Vec::new())
            } else {
                Err(HandlerError::InvalidParams(format!(
                    "expected {} parameter(s), got none",
                    names.len()
                )))
            }
        }
        Some(Params::Array(items)) => {
            if items.len() != names.len() {
                return Err(HandlerError::InvalidParams(format!(
                    "expected {} parameter(s), got {}",
                    names.len(),
                    items.len()
                )));
            }
            Ok(items)
        }
        Some(Params::Map(mut map)) => {
            if let Some(unknown) = map.keys().find(|k| !names.contains(&k.as_str())) {
                return Err(HandlerError::InvalidParams(format!(
                    "unknown parameter: {unknown}"
                )));
            }
            names
                .iter()
                .map(|name| {
                    map.remove(*name).ok_or_else(|| {
                        HandlerError::InvalidParams(format!("missing parameter: {name}"))
                    })
                })
                .collect()
        }
    }
}

/// Deserialize ordered arguments into the handler's typed tuple.
fn typed_args<A: DeserializeOwned>(args: Vec<Value>) -> Result<A, HandlerError> {
    // A zero-argument call deserializes the unit type.
    let value = if args.is_empty() {
        Value::Null
    } else {
        Value::Array(args)
    };
    serde_json::from_value(value).map_err(|e| HandlerError::InvalidParams(e.to_string()))
}

fn to_result<R: Serialize>(out: R) -> Result<Value, HandlerError> {
    serde_json::to_value(out).map_err(|e| HandlerError::Failed(e.into()))
}

struct SyncMethod<A, R, F> {
    names: &'static [&'static str],
    f: F,
    _marker: PhantomData<fn(A) -> R>,
}

#[async_trait]
impl<A, R, F> Handler for SyncMethod<A, R, F>
where
    A: DeserializeOwned + Send,
    R: Serialize,
    F: Fn(A) -> anyhow::Result<R> + Send + Sync,
{
    async fn invoke(&self, params: Option<Params>) -> Result<Value, HandlerError> {
        let args = typed_args(bind_args(self.names, params)?)?;
        to_result((self.f)(args)?)
    }
}

struct AsyncMethod<A, R, F, Fut> {
    names: &'static [&'static str],
    f: F,
    _marker: PhantomData<fn(A) -> (R, Fut)>,
}

#[async_trait]
impl<A, R, F, Fut> Handler for AsyncMethod<A, R, F, Fut>
where
    A: DeserializeOwned + Send,
    R: Serialize,
    F: Fn(A) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<R>> + Send,
{
    async fn invoke(&self, params: Option<Params>) -> Result<Value, HandlerError> {
        let args = typed_args(bind_args(self.names, params)?)?;
        to_result((self.f)(args).await?)
    }
}

/// Adapt a synchronous closure into the async [`Handler`] contract.
///
/// `names` declares the parameter names in positional order; `A` is the
/// matching tuple type (`()` for no parameters). The result of the closure is
/// serialized as the call's result value.
pub fn sync_method<A, R, F>(names: &'static [&'static str], f: F) -> Arc<dyn Handler>
where
    A: DeserializeOwned + Send + 'static,
    R: Serialize + 'static,
    F: Fn(A) -> anyhow::Result<R> + Send + Sync + 'static,
{
    Arc::new(SyncMethod {
        names,
        f,
        _marker: PhantomData,
    })
}

/// Adapt an async closure into the [`Handler`] contract. The dispatcher awaits
/// the returned future before encoding the reply.
pub fn async_method<A, R, F, Fut>(names: &'static [&'static str], f: F) -> Arc<dyn Handler>
where
    A: DeserializeOwned + Send + 'static,
    R: Serialize + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
{
    Arc::new(AsyncMethod {
        names,
        f,
        _marker: PhantomData,
    })
}
