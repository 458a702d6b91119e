//! # jsonrpc-dispatch
//!
//! A minimal, transport-agnostic JSON-RPC 2.0 request dispatcher.
//!
//! The core is a single entry point,
//! [`Dispatcher::dispatch`](rpc::dispatcher::Dispatcher::dispatch): raw request
//! text in, optional reply text out. Parsing, validation, method resolution,
//! handler invocation and envelope encoding happen inside; everything else —
//! how messages arrive and where replies go — belongs to a transport (see
//! [`api`] for the reference ones).
//!
//! Methods are registered up front as boxed async handlers; plain closures are
//! adapted at registration time with [`sync_method`] and [`async_method`]:
//!
//! ```
//! use jsonrpc_dispatch::{sync_method, Dispatcher, Registry};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut registry = Registry::new();
//! registry.register("add", sync_method(&["x", "y"], |(x, y): (i64, i64)| Ok(x + y)));
//!
//! let dispatcher = Dispatcher::new(registry);
//! let reply = dispatcher
//!     .dispatch(r#"{"jsonrpc":"2.0","method":"add","params":[2,3],"id":1}"#)
//!     .await
//!     .unwrap();
//! let v: serde_json::Value = serde_json::from_str(&reply).unwrap();
//! assert_eq!(v["result"], 5);
//! # }
//! ```

pub mod api;
pub mod core;
pub mod infra;
pub mod rpc;

pub use crate::core::error::{ErrorObject, RpcError};
pub use crate::core::handler::{async_method, sync_method, Handler, HandlerError};
pub use crate::core::wire::{Params, Request, JSONRPC_VERSION};
pub use crate::rpc::dispatcher::Dispatcher;
pub use crate::rpc::registry::Registry;
