//! Reference transports. Each one reads a raw message, calls
//! [`Dispatcher::dispatch`](crate::rpc::dispatcher::Dispatcher::dispatch) and
//! writes the reply if there is one; no protocol logic lives here.

pub mod http;
pub mod stdio;
pub mod tcp;
