//! Core types & traits: the protocol error taxonomy, the envelope codec, and
//! the handler contract. No I/O and no transport knowledge lives here.

pub mod error;
pub mod handler;
pub mod wire;
