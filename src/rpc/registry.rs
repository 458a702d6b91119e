use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::RpcError;
use crate::core::handler::Handler;

/// Method name → handler map.
///
/// Populated by the host application at setup time and read-only afterwards;
/// the dispatcher only resolves names out of it, so a shared `Arc<Registry>`
/// serves concurrent dispatches without locking.
#[derive(Clone, Default)]
pub struct Registry {
    methods: HashMap<String, Arc<dyn Handler>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name to a handler. Last registration wins.
    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn Handler>) {
        self.methods.insert(name.into(), handler);
    }

    pub fn resolve(&self, name: &str) -> Result<&Arc<dyn Handler>, RpcError> {
        self.methods.get(name).ok_or(RpcError::MethodNotFound)
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
